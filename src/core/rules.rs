use super::types::{InvestmentHorizon, Priority, Recommendation, RiskTolerance};

/// Everything a rule may look at when deciding whether it fires.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    pub risk: RiskTolerance,
    pub horizon: InvestmentHorizon,
    pub monthly_savings: f64,
    pub current_savings: f64,
    pub age: i32,
}

#[derive(Debug, Clone, Copy)]
enum Details {
    Fixed(&'static str),
    ByRisk {
        conservative: &'static str,
        moderate: &'static str,
        aggressive: &'static str,
    },
}

impl Details {
    fn select(self, risk: RiskTolerance) -> &'static str {
        match self {
            Details::Fixed(text) => text,
            Details::ByRisk {
                conservative,
                moderate,
                aggressive,
            } => match risk {
                RiskTolerance::Conservative => conservative,
                RiskTolerance::Moderate => moderate,
                RiskTolerance::Aggressive => aggressive,
            },
        }
    }
}

struct Rule {
    category: &'static str,
    priority: Priority,
    action: &'static str,
    applies: fn(&RuleContext) -> bool,
    allocation: fn(&RuleContext) -> f64,
    details: Details,
}

impl Rule {
    fn evaluate(&self, ctx: &RuleContext) -> Option<Recommendation> {
        if !(self.applies)(ctx) {
            return None;
        }
        Some(Recommendation {
            category: self.category,
            priority: self.priority,
            action: self.action,
            allocation: (self.allocation)(ctx),
            details: self.details.select(ctx.risk),
        })
    }
}

pub const DEBT_MANAGEMENT: &str = "Debt Management";

// Evaluated top to bottom; the order is the display order.
const RULES: [Rule; 6] = [
    Rule {
        category: "Emergency Fund",
        priority: Priority::High,
        action: "Build 3-6 months of expenses in a high-yield savings account",
        applies: emergency_fund_applies,
        allocation: emergency_fund_allocation,
        details: Details::Fixed(
            "Target: High-yield savings (4-5% APY). Recommended: Marcus, Ally, or American Express savings accounts.",
        ),
    },
    Rule {
        category: "Retirement (401k/IRA)",
        priority: Priority::High,
        action: "Maximize tax-advantaged retirement accounts",
        applies: retirement_applies,
        allocation: retirement_allocation,
        details: Details::ByRisk {
            conservative: "Conservative mix: 30% stocks (VTI), 50% bonds (BND, VGIT), 20% stable value",
            moderate: "Balanced portfolio: 50% stocks (VTI, VXUS), 30% bonds (BND), 20% target-date fund",
            aggressive: "Focus on low-cost index funds: 70% stocks (VTI, VOO), 30% bonds (BND)",
        },
    },
    Rule {
        category: "Index Funds/ETFs",
        priority: Priority::Medium,
        action: "Invest in diversified index funds",
        applies: index_funds_apply,
        allocation: index_funds_allocation,
        details: Details::ByRisk {
            conservative: "Income-focused: SCHD (Dividend), VYM (High Dividend), VCIT (Corporate Bonds)",
            moderate: "Balanced growth: VOO (S&P 500), VTI (Total Market), VXUS (International), BND (Bonds)",
            aggressive: "Growth-focused: VTI (Total Market), QQQ (Tech), VGT (Technology), VXUS (International)",
        },
    },
    Rule {
        category: "Real Estate Investment",
        priority: Priority::Medium,
        action: "Consider REITs or real estate crowdfunding",
        applies: real_estate_applies,
        allocation: real_estate_allocation,
        details: Details::Fixed(
            "REITs: VNQ (Vanguard Real Estate), SCHH (Real Estate ETF) or platforms like Fundrise, RealtyMogul for direct investment.",
        ),
    },
    Rule {
        category: "Alternative Investments",
        priority: Priority::Low,
        action: "Small allocation to growth opportunities",
        applies: alternatives_apply,
        allocation: alternatives_allocation,
        details: Details::Fixed(
            "Consider: Small-cap growth funds (VB, IJR), sector-specific ETFs (clean energy, AI), or 5-10% in individual stocks. High risk - diversify heavily.",
        ),
    },
    Rule {
        category: DEBT_MANAGEMENT,
        priority: Priority::High,
        action: "Prioritize high-interest debt",
        applies: always,
        allocation: nothing,
        details: Details::Fixed(
            "Pay off credit cards and loans over 6% interest before investing. This guarantees a return equal to the interest rate.",
        ),
    },
];

/// Runs the rule table against one financial snapshot. Pure: the same context
/// always yields the same list in the same order, ending with debt management.
pub fn generate_recommendations(ctx: &RuleContext) -> Vec<Recommendation> {
    RULES.iter().filter_map(|rule| rule.evaluate(ctx)).collect()
}

fn emergency_fund_applies(ctx: &RuleContext) -> bool {
    ctx.current_savings < ctx.monthly_savings * 3.0
}

fn emergency_fund_allocation(ctx: &RuleContext) -> f64 {
    (ctx.monthly_savings * 0.5).min(ctx.monthly_savings)
}

fn retirement_applies(ctx: &RuleContext) -> bool {
    ctx.age < 65
}

fn retirement_allocation(ctx: &RuleContext) -> f64 {
    let share = match ctx.risk {
        RiskTolerance::Aggressive => 0.4,
        RiskTolerance::Moderate => 0.3,
        RiskTolerance::Conservative => 0.25,
    };
    ctx.monthly_savings * share
}

fn index_funds_apply(ctx: &RuleContext) -> bool {
    ctx.monthly_savings > 500.0 && ctx.current_savings > ctx.monthly_savings * 3.0
}

fn index_funds_allocation(ctx: &RuleContext) -> f64 {
    let share = match ctx.risk {
        RiskTolerance::Aggressive => 0.3,
        RiskTolerance::Moderate => 0.25,
        RiskTolerance::Conservative => 0.15,
    };
    ctx.monthly_savings * share
}

fn real_estate_applies(ctx: &RuleContext) -> bool {
    ctx.current_savings > 5_000.0 && ctx.monthly_savings > 300.0
}

fn real_estate_allocation(ctx: &RuleContext) -> f64 {
    ctx.monthly_savings * 0.15
}

fn alternatives_apply(ctx: &RuleContext) -> bool {
    ctx.risk == RiskTolerance::Aggressive && ctx.monthly_savings > 1_000.0
}

fn alternatives_allocation(ctx: &RuleContext) -> f64 {
    ctx.monthly_savings * 0.1
}

fn always(_: &RuleContext) -> bool {
    true
}

fn nothing(_: &RuleContext) -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn ctx(
        risk: RiskTolerance,
        monthly_savings: f64,
        current_savings: f64,
        age: i32,
    ) -> RuleContext {
        RuleContext {
            risk,
            horizon: InvestmentHorizon::FiveToTen,
            monthly_savings,
            current_savings,
            age,
        }
    }

    fn categories(recs: &[Recommendation]) -> Vec<&'static str> {
        recs.iter().map(|r| r.category).collect()
    }

    #[test]
    fn reference_moderate_profile_fires_four_rules() {
        let recs =
            generate_recommendations(&ctx(RiskTolerance::Moderate, 2_600.0, 10_000.0, 30));
        assert_eq!(
            categories(&recs),
            vec![
                "Retirement (401k/IRA)",
                "Index Funds/ETFs",
                "Real Estate Investment",
                DEBT_MANAGEMENT,
            ]
        );
        assert_approx(recs[0].allocation, 780.0);
        assert_approx(recs[1].allocation, 650.0);
        assert_approx(recs[2].allocation, 390.0);
        assert_eq!(recs[3].allocation, 0.0);
        assert!(recs[0].details.starts_with("Balanced portfolio"));
        assert!(recs[1].details.starts_with("Balanced growth"));
    }

    #[test]
    fn thin_savings_triggers_emergency_fund_first() {
        let recs =
            generate_recommendations(&ctx(RiskTolerance::Aggressive, 2_600.0, 6_000.0, 30));
        assert_eq!(
            categories(&recs),
            vec![
                "Emergency Fund",
                "Retirement (401k/IRA)",
                "Real Estate Investment",
                "Alternative Investments",
                DEBT_MANAGEMENT,
            ]
        );
        assert_eq!(recs[0].priority, Priority::High);
        assert_approx(recs[0].allocation, 1_300.0);
        assert_approx(recs[1].allocation, 1_040.0);
        assert_approx(recs[3].allocation, 260.0);
        assert_eq!(recs[3].priority, Priority::Low);
    }

    #[test]
    fn retirement_stops_at_sixty_five() {
        let at_64 = generate_recommendations(&ctx(RiskTolerance::Conservative, 100.0, 0.0, 64));
        let at_65 = generate_recommendations(&ctx(RiskTolerance::Conservative, 100.0, 0.0, 65));
        assert!(categories(&at_64).contains(&"Retirement (401k/IRA)"));
        assert!(!categories(&at_65).contains(&"Retirement (401k/IRA)"));
        assert_approx(at_64[1].allocation, 25.0);
    }

    #[test]
    fn conservative_index_funds_use_smallest_share() {
        let recs =
            generate_recommendations(&ctx(RiskTolerance::Conservative, 1_000.0, 4_000.0, 70));
        assert_eq!(categories(&recs), vec!["Index Funds/ETFs", DEBT_MANAGEMENT]);
        assert_approx(recs[0].allocation, 150.0);
        assert!(recs[0].details.starts_with("Income-focused"));
    }

    #[test]
    fn alternatives_need_aggressive_risk_and_surplus() {
        let moderate = generate_recommendations(&ctx(RiskTolerance::Moderate, 5_000.0, 0.0, 40));
        let lean = generate_recommendations(&ctx(RiskTolerance::Aggressive, 1_000.0, 0.0, 40));
        assert!(!categories(&moderate).contains(&"Alternative Investments"));
        assert!(!categories(&lean).contains(&"Alternative Investments"));
    }

    #[test]
    fn savings_exactly_three_months_blocks_emergency_fund_and_index_funds() {
        let recs =
            generate_recommendations(&ctx(RiskTolerance::Moderate, 1_000.0, 3_000.0, 70));
        assert_eq!(categories(&recs), vec![DEBT_MANAGEMENT]);
    }

    #[test]
    fn index_funds_need_more_than_five_hundred_saved_monthly() {
        let at_500 = generate_recommendations(&ctx(RiskTolerance::Moderate, 500.0, 4_000.0, 70));
        let at_501 = generate_recommendations(&ctx(RiskTolerance::Moderate, 501.0, 4_000.0, 70));
        assert!(!categories(&at_500).contains(&"Index Funds/ETFs"));
        assert!(categories(&at_501).contains(&"Index Funds/ETFs"));
    }

    #[test]
    fn real_estate_needs_more_than_five_thousand_saved() {
        let at_5000 = generate_recommendations(&ctx(RiskTolerance::Moderate, 400.0, 5_000.0, 70));
        let at_5001 = generate_recommendations(&ctx(RiskTolerance::Moderate, 400.0, 5_001.0, 70));
        let lean = generate_recommendations(&ctx(RiskTolerance::Moderate, 300.0, 6_000.0, 70));
        assert!(!categories(&at_5000).contains(&"Real Estate Investment"));
        assert!(categories(&at_5001).contains(&"Real Estate Investment"));
        assert!(!categories(&lean).contains(&"Real Estate Investment"));
    }

    #[test]
    fn alternatives_need_more_than_one_thousand_saved_monthly() {
        let at_1000 =
            generate_recommendations(&ctx(RiskTolerance::Aggressive, 1_000.0, 2_000.0, 70));
        let at_1001 =
            generate_recommendations(&ctx(RiskTolerance::Aggressive, 1_001.0, 2_000.0, 70));
        assert!(!categories(&at_1000).contains(&"Alternative Investments"));
        assert!(categories(&at_1001).contains(&"Alternative Investments"));
    }

    #[test]
    fn negative_savings_only_leaves_unconditional_rules() {
        let recs = generate_recommendations(&ctx(RiskTolerance::Moderate, -400.0, 0.0, 70));
        assert_eq!(categories(&recs), vec![DEBT_MANAGEMENT]);
    }

    #[test]
    fn horizon_does_not_change_output() {
        let base = ctx(RiskTolerance::Aggressive, 3_000.0, 20_000.0, 35);
        let expected = generate_recommendations(&base);
        for horizon in [
            InvestmentHorizon::ZeroToTwo,
            InvestmentHorizon::ThreeToFive,
            InvestmentHorizon::TenPlus,
        ] {
            let recs = generate_recommendations(&RuleContext { horizon, ..base });
            assert_eq!(recs, expected);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_debt_management_is_last_and_unique(
            risk_idx in 0usize..3,
            monthly_savings in -5_000i32..20_000,
            current_savings in -10_000i32..500_000,
            age in 0i32..100
        ) {
            let risk = [
                RiskTolerance::Conservative,
                RiskTolerance::Moderate,
                RiskTolerance::Aggressive,
            ][risk_idx];
            let recs = generate_recommendations(&ctx(
                risk,
                monthly_savings as f64,
                current_savings as f64,
                age,
            ));

            let debt_entries = recs.iter().filter(|r| r.category == DEBT_MANAGEMENT).count();
            prop_assert_eq!(debt_entries, 1);
            let last = recs.last().expect("list is never empty");
            prop_assert_eq!(last.category, DEBT_MANAGEMENT);
            prop_assert_eq!(last.priority, Priority::High);
            prop_assert_eq!(last.allocation, 0.0);
            prop_assert!(recs.len() <= 6);
        }

        #[test]
        fn prop_allocations_never_exceed_monthly_savings(
            risk_idx in 0usize..3,
            monthly_savings in 0i32..20_000,
            current_savings in 0i32..500_000,
            age in 18i32..90
        ) {
            let risk = [
                RiskTolerance::Conservative,
                RiskTolerance::Moderate,
                RiskTolerance::Aggressive,
            ][risk_idx];
            let ms = monthly_savings as f64;
            let ctx = ctx(risk, ms, current_savings as f64, age);

            let first = generate_recommendations(&ctx);
            for rec in &first {
                prop_assert!(rec.allocation <= ms * 0.5 + EPS);
                prop_assert!(rec.allocation >= 0.0);
            }
            prop_assert_eq!(first, generate_recommendations(&ctx));
        }
    }
}
