use serde::Serialize;

use super::budget::EMERGENCY_FUND_MONTHS;
use super::types::{AllocationTarget, ExpenseBreakdown, InvestmentHorizon, ResultSet, RiskTolerance};

pub const INVESTMENT_PRINCIPLES: [&str; 5] = [
    "Start early and invest consistently - even small amounts compound significantly over time",
    "Diversify across different asset classes to manage risk",
    "Keep fees low - choose low-cost index funds and ETFs when possible",
    "Don't try to time the market - stay invested for the long term",
    "Rebalance your portfolio annually to maintain your target allocation",
];

/// One labelled bar or pie segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: f64,
}

/// Expense categories for the breakdown chart; empty categories are dropped.
pub fn expense_chart(expenses: &ExpenseBreakdown) -> Vec<ChartSlice> {
    expenses
        .categories()
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| ChartSlice { label, value })
        .collect()
}

pub fn allocation_chart(allocation: &AllocationTarget) -> Vec<ChartSlice> {
    [
        ("Stocks", allocation.stocks),
        ("Bonds", allocation.bonds),
        ("Real Estate", allocation.real_estate),
        ("Cash", allocation.cash),
    ]
    .into_iter()
    .map(|(label, pct)| ChartSlice {
        label,
        value: f64::from(pct),
    })
    .collect()
}

/// Width of the emergency fund progress bar. Progress itself is unbounded,
/// the bar is not.
pub fn progress_bar_percent(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

pub fn format_usd(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = amount < 0.0 && fixed != "0.00";
    format!("{}${grouped}.{cents}", if negative { "-" } else { "" })
}

pub fn render_text(result: &ResultSet, risk: RiskTolerance, horizon: InvestmentHorizon) -> String {
    let budget = &result.budget;
    let mut lines = vec![
        "Financial Overview".to_string(),
        format!("  Monthly Income:   {}", format_usd(result.income)),
        format!("  Total Expenses:   {}", format_usd(budget.total_expenses)),
        format!("  Monthly Savings:  {}", format_usd(budget.monthly_savings)),
        format!("  Savings Rate:     {:.1}%", budget.savings_rate),
        String::new(),
        "Emergency Fund Status".to_string(),
        format!(
            "  Target: {} ({EMERGENCY_FUND_MONTHS} months of expenses)",
            format_usd(budget.emergency_fund_target)
        ),
        format!(
            "  [{}] {:.1}% Complete",
            progress_bar(progress_bar_percent(budget.emergency_fund_progress)),
            budget.emergency_fund_progress
        ),
        String::new(),
        "Expense Breakdown".to_string(),
    ];

    let expense_total = budget.total_expenses;
    for slice in expense_chart(&result.expenses) {
        let share = if expense_total > 0.0 {
            slice.value / expense_total * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "  {:<15} {:>12}  {share:.0}%",
            slice.label,
            format_usd(slice.value)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Recommended Asset Allocation ({} Portfolio, {})",
        risk.label(),
        horizon.label()
    ));
    for slice in allocation_chart(&result.allocation) {
        lines.push(format!("  {:<12} {:>3}%", slice.label, slice.value));
    }

    lines.push(String::new());
    lines.push("Personalized Investment Recommendations".to_string());
    for rec in &result.recommendations {
        lines.push(format!("  {} [{:?} Priority]", rec.category, rec.priority));
        lines.push(format!("    {}", rec.action));
        if rec.allocation > 0.0 {
            lines.push(format!(
                "    Suggested Monthly Investment: {}",
                format_usd(rec.allocation)
            ));
        }
        lines.push(format!("    {}", rec.details));
    }

    lines.push(String::new());
    lines.push("Key Investment Principles".to_string());
    lines.extend(INVESTMENT_PRINCIPLES.iter().map(|p| format!("  - {p}")));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn progress_bar(percent: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((percent / 100.0) * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::run_plan;
    use crate::core::types::FinancialInput;

    fn sample_result(risk: RiskTolerance) -> ResultSet {
        run_plan(&FinancialInput {
            monthly_income: 5_000.0,
            expenses: ExpenseBreakdown {
                housing: 1_200.0,
                utilities: 150.0,
                food: 400.0,
                transportation: 300.0,
                entertainment: 0.0,
                other: 350.0,
            },
            current_savings: 10_000.0,
            age: 30,
            risk_tolerance: risk,
            investment_horizon: InvestmentHorizon::FiveToTen,
        })
    }

    #[test]
    fn formats_usd_with_grouping_and_sign() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(5.5), "$5.50");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(-2_400.0), "-$2,400.00");
        assert_eq!(format_usd(-0.001), "$0.00");
        assert_eq!(format_usd(123_456.0), "$123,456.00");
        assert_eq!(format_usd(f64::INFINITY), "$0.00");
        assert_eq!(format_usd(f64::NAN), "$0.00");
    }

    #[test]
    fn expense_chart_skips_empty_categories() {
        let result = sample_result(RiskTolerance::Moderate);
        let labels: Vec<_> = expense_chart(&result.expenses)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["Housing", "Utilities", "Food", "Transportation", "Other"]);
        assert!(expense_chart(&ExpenseBreakdown::default()).is_empty());
    }

    #[test]
    fn allocation_chart_has_four_classes_summing_to_one_hundred() {
        let result = sample_result(RiskTolerance::Conservative);
        let chart = allocation_chart(&result.allocation);
        assert_eq!(chart.len(), 4);
        assert_eq!(chart.iter().map(|s| s.value).sum::<f64>(), 100.0);
        assert_eq!(
            chart[1],
            ChartSlice {
                label: "Bonds",
                value: 50.0
            }
        );
    }

    #[test]
    fn progress_bar_is_clamped() {
        assert_eq!(progress_bar_percent(250.0), 100.0);
        assert_eq!(progress_bar_percent(-10.0), 0.0);
        assert_eq!(progress_bar_percent(f64::NAN), 0.0);
        assert_eq!(progress_bar_percent(42.5), 42.5);
        assert_eq!(progress_bar(50.0), "##########----------");
        assert_eq!(progress_bar(100.0), "#".repeat(20));
    }

    #[test]
    fn text_report_lists_recommendations_and_principles() {
        let text = render_text(
            &sample_result(RiskTolerance::Moderate),
            RiskTolerance::Moderate,
            InvestmentHorizon::FiveToTen,
        );
        assert!(text.contains("Monthly Savings:  $2,600.00"));
        assert!(text.contains("Savings Rate:     52.0%"));
        assert!(text.contains("Target: $12,000.00 (5 months of expenses)"));
        assert!(text.contains("Moderate Portfolio, Long term (5-10 years)"));
        assert!(text.contains("Retirement (401k/IRA) [High Priority]"));
        assert!(text.contains("Suggested Monthly Investment: $780.00"));
        assert!(text.contains("Debt Management [High Priority]"));
        assert!(!text.contains("Entertainment"));
        for principle in INVESTMENT_PRINCIPLES {
            assert!(text.contains(principle));
        }
        // Debt management carries no allocation, so it never shows an amount.
        let debt_block = text
            .split("Debt Management")
            .nth(1)
            .expect("debt management present");
        let before_principles = debt_block
            .split("Key Investment Principles")
            .next()
            .unwrap_or_default();
        assert!(!before_principles.contains("Suggested Monthly Investment"));
    }
}
