use serde::{Deserialize, Serialize};

use super::coerce::FieldValue;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub fn label(self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "Conservative",
            RiskTolerance::Moderate => "Moderate",
            RiskTolerance::Aggressive => "Aggressive",
        }
    }
}

/// Time window the user plans to stay invested. Collected with the form and
/// echoed back, but no recommendation rule reads it yet.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub enum InvestmentHorizon {
    #[serde(rename = "0-2")]
    ZeroToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[default]
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

impl InvestmentHorizon {
    pub fn label(self) -> &'static str {
        match self {
            InvestmentHorizon::ZeroToTwo => "Short term (0-2 years)",
            InvestmentHorizon::ThreeToFive => "Medium term (3-5 years)",
            InvestmentHorizon::FiveToTen => "Long term (5-10 years)",
            InvestmentHorizon::TenPlus => "Very long term (10+ years)",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Raw form record as the presentation layer collects it. Numeric fields may
/// be absent, numbers, or free text.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub monthly_income: Option<FieldValue>,
    pub housing: Option<FieldValue>,
    pub utilities: Option<FieldValue>,
    pub food: Option<FieldValue>,
    pub transportation: Option<FieldValue>,
    pub entertainment: Option<FieldValue>,
    pub other: Option<FieldValue>,
    pub current_savings: Option<FieldValue>,
    pub age: Option<FieldValue>,
    pub risk_tolerance: RiskTolerance,
    pub investment_horizon: InvestmentHorizon,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub housing: f64,
    pub utilities: f64,
    pub food: f64,
    pub transportation: f64,
    pub entertainment: f64,
    pub other: f64,
}

impl ExpenseBreakdown {
    pub fn categories(&self) -> [(&'static str, f64); 6] {
        [
            ("Housing", self.housing),
            ("Utilities", self.utilities),
            ("Food", self.food),
            ("Transportation", self.transportation),
            ("Entertainment", self.entertainment),
            ("Other", self.other),
        ]
    }

    pub fn total(&self) -> f64 {
        self.categories().iter().map(|(_, value)| value).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialInput {
    pub monthly_income: f64,
    pub expenses: ExpenseBreakdown,
    pub current_savings: f64,
    pub age: i32,
    pub risk_tolerance: RiskTolerance,
    pub investment_horizon: InvestmentHorizon,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedBudget {
    pub total_expenses: f64,
    pub monthly_savings: f64,
    pub savings_rate: f64,
    pub emergency_fund_target: f64,
    pub emergency_fund_progress: f64,
}

/// Target split across asset classes, in whole percent.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationTarget {
    pub stocks: u8,
    pub bonds: u8,
    pub real_estate: u8,
    pub cash: u8,
}

impl AllocationTarget {
    pub fn total(self) -> u32 {
        u32::from(self.stocks)
            + u32::from(self.bonds)
            + u32::from(self.real_estate)
            + u32::from(self.cash)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: &'static str,
    pub priority: Priority,
    pub action: &'static str,
    pub allocation: f64,
    pub details: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub income: f64,
    pub current_savings: f64,
    pub expenses: ExpenseBreakdown,
    #[serde(flatten)]
    pub budget: DerivedBudget,
    pub allocation: AllocationTarget,
    pub recommendations: Vec<Recommendation>,
}
