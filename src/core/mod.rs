mod allocation;
mod budget;
mod coerce;
mod engine;
mod report;
mod rules;
mod types;

pub use allocation::allocation_for;
pub use budget::{EMERGENCY_FUND_MONTHS, derive_budget, emergency_fund_progress};
pub use coerce::{DEFAULT_AGE, FieldValue, coerce_age, coerce_amount};
pub use engine::{plan_from_form, run_plan};
pub use report::{
    ChartSlice, INVESTMENT_PRINCIPLES, allocation_chart, expense_chart, format_usd,
    progress_bar_percent, render_text,
};
pub use rules::{DEBT_MANAGEMENT, RuleContext, generate_recommendations};
pub use types::{
    AllocationTarget, DerivedBudget, ExpenseBreakdown, FinancialInput, FormInput,
    InvestmentHorizon, Priority, Recommendation, ResultSet, RiskTolerance,
};
