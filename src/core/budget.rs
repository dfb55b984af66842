use super::types::{DerivedBudget, FinancialInput};

/// Months of expenses the emergency fund should cover.
pub const EMERGENCY_FUND_MONTHS: f64 = 5.0;

/// Derives the budget figures. Finite inputs can still overflow once summed or
/// divided, so every figure that leaves here is finite (overflow reads as 0).
pub fn derive_budget(input: &FinancialInput) -> DerivedBudget {
    let total_expenses = finite_or_zero(input.expenses.total());
    let monthly_savings = finite_or_zero(input.monthly_income - total_expenses);
    let savings_rate = if input.monthly_income > 0.0 {
        finite_or_zero(monthly_savings / input.monthly_income * 100.0)
    } else {
        0.0
    };
    let emergency_fund_target = finite_or_zero(total_expenses * EMERGENCY_FUND_MONTHS);

    DerivedBudget {
        total_expenses,
        monthly_savings,
        savings_rate,
        emergency_fund_target,
        emergency_fund_progress: finite_or_zero(emergency_fund_progress(
            input.current_savings,
            emergency_fund_target,
        )),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Percent of the emergency fund target already saved. Not capped above 100.
/// With a zero target, any positive savings counts as fully funded and
/// anything else as not started.
pub fn emergency_fund_progress(current_savings: f64, target: f64) -> f64 {
    if target == 0.0 {
        return if current_savings > 0.0 { 100.0 } else { 0.0 };
    }
    current_savings / target * 100.0
}
