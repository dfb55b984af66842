use super::allocation::allocation_for;
use super::budget::derive_budget;
use super::coerce::{coerce_age, coerce_amount};
use super::rules::{RuleContext, generate_recommendations};
use super::types::{ExpenseBreakdown, FinancialInput, FormInput, ResultSet};

impl FinancialInput {
    pub fn from_form(form: &FormInput) -> Self {
        FinancialInput {
            monthly_income: coerce_amount(form.monthly_income.as_ref()),
            expenses: ExpenseBreakdown {
                housing: coerce_amount(form.housing.as_ref()),
                utilities: coerce_amount(form.utilities.as_ref()),
                food: coerce_amount(form.food.as_ref()),
                transportation: coerce_amount(form.transportation.as_ref()),
                entertainment: coerce_amount(form.entertainment.as_ref()),
                other: coerce_amount(form.other.as_ref()),
            },
            current_savings: coerce_amount(form.current_savings.as_ref()),
            age: coerce_age(form.age.as_ref()),
            risk_tolerance: form.risk_tolerance,
            investment_horizon: form.investment_horizon,
        }
    }
}

pub fn run_plan(input: &FinancialInput) -> ResultSet {
    let budget = derive_budget(input);
    let allocation = allocation_for(input.risk_tolerance);
    let recommendations = generate_recommendations(&RuleContext {
        risk: input.risk_tolerance,
        horizon: input.investment_horizon,
        monthly_savings: budget.monthly_savings,
        current_savings: input.current_savings,
        age: input.age,
    });

    tracing::debug!(
        risk = ?input.risk_tolerance,
        monthly_savings = budget.monthly_savings,
        recommendations = recommendations.len(),
        "plan computed"
    );

    ResultSet {
        income: input.monthly_income,
        current_savings: input.current_savings,
        expenses: input.expenses,
        budget,
        allocation,
        recommendations,
    }
}

pub fn plan_from_form(form: &FormInput) -> ResultSet {
    run_plan(&FinancialInput::from_form(form))
}
