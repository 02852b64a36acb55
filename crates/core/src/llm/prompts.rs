use crate::domain::profile::Goal;
use crate::domain::risk::{Horizon, RiskTier};
use serde_json::json;
use std::collections::BTreeMap;

pub const SYSTEM_PROMPT: &str =
    "You are a concise personal-finance coach. Amounts are monthly and in Indian rupees.";

pub const EXPENSE_ANALYZER_PROMPT: &str = "\
You are a helpful assistant that analyzes a user's monthly expenses.
Given an itemized list of expenses and the monthly income, \
identify categories that are unusually high, \
suggest 5 actionable ways to reduce expenses (concise), \
and output a suggested budget allocation percentages.
Respond in JSON with keys: 'high_expenses', 'tips', 'suggested_allocation'.";

pub const INVESTMENT_ADVISOR_PROMPT: &str = "\
You are a friendly investment advisor. \
Given user's age, risk appetite (low/medium/high), monthly savings amount, \
and investment horizon (short/medium/long), \
recommend an allocation across: stocks, mutual_funds, gold, bonds, cash. \
Explain briefly why and suggest 2 sample instruments for each recommended category. \
Respond in JSON.";

pub const GOAL_PLANNER_PROMPT: &str = "\
You are a financial planner. Given a set of goals with target amounts and timelines, \
provide a prioritized plan of which goals to fund first, suggested monthly contribution per goal, \
and expected progress milestones. Respond in JSON.";

pub fn expense_prompt(income: f64, expenses: &BTreeMap<String, f64>) -> String {
    let data = json!({ "income": income, "expenses": expenses });
    format!("{EXPENSE_ANALYZER_PROMPT}\n\nUser Data:\n{data}")
}

pub fn investment_prompt(
    age: u32,
    tier: RiskTier,
    monthly_savings: f64,
    horizon: Horizon,
) -> String {
    let data = json!({
        "age": age,
        "risk": tier.as_str(),
        "monthly_savings": monthly_savings,
        "horizon": horizon.as_str(),
    });
    format!("{INVESTMENT_ADVISOR_PROMPT}\n\nUser data:\n{data}")
}

pub fn goal_prompt(goals: &[Goal], monthly_surplus: f64) -> String {
    let goals = json!(goals);
    format!("{GOAL_PLANNER_PROMPT}\n\nGoals:\n{goals}\nMonthly surplus: {monthly_surplus}")
}
