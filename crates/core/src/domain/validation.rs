use thiserror::Error;

/// Shape errors raised before any computation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("income must be a finite, non-negative number (got {0})")]
    InvalidIncome(f64),

    #[error("expense `{category}` must be a finite, non-negative number (got {amount})")]
    InvalidExpense { category: String, amount: f64 },

    #[error("total expenses are not a finite number")]
    ExpenseTotalOverflow,

    #[error("expense category names must be non-empty")]
    BlankCategory,

    #[error("duplicate expense category `{0}`")]
    DuplicateCategory(String),

    #[error("goal names must be non-empty")]
    BlankGoalName,

    #[error("goal `{name}` amount must be a finite, non-negative number (got {amount})")]
    InvalidGoalAmount { name: String, amount: f64 },

    #[error("goal `{name}` timeline must be a finite, non-negative number of years (got {years})")]
    InvalidGoalTimeline { name: String, years: f64 },

    #[error("goal `{name}` timeline of {years} years is too long to schedule")]
    GoalTimelineTooLong { name: String, years: f64 },

    #[error("unknown risk tier `{0}` (expected low, medium or high)")]
    UnknownRiskTier(String),
}

pub(crate) fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
