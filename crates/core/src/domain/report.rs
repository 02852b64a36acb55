use crate::domain::allocation::AssetClass;
use crate::domain::risk::RiskTier;
use crate::money::format_rupees;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Prose attached to a sub-report: either the rule-based content or generated text, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "content", rename_all = "snake_case")]
pub enum Guidance<T> {
    Rules(T),
    Narrative(String),
}

impl<T> Guidance<T> {
    pub fn is_narrative(&self) -> bool {
        matches!(self, Self::Narrative(_))
    }

    pub fn rules(&self) -> Option<&T> {
        match self {
            Self::Rules(v) => Some(v),
            Self::Narrative(_) => None,
        }
    }

    pub fn narrative(&self) -> Option<&str> {
        match self {
            Self::Rules(_) => None,
            Self::Narrative(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub total_expenses: f64,
    pub savings: f64,
    pub high_expense_categories: BTreeSet<String>,
    pub tips: Guidance<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFundPlan {
    pub target_amount: f64,
    pub monthly_contribution: f64,
    pub short_term_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub tier: RiskTier,
    pub weights: BTreeMap<AssetClass, f64>,
    pub monthly_savings: f64,
    pub instruments: Guidance<BTreeMap<AssetClass, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalScheduleEntry {
    pub name: String,
    pub monthly_required: f64,
    /// Nearest whole month; `timeline_years` keeps the exact figure.
    pub timeline_months: u32,
    pub timeline_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    /// Ascending by timeline; equal timelines keep input order.
    pub schedule: Vec<GoalScheduleEntry>,
    pub monthly_surplus: f64,
    pub narrative: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedReport {
    pub expense_analysis: ExpenseReport,
    pub savings_plan: EmergencyFundPlan,
    pub investment_recommendation: AllocationPlan,
    pub goals_plan: GoalPlan,
}

impl CombinedReport {
    /// Two-line plain-text digest of the expense analysis.
    pub fn summary(&self) -> String {
        [
            format!(
                "Total expenses: {}",
                format_rupees(self.expense_analysis.total_expenses)
            ),
            format!(
                "Estimated monthly savings: {}",
                format_rupees(self.expense_analysis.savings)
            ),
        ]
        .join("\n")
    }
}
