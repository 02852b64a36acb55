use crate::domain::validation::{is_valid_amount, ValidationError};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Monthly income and itemized expenses, validated once at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialProfile {
    income: f64,
    expenses: BTreeMap<String, f64>,
}

impl FinancialProfile {
    pub fn new(income: f64, expenses: BTreeMap<String, f64>) -> Result<Self, ValidationError> {
        if !is_valid_amount(income) {
            return Err(ValidationError::InvalidIncome(income));
        }
        for (category, &amount) in &expenses {
            if category.trim().is_empty() {
                return Err(ValidationError::BlankCategory);
            }
            if !is_valid_amount(amount) {
                return Err(ValidationError::InvalidExpense {
                    category: category.clone(),
                    amount,
                });
            }
        }
        if !expenses.values().sum::<f64>().is_finite() {
            return Err(ValidationError::ExpenseTotalOverflow);
        }
        Ok(Self { income, expenses })
    }

    /// Like [`FinancialProfile::new`], but rejects repeated category names instead of
    /// letting the last one win.
    pub fn from_entries<I, S>(income: f64, entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut expenses = BTreeMap::new();
        for (category, amount) in entries {
            let category = category.into();
            if expenses.contains_key(&category) {
                return Err(ValidationError::DuplicateCategory(category));
            }
            expenses.insert(category, amount);
        }
        Self::new(income, expenses)
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn expenses(&self) -> &BTreeMap<String, f64> {
        &self.expenses
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.values().sum()
    }

    /// Income minus total expenses, floored at zero.
    pub fn surplus(&self) -> f64 {
        (self.income - self.total_expenses()).max(0.0)
    }
}

/// A savings goal as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    #[serde(rename = "amount")]
    pub target_amount: f64,
    #[serde(rename = "years")]
    pub timeline_years: f64,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        timeline_years: f64,
    ) -> Result<Self, ValidationError> {
        let goal = Self {
            name: name.into(),
            target_amount,
            timeline_years,
        };
        goal.validate()?;
        Ok(goal)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankGoalName);
        }
        if !is_valid_amount(self.target_amount) {
            return Err(ValidationError::InvalidGoalAmount {
                name: self.name.clone(),
                amount: self.target_amount,
            });
        }
        if !is_valid_amount(self.timeline_years) {
            return Err(ValidationError::InvalidGoalTimeline {
                name: self.name.clone(),
                years: self.timeline_years,
            });
        }
        if (self.timeline_years * 12.0).round() > f64::from(u32::MAX) {
            return Err(ValidationError::GoalTimelineTooLong {
                name: self.name.clone(),
                years: self.timeline_years,
            });
        }
        Ok(())
    }
}

const DEFAULT_AGE: u32 = 30;
const DEFAULT_RISK: &str = "medium";

fn default_age() -> u32 {
    DEFAULT_AGE
}

fn default_risk() -> String {
    DEFAULT_RISK.to_string()
}

/// Raw input handed over by a presentation layer (HTTP body, CLI profile file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub income: f64,
    #[serde(deserialize_with = "unique_expense_map")]
    pub expenses: BTreeMap<String, f64>,
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default = "default_risk")]
    pub risk: String,
    #[serde(default)]
    pub goals: Option<Vec<Goal>>,
}

fn unique_expense_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueMap;

    impl<'de> Visitor<'de> for UniqueMap {
        type Value = BTreeMap<String, f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of expense category to amount")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = BTreeMap::new();
            while let Some((category, amount)) = access.next_entry::<String, f64>()? {
                if out.contains_key(&category) {
                    return Err(serde::de::Error::custom(
                        ValidationError::DuplicateCategory(category),
                    ));
                }
                out.insert(category, amount);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(UniqueMap)
}
