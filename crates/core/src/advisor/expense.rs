use crate::domain::profile::FinancialProfile;
use crate::domain::report::{ExpenseReport, Guidance};
use crate::llm::{prompts, Narrator};
use std::collections::{BTreeMap, BTreeSet};

/// Share of income above which a category is flagged.
pub const HIGH_EXPENSE_RATIO: f64 = 0.15;

pub const GENERIC_SUGGESTIONS: [&str; 3] = [
    "Review and cancel unused subscriptions.",
    "Cook more at home and reduce dining out frequency.",
    "Switch to a cheaper phone/internet plan if possible.",
];

/// Per-category share of income. Empty when income is zero.
pub fn expense_ratios(profile: &FinancialProfile) -> BTreeMap<&str, f64> {
    let income = profile.income();
    if income <= 0.0 {
        return BTreeMap::new();
    }
    profile
        .expenses()
        .iter()
        .map(|(category, amount)| (category.as_str(), amount / income))
        .collect()
}

/// Rule-based breakdown: totals, savings, flagged categories and templated tips.
pub fn breakdown(profile: &FinancialProfile) -> ExpenseReport {
    let total_expenses = profile.total_expenses();
    let savings = profile.surplus();

    let ratios = expense_ratios(profile);
    let mut high_expense_categories = BTreeSet::new();
    let mut tips = Vec::with_capacity(ratios.len() + GENERIC_SUGGESTIONS.len());
    for (category, ratio) in ratios {
        if ratio > HIGH_EXPENSE_RATIO {
            high_expense_categories.insert(category.to_string());
            tips.push(format!(
                "Consider reducing {category} — it consumes {:.1}% of your income.",
                ratio * 100.0
            ));
        }
    }
    tips.extend(GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()));

    tracing::debug!(
        total_expenses,
        savings,
        flagged = high_expense_categories.len(),
        "expense breakdown computed"
    );

    ExpenseReport {
        total_expenses,
        savings,
        high_expense_categories,
        tips: Guidance::Rules(tips),
    }
}

pub struct ExpenseAnalyzer<'a> {
    narrator: &'a Narrator,
}

impl<'a> ExpenseAnalyzer<'a> {
    pub fn new(narrator: &'a Narrator) -> Self {
        Self { narrator }
    }

    /// Generated text, when available, replaces the templated tips.
    pub async fn analyze(&self, profile: &FinancialProfile) -> ExpenseReport {
        let mut report = breakdown(profile);
        if !self.narrator.is_enabled() {
            return report;
        }

        let prompt = prompts::expense_prompt(profile.income(), profile.expenses());
        if let Some(text) = self.narrator.narrate("expenses", &prompt).await {
            report.tips = Guidance::Narrative(text);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::Scripted;

    fn sample() -> FinancialProfile {
        FinancialProfile::from_entries(
            50_000.0,
            [
                ("rent", 15_000.0),
                ("food", 6_000.0),
                ("transport", 2_000.0),
                ("subscriptions", 800.0),
                ("shopping", 3_000.0),
                ("others", 2_000.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn sample_profile_flags_only_rent() {
        let report = breakdown(&sample());
        assert_eq!(report.total_expenses, 28_800.0);
        assert_eq!(report.savings, 21_200.0);
        assert_eq!(
            report.high_expense_categories,
            BTreeSet::from(["rent".to_string()])
        );
    }

    #[test]
    fn tips_lead_with_flagged_categories() {
        let report = breakdown(&sample());
        let tips = report.tips.rules().unwrap();
        assert_eq!(tips.len(), 4);
        assert_eq!(tips[0], "Consider reducing rent — it consumes 30.0% of your income.");
        assert_eq!(&tips[1..], &GENERIC_SUGGESTIONS.map(String::from)[..]);
    }

    #[test]
    fn zero_income_skips_ratio_checks() {
        let profile = FinancialProfile::from_entries(0.0, [("rent", 500.0)]).unwrap();
        let report = breakdown(&profile);
        assert!(report.high_expense_categories.is_empty());
        assert_eq!(report.savings, 0.0);
        assert_eq!(report.tips.rules().unwrap().len(), 3);
        assert!(expense_ratios(&profile).is_empty());
    }

    #[test]
    fn ratio_exactly_at_threshold_is_not_flagged() {
        let profile =
            FinancialProfile::from_entries(1_000.0, [("at", 150.0), ("over", 151.0)]).unwrap();
        let report = breakdown(&profile);
        assert_eq!(report.high_expense_categories, BTreeSet::from(["over".to_string()]));
    }

    #[test]
    fn savings_never_negative() {
        let profile = FinancialProfile::from_entries(100.0, [("rent", 250.0)]).unwrap();
        let report = breakdown(&profile);
        assert_eq!(report.savings, 0.0);
        assert_eq!(report.high_expense_categories.len(), 1);
    }

    #[tokio::test]
    async fn narrative_replaces_tips() {
        let gen = Scripted::replying("Cut rent by moving.");
        let narrator = gen.narrator();
        let report = ExpenseAnalyzer::new(&narrator).analyze(&sample()).await;
        assert_eq!(report.tips, Guidance::Narrative("Cut rent by moving.".to_string()));
        assert_eq!(report.total_expenses, 28_800.0);
        assert!(report.high_expense_categories.contains("rent"));
    }

    #[tokio::test]
    async fn failed_narrative_keeps_rule_tips() {
        let gen = Scripted::failing("timeout");
        let narrator = gen.narrator();
        let report = ExpenseAnalyzer::new(&narrator).analyze(&sample()).await;
        assert_eq!(report, breakdown(&sample()));
    }

    #[tokio::test]
    async fn disabled_narrator_matches_rules() {
        let narrator = Narrator::disabled();
        let report = ExpenseAnalyzer::new(&narrator).analyze(&sample()).await;
        assert_eq!(report, breakdown(&sample()));
    }
}
