use crate::domain::allocation;
use crate::domain::report::{AllocationPlan, Guidance};
use crate::domain::risk::{Horizon, RiskTier};
use crate::llm::{prompts, Narrator};

/// Pure table lookup. Age and horizon do not affect the weights yet.
pub fn allocate(tier: RiskTier, monthly_savings: f64) -> AllocationPlan {
    AllocationPlan {
        tier,
        weights: allocation::weights(tier),
        monthly_savings,
        instruments: Guidance::Rules(allocation::sample_instruments()),
    }
}

pub struct InvestmentAdvisor<'a> {
    narrator: &'a Narrator,
}

impl<'a> InvestmentAdvisor<'a> {
    pub fn new(narrator: &'a Narrator) -> Self {
        Self { narrator }
    }

    /// Generated text, when available, replaces the sample instrument list. Weights stay.
    pub async fn recommend(
        &self,
        age: u32,
        tier: RiskTier,
        monthly_savings: f64,
        horizon: Horizon,
    ) -> AllocationPlan {
        let mut plan = allocate(tier, monthly_savings);
        if !self.narrator.is_enabled() {
            return plan;
        }

        let prompt = prompts::investment_prompt(age, tier, monthly_savings, horizon);
        if let Some(text) = self.narrator.narrate("investment", &prompt).await {
            plan.instruments = Guidance::Narrative(text);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::AssetClass;
    use crate::llm::testing::Scripted;
    use std::collections::BTreeMap;

    #[test]
    fn medium_weights() {
        let plan = allocate(RiskTier::Medium, 21_200.0);
        let expected = BTreeMap::from([
            (AssetClass::Stocks, 0.4),
            (AssetClass::MutualFunds, 0.3),
            (AssetClass::Gold, 0.1),
            (AssetClass::Bonds, 0.15),
            (AssetClass::Cash, 0.05),
        ]);
        assert_eq!(plan.weights, expected);
        assert_eq!(plan.monthly_savings, 21_200.0);
    }

    #[tokio::test]
    async fn age_and_horizon_do_not_change_weights() {
        let narrator = Narrator::disabled();
        let advisor = InvestmentAdvisor::new(&narrator);
        let young = advisor.recommend(22, RiskTier::Low, 1_000.0, Horizon::Long).await;
        let old = advisor.recommend(64, RiskTier::Low, 1_000.0, Horizon::Short).await;
        assert_eq!(young, old);
    }

    #[tokio::test]
    async fn narrative_replaces_instruments_only() {
        let gen = Scripted::replying("{\"why\": \"balanced\"}");
        let narrator = gen.narrator();
        let plan = InvestmentAdvisor::new(&narrator)
            .recommend(30, RiskTier::High, 5_000.0, Horizon::Long)
            .await;
        assert_eq!(plan.instruments.narrative(), Some("{\"why\": \"balanced\"}"));
        assert_eq!(plan.weights, allocation::weights(RiskTier::High));
        assert_eq!(plan.monthly_savings, 5_000.0);
    }

    #[tokio::test]
    async fn silent_backend_keeps_instruments() {
        let gen = Scripted::silent();
        let narrator = gen.narrator();
        let plan = InvestmentAdvisor::new(&narrator)
            .recommend(30, RiskTier::Low, 0.0, Horizon::Long)
            .await;
        assert_eq!(plan, allocate(RiskTier::Low, 0.0));
        assert_eq!(gen.call_count(), 1);
    }
}
