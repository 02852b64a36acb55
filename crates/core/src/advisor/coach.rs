use crate::advisor::emergency;
use crate::advisor::expense::ExpenseAnalyzer;
use crate::advisor::goals::GoalScheduler;
use crate::advisor::investment::InvestmentAdvisor;
use crate::config::Settings;
use crate::domain::profile::{FinancialProfile, Goal, ProfileRequest};
use crate::domain::report::CombinedReport;
use crate::domain::risk::{Horizon, RiskTierPolicy};
use crate::domain::validation::ValidationError;
use crate::llm::Narrator;
use std::collections::BTreeMap;

/// Runs every analysis for one profile and bundles the results.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct FinanceCoach {
    narrator: Narrator,
    risk_policy: RiskTierPolicy,
}

impl FinanceCoach {
    pub fn new(narrator: Narrator, risk_policy: RiskTierPolicy) -> Self {
        Self {
            narrator,
            risk_policy,
        }
    }

    /// Rules only, lenient risk parsing.
    pub fn offline() -> Self {
        Self::new(Narrator::disabled(), RiskTierPolicy::default())
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let narrator = Narrator::from_settings(settings)?;
        tracing::info!(
            provider = ?narrator.provider(),
            risk_policy = ?settings.risk_tier_policy,
            "finance coach configured"
        );
        Ok(Self::new(narrator, settings.risk_tier_policy))
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// Validates everything up front, then runs expenses, emergency fund, investment and goals
    /// in that order. Narrative failures never surface here.
    pub async fn run(
        &self,
        income: f64,
        expenses: BTreeMap<String, f64>,
        age: u32,
        risk: &str,
        goals: Option<Vec<Goal>>,
    ) -> Result<CombinedReport, ValidationError> {
        let profile = FinancialProfile::new(income, expenses)?;
        let tier = self.risk_policy.resolve(risk)?;
        let goals = goals.unwrap_or_default();
        for goal in &goals {
            goal.validate()?;
        }

        let expense_analysis = ExpenseAnalyzer::new(&self.narrator).analyze(&profile).await;
        let total_expenses = expense_analysis.total_expenses;
        let surplus = (profile.income() - total_expenses).max(0.0);

        let savings_plan = emergency::plan(total_expenses);
        let investment_recommendation = InvestmentAdvisor::new(&self.narrator)
            .recommend(age, tier, surplus, Horizon::Long)
            .await;
        let goals_plan = GoalScheduler::new(&self.narrator)
            .schedule(&goals, surplus)
            .await;

        tracing::info!(
            total_expenses,
            surplus,
            tier = %tier,
            goals = goals.len(),
            "finance report built"
        );

        Ok(CombinedReport {
            expense_analysis,
            savings_plan,
            investment_recommendation,
            goals_plan,
        })
    }

    pub async fn run_request(
        &self,
        req: ProfileRequest,
    ) -> Result<CombinedReport, ValidationError> {
        self.run(req.income, req.expenses, req.age, &req.risk, req.goals)
            .await
    }
}
