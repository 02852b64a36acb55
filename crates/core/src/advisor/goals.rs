use crate::domain::profile::Goal;
use crate::domain::report::{GoalPlan, GoalScheduleEntry};
use crate::llm::{prompts, Narrator};

/// Evenly amortizes each goal over its timeline, shortest timeline first.
///
/// `monthly_surplus` is carried into the plan for display only; the schedule is not checked
/// against it. Goals are expected to have passed [`Goal::validate`].
pub fn schedule(goals: &[Goal], monthly_surplus: f64) -> GoalPlan {
    let mut ordered: Vec<&Goal> = goals.iter().collect();
    ordered.sort_by(|a, b| a.timeline_years.total_cmp(&b.timeline_years));

    let schedule = ordered
        .into_iter()
        .map(|goal| {
            let months = goal.timeline_years * 12.0;
            // Zero-year goals are due now.
            let monthly_required = if months > 0.0 {
                goal.target_amount / months
            } else {
                goal.target_amount
            };
            GoalScheduleEntry {
                name: goal.name.clone(),
                monthly_required,
                timeline_months: months.round() as u32,
                timeline_years: goal.timeline_years,
            }
        })
        .collect();

    GoalPlan {
        schedule,
        monthly_surplus,
        narrative: None,
    }
}

pub struct GoalScheduler<'a> {
    narrator: &'a Narrator,
}

impl<'a> GoalScheduler<'a> {
    pub fn new(narrator: &'a Narrator) -> Self {
        Self { narrator }
    }

    /// The schedule is always rule-based; generated text only fills the narrative slot.
    pub async fn schedule(&self, goals: &[Goal], monthly_surplus: f64) -> GoalPlan {
        let mut plan = schedule(goals, monthly_surplus);
        if !self.narrator.is_enabled() || goals.is_empty() {
            return plan;
        }

        let prompt = prompts::goal_prompt(goals, monthly_surplus);
        plan.narrative = self.narrator.narrate("goals", &prompt).await;
        plan
    }
}
