use std::fmt::Write;

use finance_coach_core::domain::report::{CombinedReport, Guidance};
use finance_coach_core::money::{format_rupees, round_cents};

pub fn render_text(report: &CombinedReport) -> String {
    let mut out = String::new();
    let _ = write_report(&mut out, report);
    out
}

/// Exact month count; whole months print without decimals.
fn timeline(years: f64) -> String {
    let months = years * 12.0;
    if months == 0.0 {
        "due now".to_string()
    } else if months.fract() == 0.0 {
        format!("over {months:.0} months")
    } else {
        format!("over {months:.2} months")
    }
}

fn write_report(out: &mut String, report: &CombinedReport) -> std::fmt::Result {
    let e = &report.expense_analysis;
    writeln!(out, "== Expense Analysis")?;
    writeln!(out, "{}", report.summary())?;
    if e.high_expense_categories.is_empty() {
        writeln!(out, "High expense categories: none")?;
    } else {
        let names: Vec<&str> = e.high_expense_categories.iter().map(String::as_str).collect();
        writeln!(out, "High expense categories: {}", names.join(", "))?;
    }
    match &e.tips {
        Guidance::Rules(tips) => {
            writeln!(out, "Tips:")?;
            for tip in tips {
                writeln!(out, "  - {tip}")?;
            }
        }
        Guidance::Narrative(text) => writeln!(out, "Advice:\n{text}")?,
    }

    let s = &report.savings_plan;
    writeln!(out, "\n== Savings Plan")?;
    writeln!(out, "Emergency fund target: {}", format_rupees(s.target_amount))?;
    writeln!(out, "Monthly saving goal: {}", format_rupees(s.monthly_contribution))?;
    writeln!(out, "Short-term options: {}", s.short_term_options.join(", "))?;

    let inv = &report.investment_recommendation;
    writeln!(out, "\n== Investment Recommendation ({} risk)", inv.tier)?;
    for (class, weight) in &inv.weights {
        writeln!(out, "  {:<13} {:>5.1}%", class.as_str(), weight * 100.0)?;
    }
    match &inv.instruments {
        Guidance::Rules(instruments) => {
            writeln!(out, "Suggested instruments:")?;
            for (class, names) in instruments {
                writeln!(out, "  {}: {}", class.as_str(), names.join(", "))?;
            }
        }
        Guidance::Narrative(text) => writeln!(out, "Rationale:\n{text}")?,
    }

    let g = &report.goals_plan;
    writeln!(out, "\n== Goals Plan")?;
    writeln!(out, "Monthly surplus: {}", format_rupees(g.monthly_surplus))?;
    if g.schedule.is_empty() {
        writeln!(out, "No goals.")?;
    }
    for entry in &g.schedule {
        writeln!(
            out,
            "  {}: {} / month {}",
            entry.name,
            format_rupees(round_cents(entry.monthly_required)),
            timeline(entry.timeline_years)
        )?;
    }
    if let Some(text) = &g.narrative {
        writeln!(out, "Plan notes:\n{text}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finance_coach_core::domain::profile::Goal;
    use finance_coach_core::FinanceCoach;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn renders_every_section() {
        let report = FinanceCoach::offline()
            .run_request(crate::demo_profile())
            .await
            .unwrap();
        let text = render_text(&report);

        assert!(text.contains("Total expenses: ₹28,800.00"));
        assert!(text.contains("High expense categories: rent"));
        assert!(text.contains("Consider reducing rent"));
        assert!(text.contains("Emergency fund target: ₹172,800.00"));
        assert!(text.contains("Monthly saving goal: ₹14,400.00"));
        assert!(text.contains("== Investment Recommendation (medium risk)"));
        assert!(text.contains("  stocks         40.0%"));
        assert!(text.contains("Car: ₹13,888.89 / month over 36 months"));
    }

    #[tokio::test]
    async fn renders_empty_sections() {
        let report = FinanceCoach::offline()
            .run(0.0, BTreeMap::new(), 30, "low", None)
            .await
            .unwrap();
        let text = render_text(&report);
        assert!(text.contains("High expense categories: none"));
        assert!(text.contains("No goals."));
    }

    #[tokio::test]
    async fn short_and_zero_timelines_show_exact_months() {
        let goals = vec![
            Goal::new("Gift", 1_000.0, 0.01).unwrap(),
            Goal::new("Laptop", 80_000.0, 0.0).unwrap(),
            Goal::new("Course", 30_000.0, 0.5).unwrap(),
        ];
        let report = FinanceCoach::offline()
            .run(10_000.0, BTreeMap::new(), 30, "low", Some(goals))
            .await
            .unwrap();
        let text = render_text(&report);
        assert!(text.contains("Laptop: ₹80,000.00 / month due now"));
        assert!(text.contains("Gift: ₹8,333.33 / month over 0.12 months"));
        assert!(text.contains("Course: ₹5,000.00 / month over 6 months"));
        assert!(!text.contains("over 0 months"));
    }
}
