use crate::domain::report::EmergencyFundPlan;

/// Months of expenses the fund should cover.
pub const BUFFER_MONTHS: f64 = 6.0;
/// Months over which the fund is built up.
pub const BUILD_UP_MONTHS: f64 = 12.0;

pub const SHORT_TERM_OPTIONS: [&str; 3] =
    ["liquid mutual funds", "high-yield savings", "short-term FD"];

pub fn plan(total_monthly_expenses: f64) -> EmergencyFundPlan {
    let target_amount = BUFFER_MONTHS * total_monthly_expenses;
    EmergencyFundPlan {
        target_amount,
        monthly_contribution: target_amount / BUILD_UP_MONTHS,
        short_term_options: SHORT_TERM_OPTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_month_buffer_built_over_a_year() {
        let p = plan(28_800.0);
        assert_eq!(p.target_amount, 172_800.0);
        assert_eq!(p.monthly_contribution, 14_400.0);
        assert_eq!(p.short_term_options.len(), 3);
    }

    #[test]
    fn scales_linearly() {
        for e in [0.0, 1.0, 999.99, 123_456.78] {
            let p = plan(e);
            assert_eq!(p.target_amount, 6.0 * e);
            assert!((p.monthly_contribution - 6.0 * e / 12.0).abs() < 1e-9);
        }
    }
}
