//! Rounding and rupee formatting for presentation. Calculations keep full precision.

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `172800.0` -> `₹172,800.00`. Non-finite values render as `-`.
pub fn format_rupees(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}₹{grouped}.{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(round_cents(500_000.0 / 36.0), 13_888.89);
        assert_eq!(round_cents(0.005), 0.01);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_rupees(172_800.0), "₹172,800.00");
        assert_eq!(format_rupees(1_234_567.891), "₹1,234,567.89");
        assert_eq!(format_rupees(999.0), "₹999.00");
        assert_eq!(format_rupees(0.0), "₹0.00");
    }

    #[test]
    fn handles_sign_and_non_finite() {
        assert_eq!(format_rupees(-1_500.5), "-₹1,500.50");
        assert_eq!(format_rupees(f64::NAN), "-");
    }
}
