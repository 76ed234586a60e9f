/// Rounds half-way cases toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`),
/// the rounding used for every monetary label.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    // Avoid printing "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Formats a monetary value as `<symbol><rounded integer>`, e.g. `$1200`.
#[must_use]
pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{symbol}{:.0}", round_half_up(value))
}

#[cfg(test)]
mod tests {
    use super::{format_currency, round_half_up};

    #[test]
    fn rounds_half_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.4), 0.0);
    }

    #[test]
    fn currency_label_has_no_separators() {
        assert_eq!(format_currency("$", 1199.5), "$1200");
        assert_eq!(format_currency("$", -12.7), "$-13");
        assert_eq!(format_currency("€", 0.2), "€0");
    }
}
