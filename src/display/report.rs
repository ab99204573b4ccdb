//! Text helpers shared by the report renderers

use crate::models::Money;

/// Share of `part` in `whole` as a percentage (0 when `whole` is zero)
pub fn share(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.cents() as f64 / whole.cents() as f64 * 100.0
}

/// Format a percentage with precision that shrinks as the value grows
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude > 0.0 && magnitude < 0.1 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar scaled against `max`
///
/// Non-positive values render as an empty track.
pub fn format_bar(value: Money, max: Money, width: usize) -> String {
    if !max.is_positive() || !value.is_positive() {
        return "░".repeat(width);
    }

    let filled = (value.cents() as f64 / max.cents() as f64 * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Amount with an explicit sign, e.g. `+$5.00` or `-$2.50`
pub fn format_signed(amount: Money, currency_symbol: &str) -> String {
    if amount.is_positive() {
        format!("+{}", amount.format_with_symbol(currency_symbol))
    } else {
        amount.format_with_symbol(currency_symbol)
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to at most `max_chars` characters, marking the cut with `...`
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share() {
        assert_eq!(share(Money::from_cents(250), Money::from_cents(1000)), 25.0);
        assert_eq!(share(Money::from_cents(250), Money::zero()), 0.0);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.44), "5.4%");
        assert_eq!(format_percentage(55.7), "56%");
    }

    #[test]
    fn test_format_bar() {
        let max = Money::from_cents(1000);
        assert_eq!(format_bar(Money::from_cents(500), max, 10), "█████░░░░░");
        assert_eq!(format_bar(max, max, 4), "████");
        assert_eq!(format_bar(Money::from_cents(-100), max, 3), "░░░");
        assert_eq!(format_bar(Money::from_cents(100), Money::zero(), 2), "░░");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(Money::from_cents(500), "$"), "+$5.00");
        assert_eq!(format_signed(Money::from_cents(-250), "$"), "-$2.50");
        assert_eq!(format_signed(Money::zero(), "€"), "€0.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Food & Dining out", 10), "Food & ...");
        assert_eq!(truncate("Café crème", 6), "Caf...");
        assert_eq!(truncate("abcdef", 2), "..");
    }
}
