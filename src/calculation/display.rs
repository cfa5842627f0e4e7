//! Formatting of amounts inside recommendation and alert text.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders a monthly or annual amount as pounds and pence, e.g. `£75.00`.
pub(crate) fn money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("£{}", rounded)
}

/// Renders a ratio in [0, 1] as a whole percentage, e.g. `0.65` as `65%`.
pub(crate) fn percent(ratio: Decimal) -> String {
    format!("{}%", (ratio * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_money_pads_to_pence() {
        assert_eq!(money(dec("75")), "£75.00");
        assert_eq!(money(dec("30.5")), "£30.50");
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        assert_eq!(money(dec("20.775")), "£20.78");
        assert_eq!(money(dec("616.666666")), "£616.67");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec("0.65")), "65%");
        assert_eq!(percent(dec("0.9")), "90%");
        assert_eq!(percent(dec("0.15")), "15%");
    }
}
