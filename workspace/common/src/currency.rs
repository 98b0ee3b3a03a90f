use rust_decimal::Decimal;

/// Formats an amount as FCFA with space-separated thousands, e.g. `2 815 000 FCFA`.
///
/// Amounts are rounded to whole francs; the sign is kept for negative cash flows.
pub fn format_fcfa(amount: &Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 7);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped.push_str(" FCFA");
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(format_fcfa(&Decimal::from(2_815_000)), "2 815 000 FCFA");
        assert_eq!(format_fcfa(&Decimal::from(800_000)), "800 000 FCFA");
        assert_eq!(format_fcfa(&Decimal::from(50)), "50 FCFA");
        assert_eq!(format_fcfa(&Decimal::from(1_000)), "1 000 FCFA");
    }

    #[test]
    fn keeps_sign_for_negative_cash_flow() {
        assert_eq!(format_fcfa(&Decimal::from(-680_000)), "-680 000 FCFA");
    }

    #[test]
    fn rounds_to_whole_francs() {
        assert_eq!(format_fcfa(&Decimal::new(123_455, 1)), "12 346 FCFA");
        assert_eq!(format_fcfa(&Decimal::ZERO), "0 FCFA");
    }
}
