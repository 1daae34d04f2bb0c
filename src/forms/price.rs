//! Brazilian currency formatting: `1.234,56` on screen, `1234.56` on the wire.

/// Format a price for the form field. Zero renders as an empty field.
#[must_use]
pub fn format_brl(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return String::new();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{},{frac}", group_thousands(int))
}

/// Re-mask a field as the user types: keep digits only, put the decimal
/// comma before the last two digits and dot-separate thousands.
#[must_use]
pub fn mask_price_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 3 {
        return digits;
    }
    let (int, frac) = digits.split_at(digits.len() - 2);
    format!("{},{frac}", group_thousands(int))
}

/// Accepts `^\d{1,3}(\.\d{3})*(,\d{1,2})?$`.
#[must_use]
pub fn is_valid_brl_price(value: &str) -> bool {
    let (int, frac) = match value.split_once(',') {
        Some((int, frac)) => (int, Some(frac)),
        None => (value, None),
    };
    if let Some(frac) = frac {
        if !(1..=2).contains(&frac.len()) || !all_digits(frac) {
            return false;
        }
    }

    let mut groups = int.split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    (1..=3).contains(&head.len())
        && all_digits(head)
        && groups.all(|group| group.len() == 3 && all_digits(group))
}

/// `1.234,56` to `1234.56`.
#[must_use]
pub fn normalize_price(value: &str) -> String {
    value.replace('.', "").replacen(',', ".", 1)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_brl, is_valid_brl_price, mask_price_input, normalize_price};

    #[test]
    fn formats_with_comma_and_thousands() {
        assert_eq!(format_brl(12.5), "12,50");
        assert_eq!(format_brl(1234.567), "1.234,57");
        assert_eq!(format_brl(1_000_000.0), "1.000.000,00");
        assert_eq!(format_brl(0.0), "");
    }

    #[test]
    fn masks_typed_input() {
        assert_eq!(mask_price_input("12"), "12");
        assert_eq!(mask_price_input("1234"), "12,34");
        assert_eq!(mask_price_input("123456"), "1.234,56");
        assert_eq!(mask_price_input("R$ 1.234,5x6"), "1.234,56");
        assert_eq!(mask_price_input(""), "");
    }

    #[test]
    fn validates_brazilian_format() {
        for ok in ["0", "12", "12,5", "12,50", "1.234", "1.234,56", "999.999.999,99"] {
            assert!(is_valid_brl_price(ok), "{ok} should be accepted");
        }
        for bad in ["", "1234,56", "12,345", "12.34", ".123", "1.23,4", "12,", "abc", "1,2,3"] {
            assert!(!is_valid_brl_price(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn formatted_prices_survive_the_round_trip() {
        for value in [0.99, 12.5, 1234.56, 98_765.4] {
            let shown = format_brl(value);
            assert!(is_valid_brl_price(&shown), "{shown}");
            let wire: f64 = normalize_price(&shown).parse().unwrap();
            assert!((wire - value).abs() < 0.005);
        }
    }
}
