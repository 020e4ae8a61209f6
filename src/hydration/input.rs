//! Numeric input sanitising for weight and amount fields

/// Parse a trimmed numeric string, treating empty input as zero
fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Keep only digits and dots from `input` and parse the result
///
/// A value above `max` is replaced by the number formed from the first
/// `max` characters of the raw input, which is how an over-long field gets
/// truncated while the user types.
pub fn limit_number(input: &str, max: u32) -> Option<f64> {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let n = parse_number(&digits)?;

    if n > max as f64 {
        let head: String = input.chars().take(max as usize).collect();
        parse_number(&head)
    } else {
        Some(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_non_numeric() {
        assert_eq!(limit_number("72 kg", 300), Some(72.0));
        assert_eq!(limit_number("1,5", 300), Some(15.0));
        assert_eq!(limit_number("65.5", 300), Some(65.5));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(limit_number("", 300), Some(0.0));
        assert_eq!(limit_number("abc", 300), Some(0.0));
    }

    #[test]
    fn test_malformed_is_none() {
        assert_eq!(limit_number("1.2.3", 300), None);
        assert_eq!(limit_number(".", 300), None);
    }

    #[test]
    fn test_over_max_truncates_raw_input() {
        assert_eq!(limit_number("12345", 3), Some(123.0));
        assert_eq!(limit_number("4000", 3), Some(400.0));
        // truncation keeps raw characters, which may not be numeric
        assert_eq!(limit_number("1 kg 999", 3), None);
    }
}
