//! Text forms of numbers and booleans as yEd writes them.

use crate::error::{ValueError, ValueResult};

/// Format a length the way yEd does: whole values keep one decimal (`1.0`),
/// everything else uses the shortest exact representation.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

pub fn parse_number(option: &'static str, text: &str) -> ValueResult<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValueError::InvalidNumber {
            option,
            value: text.to_string(),
        })
}

pub fn parse_integer(option: &'static str, text: &str) -> ValueResult<u32> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| ValueError::InvalidNumber {
            option,
            value: text.to_string(),
        })
}

/// Booleans are Java keywords; case is ignored on input.
pub fn parse_bool(option: &'static str, text: &str) -> ValueResult<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValueError::InvalidBool {
            option,
            value: text.to_string(),
        }),
    }
}

pub fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_keep_a_decimal() {
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(30.0), "30.0");
        assert_eq!(format_number(-4.0), "-4.0");
        assert_eq!(format_number(18.1328125), "18.1328125");
        assert_eq!(format_number(55.708984375), "55.708984375");
    }

    #[test]
    fn numbers_parse_back() {
        for v in [0.0, 1.0, 18.1328125, -273.15, 1e-3] {
            assert_eq!(parse_number("width", &format_number(v)).unwrap(), v);
        }
        assert!(parse_number("width", "wide").is_err());
        assert!(parse_number("width", "NaN").is_err());
    }

    #[test]
    fn bools_ignore_case() {
        assert!(parse_bool("visible", "TRUE").unwrap());
        assert!(!parse_bool("visible", "false").unwrap());
        assert!(matches!(
            parse_bool("visible", "yes"),
            Err(ValueError::InvalidBool { .. })
        ));
    }
}
