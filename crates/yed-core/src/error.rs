use thiserror::Error;

pub type ValueResult<T> = Result<T, ValueError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("{option} '{value}' is not supported. Use: {allowed}")]
    UnsupportedValue {
        option: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Invalid color '{value}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor { value: String },

    #[error("Invalid number for {option}: '{value}'")]
    InvalidNumber { option: &'static str, value: String },

    #[error("Invalid boolean for {option}: '{value}' (expected true or false)")]
    InvalidBool { option: &'static str, value: String },

    #[error("Identifier space exhausted for {what}")]
    IdExhausted { what: &'static str },
}

impl ValueError {
    /// Build an `UnsupportedValue` error listing the accepted values.
    pub fn unsupported(option: &'static str, value: &str, allowed: &[&str]) -> Self {
        ValueError::UnsupportedValue {
            option,
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}
