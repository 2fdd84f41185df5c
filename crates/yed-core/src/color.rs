use core::fmt;
use core::str::FromStr;

use crate::error::{ValueError, ValueResult};

/// A yEd color: `#RRGGBB` or `#RRGGBBAA`.
///
/// The text is kept exactly as given so files round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn parse(s: &str) -> ValueResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ValueError::InvalidColor {
                value: s.to_string(),
            })?;
        let valid_len = hex.len() == 6 || hex.len() == 8;
        if !valid_len || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidColor {
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn black() -> Self {
        Self("#000000".to_string())
    }

    pub fn white() -> Self {
        Self("#FFFFFF".to_string())
    }

    /// yEd's default node fill.
    pub fn yed_yellow() -> Self {
        Self("#FFCC00".to_string())
    }
}

impl FromStr for Color {
    type Err = ValueError;

    fn from_str(s: &str) -> ValueResult<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Color::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rgb_and_rgba() {
        assert_eq!(Color::parse("#FFCC00").unwrap().as_str(), "#FFCC00");
        assert_eq!(Color::parse("#99cc00ff").unwrap().as_str(), "#99cc00ff");
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["FFCC00", "#FFF", "#GGGGGG", "", "#FFCC0", "#FFCC00F"] {
            assert!(
                matches!(Color::parse(bad), Err(ValueError::InvalidColor { .. })),
                "{bad} should be rejected"
            );
        }
    }
}
