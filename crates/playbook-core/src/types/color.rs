//! Display colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlaybookError;

/// An sRGB color written as `#RRGGBB`.
///
/// # Example
///
/// ```rust
/// use playbook_core::types::HexColor;
///
/// let orange: HexColor = "#F7931A".parse().unwrap();
/// assert_eq!(orange.rgb(), (0xF7, 0x93, 0x1A));
/// assert_eq!(orange.to_string(), "#F7931A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    /// Creates a color from its components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the `(r, g, b)` components.
    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = PlaybookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlaybookError::InvalidColor {
            value: s.to_string(),
        };

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl TryFrom<String> for HexColor {
    type Error = PlaybookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercase() {
        let c: HexColor = "#4caf50".parse().unwrap();
        assert_eq!(c, HexColor::new(0x4C, 0xAF, 0x50));
        assert_eq!(c.to_string(), "#4CAF50");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("4CAF50".parse::<HexColor>().is_err());
        assert!("#4CAF5".parse::<HexColor>().is_err());
        assert!("#GGGGGG".parse::<HexColor>().is_err());
        assert!("#ÄÄÄ".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let c: HexColor = serde_json::from_str("\"#9C27B0\"").unwrap();
        assert_eq!(c.rgb(), (0x9C, 0x27, 0xB0));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#9C27B0\"");
        assert!(serde_json::from_str::<HexColor>("\"purple\"").is_err());
    }
}
