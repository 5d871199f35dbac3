//! Cultural Background
//!
//! Closed set of cultural tags. Comparison and serialization always go through
//! the string tag, never the variant ordinal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Anything that exposes a stable string label.
///
/// The categorical distance in the scorer prefers this label over the raw
/// value when both are available.
pub trait Tagged {
    /// Returns the label.
    fn tag(&self) -> &str;
}

/// Cultural background of an agent or the audience a piece of content targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Cultural {
    #[default]
    Western,
    Eastern,
    African,
    Indigenous,
    Multicultural,
}

impl Cultural {
    /// Every variant, in declaration order.
    pub const ALL: [Cultural; 5] = [
        Cultural::Western,
        Cultural::Eastern,
        Cultural::African,
        Cultural::Indigenous,
        Cultural::Multicultural,
    ];

    /// Returns the lowercase string tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Cultural::Western => "western",
            Cultural::Eastern => "eastern",
            Cultural::African => "african",
            Cultural::Indigenous => "indigenous",
            Cultural::Multicultural => "multicultural",
        }
    }
}

impl Tagged for Cultural {
    fn tag(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Cultural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cultural {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "western" => Ok(Cultural::Western),
            "eastern" => Ok(Cultural::Eastern),
            "african" => Ok(Cultural::African),
            "indigenous" => Ok(Cultural::Indigenous),
            "multicultural" => Ok(Cultural::Multicultural),
            _ => Err(ValidationError::UnknownCultural(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for cultural in Cultural::ALL {
            assert_eq!(cultural.tag().parse::<Cultural>(), Ok(cultural));
            assert_eq!(cultural.to_string(), cultural.tag());
        }
    }

    #[test]
    fn test_parse_is_case_and_whitespace_insensitive() {
        assert_eq!(" Eastern ".parse::<Cultural>(), Ok(Cultural::Eastern));
        assert_eq!("MULTICULTURAL".parse::<Cultural>(), Ok(Cultural::Multicultural));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = "martian".parse::<Cultural>().unwrap_err();
        assert_eq!(err.field(), "cultural");
        assert!(err.to_string().contains("martian"));
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&Cultural::Indigenous).unwrap();
        assert_eq!(json, "\"indigenous\"");
        let parsed: Cultural = serde_json::from_str("\"african\"").unwrap();
        assert_eq!(parsed, Cultural::African);
    }
}
