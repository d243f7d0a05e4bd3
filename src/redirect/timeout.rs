use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Unit the marker timeout is configured in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutUnit {
    #[default]
    Minutes,
    Hours,
    Days,
}

impl TimeoutUnit {
    /// Strict parse used where an unknown unit must be rejected (settings updates).
    pub fn parse_strict(unit: &str) -> Option<Self> {
        match unit {
            "minutes" => Some(TimeoutUnit::Minutes),
            "hours" => Some(TimeoutUnit::Hours),
            "days" => Some(TimeoutUnit::Days),
            _ => None,
        }
    }

    pub fn seconds_per_unit(self) -> u64 {
        match self {
            TimeoutUnit::Minutes => 60,
            TimeoutUnit::Hours => 3600,
            TimeoutUnit::Days => 86400,
        }
    }

    pub fn to_seconds(self, value: u32) -> u64 {
        u64::from(value) * self.seconds_per_unit()
    }
}

// Anything unrecognized degrades to minutes.
impl From<&str> for TimeoutUnit {
    fn from(unit: &str) -> Self {
        TimeoutUnit::parse_strict(unit.trim()).unwrap_or_default()
    }
}

impl FromStr for TimeoutUnit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TimeoutUnit::from(s))
    }
}

impl Display for TimeoutUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutUnit::Minutes => write!(f, "minutes"),
            TimeoutUnit::Hours => write!(f, "hours"),
            TimeoutUnit::Days => write!(f, "days"),
        }
    }
}

/// Converts a timeout expressed as `value` `unit`s into seconds.
///
/// Accepts either a parsed [`TimeoutUnit`] or its stored string form.
pub fn convert(value: u32, unit: impl Into<TimeoutUnit>) -> u64 {
    unit.into().to_seconds(value)
}
