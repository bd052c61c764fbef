//! Task priority.

use super::ParsePriorityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling priority assigned by the coordinator.
///
/// Variants are declared from most to least pressing, so the derived
/// ordering sorts urgent tasks first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskPriority {
    /// Must be handled immediately.
    #[serde(rename = "срочный")]
    Urgent,
    /// Ahead of routine work.
    #[serde(rename = "высокий")]
    High,
    /// Routine work.
    #[default]
    #[serde(rename = "обычный")]
    Normal,
    /// Can be deferred.
    #[serde(rename = "низкий")]
    Low,
}

impl TaskPriority {
    /// Returns the backend representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "срочный",
            Self::High => "высокий",
            Self::Normal => "обычный",
            Self::Low => "низкий",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "срочный" | "urgent" => Ok(Self::Urgent),
            "высокий" | "high" => Ok(Self::High),
            "обычный" | "normal" => Ok(Self::Normal),
            "низкий" | "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
