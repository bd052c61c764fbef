//! Condition levels recorded against checklist elements.

use super::ParseConditionStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observed condition of an inspected element.
///
/// Variants are declared from least to most severe, so `Ord` compares
/// severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionStatus {
    /// Fully serviceable.
    #[serde(rename = "Исправное")]
    Serviceable,
    /// Wear present but acceptable.
    #[serde(rename = "Удовлетворительное")]
    Satisfactory,
    /// Requires repair.
    #[serde(rename = "Неудовлетворительное")]
    Unsatisfactory,
    /// Hazardous; requires urgent intervention.
    #[serde(rename = "Аварийное")]
    Emergency,
}

impl ConditionStatus {
    /// Every level, from least to most severe.
    pub const ALL: [Self; 4] = [
        Self::Serviceable,
        Self::Satisfactory,
        Self::Unsatisfactory,
        Self::Emergency,
    ];

    /// Returns the backend representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serviceable => "Исправное",
            Self::Satisfactory => "Удовлетворительное",
            Self::Unsatisfactory => "Неудовлетворительное",
            Self::Emergency => "Аварийное",
        }
    }

    /// Returns `true` for levels that call for repair work.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::Unsatisfactory | Self::Emergency)
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ConditionStatus {
    type Error = ParseConditionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ParseConditionStatusError(value.to_owned()))
    }
}
