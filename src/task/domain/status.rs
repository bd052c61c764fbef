//! Task status enumeration and immutable status sets.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Lifecycle status of an inspection task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created by a coordinator, not yet dispatched.
    New,
    /// Dispatched and awaiting the inspector's acceptance.
    Pending,
    /// Accepted by the inspector; results are being recorded.
    InProgress,
    /// Submitted by the inspector and awaiting coordinator review.
    OnReview,
    /// Sent back to the inspector by the reviewing coordinator.
    ForRevision,
    /// Accepted by the coordinator.
    Approved,
    /// Abandoned by a coordinator.
    Canceled,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::New,
        Self::Pending,
        Self::InProgress,
        Self::OnReview,
        Self::ForRevision,
        Self::Approved,
        Self::Canceled,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::OnReview => "OnReview",
            Self::ForRevision => "ForRevision",
            Self::Approved => "Approved",
            Self::Canceled => "Canceled",
        }
    }

    const fn bit(self) -> u8 {
        1_u8 << (self as u8)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "pending" => Ok(Self::Pending),
            "inprogress" | "in_progress" => Ok(Self::InProgress),
            "onreview" | "on_review" => Ok(Self::OnReview),
            "forrevision" | "for_revision" => Ok(Self::ForRevision),
            "approved" => Ok(Self::Approved),
            "canceled" => Ok(Self::Canceled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Immutable set of task statuses.
///
/// Backed by a bit mask, so sets are `Copy` and comparisons are cheap.
/// Iteration always follows [`TaskStatus::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TaskStatusSet(u8);

impl TaskStatusSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of this set that also contains `status`.
    #[must_use]
    pub const fn with(self, status: TaskStatus) -> Self {
        Self(self.0 | status.bit())
    }

    /// Returns `true` when `status` is a member of the set.
    #[must_use]
    pub const fn contains(self, status: TaskStatus) -> bool {
        self.0 & status.bit() != 0
    }

    /// Returns `true` when the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over members in lifecycle order.
    pub fn iter(self) -> impl Iterator<Item = TaskStatus> {
        TaskStatus::ALL
            .into_iter()
            .filter(move |status| self.contains(*status))
    }
}

impl FromIterator<TaskStatus> for TaskStatusSet {
    fn from_iter<T: IntoIterator<Item = TaskStatus>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for TaskStatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, status) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(status.as_str())?;
        }
        f.write_str("}")
    }
}
