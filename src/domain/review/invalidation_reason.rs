//! ReviewInvalidationReason enum classifying why a review stopped counting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a review no longer counts toward the approval decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewInvalidationReason {
    /// The same author reviewed the change request again.
    Superseded,
    /// The reviewed content was modified after the review was cast.
    ContentChanged,
    /// The author is no longer among the allowed approvers.
    ApproversChanged,
    /// Invalidated explicitly by an administrator.
    Manual,
}

impl fmt::Display for ReviewInvalidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewInvalidationReason::Superseded => "SUPERSEDED",
            ReviewInvalidationReason::ContentChanged => "CONTENT_CHANGED",
            ReviewInvalidationReason::ApproversChanged => "APPROVERS_CHANGED",
            ReviewInvalidationReason::Manual => "MANUAL",
        };
        write!(f, "{}", s)
    }
}
