//! ChangeRequestReview - one approve / request-changes vote on a change request.
//!
//! # Invariants
//!
//! - `change_request`, `approved` and `author` never change after construction
//! - A review that is not the last from its author must not be valid. This is
//!   NOT enforced by [`ChangeRequestReview::set_last_from_author`]; callers
//!   update validity separately, or use [`ChangeRequestReview::supersede`].
//!
//! # Equality
//!
//! Two reviews are equal when they agree on `approved`, `author`,
//! `review_date`, `original_approver`, `valid`, `id`, `is_new` and
//! `invalidation_reason`. The parent change request, the `saved` flag and the
//! `last_from_author` flag are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::foundation::{ChangeRequestId, ReviewId, Timestamp, UserReference};

use super::ReviewInvalidationReason;

/// A review of a change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRequestReview {
    change_request: ChangeRequestId,
    approved: bool,
    author: UserReference,
    original_approver: Option<UserReference>,
    review_date: Timestamp,
    valid: bool,
    saved: bool,
    last_from_author: bool,
    invalidation_reason: Option<ReviewInvalidationReason>,
    is_new: bool,
    id: Option<ReviewId>,
}

impl ChangeRequestReview {
    /// Creates a review dated now, valid and the latest from its author.
    pub fn new(change_request: ChangeRequestId, approved: bool, author: UserReference) -> Self {
        Self {
            change_request,
            approved,
            author,
            original_approver: None,
            review_date: Timestamp::now(),
            valid: true,
            saved: false,
            last_from_author: true,
            invalidation_reason: None,
            is_new: false,
            id: None,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════

    /// Returns the change request this review was cast on.
    pub fn change_request(&self) -> ChangeRequestId {
        self.change_request
    }

    /// Returns true if the review approves the change request.
    pub fn is_approved(&self) -> bool {
        self.approved
    }

    /// Returns the author of the review.
    pub fn author(&self) -> &UserReference {
        &self.author
    }

    /// Returns when the review was performed.
    pub fn review_date(&self) -> Timestamp {
        self.review_date
    }

    /// Returns the approver on whose behalf a delegate cast this review.
    pub fn original_approver(&self) -> Option<&UserReference> {
        self.original_approver.as_ref()
    }

    /// Returns true if the review counts toward the approval decision.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns true if no later review from the same author exists.
    pub fn is_last_from_author(&self) -> bool {
        self.last_from_author
    }

    /// Returns why the review was invalidated, if known.
    pub fn invalidation_reason(&self) -> Option<ReviewInvalidationReason> {
        self.invalidation_reason
    }

    /// Returns true if the review has been written to storage.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Returns true if the review has never been persisted under any identity.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Returns the storage identifier, once assigned.
    pub fn id(&self) -> Option<&ReviewId> {
        self.id.as_ref()
    }

    /// Returns true if the review was cast by a delegate.
    pub fn is_delegated(&self) -> bool {
        self.original_approver.is_some()
    }

    /// Returns false when the review is superseded but still counted.
    pub fn is_consistent(&self) -> bool {
        self.last_from_author || !self.valid
    }

    // ════════════════════════════════════════════════════════════════════════
    // Mutators
    // ════════════════════════════════════════════════════════════════════════

    /// Sets the review date.
    pub fn set_review_date(&mut self, review_date: Timestamp) -> &mut Self {
        self.review_date = review_date;
        self
    }

    /// Sets whether the review has been written to storage.
    pub fn set_saved(&mut self, saved: bool) -> &mut Self {
        self.saved = saved;
        self
    }

    /// Sets whether the review counts toward the approval decision.
    pub fn set_valid(&mut self, valid: bool) -> &mut Self {
        self.valid = valid;
        self
    }

    /// Sets whether this is the latest review from its author.
    ///
    /// Validity is left untouched: a review that is no longer the last from
    /// its author should also be marked invalid by the caller.
    pub fn set_last_from_author(&mut self, last_from_author: bool) -> &mut Self {
        self.last_from_author = last_from_author;
        self
    }

    /// Sets the approver on whose behalf a delegate cast this review.
    pub fn set_original_approver(&mut self, original_approver: Option<UserReference>) -> &mut Self {
        self.original_approver = original_approver;
        self
    }

    /// Sets the storage identifier.
    pub fn set_id(&mut self, id: Option<ReviewId>) -> &mut Self {
        self.id = id;
        self
    }

    /// Sets whether the review has never been persisted.
    pub fn set_new(&mut self, is_new: bool) -> &mut Self {
        self.is_new = is_new;
        self
    }

    /// Sets why the review was invalidated.
    pub fn set_invalidation_reason(
        &mut self,
        reason: Option<ReviewInvalidationReason>,
    ) -> &mut Self {
        self.invalidation_reason = reason;
        self
    }

    // ════════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ════════════════════════════════════════════════════════════════════════

    /// Records that storage persisted the review under `id`.
    pub fn mark_saved(&mut self, id: ReviewId) -> &mut Self {
        self.id = Some(id);
        self.saved = true;
        self.is_new = false;
        self
    }

    /// Marks the review as replaced by a newer one from the same author.
    pub fn supersede(&mut self) -> &mut Self {
        self.last_from_author = false;
        self.invalidate(ReviewInvalidationReason::Superseded)
    }

    /// Stops counting the review, recording why.
    pub fn invalidate(&mut self, reason: ReviewInvalidationReason) -> &mut Self {
        self.valid = false;
        self.invalidation_reason = Some(reason);
        self
    }

    /// Copies this review onto another change request.
    ///
    /// The copy keeps the vote, author, date, validity and invalidation
    /// reason. It has no storage id and is flagged new and unsaved, so storage
    /// writes it as a distinct row under `change_request`.
    pub fn clone_with_change_request(&self, change_request: ChangeRequestId) -> Self {
        let mut review = Self::new(change_request, self.approved, self.author.clone());
        review
            .set_review_date(self.review_date)
            .set_valid(self.valid)
            .set_invalidation_reason(self.invalidation_reason)
            .set_saved(false)
            .set_new(true);
        review
    }
}

impl PartialEq for ChangeRequestReview {
    fn eq(&self, other: &Self) -> bool {
        self.approved == other.approved
            && self.author == other.author
            && self.review_date == other.review_date
            && self.original_approver == other.original_approver
            && self.valid == other.valid
            && self.id == other.id
            && self.is_new == other.is_new
            && self.invalidation_reason == other.invalidation_reason
    }
}

impl Eq for ChangeRequestReview {}

impl Hash for ChangeRequestReview {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.approved.hash(state);
        self.author.hash(state);
        self.original_approver.hash(state);
        self.review_date.hash(state);
        self.valid.hash(state);
        self.id.hash(state);
        self.is_new.hash(state);
        self.invalidation_reason.hash(state);
    }
}

impl fmt::Display for ChangeRequestReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_null<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "<null>".to_string(), |v| v.to_string())
        }

        write!(
            f,
            "ChangeRequestReview[approved={},author={},originalApprover={},reviewDate={},\
             isValid={},isSaved={},id={},isNew={},reviewInvalidationReason={}]",
            self.approved,
            self.author,
            or_null(self.original_approver.as_ref()),
            self.review_date,
            self.valid,
            self.saved,
            or_null(self.id.as_ref()),
            self.is_new,
            or_null(self.invalidation_reason),
        )
    }
}
