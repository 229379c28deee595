//! ReviewList - the reviews held by a single change request.
//!
//! The list does the supersession bookkeeping that individual reviews leave
//! to their callers: reviews are kept in review-date order, and when an
//! author reviews again, every earlier review from that author stops being
//! the last one, and (by default) stops counting.
//!
//! Deciding whether the change request is approved is left to the approval
//! strategy; nothing here counts votes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::foundation::{
    ChangeRequestId, DomainError, ErrorCode, ReviewId, UserReference,
};

use super::{ChangeRequestReview, ReviewInvalidationReason};

/// How a [`ReviewList`] treats reviews that get superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPolicy {
    /// Also mark superseded reviews invalid, with reason `Superseded`.
    pub invalidate_superseded: bool,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            invalidate_superseded: true,
        }
    }
}

/// Ordered reviews of one change request, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewList {
    change_request: ChangeRequestId,
    policy: ReviewPolicy,
    reviews: Vec<ChangeRequestReview>,
}

impl ReviewList {
    /// Creates an empty list for the given change request.
    pub fn new(change_request: ChangeRequestId, policy: ReviewPolicy) -> Self {
        Self {
            change_request,
            policy,
            reviews: Vec::new(),
        }
    }

    /// Returns the owning change request.
    pub fn change_request(&self) -> ChangeRequestId {
        self.change_request
    }

    /// Returns the supersession policy.
    pub fn policy(&self) -> ReviewPolicy {
        self.policy
    }

    /// Returns all reviews, oldest first.
    pub fn reviews(&self) -> &[ChangeRequestReview] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Inserts a review in date order and settles which review from its
    /// author is the last one.
    ///
    /// Reviews from the same author dated no later than the incoming one are
    /// superseded. If the author already has a later review, the incoming
    /// review is the one superseded. Reviews already invalid keep their
    /// recorded reason.
    ///
    /// # Errors
    ///
    /// - `ReviewParentMismatch` if the review belongs to another change request
    /// - `DuplicateReviewId` if a review with the same storage id is present
    pub fn add(&mut self, mut review: ChangeRequestReview) -> Result<(), DomainError> {
        if review.change_request() != self.change_request {
            warn!(
                expected = %self.change_request,
                actual = %review.change_request(),
                "rejecting review attached to another change request"
            );
            return Err(DomainError::new(
                ErrorCode::ReviewParentMismatch,
                "Review belongs to a different change request",
            )
            .with_detail("expected", self.change_request.to_string())
            .with_detail("actual", review.change_request().to_string()));
        }

        if let Some(id) = review.id() {
            if self.find_by_id(id).is_some() {
                return Err(duplicate_id(id));
            }
        }

        let invalidate = self.policy.invalidate_superseded;
        let date = review.review_date();
        let has_later = self
            .reviews
            .iter()
            .any(|r| r.author() == review.author() && date.is_before(&r.review_date()));

        if has_later {
            retire(&mut review, invalidate);
            debug!(
                change_request = %self.change_request,
                author = %review.author(),
                %date,
                "added review predates a later one from the same author"
            );
        } else {
            for previous in self
                .reviews
                .iter_mut()
                .filter(|r| r.author() == review.author() && r.is_last_from_author())
            {
                retire(previous, invalidate);
                debug!(
                    change_request = %self.change_request,
                    author = %previous.author(),
                    invalidated = invalidate,
                    "superseded earlier review"
                );
            }
        }

        let position = self
            .reviews
            .partition_point(|r| !date.is_before(&r.review_date()));
        self.reviews.insert(position, review);
        Ok(())
    }

    /// Returns reviews that count toward the approval decision.
    pub fn valid_reviews(&self) -> impl Iterator<Item = &ChangeRequestReview> {
        self.reviews.iter().filter(|r| r.is_valid())
    }

    /// Returns every review by `author`, oldest first.
    pub fn reviews_from<'a>(
        &'a self,
        author: &'a UserReference,
    ) -> impl Iterator<Item = &'a ChangeRequestReview> + 'a {
        self.reviews.iter().filter(move |r| r.author() == author)
    }

    /// Returns the most recent review by `author`.
    pub fn latest_from(&self, author: &UserReference) -> Option<&ChangeRequestReview> {
        self.reviews.iter().rev().find(|r| r.author() == author)
    }

    /// Returns the review stored under `id`.
    pub fn find_by_id(&self, id: &ReviewId) -> Option<&ChangeRequestReview> {
        self.reviews.iter().find(|r| r.id() == Some(id))
    }

    /// Invalidates every still-valid review, e.g. after the content changed.
    ///
    /// Returns the number of reviews that changed.
    pub fn invalidate_all(&mut self, reason: ReviewInvalidationReason) -> usize {
        let mut count = 0;
        for review in self.reviews.iter_mut().filter(|r| r.is_valid()) {
            review.invalidate(reason);
            count += 1;
        }
        debug!(
            change_request = %self.change_request,
            %reason,
            count,
            "invalidated reviews"
        );
        count
    }

    /// Reviews storage still has to write.
    pub fn unsaved(&self) -> impl Iterator<Item = &ChangeRequestReview> {
        self.reviews.iter().filter(|r| !r.is_saved())
    }

    /// Marks every unsaved review saved under the id `assign_id` returns.
    ///
    /// Ids are checked against the rest of the list the same way [`add`]
    /// checks them. On a duplicate, reviews marked so far stay marked and the
    /// offending review is left unsaved.
    ///
    /// Returns the number of reviews marked.
    ///
    /// [`add`]: ReviewList::add
    pub fn record_saved<F>(&mut self, mut assign_id: F) -> Result<usize, DomainError>
    where
        F: FnMut(&ChangeRequestReview) -> ReviewId,
    {
        let mut count = 0;
        for index in 0..self.reviews.len() {
            if self.reviews[index].is_saved() {
                continue;
            }
            let id = assign_id(&self.reviews[index]);
            let taken = self
                .reviews
                .iter()
                .enumerate()
                .any(|(other, r)| other != index && r.id() == Some(&id));
            if taken {
                return Err(duplicate_id(&id));
            }
            self.reviews[index].mark_saved(id);
            count += 1;
        }
        debug!(change_request = %self.change_request, count, "recorded saved reviews");
        Ok(count)
    }

    /// Copies the list onto another change request.
    ///
    /// Every review is copied with [`ChangeRequestReview::clone_with_change_request`].
    /// The copies additionally keep their source's last-from-author flag and
    /// original approver, so the fork carries the same history.
    pub fn clone_for(&self, change_request: ChangeRequestId) -> ReviewList {
        let reviews = self
            .reviews
            .iter()
            .map(|source| {
                let mut copy = source.clone_with_change_request(change_request);
                copy.set_last_from_author(source.is_last_from_author())
                    .set_original_approver(source.original_approver().cloned());
                copy
            })
            .collect();

        debug!(
            from = %self.change_request,
            to = %change_request,
            count = self.reviews.len(),
            "cloned review list"
        );

        ReviewList {
            change_request,
            policy: self.policy,
            reviews,
        }
    }
}

/// Takes a review out of the running for its author.
fn retire(review: &mut ChangeRequestReview, invalidate: bool) {
    if invalidate && review.is_valid() {
        review.supersede();
    } else {
        review.set_last_from_author(false);
    }
}

fn duplicate_id(id: &ReviewId) -> DomainError {
    warn!(review_id = %id, "rejecting duplicate review id");
    DomainError::new(
        ErrorCode::DuplicateReviewId,
        "A review with this id is already present",
    )
    .with_detail("review_id", id.to_string())
}
