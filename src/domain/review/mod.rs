//! Review module - approve / request-changes votes on change requests.
//!
//! - `ChangeRequestReview` - a single review and its lifecycle flags
//! - `ReviewInvalidationReason` - why a review stopped counting
//! - `ReviewList` - the reviews of one change request, with supersession

mod invalidation_reason;
mod record;
mod review_list;

pub use invalidation_reason::ReviewInvalidationReason;
pub use record::ChangeRequestReview;
pub use review_list::{ReviewList, ReviewPolicy};
