//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, user references, timestamps, errors)
//! - `review` - Change request reviews and their supersession bookkeeping

pub mod foundation;
pub mod review;
