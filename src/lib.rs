//! Change Request Review - review records for wiki change requests
//!
//! This crate models the approve / request-changes votes cast on a change
//! request, their validity and supersession state, and the per-request review
//! list that keeps that state consistent.

pub mod config;
pub mod domain;
pub mod telemetry;
