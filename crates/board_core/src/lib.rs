//! In-memory engine for a community notice board whose notices may carry
//! dynamic sign-up forms.
//!
//! Notices arrive read-only from an external content source. A notice may
//! declare a form schema; [`controller::FormController`] renders exactly one
//! such form at a time, captures field edits, validates on submit, and
//! commits accepted submissions to the session-scoped
//! [`store::SubmissionStore`] (one accepted submission per notice per
//! session).

pub mod controller;
pub mod error;
pub mod loader;
pub mod schema;
pub mod store;
