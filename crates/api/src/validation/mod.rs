//! Validation layer.
//!
//! Every mutating request (and the two filtered list reads) passes through a
//! `check_*` function here before any service touches the store. A check
//! reads current state through the injected [`Store`](mailstub_db::Store),
//! runs every rule for every field, and either returns a typed command for
//! the service layer or a field-keyed [`FieldErrors`] report wrapped in an
//! [`AppError`](crate::error::AppError).
//!
//! [`FieldErrors`]: mailstub_core::validation::FieldErrors

pub mod fields;
pub mod message;
pub mod project;
pub mod user;
