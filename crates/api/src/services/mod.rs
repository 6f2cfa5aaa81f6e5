//! Entity services.
//!
//! Services run after validation has passed and perform the write (or read)
//! against the store. They assume their input is valid; the only failures
//! they translate are the races validation cannot rule out: a unique index
//! firing, or the target row vanishing between check and write.

pub mod message;
pub mod project;
pub mod user;

use mailstub_core::validation::FieldErrors;
use mailstub_db::StoreError;

use crate::error::AppError;

/// Report a unique-index violation as the field error validation would have
/// produced. Any other store failure passes through unchanged.
pub(crate) fn on_duplicate(
    field: &'static str,
    message: &'static str,
) -> impl Fn(StoreError) -> AppError {
    move |err| match err {
        StoreError::Duplicate { .. } => FieldErrors::single(field, message).into(),
        other => other.into(),
    }
}

/// The target of a write disappeared after validation.
pub(crate) fn gone(field: &str, message: &str) -> AppError {
    FieldErrors::single(field, message).into()
}
