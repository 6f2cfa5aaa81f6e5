use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more request fields broke a rule. Never a bug; the request
    /// changed nothing.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}
