use mailstub_core::ids::EntityKind;

/// Failures raised by a [`Store`](crate::store::Store) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A write hit a unique index (project name, or user email within a
    /// project). Only reachable when two writers race past the
    /// application-level check.
    #[error("Duplicate {entity} violates a unique constraint")]
    Duplicate { entity: EntityKind },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Map a sqlx error, turning unique-index violations into
/// [`StoreError::Duplicate`].
pub(crate) fn classify(entity: EntityKind) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |err| match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Duplicate { entity }
        }
        _ => StoreError::Database(err),
    }
}
