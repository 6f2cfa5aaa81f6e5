//! User-facing message catalogue.
//!
//! Clients match on these strings, so they are part of the API contract.

pub const PROJECT_NAME_REQUIRED: &str = "Project name is required";
pub const PROJECT_NAME_TAKEN: &str = "A project with this name already exists";
pub const PROJECT_ID_REQUIRED: &str = "Project ID is required";
pub const PROJECT_NOT_FOUND: &str = "Project not found";

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const USER_EMAIL_TAKEN: &str = "A user with this email already exists in this project";
pub const USER_ID_REQUIRED: &str = "User ID is required";
pub const USER_NOT_FOUND: &str = "User not found";

pub const SENDER_REQUIRED: &str = "Sender is required";
pub const SENDER_INVALID: &str = "Sender must be a valid email address";
pub const RECEIVER_REQUIRED: &str = "Receiver is required";
pub const RECEIVER_INVALID: &str = "Receiver must be a valid email address";
pub const RECEIVER_UNKNOWN: &str = "Receiver must be a valid user in this project";
pub const SUBJECT_REQUIRED: &str = "Subject is required";
pub const BODY_REQUIRED: &str = "Body is required";
pub const MESSAGE_NOT_FOUND: &str = "Message not found";
pub const READ_NOT_BOOLEAN: &str = "Read must be a boolean value";
pub const IDS_EMPTY: &str = "IDs must be a non-empty array";
pub const IDS_UNKNOWN: &str = "One or more messages not found";

/// Opaque body text for every unexpected failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error.";

/// Confirmation returned after deleting a single entity, e.g.
/// `"Project deleted successfully"`.
pub fn deleted(kind: crate::ids::EntityKind) -> String {
    format!("{} deleted successfully", kind.label())
}

/// Confirmation returned after a bulk message delete.
pub fn messages_deleted(count: usize) -> String {
    if count == 1 {
        "1 message deleted successfully".to_string()
    } else {
        format!("{count} messages deleted successfully")
    }
}
