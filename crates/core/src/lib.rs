//! Pure domain building blocks for MailStub.
//!
//! Nothing in this crate touches the database or the network: it holds the
//! identifier scheme, string normalization, email syntax checks, the
//! field-keyed validation report and the user-facing message catalogue.

pub mod email;
pub mod error;
pub mod ids;
pub mod messages;
pub mod normalize;
pub mod types;
pub mod validation;
