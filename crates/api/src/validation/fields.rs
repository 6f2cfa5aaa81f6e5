//! Field names and the per-field rules shared by every entity check.

use mailstub_core::email::is_valid_email;
use mailstub_core::ids::EntityKind;
use mailstub_core::validation::FieldErrors;
use serde_json::Value;

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const PROJECT_ID: &str = "projectId";
pub const USER_ID: &str = "userId";
pub const EMAIL: &str = "email";
pub const SENDER: &str = "sender";
pub const RECEIVER: &str = "receiver";
pub const SUBJECT: &str = "subject";
pub const BODY: &str = "body";
pub const READ: &str = "read";
pub const IDS: &str = "ids";

/// Whether `id` carries the prefix of `kind`. An id of another kind can never
/// resolve, so callers skip the store lookup.
pub fn is_id_of(kind: EntityKind, id: &str) -> bool {
    EntityKind::from_id(id) == Some(kind)
}

/// The trimmed text of a JSON string field, or `None` if the field is
/// missing, not a string, or blank.
pub fn text(value: &Option<Value>) -> Option<&str> {
    value
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Like [`text`] but returns the untrimmed string, for fields stored
/// verbatim.
pub fn raw_text(value: &Option<Value>) -> Option<&str> {
    value
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Trimmed, non-blank query parameter.
pub fn query_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Required text field: records `missing` on `field` when absent.
pub fn required<'a>(
    value: &'a Option<Value>,
    field: &str,
    missing: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    let found = text(value);
    if found.is_none() {
        errors.add(field, missing);
    }
    found
}

/// Required email field: records `missing` when absent and `invalid` when
/// the syntax is wrong. Returns the trimmed address.
pub fn required_email<'a>(
    value: &'a Option<Value>,
    field: &str,
    missing: &str,
    invalid: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    let address = required(value, field, missing, errors)?;
    if is_valid_email(address) {
        Some(address)
    } else {
        errors.add(field, invalid);
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_kind_follows_prefix() {
        assert!(is_id_of(EntityKind::Project, "p_123"));
        assert!(!is_id_of(EntityKind::Project, "u_123"));
        assert!(!is_id_of(EntityKind::Message, "m_"));
        assert!(!is_id_of(EntityKind::User, "whatever"));
    }

    #[test]
    fn text_trims_and_rejects_blank() {
        assert_eq!(text(&Some(json!("  Acme "))), Some("Acme"));
        assert_eq!(text(&Some(json!("   "))), None);
        assert_eq!(text(&None), None);
    }

    #[test]
    fn non_strings_count_as_missing() {
        assert_eq!(text(&Some(json!(42))), None);
        assert_eq!(text(&Some(json!(true))), None);
        assert_eq!(text(&Some(json!({ "name": "x" }))), None);
        assert_eq!(text(&Some(Value::Null)), None);
    }

    #[test]
    fn raw_text_keeps_whitespace() {
        assert_eq!(raw_text(&Some(json!("  <b>hi</b>\n"))), Some("  <b>hi</b>\n"));
        assert_eq!(raw_text(&Some(json!(" \n "))), None);
    }

    #[test]
    fn query_text_trims() {
        assert_eq!(query_text(&Some(" p_1 ".to_string())), Some("p_1"));
        assert_eq!(query_text(&Some(String::new())), None);
        assert_eq!(query_text(&None), None);
    }

    #[test]
    fn required_email_reports_first_failure_only() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            required_email(&None, EMAIL, "missing", "invalid", &mut errors),
            None
        );
        assert_eq!(errors.get(EMAIL), Some("missing"));

        let mut errors = FieldErrors::new();
        let value = Some(json!("not-an-email"));
        assert_eq!(
            required_email(&value, EMAIL, "missing", "invalid", &mut errors),
            None
        );
        assert_eq!(errors.get(EMAIL), Some("invalid"));

        let mut errors = FieldErrors::new();
        let value = Some(json!(" A@B.com "));
        assert_eq!(
            required_email(&value, EMAIL, "missing", "invalid", &mut errors),
            Some("A@B.com")
        );
        assert!(errors.is_empty());
    }
}
