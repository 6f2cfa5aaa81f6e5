/// Canonical comparison form for names and email addresses: surrounding
/// whitespace removed, lowercased.
///
/// Every uniqueness rule (project names, user emails) and the receiver lookup
/// for messages compare through this one function.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
