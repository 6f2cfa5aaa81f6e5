//! Email address syntax checks.

use validator::ValidateEmail;

/// Whether `candidate` (trimmed) is a syntactically valid email address.
///
/// On top of the `validator` crate's HTML5 rules, the domain must contain a
/// dot with non-empty labels: `dev@localhost` is rejected.
pub fn is_valid_email(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() || !candidate.validate_email() {
        return false;
    }

    match candidate.rsplit_once('@') {
        Some((_, domain)) => {
            let mut labels = domain.split('.');
            let has_tld = domain.contains('.');
            has_tld && labels.all(|label| !label.is_empty())
        }
        None => false,
    }
}
