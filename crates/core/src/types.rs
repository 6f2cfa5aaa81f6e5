/// Entity identifiers are opaque strings carrying a kind prefix (`p_`, `u_`, `m_`).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current wall-clock time.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

/// Timestamp for a modification of a record last touched at `previous`.
///
/// Always strictly later than `previous`, even if the clock has not advanced
/// since (or moved backwards).
pub fn touch(previous: Timestamp) -> Timestamp {
    let current = now();
    if current > previous {
        current
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_is_strictly_later() {
        let previous = now();
        assert!(touch(previous) > previous);
    }

    #[test]
    fn touch_moves_past_future_timestamps() {
        let future = now() + chrono::Duration::hours(1);
        let touched = touch(future);
        assert!(touched > future);
        assert_eq!(touched - future, chrono::Duration::microseconds(1));
    }
}
