//! Generation of human-facing student identifiers.

use chrono::{Datelike, Utc};
use rand::Rng;

pub const STUDENT_ID_PREFIX: &str = "STU";

/// Attempts made to find an unused generated id before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// `STU` + current UTC year + four random digits, e.g. `STU20250042`.
pub fn generate_student_id() -> String {
    let year = Utc::now().year();
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{STUDENT_ID_PREFIX}{year}{suffix:04}")
}

/// Returns the caller's id when present and not blank.
pub fn requested_student_id(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_format() {
        let year = Utc::now().year().to_string();
        for _ in 0..50 {
            let id = generate_student_id();
            assert!(id.starts_with(STUDENT_ID_PREFIX));
            assert_eq!(id.len(), 3 + 4 + 4);
            assert_eq!(&id[3..7], year);
            assert!(id[7..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_requested_student_id() {
        assert_eq!(requested_student_id(Some("STU1")), Some("STU1"));
        assert_eq!(requested_student_id(Some("  ")), None);
        assert_eq!(requested_student_id(None), None);
    }
}
