//! Project lifecycle status constants and normalization policy.
//!
//! Historical rows carry free-form status values (`NULL`, empty strings,
//! legacy labels), so every status read goes through [`normalize_status`].
//! Submission is hard-blocked only when the normalized status is `completed`
//! or `closed`; anything unrecognized normalizes to `active`.

/// Project is published and accepting applications.
pub const STATUS_ACTIVE: &str = "active";

/// Project finished; listing stays visible but applications are blocked.
pub const STATUS_COMPLETED: &str = "completed";

/// Owner closed recruitment.
pub const STATUS_CLOSED: &str = "closed";

/// Legacy label some early rows used for `active`.
const LEGACY_PUBLISHED: &str = "yayinda";

/// Normalize a raw status value to one of the three canonical states.
///
/// `None`, empty, and legacy "published" values all map to `active`.
pub fn normalize_status(raw: Option<&str>) -> &'static str {
    let trimmed = raw.map(str::trim).unwrap_or("");
    match trimmed.to_ascii_lowercase().as_str() {
        STATUS_COMPLETED => STATUS_COMPLETED,
        STATUS_CLOSED => STATUS_CLOSED,
        "" | STATUS_ACTIVE | LEGACY_PUBLISHED => STATUS_ACTIVE,
        _ => STATUS_ACTIVE,
    }
}

/// Whether a project with the given raw status accepts new applications.
pub fn is_accepting_applications(raw_status: Option<&str>) -> bool {
    normalize_status(raw_status) == STATUS_ACTIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_status_is_active() {
        assert_eq!(normalize_status(None), STATUS_ACTIVE);
    }

    #[test]
    fn empty_and_whitespace_are_active() {
        assert_eq!(normalize_status(Some("")), STATUS_ACTIVE);
        assert_eq!(normalize_status(Some("   ")), STATUS_ACTIVE);
    }

    #[test]
    fn legacy_published_label_is_active() {
        assert_eq!(normalize_status(Some("yayinda")), STATUS_ACTIVE);
        assert_eq!(normalize_status(Some("Yayinda")), STATUS_ACTIVE);
    }

    #[test]
    fn completed_and_closed_are_preserved() {
        assert_eq!(normalize_status(Some("completed")), STATUS_COMPLETED);
        assert_eq!(normalize_status(Some("closed")), STATUS_CLOSED);
        assert_eq!(normalize_status(Some("  CLOSED ")), STATUS_CLOSED);
    }

    #[test]
    fn unknown_labels_fall_back_to_active() {
        assert_eq!(normalize_status(Some("draft")), STATUS_ACTIVE);
    }

    #[test]
    fn only_active_accepts_applications() {
        assert!(is_accepting_applications(None));
        assert!(is_accepting_applications(Some("active")));
        assert!(!is_accepting_applications(Some("completed")));
        assert!(!is_accepting_applications(Some("closed")));
    }
}
