//! Application status constants and the approval state machine.
//!
//! An application starts in `pending` and is moved exactly once, by the
//! project owner, to `approved` or `rejected`. Terminal states have no
//! outgoing transitions: there is no un-approve and no re-apply edge.

use crate::error::CoreError;

/// Application awaiting the owner's decision.
pub const STATUS_PENDING: &str = "pending";

/// Applicant accepted; unlocks vault access and messaging.
pub const STATUS_APPROVED: &str = "approved";

/// Applicant declined.
pub const STATUS_REJECTED: &str = "rejected";

/// The two decisions an owner can record on a pending application.
pub const VALID_DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Validate that a decision string is one of the accepted values.
pub fn validate_decision(decision: &str) -> Result<(), CoreError> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        )))
    }
}

/// Whether a status is terminal (no outgoing transitions).
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_APPROVED || status == STATUS_REJECTED
}

/// Check that a transition from `current` to `decision` is legal.
///
/// The only legal edges are `pending -> approved` and `pending -> rejected`.
/// A decision on an already-decided application fails with
/// [`CoreError::AlreadyDecided`] regardless of which terminal state it is in.
pub fn validate_transition(current: &str, decision: &str) -> Result<(), CoreError> {
    validate_decision(decision)?;
    if current != STATUS_PENDING {
        return Err(CoreError::AlreadyDecided);
    }
    Ok(())
}
