//! Vault visibility and conversation authorization predicates.
//!
//! These are the decision rules of the access-control engine, factored out
//! as pure functions. The persistence layer supplies the inputs (project
//! owner, requester, the requester's application status if any) and these
//! functions produce the verdict. Callers must evaluate them on every read;
//! verdicts are never cached across requests because an approval can land
//! between two reads.

use crate::application::STATUS_APPROVED;
use crate::types::DbId;

/// Whether the private ("vault") detail of a project is visible to a
/// requester.
///
/// True iff the requester owns the project, or holds an application on it
/// with status `approved`. Pending, rejected, and absent applications grant
/// nothing.
pub fn can_view_vault(
    owner_id: DbId,
    requester_id: DbId,
    requester_application_status: Option<&str>,
) -> bool {
    if requester_id == owner_id {
        return true;
    }
    requester_application_status == Some(STATUS_APPROVED)
}

/// Resolve which of two would-be conversation participants is the applicant.
///
/// A conversation on a project is only ever between the project owner and
/// one other user. Returns `Some(applicant_id)` when exactly one of the two
/// is the owner, `None` otherwise (owner-to-self, or neither is the owner).
pub fn conversation_counterparty(owner_id: DbId, user_a: DbId, user_b: DbId) -> Option<DbId> {
    if user_a == user_b {
        return None;
    }
    if user_a == owner_id {
        Some(user_b)
    } else if user_b == owner_id {
        Some(user_a)
    } else {
        None
    }
}

/// Whether a conversation between the two users is authorized on a project.
///
/// True iff one of the pair is the project owner and the other holds an
/// approved application on that project. `applicant_status` is the stored
/// application status of the non-owner participant, if any.
pub fn can_open_conversation(
    owner_id: DbId,
    user_a: DbId,
    user_b: DbId,
    applicant_status: Option<&str>,
) -> bool {
    conversation_counterparty(owner_id, user_a, user_b).is_some()
        && applicant_status == Some(STATUS_APPROVED)
}
