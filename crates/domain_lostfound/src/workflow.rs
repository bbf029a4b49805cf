//! Claim verification workflow
//!
//! ```text
//! Claim:  pending -> approved | rejected      (both terminal)
//! Item:   open    -> claimed                  (terminal)
//! ```
//!
//! An approval touches two documents: the claim, then the item it references.
//! The store offers no transaction across them, so the workflow is planned so
//! that repeating an approval converges instead of failing.

use serde::Serialize;

use core_kernel::{ClaimId, ItemId, UserId};

use crate::claim::{Claim, ClaimDecision, ClaimStatus};
use crate::error::LostFoundError;
use crate::item::{Item, ItemStatus};
use crate::ports::{ClaimDecisionUpdate, ItemStatusUpdate};

/// What to do with the claim document for a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStep {
    /// Write the decision
    Record,
    /// The same decision is already stored; skip the claim write
    AlreadyDecided,
}

/// Plans the claim write for `decision` given the claim's current status
///
/// Errors when the decision would reverse an earlier one.
pub fn plan_claim_step(current: ClaimStatus, decision: ClaimDecision) -> Result<ClaimStep, LostFoundError> {
    let target = decision.target_status();
    match current {
        ClaimStatus::Pending => Ok(ClaimStep::Record),
        status if status == target => Ok(ClaimStep::AlreadyDecided),
        status => Err(LostFoundError::invalid_transition(status, target)),
    }
}

/// Builds the claim write for a decision
pub fn decision_update(
    decision: ClaimDecision,
    note: Option<String>,
    verified_by: Option<UserId>,
) -> ClaimDecisionUpdate {
    ClaimDecisionUpdate {
        status: decision.target_status(),
        verification_note: note.filter(|n| !n.trim().is_empty()),
        verified_by,
    }
}

/// What to do with the item document after an approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStep {
    /// Mark the item claimed by the claimant
    MarkClaimed(ItemStatusUpdate),
    /// Already claimed by this claimant
    AlreadyClaimed,
    /// Claimed by somebody else; the write still goes ahead
    Reassign {
        previous: Option<UserId>,
        update: ItemStatusUpdate,
    },
}

/// Plans the item write that completes the approval of `claim`
pub fn plan_item_step(claim: &Claim, item: &Item) -> ItemStep {
    let update = ItemStatusUpdate {
        status: ItemStatus::Claimed,
        claimed_by: Some(claim.claimant_id),
    };

    match item.status {
        ItemStatus::Open => ItemStep::MarkClaimed(update),
        ItemStatus::Claimed if item.claimed_by == Some(claim.claimant_id) => ItemStep::AlreadyClaimed,
        ItemStatus::Claimed => ItemStep::Reassign {
            previous: item.claimed_by,
            update,
        },
    }
}

/// Outcome of a reconciliation pass over approved claims
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    /// Approved claims inspected
    pub examined: usize,
    /// Claims whose item was still open and has now been marked claimed
    pub repaired: Vec<ClaimId>,
    /// Claims that could not be repaired, with the reason
    pub failed: Vec<ReconciliationFailure>,
}

/// A claim the reconciliation pass could not repair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationFailure {
    pub claim_id: ClaimId,
    pub item_id: ItemId,
    pub reason: String,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Category, ItemType};

    fn claim(status: ClaimStatus) -> Claim {
        Claim {
            id: ClaimId::new(),
            item_id: ItemId::new(),
            claimant_id: UserId::new(),
            status,
            details: None,
            messages: Vec::new(),
            verification_note: None,
            verified_by: None,
            created_at: None,
            updated_at: None,
            verified_at: None,
        }
    }

    fn item(status: ItemStatus, claimed_by: Option<UserId>) -> Item {
        Item {
            id: ItemId::new(),
            title: "Calculator".to_string(),
            description: String::new(),
            category: Category::Electronics,
            item_type: ItemType::Found,
            status,
            location: None,
            reported_by: UserId::new(),
            claimed_by,
            claimed_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_pending_records_either_decision() {
        assert_eq!(
            plan_claim_step(ClaimStatus::Pending, ClaimDecision::Approved).unwrap(),
            ClaimStep::Record
        );
        assert_eq!(
            plan_claim_step(ClaimStatus::Pending, ClaimDecision::Rejected).unwrap(),
            ClaimStep::Record
        );
    }

    #[test]
    fn test_repeat_decision_is_idempotent() {
        assert_eq!(
            plan_claim_step(ClaimStatus::Approved, ClaimDecision::Approved).unwrap(),
            ClaimStep::AlreadyDecided
        );
    }

    #[test]
    fn test_reversal_is_rejected() {
        let err = plan_claim_step(ClaimStatus::Rejected, ClaimDecision::Approved).unwrap_err();
        assert!(err.to_string().contains("from rejected to approved"));
    }

    #[test]
    fn test_blank_note_is_dropped() {
        let update = decision_update(ClaimDecision::Rejected, Some("  ".to_string()), None);
        assert_eq!(update.verification_note, None);
        assert_eq!(update.status, ClaimStatus::Rejected);
    }

    #[test]
    fn test_item_steps() {
        let c = claim(ClaimStatus::Approved);
        assert!(matches!(plan_item_step(&c, &item(ItemStatus::Open, None)), ItemStep::MarkClaimed(_)));
        assert_eq!(
            plan_item_step(&c, &item(ItemStatus::Claimed, Some(c.claimant_id))),
            ItemStep::AlreadyClaimed
        );
        assert!(matches!(
            plan_item_step(&c, &item(ItemStatus::Claimed, Some(UserId::new()))),
            ItemStep::Reassign { .. }
        ));
    }
}
