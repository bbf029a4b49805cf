//! Test Data Builders
//!
//! Builders for stored items and claims, used to seed stores with state
//! that would take several service calls to reach.

use chrono::{DateTime, Duration, Utc};

use core_kernel::{ClaimId, ItemId, UserId};
use domain_lostfound::{
    Category, Claim, ClaimMessage, ClaimStatus, Item, ItemStatus, ItemType,
};

use crate::fixtures::REFERENCE_TIME;

/// Builder for stored items
#[derive(Debug, Clone)]
pub struct TestItemBuilder {
    title: String,
    description: String,
    category: Category,
    item_type: ItemType,
    status: ItemStatus,
    location: Option<String>,
    reported_by: UserId,
    claimed_by: Option<UserId>,
    created_at: Option<DateTime<Utc>>,
}

impl Default for TestItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestItemBuilder {
    /// Open found report of a black umbrella
    pub fn new() -> Self {
        Self {
            title: "Black Umbrella".to_string(),
            description: "Folding umbrella with a wooden handle".to_string(),
            category: Category::Accessories,
            item_type: ItemType::Found,
            status: ItemStatus::Open,
            location: Some("Main Gate".to_string()),
            reported_by: UserId::new(),
            claimed_by: None,
            created_at: Some(*REFERENCE_TIME),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn lost(mut self) -> Self {
        self.item_type = ItemType::Lost;
        self
    }

    pub fn found(mut self) -> Self {
        self.item_type = ItemType::Found;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn reported_by(mut self, user_id: UserId) -> Self {
        self.reported_by = user_id;
        self
    }

    /// Marks the item claimed by `user_id`
    pub fn claimed_by(mut self, user_id: UserId) -> Self {
        self.status = ItemStatus::Claimed;
        self.claimed_by = Some(user_id);
        self
    }

    /// Sets the creation time to `minutes` before the reference instant
    pub fn created_minutes_ago(mut self, minutes: i64) -> Self {
        self.created_at = Some(*REFERENCE_TIME - Duration::minutes(minutes));
        self
    }

    /// Leaves the creation time unset, as legacy rows have it
    pub fn without_timestamp(mut self) -> Self {
        self.created_at = None;
        self
    }

    pub fn created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Item {
        let claimed_at = self.claimed_by.and(self.created_at);
        Item {
            id: ItemId::new(),
            title: self.title,
            description: self.description,
            category: self.category,
            item_type: self.item_type,
            status: self.status,
            location: self.location,
            reported_by: self.reported_by,
            claimed_by: self.claimed_by,
            claimed_at,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Builder for stored claims
#[derive(Debug, Clone)]
pub struct TestClaimBuilder {
    item_id: ItemId,
    claimant_id: UserId,
    status: ClaimStatus,
    details: Option<String>,
    messages: Vec<ClaimMessage>,
    verification_note: Option<String>,
    verified_by: Option<UserId>,
    created_at: Option<DateTime<Utc>>,
}

impl TestClaimBuilder {
    /// Pending claim on `item_id` by a fresh claimant
    pub fn for_item(item_id: ItemId) -> Self {
        Self {
            item_id,
            claimant_id: UserId::new(),
            status: ClaimStatus::Pending,
            details: Some("Scratch near the hinge".to_string()),
            messages: Vec::new(),
            verification_note: None,
            verified_by: None,
            created_at: Some(*REFERENCE_TIME),
        }
    }

    pub fn by(mut self, claimant_id: UserId) -> Self {
        self.claimant_id = claimant_id;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Appends a message from the claimant
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.messages.push(ClaimMessage::new(self.claimant_id, text));
        self
    }

    /// Marks the claim approved by `faculty`
    pub fn approved_by(mut self, faculty: UserId, note: impl Into<String>) -> Self {
        self.status = ClaimStatus::Approved;
        self.verified_by = Some(faculty);
        self.verification_note = Some(note.into());
        self
    }

    /// Marks the claim rejected by `faculty`
    pub fn rejected_by(mut self, faculty: UserId) -> Self {
        self.status = ClaimStatus::Rejected;
        self.verified_by = Some(faculty);
        self
    }

    pub fn created_minutes_ago(mut self, minutes: i64) -> Self {
        self.created_at = Some(*REFERENCE_TIME - Duration::minutes(minutes));
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.created_at = None;
        self
    }

    pub fn created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Claim {
        let verified_at = self.verified_by.and(self.created_at);
        Claim {
            id: ClaimId::new(),
            item_id: self.item_id,
            claimant_id: self.claimant_id,
            status: self.status,
            details: self.details,
            messages: self.messages,
            verification_note: self.verification_note,
            verified_by: self.verified_by,
            created_at: self.created_at,
            updated_at: self.created_at,
            verified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claimed_item_carries_claimant() {
        let owner = UserId::new();
        let item = TestItemBuilder::new().lost().claimed_by(owner).build();

        assert_eq!(item.status, ItemStatus::Claimed);
        assert_eq!(item.claimed_by, Some(owner));
        assert!(item.claimed_at.is_some());
    }

    #[test]
    fn test_claim_messages_come_from_claimant() {
        let claimant = UserId::new();
        let claim = TestClaimBuilder::for_item(ItemId::new())
            .by(claimant)
            .with_message("It has my name inside")
            .build();

        assert!(claim.is_pending());
        assert_eq!(claim.messages[0].sender_id, claimant);
    }
}
