//! Custom Test Assertions
//!
//! Assertion helpers for lost & found types with messages that name the
//! offending record.

use chrono::{DateTime, Utc};

use core_kernel::{or_epoch, UserId};
use domain_lostfound::{Claim, ClaimStatus, Item, ItemStatus, ItemType};

/// Asserts timestamps are non-increasing, with missing ones read as the epoch
pub fn assert_newest_first<T>(records: &[T], created_at: impl Fn(&T) -> Option<DateTime<Utc>>) {
    for (i, pair) in records.windows(2).enumerate() {
        let (a, b) = (or_epoch(created_at(&pair[0])), or_epoch(created_at(&pair[1])));
        assert!(
            a >= b,
            "Records out of order at index {}: {} is older than {}",
            i,
            a,
            b
        );
    }
}

/// Asserts items are ordered newest first
pub fn assert_items_newest_first(items: &[Item]) {
    assert_newest_first(items, |item| item.created_at);
}

/// Asserts claims are ordered newest first
pub fn assert_claims_newest_first(claims: &[Claim]) {
    assert_newest_first(claims, |claim| claim.created_at);
}

/// Asserts an item was handed over to `user_id`
pub fn assert_item_claimed_by(item: &Item, user_id: UserId) {
    assert_eq!(
        item.status,
        ItemStatus::Claimed,
        "Item {} should be claimed, found {}",
        item.id,
        item.status
    );
    assert_eq!(
        item.claimed_by,
        Some(user_id),
        "Item {} claimed by the wrong user",
        item.id
    );
    assert!(item.claimed_at.is_some(), "Item {} has no claimed_at", item.id);
}

/// Asserts every item has the given type
pub fn assert_all_of_type(items: &[Item], item_type: ItemType) {
    for item in items {
        assert_eq!(
            item.item_type, item_type,
            "Item {} ({}) has the wrong type",
            item.id, item.title
        );
    }
}

/// Asserts a claim's status
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} has status {}, expected {}",
        claim.id, claim.status, expected
    );
}

/// Asserts a claim was decided by `faculty`
pub fn assert_verified_by(claim: &Claim, faculty: UserId) {
    assert_eq!(
        claim.verified_by,
        Some(faculty),
        "Claim {} was verified by someone else",
        claim.id
    );
    assert!(claim.verified_at.is_some(), "Claim {} has no verified_at", claim.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TestItemBuilder;

    #[test]
    fn test_newest_first_accepts_missing_timestamps_last() {
        let items = vec![
            TestItemBuilder::new().created_minutes_ago(1).build(),
            TestItemBuilder::new().created_minutes_ago(30).build(),
            TestItemBuilder::new().without_timestamp().build(),
        ];
        assert_items_newest_first(&items);
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn test_newest_first_rejects_ascending() {
        let items = vec![
            TestItemBuilder::new().created_minutes_ago(30).build(),
            TestItemBuilder::new().created_minutes_ago(1).build(),
        ];
        assert_items_newest_first(&items);
    }
}
