//! Latest-activity feed entries

use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::{relative_time_from, ItemId};

use crate::item::{Category, Item, ItemType};

/// Default number of entries on the landing feed
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 3;

/// One entry of the landing-page feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: ItemId,
    pub title: String,
    pub category: Category,
    pub kind: ItemType,
    /// `Lost` or `Found`
    pub label: &'static str,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// e.g. `15m ago`
    pub relative_time: String,
}

impl ActivityEntry {
    /// Projects an item as seen at `now`; a missing timestamp reads as `now`
    pub fn from_item(item: Item, now: DateTime<Utc>) -> Self {
        let timestamp = item.created_at.unwrap_or(now);
        Self {
            id: item.id,
            title: item.title,
            category: item.category,
            kind: item.item_type,
            label: item.item_type.label(),
            location: item.location,
            timestamp,
            relative_time: relative_time_from(timestamp, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use core_kernel::UserId;
    use crate::item::ItemStatus;

    #[test]
    fn test_projection() {
        let now = Utc::now();
        let item = Item {
            id: ItemId::new(),
            title: "Sony WH-1000XM4".to_string(),
            description: String::new(),
            category: Category::Electronics,
            item_type: ItemType::Found,
            status: ItemStatus::Open,
            location: Some("Library Block A".to_string()),
            reported_by: UserId::new(),
            claimed_by: None,
            claimed_at: None,
            created_at: Some(now - Duration::minutes(2)),
            updated_at: None,
        };

        let entry = ActivityEntry::from_item(item, now);
        assert_eq!(entry.label, "Found");
        assert_eq!(entry.relative_time, "2m ago");
    }
}
