//! Item search filters

use crate::item::{Category, Item, ItemStatus, ItemType};
use crate::ports::ItemQuery;

/// Filter for item listings
///
/// `item_type`, `category` and `status` are equality predicates pushed down to
/// the store. `search` is a case-insensitive substring match on title or
/// description, applied after the store query since the store cannot index it.
/// Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub item_type: Option<ItemType>,
    pub category: Option<Category>,
    pub status: Option<ItemStatus>,
    pub search: Option<String>,
}

impl ItemFilter {
    pub fn of_type(item_type: ItemType) -> Self {
        Self {
            item_type: Some(item_type),
            ..Default::default()
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    /// The equality part of the filter, newest first
    pub fn to_store_query(&self) -> ItemQuery {
        ItemQuery {
            item_type: self.item_type,
            category: self.category,
            status: self.status,
            newest_first: true,
            ..Default::default()
        }
    }

    /// Lowercased search needle; an empty string does not constrain
    pub fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// True if the item satisfies every supplied predicate
    pub fn matches(&self, item: &Item) -> bool {
        self.to_store_query().matches(item)
            && self.needle().map_or(true, |n| item.mentions(&n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ItemId, UserId};

    fn item(title: &str, item_type: ItemType) -> Item {
        Item {
            id: ItemId::new(),
            title: title.to_string(),
            description: String::new(),
            category: Category::Keys,
            item_type,
            status: ItemStatus::Open,
            location: None,
            reported_by: UserId::new(),
            claimed_by: None,
            claimed_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ItemFilter::default();
        assert!(filter.matches(&item("Anything", ItemType::Found)));
    }

    #[test]
    fn test_type_and_search_conjunction() {
        let filter = ItemFilter::of_type(ItemType::Lost).search("KEY");
        assert!(filter.matches(&item("Dorm Keys", ItemType::Lost)));
        assert!(!filter.matches(&item("Dorm Keys", ItemType::Found)));
        assert!(!filter.matches(&item("Wallet", ItemType::Lost)));
    }

    #[test]
    fn test_empty_search_is_ignored() {
        let filter = ItemFilter::default().search("");
        assert!(filter.needle().is_none());
    }

    #[test]
    fn test_category_is_strict_equality() {
        let filter = ItemFilter::default().category(Category::Other);
        let mut keys = item("Dorm Keys", ItemType::Lost);
        assert!(!filter.matches(&keys));
        keys.category = Category::Other;
        assert!(filter.matches(&keys));
    }
}
