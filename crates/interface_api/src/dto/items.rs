//! Item DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_lostfound::{Category, Item, ItemFilter, ItemStatus, ItemType, LostFoundError};

/// Raw `GET /items` query; empty values mean "no filter"
#[derive(Debug, Default, Deserialize)]
pub struct ItemListQuery {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<ItemListQuery> for ItemFilter {
    type Error = LostFoundError;

    fn try_from(query: ItemListQuery) -> Result<Self, Self::Error> {
        Ok(ItemFilter {
            item_type: supplied(query.item_type).map(|v| v.parse()).transpose()?,
            category: supplied(query.category).map(|v| v.parse()).transpose()?,
            status: supplied(query.status).map(|v| v.parse()).transpose()?,
            search: supplied(query.search),
        })
    }
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemStatusRequest {
    pub status: ItemStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub reported_by: String,
    pub claimed_by: Option<String>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title,
            description: item.description,
            category: item.category,
            item_type: item.item_type,
            status: item.status,
            location: item.location,
            reported_by: item.reported_by.to_string(),
            claimed_by: item.claimed_by.map(|u| u.to_string()),
            claimed_at: item.claimed_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_values_do_not_filter() {
        let query = ItemListQuery {
            item_type: Some(String::new()),
            category: Some("  ".to_string()),
            status: None,
            search: Some(String::new()),
        };
        assert_eq!(ItemFilter::try_from(query).unwrap(), ItemFilter::default());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let query = ItemListQuery {
            category: Some("umbrellas".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ItemFilter::try_from(query),
            Err(LostFoundError::Validation(_))
        ));
    }

    #[test]
    fn test_known_values_parse() {
        let query = ItemListQuery {
            item_type: Some("found".to_string()),
            category: Some("id-cards".to_string()),
            search: Some("card".to_string()),
            ..Default::default()
        };
        let filter = ItemFilter::try_from(query).unwrap();
        assert_eq!(filter.item_type, Some(ItemType::Found));
        assert_eq!(filter.category, Some(Category::IdCards));
        assert_eq!(filter.search.as_deref(), Some("card"));
    }
}
