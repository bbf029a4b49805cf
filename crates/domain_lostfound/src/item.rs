//! Item reports

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use core_kernel::{CoreError, ItemId, UserId};

/// Whether the belonging was lost or found by the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }

    /// Capitalised label shown in activity feeds
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Lost => "Lost",
            ItemType::Found => "Found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(ItemType::Lost),
            "found" => Ok(ItemType::Found),
            other => Err(CoreError::validation(format!("Unknown item type: {}", other))),
        }
    }
}

/// Item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Active report, visible in searches
    Open,
    /// An ownership claim was approved
    Claimed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Open => "open",
            ItemStatus::Claimed => "claimed",
        }
    }

    /// Checks if transition is valid
    ///
    /// `open -> claimed` is the only move; re-applying the current status is
    /// accepted so that retried writes stay harmless.
    pub fn can_transition_to(&self, target: ItemStatus) -> bool {
        use ItemStatus::*;
        matches!((self, target), (Open, Claimed) | (Open, Open) | (Claimed, Claimed))
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ItemStatus::Open),
            "claimed" => Ok(ItemStatus::Claimed),
            other => Err(CoreError::validation(format!("Unknown item status: {}", other))),
        }
    }
}

/// Item category
///
/// Stored as a kebab-case string. Anything unrecognised reads back as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Electronics,
    Accessories,
    Keys,
    Wallet,
    Phone,
    Laptop,
    Books,
    Clothing,
    Jewelry,
    Cards,
    IdCards,
    Bags,
    Stationery,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Electronics,
        Category::Accessories,
        Category::Keys,
        Category::Wallet,
        Category::Phone,
        Category::Laptop,
        Category::Books,
        Category::Clothing,
        Category::Jewelry,
        Category::Cards,
        Category::IdCards,
        Category::Bags,
        Category::Stationery,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Accessories => "accessories",
            Category::Keys => "keys",
            Category::Wallet => "wallet",
            Category::Phone => "phone",
            Category::Laptop => "laptop",
            Category::Books => "books",
            Category::Clothing => "clothing",
            Category::Jewelry => "jewelry",
            Category::Cards => "cards",
            Category::IdCards => "id-cards",
            Category::Bags => "bags",
            Category::Stationery => "stationery",
            Category::Other => "other",
        }
    }

    /// Lenient parse: case-insensitive, unknown values become `Other`
    pub fn parse_lenient(s: &str) -> Self {
        let lowered = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .unwrap_or(Category::Other)
    }
}

/// Strict parse for caller-supplied filters; stored values go through
/// [`Category::parse_lenient`]
impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| CoreError::validation(format!("Unknown category: {}", s)))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse_lenient(&s))
    }
}

/// A reported lost or found belonging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier
    pub id: ItemId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub location: Option<String>,
    /// Reporting user
    pub reported_by: UserId,
    /// Claimant whose claim was approved
    pub claimed_by: Option<UserId>,
    pub claimed_at: Option<DateTime<Utc>>,
    /// Store timestamp; absent until the store has resolved it
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn is_open(&self) -> bool {
        self.status == ItemStatus::Open
    }

    /// Case-insensitive substring match on title or description
    ///
    /// `needle` must already be lowercase.
    pub fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Payload of a lost/found report submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewItem {
    #[validate(length(min = 1, max = 120, message = "title must be 1-120 characters"))]
    pub title: String,
    #[validate(length(max = 2000, message = "description is too long"))]
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[validate(length(max = 200, message = "location is too long"))]
    pub location: Option<String>,
}

/// An item ready for insertion; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub reported_by: UserId,
}

impl ItemDraft {
    /// Builds an `open` draft from a report submission
    pub fn open(data: NewItem, reported_by: UserId) -> Self {
        Self {
            title: data.title.trim().to_string(),
            description: data.description,
            category: data.category,
            item_type: data.item_type,
            status: ItemStatus::Open,
            location: data.location,
            reported_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lenient_parse() {
        assert_eq!(Category::parse_lenient("Keys"), Category::Keys);
        assert_eq!(Category::parse_lenient("id-cards"), Category::IdCards);
        assert_eq!(Category::parse_lenient("umbrella"), Category::Other);
        assert_eq!(Category::parse_lenient(""), Category::Other);
    }

    #[test]
    fn test_category_strict_parse() {
        assert_eq!("ID-Cards".parse::<Category>().unwrap(), Category::IdCards);
        assert_eq!("other".parse::<Category>().unwrap(), Category::Other);
        assert!("umbrellas".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_item_status_transitions() {
        assert!(ItemStatus::Open.can_transition_to(ItemStatus::Claimed));
        assert!(ItemStatus::Claimed.can_transition_to(ItemStatus::Claimed));
        assert!(!ItemStatus::Claimed.can_transition_to(ItemStatus::Open));
    }

    #[test]
    fn test_draft_is_open_and_trimmed() {
        let draft = ItemDraft::open(
            NewItem {
                title: "  Blue umbrella ".to_string(),
                description: String::new(),
                category: Category::Other,
                item_type: ItemType::Found,
                location: None,
            },
            UserId::new(),
        );
        assert_eq!(draft.status, ItemStatus::Open);
        assert_eq!(draft.title, "Blue umbrella");
    }
}
