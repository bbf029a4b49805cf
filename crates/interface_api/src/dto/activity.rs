//! Activity feed DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_lostfound::{ActivityEntry, Category, DEFAULT_ACTIVITY_LIMIT};

/// Largest feed a caller may request
pub const MAX_ACTIVITY_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u32>,
}

impl ActivityQuery {
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// `Lost` or `Found`
    #[serde(rename = "type")]
    pub kind: String,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub time: String,
}

impl From<ActivityEntry> for ActivityResponse {
    fn from(entry: ActivityEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title,
            category: entry.category,
            kind: entry.label.to_string(),
            location: entry.location,
            timestamp: entry.timestamp,
            time: entry.relative_time,
        }
    }
}
