//! Ownership claims

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, CoreError, ItemId, UserId};

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Awaiting faculty verification
    Pending,
    /// Ownership verified; the item is handed over
    Approved,
    /// Ownership not established
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(CoreError::validation(format!("Unknown claim status: {}", other))),
        }
    }
}

/// A faculty decision on a pending claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimDecision {
    Approved,
    Rejected,
}

impl ClaimDecision {
    /// The claim status this decision leads to
    pub fn target_status(&self) -> ClaimStatus {
        match self {
            ClaimDecision::Approved => ClaimStatus::Approved,
            ClaimDecision::Rejected => ClaimStatus::Rejected,
        }
    }
}

impl fmt::Display for ClaimDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target_status().as_str())
    }
}

impl FromStr for ClaimDecision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ClaimDecision::Approved),
            "rejected" => Ok(ClaimDecision::Rejected),
            other => Err(CoreError::validation(format!(
                "Decision must be 'approved' or 'rejected', got '{}'",
                other
            ))),
        }
    }
}

/// One entry in a claim's conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimMessage {
    pub sender_id: UserId,
    pub text: String,
    pub time: DateTime<Utc>,
}

impl ClaimMessage {
    pub fn new(sender_id: UserId, text: impl Into<String>) -> Self {
        Self {
            sender_id,
            text: text.into(),
            time: Utc::now(),
        }
    }
}

/// A user's assertion of ownership over an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Claimed item
    pub item_id: ItemId,
    /// Claiming user
    pub claimant_id: UserId,
    /// Status
    pub status: ClaimStatus,
    /// Proof of ownership supplied by the claimant
    pub details: Option<String>,
    /// Conversation, oldest first
    #[serde(default)]
    pub messages: Vec<ClaimMessage>,
    /// Note recorded with the faculty decision
    pub verification_note: Option<String>,
    /// Faculty member who decided
    pub verified_by: Option<UserId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl Claim {
    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }
}

/// Payload of a claim submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewClaim {
    #[validate(length(max = 2000, message = "details are too long"))]
    pub details: Option<String>,
    /// Optional opening message to the verifying faculty
    #[validate(length(max = 1000, message = "message is too long"))]
    pub message: Option<String>,
}

/// A claim ready for insertion; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimDraft {
    pub item_id: ItemId,
    pub claimant_id: UserId,
    pub status: ClaimStatus,
    pub details: Option<String>,
    pub messages: Vec<ClaimMessage>,
}

impl ClaimDraft {
    /// Builds a `pending` draft; a non-blank opening message becomes the first entry
    pub fn pending(item_id: ItemId, data: NewClaim, claimant_id: UserId) -> Self {
        let messages = data
            .message
            .filter(|m| !m.trim().is_empty())
            .map(|m| vec![ClaimMessage::new(claimant_id, m)])
            .unwrap_or_default();

        Self {
            item_id,
            claimant_id,
            status: ClaimStatus::Pending,
            details: data.details,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_parse() {
        assert_eq!("approved".parse::<ClaimDecision>().unwrap(), ClaimDecision::Approved);
        assert_eq!("rejected".parse::<ClaimDecision>().unwrap(), ClaimDecision::Rejected);
        assert!("pending".parse::<ClaimDecision>().is_err());
    }

    #[test]
    fn test_pending_draft_message() {
        let claimant = UserId::new();
        let draft = ClaimDraft::pending(
            ItemId::new(),
            NewClaim {
                details: None,
                message: Some("It has my initials".to_string()),
            },
            claimant,
        );
        assert_eq!(draft.status, ClaimStatus::Pending);
        assert_eq!(draft.messages.len(), 1);
        assert_eq!(draft.messages[0].sender_id, claimant);
    }

    #[test]
    fn test_blank_message_is_dropped() {
        let draft = ClaimDraft::pending(
            ItemId::new(),
            NewClaim {
                details: None,
                message: Some("   ".to_string()),
            },
            UserId::new(),
        );
        assert!(draft.messages.is_empty());
    }
}
