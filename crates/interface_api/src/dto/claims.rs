//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_lostfound::{Claim, ClaimDecision, ClaimMessage, ClaimStatus, ReconciliationReport};

#[derive(Debug, Deserialize)]
pub struct VerifyClaimRequest {
    pub decision: ClaimDecision,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApproveClaimRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMessageRequest {
    #[validate(length(min = 1, max = 1000, message = "message must be 1-1000 characters"))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: String,
    pub item_id: String,
    pub claimant_id: String,
    pub status: ClaimStatus,
    pub details: Option<String>,
    pub messages: Vec<MessageResponse>,
    pub verification_note: Option<String>,
    pub verified_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub sender_id: String,
    pub text: String,
    pub time: DateTime<Utc>,
}

impl From<ClaimMessage> for MessageResponse {
    fn from(message: ClaimMessage) -> Self {
        Self {
            sender_id: message.sender_id.to_string(),
            text: message.text,
            time: message.time,
        }
    }
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id.to_string(),
            item_id: claim.item_id.to_string(),
            claimant_id: claim.claimant_id.to_string(),
            status: claim.status,
            details: claim.details,
            messages: claim.messages.into_iter().map(Into::into).collect(),
            verification_note: claim.verification_note,
            verified_by: claim.verified_by.map(|u| u.to_string()),
            created_at: claim.created_at,
            updated_at: claim.updated_at,
            verified_at: claim.verified_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReconciliationResponse {
    pub examined: usize,
    pub repaired: Vec<String>,
    pub failed: Vec<ReconciliationFailureResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReconciliationFailureResponse {
    pub claim_id: String,
    pub item_id: String,
    pub reason: String,
}

impl From<ReconciliationReport> for ReconciliationResponse {
    fn from(report: ReconciliationReport) -> Self {
        Self {
            examined: report.examined,
            repaired: report.repaired.iter().map(ToString::to_string).collect(),
            failed: report
                .failed
                .into_iter()
                .map(|f| ReconciliationFailureResponse {
                    claim_id: f.claim_id.to_string(),
                    item_id: f.item_id.to_string(),
                    reason: f.reason,
                })
                .collect(),
        }
    }
}
