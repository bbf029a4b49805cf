//! Claims repository implementation
//!
//! Database access for ownership claims, their faculty decisions and the
//! claimant/faculty conversation stored alongside each claim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id, item_id, claimant_id, status, details, messages,
    verification_note, verified_by, created_at, updated_at, verified_at
"#;

/// Repository for the `claims` table
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a claim
    pub async fn create(&self, claim: NewClaimRow) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO claims (
                claim_id, item_id, claimant_id, status, details, messages,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {CLAIM_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(claim.item_id)
            .bind(claim.claimant_id)
            .bind(claim.status)
            .bind(claim.details)
            .bind(Json(claim.messages))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Retrieves a claim by its identifier
    pub async fn get_by_id(&self, claim_id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE claim_id = $1");
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Finds claims matching every supplied column predicate
    pub async fn search(&self, search: ClaimSearch) -> Result<Vec<ClaimRow>, DatabaseError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE TRUE"));

        if let Some(status) = search.status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(claimant_id) = search.claimant_id {
            builder.push(" AND claimant_id = ").push_bind(claimant_id);
        }
        if let Some(item_id) = search.item_id {
            builder.push(" AND item_id = ").push_bind(item_id);
        }
        if search.newest_first {
            builder.push(" ORDER BY created_at DESC NULLS LAST");
        }

        let rows = builder
            .build_query_as::<ClaimRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Records a faculty decision
    pub async fn record_decision(
        &self,
        claim_id: Uuid,
        status: ClaimStatus,
        verification_note: Option<String>,
        verified_by: Option<Uuid>,
    ) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE claims SET
                status = $2,
                verification_note = $3,
                verified_by = $4,
                verified_at = $5,
                updated_at = $5
            WHERE claim_id = $1
            RETURNING {CLAIM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .bind(status)
            .bind(verification_note)
            .bind(verified_by)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }

    /// Appends one message to the claim's conversation
    pub async fn append_message(
        &self,
        claim_id: Uuid,
        message: MessageRow,
    ) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE claims SET
                messages = messages || $2,
                updated_at = $3
            WHERE claim_id = $1
            RETURNING {CLAIM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .bind(Json(vec![message]))
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }
}

/// Database row for the claims table
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub item_id: Uuid,
    pub claimant_id: Uuid,
    pub status: ClaimStatus,
    pub details: Option<String>,
    pub messages: Json<Vec<MessageRow>>,
    pub verification_note: Option<String>,
    pub verified_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
}

/// One entry of the `messages` JSONB array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRow {
    pub sender_id: Uuid,
    pub text: String,
    pub time: DateTime<Utc>,
}

/// Data for inserting a claim
#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub item_id: Uuid,
    pub claimant_id: Uuid,
    pub status: ClaimStatus,
    pub details: Option<String>,
    pub messages: Vec<MessageRow>,
}

/// Column predicates for [`ClaimsRepository::search`]
#[derive(Debug, Clone, Default)]
pub struct ClaimSearch {
    pub status: Option<ClaimStatus>,
    pub claimant_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub newest_first: bool,
}

/// Claim status enum matching the database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_json_shape() {
        let message = MessageRow {
            sender_id: Uuid::nil(),
            text: "Is the strap blue?".to_string(),
            time: DateTime::<Utc>::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["text"], "Is the strap blue?");
        assert!(json["time"].is_string());
    }
}
