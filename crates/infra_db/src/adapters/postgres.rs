//! PostgreSQL Lost & Found Adapter
//!
//! Implements the `LostFoundStore` port over the items, claims and users
//! repositories.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresLostFoundAdapter;
//! use domain_lostfound::LostFoundStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn LostFoundStore> = Arc::new(PostgresLostFoundAdapter::new(pool));
//! let item = store.get_item(item_id).await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, ItemId, PortError,
    UserId,
};
use domain_lostfound::{
    Category, Claim, ClaimDecisionUpdate, ClaimDraft, ClaimMessage, ClaimQuery, ClaimStatus, Item,
    ItemDraft, ItemQuery, ItemStatus, ItemStatusUpdate, ItemType, LostFoundStore, Role, User,
};

use crate::repositories::claims::{
    ClaimRow, ClaimSearch, ClaimStatus as DbClaimStatus, ClaimsRepository, MessageRow, NewClaimRow,
};
use crate::repositories::items::{
    ItemRow, ItemSearch, ItemStatus as DbItemStatus, ItemType as DbItemType, ItemsRepository,
    NewItemRow,
};
use crate::repositories::users::{UserRole as DbUserRole, UserRow, UsersRepository};

const ADAPTER_ID: &str = "postgres-lostfound-adapter";

/// PostgreSQL-backed implementation of the LostFoundStore trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - unique/foreign key violations -> `PortError::Conflict`
/// - connection failures -> `PortError::Connection`
/// - other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresLostFoundAdapter {
    items: ItemsRepository,
    claims: ClaimsRepository,
    users: UsersRepository,
    pool: PgPool,
}

impl PostgresLostFoundAdapter {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            items: ItemsRepository::new(pool.clone()),
            claims: ClaimsRepository::new(pool.clone()),
            users: UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Direct access to the users table, for seeding
    pub fn users(&self) -> &UsersRepository {
        &self.users
    }

    /// Inserts or replaces a portal user
    pub async fn upsert_user(&self, user: &User) -> Result<(), PortError> {
        self.users.upsert(&user_to_row(user)).await?;
        Ok(())
    }
}

impl DomainPort for PostgresLostFoundAdapter {}

#[async_trait]
impl HealthCheckable for PostgresLostFoundAdapter {
    /// Performs a `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl LostFoundStore for PostgresLostFoundAdapter {
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn insert_item(&self, draft: ItemDraft) -> Result<Item, PortError> {
        let row = self
            .items
            .create(NewItemRow {
                title: draft.title,
                description: draft.description,
                category: draft.category.as_str().to_string(),
                item_type: item_type_to_db(draft.item_type),
                status: item_status_to_db(draft.status),
                location: draft.location,
                reported_by: draft.reported_by.into(),
            })
            .await?;
        Ok(row_to_item(row))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, PortError> {
        Ok(self.items.get_by_id(id.into()).await?.map(row_to_item))
    }

    #[instrument(skip(self))]
    async fn find_items(&self, query: ItemQuery) -> Result<Vec<Item>, PortError> {
        let search = ItemSearch {
            item_type: query.item_type.map(item_type_to_db),
            category: query.category.map(|c| c.as_str().to_string()),
            status: query.status.map(item_status_to_db),
            reported_by: query.reported_by.map(Into::into),
            newest_first: query.newest_first,
            limit: query.limit,
        };
        let rows = self.items.search(search).await?;
        debug!(count = rows.len(), "Items found");
        Ok(rows.into_iter().map(row_to_item).collect())
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn update_item_status(
        &self,
        id: ItemId,
        update: ItemStatusUpdate,
    ) -> Result<Item, PortError> {
        let row = self
            .items
            .update_status(
                id.into(),
                item_status_to_db(update.status),
                update.claimed_by.map(Into::into),
            )
            .await?;
        Ok(row_to_item(row))
    }

    #[instrument(skip(self, draft), fields(item_id = %draft.item_id))]
    async fn insert_claim(&self, draft: ClaimDraft) -> Result<Claim, PortError> {
        let row = self
            .claims
            .create(NewClaimRow {
                item_id: draft.item_id.into(),
                claimant_id: draft.claimant_id.into(),
                status: claim_status_to_db(draft.status),
                details: draft.details,
                messages: draft.messages.iter().map(message_to_row).collect(),
            })
            .await?;
        Ok(row_to_claim(row))
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        Ok(self.claims.get_by_id(id.into()).await?.map(row_to_claim))
    }

    #[instrument(skip(self))]
    async fn find_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let search = ClaimSearch {
            status: query.status.map(claim_status_to_db),
            claimant_id: query.claimant_id.map(Into::into),
            item_id: query.item_id.map(Into::into),
            newest_first: query.newest_first,
        };
        let rows = self.claims.search(search).await?;
        debug!(count = rows.len(), "Claims found");
        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    #[instrument(skip(self, update), fields(claim_id = %id, status = %update.status))]
    async fn record_claim_decision(
        &self,
        id: ClaimId,
        update: ClaimDecisionUpdate,
    ) -> Result<Claim, PortError> {
        let row = self
            .claims
            .record_decision(
                id.into(),
                claim_status_to_db(update.status),
                update.verification_note,
                update.verified_by.map(Into::into),
            )
            .await?;
        Ok(row_to_claim(row))
    }

    #[instrument(skip(self, message), fields(claim_id = %id))]
    async fn append_claim_message(
        &self,
        id: ClaimId,
        message: ClaimMessage,
    ) -> Result<Claim, PortError> {
        let row = self.claims.append_message(id.into(), message_to_row(&message)).await?;
        Ok(row_to_claim(row))
    }

    #[instrument(skip(self))]
    async fn find_user(&self, identifier: &str, role: Role) -> Result<Option<User>, PortError> {
        Ok(self
            .users
            .find_by_login(identifier, role_to_db(role))
            .await?
            .map(row_to_user))
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user(&self, id: UserId) -> Result<Option<User>, PortError> {
        Ok(self.users.get_by_id(id.into()).await?.map(row_to_user))
    }
}

// ============================================================================
// Row <-> domain conversions
// ============================================================================

fn row_to_item(row: ItemRow) -> Item {
    Item {
        id: ItemId::from(row.item_id),
        title: row.title,
        description: row.description,
        category: Category::parse_lenient(&row.category),
        item_type: match row.item_type {
            DbItemType::Lost => ItemType::Lost,
            DbItemType::Found => ItemType::Found,
        },
        status: match row.status {
            DbItemStatus::Open => ItemStatus::Open,
            DbItemStatus::Claimed => ItemStatus::Claimed,
        },
        location: row.location,
        reported_by: UserId::from(row.reported_by),
        claimed_by: row.claimed_by.map(UserId::from),
        claimed_at: row.claimed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_claim(row: ClaimRow) -> Claim {
    Claim {
        id: ClaimId::from(row.claim_id),
        item_id: ItemId::from(row.item_id),
        claimant_id: UserId::from(row.claimant_id),
        status: match row.status {
            DbClaimStatus::Pending => ClaimStatus::Pending,
            DbClaimStatus::Approved => ClaimStatus::Approved,
            DbClaimStatus::Rejected => ClaimStatus::Rejected,
        },
        details: row.details,
        messages: row
            .messages
            .0
            .into_iter()
            .map(|m| ClaimMessage {
                sender_id: UserId::from(m.sender_id),
                text: m.text,
                time: m.time,
            })
            .collect(),
        verification_note: row.verification_note,
        verified_by: row.verified_by.map(UserId::from),
        created_at: row.created_at,
        updated_at: row.updated_at,
        verified_at: row.verified_at,
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::from(row.user_id),
        identifier: row.identifier,
        email: row.email,
        role: match row.role {
            DbUserRole::Student => Role::Student,
            DbUserRole::Faculty => Role::Faculty,
        },
    }
}

fn user_to_row(user: &User) -> UserRow {
    UserRow {
        user_id: user.id.into(),
        identifier: user.identifier.clone(),
        email: user.email.clone(),
        role: role_to_db(user.role),
    }
}

fn message_to_row(message: &ClaimMessage) -> MessageRow {
    MessageRow {
        sender_id: message.sender_id.into(),
        text: message.text.clone(),
        time: message.time,
    }
}

fn item_type_to_db(item_type: ItemType) -> DbItemType {
    match item_type {
        ItemType::Lost => DbItemType::Lost,
        ItemType::Found => DbItemType::Found,
    }
}

fn item_status_to_db(status: ItemStatus) -> DbItemStatus {
    match status {
        ItemStatus::Open => DbItemStatus::Open,
        ItemStatus::Claimed => DbItemStatus::Claimed,
    }
}

fn claim_status_to_db(status: ClaimStatus) -> DbClaimStatus {
    match status {
        ClaimStatus::Pending => DbClaimStatus::Pending,
        ClaimStatus::Approved => DbClaimStatus::Approved,
        ClaimStatus::Rejected => DbClaimStatus::Rejected,
    }
}

fn role_to_db(role: Role) -> DbUserRole {
    match role {
        Role::Student => DbUserRole::Student,
        Role::Faculty => DbUserRole::Faculty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn item_row(category: &str) -> ItemRow {
        ItemRow {
            item_id: Uuid::now_v7(),
            title: "Library card".to_string(),
            description: String::new(),
            category: category.to_string(),
            item_type: DbItemType::Found,
            status: DbItemStatus::Claimed,
            location: None,
            reported_by: Uuid::now_v7(),
            claimed_by: Some(Uuid::now_v7()),
            claimed_at: Some(Utc::now()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_row_to_item() {
        let row = item_row("id-cards");
        let claimant = row.claimed_by;
        let item = row_to_item(row);

        assert_eq!(item.category, Category::IdCards);
        assert_eq!(item.item_type, ItemType::Found);
        assert_eq!(item.status, ItemStatus::Claimed);
        assert_eq!(item.claimed_by.map(Uuid::from), claimant);
    }

    #[test]
    fn test_unknown_category_reads_as_other() {
        assert_eq!(row_to_item(item_row("spaceships")).category, Category::Other);
    }

    #[test]
    fn test_row_to_claim_messages() {
        let sender = Uuid::now_v7();
        let row = ClaimRow {
            claim_id: Uuid::now_v7(),
            item_id: Uuid::now_v7(),
            claimant_id: sender,
            status: DbClaimStatus::Pending,
            details: None,
            messages: Json(vec![MessageRow {
                sender_id: sender,
                text: "It has my name inside".to_string(),
                time: DateTime::<Utc>::UNIX_EPOCH,
            }]),
            verification_note: None,
            verified_by: None,
            created_at: None,
            updated_at: None,
            verified_at: None,
        };

        let claim = row_to_claim(row);
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.messages.len(), 1);
        assert_eq!(claim.messages[0].sender_id, UserId::from(sender));
    }
}
