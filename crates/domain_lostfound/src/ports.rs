//! Lost & Found Store Port
//!
//! The store holds three logical collections (`items`, `users`, `claims`)
//! addressed by opaque ids. Queries are equality predicates on top-level
//! fields, optionally ordered by `created_at` descending. Inserts receive
//! store-assigned ids and timestamps.
//!
//! Adapters:
//!
//! - **PostgreSQL** (`infra_db::adapters::PostgresLostFoundAdapter`): the real store
//! - **In-memory** ([`mock::InMemoryStore`]): test double, behind the `mock` feature
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_lostfound::{LostFoundService, LostFoundStore};
//!
//! let store: Arc<dyn LostFoundStore> = Arc::new(PostgresLostFoundAdapter::new(pool));
//! let service = LostFoundService::new(store);
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, ItemId, PortError, UserId};

use crate::claim::{Claim, ClaimDraft, ClaimMessage, ClaimStatus};
use crate::item::{Category, Item, ItemDraft, ItemStatus, ItemType};
use crate::user::{Role, User};

/// Equality query over the `items` collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub item_type: Option<ItemType>,
    pub category: Option<Category>,
    pub status: Option<ItemStatus>,
    pub reported_by: Option<UserId>,
    /// Order by `created_at` descending
    pub newest_first: bool,
    pub limit: Option<u32>,
}

impl ItemQuery {
    /// Creates a query for one reporter's items, newest first
    pub fn reported_by(user_id: UserId) -> Self {
        Self {
            reported_by: Some(user_id),
            newest_first: true,
            ..Default::default()
        }
    }

    /// Creates a query for the newest items, regardless of status
    pub fn latest(limit: u32) -> Self {
        Self {
            newest_first: true,
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// True if the item satisfies every equality predicate
    pub fn matches(&self, item: &Item) -> bool {
        self.item_type.map_or(true, |t| item.item_type == t)
            && self.category.map_or(true, |c| item.category == c)
            && self.status.map_or(true, |s| item.status == s)
            && self.reported_by.map_or(true, |u| item.reported_by == u)
    }
}

/// Equality query over the `claims` collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimQuery {
    pub status: Option<ClaimStatus>,
    pub claimant_id: Option<UserId>,
    pub item_id: Option<ItemId>,
    /// Order by `created_at` descending
    pub newest_first: bool,
}

impl ClaimQuery {
    /// Creates a query for one claimant's claims, newest first
    pub fn by_claimant(user_id: UserId) -> Self {
        Self {
            claimant_id: Some(user_id),
            newest_first: true,
            ..Default::default()
        }
    }

    /// Creates an unordered query on status
    pub fn with_status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// True if the claim satisfies every equality predicate
    pub fn matches(&self, claim: &Claim) -> bool {
        self.status.map_or(true, |s| claim.status == s)
            && self.claimant_id.map_or(true, |u| claim.claimant_id == u)
            && self.item_id.map_or(true, |i| claim.item_id == i)
    }
}

/// Status write for an item; the store stamps `updated_at` (and `claimed_at`
/// when `claimed_by` is set)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStatusUpdate {
    pub status: ItemStatus,
    pub claimed_by: Option<UserId>,
}

/// Decision write for a claim; the store stamps `verified_at` and `updated_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimDecisionUpdate {
    pub status: ClaimStatus,
    pub verification_note: Option<String>,
    pub verified_by: Option<UserId>,
}

/// The store port for the lost & found domain
///
/// Lookups by id return `Ok(None)` for absent documents; updates return
/// `PortError::NotFound` when the target does not exist.
#[async_trait]
pub trait LostFoundStore: DomainPort + HealthCheckable {
    // ========================================================================
    // Items
    // ========================================================================

    /// Inserts an item, assigning id and timestamps
    async fn insert_item(&self, draft: ItemDraft) -> Result<Item, PortError>;

    /// Retrieves an item by ID
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, PortError>;

    /// Finds items matching the query
    async fn find_items(&self, query: ItemQuery) -> Result<Vec<Item>, PortError>;

    /// Overwrites the status of an item
    async fn update_item_status(
        &self,
        id: ItemId,
        update: ItemStatusUpdate,
    ) -> Result<Item, PortError>;

    // ========================================================================
    // Claims
    // ========================================================================

    /// Inserts a claim, assigning id and timestamps
    async fn insert_claim(&self, draft: ClaimDraft) -> Result<Claim, PortError>;

    /// Retrieves a claim by ID
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Finds claims matching the query
    async fn find_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError>;

    /// Records a faculty decision on a claim
    async fn record_claim_decision(
        &self,
        id: ClaimId,
        update: ClaimDecisionUpdate,
    ) -> Result<Claim, PortError>;

    /// Appends a message to a claim's conversation
    async fn append_claim_message(
        &self,
        id: ClaimId,
        message: ClaimMessage,
    ) -> Result<Claim, PortError>;

    // ========================================================================
    // Users
    // ========================================================================

    /// Finds a user with the given role whose identifier or email matches
    async fn find_user(&self, identifier: &str, role: Role) -> Result<Option<User>, PortError>;

    /// Retrieves a user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>, PortError>;
}

/// In-memory implementation of LostFoundStore for testing
///
/// Documents are kept in insertion order, so unordered queries return them
/// in the order they were written. Individual operations can be made to fail
/// to exercise the service's transport-failure paths.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult, or_epoch};

    /// Store operations that can be forced to fail
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum StoreOperation {
        InsertItem,
        GetItem,
        FindItems,
        UpdateItemStatus,
        InsertClaim,
        GetClaim,
        FindClaims,
        RecordClaimDecision,
        AppendClaimMessage,
        FindUser,
        GetUser,
    }

    /// In-memory mock implementation of LostFoundStore
    #[derive(Debug, Default)]
    pub struct InMemoryStore {
        items: Arc<RwLock<Vec<Item>>>,
        claims: Arc<RwLock<Vec<Claim>>>,
        users: Arc<RwLock<Vec<User>>>,
        failing: Arc<RwLock<HashSet<StoreOperation>>>,
    }

    impl InMemoryStore {
        /// Creates a new empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with users for testing
        pub async fn with_users(users: Vec<User>) -> Self {
            let store = Self::new();
            store.users.write().await.extend(users);
            store
        }

        /// Stores a fully-formed item as-is
        pub async fn seed_item(&self, item: Item) {
            self.items.write().await.push(item);
        }

        /// Stores a fully-formed claim as-is
        pub async fn seed_claim(&self, claim: Claim) {
            self.claims.write().await.push(claim);
        }

        /// Makes every subsequent call of `operation` fail with a connection error
        pub async fn fail(&self, operation: StoreOperation) {
            self.failing.write().await.insert(operation);
        }

        /// Lets `operation` succeed again
        pub async fn recover(&self, operation: StoreOperation) {
            self.failing.write().await.remove(&operation);
        }

        /// Snapshot of every stored item, in insertion order
        pub async fn items(&self) -> Vec<Item> {
            self.items.read().await.clone()
        }

        /// Snapshot of every stored claim, in insertion order
        pub async fn claims(&self) -> Vec<Claim> {
            self.claims.read().await.clone()
        }

        async fn check(&self, operation: StoreOperation) -> Result<(), PortError> {
            if self.failing.read().await.contains(&operation) {
                return Err(PortError::connection(format!(
                    "in-memory store configured to fail {:?}",
                    operation
                )));
            }
            Ok(())
        }
    }

    impl DomainPort for InMemoryStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("In-memory store always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl LostFoundStore for InMemoryStore {
        async fn insert_item(&self, draft: ItemDraft) -> Result<Item, PortError> {
            self.check(StoreOperation::InsertItem).await?;
            let now = Utc::now();
            let item = Item {
                id: ItemId::new_v7(),
                title: draft.title,
                description: draft.description,
                category: draft.category,
                item_type: draft.item_type,
                status: draft.status,
                location: draft.location,
                reported_by: draft.reported_by,
                claimed_by: None,
                claimed_at: None,
                created_at: Some(now),
                updated_at: Some(now),
            };
            self.items.write().await.push(item.clone());
            Ok(item)
        }

        async fn get_item(&self, id: ItemId) -> Result<Option<Item>, PortError> {
            self.check(StoreOperation::GetItem).await?;
            Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
        }

        async fn find_items(&self, query: ItemQuery) -> Result<Vec<Item>, PortError> {
            self.check(StoreOperation::FindItems).await?;
            let mut results: Vec<_> = self
                .items
                .read()
                .await
                .iter()
                .filter(|i| query.matches(i))
                .cloned()
                .collect();

            if query.newest_first {
                results.sort_by_key(|i| std::cmp::Reverse(or_epoch(i.created_at)));
            }
            if let Some(limit) = query.limit {
                results.truncate(limit as usize);
            }
            Ok(results)
        }

        async fn update_item_status(
            &self,
            id: ItemId,
            update: ItemStatusUpdate,
        ) -> Result<Item, PortError> {
            self.check(StoreOperation::UpdateItemStatus).await?;
            let mut items = self.items.write().await;
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| PortError::not_found("Item", id))?;

            let now = Utc::now();
            item.status = update.status;
            if update.claimed_by.is_some() {
                item.claimed_by = update.claimed_by;
                item.claimed_at = Some(now);
            }
            item.updated_at = Some(now);
            Ok(item.clone())
        }

        async fn insert_claim(&self, draft: ClaimDraft) -> Result<Claim, PortError> {
            self.check(StoreOperation::InsertClaim).await?;
            let now = Utc::now();
            let claim = Claim {
                id: ClaimId::new_v7(),
                item_id: draft.item_id,
                claimant_id: draft.claimant_id,
                status: draft.status,
                details: draft.details,
                messages: draft.messages,
                verification_note: None,
                verified_by: None,
                created_at: Some(now),
                updated_at: Some(now),
                verified_at: None,
            };
            self.claims.write().await.push(claim.clone());
            Ok(claim)
        }

        async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            self.check(StoreOperation::GetClaim).await?;
            Ok(self.claims.read().await.iter().find(|c| c.id == id).cloned())
        }

        async fn find_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
            self.check(StoreOperation::FindClaims).await?;
            let mut results: Vec<_> = self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| query.matches(c))
                .cloned()
                .collect();

            if query.newest_first {
                results.sort_by_key(|c| std::cmp::Reverse(or_epoch(c.created_at)));
            }
            Ok(results)
        }

        async fn record_claim_decision(
            &self,
            id: ClaimId,
            update: ClaimDecisionUpdate,
        ) -> Result<Claim, PortError> {
            self.check(StoreOperation::RecordClaimDecision).await?;
            let mut claims = self.claims.write().await;
            let claim = claims
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| PortError::not_found("Claim", id))?;

            let now = Utc::now();
            claim.status = update.status;
            claim.verification_note = update.verification_note;
            claim.verified_by = update.verified_by;
            claim.verified_at = Some(now);
            claim.updated_at = Some(now);
            Ok(claim.clone())
        }

        async fn append_claim_message(
            &self,
            id: ClaimId,
            message: ClaimMessage,
        ) -> Result<Claim, PortError> {
            self.check(StoreOperation::AppendClaimMessage).await?;
            let mut claims = self.claims.write().await;
            let claim = claims
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| PortError::not_found("Claim", id))?;

            claim.messages.push(message);
            claim.updated_at = Some(Utc::now());
            Ok(claim.clone())
        }

        async fn find_user(&self, identifier: &str, role: Role) -> Result<Option<User>, PortError> {
            self.check(StoreOperation::FindUser).await?;
            Ok(self
                .users
                .read()
                .await
                .iter()
                .find(|u| u.role == role && u.answers_to(identifier))
                .cloned())
        }

        async fn get_user(&self, id: UserId) -> Result<Option<User>, PortError> {
            self.check(StoreOperation::GetUser).await?;
            Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::{InMemoryStore, StoreOperation};
    use crate::claim::NewClaim;
    use crate::item::NewItem;

    fn keys_report() -> NewItem {
        NewItem {
            title: "Dorm Keys".to_string(),
            description: "Two keys on a red lanyard".to_string(),
            category: Category::Keys,
            item_type: ItemType::Lost,
            location: Some("Hostel C".to_string()),
        }
    }

    #[tokio::test]
    async fn test_mock_store_insert_and_get() {
        let store = InMemoryStore::new();
        let reporter = UserId::new();

        let item = store
            .insert_item(ItemDraft::open(keys_report(), reporter))
            .await
            .unwrap();

        let retrieved = store.get_item(item.id).await.unwrap().unwrap();
        assert_eq!(retrieved.reported_by, reporter);
        assert!(retrieved.created_at.is_some());
    }

    #[tokio::test]
    async fn test_mock_store_missing_item_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get_item(ItemId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_store_update_missing_is_not_found() {
        let store = InMemoryStore::new();
        let result = store
            .update_item_status(
                ItemId::new(),
                ItemStatusUpdate { status: ItemStatus::Claimed, claimed_by: None },
            )
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_store_find_claims_by_item() {
        let store = InMemoryStore::new();
        let item_id = ItemId::new();
        store
            .insert_claim(ClaimDraft::pending(item_id, NewClaim::default(), UserId::new()))
            .await
            .unwrap();
        store
            .insert_claim(ClaimDraft::pending(ItemId::new(), NewClaim::default(), UserId::new()))
            .await
            .unwrap();

        let query = ClaimQuery { item_id: Some(item_id), ..Default::default() };
        assert_eq!(store.find_claims(query).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_failure_injection() {
        let store = InMemoryStore::new();
        store.fail(StoreOperation::FindItems).await;
        let err = store.find_items(ItemQuery::default()).await.unwrap_err();
        assert!(err.is_transient());

        store.recover(StoreOperation::FindItems).await;
        assert!(store.find_items(ItemQuery::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_store_health_check() {
        let store = InMemoryStore::new();
        let result = store.health_check().await;
        assert_eq!(result.status, core_kernel::AdapterHealth::Healthy);
    }
}
