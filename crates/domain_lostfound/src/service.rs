//! Item/claim repository service
//!
//! The single façade callers use. It owns the store handle, pushes equality
//! predicates down to the store and applies the few rules the domain has.
//!
//! Failure contract:
//! - reads log transport failures and return an empty result
//! - writes wrap transport failures in a caller-facing message
//! - missing claims/items surface as not-found errors

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use core_kernel::{or_epoch, ClaimId, ItemId, PortError, UserId};

use crate::activity::ActivityEntry;
use crate::claim::{Claim, ClaimDecision, ClaimDraft, ClaimMessage, ClaimStatus, NewClaim};
use crate::error::LostFoundError;
use crate::filter::ItemFilter;
use crate::item::{Item, ItemDraft, ItemStatus, NewItem};
use crate::ports::{ClaimQuery, ItemQuery, ItemStatusUpdate, LostFoundStore};
use crate::user::{Credentials, PasswordPolicy, User};
use crate::workflow::{
    decision_update, plan_claim_step, plan_item_step, ClaimStep, ItemStep,
    ReconciliationFailure, ReconciliationReport,
};

/// How the pending-claims queue gets its order
///
/// Ordering a status-filtered query by `created_at` needs a compound index on
/// `(status, created_at)`. `ClientSide` queries without it and sorts after
/// fetching; `Store` assumes the index exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingClaimsOrdering {
    #[default]
    ClientSide,
    Store,
}

/// Service over the lost & found store
#[derive(Clone)]
pub struct LostFoundService {
    store: Arc<dyn LostFoundStore>,
    passwords: PasswordPolicy,
    pending_ordering: PendingClaimsOrdering,
}

impl LostFoundService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn LostFoundStore>) -> Self {
        Self {
            store,
            passwords: PasswordPolicy::default(),
            pending_ordering: PendingClaimsOrdering::default(),
        }
    }

    /// Replaces the per-role demo passwords
    pub fn with_password_policy(mut self, passwords: PasswordPolicy) -> Self {
        self.passwords = passwords;
        self
    }

    /// Chooses where the pending-claims queue is ordered
    pub fn with_pending_ordering(mut self, ordering: PendingClaimsOrdering) -> Self {
        self.pending_ordering = ordering;
        self
    }

    /// The underlying store, for health checks
    pub fn store(&self) -> &Arc<dyn LostFoundStore> {
        &self.store
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Logs a user in by identifier or email, role and password
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if no user with that identifier has the role
    /// - `IncorrectPassword` if the user exists but the password is wrong
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier, role = %credentials.role))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, LostFoundError> {
        let user = self
            .store
            .find_user(&credentials.identifier, credentials.role)
            .await
            .map_err(LostFoundError::store("Login is temporarily unavailable"))?;

        let user = self.passwords.check(user, &credentials.password)?;
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Retrieves a user by ID; never fails
    pub async fn get_user(&self, id: UserId) -> Option<User> {
        self.store.get_user(id).await.unwrap_or_else(|e| {
            error!(user_id = %id, error = %e, "Error fetching user");
            None
        })
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Lists items matching every supplied predicate, newest first
    ///
    /// Returns an empty list if the store cannot be reached.
    #[instrument(skip(self))]
    pub async fn list_items(&self, filter: &ItemFilter) -> Vec<Item> {
        let mut items = read_or_empty("items", self.store.find_items(filter.to_store_query()).await);
        if let Some(needle) = filter.needle() {
            items.retain(|item| item.mentions(&needle));
        }
        items
    }

    /// Retrieves an item by ID; never fails
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> Option<Item> {
        self.store.get_item(id).await.unwrap_or_else(|e| {
            error!(item_id = %id, error = %e, "Error fetching item");
            None
        })
    }

    /// Files a lost/found report
    ///
    /// The item always starts `open`; id and timestamps come from the store.
    #[instrument(skip(self, data), fields(title = %data.title))]
    pub async fn create_item(&self, data: NewItem, reporter_id: UserId) -> Result<Item, LostFoundError> {
        data.validate()?;
        if data.title.trim().is_empty() {
            return Err(LostFoundError::validation("title must not be blank"));
        }

        let item = self
            .store
            .insert_item(ItemDraft::open(data, reporter_id))
            .await
            .map_err(log_write("create item"))
            .map_err(LostFoundError::store("Failed to create item report"))?;

        info!(item_id = %item.id, kind = %item.item_type, "Item reported");
        Ok(item)
    }

    /// Overwrites an item's status
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the item does not exist
    /// - `InvalidStatusTransition` for `claimed -> open`
    #[instrument(skip(self))]
    pub async fn update_item_status(&self, id: ItemId, status: ItemStatus) -> Result<Item, LostFoundError> {
        const CONTEXT: &str = "Failed to update item status";

        let item = self
            .store
            .get_item(id)
            .await
            .map_err(log_write("load item"))
            .map_err(LostFoundError::store(CONTEXT))?
            .ok_or(LostFoundError::ItemNotFound(id))?;

        if !item.status.can_transition_to(status) {
            return Err(LostFoundError::invalid_transition(item.status, status));
        }

        self.store
            .update_item_status(id, ItemStatusUpdate { status, claimed_by: None })
            .await
            .map_err(|e| not_found_or(e, LostFoundError::ItemNotFound(id), CONTEXT))
    }

    /// Lists a user's own reports, newest first
    pub async fn list_my_reports(&self, user_id: UserId) -> Vec<Item> {
        read_or_empty("user reports", self.store.find_items(ItemQuery::reported_by(user_id)).await)
    }

    /// The newest reports for the landing feed
    pub async fn latest_activity(&self, limit: u32) -> Vec<ActivityEntry> {
        let now = Utc::now();
        read_or_empty("latest activity", self.store.find_items(ItemQuery::latest(limit)).await)
            .into_iter()
            .map(|item| ActivityEntry::from_item(item, now))
            .collect()
    }

    // ========================================================================
    // Claims
    // ========================================================================

    /// Files a claim on an item
    ///
    /// The claim always starts `pending`. A non-blank `message` becomes the
    /// first entry of its conversation.
    #[instrument(skip(self, data))]
    pub async fn create_claim(
        &self,
        item_id: ItemId,
        data: NewClaim,
        claimant_id: UserId,
    ) -> Result<Claim, LostFoundError> {
        const CONTEXT: &str = "Failed to create claim";
        data.validate()?;

        self.store
            .get_item(item_id)
            .await
            .map_err(log_write("load item"))
            .map_err(LostFoundError::store(CONTEXT))?
            .ok_or(LostFoundError::ItemNotFound(item_id))?;

        let claim = self
            .store
            .insert_claim(ClaimDraft::pending(item_id, data, claimant_id))
            .await
            .map_err(log_write("create claim"))
            .map_err(LostFoundError::store(CONTEXT))?;

        info!(claim_id = %claim.id, item_id = %item_id, "Claim filed");
        Ok(claim)
    }

    /// Appends a message to a claim's conversation
    #[instrument(skip(self, text))]
    pub async fn add_claim_message(
        &self,
        claim_id: ClaimId,
        sender_id: UserId,
        text: &str,
    ) -> Result<Claim, LostFoundError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LostFoundError::validation("message must not be blank"));
        }

        self.store
            .append_claim_message(claim_id, ClaimMessage::new(sender_id, text))
            .await
            .map_err(|e| {
                not_found_or(e, LostFoundError::ClaimNotFound(claim_id), "Failed to send message")
            })
    }

    /// Lists a user's own claims, newest first
    pub async fn list_my_claims(&self, user_id: UserId) -> Vec<Claim> {
        read_or_empty("user claims", self.store.find_claims(ClaimQuery::by_claimant(user_id)).await)
    }

    /// The faculty verification queue: pending claims, newest first
    ///
    /// Claims with no `created_at` sort last.
    pub async fn list_pending_claims(&self) -> Vec<Claim> {
        let mut query = ClaimQuery::with_status(ClaimStatus::Pending);
        query.newest_first = self.pending_ordering == PendingClaimsOrdering::Store;

        let mut claims = read_or_empty("pending claims", self.store.find_claims(query).await);
        if self.pending_ordering == PendingClaimsOrdering::ClientSide {
            sort_newest_first(&mut claims);
        }
        claims
    }

    /// Records a faculty decision on a claim
    ///
    /// `approved` also marks the referenced item claimed (see
    /// [`approve_claim`](Self::approve_claim)); `rejected` leaves the item
    /// untouched so it stays an active report.
    pub async fn verify_claim(
        &self,
        claim_id: ClaimId,
        decision: ClaimDecision,
        note: Option<String>,
        verified_by: Option<UserId>,
    ) -> Result<Claim, LostFoundError> {
        match decision {
            ClaimDecision::Approved => self.approve_claim(claim_id, note, verified_by).await,
            ClaimDecision::Rejected => self.reject_claim(claim_id, note, verified_by).await,
        }
    }

    /// Approves a claim and marks its item claimed by the claimant
    ///
    /// Two writes happen: the claim decision, then the item status. If the
    /// item write fails the claim stays approved and `PartialApproval` is
    /// returned. Calling this again with the same claim id skips the claim
    /// write and retries the item write, so a retry loop converges.
    ///
    /// An item already claimed by a different claimant is reassigned and the
    /// conflict logged; nothing prevents two approved claims on one item.
    ///
    /// # Errors
    ///
    /// - `ClaimNotFound` if the claim does not exist
    /// - `InvalidStatusTransition` if the claim was rejected
    /// - `PartialApproval` if the item write failed after the claim write
    #[instrument(skip(self, note))]
    pub async fn approve_claim(
        &self,
        claim_id: ClaimId,
        note: Option<String>,
        verified_by: Option<UserId>,
    ) -> Result<Claim, LostFoundError> {
        let claim = self.load_claim(claim_id).await?;

        let claim = match plan_claim_step(claim.status, ClaimDecision::Approved)? {
            ClaimStep::Record => self.record_decision(claim_id, ClaimDecision::Approved, note, verified_by).await?,
            ClaimStep::AlreadyDecided => {
                debug!(claim_id = %claim_id, "Claim already approved, re-applying item update");
                claim
            }
        };

        self.complete_approval(&claim)
            .await
            .map_err(|source| {
                error!(
                    claim_id = %claim.id,
                    item_id = %claim.item_id,
                    error = %source,
                    "Claim approved but item update failed"
                );
                LostFoundError::PartialApproval {
                    claim_id: claim.id,
                    item_id: claim.item_id,
                    source,
                }
            })?;

        info!(claim_id = %claim.id, item_id = %claim.item_id, "Claim approved");
        Ok(claim)
    }

    /// Rejects a claim; the item is not touched
    ///
    /// Rejecting an already-rejected claim returns it unchanged.
    #[instrument(skip(self, note))]
    pub async fn reject_claim(
        &self,
        claim_id: ClaimId,
        note: Option<String>,
        verified_by: Option<UserId>,
    ) -> Result<Claim, LostFoundError> {
        let claim = self.load_claim(claim_id).await?;

        match plan_claim_step(claim.status, ClaimDecision::Rejected)? {
            ClaimStep::Record => {
                let claim = self.record_decision(claim_id, ClaimDecision::Rejected, note, verified_by).await?;
                info!(claim_id = %claim.id, "Claim rejected");
                Ok(claim)
            }
            ClaimStep::AlreadyDecided => Ok(claim),
        }
    }

    /// Re-applies the item write for every approved claim whose item is still open
    ///
    /// Repairs what a `PartialApproval` left behind.
    #[instrument(skip(self))]
    pub async fn reconcile_approvals(&self) -> Result<ReconciliationReport, LostFoundError> {
        let approved = self
            .store
            .find_claims(ClaimQuery::with_status(ClaimStatus::Approved))
            .await
            .map_err(log_write("list approved claims"))
            .map_err(LostFoundError::store("Failed to reconcile approvals"))?;

        let mut report = ReconciliationReport {
            examined: approved.len(),
            ..Default::default()
        };

        for claim in approved {
            let item = match self.store.get_item(claim.item_id).await {
                Ok(Some(item)) => item,
                Ok(None) => {
                    report.failed.push(failure(&claim, "item does not exist"));
                    continue;
                }
                Err(e) => {
                    report.failed.push(failure(&claim, e.to_string()));
                    continue;
                }
            };

            if !item.is_open() {
                continue;
            }

            let update = ItemStatusUpdate {
                status: ItemStatus::Claimed,
                claimed_by: Some(claim.claimant_id),
            };
            match self.store.update_item_status(item.id, update).await {
                Ok(_) => report.repaired.push(claim.id),
                Err(e) => report.failed.push(failure(&claim, e.to_string())),
            }
        }

        if !report.repaired.is_empty() || !report.is_clean() {
            warn!(
                repaired = report.repaired.len(),
                failed = report.failed.len(),
                "Reconciliation found incomplete approvals"
            );
        }
        Ok(report)
    }

    async fn load_claim(&self, claim_id: ClaimId) -> Result<Claim, LostFoundError> {
        self.store
            .get_claim(claim_id)
            .await
            .map_err(log_write("load claim"))
            .map_err(LostFoundError::store("Failed to verify claim"))?
            .ok_or(LostFoundError::ClaimNotFound(claim_id))
    }

    async fn record_decision(
        &self,
        claim_id: ClaimId,
        decision: ClaimDecision,
        note: Option<String>,
        verified_by: Option<UserId>,
    ) -> Result<Claim, LostFoundError> {
        self.store
            .record_claim_decision(claim_id, decision_update(decision, note, verified_by))
            .await
            .map_err(|e| not_found_or(e, LostFoundError::ClaimNotFound(claim_id), "Failed to verify claim"))
    }

    async fn complete_approval(&self, claim: &Claim) -> Result<(), PortError> {
        let item = self
            .store
            .get_item(claim.item_id)
            .await?
            .ok_or_else(|| PortError::not_found("Item", claim.item_id))?;

        let update = match plan_item_step(claim, &item) {
            ItemStep::AlreadyClaimed => return Ok(()),
            ItemStep::MarkClaimed(update) => update,
            ItemStep::Reassign { previous, update } => {
                warn!(
                    item_id = %item.id,
                    previous_claimant = ?previous,
                    new_claimant = %claim.claimant_id,
                    "Item already claimed by another approved claim"
                );
                update
            }
        };

        self.store.update_item_status(item.id, update).await?;
        Ok(())
    }
}

/// Sorts claims by `created_at` descending; missing timestamps go last
pub fn sort_newest_first(claims: &mut [Claim]) {
    claims.sort_by_key(|c| std::cmp::Reverse(or_epoch(c.created_at)));
}

fn read_or_empty<T>(what: &str, result: Result<Vec<T>, PortError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!(error = %e, "Error fetching {}", what);
        Vec::new()
    })
}

fn log_write(operation: &'static str) -> impl Fn(PortError) -> PortError {
    move |e| {
        error!(error = %e, "Error during {}", operation);
        e
    }
}

fn not_found_or(error: PortError, not_found: LostFoundError, context: &'static str) -> LostFoundError {
    if error.is_not_found() {
        not_found
    } else {
        error!(error = %error, "{}", context);
        LostFoundError::Store { context, source: error }
    }
}

fn failure(claim: &Claim, reason: impl Into<String>) -> ReconciliationFailure {
    ReconciliationFailure {
        claim_id: claim.id,
        item_id: claim.item_id,
        reason: reason.into(),
    }
}
