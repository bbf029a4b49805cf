//! Items repository implementation
//!
//! Database access for lost/found item reports.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::DatabaseError;

const ITEM_COLUMNS: &str = r#"
    item_id, title, description, category, item_type, status, location,
    reported_by, claimed_by, claimed_at, created_at, updated_at
"#;

/// Repository for the `items` table
#[derive(Debug, Clone)]
pub struct ItemsRepository {
    pool: PgPool,
}

impl ItemsRepository {
    /// Creates a new ItemsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an item report
    ///
    /// # Returns
    ///
    /// The stored row with its generated id and timestamps
    pub async fn create(&self, item: NewItemRow) -> Result<ItemRow, DatabaseError> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO items (
                item_id, title, description, category, item_type, status,
                location, reported_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING {ITEM_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(item.title)
            .bind(item.description)
            .bind(item.category)
            .bind(item.item_type)
            .bind(item.status)
            .bind(item.location)
            .bind(item.reported_by)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Retrieves an item by its identifier
    pub async fn get_by_id(&self, item_id: Uuid) -> Result<Option<ItemRow>, DatabaseError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = $1");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Finds items matching every supplied column predicate
    pub async fn search(&self, search: ItemSearch) -> Result<Vec<ItemRow>, DatabaseError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM items WHERE TRUE"));

        if let Some(item_type) = search.item_type {
            builder.push(" AND item_type = ").push_bind(item_type);
        }
        if let Some(category) = search.category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(status) = search.status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(reported_by) = search.reported_by {
            builder.push(" AND reported_by = ").push_bind(reported_by);
        }
        if search.newest_first {
            builder.push(" ORDER BY created_at DESC NULLS LAST");
        }
        if let Some(limit) = search.limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = builder
            .build_query_as::<ItemRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Overwrites the status of an item
    ///
    /// `claimed_by`/`claimed_at` are only written when a claimant is given.
    pub async fn update_status(
        &self,
        item_id: Uuid,
        status: ItemStatus,
        claimed_by: Option<Uuid>,
    ) -> Result<ItemRow, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE items SET
                status = $2,
                claimed_by = COALESCE($3, claimed_by),
                claimed_at = CASE WHEN $3::uuid IS NULL THEN claimed_at ELSE $4 END,
                updated_at = $4
            WHERE item_id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ItemRow>(&sql)
            .bind(item_id)
            .bind(status)
            .bind(claimed_by)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Item", item_id))
    }
}

/// Database row for the items table
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub item_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub reported_by: Uuid,
    pub claimed_by: Option<Uuid>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data for inserting an item
#[derive(Debug, Clone)]
pub struct NewItemRow {
    pub title: String,
    pub description: String,
    pub category: String,
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub reported_by: Uuid,
}

/// Column predicates for [`ItemsRepository::search`]
#[derive(Debug, Clone, Default)]
pub struct ItemSearch {
    pub item_type: Option<ItemType>,
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
    pub reported_by: Option<Uuid>,
    pub newest_first: bool,
    pub limit: Option<u32>,
}

/// Report kind enum matching the database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "item_type", rename_all = "snake_case")]
pub enum ItemType {
    Lost,
    Found,
}

/// Item status enum matching the database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "item_status", rename_all = "snake_case")]
pub enum ItemStatus {
    Open,
    Claimed,
}
