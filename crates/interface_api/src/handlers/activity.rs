//! Landing page handlers

use axum::{
    extract::{Query, State},
    Json,
};

use domain_lostfound::Category;

use crate::dto::activity::{ActivityQuery, ActivityResponse};
use crate::AppState;

/// Newest reports, with relative times
pub async fn latest_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Json<Vec<ActivityResponse>> {
    let entries = state.service.latest_activity(query.limit()).await;
    Json(entries.into_iter().map(Into::into).collect())
}

/// The category catalogue
pub async fn list_categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}
