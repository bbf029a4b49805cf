//! HTTP API Layer
//!
//! This crate provides the REST API for the lost & found portal using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per resource
//! - **Middleware**: JWT authentication, faculty guard, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_lostfound::LostFoundService;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware, faculty_middleware};
use crate::handlers::{activity, claims, health, items};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LostFoundService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - The lost & found service, already bound to its store
/// * `config` - API configuration
pub fn create_router(service: LostFoundService, config: ApiConfig) -> Router {
    let service = service.with_password_policy(config.password_policy());
    let state = AppState {
        service: Arc::new(service),
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let public_api_routes = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/activity", get(activity::latest_activity))
        .route("/categories", get(activity::list_categories));

    // Item routes
    let item_routes = Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route("/:id", get(items::get_item))
        .route("/:id/status", put(items::update_status))
        .route("/:id/claims", post(items::create_claim));

    let me_routes = Router::new()
        .route("/reports", get(items::my_reports))
        .route("/claims", get(claims::my_claims));

    // Faculty-only claim routes
    let verification_routes = Router::new()
        .route("/pending", get(claims::list_pending))
        .route("/reconcile", post(claims::reconcile))
        .route("/:id/verify", post(claims::verify_claim))
        .route("/:id/approve", post(claims::approve_claim))
        .layer(axum_middleware::from_fn(faculty_middleware));

    let claim_routes = Router::new()
        .route("/:id/messages", post(claims::add_message))
        .merge(verification_routes);

    // Protected API routes
    let protected_routes = Router::new()
        .nest("/items", item_routes)
        .nest("/me", me_routes)
        .nest("/claims", claim_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", public_api_routes.merge(protected_routes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
