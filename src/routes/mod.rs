//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two surfaces share one Axum router. Page routes (`/login`, `/apply`, ...)
//! return the JSON view model a page needs, or redirect when a guard fails.
//! The `/api` routes carry the user actions and answer with a notice and an
//! optional navigation target. Every request passes through `ensure_client`,
//! which pins it to a client namespace via the `dreamers_client` cookie.

pub mod admin;
pub mod apply;
pub mod auth;
pub mod client;
pub mod pages;
pub mod support;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api_client::ApiEndpoints;
use crate::config::AppEnv;
use crate::error::Notice;
use crate::state::AppState;

/// JSON action API.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/apply", get(apply::current))
        .route("/api/apply/step", put(apply::update_step))
        .route("/api/apply/expectations", put(apply::toggle_expectation))
        .route("/api/apply/next", post(apply::next))
        .route("/api/apply/prev", post(apply::prev))
        .route("/api/apply/submit", post(apply::submit))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/applications", get(admin::list_applications))
        .route("/api/admin/applications/{id}", get(admin::get_application))
        .route("/api/admin/applications/{id}/approve", post(admin::approve))
        .route("/api/admin/applications/{id}/reject", post(admin::reject))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/support", post(support::create))
        .route("/api/client", delete(client::reset))
        .route("/api/meta", get(meta))
        .route("/healthz", get(healthz))
}

/// Navigable page routes.
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/home", get(pages::home))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/apply", get(pages::apply))
        .route("/thank-you", get(pages::thank_you))
        .route("/admin/login", get(pages::admin_login))
        .route("/admin/dashboard", get(pages::admin_dashboard))
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(page_routes())
        .merge(api_routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), client::ensure_client))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/meta`: which remote backend this deployment points at.
async fn meta(State(state): State<AppState>) -> Json<serde_json::Value> {
    let endpoints: &ApiEndpoints = state.api.endpoints();
    let environment = match state.config.app_env {
        AppEnv::Development => "development",
        AppEnv::Production => "production",
    };
    Json(json!({
        "environment": environment,
        "apiBaseUrl": state.config.api_base_url,
        "endpoints": endpoints,
    }))
}

async fn not_found() -> impl IntoResponse {
    let notice = Notice::error("Oops! Page not found");
    (StatusCode::NOT_FOUND, Json(json!({ "notice": notice, "links": { "home": "/" } })))
}


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
