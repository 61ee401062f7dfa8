//! Admin routes: login/logout and the read-only review dashboard API.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::error::{Action, AppError, Notice};
use crate::routes::client::{AdminAuth, Client};
use crate::services::admin::{self, AdminUser, ApplicationRecord, DashboardStats, ReviewAck, ReviewDecision};
use crate::services::catalog::ReviewStatus;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AdminLoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// `POST /api/admin/login`
pub async fn login(client: Client, Json(form): Json<AdminLoginForm>) -> Result<Action<AdminUser>, AppError> {
    let admin = admin::admin_login(&client.store, &form.email, &form.password)?;
    Ok(Action::new(admin)
        .notice(Notice::success("Admin login successful!"))
        .navigate("/admin/dashboard"))
}

/// `POST /api/admin/logout`: allowed without an admin session.
pub async fn logout(client: Client) -> Action<()> {
    admin::admin_logout(&client.store);
    Action::new(())
        .notice(Notice::new("Logged out", "You have been logged out successfully"))
        .navigate("/")
}

#[derive(Deserialize)]
pub struct StatusFilter {
    status: Option<String>,
}

fn parse_status(raw: Option<&str>) -> Result<Option<ReviewStatus>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty() && *s != "all") {
        None => Ok(None),
        Some(s) => ReviewStatus::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("unknown status: {s}"))),
    }
}

/// `GET /api/admin/applications?status=`
pub async fn list_applications(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<ApplicationRecord>>, AppError> {
    let status = parse_status(filter.status.as_deref())?;
    Ok(Json(admin::filter_by_status(&state.applications, status)))
}

/// `GET /api/admin/applications/{id}`
pub async fn get_application(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<ApplicationRecord>, AppError> {
    Ok(Json(admin::find_application(&state.applications, &id)?.clone()))
}

/// `POST /api/admin/applications/{id}/approve`
pub async fn approve(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<String>,
) -> Result<Action<ReviewAck>, AppError> {
    let ack = admin::review(&state.applications, &id, ReviewDecision::Approve)?;
    Ok(Action::new(ack))
}

/// `POST /api/admin/applications/{id}/reject`
pub async fn reject(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<String>,
) -> Result<Action<ReviewAck>, AppError> {
    let ack = admin::review(&state.applications, &id, ReviewDecision::Reject)?;
    Ok(Action::new(ack))
}

/// `GET /api/admin/stats`
pub async fn stats(State(state): State<AppState>, _auth: AdminAuth) -> Json<DashboardStats> {
    Json(DashboardStats::from_records(&state.applications))
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
