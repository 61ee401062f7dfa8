//! `POST /api/support`: turn the support form into a `mailto:` link.

use axum::response::Json;
use serde::Serialize;

use crate::error::{Action, AppError, Notice};
use crate::services::support::SupportRequest;

#[derive(Debug, Serialize)]
pub struct SupportLink {
    pub mailto: String,
}

pub async fn create(Json(request): Json<SupportRequest>) -> Result<Action<SupportLink>, AppError> {
    let mailto = request.mailto()?;
    Ok(Action::new(SupportLink { mailto }).notice(Notice::new(
        "Support Request Initiated",
        "Your default email client should open with the support request. Please send the email to complete your request.",
    )))
}

#[cfg(test)]
#[path = "support_test.rs"]
mod tests;
