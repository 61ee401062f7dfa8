//! HTTP-facing errors and user notices.
//!
//! Every failure ends the same way for the user: they stay where they are
//! and see a notice. `AppError` picks the status code; the body always
//! carries a `Notice`, plus the offending fields when a form was incomplete.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::services::admin::AdminError;
use crate::services::session::RegistrationError;
use crate::services::support::SupportError;
use crate::services::wizard::WizardError;
use crate::store::StoreError;

// =============================================================================
// NOTICE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: NoticeVariant::Default }
    }

    #[must_use]
    pub fn success(description: impl Into<String>) -> Self {
        Self::new("Success", description)
    }

    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self { title: "Error".to_owned(), description: description.into(), variant: NoticeVariant::Destructive }
    }
}

// =============================================================================
// APP ERROR
// =============================================================================

const STORAGE_FAILURE: &str = "Something went wrong saving your data. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Support(#[from] SupportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Please log in to continue")]
    Unauthorized,
    #[error("Admin login required")]
    AdminRequired,
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    notice: Notice,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<&'static str>,
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::QuotaExceeded { .. } => StatusCode::INSUFFICIENT_STORAGE,
        StoreError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Wizard(WizardError::Store(e)) | Self::Admin(AdminError::Store(e)) | Self::Store(e) => store_status(e),
            Self::Wizard(_) | Self::Registration(_) | Self::Support(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Admin(AdminError::InvalidCredentials) | Self::Unauthorized | Self::AdminRequired => {
                StatusCode::UNAUTHORIZED
            }
            Self::Admin(AdminError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Fields the user still has to fill in, if that is what went wrong.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::Wizard(WizardError::MissingFields { fields, .. })
            | Self::Support(SupportError::MissingFields(fields))
            | Self::Registration(RegistrationError::MissingFields(fields)) => fields.clone(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        if self.status().is_server_error() {
            Notice::error(STORAGE_FAILURE)
        } else {
            Notice::error(self.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        }
        let body = ErrorBody { notice: self.notice(), fields: self.fields() };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// ACTION RESPONSE
// =============================================================================

/// Successful outcome of a user action: optional notice and destination.
#[derive(Debug, Serialize)]
pub struct Action<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<&'static str>,
    pub data: T,
}

impl<T> Action<T> {
    #[must_use]
    pub fn new(data: T) -> Self {
        Self { notice: None, navigate: None, data }
    }

    #[must_use]
    pub fn notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    #[must_use]
    pub fn navigate(mut self, path: &'static str) -> Self {
        self.navigate = Some(path);
        self
    }
}

impl<T: Serialize> IntoResponse for Action<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
