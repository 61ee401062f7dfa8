//! Applicant auth routes: login, registration, current session, logout.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use crate::error::{Action, AppError, Notice};
use crate::routes::client::Client;
use crate::services::session::{self, AuthState, RegistrationForm, Session};
use crate::state::AppState;

const REGISTERED: &str =
    "Registration successful! Your application has been sent to the incubation centre for approval.";

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// `POST /api/auth/login`: any credentials start a session.
pub async fn login(client: Client, Json(form): Json<LoginForm>) -> Result<Action<Session>, AppError> {
    let session = session::login(&client.store, &form.email, &form.password)?;
    Ok(Action::new(session).navigate("/apply"))
}

/// `POST /api/auth/register`: validate the form, then start a session.
pub async fn register(client: Client, Json(form): Json<RegistrationForm>) -> Result<Action<Session>, AppError> {
    let registration = form.validate()?;
    let session = session::register(&client.store, &registration)?;
    tracing::info!(
        user_id = %session.user.id,
        forwarded_to = %registration.incubation_email,
        "registration forwarded to incubation centre"
    );
    Ok(Action::new(session).notice(Notice::success(REGISTERED)).navigate("/apply"))
}

/// `GET /api/auth/me`: the client's auth state, logged in or not.
pub async fn me(client: Client) -> Json<AuthState> {
    Json(session::rehydrate(&client.store))
}

/// `POST /api/auth/logout`: drop the session and any wizard in progress.
pub async fn logout(State(state): State<AppState>, client: Client) -> Action<()> {
    session::logout(&client.store);
    state.wizards.write().await.remove(&client.id);
    Action::new(()).navigate("/login")
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
