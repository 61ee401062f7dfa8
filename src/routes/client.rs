//! Client namespaces and request guards.
//!
//! Every browser gets a random id in the `dreamers_client` cookie; that id
//! names its namespace in the shared store. `ensure_client` issues the cookie
//! on first contact, and the extractors below open the namespace and check
//! for an applicant or admin session. `reset` forgets the browser entirely.

use std::fmt::Write;

use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use time::Duration;

use crate::error::{Action, AppError, Notice};
use crate::lifecycle;
use crate::services::admin::{self, AdminUser};
use crate::services::session::{self, Session};
use crate::state::AppState;
use crate::store::ClientStore;

pub const CLIENT_COOKIE: &str = "dreamers_client";

const CLIENT_ID_BYTES: usize = 32;

/// Browser storage outlives the tab; so does the namespace cookie.
const CLIENT_COOKIE_DAYS: i64 = 365;

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex client id.
#[must_use]
pub fn generate_client_id() -> String {
    let bytes: [u8; CLIENT_ID_BYTES] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Ids we issued look like this; anything else gets replaced.
#[must_use]
pub fn is_valid_client_id(raw: &str) -> bool {
    raw.len() == CLIENT_ID_BYTES * 2 && raw.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Client id resolved by `ensure_client` for the current request.
#[derive(Debug, Clone)]
pub struct ClientId(pub String);

fn client_cookie(id: String, secure: bool) -> Cookie<'static> {
    Cookie::build((CLIENT_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(CLIENT_COOKIE_DAYS))
        .build()
}

fn expired_client_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((CLIENT_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Middleware: attach a `ClientId`, issuing a fresh cookie when needed.
pub async fn ensure_client(State(state): State<AppState>, jar: CookieJar, mut req: Request, next: Next) -> Response {
    let existing = jar
        .get(CLIENT_COOKIE)
        .map(Cookie::value)
        .filter(|id| is_valid_client_id(id))
        .map(str::to_owned);

    if let Some(id) = existing {
        state.clients.touch(&id);
        req.extensions_mut().insert(ClientId(id));
        return next.run(req).await;
    }

    let id = generate_client_id();
    tracing::debug!(client = %id, "issuing client cookie");
    state.clients.touch(&id);
    req.extensions_mut().insert(ClientId(id.clone()));
    let response = next.run(req).await;
    (jar.add(client_cookie(id, state.config.cookie_secure)), response).into_response()
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// The caller's namespace.
pub struct Client {
    pub id: String,
    pub store: ClientStore,
}

impl<S> FromRequestParts<S> for Client
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = match parts.extensions.get::<ClientId>() {
            Some(ClientId(id)) => id.clone(),
            None => CookieJar::from_headers(&parts.headers)
                .get(CLIENT_COOKIE)
                .map(Cookie::value)
                .filter(|id| is_valid_client_id(id))
                .map(str::to_owned)
                .ok_or_else(|| AppError::BadRequest("missing client cookie".to_owned()))?,
        };

        let app_state = AppState::from_ref(state);
        Ok(Self { store: app_state.client_store(&id), id })
    }
}

/// A client with an applicant session. Rejects with 401 otherwise.
pub struct AuthUser {
    pub client: Client,
    pub session: Session,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let client = Client::from_request_parts(parts, state).await?;
        let session = session::rehydrate(&client.store).session().ok_or(AppError::Unauthorized)?;
        Ok(Self { client, session })
    }
}

/// A client holding an admin token. Rejects with 401 otherwise.
pub struct AdminAuth {
    pub client: Client,
    pub admin: Option<AdminUser>,
}

impl<S> FromRequestParts<S> for AdminAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let client = Client::from_request_parts(parts, state).await?;
        if !admin::is_admin(&client.store) {
            return Err(AppError::AdminRequired);
        }
        let admin = admin::admin_user(&client.store);
        Ok(Self { client, admin })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `DELETE /api/client`: drop this browser's namespace and wizard, expire its cookie.
pub async fn reset(State(state): State<AppState>, client: Client, jar: CookieJar) -> (CookieJar, Action<()>) {
    lifecycle::forget_client(&state, &client.id).await;
    tracing::info!(client = %client.id, "client state reset");
    let jar = jar.add(expired_client_cookie(state.config.cookie_secure));
    let action = Action::new(())
        .notice(Notice::new("Data cleared", "Everything stored for this browser has been removed"))
        .navigate("/login");
    (jar, action)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
