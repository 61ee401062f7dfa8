//! Page routes. Each returns the JSON view model its page renders.
//!
//! Guarded pages answer with `303 See Other` to the matching login page when
//! the client has no session; the JSON API answers 401 instead.

use axum::extract::State;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;

use crate::routes::apply::WizardView;
use crate::routes::client::Client;
use crate::services::admin::{self, AdminUser, ApplicationRecord, DashboardStats};
use crate::services::catalog::{IncubationCentre, REGISTRATION_CENTRES};
use crate::services::session::{self, MIN_PASSWORD_LEN, User};
use crate::services::support::SUPPORT_ADDRESS;
use crate::services::wizard::{Draft, Wizard};
use crate::state::AppState;
use crate::store::keys;

const BRAND: &str = "Dreamers";
const TAGLINE: &str = "Empowering the next generation of entrepreneurs";

/// `GET /`: straight to login.
pub async fn root() -> Redirect {
    Redirect::temporary("/login")
}

// =============================================================================
// MARKETING
// =============================================================================

#[derive(Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub headline: &'static str,
    pub intro: &'static str,
    pub features_heading: &'static str,
    pub features: [Feature; 3],
    pub quick_apply: QuickApply,
}

#[derive(Serialize)]
pub struct QuickApply {
    pub heading: &'static str,
    pub hint: &'static str,
    pub path: &'static str,
}

/// `GET /home`
pub async fn home() -> Json<HomePage> {
    Json(HomePage {
        brand: BRAND,
        tagline: TAGLINE,
        headline: "Turn Your Dreams Into Reality",
        intro: "Join the most innovative startup incubation program. Get mentorship, funding, \
                and resources to build the next big thing. Your entrepreneurial journey starts here.",
        features_heading: "Why Choose Dreamers?",
        features: [
            Feature {
                title: "Expert Mentorship",
                description: "Get guidance from industry veterans and successful entrepreneurs who've been there before.",
            },
            Feature {
                title: "Funding Support",
                description: "Access to investor networks and funding opportunities to fuel your startup's growth.",
            },
            Feature {
                title: "Innovation Hub",
                description: "State-of-the-art facilities and resources to help you build and test your products.",
            },
        ],
        quick_apply: QuickApply {
            heading: "Quick Apply",
            hint: "Scan the QR code to start your application instantly",
            path: "/apply",
        },
    })
}

// =============================================================================
// APPLICANT PAGES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    pub brand: &'static str,
    pub authenticated: bool,
    pub register_path: &'static str,
}

/// `GET /login`
pub async fn login(client: Client) -> Json<LoginPage> {
    Json(LoginPage {
        brand: BRAND,
        authenticated: session::rehydrate(&client.store).is_authenticated(),
        register_path: "/register",
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPage {
    pub title: &'static str,
    pub incubation_centres: &'static [IncubationCentre],
    pub min_password_length: usize,
    pub login_path: &'static str,
}

/// `GET /register`
pub async fn register() -> Json<RegisterPage> {
    Json(RegisterPage {
        title: "Sign Up",
        incubation_centres: REGISTRATION_CENTRES,
        min_password_length: MIN_PASSWORD_LEN,
        login_path: "/login",
    })
}

#[derive(Serialize)]
pub struct ApplyPage {
    pub user: User,
    pub wizard: WizardView,
}

/// `GET /apply`: requires an applicant session.
pub async fn apply(State(state): State<AppState>, client: Client) -> Response {
    let Some(session) = session::rehydrate(&client.store).session() else {
        return Redirect::to("/login").into_response();
    };

    let mut wizards = state.wizards.write().await;
    let wizard = wizards.get_or_insert_with(&client.id, || Wizard::prefilled(&session.user));
    let view = WizardView::from_wizard(wizard);
    Json(ApplyPage { user: session.user, wizard: view }).into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub startup_name: String,
    pub founder_name: String,
    pub email: String,
    pub incubation_centre: String,
}

impl From<Draft> for SubmissionSummary {
    fn from(draft: Draft) -> Self {
        Self {
            startup_name: draft.basic.startup_name,
            founder_name: draft.basic.founder_name,
            email: draft.basic.email,
            incubation_centre: draft.documentation.incubation_centre,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouPage {
    pub title: &'static str,
    pub message: &'static str,
    pub next_steps: &'static str,
    /// Absent when nothing was submitted from this client.
    pub application: Option<SubmissionSummary>,
    pub support_email: &'static str,
}

/// `GET /thank-you`
pub async fn thank_you(client: Client) -> Json<ThankYouPage> {
    let application = client.store.get_json::<Draft>(keys::APPLICATION_DATA).map(SubmissionSummary::from);
    Json(ThankYouPage {
        title: "Application Submitted!",
        message: "Thank you for submitting your startup application. We're excited to review your innovative idea!",
        next_steps: "Your application is pending approval from your selected incubation centre. \
                     Our team will review your submission and you'll receive an email notification \
                     within 7-10 business days with the next steps.",
        application,
        support_email: SUPPORT_ADDRESS,
    })
}

// =============================================================================
// ADMIN PAGES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub hint: &'static str,
}

/// `GET /admin/login`
pub async fn admin_login() -> Json<AdminLoginPage> {
    Json(AdminLoginPage {
        title: "Administrator Login",
        subtitle: "Access the admin dashboard",
        hint: "Demo credentials: admin@dreamers.com / admin123",
    })
}

#[derive(Serialize)]
pub struct DashboardPage {
    pub admin: Option<AdminUser>,
    pub stats: DashboardStats,
    pub applications: Vec<ApplicationRecord>,
}

/// `GET /admin/dashboard`: requires an admin token.
pub async fn admin_dashboard(State(state): State<AppState>, client: Client) -> Response {
    if !admin::is_admin(&client.store) {
        return Redirect::to("/admin/login").into_response();
    }
    let page = DashboardPage {
        admin: admin::admin_user(&client.store),
        stats: DashboardStats::from_records(&state.applications),
        applications: state.applications.to_vec(),
    };
    Json(page).into_response()
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
