//! Application wizard routes.
//!
//! The wizard lives in `AppState::wizards` keyed by client id. It is created
//! on first use, prefilled from the applicant's session, and dropped after a
//! successful submit or a logout. Unused wizards expire after `wizard_ttl`.

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::{Action, AppError, Notice};
use crate::routes::client::AuthUser;
use crate::services::catalog::{self, APPLICATION_CENTRES, Expectation, SelectOption};
use crate::services::wizard::{ACCEPTED_EXTENSIONS, Draft, STEP_COUNT, StepData, Wizard, WizardStep};
use crate::state::AppState;

// =============================================================================
// VIEW MODEL
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub company_types: Vec<SelectOption>,
    pub team_sizes: Vec<SelectOption>,
    pub incubation_centres: &'static [SelectOption],
    pub expectations: Vec<&'static str>,
    pub accepted_extensions: &'static [&'static str],
}

impl FormOptions {
    fn new() -> Self {
        Self {
            company_types: catalog::company_type_options(),
            team_sizes: catalog::team_size_options(),
            incubation_centres: APPLICATION_CENTRES,
            expectations: Expectation::ALL.iter().map(|e| e.label()).collect(),
            accepted_extensions: ACCEPTED_EXTENSIONS,
        }
    }
}

/// Everything the wizard page renders for the current step.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: WizardStep,
    pub step_number: u8,
    pub step_title: &'static str,
    pub total_steps: u8,
    /// Percent complete, counting the current step.
    pub progress: u8,
    pub can_go_back: bool,
    pub is_last: bool,
    pub draft: Draft,
    pub options: FormOptions,
}

impl WizardView {
    #[must_use]
    pub fn from_wizard(wizard: &Wizard) -> Self {
        let step = wizard.step();
        let progress = u16::from(step.number()) * 100 / u16::from(STEP_COUNT);
        Self {
            step,
            step_number: step.number(),
            step_title: step.title(),
            total_steps: STEP_COUNT,
            progress: u8::try_from(progress).unwrap_or(100),
            can_go_back: step != WizardStep::Basic,
            is_last: step.is_last(),
            draft: wizard.draft().clone(),
            options: FormOptions::new(),
        }
    }
}

/// Run `f` against the caller's wizard, creating it when absent.
async fn with_wizard<T>(
    state: &AppState,
    auth: &AuthUser,
    f: impl FnOnce(&mut Wizard) -> Result<T, AppError>,
) -> Result<(T, WizardView), AppError> {
    let mut wizards = state.wizards.write().await;
    let wizard = wizards.get_or_insert_with(&auth.client.id, || Wizard::prefilled(&auth.session.user));
    let out = f(wizard)?;
    Ok((out, WizardView::from_wizard(wizard)))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/apply`
pub async fn current(State(state): State<AppState>, auth: AuthUser) -> Result<Json<WizardView>, AppError> {
    let ((), view) = with_wizard(&state, &auth, |_| Ok(())).await?;
    Ok(Json(view))
}

/// `PUT /api/apply/step`: replace one step's fields.
pub async fn update_step(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(data): Json<StepData>,
) -> Result<Json<WizardView>, AppError> {
    let ((), view) = with_wizard(&state, &auth, |w| Ok(w.update(data)?)).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct ExpectationToggle {
    expectation: Expectation,
    checked: bool,
}

/// `PUT /api/apply/expectations`: check or uncheck one expectation.
pub async fn toggle_expectation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(toggle): Json<ExpectationToggle>,
) -> Result<Json<WizardView>, AppError> {
    let ((), view) = with_wizard(&state, &auth, |w| {
        let mut idea = w.draft().idea.clone();
        idea.set_expectation(toggle.expectation, toggle.checked);
        Ok(w.update(StepData::Idea(idea))?)
    })
    .await?;
    Ok(Json(view))
}

/// `POST /api/apply/next`: advance if the current step is complete.
pub async fn next(State(state): State<AppState>, auth: AuthUser) -> Result<Action<WizardView>, AppError> {
    let (_, view) = with_wizard(&state, &auth, |w| Ok(w.next_step()?)).await?;
    Ok(Action::new(view))
}

/// `POST /api/apply/prev`
pub async fn prev(State(state): State<AppState>, auth: AuthUser) -> Result<Action<WizardView>, AppError> {
    let (_, view) = with_wizard(&state, &auth, |w| Ok(w.prev_step())).await?;
    Ok(Action::new(view))
}

/// `POST /api/apply/submit`: store the application and finish the wizard.
pub async fn submit(State(state): State<AppState>, auth: AuthUser) -> Result<Action<Draft>, AppError> {
    let mut wizards = state.wizards.write().await;
    let wizard = wizards.get_or_insert_with(&auth.client.id, || Wizard::prefilled(&auth.session.user));
    let draft = wizard.submit(&auth.client.store)?;
    wizards.remove(&auth.client.id);

    Ok(Action::new(draft)
        .notice(Notice::success("Application submitted successfully!"))
        .navigate("/thank-you"))
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
