//! Application wizard: three gated steps ending in a stored submission.
//!
//! DESIGN
//! ======
//! The draft is split into one struct per step. Each struct answers which of
//! its required fields are still empty, and the wizard only moves forward
//! when the current step answers "none". Going back is always allowed.
//!
//! Submission re-checks every step (the last one first) before anything is
//! written, so a draft that was edited after advancing cannot slip through.
//! The stored value is the flattened draft under `applicationData`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::catalog::{CompanyType, Expectation, TeamSize};
use crate::services::session::User;
use crate::store::{ClientStore, StoreError, keys};

/// Extensions accepted for uploaded documents.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

pub const STEP_COUNT: u8 = 3;

// =============================================================================
// STEPS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    Basic,
    Documentation,
    Idea,
}

impl WizardStep {
    /// 1-based position.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Documentation => 2,
            Self::Idea => 3,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic Information",
            Self::Documentation => "Documentation",
            Self::Idea => "About Your Startup",
        }
    }

    /// Following step, saturating at the last.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Basic => Self::Documentation,
            Self::Documentation | Self::Idea => Self::Idea,
        }
    }

    /// Preceding step, saturating at the first.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Basic | Self::Documentation => Self::Basic,
            Self::Idea => Self::Documentation,
        }
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self == Self::Idea
    }
}

// =============================================================================
// FILE REFERENCES
// =============================================================================

/// A document the applicant picked. Only the reference is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileRef {
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

// =============================================================================
// PER-STEP DRAFTS
// =============================================================================

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Step 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub founder_name: String,
    pub startup_name: String,
    pub email: String,
    pub phone: String,
    pub company_type: Option<CompanyType>,
    pub team_size: Option<TeamSize>,
    pub coupon_code: String,
}

impl BasicInfo {
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.founder_name) {
            missing.push("founderName");
        }
        if blank(&self.startup_name) {
            missing.push("startupName");
        }
        if blank(&self.email) {
            missing.push("email");
        }
        if blank(&self.phone) {
            missing.push("phone");
        }
        if self.company_type.is_none() {
            missing.push("companyType");
        }
        if self.team_size.is_none() {
            missing.push("teamSize");
        }
        missing
    }
}

/// Step 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documentation {
    pub incubation_centre: String,
    pub registration_certificate: Option<FileRef>,
    pub incubation_letter: Option<FileRef>,
    pub website_link: String,
}

impl Documentation {
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.incubation_centre) {
            missing.push("incubationCentre");
        }
        if self.registration_certificate.is_none() {
            missing.push("registrationCertificate");
        }
        missing
    }

    fn rejected_file(&self) -> Option<&FileRef> {
        [&self.registration_certificate, &self.incubation_letter]
            .into_iter()
            .flatten()
            .find(|f| !f.is_accepted())
    }
}

/// Step 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaDetails {
    pub idea_description: String,
    pub expectations: Vec<Expectation>,
    pub challenges: String,
}

impl IdeaDetails {
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.idea_description) {
            missing.push("ideaDescription");
        }
        if self.expectations.is_empty() {
            missing.push("expectations");
        }
        missing
    }

    /// Toggle one expectation, keeping selection order.
    pub fn set_expectation(&mut self, expectation: Expectation, checked: bool) {
        let present = self.expectations.contains(&expectation);
        if checked && !present {
            self.expectations.push(expectation);
        } else if !checked {
            self.expectations.retain(|e| *e != expectation);
        }
    }

    fn dedup_expectations(&mut self) {
        let mut seen = Vec::with_capacity(self.expectations.len());
        self.expectations.retain(|e| {
            if seen.contains(e) {
                false
            } else {
                seen.push(*e);
                true
            }
        });
    }
}

/// One step's worth of form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "camelCase")]
pub enum StepData {
    Basic(BasicInfo),
    Documentation(Documentation),
    Idea(IdeaDetails),
}

impl StepData {
    #[must_use]
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Basic(_) => WizardStep::Basic,
            Self::Documentation(_) => WizardStep::Documentation,
            Self::Idea(_) => WizardStep::Idea,
        }
    }
}

/// The whole application. Serializes flat, one key per form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(flatten)]
    pub basic: BasicInfo,
    #[serde(flatten)]
    pub documentation: Documentation,
    #[serde(flatten)]
    pub idea: IdeaDetails,
}

impl Draft {
    #[must_use]
    pub fn missing_fields(&self, step: WizardStep) -> Vec<&'static str> {
        match step {
            WizardStep::Basic => self.basic.missing_fields(),
            WizardStep::Documentation => self.documentation.missing_fields(),
            WizardStep::Idea => self.idea.missing_fields(),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Please fill in all required fields")]
    MissingFields { step: WizardStep, fields: Vec<&'static str> },
    #[error("Unsupported file type for {name}. Upload a PDF, JPG or PNG")]
    UnsupportedFile { name: String },
    #[error("The application can only be submitted from the final step")]
    NotOnFinalStep { step: WizardStep },
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// WIZARD
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Wizard {
    step: WizardStep,
    draft: Draft,
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a wizard with the applicant's identity filled in.
    #[must_use]
    pub fn prefilled(user: &User) -> Self {
        let mut wizard = Self::new();
        wizard.draft.basic.founder_name.clone_from(&user.name);
        wizard.draft.basic.email.clone_from(&user.email);
        wizard.draft.basic.phone = user.contact.clone().unwrap_or_default();
        wizard
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace one step's data. Rejected documents leave the draft untouched.
    pub fn update(&mut self, data: StepData) -> Result<(), WizardError> {
        match data {
            StepData::Basic(basic) => self.draft.basic = basic,
            StepData::Documentation(documentation) => {
                if let Some(file) = documentation.rejected_file() {
                    return Err(WizardError::UnsupportedFile { name: file.name.clone() });
                }
                self.draft.documentation = documentation;
            }
            StepData::Idea(mut idea) => {
                idea.dedup_expectations();
                self.draft.idea = idea;
            }
        }
        Ok(())
    }

    /// Check `step`'s required fields against the current draft.
    pub fn validate_step(&self, step: WizardStep) -> Result<(), WizardError> {
        let fields = self.draft.missing_fields(step);
        if fields.is_empty() {
            Ok(())
        } else {
            Err(WizardError::MissingFields { step, fields })
        }
    }

    /// Advance if the current step is complete. On error nothing changes.
    pub fn next_step(&mut self) -> Result<WizardStep, WizardError> {
        self.validate_step(self.step)?;
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn prev_step(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.step
    }

    /// Validate the whole draft and store it under `applicationData`.
    pub fn submit(&self, store: &ClientStore) -> Result<Draft, WizardError> {
        if !self.step.is_last() {
            return Err(WizardError::NotOnFinalStep { step: self.step });
        }
        self.validate_step(WizardStep::Idea)?;
        self.validate_step(WizardStep::Basic)?;
        self.validate_step(WizardStep::Documentation)?;

        store.set_json(keys::APPLICATION_DATA, &self.draft)?;
        info!(
            namespace = store.namespace(),
            startup = %self.draft.basic.startup_name,
            "application submitted"
        );
        Ok(self.draft.clone())
    }
}

#[cfg(test)]
#[path = "wizard_test.rs"]
mod tests;
