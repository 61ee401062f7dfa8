//! Fixed option lists offered by the registration and application forms.

use serde::{Deserialize, Serialize};

// =============================================================================
// INCUBATION CENTRES
// =============================================================================

/// An incubation centre as offered at registration: a label plus the
/// head-office address applications are forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncubationCentre {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
}

pub const REGISTRATION_CENTRES: &[IncubationCentre] = &[
    IncubationCentre { id: "iit-delhi", name: "IIT Delhi Incubation Centre", email: "head@iitdelhi-incubation.com" },
    IncubationCentre { id: "iit-bombay", name: "IIT Bombay Incubation Centre", email: "head@iitbombay-incubation.com" },
    IncubationCentre { id: "t-hub", name: "T-Hub Hyderabad", email: "head@thub-hyderabad.com" },
    IncubationCentre { id: "iisc-bangalore", name: "IISc Bangalore Incubation", email: "head@iisc-incubation.com" },
    IncubationCentre { id: "nasscom", name: "NASSCOM Incubation Centre", email: "head@nasscom-incubation.com" },
];

/// Look up a registration centre by id.
#[must_use]
pub fn find_centre(id: &str) -> Option<&'static IncubationCentre> {
    REGISTRATION_CENTRES.iter().find(|c| c.id == id)
}

/// A `value`/`label` pair for a select input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Centres selectable on the documentation step of the application.
pub const APPLICATION_CENTRES: &[SelectOption] = &[
    SelectOption { value: "iit-delhi", label: "IIT Delhi Incubation Centre" },
    SelectOption { value: "iit-bombay", label: "IIT Bombay Incubation Centre" },
    SelectOption { value: "iim-ahmedabad", label: "IIM Ahmedabad CIIE" },
    SelectOption { value: "t-hub", label: "T-Hub Hyderabad" },
    SelectOption { value: "other", label: "Other" },
];

// =============================================================================
// COMPANY TYPE / TEAM SIZE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyType {
    PvtLtd,
    Llp,
    Partnership,
    SoleProprietorship,
    Other,
}

impl CompanyType {
    pub const ALL: [Self; 5] = [Self::PvtLtd, Self::Llp, Self::Partnership, Self::SoleProprietorship, Self::Other];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PvtLtd => "pvt-ltd",
            Self::Llp => "llp",
            Self::Partnership => "partnership",
            Self::SoleProprietorship => "sole-proprietorship",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PvtLtd => "Private Limited",
            Self::Llp => "LLP",
            Self::Partnership => "Partnership",
            Self::SoleProprietorship => "Sole Proprietorship",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSize {
    #[serde(rename = "1")]
    Solo,
    #[serde(rename = "2-5")]
    Small,
    #[serde(rename = "6-10")]
    Medium,
    #[serde(rename = "11-20")]
    Large,
    #[serde(rename = "20+")]
    Enterprise,
}

impl TeamSize {
    pub const ALL: [Self; 5] = [Self::Solo, Self::Small, Self::Medium, Self::Large, Self::Enterprise];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solo => "1",
            Self::Small => "2-5",
            Self::Medium => "6-10",
            Self::Large => "11-20",
            Self::Enterprise => "20+",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Solo => "1 member",
            Self::Small => "2-5 members",
            Self::Medium => "6-10 members",
            Self::Large => "11-20 members",
            Self::Enterprise => "20+ members",
        }
    }
}

// =============================================================================
// EXPECTATIONS
// =============================================================================

/// What an applicant hopes to get from the program. Serialized by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Expectation {
    #[serde(rename = "Mentorship and Guidance")]
    Mentorship,
    #[serde(rename = "Funding Support")]
    Funding,
    #[serde(rename = "Network Access")]
    Network,
    #[serde(rename = "Technical Resources")]
    TechnicalResources,
    #[serde(rename = "Market Research")]
    MarketResearch,
    #[serde(rename = "Legal Support")]
    Legal,
    #[serde(rename = "Marketing Assistance")]
    Marketing,
}

impl Expectation {
    pub const ALL: [Self; 7] = [
        Self::Mentorship,
        Self::Funding,
        Self::Network,
        Self::TechnicalResources,
        Self::MarketResearch,
        Self::Legal,
        Self::Marketing,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Mentorship => "Mentorship and Guidance",
            Self::Funding => "Funding Support",
            Self::Network => "Network Access",
            Self::TechnicalResources => "Technical Resources",
            Self::MarketResearch => "Market Research",
            Self::Legal => "Legal Support",
            Self::Marketing => "Marketing Assistance",
        }
    }
}

// =============================================================================
// REVIEW STATUS
// =============================================================================

/// Approval state shared by users and reviewed applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

// =============================================================================
// SELECT LISTS
// =============================================================================

/// Company-type options in display order.
#[must_use]
pub fn company_type_options() -> Vec<SelectOption> {
    CompanyType::ALL
        .iter()
        .map(|c| SelectOption { value: c.as_str(), label: c.label() })
        .collect()
}

/// Team-size options in display order.
#[must_use]
pub fn team_size_options() -> Vec<SelectOption> {
    TeamSize::ALL
        .iter()
        .map(|t| SelectOption { value: t.as_str(), label: t.label() })
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
