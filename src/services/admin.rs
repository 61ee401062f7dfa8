//! Admin review service: credential check, admin session, mock applications.
//!
//! The reviewer-side data is a fixed list; review decisions are acknowledged
//! but never applied to it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::services::catalog::ReviewStatus;
use crate::store::{ClientStore, StoreError, keys};

pub const ADMIN_EMAIL: &str = "admin@dreamers.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_TOKEN: &str = "admin-jwt-token";

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Invalid admin credentials")]
    InvalidCredentials,
    #[error("application {0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// ADMIN SESSION
// =============================================================================

/// Stored under `adminUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Log an administrator in. Only the exact demo pair is accepted.
pub fn admin_login(store: &ClientStore, email: &str, password: &str) -> Result<AdminUser, AdminError> {
    if email != ADMIN_EMAIL || password != ADMIN_PASSWORD {
        warn!(namespace = store.namespace(), "rejected admin credentials");
        return Err(AdminError::InvalidCredentials);
    }

    let admin = AdminUser { name: "Administrator".to_owned(), email: email.to_owned(), role: "admin".to_owned() };
    store.set_raw(keys::ADMIN_TOKEN, ADMIN_TOKEN)?;
    if let Err(e) = store.set_json(keys::ADMIN_USER, &admin) {
        store.remove(keys::ADMIN_TOKEN);
        return Err(e.into());
    }
    info!(namespace = store.namespace(), "admin logged in");
    Ok(admin)
}

pub fn admin_logout(store: &ClientStore) {
    store.remove(keys::ADMIN_TOKEN);
    store.remove(keys::ADMIN_USER);
    info!(namespace = store.namespace(), "admin logged out");
}

/// The dashboard is open to any client holding an admin token.
#[must_use]
pub fn is_admin(store: &ClientStore) -> bool {
    store.contains(keys::ADMIN_TOKEN)
}

/// Stored admin profile, if any.
#[must_use]
pub fn admin_user(store: &ClientStore) -> Option<AdminUser> {
    store.get_json(keys::ADMIN_USER)
}

// =============================================================================
// APPLICATION RECORDS
// =============================================================================

/// An application as the reviewer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub founder_name: String,
    pub startup_name: String,
    pub email: String,
    pub phone: String,
    pub company_type: String,
    pub team_size: String,
    pub incubation_centre: String,
    pub status: ReviewStatus,
    pub submitted_at: String,
    pub idea_description: String,
    pub expectations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
}

struct Seed {
    id: &'static str,
    founder_name: &'static str,
    startup_name: &'static str,
    email: &'static str,
    phone: &'static str,
    company_type: &'static str,
    team_size: &'static str,
    incubation_centre: &'static str,
    status: ReviewStatus,
    submitted_at: &'static str,
    idea_description: &'static str,
    expectations: &'static [&'static str],
    challenges: &'static str,
}

const SEEDS: [Seed; 3] = [
    Seed {
        id: "APP001",
        founder_name: "John Doe",
        startup_name: "TechStart AI",
        email: "john@techstart.com",
        phone: "+91 9876543210",
        company_type: "Technology",
        team_size: "2-5",
        incubation_centre: "IIT Delhi Incubation Centre",
        status: ReviewStatus::Pending,
        submitted_at: "2024-01-15",
        idea_description: "AI-powered customer service automation platform that helps businesses...",
        expectations: &["Funding Support", "Mentorship and Guidance", "Network Access"],
        challenges: "Finding the right technical talent and initial funding",
    },
    Seed {
        id: "APP002",
        founder_name: "Sarah Smith",
        startup_name: "EcoSmart Solutions",
        email: "sarah@ecosmart.com",
        phone: "+91 9876543211",
        company_type: "Sustainability",
        team_size: "6-10",
        incubation_centre: "IIT Bombay Incubation Centre",
        status: ReviewStatus::Approved,
        submitted_at: "2024-01-10",
        idea_description: "Sustainable packaging solutions for e-commerce companies...",
        expectations: &["Technical Resources", "Market Research", "Funding Support"],
        challenges: "Scaling production and meeting regulatory requirements",
    },
    Seed {
        id: "APP003",
        founder_name: "Raj Patel",
        startup_name: "HealthTech Pro",
        email: "raj@healthtech.com",
        phone: "+91 9876543212",
        company_type: "Healthcare",
        team_size: "1-5",
        incubation_centre: "T-Hub Hyderabad",
        status: ReviewStatus::Rejected,
        submitted_at: "2024-01-08",
        idea_description: "Telemedicine platform for remote healthcare delivery...",
        expectations: &["Legal Support", "Funding Support", "Network Access"],
        challenges: "Regulatory compliance and user acquisition",
    },
];

/// The fixed reviewer list.
#[must_use]
pub fn mock_applications() -> Vec<ApplicationRecord> {
    SEEDS
        .iter()
        .map(|s| ApplicationRecord {
            id: s.id.to_owned(),
            founder_name: s.founder_name.to_owned(),
            startup_name: s.startup_name.to_owned(),
            email: s.email.to_owned(),
            phone: s.phone.to_owned(),
            company_type: s.company_type.to_owned(),
            team_size: s.team_size.to_owned(),
            incubation_centre: s.incubation_centre.to_owned(),
            status: s.status,
            submitted_at: s.submitted_at.to_owned(),
            idea_description: s.idea_description.to_owned(),
            expectations: s.expectations.iter().map(|e| (*e).to_owned()).collect(),
            challenges: Some(s.challenges.to_owned()).filter(|c| !c.is_empty()),
        })
        .collect()
}

// =============================================================================
// QUERIES
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        let count = |status: ReviewStatus| records.iter().filter(|r| r.status == status).count();
        Self {
            total: records.len(),
            pending: count(ReviewStatus::Pending),
            approved: count(ReviewStatus::Approved),
            rejected: count(ReviewStatus::Rejected),
        }
    }
}

/// Records matching `status`, or all of them.
#[must_use]
pub fn filter_by_status(records: &[ApplicationRecord], status: Option<ReviewStatus>) -> Vec<ApplicationRecord> {
    records
        .iter()
        .filter(|r| status.is_none_or(|s| r.status == s))
        .cloned()
        .collect()
}

pub fn find_application<'a>(records: &'a [ApplicationRecord], id: &str) -> Result<&'a ApplicationRecord, AdminError> {
    records
        .iter()
        .find(|r| r.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| AdminError::NotFound(id.to_owned()))
}

// =============================================================================
// REVIEW DECISIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// What the reviewer asked for, alongside the unchanged record status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAck {
    pub id: String,
    pub decision: ReviewDecision,
    pub status: ReviewStatus,
}

/// Acknowledge a review decision. The record list is not modified.
pub fn review(records: &[ApplicationRecord], id: &str, decision: ReviewDecision) -> Result<ReviewAck, AdminError> {
    let record = find_application(records, id)?;
    info!(id = %record.id, ?decision, "review decision received");
    Ok(ReviewAck { id: record.id.clone(), decision, status: record.status })
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
