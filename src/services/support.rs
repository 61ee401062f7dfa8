//! Support requests. Nothing is sent: the applicant gets a prefilled
//! `mailto:` link to open in their own mail client.

use serde::{Deserialize, Serialize};
use tracing::info;

pub const SUPPORT_ADDRESS: &str = "support@dreamers.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SupportRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SupportError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<&'static str>),
}

impl SupportRequest {
    fn missing_fields(&self) -> Vec<&'static str> {
        [("name", &self.name), ("email", &self.email), ("subject", &self.subject), ("message", &self.message)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    fn body(&self) -> String {
        format!(
            "\nName: {}\nEmail: {}\nPriority: {}\n\nIssue Description:\n{}\n\n---\n\
             This is an automated support request from Dreamers Application Portal.\n",
            self.name,
            self.email,
            self.priority.as_str(),
            self.message
        )
    }

    /// Build the `mailto:` link for this request.
    pub fn mailto(&self) -> Result<String, SupportError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(SupportError::MissingFields(missing));
        }

        let subject = urlencoding::encode(&format!("Support Request: {}", self.subject)).into_owned();
        let body = urlencoding::encode(&self.body()).into_owned();
        info!(priority = self.priority.as_str(), "support request prepared");
        Ok(format!("mailto:{SUPPORT_ADDRESS}?subject={subject}&body={body}"))
    }
}

#[cfg(test)]
#[path = "support_test.rs"]
mod tests;
