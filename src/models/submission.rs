//! Submission model
//!
//! A submission is a third-party API proposed for the directory, waiting
//! for an administrator to approve or reject it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    /// All statuses, in the order the moderation screen lists them
    pub const ALL: [SubmissionStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Invalid submission status: {}", s)),
        }
    }
}

/// Submission entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: String,
    /// Name of the person who submitted the API
    pub name: String,
    pub email: String,
    pub tool_name: String,
    pub description: String,
    pub api_link: String,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub admin_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Replace the status, refreshing `updated_at`
    pub fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Replace the admin notes, refreshing `updated_at`
    pub fn set_notes(&mut self, notes: String) {
        self.admin_notes = notes;
        self.updated_at = Utc::now();
    }

    /// Case-insensitive search over tool name and submitter name.
    ///
    /// An empty query matches every submission.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.tool_name.to_lowercase().contains(&query) || self.name.to_lowercase().contains(&query)
    }
}
