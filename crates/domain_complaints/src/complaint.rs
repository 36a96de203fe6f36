//! The complaint aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ComplaintKey, ConsumerKey};

/// Complaint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    /// Wire representation, matching the JSON and database encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "OPEN",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Resolved => "RESOLVED",
            ComplaintStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(ComplaintStatus::Open),
            "IN_PROGRESS" => Ok(ComplaintStatus::InProgress),
            "RESOLVED" => Ok(ComplaintStatus::Resolved),
            "CLOSED" => Ok(ComplaintStatus::Closed),
            other => Err(format!("unknown complaint status: {other}")),
        }
    }
}

/// A customer service complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Business key, immutable once assigned
    pub complaint_key: ComplaintKey,
    /// Filing customer's consumer number
    pub consumer_key: ConsumerKey,
    /// Complaint kind: SERVICE, TECHNICAL, BILLING, ...
    pub kind: String,
    /// Category, e.g. "Meter Issue"
    pub category: String,
    /// Detailed description
    pub problem: String,
    /// Optional landmark near the affected site
    pub landmark: Option<String>,
    /// Lifecycle status
    pub status: ComplaintStatus,
    /// Admin's response message, set during triage/resolution
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Request to file a new complaint.
#[derive(Debug, Clone)]
pub struct FileComplaint {
    pub consumer_key: ConsumerKey,
    pub kind: String,
    pub category: String,
    pub problem: String,
    pub landmark: Option<String>,
}

/// Customer edit of an open complaint.
#[derive(Debug, Clone)]
pub struct EditComplaint {
    pub kind: String,
    pub category: String,
    pub problem: String,
    pub landmark: Option<String>,
}

impl Complaint {
    /// Creates a complaint from a filing request and an allocated key.
    pub fn file(complaint_key: ComplaintKey, request: FileComplaint) -> Self {
        let now = Utc::now();
        Self {
            complaint_key,
            consumer_key: request.consumer_key,
            kind: request.kind,
            category: request.category,
            problem: request.problem,
            landmark: request.landmark,
            status: ComplaintStatus::Open,
            admin_response: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True while the customer may still edit or withdraw the complaint.
    pub fn is_editable(&self) -> bool {
        self.status == ComplaintStatus::Open
    }

    /// Applies a customer edit. Callers must check [`Self::is_editable`].
    pub fn apply_edit(&mut self, edit: EditComplaint) {
        self.kind = edit.kind;
        self.category = edit.category;
        self.problem = edit.problem;
        self.landmark = edit.landmark;
        self.updated_at = Utc::now();
    }

    /// Moves the complaint to a new status, optionally recording an admin
    /// response. Allowed from any status.
    pub fn transition(&mut self, status: ComplaintStatus, admin_response: Option<String>) {
        self.status = status;
        if admin_response.is_some() {
            self.admin_response = admin_response;
        }
        self.updated_at = Utc::now();
    }
}
