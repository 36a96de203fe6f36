//! Complaint DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ConsumerKey;
use domain_complaints::{Complaint, EditComplaint, FileComplaint};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1))]
    pub consumer_id: String,
    #[validate(length(min = 1))]
    pub kind: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub problem: String,
    pub landmark: Option<String>,
}

impl From<CreateComplaintRequest> for FileComplaint {
    fn from(request: CreateComplaintRequest) -> Self {
        FileComplaint {
            consumer_key: ConsumerKey::new(request.consumer_id),
            kind: request.kind,
            category: request.category,
            problem: request.problem,
            landmark: request.landmark,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateComplaintRequest {
    #[validate(length(min = 1))]
    pub kind: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub problem: String,
    pub landmark: Option<String>,
}

impl From<UpdateComplaintRequest> for EditComplaint {
    fn from(request: UpdateComplaintRequest) -> Self {
        EditComplaint {
            kind: request.kind,
            category: request.category,
            problem: request.problem,
            landmark: request.landmark,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateComplaintStatusRequest {
    pub status: String,
    pub admin_response: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub complaint_id: String,
    pub consumer_id: String,
    pub kind: String,
    pub category: String,
    pub problem: String,
    pub landmark: Option<String>,
    pub status: String,
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintResponse {
    fn from(complaint: Complaint) -> Self {
        Self {
            complaint_id: complaint.complaint_key.into(),
            consumer_id: complaint.consumer_key.into(),
            kind: complaint.kind,
            category: complaint.category,
            problem: complaint.problem,
            landmark: complaint.landmark,
            status: complaint.status.as_str().to_string(),
            admin_response: complaint.admin_response,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
        }
    }
}
