//! Comprehensive tests for domain_complaints

use std::sync::Arc;

use core_kernel::{ComplaintKey, ConsumerKey, KeyAllocator};
use domain_complaints::{
    ComplaintDesk, ComplaintError, ComplaintStatus, ComplaintStore, EditComplaint, FileComplaint,
};
use test_utils::{fixtures, MemoryComplaintStore, MemoryCustomerDirectory, TestComplaintBuilder};

fn filing(consumer: ConsumerKey) -> FileComplaint {
    FileComplaint {
        consumer_key: consumer,
        kind: "TECHNICAL".to_string(),
        category: "Meter Issue".to_string(),
        problem: "Meter display is blank".to_string(),
        landmark: Some("Near water tower".to_string()),
    }
}

fn edit() -> EditComplaint {
    EditComplaint {
        kind: "SERVICE".to_string(),
        category: "Supply Outage".to_string(),
        problem: "No power since morning".to_string(),
        landmark: None,
    }
}

async fn desk() -> (ComplaintDesk, Arc<MemoryComplaintStore>) {
    let complaints = Arc::new(MemoryComplaintStore::new());
    let customers = Arc::new(MemoryCustomerDirectory::new());
    customers.register(fixtures::consumer_key()).await;
    customers.register(fixtures::other_consumer_key()).await;
    let desk = ComplaintDesk::new(
        complaints.clone(),
        customers,
        Arc::new(KeyAllocator::new()),
    );
    (desk, complaints)
}

#[tokio::test]
async fn filing_allocates_key_and_opens_complaint() {
    let (desk, _) = desk().await;

    let complaint = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();

    assert!(complaint.complaint_key.as_str().starts_with("ebmc"));
    assert_eq!(complaint.status, ComplaintStatus::Open);
    assert_eq!(complaint.landmark.as_deref(), Some("Near water tower"));
    assert!(complaint.admin_response.is_none());
}

#[tokio::test]
async fn filing_rejects_unknown_customer() {
    let (desk, _) = desk().await;

    let err = desk
        .file_complaint(filing(ConsumerKey::new("CON-NOPE")))
        .await
        .unwrap_err();

    assert!(matches!(err, ComplaintError::CustomerNotFound(_)));
}

#[tokio::test]
async fn get_complaint_reports_missing_key() {
    let (desk, _) = desk().await;

    let err = desk
        .get_complaint(&ComplaintKey::new("ebmc000000999"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "No complaint is there for Complaint ID: ebmc000000999"
    );
}

#[tokio::test]
async fn customer_can_edit_while_open() {
    let (desk, _) = desk().await;
    let complaint = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();

    let edited = desk
        .edit_complaint(&complaint.complaint_key, edit())
        .await
        .unwrap();

    assert_eq!(edited.kind, "SERVICE");
    assert_eq!(edited.category, "Supply Outage");
    assert_eq!(edited.problem, "No power since morning");
    assert!(edited.landmark.is_none());
    assert_eq!(edited.status, ComplaintStatus::Open);
}

#[tokio::test]
async fn edit_is_rejected_once_in_progress() {
    let (desk, _) = desk().await;
    let complaint = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();
    desk.update_status(&complaint.complaint_key, ComplaintStatus::InProgress, None)
        .await
        .unwrap();

    let err = desk
        .edit_complaint(&complaint.complaint_key, edit())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ComplaintError::NotEditable {
            status: ComplaintStatus::InProgress,
            ..
        }
    ));
}

#[tokio::test]
async fn withdraw_removes_open_complaints_only() {
    let (desk, store) = desk().await;
    let open = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();
    let triaged = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();
    desk.update_status(&triaged.complaint_key, ComplaintStatus::Resolved, None)
        .await
        .unwrap();

    desk.withdraw_complaint(&open.complaint_key).await.unwrap();
    assert!(store
        .find_by_key(&open.complaint_key)
        .await
        .unwrap()
        .is_none());

    let err = desk
        .withdraw_complaint(&triaged.complaint_key)
        .await
        .unwrap_err();
    assert!(matches!(err, ComplaintError::NotEditable { .. }));
}

#[tokio::test]
async fn admin_triage_records_response_and_keeps_it_across_transitions() {
    let (desk, _) = desk().await;
    let complaint = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();

    let triaged = desk
        .update_status(
            &complaint.complaint_key,
            ComplaintStatus::InProgress,
            Some("Crew dispatched".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(triaged.admin_response.as_deref(), Some("Crew dispatched"));

    // A later transition without a message keeps the earlier response.
    let resolved = desk
        .update_status(&complaint.complaint_key, ComplaintStatus::Resolved, None)
        .await
        .unwrap();
    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    assert_eq!(resolved.admin_response.as_deref(), Some("Crew dispatched"));
}

#[tokio::test]
async fn listings_filter_by_customer_and_status() {
    let (desk, store) = desk().await;
    store
        .save(
            &TestComplaintBuilder::new()
                .with_complaint_key("ebmc1")
                .build(),
        )
        .await
        .unwrap();
    store
        .save(
            &TestComplaintBuilder::new()
                .with_complaint_key("ebmc2")
                .with_status(ComplaintStatus::Resolved)
                .build(),
        )
        .await
        .unwrap();
    store
        .save(
            &TestComplaintBuilder::new()
                .with_complaint_key("ebmc3")
                .with_consumer_key(fixtures::other_consumer_key())
                .build(),
        )
        .await
        .unwrap();

    let all = desk.list_all().await.unwrap();
    assert_eq!(all.len(), 3);

    let mine = desk
        .list_for_customer(&fixtures::consumer_key())
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);

    let resolved = desk
        .list_for_customer_by_status(&fixtures::consumer_key(), ComplaintStatus::Resolved)
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].complaint_key.as_str(), "ebmc2");
}

#[tokio::test]
async fn listings_come_newest_first() {
    let (desk, _) = desk().await;
    let first = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = desk
        .file_complaint(filing(fixtures::consumer_key()))
        .await
        .unwrap();

    let all = desk.list_all().await.unwrap();
    assert_eq!(all[0].complaint_key, second.complaint_key);
    assert_eq!(all[1].complaint_key, first.complaint_key);
}
