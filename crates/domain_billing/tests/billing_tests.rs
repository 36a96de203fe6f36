//! Comprehensive tests for domain_billing

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{BillKey, ConsumerKey, KeyAllocator, PortError};
use domain_billing::{
    Bill, BillStatus, BillingError, BillingLedger, BillStore, IssueBill, UpdateBill,
};
use test_utils::{fixtures, MemoryBillStore, MemoryCustomerDirectory, TestBillBuilder};

fn issue_request(consumer: ConsumerKey, amount: Decimal) -> IssueBill {
    IssueBill {
        consumer_key: consumer,
        billing_period: fixtures::billing_period(),
        amount_due: amount,
        issue_date: None,
        due_date: None,
        previous_reading: None,
        current_reading: None,
        units_consumed: None,
        rate_per_unit: None,
        additional_charges: None,
    }
}

async fn ledger_with_customer() -> (BillingLedger, Arc<MemoryBillStore>) {
    let bills = Arc::new(MemoryBillStore::new());
    let customers = Arc::new(MemoryCustomerDirectory::new());
    customers.register(fixtures::consumer_key()).await;
    customers.register(fixtures::other_consumer_key()).await;
    let ledger = BillingLedger::new(
        bills.clone(),
        customers,
        Arc::new(KeyAllocator::new()),
    );
    (ledger, bills)
}

// ============================================================================
// Issuance
// ============================================================================

mod issuance {
    use super::*;

    #[tokio::test]
    async fn issues_a_pending_bill_with_allocated_key() {
        let (ledger, _) = ledger_with_customer().await;

        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(500.00)))
            .await
            .unwrap();

        assert!(bill.bill_key.as_str().starts_with("ebm"));
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.amount_due, dec!(500.00));
        assert!(bill.payment_key.is_none());
        assert!(bill.payment_date.is_none());
    }

    #[tokio::test]
    async fn rejects_unknown_customer() {
        let (ledger, _) = ledger_with_customer().await;

        let err = ledger
            .issue_bill(issue_request(ConsumerKey::new("CON-NOPE"), dec!(100)))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::CustomerNotFound(_)));
    }

    #[tokio::test]
    async fn defaults_due_date_to_issue_plus_fifteen_days() {
        let (ledger, _) = ledger_with_customer().await;

        let mut request = issue_request(fixtures::consumer_key(), dec!(100.00));
        request.issue_date = NaiveDate::from_ymd_opt(2024, 1, 1);

        let bill = ledger.issue_bill(request).await.unwrap();
        assert_eq!(
            bill.due_date,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );
    }

    #[tokio::test]
    async fn fails_with_allocation_error_when_every_key_is_taken() {
        // A store that reports every candidate key as existing forces the
        // allocate-check-retry loop to exhaust its budget.
        struct AlwaysTaken;

        #[async_trait]
        impl BillStore for AlwaysTaken {
            async fn save(&self, _: &Bill) -> Result<(), PortError> {
                Ok(())
            }
            async fn find_by_key(&self, _: &BillKey) -> Result<Option<Bill>, PortError> {
                Ok(None)
            }
            async fn find_all(&self) -> Result<Vec<Bill>, PortError> {
                Ok(vec![])
            }
            async fn find_by_customer(&self, _: &ConsumerKey) -> Result<Vec<Bill>, PortError> {
                Ok(vec![])
            }
            async fn find_by_customer_and_status(
                &self,
                _: &ConsumerKey,
                _: BillStatus,
            ) -> Result<Vec<Bill>, PortError> {
                Ok(vec![])
            }
            async fn find_by_status(&self, _: BillStatus) -> Result<Vec<Bill>, PortError> {
                Ok(vec![])
            }
            async fn find_with_payments(&self) -> Result<Vec<Bill>, PortError> {
                Ok(vec![])
            }
            async fn find_with_payments_by_customer(
                &self,
                _: &ConsumerKey,
            ) -> Result<Vec<Bill>, PortError> {
                Ok(vec![])
            }
            async fn exists_by_key(&self, _: &BillKey) -> Result<bool, PortError> {
                Ok(true)
            }
            async fn exists_by_payment_key(
                &self,
                _: &core_kernel::PaymentKey,
            ) -> Result<bool, PortError> {
                Ok(true)
            }
            async fn delete(&self, _: &BillKey) -> Result<(), PortError> {
                Ok(())
            }
            async fn count_all(&self) -> Result<i64, PortError> {
                Ok(0)
            }
            async fn count_by_status(&self, _: BillStatus) -> Result<i64, PortError> {
                Ok(0)
            }
            async fn sum_amount_by_status(&self, _: BillStatus) -> Result<Decimal, PortError> {
                Ok(Decimal::ZERO)
            }
        }

        let customers = Arc::new(MemoryCustomerDirectory::new());
        customers.register(fixtures::consumer_key()).await;
        let ledger = BillingLedger::new(
            Arc::new(AlwaysTaken),
            customers,
            Arc::new(KeyAllocator::new()),
        );

        let err = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(100)))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::KeyAllocation(_)));
    }
}

// ============================================================================
// Payment application
// ============================================================================

mod payments {
    use super::*;

    #[tokio::test]
    async fn partial_then_full_payment_scenario() {
        let (ledger, store) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(500.00)))
            .await
            .unwrap();

        // First: a partial payment of 200.
        let outcome = ledger
            .apply_payment(&bill.bill_key, dec!(200.00))
            .await
            .unwrap();

        assert_eq!(
            outcome.message,
            "Partial payment accepted. Remaining balance: 300.00"
        );
        assert_eq!(outcome.status, BillStatus::Pending);
        assert!(outcome.payment_key.as_str().starts_with("ebmp"));

        let stored = store.snapshot(&bill.bill_key).await.unwrap();
        assert_eq!(stored.amount_due, dec!(300.00));
        assert_eq!(stored.payment_key, Some(outcome.payment_key.clone()));
        assert!(stored.payment_date.is_some());

        // Then: the remaining 300 settles the bill with the same payment key.
        let settled = ledger
            .apply_payment(&bill.bill_key, dec!(300.00))
            .await
            .unwrap();

        assert_eq!(settled.message, "Payment successful. Bill fully paid.");
        assert_eq!(settled.status, BillStatus::Paid);
        assert_eq!(settled.payment_key, outcome.payment_key);

        let stored = store.snapshot(&bill.bill_key).await.unwrap();
        assert_eq!(stored.amount_due, Decimal::ZERO);
        assert_eq!(stored.status, BillStatus::Paid);
    }

    #[tokio::test]
    async fn overpayment_clamps_amount_due_to_zero() {
        let (ledger, store) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(100.00)))
            .await
            .unwrap();

        let outcome = ledger
            .apply_payment(&bill.bill_key, dec!(250.00))
            .await
            .unwrap();

        assert_eq!(outcome.status, BillStatus::Paid);
        let stored = store.snapshot(&bill.bill_key).await.unwrap();
        assert_eq!(stored.amount_due, Decimal::ZERO);
    }

    #[tokio::test]
    async fn paying_unknown_bill_fails_with_not_found() {
        let (ledger, _) = ledger_with_customer().await;

        let err = ledger
            .apply_payment(&BillKey::new("ebm000000999"), dec!(10))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::BillNotFound(_)));
    }

    #[tokio::test]
    async fn paying_a_paid_bill_is_rejected_and_leaves_it_unmodified() {
        let (ledger, store) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(100.00)))
            .await
            .unwrap();
        ledger
            .apply_payment(&bill.bill_key, dec!(100.00))
            .await
            .unwrap();
        let before = store.snapshot(&bill.bill_key).await.unwrap();

        let err = ledger
            .apply_payment(&bill.bill_key, dec!(50.00))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::AlreadyPaid(_)));
        let after = store.snapshot(&bill.bill_key).await.unwrap();
        assert_eq!(after.amount_due, before.amount_due);
        assert_eq!(after.payment_key, before.payment_key);
        assert_eq!(after.payment_date, before.payment_date);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_processing_error() {
        let (ledger, store) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(100.00)))
            .await
            .unwrap();

        store.set_fail_saves(true);
        let err = ledger
            .apply_payment(&bill.bill_key, dec!(50.00))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::PaymentProcessing(_)));
        assert!(!err.is_business_rejection());
    }

    #[tokio::test]
    async fn concurrent_half_payments_settle_exactly_once() {
        let (ledger, store) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(400.00)))
            .await
            .unwrap();

        let a = {
            let ledger = ledger.clone();
            let key = bill.bill_key.clone();
            tokio::spawn(async move { ledger.apply_payment(&key, dec!(200.00)).await })
        };
        let b = {
            let ledger = ledger.clone();
            let key = bill.bill_key.clone();
            tokio::spawn(async move { ledger.apply_payment(&key, dec!(200.00)).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(a.is_ok() && b.is_ok());

        let stored = store.snapshot(&bill.bill_key).await.unwrap();
        assert_eq!(stored.amount_due, Decimal::ZERO);
        assert_eq!(stored.status, BillStatus::Paid);

        // Exactly one payment key allocated, shared by both outcomes.
        let key_a = a.unwrap().payment_key;
        let key_b = b.unwrap().payment_key;
        assert_eq!(key_a, key_b);
        assert_eq!(stored.payment_key, Some(key_a));
    }
}

// ============================================================================
// Update and delete
// ============================================================================

mod corrections {
    use super::*;

    fn update_request(consumer: ConsumerKey) -> UpdateBill {
        UpdateBill {
            consumer_key: consumer,
            billing_period: "2024-02".to_string(),
            amount_due: dec!(750.00),
            issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            previous_reading: Some(1200),
            current_reading: Some(1450),
            units_consumed: Some(250),
            rate_per_unit: Some(dec!(3.00)),
            additional_charges: None,
        }
    }

    #[tokio::test]
    async fn update_overwrites_all_mutable_fields() {
        let (ledger, _) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(500.00)))
            .await
            .unwrap();

        let updated = ledger
            .update_bill(&bill.bill_key, update_request(fixtures::other_consumer_key()))
            .await
            .unwrap();

        assert_eq!(updated.consumer_key, fixtures::other_consumer_key());
        assert_eq!(updated.billing_period, "2024-02");
        assert_eq!(updated.amount_due, dec!(750.00));
        assert_eq!(updated.units_consumed, Some(250));
        // The key and payment state survive an admin correction.
        assert_eq!(updated.bill_key, bill.bill_key);
        assert!(updated.payment_key.is_none());
    }

    #[tokio::test]
    async fn update_rejects_unknown_bill_and_customer() {
        let (ledger, _) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(500.00)))
            .await
            .unwrap();

        let err = ledger
            .update_bill(
                &BillKey::new("ebm000000999"),
                update_request(fixtures::consumer_key()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::BillNotFound(_)));

        let err = ledger
            .update_bill(&bill.bill_key, update_request(ConsumerKey::new("CON-NOPE")))
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::CustomerNotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_regardless_of_status() {
        let (ledger, store) = ledger_with_customer().await;
        let bill = ledger
            .issue_bill(issue_request(fixtures::consumer_key(), dec!(100.00)))
            .await
            .unwrap();
        ledger
            .apply_payment(&bill.bill_key, dec!(100.00))
            .await
            .unwrap();

        ledger.delete_bill(&bill.bill_key).await.unwrap();
        assert!(store.snapshot(&bill.bill_key).await.is_none());

        let err = ledger.delete_bill(&bill.bill_key).await.unwrap_err();
        assert!(matches!(err, BillingError::BillNotFound(_)));
    }
}

// ============================================================================
// Listings and statistics
// ============================================================================

mod listings {
    use super::*;

    #[tokio::test]
    async fn listings_sort_by_issue_date_descending() {
        let (ledger, store) = ledger_with_customer().await;
        for (key, day) in [("ebm1", 5), ("ebm2", 20), ("ebm3", 12)] {
            store
                .seed(
                    TestBillBuilder::new()
                        .with_bill_key(key)
                        .with_issue_date(NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
                        .build(),
                )
                .await;
        }

        let bills = ledger.list_all().await.unwrap();
        let keys: Vec<_> = bills.iter().map(|b| b.bill_key.as_str()).collect();
        assert_eq!(keys, vec!["ebm2", "ebm3", "ebm1"]);
    }

    #[tokio::test]
    async fn paid_listing_sorts_by_payment_date_descending() {
        let (ledger, store) = ledger_with_customer().await;
        for (key, day) in [("ebm1", 3), ("ebm2", 9), ("ebm3", 6)] {
            store
                .seed(
                    TestBillBuilder::new()
                        .with_bill_key(key)
                        .with_status(BillStatus::Paid)
                        .with_amount_due(Decimal::ZERO)
                        .with_payment(
                            format!("ebmp{day}"),
                            NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                        )
                        .build(),
                )
                .await;
        }

        let bills = ledger
            .list_paid_for_customer(&fixtures::consumer_key())
            .await
            .unwrap();
        let keys: Vec<_> = bills.iter().map(|b| b.bill_key.as_str()).collect();
        assert_eq!(keys, vec!["ebm2", "ebm3", "ebm1"]);
    }

    #[tokio::test]
    async fn pending_listing_filters_by_customer_and_status() {
        let (ledger, store) = ledger_with_customer().await;
        store.seed(TestBillBuilder::new().with_bill_key("ebm1").build()).await;
        store
            .seed(
                TestBillBuilder::new()
                    .with_bill_key("ebm2")
                    .with_status(BillStatus::Paid)
                    .build(),
            )
            .await;
        store
            .seed(
                TestBillBuilder::new()
                    .with_bill_key("ebm3")
                    .with_consumer_key(fixtures::other_consumer_key())
                    .build(),
            )
            .await;

        let bills = ledger
            .list_pending_for_customer(&fixtures::consumer_key())
            .await
            .unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].bill_key.as_str(), "ebm1");
    }

    #[tokio::test]
    async fn payment_history_only_includes_bills_with_payments() {
        let (ledger, store) = ledger_with_customer().await;
        store.seed(TestBillBuilder::new().with_bill_key("ebm1").build()).await;
        store
            .seed(
                TestBillBuilder::new()
                    .with_bill_key("ebm2")
                    .with_payment("ebmp1", fixtures::issue_date())
                    .build(),
            )
            .await;

        let history = ledger.payment_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].bill_key.as_str(), "ebm2");
    }

    #[tokio::test]
    async fn statistics_count_by_status_and_sum_current_paid_balances() {
        let (ledger, store) = ledger_with_customer().await;
        store.seed(TestBillBuilder::new().with_bill_key("ebm1").build()).await;
        store.seed(TestBillBuilder::new().with_bill_key("ebm2").build()).await;
        store
            .seed(
                TestBillBuilder::new()
                    .with_bill_key("ebm3")
                    .with_status(BillStatus::Paid)
                    .with_amount_due(Decimal::ZERO)
                    .build(),
            )
            .await;

        let stats = ledger.statistics().await.unwrap();
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.pending_count, 2);
        assert_eq!(stats.paid_count, 1);
        assert_eq!(stats.overdue_count, 0);
        // Paid bills carry a zero balance, so the reported revenue is zero.
        assert_eq!(stats.total_revenue, Decimal::ZERO);
    }
}

// ============================================================================
// Payment arithmetic properties
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn bill_with_amount(amount: Decimal) -> Bill {
        Bill::issue(
            BillKey::new("ebm1"),
            IssueBill {
                consumer_key: fixtures::consumer_key(),
                billing_period: fixtures::billing_period(),
                amount_due: amount,
                issue_date: None,
                due_date: None,
                previous_reading: None,
                current_reading: None,
                units_consumed: None,
                rate_per_unit: None,
                additional_charges: None,
            },
            fixtures::issue_date(),
        )
    }

    proptest! {
        #[test]
        fn amount_due_never_goes_negative(
            initial in 0u64..1_000_000,
            payments in proptest::collection::vec(0u64..1_000_000, 1..8),
        ) {
            let mut bill = bill_with_amount(Decimal::from(initial));
            for payment in payments {
                if bill.status == BillStatus::Paid {
                    break;
                }
                bill.apply_payment(Decimal::from(payment), fixtures::issue_date());
                prop_assert!(bill.amount_due >= Decimal::ZERO);
                // Paid exactly when the balance reached zero.
                prop_assert_eq!(
                    bill.status == BillStatus::Paid,
                    bill.amount_due == Decimal::ZERO
                );
            }
        }
    }
}
