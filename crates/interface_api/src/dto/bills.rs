//! Bill DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ConsumerKey;
use domain_billing::{Bill, BillStatistics, IssueBill, PaymentOutcome, UpdateBill};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBillRequest {
    #[validate(length(min = 1))]
    pub consumer_id: String,
    #[validate(length(min = 1))]
    pub billing_period: String,
    pub amount_due: Decimal,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub previous_reading: Option<i64>,
    pub current_reading: Option<i64>,
    pub units_consumed: Option<i64>,
    pub rate_per_unit: Option<Decimal>,
    pub additional_charges: Option<Decimal>,
}

impl From<CreateBillRequest> for IssueBill {
    fn from(request: CreateBillRequest) -> Self {
        IssueBill {
            consumer_key: ConsumerKey::new(request.consumer_id),
            billing_period: request.billing_period,
            amount_due: request.amount_due,
            issue_date: request.issue_date,
            due_date: request.due_date,
            previous_reading: request.previous_reading,
            current_reading: request.current_reading,
            units_consumed: request.units_consumed,
            rate_per_unit: request.rate_per_unit,
            additional_charges: request.additional_charges,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBillRequest {
    #[validate(length(min = 1))]
    pub consumer_id: String,
    #[validate(length(min = 1))]
    pub billing_period: String,
    pub amount_due: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub previous_reading: Option<i64>,
    pub current_reading: Option<i64>,
    pub units_consumed: Option<i64>,
    pub rate_per_unit: Option<Decimal>,
    pub additional_charges: Option<Decimal>,
}

impl From<UpdateBillRequest> for UpdateBill {
    fn from(request: UpdateBillRequest) -> Self {
        UpdateBill {
            consumer_key: ConsumerKey::new(request.consumer_id),
            billing_period: request.billing_period,
            amount_due: request.amount_due,
            issue_date: request.issue_date,
            due_date: request.due_date,
            previous_reading: request.previous_reading,
            current_reading: request.current_reading,
            units_consumed: request.units_consumed,
            rate_per_unit: request.rate_per_unit,
            additional_charges: request.additional_charges,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PayBillRequest {
    #[validate(length(min = 1))]
    pub bill_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub bill_id: String,
    pub consumer_id: String,
    pub billing_period: String,
    pub amount_due: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub payment_id: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub previous_reading: Option<i64>,
    pub current_reading: Option<i64>,
    pub units_consumed: Option<i64>,
    pub rate_per_unit: Option<Decimal>,
    pub additional_charges: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bill> for BillResponse {
    fn from(bill: Bill) -> Self {
        Self {
            bill_id: bill.bill_key.into(),
            consumer_id: bill.consumer_key.into(),
            billing_period: bill.billing_period,
            amount_due: bill.amount_due,
            issue_date: bill.issue_date,
            due_date: bill.due_date,
            status: bill.status.as_str().to_string(),
            payment_id: bill.payment_key.map(Into::into),
            payment_date: bill.payment_date,
            previous_reading: bill.previous_reading,
            current_reading: bill.current_reading,
            units_consumed: bill.units_consumed,
            rate_per_unit: bill.rate_per_unit,
            additional_charges: bill.additional_charges,
            created_at: bill.created_at,
            updated_at: bill.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub message: String,
    pub payment_id: String,
    pub status: String,
}

impl From<PaymentOutcome> for PaymentResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        Self {
            message: outcome.message,
            payment_id: outcome.payment_key.into(),
            status: outcome.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BillStatsResponse {
    pub total_count: i64,
    pub pending_count: i64,
    pub paid_count: i64,
    pub overdue_count: i64,
    pub total_revenue: Decimal,
}

impl From<BillStatistics> for BillStatsResponse {
    fn from(stats: BillStatistics) -> Self {
        Self {
            total_count: stats.total_count,
            pending_count: stats.pending_count,
            paid_count: stats.paid_count,
            overdue_count: stats.overdue_count,
            total_revenue: stats.total_revenue,
        }
    }
}
