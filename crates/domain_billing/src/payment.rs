//! Payment application results

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::PaymentKey;

use crate::bill::BillStatus;

/// Outcome of the payment arithmetic on a single bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentApplication {
    /// The payment settled the bill; balance is zero
    FullyPaid,
    /// The payment covered part of the balance
    Partial {
        /// Balance still owed after this payment
        remaining: Decimal,
    },
}

/// Result returned to the caller of a payment application.
///
/// "Fully paid" and "partial" are distinguished by message; the payment key
/// is the one allocated on the bill's first payment and is stable across
/// subsequent partial payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    /// Human-readable result, e.g. "Partial payment accepted. Remaining balance: 300.00"
    pub message: String,
    /// The bill's payment key
    pub payment_key: PaymentKey,
    /// Bill status after this payment
    pub status: BillStatus,
}

impl PaymentOutcome {
    /// Builds the outcome for a given application result.
    pub fn from_application(
        application: PaymentApplication,
        payment_key: PaymentKey,
        status: BillStatus,
    ) -> Self {
        let message = match application {
            PaymentApplication::FullyPaid => "Payment successful. Bill fully paid.".to_string(),
            PaymentApplication::Partial { remaining } => {
                format!("Partial payment accepted. Remaining balance: {remaining}")
            }
        };
        Self {
            message,
            payment_key,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn partial_message_carries_remaining_balance() {
        let outcome = PaymentOutcome::from_application(
            PaymentApplication::Partial {
                remaining: dec!(300.00),
            },
            PaymentKey::new("ebmp1"),
            BillStatus::Pending,
        );
        assert_eq!(
            outcome.message,
            "Partial payment accepted. Remaining balance: 300.00"
        );
        assert_eq!(outcome.status, BillStatus::Pending);
    }

    #[test]
    fn full_payment_message() {
        let outcome = PaymentOutcome::from_application(
            PaymentApplication::FullyPaid,
            PaymentKey::new("ebmp1"),
            BillStatus::Paid,
        );
        assert_eq!(outcome.message, "Payment successful. Bill fully paid.");
    }
}
