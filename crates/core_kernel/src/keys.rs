//! Strongly-typed business keys for domain entities
//!
//! Business keys are the human-readable identifiers exposed to customers and
//! admins (as opposed to internal storage identity). Newtype wrappers prevent
//! accidental mixing of key types across domain boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_key {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing key value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the key as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> String {
                key.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(BillKey, "Business key of a bill, e.g. `ebm143022100`");
define_key!(PaymentKey, "Business key of a payment, e.g. `ebmp143022500`");
define_key!(ComplaintKey, "Business key of a complaint, e.g. `ebmc143022500`");
define_key!(ConsumerKey, "Consumer number identifying a customer account");
