//! Strongly-typed identifiers for domain entities
//!
//! Every table keys its rows with a database-generated `SERIAL` integer.
//! Wrapping those integers in newtypes keeps a product id from being passed
//! where a bill id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw database identifier
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Returns the raw database identifier
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i32>()
                    .map(Self)
                    .map_err(|_| CoreError::validation(format!("Invalid {}'s id", $entity)))
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

define_id!(ProductId, "product");
define_id!(CustomerId, "customer");
define_id!(BillId, "bill");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_value() {
        assert_eq!(BillId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: ProductId = "17".parse().unwrap();
        assert_eq!(parsed, ProductId::new(17));
    }

    #[test]
    fn test_i32_conversion() {
        let id = CustomerId::from(9);
        let back: i32 = id.into();
        assert_eq!(back, 9);
    }
}
