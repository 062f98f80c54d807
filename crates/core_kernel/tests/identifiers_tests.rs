//! Unit tests for the identifier newtypes
//!
//! Tests cover creation, parsing, conversion and serde behaviour.

use core_kernel::{BillId, CoreError, CustomerId, ProductId};
use proptest::prelude::*;

mod bill_id_tests {
    use super::*;

    #[test]
    fn test_value_round_trips_through_new() {
        let id = BillId::new(7);
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: BillId = " 12 ".parse().unwrap();
        assert_eq!(id, BillId::new(12));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "abc".parse::<BillId>().unwrap_err();
        assert_eq!(err, CoreError::Validation("Invalid bill's id".to_string()));
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        assert!(BillId::new(1) < BillId::new(2));
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ProductId::new(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn test_deserializes_from_plain_integer() {
        let id: CustomerId = serde_json::from_str("31").unwrap();
        assert_eq!(id, CustomerId::new(31));
    }
}

proptest! {
    #[test]
    fn prop_display_parse_round_trip(raw in any::<i32>()) {
        let id = ProductId::new(raw);
        let parsed: ProductId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
