//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion and display formatting
//! of the item, claim and user identifiers.

use core_kernel::{ClaimId, ItemId, UserId};
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

mod item_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ItemId::new();
        let id2 = ItemId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ItemId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ItemId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ItemId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ItemId::prefix(), "ITM");
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ItemId::new();
        let parsed: ItemId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ItemId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("ITM-keys".parse::<ItemId>().is_err());
        assert!("".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_many_ids_are_distinct() {
        let ids: HashSet<ItemId> = (0..1000).map(|_| ItemId::new_v7()).collect();
        assert_eq!(ids.len(), 1000);
    }
}

mod claim_and_user_id_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(ClaimId::prefix(), "CLM");
        assert_eq!(UserId::prefix(), "USR");
    }

    #[test]
    fn test_display_format() {
        assert!(ClaimId::new().to_string().starts_with("CLM-"));
        assert!(UserId::new().to_string().starts_with("USR-"));
    }

    #[test]
    fn test_foreign_prefix_is_not_stripped() {
        let item = ItemId::new();
        assert!(item.to_string().parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_json_round_trip_in_struct() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Doc {
            claimant_id: UserId,
        }

        let doc = Doc { claimant_id: UserId::new() };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["claimant_id"].as_str().unwrap().starts_with("USR-"));
        let back: Doc = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}

proptest! {
    #[test]
    fn prop_display_parse_round_trip(bytes in any::<[u8; 16]>()) {
        let id = ClaimId::from_uuid(Uuid::from_bytes(bytes));
        let parsed: ClaimId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
