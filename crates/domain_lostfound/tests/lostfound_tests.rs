//! Tests for the lost & found value types

use std::str::FromStr;

use core_kernel::{ItemId, UserId};

use domain_lostfound::item::{Category, ItemDraft, ItemStatus, ItemType, NewItem};
use domain_lostfound::claim::{ClaimDecision, ClaimDraft, ClaimStatus, NewClaim};
use domain_lostfound::user::{PasswordPolicy, Role, User};
use domain_lostfound::LostFoundError;
use validator::Validate;

// ============================================================================
// Item Tests
// ============================================================================

mod item_tests {
    use super::*;

    fn new_item(title: &str) -> NewItem {
        NewItem {
            title: title.to_string(),
            description: String::new(),
            category: Category::IdCards,
            item_type: ItemType::Found,
            location: None,
        }
    }

    #[test]
    fn test_draft_is_open_and_trimmed() {
        let reporter = UserId::new();
        let draft = ItemDraft::open(new_item("  Student ID  "), reporter);
        assert_eq!(draft.status, ItemStatus::Open);
        assert_eq!(draft.title, "Student ID");
        assert_eq!(draft.reported_by, reporter);
    }

    #[test]
    fn test_title_length_validated() {
        assert!(new_item("").validate().is_err());
        assert!(new_item(&"x".repeat(121)).validate().is_err());
        assert!(new_item("Student ID").validate().is_ok());
    }

    #[test]
    fn test_status_transitions() {
        assert!(ItemStatus::Open.can_transition_to(ItemStatus::Claimed));
        assert!(ItemStatus::Claimed.can_transition_to(ItemStatus::Claimed));
        assert!(!ItemStatus::Claimed.can_transition_to(ItemStatus::Open));
    }

    #[test]
    fn test_item_type_wire_names() {
        assert_eq!(ItemType::from_str("lost").unwrap(), ItemType::Lost);
        assert_eq!(ItemType::Found.label(), "Found");
        assert!(ItemType::from_str("stolen").is_err());
    }

    #[test]
    fn test_category_catalogue() {
        assert_eq!(Category::ALL.len(), 14);
        for category in Category::ALL {
            assert_eq!(Category::parse_lenient(category.as_str()), category);
        }
        assert_eq!(Category::parse_lenient("spaceship"), Category::Other);
    }

    #[test]
    fn test_new_item_json_shape() {
        let item: NewItem = serde_json::from_str(
            r#"{"title":"Umbrella","type":"lost","category":"unknown-thing"}"#,
        )
        .unwrap();
        assert_eq!(item.item_type, ItemType::Lost);
        assert_eq!(item.category, Category::Other);
        assert_eq!(item.description, "");
    }
}

// ============================================================================
// Claim Tests
// ============================================================================

mod claim_tests {
    use super::*;

    #[test]
    fn test_pending_draft_with_message() {
        let claimant = UserId::new();
        let draft = ClaimDraft::pending(
            ItemId::new(),
            NewClaim {
                details: Some("Black wallet, two cards inside".to_string()),
                message: Some("Lost it near the canteen".to_string()),
            },
            claimant,
        );
        assert_eq!(draft.status, ClaimStatus::Pending);
        assert_eq!(draft.messages.len(), 1);
        assert_eq!(draft.messages[0].sender_id, claimant);
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!(ClaimDecision::from_str("approved").unwrap(), ClaimDecision::Approved);
        assert_eq!(ClaimDecision::Rejected.target_status(), ClaimStatus::Rejected);
        assert!(ClaimDecision::from_str("maybe").is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ClaimStatus::Pending.is_terminal());
        assert!(ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
    }
}

// ============================================================================
// Password Policy Tests
// ============================================================================

mod password_tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: UserId::new(),
            identifier: "22CS041".to_string(),
            email: "asha@campus.edu".to_string(),
            role,
        }
    }

    #[test]
    fn test_default_passwords() {
        let policy = PasswordPolicy::default();
        assert!(policy.check(Some(user(Role::Student)), "Student@123").is_ok());
        assert!(policy.check(Some(user(Role::Faculty)), "Faculty@123").is_ok());
    }

    #[test]
    fn test_password_is_per_role() {
        let policy = PasswordPolicy::default();
        let err = policy.check(Some(user(Role::Student)), "Faculty@123").unwrap_err();
        assert!(matches!(err, LostFoundError::IncorrectPassword));
    }

    #[test]
    fn test_unknown_user() {
        let err = PasswordPolicy::default().check(None, "Student@123").unwrap_err();
        assert!(matches!(err, LostFoundError::InvalidCredentials));
    }
}
