//! Tests for core_kernel error types

use core_kernel::{ClaimId, CoreError, ItemId};

#[test]
fn test_malformed_id_is_invalid_identifier() {
    let error = "ITM-not-a-uuid".parse::<ItemId>().unwrap_err();

    assert!(matches!(error, CoreError::InvalidIdentifier(_)));
    assert!(error.to_string().starts_with("Invalid identifier"));
}

#[test]
fn test_foreign_prefix_is_invalid_identifier() {
    let item = ItemId::new().to_string();
    assert!(matches!(
        item.parse::<ClaimId>(),
        Err(CoreError::InvalidIdentifier(_))
    ));
}

#[test]
fn test_validation_message_is_kept() {
    let error = CoreError::validation("Unknown category: umbrellas");

    match &error {
        CoreError::Validation(msg) => assert_eq!(msg, "Unknown category: umbrellas"),
        other => panic!("expected Validation, got {:?}", other),
    }
    assert_eq!(error.to_string(), "Validation error: Unknown category: umbrellas");
}

#[test]
fn test_id_deserialize_error_names_identifier() {
    let error = serde_json::from_str::<ItemId>("\"ITM-123\"").unwrap_err();
    assert!(error.to_string().contains("Invalid identifier"));
}
