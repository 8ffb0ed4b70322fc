//! Tests for error module

use voyageline::error::{OptionExt, VoyageError};

#[test]
fn test_error_display() {
    let err = VoyageError::UnknownChokepoint {
        owner: "pattern uk -> mediterranean".to_string(),
        id: "suez".to_string(),
    };
    assert!(err.to_string().contains("suez"));
    assert!(err.to_string().contains("uk -> mediterranean"));
}

#[test]
fn test_option_ext() {
    let none: Option<i32> = None;
    let result = none.ok_or_unknown_chokepoint("barrier test", "nowhere");
    assert!(matches!(
        result,
        Err(VoyageError::UnknownChokepoint { ref id, .. }) if id == "nowhere"
    ));

    let some = Some(7).ok_or_unknown_chokepoint("barrier test", "nowhere");
    assert_eq!(some.unwrap(), 7);
}

#[test]
fn test_json_error_converts() {
    let err: VoyageError = serde_json::from_str::<Vec<u32>>("not json").unwrap_err().into();
    assert!(matches!(err, VoyageError::Json(_)));
}
