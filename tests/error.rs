//! Tests for error module

use tollmatch::TollMatchError;

#[test]
fn test_truncated_polyline_display() {
    let err = TollMatchError::TruncatedPolyline { index: 12 };
    assert!(err.to_string().contains("12"));
    assert!(err.to_string().contains("truncated"));
}

#[test]
fn test_invalid_char_display() {
    let err = TollMatchError::InvalidPolylineChar { byte: 0x20, index: 3 };
    assert!(err.to_string().contains("0x20"));
    assert!(err.to_string().contains('3'));
}

#[test]
fn test_invalid_pincode_display() {
    let err = TollMatchError::InvalidPincode {
        pincode: "41020".to_string(),
    };
    assert!(err.to_string().contains("41020"));
}

#[test]
fn test_missing_column_display() {
    let err = TollMatchError::MissingColumn { column: "latitude" };
    assert!(err.to_string().contains("latitude"));
}
