/*!
 * Tests for error types and conversions
 */

use readaloud::errors::{AnnotationError, AppError, DocumentError, RelayError};

#[test]
fn test_documentError_outOfBounds_shouldDisplayRange() {
    let error = DocumentError::OutOfBounds {
        index: 5,
        length: 3,
        document_length: 6,
    };
    let display = format!("{}", error);
    assert!(display.contains("5+3"));
    assert!(display.contains("length 6"));
}

#[test]
fn test_documentError_fromSerdeJson_shouldBeParseError() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: DocumentError = json_error.into();
    assert!(matches!(error, DocumentError::ParseError(_)));
    assert!(error.to_string().starts_with("Failed to parse document"));
}

#[test]
fn test_relayError_shouldDisplayCorrectly() {
    assert_eq!(RelayError::NotConnected.to_string(), "Relay is not connected");
    let display = RelayError::ConnectionError("Host unreachable".to_string()).to_string();
    assert!(display.contains("Connection error"));
    assert!(display.contains("Host unreachable"));
    assert!(RelayError::PlaybackFailed("x".to_string()).to_string().contains("Audio playback failed"));
}

#[test]
fn test_annotationError_missingAttribute_shouldNameTypeAndAttribute() {
    let error = AnnotationError::MissingAttribute {
        type_name: "Score".to_string(),
        attribute: "value".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("Score"));
    assert!(display.contains("'value'"));
}

#[test]
fn test_appError_fromLayerErrors_shouldWrapThem() {
    let app_error: AppError = DocumentError::EmptySelection("nothing".to_string()).into();
    assert!(matches!(app_error, AppError::Document(_)));
    assert!(app_error.to_string().contains("nothing"));

    let app_error: AppError = RelayError::NotConnected.into();
    assert!(matches!(app_error, AppError::Relay(_)));

    let app_error: AppError = AnnotationError::UnknownId("7".to_string()).into();
    assert!(matches!(app_error, AppError::Annotation(_)));
}

#[test]
fn test_appError_fromIoAndAnyhow_shouldKeepMessage() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(ref message) if message.contains("conf.json missing")));

    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(ref message) if message == "something odd"));
}
