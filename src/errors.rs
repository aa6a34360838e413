/*!
 * Error types for the readaloud library.
 *
 * This module contains custom error types for the different parts of the
 * library, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when loading or editing a rich-text document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document JSON could not be parsed
    #[error("Failed to parse document: {0}")]
    ParseError(String),

    /// A range or index lies outside the document
    #[error("Range {index}+{length} is outside the document (length {document_length})")]
    OutOfBounds {
        /// Start of the requested range
        index: usize,
        /// Length of the requested range
        length: usize,
        /// Length of the document
        document_length: usize,
    },

    /// An edit that requires a selection was attempted without one
    #[error("Empty selection: {0}")]
    EmptySelection(String),
}

/// Errors that can occur when talking to the voice relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The relay is not connected
    #[error("Relay is not connected")]
    NotConnected,

    /// The relay rejected or failed a request
    #[error("Relay request failed: {0}")]
    RequestFailed(String),

    /// Error while swapping the outgoing audio track
    #[error("Audio playback failed: {0}")]
    PlaybackFailed(String),
}

/// Errors that can occur when reading annotation documents
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// The annotation document could not be parsed
    #[error("Failed to parse annotation document: {0}")]
    ParseError(String),

    /// A feature structure lacks a required attribute
    #[error("Feature structure {type_name} is missing attribute '{attribute}'")]
    MissingAttribute {
        /// Type of the feature structure
        type_name: String,
        /// Name of the missing attribute
        attribute: String,
    },

    /// An attribute value has the wrong shape
    #[error("Invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute {
        /// Name of the attribute
        attribute: String,
        /// The offending value
        value: String,
    },

    /// A referenced id does not exist in the document
    #[error("Unknown feature structure id: {0}")]
    UnknownId(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the document layer
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from the relay
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// Error from the annotation layer
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}

impl From<serde_json::Error> for AnnotationError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}
