/*!
 * # readaloud - Read rich text aloud through a voice assistant
 *
 * A Rust library that turns rich-text documents into SSML for a voice
 * assistant and shows analysis scores for spans of the text.
 *
 * ## Features
 *
 * - Convert documents or selections into SSML fragments:
 *   - Headers, emphasis, language, voice and pronunciation spans
 *   - Audio clips from the assistant's sound library
 * - Validate SSML fragments before they are spoken
 * - Drive a read-aloud session over a voice relay
 * - Read quality scores and suggestions from annotation documents
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Rich-text document model and selections
 * - `formats`: Custom editor formats and toolbar handlers
 * - `ssml`: SSML generation and validation:
 *   - `ssml::writer`: Run-by-run conversion
 *   - `ssml::validator`: Fragment validation
 * - `relay`: Voice relay transport and read-aloud session
 * - `skill`: The assistant's read intent
 * - `annotations`: Scored units and score cards
 * - `language_utils`: Language tag utilities
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod annotations;
pub mod app_config;
pub mod document;
pub mod errors;
pub mod formats;
pub mod language_utils;
pub mod relay;
pub mod skill;
pub mod ssml;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{Delta, Op, Range};
pub use errors::{AnnotationError, AppError, DocumentError, RelayError};
pub use relay::{ReadAloudSession, RelayState, RelayTransport};
pub use ssml::{SsmlValidator, SsmlWriter, ValidationReport, to_ssml};
