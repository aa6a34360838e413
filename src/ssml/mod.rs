/*!
 * SSML generation and validation.
 *
 * This module turns rich-text documents into fragments of the Speech
 * Synthesis Markup Language and checks fragments before they are spoken:
 * - `writer`: run-by-run conversion with stack-ordered closing tags
 * - `escape`: text and attribute escaping
 * - `audio`: clip URL rewriting between public and sound library forms
 * - `voice`: voice identifier resolution
 * - `validator`: fragment checks reported as warnings and errors
 */

pub mod audio;
pub mod escape;
pub mod validator;
pub mod voice;
pub mod writer;

// Re-export main types
pub use audio::AudioRewriter;
pub use validator::{SsmlValidator, ValidationReport};
pub use voice::VoiceMap;
pub use writer::{SsmlWriter, to_ssml, wrap_speak};
