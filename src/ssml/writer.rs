/*!
 * Conversion of formatted runs into an SSML fragment.
 *
 * Each run opens one tag per recognized attribute, in a fixed order, and
 * closes them in reverse order right after its content, so the fragment
 * stays well nested however many formats a run carries.
 */

use log::{debug, trace, warn};

use super::audio::AudioRewriter;
use super::escape::{escape_attribute, escape_text};
use super::voice::VoiceMap;
use crate::document::model::{
    ATTR_BOLD, ATTR_HEADER, ATTR_ITALIC, ATTR_LANG, ATTR_PHONEME, ATTR_VOICE,
};
use crate::document::{Delta, Embed, Insert, Op};
use crate::language_utils::validate_language_tag;

/// Default pause inserted at headers
pub const DEFAULT_HEADER_BREAK: &str = "1s";

/// Short spoken pause placed before strongly emphasized text
const STRONG_EMPHASIS_PAUSE: &str = " , ";

/// Default phonetic alphabet of pronunciation spans
pub const DEFAULT_PHONEME_ALPHABET: &str = "ipa";

/// Writer turning documents into SSML fragments.
#[derive(Debug, Clone)]
pub struct SsmlWriter {
    audio: AudioRewriter,
    voices: VoiceMap,
    header_break: String,
    phoneme_alphabet: String,
}

impl SsmlWriter {
    /// Create a writer.
    pub fn new(audio: AudioRewriter, voices: VoiceMap) -> Self {
        Self {
            audio,
            voices,
            header_break: DEFAULT_HEADER_BREAK.to_string(),
            phoneme_alphabet: DEFAULT_PHONEME_ALPHABET.to_string(),
        }
    }

    /// Set the pause duration inserted at headers (e.g. `1s`, `500ms`).
    pub fn with_header_break(mut self, duration: impl Into<String>) -> Self {
        self.header_break = duration.into();
        self
    }

    /// Set the phonetic alphabet declared on pronunciation spans.
    pub fn with_phoneme_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.phoneme_alphabet = alphabet.into();
        self
    }

    /// The voice map used for `voice` spans.
    pub fn voices(&self) -> &VoiceMap {
        &self.voices
    }

    /// The audio URL rewriter used for clips.
    pub fn audio(&self) -> &AudioRewriter {
        &self.audio
    }

    /// Render a whole document.
    pub fn render(&self, delta: &Delta) -> String {
        self.render_ops(&delta.ops)
    }

    /// Render a sequence of runs.
    pub fn render_ops(&self, ops: &[Op]) -> String {
        let mut fragment = String::new();
        for op in ops {
            self.write_op(&mut fragment, op);
        }
        debug!("Rendered {} runs into {} bytes of SSML", ops.len(), fragment.len());
        fragment
    }

    fn write_op(&self, fragment: &mut String, op: &Op) {
        let attributes = &op.attributes;
        let mut closing_tags: Vec<&'static str> = Vec::new();

        if attributes.is_set(ATTR_HEADER) {
            fragment.push_str(&format!("<break time='{}'/>", escape_attribute(&self.header_break)));
        } else if attributes.is_set(ATTR_BOLD) {
            fragment.push_str(STRONG_EMPHASIS_PAUSE);
            fragment.push_str("<emphasis>");
            closing_tags.push("</emphasis>");
        } else if attributes.is_set(ATTR_ITALIC) {
            fragment.push_str("<emphasis>");
            closing_tags.push("</emphasis>");
        }

        if let Some(lang) = attributes.text(ATTR_LANG) {
            if let Err(e) = validate_language_tag(&lang) {
                warn!("{}", e);
            }
            fragment.push_str(&format!("<lang xml:lang='{}'>", escape_attribute(&lang)));
            closing_tags.push("</lang>");
        }

        if let Some(identifier) = attributes.text(ATTR_VOICE) {
            let name = self.voices.resolve(&identifier);
            fragment.push_str(&format!("<voice name='{}'>", escape_attribute(name)));
            closing_tags.push("</voice>");
        }

        if let Some(phoneme) = attributes.text(ATTR_PHONEME) {
            fragment.push_str(&format!(
                "<phoneme alphabet='{}' ph='{}'>",
                escape_attribute(&self.phoneme_alphabet),
                escape_attribute(&phoneme)
            ));
            closing_tags.push("</phoneme>");
        }

        match &op.insert {
            Insert::Text(text) => fragment.push_str(&escape_text(text)),
            Insert::Embed(Embed::Audio(url)) if url.is_empty() => {
                debug!("Skipping audio clip without a source");
            }
            Insert::Embed(Embed::Audio(url)) => {
                let source = self.audio.to_library(url);
                trace!("Audio clip {} -> {}", url, source);
                fragment.push_str(&format!("<audio src='{}'/>", escape_attribute(&source)));
            }
            Insert::Embed(other) => {
                debug!("Skipping embed without speech form: {:?}", other.kind());
            }
        }

        for tag in closing_tags.iter().rev() {
            fragment.push_str(tag);
        }
    }
}

impl Default for SsmlWriter {
    fn default() -> Self {
        Self::new(AudioRewriter::default(), VoiceMap::default())
    }
}

/// Render a document with the default writer.
pub fn to_ssml(delta: &Delta) -> String {
    SsmlWriter::default().render(delta)
}

/// Wrap a fragment into a complete SSML document.
pub fn wrap_speak(fragment: &str) -> String {
    format!("<speak>{}</speak>", fragment)
}
