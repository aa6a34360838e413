/*!
 * Mapping of editor voice identifiers to speech engine voice names.
 */

use log::warn;
use std::collections::BTreeMap;

/// Voice used when an identifier is not known
pub const DEFAULT_VOICE: &str = "Alexa";

/// Voice identifier to engine voice name lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceMap {
    voices: BTreeMap<String, String>,
    default_voice: String,
}

impl VoiceMap {
    /// Create a voice map.
    pub fn new(voices: BTreeMap<String, String>, default_voice: impl Into<String>) -> Self {
        Self {
            voices,
            default_voice: default_voice.into(),
        }
    }

    /// Engine voice name for an identifier.
    ///
    /// Unknown identifiers are logged and resolve to the default voice.
    pub fn resolve(&self, identifier: &str) -> &str {
        match self.voices.get(identifier) {
            Some(name) => name,
            None => {
                warn!("Unknown voice: {}", identifier);
                &self.default_voice
            }
        }
    }

    /// The fallback voice name.
    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// All engine voice names this map can produce.
    pub fn known_names(&self) -> impl Iterator<Item = &str> {
        self.voices
            .values()
            .map(String::as_str)
            .chain(std::iter::once(self.default_voice.as_str()))
    }
}

impl Default for VoiceMap {
    fn default() -> Self {
        let mut voices = BTreeMap::new();
        voices.insert("male".to_string(), "Brian".to_string());
        Self::new(voices, DEFAULT_VOICE)
    }
}
