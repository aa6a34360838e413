use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::ssml::{AudioRewriter, SsmlValidator, SsmlWriter, VoiceMap};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Voice relay connection settings
    #[serde(default)]
    pub relay: RelayConfig,

    /// SSML generation settings
    #[serde(default)]
    pub ssml: SsmlConfig,

    /// Editor toolbar settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Voice relay configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RelayConfig {
    /// Real-time relay endpoint
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,

    /// Identifier of the read-aloud skill
    #[serde(default = "default_skill_id")]
    pub skill_id: String,

    /// Endpoint the skill uses to reach the browser
    #[serde(default = "default_skill_endpoint")]
    pub skill_endpoint: String,

    /// Clip played on the outgoing track to invoke the skill
    #[serde(default = "default_prompt_clip")]
    pub prompt_clip: String,

    /// Delay before the prompt is played once the assistant listens
    #[serde(default = "default_prompt_delay_ms")]
    pub prompt_delay_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_relay_endpoint(),
            skill_id: default_skill_id(),
            skill_endpoint: default_skill_endpoint(),
            prompt_clip: default_prompt_clip(),
            prompt_delay_ms: default_prompt_delay_ms(),
        }
    }
}

/// Audio clip location settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AudioConfig {
    /// Public host prefix of sound library clips
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,

    /// Sound library scheme understood by the speech engine
    #[serde(default = "default_library_prefix")]
    pub library_prefix: String,

    /// File extension of public clips
    #[serde(default = "default_audio_extension")]
    pub extension: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            public_prefix: default_public_prefix(),
            library_prefix: default_library_prefix(),
            extension: default_audio_extension(),
        }
    }
}

/// SSML generation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SsmlConfig {
    /// Pause inserted at headers
    #[serde(default = "default_header_break")]
    pub header_break: String,

    /// Phonetic alphabet of pronunciation spans
    #[serde(default = "default_phoneme_alphabet")]
    pub phoneme_alphabet: String,

    /// Voice identifier to engine voice name
    #[serde(default = "default_voices")]
    pub voices: BTreeMap<String, String>,

    /// Voice used for unknown identifiers
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Audio clip locations
    #[serde(default)]
    pub audio: AudioConfig,
}

impl Default for SsmlConfig {
    fn default() -> Self {
        Self {
            header_break: default_header_break(),
            phoneme_alphabet: default_phoneme_alphabet(),
            voices: default_voices(),
            default_voice: default_voice(),
            audio: AudioConfig::default(),
        }
    }
}

impl SsmlConfig {
    /// Build the voice map
    pub fn voice_map(&self) -> VoiceMap {
        VoiceMap::new(self.voices.clone(), self.default_voice.clone())
    }

    /// Build the audio URL rewriter
    pub fn audio_rewriter(&self) -> Result<AudioRewriter> {
        AudioRewriter::new(&self.audio.public_prefix, &self.audio.library_prefix, &self.audio.extension)
            .context("Failed to build audio rewrite pattern")
    }

    /// Build the SSML writer
    pub fn writer(&self) -> Result<SsmlWriter> {
        Ok(SsmlWriter::new(self.audio_rewriter()?, self.voice_map())
            .with_header_break(self.header_break.clone())
            .with_phoneme_alphabet(self.phoneme_alphabet.clone()))
    }

    /// Build the fragment validator
    pub fn validator(&self) -> SsmlValidator {
        SsmlValidator::new(self.voice_map().known_names())
    }
}

/// Editor toolbar configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    /// Language tags offered by the language picker
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Voice identifiers offered by the voice picker
    #[serde(default = "default_voice_choices")]
    pub voices: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            voices: default_voice_choices(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_relay_endpoint() -> String {
    "wss://alexa2web.webis.de/rtc".to_string()
}

fn default_skill_id() -> String {
    "amzn1.ask.skill.e5ca39f4-e30c-40c0-9359-fde12d85c2f2".to_string()
}

fn default_skill_endpoint() -> String {
    "wss://readaloud.webis.de/alexa2web/".to_string()
}

fn default_prompt_clip() -> String {
    "audio/read.mp3".to_string()
}

fn default_prompt_delay_ms() -> u64 {
    100
}

fn default_public_prefix() -> String {
    crate::ssml::audio::DEFAULT_PUBLIC_PREFIX.to_string()
}

fn default_library_prefix() -> String {
    crate::ssml::audio::DEFAULT_LIBRARY_PREFIX.to_string()
}

fn default_audio_extension() -> String {
    crate::ssml::audio::DEFAULT_EXTENSION.to_string()
}

fn default_header_break() -> String {
    crate::ssml::writer::DEFAULT_HEADER_BREAK.to_string()
}

fn default_phoneme_alphabet() -> String {
    crate::ssml::writer::DEFAULT_PHONEME_ALPHABET.to_string()
}

fn default_voices() -> BTreeMap<String, String> {
    let mut voices = BTreeMap::new();
    voices.insert("male".to_string(), "Brian".to_string());
    voices
}

fn default_voice() -> String {
    crate::ssml::voice::DEFAULT_VOICE.to_string()
}

fn default_languages() -> Vec<String> {
    vec!["fr-FR".to_string(), "de-DE".to_string()]
}

fn default_voice_choices() -> Vec<String> {
    vec!["male".to_string()]
}

impl Config {
    /// Load the configuration from a file, creating a default one if absent
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate relay endpoints
        for endpoint in [&self.relay.endpoint, &self.relay.skill_endpoint] {
            let url = Url::parse(endpoint)
                .context(format!("Invalid relay endpoint: {}", endpoint))?;
            if url.scheme() != "wss" && url.scheme() != "ws" {
                return Err(anyhow!("Relay endpoint must use ws or wss: {}", endpoint));
            }
        }

        if self.relay.skill_id.trim().is_empty() {
            return Err(anyhow!("Skill id must not be empty"));
        }

        // Validate SSML settings
        if self.ssml.default_voice.trim().is_empty() {
            return Err(anyhow!("Default voice must not be empty"));
        }

        if !["ipa", "x-sampa"].contains(&self.ssml.phoneme_alphabet.as_str()) {
            return Err(anyhow!("Unsupported phonetic alphabet: {}", self.ssml.phoneme_alphabet));
        }

        let report = self.ssml.validator()
            .validate_fragment(&format!("<break time='{}'/>", self.ssml.header_break));
        if !report.is_clean() {
            return Err(anyhow!("Invalid header break duration: {}", self.ssml.header_break));
        }

        if self.ssml.audio.public_prefix.is_empty() || self.ssml.audio.library_prefix.is_empty() {
            return Err(anyhow!("Audio prefixes must not be empty"));
        }

        // Validate toolbar languages
        for language in &self.editor.languages {
            crate::language_utils::validate_language_tag(language)?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            relay: RelayConfig::default(),
            ssml: SsmlConfig::default(),
            editor: EditorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
