/*!
 * Core document model types for rich-text documents.
 *
 * A document is an ordered list of formatted runs in the editor's delta
 * format (`{"ops": [{"insert": ..., "attributes": {...}}]}`). These types
 * keep attribute values as raw JSON so that unknown formats survive a
 * load/save cycle untouched.
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::DocumentError;

/// Attribute name for block headers
pub const ATTR_HEADER: &str = "header";
/// Attribute name for bold text
pub const ATTR_BOLD: &str = "bold";
/// Attribute name for italic text
pub const ATTR_ITALIC: &str = "italic";
/// Attribute name for language spans
pub const ATTR_LANG: &str = "lang";
/// Attribute name for voice spans
pub const ATTR_VOICE: &str = "voice";
/// Attribute name for pronunciation spans
pub const ATTR_PHONEME: &str = "phoneme";

/// Embed key for audio clips
pub const EMBED_AUDIO: &str = "audio";

/// Complete rich-text document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    /// Formatted runs in document order
    #[serde(default)]
    pub ops: Vec<Op>,
}

impl Delta {
    /// Create a document from runs.
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    /// Parse a document from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DocumentError::ParseError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Total length in editor units (characters, embeds count as one).
    pub fn length(&self) -> usize {
        self.ops.iter().map(Op::length).sum()
    }

    /// Plain text content, embeds contribute nothing.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| op.insert.as_text())
            .collect()
    }

    /// Whether the document has no runs.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A single formatted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    /// Content of the run
    pub insert: Insert,

    /// Formats applied to the run
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Op {
    /// Create a plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Insert::Text(text.into()),
            attributes: Attributes::default(),
        }
    }

    /// Create an embed run.
    pub fn embed(embed: Embed) -> Self {
        Self {
            insert: Insert::Embed(embed),
            attributes: Attributes::default(),
        }
    }

    /// Add an attribute to this run.
    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.set(name, value.into());
        self
    }

    /// Length of this run in editor units.
    pub fn length(&self) -> usize {
        self.insert.length()
    }
}

/// Content of a run: text or an embedded object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    /// Plain text
    Text(String),
    /// Embedded object
    Embed(Embed),
}

impl Insert {
    /// Length in editor units.
    pub fn length(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Embed(_) => 1,
        }
    }

    /// The text content, if this is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Embed(_) => None,
        }
    }
}

/// Embedded object inside a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub enum Embed {
    /// An audio clip referenced by URL
    Audio(String),
    /// Any embed kind this library does not know, kept verbatim
    Other(Map<String, Value>),
}

impl Embed {
    /// Name of the embed kind (the single key of its JSON object).
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Audio(_) => Some(EMBED_AUDIO),
            Self::Other(map) => map.keys().next().map(String::as_str),
        }
    }
}

impl From<Map<String, Value>> for Embed {
    fn from(map: Map<String, Value>) -> Self {
        if let Some(Value::String(url)) = map.get(EMBED_AUDIO) {
            return Self::Audio(url.clone());
        }
        Self::Other(map)
    }
}

impl From<Embed> for Map<String, Value> {
    fn from(embed: Embed) -> Self {
        match embed {
            Embed::Audio(url) => {
                let mut map = Map::new();
                map.insert(EMBED_AUDIO.to_string(), Value::String(url));
                map
            }
            Embed::Other(map) => map,
        }
    }
}

/// Formats applied to a run, keyed by format name.
///
/// Values follow the editor's truthiness: `false`, `null`, `0` and `""`
/// mean the format is not applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    /// Whether no attribute is stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value of an attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Set an attribute; falsy values remove it.
    pub fn set(&mut self, name: &str, value: Value) {
        if is_truthy(&value) {
            self.0.insert(name.to_string(), value);
        } else {
            self.0.remove(name);
        }
    }

    /// Whether the attribute is present with a truthy value.
    pub fn is_set(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(is_truthy)
    }

    /// String value of a truthy attribute. Numbers are rendered as text.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Iterate over attribute names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Editor truthiness of an attribute value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
