/*!
 * Custom editor formats.
 *
 * The editor knows four formats beyond its built-in ones: audio clips
 * (block embeds) and language, pronunciation and voice spans (inline). Each
 * is a `FormatKind` with the same three operations, looked up through one
 * dispatch table:
 * - `create`: build the element for a value
 * - `read`: recover the value from an element
 * - `format`: change the value of an existing element
 *
 * Submodules:
 * - `toolbar`: toolbar layout and the handlers behind its buttons
 */

use serde_json::Value;
use std::collections::BTreeMap;

use crate::document::{Embed, Insert, Op};
use crate::ssml::escape::escape_attribute;

pub mod toolbar;

pub use toolbar::{Toolbar, ToolbarItem};

/// How a format sits in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatScope {
    /// Embedded object occupying its own block
    BlockEmbed,
    /// Span of text
    Inline,
}

/// The custom formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Audio clip
    Audio,
    /// Language span
    Lang,
    /// Pronunciation span
    Phoneme,
    /// Voice span
    Voice,
}

/// Static description of a format
#[derive(Debug)]
pub struct FormatSpec {
    /// The format
    pub kind: FormatKind,
    /// Name used in documents and toolbar
    pub name: &'static str,
    /// Element tag name
    pub tag: &'static str,
    /// Element attribute holding the value
    pub value_attribute: &'static str,
    /// Placement in the document
    pub scope: FormatScope,
}

/// Dispatch table of all custom formats
pub static FORMATS: [FormatSpec; 4] = [
    FormatSpec {
        kind: FormatKind::Audio,
        name: "audio",
        tag: "audio",
        value_attribute: "src",
        scope: FormatScope::BlockEmbed,
    },
    FormatSpec {
        kind: FormatKind::Lang,
        name: "lang",
        tag: "lang",
        value_attribute: "lang",
        scope: FormatScope::Inline,
    },
    FormatSpec {
        kind: FormatKind::Phoneme,
        name: "phoneme",
        tag: "phoneme",
        value_attribute: "phoneme",
        scope: FormatScope::Inline,
    },
    FormatSpec {
        kind: FormatKind::Voice,
        name: "voice",
        tag: "voice",
        value_attribute: "name",
        scope: FormatScope::Inline,
    },
];

/// Outcome of a `format` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The value was set on the element
    Applied,
    /// Not handled here, the editor's generic formatting applies
    Delegate,
}

/// An editor element created by a format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatNode {
    /// Element tag name
    pub tag: &'static str,
    /// Element attributes
    pub attributes: BTreeMap<String, String>,
}

impl FormatNode {
    /// Value of an element attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Render the element as HTML wrapping the given (already escaped) inner HTML
    pub fn to_html(&self, inner: &str) -> String {
        let attributes: String = self
            .attributes
            .iter()
            .map(|(name, value)| format!(" {}=\"{}\"", name, escape_attribute(value)))
            .collect();
        format!("<{}{}>{}</{}>", self.tag, attributes, inner, self.tag)
    }
}

impl FormatKind {
    /// Look up a format by its name
    pub fn from_name(name: &str) -> Option<Self> {
        FORMATS.iter().find(|spec| spec.name == name).map(|spec| spec.kind)
    }

    /// Static description of this format
    pub fn spec(&self) -> &'static FormatSpec {
        match self {
            Self::Audio => &FORMATS[0],
            Self::Lang => &FORMATS[1],
            Self::Phoneme => &FORMATS[2],
            Self::Voice => &FORMATS[3],
        }
    }

    /// Name used in documents
    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Build the element for a value
    pub fn create(&self, value: &str) -> FormatNode {
        let spec = self.spec();
        let mut node = FormatNode {
            tag: spec.tag,
            attributes: BTreeMap::new(),
        };
        node.set_attribute(spec.value_attribute, value);
        if *self == Self::Audio {
            node.set_attribute("controls", "");
        }
        node
    }

    /// Recover the value from an element
    pub fn read(&self, node: &FormatNode) -> Option<String> {
        node.attribute(self.spec().value_attribute).map(str::to_string)
    }

    /// Change the value of an element
    ///
    /// Inline formats take a new non-empty value under their own name;
    /// everything else is delegated. Embeds never change in place.
    pub fn format(&self, node: &mut FormatNode, name: &str, value: Option<&str>) -> FormatOutcome {
        let spec = self.spec();
        match (spec.scope, value) {
            (FormatScope::Inline, Some(value)) if name == spec.name && !value.is_empty() => {
                node.set_attribute(spec.value_attribute, value);
                FormatOutcome::Applied
            }
            _ => FormatOutcome::Delegate,
        }
    }
}

/// Elements of the custom formats carried by a run, outermost first
pub fn nodes_for(op: &Op) -> Vec<(FormatKind, FormatNode)> {
    let mut nodes = Vec::new();
    if let Insert::Embed(Embed::Audio(url)) = &op.insert {
        nodes.push((FormatKind::Audio, FormatKind::Audio.create(url)));
    }
    for spec in FORMATS.iter().filter(|spec| spec.scope == FormatScope::Inline) {
        if let Some(value) = op.attributes.text(spec.name) {
            nodes.push((spec.kind, spec.kind.create(&value)));
        }
    }
    nodes
}

/// Document attribute value for a format value; empty values clear the format
pub fn attribute_value(value: Option<&str>) -> Value {
    match value {
        Some(value) if !value.is_empty() => Value::String(value.to_string()),
        _ => Value::Bool(false),
    }
}
