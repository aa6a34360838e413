/*!
 * Annotation documents with per-span scores and suggestions.
 *
 * Analysis results arrive as a UIMA-style document of feature structures.
 * This module reads them through the `AnnotationDocument` trait:
 * - `memory`: a JSON-backed in-memory document
 * - `types`: scored units, scores, explanations and suggestions
 * - `card`: the score card shown for a span in the editor
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::AnnotationError;

pub mod card;
pub mod memory;
pub mod types;

pub use card::ScoreCard;
pub use memory::MemoryDocument;
pub use types::{Explanation, Score, ScoredUnit, Suggestion, get_scored_units, units_at};

/// Type name of feature structure arrays
pub const FS_ARRAY_TYPE: &str = "FSArray";

/// Attribute of an array listing its element ids
pub const FS_ARRAY_ELEMENTS: &str = "elements";

/// A feature structure: a typed bag of string attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStructure {
    /// Document-wide identifier
    pub id: String,
    /// Type name (e.g. `ScoredUnit`)
    #[serde(rename = "type")]
    pub type_name: String,
    /// Attribute values
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl FeatureStructure {
    /// Value of an attribute
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Value of an attribute that must be present
    pub fn require_attribute(&self, name: &str) -> Result<&str, AnnotationError> {
        self.get_attribute(name)
            .ok_or_else(|| AnnotationError::MissingAttribute {
                type_name: self.type_name.clone(),
                attribute: name.to_string(),
            })
    }
}

/// Query layer over an annotation document
pub trait AnnotationDocument {
    /// All feature structures of a type, in document order
    fn query_selector_all(&self, type_name: &str) -> Vec<&FeatureStructure>;

    /// The feature structure with an id
    fn query_id(&self, id: &str) -> Option<&FeatureStructure>;

    /// Elements of the array with an id, in array order
    fn fs_array_elements(&self, id: &str) -> Result<Vec<&FeatureStructure>, AnnotationError> {
        let array = self
            .query_id(id)
            .ok_or_else(|| AnnotationError::UnknownId(id.to_string()))?;
        let elements = array.get_attribute(FS_ARRAY_ELEMENTS).unwrap_or_default();
        elements
            .split_whitespace()
            .map(|element| {
                self.query_id(element)
                    .ok_or_else(|| AnnotationError::UnknownId(element.to_string()))
            })
            .collect()
    }
}
