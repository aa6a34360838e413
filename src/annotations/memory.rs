/*!
 * In-memory annotation document loaded from JSON.
 *
 * The JSON form lists feature structures in document order:
 * `{"featureStructures": [{"id": "1", "type": "ScoredUnit", "attributes": {...}}]}`.
 * Arrays are structures of type `FSArray` whose `elements` attribute holds
 * space-separated ids.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{AnnotationDocument, FeatureStructure};
use crate::errors::AnnotationError;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFile {
    #[serde(default)]
    feature_structures: Vec<FeatureStructure>,
}

/// Annotation document held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    structures: Vec<FeatureStructure>,
    by_id: HashMap<String, usize>,
}

impl MemoryDocument {
    /// Create a document from feature structures
    pub fn new(structures: Vec<FeatureStructure>) -> Result<Self, AnnotationError> {
        let mut by_id = HashMap::with_capacity(structures.len());
        for (index, structure) in structures.iter().enumerate() {
            if by_id.insert(structure.id.clone(), index).is_some() {
                return Err(AnnotationError::ParseError(format!(
                    "Duplicate feature structure id: {}",
                    structure.id
                )));
            }
        }
        debug!("Loaded annotation document with {} feature structures", structures.len());
        Ok(Self { structures, by_id })
    }

    /// Parse a document from JSON
    pub fn from_json(json: &str) -> Result<Self, AnnotationError> {
        let file: DocumentFile = serde_json::from_str(json)?;
        Self::new(file.feature_structures)
    }

    /// Load a document from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, AnnotationError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnnotationError::ParseError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Number of feature structures
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// Whether the document holds no feature structures
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

impl AnnotationDocument for MemoryDocument {
    fn query_selector_all(&self, type_name: &str) -> Vec<&FeatureStructure> {
        self.structures
            .iter()
            .filter(|structure| structure.type_name == type_name)
            .collect()
    }

    fn query_id(&self, id: &str) -> Option<&FeatureStructure> {
        self.by_id.get(id).map(|&index| &self.structures[index])
    }
}
