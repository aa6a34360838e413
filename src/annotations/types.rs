/*!
 * Scored units and their scores, explanations and suggestions.
 */

use log::debug;
use serde::Serialize;

use super::{AnnotationDocument, FeatureStructure};
use crate::errors::AnnotationError;

/// Type name of scored units
pub const SCORED_UNIT_TYPE: &str = "ScoredUnit";

/// Why a score has its value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    /// What is explained
    pub key: String,
    /// Explained value, if any
    pub value: Option<String>,
    /// Annotation the explanation points to, if any
    pub reference: Option<FeatureStructure>,
}

impl Explanation {
    /// Read an explanation feature structure
    pub fn from_structure(
        document: &dyn AnnotationDocument,
        structure: &FeatureStructure,
    ) -> Result<Self, AnnotationError> {
        Ok(Self {
            key: structure.require_attribute("key")?.to_string(),
            value: structure.get_attribute("value").map(str::to_string),
            reference: lookup(document, structure.get_attribute("reference")),
        })
    }
}

/// A named quality score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    /// Score name
    pub name: String,
    /// Score value as written in the document
    pub value: String,
    /// Explanations of the value
    pub explanations: Vec<Explanation>,
}

impl Score {
    /// Read a score feature structure
    pub fn from_structure(
        document: &dyn AnnotationDocument,
        structure: &FeatureStructure,
    ) -> Result<Self, AnnotationError> {
        let explanations = read_array(document, structure, "explanations", Explanation::from_structure)?;
        Ok(Self {
            name: structure.require_attribute("name")?.to_string(),
            value: structure.require_attribute("value")?.to_string(),
            explanations,
        })
    }

    /// The value as a number, if it is one
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

/// A rewrite proposed for a unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Proposed text
    pub text: String,
    /// Scores of the proposed text
    pub scores: Vec<Score>,
}

impl Suggestion {
    /// Read a suggestion feature structure
    pub fn from_structure(
        document: &dyn AnnotationDocument,
        structure: &FeatureStructure,
    ) -> Result<Self, AnnotationError> {
        Ok(Self {
            text: structure.require_attribute("text")?.to_string(),
            scores: read_array(document, structure, "scores", Score::from_structure)?,
        })
    }
}

/// A span of the text with scores and suggestions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredUnit {
    /// Start offset in the text
    pub begin: usize,
    /// End offset in the text (exclusive)
    pub end: usize,
    /// The annotation being scored (sentence, paragraph, ...)
    pub unit: Option<FeatureStructure>,
    /// Scores of the unit
    pub scores: Vec<Score>,
    /// Proposed rewrites
    pub suggestions: Vec<Suggestion>,
}

impl ScoredUnit {
    /// Read a scored unit feature structure
    pub fn from_structure(
        document: &dyn AnnotationDocument,
        structure: &FeatureStructure,
    ) -> Result<Self, AnnotationError> {
        Ok(Self {
            begin: parse_offset(structure, "begin")?,
            end: parse_offset(structure, "end")?,
            unit: lookup(document, structure.get_attribute("unit")),
            scores: read_array(document, structure, "scores", Score::from_structure)?,
            suggestions: read_array(document, structure, "suggestions", Suggestion::from_structure)?,
        })
    }

    /// Whether the unit covers a text offset
    pub fn covers(&self, position: usize) -> bool {
        self.begin <= position && position < self.end
    }
}

/// All scored units of a document, in document order
pub fn get_scored_units(document: &dyn AnnotationDocument) -> Result<Vec<ScoredUnit>, AnnotationError> {
    let units = document
        .query_selector_all(SCORED_UNIT_TYPE)
        .into_iter()
        .map(|structure| ScoredUnit::from_structure(document, structure))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} scored units", units.len());
    Ok(units)
}

/// Scored units covering a text offset
pub fn units_at(units: &[ScoredUnit], position: usize) -> Vec<&ScoredUnit> {
    units.iter().filter(|unit| unit.covers(position)).collect()
}

fn read_array<T>(
    document: &dyn AnnotationDocument,
    structure: &FeatureStructure,
    attribute: &str,
    read: fn(&dyn AnnotationDocument, &FeatureStructure) -> Result<T, AnnotationError>,
) -> Result<Vec<T>, AnnotationError> {
    match structure.get_attribute(attribute) {
        Some(id) => document
            .fs_array_elements(id)?
            .into_iter()
            .map(|element| read(document, element))
            .collect(),
        None => Ok(Vec::new()),
    }
}

fn lookup(document: &dyn AnnotationDocument, id: Option<&str>) -> Option<FeatureStructure> {
    let id = id?;
    let found = document.query_id(id).cloned();
    if found.is_none() {
        debug!("Reference to unknown feature structure {}", id);
    }
    found
}

fn parse_offset(structure: &FeatureStructure, attribute: &str) -> Result<usize, AnnotationError> {
    let value = structure.require_attribute(attribute)?;
    value.trim().parse().map_err(|_| AnnotationError::InvalidAttribute {
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}
