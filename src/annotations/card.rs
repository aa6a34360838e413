/*!
 * Score card shown in the editor for a scored span.
 *
 * The card lists one element per score and, when there are any, the
 * suggested rewrites.
 */

use serde::Serialize;
use std::collections::BTreeMap;

use super::types::ScoredUnit;
use crate::ssml::escape::escape_attribute;

/// One score entry on the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreElement {
    /// Score name, also the label
    pub name: String,
    /// CSS classes of the element
    pub classes: Vec<&'static str>,
}

/// Content of the card for one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    /// Text offsets the card belongs to
    pub begin: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Score values by name
    pub current_scores: BTreeMap<String, String>,
    /// Score entries in document order
    pub score_elements: Vec<ScoreElement>,
    /// Suggested rewrites in document order
    pub suggestions: Vec<String>,
}

impl ScoreCard {
    /// Build the card for a unit
    pub fn from_unit(unit: &ScoredUnit) -> Self {
        let mut current_scores = BTreeMap::new();
        let mut score_elements = Vec::with_capacity(unit.scores.len());
        for score in &unit.scores {
            current_scores.insert(score.name.clone(), score.value.clone());
            score_elements.push(ScoreElement {
                name: score.name.clone(),
                classes: vec!["card-scoreElement", "score"],
            });
        }

        Self {
            begin: unit.begin,
            end: unit.end,
            current_scores,
            score_elements,
            suggestions: unit.suggestions.iter().map(|s| s.text.clone()).collect(),
        }
    }

    /// Render the card body as HTML
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for element in &self.score_elements {
            html.push_str(&format!(
                "<div class=\"{}\" data-score-name=\"{}\">{}</div>",
                element.classes.join(" "),
                escape_attribute(&element.name),
                escape_attribute(&element.name)
            ));
        }

        if !self.suggestions.is_empty() {
            html.push_str("<ul class=\"list-group list-group-flush suggestions\">");
            for suggestion in &self.suggestions {
                html.push_str(&format!(
                    "<li class=\"list-group-item suggestion\">{}</li>",
                    escape_attribute(suggestion)
                ));
            }
            html.push_str("</ul>");
        }
        html
    }
}
