/*!
 * Tests for annotation documents and scored units
 */

use readaloud::annotations::{
    AnnotationDocument, FeatureStructure, MemoryDocument, ScoreCard, get_scored_units, units_at,
};
use readaloud::errors::AnnotationError;
use crate::common;

fn sample() -> MemoryDocument {
    MemoryDocument::from_json(common::SAMPLE_ANNOTATIONS).unwrap()
}

#[test]
fn test_memoryDocument_fromJson_shouldIndexStructures() {
    let document = sample();
    assert_eq!(document.len(), 11);
    assert!(!document.is_empty());
    assert_eq!(document.query_id("14").unwrap().type_name, "Explanation");
    assert!(document.query_id("99").is_none());

    let units: Vec<_> = document
        .query_selector_all("ScoredUnit")
        .iter()
        .map(|fs| fs.id.as_str())
        .collect();
    assert_eq!(units, vec!["2", "3"]);
}

#[test]
fn test_memoryDocument_withDuplicateIds_shouldFail() {
    let structure = FeatureStructure {
        id: "1".to_string(),
        type_name: "Sentence".to_string(),
        attributes: Default::default(),
    };
    let result = MemoryDocument::new(vec![structure.clone(), structure]);
    assert!(matches!(result, Err(AnnotationError::ParseError(_))));
}

#[test]
fn test_fsArrayElements_shouldKeepArrayOrder() {
    let document = sample();
    let elements: Vec<_> = document
        .fs_array_elements("10")
        .unwrap()
        .iter()
        .map(|fs| fs.id.clone())
        .collect();
    assert_eq!(elements, vec!["11", "12"]);
    assert!(document.fs_array_elements("22").unwrap().is_empty());
    assert!(matches!(document.fs_array_elements("404"), Err(AnnotationError::UnknownId(_))));
}

#[test]
fn test_getScoredUnits_shouldReadNestedStructures() {
    let document = sample();
    let units = get_scored_units(&document).unwrap();
    assert_eq!(units.len(), 2);

    let first = &units[0];
    assert_eq!((first.begin, first.end), (0, 20));
    assert_eq!(first.unit.as_ref().unwrap().type_name, "Sentence");
    assert_eq!(first.scores.len(), 2);
    assert_eq!(first.scores[0].name, "readability");
    assert_eq!(first.scores[0].numeric_value(), Some(0.8));
    assert_eq!(first.scores[1].numeric_value(), None);

    let explanation = &first.scores[0].explanations[0];
    assert_eq!(explanation.key, "sentenceLength");
    assert_eq!(explanation.value.as_deref(), Some("20"));
    assert_eq!(explanation.reference.as_ref().unwrap().id, "1");

    assert_eq!(first.suggestions.len(), 1);
    assert_eq!(first.suggestions[0].text, "A shorter sentence.");
    assert!(first.suggestions[0].scores.is_empty());

    let second = &units[1];
    assert!(second.unit.is_none());
    assert!(second.scores.is_empty());
    assert!(second.suggestions.is_empty());
}

#[test]
fn test_getScoredUnits_withMissingBegin_shouldFail() {
    let document = MemoryDocument::from_json(
        r#"{"featureStructures":[{"id":"1","type":"ScoredUnit","attributes":{"end":"4"}}]}"#,
    )
    .unwrap();
    let result = get_scored_units(&document);
    assert!(matches!(
        result,
        Err(AnnotationError::MissingAttribute { ref attribute, .. }) if attribute == "begin"
    ));
}

#[test]
fn test_getScoredUnits_withInvalidOffset_shouldFail() {
    let document = MemoryDocument::from_json(
        r#"{"featureStructures":[{"id":"1","type":"ScoredUnit","attributes":{"begin":"x","end":"4"}}]}"#,
    )
    .unwrap();
    assert!(matches!(
        get_scored_units(&document),
        Err(AnnotationError::InvalidAttribute { .. })
    ));
}

#[test]
fn test_getScoredUnits_withDanglingUnitReference_shouldIgnoreIt() {
    let document = MemoryDocument::from_json(
        r#"{"featureStructures":[{"id":"1","type":"ScoredUnit","attributes":{"begin":"0","end":"4","unit":"77"}}]}"#,
    )
    .unwrap();
    let units = get_scored_units(&document).unwrap();
    assert!(units[0].unit.is_none());
}

#[test]
fn test_unitsAt_shouldUseHalfOpenRanges() {
    let units = get_scored_units(&sample()).unwrap();
    assert_eq!(units_at(&units, 0).len(), 1);
    assert_eq!(units_at(&units, 19).len(), 1);
    assert!(units_at(&units, 20).is_empty());
    assert_eq!(units_at(&units, 21)[0].begin, 21);
    assert!(units_at(&units, 40).is_empty());
}

#[test]
fn test_scoreCard_fromUnit_shouldListScoresAndSuggestions() {
    let units = get_scored_units(&sample()).unwrap();
    let card = ScoreCard::from_unit(&units[0]);

    assert_eq!(card.current_scores.get("readability").map(String::as_str), Some("0.8"));
    assert_eq!(card.current_scores.get("clarity").map(String::as_str), Some("high"));
    let names: Vec<_> = card.score_elements.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["readability", "clarity"]);
    assert_eq!(
        card.to_html(),
        "<div class=\"card-scoreElement score\" data-score-name=\"readability\">readability</div>\
         <div class=\"card-scoreElement score\" data-score-name=\"clarity\">clarity</div>\
         <ul class=\"list-group list-group-flush suggestions\">\
         <li class=\"list-group-item suggestion\">A shorter sentence.</li></ul>"
    );
}

#[test]
fn test_scoreCard_withoutScores_shouldRenderNothing() {
    let units = get_scored_units(&sample()).unwrap();
    let card = ScoreCard::from_unit(&units[1]);
    assert!(card.score_elements.is_empty());
    assert_eq!(card.to_html(), "");
}
