/*!
 * Tests for the document model and selections
 */

use serde_json::json;

use readaloud::document::{Delta, Embed, Insert, Op, Range};
use readaloud::errors::DocumentError;
use crate::common;

#[test]
fn test_delta_fromJson_withSample_shouldCountEditorUnits() {
    let delta = Delta::from_json(common::SAMPLE_DELTA).unwrap();

    assert_eq!(delta.ops.len(), 10);
    // The audio clip counts as one unit
    assert_eq!(delta.length(), 66);
    assert!(delta.text().starts_with("The Cat\nOnce upon a time"));
    assert!(!delta.text().contains("cloudfront"));
}

#[test]
fn test_delta_fromJson_withInvalidJson_shouldReturnParseError() {
    let result = Delta::from_json("{\"ops\": [");
    assert!(matches!(result, Err(DocumentError::ParseError(_))));
}

#[test]
fn test_delta_fromJson_withoutOps_shouldBeEmpty() {
    let delta = Delta::from_json("{}").unwrap();
    assert!(delta.is_empty());
    assert_eq!(delta.length(), 0);
}

#[test]
fn test_delta_fromFile_withMissingFile_shouldFail() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = Delta::from_file(&temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(DocumentError::ParseError(_))));
    Ok(())
}

#[test]
fn test_delta_toJson_shouldKeepUnknownAttributes() {
    let json = r##"{"ops":[{"insert":"x","attributes":{"color":"#ff0000","italic":true}}]}"##;
    let delta = Delta::from_json(json).unwrap();
    assert_eq!(delta.to_json().unwrap(), json);
}

#[test]
fn test_op_withAttribute_withFalsyValue_shouldNotStoreIt() {
    let op = Op::text("x")
        .with_attribute("bold", false)
        .with_attribute("header", 0)
        .with_attribute("lang", "");
    assert!(op.attributes.is_empty());
}

#[test]
fn test_attributes_text_withNumber_shouldRenderIt() {
    let op = Op::text("x").with_attribute("header", 2);
    assert!(op.attributes.is_set("header"));
    assert_eq!(op.attributes.text("header").as_deref(), Some("2"));
    assert_eq!(op.attributes.text("bold"), None);
}

#[test]
fn test_embed_kind_shouldNameTheEmbed() {
    assert_eq!(Embed::Audio("a".to_string()).kind(), Some("audio"));
    let other = json!({"video": "v.mp4"}).as_object().unwrap().clone();
    assert_eq!(Embed::Other(other).kind(), Some("video"));
}

#[test]
fn test_select_withRangeOverEmbed_shouldKeepEmbed() {
    let delta = Delta::new(vec![
        Op::text("ab"),
        Op::embed(Embed::Audio("https://a/b.mp3".to_string())),
        Op::text("cd"),
    ]);

    let selection = delta.select(Some(Range::new(1, 3)));
    assert_eq!(selection.ops.len(), 3);
    assert_eq!(selection.ops[0].insert.as_text(), Some("b"));
    assert!(matches!(selection.ops[1].insert, Insert::Embed(Embed::Audio(_))));
    assert_eq!(selection.ops[2].insert.as_text(), Some("c"));
    assert_eq!(selection.length(), 3);
}

#[test]
fn test_select_withRangePastEnd_shouldStopAtEnd() {
    let delta = Delta::new(vec![Op::text("Hello")]);
    let selection = delta.select(Some(Range::new(3, 10)));
    assert_eq!(selection.text(), "lo");
}

#[test]
fn test_range_end_shouldAddLength() {
    let range = Range::new(4, 3);
    assert_eq!(range.end(), 7);
    assert!(!range.is_collapsed());
    assert!(Range::new(4, 0).is_collapsed());
}

#[test]
fn test_formatRange_outOfBounds_shouldFail() {
    let mut delta = Delta::new(vec![Op::text("Hello")]);
    let result = delta.format_range(2, 10, "bold", json!(true));
    assert!(matches!(
        result,
        Err(DocumentError::OutOfBounds { index: 2, length: 10, document_length: 5 })
    ));
    // The document is untouched
    assert_eq!(delta.ops, vec![Op::text("Hello")]);
}

#[test]
fn test_formatRange_withCollapsedRange_shouldDoNothing() {
    let mut delta = Delta::new(vec![Op::text("Hello")]);
    delta.format_range(2, 0, "bold", json!(true)).unwrap();
    assert_eq!(delta.ops, vec![Op::text("Hello")]);
}

#[test]
fn test_compact_shouldMergeEqualRunsAndDropEmptyText() {
    let mut delta = Delta::new(vec![
        Op::text("a").with_attribute("italic", true),
        Op::text("b").with_attribute("italic", true),
        Op::text(""),
        Op::text("c"),
    ]);
    delta.compact();

    assert_eq!(delta.ops.len(), 2);
    assert_eq!(delta.ops[0].insert.as_text(), Some("ab"));
    assert_eq!(delta.ops[1].insert.as_text(), Some("c"));
}

#[test]
fn test_select_withRangePastUsizeMax_shouldNotPanic() {
    let delta = Delta::from_json(common::SAMPLE_DELTA).unwrap();
    let selection = delta.select(Some(Range::new(usize::MAX, 1)));
    assert!(selection.ops.is_empty());
    assert_eq!(selection.length(), 0);
}

#[test]
fn test_formatRange_withRangePastUsizeMax_shouldReportOutOfBounds() {
    let mut delta = Delta::from_json(common::SAMPLE_DELTA).unwrap();
    let result = delta.format_range(usize::MAX, 2, "bold", json!(true));
    assert!(matches!(
        result,
        Err(DocumentError::OutOfBounds { document_length: 66, .. })
    ));
}
