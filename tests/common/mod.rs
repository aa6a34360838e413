/*!
 * Common test utilities for the readaloud test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use readaloud::app_config::RelayConfig;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Routes library logs to the test output
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Relay settings without the prompt delay
pub fn fast_relay_config() -> RelayConfig {
    RelayConfig {
        prompt_delay_ms: 0,
        ..RelayConfig::default()
    }
}

/// A short story using every format the editor offers
pub const SAMPLE_DELTA: &str = r#"{"ops":[
    {"insert":"The Cat"},
    {"insert":"\n","attributes":{"header":1}},
    {"insert":"Once upon a time a cat said "},
    {"insert":"bonjour","attributes":{"italic":true,"lang":"fr-FR"}},
    {"insert":" to a "},
    {"insert":"tomato","attributes":{"phoneme":"təˈmɑːtoʊ"}},
    {"insert":".\n"},
    {"insert":{"audio":"https://d3qhmae9zx9eb.cloudfront.net/animals/cat_meow_01.mp3"}},
    {"insert":"The end","attributes":{"bold":true,"voice":"male"}},
    {"insert":"\n"}
]}"#;

/// Creates the sample story as a file
pub fn create_test_delta(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_DELTA)
}

/// An analysis with two scored sentences, the first with scores and a suggestion
pub const SAMPLE_ANNOTATIONS: &str = r#"{"featureStructures":[
    {"id":"1","type":"Sentence","attributes":{"begin":"0","end":"20"}},
    {"id":"2","type":"ScoredUnit","attributes":{"begin":"0","end":"20","unit":"1","scores":"10","suggestions":"20"}},
    {"id":"3","type":"ScoredUnit","attributes":{"begin":"21","end":"40"}},
    {"id":"10","type":"FSArray","attributes":{"elements":"11 12"}},
    {"id":"11","type":"Score","attributes":{"name":"readability","value":"0.8","explanations":"13"}},
    {"id":"12","type":"Score","attributes":{"name":"clarity","value":"high"}},
    {"id":"13","type":"FSArray","attributes":{"elements":"14"}},
    {"id":"14","type":"Explanation","attributes":{"key":"sentenceLength","value":"20","reference":"1"}},
    {"id":"20","type":"FSArray","attributes":{"elements":"21"}},
    {"id":"21","type":"Suggestion","attributes":{"text":"A shorter sentence.","scores":"22"}},
    {"id":"22","type":"FSArray","attributes":{"elements":""}}
]}"#;

/// Creates the sample analysis as a file
pub fn create_test_annotations(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_ANNOTATIONS)
}
