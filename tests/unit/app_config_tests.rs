/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;

use readaloud::app_config::{Config, LogLevel};
use readaloud::document::{Delta, Op};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.relay.endpoint, "wss://alexa2web.webis.de/rtc");
    assert_eq!(config.relay.skill_id, "amzn1.ask.skill.e5ca39f4-e30c-40c0-9359-fde12d85c2f2");
    assert_eq!(config.relay.prompt_clip, "audio/read.mp3");
    assert_eq!(config.relay.prompt_delay_ms, 100);

    assert_eq!(config.ssml.header_break, "1s");
    assert_eq!(config.ssml.phoneme_alphabet, "ipa");
    assert_eq!(config.ssml.default_voice, "Alexa");
    assert_eq!(config.ssml.voices.get("male").map(String::as_str), Some("Brian"));
    assert_eq!(config.ssml.audio.public_prefix, "https://d3qhmae9zx9eb.cloudfront.net");

    assert_eq!(config.editor.languages, vec!["fr-FR".to_string(), "de-DE".to_string()]);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Relay endpoints must be websockets
    config.relay.endpoint = "https://alexa2web.webis.de/rtc".to_string();
    assert!(config.validate().is_err());
    config.relay.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config = Config::default();

    config.relay.skill_id = " ".to_string();
    assert!(config.validate().is_err());
    config = Config::default();

    config.ssml.phoneme_alphabet = "arpabet".to_string();
    assert!(config.validate().is_err());
    config = Config::default();

    config.ssml.header_break = "soon".to_string();
    assert!(config.validate().is_err());
    config.ssml.header_break = "750ms".to_string();
    assert!(config.validate().is_ok());

    config.ssml.default_voice = String::new();
    assert!(config.validate().is_err());
    config = Config::default();

    config.ssml.audio.library_prefix = String::new();
    assert!(config.validate().is_err());
    config = Config::default();

    config.editor.languages.push("klingon".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.relay.endpoint, created.relay.endpoint);
    assert_eq!(loaded.ssml.voices, created.ssml.voices);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"log_level": "debug", "ssml": {"header_break": "2s"}}"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.ssml.header_break, "2s");
    assert_eq!(config.ssml.default_voice, "Alexa");
    assert_eq!(config.relay.prompt_delay_ms, 100);
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_ssmlConfig_writer_shouldApplySettings() -> Result<()> {
    let mut config = Config::default();
    config.ssml.header_break = "2s".to_string();
    config.ssml.voices.insert("female".to_string(), "Joanna".to_string());

    let writer = config.ssml.writer()?;
    let delta = Delta::new(vec![
        Op::text("T").with_attribute("header", 1),
        Op::text("x").with_attribute("voice", "female"),
    ]);
    assert_eq!(writer.render(&delta), "<break time='2s'/>T<voice name='Joanna'>x</voice>");

    let report = config.ssml.validator().validate_fragment("<voice name='Joanna'>x</voice>");
    assert!(report.is_clean());
    Ok(())
}
