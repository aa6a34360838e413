/*!
 * Integration tests for reading a document aloud end to end
 */

use anyhow::Result;

use readaloud::app_config::Config;
use readaloud::document::{Delta, Range};
use readaloud::formats::toolbar;
use readaloud::relay::{MockRelay, ReadAloudSession, RelayState};
use readaloud::skill::{ReadIntent, ResponseType, User};
use readaloud::ssml::AudioRewriter;
use crate::common;

/// Load a document, edit it through the toolbar, read it and answer the intent
#[tokio::test]
async fn test_readAloud_withEditedDocument_shouldSpeakFragment() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_delta(temp_dir.path(), "story.json")?;

    let mut config = Config::default();
    config.relay.prompt_delay_ms = 0;
    config.validate()?;
    let writer = config.ssml.writer()?;

    // Edit the document the way the toolbar buttons do
    let mut delta = Delta::from_file(&path)?;
    toolbar::apply_phoneme(&mut delta, Some(Range::new(0, 3)), "ðə")?;
    toolbar::insert_audio(&mut delta, Range::new(7, 0), "soundbank://soundlibrary/bell_01", writer.audio())?;

    // Read the first line through the relay
    let relay = MockRelay::working();
    let session = ReadAloudSession::new(relay.clone(), &config.relay);
    session.connect().await?;
    let ssml = toolbar::read_selection(&session, &writer, &delta, Some(Range::new(0, 9))).await?;
    assert_eq!(
        ssml,
        "<phoneme alphabet='ipa' ph='ðə'>The</phoneme> Cat\
         <audio src='soundbank://soundlibrary/bell_01'/><break time='1s'/>"
    );

    // The assistant starts listening and hears the prompt
    assert!(session.on_state(RelayState::Listening).await?);
    assert_eq!(relay.played_prompts(), vec![config.relay.prompt_clip.clone()]);

    // The skill pulls the fragment back
    let intent = ReadIntent::new(config.ssml.validator());
    let response = intent.handle(&User::linked("listener", &session));
    assert_eq!(response.response_type, ResponseType::Success);
    assert_eq!(response.speech(), format!("<speak>{}</speak>", ssml));
    assert!(session.last_report().unwrap().is_clean());

    // The assistant finishes speaking
    relay.set_state(RelayState::Idle);
    session.on_state(RelayState::Idle).await?;
    assert!(!session.read_button().disabled);
    Ok(())
}

/// An edited document survives saving and reloading
#[test]
fn test_document_afterEdits_shouldRoundTripThroughFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut delta = Delta::from_json(common::SAMPLE_DELTA)?;
    toolbar::insert_audio(&mut delta, Range::new(0, 0), "soundbank://soundlibrary/intro", AudioRewriter::default_ref())?;

    let path = common::create_test_file(temp_dir.path(), "edited.json", &delta.to_json()?)?;
    let reloaded = Delta::from_file(&path)?;

    assert_eq!(reloaded, delta);
    assert_eq!(reloaded.length(), 67);
    assert!(readaloud::to_ssml(&reloaded).starts_with("<audio src='soundbank://soundlibrary/intro'/>The Cat"));
    Ok(())
}

/// A hand-edited fragment with broken markup is refused by the skill
#[tokio::test]
async fn test_readAloud_withBrokenFragment_shouldReportBack() -> Result<()> {
    let relay = MockRelay::working();
    let session = ReadAloudSession::new(relay, &common::fast_relay_config());
    session.connect().await?;
    session.read("<emphasis>Hello".to_string()).await?;

    let response = ReadIntent::default().handle(&User::linked("listener", &session));
    assert_eq!(response.response_type, ResponseType::ErrorInvalidText);
    assert!(session.last_report().unwrap().contains_errors());
    Ok(())
}
