/*!
 * Voice assistant side of reading aloud.
 *
 * When the assistant hears the read prompt it invokes the read intent. The
 * intent pulls the SSML fragment from the user's browser session, validates
 * it, reports the result back to the browser and answers with the fragment.
 */

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::relay::{ReadAloudSession, RelayTransport};
use crate::ssml::{SsmlValidator, ValidationReport, wrap_speak};

/// Response slot carrying the user's fragment
pub const RESPONSE_SLOT_USER_TEXT: &str = "userText";

/// Browser session reachable from the assistant
pub trait Browser: Send + Sync {
    /// The fragment currently selected for reading
    fn selection_now(&self) -> Option<String>;

    /// Deliver a validation report to the browser
    fn send(&self, report: &ValidationReport);
}

impl<T: RelayTransport> Browser for ReadAloudSession<T> {
    fn selection_now(&self) -> Option<String> {
        Some(self.ssml_to_read())
    }

    fn send(&self, report: &ValidationReport) {
        self.receive_report(report.clone());
    }
}

/// Assistant user issuing the request
pub struct User<'a> {
    /// User identifier
    pub id: String,
    /// Linked browser session, if any
    pub browser: Option<&'a dyn Browser>,
}

impl<'a> User<'a> {
    /// A user linked with a browser session
    pub fn linked(id: impl Into<String>, browser: &'a dyn Browser) -> Self {
        Self {
            id: id.into(),
            browser: Some(browser),
        }
    }

    /// A user without a browser session
    pub fn unlinked(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            browser: None,
        }
    }
}

/// Kinds of answers the read intent gives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseType {
    /// The fragment is read
    Success,
    /// The user has no browser session
    ErrorNotLinked,
    /// Nothing is selected
    ErrorNoText,
    /// The fragment is not valid SSML
    ErrorInvalidText,
}

impl ResponseType {
    /// Identifier of the response type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ErrorNotLinked => "errorNotLinked",
            Self::ErrorNoText => "errorNoText",
            Self::ErrorInvalidText => "errorInvalidText",
        }
    }
}

/// Answer of the read intent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentResponse {
    /// Kind of answer
    pub response_type: ResponseType,
    /// Values filled into the answer
    pub slot_values: BTreeMap<String, String>,
    /// Whether the conversation ends after this answer
    pub should_end_session: bool,
}

impl IntentResponse {
    fn new(response_type: ResponseType) -> Self {
        Self {
            response_type,
            slot_values: BTreeMap::new(),
            should_end_session: true,
        }
    }

    /// Speech markup of the answer
    pub fn speech(&self) -> String {
        match self.response_type {
            ResponseType::Success => wrap_speak(
                self.slot_values
                    .get(RESPONSE_SLOT_USER_TEXT)
                    .map(String::as_str)
                    .unwrap_or_default(),
            ),
            ResponseType::ErrorNotLinked => {
                wrap_speak("Please open the read aloud page in your browser and link it first.")
            }
            ResponseType::ErrorNoText => wrap_speak("There is no text to read."),
            ResponseType::ErrorInvalidText => {
                wrap_speak("Sorry, I cannot read this text. Please check the markup in your browser.")
            }
        }
    }
}

/// Intent reading the text selected in the browser
#[derive(Debug, Clone, Default)]
pub struct ReadIntent {
    validator: SsmlValidator,
}

impl ReadIntent {
    /// Name of the intent in the interaction model
    pub const NAME: &'static str = "read";

    /// Create the intent with a validator
    pub fn new(validator: SsmlValidator) -> Self {
        Self { validator }
    }

    /// The fragment validator
    pub fn validator(&self) -> &SsmlValidator {
        &self.validator
    }

    /// Answer a read request
    pub fn handle(&self, user: &User<'_>) -> IntentResponse {
        let Some(browser) = user.browser else {
            return IntentResponse::new(ResponseType::ErrorNotLinked);
        };

        let user_text = browser.selection_now().unwrap_or_default();
        debug!("Got selection from user {}: {}", user.id, user_text);
        if user_text.trim().is_empty() {
            return IntentResponse::new(ResponseType::ErrorNoText);
        }

        let report = self.validator.validate_fragment(&user_text);
        debug!("Validated selection of user {} with errors={}", user.id, report.contains_errors());
        for warning in &report.warnings {
            debug!("WARN for user {}: {}", user.id, warning);
        }
        for error in &report.errors {
            debug!("ERR  for user {}: {}", user.id, error);
        }
        browser.send(&report);
        debug!("Sent validation report back to user {}", user.id);

        if report.contains_errors() {
            return IntentResponse::new(ResponseType::ErrorInvalidText);
        }

        let mut response = IntentResponse::new(ResponseType::Success);
        response
            .slot_values
            .insert(RESPONSE_SLOT_USER_TEXT.to_string(), user_text);
        response
    }
}
