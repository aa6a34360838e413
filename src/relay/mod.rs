/*!
 * Voice relay integration.
 *
 * The relay connects the browser to the voice assistant. The transport
 * itself (signalling, audio tracks) is provided by implementations of
 * `RelayTransport`; this module owns the read-aloud session on top of it:
 * - `session`: pending SSML, connect lifecycle and the read prompt
 * - `indicator`: the read button state driven by relay states
 * - `mock`: an in-memory transport for tests and offline use
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use crate::errors::RelayError;

pub mod indicator;
pub mod mock;
pub mod session;

pub use indicator::{ReadButton, ReadIcon};
pub use mock::{MockBehavior, MockRelay};
pub use session::ReadAloudSession;

/// Conversation state reported by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayState {
    /// Connected and waiting
    #[default]
    Idle,
    /// Connection in progress
    Connecting,
    /// The assistant listens to the outgoing audio
    Listening,
    /// The assistant is invoking a skill
    Invoking,
    /// The assistant is processing a request
    Thinking,
    /// The assistant is speaking
    Speaking,
    /// The assistant expects an answer
    Expecting,
    /// Not connected
    Disconnected,
}

impl RelayState {
    /// Whether the assistant is in a conversation turn
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Listening | Self::Invoking | Self::Thinking | Self::Speaking | Self::Expecting
        )
    }

    /// Lowercase state identifier as sent by the relay
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Listening => "listening",
            Self::Invoking => "invoking",
            Self::Thinking => "thinking",
            Self::Speaking => "speaking",
            Self::Expecting => "expecting",
            Self::Disconnected => "disconnected",
        }
    }
}

impl Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelayState {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "connecting" => Ok(Self::Connecting),
            "listening" => Ok(Self::Listening),
            "invoking" => Ok(Self::Invoking),
            "thinking" => Ok(Self::Thinking),
            "speaking" => Ok(Self::Speaking),
            "expecting" => Ok(Self::Expecting),
            "disconnected" => Ok(Self::Disconnected),
            _ => Err(RelayError::RequestFailed(format!("Unknown relay state: {}", s))),
        }
    }
}

/// Transport to the voice relay
///
/// Implementations wrap the real-time connection to the assistant. The
/// session only needs to know whether the connection is up, to start a
/// conversation turn, and to play a short clip on the outgoing audio track.
#[async_trait]
pub trait RelayTransport: Send + Sync + Debug {
    /// Whether the connection is established
    fn is_connected(&self) -> bool;

    /// Whether a connection attempt is in progress
    fn is_connecting(&self) -> bool;

    /// Current conversation state
    fn state(&self) -> RelayState;

    /// Establish the connection
    async fn connect(&self) -> Result<(), RelayError>;

    /// Start a conversation turn (wake the assistant)
    async fn talk(&self) -> Result<(), RelayError>;

    /// Play a clip on the outgoing audio track, then restore the microphone
    ///
    /// # Arguments
    /// * `clip` - Path or URL of the clip to play
    async fn play_prompt(&self, clip: &str) -> Result<(), RelayError>;
}
