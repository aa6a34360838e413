/*!
 * Read-aloud session over a relay transport.
 *
 * The session keeps the SSML fragment the assistant should read. Reading is
 * a two-step exchange: `read` stores the fragment and wakes the assistant;
 * once the assistant listens, the session plays the "read" prompt on the
 * outgoing track, the assistant invokes the read skill, and the skill pulls
 * the fragment back through `ssml_to_read`.
 */

use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Duration;
use uuid::Uuid;

use super::indicator::ReadButton;
use super::{RelayState, RelayTransport};
use crate::app_config::RelayConfig;
use crate::errors::RelayError;
use crate::ssml::ValidationReport;

/// Session binding the editor to a relay transport
#[derive(Debug)]
pub struct ReadAloudSession<T: RelayTransport> {
    id: String,
    transport: Arc<T>,
    ssml: Mutex<String>,
    last_report: Mutex<Option<ValidationReport>>,
    button: Mutex<ReadButton>,
    prompt_clip: String,
    prompt_delay: Duration,
}

impl<T: RelayTransport> ReadAloudSession<T> {
    /// Create a session over a transport
    pub fn new(transport: T, config: &RelayConfig) -> Self {
        Self::with_shared_transport(Arc::new(transport), config)
    }

    /// Create a session over a transport shared with other owners
    pub fn with_shared_transport(transport: Arc<T>, config: &RelayConfig) -> Self {
        let id = Uuid::new_v4().to_string();
        debug!("Created read-aloud session {}", &id[..8]);
        Self {
            id,
            transport,
            ssml: Mutex::new(String::new()),
            last_report: Mutex::new(None),
            button: Mutex::new(ReadButton::default()),
            prompt_clip: config.prompt_clip.clone(),
            prompt_delay: Duration::from_millis(config.prompt_delay_ms),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Connect the transport unless it is connected or connecting already
    ///
    /// # Returns
    /// * `Ok(true)` if a connection was established by this call
    pub async fn connect(&self) -> Result<bool, RelayError> {
        if self.transport.is_connected() || self.transport.is_connecting() {
            debug!("Session {} already connected", &self.id[..8]);
            return Ok(false);
        }
        self.transport.connect().await?;
        info!("Session {} connected to the relay", &self.id[..8]);
        Ok(true)
    }

    /// Store a fragment and ask the assistant to read it
    pub async fn read(&self, ssml: String) -> Result<(), RelayError> {
        debug!("Session {} queued {} bytes of SSML", &self.id[..8], ssml.len());
        *self.ssml.lock() = ssml;
        self.transport.talk().await
    }

    /// The fragment the assistant should read
    pub fn ssml_to_read(&self) -> String {
        self.ssml.lock().clone()
    }

    /// Validation report of the last fragment pulled by the skill
    pub fn last_report(&self) -> Option<ValidationReport> {
        self.last_report.lock().clone()
    }

    /// Store a validation report sent back by the skill
    pub fn receive_report(&self, report: ValidationReport) {
        for warning in &report.warnings {
            warn!("SSML warning: {}", warning);
        }
        *self.last_report.lock() = Some(report);
    }

    /// Current state of the read button
    pub fn read_button(&self) -> ReadButton {
        *self.button.lock()
    }

    /// React to a relay state change
    ///
    /// Updates the read button. When the assistant starts listening and is
    /// still listening after the prompt delay, the read prompt is played.
    ///
    /// # Returns
    /// * `Ok(true)` if the read prompt was played
    pub async fn on_state(&self, state: RelayState) -> Result<bool, RelayError> {
        let changed = self.button.lock().apply(state);
        if changed {
            debug!("Read button {} for state {}", if state.is_busy() { "disabled" } else { "enabled" }, state);
        }

        if state != RelayState::Listening {
            return Ok(false);
        }

        tokio::time::sleep(self.prompt_delay).await;
        if self.transport.state() != RelayState::Listening {
            debug!("Relay left listening state before the prompt");
            return Ok(false);
        }

        self.transport.play_prompt(&self.prompt_clip).await?;
        debug!("Played read prompt {}", self.prompt_clip);
        Ok(true)
    }
}
