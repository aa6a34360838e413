/*!
 * Mock relay transport for testing.
 *
 * This module provides a transport that simulates different behaviors:
 * - `MockRelay::working()` - Connects, and every turn starts listening
 * - `MockRelay::failing()` - Every request fails with an error
 * - `MockRelay::slow_connect(ms)` - Stays connecting for a while
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{RelayState, RelayTransport};
use crate::errors::RelayError;

/// Behavior mode for the mock relay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an error
    Failing,
    /// Connecting takes the given time
    SlowConnect { delay_ms: u64 },
}

#[derive(Debug, Default)]
struct MockState {
    connected: bool,
    connecting: bool,
    state: RelayState,
    prompts: Vec<String>,
}

/// Mock relay recording the calls it receives
#[derive(Debug, Clone)]
pub struct MockRelay {
    behavior: MockBehavior,
    inner: Arc<Mutex<MockState>>,
    connect_count: Arc<AtomicUsize>,
    talk_count: Arc<AtomicUsize>,
}

impl MockRelay {
    /// Create a new mock relay with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            inner: Arc::new(Mutex::new(MockState {
                state: RelayState::Disconnected,
                ..MockState::default()
            })),
            connect_count: Arc::new(AtomicUsize::new(0)),
            talk_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock relay
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock relay
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock relay with a slow connection setup
    pub fn slow_connect(delay_ms: u64) -> Self {
        Self::new(MockBehavior::SlowConnect { delay_ms })
    }

    /// Force the conversation state, as the assistant would
    pub fn set_state(&self, state: RelayState) {
        self.inner.lock().state = state;
    }

    /// Number of connection attempts
    pub fn connect_count(&self) -> usize {
        self.connect_count.load(Ordering::SeqCst)
    }

    /// Number of conversation turns started
    pub fn talk_count(&self) -> usize {
        self.talk_count.load(Ordering::SeqCst)
    }

    /// Clips played on the outgoing track, in order
    pub fn played_prompts(&self) -> Vec<String> {
        self.inner.lock().prompts.clone()
    }
}

#[async_trait]
impl RelayTransport for MockRelay {
    fn is_connected(&self) -> bool {
        self.inner.lock().connected
    }

    fn is_connecting(&self) -> bool {
        self.inner.lock().connecting
    }

    fn state(&self) -> RelayState {
        self.inner.lock().state
    }

    async fn connect(&self) -> Result<(), RelayError> {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Failing => {
                Err(RelayError::ConnectionError("Mock relay refused the connection".to_string()))
            }
            MockBehavior::Working => {
                let mut inner = self.inner.lock();
                inner.connected = true;
                inner.state = RelayState::Idle;
                Ok(())
            }
            MockBehavior::SlowConnect { delay_ms } => {
                {
                    let mut inner = self.inner.lock();
                    inner.connecting = true;
                    inner.state = RelayState::Connecting;
                }
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                let mut inner = self.inner.lock();
                inner.connecting = false;
                inner.connected = true;
                inner.state = RelayState::Idle;
                Ok(())
            }
        }
    }

    async fn talk(&self) -> Result<(), RelayError> {
        self.talk_count.fetch_add(1, Ordering::SeqCst);
        if self.behavior == MockBehavior::Failing {
            return Err(RelayError::RequestFailed("Mock relay failed to talk".to_string()));
        }
        let mut inner = self.inner.lock();
        if !inner.connected {
            return Err(RelayError::NotConnected);
        }
        inner.state = RelayState::Listening;
        debug!("Mock relay is listening");
        Ok(())
    }

    async fn play_prompt(&self, clip: &str) -> Result<(), RelayError> {
        if self.behavior == MockBehavior::Failing {
            return Err(RelayError::PlaybackFailed(format!("Cannot play {}", clip)));
        }
        self.inner.lock().prompts.push(clip.to_string());
        Ok(())
    }
}
