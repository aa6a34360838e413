/*!
 * Read button state.
 *
 * While the assistant is busy the read button is disabled and shows a
 * spinner; otherwise it is enabled and shows the speech bubble.
 */

use super::RelayState;

/// Icon shown on the read button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadIcon {
    /// Speech bubble, ready to read
    #[default]
    Speech,
    /// Spinning arrows, assistant busy
    Spinner,
}

impl ReadIcon {
    /// CSS classes of the icon element
    pub fn classes(&self) -> &'static [&'static str] {
        match self {
            Self::Speech => &["fa-comment-dots", "far"],
            Self::Spinner => &["fa-sync", "fa-spin", "fa"],
        }
    }
}

/// State of the read button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadButton {
    /// Whether the button rejects clicks
    pub disabled: bool,
    /// Icon currently shown
    pub icon: ReadIcon,
}

impl ReadButton {
    /// Update the button for a relay state; returns whether it changed
    pub fn apply(&mut self, state: RelayState) -> bool {
        let busy = state.is_busy();
        if busy == self.disabled {
            return false;
        }
        self.disabled = busy;
        self.icon = if busy { ReadIcon::Spinner } else { ReadIcon::Speech };
        true
    }
}
