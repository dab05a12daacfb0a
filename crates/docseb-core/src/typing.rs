//! Character-by-character reveal of an assistant reply.
//!
//! The caller owns the timer: it calls [`TypingReveal::tick`] every
//! [`TYPING_INTERVAL`] and drops the timer once the reveal is complete.
//! [`TypingReveal::cancel`] is the only way to stop early.

use std::time::Duration;

/// Characters revealed per tick.
pub const TYPING_STEP: usize = 2;

pub const TYPING_INTERVAL: Duration = Duration::from_millis(35);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypingState {
    #[default]
    Idle,
    /// Waiting for the reply.
    Thinking,
    /// `revealed` is a byte offset on a char boundary of `text`.
    Revealing { text: String, revealed: usize },
    Complete { text: String },
}

#[derive(Debug, Clone, Default)]
pub struct TypingReveal {
    state: TypingState,
}

impl TypingReveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TypingState {
        &self.state
    }

    /// A request went out; any previous reveal is discarded.
    pub fn begin(&mut self) {
        self.state = TypingState::Thinking;
    }

    /// The reply arrived. Blank replies complete immediately.
    pub fn receive(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state = if text.trim().is_empty() {
            TypingState::Complete { text }
        } else {
            TypingState::Revealing { text, revealed: 0 }
        };
    }

    /// Reveal the next [`TYPING_STEP`] characters and return the visible text.
    pub fn tick(&mut self) -> &str {
        let finished = match &mut self.state {
            TypingState::Revealing { text, revealed } => {
                let start = *revealed;
                *revealed = text[start..]
                    .char_indices()
                    .nth(TYPING_STEP)
                    .map(|(i, _)| start + i)
                    .unwrap_or(text.len());
                *revealed == text.len()
            }
            _ => false,
        };
        if finished {
            self.cancel();
        }
        self.visible()
    }

    /// Stop now: a pending reveal completes with the full text, a pending
    /// request goes back to idle.
    pub fn cancel(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            TypingState::Revealing { text, .. } => TypingState::Complete { text },
            TypingState::Thinking => TypingState::Idle,
            other => other,
        };
    }

    pub fn visible(&self) -> &str {
        match &self.state {
            TypingState::Idle | TypingState::Thinking => "",
            TypingState::Revealing { text, revealed } => &text[..*revealed],
            TypingState::Complete { text } => text,
        }
    }

    /// Whether the chat input should stay locked.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            TypingState::Thinking | TypingState::Revealing { .. }
        )
    }
}
