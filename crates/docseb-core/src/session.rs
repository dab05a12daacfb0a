//! PIN gate and dashboard session lifetime.
//!
//! A session is only a start timestamp plus a lifetime. It is owned by
//! whoever holds it (the SPA, or a request handler that rebuilt it from
//! the client's copy) and every check takes `now` explicitly.

use jiff::{SignedDuration, Timestamp};

use crate::error::SessionError;

pub const PIN_LENGTH: usize = 6;

/// How long a dashboard session stays valid after the PIN is entered.
pub const DEFAULT_SESSION_DURATION: SignedDuration = SignedDuration::from_hours(7 * 24);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    started_at: Option<Timestamp>,
    duration: SignedDuration,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_DURATION)
    }
}

impl SessionContext {
    pub fn new(duration: SignedDuration) -> Self {
        Self {
            started_at: None,
            duration,
        }
    }

    /// Rebuild a session from a previously issued start time.
    pub fn resume(started_at: Timestamp, duration: SignedDuration) -> Self {
        Self {
            started_at: Some(started_at),
            duration,
        }
    }

    pub fn start(&mut self, now: Timestamp) {
        self.started_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.started_at = None;
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    /// Last instant at which the session is still valid.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.started_at
            .and_then(|started| started.checked_add(self.duration).ok())
    }

    /// Valid while no more than the session lifetime has elapsed since start.
    /// A start in the future is never valid.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        match self.started_at {
            Some(started) => started <= now && now.duration_since(started) <= self.duration,
            None => false,
        }
    }
}

/// Check a submitted PIN against the expected one.
pub fn verify_pin(input: &str, expected: &str) -> Result<(), SessionError> {
    if input.len() != PIN_LENGTH || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SessionError::MalformedPin);
    }
    if !constant_time_eq(input.as_bytes(), expected.as_bytes()) {
        return Err(SessionError::PinMismatch);
    }
    Ok(())
}

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Reduce pasted text to at most [`PIN_LENGTH`] digits.
pub fn sanitize_pin_input(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit())
        .take(PIN_LENGTH)
        .collect()
}
