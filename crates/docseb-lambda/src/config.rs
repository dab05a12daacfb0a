use std::env;

use axum::http::HeaderValue;
use jiff::SignedDuration;

use docseb_core::session::{sanitize_pin_input, DEFAULT_SESSION_DURATION, PIN_LENGTH};

/// Upper bound on `DOCSEB_SESSION_DAYS`.
const MAX_SESSION_DAYS: i64 = 365;

/// Service settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Dashboard PIN (`DOCSEB_PIN`, required).
    pub pin: String,
    /// Session lifetime (`DOCSEB_SESSION_DAYS`, default 7).
    pub session_duration: SignedDuration,
    /// Single allowed CORS origin (`DOCSEB_ALLOWED_ORIGIN`); any origin when unset or `*`.
    pub allowed_origin: Option<HeaderValue>,
}

impl ServiceConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let pin = lookup("DOCSEB_PIN").ok_or_else(|| eyre::eyre!("DOCSEB_PIN is not set"))?;
        if pin.len() != PIN_LENGTH || sanitize_pin_input(&pin) != pin {
            return Err(eyre::eyre!("DOCSEB_PIN must be exactly {PIN_LENGTH} digits"));
        }

        let session_duration = match lookup("DOCSEB_SESSION_DAYS") {
            Some(raw) => {
                let days: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| eyre::eyre!("DOCSEB_SESSION_DAYS={raw}: {e}"))?;
                if !(1..=MAX_SESSION_DAYS).contains(&days) {
                    return Err(eyre::eyre!(
                        "DOCSEB_SESSION_DAYS must be between 1 and {MAX_SESSION_DAYS}, got {days}"
                    ));
                }
                SignedDuration::from_hours(days * 24)
            }
            None => DEFAULT_SESSION_DURATION,
        };

        let allowed_origin = match lookup("DOCSEB_ALLOWED_ORIGIN") {
            Some(origin) if !origin.trim().is_empty() && origin.trim() != "*" => Some(
                HeaderValue::from_str(origin.trim())
                    .map_err(|e| eyre::eyre!("DOCSEB_ALLOWED_ORIGIN={origin}: {e}"))?,
            ),
            _ => None,
        };

        Ok(Self {
            pin,
            session_duration,
            allowed_origin,
        })
    }
}
