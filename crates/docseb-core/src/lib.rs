//! docseb-core
//!
//! Pure domain types shared by the Docseb dashboard services: the PIN-gated
//! session context, typed parsing of chat and medical-record payloads, and
//! the assistant typing-reveal state machine. No I/O and no global clock;
//! callers pass the current time in.

pub mod error;
pub mod models;
pub mod session;
pub mod typing;
