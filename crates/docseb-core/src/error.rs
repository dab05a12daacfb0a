use thiserror::Error;

use crate::session::PIN_LENGTH;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("records endpoint answered without ok")]
    NotOk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("PIN must be exactly {} digits", PIN_LENGTH)]
    MalformedPin,

    #[error("incorrect PIN")]
    PinMismatch,
}
