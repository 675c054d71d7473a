//! Domain-level error type for room membership operations.
//!
//! This error type is transport-agnostic. It is surfaced to clients through
//! the create/join acknowledgment payloads, never as a fatal error; the
//! client is expected to correct its request (or re-prompt for a credential)
//! and retry.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why a create/join request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum JoinError {
    RoomNotFound,
    RoomFull,
    GameInProgress,
    /// A privileged identity supplied the wrong shared secret.
    BadCredential,
    /// A privileged identity supplied no shared secret at all.
    CredentialRequired,
}

impl JoinError {
    /// Message surfaced to the client in the acknowledgment.
    pub fn message(&self) -> &'static str {
        match self {
            JoinError::RoomNotFound => "room not found",
            JoinError::RoomFull => "room is full",
            JoinError::GameInProgress => "game already in progress",
            JoinError::BadCredential => "incorrect credential",
            JoinError::CredentialRequired => "credential required",
        }
    }
}

impl Display for JoinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.message())
    }
}

impl Error for JoinError {}
