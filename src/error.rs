//! Error types for the lilt pipeline.
//!
//! The text and viseme cores never fail on ordinary input: malformed text
//! degrades to "no matches" and unmapped characters fall back to silence.
//! The fallible surface is the config file edge, plus the generic service
//! error the host uses to report failures from the collaborators around
//! this crate (chat completion, TTS, audio playback).

use std::fmt;

/// Which external collaborator a reported failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceDomain {
    /// Text-to-speech or speech-recognition service.
    Speech,
    /// Chat-completion (assistant reply) service.
    Ai,
    /// Audio decode/playback subsystem.
    Audio,
}

impl fmt::Display for ServiceDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speech => write!(f, "speech"),
            Self::Ai => write!(f, "ai"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// Broad classification of a reported service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// Transport-level failure (unreachable, timeout, bad status).
    Network,
    /// Credential or permission failure.
    Auth,
    /// Payload could not be decoded (audio bytes, response body).
    Decode,
    /// Anything else.
    Unknown,
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Auth => write!(f, "auth"),
            Self::Decode => write!(f, "decode"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Top-level error type for the lilt crate.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failure reported by an external collaborator, tagged with its
    /// domain and kind. The text/viseme cores never construct this
    /// themselves.
    #[error("{domain} service error ({kind}): {message}")]
    Service {
        /// Collaborator the failure came from.
        domain: ServiceDomain,
        /// Failure classification.
        kind: ServiceErrorKind,
        /// Human-readable description.
        message: String,
    },

    /// Configuration error (parse or serialize).
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Build a tagged service error on behalf of an external collaborator.
    pub fn service(
        domain: ServiceDomain,
        kind: ServiceErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::Service {
            domain,
            kind,
            message: message.into(),
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PipelineError>;
