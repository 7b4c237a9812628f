use std::fmt;

use thiserror::Error;

/// Backend operations, named the way they appear on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Recognize,
    MarkAttendance,
    AllAttendance,
    StudentAttendance,
    Sessions,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Recognize => write!(f, "POST /recognize"),
            Endpoint::MarkAttendance => write!(f, "POST /mark_attendance"),
            Endpoint::AllAttendance => write!(f, "GET /attendance/all"),
            Endpoint::StudentAttendance => write!(f, "GET /attendance/{{id}}"),
            Endpoint::Sessions => write!(f, "GET /sessions"),
        }
    }
}

/// A failed call to the attendance backend.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint}: server responded with status {status}")]
    Status { endpoint: Endpoint, status: u16 },
    #[error("{endpoint}: malformed response body: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP request: {0}")]
    Client(#[source] reqwest::Error),
}

impl ServiceError {
    /// Transport failures and 5xx responses may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Transport { .. } => true,
            ServiceError::Status { status, .. } => *status >= 500,
            ServiceError::Decode { .. }
            | ServiceError::InvalidBaseUrl { .. }
            | ServiceError::Client(_) => false,
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            ServiceError::Transport { endpoint, .. }
            | ServiceError::Status { endpoint, .. }
            | ServiceError::Decode { endpoint, .. } => Some(*endpoint),
            ServiceError::InvalidBaseUrl { .. } | ServiceError::Client(_) => None,
        }
    }
}
