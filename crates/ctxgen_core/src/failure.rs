use std::fmt;

pub const MISSING_FILE_PATH_MESSAGE: &str = "No file path received from server";

/// Why a generation request did not produce a usable reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The call itself could not complete (unreachable, aborted, timed out).
    Transport { detail: String },
    /// A reply arrived with a non-success status.
    Service { status: u16 },
    /// A success status arrived but the body could not be read.
    Malformed { detail: String },
    /// A newer submission replaced this request before it settled.
    Cancelled,
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::Transport { detail } => {
                write!(f, "Failed to reach the context service: {detail}")
            }
            RequestFailure::Service { status } => {
                write!(f, "Failed to generate context file (HTTP {status})")
            }
            RequestFailure::Malformed { detail } => {
                write!(f, "Unreadable response from the context service: {detail}")
            }
            RequestFailure::Cancelled => write!(f, "Request was superseded by a newer submission"),
        }
    }
}
