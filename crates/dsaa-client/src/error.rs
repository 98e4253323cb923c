use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while talking to a debug/analysis service.
pub enum ClientError {
    #[error("I/O error: {0}")]
    /// Socket or stream I/O failed (including timeouts).
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    /// A body could not be encoded or decoded as JSON.
    Json(#[from] serde_json::Error),

    #[error("HTTP {0}")]
    /// The service answered with a non-2xx status.
    Status(u16),

    #[error("invalid endpoint '{0}'")]
    /// The configured endpoint URL could not be parsed.
    InvalidEndpoint(String),

    #[error("malformed HTTP response: {0}")]
    /// The response did not follow HTTP/1.x framing.
    MalformedResponse(String),

    #[error("debug worker stopped")]
    /// The background worker is gone.
    WorkerStopped,
}
