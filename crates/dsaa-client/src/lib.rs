#![warn(missing_docs)]
//! `dsaa-client` - HTTP+JSON integration for `dsaa-core`.
//!
//! This crate talks to an external debug/analysis service:
//!
//! - `POST /api/v1/debug` with `{ code, language, errorMessage }`, answered by
//!   `{ issues, explanation, fixSuggestions }`
//! - `POST /api/v1/analyze` with `{ code, language }`, answered by a complexity report
//! - `GET /api/v1/health`, answered by `{ status, service, version }`
//!
//! It stays runtime-agnostic (no async runtime required): requests are blocking over
//! `std::net`, and [`DebugWorker`] moves them onto background threads.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod wire;

pub use client::{
    ANALYZE_PATH, DEBUG_PATH, DebugClient, DebugOutcome, DebugWorker, HEALTH_PATH, apply_outcome,
};
pub use error::ClientError;
pub use http::{
    HttpResponse, MAX_BODY_BYTES, read_http_response, write_http_get, write_http_request,
};
pub use transport::{ClientConfig, DEFAULT_ENDPOINT, Endpoint, HttpTransport, TcpTransport};
pub use wire::{
    AnalysisReport, AnalyzeRequest, DebugRequest, HealthStatus, parse_analysis_report,
    parse_debug_response, parse_health_status, parse_issue,
};
