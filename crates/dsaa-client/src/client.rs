//! Debug/analysis service client.
//!
//! [`DebugClient`] performs blocking requests over any [`HttpTransport`]. [`DebugWorker`] moves
//! those requests off the caller's thread so the host can keep editing while a request is in
//! flight; outcomes are polled with [`DebugWorker::try_recv`] and applied with [`apply_outcome`].
//!
//! There is no cancellation and no retry: every submitted request produces exactly one outcome.

use crate::error::ClientError;
use crate::http::HttpResponse;
use crate::transport::{ClientConfig, HttpTransport, TcpTransport};
use crate::wire::{
    AnalysisReport, AnalyzeRequest, DebugRequest, HealthStatus, parse_analysis_report,
    parse_debug_response, parse_health_status,
};
use dsaa_core::{DebugReport, DebugSession};
use serde_json::Value;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

/// Path of the debug endpoint.
pub const DEBUG_PATH: &str = "/api/v1/debug";
/// Path of the analysis endpoint.
pub const ANALYZE_PATH: &str = "/api/v1/analyze";
/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/api/v1/health";

/// Blocking client for the debug/analysis service.
#[derive(Debug, Clone)]
pub struct DebugClient<T = TcpTransport> {
    transport: T,
}

impl DebugClient<TcpTransport> {
    /// Create a TCP-backed client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(TcpTransport::from_config(config)?))
    }
}

impl<T: HttpTransport> DebugClient<T> {
    /// Create a client over `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /api/v1/debug`.
    pub fn debug(&self, request: &DebugRequest) -> Result<DebugReport, ClientError> {
        let body = serde_json::to_value(request)?;
        let value = self.post(DEBUG_PATH, &body)?;
        Ok(parse_debug_response(&value))
    }

    /// `POST /api/v1/analyze`.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisReport, ClientError> {
        let body = serde_json::to_value(request)?;
        let value = self.post(ANALYZE_PATH, &body)?;
        Ok(parse_analysis_report(&value))
    }

    /// `GET /api/v1/health`.
    pub fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self.transport.get(HEALTH_PATH)?;
        Ok(parse_health_status(&Self::success_json(HEALTH_PATH, response)?))
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        let response = self.transport.post_json(path, body)?;
        Self::success_json(path, response)
    }

    fn success_json(path: &str, response: HttpResponse) -> Result<Value, ClientError> {
        if !response.is_success() {
            tracing::warn!(path, status = response.status, "service returned an error status");
            return Err(ClientError::Status(response.status));
        }
        response.json()
    }
}

/// The result of one submitted debug request.
#[derive(Debug)]
pub struct DebugOutcome {
    /// The id returned by [`DebugWorker::submit`].
    pub id: u64,
    /// Report or failure.
    pub result: Result<DebugReport, ClientError>,
}

/// Runs debug requests on background threads.
///
/// Each submission gets its own thread, so a slow request never delays a newer one. Outcomes
/// arrive in completion order.
pub struct DebugWorker<T = TcpTransport> {
    client: Arc<DebugClient<T>>,
    tx: mpsc::Sender<DebugOutcome>,
    rx: mpsc::Receiver<DebugOutcome>,
    next_id: u64,
}

impl<T> DebugWorker<T>
where
    T: HttpTransport + Send + Sync + 'static,
{
    /// Create a worker around `client`.
    pub fn new(client: DebugClient<T>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client: Arc::new(client),
            tx,
            rx,
            next_id: 1,
        }
    }

    /// Submit a request and return its id.
    pub fn submit(&mut self, request: DebugRequest) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tracing::info!(id, language = %request.language, "dispatching debug request");
        thread::spawn(move || {
            let result = client.debug(&request);
            if let Err(err) = &result {
                tracing::warn!(id, error = %err, "debug request failed");
            }
            // The receiver is gone only when the worker was dropped.
            let _ = tx.send(DebugOutcome { id, result });
        });
        id
    }

    /// Try to receive the next outcome without blocking.
    pub fn try_recv(&self) -> Option<DebugOutcome> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<DebugOutcome, ClientError> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            mpsc::RecvTimeoutError::Timeout => ClientError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timed out waiting for debug outcome",
            )),
            mpsc::RecvTimeoutError::Disconnected => ClientError::WorkerStopped,
        })
    }
}

/// Apply `outcome` to `session` (see [`DebugSession::finish_debug`]).
pub fn apply_outcome(session: &mut DebugSession, outcome: DebugOutcome, now: Instant) {
    session.finish_debug(outcome.result.map_err(|err| err.to_string()), now);
}
