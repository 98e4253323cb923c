//! Endpoints and the blocking HTTP transport.

use crate::error::ClientError;
use crate::http::{HttpResponse, read_http_response, write_http_get, write_http_request};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// A parsed `http://host[:port][/prefix]` service endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or address.
    pub host: String,
    /// TCP port (80 when omitted).
    pub port: u16,
    /// Path prefix without trailing `/` (may be empty).
    pub base_path: String,
}

impl Endpoint {
    /// Parse an endpoint URL. Only plain `http` is supported.
    pub fn parse(url: &str) -> Result<Self, ClientError> {
        let invalid = || ClientError::InvalidEndpoint(url.to_string());

        let rest = url.trim().strip_prefix("http://").ok_or_else(invalid)?;
        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        if authority.is_empty() {
            return Err(invalid());
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
            None => (authority, 80),
        };
        if host.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            host: host.to_string(),
            port,
            base_path: path.trim_end_matches('/').to_string(),
        })
    }

    /// The `Host` header value.
    pub fn authority(&self) -> String {
        if self.port == 80 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Join the base path with a request path (`/api/v1/debug`).
    pub fn path(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "http://{}{}", self.authority(), self.base_path)
    }
}

/// Client connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service base URL.
    pub endpoint: String,
    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read/write timeout in milliseconds.
    pub io_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: 5_000,
            io_timeout_ms: 60_000,
        }
    }
}

/// The service base URL used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Sends requests to a service and returns full responses.
pub trait HttpTransport {
    /// `POST` `body` to `path` (relative to the transport's endpoint).
    fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse, ClientError>;

    /// `GET` `path` (relative to the transport's endpoint).
    fn get(&self, path: &str) -> Result<HttpResponse, ClientError>;
}

/// Blocking HTTP/1.1 transport over a fresh `TcpStream` per request.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    endpoint: Endpoint,
    connect_timeout: Duration,
    io_timeout: Duration,
}

impl TcpTransport {
    /// Create a transport for `endpoint`.
    pub fn new(endpoint: Endpoint, connect_timeout: Duration, io_timeout: Duration) -> Self {
        Self {
            endpoint,
            connect_timeout,
            io_timeout,
        }
    }

    /// Create a transport from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(
            Endpoint::parse(&config.endpoint)?,
            Duration::from_millis(config.connect_timeout_ms),
            Duration::from_millis(config.io_timeout_ms),
        ))
    }

    /// The endpoint this transport talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn connect(&self) -> Result<TcpStream, ClientError> {
        let addrs = (self.endpoint.host.as_str(), self.endpoint.port).to_socket_addrs()?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(self.io_timeout))?;
                    stream.set_write_timeout(Some(self.io_timeout))?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }

        Err(last_err
            .unwrap_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no address for {}", self.endpoint.authority()),
                )
            })
            .into())
    }
}

impl HttpTransport for TcpTransport {
    fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse, ClientError> {
        let stream = self.connect()?;
        let full_path = self.endpoint.path(path);

        {
            let mut writer = BufWriter::new(&stream);
            write_http_request(&mut writer, &self.endpoint.authority(), &full_path, body)?;
        }

        let mut reader = BufReader::new(&stream);
        read_http_response(&mut reader)
    }

    fn get(&self, path: &str) -> Result<HttpResponse, ClientError> {
        let stream = self.connect()?;
        let full_path = self.endpoint.path(path);

        {
            let mut writer = BufWriter::new(&stream);
            write_http_get(&mut writer, &self.endpoint.authority(), &full_path)?;
        }

        let mut reader = BufReader::new(&stream);
        read_http_response(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint() {
        let endpoint = Endpoint::parse("http://localhost:8080").unwrap();
        assert_eq!(endpoint.host, "localhost");
        assert_eq!(endpoint.port, 8080);
        assert_eq!(endpoint.base_path, "");
        assert_eq!(endpoint.path("/api/v1/debug"), "/api/v1/debug");
        assert_eq!(endpoint.authority(), "localhost:8080");

        let endpoint = Endpoint::parse("http://example.com/backend/").unwrap();
        assert_eq!(endpoint.port, 80);
        assert_eq!(endpoint.authority(), "example.com");
        assert_eq!(endpoint.path("/api/v1/debug"), "/backend/api/v1/debug");
        assert_eq!(endpoint.to_string(), "http://example.com/backend");
    }

    #[test]
    fn test_parse_endpoint_rejects() {
        for url in ["https://x", "http://", "http://:80", "http://host:notaport", "localhost"] {
            assert!(
                matches!(Endpoint::parse(url), Err(ClientError::InvalidEndpoint(_))),
                "{url}"
            );
        }
    }
}
