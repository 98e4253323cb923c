//! HTTP/1.1 framing helpers.
//!
//! Requests are single JSON bodies framed by `Content-Length` with `Connection: close`:
//!
//! ```text
//! POST /api/v1/debug HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Type: application/json\r\n
//! Content-Length: <n>\r\n
//! Connection: close\r\n
//! \r\n
//! <n bytes of UTF-8 JSON>
//! ```
//!
//! Response bodies are read by `Content-Length`, `Transfer-Encoding: chunked`, or until EOF.
//! Bodies larger than [`MAX_BODY_BYTES`] are rejected as malformed, whatever the framing.

use crate::error::ClientError;
use serde_json::Value;
use std::io::{self, BufRead, Read, Write};

/// Largest response body accepted from a service (16 MiB).
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code (e.g. `200`).
    pub status: u16,
    /// Header fields in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes (de-chunked).
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> Result<Value, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Write a single `POST` request with a JSON body to `writer`.
pub fn write_http_request<W: Write>(
    writer: &mut W,
    host: &str,
    path: &str,
    body: &Value,
) -> io::Result<()> {
    let body =
        serde_json::to_vec(body).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    write!(writer, "POST {path} HTTP/1.1\r\n")?;
    write!(writer, "Host: {host}\r\n")?;
    write!(writer, "Content-Type: application/json\r\n")?;
    write!(writer, "Accept: application/json\r\n")?;
    write!(writer, "Content-Length: {}\r\n", body.len())?;
    write!(writer, "Connection: close\r\n\r\n")?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Write a single bodiless `GET` request to `writer`.
pub fn write_http_get<W: Write>(writer: &mut W, host: &str, path: &str) -> io::Result<()> {
    write!(writer, "GET {path} HTTP/1.1\r\n")?;
    write!(writer, "Host: {host}\r\n")?;
    write!(writer, "Accept: application/json\r\n")?;
    write!(writer, "Connection: close\r\n\r\n")?;
    writer.flush()
}

/// Read a single HTTP response from `reader`.
pub fn read_http_response<R: BufRead>(reader: &mut R) -> Result<HttpResponse, ClientError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(ClientError::MalformedResponse(
            "connection closed before status line".to_string(),
        ));
    }
    let status = parse_status_line(line.trim_end_matches(['\r', '\n']))?;

    let mut headers = Vec::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(ClientError::MalformedResponse(
                "connection closed inside headers".to_string(),
            ));
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let mut response = HttpResponse {
        status,
        headers,
        body: Vec::new(),
    };

    let chunked = response
        .header("Transfer-Encoding")
        .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"));
    let content_length = response
        .header("Content-Length")
        .and_then(|value| value.parse::<usize>().ok());

    response.body = if chunked {
        read_chunked_body(reader)?
    } else if let Some(len) = content_length {
        check_body_len(len)?;
        let mut body = Vec::new();
        read_body_exact(reader, len, &mut body)?;
        body
    } else {
        let mut body = Vec::new();
        Read::take(&mut *reader, MAX_BODY_BYTES as u64 + 1).read_to_end(&mut body)?;
        check_body_len(body.len())?;
        body
    };

    Ok(response)
}

fn check_body_len(len: usize) -> Result<(), ClientError> {
    if len > MAX_BODY_BYTES {
        return Err(ClientError::MalformedResponse(format!(
            "body of {len} bytes exceeds the {MAX_BODY_BYTES} byte limit"
        )));
    }
    Ok(())
}

/// Append exactly `len` bytes from `reader` to `body`, growing only as data arrives.
fn read_body_exact<R: BufRead>(
    reader: &mut R,
    len: usize,
    body: &mut Vec<u8>,
) -> Result<(), ClientError> {
    let read = Read::take(&mut *reader, len as u64).read_to_end(body)?;
    if read < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("body ended after {read} of {len} bytes"),
        )
        .into());
    }
    Ok(())
}

fn parse_status_line(line: &str) -> Result<u16, ClientError> {
    let mut parts = line.split_whitespace();
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(ClientError::MalformedResponse(format!(
            "bad status line '{line}'"
        )));
    }
    parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| ClientError::MalformedResponse(format!("bad status line '{line}'")))
}

fn read_chunked_body<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, ClientError> {
    let mut body = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(ClientError::MalformedResponse(
                "connection closed inside chunked body".to_string(),
            ));
        }
        // Chunk extensions (`;name=value`) are ignored.
        let size_text = line
            .trim_end_matches(['\r', '\n'])
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        let size = usize::from_str_radix(size_text, 16).map_err(|_| {
            ClientError::MalformedResponse(format!("bad chunk size '{size_text}'"))
        })?;

        if size == 0 {
            // Trailer fields until the terminating empty line (or EOF).
            loop {
                line.clear();
                if reader.read_line(&mut line)? == 0 || line.trim_end_matches(['\r', '\n']).is_empty()
                {
                    return Ok(body);
                }
            }
        }

        let total = body.len().checked_add(size).ok_or_else(|| {
            ClientError::MalformedResponse(format!("chunk size '{size_text}' overflows"))
        })?;
        check_body_len(total)?;
        read_body_exact(reader, size, &mut body)?;

        line.clear();
        reader.read_line(&mut line)?;
    }
}
