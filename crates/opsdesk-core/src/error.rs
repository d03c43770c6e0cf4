//! Error types for the opsdesk client.
//!
//! One unified error type with explicit variants for transport failures,
//! HTTP-level rejections, domain-level rejections carried in the response
//! envelope, client-side validation, and malformed input.

use std::fmt;
use thiserror::Error;

/// Message shown to the user when the server gives no reason of its own.
pub const NETWORK_ERROR: &str = "network error";

/// The unified error type for opsdesk operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx HTTP responses.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// 2xx responses whose envelope `code` signals failure.
    #[error("request rejected: {0}")]
    Domain(#[from] DomainError),

    /// Client-side form validation failures. These never reach the network.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Malformed input (bad URL, unknown filter key, unsupported operation).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// The human-readable failure reason.
    ///
    /// Prefers the server-provided message and falls back to
    /// [`NETWORK_ERROR`] when the server gave none.
    pub fn user_message(&self) -> String {
        match self {
            Error::Transport(_) => NETWORK_ERROR.to_string(),
            Error::Http(err) => err
                .message
                .clone()
                .unwrap_or_else(|| NETWORK_ERROR.to_string()),
            Error::Domain(err) => err
                .message
                .clone()
                .unwrap_or_else(|| format!("request failed (code {})", err.code)),
            Error::Validation(errors) => errors.to_string(),
            Error::InvalidInput(err) => err.to_string(),
        }
    }

    /// The HTTP status code, if the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(err) => Some(err.status),
            _ => None,
        }
    }

    /// True for HTTP 403 responses.
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// True when the server rejected the credential (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out in the underlying transport.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be decoded.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Generic HTTP client error.
    #[error("HTTP client error: {message}")]
    Client { message: String },
}

/// A non-2xx HTTP response.
#[derive(Debug)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the response envelope, if the server sent one.
    pub message: Option<String>,
}

impl HttpError {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// 4xx responses other than 403.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status) && self.status != 403
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// A 2xx response whose envelope reports a non-success code.
#[derive(Debug)]
pub struct DomainError {
    /// Envelope `code`.
    pub code: i64,
    /// Envelope `message`.
    pub message: Option<String>,
}

impl DomainError {
    pub fn new(code: i64, message: Option<String>) -> Self {
        Self { code, message }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}", self.code)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for DomainError {}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending form field.
    pub field: &'static str,
    /// What is wrong with it.
    pub reason: String,
}

/// The collected field errors of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn add(&mut self, field: &'static str, reason: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// The first failure recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.reason.as_str())
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Filter key the resource does not recognize.
    #[error("unknown filter '{key}' for {resource}")]
    UnknownFilter { resource: &'static str, key: String },

    /// Filter value of the wrong kind.
    #[error("invalid value '{value}' for filter '{key}': expected {expected}")]
    FilterValue {
        key: String,
        value: String,
        expected: String,
    },

    /// Operation the resource does not support.
    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    /// Field name the resource's form does not have.
    #[error("unknown field '{field}' for {resource}")]
    UnknownField { resource: &'static str, field: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}
