//! User-facing classification of failures.

use std::fmt;

use crate::error::{Error, NETWORK_ERROR, ValidationErrors};
use crate::resource::ResourceDescriptor;

/// Shown when a permission-gated resource answers 403 without a message.
pub const PERMISSION_DENIED: &str = "insufficient permission";

/// How a failed operation is presented.
///
/// Every controller operation converts its failures into one of these;
/// none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Field errors shown next to the offending inputs.
    Inline(ValidationErrors),
    /// A dismissable warning carrying the server's reason.
    Notice(String),
    /// The distinct permission-denied notice of gated resources.
    PermissionDenied(String),
    /// Transport failure or 5xx.
    NetworkError,
}

impl Feedback {
    pub fn from_error(err: &Error, descriptor: &ResourceDescriptor) -> Self {
        match err {
            Error::Validation(errors) => Feedback::Inline(errors.clone()),
            Error::Http(http) if http.status == 403 && descriptor.permission_gated => {
                Feedback::PermissionDenied(
                    http.message
                        .clone()
                        .unwrap_or_else(|| PERMISSION_DENIED.to_string()),
                )
            }
            Error::Http(http) if http.is_server_error() => Feedback::NetworkError,
            Error::Transport(_) => Feedback::NetworkError,
            Error::Http(_) | Error::Domain(_) | Error::InvalidInput(_) => {
                Feedback::Notice(err.user_message())
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            Feedback::Inline(errors) => errors.to_string(),
            Feedback::Notice(message) | Feedback::PermissionDenied(message) => message.clone(),
            Feedback::NetworkError => NETWORK_ERROR.to_string(),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
