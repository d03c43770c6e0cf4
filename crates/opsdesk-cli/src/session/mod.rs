//! The signed-in session, persisted between invocations.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use opsdesk_core::{AccessToken, ApiUrl, MemorySession};
use opsdesk_http::ApiClient;

use storage::StoredSession;

/// Client and session for one invocation.
#[derive(Debug)]
pub struct App {
    pub client: ApiClient,
    pub session: Arc<MemorySession>,
    pub json: bool,
}

impl App {
    /// Connect to `api` with the session stored for it.
    ///
    /// A missing session is not an error; the server rejects calls that
    /// need one. A session stored for another API is left on disk and not
    /// sent.
    pub fn connect(api: &str, json: bool) -> Result<Self> {
        let api = ApiUrl::new(api).context("Invalid API URL")?;

        let stored = storage::load_session().context("Failed to load session")?;
        let session = match stored {
            Some(stored) if issued_by(&stored, &api) => {
                Arc::new(MemorySession::with_token(AccessToken::new(stored.token)))
            }
            Some(stored) => {
                warn!(
                    stored_api = stored.api.as_deref().unwrap_or("unknown"),
                    api = api.as_str(),
                    "Stored session belongs to another API; not sending its token"
                );
                Arc::new(MemorySession::new())
            }
            None => Arc::new(MemorySession::new()),
        };

        let client = ApiClient::new(api, session.clone()).context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            session,
            json,
        })
    }
}

/// Whether `stored` was issued by `api`.
fn issued_by(stored: &StoredSession, api: &ApiUrl) -> bool {
    stored
        .api
        .as_deref()
        .and_then(|s| ApiUrl::new(s).ok())
        .is_some_and(|stored_api| stored_api == *api)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(api: Option<&str>) -> StoredSession {
        StoredSession {
            token: "t".to_string(),
            api: api.map(str::to_string),
            username: None,
        }
    }

    #[test]
    fn token_only_goes_back_to_its_issuer() {
        let api = ApiUrl::new("https://ops.example.com").unwrap();
        assert!(issued_by(&stored(Some("https://ops.example.com")), &api));
        assert!(!issued_by(&stored(Some("https://other.example.com")), &api));
        assert!(!issued_by(&stored(None), &api));
    }
}
