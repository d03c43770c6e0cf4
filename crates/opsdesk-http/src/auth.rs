//! Login and logout.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use opsdesk_core::{AccessToken, Credentials, Result, SessionStore};

use crate::client::ApiClient;
use crate::envelope::{self, LOGIN, LOGOUT, LoginRequest};

/// The signed-in admin, as reported at login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user: Option<AdminProfile>,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct Login {
    pub token: AccessToken,
    pub user: Option<AdminProfile>,
}

impl ApiClient {
    /// Log in and begin a session in `store`.
    #[instrument(skip(self, store, credentials), fields(username = credentials.username()))]
    pub async fn login<S>(&self, store: &S, credentials: &Credentials) -> Result<Login>
    where
        S: SessionStore + ?Sized,
    {
        let body = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        let data = self.post_json(LOGIN, Some(&body)).await?;
        let response: LoginResponse = envelope::required(data)?;

        let token = AccessToken::new(response.token);
        store.begin(token.clone());
        info!("Logged in");

        Ok(Login {
            token,
            user: response.user,
        })
    }

    /// Log out and end the session in `store`.
    ///
    /// The local session ends even when the server call fails; the failure
    /// is still returned.
    #[instrument(skip(self, store))]
    pub async fn logout<S>(&self, store: &S) -> Result<()>
    where
        S: SessionStore + ?Sized,
    {
        let result = self.post_json::<()>(LOGOUT, None).await;
        store.end();

        match result {
            Ok(_) => {
                info!("Logged out");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Server-side logout failed; local session ended");
                Err(err)
            }
        }
    }
}
