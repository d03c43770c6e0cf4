//! HTTP client for the backend's REST endpoints.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, trace, warn};

use opsdesk_core::error::{Error, HttpError, TransportError};
use opsdesk_core::resource::HttpVerb;
use opsdesk_core::{ApiUrl, SessionProvider};

use crate::envelope::{Envelope, ErrorBody, Message, SUCCESS};

/// HTTP client for the admin API.
///
/// Every call reads the bearer token from the session provider at send
/// time. A missing token is not checked here; the request goes out without
/// an `Authorization` header and the server answers 401.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api: ApiUrl,
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    /// Create a client for the API at `api`, authorizing with `session`.
    pub fn new(api: ApiUrl, session: Arc<dyn SessionProvider>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("opsdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Ok(Self { http, api, session })
    }

    /// Returns the API URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// Returns the envelope's `data`, or `None` when it carried none.
    #[instrument(skip(self, query, body), fields(api = %self.api))]
    pub async fn call<B>(
        &self,
        verb: HttpVerb,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
        accepted: &[i64],
    ) -> Result<Option<Value>, Error>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(verb, path, query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = send(verb, path, request).await?;
        self.handle_response(response, accepted).await
    }

    /// `GET` a file download. The body is returned as-is, not unwrapped.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, Error> {
        let request = self.request(HttpVerb::Get, path, &[]);
        let response = send(HttpVerb::Get, path, request).await?;

        if !response.status().is_success() {
            return Err(self.parse_error_response(response).await);
        }
        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!(bytes = bytes.len(), "Download complete");
        Ok(bytes.to_vec())
    }

    fn request(
        &self,
        verb: HttpVerb,
        path: &str,
        query: &[(String, String)],
    ) -> reqwest::RequestBuilder {
        let url = self.api.endpoint(path);
        debug!(method = verb.as_str(), %url, "API request");
        trace!(?query, "query parameters");

        let request = self.http.request(method(verb), &url).query(query);
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    /// `GET` returning `data`.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Option<Value>, Error> {
        self.call::<Value>(HttpVerb::Get, path, query, None, &[SUCCESS])
            .await
    }

    /// `POST` with an optional JSON body.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Value>, Error> {
        self.call(HttpVerb::Post, path, &[], body, &[SUCCESS]).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
        accepted: &[i64],
    ) -> Result<Option<Value>, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if !status.is_success() {
            return Err(self.parse_error_response(response).await);
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        if bytes.is_empty() {
            debug!(status = status.as_u16(), "Empty response body");
            return Ok(None);
        }

        let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = %e, "Malformed response envelope");
            Error::from(TransportError::Decode {
                message: e.to_string(),
            })
        })?;

        let code = envelope.code;
        envelope.into_data(accepted).inspect_err(|_| {
            debug!(code, "Request rejected by the server");
        })
    }

    /// Turn a non-2xx response into an [`HttpError`], logging it by class.
    ///
    /// 403 is left to the caller and never logged.
    async fn parse_error_response(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message.and_then(Message::into_text),
            Err(_) => None,
        };

        match status {
            403 => {}
            400..=499 => warn!(status, message = ?message, "API request rejected"),
            _ => error!(status, message = ?message, "API server error"),
        }

        HttpError::new(status, message).into()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api", &self.api.as_str())
            .finish_non_exhaustive()
    }
}

fn method(verb: HttpVerb) -> Method {
    match verb {
        HttpVerb::Get => Method::GET,
        HttpVerb::Post => Method::POST,
        HttpVerb::Put => Method::PUT,
        HttpVerb::Patch => Method::PATCH,
        HttpVerb::Delete => Method::DELETE,
    }
}

async fn send(
    verb: HttpVerb,
    path: &str,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, Error> {
    request.send().await.map_err(|e| {
        error!(method = verb.as_str(), path, error = %e, "API request failed");
        transport_error(e)
    })
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Client {
            message: err.to_string(),
        }
    };
    err.into()
}
