use std::sync::Arc;

use log::{debug, warn};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::errors::RemoteError;

/// Reads the current session token, injected at construction time so the
/// gateway never reaches into process-wide mutable state. A logout racing
/// with an in-flight request may let that request go out with a stale
/// token; the server is the authority on token validity.
pub type TokenSource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// HTTP wrapper around the REST backend. Owns the base URL, attaches the
/// bearer token when one is available and normalizes every failure into
/// [`RemoteError`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token_source: TokenSource,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, token_source: TokenSource) -> Result<Self, RemoteError> {
        let base_url = Url::parse(base_url).map_err(RemoteError::construction)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token_source,
        })
    }

    /// A token source for unauthenticated clients.
    pub fn anonymous_token_source() -> TokenSource {
        Arc::new(|| None)
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(RemoteError::construction)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match (self.token_source)() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R, RemoteError> {
        let url = self.endpoint(path)?;
        debug!("GET {} {:?}", url, query);
        let request = self.authorize(self.http.get(url).query(query));
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, RemoteError> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let request = self.authorize(self.http.post(url).json(body));
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    pub async fn put_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, RemoteError> {
        let url = self.endpoint(path)?;
        debug!("PUT {}", url);
        let request = self.authorize(self.http.put(url).json(body));
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    /// DELETE; the body is discarded, only the status matters.
    pub async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        let url = self.endpoint(path)?;
        debug!("DELETE {}", url);
        let request = self.authorize(self.http.delete(url));
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request.send().await.map_err(normalize_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = error_from_body(status, &body);
        warn!("request failed: {}", err);
        Err(err)
    }

    async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, RemoteError> {
        let status = response.status();
        response.json().await.map_err(|e| RemoteError {
            status: status.as_u16(),
            message: format!("invalid response body: {e}"),
            server_errors: None,
        })
    }
}

/// Maps a transport-level [`reqwest::Error`] into the gateway taxonomy:
/// a request that never got a response is "unreachable" (status 0), a
/// request that could not be built carries its cause.
fn normalize_transport(err: reqwest::Error) -> RemoteError {
    if err.is_builder() {
        RemoteError::construction(err)
    } else {
        RemoteError::unreachable()
    }
}

/// Derives a display message from an error response body. Server payloads
/// expose `detail` or `message`; anything else falls back to the raw body
/// or the status line. The full JSON payload rides along as
/// `server_errors` for per-field display.
fn error_from_body(status: StatusCode, body: &str) -> RemoteError {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("server responded with status {}", status.as_u16()));
    RemoteError {
        status: status.as_u16(),
        message,
        server_errors: parsed,
    }
}
