//! In-process HTTP client over the application router.

use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

use super::FixtureError;
use crate::config::Settings;

/// Single `<jwt_header_name>: <jwt_header_type> <token>` entry.
///
/// Only built from a non-empty token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    name: HeaderName,
    value: HeaderValue,
    token: String,
}

impl AuthHeaders {
    /// Headers for `token` using the header name and type from `settings`.
    pub fn bearer(settings: &Settings, token: &str) -> Result<Self, FixtureError> {
        if token.is_empty() {
            return Err(FixtureError::MissingToken);
        }

        let name = HeaderName::from_bytes(settings.jwt_header_name.as_bytes())
            .map_err(FixtureError::http)?;
        let value = HeaderValue::from_str(&format!("{}{}", settings.bearer_prefix(), token))
            .map_err(FixtureError::http)?;

        Ok(Self {
            name,
            value,
            token: token.to_string(),
        })
    }

    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    /// The raw access token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Buffered response from [`TestClient`].
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    body: Bytes,
}

impl TestResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FixtureError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sends requests straight into the router without binding a socket.
#[derive(Clone)]
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub(crate) fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn get(
        &self,
        path: &str,
        headers: Option<&AuthHeaders>,
    ) -> Result<TestResponse, FixtureError> {
        let request = builder(Method::GET, path, headers)
            .body(Body::empty())
            .map_err(FixtureError::http)?;

        self.send(request).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: Option<&AuthHeaders>,
    ) -> Result<TestResponse, FixtureError> {
        let request = builder(Method::POST, path, headers)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body)?))
            .map_err(FixtureError::http)?;

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> Result<TestResponse, FixtureError> {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(FixtureError::http)?;

        tracing::debug!(%status, bytes = body.len(), "Test request completed");
        Ok(TestResponse { status, body })
    }
}

fn builder(method: Method, path: &str, headers: Option<&AuthHeaders>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(path);
    match headers {
        Some(auth) => builder.header(auth.name.clone(), auth.value.clone()),
        None => builder,
    }
}
