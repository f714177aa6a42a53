// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! reqwest-based [`HttpClient`].

use crate::Auth;
use crate::HttpClient;
use crate::SessionError;
use crate::X_AUTH_TOKEN;
use http::header;
use http::HeaderMap;
use http::StatusCode;
use rsfish_core::ClassifyError;
use rsfish_core::ErrorKind;
use rsfish_core::FormPart;
use rsfish_core::ODataETag;
use rsfish_core::Response;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const APPLICATION_JSON: &str = "application/json";

/// Errors of the reqwest transport.
#[derive(Debug)]
pub enum BmcError {
    /// Error reported by reqwest (connect, TLS, timeout, body read).
    ReqwestError(reqwest::Error),
    /// Endpoint cannot be used.
    InvalidEndpoint(String),
    /// Service refused to create a session.
    SessionRejected {
        /// HTTP status of the session creation request.
        status: StatusCode,
        /// Response body.
        body: String,
    },
    /// Session created without `X-Auth-Token` in the reply.
    MissingSessionToken,
}

impl From<reqwest::Error> for BmcError {
    fn from(value: reqwest::Error) -> Self {
        Self::ReqwestError(value)
    }
}

impl SessionError for BmcError {
    fn invalid_endpoint(reason: String) -> Self {
        Self::InvalidEndpoint(reason)
    }

    fn session_rejected(status: StatusCode, body: String) -> Self {
        Self::SessionRejected { status, body }
    }

    fn missing_session_token() -> Self {
        Self::MissingSessionToken
    }
}

impl ClassifyError for BmcError {
    fn error_kind(&self) -> ErrorKind {
        match self {
            Self::ReqwestError(e) if e.is_builder() => ErrorKind::Validation,
            Self::ReqwestError(e) if e.is_decode() => ErrorKind::Protocol,
            Self::ReqwestError(_) => ErrorKind::Transport,
            Self::InvalidEndpoint(_) => ErrorKind::Validation,
            Self::SessionRejected { .. } => ErrorKind::Auth,
            Self::MissingSessionToken => ErrorKind::Protocol,
        }
    }
}

#[allow(clippy::absolute_paths)]
impl std::fmt::Display for BmcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReqwestError(e) => write!(f, "HTTP client error: {e}"),
            Self::InvalidEndpoint(reason) => write!(f, "invalid endpoint: {reason}"),
            Self::SessionRejected { status, body } => {
                write!(f, "session creation rejected with {status}: {body}")
            }
            Self::MissingSessionToken => {
                write!(f, "session created without {X_AUTH_TOKEN} header")
            }
        }
    }
}

#[allow(clippy::absolute_paths)]
impl std::error::Error for BmcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReqwestError(e) => Some(e),
            _ => None,
        }
    }
}

/// Configuration parameters for the reqwest HTTP client.
///
/// # Examples
///
/// ```rust
/// use rsfish_bmc_http::reqwest::ClientParams;
/// use std::time::Duration;
///
/// let params = ClientParams::new()
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(10))
///     .user_agent("inventory-agent/2.1")
///     .accept_invalid_certs(true);
/// ```
#[derive(Debug, Clone)]
pub struct ClientParams {
    /// HTTP request timeout
    pub timeout: Option<Duration>,
    /// TCP connection timeout
    pub connect_timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: Option<String>,
    /// Whether to accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Maximum number of HTTP redirects to follow
    pub max_redirects: Option<usize>,
    /// TCP keep-alive timeout
    pub tcp_keepalive: Option<Duration>,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: Option<usize>,
    /// List of default headers, added to every request
    pub default_headers: Option<HeaderMap>,
    /// Forces use of rust TLS, enabled by default
    pub use_rust_tls: bool,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(120)),
            connect_timeout: Some(Duration::from_secs(5)),
            user_agent: Some("rsfish/v1".to_string()),
            accept_invalid_certs: false,
            max_redirects: Some(10),
            tcp_keepalive: Some(Duration::from_secs(60)),
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: Some(1),
            default_headers: None,
            use_rust_tls: true,
        }
    }
}

impl ClientParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// BMCs commonly ship self-signed certificates.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub const fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    #[must_use]
    pub const fn tcp_keepalive(mut self, keepalive: Duration) -> Self {
        self.tcp_keepalive = Some(keepalive);
        self
    }

    #[must_use]
    pub const fn idle_timeout(mut self, pool_idle_timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(pool_idle_timeout);
        self
    }

    #[must_use]
    pub const fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    #[must_use]
    pub fn default_headers(mut self, default_headers: HeaderMap) -> Self {
        self.default_headers = Some(default_headers);
        self
    }
}

/// HTTP client implementation using the reqwest library.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
}

#[allow(clippy::missing_errors_doc)]
#[allow(clippy::absolute_paths)]
impl Client {
    pub fn new() -> Result<Self, BmcError> {
        Self::with_params(ClientParams::default())
    }

    pub fn with_params(params: ClientParams) -> Result<Self, BmcError> {
        let mut builder = reqwest::Client::builder();

        if params.use_rust_tls {
            builder = builder.use_rustls_tls();
        }
        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = params.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = params.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if params.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(max_redirects) = params.max_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(max_redirects));
        }
        if let Some(keepalive) = params.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }
        if let Some(idle_timeout) = params.pool_idle_timeout {
            builder = builder.pool_idle_timeout(idle_timeout);
        }
        if let Some(max_idle) = params.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max_idle);
        }
        if let Some(default_headers) = params.default_headers {
            builder = builder.default_headers(default_headers);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Client {
    fn prepare(
        request: reqwest::RequestBuilder,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> reqwest::RequestBuilder {
        let request = request
            .header(header::ACCEPT, APPLICATION_JSON)
            .headers(custom_headers.clone());
        match auth {
            Auth::None => request,
            Auth::Basic(credentials) => {
                request.basic_auth(&credentials.username, Some(credentials.password()))
            }
            Auth::Session(token) => request.header(X_AUTH_TOKEN, token.token()),
        }
    }

    fn with_etag(request: reqwest::RequestBuilder, etag: Option<ODataETag>) -> reqwest::RequestBuilder {
        match etag {
            Some(etag) => request.header(header::IF_MATCH, etag.as_str()),
            None => request,
        }
    }

    /// Send request and read the whole body. The reqwest response is
    /// consumed here, so it is released on every path.
    async fn execute(
        &self,
        method: &'static str,
        url: Url,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, BmcError> {
        let response = request.send().await.map_err(|err| {
            debug!(method, %url, error = %err, "request failed");
            err
        })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        debug!(method, %url, %status, bytes = body.len(), "request completed");
        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

impl HttpClient for Client {
    type Error = BmcError;

    async fn get(
        &self,
        url: Url,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> Result<Response, Self::Error> {
        let request = Self::prepare(self.client.get(url.clone()), auth, custom_headers);
        self.execute("GET", url, request).await
    }

    async fn post<B>(
        &self,
        url: Url,
        body: &B,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> Result<Response, Self::Error>
    where
        B: Serialize + Send + Sync,
    {
        let request = Self::prepare(self.client.post(url.clone()), auth, custom_headers).json(body);
        self.execute("POST", url, request).await
    }

    async fn patch<B>(
        &self,
        url: Url,
        etag: Option<ODataETag>,
        body: &B,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> Result<Response, Self::Error>
    where
        B: Serialize + Send + Sync,
    {
        let request = Self::prepare(self.client.patch(url.clone()), auth, custom_headers);
        let request = Self::with_etag(request, etag).json(body);
        self.execute("PATCH", url, request).await
    }

    async fn put<B>(
        &self,
        url: Url,
        etag: Option<ODataETag>,
        body: &B,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> Result<Response, Self::Error>
    where
        B: Serialize + Send + Sync,
    {
        let request = Self::prepare(self.client.put(url.clone()), auth, custom_headers);
        let request = Self::with_etag(request, etag).json(body);
        self.execute("PUT", url, request).await
    }

    async fn delete(
        &self,
        url: Url,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> Result<Response, Self::Error> {
        let request = Self::prepare(self.client.delete(url.clone()), auth, custom_headers);
        self.execute("DELETE", url, request).await
    }

    async fn post_multipart(
        &self,
        url: Url,
        parts: &[FormPart],
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> Result<Response, Self::Error> {
        let form = parts
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, part| {
                let field = reqwest::multipart::Part::bytes(part.content.clone());
                let field = match &part.file_name {
                    Some(file_name) => field.file_name(file_name.clone()),
                    None => field,
                };
                form.part(part.name.clone(), field)
            });
        let request =
            Self::prepare(self.client.post(url.clone()), auth, custom_headers).multipart(form);
        self.execute("POST", url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_are_classified() {
        let rejected = BmcError::session_rejected(StatusCode::UNAUTHORIZED, String::new());
        assert_eq!(rejected.error_kind(), ErrorKind::Auth);
        assert_eq!(
            BmcError::missing_session_token().error_kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            BmcError::invalid_endpoint("ftp".into()).error_kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn default_user_agent() {
        assert_eq!(
            ClientParams::default().user_agent.as_deref(),
            Some("rsfish/v1")
        );
    }
}
