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

//! HTTP transport for `rsfish`
//!
//! [`HttpBmc`] implements [`rsfish_core::Bmc`] on top of any [`HttpClient`].
//! It prepends the configured endpoint to every resource path, attaches
//! authentication (session token or HTTP Basic) and, when a session is
//! active, transparently re-creates it once if the service answers 401.
//!
//! The reqwest-based client lives in [`reqwest`] (feature `reqwest`,
//! enabled by default). Session lifecycle is documented in [`session`].

pub mod credentials;
pub mod session;

#[cfg(feature = "reqwest")]
pub mod reqwest;

use http::HeaderMap;
use http::StatusCode;
use rsfish_core::Bmc;
use rsfish_core::ClassifyError;
use rsfish_core::FormPart;
use rsfish_core::ODataETag;
use rsfish_core::ODataId;
use rsfish_core::Response;
use serde::Serialize;
use std::error::Error as StdError;
use std::future::Future;
use std::sync::PoisonError;
use std::sync::RwLock;
use url::Url;

#[doc(inline)]
pub use credentials::BmcCredentials;
#[doc(inline)]
pub use credentials::SessionToken;
#[doc(inline)]
pub use session::SessionMode;

/// Header carrying the session token.
pub const X_AUTH_TOKEN: &str = "X-Auth-Token";

/// Authentication attached to a single request.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Unauthenticated request (service root, session creation).
    None,
    /// HTTP Basic authentication.
    Basic(BmcCredentials),
    /// Session token sent as `X-Auth-Token`.
    Session(SessionToken),
}

/// Minimal HTTP client used by [`HttpBmc`].
///
/// Implementations return every reply as a [`Response`], whatever its
/// status. Every request carries `Accept: application/json`; requests with
/// a JSON body carry `Content-Type: application/json`.
pub trait HttpClient: Send + Sync + 'static {
    /// Transport error.
    type Error: StdError + ClassifyError + Send + Sync + 'static;

    /// Perform an HTTP GET request.
    fn get(
        &self,
        url: Url,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// Perform an HTTP POST request.
    fn post<B>(
        &self,
        url: Url,
        body: &B,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send
    where
        B: Serialize + Send + Sync;

    /// Perform an HTTP PATCH request. `etag` is sent as `If-Match`.
    fn patch<B>(
        &self,
        url: Url,
        etag: Option<ODataETag>,
        body: &B,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send
    where
        B: Serialize + Send + Sync;

    /// Perform an HTTP PUT request. `etag` is sent as `If-Match`.
    fn put<B>(
        &self,
        url: Url,
        etag: Option<ODataETag>,
        body: &B,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send
    where
        B: Serialize + Send + Sync;

    /// Perform an HTTP DELETE request.
    fn delete(
        &self,
        url: Url,
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// Perform an HTTP POST request with a `multipart/form-data` body.
    fn post_multipart(
        &self,
        url: Url,
        parts: &[FormPart],
        auth: Auth,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

/// Constructors for errors raised by the session layer of [`HttpBmc`]
/// rather than by the HTTP client itself.
pub trait SessionError {
    /// Endpoint is not an `http` or `https` URL.
    fn invalid_endpoint(reason: String) -> Self;

    /// Service refused to create a session.
    fn session_rejected(status: StatusCode, body: String) -> Self;

    /// Session was created but no token header was returned.
    fn missing_session_token() -> Self;
}

/// A tagged type representing a Redfish endpoint URL.
///
/// Provides conversion from `ODataId` paths to absolute URLs.
#[derive(Debug, Clone)]
pub struct RedfishEndpoint {
    base_url: Url,
}

impl RedfishEndpoint {
    /// Create a new `RedfishEndpoint` from a base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Absolute URL of a resource. Empty id resolves to the service root;
    /// a query part of the id is kept as the URL query.
    #[must_use]
    pub fn with_id(&self, id: &ODataId) -> Url {
        let id = if id.is_empty() {
            rsfish_core::odata::SERVICE_ROOT
        } else {
            id.as_str()
        };
        let (path, query) = match id.find('?') {
            Some(pos) => (&id[..pos], Some(&id[pos + 1..])),
            None => (id, None),
        };
        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(query);
        url
    }
}

impl From<&RedfishEndpoint> for Url {
    fn from(endpoint: &RedfishEndpoint) -> Self {
        endpoint.base_url.clone()
    }
}

/// HTTP-based BMC implementation that wraps an [`HttpClient`].
///
/// # Examples
///
/// ```rust,no_run
/// use rsfish_bmc_http::reqwest::Client;
/// use rsfish_bmc_http::BmcCredentials;
/// use rsfish_bmc_http::HttpBmc;
/// use rsfish_bmc_http::SessionMode;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = BmcCredentials::new("admin".to_string(), "password".to_string());
/// let endpoint = Url::parse("https://192.168.1.100")?;
/// let bmc = HttpBmc::open(Client::new()?, endpoint, credentials, SessionMode::Session).await?;
/// // ...
/// bmc.close().await;
/// # Ok(())
/// # }
/// ```
pub struct HttpBmc<C: HttpClient> {
    client: C,
    redfish_endpoint: RedfishEndpoint,
    credentials: BmcCredentials,
    sessions: ODataId,
    session: RwLock<Option<SessionToken>>,
    custom_headers: HeaderMap,
}

impl<C: HttpClient> HttpBmc<C>
where
    C::Error: SessionError,
{
    /// Create a client that authenticates every request with HTTP Basic.
    /// No request is sent.
    ///
    /// # Errors
    ///
    /// Returns error if `redfish_endpoint` is not an `http` or `https` URL.
    pub fn new(
        client: C,
        redfish_endpoint: Url,
        credentials: BmcCredentials,
    ) -> Result<Self, C::Error> {
        match redfish_endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(C::Error::invalid_endpoint(format!(
                    "unsupported scheme '{other}' in {redfish_endpoint}"
                )))
            }
        }
        Ok(Self {
            client,
            redfish_endpoint: RedfishEndpoint::new(redfish_endpoint),
            credentials,
            sessions: ODataId::from(rsfish_core::odata::DEFAULT_SESSIONS),
            session: RwLock::new(None),
            custom_headers: HeaderMap::new(),
        })
    }

    /// Headers added to every request.
    #[must_use]
    pub fn with_custom_headers(mut self, custom_headers: HeaderMap) -> Self {
        self.custom_headers = custom_headers;
        self
    }

    /// Endpoint this client talks to.
    #[must_use]
    pub const fn endpoint(&self) -> &RedfishEndpoint {
        &self.redfish_endpoint
    }

    fn current_session(&self) -> Option<SessionToken> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_session(&self, token: Option<SessionToken>) -> Option<SessionToken> {
        let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *session, token)
    }

    fn current_auth(&self) -> Auth {
        self.current_session().map_or_else(
            || Auth::Basic(self.credentials.clone()),
            Auth::Session,
        )
    }

    /// Send a request built by `request`. A 401 answered to a session
    /// token triggers one session refresh and one replay.
    async fn send<F, Fut>(&self, request: F) -> Result<Response, C::Error>
    where
        F: Fn(Auth) -> Fut + Send + Sync,
        Fut: Future<Output = Result<Response, C::Error>> + Send,
    {
        let auth = self.current_auth();
        let stale = match &auth {
            Auth::Session(token) => Some(token.clone()),
            Auth::Basic(_) | Auth::None => None,
        };
        let response = request(auth).await?;
        match stale {
            Some(stale) if response.status == StatusCode::UNAUTHORIZED => {
                let auth = self.refresh_session(&stale).await?;
                request(auth).await
            }
            _ => Ok(response),
        }
    }
}

impl<C: HttpClient> Bmc for HttpBmc<C>
where
    C::Error: SessionError,
{
    type Error = C::Error;

    async fn get(&self, id: &ODataId) -> Result<Response, Self::Error> {
        let url = self.redfish_endpoint.with_id(id);
        self.send(|auth| self.client.get(url.clone(), auth, &self.custom_headers))
            .await
    }

    async fn post<V: Serialize + Send + Sync>(
        &self,
        id: &ODataId,
        body: &V,
    ) -> Result<Response, Self::Error> {
        let url = self.redfish_endpoint.with_id(id);
        self.send(|auth| {
            self.client
                .post(url.clone(), body, auth, &self.custom_headers)
        })
        .await
    }

    async fn patch<V: Serialize + Send + Sync>(
        &self,
        id: &ODataId,
        etag: Option<&ODataETag>,
        body: &V,
    ) -> Result<Response, Self::Error> {
        let url = self.redfish_endpoint.with_id(id);
        self.send(|auth| {
            self.client
                .patch(url.clone(), etag.cloned(), body, auth, &self.custom_headers)
        })
        .await
    }

    async fn put<V: Serialize + Send + Sync>(
        &self,
        id: &ODataId,
        etag: Option<&ODataETag>,
        body: &V,
    ) -> Result<Response, Self::Error> {
        let url = self.redfish_endpoint.with_id(id);
        self.send(|auth| {
            self.client
                .put(url.clone(), etag.cloned(), body, auth, &self.custom_headers)
        })
        .await
    }

    async fn delete(&self, id: &ODataId) -> Result<Response, Self::Error> {
        let url = self.redfish_endpoint.with_id(id);
        self.send(|auth| self.client.delete(url.clone(), auth, &self.custom_headers))
            .await
    }

    async fn post_multipart(
        &self,
        id: &ODataId,
        parts: &[FormPart],
    ) -> Result<Response, Self::Error> {
        let url = self.redfish_endpoint.with_id(id);
        self.send(|auth| {
            self.client
                .post_multipart(url.clone(), parts, auth, &self.custom_headers)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_resolves_paths() {
        let endpoint = RedfishEndpoint::new(Url::parse("https://10.0.0.1:8443").unwrap());
        assert_eq!(
            endpoint.with_id(&ODataId::default()).as_str(),
            "https://10.0.0.1:8443/redfish/v1/"
        );
        assert_eq!(
            endpoint
                .with_id(&ODataId::from("/redfish/v1/Systems/1"))
                .as_str(),
            "https://10.0.0.1:8443/redfish/v1/Systems/1"
        );
        assert_eq!(
            endpoint
                .with_id(&ODataId::from("/redfish/v1/Systems?$skip=2"))
                .as_str(),
            "https://10.0.0.1:8443/redfish/v1/Systems?$skip=2"
        );
    }
}
