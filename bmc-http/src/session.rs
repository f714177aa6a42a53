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

//! Session manager
//!
//! [`HttpBmc::open`] discovers the session collection from the service root
//! (fetched without credentials), posts `{UserName, Password}` to it and
//! keeps the returned `X-Auth-Token` together with the session `Location`.
//! Services without session support (no session collection advertised,
//! or 404/405/501 on creation) are used with HTTP Basic instead.
//!
//! The token is shared by every resource fetched through the client. When
//! the service answers 401 to a token, a new session is created, swapped
//! in atomically, and the request is replayed once.

use crate::Auth;
use crate::HttpBmc;
use crate::HttpClient;
use crate::SessionError;
use crate::SessionToken;
use crate::X_AUTH_TOKEN;
use http::StatusCode;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;
use url::Url;

/// How [`HttpBmc::open`] authenticates.
#[derive(Debug, Clone)]
pub enum SessionMode {
    /// Create a session; fall back to HTTP Basic if the service has none.
    Session,
    /// Never create a session; send HTTP Basic on every request.
    Basic,
    /// Adopt a session created elsewhere.
    Reuse(SessionToken),
}

impl Default for SessionMode {
    fn default() -> Self {
        Self::Session
    }
}

#[derive(Serialize)]
struct SessionCreate<'a> {
    #[serde(rename = "UserName")]
    user_name: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Deserialize, Default)]
struct RootLinks {
    #[serde(rename = "Sessions", default)]
    sessions: Link,
}

#[derive(Deserialize)]
struct RootSessionLinks {
    #[serde(rename = "Links", default)]
    links: Option<RootLinks>,
    #[serde(rename = "SessionService", default)]
    session_service: Link,
}

#[derive(Deserialize)]
struct CreatedSession {
    #[serde(rename = "Id")]
    id: Option<String>,
}

impl<C: HttpClient> HttpBmc<C>
where
    C::Error: SessionError,
{
    /// Create client and authenticate according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is invalid, if the service cannot be
    /// reached, or if it rejects the credentials.
    pub async fn open(
        client: C,
        redfish_endpoint: Url,
        credentials: crate::BmcCredentials,
        mode: SessionMode,
    ) -> Result<Self, C::Error> {
        Self::new(client, redfish_endpoint, credentials)?
            .connect(mode)
            .await
    }

    /// Authenticate an already configured client according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns error if the service cannot be reached or rejects the
    /// credentials.
    pub async fn connect(mut self, mode: SessionMode) -> Result<Self, C::Error> {
        match mode {
            SessionMode::Basic => {
                info!(endpoint = %Url::from(&self.redfish_endpoint), "using basic authentication");
            }
            SessionMode::Reuse(token) => {
                debug!(session = ?token, "reusing existing session");
                self.replace_session(Some(token));
            }
            SessionMode::Session => match self.discover_sessions().await? {
                Some(sessions) => {
                    self.sessions = sessions;
                    match self.create_session().await? {
                        Some(token) => {
                            info!(session = ?token, "session created");
                            self.replace_session(Some(token));
                        }
                        None => info!(
                            sessions = %self.sessions,
                            "session creation not supported, falling back to basic authentication"
                        ),
                    }
                }
                None => info!("service advertises no sessions, falling back to basic authentication"),
            },
        }
        Ok(self)
    }

    /// Current session, if one is active.
    #[must_use]
    pub fn session(&self) -> Option<SessionToken> {
        self.current_session()
    }

    /// Delete the server-side session. Failures are logged and ignored;
    /// the client reverts to HTTP Basic afterwards.
    pub async fn close(&self) {
        let Some(token) = self.replace_session(None) else {
            return;
        };
        let Some(location) = token.location().cloned() else {
            debug!("session has no location, nothing to delete");
            return;
        };
        let url = self.redfish_endpoint.with_id(&location);
        match self
            .client
            .delete(url, Auth::Session(token), &self.custom_headers)
            .await
        {
            Ok(response) if response.is_success() => {
                info!(session = %location, "session deleted");
            }
            Ok(response) => {
                warn!(session = %location, status = %response.status, "failed to delete session");
            }
            Err(err) => {
                warn!(session = %location, error = %err, "failed to delete session");
            }
        }
    }

    /// Find the session collection. `None` means the service has no
    /// session support.
    async fn discover_sessions(&self) -> Result<Option<ODataId>, C::Error> {
        let url = self.redfish_endpoint.with_id(&ODataId::service_root());
        let response = self
            .client
            .get(url, Auth::None, &self.custom_headers)
            .await?;
        if !response.is_success() {
            debug!(status = %response.status, "service root is not readable anonymously");
            return Ok(Some(ODataId::from(rsfish_core::odata::DEFAULT_SESSIONS)));
        }
        let Ok(root) = serde_json::from_slice::<RootSessionLinks>(&response.body) else {
            return Ok(Some(ODataId::from(rsfish_core::odata::DEFAULT_SESSIONS)));
        };
        let from_links = root.links.and_then(|links| links.sessions.id().cloned());
        let from_service = root
            .session_service
            .id()
            .map(|id| ODataId::from(format!("{}/Sessions", id.as_str().trim_end_matches('/'))));
        Ok(from_links.or(from_service))
    }

    /// Post credentials to the session collection. `None` means session
    /// creation is not supported.
    async fn create_session(&self) -> Result<Option<SessionToken>, C::Error> {
        let url = self.redfish_endpoint.with_id(&self.sessions);
        let body = SessionCreate {
            user_name: &self.credentials.username,
            password: self.credentials.password(),
        };
        let response = self
            .client
            .post(url, &body, Auth::None, &self.custom_headers)
            .await?;
        match response.status {
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED => {
                Ok(None)
            }
            status if status.is_success() => {
                let token = response
                    .headers
                    .get(X_AUTH_TOKEN)
                    .and_then(|v| v.to_str().ok())
                    .filter(|v| !v.is_empty())
                    .ok_or_else(C::Error::missing_session_token)?;
                let session = SessionToken::new(token.to_string(), response.location());
                let session = match serde_json::from_slice::<CreatedSession>(&response.body)
                    .ok()
                    .and_then(|s| s.id)
                {
                    Some(id) => session.with_id(id),
                    None => session,
                };
                Ok(Some(session))
            }
            status => Err(C::Error::session_rejected(status, response.text())),
        }
    }

    /// Replace a token the service no longer accepts. When another request
    /// already refreshed it, the newer token is used as is.
    pub(crate) async fn refresh_session(&self, stale: &SessionToken) -> Result<Auth, C::Error> {
        if let Some(current) = self.current_session() {
            if &current != stale {
                return Ok(Auth::Session(current));
            }
        }
        match self.create_session().await? {
            Some(token) => {
                info!(session = ?token, "session refreshed");
                self.replace_session(Some(token.clone()));
                Ok(Auth::Session(token))
            }
            None => {
                info!("session refresh not supported, falling back to basic authentication");
                self.replace_session(None);
                Ok(Auth::Basic(self.credentials.clone()))
            }
        }
    }
}
