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

//! Credentials and session tokens.
//!
//! Both types redact their secrets in `Debug` and `Display`.

use rsfish_core::ODataId;
use std::fmt;

/// Credentials used to access the BMC.
#[derive(Clone)]
pub struct BmcCredentials {
    /// Username to access BMC.
    pub username: String,
    password: String,
}

impl BmcCredentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Get password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for BmcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BmcCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for BmcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (password: [REDACTED])", self.username)
    }
}

/// Session created by the service.
///
/// `location` is the session resource; deleting it ends the session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    token: String,
    location: Option<ODataId>,
    id: Option<String>,
}

impl SessionToken {
    /// Session with known token and session resource location.
    #[must_use]
    pub fn new(token: String, location: Option<ODataId>) -> Self {
        let id = location
            .as_ref()
            .map(|l| l.last_segment().to_string())
            .filter(|id| !id.is_empty());
        Self {
            token,
            location,
            id,
        }
    }

    /// Override session id reported by the service.
    #[must_use]
    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Value of the `X-Auth-Token` header.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Session resource to delete on close.
    #[must_use]
    pub const fn location(&self) -> Option<&ODataId> {
        self.location.as_ref()
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("id", &self.id)
            .field("location", &self.location)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_redacted() {
        let creds = BmcCredentials::new("root".into(), "calvin".into());
        assert!(!format!("{creds:?}").contains("calvin"));
        assert!(!creds.to_string().contains("calvin"));

        let token = SessionToken::new(
            "0123456789abcdef".into(),
            Some(ODataId::from("/redfish/v1/SessionService/Sessions/22")),
        );
        assert!(!format!("{token:?}").contains("0123456789abcdef"));
        assert_eq!(token.id(), Some("22"));
    }
}
