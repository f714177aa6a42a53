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

//! Session service and open sessions.
//!
//! Creating the session this client authenticates with is the job of the
//! transport. These types let callers inspect and close sessions.

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

/// Data of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionData {
    /// Account that owns the session.
    pub user_name: Option<String>,
    /// Client address.
    pub client_origin_ip_address: Option<String>,
    /// `HostConsole`, `ManagerConsole`, `IPMI`, `KVMIP`, `OEM`, `Redfish`, ...
    pub session_type: Option<String>,
    /// Creation time.
    pub created_time: Option<String>,
}

#[derive(Deserialize)]
struct SessionSchema {
    #[serde(flatten)]
    data: SessionData,
}

/// Open session.
pub struct Session<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded session data.
    pub data: SessionData,
}

impl<B: Bmc> Session<B> {
    /// Close the session.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request.
    pub async fn delete(&self) -> Result<(), Error<B>> {
        self.base.delete().await
    }
}

impl<B: Bmc> FromBase<B> for Session<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let SessionSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Session<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of the session service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Idle time before a session is closed.
    pub session_timeout: Option<u64>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SessionServiceUpdate {
    session_timeout: u64,
}

#[derive(Deserialize)]
struct SessionServiceSchema {
    #[serde(flatten)]
    data: SessionServiceData,
    #[serde(rename = "Sessions", default)]
    sessions: Link,
}

/// Session service.
pub struct SessionService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: SessionServiceData,
    sessions: Link,
}

impl<B: Bmc> SessionService<B> {
    /// Open sessions.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a session fails.
    pub async fn sessions(&self) -> Result<Vec<Session<B>>, Error<B>> {
        self.base.list(&self.sessions).await
    }

    /// Change the idle timeout of sessions.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn set_session_timeout(&self, seconds: u64) -> Result<Self, Error<B>> {
        self.base
            .update(&SessionServiceUpdate {
                session_timeout: seconds,
            })
            .await
    }
}

impl<B: Bmc> FromBase<B> for SessionService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let SessionServiceSchema { data, sessions } = base.decode()?;
        Ok(Self {
            base,
            data,
            sessions,
        })
    }
}

impl<B: Bmc> Resource<B> for SessionService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ODataId;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    #[tokio::test]
    async fn list_and_close_sessions() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/SessionService",
            r#"{"Id": "SessionService", "Name": "Session Service", "SessionTimeout": 30,
                "Sessions": {"@odata.id": "/redfish/v1/SessionService/Sessions"}}"#,
        ));
        let service: SessionService<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/SessionService"))
                .await
                .unwrap();
        assert_eq!(service.data.session_timeout, Some(30));

        bmc.expect(Expect::get(
            "/redfish/v1/SessionService/Sessions",
            r#"{"Members": [{"@odata.id": "/redfish/v1/SessionService/Sessions/1234567890ABCDEF"}]}"#,
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/SessionService/Sessions/1234567890ABCDEF",
            r#"{"Id": "1234567890ABCDEF", "Name": "User Session", "UserName": "Administrator"}"#,
        ));
        let sessions = service.sessions().await.unwrap();
        assert_eq!(sessions[0].data.user_name.as_deref(), Some("Administrator"));

        bmc.expect(Expect::delete(
            "/redfish/v1/SessionService/Sessions/1234567890ABCDEF",
            204,
        ));
        sessions[0].delete().await.unwrap();
    }
}
