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

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;

/// Settings of a single protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProtocolSettings {
    /// Whether the protocol is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_enabled: Option<bool>,
    /// Port the protocol listens on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// NTP settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NtpSettings {
    /// Whether NTP is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_enabled: Option<bool>,
    /// Port used by NTP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// NTP servers.
    #[serde(rename = "NTPServers", skip_serializing_if = "Option::is_none")]
    pub ntp_servers: Option<Vec<String>>,
}

/// Data of the manager network protocol resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkProtocolData {
    /// Host name of the manager.
    pub host_name: Option<String>,
    /// Fully qualified domain name.
    #[serde(rename = "FQDN")]
    pub fqdn: Option<String>,
    /// HTTP.
    #[serde(rename = "HTTP")]
    pub http: Option<ProtocolSettings>,
    /// HTTPS.
    #[serde(rename = "HTTPS")]
    pub https: Option<ProtocolSettings>,
    /// SSH.
    #[serde(rename = "SSH")]
    pub ssh: Option<ProtocolSettings>,
    /// IPMI over LAN.
    #[serde(rename = "IPMI")]
    pub ipmi: Option<ProtocolSettings>,
    /// SNMP.
    #[serde(rename = "SNMP")]
    pub snmp: Option<ProtocolSettings>,
    /// SSDP.
    #[serde(rename = "SSDP")]
    pub ssdp: Option<ProtocolSettings>,
    /// KVM over IP.
    #[serde(rename = "KVMIP")]
    pub kvmip: Option<ProtocolSettings>,
    /// Virtual media.
    pub virtual_media: Option<ProtocolSettings>,
    /// NTP.
    #[serde(rename = "NTP")]
    pub ntp: Option<NtpSettings>,
    /// Status of the resource.
    pub status: Option<Status>,
}

/// Writable network protocol settings. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManagerNetworkProtocolUpdate {
    /// HTTP.
    #[serde(rename = "HTTP", skip_serializing_if = "Option::is_none")]
    pub http: Option<ProtocolSettings>,
    /// HTTPS.
    #[serde(rename = "HTTPS", skip_serializing_if = "Option::is_none")]
    pub https: Option<ProtocolSettings>,
    /// SSH.
    #[serde(rename = "SSH", skip_serializing_if = "Option::is_none")]
    pub ssh: Option<ProtocolSettings>,
    /// IPMI over LAN.
    #[serde(rename = "IPMI", skip_serializing_if = "Option::is_none")]
    pub ipmi: Option<ProtocolSettings>,
    /// NTP.
    #[serde(rename = "NTP", skip_serializing_if = "Option::is_none")]
    pub ntp: Option<NtpSettings>,
}

#[derive(Deserialize)]
struct NetworkProtocolSchema {
    #[serde(flatten)]
    data: NetworkProtocolData,
}

/// Network services of a manager.
pub struct ManagerNetworkProtocol<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded protocol data.
    pub data: NetworkProtocolData,
}

impl<B: Bmc> ManagerNetworkProtocol<B> {
    /// Update protocol settings and return the new state.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn update(&self, update: &ManagerNetworkProtocolUpdate) -> Result<Self, Error<B>> {
        self.base.update(update).await
    }
}

impl<B: Bmc> FromBase<B> for ManagerNetworkProtocol<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let NetworkProtocolSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for ManagerNetworkProtocol<B> {
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

    const URI: &str = "/redfish/v1/Managers/BMC/NetworkProtocol";

    #[tokio::test]
    async fn update_sends_only_set_fields() {
        let bmc = Arc::new(TestBmc::default());
        let body = r#"{"Id": "NetworkProtocol", "Name": "Manager Network Protocol",
            "HTTPS": {"ProtocolEnabled": true, "Port": 443},
            "IPMI": {"ProtocolEnabled": true, "Port": 623},
            "NTP": {"ProtocolEnabled": true, "NTPServers": ["pool.ntp.org"]}}"#;
        bmc.expect(Expect::get(URI, body));
        let protocol: ManagerNetworkProtocol<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from(URI)).await.unwrap();
        assert_eq!(protocol.data.ipmi.as_ref().and_then(|p| p.port), Some(623));

        bmc.expect(Expect::patch(URI, r#"{"IPMI": {"ProtocolEnabled": false}}"#, 204, ""));
        bmc.expect(Expect::get(URI, body));
        protocol
            .update(&ManagerNetworkProtocolUpdate {
                ipmi: Some(ProtocolSettings {
                    protocol_enabled: Some(false),
                    port: None,
                }),
                ..ManagerNetworkProtocolUpdate::default()
            })
            .await
            .unwrap();
    }
}
