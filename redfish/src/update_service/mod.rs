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

//! Update Service entities and collections.
//!
//! This module provides types for working with Redfish UpdateService resources
//! and their sub-resources like firmware and software inventory.

mod software_inventory;

use crate::action;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;

#[doc(inline)]
pub use software_inventory::SoftwareInventory;
#[doc(inline)]
pub use software_inventory::SoftwareInventoryData;

/// Network protocol used to retrieve an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferProtocolType {
    /// Common Internet File System.
    CIFS,
    /// File Transfer Protocol.
    FTP,
    /// Secure File Transfer Protocol.
    SFTP,
    /// Hypertext Transfer Protocol.
    HTTP,
    /// Hypertext Transfer Protocol Secure.
    HTTPS,
    /// Network File System.
    NFS,
    /// Secure Copy Protocol.
    SCP,
    /// Trivial File Transfer Protocol.
    TFTP,
    /// Vendor protocol.
    OEM,
}

impl TransferProtocolType {
    /// Wire name of the protocol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CIFS => "CIFS",
            Self::FTP => "FTP",
            Self::SFTP => "SFTP",
            Self::HTTP => "HTTP",
            Self::HTTPS => "HTTPS",
            Self::NFS => "NFS",
            Self::SCP => "SCP",
            Self::TFTP => "TFTP",
            Self::OEM => "OEM",
        }
    }
}

/// Parameters of `#UpdateService.SimpleUpdate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimpleUpdateBody {
    /// URI of the image.
    #[serde(rename = "ImageURI")]
    pub image_uri: String,
    /// Protocol used to retrieve the image.
    #[serde(rename = "TransferProtocol", skip_serializing_if = "Option::is_none")]
    pub transfer_protocol: Option<TransferProtocolType>,
    /// Resources the update applies to.
    #[serde(rename = "Targets", skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<ODataId>,
    /// User name for the image server.
    #[serde(rename = "Username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password for the image server.
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Bypass update policies such as downgrade protection.
    #[serde(rename = "ForceUpdate", skip_serializing_if = "Option::is_none")]
    pub force_update: Option<bool>,
}

/// Data of the update service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// URI accepting image uploads over HTTP POST.
    #[serde(rename = "HttpPushUri")]
    pub http_push_uri: Option<String>,
    /// URI accepting multipart image uploads.
    pub multipart_http_push_uri: Option<String>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct UpdateServiceActions {
    #[serde(rename = "#UpdateService.SimpleUpdate")]
    simple_update: Option<Action>,
    #[serde(rename = "#UpdateService.StartUpdate")]
    start_update: Option<Action>,
}

#[derive(Deserialize)]
struct UpdateServiceSchema {
    #[serde(flatten)]
    data: UpdateServiceData,
    #[serde(rename = "FirmwareInventory", default)]
    firmware_inventory: Link,
    #[serde(rename = "SoftwareInventory", default)]
    software_inventory: Link,
    #[serde(rename = "Actions", default)]
    actions: UpdateServiceActions,
}

/// Update service.
///
/// Provides functions to access firmware and software inventory, and perform update actions.
pub struct UpdateService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: UpdateServiceData,
    firmware_inventory: Link,
    software_inventory: Link,
    actions: UpdateServiceActions,
}

impl<B: Bmc> UpdateService<B> {
    /// List all firmware inventory items.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching the collection or an item fails.
    pub async fn firmware_inventory(&self) -> Result<Vec<SoftwareInventory<B>>, Error<B>> {
        self.base.list(&self.firmware_inventory).await
    }

    /// List all software inventory items.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching the collection or an item fails.
    pub async fn software_inventory(&self) -> Result<Vec<SoftwareInventory<B>>, Error<B>> {
        self.base.list(&self.software_inventory).await
    }

    /// Perform a simple update with the image at `body.image_uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The update service does not support the `SimpleUpdate` action
    /// - The transfer protocol is not among the advertised ones
    /// - The action execution fails
    pub async fn simple_update(&self, body: &SimpleUpdateBody) -> Result<Option<Task<B>>, Error<B>> {
        let simple_update = self.actions.simple_update.as_ref();
        let target = action::target(simple_update, "UpdateService.SimpleUpdate")?;
        if let (Some(simple_update), Some(protocol)) = (simple_update, body.transfer_protocol) {
            if !simple_update.allows("TransferProtocol", protocol.as_str()) {
                return Err(Error::InvalidParameter(format!(
                    "transfer protocol {} is not allowed; allowed: {}",
                    protocol.as_str(),
                    simple_update.allowable_values("TransferProtocol").join(", ")
                )));
            }
        }
        action::dispatch(self.base.bmc(), target, body).await
    }

    /// Start updates that have been previously invoked with an
    /// `OperationApplyTime` of `OnStartUpdateRequest`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The update service does not support the `StartUpdate` action
    /// - The action execution fails
    pub async fn start_update(&self) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.actions.start_update.as_ref(), "UpdateService.StartUpdate")?;
        action::dispatch(self.base.bmc(), target, &serde_json::Map::new()).await
    }
}

impl<B: Bmc> FromBase<B> for UpdateService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let UpdateServiceSchema {
            data,
            firmware_inventory,
            software_inventory,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            firmware_inventory,
            software_inventory,
            actions,
        })
    }
}

impl<B: Bmc> Resource<B> for UpdateService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ErrorKind;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    const TARGET: &str = "/redfish/v1/UpdateService/Actions/UpdateService.SimpleUpdate";

    async fn service(bmc: &Arc<TestBmc>) -> UpdateService<TestBmc> {
        bmc.expect(Expect::get(
            "/redfish/v1/UpdateService",
            r##"{"Id": "UpdateService", "Name": "Update service", "ServiceEnabled": true,
                "FirmwareInventory": {"@odata.id": "/redfish/v1/UpdateService/FirmwareInventory"},
                "Actions": {"#UpdateService.SimpleUpdate": {
                    "target": "/redfish/v1/UpdateService/Actions/UpdateService.SimpleUpdate",
                    "TransferProtocol@Redfish.AllowableValues": ["HTTP", "HTTPS"]}}}"##,
        ));
        crate::resource::fetch(bmc, &ODataId::from("/redfish/v1/UpdateService"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn simple_update_checks_protocol() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        let mut body = SimpleUpdateBody {
            image_uri: "https://images.example.com/bmc.bin".into(),
            transfer_protocol: Some(TransferProtocolType::NFS),
            ..SimpleUpdateBody::default()
        };
        let err = service.simple_update(&body).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Validation);

        body.transfer_protocol = Some(TransferProtocolType::HTTPS);
        bmc.expect(Expect::post_with_headers(
            TARGET,
            r#"{"ImageURI": "https://images.example.com/bmc.bin", "TransferProtocol": "HTTPS"}"#,
            202,
            &[("location", "/redfish/v1/TaskService/Tasks/9")],
            "",
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/TaskService/Tasks/9",
            r#"{"Id": "9", "Name": "Update", "TaskState": "New"}"#,
        ));
        let task = service.simple_update(&body).await.unwrap().unwrap();
        assert!(!task.is_terminal());
        assert!(service.software_inventory().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn firmware_inventory_is_listed() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::get(
            "/redfish/v1/UpdateService/FirmwareInventory",
            r#"{"Members": [{"@odata.id": "/redfish/v1/UpdateService/FirmwareInventory/BMC"}]}"#,
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/UpdateService/FirmwareInventory/BMC",
            r#"{"Id": "BMC", "Name": "Contoso BMC Firmware", "Version": "1.45.455b66-rev4",
                "Updateable": true}"#,
        ));
        let items = service.firmware_inventory().await.unwrap();
        assert_eq!(items[0].data.version.as_deref(), Some("1.45.455b66-rev4"));
    }
}
