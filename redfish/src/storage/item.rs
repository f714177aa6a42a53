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

use crate::action;
use crate::chassis::Chassis;
use crate::collection;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::storage::Drive;
use crate::storage::EncryptionKeyBody;
use crate::storage::Volume;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Controller embedded in a storage resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageController {
    /// Identifier of the member within the array.
    pub member_id: Option<String>,
    /// Name of the controller.
    pub name: Option<String>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Firmware version.
    pub firmware_version: Option<String>,
    /// Maximum speed of the device interface.
    pub speed_gbps: Option<f64>,
    /// Supported RAID types.
    #[serde(rename = "SupportedRAIDTypes", default)]
    pub supported_raid_types: Vec<String>,
    /// Status of the controller.
    pub status: Option<Status>,
}

/// Data of a storage subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageData {
    /// Embedded controllers.
    #[serde(default)]
    pub storage_controllers: Vec<StorageController>,
    /// Status of the subsystem.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct StorageLinks {
    #[serde(rename = "Enclosures", default)]
    enclosures: LinkList,
}

#[derive(Deserialize, Default)]
struct StorageActions {
    #[serde(rename = "#Storage.SetEncryptionKey")]
    set_encryption_key: Option<Action>,
}

#[derive(Deserialize)]
struct StorageSchema {
    #[serde(flatten)]
    data: StorageData,
    #[serde(rename = "Drives", default)]
    drives: LinkList,
    #[serde(rename = "Volumes", default)]
    volumes: Link,
    #[serde(rename = "Links", default)]
    links: StorageLinks,
    #[serde(rename = "Actions", default)]
    actions: StorageActions,
}

/// Storage subsystem of a computer system.
pub struct Storage<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded storage data.
    pub data: StorageData,
    drives: LinkList,
    volumes: Link,
    enclosures: LinkList,
    set_encryption_key: Option<Action>,
}

impl<B: Bmc> Storage<B> {
    /// Number of drive links, empty ones included.
    #[must_use]
    pub fn drive_count(&self) -> usize {
        self.drives.len()
    }

    /// Drives attached to this subsystem.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a drive fails.
    pub async fn drives(&self) -> Result<Vec<Drive<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.drives).await
    }

    /// Volumes of this subsystem.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a volume fails.
    pub async fn volumes(&self) -> Result<Vec<Volume<B>>, Error<B>> {
        self.base.list(&self.volumes).await
    }

    /// Enclosures of this subsystem.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a chassis fails.
    pub async fn enclosures(&self) -> Result<Vec<Chassis<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.enclosures).await
    }

    /// Set the encryption key of the subsystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn set_encryption_key(&self, key: &str) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.set_encryption_key.as_ref(), "Storage.SetEncryptionKey")?;
        action::dispatch(
            self.base.bmc(),
            target,
            &EncryptionKeyBody {
                encryption_key: key,
            },
        )
        .await
    }
}

impl<B: Bmc> FromBase<B> for Storage<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let StorageSchema {
            data,
            drives,
            volumes,
            links,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            drives,
            volumes,
            enclosures: links.enclosures,
            set_encryption_key: actions.set_encryption_key,
        })
    }
}

impl<B: Bmc> Resource<B> for Storage<B> {
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
    async fn drives_keep_order_and_skip_empty_links() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/Systems/1/Storage/1",
            r#"{"Id": "1", "Name": "Local Storage Controller",
                "StorageControllers": [{"MemberId": "0", "SupportedRAIDTypes": ["RAID0", "RAID1"]}],
                "Drives": [{"@odata.id": "/redfish/v1/Systems/1/Storage/1/Drives/0"},
                           {"@odata.id": ""},
                           {"@odata.id": "/redfish/v1/Systems/1/Storage/1/Drives/1"}]}"#,
        ));
        let storage: Storage<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/Systems/1/Storage/1"))
                .await
                .unwrap();
        assert_eq!(storage.drive_count(), 3);
        assert_eq!(storage.data.storage_controllers[0].supported_raid_types.len(), 2);

        bmc.expect(Expect::get(
            "/redfish/v1/Systems/1/Storage/1/Drives/0",
            r#"{"Id": "0", "Name": "Drive 0", "MediaType": "SSD"}"#,
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/Systems/1/Storage/1/Drives/1",
            r#"{"Id": "1", "Name": "Drive 1", "MediaType": "HDD"}"#,
        ));
        let drives = storage.drives().await.unwrap();
        let names: Vec<_> = drives.iter().map(|d| d.name().inner().clone()).collect();
        assert_eq!(names, vec!["Drive 0".to_string(), "Drive 1".to_string()]);
        assert!(storage.volumes().await.unwrap().is_empty());
    }
}
