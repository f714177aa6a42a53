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
use crate::computer_system::ComputerSystem;
use crate::fabric::Endpoint;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::storage::Drive;
use crate::storage::EncryptionKeyBody;
use crate::storage::Volume;
use crate::swordfish::ClassOfService;
use crate::swordfish::FileSystem;
use crate::swordfish::StorageGroup;
use crate::swordfish::StoragePool;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

/// Data of a storage service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageServiceData {
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct StorageServiceLinks {
    #[serde(rename = "HostingSystem", default)]
    hosting_system: Link,
}

#[derive(Deserialize, Default)]
struct StorageServiceActions {
    #[serde(rename = "#StorageService.SetEncryptionKey")]
    set_encryption_key: Option<Action>,
}

#[derive(Deserialize)]
struct StorageServiceSchema {
    #[serde(flatten)]
    data: StorageServiceData,
    #[serde(rename = "Volumes", default)]
    volumes: Link,
    #[serde(rename = "StoragePools", default)]
    storage_pools: Link,
    #[serde(rename = "StorageGroups", default)]
    storage_groups: Link,
    #[serde(rename = "FileSystems", default)]
    file_systems: Link,
    #[serde(rename = "ClassesOfService", default)]
    classes_of_service: Link,
    #[serde(rename = "DefaultClassOfService", default)]
    default_class_of_service: Link,
    #[serde(rename = "Drives", default)]
    drives: Link,
    #[serde(rename = "Endpoints", default)]
    endpoints: Link,
    #[serde(rename = "Links", default)]
    links: StorageServiceLinks,
    #[serde(rename = "Actions", default)]
    actions: StorageServiceActions,
}

/// Swordfish storage service.
pub struct StorageService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: StorageServiceData,
    volumes: Link,
    storage_pools: Link,
    storage_groups: Link,
    file_systems: Link,
    classes_of_service: Link,
    default_class_of_service: Link,
    drives: Link,
    endpoints: Link,
    hosting_system: Link,
    set_encryption_key: Option<Action>,
}

impl<B: Bmc> StorageService<B> {
    /// Volumes of the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a volume fails.
    pub async fn volumes(&self) -> Result<Vec<Volume<B>>, Error<B>> {
        self.base.list(&self.volumes).await
    }

    /// Storage pools of the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a pool fails.
    pub async fn storage_pools(&self) -> Result<Vec<StoragePool<B>>, Error<B>> {
        self.base.list(&self.storage_pools).await
    }

    /// Storage groups of the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a group fails.
    pub async fn storage_groups(&self) -> Result<Vec<StorageGroup<B>>, Error<B>> {
        self.base.list(&self.storage_groups).await
    }

    /// File systems of the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a file system fails.
    pub async fn file_systems(&self) -> Result<Vec<FileSystem<B>>, Error<B>> {
        self.base.list(&self.file_systems).await
    }

    /// Classes of service offered.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a class fails.
    pub async fn classes_of_service(&self) -> Result<Vec<ClassOfService<B>>, Error<B>> {
        self.base.list(&self.classes_of_service).await
    }

    /// Default class of service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if no default is linked, or any
    /// fetch error.
    pub async fn default_class_of_service(&self) -> Result<ClassOfService<B>, Error<B>> {
        self.base
            .follow(
                &self.default_class_of_service,
                "StorageService DefaultClassOfService",
            )
            .await
    }

    /// Drives of the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a drive fails.
    pub async fn drives(&self) -> Result<Vec<Drive<B>>, Error<B>> {
        self.base.list(&self.drives).await
    }

    /// Endpoints of the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or an endpoint fails.
    pub async fn endpoints(&self) -> Result<Vec<Endpoint<B>>, Error<B>> {
        self.base.list(&self.endpoints).await
    }

    /// System hosting the service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if no hosting system is linked, or
    /// any fetch error.
    pub async fn hosting_system(&self) -> Result<ComputerSystem<B>, Error<B>> {
        self.base
            .follow(&self.hosting_system, "StorageService HostingSystem")
            .await
    }

    /// Set the encryption key of the service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn set_encryption_key(&self, key: &str) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(
            self.set_encryption_key.as_ref(),
            "StorageService.SetEncryptionKey",
        )?;
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

impl<B: Bmc> FromBase<B> for StorageService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let StorageServiceSchema {
            data,
            volumes,
            storage_pools,
            storage_groups,
            file_systems,
            classes_of_service,
            default_class_of_service,
            drives,
            endpoints,
            links,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            volumes,
            storage_pools,
            storage_groups,
            file_systems,
            classes_of_service,
            default_class_of_service,
            drives,
            endpoints,
            hosting_system: links.hosting_system,
            set_encryption_key: actions.set_encryption_key,
        })
    }
}

impl<B: Bmc> Resource<B> for StorageService<B> {
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

    const SERVICE: &str = r##"{
        "@odata.id": "/redfish/v1/StorageServices/1",
        "Id": "1", "Name": "Storage Service",
        "StoragePools": {"@odata.id": "/redfish/v1/StorageServices/1/StoragePools"},
        "StorageGroups": {"@odata.id": "/redfish/v1/StorageServices/1/StorageGroups"},
        "Actions": {"#StorageService.SetEncryptionKey": {
            "target": "/redfish/v1/StorageServices/1/Actions/StorageService.SetEncryptionKey"}}
    }"##;

    async fn service(bmc: &Arc<TestBmc>) -> StorageService<TestBmc> {
        bmc.expect(Expect::get("/redfish/v1/StorageServices/1", SERVICE));
        crate::resource::fetch(bmc, &ODataId::from("/redfish/v1/StorageServices/1"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn set_encryption_key_posts_key() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::post(
            "/redfish/v1/StorageServices/1/Actions/StorageService.SetEncryptionKey",
            r#"{"EncryptionKey": "s3cr3t"}"#,
            204,
            "",
        ));
        assert!(service.set_encryption_key("s3cr3t").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pools_use_swordfish_members_layout() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::get(
            "/redfish/v1/StorageServices/1/StoragePools",
            r#"{"Members": [{"@odata.id": "/redfish/v1/StorageServices/1/StoragePools/Pool1"}],
                "Members@odata.count": 1}"#,
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/StorageServices/1/StoragePools/Pool1",
            r#"{"Id": "Pool1", "Name": "Pool 1", "RemainingCapacityPercent": 42,
                "LowSpaceWarningThresholdPercents": [10, 20]}"#,
        ));
        let pools = service.storage_pools().await.unwrap();
        assert_eq!(pools[0].data.remaining_capacity_percent, Some(42));
        assert!(service.file_systems().await.unwrap().is_empty());
        assert!(service.volumes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_group_exposes_volumes() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/StorageServices/1/StorageGroups/G1",
            r##"{"Id": "G1", "Name": "Group", "VolumesAreExposed": false,
                "Volumes": [{"@odata.id": "/redfish/v1/StorageServices/1/Volumes/V1"}],
                "Actions": {"#StorageGroup.ExposeVolumes": {
                    "target": "/redfish/v1/StorageServices/1/StorageGroups/G1/Actions/StorageGroup.ExposeVolumes"}}}"##,
        ));
        let group: StorageGroup<TestBmc> = crate::resource::fetch(
            &bmc,
            &ODataId::from("/redfish/v1/StorageServices/1/StorageGroups/G1"),
        )
        .await
        .unwrap();
        bmc.expect(Expect::post(
            "/redfish/v1/StorageServices/1/StorageGroups/G1/Actions/StorageGroup.ExposeVolumes",
            "{}",
            204,
            "",
        ));
        assert!(group.expose_volumes().await.unwrap().is_none());
        let err = group.hide_volumes().await.err().unwrap();
        assert_eq!(err.kind(), rsfish_core::ErrorKind::NotSupported);
    }
}
