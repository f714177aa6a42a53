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

//! Service root.
//!
//! Entry point of the resource tree. Every accessor fetches the target on
//! call; nothing below the root is cached.

use crate::account_service::AccountService;
use crate::certificate_service::CertificateService;
use crate::chassis::Chassis;
use crate::composition_service::CompositionService;
use crate::composition_service::ResourceBlock;
use crate::computer_system::ComputerSystem;
use crate::event_service::EventService;
use crate::fabric::Fabric;
use crate::job_service::JobService;
use crate::manager::Manager;
use crate::protocol_features::ProtocolFeaturesSupported;
use crate::registries::MessageRegistryFile;
use crate::resource::fetch;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::session_service::Session;
use crate::session_service::SessionService;
use crate::storage::Storage;
use crate::swordfish::StorageService;
use crate::task_service::TaskService;
use crate::telemetry_service::TelemetryService;
use crate::update_service::UpdateService;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[cfg(feature = "oem")]
use crate::oem::Vendor;

/// Data of the service root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRootData {
    /// Version of the Redfish protocol.
    pub redfish_version: Option<String>,
    /// UUID of the service.
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    /// Vendor of the service.
    pub vendor: Option<String>,
    /// Product name of the service.
    pub product: Option<String>,
    /// Protocol features of the service.
    pub protocol_features_supported: Option<ProtocolFeaturesSupported>,
}

#[derive(Deserialize, Default)]
struct RootLinks {
    #[serde(rename = "Sessions", default)]
    sessions: Link,
    #[serde(rename = "ManagerProvidingService", default)]
    manager_providing_service: Link,
}

#[derive(Deserialize, Default)]
struct RootSlots {
    #[serde(rename = "Chassis", default)]
    chassis: Link,
    #[serde(rename = "Systems", default)]
    systems: Link,
    #[serde(rename = "Managers", default)]
    managers: Link,
    #[serde(rename = "Tasks", default)]
    task_service: Link,
    #[serde(rename = "SessionService", default)]
    session_service: Link,
    #[serde(rename = "AccountService", default)]
    account_service: Link,
    #[serde(rename = "EventService", default)]
    event_service: Link,
    #[serde(rename = "UpdateService", default)]
    update_service: Link,
    #[serde(rename = "StorageServices", default)]
    storage_services: Link,
    #[serde(rename = "Storage", default)]
    storage: Link,
    #[serde(rename = "CompositionService", default)]
    composition_service: Link,
    #[serde(rename = "ResourceBlocks", default)]
    resource_blocks: Link,
    #[serde(rename = "Registries", default)]
    registries: Link,
    #[serde(rename = "Fabrics", default)]
    fabrics: Link,
    #[serde(rename = "JobService", default)]
    job_service: Link,
    #[serde(rename = "CertificateService", default)]
    certificate_service: Link,
    #[serde(rename = "TelemetryService", default)]
    telemetry_service: Link,
    #[serde(rename = "Links", default)]
    links: RootLinks,
}

#[derive(Deserialize)]
struct ServiceRootSchema {
    #[serde(flatten)]
    data: ServiceRootData,
    #[serde(flatten)]
    slots: RootSlots,
}

/// Represents `ServiceRoot` of a Redfish service.
pub struct ServiceRoot<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded root data.
    pub data: ServiceRootData,
    slots: RootSlots,
}

impl<B: Bmc> ServiceRoot<B> {
    /// Fetch the service root.
    ///
    /// # Errors
    ///
    /// Returns error if retrieving the root path fails or the document
    /// does not decode.
    pub async fn new(bmc: Arc<B>) -> Result<Self, Error<B>> {
        let uri = ODataId::service_root();
        debug!(%uri, "fetching service root");
        fetch(&bmc, &uri).await
    }

    /// Vendor of the service, detected from the `Oem` block and the
    /// `Vendor` property.
    #[cfg(feature = "oem")]
    #[must_use]
    pub fn vendor(&self) -> Option<Vendor> {
        Vendor::detect(self.oem().as_ref(), self.data.vendor.as_deref())
    }

    /// All chassis.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn chassis(&self) -> Result<Vec<Chassis<B>>, Error<B>> {
        self.base.list(&self.slots.chassis).await
    }

    /// All computer systems.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn systems(&self) -> Result<Vec<ComputerSystem<B>>, Error<B>> {
        self.base.list(&self.slots.systems).await
    }

    /// All managers.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn managers(&self) -> Result<Vec<Manager<B>>, Error<B>> {
        self.base.list(&self.slots.managers).await
    }

    /// Manager providing this service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the root does not link it, or any
    /// fetch error.
    pub async fn manager_providing_service(&self) -> Result<Manager<B>, Error<B>> {
        self.base
            .follow(
                &self.slots.links.manager_providing_service,
                "ServiceRoot ManagerProvidingService",
            )
            .await
    }

    /// Open sessions.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn sessions(&self) -> Result<Vec<Session<B>>, Error<B>> {
        self.base.list(&self.slots.links.sessions).await
    }

    /// Task service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no task service,
    /// or any fetch error.
    pub async fn task_service(&self) -> Result<TaskService<B>, Error<B>> {
        self.base.follow(&self.slots.task_service, "TaskService").await
    }

    /// Session service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no session
    /// service, or any fetch error.
    pub async fn session_service(&self) -> Result<SessionService<B>, Error<B>> {
        self.base
            .follow(&self.slots.session_service, "SessionService")
            .await
    }

    /// Account service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no account
    /// service, or any fetch error.
    pub async fn account_service(&self) -> Result<AccountService<B>, Error<B>> {
        self.base
            .follow(&self.slots.account_service, "AccountService")
            .await
    }

    /// Event service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no event service,
    /// or any fetch error.
    pub async fn event_service(&self) -> Result<EventService<B>, Error<B>> {
        self.base
            .follow(&self.slots.event_service, "EventService")
            .await
    }

    /// Update service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no update
    /// service, or any fetch error.
    pub async fn update_service(&self) -> Result<UpdateService<B>, Error<B>> {
        self.base
            .follow(&self.slots.update_service, "UpdateService")
            .await
    }

    /// Swordfish storage services.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn storage_services(&self) -> Result<Vec<StorageService<B>>, Error<B>> {
        self.base.list(&self.slots.storage_services).await
    }

    /// Storage subsystems published at the root.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn storage(&self) -> Result<Vec<Storage<B>>, Error<B>> {
        self.base.list(&self.slots.storage).await
    }

    /// Composition service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no composition
    /// service, or any fetch error.
    pub async fn composition_service(&self) -> Result<CompositionService<B>, Error<B>> {
        self.base
            .follow(&self.slots.composition_service, "CompositionService")
            .await
    }

    /// Resource blocks published at the root.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn resource_blocks(&self) -> Result<Vec<ResourceBlock<B>>, Error<B>> {
        self.base.list(&self.slots.resource_blocks).await
    }

    /// Message registry files.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn registries(&self) -> Result<Vec<MessageRegistryFile<B>>, Error<B>> {
        self.base.list(&self.slots.registries).await
    }

    /// Fabrics.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn fabrics(&self) -> Result<Vec<Fabric<B>>, Error<B>> {
        self.base.list(&self.slots.fabrics).await
    }

    /// Job service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no job service,
    /// or any fetch error.
    pub async fn job_service(&self) -> Result<JobService<B>, Error<B>> {
        self.base.follow(&self.slots.job_service, "JobService").await
    }

    /// Certificate service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no certificate
    /// service, or any fetch error.
    pub async fn certificate_service(&self) -> Result<CertificateService<B>, Error<B>> {
        self.base
            .follow(&self.slots.certificate_service, "CertificateService")
            .await
    }

    /// Telemetry service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no telemetry
    /// service, or any fetch error.
    pub async fn telemetry_service(&self) -> Result<TelemetryService<B>, Error<B>> {
        self.base
            .follow(&self.slots.telemetry_service, "TelemetryService")
            .await
    }
}

impl<B: Bmc> FromBase<B> for ServiceRoot<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ServiceRootSchema { data, slots } = base.decode()?;
        Ok(Self { base, data, slots })
    }
}

impl<B: Bmc> Resource<B> for ServiceRoot<B> {
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

    type TestBmc = MockBmc<IoError>;

    const ROOT: &str = r##"{
        "@odata.id": "/redfish/v1/",
        "@odata.type": "#ServiceRoot.v1_11_0.ServiceRoot",
        "Id": "RootService", "Name": "Root Service",
        "RedfishVersion": "1.11.0", "Vendor": "Dell",
        "UUID": "92384634-2938-2342-8820-489239905423",
        "Oem": {"Dell": {"ServiceTag": "0000000"}},
        "ProtocolFeaturesSupported": {"ExpandQuery": {"ExpandAll": true, "MaxLevels": 1},
                                      "SelectQuery": true},
        "Systems": {"@odata.id": "/redfish/v1/Systems"},
        "Tasks": {"@odata.id": "/redfish/v1/TaskService"},
        "Links": {"Sessions": {"@odata.id": "/redfish/v1/SessionService/Sessions"}}
    }"##;

    async fn root(bmc: &Arc<TestBmc>) -> ServiceRoot<TestBmc> {
        bmc.expect(Expect::get("/redfish/v1/", ROOT));
        ServiceRoot::new(bmc.clone()).await.unwrap()
    }

    #[tokio::test]
    async fn decodes_root() {
        let bmc = Arc::new(TestBmc::default());
        let root = root(&bmc).await;
        assert_eq!(root.data.redfish_version.as_deref(), Some("1.11.0"));
        assert_eq!(root.odata_id(), &ODataId::service_root());
        let features = root.data.protocol_features_supported.as_ref().unwrap();
        assert_eq!(features.select_query, Some(true));
        assert_eq!(features.filter_query, None);
        #[cfg(feature = "oem")]
        assert_eq!(root.vendor(), Some(Vendor::Dell));
    }

    #[tokio::test]
    async fn data_survives_reencode() {
        let bmc = Arc::new(TestBmc::default());
        let root = root(&bmc).await;
        let encoded = serde_json::to_value(&root.data).unwrap();
        let decoded: ServiceRootData = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, root.data);
    }

    #[tokio::test]
    async fn missing_slots() {
        let bmc = Arc::new(TestBmc::default());
        let root = root(&bmc).await;
        assert!(root.chassis().await.unwrap().is_empty());
        let err = root.account_service().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }

    #[tokio::test]
    async fn task_service_follows_tasks_slot() {
        let bmc = Arc::new(TestBmc::default());
        let root = root(&bmc).await;
        bmc.expect(Expect::get(
            "/redfish/v1/TaskService",
            r#"{"Id": "TaskService", "Name": "Tasks", "ServiceEnabled": true}"#,
        ));
        let service = root.task_service().await.unwrap();
        assert_eq!(service.data.service_enabled, Some(true));
    }
}
