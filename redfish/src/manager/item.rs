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
use crate::chassis::check_reset_type;
use crate::chassis::Chassis;
use crate::collection;
use crate::computer_system::ComputerSystem;
use crate::ethernet_interface::EthernetInterface;
use crate::log_service::LogService;
use crate::manager::ManagerNetworkProtocol;
use crate::resource::FromBase;
use crate::resource::PowerState;
use crate::resource::ResetBody;
use crate::resource::ResetType;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::retry::HealthProbe;
use crate::task_service::Task;
use crate::Error;
use http::Method;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Kind of a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManagerType {
    /// A controller that provides management functions for a system.
    ManagementController,
    /// A controller that provides management functions for an enclosure.
    EnclosureManager,
    /// A baseboard management controller.
    BMC,
    /// A controller that provides management functions for a rack.
    RackManager,
    /// A controller that provides management functions for an auxiliary controller.
    AuxiliaryController,
    /// A software-based service that provides management functions.
    Service,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// `ResetType` parameter of `#Manager.ResetToDefaults`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResetToDefaultsType {
    /// Reset all settings to factory defaults.
    ResetAll,
    /// Reset all settings except network and local user names and passwords.
    PreserveNetworkAndUsers,
    /// Reset all settings except network settings.
    PreserveNetwork,
}

/// Data of a manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagerData {
    /// Kind of manager.
    pub manager_type: Option<ManagerType>,
    /// Firmware version.
    pub firmware_version: Option<String>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// UUID of the manager.
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    /// Current date and time.
    pub date_time: Option<String>,
    /// Offset from UTC, e.g. `+01:00`.
    pub date_time_local_offset: Option<String>,
    /// Power state.
    pub power_state: Option<PowerState>,
    /// Status of the manager.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct ManagerLinks {
    #[serde(rename = "ManagerForServers", default)]
    manager_for_servers: LinkList,
    #[serde(rename = "ManagerForChassis", default)]
    manager_for_chassis: LinkList,
}

#[derive(Deserialize, Default)]
struct ManagerActions {
    #[serde(rename = "#Manager.Reset")]
    reset: Option<Action>,
    #[serde(rename = "#Manager.ResetToDefaults")]
    reset_to_defaults: Option<Action>,
}

#[derive(Deserialize)]
struct ManagerSchema {
    #[serde(flatten)]
    data: ManagerData,
    #[serde(rename = "NetworkProtocol", default)]
    network_protocol: Link,
    #[serde(rename = "EthernetInterfaces", default)]
    ethernet_interfaces: Link,
    #[serde(rename = "LogServices", default)]
    log_services: Link,
    #[serde(rename = "Links", default)]
    links: ManagerLinks,
    #[serde(rename = "Actions", default)]
    actions: ManagerActions,
}

#[derive(Serialize)]
struct ResetToDefaultsBody {
    #[serde(rename = "ResetType")]
    reset_type: ResetToDefaultsType,
}

/// Represents a manager (BMC) in the service.
pub struct Manager<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded manager data.
    pub data: ManagerData,
    network_protocol: Link,
    ethernet_interfaces: Link,
    log_services: Link,
    links: ManagerLinks,
    actions: ManagerActions,
}

impl<B: Bmc> Manager<B> {
    /// Network protocol settings of the manager.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the manager has no
    /// `NetworkProtocol` link, or any fetch error.
    pub async fn network_protocol(&self) -> Result<ManagerNetworkProtocol<B>, Error<B>> {
        self.base
            .follow(&self.network_protocol, "Manager NetworkProtocol")
            .await
    }

    /// Network interfaces of the manager.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or an interface fails.
    pub async fn ethernet_interfaces(&self) -> Result<Vec<EthernetInterface<B>>, Error<B>> {
        self.base.list(&self.ethernet_interfaces).await
    }

    /// Log services of the manager.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn log_services(&self) -> Result<Vec<LogService<B>>, Error<B>> {
        self.base.list(&self.log_services).await
    }

    /// Systems managed by this manager.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a system fails.
    pub async fn manager_for_servers(&self) -> Result<Vec<ComputerSystem<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.manager_for_servers).await
    }

    /// Chassis managed by this manager.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a chassis fails.
    pub async fn manager_for_chassis(&self) -> Result<Vec<Chassis<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.manager_for_chassis).await
    }

    /// Reset the manager.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised,
    /// [`Error::InvalidParameter`] if `reset_type` is not allowed, or any
    /// dispatch error.
    pub async fn reset(&self, reset_type: ResetType) -> Result<Option<Task<B>>, Error<B>> {
        let reset = self.actions.reset.as_ref();
        let target = action::target(reset, "Manager.Reset")?;
        check_reset_type(reset, reset_type)?;
        action::dispatch(self.base.bmc(), target, &ResetBody { reset_type }).await
    }

    /// Reset manager settings to factory defaults. This may reset the
    /// manager.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn reset_to_defaults(
        &self,
        reset_type: ResetToDefaultsType,
    ) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(
            self.actions.reset_to_defaults.as_ref(),
            "Manager.ResetToDefaults",
        )?;
        action::dispatch(self.base.bmc(), target, &ResetToDefaultsBody { reset_type }).await
    }
}

impl<B: Bmc> HealthProbe<B> for Manager<B> {
    async fn probe(&self) -> Result<(), Error<B>> {
        let current = self.refresh().await?;
        if current.id().inner().is_empty() {
            return Err(Error::Protocol {
                uri: self.odata_id().clone(),
                method: Method::GET,
                reason: "manager reports no Id".into(),
            });
        }
        Ok(())
    }

    async fn force_reset(&self) -> Result<(), Error<B>> {
        self.reset(ResetType::GracefulRestart).await.map(|_| ())
    }
}

impl<B: Bmc> FromBase<B> for Manager<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ManagerSchema {
            data,
            network_protocol,
            ethernet_interfaces,
            log_services,
            links,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            network_protocol,
            ethernet_interfaces,
            log_services,
            links,
            actions,
        })
    }
}

impl<B: Bmc> Resource<B> for Manager<B> {
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
    use rsfish_core::ODataId;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    const URI: &str = "/redfish/v1/Managers/BMC";

    const MANAGER: &str = r##"{
        "@odata.id": "/redfish/v1/Managers/BMC",
        "Id": "BMC", "Name": "Manager", "ManagerType": "BMC",
        "FirmwareVersion": "1.00",
        "NetworkProtocol": {"@odata.id": "/redfish/v1/Managers/BMC/NetworkProtocol"},
        "Links": {"ManagerForServers": [{"@odata.id": "/redfish/v1/Systems/1"}]},
        "Actions": {
            "#Manager.Reset": {
                "target": "/redfish/v1/Managers/BMC/Actions/Manager.Reset",
                "ResetType@Redfish.AllowableValues": ["ForceRestart", "GracefulRestart"]
            },
            "#Manager.ResetToDefaults": {
                "target": "/redfish/v1/Managers/BMC/Actions/Manager.ResetToDefaults"
            }
        }
    }"##;

    async fn manager(bmc: &Arc<TestBmc>) -> Manager<TestBmc> {
        bmc.expect(Expect::get(URI, MANAGER));
        crate::resource::fetch(bmc, &ODataId::from(URI)).await.unwrap()
    }

    #[tokio::test]
    async fn probe_refreshes_manager() {
        let bmc = Arc::new(TestBmc::default());
        let manager = manager(&bmc).await;
        bmc.expect(Expect::get(URI, MANAGER));
        manager.probe().await.unwrap();

        bmc.expect(Expect::get(URI, r#"{"Name": "Manager"}"#));
        let err = manager.probe().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[tokio::test]
    async fn force_reset_is_graceful_restart() {
        let bmc = Arc::new(TestBmc::default());
        let manager = manager(&bmc).await;
        bmc.expect(Expect::post(
            "/redfish/v1/Managers/BMC/Actions/Manager.Reset",
            r#"{"ResetType": "GracefulRestart"}"#,
            204,
            "",
        ));
        manager.force_reset().await.unwrap();
        assert_eq!(bmc.pending(), 0);
    }

    #[tokio::test]
    async fn reset_to_defaults_posts_type() {
        let bmc = Arc::new(TestBmc::default());
        let manager = manager(&bmc).await;
        bmc.expect(Expect::post(
            "/redfish/v1/Managers/BMC/Actions/Manager.ResetToDefaults",
            r#"{"ResetType": "PreserveNetwork"}"#,
            204,
            "",
        ));
        manager
            .reset_to_defaults(ResetToDefaultsType::PreserveNetwork)
            .await
            .unwrap();
        assert!(manager.ethernet_interfaces().await.unwrap().is_empty());
    }

    #[test]
    fn data_round_trip() {
        let data: ManagerData = serde_json::from_str(MANAGER).unwrap();
        let again: ManagerData =
            serde_json::from_value(serde_json::to_value(&data).unwrap()).unwrap();
        assert_eq!(data, again);
    }
}
