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
use crate::chassis::Power;
use crate::chassis::Thermal;
use crate::collection;
use crate::computer_system::ComputerSystem;
use crate::log_service::LogService;
use crate::manager::Manager;
use crate::resource::FromBase;
use crate::resource::PowerState;
use crate::resource::ResetBody;
use crate::resource::ResetType;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Physical form of a chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChassisType {
    /// An equipment rack.
    Rack,
    /// A blade enclosure.
    Blade,
    /// A rack-mounted server.
    RackMount,
    /// An enclosure.
    Enclosure,
    /// A stand-alone system.
    StandAlone,
    /// A sled.
    Sled,
    /// A card.
    Card,
    /// A module.
    Module,
    /// A drawer.
    Drawer,
    /// A storage enclosure.
    StorageEnclosure,
    /// A logical division.
    Component,
    /// A zone.
    Zone,
    /// Another type.
    Other,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Data of a chassis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChassisData {
    /// Physical form of the chassis.
    pub chassis_type: Option<ChassisType>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Stock-keeping unit.
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Part number.
    pub part_number: Option<String>,
    /// Asset tag.
    pub asset_tag: Option<String>,
    /// UUID of the chassis.
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    /// Power state.
    pub power_state: Option<PowerState>,
    /// State of the indicator LED.
    #[serde(rename = "IndicatorLED")]
    pub indicator_led: Option<String>,
    /// Status of the chassis.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct ChassisLinks {
    #[serde(rename = "ComputerSystems", default)]
    computer_systems: LinkList,
    #[serde(rename = "ManagedBy", default)]
    managed_by: LinkList,
    #[serde(rename = "Contains", default)]
    contains: LinkList,
    #[serde(rename = "ContainedBy", default)]
    contained_by: Link,
}

#[derive(Deserialize, Default)]
struct ChassisActions {
    #[serde(rename = "#Chassis.Reset")]
    reset: Option<Action>,
}

#[derive(Deserialize)]
struct ChassisSchema {
    #[serde(flatten)]
    data: ChassisData,
    #[serde(rename = "Thermal", default)]
    thermal: Link,
    #[serde(rename = "Power", default)]
    power: Link,
    #[serde(rename = "LogServices", default)]
    log_services: Link,
    #[serde(rename = "Links", default)]
    links: ChassisLinks,
    #[serde(rename = "Actions", default)]
    actions: ChassisActions,
}

/// Represents a chassis in the BMC.
///
/// Provides access to chassis information and sub-resources such as
/// thermal and power readings.
pub struct Chassis<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded chassis data.
    pub data: ChassisData,
    thermal: Link,
    power: Link,
    log_services: Link,
    links: ChassisLinks,
    reset: Option<Action>,
}

impl<B: Bmc> Chassis<B> {
    /// Legacy thermal readings of this chassis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the chassis has no `Thermal`
    /// link, or any fetch error.
    pub async fn thermal(&self) -> Result<Thermal<B>, Error<B>> {
        self.base.follow(&self.thermal, "Chassis Thermal").await
    }

    /// Legacy power readings of this chassis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the chassis has no `Power`
    /// link, or any fetch error.
    pub async fn power(&self) -> Result<Power<B>, Error<B>> {
        self.base.follow(&self.power, "Chassis Power").await
    }

    /// Log services of this chassis.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn log_services(&self) -> Result<Vec<LogService<B>>, Error<B>> {
        self.base.list(&self.log_services).await
    }

    /// Systems in this chassis.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a system fails.
    pub async fn computer_systems(&self) -> Result<Vec<ComputerSystem<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.computer_systems).await
    }

    /// Managers of this chassis.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a manager fails.
    pub async fn managed_by(&self) -> Result<Vec<Manager<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.managed_by).await
    }

    /// Chassis contained in this one.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a chassis fails.
    pub async fn contains(&self) -> Result<Vec<Self>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.contains).await
    }

    /// Chassis containing this one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the chassis is not contained in
    /// another one, or any fetch error.
    pub async fn contained_by(&self) -> Result<Self, Error<B>> {
        self.base
            .follow(&self.links.contained_by, "Chassis ContainedBy")
            .await
    }

    /// Reset the chassis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised,
    /// [`Error::InvalidParameter`] if `reset_type` is not allowed, or any
    /// dispatch error.
    pub async fn reset(&self, reset_type: ResetType) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.reset.as_ref(), "Chassis.Reset")?;
        check_reset_type(self.reset.as_ref(), reset_type)?;
        action::dispatch(self.base.bmc(), target, &ResetBody { reset_type }).await
    }
}

/// Reject reset types the service does not advertise.
pub(crate) fn check_reset_type<B: Bmc>(
    action: Option<&Action>,
    reset_type: ResetType,
) -> Result<(), Error<B>> {
    match action {
        Some(action) if !action.allows("ResetType", reset_type.as_str()) => {
            Err(Error::InvalidParameter(format!(
                "reset type {} is not allowed; allowed: {}",
                reset_type.as_str(),
                action.allowable_values("ResetType").join(", ")
            )))
        }
        _ => Ok(()),
    }
}

impl<B: Bmc> FromBase<B> for Chassis<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ChassisSchema {
            data,
            thermal,
            power,
            log_services,
            links,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            thermal,
            power,
            log_services,
            links,
            reset: actions.reset,
        })
    }
}

impl<B: Bmc> Resource<B> for Chassis<B> {
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

    const CHASSIS: &str = r##"{
        "@odata.id": "/redfish/v1/Chassis/1U",
        "@odata.type": "#Chassis.v1_14_0.Chassis",
        "Id": "1U", "Name": "Computer System Chassis",
        "ChassisType": "RackMount", "Manufacturer": "Contoso",
        "PowerState": "On",
        "Status": {"State": "Enabled", "Health": "OK"},
        "Thermal": {"@odata.id": "/redfish/v1/Chassis/1U/Thermal"},
        "Links": {
            "ComputerSystems": [{"@odata.id": "/redfish/v1/Systems/437XR1138R2"}],
            "ManagedBy": [{"@odata.id": "/redfish/v1/Managers/BMC"}]
        },
        "Actions": {"#Chassis.Reset": {
            "target": "/redfish/v1/Chassis/1U/Actions/Chassis.Reset",
            "ResetType@Redfish.AllowableValues": ["On", "ForceOff"]
        }}
    }"##;

    async fn chassis(bmc: &Arc<TestBmc>) -> Chassis<TestBmc> {
        bmc.expect(Expect::get("/redfish/v1/Chassis/1U", CHASSIS));
        crate::resource::fetch(bmc, &ODataId::from("/redfish/v1/Chassis/1U"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn decodes_data_and_slots() {
        let bmc = Arc::new(TestBmc::default());
        let chassis = chassis(&bmc).await;
        assert_eq!(chassis.data.chassis_type, Some(ChassisType::RackMount));
        assert_eq!(chassis.data.power_state, Some(PowerState::On));
        let err = chassis.power().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        assert!(chassis.log_services().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_checks_allowable_values() {
        let bmc = Arc::new(TestBmc::default());
        let chassis = chassis(&bmc).await;
        let err = chassis.reset(ResetType::Nmi).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Validation);

        bmc.expect(Expect::post(
            "/redfish/v1/Chassis/1U/Actions/Chassis.Reset",
            r#"{"ResetType": "ForceOff"}"#,
            204,
            "",
        ));
        assert!(chassis.reset(ResetType::ForceOff).await.unwrap().is_none());
    }

    #[test]
    fn data_round_trip() {
        let data: ChassisData = serde_json::from_str(CHASSIS).unwrap();
        let again: ChassisData =
            serde_json::from_value(serde_json::to_value(&data).unwrap()).unwrap();
        assert_eq!(data, again);
    }
}
