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

//! Dell extension of the computer system.

use crate::computer_system::ComputerSystem;
use crate::oem::dell::DellSoftwareInstallationService;
use crate::oem::dell::OemDell;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// Content of `Oem.Dell.DellSystem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DellSystemData {
    /// Release date of the BIOS.
    #[serde(rename = "BIOSReleaseDate")]
    pub bios_release_date: Option<String>,
    /// Slot of the base board in a modular chassis.
    pub base_board_chassis_slot: Option<String>,
    /// Battery rollup status.
    pub battery_rollup_status: Option<String>,
    /// Geometry of the blade enclosure.
    pub blade_geometry: Option<String>,
    /// IP address of the chassis management controller.
    #[serde(rename = "CMCIP")]
    pub cmc_ip: Option<String>,
    /// CPU rollup status.
    #[serde(rename = "CPURollupStatus")]
    pub cpu_rollup_status: Option<String>,
    /// Model of the modular enclosure.
    pub chassis_model: Option<String>,
    /// Name of the chassis.
    pub chassis_name: Option<String>,
    /// Service tag of the modular enclosure.
    pub chassis_service_tag: Option<String>,
    /// Height in rack units.
    pub chassis_system_height_unit: Option<i64>,
    /// Current rollup status.
    pub current_rollup_status: Option<String>,
    /// Calculated exhaust temperature.
    pub estimated_exhaust_temperature_celsius: Option<i64>,
    /// Estimated airflow in cubic feet per minute.
    #[serde(rename = "EstimatedSystemAirflowCFM")]
    pub estimated_system_airflow_cfm: Option<i64>,
    /// Express service code.
    pub express_service_code: Option<String>,
    /// Fan rollup status.
    pub fan_rollup_status: Option<String>,
    /// Internal dual SD module rollup status.
    #[serde(rename = "IDSDMRollupStatus")]
    pub idsdm_rollup_status: Option<String>,
    /// Chassis intrusion rollup status.
    pub intrusion_rollup_status: Option<String>,
    /// Whether the system is OEM branded.
    #[serde(rename = "IsOEMBranded")]
    pub is_oem_branded: Option<String>,
    /// Time of the last inventory collection.
    pub last_system_inventory_time: Option<String>,
    /// Time of the last update.
    pub last_update_time: Option<String>,
    /// Licensing rollup status.
    pub licensing_rollup_status: Option<String>,
    /// Physical size, e.g. `1 U`.
    pub managed_system_size: Option<String>,
    /// Number of CPU sockets.
    #[serde(rename = "MaxCPUSockets")]
    pub max_cpu_sockets: Option<i64>,
    /// Number of DIMM slots.
    #[serde(rename = "MaxDIMMSlots")]
    pub max_dimm_slots: Option<i64>,
    /// Number of PCIe slots.
    #[serde(rename = "MaxPCIeSlots")]
    pub max_pcie_slots: Option<i64>,
    /// Memory operation mode.
    pub memory_operation_mode: Option<String>,
    /// Node identifier of a blade.
    #[serde(rename = "NodeID")]
    pub node_id: Option<String>,
    /// Power supply rollup status.
    #[serde(rename = "PSRollupStatus")]
    pub ps_rollup_status: Option<String>,
    /// Platform GUID.
    #[serde(rename = "PlatformGUID")]
    pub platform_guid: Option<String>,
    /// Populated DIMM slots.
    #[serde(rename = "PopulatedDIMMSlots")]
    pub populated_dimm_slots: Option<i64>,
    /// Populated PCIe slots.
    #[serde(rename = "PopulatedPCIeSlots")]
    pub populated_pcie_slots: Option<i64>,
    /// State of the power cap.
    pub power_cap_enabled_state: Option<String>,
    /// SD card rollup status.
    #[serde(rename = "SDCardRollupStatus")]
    pub sd_card_rollup_status: Option<String>,
    /// System event log rollup status.
    #[serde(rename = "SELRollupStatus")]
    pub sel_rollup_status: Option<String>,
    /// Power allocated by the chassis manager.
    pub server_allocation_watts: Option<i64>,
    /// SMBIOS GUID.
    #[serde(rename = "smbiosGUID")]
    pub smbios_guid: Option<String>,
    /// Storage rollup status.
    pub storage_rollup_status: Option<String>,
    /// Memory error correction method.
    pub sys_mem_error_methodology: Option<String>,
    /// Memory failover state.
    pub sys_mem_fail_over_state: Option<String>,
    /// Location of the memory array.
    pub sys_mem_location: Option<String>,
    /// Memory primary status.
    pub sys_mem_primary_status: Option<String>,
    /// Generation of the system.
    pub system_generation: Option<String>,
    /// Model of the system as a number.
    #[serde(rename = "SystemID")]
    pub system_id: Option<i64>,
    /// Hardware revision.
    pub system_revision: Option<String>,
    /// Temperature rollup status.
    pub temp_rollup_status: Option<String>,
    /// Temperature statistics rollup status.
    pub temp_statistics_rollup_status: Option<String>,
    /// UUID of the system.
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    /// Voltage rollup status.
    pub volt_rollup_status: Option<String>,
}

#[derive(Deserialize, Default)]
struct DellOem {
    #[serde(rename = "DellSystem", default)]
    dell_system: DellSystemData,
}

#[derive(Deserialize, Default)]
struct DellLinks {
    #[serde(rename = "DellSoftwareInstallationService", default)]
    software_installation_service: Link,
}

#[derive(Deserialize, Default)]
struct LinksBlock {
    #[serde(rename = "Oem", default)]
    oem: OemDell<DellLinks>,
}

#[derive(Deserialize)]
struct DellComputerSystemSchema {
    #[serde(rename = "Oem", default)]
    oem: OemDell<DellOem>,
    #[serde(rename = "Links", default)]
    links: LinksBlock,
}

/// Computer system with the Dell extension decoded.
pub struct DellComputerSystem<B: Bmc> {
    system: ComputerSystem<B>,
    /// Content of `Oem.Dell.DellSystem`.
    pub dell_system: DellSystemData,
    software_installation_service: Link,
}

impl<B: Bmc> DellComputerSystem<B> {
    /// Decode the Dell extension from the payload `system` was fetched
    /// with. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the Dell blocks are malformed.
    pub fn from_computer_system(system: ComputerSystem<B>) -> Result<Self, Error<B>> {
        let DellComputerSystemSchema { oem, links } = system.base().decode()?;
        debug!(system = %system.odata_id(), "Dell computer system overlay");
        Ok(Self {
            system,
            dell_system: oem.dell.dell_system,
            software_installation_service: links.oem.dell.software_installation_service,
        })
    }

    /// Underlying standard computer system.
    #[must_use]
    pub const fn system(&self) -> &ComputerSystem<B> {
        &self.system
    }

    /// Identifier of the software installation service, if linked.
    #[must_use]
    pub fn software_installation_service_id(&self) -> Option<&ODataId> {
        self.software_installation_service.id()
    }

    /// Software installation service of the system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the system does not link it, or
    /// any fetch error.
    pub async fn software_installation_service(
        &self,
    ) -> Result<DellSoftwareInstallationService<B>, Error<B>> {
        self.system
            .base()
            .follow(
                &self.software_installation_service,
                "DellSoftwareInstallationService",
            )
            .await
    }
}

impl<B: Bmc> Resource<B> for DellComputerSystem<B> {
    fn base(&self) -> &ResourceBase<B> {
        self.system.base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    const SIS: &str = "/redfish/v1/Systems/System.Embedded.1/Oem/Dell/DellSoftwareInstallationService";

    #[tokio::test]
    async fn overlay_reads_cached_payload() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/Systems/System.Embedded.1",
            r#"{"@odata.id": "/redfish/v1/Systems/System.Embedded.1",
                "Id": "System.Embedded.1", "Name": "System",
                "Oem": {"Dell": {"DellSystem": {"SystemID": 3244,
                    "ChassisServiceTag": "ABC1234", "MaxDIMMSlots": 24,
                    "smbiosGUID": "44454c4c-0000"}}},
                "Links": {"Oem": {"Dell": {"DellSoftwareInstallationService":
                    {"@odata.id": "/redfish/v1/Systems/System.Embedded.1/Oem/Dell/DellSoftwareInstallationService"}}}}}"#,
        ));
        let system: ComputerSystem<TestBmc> = crate::resource::fetch(
            &bmc,
            &ODataId::from("/redfish/v1/Systems/System.Embedded.1"),
        )
        .await
        .unwrap();
        let dell = DellComputerSystem::from_computer_system(system).unwrap();
        assert_eq!(dell.dell_system.system_id, Some(3244));
        assert_eq!(dell.dell_system.max_dimm_slots, Some(24));
        assert_eq!(dell.dell_system.smbios_guid.as_deref(), Some("44454c4c-0000"));
        assert_eq!(
            dell.software_installation_service_id(),
            Some(&ODataId::from(SIS))
        );
        assert_eq!(dell.id().inner(), "System.Embedded.1");
    }

    #[tokio::test]
    async fn missing_link_is_not_supported() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/Systems/1",
            r#"{"@odata.id": "/redfish/v1/Systems/1", "Id": "1", "Name": "System"}"#,
        ));
        let system: ComputerSystem<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/Systems/1"))
                .await
                .unwrap();
        let dell = DellComputerSystem::from_computer_system(system).unwrap();
        assert_eq!(dell.dell_system, DellSystemData::default());
        let err = dell.software_installation_service().await.err().unwrap();
        assert_eq!(err.kind(), rsfish_core::ErrorKind::NotSupported);
    }

    #[test]
    fn data_round_trip() {
        let data: DellSystemData = serde_json::from_str(
            r#"{"SystemID": 3244, "ChassisServiceTag": "ABC1234", "MaxDIMMSlots": 24,
                "smbiosGUID": "44454c4c-0000", "BIOSReleaseDate": "07/12/2023",
                "CPURollupStatus": "OK"}"#,
        )
        .unwrap();
        assert_eq!(data.system_id, Some(3244));
        let again: DellSystemData =
            serde_json::from_value(serde_json::to_value(&data).unwrap()).unwrap();
        assert_eq!(data, again);
    }
}
