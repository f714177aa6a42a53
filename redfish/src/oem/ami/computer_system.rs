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

use crate::computer_system::ComputerSystem;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Behaviour of the BMC when the host boots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerBootMode {
    None,
    SoftReset,
    ResetTimeout,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmiBiosTable {
    pub description: Option<String>,
    /// Content of the BIOS table files.
    pub files_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableTag {
    pub table_type: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmiBiosTableTags {
    pub description: Option<String>,
    #[serde(rename = "NumberofTables")]
    pub number_of_tables: Option<String>,
    #[serde(default)]
    pub table_tags: Vec<TableTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Crc {
    /// Checksums per BIOS setting group.
    #[serde(default)]
    pub group_crc_list: Vec<HashMap<String, u64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Inventory {
    #[serde(default)]
    pub crc: Crc,
}

/// Content of `Oem.Ami.BIOS`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmiBios {
    #[serde(default)]
    pub bios_table: AmiBiosTable,
    #[serde(default)]
    pub bios_table_tags: AmiBiosTableTags,
    #[serde(default)]
    pub inventory: Inventory,
    pub redfish_version: Option<String>,
    #[serde(rename = "RTPVersion")]
    pub rtp_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagerBootConfiguration {
    pub manager_boot_mode: Option<ManagerBootMode>,
}

/// Content of `Oem.Ami`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmiSystemData {
    #[serde(rename = "BIOS", default)]
    pub bios: AmiBios,
    #[serde(rename = "ManagerBootConfiguration", default)]
    pub manager_boot_configuration: ManagerBootConfiguration,
    /// Mode of the SMBus system interface.
    #[serde(rename = "SSIFMode")]
    pub ssif_mode: Option<String>,
}

#[derive(Deserialize, Default)]
struct OemAmi {
    #[serde(rename = "Ami", default)]
    ami: AmiSystemData,
}

#[derive(Deserialize)]
struct AmiComputerSystemSchema {
    #[serde(rename = "Oem", default)]
    oem: OemAmi,
}

/// Computer system with the AMI extension decoded.
pub struct AmiComputerSystem<B: Bmc> {
    system: ComputerSystem<B>,
    /// Content of `Oem.Ami`.
    pub ami: AmiSystemData,
}

impl<B: Bmc> AmiComputerSystem<B> {
    /// Decode the AMI extension from the payload `system` was fetched
    /// with. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the AMI block is malformed.
    pub fn from_computer_system(system: ComputerSystem<B>) -> Result<Self, Error<B>> {
        let AmiComputerSystemSchema { oem } = system.base().decode()?;
        debug!(system = %system.odata_id(), "AMI computer system overlay");
        Ok(Self {
            system,
            ami: oem.ami,
        })
    }

    /// Underlying standard computer system.
    #[must_use]
    pub const fn system(&self) -> &ComputerSystem<B> {
        &self.system
    }

    /// Boot behaviour of the BMC, if reported.
    #[must_use]
    pub fn manager_boot_mode(&self) -> Option<ManagerBootMode> {
        self.ami.manager_boot_configuration.manager_boot_mode
    }
}

impl<B: Bmc> Resource<B> for AmiComputerSystem<B> {
    fn base(&self) -> &ResourceBase<B> {
        self.system.base()
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
    async fn ami_block_is_decoded() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/Systems/Self",
            r#"{"@odata.id": "/redfish/v1/Systems/Self", "Id": "Self", "Name": "System",
                "Oem": {"Ami": {
                    "BIOS": {"RedfishVersion": "1.11.0", "RTPVersion": "1.8.A",
                        "Inventory": {"Crc": {"GroupCrcList": [{"CPU": 2816476215}]}},
                        "BiosTableTags": {"NumberofTables": "1",
                            "TableTags": [{"TableType": "AttributeRegistry", "Value": "2e4c"}]}},
                    "ManagerBootConfiguration": {"ManagerBootMode": "SoftReset"},
                    "SSIFMode": "Enabled"}}}"#,
        ));
        let system: ComputerSystem<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/Systems/Self"))
                .await
                .unwrap();
        let ami = AmiComputerSystem::from_computer_system(system).unwrap();
        assert_eq!(ami.manager_boot_mode(), Some(ManagerBootMode::SoftReset));
        assert_eq!(ami.ami.ssif_mode.as_deref(), Some("Enabled"));
        assert_eq!(ami.ami.bios.rtp_version.as_deref(), Some("1.8.A"));
        assert_eq!(
            ami.ami.bios.inventory.crc.group_crc_list[0].get("CPU"),
            Some(&2_816_476_215)
        );
        assert_eq!(ami.ami.bios.bios_table_tags.table_tags.len(), 1);
    }

    #[test]
    fn data_round_trip() {
        let data: AmiSystemData = serde_json::from_str(
            r#"{"BIOS": {"RedfishVersion": "1.11.0", "RTPVersion": "1.8.A",
                    "Inventory": {"Crc": {"GroupCrcList": [{"CPU": 2816476215}]}},
                    "BiosTableTags": {"NumberofTables": "1",
                        "TableTags": [{"TableType": "AttributeRegistry", "Value": "2e4c"}]}},
                "ManagerBootConfiguration": {"ManagerBootMode": "SoftReset"},
                "SSIFMode": "Enabled"}"#,
        )
        .unwrap();
        let again: AmiSystemData =
            serde_json::from_value(serde_json::to_value(&data).unwrap()).unwrap();
        assert_eq!(data, again);
    }
}
