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

//! Volumes.
//!
//! The same type serves Redfish storage and Swordfish storage services:
//! Swordfish properties are optional and absent on plain Redfish volumes.

use crate::action;
use crate::collection;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::storage::Drive;
use crate::swordfish::ClassOfService;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Utilization of a capacity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapacityInfo {
    /// Bytes currently allocated.
    pub allocated_bytes: Option<u64>,
    /// Bytes consumed.
    pub consumed_bytes: Option<u64>,
    /// Bytes guaranteed to be available.
    pub guaranteed_bytes: Option<u64>,
    /// Maximum bytes that may be provisioned.
    pub provisioned_bytes: Option<u64>,
}

/// Storage capacity split by use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Capacity {
    /// User data.
    pub data: Option<CapacityInfo>,
    /// Metadata.
    pub metadata: Option<CapacityInfo>,
    /// Snapshots.
    pub snapshot: Option<CapacityInfo>,
    /// Whether capacity is thin provisioned.
    pub is_thin_provisioned: Option<bool>,
}

/// RAID level of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidType {
    /// Striping.
    RAID0,
    /// Mirroring.
    RAID1,
    /// Mirroring of three copies.
    RAID1E,
    /// Distributed parity.
    RAID5,
    /// Dual distributed parity.
    RAID6,
    /// Striped mirrors.
    RAID10,
    /// Striped RAID5 sets.
    RAID50,
    /// Striped RAID6 sets.
    RAID60,
    /// No redundancy.
    None,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// `InitializeType` parameter of `#Volume.Initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitializeType {
    /// Available immediately, initialized in the background.
    Fast,
    /// Available after full initialization.
    Slow,
}

/// Data of a volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeData {
    /// Size in bytes.
    pub capacity_bytes: Option<u64>,
    /// Swordfish capacity details.
    pub capacity: Option<Capacity>,
    /// RAID level.
    #[serde(rename = "RAIDType")]
    pub raid_type: Option<RaidType>,
    /// Block size in bytes.
    pub block_size_bytes: Option<u32>,
    /// Strip size in bytes.
    pub strip_size_bytes: Option<u64>,
    /// Whether the volume is encrypted.
    pub encrypted: Option<bool>,
    /// Whether data is compressed.
    pub compressed: Option<bool>,
    /// Whether data is deduplicated.
    pub deduplicated: Option<bool>,
    /// Logical unit number.
    pub logical_unit_number: Option<u32>,
    /// `Fixed` or `Thin`.
    pub provisioning_policy: Option<String>,
    /// Free space left in percent.
    pub remaining_capacity_percent: Option<u32>,
    /// Status of the volume.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct VolumeLinks {
    #[serde(rename = "Drives", default)]
    drives: LinkList,
    #[serde(rename = "ClassOfService", default)]
    class_of_service: Link,
}

#[derive(Deserialize, Default)]
struct VolumeActions {
    #[serde(rename = "#Volume.Initialize")]
    initialize: Option<Action>,
    #[serde(rename = "#Volume.CheckConsistency")]
    check_consistency: Option<Action>,
}

#[derive(Deserialize)]
struct VolumeSchema {
    #[serde(flatten)]
    data: VolumeData,
    #[serde(rename = "Links", default)]
    links: VolumeLinks,
    #[serde(rename = "Actions", default)]
    actions: VolumeActions,
}

#[derive(Serialize)]
struct InitializeBody {
    #[serde(rename = "InitializeType")]
    initialize_type: InitializeType,
}

/// Volume of a storage subsystem or storage service.
pub struct Volume<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded volume data.
    pub data: VolumeData,
    links: VolumeLinks,
    actions: VolumeActions,
}

impl<B: Bmc> Volume<B> {
    /// Drives backing this volume.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a drive fails.
    pub async fn drives(&self) -> Result<Vec<Drive<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.drives).await
    }

    /// Class of service the volume conforms to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the volume has no class of
    /// service, or any fetch error.
    pub async fn class_of_service(&self) -> Result<ClassOfService<B>, Error<B>> {
        self.base
            .follow(&self.links.class_of_service, "Volume ClassOfService")
            .await
    }

    /// Initialize (erase) the volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised,
    /// [`Error::InvalidParameter`] if `initialize_type` is not allowed, or
    /// any dispatch error.
    pub async fn initialize(
        &self,
        initialize_type: InitializeType,
    ) -> Result<Option<Task<B>>, Error<B>> {
        let initialize = self.actions.initialize.as_ref();
        let target = action::target(initialize, "Volume.Initialize")?;
        let name = match initialize_type {
            InitializeType::Fast => "Fast",
            InitializeType::Slow => "Slow",
        };
        if let Some(initialize) = initialize {
            if !initialize.allows("InitializeType", name) {
                return Err(Error::InvalidParameter(format!(
                    "initialize type {name} is not allowed"
                )));
            }
        }
        action::dispatch(self.base.bmc(), target, &InitializeBody { initialize_type }).await
    }

    /// Check the consistency of a redundant volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn check_consistency(&self) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(
            self.actions.check_consistency.as_ref(),
            "Volume.CheckConsistency",
        )?;
        action::dispatch(self.base.bmc(), target, &serde_json::Map::new()).await
    }
}

impl<B: Bmc> FromBase<B> for Volume<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let VolumeSchema {
            data,
            links,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            links,
            actions,
        })
    }
}

impl<B: Bmc> Resource<B> for Volume<B> {
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

    const URI: &str = "/redfish/v1/StorageServices/1/Volumes/1";

    #[tokio::test]
    async fn swordfish_fields_and_initialize() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            URI,
            r##"{"Id": "1", "Name": "Vol1", "CapacityBytes": 1099511627776, "RAIDType": "RAID1",
                "Capacity": {"Data": {"AllocatedBytes": 1099511627776, "ConsumedBytes": 1024},
                             "IsThinProvisioned": true},
                "Actions": {"#Volume.Initialize": {
                    "target": "/redfish/v1/StorageServices/1/Volumes/1/Actions/Volume.Initialize",
                    "InitializeType@Redfish.AllowableValues": ["Fast"]}}}"##,
        ));
        let volume: Volume<TestBmc> = crate::resource::fetch(&bmc, &ODataId::from(URI))
            .await
            .unwrap();
        assert_eq!(volume.data.raid_type, Some(RaidType::RAID1));
        let capacity = volume.data.capacity.as_ref().unwrap();
        assert_eq!(capacity.is_thin_provisioned, Some(true));
        assert_eq!(capacity.data.as_ref().unwrap().consumed_bytes, Some(1024));

        let err = volume.initialize(InitializeType::Slow).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Validation);
        bmc.expect(Expect::post(
            "/redfish/v1/StorageServices/1/Volumes/1/Actions/Volume.Initialize",
            r#"{"InitializeType": "Fast"}"#,
            204,
            "",
        ));
        assert!(volume.initialize(InitializeType::Fast).await.unwrap().is_none());
        let err = volume.class_of_service().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }

    #[test]
    fn data_round_trip() {
        let data: VolumeData = serde_json::from_str(
            r#"{"Id": "1", "Name": "Vol1", "CapacityBytes": 1099511627776, "RAIDType": "RAID1",
                "Capacity": {"Data": {"AllocatedBytes": 1099511627776, "ConsumedBytes": 1024},
                             "IsThinProvisioned": true}}"#,
        )
        .unwrap();
        assert_eq!(data.raid_type, Some(RaidType::RAID1));
        let again: VolumeData =
            serde_json::from_value(serde_json::to_value(&data).unwrap()).unwrap();
        assert_eq!(data, again);
    }
}
