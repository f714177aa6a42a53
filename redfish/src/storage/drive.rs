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

use crate::collection;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::storage::Volume;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Media of a drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// Rotating media.
    HDD,
    /// Solid state media.
    SSD,
    /// Shingled magnetic recording.
    SMR,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Data of a drive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DriveData {
    /// Media type.
    pub media_type: Option<MediaType>,
    /// Interface protocol, e.g. `SAS`, `SATA` or `NVMe`.
    pub protocol: Option<String>,
    /// Size in bytes.
    pub capacity_bytes: Option<u64>,
    /// Block size in bytes.
    pub block_size_bytes: Option<u32>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Part number.
    pub part_number: Option<String>,
    /// Firmware revision.
    pub revision: Option<String>,
    /// Whether a failure is predicted.
    pub failure_predicted: Option<bool>,
    /// Remaining life of the media.
    pub predicted_media_life_left_percent: Option<f64>,
    /// `Unencrypted`, `Unlocked`, `Locked` or `Foreign`.
    pub encryption_status: Option<String>,
    /// Hot spare role.
    pub hotspare_type: Option<String>,
    /// Status of the drive.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct DriveLinks {
    #[serde(rename = "Volumes", default)]
    volumes: LinkList,
}

#[derive(Deserialize)]
struct DriveSchema {
    #[serde(flatten)]
    data: DriveData,
    #[serde(rename = "Links", default)]
    links: DriveLinks,
}

/// Drive of a storage subsystem.
pub struct Drive<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded drive data.
    pub data: DriveData,
    volumes: LinkList,
}

impl<B: Bmc> Drive<B> {
    /// Volumes using this drive.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a volume fails.
    pub async fn volumes(&self) -> Result<Vec<Volume<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.volumes).await
    }
}

impl<B: Bmc> FromBase<B> for Drive<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let DriveSchema { data, links } = base.decode()?;
        Ok(Self {
            base,
            data,
            volumes: links.volumes,
        })
    }
}

impl<B: Bmc> Resource<B> for Drive<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
