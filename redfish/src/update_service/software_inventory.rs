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

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;

/// Data of a software inventory item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoftwareInventoryData {
    /// Version of the software.
    pub version: Option<String>,
    /// Whether the software can be updated.
    pub updateable: Option<bool>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Release date.
    pub release_date: Option<String>,
    /// Vendor identifier of the software.
    #[serde(rename = "SoftwareId")]
    pub software_id: Option<String>,
    /// Lowest version a downgrade may go to.
    pub lowest_supported_version: Option<String>,
    /// Status of the item.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct SoftwareInventorySchema {
    #[serde(flatten)]
    data: SoftwareInventoryData,
}

/// Represents a software inventory item in the update service.
///
/// Provides access to software version information and metadata.
pub struct SoftwareInventory<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded inventory data.
    pub data: SoftwareInventoryData,
}

impl<B: Bmc> FromBase<B> for SoftwareInventory<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let SoftwareInventorySchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for SoftwareInventory<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
