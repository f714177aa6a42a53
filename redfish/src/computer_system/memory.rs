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

/// Data of a memory module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemoryData {
    /// `DRAM`, `NVDIMM_N`, `NVDIMM_F`, `NVDIMM_P` or `IntelOptane`.
    pub memory_type: Option<String>,
    /// DRAM generation, e.g. `DDR4`.
    pub memory_device_type: Option<String>,
    /// Capacity in MiB.
    #[serde(rename = "CapacityMiB")]
    pub capacity_mib: Option<u64>,
    /// Operating speed.
    #[serde(rename = "OperatingSpeedMhz")]
    pub operating_speed_mhz: Option<u32>,
    /// Data width in bits.
    pub data_width_bits: Option<u32>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Part number.
    pub part_number: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Label of the slot.
    pub device_locator: Option<String>,
    /// Status of the module.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct MemorySchema {
    #[serde(flatten)]
    data: MemoryData,
}

/// Memory module of a computer system.
pub struct Memory<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded memory data.
    pub data: MemoryData,
}

impl<B: Bmc> Memory<B> {
    /// Capacity in GiB, if reported.
    #[must_use]
    pub fn capacity_gib(&self) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        self.data.capacity_mib.map(|mib| mib as f64 / 1024.0)
    }
}

impl<B: Bmc> FromBase<B> for Memory<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let MemorySchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Memory<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
