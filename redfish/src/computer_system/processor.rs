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

/// Data of a processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessorData {
    /// Socket of the processor.
    pub socket: Option<String>,
    /// `CPU`, `GPU`, `FPGA`, `DSP`, `Accelerator`, `Core`, `Thread` or `OEM`.
    pub processor_type: Option<String>,
    /// Instruction set architecture.
    pub processor_architecture: Option<String>,
    /// Instruction set.
    pub instruction_set: Option<String>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Maximum clock speed.
    #[serde(rename = "MaxSpeedMHz")]
    pub max_speed_mhz: Option<u32>,
    /// Number of cores.
    pub total_cores: Option<u32>,
    /// Number of threads.
    pub total_threads: Option<u32>,
    /// Status of the processor.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct ProcessorSchema {
    #[serde(flatten)]
    data: ProcessorData,
}

/// Processor of a computer system.
pub struct Processor<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded processor data.
    pub data: ProcessorData,
}

impl<B: Bmc> FromBase<B> for Processor<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ProcessorSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Processor<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
