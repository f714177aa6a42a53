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

/// Temperature sensor reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Temperature {
    /// Identifier of the member within the array.
    pub member_id: Option<String>,
    /// Name of the sensor.
    pub name: Option<String>,
    /// Sensor number.
    pub sensor_number: Option<i64>,
    /// Reading in degrees Celsius.
    pub reading_celsius: Option<f64>,
    /// Upper threshold above normal range.
    pub upper_threshold_non_critical: Option<f64>,
    /// Upper threshold above normal range but not yet fatal.
    pub upper_threshold_critical: Option<f64>,
    /// Upper threshold above normal range and fatal.
    pub upper_threshold_fatal: Option<f64>,
    /// Lower threshold below normal range.
    pub lower_threshold_non_critical: Option<f64>,
    /// Lower threshold below normal range but not yet fatal.
    pub lower_threshold_critical: Option<f64>,
    /// Lower threshold below normal range and fatal.
    pub lower_threshold_fatal: Option<f64>,
    /// Area or device the reading applies to.
    pub physical_context: Option<String>,
    /// Status of the sensor.
    pub status: Option<Status>,
}

/// Fan reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Fan {
    /// Identifier of the member within the array.
    pub member_id: Option<String>,
    /// Name of the fan.
    pub name: Option<String>,
    /// Current speed.
    pub reading: Option<f64>,
    /// Units of the reading (`RPM` or `Percent`).
    pub reading_units: Option<String>,
    /// Lower threshold below normal range but not yet fatal.
    pub lower_threshold_critical: Option<f64>,
    /// Area or device the fan cools.
    pub physical_context: Option<String>,
    /// Status of the fan.
    pub status: Option<Status>,
}

/// Data of the legacy thermal resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalData {
    /// Temperature sensors.
    #[serde(default)]
    pub temperatures: Vec<Temperature>,
    /// Fans.
    #[serde(default)]
    pub fans: Vec<Fan>,
    /// Status of the thermal subsystem.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct ThermalSchema {
    #[serde(flatten)]
    data: ThermalData,
}

/// Legacy `Chassis/Thermal` resource.
pub struct Thermal<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded thermal data.
    pub data: ThermalData,
}

impl<B: Bmc> FromBase<B> for Thermal<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ThermalSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Thermal<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
