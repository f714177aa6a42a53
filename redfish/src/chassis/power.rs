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

/// Power consumption statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerMetrics {
    /// Sampling interval in minutes.
    pub interval_in_min: Option<u32>,
    /// Lowest consumption within the interval.
    pub min_consumed_watts: Option<f64>,
    /// Highest consumption within the interval.
    pub max_consumed_watts: Option<f64>,
    /// Average consumption within the interval.
    pub average_consumed_watts: Option<f64>,
}

/// Power limit of a power control domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerLimit {
    /// Limit in watts.
    pub limit_in_watts: Option<f64>,
    /// Action taken when the limit is exceeded.
    pub limit_exception: Option<String>,
    /// Time to apply the limit, in milliseconds.
    pub correction_in_ms: Option<u64>,
}

/// Power control domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerControl {
    /// Identifier of the member within the array.
    pub member_id: Option<String>,
    /// Name of the domain.
    pub name: Option<String>,
    /// Current consumption.
    pub power_consumed_watts: Option<f64>,
    /// Capacity available for allocation.
    pub power_capacity_watts: Option<f64>,
    /// Consumption statistics.
    pub power_metrics: Option<PowerMetrics>,
    /// Configured limit.
    pub power_limit: Option<PowerLimit>,
    /// Status of the domain.
    pub status: Option<Status>,
}

/// Voltage sensor reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voltage {
    /// Identifier of the member within the array.
    pub member_id: Option<String>,
    /// Name of the sensor.
    pub name: Option<String>,
    /// Reading in volts.
    pub reading_volts: Option<f64>,
    /// Upper threshold above normal range but not yet fatal.
    pub upper_threshold_critical: Option<f64>,
    /// Lower threshold below normal range but not yet fatal.
    pub lower_threshold_critical: Option<f64>,
    /// Status of the sensor.
    pub status: Option<Status>,
}

/// Power supply unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerSupply {
    /// Identifier of the member within the array.
    pub member_id: Option<String>,
    /// Name of the power supply.
    pub name: Option<String>,
    /// `AC`, `DC` or `ACorDC`.
    pub power_supply_type: Option<String>,
    /// Input voltage.
    pub line_input_voltage: Option<f64>,
    /// Maximum capacity.
    pub power_capacity_watts: Option<f64>,
    /// Average output over the last sampling interval.
    pub last_power_output_watts: Option<f64>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Firmware version.
    pub firmware_version: Option<String>,
    /// Status of the power supply.
    pub status: Option<Status>,
}

/// Data of the legacy power resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerData {
    /// Power control domains.
    #[serde(default)]
    pub power_control: Vec<PowerControl>,
    /// Voltage sensors.
    #[serde(default)]
    pub voltages: Vec<Voltage>,
    /// Power supplies.
    #[serde(default)]
    pub power_supplies: Vec<PowerSupply>,
}

#[derive(Deserialize)]
struct PowerSchema {
    #[serde(flatten)]
    data: PowerData,
}

/// Legacy `Chassis/Power` resource.
pub struct Power<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded power data.
    pub data: PowerData,
}

impl<B: Bmc> Power<B> {
    /// Sum of consumption reported by all power control domains.
    #[must_use]
    pub fn consumed_watts(&self) -> Option<f64> {
        self.data
            .power_control
            .iter()
            .filter_map(|c| c.power_consumed_watts)
            .fold(None, |acc, w| Some(acc.unwrap_or(0.0) + w))
    }
}

impl<B: Bmc> FromBase<B> for Power<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let PowerSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Power<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
