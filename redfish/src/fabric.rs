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

//! Fabrics, switches and endpoints.

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

/// Data of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointData {
    /// Protocol of the endpoint, e.g. `PCIe` or `NVMeOverFabrics`.
    pub endpoint_protocol: Option<String>,
    /// Memory reserved for the host, in bytes.
    pub host_reservation_memory_bytes: Option<u64>,
    /// Status of the endpoint.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct EndpointSchema {
    #[serde(flatten)]
    data: EndpointData,
}

/// Endpoint of a fabric.
pub struct Endpoint<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded endpoint data.
    pub data: EndpointData,
}

impl<B: Bmc> FromBase<B> for Endpoint<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let EndpointSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Endpoint<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of a switch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwitchData {
    /// Protocol of the switch.
    pub switch_type: Option<String>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Number of ports.
    pub total_switch_width: Option<u32>,
    /// Status of the switch.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct SwitchSchema {
    #[serde(flatten)]
    data: SwitchData,
}

/// Switch of a fabric.
pub struct Switch<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded switch data.
    pub data: SwitchData,
}

impl<B: Bmc> FromBase<B> for Switch<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let SwitchSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Switch<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of a fabric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FabricData {
    /// Protocol of the fabric.
    pub fabric_type: Option<String>,
    /// Maximum number of zones.
    pub max_zones: Option<u32>,
    /// Status of the fabric.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct FabricSchema {
    #[serde(flatten)]
    data: FabricData,
    #[serde(rename = "Switches", default)]
    switches: Link,
    #[serde(rename = "Endpoints", default)]
    endpoints: Link,
}

/// Fabric.
pub struct Fabric<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded fabric data.
    pub data: FabricData,
    switches: Link,
    endpoints: Link,
}

impl<B: Bmc> Fabric<B> {
    /// Switches of the fabric.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a switch fails.
    pub async fn switches(&self) -> Result<Vec<Switch<B>>, Error<B>> {
        self.base.list(&self.switches).await
    }

    /// Endpoints of the fabric.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or an endpoint fails.
    pub async fn endpoints(&self) -> Result<Vec<Endpoint<B>>, Error<B>> {
        self.base.list(&self.endpoints).await
    }
}

impl<B: Bmc> FromBase<B> for Fabric<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let FabricSchema {
            data,
            switches,
            endpoints,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            switches,
            endpoints,
        })
    }
}

impl<B: Bmc> Resource<B> for Fabric<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
