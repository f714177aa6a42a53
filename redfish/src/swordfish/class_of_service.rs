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
use crate::Error;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Data of a class of service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassOfServiceData {
    /// Version of the class of service.
    pub class_of_service_version: Option<String>,
    /// Data protection lines of service, as published.
    #[serde(default)]
    pub data_protection_lines_of_service: Vec<JsonValue>,
    /// Data security lines of service, as published.
    #[serde(default)]
    pub data_security_lines_of_service: Vec<JsonValue>,
    /// Data storage lines of service, as published.
    #[serde(default)]
    pub data_storage_lines_of_service: Vec<JsonValue>,
    /// IO connectivity lines of service, as published.
    #[serde(rename = "IOConnectivityLinesOfService", default)]
    pub io_connectivity_lines_of_service: Vec<JsonValue>,
    /// IO performance lines of service, as published.
    #[serde(rename = "IOPerformanceLinesOfService", default)]
    pub io_performance_lines_of_service: Vec<JsonValue>,
}

#[derive(Deserialize)]
struct ClassOfServiceSchema {
    #[serde(flatten)]
    data: ClassOfServiceData,
}

/// Service level a storage resource is provisioned with.
pub struct ClassOfService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded class data.
    pub data: ClassOfServiceData,
}

impl<B: Bmc> FromBase<B> for ClassOfService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ClassOfServiceSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for ClassOfService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
