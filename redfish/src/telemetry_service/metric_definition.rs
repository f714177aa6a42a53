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

/// Data of a metric definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDefinitionData {
    /// Kind of metric, e.g. `Numeric` or `Counter`.
    pub metric_type: Option<String>,
    /// Data type of readings.
    pub metric_data_type: Option<String>,
    /// Units of readings.
    pub units: Option<String>,
    /// Whether readings are sampled or computed.
    pub implementation: Option<String>,
    /// Property paths the metric applies to.
    #[serde(default)]
    pub metric_properties: Vec<String>,
    /// ISO 8601 sensing interval.
    pub sensing_interval: Option<String>,
}

/// Properties of a new metric definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDefinitionCreate {
    /// Identifier of the definition.
    pub id: String,
    /// Kind of metric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    /// Units of readings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Property paths the metric applies to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric_properties: Vec<String>,
}

/// Writable properties of a metric definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDefinitionUpdate {
    /// Property paths the metric applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_properties: Option<Vec<String>>,
    /// ISO 8601 sensing interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensing_interval: Option<String>,
}

#[derive(Deserialize)]
struct MetricDefinitionSchema {
    #[serde(flatten)]
    data: MetricDefinitionData,
}

/// Metric definition.
pub struct MetricDefinition<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded definition data.
    pub data: MetricDefinitionData,
}

impl<B: Bmc> MetricDefinition<B> {
    /// Update this definition and return the new state.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn update(&self, update: &MetricDefinitionUpdate) -> Result<Self, Error<B>> {
        self.base.update(update).await
    }

    /// Delete this definition.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request.
    pub async fn delete(&self) -> Result<(), Error<B>> {
        self.base.delete().await
    }
}

impl<B: Bmc> FromBase<B> for MetricDefinition<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let MetricDefinitionSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for MetricDefinition<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
