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

/// When a metric report is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricReportDefinitionType {
    /// Produced periodically.
    Periodic,
    /// Produced when a trigger fires.
    OnChange,
    /// Produced on request.
    OnRequest,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// What the service does when a report is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportActions {
    /// Send the report as an event.
    RedfishEvent,
    /// Keep the report in the metric report collection.
    LogToMetricReportsCollection,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Wildcard substituted into metric property paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wildcard {
    /// Name of the wildcard.
    pub name: Option<String>,
    /// Values substituted for the wildcard.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Data of a metric report definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricReportDefinitionData {
    /// When reports are produced.
    pub metric_report_definition_type: Option<MetricReportDefinitionType>,
    /// Whether the definition is active.
    pub metric_report_definition_enabled: Option<bool>,
    /// Actions taken when a report is produced.
    #[serde(default)]
    pub report_actions: Vec<ReportActions>,
    /// Wildcards used by `metric_properties`.
    #[serde(default)]
    pub wildcards: Vec<Wildcard>,
    /// Property paths sampled by the report.
    #[serde(default)]
    pub metric_properties: Vec<String>,
    /// ISO 8601 duration between reports.
    pub metric_report_heartbeat_interval: Option<String>,
}

/// Properties of a new metric report definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricReportDefinitionCreate {
    /// Identifier of the definition.
    pub id: String,
    /// When reports are produced.
    pub metric_report_definition_type: MetricReportDefinitionType,
    /// Actions taken when a report is produced.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub report_actions: Vec<ReportActions>,
    /// Property paths sampled by the report.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric_properties: Vec<String>,
    /// Wildcards used by `metric_properties`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wildcards: Vec<Wildcard>,
}

impl Default for MetricReportDefinitionType {
    fn default() -> Self {
        Self::Periodic
    }
}

/// Writable properties of a metric report definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricReportDefinitionUpdate {
    /// Whether the definition is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_report_definition_enabled: Option<bool>,
    /// Property paths sampled by the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_properties: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct MetricReportDefinitionSchema {
    #[serde(flatten)]
    data: MetricReportDefinitionData,
}

/// Metric report definition.
pub struct MetricReportDefinition<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded definition data.
    pub data: MetricReportDefinitionData,
}

impl<B: Bmc> MetricReportDefinition<B> {
    /// Update this definition and return the new state.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn update(&self, update: &MetricReportDefinitionUpdate) -> Result<Self, Error<B>> {
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

impl<B: Bmc> FromBase<B> for MetricReportDefinition<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let MetricReportDefinitionSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for MetricReportDefinition<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
