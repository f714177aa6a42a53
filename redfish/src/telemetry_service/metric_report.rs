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
use rsfish_core::EdmDateTimeOffset;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

/// Single reading of a metric report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    /// Identifier of the metric.
    pub metric_id: Option<String>,
    /// Reading as reported by the service.
    pub metric_value: Option<String>,
    /// Time of the reading.
    pub timestamp: Option<EdmDateTimeOffset>,
    /// Property the reading was taken from.
    pub metric_property: Option<String>,
}

/// Data of a metric report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricReportData {
    /// Time the report was produced.
    pub timestamp: Option<EdmDateTimeOffset>,
    /// Readings.
    #[serde(default)]
    pub metric_values: Vec<MetricValue>,
}

#[derive(Deserialize)]
struct MetricReportSchema {
    #[serde(flatten)]
    data: MetricReportData,
    #[serde(rename = "MetricReportDefinition", default)]
    definition: Link,
}

/// Metric report.
pub struct MetricReport<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded report data.
    pub data: MetricReportData,
    definition: Link,
}

impl<B: Bmc> MetricReport<B> {
    /// Definition the report was produced from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the report does not link its
    /// definition, or any fetch error.
    pub async fn definition(&self) -> Result<super::MetricReportDefinition<B>, Error<B>> {
        self.base
            .follow(&self.definition, "MetricReport MetricReportDefinition")
            .await
    }

    /// Delete this metric report.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request.
    pub async fn delete(&self) -> Result<(), Error<B>> {
        self.base.delete().await
    }
}

impl<B: Bmc> FromBase<B> for MetricReport<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let MetricReportSchema { data, definition } = base.decode()?;
        Ok(Self {
            base,
            data,
            definition,
        })
    }
}

impl<B: Bmc> Resource<B> for MetricReport<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
