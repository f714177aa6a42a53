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

//! Telemetry service.
//!
//! Metric reports, report definitions and metric definitions. Definitions
//! can be created, updated and deleted; reports are read-only.

mod metric_definition;
mod metric_report;
mod metric_report_definition;

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

#[doc(inline)]
pub use metric_definition::MetricDefinition;
#[doc(inline)]
pub use metric_definition::MetricDefinitionCreate;
#[doc(inline)]
pub use metric_definition::MetricDefinitionData;
#[doc(inline)]
pub use metric_definition::MetricDefinitionUpdate;
#[doc(inline)]
pub use metric_report::MetricReport;
#[doc(inline)]
pub use metric_report::MetricReportData;
#[doc(inline)]
pub use metric_report::MetricValue;
#[doc(inline)]
pub use metric_report_definition::MetricReportDefinition;
#[doc(inline)]
pub use metric_report_definition::MetricReportDefinitionCreate;
#[doc(inline)]
pub use metric_report_definition::MetricReportDefinitionData;
#[doc(inline)]
pub use metric_report_definition::MetricReportDefinitionType;
#[doc(inline)]
pub use metric_report_definition::MetricReportDefinitionUpdate;
#[doc(inline)]
pub use metric_report_definition::ReportActions;
#[doc(inline)]
pub use metric_report_definition::Wildcard;

/// Data of the telemetry service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TelemetryServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Maximum number of reports kept by the service.
    pub max_reports: Option<u64>,
    /// ISO 8601 minimum collection interval.
    pub min_collection_interval: Option<String>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Serialize)]
struct TelemetryServiceUpdate {
    #[serde(rename = "ServiceEnabled")]
    service_enabled: bool,
}

#[derive(Deserialize)]
struct TelemetryServiceSchema {
    #[serde(flatten)]
    data: TelemetryServiceData,
    #[serde(rename = "MetricReports", default)]
    metric_reports: Link,
    #[serde(rename = "MetricReportDefinitions", default)]
    metric_report_definitions: Link,
    #[serde(rename = "MetricDefinitions", default)]
    metric_definitions: Link,
}

/// Telemetry service.
pub struct TelemetryService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: TelemetryServiceData,
    metric_reports: Link,
    metric_report_definitions: Link,
    metric_definitions: Link,
}

impl<B: Bmc> TelemetryService<B> {
    /// Enable or disable the service.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn set_enabled(&self, enabled: bool) -> Result<Self, Error<B>> {
        self.base
            .update(&TelemetryServiceUpdate {
                service_enabled: enabled,
            })
            .await
    }

    /// Metric reports.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a report fails.
    pub async fn metric_reports(&self) -> Result<Vec<MetricReport<B>>, Error<B>> {
        self.base.list(&self.metric_reports).await
    }

    /// Metric report definitions.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a definition fails.
    pub async fn metric_report_definitions(
        &self,
    ) -> Result<Vec<MetricReportDefinition<B>>, Error<B>> {
        self.base.list(&self.metric_report_definitions).await
    }

    /// Metric definitions.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a definition fails.
    pub async fn metric_definitions(&self) -> Result<Vec<MetricDefinition<B>>, Error<B>> {
        self.base.list(&self.metric_definitions).await
    }

    /// Create a metric report definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no
    /// `MetricReportDefinitions` collection, or any request error.
    pub async fn create_metric_report_definition(
        &self,
        create: &MetricReportDefinitionCreate,
    ) -> Result<MetricReportDefinition<B>, Error<B>> {
        self.base
            .create(
                &self.metric_report_definitions,
                "TelemetryService MetricReportDefinitions",
                create,
            )
            .await
    }

    /// Create a metric definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no
    /// `MetricDefinitions` collection, or any request error.
    pub async fn create_metric_definition(
        &self,
        create: &MetricDefinitionCreate,
    ) -> Result<MetricDefinition<B>, Error<B>> {
        self.base
            .create(
                &self.metric_definitions,
                "TelemetryService MetricDefinitions",
                create,
            )
            .await
    }
}

impl<B: Bmc> FromBase<B> for TelemetryService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let TelemetryServiceSchema {
            data,
            metric_reports,
            metric_report_definitions,
            metric_definitions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            metric_reports,
            metric_report_definitions,
            metric_definitions,
        })
    }
}

impl<B: Bmc> Resource<B> for TelemetryService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ErrorKind;
    use rsfish_core::ODataId;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    async fn service(bmc: &Arc<TestBmc>) -> TelemetryService<TestBmc> {
        bmc.expect(Expect::get(
            "/redfish/v1/TelemetryService",
            r#"{"Id": "TelemetryService", "Name": "Telemetry Service", "ServiceEnabled": true,
                "MetricReports": {"@odata.id": "/redfish/v1/TelemetryService/MetricReports"},
                "MetricReportDefinitions":
                    {"@odata.id": "/redfish/v1/TelemetryService/MetricReportDefinitions"}}"#,
        ));
        crate::resource::fetch(bmc, &ODataId::from("/redfish/v1/TelemetryService"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn reports_and_definitions() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::get(
            "/redfish/v1/TelemetryService/MetricReports",
            r#"{"Members": [{"@odata.id": "/redfish/v1/TelemetryService/MetricReports/PlatformPower"}]}"#,
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/TelemetryService/MetricReports/PlatformPower",
            r#"{"Id": "PlatformPower", "Name": "Platform Power",
                "MetricReportDefinition":
                    {"@odata.id": "/redfish/v1/TelemetryService/MetricReportDefinitions/PlatformPower"},
                "MetricValues": [{"MetricId": "AverageConsumedWatts", "MetricValue": "100",
                                  "Timestamp": "2024-05-01T10:00:00Z"}]}"#,
        ));
        let reports = service.metric_reports().await.unwrap();
        assert_eq!(reports[0].data.metric_values[0].metric_value.as_deref(), Some("100"));
        assert!(service.metric_definitions().await.unwrap().is_empty());
        let err = service
            .create_metric_definition(&MetricDefinitionCreate::default())
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }

    #[tokio::test]
    async fn create_definition_decodes_body_without_location() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::post(
            "/redfish/v1/TelemetryService/MetricReportDefinitions",
            r#"{"Id": "Fans", "MetricReportDefinitionType": "OnRequest",
                "MetricProperties": ["/redfish/v1/Chassis/1/Thermal#/Fans/0/Reading"]}"#,
            201,
            r#"{"@odata.id": "/redfish/v1/TelemetryService/MetricReportDefinitions/Fans",
                "Id": "Fans", "Name": "Fans", "MetricReportDefinitionType": "OnRequest"}"#,
        ));
        let definition = service
            .create_metric_report_definition(&MetricReportDefinitionCreate {
                id: "Fans".into(),
                metric_report_definition_type: MetricReportDefinitionType::OnRequest,
                metric_properties: vec!["/redfish/v1/Chassis/1/Thermal#/Fans/0/Reading".into()],
                ..MetricReportDefinitionCreate::default()
            })
            .await
            .unwrap();
        assert_eq!(definition.id().inner(), "Fans");
        assert_eq!(
            definition.data.metric_report_definition_type,
            Some(MetricReportDefinitionType::OnRequest)
        );
    }
}
