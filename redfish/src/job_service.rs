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

//! Job service and scheduled jobs.

use crate::resource::FromBase;
use crate::resource::Health;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::EdmDateTimeOffset;
use rsfish_core::ExtendedInfo;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

/// State of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    /// A new job.
    New,
    /// Job is starting.
    Starting,
    /// Job is executing.
    Running,
    /// Job has been suspended.
    Suspended,
    /// Job has been interrupted.
    Interrupted,
    /// Job is pending and has not started.
    Pending,
    /// Job is stopping.
    Stopping,
    /// Job has completed.
    Completed,
    /// Job was cancelled.
    Cancelled,
    /// Job has stopped due to an exception condition.
    Exception,
    /// Job is running as a service.
    Service,
    /// Job is waiting for user intervention.
    UserIntervention,
    /// Job can resume after user intervention.
    Continue,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// True once the job will not change state anymore.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Exception)
    }
}

/// Data of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobData {
    /// State of the job.
    pub job_state: Option<JobState>,
    /// Completion status of the job.
    pub job_status: Option<Health>,
    /// Percentage of completion.
    pub percent_complete: Option<u32>,
    /// Creator of the job.
    pub created_by: Option<String>,
    /// Start time.
    pub start_time: Option<EdmDateTimeOffset>,
    /// End time.
    pub end_time: Option<EdmDateTimeOffset>,
    /// Messages associated with the job.
    #[serde(default)]
    pub messages: Vec<ExtendedInfo>,
}

#[derive(Deserialize)]
struct JobSchema {
    #[serde(flatten)]
    data: JobData,
}

/// Scheduled job.
pub struct Job<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded job data.
    pub data: JobData,
}

impl<B: Bmc> Job<B> {
    /// True once the job will not change state anymore.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.data.job_state.is_some_and(JobState::is_terminal)
    }

    /// Delete the job.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request.
    pub async fn delete(&self) -> Result<(), Error<B>> {
        self.base.delete().await
    }
}

impl<B: Bmc> FromBase<B> for Job<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let JobSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Job<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of the job service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Current date and time of the service.
    pub date_time: Option<EdmDateTimeOffset>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct JobServiceSchema {
    #[serde(flatten)]
    data: JobServiceData,
    #[serde(rename = "Jobs", default)]
    jobs: Link,
}

/// Job service.
pub struct JobService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: JobServiceData,
    jobs: Link,
}

impl<B: Bmc> JobService<B> {
    /// Jobs known to the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a job fails.
    pub async fn jobs(&self) -> Result<Vec<Job<B>>, Error<B>> {
        self.base.list(&self.jobs).await
    }
}

impl<B: Bmc> FromBase<B> for JobService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let JobServiceSchema { data, jobs } = base.decode()?;
        Ok(Self { base, data, jobs })
    }
}

impl<B: Bmc> Resource<B> for JobService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ODataId;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    #[tokio::test]
    async fn jobs_are_listed() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/JobService",
            r#"{"Id": "JobService", "Name": "Job Service",
                "Jobs": {"@odata.id": "/redfish/v1/JobService/Jobs"}}"#,
        ));
        let service: JobService<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/JobService"))
                .await
                .unwrap();
        bmc.expect(Expect::get(
            "/redfish/v1/JobService/Jobs",
            r#"{"Members": [{"@odata.id": "/redfish/v1/JobService/Jobs/Log1"}]}"#,
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/JobService/Jobs/Log1",
            r#"{"Id": "Log1", "Name": "Periodic Job", "JobState": "UserIntervention",
                "PercentComplete": 50}"#,
        ));
        let jobs = service.jobs().await.unwrap();
        assert_eq!(jobs[0].data.job_state, Some(JobState::UserIntervention));
        assert!(!jobs[0].is_terminal());
    }
}
