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

//! Dell lifecycle controller jobs.

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;

/// State of a Dell job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DellJobState {
    New,
    Scheduled,
    Running,
    Completed,
    Downloading,
    Downloaded,
    Scheduling,
    ReadyForExecution,
    Waiting,
    Paused,
    Failed,
    CompletedWithErrors,
    RebootPending,
    RebootFailed,
    RebootCompleted,
    PendingActivation,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

impl DellJobState {
    /// True once the job will not change state anymore.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::CompletedWithErrors | Self::RebootFailed
        )
    }
}

/// Data of a Dell job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DellJobData {
    /// State of the job.
    pub job_state: Option<DellJobState>,
    /// Kind of the job, e.g. `RepositoryUpdate`.
    pub job_type: Option<String>,
    /// Percentage of completion.
    pub percent_complete: Option<u32>,
    /// Status message.
    pub message: Option<String>,
    /// Message identifier.
    pub message_id: Option<String>,
    /// Arguments of the message.
    #[serde(default)]
    pub message_args: Vec<String>,
    /// Scheduled start time.
    pub start_time: Option<String>,
    /// Time the job has to finish by.
    pub end_time: Option<String>,
    /// Time the job finished.
    pub completion_time: Option<String>,
    /// Time the job actually started.
    pub actual_running_start_time: Option<String>,
    /// Time the job actually stopped.
    pub actual_running_stop_time: Option<String>,
    /// Settings resource the job applies.
    #[serde(rename = "TargetSettingsURI")]
    pub target_settings_uri: Option<String>,
}

/// Dell job.
pub struct DellJob<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded job data.
    pub data: DellJobData,
}

impl<B: Bmc> DellJob<B> {
    /// True once the job will not change state anymore.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.data.job_state.is_some_and(DellJobState::is_terminal)
    }
}

impl<B: Bmc> FromBase<B> for DellJob<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let data = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for DellJob<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_data() {
        let data: DellJobData = serde_json::from_str(
            r#"{"Id": "JID_123", "JobState": "Completed", "JobType": "RepositoryUpdate",
                "PercentComplete": 100, "Message": "Job completed successfully.",
                "MessageId": "PR19", "MessageArgs": []}"#,
        )
        .unwrap();
        assert_eq!(data.job_state, Some(DellJobState::Completed));
        assert!(DellJobState::Completed.is_terminal());
        assert!(!DellJobState::Scheduled.is_terminal());
        let odd: DellJobData = serde_json::from_str(r#"{"JobState": "Sleeping"}"#).unwrap();
        assert_eq!(odd.job_state, Some(DellJobState::Unknown));
    }
}
