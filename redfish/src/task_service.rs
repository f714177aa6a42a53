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

//! Task service and tasks.
//!
//! Tasks are returned by the action dispatcher when a service accepts an
//! operation asynchronously. Callers poll with [`Resource::refresh`] until
//! [`TaskState::is_terminal`].

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::EdmDateTimeOffset;
use rsfish_core::ExtendedInfo;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;

/// State of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// A new task.
    New,
    /// Task is starting.
    Starting,
    /// Task is running normally.
    Running,
    /// Task has been suspended.
    Suspended,
    /// Task has been interrupted.
    Interrupted,
    /// Task is pending and has not started.
    Pending,
    /// Task is in the process of stopping.
    Stopping,
    /// Task was completed.
    Completed,
    /// Task was terminated.
    Killed,
    /// Task has stopped because of an exception condition.
    Exception,
    /// Task is running as a service.
    Service,
    /// Task is in the process of being cancelled.
    Cancelling,
    /// Task has been cancelled.
    Cancelled,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// True once the task will not change state anymore.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Exception | Self::Killed | Self::Cancelled
        )
    }
}

/// Data of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskData {
    /// State of the task.
    pub task_state: Option<TaskState>,
    /// Completion status of the task.
    pub task_status: Option<crate::resource::Health>,
    /// Percentage of completion.
    pub percent_complete: Option<u32>,
    /// Start time of the task.
    pub start_time: Option<EdmDateTimeOffset>,
    /// End time of the task.
    pub end_time: Option<EdmDateTimeOffset>,
    /// URI of the task monitor.
    pub task_monitor: Option<ODataId>,
    /// Messages associated with the task.
    #[serde(default)]
    pub messages: Vec<ExtendedInfo>,
    /// Whether the task payload is hidden.
    pub hide_payload: Option<bool>,
}

#[derive(Deserialize)]
struct TaskSchema {
    #[serde(flatten)]
    data: TaskData,
}

/// Long-running operation handle.
pub struct Task<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded task data.
    pub data: TaskData,
}

impl<B: Bmc> Task<B> {
    /// True once the task will not change state anymore.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.data.task_state.is_some_and(TaskState::is_terminal)
    }
}

impl<B: Bmc> FromBase<B> for Task<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let TaskSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Task<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of the task service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Overwrite policy of completed tasks.
    pub completed_task_over_write_policy: Option<String>,
    /// Whether a task state change sends an event.
    pub life_cycle_event_on_task_state_change: Option<bool>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct TaskServiceSchema {
    #[serde(flatten)]
    data: TaskServiceData,
    #[serde(rename = "Tasks", default)]
    tasks: Link,
}

/// Task service.
pub struct TaskService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: TaskServiceData,
    tasks: Link,
}

impl<B: Bmc> TaskService<B> {
    /// All tasks known to the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a task fails.
    pub async fn tasks(&self) -> Result<Vec<Task<B>>, Error<B>> {
        self.base.list(&self.tasks).await
    }
}

impl<B: Bmc> FromBase<B> for TaskService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let TaskServiceSchema { data, tasks } = base.decode()?;
        Ok(Self { base, data, tasks })
    }
}

impl<B: Bmc> Resource<B> for TaskService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Exception.is_terminal());
        assert!(TaskState::Cancelled.is_terminal());
        assert!(TaskState::Killed.is_terminal());
        assert!(!TaskState::Running.is_terminal());
        assert!(!TaskState::Unknown.is_terminal());
    }

    #[test]
    fn task_data_round_trip() {
        let data: TaskData = serde_json::from_str(
            r#"{"TaskState": "Completed", "TaskStatus": "OK", "PercentComplete": 100,
                "StartTime": "2024-05-01T10:00:00Z", "EndTime": "2024-05-01T10:05:00Z",
                "Messages": [{"MessageId": "Base.1.8.Success", "Message": "done"}]}"#,
        )
        .unwrap();
        let again: TaskData = serde_json::from_value(serde_json::to_value(&data).unwrap()).unwrap();
        assert_eq!(data, again);
        assert_eq!(data.messages.len(), 1);
    }
}
