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

//! Log Service entities and collections.
//!
//! This module provides types for working with Redfish LogService resources
//! and their log entries.

use crate::action;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::EdmDateTimeOffset;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Informational or operating normally.
    #[serde(rename = "OK")]
    Ok,
    /// A condition requires attention.
    Warning,
    /// A critical condition requires immediate attention.
    Critical,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Data of a log entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntryData {
    /// `Event`, `SEL` or `Oem`.
    pub entry_type: Option<String>,
    /// Severity of the entry.
    pub severity: Option<EventSeverity>,
    /// Time the entry was created.
    pub created: Option<EdmDateTimeOffset>,
    /// Message text.
    pub message: Option<String>,
    /// Message registry identifier.
    pub message_id: Option<String>,
    /// Arguments substituted into the message.
    #[serde(default)]
    pub message_args: Vec<String>,
    /// Sensor type for SEL entries.
    pub sensor_type: Option<String>,
    /// Entry code for SEL entries.
    pub entry_code: Option<String>,
}

#[derive(Deserialize)]
struct LogEntrySchema {
    #[serde(flatten)]
    data: LogEntryData,
}

/// Log entry.
pub struct LogEntry<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded entry data.
    pub data: LogEntryData,
}

impl<B: Bmc> FromBase<B> for LogEntry<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let LogEntrySchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for LogEntry<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of a log service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Maximum number of entries.
    pub max_number_of_records: Option<u64>,
    /// `WrapsWhenFull` or `NeverOverWrites`.
    pub over_write_policy: Option<String>,
    /// Type of entries kept, e.g. `Event` or `SEL`.
    pub log_entry_type: Option<String>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct LogServiceActions {
    #[serde(rename = "#LogService.ClearLog")]
    clear_log: Option<Action>,
}

#[derive(Deserialize)]
struct LogServiceSchema {
    #[serde(flatten)]
    data: LogServiceData,
    #[serde(rename = "Entries", default)]
    entries: Link,
    #[serde(rename = "Actions", default)]
    actions: LogServiceActions,
}

/// Log service.
///
/// Provides functions to access log entries and perform log operations.
pub struct LogService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: LogServiceData,
    entries: Link,
    clear_log: Option<Action>,
}

impl<B: Bmc> LogService<B> {
    /// List all log entries, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching the collection or an entry fails.
    pub async fn entries(&self) -> Result<Vec<LogEntry<B>>, Error<B>> {
        self.base.list(&self.entries).await
    }

    /// Clear all log entries.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log service does not support the `ClearLog` action
    /// - The action execution fails
    pub async fn clear_log(&self) -> Result<(), Error<B>> {
        let target = action::target(self.clear_log.as_ref(), "LogService.ClearLog")?;
        action::invoke(self.base.bmc().as_ref(), target, &serde_json::Map::new()).await?;
        Ok(())
    }
}

impl<B: Bmc> FromBase<B> for LogService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let LogServiceSchema {
            data,
            entries,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            entries,
            clear_log: actions.clear_log,
        })
    }
}

impl<B: Bmc> Resource<B> for LogService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
