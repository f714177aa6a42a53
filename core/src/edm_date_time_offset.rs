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

//! `Edm.DateTimeOffset` primitive wrapper
//!
//! Timestamps such as `Task.StartTime`, `LogEntry.Created` or
//! `Session.CreatedTime` are RFC 3339 strings. [`EdmDateTimeOffset`]
//! wraps `time::OffsetDateTime`, keeps the offset sent by the service and
//! renders `+00:00` as `Z`.
//!
//! ```rust
//! use rsfish_core::EdmDateTimeOffset;
//!
//! let started: EdmDateTimeOffset = "2024-05-01T08:00:00+00:00".parse().unwrap();
//! assert_eq!(started.to_string(), "2024-05-01T08:00:00Z");
//! ```

use core::str::FromStr;
use serde::Deserialize;
use serde::Serialize;
use std::convert::TryFrom;
use std::fmt::Display;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Type corresponding to `Edm.DateTimeOffset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdmDateTimeOffset(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl EdmDateTimeOffset {
    /// Underlying timestamp.
    #[must_use]
    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    /// Time passed between `self` and `later`. Zero when `later` is
    /// not after `self`.
    #[must_use]
    pub fn duration_until(&self, later: &Self) -> Duration {
        let diff = later.0 - self.0;
        Duration::try_from(diff).unwrap_or_default()
    }
}

impl From<OffsetDateTime> for EdmDateTimeOffset {
    fn from(dt: OffsetDateTime) -> Self {
        Self(dt)
    }
}

impl From<EdmDateTimeOffset> for OffsetDateTime {
    fn from(w: EdmDateTimeOffset) -> Self {
        w.0
    }
}

impl Display for EdmDateTimeOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = self.0.format(&Rfc3339).map_err(|_| FmtError)?;
        f.write_str(&s)
    }
}

impl FromStr for EdmDateTimeOffset {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, &Rfc3339).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcOffset;

    #[test]
    fn keeps_service_offset() {
        let w: EdmDateTimeOffset = "2024-05-01T13:30:00+05:30".parse().unwrap();
        assert_eq!(w.to_string(), "2024-05-01T13:30:00+05:30");
        assert_eq!(
            w.as_offset_date_time().offset(),
            UtcOffset::from_hms(5, 30, 0).unwrap()
        );
    }

    #[test]
    fn requires_offset() {
        assert!("2024-05-01T08:00:00".parse::<EdmDateTimeOffset>().is_err());
        assert!("yesterday".parse::<EdmDateTimeOffset>().is_err());
    }

    #[test]
    fn decodes_task_timestamps() {
        let start: EdmDateTimeOffset = serde_json::from_str(r#""2024-05-01T08:00:00Z""#).unwrap();
        let end: EdmDateTimeOffset =
            serde_json::from_str(r#""2024-05-01T10:00:30+02:00""#).unwrap();
        assert_eq!(start.duration_until(&end), Duration::from_secs(30));
        assert_eq!(end.duration_until(&start), Duration::ZERO);
    }
}
