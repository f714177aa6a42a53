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

//! Error payloads and error classification
//!
//! A Redfish service reports failures with a JSON body of the form
//! `{"error": {"code": ..., "message": ..., "@Message.ExtendedInfo": [...]}}`.
//! [`RedfishError`] decodes it. [`ErrorKind`] is the closed set of failure
//! categories used across the crates; the retry layer decides what to
//! repeat from it.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection, TLS, DNS, reset or timeout.
    Transport,
    /// Session rejected, invalid credentials or expired token.
    Auth,
    /// Empty link slot or vendor action on another vendor.
    NotSupported,
    /// Body is not JSON, OData fields missing, unknown collection shape.
    Protocol,
    /// Non-success status with a Redfish error payload.
    Service,
    /// Non-success status of an action without a Redfish error payload.
    ActionStatus,
    /// Successful response that does not match the expected schema.
    Decode,
    /// Request body rejected before sending.
    Validation,
    /// Operation cancelled by the caller.
    Cancelled,
}

impl ErrorKind {
    /// Only transport failures are worth repeating as-is.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Transport)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Self::Transport => "transport",
            Self::Auth => "auth",
            Self::NotSupported => "not-supported",
            Self::Protocol => "protocol",
            Self::Service => "service",
            Self::ActionStatus => "action-status",
            Self::Decode => "decode",
            Self::Validation => "validation",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Errors that know their [`ErrorKind`].
pub trait ClassifyError {
    /// Category of this error.
    fn error_kind(&self) -> ErrorKind;
}

/// One entry of `@Message.ExtendedInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtendedInfo {
    /// Registry message identifier, e.g. `Base.1.8.PropertyValueNotInList`.
    pub message_id: Option<String>,
    /// Human-readable message.
    pub message: Option<String>,
    /// Arguments substituted into the registry message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<JsonValue>,
    /// `OK`, `Warning` or `Critical`.
    pub severity: Option<String>,
    /// Suggested resolution.
    pub resolution: Option<String>,
    /// JSON pointers to the offending properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_properties: Vec<String>,
}

/// Body of the `error` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedfishErrorBody {
    /// Registry message identifier of the general error.
    pub code: Option<String>,
    /// General error message.
    pub message: Option<String>,
    /// Detailed messages.
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<ExtendedInfo>,
}

/// Redfish error payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedfishError {
    /// The `error` object.
    pub error: RedfishErrorBody,
}

impl RedfishError {
    /// Parse error payload. Returns `None` when `body` is not a Redfish
    /// error document.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(body).ok().filter(|e| {
            e.error.code.is_some() || e.error.message.is_some() || !e.error.extended_info.is_empty()
        })
    }

    /// Most specific message available: first extended message, then the
    /// general message, then the code.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error
            .extended_info
            .iter()
            .find_map(|info| info.message.as_deref())
            .or(self.error.message.as_deref())
            .or(self.error.code.as_deref())
    }
}

impl Display for RedfishError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.error.code.as_deref(), self.message()) {
            (Some(code), Some(msg)) if code != msg => write!(f, "{code}: {msg}"),
            (_, Some(msg)) => f.write_str(msg),
            _ => f.write_str("unknown Redfish error"),
        }
    }
}
