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

//! Errors of the Redfish client.
//!
//! One enum covers every layer above the transport. Variants that
//! describe a failed request carry the originating URI and HTTP method so
//! that a message alone is enough to locate the problem.

use http::Method;
use http::StatusCode;
use rsfish_core::Bmc;
use rsfish_core::ClassifyError as _;
use rsfish_core::ErrorKind;
use rsfish_core::ODataId;
use rsfish_core::RedfishError;
use std::error::Error as StdError;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::time::Duration;

/// Substrings of network failures reported by transports that do not
/// classify their errors precisely.
const NETWORK_ERROR_MARKERS: &[&str] = &[
    "timeout",
    "connection refused",
    "connection reset",
    "no such host",
    "network is unreachable",
    "i/o timeout",
];

/// Error of a Redfish operation over BMC `B`.
pub enum Error<B: Bmc> {
    /// The transport did not deliver a response.
    Bmc {
        /// Requested URI.
        uri: ODataId,
        /// Request method.
        method: Method,
        /// Transport error.
        source: B::Error,
    },
    /// Link slot or action target is not advertised by the service.
    NotSupported(&'static str),
    /// Response does not follow Redfish conventions.
    Protocol {
        /// Requested URI.
        uri: ODataId,
        /// Request method.
        method: Method,
        /// What is wrong with the response.
        reason: String,
    },
    /// Service answered with a non-success status.
    Service {
        /// Requested URI.
        uri: ODataId,
        /// Request method.
        method: Method,
        /// Status of the reply.
        status: StatusCode,
        /// Redfish error payload, if the body carried one.
        error: Option<RedfishError>,
        /// Body as text.
        body: String,
    },
    /// Action target answered with a status that is not a success and
    /// carries no Redfish error payload.
    ActionStatus {
        /// Action target.
        uri: ODataId,
        /// Status of the reply.
        status: StatusCode,
        /// Body as text.
        body: String,
    },
    /// Successful response that does not match the expected schema.
    Decode {
        /// Requested URI.
        uri: ODataId,
        /// Decode error with the JSON path of the offending value.
        source: serde_path_to_error::Error<serde_json::Error>,
    },
    /// Request body rejected before anything was sent.
    InvalidParameter(String),
    /// Repository update list could not be interpreted.
    UpdateList {
        /// Payload as returned by the service.
        raw: String,
        /// What went wrong.
        reason: String,
    },
    /// Operation cancelled by the caller.
    Cancelled,
    /// A single attempt did not finish in time.
    DeadlineExceeded(Duration),
    /// Health probe kept failing until attempts ran out.
    Unresponsive {
        /// Number of attempts made.
        attempts: u32,
        /// Last probe failure.
        source: Box<Self>,
    },
    /// Controller was reset after failed health probes. The operation
    /// itself was not performed.
    ResetPerformed {
        /// Probe failure that triggered the reset.
        source: Box<Self>,
    },
    /// Controller reset was requested and failed.
    ResetFailed {
        /// Reset failure.
        reset: Box<Self>,
        /// Probe failure that triggered the reset.
        source: Box<Self>,
    },
}

impl<B: Bmc> Error<B> {
    /// Category of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Bmc { source, .. } => source.error_kind(),
            Self::NotSupported(_) => ErrorKind::NotSupported,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::Service { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN =>
            {
                ErrorKind::Auth
            }
            Self::Service { .. } => ErrorKind::Service,
            Self::ActionStatus { .. } => ErrorKind::ActionStatus,
            Self::Decode { .. } | Self::UpdateList { .. } => ErrorKind::Decode,
            Self::InvalidParameter(_) => ErrorKind::Validation,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded(_)
            | Self::Unresponsive { .. }
            | Self::ResetPerformed { .. }
            | Self::ResetFailed { .. } => ErrorKind::Transport,
        }
    }

    /// Status of the reply if the service answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } | Self::ActionStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Redfish error payload of the reply, if any.
    #[must_use]
    pub const fn redfish_error(&self) -> Option<&RedfishError> {
        match self {
            Self::Service { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}

impl<B: Bmc + 'static> Error<B> {
    /// True if repeating the operation may succeed.
    ///
    /// Only transport failures and attempt deadlines are retried. A
    /// transport error counts when its kind is retryable or when its
    /// source chain mentions a network failure.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Bmc { source, .. } => {
                source.error_kind().is_retryable() || mentions_network_failure(source)
            }
            Self::DeadlineExceeded(_) => true,
            _ => false,
        }
    }
}

fn mentions_network_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        let message = err.to_string().to_lowercase();
        if NETWORK_ERROR_MARKERS.iter().any(|m| message.contains(m)) {
            return true;
        }
        current = err.source();
    }
    false
}

impl<B: Bmc> Display for Error<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bmc {
                uri,
                method,
                source,
            } => write!(f, "{method} {uri}: BMC request failed: {source}"),
            Self::NotSupported(what) => write!(f, "{what} is not supported by the service"),
            Self::Protocol {
                uri,
                method,
                reason,
            } => write!(f, "{method} {uri}: protocol error: {reason}"),
            Self::Service {
                uri,
                method,
                status,
                error,
                body,
            } => match error {
                Some(error) => write!(f, "{method} {uri}: service error {status}: {error}"),
                None => write!(f, "{method} {uri}: service error {status}: {body}"),
            },
            Self::ActionStatus { uri, status, body } => {
                write!(f, "POST {uri}: action failed with status {status}: {body}")
            }
            Self::Decode { uri, source } => write!(f, "{uri}: decode error: {source}"),
            Self::InvalidParameter(reason) => write!(f, "invalid parameter: {reason}"),
            Self::UpdateList { raw, reason } => {
                write!(f, "invalid repository update list: {reason}; payload: {raw}")
            }
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::DeadlineExceeded(timeout) => {
                write!(f, "operation did not complete within {timeout:?}")
            }
            Self::Unresponsive { attempts, source } => {
                write!(f, "BMC unresponsive after {attempts} attempts: {source}")
            }
            Self::ResetPerformed { source } => write!(
                f,
                "BMC reset performed after failed health check, operation not run: {source}"
            ),
            Self::ResetFailed { reset, source } => {
                write!(f, "BMC reset failed: {reset}; health check: {source}")
            }
        }
    }
}

impl<B: Bmc> Debug for Error<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bmc {
                uri,
                method,
                source,
            } => f
                .debug_struct("Bmc")
                .field("uri", uri)
                .field("method", method)
                .field("source", source)
                .finish(),
            Self::NotSupported(what) => f.debug_tuple("NotSupported").field(what).finish(),
            Self::Protocol {
                uri,
                method,
                reason,
            } => f
                .debug_struct("Protocol")
                .field("uri", uri)
                .field("method", method)
                .field("reason", reason)
                .finish(),
            Self::Service {
                uri,
                method,
                status,
                error,
                body,
            } => f
                .debug_struct("Service")
                .field("uri", uri)
                .field("method", method)
                .field("status", status)
                .field("error", error)
                .field("body", body)
                .finish(),
            Self::ActionStatus { uri, status, body } => f
                .debug_struct("ActionStatus")
                .field("uri", uri)
                .field("status", status)
                .field("body", body)
                .finish(),
            Self::Decode { uri, source } => f
                .debug_struct("Decode")
                .field("uri", uri)
                .field("source", source)
                .finish(),
            Self::InvalidParameter(reason) => {
                f.debug_tuple("InvalidParameter").field(reason).finish()
            }
            Self::UpdateList { raw, reason } => f
                .debug_struct("UpdateList")
                .field("raw", raw)
                .field("reason", reason)
                .finish(),
            Self::Cancelled => f.write_str("Cancelled"),
            Self::DeadlineExceeded(timeout) => {
                f.debug_tuple("DeadlineExceeded").field(timeout).finish()
            }
            Self::Unresponsive { attempts, source } => f
                .debug_struct("Unresponsive")
                .field("attempts", attempts)
                .field("source", source)
                .finish(),
            Self::ResetPerformed { source } => f
                .debug_struct("ResetPerformed")
                .field("source", source)
                .finish(),
            Self::ResetFailed { reset, source } => f
                .debug_struct("ResetFailed")
                .field("reset", reset)
                .field("source", source)
                .finish(),
        }
    }
}

impl<B: Bmc + 'static> StdError for Error<B> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Bmc { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Unresponsive { source, .. }
            | Self::ResetPerformed { source }
            | Self::ResetFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
