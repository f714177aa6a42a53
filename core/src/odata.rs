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

//! OData identifiers
//!
//! Minimal wrappers for the Redfish/OData identifiers carried by every
//! resource document:
//! - [`ODataId`]: value of `@odata.id`, the canonical resource path (opaque string)
//! - [`ODataETag`]: value of `@odata.etag`, the HTTP entity tag (opaque string)
//! - [`ODataType`]: parsed view of `@odata.type`
//!
//! Notes
//! - These types do not validate content.
//! - [`ODataId::service_root()`] returns the well-known Redfish service root path.
//! - Formatting/Display returns the raw underlying string.
//!
//! Example
//! ```rust
//! use rsfish_core::ODataId;
//!
//! let root = ODataId::service_root();
//! assert_eq!(root.to_string(), "/redfish/v1/");
//! ```
//!
//! References:
//! - OASIS OData 4.01 — `@odata.id`, `@odata.etag`
//! - DMTF Redfish Specification DSP0266 — `https://www.dmtf.org/standards/redfish`
//!

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use serde::Deserialize;
use serde::Serialize;

/// Well-known path of the Redfish service root.
pub const SERVICE_ROOT: &str = "/redfish/v1/";

/// Conventional path of the session collection, used when the service root
/// does not advertise one.
pub const DEFAULT_SESSIONS: &str = "/redfish/v1/SessionService/Sessions";

/// Type for `@odata.id` identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct ODataId(String);

impl ODataId {
    /// Redfish service root id.
    #[must_use]
    pub fn service_root() -> Self {
        Self(SERVICE_ROOT.into())
    }

    /// Identifier as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if identifier is an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last path segment of the identifier. For
    /// `/redfish/v1/Systems/System.Embedded.1` it is `System.Embedded.1`.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

impl From<String> for ODataId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ODataId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ODataId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ODataId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// Type for `@odata.etag` identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ODataETag(String);

impl ODataETag {
    /// Entity tag as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ODataETag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ODataETag {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for ODataETag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// Type for retrieving `@odata.type` from a JSON payload.
#[derive(Debug, PartialEq, Eq)]
pub struct ODataType<'a> {
    /// Namespace of the data type. For example: `["Chassis", "v1_22_0"]`.
    pub namespace: Vec<&'a str>,
    /// Name of the type. For example "Chassis".
    pub type_name: &'a str,
}

impl<'a> ODataType<'a> {
    /// Parse `@odata.type` value like `#Chassis.v1_22_0.Chassis`.
    #[must_use]
    pub fn parse(v: &'a str) -> Option<Self> {
        let v = v.strip_prefix('#')?;
        let mut all = v.split('.').collect::<Vec<_>>();
        all.pop().map(|type_name| ODataType {
            namespace: all,
            type_name,
        })
    }

    /// Get `@odata.type` from a JSON payload and parse it.
    #[must_use]
    pub fn parse_from(v: &'a serde_json::Value) -> Option<Self> {
        v.get("@odata.type")
            .and_then(serde_json::Value::as_str)
            .and_then(Self::parse)
    }

    /// Schema version part of the namespace (`v1_22_0`), if present.
    #[must_use]
    pub fn version(&self) -> Option<&'a str> {
        self.namespace
            .iter()
            .rev()
            .find(|part| part.starts_with('v'))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_odata_type() {
        let v = json!({ "@odata.type": "#ComputerSystem.v1_20_0.ComputerSystem" });
        let t = ODataType::parse_from(&v).unwrap();
        assert_eq!(t.type_name, "ComputerSystem");
        assert_eq!(t.namespace, vec!["ComputerSystem", "v1_20_0"]);
        assert_eq!(t.version(), Some("v1_20_0"));
    }

    #[test]
    fn rejects_odata_type_without_hash() {
        assert!(ODataType::parse("Chassis.v1_0_0.Chassis").is_none());
    }

    #[test]
    fn last_segment_ignores_trailing_slash() {
        let id = ODataId::from("/redfish/v1/Systems/System.Embedded.1/");
        assert_eq!(id.last_segment(), "System.Embedded.1");
        assert_eq!(ODataId::default().last_segment(), "");
    }
}
