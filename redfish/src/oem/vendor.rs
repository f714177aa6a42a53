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

//! Vendor detection.

use serde_json::Value as JsonValue;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Vendors recognized from the service root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// Dell iDRAC.
    Dell,
    /// HPE iLO.
    Hpe,
    /// AMI MegaRAC.
    Ami,
    /// Supermicro.
    Supermicro,
    /// Lenovo XClarity.
    Lenovo,
    /// NVIDIA.
    Nvidia,
    /// ZT Systems.
    Zt,
}

/// Names matched case-insensitively, in detection order.
const NAMES: &[(&str, Vendor)] = &[
    ("dell", Vendor::Dell),
    ("hpe", Vendor::Hpe),
    ("hp", Vendor::Hpe),
    ("ami", Vendor::Ami),
    ("supermicro", Vendor::Supermicro),
    ("smc", Vendor::Supermicro),
    ("lenovo", Vendor::Lenovo),
    ("nvidia", Vendor::Nvidia),
    ("ztsystems", Vendor::Zt),
    ("zt", Vendor::Zt),
];

impl Vendor {
    /// Vendor named exactly `name`, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, vendor)| *vendor)
    }

    /// Detect the vendor from the root `Oem` block, falling back to the
    /// root `Vendor` string.
    #[must_use]
    pub fn detect(oem: Option<&JsonValue>, vendor: Option<&str>) -> Option<Self> {
        oem.and_then(JsonValue::as_object)
            .and_then(|block| block.keys().find_map(|key| Self::from_name(key)))
            .or_else(|| vendor.and_then(Self::from_name))
            .or_else(|| vendor.and_then(Self::from_vendor_string))
    }

    // Vendor strings such as "Dell Inc." or "HPE Enterprise".
    fn from_vendor_string(vendor: &str) -> Option<Self> {
        let vendor = vendor.to_ascii_lowercase();
        vendor
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find_map(Self::from_name)
    }

    /// Canonical name of the vendor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dell => "Dell",
            Self::Hpe => "HPE",
            Self::Ami => "AMI",
            Self::Supermicro => "Supermicro",
            Self::Lenovo => "Lenovo",
            Self::Nvidia => "NVIDIA",
            Self::Zt => "ZT",
        }
    }
}

impl Display for Vendor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn oem_keys_win() {
        let oem = json!({"Dell": {"ServiceTag": "0000000"}});
        assert_eq!(Vendor::detect(Some(&oem), Some("AMI")), Some(Vendor::Dell));
        let oem = json!({"Hpe": {}});
        assert_eq!(Vendor::detect(Some(&oem), None), Some(Vendor::Hpe));
        let oem = json!({"Ami": {"RtpVersion": "1.8.a"}});
        assert_eq!(Vendor::detect(Some(&oem), None), Some(Vendor::Ami));
    }

    #[test]
    fn vendor_string_fallback() {
        assert_eq!(Vendor::detect(None, Some("Dell Inc.")), Some(Vendor::Dell));
        assert_eq!(Vendor::detect(Some(&json!({})), Some("smc")), Some(Vendor::Supermicro));
        assert_eq!(Vendor::detect(None, Some("Contoso")), None);
        assert_eq!(Vendor::detect(None, None), None);
    }
}
