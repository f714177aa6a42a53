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

//! Action descriptors
//!
//! Actions appear under `Actions` as
//! `"#ComputerSystem.Reset": {"target": "...", "ResetType@Redfish.AllowableValues": [...]}`.
//! [`Action`] keeps the target and the advertised constraints; posting is
//! done by the action dispatcher in the `rsfish` crate.

use crate::ODataId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

const ALLOWABLE_VALUES_SUFFIX: &str = "@Redfish.AllowableValues";

/// Action advertised by a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// URI the action body is posted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ODataId>,
    /// Link to the `ActionInfo` resource describing parameters.
    #[serde(
        rename = "@Redfish.ActionInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub action_info: Option<ODataId>,
    /// Remaining annotations, including `<Param>@Redfish.AllowableValues`.
    #[serde(flatten)]
    pub annotations: BTreeMap<String, JsonValue>,
}

impl Action {
    /// Action with the given target and no annotations.
    #[must_use]
    pub fn with_target(target: impl Into<ODataId>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }

    /// Target if the service advertised a non-empty one.
    #[must_use]
    pub fn target(&self) -> Option<&ODataId> {
        self.target.as_ref().filter(|t| !t.is_empty())
    }

    /// Allowable values advertised for `param`. Empty when the service
    /// does not constrain the parameter.
    #[must_use]
    pub fn allowable_values(&self, param: &str) -> Vec<&str> {
        self.annotations
            .get(&format!("{param}{ALLOWABLE_VALUES_SUFFIX}"))
            .and_then(JsonValue::as_array)
            .map(|values| values.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default()
    }

    /// True if `value` is acceptable for `param`. Unconstrained parameters
    /// accept anything.
    #[must_use]
    pub fn allows(&self, param: &str, value: &str) -> bool {
        let allowed = self.allowable_values(param);
        allowed.is_empty() || allowed.iter().any(|v| *v == value)
    }
}
