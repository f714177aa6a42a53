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

//! `ProtocolFeaturesSupported` of the service root.

use serde::Deserialize;
use serde::Serialize;

/// `$expand` support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpandQuery {
    /// Indicates '*' support by the service.
    pub expand_all: Option<bool>,
    /// Indicates '.' support by the service.
    pub no_links: Option<bool>,
    /// Indicates '~' support by the service.
    pub links: Option<bool>,
    /// Indicates `$levels` support by the service.
    pub levels: Option<bool>,
    /// Maximum `$levels` value.
    pub max_levels: Option<u32>,
}

/// Deep operation support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepOperations {
    /// Deep `PATCH` support.
    #[serde(rename = "DeepPATCH")]
    pub deep_patch: Option<bool>,
    /// Deep `POST` support.
    #[serde(rename = "DeepPOST")]
    pub deep_post: Option<bool>,
}

/// `ProtocolFeaturesSupported` of the service root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProtocolFeaturesSupported {
    /// `$expand` support.
    pub expand_query: Option<ExpandQuery>,
    /// Deep operation support.
    pub deep_operations: Option<DeepOperations>,
    /// `excerpt` support.
    pub excerpt_query: Option<bool>,
    /// `$filter` support.
    pub filter_query: Option<bool>,
    /// `only` support.
    pub only_member_query: Option<bool>,
    /// `$select` support.
    pub select_query: Option<bool>,
}
