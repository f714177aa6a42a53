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

//! Message registry files.

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;

/// Where a registry can be obtained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistryLocation {
    /// Language of the registry.
    pub language: Option<String>,
    /// URI of the registry hosted by the service.
    pub uri: Option<String>,
    /// URI of the published registry.
    pub publication_uri: Option<String>,
    /// URI of the registry in an archive.
    pub archive_uri: Option<String>,
    /// File name of the registry in the archive.
    pub archive_file: Option<String>,
}

/// Data of a message registry file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageRegistryFileData {
    /// Languages the registry is available in.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Registry prefix and version, e.g. `Base.1.8`.
    pub registry: Option<String>,
    /// Locations of the registry.
    #[serde(default)]
    pub location: Vec<RegistryLocation>,
}

#[derive(Deserialize)]
struct MessageRegistryFileSchema {
    #[serde(flatten)]
    data: MessageRegistryFileData,
}

/// Message registry file.
pub struct MessageRegistryFile<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded registry file data.
    pub data: MessageRegistryFileData,
}

impl<B: Bmc> MessageRegistryFile<B> {
    /// Location of the registry in `language`.
    #[must_use]
    pub fn location(&self, language: &str) -> Option<&RegistryLocation> {
        self.data
            .location
            .iter()
            .find(|location| location.language.as_deref() == Some(language))
    }
}

impl<B: Bmc> FromBase<B> for MessageRegistryFile<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let MessageRegistryFileSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for MessageRegistryFile<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
