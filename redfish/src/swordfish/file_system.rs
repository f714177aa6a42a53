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

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::storage::Capacity;
use crate::swordfish::ClassOfService;
use crate::swordfish::StoragePool;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;

/// Data of a file system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileSystemData {
    /// Access capabilities, e.g. `Read` or `Write`.
    #[serde(default)]
    pub access_capabilities: Vec<String>,
    /// Block size in bytes.
    pub block_size_bytes: Option<u64>,
    /// Capacity of the file system.
    pub capacity: Option<Capacity>,
    /// Whether file names are case preserved.
    pub case_preserved: Option<bool>,
    /// Whether file names are case sensitive.
    pub case_sensitive: Option<bool>,
    /// Character code sets supported.
    #[serde(default)]
    pub character_code_set: Vec<String>,
    /// Maximum length of a file name.
    pub max_file_name_length_bytes: Option<u64>,
    /// Remaining capacity as a percentage.
    pub remaining_capacity_percent: Option<u32>,
}

#[derive(Deserialize, Default)]
struct FileSystemLinks {
    #[serde(rename = "ClassOfService", default)]
    class_of_service: Link,
}

#[derive(Deserialize)]
struct FileSystemSchema {
    #[serde(flatten)]
    data: FileSystemData,
    #[serde(rename = "CapacitySources", default)]
    capacity_sources: Link,
    #[serde(rename = "Links", default)]
    links: FileSystemLinks,
}

/// File system provided by a storage service.
pub struct FileSystem<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded file system data.
    pub data: FileSystemData,
    capacity_sources: Link,
    links: FileSystemLinks,
}

impl<B: Bmc> FileSystem<B> {
    /// Pools providing capacity to this file system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a pool fails.
    pub async fn capacity_sources(&self) -> Result<Vec<StoragePool<B>>, Error<B>> {
        self.base.list(&self.capacity_sources).await
    }

    /// Class of service of the file system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if no class is linked, or any fetch
    /// error.
    pub async fn class_of_service(&self) -> Result<ClassOfService<B>, Error<B>> {
        self.base
            .follow(&self.links.class_of_service, "FileSystem ClassOfService")
            .await
    }
}

impl<B: Bmc> FromBase<B> for FileSystem<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let FileSystemSchema {
            data,
            capacity_sources,
            links,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            capacity_sources,
            links,
        })
    }
}

impl<B: Bmc> Resource<B> for FileSystem<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
