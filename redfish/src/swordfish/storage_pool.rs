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
use crate::resource::Status;
use crate::storage::Capacity;
use crate::storage::Drive;
use crate::storage::Volume;
use crate::swordfish::ClassOfService;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Data of a storage pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoragePoolData {
    /// Capacity of the pool.
    pub capacity: Option<Capacity>,
    /// Warning thresholds as percentages of remaining capacity.
    #[serde(default)]
    pub low_space_warning_threshold_percents: Vec<u32>,
    /// Largest block size supported.
    pub max_block_size_bytes: Option<u64>,
    /// Capacity sources that can fail without losing data.
    pub recoverable_capacity_source_count: Option<u32>,
    /// Remaining capacity as a percentage.
    pub remaining_capacity_percent: Option<u32>,
    /// Status of the pool.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct StoragePoolLinks {
    #[serde(rename = "DefaultClassOfService", default)]
    default_class_of_service: Link,
    #[serde(rename = "DedicatedSpareDrives", default)]
    dedicated_spare_drives: LinkList,
}

#[derive(Deserialize)]
struct StoragePoolSchema {
    #[serde(flatten)]
    data: StoragePoolData,
    #[serde(rename = "AllocatedVolumes", default)]
    allocated_volumes: Link,
    #[serde(rename = "AllocatedPools", default)]
    allocated_pools: Link,
    #[serde(rename = "ClassesOfService", default)]
    classes_of_service: Link,
    #[serde(rename = "Links", default)]
    links: StoragePoolLinks,
}

/// Pool of storage capacity.
pub struct StoragePool<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded pool data.
    pub data: StoragePoolData,
    allocated_volumes: Link,
    allocated_pools: Link,
    classes_of_service: Link,
    links: StoragePoolLinks,
}

impl<B: Bmc> StoragePool<B> {
    /// Volumes allocated from this pool.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a volume fails.
    pub async fn allocated_volumes(&self) -> Result<Vec<Volume<B>>, Error<B>> {
        self.base.list(&self.allocated_volumes).await
    }

    /// Pools allocated from this pool.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a pool fails.
    pub async fn allocated_pools(&self) -> Result<Vec<Self>, Error<B>> {
        self.base.list(&self.allocated_pools).await
    }

    /// Classes of service supported by this pool.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a class fails.
    pub async fn classes_of_service(&self) -> Result<Vec<ClassOfService<B>>, Error<B>> {
        self.base.list(&self.classes_of_service).await
    }

    /// Default class of service of allocations from this pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the pool has no default class,
    /// or any fetch error.
    pub async fn default_class_of_service(&self) -> Result<ClassOfService<B>, Error<B>> {
        self.base
            .follow(
                &self.links.default_class_of_service,
                "StoragePool DefaultClassOfService",
            )
            .await
    }

    /// Spare drives dedicated to this pool.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a drive fails.
    pub async fn dedicated_spare_drives(&self) -> Result<Vec<Drive<B>>, Error<B>> {
        crate::collection::resolve(self.base.bmc(), &self.links.dedicated_spare_drives).await
    }
}

impl<B: Bmc> FromBase<B> for StoragePool<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let StoragePoolSchema {
            data,
            allocated_volumes,
            allocated_pools,
            classes_of_service,
            links,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            allocated_volumes,
            allocated_pools,
            classes_of_service,
            links,
        })
    }
}

impl<B: Bmc> Resource<B> for StoragePool<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
