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

//! Composition service and resource blocks.

use crate::collection;
use crate::computer_system::ComputerSystem;
use crate::computer_system::Memory;
use crate::computer_system::Processor;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::storage::Drive;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Composition state of a resource block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompositionStatus {
    /// `Unused`, `Composing`, `ComposedAndAvailable`, `Composed` or `Failed`.
    pub composition_state: Option<String>,
    /// Whether the block may be shared by composed systems.
    pub sharing_capable: Option<bool>,
    /// Whether sharing is enabled.
    pub sharing_enabled: Option<bool>,
    /// Whether the block is reserved.
    pub reserved: Option<bool>,
}

/// Data of a resource block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceBlockData {
    /// Types of resources in the block.
    #[serde(default)]
    pub resource_block_type: Vec<String>,
    /// Composition state.
    pub composition_status: Option<CompositionStatus>,
    /// `Free`, `Active` or `Unassigned`.
    pub pool: Option<String>,
    /// Client the block is reserved for.
    pub client: Option<String>,
    /// Status of the block.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct ResourceBlockLinks {
    #[serde(rename = "ComputerSystems", default)]
    computer_systems: LinkList,
}

#[derive(Deserialize)]
struct ResourceBlockSchema {
    #[serde(flatten)]
    data: ResourceBlockData,
    #[serde(rename = "Processors", default)]
    processors: LinkList,
    #[serde(rename = "Memory", default)]
    memory: LinkList,
    #[serde(rename = "Drives", default)]
    drives: LinkList,
    #[serde(rename = "Links", default)]
    links: ResourceBlockLinks,
}

/// Block of resources that can be composed into systems.
pub struct ResourceBlock<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded block data.
    pub data: ResourceBlockData,
    processors: LinkList,
    memory: LinkList,
    drives: LinkList,
    computer_systems: LinkList,
}

impl<B: Bmc> ResourceBlock<B> {
    /// Processors of the block.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a processor fails.
    pub async fn processors(&self) -> Result<Vec<Processor<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.processors).await
    }

    /// Memory of the block.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a module fails.
    pub async fn memory(&self) -> Result<Vec<Memory<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.memory).await
    }

    /// Drives of the block.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a drive fails.
    pub async fn drives(&self) -> Result<Vec<Drive<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.drives).await
    }

    /// Systems composed from the block.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a system fails.
    pub async fn computer_systems(&self) -> Result<Vec<ComputerSystem<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.computer_systems).await
    }
}

impl<B: Bmc> FromBase<B> for ResourceBlock<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ResourceBlockSchema {
            data,
            processors,
            memory,
            drives,
            links,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            processors,
            memory,
            drives,
            computer_systems: links.computer_systems,
        })
    }
}

impl<B: Bmc> Resource<B> for ResourceBlock<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of the composition service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompositionServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Whether composition requests may be overprovisioned.
    pub allow_overprovisioning: Option<bool>,
    /// Whether zones are constrained.
    pub allow_zone_affinity: Option<bool>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct CompositionServiceSchema {
    #[serde(flatten)]
    data: CompositionServiceData,
    #[serde(rename = "ResourceBlocks", default)]
    resource_blocks: Link,
}

/// Composition service.
pub struct CompositionService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: CompositionServiceData,
    resource_blocks: Link,
}

impl<B: Bmc> CompositionService<B> {
    /// Resource blocks known to the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a block fails.
    pub async fn resource_blocks(&self) -> Result<Vec<ResourceBlock<B>>, Error<B>> {
        self.base.list(&self.resource_blocks).await
    }
}

impl<B: Bmc> FromBase<B> for CompositionService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let CompositionServiceSchema {
            data,
            resource_blocks,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            resource_blocks,
        })
    }
}

impl<B: Bmc> Resource<B> for CompositionService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
