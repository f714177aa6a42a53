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

use crate::action;
use crate::collection;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::storage::Volume;
use crate::swordfish::ClassOfService;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Data of a storage group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageGroupData {
    /// Access state of the group, e.g. `Optimized`.
    pub access_state: Option<String>,
    /// Whether members are kept consistent with each other.
    pub members_are_consistent: Option<bool>,
    /// Whether the volumes are exposed to the client endpoints.
    pub volumes_are_exposed: Option<bool>,
    /// Status of the group.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct StorageGroupLinks {
    #[serde(rename = "ClassOfService", default)]
    class_of_service: Link,
    #[serde(rename = "ChildStorageGroups", default)]
    child_storage_groups: LinkList,
    #[serde(rename = "ParentStorageGroups", default)]
    parent_storage_groups: LinkList,
}

#[derive(Deserialize, Default)]
struct StorageGroupActions {
    #[serde(rename = "#StorageGroup.ExposeVolumes")]
    expose_volumes: Option<Action>,
    #[serde(rename = "#StorageGroup.HideVolumes")]
    hide_volumes: Option<Action>,
}

#[derive(Deserialize)]
struct StorageGroupSchema {
    #[serde(flatten)]
    data: StorageGroupData,
    #[serde(rename = "Volumes", default)]
    volumes: LinkList,
    #[serde(rename = "MappedVolumes", default)]
    mapped_volumes: LinkList,
    #[serde(rename = "Links", default)]
    links: StorageGroupLinks,
    #[serde(rename = "Actions", default)]
    actions: StorageGroupActions,
}

/// Set of volumes managed as a unit.
pub struct StorageGroup<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded group data.
    pub data: StorageGroupData,
    volumes: LinkList,
    mapped_volumes: LinkList,
    links: StorageGroupLinks,
    actions: StorageGroupActions,
}

impl<B: Bmc> StorageGroup<B> {
    /// Volumes in this group.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a volume fails.
    pub async fn volumes(&self) -> Result<Vec<Volume<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.volumes).await
    }

    /// Volumes mapped to the client endpoints.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a volume fails.
    pub async fn mapped_volumes(&self) -> Result<Vec<Volume<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.mapped_volumes).await
    }

    /// Child groups.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a group fails.
    pub async fn child_storage_groups(&self) -> Result<Vec<Self>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.child_storage_groups).await
    }

    /// Parent groups.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a group fails.
    pub async fn parent_storage_groups(&self) -> Result<Vec<Self>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.parent_storage_groups).await
    }

    /// Class of service of the group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if no class is linked, or any fetch
    /// error.
    pub async fn class_of_service(&self) -> Result<ClassOfService<B>, Error<B>> {
        self.base
            .follow(&self.links.class_of_service, "StorageGroup ClassOfService")
            .await
    }

    /// Expose the volumes to the client endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn expose_volumes(&self) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(
            self.actions.expose_volumes.as_ref(),
            "StorageGroup.ExposeVolumes",
        )?;
        action::dispatch(self.base.bmc(), target, &serde_json::Map::new()).await
    }

    /// Hide the volumes from the client endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn hide_volumes(&self) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.actions.hide_volumes.as_ref(), "StorageGroup.HideVolumes")?;
        action::dispatch(self.base.bmc(), target, &serde_json::Map::new()).await
    }
}

impl<B: Bmc> FromBase<B> for StorageGroup<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let StorageGroupSchema {
            data,
            volumes,
            mapped_volumes,
            links,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            volumes,
            mapped_volumes,
            links,
            actions,
        })
    }
}

impl<B: Bmc> Resource<B> for StorageGroup<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
