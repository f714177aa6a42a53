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

//! Swordfish storage management.
//!
//! Storage services with their pools, groups, file systems and classes of
//! service. Volumes are shared with the Redfish storage model.

mod class_of_service;
mod file_system;
mod storage_group;
mod storage_pool;
mod storage_service;

#[doc(inline)]
pub use class_of_service::ClassOfService;
#[doc(inline)]
pub use class_of_service::ClassOfServiceData;
#[doc(inline)]
pub use file_system::FileSystem;
#[doc(inline)]
pub use file_system::FileSystemData;
#[doc(inline)]
pub use storage_group::StorageGroup;
#[doc(inline)]
pub use storage_group::StorageGroupData;
#[doc(inline)]
pub use storage_pool::StoragePool;
#[doc(inline)]
pub use storage_pool::StoragePoolData;
#[doc(inline)]
pub use storage_service::StorageService;
#[doc(inline)]
pub use storage_service::StorageServiceData;

#[doc(inline)]
pub use crate::storage::Capacity;
#[doc(inline)]
pub use crate::storage::Volume;
