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

//! Storage subsystems, drives and volumes.

mod drive;
mod item;
mod volume;

#[doc(inline)]
pub use drive::Drive;
#[doc(inline)]
pub use drive::DriveData;
#[doc(inline)]
pub use drive::MediaType;
#[doc(inline)]
pub use item::Storage;
#[doc(inline)]
pub use item::StorageController;
#[doc(inline)]
pub use item::StorageData;
#[doc(inline)]
pub use volume::Capacity;
#[doc(inline)]
pub use volume::CapacityInfo;
#[doc(inline)]
pub use volume::InitializeType;
#[doc(inline)]
pub use volume::RaidType;
#[doc(inline)]
pub use volume::Volume;
#[doc(inline)]
pub use volume::VolumeData;

#[derive(serde::Serialize)]
pub(crate) struct EncryptionKeyBody<'a> {
    #[serde(rename = "EncryptionKey")]
    pub encryption_key: &'a str,
}
