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

//! AMI MegaRAC extensions.

mod computer_system;
mod update_service;

#[doc(inline)]
pub use computer_system::AmiBios;
#[doc(inline)]
pub use computer_system::AmiBiosTable;
#[doc(inline)]
pub use computer_system::AmiBiosTableTags;
#[doc(inline)]
pub use computer_system::AmiComputerSystem;
#[doc(inline)]
pub use computer_system::AmiSystemData;
#[doc(inline)]
pub use computer_system::Crc;
#[doc(inline)]
pub use computer_system::Inventory;
#[doc(inline)]
pub use computer_system::ManagerBootConfiguration;
#[doc(inline)]
pub use computer_system::ManagerBootMode;
#[doc(inline)]
pub use computer_system::TableTag;
#[doc(inline)]
pub use update_service::AmiUpdateService;
#[doc(inline)]
pub use update_service::AmiUpdateServiceData;
#[doc(inline)]
pub use update_service::AmiUpdateStatus;
#[doc(inline)]
pub use update_service::BmcImages;
#[doc(inline)]
pub use update_service::BiosUpdateOptions;
#[doc(inline)]
pub use update_service::DualImageConfigurations;
