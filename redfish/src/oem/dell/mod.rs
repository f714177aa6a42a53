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

//! Dell iDRAC extensions.

mod computer_system;
mod event_service;
mod job;
mod manager;
mod software_installation;

use serde::Deserialize;

#[doc(inline)]
pub use computer_system::DellComputerSystem;
#[doc(inline)]
pub use computer_system::DellSystemData;
#[doc(inline)]
pub use event_service::DellEventService;
#[doc(inline)]
pub use event_service::DellTestEventBody;
#[doc(inline)]
pub use job::DellJob;
#[doc(inline)]
pub use job::DellJobData;
#[doc(inline)]
pub use job::DellJobState;
#[doc(inline)]
pub use manager::DellManager;
#[doc(inline)]
pub use manager::DellResetToDefaultsType;
#[doc(inline)]
pub use manager::ExecutionMode;
#[doc(inline)]
pub use manager::HostPowerState;
#[doc(inline)]
pub use manager::IdracResetType;
#[doc(inline)]
pub use manager::IgnoreCertificateWarning;
#[doc(inline)]
pub use manager::ImportSystemConfigurationBody;
#[doc(inline)]
pub use manager::ShareParameters;
#[doc(inline)]
pub use manager::ShareType;
#[doc(inline)]
pub use manager::ShutdownType;
#[doc(inline)]
pub use software_installation::ApplyUpdate;
#[doc(inline)]
pub use software_installation::DellSoftwareInstallationService;
#[doc(inline)]
pub use software_installation::IgnoreCertWarning;
#[doc(inline)]
pub use software_installation::InstallFromRepoBody;
#[doc(inline)]
pub use software_installation::ProxySupport;
#[doc(inline)]
pub use software_installation::ProxyType;
#[doc(inline)]
pub use software_installation::UpdateListFirmware;

/// `Oem` object keyed by `Dell`.
#[derive(Deserialize, Default)]
pub(crate) struct OemDell<T> {
    #[serde(rename = "Dell", default)]
    pub(crate) dell: T,
}
