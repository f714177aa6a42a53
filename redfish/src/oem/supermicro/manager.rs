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
use crate::manager::Manager;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

/// Settings resources linked from `Oem.Supermicro` of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupermicroSetting {
    Radius,
    MouseMode,
    Ntp,
    IpAccessControl,
    SmcRakp,
    Syslog,
    SysLockdown,
    MemoryPfa,
    MemoryHealthComp,
    Snooping,
    FanMode,
    Ikvm,
    KcsInterface,
    Lldp,
    LicenseManager,
}

impl SupermicroSetting {
    /// Key of the link in `Oem.Supermicro`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radius => "RADIUS",
            Self::MouseMode => "MouseMode",
            Self::Ntp => "NTP",
            Self::IpAccessControl => "IPAccessControl",
            Self::SmcRakp => "SMCRAKP",
            Self::Syslog => "Syslog",
            Self::SysLockdown => "SysLockdown",
            Self::MemoryPfa => "MemoryPFA",
            Self::MemoryHealthComp => "MemoryHealthComp",
            Self::Snooping => "Snooping",
            Self::FanMode => "FanMode",
            Self::Ikvm => "IKVM",
            Self::KcsInterface => "KCSInterface",
            Self::Lldp => "LLDP",
            Self::LicenseManager => "LicenseManager",
        }
    }
}

/// `Option` of `#SmcManagerConfig.Reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigResetOption {
    /// Reset configuration but keep user accounts.
    PreserveUser,
    /// Reset everything.
    ClearConfig,
    /// Reset everything and restore the `ADMIN` account.
    #[serde(rename = "ResetToADMIN")]
    ResetToAdmin,
}

#[derive(Serialize)]
struct ConfigResetBody {
    #[serde(rename = "Option")]
    option: ConfigResetOption,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct SupermicroLinks {
    #[serde(rename = "RADIUS", default)]
    radius: Link,
    #[serde(default)]
    mouse_mode: Link,
    #[serde(rename = "NTP", default)]
    ntp: Link,
    #[serde(rename = "IPAccessControl", default)]
    ip_access_control: Link,
    #[serde(rename = "SMCRAKP", default)]
    smc_rakp: Link,
    #[serde(default)]
    syslog: Link,
    #[serde(default)]
    sys_lockdown: Link,
    #[serde(rename = "MemoryPFA", default)]
    memory_pfa: Link,
    #[serde(default)]
    memory_health_comp: Link,
    #[serde(default)]
    snooping: Link,
    #[serde(default)]
    fan_mode: Link,
    #[serde(rename = "IKVM", default)]
    ikvm: Link,
    #[serde(rename = "KCSInterface", default)]
    kcs_interface: Link,
    #[serde(rename = "LLDP", default)]
    lldp: Link,
    #[serde(default)]
    license_manager: Link,
}

impl SupermicroLinks {
    const fn get(&self, setting: SupermicroSetting) -> &Link {
        match setting {
            SupermicroSetting::Radius => &self.radius,
            SupermicroSetting::MouseMode => &self.mouse_mode,
            SupermicroSetting::Ntp => &self.ntp,
            SupermicroSetting::IpAccessControl => &self.ip_access_control,
            SupermicroSetting::SmcRakp => &self.smc_rakp,
            SupermicroSetting::Syslog => &self.syslog,
            SupermicroSetting::SysLockdown => &self.sys_lockdown,
            SupermicroSetting::MemoryPfa => &self.memory_pfa,
            SupermicroSetting::MemoryHealthComp => &self.memory_health_comp,
            SupermicroSetting::Snooping => &self.snooping,
            SupermicroSetting::FanMode => &self.fan_mode,
            SupermicroSetting::Ikvm => &self.ikvm,
            SupermicroSetting::KcsInterface => &self.kcs_interface,
            SupermicroSetting::Lldp => &self.lldp,
            SupermicroSetting::LicenseManager => &self.license_manager,
        }
    }
}

#[derive(Deserialize, Default)]
struct OemSupermicro {
    #[serde(rename = "Supermicro", default)]
    supermicro: SupermicroLinks,
}

#[derive(Deserialize, Default)]
struct SupermicroOemActions {
    #[serde(rename = "#SmcManagerConfig.Reset")]
    config_reset: Option<Action>,
}

#[derive(Deserialize, Default)]
struct SupermicroActions {
    #[serde(rename = "Oem", default)]
    oem: SupermicroOemActions,
}

#[derive(Deserialize)]
struct SupermicroManagerSchema {
    #[serde(rename = "Oem", default)]
    oem: OemSupermicro,
    #[serde(rename = "Actions", default)]
    actions: SupermicroActions,
}

/// Manager with the Supermicro extension decoded.
pub struct SupermicroManager<B: Bmc> {
    manager: Manager<B>,
    links: SupermicroLinks,
    config_reset: Option<Action>,
}

impl<B: Bmc> SupermicroManager<B> {
    /// Decode the Supermicro extension from the payload `manager` was
    /// fetched with. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the Supermicro blocks are malformed.
    pub fn from_manager(manager: Manager<B>) -> Result<Self, Error<B>> {
        let SupermicroManagerSchema { oem, actions } = manager.base().decode()?;
        debug!(manager = %manager.odata_id(), "Supermicro manager overlay");
        Ok(Self {
            manager,
            links: oem.supermicro,
            config_reset: actions.oem.config_reset,
        })
    }

    /// Underlying standard manager.
    #[must_use]
    pub const fn manager(&self) -> &Manager<B> {
        &self.manager
    }

    /// Identifier of a settings resource, if linked.
    #[must_use]
    pub fn setting_id(&self, setting: SupermicroSetting) -> Option<&ODataId> {
        self.links.get(setting).id()
    }

    /// Fetch a settings resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the manager does not link it, or
    /// any fetch error.
    pub async fn setting(&self, setting: SupermicroSetting) -> Result<ResourceBase<B>, Error<B>> {
        match self.links.get(setting).id() {
            Some(id) => ResourceBase::fetch(self.base().bmc(), id).await,
            None => {
                debug!(setting = setting.as_str(), "Supermicro setting not linked");
                Err(Error::NotSupported("Supermicro manager setting"))
            }
        }
    }

    /// Reset the BMC configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn config_reset(
        &self,
        option: ConfigResetOption,
    ) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.config_reset.as_ref(), "SmcManagerConfig.Reset")?;
        info!(%target, ?option, "resetting Supermicro BMC configuration");
        action::dispatch(self.base().bmc(), target, &ConfigResetBody { option }).await
    }
}

impl<B: Bmc> Resource<B> for SupermicroManager<B> {
    fn base(&self) -> &ResourceBase<B> {
        self.manager.base()
    }
}
