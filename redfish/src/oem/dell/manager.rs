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

//! Dell extension of the manager (iDRAC).
//!
//! Adds system configuration import, iDRAC reset and the Dell flavour of
//! reset to defaults. [`DellManager`] is also a [`HealthProbe`] whose
//! forced reset is a graceful iDRAC reset.

use crate::action;
use crate::manager::Manager;
use crate::oem::dell::OemDell;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::retry::HealthProbe;
use crate::task_service::Task;
use crate::Error;
use http::Method;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

/// When the imported configuration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    Default,
    DeployOnSledInsert,
    InstantDeploy,
}

/// Host power state after the configuration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostPowerState {
    On,
    Off,
}

/// Whether certificate warnings of an HTTPS share are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreCertificateWarning {
    Disabled,
    Enabled,
}

/// Type of a network share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShareType {
    Local,
    Nfs,
    Cifs,
    Http,
    Https,
}

/// Shutdown of the host when the configuration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownType {
    Graceful,
    Forced,
    /// Queue the job until the next boot.
    NoReboot,
}

/// Location of the configuration to import.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShareParameters {
    /// IP address of the share.
    #[serde(rename = "IPAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_certificate_warning: Option<IgnoreCertificateWarning>,
    /// CIFS share name or NFS path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Type of the share, `LOCAL` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_type: Option<ShareType>,
    /// Required for CIFS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workgroup: Option<String>,
    /// Device FQDD or a generic target such as `ALL`, `BIOS`, `IDRAC`.
    pub target: String,
}

/// Parameters of `#OemManager.ImportSystemConfiguration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportSystemConfigurationBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<ExecutionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_power_state: Option<HostPowerState>,
    /// Configuration content. Required for `LOCAL` shares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_buffer: Option<String>,
    pub share_parameters: ShareParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown_type: Option<ShutdownType>,
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl ImportSystemConfigurationBody {
    /// Check the body before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first missing field.
    pub fn validate<B: Bmc>(&self) -> Result<(), Error<B>> {
        let share = &self.share_parameters;
        if share.target.trim().is_empty() {
            return Err(Error::InvalidParameter(
                "ShareParameters.Target is required".into(),
            ));
        }
        match share.share_type {
            None | Some(ShareType::Local) => {
                if is_blank(self.import_buffer.as_ref()) {
                    return Err(Error::InvalidParameter(
                        "ImportBuffer is required for LOCAL share type".into(),
                    ));
                }
            }
            Some(share_type) => {
                if is_blank(share.ip_address.as_ref()) {
                    return Err(Error::InvalidParameter(
                        "ShareParameters.IPAddress is required for remote shares".into(),
                    ));
                }
                if is_blank(share.share_name.as_ref()) {
                    return Err(Error::InvalidParameter(
                        "ShareParameters.ShareName is required for remote shares".into(),
                    ));
                }
                if share_type == ShareType::Cifs && is_blank(share.user_name.as_ref()) {
                    return Err(Error::InvalidParameter(
                        "ShareParameters.UserName is required for CIFS shares".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Kind of iDRAC reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdracResetType {
    Graceful,
    Force,
}

#[derive(Serialize)]
struct IdracResetBody {
    #[serde(rename = "Force")]
    force: IdracResetType,
}

/// `ResetType` of `#DellManager.ResetToDefaults`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DellResetToDefaultsType {
    /// Reset everything to factory defaults.
    All,
    /// Reset everything except users and network settings.
    Default,
    /// Reset everything and restore the default root credentials.
    ResetAllWithRootDefaults,
}

impl DellResetToDefaultsType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Default => "Default",
            Self::ResetAllWithRootDefaults => "ResetAllWithRootDefaults",
        }
    }
}

#[derive(Serialize)]
struct DellResetToDefaultsBody {
    #[serde(rename = "ResetType")]
    reset_type: DellResetToDefaultsType,
}

#[derive(Deserialize, Default)]
struct DellManagerOemActions {
    #[serde(rename = "#OemManager.ImportSystemConfiguration")]
    import_system_configuration: Option<Action>,
    #[serde(rename = "#DellManager.ResetToDefaults")]
    reset_to_defaults: Option<Action>,
    #[serde(rename = "#DelliDRACCardService.iDRACReset")]
    idrac_reset: Option<Action>,
}

#[derive(Deserialize, Default)]
struct DellManagerActions {
    #[serde(rename = "Oem", default)]
    oem: DellManagerOemActions,
}

#[derive(Deserialize, Default)]
struct DellManagerLinks {
    #[serde(rename = "DelliDRACCardService", default)]
    idrac_card_service: Link,
    #[serde(rename = "DellJobService", default)]
    job_service: Link,
    #[serde(rename = "Jobs", default)]
    jobs: Link,
}

#[derive(Deserialize, Default)]
struct LinksBlock {
    #[serde(rename = "Oem", default)]
    oem: OemDell<DellManagerLinks>,
}

#[derive(Deserialize)]
struct DellManagerSchema {
    #[serde(rename = "Actions", default)]
    actions: DellManagerActions,
    #[serde(rename = "Links", default)]
    links: LinksBlock,
}

#[derive(Deserialize, Default)]
struct IdracCardServiceActions {
    #[serde(rename = "#DelliDRACCardService.iDRACReset")]
    idrac_reset: Option<Action>,
}

#[derive(Deserialize)]
struct IdracCardServiceSchema {
    #[serde(rename = "Actions", default)]
    actions: IdracCardServiceActions,
}

/// Manager with the Dell extension decoded.
pub struct DellManager<B: Bmc> {
    manager: Manager<B>,
    actions: DellManagerOemActions,
    links: DellManagerLinks,
}

impl<B: Bmc> DellManager<B> {
    /// Decode the Dell extension from the payload `manager` was fetched
    /// with. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the Dell blocks are malformed.
    pub fn from_manager(manager: Manager<B>) -> Result<Self, Error<B>> {
        let DellManagerSchema { actions, links } = manager.base().decode()?;
        debug!(manager = %manager.odata_id(), "Dell manager overlay");
        Ok(Self {
            manager,
            actions: actions.oem,
            links: links.oem.dell,
        })
    }

    /// Underlying standard manager.
    #[must_use]
    pub const fn manager(&self) -> &Manager<B> {
        &self.manager
    }

    /// The `DelliDRACCardService` resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if not linked, or any fetch error.
    pub async fn idrac_card_service(&self) -> Result<ResourceBase<B>, Error<B>> {
        self.manager
            .base()
            .follow(&self.links.idrac_card_service, "DelliDRACCardService")
            .await
    }

    /// The `DellJobService` resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if not linked, or any fetch error.
    pub async fn job_service(&self) -> Result<ResourceBase<B>, Error<B>> {
        self.manager
            .base()
            .follow(&self.links.job_service, "DellJobService")
            .await
    }

    /// Jobs queued on the lifecycle controller.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a job fails.
    pub async fn jobs(&self) -> Result<Vec<crate::oem::dell::DellJob<B>>, Error<B>> {
        self.manager.base().list(&self.links.jobs).await
    }

    /// Import a server configuration profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the body is incomplete,
    /// [`Error::NotSupported`] if the action is not advertised, or any
    /// dispatch error.
    pub async fn import_system_configuration(
        &self,
        body: &ImportSystemConfigurationBody,
    ) -> Result<Option<Task<B>>, Error<B>> {
        body.validate()?;
        let target = action::target(
            self.actions.import_system_configuration.as_ref(),
            "OemManager.ImportSystemConfiguration",
        )?;
        info!(%target, "importing system configuration");
        action::dispatch(self.manager.base().bmc(), target, body).await
    }

    /// Reset the iDRAC. The target is taken from the manager actions or,
    /// failing that, from the linked `DelliDRACCardService`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if neither advertises the action, or
    /// any request error.
    pub async fn reset_idrac(&self, reset_type: IdracResetType) -> Result<(), Error<B>> {
        let body = IdracResetBody { force: reset_type };
        let bmc = self.manager.base().bmc().as_ref();
        if let Some(target) = self.actions.idrac_reset.as_ref().and_then(Action::target) {
            info!(%target, ?reset_type, "resetting iDRAC");
            return action::invoke(bmc, target, &body).await.map(|_| ());
        }
        let service = self.idrac_card_service().await?;
        let IdracCardServiceSchema { actions } = service.decode()?;
        let target = action::target(actions.idrac_reset.as_ref(), "DelliDRACCardService.iDRACReset")?;
        info!(%target, ?reset_type, "resetting iDRAC");
        action::invoke(bmc, target, &body).await.map(|_| ())
    }

    /// Reset iDRAC settings with the Dell action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised,
    /// [`Error::InvalidParameter`] if `reset_type` is not allowed, or any
    /// dispatch error.
    pub async fn reset_to_defaults(
        &self,
        reset_type: DellResetToDefaultsType,
    ) -> Result<Option<Task<B>>, Error<B>> {
        let reset = self.actions.reset_to_defaults.as_ref();
        let target = action::target(reset, "DellManager.ResetToDefaults")?;
        if let Some(reset) = reset {
            if !reset.allows("ResetType", reset_type.as_str()) {
                return Err(Error::InvalidParameter(format!(
                    "reset type {} is not allowed; allowed: {}",
                    reset_type.as_str(),
                    reset.allowable_values("ResetType").join(", ")
                )));
            }
        }
        action::dispatch(
            self.manager.base().bmc(),
            target,
            &DellResetToDefaultsBody { reset_type },
        )
        .await
    }
}

impl<B: Bmc> Resource<B> for DellManager<B> {
    fn base(&self) -> &ResourceBase<B> {
        self.manager.base()
    }
}

impl<B: Bmc> HealthProbe<B> for DellManager<B> {
    async fn probe(&self) -> Result<(), Error<B>> {
        if self.manager.id().inner().is_empty() {
            return Err(Error::Protocol {
                uri: self.odata_id().clone(),
                method: Method::GET,
                reason: "iDRAC manager reports no Id".into(),
            });
        }
        Ok(())
    }

    async fn force_reset(&self) -> Result<(), Error<B>> {
        self.reset_idrac(IdracResetType::Graceful).await
    }
}
