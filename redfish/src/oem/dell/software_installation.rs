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

//! Dell software installation service.
//!
//! Firmware is updated from a catalog repository in two steps: an
//! [`install_from_repository`](DellSoftwareInstallationService::install_from_repository)
//! with `ApplyUpdate = False` stages the comparison, then
//! [`get_repo_based_update_list`](DellSoftwareInstallationService::get_repo_based_update_list)
//! reports what would be installed. The update list arrives as a CIM XML
//! document wrapped in JSON.

use crate::action;
use crate::oem::dell::manager::ShareType;
use crate::oem::dell::DellJob;
use crate::resource::fetch;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

/// Whether updates are applied or only compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyUpdate {
    True,
    False,
}

/// Whether certificate warnings of an HTTPS repository are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreCertWarning {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyType {
    Http,
    Socks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxySupport {
    DefaultProxy,
    Off,
    ParametersProxy,
}

/// Parameters of `#DellSoftwareInstallationService.InstallFromRepository`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstallFromRepoBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_update: Option<ApplyUpdate>,
    /// Catalog file name, `Catalog.xml` by default on the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,
    /// Address of the repository.
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_cert_warning: Option<IgnoreCertWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_passwd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_support: Option<ProxySupport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_type: Option<ProxyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_uname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reboot_needed: Option<bool>,
    /// Path of the repository on the share.
    pub share_name: String,
    pub share_type: ShareType,
    /// Required for CIFS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workgroup: Option<String>,
}

impl InstallFromRepoBody {
    /// Body with the mandatory parameters only.
    #[must_use]
    pub fn new(
        ip_address: impl Into<String>,
        share_name: impl Into<String>,
        share_type: ShareType,
    ) -> Self {
        Self {
            apply_update: None,
            catalog_file: None,
            ip_address: ip_address.into(),
            ignore_cert_warning: None,
            mount_point: None,
            password: None,
            proxy_passwd: None,
            proxy_port: None,
            proxy_server: None,
            proxy_support: None,
            proxy_type: None,
            proxy_uname: None,
            reboot_needed: None,
            share_name: share_name.into(),
            share_type,
            user_name: None,
            workgroup: None,
        }
    }

    /// Check the body before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first missing field.
    pub fn validate<B: Bmc>(&self) -> Result<(), Error<B>> {
        if self.ip_address.trim().is_empty() {
            return Err(Error::InvalidParameter("IPAddress is required".into()));
        }
        if self.share_name.trim().is_empty() {
            return Err(Error::InvalidParameter("ShareName is required".into()));
        }
        if self.share_type == ShareType::Cifs
            && self.user_name.as_deref().map_or(true, str::is_empty)
        {
            return Err(Error::InvalidParameter(
                "UserName is required for CIFS shares".into(),
            ));
        }
        Ok(())
    }
}

/// One package of the repository update list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateListFirmware {
    /// `1` warning, `2` critical, `3` recommended.
    pub criticality: String,
    pub display_name: String,
    pub base_location: String,
    /// Path of the package, including its name.
    pub package_path: String,
    pub package_name: String,
    /// Version in the catalog.
    pub package_version: String,
    /// `NONE`, `IDRAC` or `HOST`.
    pub reboot_type: String,
    pub job_id: String,
    /// FQDD of the updated component.
    pub target: String,
    pub component_id: String,
    pub component_type: String,
    /// Semicolon separated component identifier types.
    pub component_info_name: String,
    /// Semicolon separated component identifiers.
    pub component_info_value: String,
    /// Version currently installed.
    pub installed_version: String,
}

#[derive(Deserialize)]
struct PackageListReply {
    #[serde(rename = "PackageList")]
    package_list: String,
}

#[derive(Deserialize)]
struct CimDocument {
    #[serde(rename = "MESSAGE")]
    message: CimMessage,
}

#[derive(Deserialize)]
struct CimMessage {
    #[serde(rename = "SIMPLEREQ")]
    simple_req: SimpleReq,
}

#[derive(Deserialize)]
struct SimpleReq {
    #[serde(rename = "VALUE.NAMEDINSTANCE", default)]
    instances: Vec<NamedInstance>,
}

#[derive(Deserialize)]
struct NamedInstance {
    #[serde(rename = "INSTANCENAME")]
    instance_name: Option<Instance>,
    #[serde(rename = "INSTANCE")]
    instance: Option<Instance>,
}

#[derive(Deserialize, Default)]
struct Instance {
    #[serde(rename = "PROPERTY", default)]
    properties: Vec<Property>,
    #[serde(rename = "PROPERTY.ARRAY", default)]
    arrays: Vec<PropertyArray>,
}

#[derive(Deserialize)]
struct Property {
    #[serde(rename = "@NAME")]
    name: String,
    #[serde(rename = "VALUE", default)]
    value: String,
}

#[derive(Deserialize)]
struct PropertyArray {
    #[serde(rename = "@NAME")]
    name: String,
    #[serde(rename = "VALUE.ARRAY", default)]
    values: ValueArray,
}

#[derive(Deserialize, Default)]
struct ValueArray {
    #[serde(rename = "VALUE", default)]
    values: Vec<String>,
}

impl From<Instance> for UpdateListFirmware {
    fn from(instance: Instance) -> Self {
        let mut firmware = Self::default();
        for Property { name, value } in instance.properties {
            let slot = match name.as_str() {
                "Criticality" => &mut firmware.criticality,
                "DisplayName" => &mut firmware.display_name,
                "BaseLocation" => &mut firmware.base_location,
                "PackagePath" => &mut firmware.package_path,
                "PackageName" => &mut firmware.package_name,
                "PackageVersion" => &mut firmware.package_version,
                "RebootType" => &mut firmware.reboot_type,
                "JobID" => &mut firmware.job_id,
                "Target" => &mut firmware.target,
                "ComponentID" => &mut firmware.component_id,
                "ComponentType" => &mut firmware.component_type,
                _ => continue,
            };
            *slot = value;
        }
        for PropertyArray { name, values } in instance.arrays {
            let slot = match name.as_str() {
                "ComponentInfoName" => &mut firmware.component_info_name,
                "ComponentInfoValue" => &mut firmware.component_info_value,
                "ComponentInstalledVersion" => &mut firmware.installed_version,
                _ => continue,
            };
            *slot = values.values.join(";");
        }
        firmware
    }
}

/// Parse the JSON-wrapped CIM update list.
fn parse_update_list<B: Bmc>(body: &[u8]) -> Result<Vec<UpdateListFirmware>, Error<B>> {
    let raw = String::from_utf8_lossy(body).into_owned();
    let reply: PackageListReply = match serde_json::from_slice(body) {
        Ok(reply) => reply,
        Err(err) => {
            return Err(Error::UpdateList {
                raw,
                reason: format!("no PackageList: {err}"),
            })
        }
    };
    let document: CimDocument = match quick_xml::de::from_str(&reply.package_list) {
        Ok(document) => document,
        Err(err) => {
            return Err(Error::UpdateList {
                raw,
                reason: format!("malformed package list: {err}"),
            })
        }
    };
    let list: Vec<UpdateListFirmware> = document
        .message
        .simple_req
        .instances
        .into_iter()
        .filter_map(|named| named.instance.or(named.instance_name))
        .map(UpdateListFirmware::from)
        .collect();
    if list.is_empty() {
        return Err(Error::UpdateList {
            raw,
            reason: "no firmware packages in update list".into(),
        });
    }
    Ok(list)
}

#[derive(Deserialize, Default)]
struct SoftwareInstallationActions {
    #[serde(rename = "#DellSoftwareInstallationService.InstallFromRepository")]
    install_from_repository: Option<Action>,
    #[serde(rename = "#DellSoftwareInstallationService.GetRepoBasedUpdateList")]
    get_repo_based_update_list: Option<Action>,
}

#[derive(Deserialize)]
struct SoftwareInstallationSchema {
    #[serde(rename = "Actions", default)]
    actions: SoftwareInstallationActions,
}

/// Dell software installation service.
pub struct DellSoftwareInstallationService<B: Bmc> {
    base: ResourceBase<B>,
    actions: SoftwareInstallationActions,
}

impl<B: Bmc> DellSoftwareInstallationService<B> {
    /// Update firmware from a catalog repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the body is incomplete,
    /// [`Error::NotSupported`] if the action is not advertised,
    /// [`Error::Protocol`] if the reply does not point to a job, or any
    /// request error.
    pub async fn install_from_repository(
        &self,
        body: &InstallFromRepoBody,
    ) -> Result<DellJob<B>, Error<B>> {
        body.validate()?;
        let target = action::target(
            self.actions.install_from_repository.as_ref(),
            "DellSoftwareInstallationService.InstallFromRepository",
        )?;
        info!(%target, repository = %body.ip_address, "installing from repository");
        let response = action::submit(self.base.bmc().as_ref(), target, body).await?;
        let job = action::location(target, &response)?;
        fetch(self.base.bmc(), &job).await
    }

    /// Packages the last repository comparison would install.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpdateList`] with the raw reply if it cannot be
    /// interpreted or lists no package, [`Error::NotSupported`] if the
    /// action is not advertised, or any request error.
    pub async fn get_repo_based_update_list(&self) -> Result<Vec<UpdateListFirmware>, Error<B>> {
        let target = action::target(
            self.actions.get_repo_based_update_list.as_ref(),
            "DellSoftwareInstallationService.GetRepoBasedUpdateList",
        )?;
        let response =
            action::invoke(self.base.bmc().as_ref(), target, &serde_json::Map::new()).await?;
        let list = parse_update_list(&response.body)?;
        debug!(%target, packages = list.len(), "repository update list");
        Ok(list)
    }
}

impl<B: Bmc> FromBase<B> for DellSoftwareInstallationService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let SoftwareInstallationSchema { actions } = base.decode()?;
        Ok(Self { base, actions })
    }
}

impl<B: Bmc> Resource<B> for DellSoftwareInstallationService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
