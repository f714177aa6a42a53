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
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::update_service::UpdateService;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// Content of `Oem.AMIUpdateService`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmiUpdateStatus {
    /// Progress of the running flash, e.g. `45%`.
    pub flash_percentage: Option<String>,
    pub preserve_configuration: Option<bool>,
    pub update_information: Option<String>,
    pub update_status: Option<String>,
    pub update_target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DualImageConfigurations {
    pub active_image: Option<String>,
    pub boot_image: Option<String>,
    pub firmware_image1_name: Option<String>,
    pub firmware_image1_version: Option<String>,
    pub firmware_image2_name: Option<String>,
    pub firmware_image2_version: Option<String>,
}

/// Content of `Oem.BMC`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BmcImages {
    #[serde(default)]
    pub dual_image_configurations: DualImageConfigurations,
}

/// Content of `Oem.BIOS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiosUpdateOptions {
    /// Keep NVRAM content across BIOS updates.
    #[serde(rename = "BIOSPreserveNVRAM")]
    pub bios_preserve_nvram: Option<bool>,
}

/// AMI blocks of the update service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmiUpdateServiceData {
    #[serde(rename = "AMIUpdateService", default)]
    pub update: AmiUpdateStatus,
    #[serde(rename = "BMC", default)]
    pub bmc: BmcImages,
    #[serde(rename = "BIOS", default)]
    pub bios: BiosUpdateOptions,
}

#[derive(Deserialize, Default)]
struct AmiUpdateOemActions {
    #[serde(rename = "#UpdateService.UploadCABundle")]
    upload_ca_bundle: Option<Action>,
}

#[derive(Deserialize, Default)]
struct AmiUpdateActions {
    #[serde(rename = "Oem", default)]
    oem: AmiUpdateOemActions,
}

#[derive(Deserialize)]
struct AmiUpdateServiceSchema {
    #[serde(rename = "Oem", default)]
    oem: AmiUpdateServiceData,
    #[serde(rename = "Actions", default)]
    actions: AmiUpdateActions,
}

/// Update service with the AMI extension decoded.
pub struct AmiUpdateService<B: Bmc> {
    service: UpdateService<B>,
    /// AMI blocks of `Oem`.
    pub ami: AmiUpdateServiceData,
    upload_ca_bundle: Option<Action>,
}

impl<B: Bmc> AmiUpdateService<B> {
    /// Decode the AMI extension from the payload `service` was fetched
    /// with. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the AMI blocks are malformed.
    pub fn from_update_service(service: UpdateService<B>) -> Result<Self, Error<B>> {
        let AmiUpdateServiceSchema { oem, actions } = service.base().decode()?;
        debug!(service = %service.odata_id(), "AMI update service overlay");
        Ok(Self {
            service,
            ami: oem,
            upload_ca_bundle: actions.oem.upload_ca_bundle,
        })
    }

    /// Underlying standard update service.
    #[must_use]
    pub const fn service(&self) -> &UpdateService<B> {
        &self.service
    }

    /// Upload the staged CA certificate bundle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::invoke`].
    pub async fn upload_ca_bundle(&self) -> Result<(), Error<B>> {
        let target = action::target(
            self.upload_ca_bundle.as_ref(),
            "UpdateService.UploadCABundle",
        )?;
        action::invoke(self.base().bmc().as_ref(), target, &serde_json::Map::new()).await?;
        Ok(())
    }
}

impl<B: Bmc> Resource<B> for AmiUpdateService<B> {
    fn base(&self) -> &ResourceBase<B> {
        self.service.base()
    }
}
