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

//! Bios

use crate::action;
use crate::bmc;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Data of the BIOS resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BiosData {
    /// Attribute registry describing `attributes`.
    pub attribute_registry: Option<String>,
    /// Current attribute values.
    #[serde(default)]
    pub attributes: JsonMap<String, JsonValue>,
}

#[derive(Deserialize, Default)]
struct Settings {
    #[serde(rename = "SettingsObject", default)]
    settings_object: Link,
}

#[derive(Deserialize, Default)]
struct BiosActions {
    #[serde(rename = "#Bios.ResetBios")]
    reset_bios: Option<Action>,
}

#[derive(Deserialize)]
struct BiosSchema {
    #[serde(flatten)]
    data: BiosData,
    #[serde(rename = "@Redfish.Settings", default)]
    settings: Settings,
    #[serde(rename = "Actions", default)]
    actions: BiosActions,
}

#[derive(Serialize)]
struct AttributesUpdate<'a> {
    #[serde(rename = "Attributes")]
    attributes: &'a JsonMap<String, JsonValue>,
}

/// BIOS.
///
/// Provides functions to access BIOS attributes.
pub struct Bios<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded BIOS data.
    pub data: BiosData,
    settings: Link,
    reset_bios: Option<Action>,
}

impl<B: Bmc> Bios<B> {
    /// Get bios attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&JsonValue> {
        self.data.attributes.get(name)
    }

    /// Request new attribute values.
    ///
    /// Values are written to the settings object when the service has one
    /// and take effect on the next boot; otherwise they are written to the
    /// BIOS resource itself.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update.
    pub async fn update_attributes(
        &self,
        attributes: &JsonMap<String, JsonValue>,
    ) -> Result<(), Error<B>> {
        let body = AttributesUpdate { attributes };
        match self.settings.id() {
            Some(settings) => {
                debug!(%settings, count = attributes.len(), "staging BIOS attributes");
                bmc::patch(self.base.bmc().as_ref(), settings, None, &body).await?;
            }
            None => {
                bmc::patch(self.base.bmc().as_ref(), self.odata_id(), self.etag(), &body)
                    .await?;
            }
        }
        Ok(())
    }

    /// Reset attributes to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any dispatch error.
    pub async fn reset_bios(&self) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.reset_bios.as_ref(), "Bios.ResetBios")?;
        action::dispatch(self.base.bmc(), target, &JsonMap::new()).await
    }
}

impl<B: Bmc> FromBase<B> for Bios<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let BiosSchema {
            data,
            settings,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            settings: settings.settings_object,
            reset_bios: actions.reset_bios,
        })
    }
}

impl<B: Bmc> Resource<B> for Bios<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ODataId;
    use serde_json::json;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    #[tokio::test]
    async fn attributes_go_to_settings_object() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/Systems/1/Bios",
            r##"{"Id": "BIOS", "Name": "BIOS Configuration",
                "AttributeRegistry": "BiosAttributeRegistryP89.v1_0_0",
                "Attributes": {"ProcTurboMode": "Enabled", "UsbControl": "UsbEnabled"},
                "@Redfish.Settings": {"SettingsObject": {"@odata.id": "/redfish/v1/Systems/1/Bios/Settings"}},
                "Actions": {"#Bios.ResetBios": {"target": "/redfish/v1/Systems/1/Bios/Actions/Bios.ResetBios"}}}"##,
        ));
        let bios: Bios<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/Systems/1/Bios"))
                .await
                .unwrap();
        assert_eq!(bios.attribute("ProcTurboMode"), Some(&json!("Enabled")));

        bmc.expect(Expect::patch(
            "/redfish/v1/Systems/1/Bios/Settings",
            r#"{"Attributes": {"ProcTurboMode": "Disabled"}}"#,
            200,
            "{}",
        ));
        let mut update = JsonMap::new();
        update.insert("ProcTurboMode".into(), json!("Disabled"));
        bios.update_attributes(&update).await.unwrap();

        bmc.expect(Expect::post(
            "/redfish/v1/Systems/1/Bios/Actions/Bios.ResetBios",
            "{}",
            204,
            "",
        ));
        assert!(bios.reset_bios().await.unwrap().is_none());
    }
}
