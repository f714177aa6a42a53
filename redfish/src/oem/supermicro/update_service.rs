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

//! Supermicro update service: certificate and IPMI configuration
//! resources linked from `Oem.Supermicro`, and the OEM install action.

use crate::action;
use crate::resource::fetch;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::task_service::Task;
use crate::update_service::UpdateService;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::FormPart;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

/// Parameters of `#SmcUpdateService.Install`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SupermicroInstallBody {
    /// Components to install the staged image on.
    pub targets: Vec<String>,
    /// Vendor install options, e.g. `PreserveSetting`.
    pub install_options: Vec<String>,
}

/// Validity of the BMC web certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslCertData {
    /// Certificate expiration date.
    #[serde(rename = "GoodTHRU")]
    pub good_through: Option<String>,
    /// Certificate start date. The service misspells the key.
    #[serde(rename = "VaildFrom")]
    pub valid_from: Option<String>,
}

#[derive(Deserialize, Default)]
struct SslCertActions {
    #[serde(rename = "#SmcSSLCert.Upload")]
    upload: Option<Action>,
}

#[derive(Deserialize)]
struct SslCertSchema {
    #[serde(flatten)]
    data: SslCertData,
    #[serde(rename = "Actions", default)]
    actions: SslCertActions,
}

/// BMC web certificate resource.
pub struct SupermicroSslCert<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded certificate validity.
    pub data: SslCertData,
    upload: Option<Action>,
}

impl<B: Bmc> SupermicroSslCert<B> {
    /// Replace the BMC web certificate with `cert` and its private `key`,
    /// both PEM encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::upload`].
    pub async fn upload(
        &self,
        cert: impl Into<Vec<u8>>,
        key: impl Into<Vec<u8>>,
    ) -> Result<(), Error<B>> {
        let target = action::target(self.upload.as_ref(), "SmcSSLCert.Upload")?;
        let parts = [
            FormPart::file("cert_file", "cert.pem", cert),
            FormPart::file("key_file", "key.pem", key),
        ];
        info!(%target, "uploading Supermicro BMC certificate");
        action::upload(self.base.bmc().as_ref(), target, &parts).await?;
        Ok(())
    }
}

impl<B: Bmc> FromBase<B> for SupermicroSslCert<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let SslCertSchema { data, actions } = base.decode()?;
        Ok(Self {
            base,
            data,
            upload: actions.upload,
        })
    }
}

impl<B: Bmc> Resource<B> for SupermicroSslCert<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[derive(Deserialize, Default)]
struct IpmiConfigActions {
    #[serde(rename = "#SmcIPMIConfig.Upload")]
    upload: Option<Action>,
    #[serde(rename = "#SmcIPMIConfig.Download")]
    download: Option<Action>,
}

#[derive(Deserialize)]
struct IpmiConfigSchema {
    #[serde(rename = "Actions", default)]
    actions: IpmiConfigActions,
}

/// Saved IPMI configuration of the BMC.
///
/// The advertised actions take no parameters.
pub struct SupermicroIpmiConfig<B: Bmc> {
    base: ResourceBase<B>,
    upload: Option<Action>,
    download: Option<Action>,
}

impl<B: Bmc> SupermicroIpmiConfig<B> {
    /// Restore the saved IPMI configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::invoke`].
    pub async fn upload(&self) -> Result<(), Error<B>> {
        let target = action::target(self.upload.as_ref(), "SmcIPMIConfig.Upload")?;
        action::invoke(self.base.bmc().as_ref(), target, &serde_json::Map::new()).await?;
        Ok(())
    }

    /// Save the current IPMI configuration. Returns the reply body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::invoke`].
    pub async fn download(&self) -> Result<Vec<u8>, Error<B>> {
        let target = action::target(self.download.as_ref(), "SmcIPMIConfig.Download")?;
        let response =
            action::invoke(self.base.bmc().as_ref(), target, &serde_json::Map::new()).await?;
        Ok(response.body)
    }
}

impl<B: Bmc> FromBase<B> for SupermicroIpmiConfig<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let IpmiConfigSchema { actions } = base.decode()?;
        Ok(Self {
            base,
            upload: actions.upload,
            download: actions.download,
        })
    }
}

impl<B: Bmc> Resource<B> for SupermicroIpmiConfig<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct SupermicroUpdateLinks {
    #[serde(rename = "SSLCert", default)]
    ssl_cert: Link,
    #[serde(rename = "IPMIConfig", default)]
    ipmi_config: Link,
}

#[derive(Deserialize, Default)]
struct OemSupermicro {
    #[serde(rename = "Supermicro", default)]
    supermicro: SupermicroUpdateLinks,
}

#[derive(Deserialize, Default)]
struct SupermicroOemActions {
    #[serde(rename = "#SmcUpdateService.Install")]
    install: Option<Action>,
}

#[derive(Deserialize, Default)]
struct SupermicroActions {
    #[serde(rename = "Oem", default)]
    oem: SupermicroOemActions,
}

#[derive(Deserialize)]
struct SupermicroUpdateServiceSchema {
    #[serde(rename = "Oem", default)]
    oem: OemSupermicro,
    #[serde(rename = "Actions", default)]
    actions: SupermicroActions,
}

/// Update service with the Supermicro extension decoded.
pub struct SupermicroUpdateService<B: Bmc> {
    service: UpdateService<B>,
    links: SupermicroUpdateLinks,
    install: Option<Action>,
}

impl<B: Bmc> SupermicroUpdateService<B> {
    /// Decode the Supermicro extension from the payload `service` was
    /// fetched with. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the Supermicro blocks are malformed.
    pub fn from_update_service(service: UpdateService<B>) -> Result<Self, Error<B>> {
        let SupermicroUpdateServiceSchema { oem, actions } = service.base().decode()?;
        debug!(service = %service.odata_id(), "Supermicro update service overlay");
        Ok(Self {
            service,
            links: oem.supermicro,
            install: actions.oem.install,
        })
    }

    /// Underlying standard update service.
    #[must_use]
    pub const fn service(&self) -> &UpdateService<B> {
        &self.service
    }

    #[must_use]
    pub fn ssl_cert_id(&self) -> Option<&ODataId> {
        self.links.ssl_cert.id()
    }

    #[must_use]
    pub fn ipmi_config_id(&self) -> Option<&ODataId> {
        self.links.ipmi_config.id()
    }

    /// Fetch the BMC web certificate resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if it is not linked, or any fetch
    /// error.
    pub async fn ssl_cert(&self) -> Result<SupermicroSslCert<B>, Error<B>> {
        self.base()
            .follow(&self.links.ssl_cert, "Supermicro SSLCert")
            .await
    }

    /// Fetch the IPMI configuration resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if it is not linked, or any fetch
    /// error.
    pub async fn ipmi_config(&self) -> Result<SupermicroIpmiConfig<B>, Error<B>> {
        self.base()
            .follow(&self.links.ipmi_config, "Supermicro IPMIConfig")
            .await
    }

    /// Install the staged image. If the reply carries a `Location`
    /// header, the task it points to is fetched and returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::invoke`] or of fetching the task.
    pub async fn install(
        &self,
        body: &SupermicroInstallBody,
    ) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.install.as_ref(), "SmcUpdateService.Install")?;
        info!(%target, targets = ?body.targets, "installing staged Supermicro image");
        let bmc = self.base().bmc();
        let response = action::invoke(bmc.as_ref(), target, body).await?;
        match response.location() {
            Some(task) => fetch(bmc, &task).await.map(Some),
            None => Ok(None),
        }
    }
}

impl<B: Bmc> Resource<B> for SupermicroUpdateService<B> {
    fn base(&self) -> &ResourceBase<B> {
        self.service.base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ErrorKind;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    const SSL_CERT: &str = "/redfish/v1/UpdateService/Oem/Supermicro/SSLCert";
    const IPMI_CONFIG: &str = "/redfish/v1/UpdateService/Oem/Supermicro/IPMIConfig";
    const INSTALL: &str = "/redfish/v1/UpdateService/Actions/Oem/SmcUpdateService.Install";

    async fn service(bmc: &Arc<TestBmc>, body: &str) -> SupermicroUpdateService<TestBmc> {
        bmc.expect(Expect::get("/redfish/v1/UpdateService", body));
        let service: UpdateService<TestBmc> =
            fetch(bmc, &ODataId::from("/redfish/v1/UpdateService"))
                .await
                .unwrap();
        SupermicroUpdateService::from_update_service(service).unwrap()
    }

    async fn linked(bmc: &Arc<TestBmc>) -> SupermicroUpdateService<TestBmc> {
        service(
            bmc,
            r##"{"@odata.id": "/redfish/v1/UpdateService", "Id": "UpdateService",
                "Name": "Update Service",
                "Oem": {"Supermicro": {
                    "SSLCert": {"@odata.id": "/redfish/v1/UpdateService/Oem/Supermicro/SSLCert"},
                    "IPMIConfig": {"@odata.id": "/redfish/v1/UpdateService/Oem/Supermicro/IPMIConfig"}}},
                "Actions": {"Oem": {"#SmcUpdateService.Install": {
                    "target": "/redfish/v1/UpdateService/Actions/Oem/SmcUpdateService.Install"}}}}"##,
        )
        .await
    }

    #[tokio::test]
    async fn install_follows_task() {
        let bmc = Arc::new(TestBmc::default());
        let service = linked(&bmc).await;
        assert_eq!(service.ssl_cert_id(), Some(&ODataId::from(SSL_CERT)));
        assert_eq!(service.ipmi_config_id(), Some(&ODataId::from(IPMI_CONFIG)));

        bmc.expect(Expect::post_with_headers(
            INSTALL,
            r#"{"Targets": ["/redfish/v1/UpdateService/FirmwareInventory/BMC"],
                "InstallOptions": ["PreserveSetting"]}"#,
            202,
            &[("location", "/redfish/v1/TaskService/Tasks/1")],
            "",
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/TaskService/Tasks/1",
            r#"{"@odata.id": "/redfish/v1/TaskService/Tasks/1", "Id": "1", "Name": "BMC update",
                "TaskState": "Running"}"#,
        ));
        let body = SupermicroInstallBody {
            targets: vec!["/redfish/v1/UpdateService/FirmwareInventory/BMC".into()],
            install_options: vec!["PreserveSetting".into()],
        };
        let task = service.install(&body).await.unwrap().unwrap();
        assert_eq!(task.id().inner(), "1");
        assert_eq!(bmc.pending(), 0);
    }

    #[tokio::test]
    async fn certificate_is_uploaded_as_form() {
        let bmc = Arc::new(TestBmc::default());
        let service = linked(&bmc).await;
        bmc.expect(Expect::get(
            SSL_CERT,
            r##"{"@odata.id": "/redfish/v1/UpdateService/Oem/Supermicro/SSLCert",
                "Id": "SSLCert", "Name": "SSLCert",
                "GoodTHRU": "Jun 20 08:20:08 2033 GMT", "VaildFrom": "Jun 23 08:20:08 2023 GMT",
                "Actions": {"#SmcSSLCert.Upload": {
                    "target": "/redfish/v1/UpdateService/Oem/Supermicro/SSLCert/Actions/SmcSSLCert.Upload"}}}"##,
        ));
        let cert = service.ssl_cert().await.unwrap();
        assert_eq!(
            cert.data.good_through.as_deref(),
            Some("Jun 20 08:20:08 2033 GMT")
        );
        assert_eq!(
            cert.data.valid_from.as_deref(),
            Some("Jun 23 08:20:08 2023 GMT")
        );

        bmc.expect(Expect::post_multipart(
            "/redfish/v1/UpdateService/Oem/Supermicro/SSLCert/Actions/SmcSSLCert.Upload",
            &[
                FormPart::file("cert_file", "cert.pem", "CERT"),
                FormPart::file("key_file", "key.pem", "KEY"),
            ],
            200,
            "",
        ));
        cert.upload("CERT", "KEY").await.unwrap();
        assert_eq!(bmc.pending(), 0);
    }

    #[tokio::test]
    async fn ipmi_config_actions() {
        let bmc = Arc::new(TestBmc::default());
        let service = linked(&bmc).await;
        bmc.expect(Expect::get(
            IPMI_CONFIG,
            r##"{"@odata.id": "/redfish/v1/UpdateService/Oem/Supermicro/IPMIConfig",
                "Id": "IPMIConfig", "Name": "IPMIConfig",
                "Actions": {
                    "#SmcIPMIConfig.Upload": {
                        "target": "/redfish/v1/UpdateService/Oem/Supermicro/IPMIConfig/Actions/SmcIPMIConfig.Upload"},
                    "#SmcIPMIConfig.Download": {
                        "target": "/redfish/v1/UpdateService/Oem/Supermicro/IPMIConfig/Actions/SmcIPMIConfig.Download"}}}"##,
        ));
        let config = service.ipmi_config().await.unwrap();

        bmc.expect(Expect::post(
            "/redfish/v1/UpdateService/Oem/Supermicro/IPMIConfig/Actions/SmcIPMIConfig.Download",
            "{}",
            200,
            "[BMC]\nVersion=1",
        ));
        assert_eq!(config.download().await.unwrap(), b"[BMC]\nVersion=1".to_vec());

        bmc.expect(Expect::post(
            "/redfish/v1/UpdateService/Oem/Supermicro/IPMIConfig/Actions/SmcIPMIConfig.Upload",
            "{}",
            204,
            "",
        ));
        config.upload().await.unwrap();
        assert_eq!(bmc.pending(), 0);
    }

    #[tokio::test]
    async fn missing_extension_is_not_supported() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(
            &bmc,
            r#"{"@odata.id": "/redfish/v1/UpdateService", "Id": "UpdateService",
                "Name": "Update Service"}"#,
        )
        .await;
        let err = service.ssl_cert().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        let err = service.ipmi_config().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        let err = service
            .install(&SupermicroInstallBody::default())
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        assert_eq!(bmc.pending(), 0);
    }
}
