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

//! Certificate service and certificates.

use crate::action;
use crate::bmc;
use crate::collection;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::EdmDateTimeOffset;
use rsfish_core::Link;
use rsfish_core::LinkList;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;

/// Format of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateType {
    /// A PEM-encoded certificate.
    PEM,
    /// A PEM-encoded certificate chain.
    PEMchain,
    /// A PEM-encoded PKCS7 certificate.
    PKCS7,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Distinguished name of a certificate subject or issuer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateIdentifier {
    /// Common name.
    pub common_name: Option<String>,
    /// Organization.
    pub organization: Option<String>,
    /// Organizational unit.
    pub organizational_unit: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country code.
    pub country: Option<String>,
}

/// Data of a certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateData {
    /// Certificate in the format of `certificate_type`.
    pub certificate_string: Option<String>,
    /// Format of the certificate.
    pub certificate_type: Option<CertificateType>,
    /// Issuer.
    pub issuer: Option<CertificateIdentifier>,
    /// Subject.
    pub subject: Option<CertificateIdentifier>,
    /// Start of validity.
    pub valid_not_before: Option<EdmDateTimeOffset>,
    /// End of validity.
    pub valid_not_after: Option<EdmDateTimeOffset>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Fingerprint.
    pub fingerprint: Option<String>,
}

#[derive(Deserialize)]
struct CertificateSchema {
    #[serde(flatten)]
    data: CertificateData,
}

/// Certificate.
pub struct Certificate<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded certificate data.
    pub data: CertificateData,
}

impl<B: Bmc> FromBase<B> for Certificate<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let CertificateSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Certificate<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Parameters of `#CertificateService.GenerateCSR`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateCsrBody {
    /// Collection the certificate will be installed into.
    pub certificate_collection: Link,
    /// Common name.
    pub common_name: String,
    /// Organization.
    pub organization: String,
    /// Organizational unit.
    pub organizational_unit: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Country code.
    pub country: String,
    /// Subject alternative names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    /// Key length in bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_bit_length: Option<u32>,
    /// Key pair algorithm, e.g. `TPM_ALG_RSA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_pair_algorithm: Option<String>,
}

/// Reply to `#CertificateService.GenerateCSR`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateCsrResponse {
    /// PEM-encoded signing request.
    #[serde(rename = "CSRString")]
    pub csr_string: String,
    /// Collection the certificate will be installed into.
    #[serde(default)]
    pub certificate_collection: Link,
}

/// Parameters of `#CertificateService.ReplaceCertificate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReplaceCertificateBody {
    /// New certificate.
    pub certificate_string: String,
    /// Format of the new certificate.
    pub certificate_type: CertificateType,
    /// Certificate to replace.
    #[serde(rename = "CertificateUri")]
    pub certificate_uri: Link,
}

#[derive(Deserialize, Default)]
struct CertificateServiceActions {
    #[serde(rename = "#CertificateService.GenerateCSR")]
    generate_csr: Option<Action>,
    #[serde(rename = "#CertificateService.ReplaceCertificate")]
    replace_certificate: Option<Action>,
}

#[derive(Deserialize)]
struct CertificateServiceSchema {
    #[serde(rename = "CertificateLocations", default)]
    certificate_locations: Link,
    #[serde(rename = "Actions", default)]
    actions: CertificateServiceActions,
}

#[derive(Deserialize, Default)]
struct LocationLinks {
    #[serde(rename = "Certificates", default)]
    certificates: LinkList,
}

#[derive(Deserialize)]
struct CertificateLocationsSchema {
    #[serde(rename = "Links", default)]
    links: LocationLinks,
}

/// Certificate service.
pub struct CertificateService<B: Bmc> {
    base: ResourceBase<B>,
    certificate_locations: Link,
    actions: CertificateServiceActions,
}

impl<B: Bmc> CertificateService<B> {
    /// All certificates installed on the service.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the locations or a certificate fails.
    pub async fn certificates(&self) -> Result<Vec<Certificate<B>>, Error<B>> {
        let Some(uri) = self.certificate_locations.id() else {
            return Ok(Vec::new());
        };
        let locations: CertificateLocationsSchema =
            crate::resource::fetch::<B, ResourceBase<B>>(self.base.bmc(), uri)
                .await?
                .decode()?;
        collection::resolve(self.base.bmc(), &locations.links.certificates).await
    }

    /// Ask the service for a certificate signing request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised,
    /// any error of [`action::invoke`], or [`Error::Decode`] if the reply
    /// carries no CSR.
    pub async fn generate_csr(&self, body: &GenerateCsrBody) -> Result<GenerateCsrResponse, Error<B>> {
        let target: &ODataId = action::target(
            self.actions.generate_csr.as_ref(),
            "CertificateService.GenerateCSR",
        )?;
        let response = action::invoke(self.base.bmc().as_ref(), target, body).await?;
        bmc::decode(target, &response.body)
    }

    /// Replace an installed certificate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::invoke`].
    pub async fn replace_certificate(&self, body: &ReplaceCertificateBody) -> Result<(), Error<B>> {
        let target = action::target(
            self.actions.replace_certificate.as_ref(),
            "CertificateService.ReplaceCertificate",
        )?;
        action::invoke(self.base.bmc().as_ref(), target, body).await?;
        Ok(())
    }
}

impl<B: Bmc> FromBase<B> for CertificateService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let CertificateServiceSchema {
            certificate_locations,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            certificate_locations,
            actions,
        })
    }
}

impl<B: Bmc> Resource<B> for CertificateService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    #[tokio::test]
    async fn generate_csr_decodes_reply() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/CertificateService",
            r##"{"Id": "CertificateService", "Name": "Certificate Service",
                "Actions": {"#CertificateService.GenerateCSR": {
                    "target": "/redfish/v1/CertificateService/Actions/CertificateService.GenerateCSR"}}}"##,
        ));
        let service: CertificateService<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/CertificateService"))
                .await
                .unwrap();
        let collection = "/redfish/v1/Managers/BMC/NetworkProtocol/HTTPS/Certificates";
        bmc.expect(Expect::post(
            "/redfish/v1/CertificateService/Actions/CertificateService.GenerateCSR",
            format!(
                r#"{{"CertificateCollection": {{"@odata.id": "{collection}"}},
                    "CommonName": "bmc.example.com", "Organization": "Contoso",
                    "OrganizationalUnit": "IT", "City": "Redmond", "State": "WA",
                    "Country": "US"}}"#
            ),
            200,
            format!(
                r#"{{"CSRString": "-----BEGIN CERTIFICATE REQUEST-----",
                    "CertificateCollection": {{"@odata.id": "{collection}"}}}}"#
            ),
        ));
        let reply = service
            .generate_csr(&GenerateCsrBody {
                certificate_collection: Link::new(ODataId::from(collection)),
                common_name: "bmc.example.com".into(),
                organization: "Contoso".into(),
                organizational_unit: "IT".into(),
                city: "Redmond".into(),
                state: "WA".into(),
                country: "US".into(),
                ..GenerateCsrBody::default()
            })
            .await
            .unwrap();
        assert!(reply.csr_string.starts_with("-----BEGIN"));
        assert!(service.certificates().await.unwrap().is_empty());
    }
}
