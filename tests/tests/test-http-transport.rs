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

//! Typed resources over the HTTP transport.

use rsfish::bmc_http::reqwest::Client;
use rsfish::bmc_http::BmcCredentials;
use rsfish::bmc_http::HttpBmc;
use rsfish::bmc_http::SessionMode;
use rsfish::Resource as _;
use rsfish::ServiceRoot;
use rsfish_core::ErrorKind;
use serde_json::json;
use std::error::Error as StdError;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

async fn mount_get(server: &MockServer, uri: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(uri))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn open(server: &MockServer) -> Result<Arc<HttpBmc<Client>>, Box<dyn StdError>> {
    let bmc = HttpBmc::open(
        Client::new()?,
        Url::parse(&server.uri())?,
        BmcCredentials::new("root".into(), "password".into()),
        SessionMode::Basic,
    )
    .await?;
    Ok(Arc::new(bmc))
}

#[tokio::test]
async fn walks_systems_over_http() -> Result<(), Box<dyn StdError>> {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/redfish/v1/",
        200,
        json!({
            "@odata.id": "/redfish/v1/",
            "Id": "RootService",
            "Name": "Root Service",
            "Vendor": "Dell",
            "Systems": { "@odata.id": "/redfish/v1/Systems" }
        }),
    )
    .await;
    mount_get(
        &server,
        "/redfish/v1/Systems",
        200,
        json!({
            "@odata.id": "/redfish/v1/Systems",
            "Members@odata.count": 1,
            "Members": [{ "@odata.id": "/redfish/v1/Systems/System.Embedded.1" }]
        }),
    )
    .await;
    mount_get(
        &server,
        "/redfish/v1/Systems/System.Embedded.1",
        200,
        json!({
            "@odata.id": "/redfish/v1/Systems/System.Embedded.1",
            "Id": "System.Embedded.1",
            "Name": "System",
            "PowerState": "On"
        }),
    )
    .await;

    let root = ServiceRoot::new(open(&server).await?).await?;
    assert_eq!(root.vendor(), Some(rsfish::oem::Vendor::Dell));
    let systems = root.systems().await?;
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].id().inner(), "System.Embedded.1");
    Ok(())
}

#[tokio::test]
async fn redfish_error_body_is_kept() -> Result<(), Box<dyn StdError>> {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/redfish/v1/",
        404,
        json!({ "error": {
            "code": "Base.1.8.ResourceMissingAtURI",
            "message": "The resource at the URI /redfish/v1/ was not found."
        } }),
    )
    .await;

    let err = ServiceRoot::new(open(&server).await?)
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    let code = err.redfish_error().and_then(|e| e.error.code.as_deref());
    assert_eq!(code, Some("Base.1.8.ResourceMissingAtURI"));
    Ok(())
}
