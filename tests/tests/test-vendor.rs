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

//! Vendor detection and extension overlays.

use rsfish::computer_system::ComputerSystem;
use rsfish::oem::dell::DellComputerSystem;
use rsfish::oem::Vendor;
use rsfish::Resource as _;
use rsfish::ServiceRoot;
use rsfish_core::ErrorKind;
use rsfish_core::ODataId;
use rsfish_tests::service_root;
use rsfish_tests::Bmc;
use rsfish_tests::Expect;
use rsfish_tests::ODATA_ID;
use serde_json::json;
use std::error::Error as StdError;
use std::sync::Arc;
use tokio::test;

const SYSTEM: &str = "/redfish/v1/Systems/System.Embedded.1";
const SOFTWARE_INSTALLATION: &str =
    "/redfish/v1/Systems/System.Embedded.1/Oem/Dell/DellSoftwareInstallationService";

async fn root_vendor(extra: serde_json::Value) -> Result<Option<Vendor>, Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    bmc.expect(Expect::get("/redfish/v1/", service_root(extra)));
    Ok(ServiceRoot::new(bmc).await?.vendor())
}

#[test]
async fn dell_from_oem_key() -> Result<(), Box<dyn StdError>> {
    let vendor = root_vendor(json!({
        "Oem": { "Dell": { "@odata.type": "#DellServiceRoot.v1_0_0.DellServiceRoot" } }
    }))
    .await?;
    assert_eq!(vendor, Some(Vendor::Dell));
    Ok(())
}

#[test]
async fn vendor_string_is_a_fallback() -> Result<(), Box<dyn StdError>> {
    assert_eq!(
        root_vendor(json!({ "Vendor": "Supermicro" })).await?,
        Some(Vendor::Supermicro)
    );
    assert_eq!(
        root_vendor(json!({ "Vendor": "Dell Inc." })).await?,
        Some(Vendor::Dell)
    );
    assert_eq!(root_vendor(json!({ "Vendor": "Contoso" })).await?, None);
    Ok(())
}

#[test]
async fn dell_overlay_sends_no_request() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    bmc.expect(Expect::get(
        SYSTEM,
        json!({
            ODATA_ID: SYSTEM,
            "Id": "System.Embedded.1",
            "Name": "System",
            "Oem": { "Dell": { "DellSystem": { "SystemID": 3244 } } },
            "Links": { "Oem": { "Dell": {
                "DellSoftwareInstallationService": { ODATA_ID: SOFTWARE_INSTALLATION }
            } } }
        }),
    ));
    let system: ComputerSystem<Bmc> = rsfish::fetch(&bmc, &ODataId::from(SYSTEM)).await?;
    assert_eq!(bmc.pending(), 0);

    let dell = DellComputerSystem::from_computer_system(system)?;
    assert_eq!(dell.dell_system.system_id, Some(3244));
    assert_eq!(
        dell.software_installation_service_id(),
        Some(&ODataId::from(SOFTWARE_INSTALLATION))
    );
    assert_eq!(dell.odata_id(), &ODataId::from(SYSTEM));
    Ok(())
}

#[test]
async fn unlinked_dell_service_is_not_supported() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    bmc.expect(Expect::get(
        SYSTEM,
        json!({ ODATA_ID: SYSTEM, "Id": "System.Embedded.1", "Name": "System" }),
    ));
    let system: ComputerSystem<Bmc> = rsfish::fetch(&bmc, &ODataId::from(SYSTEM)).await?;
    let dell = DellComputerSystem::from_computer_system(system)?;
    let err = dell
        .software_installation_service()
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(err.kind(), ErrorKind::NotSupported);
    Ok(())
}
