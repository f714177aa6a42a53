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

//! Collection walking through the service root.

use rsfish::collection;
use rsfish::Resource as _;
use rsfish::ServiceRoot;
use rsfish_core::ODataId;
use rsfish_tests::service_root;
use rsfish_tests::Bmc;
use rsfish_tests::Expect;
use rsfish_tests::ODATA_ID;
use rsfish_tests::ODATA_TYPE;
use serde_json::json;
use std::error::Error as StdError;
use std::sync::Arc;
use tokio::test;

const SYSTEMS: &str = "/redfish/v1/Systems";
const SYSTEM_DATA_TYPE: &str = "#ComputerSystem.v1_20_0.ComputerSystem";

fn system(id: &str) -> serde_json::Value {
    json!({
        ODATA_ID: format!("{SYSTEMS}/{id}"),
        ODATA_TYPE: SYSTEM_DATA_TYPE,
        "Id": id,
        "Name": "System",
        "PowerState": "On"
    })
}

#[test]
async fn links_members_are_enumerated_in_order() -> Result<(), Box<dyn StdError>> {
    let bmc = Bmc::default();
    bmc.expect(Expect::get(
        SYSTEMS,
        json!({
            ODATA_ID: SYSTEMS,
            "Name": "Computer System Collection",
            "Links": {
                "Members@odata.count": 2,
                "Members": [
                    { ODATA_ID: "/redfish/v1/Systems/System-1" },
                    { ODATA_ID: "/redfish/v1/Systems/System-2" }
                ]
            }
        }),
    ));
    let ids = collection::members(&bmc, &ODataId::from(SYSTEMS)).await?;
    assert_eq!(
        ids,
        vec![
            ODataId::from("/redfish/v1/Systems/System-1"),
            ODataId::from("/redfish/v1/Systems/System-2"),
        ]
    );
    assert_eq!(bmc.pending(), 0);
    Ok(())
}

#[test]
async fn root_level_members_are_enumerated() -> Result<(), Box<dyn StdError>> {
    let bmc = Bmc::default();
    bmc.expect(Expect::get(
        "/redfish/v1/StorageServices",
        json!({
            "Members@odata.count": 1,
            "Members": [{ ODATA_ID: "/x/1" }]
        }),
    ));
    let ids = collection::members(&bmc, &ODataId::from("/redfish/v1/StorageServices")).await?;
    assert_eq!(ids, vec![ODataId::from("/x/1")]);
    Ok(())
}

#[test]
async fn systems_are_fetched_from_service_root() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    bmc.expect(Expect::get(
        "/redfish/v1/",
        service_root(json!({ "Systems": { ODATA_ID: SYSTEMS } })),
    ));
    let root = ServiceRoot::new(bmc.clone()).await?;

    bmc.expect(Expect::get(
        SYSTEMS,
        json!({
            ODATA_ID: SYSTEMS,
            "Members@odata.count": 2,
            "Members": [
                { ODATA_ID: format!("{SYSTEMS}/1") },
                { ODATA_ID: format!("{SYSTEMS}/2") }
            ]
        }),
    ));
    bmc.expect(Expect::get(format!("{SYSTEMS}/1"), system("1")));
    bmc.expect(Expect::get(format!("{SYSTEMS}/2"), system("2")));

    let systems = root.systems().await?;
    let ids: Vec<_> = systems.iter().map(|s| s.odata_id().to_string()).collect();
    assert_eq!(ids, vec![format!("{SYSTEMS}/1"), format!("{SYSTEMS}/2")]);
    assert_eq!(systems[0].odata_type(), Some(SYSTEM_DATA_TYPE));
    assert_eq!(bmc.pending(), 0);
    Ok(())
}

#[test]
async fn missing_slot_lists_nothing() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    bmc.expect(Expect::get("/redfish/v1/", service_root(json!({}))));
    let root = ServiceRoot::new(bmc.clone()).await?;

    assert!(root.chassis().await?.is_empty());
    assert!(root.storage_services().await?.is_empty());
    Ok(())
}
