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

//! Test event submission.

use rsfish::event_service::EventDestinationProtocol;
use rsfish::event_service::SubmitTestEventBody;
use rsfish::oem::dell::DellEventService;
use rsfish::oem::dell::DellTestEventBody;
use rsfish::ServiceRoot;
use rsfish_core::ErrorKind;
use rsfish_tests::service_root;
use rsfish_tests::Bmc;
use rsfish_tests::Expect;
use rsfish_tests::ODATA_ID;
use serde_json::json;
use std::error::Error as StdError;
use std::sync::Arc;
use tokio::test;

const EVENT_SERVICE: &str = "/redfish/v1/EventService";
const SUBMIT: &str = "/redfish/v1/EventService/Actions/EventService.SubmitTestEvent";

async fn dell_event_service(bmc: &Arc<Bmc>) -> Result<DellEventService<Bmc>, Box<dyn StdError>> {
    bmc.expect(Expect::get(
        "/redfish/v1/",
        service_root(json!({ "EventService": { ODATA_ID: EVENT_SERVICE } })),
    ));
    bmc.expect(Expect::get(
        EVENT_SERVICE,
        json!({
            ODATA_ID: EVENT_SERVICE,
            "Id": "EventService",
            "Name": "Event Service",
            "ServiceEnabled": true,
            "Actions": { "#EventService.SubmitTestEvent": { "target": SUBMIT } }
        }),
    ));
    let root = ServiceRoot::new(bmc.clone()).await?;
    let service = root.event_service().await?;
    Ok(DellEventService::from_event_service(service))
}

fn alert() -> DellTestEventBody {
    DellTestEventBody {
        destination: "https://collector.example.com/events".into(),
        event_types: "Alert".into(),
        context: "root".into(),
        protocol: EventDestinationProtocol::Redfish,
        message_id: "AMP0300".into(),
    }
}

fn alert_json() -> serde_json::Value {
    json!({
        "Destination": "https://collector.example.com/events",
        "EventTypes": "Alert",
        "Context": "root",
        "Protocol": "Redfish",
        "MessageId": "AMP0300"
    })
}

#[test]
async fn created_reply_is_success() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    let service = dell_event_service(&bmc).await?;
    bmc.expect(Expect::post(SUBMIT, alert_json(), 201, ""));
    service.submit_test_event(&alert()).await?;
    assert_eq!(bmc.pending(), 0);
    Ok(())
}

#[test]
async fn ok_reply_is_action_status_error() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    let service = dell_event_service(&bmc).await?;
    bmc.expect(Expect::post(SUBMIT, alert_json(), 200, "{}"));
    let err = service
        .submit_test_event(&alert())
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(err.kind(), ErrorKind::ActionStatus);
    Ok(())
}

#[test]
async fn standard_submit_without_action_is_not_supported() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    bmc.expect(Expect::get(
        "/redfish/v1/",
        service_root(json!({ "EventService": { ODATA_ID: EVENT_SERVICE } })),
    ));
    bmc.expect(Expect::get(
        EVENT_SERVICE,
        json!({ ODATA_ID: EVENT_SERVICE, "Id": "EventService", "Name": "Event Service" }),
    ));
    let service = ServiceRoot::new(bmc.clone()).await?.event_service().await?;
    let err = service
        .submit_test_event(&SubmitTestEventBody::new("TestMessage"))
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(err.kind(), ErrorKind::NotSupported);
    assert_eq!(bmc.pending(), 0);
    Ok(())
}
