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

//! Dell flavour of `#EventService.SubmitTestEvent`.

use crate::action;
use crate::event_service::EventDestinationProtocol;
use crate::event_service::EventService;
use crate::event_service::DEFAULT_SUBMIT_TEST_EVENT_TARGET;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::ODataId;
use serde::Serialize;
use tracing::debug;

/// Test event as accepted by iDRAC.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DellTestEventBody {
    /// Receiver of the event.
    pub destination: String,
    /// Single event type, e.g. `Alert`.
    pub event_types: String,
    pub context: String,
    pub protocol: EventDestinationProtocol,
    /// Identifier of the message in the iDRAC registry, e.g. `AMP0300`.
    pub message_id: String,
}

/// Event service with the Dell submit target resolved.
pub struct DellEventService<B: Bmc> {
    service: EventService<B>,
    submit_test_event: ODataId,
}

impl<B: Bmc> DellEventService<B> {
    /// Resolve the submit target from `service`. No request is sent.
    #[must_use]
    pub fn from_event_service(service: EventService<B>) -> Self {
        let submit_test_event = service
            .submit_test_event_target()
            .cloned()
            .unwrap_or_else(|| ODataId::from(DEFAULT_SUBMIT_TEST_EVENT_TARGET));
        debug!(target = %submit_test_event, "Dell event service overlay");
        Self {
            service,
            submit_test_event,
        }
    }

    /// Underlying standard event service.
    #[must_use]
    pub const fn service(&self) -> &EventService<B> {
        &self.service
    }

    /// Target the test events are posted to.
    #[must_use]
    pub const fn submit_test_event_target(&self) -> &ODataId {
        &self.submit_test_event
    }

    /// Ask iDRAC to emit a test event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionStatus`] or [`Error::Service`] unless the
    /// reply is `201`, `202` or `204`, or any request error.
    pub async fn submit_test_event(&self, body: &DellTestEventBody) -> Result<(), Error<B>> {
        debug!(target = %self.submit_test_event, message_id = %body.message_id, "submitting Dell test event");
        action::submit(self.base().bmc().as_ref(), &self.submit_test_event, body).await?;
        Ok(())
    }
}

impl<B: Bmc> Resource<B> for DellEventService<B> {
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

    fn body() -> DellTestEventBody {
        DellTestEventBody {
            destination: "https://collector.example.com/events".into(),
            event_types: "Alert".into(),
            context: "root".into(),
            protocol: EventDestinationProtocol::Redfish,
            message_id: "AMP0300".into(),
        }
    }

    const REQUEST: &str = r#"{"Destination": "https://collector.example.com/events",
        "EventTypes": "Alert", "Context": "root", "Protocol": "Redfish",
        "MessageId": "AMP0300"}"#;

    async fn service(bmc: &Arc<TestBmc>) -> DellEventService<TestBmc> {
        bmc.expect(Expect::get(
            "/redfish/v1/EventService",
            r#"{"@odata.id": "/redfish/v1/EventService", "Id": "EventService",
                "Name": "Event Service"}"#,
        ));
        let service: EventService<TestBmc> =
            crate::resource::fetch(bmc, &ODataId::from("/redfish/v1/EventService"))
                .await
                .unwrap();
        DellEventService::from_event_service(service)
    }

    #[tokio::test]
    async fn created_is_success() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        assert_eq!(
            service.submit_test_event_target(),
            &ODataId::from(DEFAULT_SUBMIT_TEST_EVENT_TARGET)
        );
        bmc.expect(Expect::post(DEFAULT_SUBMIT_TEST_EVENT_TARGET, REQUEST, 201, ""));
        service.submit_test_event(&body()).await.unwrap();
    }

    #[tokio::test]
    async fn ok_is_action_status_error() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::post(DEFAULT_SUBMIT_TEST_EVENT_TARGET, REQUEST, 200, "{}"));
        let err = service.submit_test_event(&body()).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ActionStatus);
    }
}
