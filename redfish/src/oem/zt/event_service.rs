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

//! ZT Systems test events.
//!
//! The ZT BMC rate-limits test events and answers `400` while busy, so
//! submission is repeated on transport failures and `400` replies.

use crate::action;
use crate::bmc;
use crate::event_service::EventService;
use crate::event_service::DEFAULT_SUBMIT_TEST_EVENT_TARGET;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::Error;
use http::StatusCode;
use rsfish_core::Bmc;
use rsfish_core::ODataId;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;
use tracing::warn;

const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_RETRY_ATTEMPTS: u32 = 6;
/// Retries beyond this count are logged as a warning.
const RETRY_REPORT_THRESHOLD: u32 = 2;

#[derive(Serialize)]
struct ZtTestEventBody<'a> {
    #[serde(rename = "MessageId")]
    message_id: &'a str,
}

/// Event service of a ZT Systems BMC.
pub struct ZtEventService<B: Bmc> {
    service: EventService<B>,
    submit_test_event: ODataId,
    retry_interval: Duration,
    retry_attempts: u32,
}

impl<B: Bmc> ZtEventService<B> {
    /// Wrap `service`. No request is sent.
    #[must_use]
    pub fn from_event_service(service: EventService<B>) -> Self {
        let submit_test_event = service
            .submit_test_event_target()
            .cloned()
            .unwrap_or_else(|| ODataId::from(DEFAULT_SUBMIT_TEST_EVENT_TARGET));
        Self {
            service,
            submit_test_event,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }

    /// Set wait between attempts.
    #[must_use]
    pub const fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// Set total number of attempts. Zero is treated as one.
    #[must_use]
    pub const fn with_retry_attempts(mut self, retry_attempts: u32) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    /// Underlying standard event service.
    #[must_use]
    pub const fn service(&self) -> &EventService<B> {
        &self.service
    }

    /// Ask the BMC to emit a test event with `message_id`.
    ///
    /// # Errors
    ///
    /// Returns the last transport error or an [`Error::ActionStatus`] /
    /// [`Error::Service`] error for a reply other than `202`.
    pub async fn submit_test_event(&self, message_id: &str) -> Result<(), Error<B>> {
        let target = &self.submit_test_event;
        let body = ZtTestEventBody { message_id };
        let attempts = self.retry_attempts.max(1);
        let mut attempt = 1;
        loop {
            let last = attempt >= attempts;
            match bmc::post(self.base().bmc().as_ref(), target, &body).await {
                Ok(response) if response.status == StatusCode::ACCEPTED => {
                    if attempt - 1 > RETRY_REPORT_THRESHOLD {
                        warn!(%target, retries = attempt - 1, "test event needed retries");
                    }
                    return Ok(());
                }
                Ok(response) if response.status == StatusCode::BAD_REQUEST && !last => {
                    debug!(%target, attempt, "test event rejected, retrying");
                }
                Ok(response) => return Err(action::action_error(target, &response)),
                Err(err) if !last => {
                    debug!(%target, attempt, error = %err, "test event failed, retrying");
                }
                Err(err) => return Err(err),
            }
            sleep(self.retry_interval).await;
            attempt += 1;
        }
    }
}

impl<B: Bmc> Resource<B> for ZtEventService<B> {
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
    use std::io::ErrorKind as IoErrorKind;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    const TARGET: &str = DEFAULT_SUBMIT_TEST_EVENT_TARGET;
    const BODY: &str = r#"{"MessageId": "TestMessage"}"#;

    async fn service(bmc: &Arc<TestBmc>) -> ZtEventService<TestBmc> {
        bmc.expect(Expect::get(
            "/redfish/v1/EventService",
            r##"{"@odata.id": "/redfish/v1/EventService", "Id": "EventService",
                "Name": "Event Service",
                "Actions": {"#EventService.SubmitTestEvent": {
                    "target": "/redfish/v1/EventService/Actions/EventService.SubmitTestEvent"}}}"##,
        ));
        let service: EventService<TestBmc> =
            crate::resource::fetch(bmc, &ODataId::from("/redfish/v1/EventService"))
                .await
                .unwrap();
        ZtEventService::from_event_service(service)
    }

    #[tokio::test(start_paused = true)]
    async fn retries_busy_and_transport_failures() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::post(TARGET, BODY, 400, "{}"));
        bmc.expect(Expect::post_err(
            TARGET,
            BODY,
            IoError::new(IoErrorKind::ConnectionReset, "reset"),
        ));
        bmc.expect(Expect::post(TARGET, BODY, 202, ""));
        service.submit_test_event("TestMessage").await.unwrap();
        assert_eq!(bmc.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_attempts() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc)
            .await
            .with_retry_attempts(2)
            .with_retry_interval(Duration::from_millis(100));
        bmc.expect(Expect::post(TARGET, BODY, 400, "{}"));
        bmc.expect(Expect::post(TARGET, BODY, 400, "{}"));
        let err = service.submit_test_event("TestMessage").await.err().unwrap();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn only_accepted_is_success() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::post(TARGET, BODY, 204, ""));
        let err = service.submit_test_event("TestMessage").await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ActionStatus);
    }

    #[tokio::test]
    async fn unadvertised_target_uses_default() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::get(
            "/redfish/v1/EventService",
            r#"{"@odata.id": "/redfish/v1/EventService", "Id": "EventService",
                "Name": "Event Service"}"#,
        ));
        let service: EventService<TestBmc> =
            crate::resource::fetch(&bmc, &ODataId::from("/redfish/v1/EventService"))
                .await
                .unwrap();
        let service = ZtEventService::from_event_service(service);
        bmc.expect(Expect::post(DEFAULT_SUBMIT_TEST_EVENT_TARGET, BODY, 202, ""));
        service.submit_test_event("TestMessage").await.unwrap();
        assert_eq!(bmc.pending(), 0);
    }
}
