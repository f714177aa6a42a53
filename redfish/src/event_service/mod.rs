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

//! Event service and event subscriptions.
//!
//! Subscriptions are read-only here: the client lists them but neither
//! creates subscriptions nor listens for events.

use crate::action;
use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::EdmDateTimeOffset;
use rsfish_core::Link;
use rsfish_core::ODataId;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// Submit target used when the service does not advertise one.
pub const DEFAULT_SUBMIT_TEST_EVENT_TARGET: &str =
    "/redfish/v1/EventService/Actions/EventService.SubmitTestEvent";

/// Protocol used to deliver events to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventDestinationProtocol {
    /// Redfish event over HTTP(S).
    Redfish,
    /// Kafka.
    Kafka,
    /// SNMPv1.
    SNMPv1,
    /// SNMPv2c.
    SNMPv2c,
    /// SNMPv3.
    SNMPv3,
    /// E-mail.
    SMTP,
    /// Syslog over TLS.
    SyslogTLS,
    /// Syslog over TCP.
    SyslogTCP,
    /// Syslog over UDP.
    SyslogUDP,
    /// Syslog over RELP.
    SyslogRELP,
    /// Vendor protocol.
    OEM,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Type of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A condition requires attention.
    Alert,
    /// A resource has been added.
    ResourceAdded,
    /// A resource has been removed.
    ResourceRemoved,
    /// A resource has been updated.
    ResourceUpdated,
    /// The status of a resource has changed.
    StatusChange,
    /// A metric report has been generated.
    MetricReport,
    /// Other event.
    Other,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Data of an event subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDestinationData {
    /// URI events are sent to.
    pub destination: Option<String>,
    /// Delivery protocol.
    pub protocol: Option<EventDestinationProtocol>,
    /// Client-supplied context echoed in events.
    pub context: Option<String>,
    /// Subscribed event types.
    #[serde(default)]
    pub event_types: Vec<EventType>,
    /// Subscribed registry prefixes.
    #[serde(default)]
    pub registry_prefixes: Vec<String>,
    /// Subscribed resource types.
    #[serde(default)]
    pub resource_types: Vec<String>,
    /// `RetryForever`, `SuspendRetries` or `TerminateAfterRetries`.
    pub delivery_retry_policy: Option<String>,
    /// Status of the subscription.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct EventDestinationSchema {
    #[serde(flatten)]
    data: EventDestinationData,
}

/// Event subscription.
pub struct EventDestination<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded subscription data.
    pub data: EventDestinationData,
}

impl<B: Bmc> FromBase<B> for EventDestination<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let EventDestinationSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for EventDestination<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Parameters of `#EventService.SubmitTestEvent`. Unset fields are not
/// sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubmitTestEventBody {
    /// Identifier of the message in its registry.
    #[serde(rename = "MessageId")]
    pub message_id: String,
    /// Message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Arguments of the message.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<String>,
    /// Type of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    /// Event identifier.
    #[serde(rename = "EventId", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Event group identifier.
    #[serde(rename = "EventGroupId", skip_serializing_if = "Option::is_none")]
    pub event_group_id: Option<String>,
    /// Time of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_timestamp: Option<EdmDateTimeOffset>,
    /// Resource that originated the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_of_condition: Option<ODataId>,
    /// Severity of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl SubmitTestEventBody {
    /// Test event with `message_id` and no other parameters.
    #[must_use]
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            ..Self::default()
        }
    }
}

/// Data of the event service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Retries before a subscription is suspended or terminated.
    pub delivery_retry_attempts: Option<u32>,
    /// Seconds between delivery retries.
    pub delivery_retry_interval_seconds: Option<u32>,
    /// Event types that can be subscribed to.
    #[serde(default)]
    pub event_types_for_subscription: Vec<EventType>,
    /// Registry prefixes that can be subscribed to.
    #[serde(default)]
    pub registry_prefixes: Vec<String>,
    /// URI of the server-sent events stream.
    #[serde(rename = "ServerSentEventUri")]
    pub server_sent_event_uri: Option<String>,
    /// Status of the service.
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
struct EventServiceActions {
    #[serde(rename = "#EventService.SubmitTestEvent")]
    submit_test_event: Option<Action>,
    #[serde(rename = "#EventService.TestEventSubscription")]
    test_event_subscription: Option<Action>,
}

#[derive(Deserialize)]
struct EventServiceSchema {
    #[serde(flatten)]
    data: EventServiceData,
    #[serde(rename = "Subscriptions", default)]
    subscriptions: Link,
    #[serde(rename = "Actions", default)]
    actions: EventServiceActions,
}

/// Event service.
pub struct EventService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: EventServiceData,
    subscriptions: Link,
    actions: EventServiceActions,
}

impl<B: Bmc> EventService<B> {
    /// Existing event subscriptions.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a subscription fails.
    pub async fn subscriptions(&self) -> Result<Vec<EventDestination<B>>, Error<B>> {
        self.base.list(&self.subscriptions).await
    }

    /// Target of `#EventService.SubmitTestEvent`, if advertised.
    #[must_use]
    pub fn submit_test_event_target(&self) -> Option<&ODataId> {
        self.actions
            .submit_test_event
            .as_ref()
            .and_then(Action::target)
    }

    /// Ask the service to emit a test event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::submit`].
    pub async fn submit_test_event(&self, body: &SubmitTestEventBody) -> Result<(), Error<B>> {
        let target = action::target(
            self.actions.submit_test_event.as_ref(),
            "EventService.SubmitTestEvent",
        )?;
        debug!(%target, message_id = %body.message_id, "submitting test event");
        action::submit(self.base.bmc().as_ref(), target, body).await?;
        Ok(())
    }

    /// Send the predefined test message to all subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised, or
    /// any error of [`action::submit`].
    pub async fn test_event_subscription(&self) -> Result<(), Error<B>> {
        let target = action::target(
            self.actions.test_event_subscription.as_ref(),
            "EventService.TestEventSubscription",
        )?;
        action::submit(self.base.bmc().as_ref(), target, &serde_json::Map::new()).await?;
        Ok(())
    }
}

impl<B: Bmc> FromBase<B> for EventService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let EventServiceSchema {
            data,
            subscriptions,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            subscriptions,
            actions,
        })
    }
}

impl<B: Bmc> Resource<B> for EventService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
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

    const URI: &str = "/redfish/v1/EventService";
    const TARGET: &str = "/redfish/v1/EventService/Actions/EventService.SubmitTestEvent";

    async fn service(bmc: &Arc<TestBmc>) -> EventService<TestBmc> {
        bmc.expect(Expect::get(
            URI,
            r##"{"Id": "EventService", "Name": "Event Service", "ServiceEnabled": true,
                "DeliveryRetryAttempts": 3, "EventTypesForSubscription": ["StatusChange", "Alert"],
                "Subscriptions": {"@odata.id": "/redfish/v1/EventService/Subscriptions"},
                "Actions": {"#EventService.SubmitTestEvent": {
                    "target": "/redfish/v1/EventService/Actions/EventService.SubmitTestEvent"}}}"##,
        ));
        crate::resource::fetch(bmc, &ODataId::from(URI)).await.unwrap()
    }

    #[tokio::test]
    async fn submit_test_event_sends_message_id() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        assert_eq!(service.data.event_types_for_subscription.len(), 2);
        bmc.expect(Expect::post(
            TARGET,
            r#"{"MessageId": "Alert.1.0.Test", "EventType": "Alert"}"#,
            204,
            "",
        ));
        let body = SubmitTestEventBody {
            event_type: Some(EventType::Alert),
            ..SubmitTestEventBody::new("Alert.1.0.Test")
        };
        service.submit_test_event(&body).await.unwrap();

        let err = service.test_event_subscription().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }

    #[tokio::test]
    async fn subscriptions_are_listed() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::get(
            "/redfish/v1/EventService/Subscriptions",
            r#"{"Members": [{"@odata.id": "/redfish/v1/EventService/Subscriptions/1"}]}"#,
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/EventService/Subscriptions/1",
            r#"{"Id": "1", "Name": "EventSubscription 1",
                "Destination": "http://www.dnsname.com/Destination1",
                "Protocol": "Redfish", "Context": "WebUser3", "EventTypes": ["Alert"]}"#,
        ));
        let subscriptions = service.subscriptions().await.unwrap();
        assert_eq!(
            subscriptions[0].data.protocol,
            Some(EventDestinationProtocol::Redfish)
        );
    }
}
