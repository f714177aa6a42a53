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

//! Redfish resource

use crate::bmc;
use crate::collection;
use crate::Error;
use http::Method;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::ODataETag;
use rsfish_core::ODataId;
use rsfish_core::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::future::Future;
use std::sync::Arc;
use tagged_types::TaggedType;
use tracing::debug;

/// Redfish resource identifier.
pub type ResourceId = TaggedType<String, ResourceIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display, FromStr, Serialize, Deserialize)]
#[capability(inner_access, cloned)]
pub enum ResourceIdTag {}

/// Redfish resource name.
pub type ResourceName = TaggedType<String, ResourceNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display, FromStr, Serialize, Deserialize)]
#[capability(inner_access, cloned)]
pub enum ResourceNameTag {}

/// Redfish resource description.
pub type ResourceDescription = TaggedType<String, ResourceDescriptionTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone)]
#[transparent(Debug, Display, FromStr, Serialize, Deserialize)]
#[capability(inner_access, cloned)]
pub enum ResourceDescriptionTag {}

/// Known state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// This function or resource is enabled.
    Enabled,
    /// This function or resource is disabled.
    Disabled,
    /// This function or resource is enabled but awaits an external action to activate it.
    StandbyOffline,
    /// This function or resource is part of a redundancy set and awaits a failover.
    StandbySpare,
    /// This function or resource is undergoing testing.
    InTest,
    /// This function or resource is starting.
    Starting,
    /// This function or resource is either not present or detected.
    Absent,
    /// This function or resource is present but cannot be used.
    UnavailableOffline,
    /// The element does not process any commands but queues new requests.
    Deferring,
    /// The element is enabled but only processes a restricted set of commands.
    Quiesced,
    /// The element is updating.
    Updating,
    /// The element quality is within the acceptable range of operation.
    Qualified,
    /// The element is enabled but an undesired state exists.
    Degraded,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Health of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Health {
    /// Normal.
    #[serde(rename = "OK")]
    Ok,
    /// A condition requires attention.
    Warning,
    /// A critical condition requires immediate attention.
    Critical,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// The status and health of a resource and its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    /// The state of the resource.
    pub state: Option<State>,
    /// The health state of this resource in the absence of its dependent resources.
    pub health: Option<Health>,
    /// The overall health state from the view of this resource.
    pub health_rollup: Option<Health>,
}

/// Power state of a system, chassis or manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerState {
    /// The resource is powered on.
    On,
    /// The resource is powered off.
    Off,
    /// A temporary state between off and on.
    PoweringOn,
    /// A temporary state between on and off.
    PoweringOff,
    /// The resource is paused.
    Paused,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// `ResetType` parameter of the standard reset actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResetType {
    /// Turn on the unit.
    On,
    /// Turn off the unit immediately (non-graceful shutdown).
    ForceOff,
    /// Shut down gracefully and power off.
    GracefulShutdown,
    /// Shut down gracefully and restart the system.
    GracefulRestart,
    /// Shut down immediately and non-gracefully and restart the system.
    ForceRestart,
    /// Generate a diagnostic interrupt.
    Nmi,
    /// Turn on the unit immediately.
    ForceOn,
    /// Simulate the pressing of the physical power button.
    PushPowerButton,
    /// Power cycle the unit.
    PowerCycle,
    /// Write state to disk and power off.
    Suspend,
    /// Pause execution.
    Pause,
    /// Resume execution.
    Resume,
}

impl ResetType {
    /// Wire name of the reset type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::ForceOff => "ForceOff",
            Self::GracefulShutdown => "GracefulShutdown",
            Self::GracefulRestart => "GracefulRestart",
            Self::ForceRestart => "ForceRestart",
            Self::Nmi => "Nmi",
            Self::ForceOn => "ForceOn",
            Self::PushPowerButton => "PushPowerButton",
            Self::PowerCycle => "PowerCycle",
            Self::Suspend => "Suspend",
            Self::Pause => "Pause",
            Self::Resume => "Resume",
        }
    }
}

/// Body of the standard reset actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ResetBody {
    #[serde(rename = "ResetType")]
    pub reset_type: ResetType,
}

/// Identity shared by every resource together with the transport it was
/// fetched through.
pub struct Entity<B: Bmc> {
    /// Value of `Id`.
    pub id: ResourceId,
    /// Value of `Name`.
    pub name: ResourceName,
    /// Value of `Description`.
    pub description: Option<ResourceDescription>,
    bmc: Arc<B>,
}

impl<B: Bmc> Entity<B> {
    /// Transport used to fetch this entity and its children.
    #[must_use]
    pub const fn bmc(&self) -> &Arc<B> {
        &self.bmc
    }
}

impl<B: Bmc> Clone for Entity<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            bmc: self.bmc.clone(),
        }
    }
}

/// OData annotations of a resource document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ODataEnvelope {
    /// `@odata.id`, or the requested URI when the document has none.
    pub id: ODataId,
    /// `@odata.type`.
    pub odata_type: Option<String>,
    /// `@odata.context`.
    pub context: Option<String>,
    /// `@odata.etag`, or the `ETag` header of the reply.
    pub etag: Option<ODataETag>,
}

#[derive(Deserialize)]
struct EnvelopeSchema {
    #[serde(rename = "@odata.id")]
    odata_id: Option<ODataId>,
    #[serde(rename = "@odata.type")]
    odata_type: Option<String>,
    #[serde(rename = "@odata.context")]
    context: Option<String>,
    #[serde(rename = "@odata.etag")]
    etag: Option<ODataETag>,
    #[serde(rename = "Id")]
    id: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct OemSchema {
    #[serde(rename = "Oem")]
    oem: Option<JsonValue>,
}

/// Fetched resource document: entity, OData envelope and the raw bytes of
/// the reply.
///
/// The raw payload is shared by clones and by OEM overlays built from
/// this resource, so overlays see the same snapshot without another
/// request. Memory cost is the size of the document.
pub struct ResourceBase<B: Bmc> {
    entity: Entity<B>,
    envelope: ODataEnvelope,
    raw: Arc<[u8]>,
}

impl<B: Bmc> Clone for ResourceBase<B> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            envelope: self.envelope.clone(),
            raw: self.raw.clone(),
        }
    }
}

impl<B: Bmc> ResourceBase<B> {
    /// Fetch document at `uri`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the service replies with a
    /// non-success status or the body is not a JSON object.
    pub async fn fetch(bmc: &Arc<B>, uri: &ODataId) -> Result<Self, Error<B>> {
        let response = bmc::get(bmc.as_ref(), uri).await?;
        Self::from_response(bmc.clone(), uri, response)
    }

    /// Build resource from a successful reply to `GET uri`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the body is not a JSON object and
    /// [`Error::Decode`] if OData annotations have unexpected types.
    pub fn from_response(bmc: Arc<B>, uri: &ODataId, response: Response) -> Result<Self, Error<B>> {
        let protocol = |reason: String| Error::Protocol {
            uri: uri.clone(),
            method: Method::GET,
            reason,
        };
        let value: JsonValue = serde_json::from_slice(&response.body)
            .map_err(|err| protocol(format!("response is not JSON: {err}")))?;
        if !value.is_object() {
            return Err(protocol("response is not a JSON object".into()));
        }
        let schema: EnvelopeSchema =
            serde_path_to_error::deserialize(&value).map_err(|source| Error::Decode {
                uri: uri.clone(),
                source,
            })?;
        let envelope = ODataEnvelope {
            id: schema
                .odata_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uri.clone()),
            odata_type: schema.odata_type,
            context: schema.context,
            etag: schema.etag.or_else(|| response.etag()),
        };
        let entity = Entity {
            id: ResourceId::new(schema.id.unwrap_or_default()),
            name: ResourceName::new(schema.name.unwrap_or_default()),
            description: schema.description.map(ResourceDescription::new),
            bmc,
        };
        Ok(Self {
            entity,
            envelope,
            raw: Arc::from(response.body),
        })
    }

    /// Entity part of the resource.
    #[must_use]
    pub const fn entity(&self) -> &Entity<B> {
        &self.entity
    }

    /// OData annotations.
    #[must_use]
    pub const fn envelope(&self) -> &ODataEnvelope {
        &self.envelope
    }

    /// Transport of the resource.
    #[must_use]
    pub const fn bmc(&self) -> &Arc<B> {
        &self.entity.bmc
    }

    /// Raw payload as received.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Decode the retained payload with another schema. No request is
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error<B>> {
        bmc::decode(&self.envelope.id, &self.raw)
    }

    /// Fetch the resource referenced by a link slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] naming `what` if the slot is empty;
    /// otherwise any error of [`fetch`].
    pub async fn follow<T: FromBase<B>>(
        &self,
        link: &Link,
        what: &'static str,
    ) -> Result<T, Error<B>> {
        let uri = link.id().ok_or(Error::NotSupported(what))?;
        fetch(self.bmc(), uri).await
    }

    /// Fetch all members of the collection referenced by a link slot.
    /// An empty slot yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns any error of [`collection::list`].
    pub async fn list<T: FromBase<B>>(&self, link: &Link) -> Result<Vec<T>, Error<B>> {
        match link.id() {
            Some(uri) => collection::list(self.bmc(), uri).await,
            None => Ok(Vec::new()),
        }
    }

    /// `PATCH` this resource with `body` and fetch the updated state.
    /// The entity tag is sent as `If-Match` when known.
    ///
    /// # Errors
    ///
    /// Returns error if the update is rejected or the refetch fails.
    pub async fn update<V, T>(&self, body: &V) -> Result<T, Error<B>>
    where
        V: Serialize + Send + Sync,
        T: FromBase<B>,
    {
        let uri = &self.envelope.id;
        debug!(%uri, etag = ?self.envelope.etag, "updating resource");
        bmc::patch(self.bmc().as_ref(), uri, self.envelope.etag.as_ref(), body).await?;
        fetch(self.bmc(), uri).await
    }

    /// `POST` `body` to the collection referenced by a link slot and
    /// return the created member. The member is fetched from `Location`
    /// when the reply carries one, otherwise decoded from the reply body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] naming `what` if the slot is empty,
    /// or any error of the request or decode.
    pub async fn create<V, T>(&self, link: &Link, what: &'static str, body: &V) -> Result<T, Error<B>>
    where
        V: Serialize + Send + Sync,
        T: FromBase<B>,
    {
        let uri = link.id().ok_or(Error::NotSupported(what))?;
        debug!(%uri, "creating collection member");
        let response = bmc::create(self.bmc().as_ref(), uri, body).await?;
        match response.location() {
            Some(member) => fetch(self.bmc(), &member).await,
            None => T::from_base(Self::from_response(self.bmc().clone(), uri, response)?),
        }
    }

    /// `DELETE` this resource.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request.
    pub async fn delete(&self) -> Result<(), Error<B>> {
        bmc::delete(self.bmc().as_ref(), &self.envelope.id)
            .await
            .map(|_| ())
    }
}

/// Typed view built from a [`ResourceBase`].
pub trait FromBase<B: Bmc>: Sized {
    /// Decode typed fields and link slots from the retained payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the payload does not match the type.
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>>;
}

impl<B: Bmc> FromBase<B> for ResourceBase<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        Ok(base)
    }
}

/// Fetch `uri` and decode it as `T`.
///
/// # Errors
///
/// Returns error if the request fails or the document does not decode as
/// `T`.
pub async fn fetch<B: Bmc, T: FromBase<B>>(bmc: &Arc<B>, uri: &ODataId) -> Result<T, Error<B>> {
    T::from_base(ResourceBase::fetch(bmc, uri).await?)
}

/// Represents Redfish Resource base type.
pub trait Resource<B: Bmc> {
    /// Required function. Must be implemented for Redfish resources.
    fn base(&self) -> &ResourceBase<B>;

    /// `@odata.id` of the resource.
    fn odata_id(&self) -> &ODataId {
        &self.base().envelope.id
    }

    /// Identifier of the resource.
    fn id(&self) -> &ResourceId {
        &self.base().entity.id
    }

    /// Name of the resource.
    fn name(&self) -> &ResourceName {
        &self.base().entity.name
    }

    /// Description of the resource.
    fn description(&self) -> Option<&ResourceDescription> {
        self.base().entity.description.as_ref()
    }

    /// Entity tag of the fetched state.
    fn etag(&self) -> Option<&ODataETag> {
        self.base().envelope.etag.as_ref()
    }

    /// `@odata.type` of the resource.
    fn odata_type(&self) -> Option<&str> {
        self.base().envelope.odata_type.as_deref()
    }

    /// Raw payload as received.
    fn raw(&self) -> &[u8] {
        self.base().raw()
    }

    /// Vendor extension block (`Oem`) of the payload.
    fn oem(&self) -> Option<JsonValue> {
        serde_json::from_slice::<OemSchema>(self.base().raw())
            .ok()
            .and_then(|schema| schema.oem)
    }

    /// Fetch the current state of the resource.
    fn refresh(&self) -> impl Future<Output = Result<Self, Error<B>>> + Send
    where
        Self: Sized + FromBase<B>,
    {
        let bmc = Arc::clone(self.base().bmc());
        let uri = self.odata_id().clone();
        async move { fetch(&bmc, &uri).await }
    }
}

impl<B: Bmc> Resource<B> for ResourceBase<B> {
    fn base(&self) -> &ResourceBase<B> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::ETAG;
    use http::HeaderValue;
    use http::StatusCode;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use std::io::Error as IoError;

    type TestBmc = MockBmc<IoError>;

    fn response(body: &str) -> Response {
        Response::new(StatusCode::OK, body.as_bytes().to_vec())
    }

    #[test]
    fn envelope_falls_back_to_request() {
        let mut reply = response(r#"{"Id": "1", "Name": "System"}"#);
        reply
            .headers
            .insert(ETAG, HeaderValue::from_static("W/\"abc\""));
        let uri = ODataId::from("/redfish/v1/Systems/1");
        let base =
            ResourceBase::from_response(Arc::new(TestBmc::default()), &uri, reply).unwrap();
        assert_eq!(base.odata_id(), &uri);
        assert_eq!(base.etag().map(ODataETag::as_str), Some("W/\"abc\""));
        assert_eq!(base.id().inner(), "1");
    }

    #[test]
    fn non_json_is_protocol_error() {
        let uri = ODataId::from("/redfish/v1/");
        let err = ResourceBase::from_response(
            Arc::new(TestBmc::default()),
            &uri,
            response("<html>login</html>"),
        )
        .err()
        .unwrap();
        assert_eq!(err.kind(), rsfish_core::ErrorKind::Protocol);
    }

    #[test]
    fn status_accepts_unknown_values() {
        let status: Status =
            serde_json::from_str(r#"{"State": "Hibernating", "Health": "OK"}"#).unwrap();
        assert_eq!(status.state, Some(State::Unknown));
        assert_eq!(status.health, Some(Health::Ok));
        assert_eq!(status.health_rollup, None);
    }

    #[tokio::test]
    async fn empty_slot_is_not_supported_without_io() {
        let bmc = Arc::new(TestBmc::default());
        let base = ResourceBase::from_response(
            bmc.clone(),
            &ODataId::from("/redfish/v1/Chassis/1"),
            response(r#"{"@odata.id": "/redfish/v1/Chassis/1", "Id": "1", "Name": "C"}"#),
        )
        .unwrap();
        let err = base
            .follow::<ResourceBase<TestBmc>>(&Link::empty(), "Thermal")
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), rsfish_core::ErrorKind::NotSupported);
        assert!(base.list::<ResourceBase<TestBmc>>(&Link::empty()).await.unwrap().is_empty());
        assert_eq!(bmc.pending(), 0);
    }

    #[tokio::test]
    async fn update_sends_etag_and_refetches() {
        let bmc = Arc::new(TestBmc::default());
        let uri = ODataId::from("/redfish/v1/AccountService/Accounts/3");
        let base = ResourceBase::from_response(
            bmc.clone(),
            &uri,
            response(r#"{"@odata.etag": "\"7\"", "Id": "3", "Name": "User"}"#),
        )
        .unwrap();
        bmc.expect(Expect::patch_with_etag(
            &uri,
            "\"7\"",
            r#"{"Enabled": false}"#,
            204,
            "",
        ));
        bmc.expect(Expect::get(
            &uri,
            r#"{"@odata.etag": "\"8\"", "Id": "3", "Name": "User"}"#,
        ));
        let updated: ResourceBase<TestBmc> = base
            .update(&serde_json::json!({"Enabled": false}))
            .await
            .unwrap();
        assert_eq!(updated.etag().map(ODataETag::as_str), Some("\"8\""));
    }
}
