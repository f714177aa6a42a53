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

//! Link model
//!
//! Every Redfish resource references other resources with objects of the
//! shape `{ "@odata.id": "/redfish/v1/Chassis/1/Thermal" }`. This module
//! turns such references into opaque URI handles:
//!
//! - [`Link`]: single reference. Decoding never fails: any JSON value that
//!   is not an object carrying `@odata.id` (or legacy `href`) becomes an
//!   empty link.
//! - [`LinkList`]: array of references. Order and length are preserved so
//!   that member counts advertised by the service still match.
//! - [`Collection`]: collection document. Members are read from
//!   `Links.Members` (Redfish) or from root-level `Members` (Swordfish).
//!
//! Links are URI handles, never object pointers, so back-references in the
//! resource graph cannot form cycles.
//!
//! References:
//! - DMTF Redfish Specification DSP0266: `https://www.dmtf.org/standards/redfish`
//! - SNIA Swordfish Specification: `https://www.snia.org/swordfish`
//!

use crate::ODataId;
use serde::de::Deserializer;
use serde::ser::SerializeMap;
use serde::ser::Serializer;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;

const ODATA_ID: &str = "@odata.id";
const HREF: &str = "href";

/// Reference to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Link(Option<ODataId>);

impl Link {
    /// Create link to the resource with `id`. Empty `id` produces
    /// empty link.
    #[must_use]
    pub fn new(id: ODataId) -> Self {
        if id.is_empty() {
            Self(None)
        } else {
            Self(Some(id))
        }
    }

    /// Empty link.
    #[must_use]
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Referenced identifier if link is set.
    #[must_use]
    pub const fn id(&self) -> Option<&ODataId> {
        self.0.as_ref()
    }

    /// True if link does not reference anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Decode link from a JSON value.
    #[must_use]
    pub fn from_value(v: &JsonValue) -> Self {
        v.as_object()
            .and_then(|obj| obj.get(ODATA_ID).or_else(|| obj.get(HREF)))
            .and_then(JsonValue::as_str)
            .map(|id| Self::new(ODataId::from(id)))
            .unwrap_or_default()
    }
}

impl From<ODataId> for Link {
    fn from(id: ODataId) -> Self {
        Self::new(id)
    }
}

impl From<&str> for Link {
    fn from(id: &str) -> Self {
        Self::new(ODataId::from(id))
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl Serialize for Link {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(ODATA_ID, id)?;
                map.end()
            }
            None => serializer.serialize_none(),
        }
    }
}

/// Array of links. Non-array JSON values decode to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkList(Vec<Link>);

impl LinkList {
    /// Create list from links.
    #[must_use]
    pub const fn new(links: Vec<Link>) -> Self {
        Self(links)
    }

    /// Number of links, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over links.
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }

    /// Iterate over identifiers of non-empty links.
    pub fn ids(&self) -> impl Iterator<Item = &ODataId> {
        self.0.iter().filter_map(Link::id)
    }

    /// Append links of another list.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Convert into vector of links.
    #[must_use]
    pub fn into_inner(self) -> Vec<Link> {
        self.0
    }
}

impl<'de> Deserialize<'de> for LinkList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(Self(
            value
                .as_array()
                .map(|items| items.iter().map(Link::from_value).collect())
                .unwrap_or_default(),
        ))
    }
}

impl Serialize for LinkList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl IntoIterator for LinkList {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Where the members of a collection were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionLayout {
    /// Members nested under `Links.Members` (Redfish convention).
    Nested,
    /// Members at the document root under `Members` (Swordfish convention).
    RootLevel,
    /// Neither `Links.Members` nor `Members` is present.
    Missing,
}

#[derive(Deserialize, Default)]
struct CollectionLinksSchema {
    #[serde(rename = "Members")]
    members: Option<LinkList>,
}

#[derive(Deserialize)]
struct CollectionSchema {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Links")]
    links: Option<CollectionLinksSchema>,
    #[serde(rename = "Members@odata.count")]
    members_count: Option<u64>,
    #[serde(rename = "@odata.count")]
    odata_count: Option<u64>,
    #[serde(rename = "Members")]
    members: Option<LinkList>,
    #[serde(rename = "Members@odata.nextLink")]
    next_link: Option<ODataId>,
}

/// Collection document reduced to its member links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Name of the collection.
    pub name: Option<String>,
    /// Member links in document order.
    pub members: LinkList,
    /// Link to the next page of members.
    pub next_link: Option<ODataId>,
    /// Layout the members were read from.
    pub layout: CollectionLayout,
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let schema = CollectionSchema::deserialize(deserializer)?;
        Ok(Self::from(schema))
    }
}

impl From<CollectionSchema> for Collection {
    fn from(schema: CollectionSchema) -> Self {
        let CollectionSchema {
            name,
            links,
            members_count,
            odata_count,
            members,
            next_link,
        } = schema;
        let nested = links.and_then(|links| links.members);
        let advertised = members_count.or(odata_count).unwrap_or(0);
        let next_link = next_link.filter(|id| !id.is_empty());
        let (members, layout) = match (nested, members) {
            (Some(nested), _) if !nested.is_empty() => (nested, CollectionLayout::Nested),
            (_, Some(root)) if advertised > 0 || !root.is_empty() => {
                (root, CollectionLayout::RootLevel)
            }
            (Some(nested), _) => (nested, CollectionLayout::Nested),
            (None, Some(root)) => (root, CollectionLayout::RootLevel),
            (None, None) => (LinkList::default(), CollectionLayout::Missing),
        };
        Self {
            name,
            members,
            next_link,
            layout,
        }
    }
}
