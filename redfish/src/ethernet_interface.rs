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

//! Ethernet interfaces of systems and managers.

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use serde::Deserialize;
use serde::Serialize;
use tagged_types::TaggedType;

/// Mac address of the ethernet interface.
///
/// The underlying type is kept open because services format addresses
/// differently (case, separators).
pub type MacAddress = TaggedType<String, MacAddressTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display, FromStr, Serialize, Deserialize)]
#[capability(inner_access, cloned)]
pub enum MacAddressTag {}

/// Link state of the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStatus {
    /// The link is available for communication.
    LinkUp,
    /// No link or connection is detected.
    NoLink,
    /// There is no link on this interface, but the interface is connected.
    LinkDown,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// IPv4 address of an interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ipv4Address {
    /// Address.
    pub address: Option<String>,
    /// Subnet mask.
    pub subnet_mask: Option<String>,
    /// `Static`, `DHCP`, `BOOTP` or `IPv4LinkLocal`.
    pub address_origin: Option<String>,
    /// Gateway.
    pub gateway: Option<String>,
}

/// IPv6 address of an interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ipv6Address {
    /// Address.
    pub address: Option<String>,
    /// Prefix length.
    pub prefix_length: Option<u8>,
    /// `Static`, `DHCPv6`, `LinkLocal` or `SLAAC`.
    pub address_origin: Option<String>,
}

/// Data of an ethernet interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EthernetInterfaceData {
    /// Whether the interface is enabled.
    pub interface_enabled: Option<bool>,
    /// Link state.
    pub link_status: Option<LinkStatus>,
    /// Current MAC address.
    #[serde(rename = "MACAddress")]
    pub mac_address: Option<MacAddress>,
    /// Factory MAC address.
    #[serde(rename = "PermanentMACAddress")]
    pub permanent_mac_address: Option<MacAddress>,
    /// Link speed.
    #[serde(rename = "SpeedMbps")]
    pub speed_mbps: Option<u32>,
    /// Whether full duplex is used.
    pub full_duplex: Option<bool>,
    /// Host name.
    pub host_name: Option<String>,
    /// Fully qualified domain name.
    #[serde(rename = "FQDN")]
    pub fqdn: Option<String>,
    /// IPv4 addresses.
    #[serde(rename = "IPv4Addresses", default)]
    pub ipv4_addresses: Vec<Ipv4Address>,
    /// IPv6 addresses.
    #[serde(rename = "IPv6Addresses", default)]
    pub ipv6_addresses: Vec<Ipv6Address>,
    /// Name servers.
    #[serde(default)]
    pub name_servers: Vec<String>,
    /// Status of the interface.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct EthernetInterfaceSchema {
    #[serde(flatten)]
    data: EthernetInterfaceData,
}

/// Ethernet interface.
pub struct EthernetInterface<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded interface data.
    pub data: EthernetInterfaceData,
}

impl<B: Bmc> FromBase<B> for EthernetInterface<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let EthernetInterfaceSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for EthernetInterface<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
