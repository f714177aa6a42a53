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

//! Core types shared by every `rsfish` crate.
//!
//! This crate knows nothing about concrete Redfish schemas. It provides:
//! - OData identifiers ([`ODataId`], [`ODataETag`], [`ODataType`]);
//! - the link model ([`Link`], [`LinkList`], [`Collection`]) that turns
//!   `@odata.id` references into opaque URI handles;
//! - the transport abstraction ([`Bmc`]) and the raw [`Response`] it
//!   returns;
//! - action descriptors ([`Action`]) as advertised under `Actions`;
//! - the Redfish error payload ([`RedfishError`]) and the error-kind
//!   taxonomy ([`ErrorKind`]) used to classify failures.

pub mod action;
pub mod bmc;
pub mod edm_date_time_offset;
pub mod error;
pub mod link;
pub mod odata;

#[doc(inline)]
pub use action::Action;
#[doc(inline)]
pub use bmc::Bmc;
#[doc(inline)]
pub use bmc::FormPart;
#[doc(inline)]
pub use bmc::Response;
#[doc(inline)]
pub use edm_date_time_offset::EdmDateTimeOffset;
#[doc(inline)]
pub use error::ClassifyError;
#[doc(inline)]
pub use error::ErrorKind;
#[doc(inline)]
pub use error::ExtendedInfo;
#[doc(inline)]
pub use error::RedfishError;
#[doc(inline)]
pub use link::Collection;
#[doc(inline)]
pub use link::CollectionLayout;
#[doc(inline)]
pub use link::Link;
#[doc(inline)]
pub use link::LinkList;
#[doc(inline)]
pub use odata::ODataETag;
#[doc(inline)]
pub use odata::ODataId;
#[doc(inline)]
pub use odata::ODataType;

/// Re-export of the `http` types used in [`Response`].
pub use http;
