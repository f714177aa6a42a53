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

//! Typed Redfish and Swordfish client.
//!
//! Resources are fetched through a [`rsfish_core::Bmc`] transport and
//! decoded into typed views. Every view keeps the raw payload it was
//! built from, exposes its link slots as accessors that fetch on demand
//! and advertises its actions as methods.
//!
//! - [`ServiceRoot`] anchors traversal;
//! - [`collection`] walks Redfish and Swordfish collections;
//! - [`action`] dispatches actions and returns tasks;
//! - [`retry`] wraps operations in health probes and retries;
//! - `oem` (feature `oem`) adds vendor-specific views.

mod bmc;

pub mod account_service;
pub mod action;
pub mod certificate_service;
pub mod chassis;
pub mod collection;
pub mod composition_service;
pub mod computer_system;
pub mod error;
pub mod ethernet_interface;
pub mod event_service;
pub mod fabric;
pub mod job_service;
pub mod log_service;
pub mod manager;
pub mod protocol_features;
pub mod registries;
pub mod resource;
pub mod retry;
pub mod service_root;
pub mod session_service;
pub mod storage;
pub mod swordfish;
pub mod task_service;
pub mod telemetry_service;
pub mod update_service;

/// Vendor extensions.
#[cfg(feature = "oem")]
pub mod oem;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use resource::fetch;
#[doc(inline)]
pub use resource::FromBase;
#[doc(inline)]
pub use resource::Resource;
#[doc(inline)]
pub use resource::ResourceBase;
#[doc(inline)]
pub use retry::HealthProbe;
#[doc(inline)]
pub use retry::Monitor;
#[doc(inline)]
pub use retry::RetryConfig;
#[doc(inline)]
pub use service_root::ServiceRoot;
#[doc(inline)]
pub use task_service::Task;

/// Re-export of the HTTP transport.
#[cfg(feature = "bmc-http")]
pub use rsfish_bmc_http as bmc_http;
