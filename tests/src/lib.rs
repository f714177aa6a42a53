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

//! Shared fixtures of the integration tests.

/// Errors used in tests.
pub mod error;
/// Payload builders.
pub mod json_merge;

#[doc(inline)]
pub use error::TestError;
#[doc(inline)]
pub use json_merge::json_merge;

/// Used in tests for `@odata.id` fields.
pub const ODATA_ID: &str = "@odata.id";
/// Used in tests for `@odata.type` fields.
pub const ODATA_TYPE: &str = "@odata.type";

use rsfish::Error as RedfishError;
use rsfish::HealthProbe;
use rsfish_bmc_mock::Bmc as MockBmc;
use rsfish_bmc_mock::Expect as MockExpect;
use serde_json::json;
use serde_json::Value;
use std::future::Future;

pub type Bmc = MockBmc<TestError>;
pub type Expect = MockExpect<TestError>;

/// Service root document with `extra` merged on top.
pub fn service_root(extra: Value) -> Value {
    json_merge(
        json!({
            ODATA_ID: "/redfish/v1/",
            ODATA_TYPE: "#ServiceRoot.v1_15_0.ServiceRoot",
            "Id": "RootService",
            "Name": "Root Service",
            "RedfishVersion": "1.15.0"
        }),
        extra,
    )
}

/// Health probe that never fails and never resets.
#[derive(Default)]
pub struct Healthy;

impl HealthProbe<Bmc> for Healthy {
    fn probe(&self) -> impl Future<Output = Result<(), RedfishError<Bmc>>> + Send {
        async { Ok(()) }
    }

    fn force_reset(&self) -> impl Future<Output = Result<(), RedfishError<Bmc>>> + Send {
        async { Ok(()) }
    }
}
