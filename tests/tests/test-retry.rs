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

//! Retry classification of transport failures.

use rsfish::Monitor;
use rsfish::Resource as _;
use rsfish::ResourceBase;
use rsfish::RetryConfig;
use rsfish_core::ErrorKind;
use rsfish_core::ODataId;
use rsfish_tests::Bmc;
use rsfish_tests::Expect;
use rsfish_tests::Healthy;
use rsfish_tests::TestError;
use rsfish_tests::ODATA_ID;
use serde_json::json;
use std::error::Error as StdError;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const SYSTEM: &str = "/redfish/v1/Systems/1";

fn monitor(max_retries: u32) -> Monitor<Healthy> {
    Monitor::new(
        Healthy,
        RetryConfig::default()
            .with_max_retries(max_retries)
            .with_base_interval(Duration::from_millis(10)),
    )
}

#[tokio::test(start_paused = true)]
async fn network_timeouts_are_retried() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    let uri = ODataId::from(SYSTEM);
    let attempts = AtomicU32::new(0);
    for _ in 0..3 {
        bmc.expect(Expect::get_err(
            SYSTEM,
            TestError::new("dial tcp 10.0.0.1:443: i/o timeout"),
        ));
    }
    let err = monitor(2)
        .execute(&CancellationToken::new(), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            ResourceBase::fetch(&bmc, &uri)
        })
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(err.to_string().contains("i/o timeout"));
    assert_eq!(bmc.pending(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn retry_stops_at_first_success() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    let uri = ODataId::from(SYSTEM);
    bmc.expect(Expect::get_err(SYSTEM, TestError::new("i/o timeout")));
    bmc.expect(Expect::get(
        SYSTEM,
        json!({ ODATA_ID: SYSTEM, "Id": "1", "Name": "System" }),
    ));
    let system = monitor(3)
        .execute(&CancellationToken::new(), || ResourceBase::fetch(&bmc, &uri))
        .await?;
    assert_eq!(system.odata_id(), &uri);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn permission_denied_returns_at_once() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    let uri = ODataId::from(SYSTEM);
    let attempts = AtomicU32::new(0);
    bmc.expect(Expect::get_err(SYSTEM, TestError::new("permission denied")));
    let err = monitor(5)
        .execute(&CancellationToken::new(), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            ResourceBase::fetch(&bmc, &uri)
        })
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(!err.is_retryable());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn service_errors_mentioning_timeout_are_final() -> Result<(), Box<dyn StdError>> {
    let bmc = Arc::new(Bmc::default());
    let uri = ODataId::from("/redfish/v1/SessionService");
    let attempts = AtomicU32::new(0);
    bmc.expect(Expect::get_with_status(
        "/redfish/v1/SessionService",
        400,
        json!({ "error": {
            "code": "Base.1.8.PropertyValueNotInList",
            "message": "The value 0 for the property SessionTimeout is not in the list of acceptable values."
        } }),
    ));
    let err = monitor(3)
        .execute(&CancellationToken::new(), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            ResourceBase::fetch(&bmc, &uri)
        })
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(err.kind(), ErrorKind::Service);
    assert!(!err.is_retryable());
    assert_eq!(bmc.pending(), 0);
    Ok(())
}
