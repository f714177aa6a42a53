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

//! Action dispatcher.
//!
//! Actions are invoked by posting a body to the target advertised under
//! `Actions`. Standard actions answer `201`, `202` or `204`; a `Location`
//! header points to the task that tracks the operation. The dispatcher
//! never polls the task.

use crate::bmc;
use crate::resource::fetch;
use crate::task_service::Task;
use crate::Error;
use http::Method;
use http::StatusCode;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::FormPart;
use rsfish_core::ODataId;
use rsfish_core::RedfishError;
use rsfish_core::Response;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Target of an advertised action.
///
/// # Errors
///
/// Returns [`Error::NotSupported`] naming `what` if the action or its
/// target is absent.
pub fn target<'a, B: Bmc>(
    action: Option<&'a Action>,
    what: &'static str,
) -> Result<&'a ODataId, Error<B>> {
    action
        .and_then(Action::target)
        .ok_or(Error::NotSupported(what))
}

/// Error for a reply to an action that is not accepted.
pub(crate) fn action_error<B: Bmc>(target: &ODataId, response: &Response) -> Error<B> {
    let failed = response.status.is_client_error() || response.status.is_server_error();
    match RedfishError::parse(&response.body) {
        Some(error) if failed => Error::Service {
            uri: target.clone(),
            method: Method::POST,
            status: response.status,
            error: Some(error),
            body: response.text(),
        },
        _ => Error::ActionStatus {
            uri: target.clone(),
            status: response.status,
            body: response.text(),
        },
    }
}

/// Post `body` to `target` and accept only `201`, `202` and `204`.
///
/// # Errors
///
/// Returns [`Error::Service`] for error replies with a Redfish error
/// payload and [`Error::ActionStatus`] for any other unexpected status.
pub async fn submit<B: Bmc, V: Serialize + Send + Sync>(
    bmc: &B,
    target: &ODataId,
    body: &V,
) -> Result<Response, Error<B>> {
    let response = bmc::post(bmc, target, body).await?;
    debug!(%target, status = %response.status, "action submitted");
    match response.status {
        StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => Ok(response),
        _ => Err(action_error(target, &response)),
    }
}

/// Post `body` to `target`. If the reply carries a `Location` header,
/// the task it points to is fetched and returned.
///
/// # Errors
///
/// Returns any error of [`submit`] or of fetching the task.
pub async fn dispatch<B: Bmc, V: Serialize + Send + Sync>(
    bmc: &Arc<B>,
    target: &ODataId,
    body: &V,
) -> Result<Option<Task<B>>, Error<B>> {
    let response = submit(bmc.as_ref(), target, body).await?;
    match response.location() {
        Some(task) => fetch(bmc, &task).await.map(Some),
        None => Ok(None),
    }
}

/// Post `body` to `target` for actions that answer with a document. Any
/// 2xx reply is returned as-is.
///
/// # Errors
///
/// Returns [`Error::Service`] or [`Error::ActionStatus`] for non-2xx
/// replies.
pub async fn invoke<B: Bmc, V: Serialize + Send + Sync>(
    bmc: &B,
    target: &ODataId,
    body: &V,
) -> Result<Response, Error<B>> {
    let response = bmc::post(bmc, target, body).await?;
    debug!(%target, status = %response.status, "action invoked");
    if response.is_success() {
        Ok(response)
    } else {
        Err(action_error(target, &response))
    }
}

/// Upload `parts` to `target` as a multipart form. Any 2xx reply is
/// returned as-is.
///
/// # Errors
///
/// Returns [`Error::Service`] or [`Error::ActionStatus`] for non-2xx
/// replies.
pub async fn upload<B: Bmc>(
    bmc: &B,
    target: &ODataId,
    parts: &[FormPart],
) -> Result<Response, Error<B>> {
    let response = bmc::post_multipart(bmc, target, parts).await?;
    debug!(%target, status = %response.status, parts = parts.len(), "form uploaded");
    if response.is_success() {
        Ok(response)
    } else {
        Err(action_error(target, &response))
    }
}

/// `Location` of an accepted action reply.
pub(crate) fn location<B: Bmc>(target: &ODataId, response: &Response) -> Result<ODataId, Error<B>> {
    response.location().ok_or_else(|| Error::Protocol {
        uri: target.clone(),
        method: Method::POST,
        reason: "accepted action reply has no Location header".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource as _;
    use crate::task_service::TaskState;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ErrorKind;
    use serde_json::json;
    use std::io::Error as IoError;

    type TestBmc = MockBmc<IoError>;

    const TARGET: &str = "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset";

    #[tokio::test]
    async fn no_content_without_task() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::post(TARGET, r#"{"ResetType":"On"}"#, 204, ""));
        let task = dispatch(&bmc, &ODataId::from(TARGET), &json!({"ResetType": "On"}))
            .await
            .unwrap();
        assert!(task.is_none());
    }

    #[tokio::test]
    async fn accepted_with_location_fetches_task() {
        let bmc = Arc::new(TestBmc::default());
        bmc.expect(Expect::post_with_headers(
            TARGET,
            r#"{"ResetType":"On"}"#,
            202,
            &[("location", "https://bmc/redfish/v1/TaskService/Tasks/5")],
            "",
        ));
        bmc.expect(Expect::get(
            "/redfish/v1/TaskService/Tasks/5",
            r#"{"@odata.id": "/redfish/v1/TaskService/Tasks/5", "Id": "5", "Name": "Reset",
                "TaskState": "Running", "PercentComplete": 10}"#,
        ));
        let task = dispatch(&bmc, &ODataId::from(TARGET), &json!({"ResetType": "On"}))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(task.id().inner(), "5");
        assert_eq!(task.data.task_state, Some(TaskState::Running));
    }

    #[tokio::test]
    async fn ok_status_is_action_status_error() {
        let bmc = TestBmc::default();
        bmc.expect(Expect::post(TARGET, "{}", 200, "{}"));
        let err = submit(&bmc, &ODataId::from(TARGET), &json!({}))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ActionStatus);
    }

    #[tokio::test]
    async fn error_payload_is_service_error() {
        let bmc = TestBmc::default();
        bmc.expect(Expect::post(
            TARGET,
            "{}",
            400,
            r#"{"error": {"code": "Base.1.8.ActionParameterMissing",
                "message": "missing", "@Message.ExtendedInfo": []}}"#,
        ));
        let err = submit(&bmc, &ODataId::from(TARGET), &json!({}))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn opaque_server_error_is_action_status() {
        let bmc = TestBmc::default();
        bmc.expect(Expect::post(TARGET, "{}", 500, "Internal Server Error"));
        let err = invoke(&bmc, &ODataId::from(TARGET), &json!({}))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ActionStatus);
    }

    #[tokio::test]
    async fn upload_rejection_is_service_error() {
        let bmc = TestBmc::default();
        let parts = [FormPart::text("Option", "Keep")];
        bmc.expect(Expect::post_multipart(
            TARGET,
            &parts,
            400,
            r#"{"error": {"code": "Base.1.8.GeneralError", "message": "bad form",
                "@Message.ExtendedInfo": []}}"#,
        ));
        let err = upload(&bmc, &ODataId::from(TARGET), &parts)
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(bmc.pending(), 0);
    }

    #[test]
    fn missing_action_is_not_supported() {
        let err = target::<TestBmc>(None, "ComputerSystem.Reset").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }
}
