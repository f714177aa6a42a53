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

//! Request helpers on top of the core [`Bmc`] trait.
//!
//! The core transport returns every reply as-is. These helpers attach
//! the URI and method to transport errors and turn non-success replies
//! into [`Error::Service`].

use crate::Error;
use http::Method;
use rsfish_core::Bmc;
use rsfish_core::FormPart;
use rsfish_core::ODataETag;
use rsfish_core::ODataId;
use rsfish_core::RedfishError;
use rsfish_core::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Error for a reply with a non-success status.
pub(crate) fn service_error<B: Bmc>(uri: &ODataId, method: Method, response: &Response) -> Error<B> {
    Error::Service {
        uri: uri.clone(),
        method,
        status: response.status,
        error: RedfishError::parse(&response.body),
        body: response.text(),
    }
}

fn checked<B: Bmc>(uri: &ODataId, method: Method, response: Response) -> Result<Response, Error<B>> {
    if response.is_success() {
        Ok(response)
    } else {
        debug!(%method, %uri, status = %response.status, "request rejected by service");
        Err(service_error(uri, method, &response))
    }
}

/// Decode JSON body keeping the path of the offending value.
pub(crate) fn decode<B: Bmc, T: DeserializeOwned>(uri: &ODataId, body: &[u8]) -> Result<T, Error<B>> {
    let mut de = serde_json::Deserializer::from_slice(body);
    serde_path_to_error::deserialize(&mut de).map_err(|source| Error::Decode {
        uri: uri.clone(),
        source,
    })
}

/// GET that only succeeds on 2xx.
pub(crate) async fn get<B: Bmc>(bmc: &B, uri: &ODataId) -> Result<Response, Error<B>> {
    let response = bmc.get(uri).await.map_err(|source| Error::Bmc {
        uri: uri.clone(),
        method: Method::GET,
        source,
    })?;
    checked(uri, Method::GET, response)
}

/// POST returning the reply whatever its status.
pub(crate) async fn post<B: Bmc, V: Serialize + Send + Sync>(
    bmc: &B,
    uri: &ODataId,
    body: &V,
) -> Result<Response, Error<B>> {
    bmc.post(uri, body).await.map_err(|source| Error::Bmc {
        uri: uri.clone(),
        method: Method::POST,
        source,
    })
}

/// Multipart POST returning the reply whatever its status.
pub(crate) async fn post_multipart<B: Bmc>(
    bmc: &B,
    uri: &ODataId,
    parts: &[FormPart],
) -> Result<Response, Error<B>> {
    bmc.post_multipart(uri, parts)
        .await
        .map_err(|source| Error::Bmc {
            uri: uri.clone(),
            method: Method::POST,
            source,
        })
}

/// POST that only succeeds on 2xx.
pub(crate) async fn create<B: Bmc, V: Serialize + Send + Sync>(
    bmc: &B,
    uri: &ODataId,
    body: &V,
) -> Result<Response, Error<B>> {
    let response = post(bmc, uri, body).await?;
    checked(uri, Method::POST, response)
}

/// PATCH with `If-Match` when `etag` is known.
pub(crate) async fn patch<B: Bmc, V: Serialize + Send + Sync>(
    bmc: &B,
    uri: &ODataId,
    etag: Option<&ODataETag>,
    body: &V,
) -> Result<Response, Error<B>> {
    let response = bmc
        .patch(uri, etag, body)
        .await
        .map_err(|source| Error::Bmc {
            uri: uri.clone(),
            method: Method::PATCH,
            source,
        })?;
    checked(uri, Method::PATCH, response)
}

/// DELETE that only succeeds on 2xx.
pub(crate) async fn delete<B: Bmc>(bmc: &B, uri: &ODataId) -> Result<Response, Error<B>> {
    let response = bmc.delete(uri).await.map_err(|source| Error::Bmc {
        uri: uri.clone(),
        method: Method::DELETE,
        source,
    })?;
    checked(uri, Method::DELETE, response)
}
