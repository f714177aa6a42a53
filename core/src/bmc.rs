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

//! Baseboard Management Controller (BMC) client abstraction
//!
//! This module defines the transport-agnostic [`Bmc`] trait: the minimal
//! set of HTTP verbs a Redfish client needs. Implementors deliver raw
//! [`Response`] values; status checks, decoding and error classification
//! happen above this layer.
//!
//! Operation semantics:
//! - `get` fetches the document at the given `@odata.id`.
//! - `post` creates a collection member or invokes an action.
//! - `patch` updates a resource. When an entity tag is known it is sent
//!   as `If-Match`.
//! - `put` replaces a resource.
//! - `delete` removes the resource at `id`.
//!
//! Notes for implementors:
//! - The trait is `Send + Sync` and returns `Send` futures to support use in
//!   async runtimes and multithreaded contexts.
//! - Non-2xx replies are not errors at this layer. Errors are reserved for
//!   failures to obtain a reply at all (connection, TLS, authentication).
//! - Errors implement [`ClassifyError`] so that the retry layer can tell
//!   transport failures from everything else.

use crate::ClassifyError;
use crate::ODataETag;
use crate::ODataId;
use http::header::HeaderName;
use http::header::ETAG;
use http::header::LOCATION;
use http::HeaderMap;
use http::StatusCode;
use serde::Serialize;
use std::error::Error as StdError;
use std::future::Future;
use url::Url;

/// BMC trait defines access to a Baseboard Management Controller using
/// the Redfish protocol.
pub trait Bmc: Send + Sync + 'static {
    /// BMC Error.
    type Error: StdError + ClassifyError + Send + Sync + 'static;

    /// Get document identified by `id`.
    fn get(&self, id: &ODataId) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// POST `body` to `id`.
    fn post<V: Serialize + Send + Sync>(
        &self,
        id: &ODataId,
        body: &V,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// PATCH resource `id` with `body`.
    fn patch<V: Serialize + Send + Sync>(
        &self,
        id: &ODataId,
        etag: Option<&ODataETag>,
        body: &V,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// PUT `body` to `id`.
    fn put<V: Serialize + Send + Sync>(
        &self,
        id: &ODataId,
        etag: Option<&ODataETag>,
        body: &V,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// DELETE resource `id`.
    fn delete(&self, id: &ODataId) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    /// POST `parts` to `id` as `multipart/form-data`.
    fn post_multipart(
        &self,
        id: &ODataId,
        parts: &[FormPart],
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

/// One field of a `multipart/form-data` upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// Form field name.
    pub name: String,
    /// File name reported for the field, if it carries a file.
    pub file_name: Option<String>,
    /// Field content.
    pub content: Vec<u8>,
}

impl FormPart {
    /// File field `name` with `content`.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            content: content.into(),
        }
    }

    /// Plain text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content: value.into().into_bytes(),
        }
    }
}

/// Raw reply of the service.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as received.
    pub body: Vec<u8>,
}

impl Response {
    /// Create response with empty headers.
    #[must_use]
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// True for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Header value if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Entity tag sent by the service.
    #[must_use]
    pub fn etag(&self) -> Option<ODataETag> {
        self.header(&ETAG).map(ODataETag::from)
    }

    /// `Location` header reduced to a service path. Services send
    /// either an absolute URL or a path; both forms yield the path
    /// (with query, if any).
    #[must_use]
    pub fn location(&self) -> Option<ODataId> {
        let value = self.header(&LOCATION)?.trim();
        if value.is_empty() {
            return None;
        }
        match Url::parse(value) {
            Ok(url) => {
                let path = url.query().map_or_else(
                    || url.path().to_string(),
                    |q| format!("{}?{q}", url.path()),
                );
                Some(ODataId::from(path))
            }
            Err(_) => Some(ODataId::from(value)),
        }
    }

    /// Body as lossy UTF-8 text, for diagnostics.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn with_location(v: &'static str) -> Response {
        let mut r = Response::new(StatusCode::ACCEPTED, Vec::new());
        r.headers.insert(LOCATION, HeaderValue::from_static(v));
        r
    }

    #[test]
    fn location_from_absolute_url() {
        let r = with_location("https://10.0.0.1:443/redfish/v1/TaskService/Tasks/7");
        assert_eq!(
            r.location(),
            Some(ODataId::from("/redfish/v1/TaskService/Tasks/7"))
        );
    }

    #[test]
    fn location_from_path() {
        let r = with_location("/redfish/v1/TaskService/Tasks/7");
        assert_eq!(
            r.location(),
            Some(ODataId::from("/redfish/v1/TaskService/Tasks/7"))
        );
    }

    #[test]
    fn location_keeps_query() {
        let r = with_location("http://bmc/redfish/v1/Tasks?id=3");
        assert_eq!(r.location(), Some(ODataId::from("/redfish/v1/Tasks?id=3")));
    }

    #[test]
    fn no_location() {
        let r = Response::new(StatusCode::NO_CONTENT, Vec::new());
        assert_eq!(r.location(), None);
        assert!(r.is_success());
    }
}
