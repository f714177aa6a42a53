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

//! Expectations for Bmc Mock.

use http::header::HeaderName;
use http::HeaderValue;
use http::StatusCode;
use rsfish_core::FormPart;
use rsfish_core::ODataETag;
use rsfish_core::ODataId;
use rsfish_core::Response;
use serde_json::from_str;
use serde_json::Value as JsonValue;
use std::fmt::Display;

/// Request expected by BMC.
#[derive(Debug)]
pub enum ExpectedRequest {
    /// Expected GET.
    Get { id: ODataId },
    /// Expected POST with JSON body.
    Post { id: ODataId, request: JsonValue },
    /// Expected PATCH with JSON body and `If-Match`.
    Patch {
        id: ODataId,
        etag: Option<ODataETag>,
        request: JsonValue,
    },
    /// Expected PUT with JSON body.
    Put { id: ODataId, request: JsonValue },
    /// Expected DELETE.
    Delete { id: ODataId },
    /// Expected `multipart/form-data` POST.
    PostMultipart { id: ODataId, parts: Vec<FormPart> },
}

/// Expectation for the tests.
#[derive(Debug)]
pub struct Expect<E> {
    pub request: ExpectedRequest,
    pub response: Result<Response, E>,
}

fn id(uri: impl Display) -> ODataId {
    ODataId::from(uri.to_string())
}

fn json(v: impl Display) -> JsonValue {
    from_str(&v.to_string()).expect("invalid json in expectation")
}

fn reply(status: u16, body: impl Display) -> Response {
    Response::new(
        StatusCode::from_u16(status).expect("invalid status in expectation"),
        body.to_string().into_bytes(),
    )
}

impl<E> Expect<E> {
    /// GET answered with 200 and `response`.
    pub fn get(uri: impl Display, response: impl Display) -> Self {
        Self::get_with_status(uri, 200, response)
    }

    /// GET answered with `status` and `response` (any text).
    pub fn get_with_status(uri: impl Display, status: u16, response: impl Display) -> Self {
        Expect {
            request: ExpectedRequest::Get { id: id(uri) },
            response: Ok(reply(status, response)),
        }
    }

    /// GET answered with 200, `headers` and `response`.
    pub fn get_with_headers(
        uri: impl Display,
        headers: &[(&'static str, &str)],
        response: impl Display,
    ) -> Self {
        Self::get(uri, response).with_headers(headers)
    }

    /// GET failing at the transport level.
    pub fn get_err(uri: impl Display, err: E) -> Self {
        Expect {
            request: ExpectedRequest::Get { id: id(uri) },
            response: Err(err),
        }
    }

    /// POST of `request` answered with `status` and `response`.
    pub fn post(
        uri: impl Display,
        request: impl Display,
        status: u16,
        response: impl Display,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Post {
                id: id(uri),
                request: json(request),
            },
            response: Ok(reply(status, response)),
        }
    }

    /// POST of `request` answered with `status`, `headers` and `response`.
    pub fn post_with_headers(
        uri: impl Display,
        request: impl Display,
        status: u16,
        headers: &[(&'static str, &str)],
        response: impl Display,
    ) -> Self {
        Self::post(uri, request, status, response).with_headers(headers)
    }

    /// POST failing at the transport level.
    pub fn post_err(uri: impl Display, request: impl Display, err: E) -> Self {
        Expect {
            request: ExpectedRequest::Post {
                id: id(uri),
                request: json(request),
            },
            response: Err(err),
        }
    }

    /// PATCH without `If-Match` answered with `status` and `response`.
    pub fn patch(
        uri: impl Display,
        request: impl Display,
        status: u16,
        response: impl Display,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Patch {
                id: id(uri),
                etag: None,
                request: json(request),
            },
            response: Ok(reply(status, response)),
        }
    }

    /// PATCH with `If-Match: etag`.
    pub fn patch_with_etag(
        uri: impl Display,
        etag: &str,
        request: impl Display,
        status: u16,
        response: impl Display,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Patch {
                id: id(uri),
                etag: Some(ODataETag::from(etag)),
                request: json(request),
            },
            response: Ok(reply(status, response)),
        }
    }

    /// PUT of `request` answered with `status` and `response`.
    pub fn put(
        uri: impl Display,
        request: impl Display,
        status: u16,
        response: impl Display,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Put {
                id: id(uri),
                request: json(request),
            },
            response: Ok(reply(status, response)),
        }
    }

    /// DELETE answered with `status` and an empty body.
    pub fn delete(uri: impl Display, status: u16) -> Self {
        Expect {
            request: ExpectedRequest::Delete { id: id(uri) },
            response: Ok(reply(status, "")),
        }
    }

    /// Multipart POST of `parts` answered with `status` and `response`.
    pub fn post_multipart(
        uri: impl Display,
        parts: &[FormPart],
        status: u16,
        response: impl Display,
    ) -> Self {
        Expect {
            request: ExpectedRequest::PostMultipart {
                id: id(uri),
                parts: parts.to_vec(),
            },
            response: Ok(reply(status, response)),
        }
    }

    /// Add response headers. Names must be lowercase.
    #[must_use]
    pub fn with_headers(mut self, headers: &[(&'static str, &str)]) -> Self {
        if let Ok(response) = &mut self.response {
            for (name, value) in headers {
                response.headers.insert(
                    HeaderName::from_static(name),
                    HeaderValue::from_str(value).expect("invalid header value"),
                );
            }
        }
        self
    }
}
