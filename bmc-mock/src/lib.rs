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

//! Expectation-queue [`rsfish_core::Bmc`] for tests.
//!
//! Every request pops the next [`Expect`] and fails unless method, path
//! and body match. Nothing on the queue means nothing may be sent, which
//! is how tests prove that an operation performs no I/O.

pub mod expect;

#[doc(inline)]
pub use expect::Expect;
pub use expect::ExpectedRequest;

use rsfish_core::Bmc as RsfishBmc;
use rsfish_core::ClassifyError;
use rsfish_core::ErrorKind;
use rsfish_core::FormPart;
use rsfish_core::ODataETag;
use rsfish_core::ODataId;
use rsfish_core::Response;
use serde::Serialize;
use serde_json::to_value;
use serde_json::Error as JsonError;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Mutex;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum Error {
    ErrorResponse(Box<dyn StdError + Send + Sync>),
    MutexLock(String),
    NothingIsExpected,
    BadRequestJson(JsonError),
    UnexpectedGet(ODataId, ExpectedRequest),
    UnexpectedPost(ODataId, String, ExpectedRequest),
    UnexpectedPatch(ODataId, String, ExpectedRequest),
    UnexpectedPut(ODataId, String, ExpectedRequest),
    UnexpectedDelete(ODataId, ExpectedRequest),
    UnexpectedPostMultipart(ODataId, Vec<String>, ExpectedRequest),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ErrorResponse(err) => write!(f, "response: {err}"),
            Self::MutexLock(err) => write!(f, "lock error: {err}"),
            Self::NothingIsExpected => {
                write!(f, "nothing is expected to happen but something happened")
            }
            Self::BadRequestJson(err) => write!(f, "request is not serializable: {err}"),
            Self::UnexpectedGet(id, expected) => {
                write!(f, "unexpected get: {id}; expected: {expected:?}")
            }
            Self::UnexpectedPost(id, json, expected) => {
                write!(f, "unexpected post: {id}; json: {json} expected: {expected:?}")
            }
            Self::UnexpectedPatch(id, json, expected) => {
                write!(f, "unexpected patch: {id}; json: {json} expected: {expected:?}")
            }
            Self::UnexpectedPut(id, json, expected) => {
                write!(f, "unexpected put: {id}; json: {json} expected: {expected:?}")
            }
            Self::UnexpectedDelete(id, expected) => {
                write!(f, "unexpected delete: {id}; expected: {expected:?}")
            }
            Self::UnexpectedPostMultipart(id, fields, expected) => {
                write!(
                    f,
                    "unexpected multipart post: {id}; fields: {fields:?} expected: {expected:?}"
                )
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::ErrorResponse(err) => Some(err.as_ref()),
            Self::BadRequestJson(err) => Some(err),
            _ => None,
        }
    }
}

impl ClassifyError for Error {
    // Injected errors carry no transport semantics; retry decisions fall
    // back to their message.
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Protocol
    }
}

impl Error {
    pub fn mutex_lock<T>(err: PoisonError<T>) -> Self {
        Self::MutexLock(err.to_string())
    }
}

pub struct Bmc<E> {
    expect: Mutex<VecDeque<Expect<E>>>,
}

impl<E> Default for Bmc<E> {
    fn default() -> Self {
        Self {
            expect: Mutex::new(VecDeque::new()),
        }
    }
}

impl<E> Bmc<E> {
    /// Queue expectation after the already queued ones.
    pub fn expect(&self, exp: Expect<E>) {
        self.expect
            .lock()
            .expect("not poisoned")
            .push_back(exp);
    }

    /// Drop all queued expectations.
    pub fn clear(&self) {
        self.expect.lock().expect("not poisoned").clear();
    }

    /// Number of expectations not consumed yet.
    pub fn pending(&self) -> usize {
        self.expect.lock().expect("not poisoned").len()
    }

    pub fn debug_expect(&self)
    where
        E: std::fmt::Debug,
    {
        let expect: &VecDeque<Expect<E>> = &self.expect.lock().expect("not poisoned");
        println!("Expectations (total: {})", expect.len());
        for v in expect {
            println!("{:#?}", v.request);
        }
    }

    fn next(&self) -> Result<Expect<E>, Error> {
        self.expect
            .lock()
            .map_err(Error::mutex_lock)?
            .pop_front()
            .ok_or(Error::NothingIsExpected)
    }
}

impl<E> Bmc<E>
where
    E: StdError + Send + Sync + 'static,
{
    fn respond(response: Result<Response, E>) -> Result<Response, Error> {
        response.map_err(|err| Error::ErrorResponse(Box::new(err)))
    }
}

impl<E> RsfishBmc for Bmc<E>
where
    E: StdError + Send + Sync + 'static,
{
    type Error = Error;

    async fn get(&self, in_id: &ODataId) -> Result<Response, Self::Error> {
        let expect = self.next()?;
        match expect {
            Expect {
                request: ExpectedRequest::Get { id },
                response,
            } if id == *in_id => Self::respond(response),
            _ => Err(Error::UnexpectedGet(in_id.clone(), expect.request)),
        }
    }

    async fn post<V: Serialize + Send + Sync>(
        &self,
        in_id: &ODataId,
        body: &V,
    ) -> Result<Response, Self::Error> {
        let in_request = to_value(body).map_err(Error::BadRequestJson)?;
        let expect = self.next()?;
        match expect {
            Expect {
                request: ExpectedRequest::Post { id, request },
                response,
            } if id == *in_id && request == in_request => Self::respond(response),
            _ => Err(Error::UnexpectedPost(
                in_id.clone(),
                in_request.to_string(),
                expect.request,
            )),
        }
    }

    async fn patch<V: Serialize + Send + Sync>(
        &self,
        in_id: &ODataId,
        in_etag: Option<&ODataETag>,
        body: &V,
    ) -> Result<Response, Self::Error> {
        let in_request = to_value(body).map_err(Error::BadRequestJson)?;
        let expect = self.next()?;
        match expect {
            Expect {
                request: ExpectedRequest::Patch { id, etag, request },
                response,
            } if id == *in_id && etag.as_ref() == in_etag && request == in_request => {
                Self::respond(response)
            }
            _ => Err(Error::UnexpectedPatch(
                in_id.clone(),
                in_request.to_string(),
                expect.request,
            )),
        }
    }

    async fn put<V: Serialize + Send + Sync>(
        &self,
        in_id: &ODataId,
        _etag: Option<&ODataETag>,
        body: &V,
    ) -> Result<Response, Self::Error> {
        let in_request = to_value(body).map_err(Error::BadRequestJson)?;
        let expect = self.next()?;
        match expect {
            Expect {
                request: ExpectedRequest::Put { id, request },
                response,
            } if id == *in_id && request == in_request => Self::respond(response),
            _ => Err(Error::UnexpectedPut(
                in_id.clone(),
                in_request.to_string(),
                expect.request,
            )),
        }
    }

    async fn delete(&self, in_id: &ODataId) -> Result<Response, Self::Error> {
        let expect = self.next()?;
        match expect {
            Expect {
                request: ExpectedRequest::Delete { id },
                response,
            } if id == *in_id => Self::respond(response),
            _ => Err(Error::UnexpectedDelete(in_id.clone(), expect.request)),
        }
    }

    async fn post_multipart(
        &self,
        in_id: &ODataId,
        in_parts: &[FormPart],
    ) -> Result<Response, Self::Error> {
        let expect = self.next()?;
        match expect {
            Expect {
                request: ExpectedRequest::PostMultipart { id, parts },
                response,
            } if id == *in_id && parts == in_parts => Self::respond(response),
            _ => Err(Error::UnexpectedPostMultipart(
                in_id.clone(),
                in_parts.iter().map(|part| part.name.clone()).collect(),
                expect.request,
            )),
        }
    }
}
