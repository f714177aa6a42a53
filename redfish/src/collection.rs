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

//! Collection walker.
//!
//! A collection is never kept: it is fetched, its member links are
//! gathered across `Members@odata.nextLink` pages and each member is then
//! fetched as a typed resource.

use crate::bmc;
use crate::resource::fetch;
use crate::resource::FromBase;
use crate::Error;
use futures_util::stream;
use futures_util::StreamExt as _;
use futures_util::TryStreamExt as _;
use http::Method;
use rsfish_core::Bmc;
use rsfish_core::Collection;
use rsfish_core::CollectionLayout;
use rsfish_core::LinkList;
use rsfish_core::ODataId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Members fetched concurrently while walking a collection.
const MEMBER_FETCH_CONCURRENCY: usize = 3;

/// Member identifiers of the collection at `uri`, in document order,
/// following pagination. Empty member links are skipped.
///
/// # Errors
///
/// Returns [`Error::Protocol`] if a page carries neither `Links.Members`
/// nor `Members`, or any request or decode error.
pub async fn members<B: Bmc>(bmc: &B, uri: &ODataId) -> Result<Vec<ODataId>, Error<B>> {
    let mut ids = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(uri.clone());
    while let Some(page) = next.take() {
        if !visited.insert(page.clone()) {
            debug!(%uri, %page, "pagination loop detected");
            break;
        }
        let response = bmc::get(bmc, &page).await?;
        let collection: Collection = bmc::decode(&page, &response.body)?;
        if collection.layout == CollectionLayout::Missing {
            return Err(Error::Protocol {
                uri: page,
                method: Method::GET,
                reason: "collection has neither Links.Members nor Members".into(),
            });
        }
        ids.extend(collection.members.ids().cloned());
        next = collection.next_link;
    }
    Ok(ids)
}

/// Fetch all members of the collection at `uri` as `T`, preserving
/// collection order. An empty `uri` yields an empty list.
///
/// # Errors
///
/// Returns the first error in collection order.
pub async fn list<B: Bmc, T: FromBase<B>>(bmc: &Arc<B>, uri: &ODataId) -> Result<Vec<T>, Error<B>> {
    if uri.is_empty() {
        return Ok(Vec::new());
    }
    let ids = members(bmc.as_ref(), uri).await?;
    debug!(%uri, members = ids.len(), "walking collection");
    fetch_all(bmc, ids).await
}

async fn fetch_all<B: Bmc, T: FromBase<B>>(
    bmc: &Arc<B>,
    ids: Vec<ODataId>,
) -> Result<Vec<T>, Error<B>> {
    stream::iter(ids)
        .map(|id| {
            let bmc = bmc.clone();
            async move { fetch::<B, T>(&bmc, &id).await }
        })
        .buffered(MEMBER_FETCH_CONCURRENCY)
        .try_collect()
        .await
}

/// Fetch every non-empty link of `links` as `T`, preserving order.
///
/// # Errors
///
/// Returns the first error in link order.
pub async fn resolve<B: Bmc, T: FromBase<B>>(
    bmc: &Arc<B>,
    links: &LinkList,
) -> Result<Vec<T>, Error<B>> {
    fetch_all(bmc, links.ids().cloned().collect()).await
}
