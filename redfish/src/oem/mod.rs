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

//! Vendor extensions.
//!
//! Each overlay takes a standard resource by value and decodes its vendor
//! blocks from the payload already retained by the resource. Overlays never
//! send requests on construction.

/// Vendors.
pub mod vendor;

/// Support of AMI.
#[cfg(feature = "oem-ami")]
pub mod ami;
/// Support of Dell.
#[cfg(feature = "oem-dell")]
pub mod dell;
/// Support of Supermicro.
#[cfg(feature = "oem-supermicro")]
pub mod supermicro;
/// Support of ZT Systems.
#[cfg(feature = "oem-zt")]
pub mod zt;

#[doc(inline)]
pub use vendor::Vendor;
