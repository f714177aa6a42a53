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

//! Chassis and the legacy `Thermal` and `Power` resources.

mod item;
mod power;
mod thermal;

#[doc(inline)]
pub use item::Chassis;
#[doc(inline)]
pub use item::ChassisData;
#[doc(inline)]
pub use item::ChassisType;

pub(crate) use item::check_reset_type;

#[doc(inline)]
pub use power::Power;
#[doc(inline)]
pub use power::PowerControl;
#[doc(inline)]
pub use power::PowerData;
#[doc(inline)]
pub use power::PowerLimit;
#[doc(inline)]
pub use power::PowerMetrics;
#[doc(inline)]
pub use power::PowerSupply;
#[doc(inline)]
pub use power::Voltage;
#[doc(inline)]
pub use thermal::Fan;
#[doc(inline)]
pub use thermal::Temperature;
#[doc(inline)]
pub use thermal::Thermal;
#[doc(inline)]
pub use thermal::ThermalData;
