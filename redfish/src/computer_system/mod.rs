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

//! Computer systems and their sub-resources.

mod bios;
mod item;
mod memory;
mod processor;

#[doc(inline)]
pub use bios::Bios;
#[doc(inline)]
pub use bios::BiosData;
#[doc(inline)]
pub use item::Boot;
#[doc(inline)]
pub use item::BootSourceOverrideEnabled;
#[doc(inline)]
pub use item::BootUpdate;
#[doc(inline)]
pub use item::BootSourceOverrideMode;
#[doc(inline)]
pub use item::BootSourceOverrideTarget;
#[doc(inline)]
pub use item::ComputerSystem;
#[doc(inline)]
pub use item::ComputerSystemData;
#[doc(inline)]
pub use item::ComputerSystemUpdate;
#[doc(inline)]
pub use item::MemorySummary;
#[doc(inline)]
pub use item::ProcessorSummary;
#[doc(inline)]
pub use item::SystemType;
#[doc(inline)]
pub use memory::Memory;
#[doc(inline)]
pub use memory::MemoryData;
#[doc(inline)]
pub use processor::Processor;
#[doc(inline)]
pub use processor::ProcessorData;
