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

use crate::action;
use crate::chassis::check_reset_type;
use crate::chassis::Chassis;
use crate::collection;
use crate::computer_system::Bios;
use crate::computer_system::Memory;
use crate::computer_system::Processor;
use crate::ethernet_interface::EthernetInterface;
use crate::log_service::LogService;
use crate::manager::Manager;
use crate::resource::FromBase;
use crate::resource::PowerState;
use crate::resource::ResetBody;
use crate::resource::ResetType;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::storage::Storage;
use crate::task_service::Task;
use crate::Error;
use rsfish_core::Action;
use rsfish_core::Bmc;
use rsfish_core::Link;
use rsfish_core::LinkList;
use serde::Deserialize;
use serde::Serialize;

/// Type of a computer system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    /// A physical system.
    Physical,
    /// A virtual machine.
    Virtual,
    /// An operating system partition.
    OS,
    /// A hardware partition.
    PhysicallyPartitioned,
    /// A virtual partition.
    VirtuallyPartitioned,
    /// A composed system.
    Composed,
    /// A data processing unit.
    DPU,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Whether the boot source override is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootSourceOverrideEnabled {
    /// Override is disabled.
    Disabled,
    /// Override applies to the next boot only.
    Once,
    /// Override applies to every boot.
    Continuous,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Boot source of the override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootSourceOverrideTarget {
    /// Boot from the normal boot device.
    None,
    /// Boot from the PXE environment.
    Pxe,
    /// Boot from the floppy disk drive.
    Floppy,
    /// Boot from the CD or DVD.
    Cd,
    /// Boot from a USB device.
    Usb,
    /// Boot from a hard drive.
    Hdd,
    /// Boot to the BIOS setup utility.
    BiosSetup,
    /// Boot to the manufacturer's utilities program.
    Utilities,
    /// Boot to the manufacturer's diagnostics program.
    Diags,
    /// Boot to the UEFI shell.
    UefiShell,
    /// Boot to the UEFI device in `UefiTargetBootSourceOverride`.
    UefiTarget,
    /// Boot from an SD card.
    SDCard,
    /// Boot from a UEFI HTTP network location.
    UefiHttp,
    /// Boot from a remote drive.
    RemoteDrive,
    /// Boot to the UEFI device in `BootNext`.
    UefiBootNext,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Firmware mode used for the override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootSourceOverrideMode {
    /// Legacy BIOS boot.
    Legacy,
    /// UEFI boot.
    UEFI,
    /// Value not known to this library.
    #[serde(other)]
    Unknown,
}

/// Boot settings of a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Boot {
    /// Whether the override is in effect.
    pub boot_source_override_enabled: Option<BootSourceOverrideEnabled>,
    /// Override target.
    pub boot_source_override_target: Option<BootSourceOverrideTarget>,
    /// Override firmware mode.
    pub boot_source_override_mode: Option<BootSourceOverrideMode>,
    /// Targets accepted by the service.
    #[serde(
        rename = "BootSourceOverrideTarget@Redfish.AllowableValues",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_targets: Vec<BootSourceOverrideTarget>,
    /// UEFI device path used with `UefiTarget`.
    pub uefi_target_boot_source_override: Option<String>,
    /// Persistent boot order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boot_order: Vec<String>,
}

/// Processor summary of a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessorSummary {
    /// Number of processors.
    pub count: Option<u32>,
    /// Number of logical processors.
    pub logical_processor_count: Option<u32>,
    /// Processor model.
    pub model: Option<String>,
    /// Status of the processors.
    pub status: Option<Status>,
}

/// Memory summary of a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemorySummary {
    /// Total system memory in GiB.
    #[serde(rename = "TotalSystemMemoryGiB")]
    pub total_system_memory_gib: Option<f64>,
    /// Status of the memory.
    pub status: Option<Status>,
}

/// Data of a computer system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComputerSystemData {
    /// Type of the system.
    pub system_type: Option<SystemType>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Stock-keeping unit.
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Part number.
    pub part_number: Option<String>,
    /// Asset tag.
    pub asset_tag: Option<String>,
    /// Host name of the system.
    pub host_name: Option<String>,
    /// UUID of the system.
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    /// Power state.
    pub power_state: Option<PowerState>,
    /// Version of the BIOS.
    pub bios_version: Option<String>,
    /// Boot settings.
    pub boot: Option<Boot>,
    /// Processor summary.
    pub processor_summary: Option<ProcessorSummary>,
    /// Memory summary.
    pub memory_summary: Option<MemorySummary>,
    /// Status of the system.
    pub status: Option<Status>,
}

/// Writable properties of a computer system. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComputerSystemUpdate {
    /// New asset tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,
    /// New host name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    /// New boot settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<BootUpdate>,
}

/// Writable boot settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BootUpdate {
    /// Whether the override is in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_source_override_enabled: Option<BootSourceOverrideEnabled>,
    /// Override target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_source_override_target: Option<BootSourceOverrideTarget>,
    /// Override firmware mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_source_override_mode: Option<BootSourceOverrideMode>,
}

#[derive(Deserialize, Default)]
struct SystemLinks {
    #[serde(rename = "Chassis", default)]
    chassis: LinkList,
    #[serde(rename = "ManagedBy", default)]
    managed_by: LinkList,
}

#[derive(Deserialize, Default)]
struct SystemActions {
    #[serde(rename = "#ComputerSystem.Reset")]
    reset: Option<Action>,
}

#[derive(Deserialize)]
struct ComputerSystemSchema {
    #[serde(flatten)]
    data: ComputerSystemData,
    #[serde(rename = "Processors", default)]
    processors: Link,
    #[serde(rename = "Memory", default)]
    memory: Link,
    #[serde(rename = "Bios", default)]
    bios: Link,
    #[serde(rename = "EthernetInterfaces", default)]
    ethernet_interfaces: Link,
    #[serde(rename = "Storage", default)]
    storage: Link,
    #[serde(rename = "LogServices", default)]
    log_services: Link,
    #[serde(rename = "Links", default)]
    links: SystemLinks,
    #[serde(rename = "Actions", default)]
    actions: SystemActions,
}

/// Represents a computer system in the BMC.
///
/// Provides access to system information and sub-resources such as
/// processors, memory and storage.
pub struct ComputerSystem<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded system data.
    pub data: ComputerSystemData,
    processors: Link,
    memory: Link,
    bios: Link,
    ethernet_interfaces: Link,
    storage: Link,
    log_services: Link,
    links: SystemLinks,
    reset: Option<Action>,
}

impl<B: Bmc> ComputerSystem<B> {
    /// Processors of this system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a processor fails.
    pub async fn processors(&self) -> Result<Vec<Processor<B>>, Error<B>> {
        self.base.list(&self.processors).await
    }

    /// Memory modules of this system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a module fails.
    pub async fn memory(&self) -> Result<Vec<Memory<B>>, Error<B>> {
        self.base.list(&self.memory).await
    }

    /// BIOS of this system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the system has no `Bios` link, or
    /// any fetch error.
    pub async fn bios(&self) -> Result<Bios<B>, Error<B>> {
        self.base.follow(&self.bios, "ComputerSystem Bios").await
    }

    /// Network interfaces of this system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or an interface fails.
    pub async fn ethernet_interfaces(&self) -> Result<Vec<EthernetInterface<B>>, Error<B>> {
        self.base.list(&self.ethernet_interfaces).await
    }

    /// Storage subsystems of this system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn storage(&self) -> Result<Vec<Storage<B>>, Error<B>> {
        self.base.list(&self.storage).await
    }

    /// Log services of this system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a member fails.
    pub async fn log_services(&self) -> Result<Vec<LogService<B>>, Error<B>> {
        self.base.list(&self.log_services).await
    }

    /// Chassis containing this system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a chassis fails.
    pub async fn chassis(&self) -> Result<Vec<Chassis<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.chassis).await
    }

    /// Managers of this system.
    ///
    /// # Errors
    ///
    /// Returns error if fetching a manager fails.
    pub async fn managed_by(&self) -> Result<Vec<Manager<B>>, Error<B>> {
        collection::resolve(self.base.bmc(), &self.links.managed_by).await
    }

    /// Reset the system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the action is not advertised,
    /// [`Error::InvalidParameter`] if `reset_type` is not allowed, or any
    /// dispatch error.
    pub async fn reset(&self, reset_type: ResetType) -> Result<Option<Task<B>>, Error<B>> {
        let target = action::target(self.reset.as_ref(), "ComputerSystem.Reset")?;
        check_reset_type(self.reset.as_ref(), reset_type)?;
        action::dispatch(self.base.bmc(), target, &ResetBody { reset_type }).await
    }

    /// Update writable properties and return the new state.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn update(&self, update: &ComputerSystemUpdate) -> Result<Self, Error<B>> {
        self.base.update(update).await
    }

    /// Set the boot source override.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the service advertises
    /// allowed targets and `target` is not one of them, or any update
    /// error.
    pub async fn set_boot_override(
        &self,
        target: BootSourceOverrideTarget,
        enabled: BootSourceOverrideEnabled,
    ) -> Result<Self, Error<B>> {
        let allowed = self
            .data
            .boot
            .as_ref()
            .map(|boot| boot.allowed_targets.as_slice())
            .unwrap_or_default();
        if !allowed.is_empty() && !allowed.contains(&target) {
            return Err(Error::InvalidParameter(format!(
                "boot override target {target:?} is not allowed"
            )));
        }
        let update = ComputerSystemUpdate {
            boot: Some(BootUpdate {
                boot_source_override_enabled: Some(enabled),
                boot_source_override_target: Some(target),
                boot_source_override_mode: None,
            }),
            ..ComputerSystemUpdate::default()
        };
        self.update(&update).await
    }
}

impl<B: Bmc> FromBase<B> for ComputerSystem<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ComputerSystemSchema {
            data,
            processors,
            memory,
            bios,
            ethernet_interfaces,
            storage,
            log_services,
            links,
            actions,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            processors,
            memory,
            bios,
            ethernet_interfaces,
            storage,
            log_services,
            links,
            reset: actions.reset,
        })
    }
}

impl<B: Bmc> Resource<B> for ComputerSystem<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}
