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

//! Account service, user accounts and roles.

use crate::resource::FromBase;
use crate::resource::Resource;
use crate::resource::ResourceBase;
use crate::resource::Status;
use crate::Error;
use rsfish_core::Bmc;
use rsfish_core::Link;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// Data of a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleData {
    /// Whether the role is predefined.
    pub is_predefined: Option<bool>,
    /// Privileges granted by the role.
    #[serde(default)]
    pub assigned_privileges: Vec<String>,
    /// Vendor privileges granted by the role.
    #[serde(default)]
    pub oem_privileges: Vec<String>,
}

#[derive(Deserialize)]
struct RoleSchema {
    #[serde(flatten)]
    data: RoleData,
}

/// Role.
pub struct Role<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded role data.
    pub data: RoleData,
}

impl<B: Bmc> FromBase<B> for Role<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let RoleSchema { data } = base.decode()?;
        Ok(Self { base, data })
    }
}

impl<B: Bmc> Resource<B> for Role<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of a user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagerAccountData {
    /// Login name.
    pub user_name: Option<String>,
    /// Identifier of the role.
    pub role_id: Option<String>,
    /// Whether the account is enabled.
    pub enabled: Option<bool>,
    /// Whether the account is locked after failed logins.
    pub locked: Option<bool>,
    /// Whether the password must be changed before other operations.
    pub password_change_required: Option<bool>,
}

/// Properties of a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagerAccountCreate {
    /// Login name.
    pub user_name: String,
    /// Password.
    pub password: String,
    /// Identifier of the role.
    pub role_id: String,
    /// Whether the account is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Writable properties of an account. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagerAccountUpdate {
    /// New login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    /// Enable or disable the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Unlock the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

#[derive(Deserialize, Default)]
struct ManagerAccountLinks {
    #[serde(rename = "Role", default)]
    role: Link,
}

#[derive(Deserialize)]
struct ManagerAccountSchema {
    #[serde(flatten)]
    data: ManagerAccountData,
    #[serde(rename = "Links", default)]
    links: ManagerAccountLinks,
}

/// User account of a manager.
pub struct ManagerAccount<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded account data.
    pub data: ManagerAccountData,
    role: Link,
}

impl<B: Bmc> ManagerAccount<B> {
    /// Role of the account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the account has no role link, or
    /// any fetch error.
    pub async fn role(&self) -> Result<Role<B>, Error<B>> {
        self.base.follow(&self.role, "ManagerAccount Role").await
    }

    /// Update the account and return the new state.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn update(&self, update: &ManagerAccountUpdate) -> Result<Self, Error<B>> {
        self.base.update(update).await
    }

    /// Delete the account.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request.
    pub async fn delete(&self) -> Result<(), Error<B>> {
        self.base.delete().await
    }
}

impl<B: Bmc> FromBase<B> for ManagerAccount<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let ManagerAccountSchema { data, links } = base.decode()?;
        Ok(Self {
            base,
            data,
            role: links.role,
        })
    }
}

impl<B: Bmc> Resource<B> for ManagerAccount<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

/// Data of the account service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountServiceData {
    /// Whether the service is enabled.
    pub service_enabled: Option<bool>,
    /// Failed logins before lockout.
    pub account_lockout_threshold: Option<u32>,
    /// Lockout duration in seconds.
    pub account_lockout_duration: Option<u64>,
    /// Minimum password length.
    pub min_password_length: Option<u32>,
    /// Maximum password length.
    pub max_password_length: Option<u32>,
    /// Status of the service.
    pub status: Option<Status>,
}

/// Writable account service properties. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountServiceUpdate {
    /// Failed logins before lockout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_lockout_threshold: Option<u32>,
    /// Lockout duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_lockout_duration: Option<u64>,
}

#[derive(Deserialize)]
struct AccountServiceSchema {
    #[serde(flatten)]
    data: AccountServiceData,
    #[serde(rename = "Accounts", default)]
    accounts: Link,
    #[serde(rename = "Roles", default)]
    roles: Link,
}

/// Account service.
pub struct AccountService<B: Bmc> {
    base: ResourceBase<B>,
    /// Decoded service data.
    pub data: AccountServiceData,
    accounts: Link,
    roles: Link,
}

impl<B: Bmc> AccountService<B> {
    /// User accounts.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or an account fails.
    pub async fn accounts(&self) -> Result<Vec<ManagerAccount<B>>, Error<B>> {
        self.base.list(&self.accounts).await
    }

    /// Roles.
    ///
    /// # Errors
    ///
    /// Returns error if fetching the collection or a role fails.
    pub async fn roles(&self) -> Result<Vec<Role<B>>, Error<B>> {
        self.base.list(&self.roles).await
    }

    /// Create an account.
    ///
    /// The account is fetched from the `Location` of the reply; services
    /// that omit it must return the new account in the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the service has no accounts
    /// collection, or any request or decode error.
    pub async fn create_account(
        &self,
        create: &ManagerAccountCreate,
    ) -> Result<ManagerAccount<B>, Error<B>> {
        debug!(user = %create.user_name, "creating account");
        self.base
            .create(&self.accounts, "AccountService Accounts", create)
            .await
    }

    /// Update service properties and return the new state.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the update or the refetch
    /// fails.
    pub async fn update(&self, update: &AccountServiceUpdate) -> Result<Self, Error<B>> {
        self.base.update(update).await
    }
}

impl<B: Bmc> FromBase<B> for AccountService<B> {
    fn from_base(base: ResourceBase<B>) -> Result<Self, Error<B>> {
        let AccountServiceSchema {
            data,
            accounts,
            roles,
        } = base.decode()?;
        Ok(Self {
            base,
            data,
            accounts,
            roles,
        })
    }
}

impl<B: Bmc> Resource<B> for AccountService<B> {
    fn base(&self) -> &ResourceBase<B> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::fetch;
    use rsfish_bmc_mock::Bmc as MockBmc;
    use rsfish_bmc_mock::Expect;
    use rsfish_core::ODataId;
    use std::io::Error as IoError;
    use std::sync::Arc;

    type TestBmc = MockBmc<IoError>;

    const ACCOUNT: &str = r#"{"@odata.id": "/redfish/v1/AccountService/Accounts/3",
        "@odata.etag": "\"a3\"", "Id": "3", "Name": "User Account",
        "UserName": "operator", "RoleId": "Operator", "Enabled": true,
        "Links": {"Role": {"@odata.id": "/redfish/v1/AccountService/Roles/Operator"}}}"#;

    async fn service(bmc: &Arc<TestBmc>) -> AccountService<TestBmc> {
        bmc.expect(Expect::get(
            "/redfish/v1/AccountService",
            r#"{"Id": "AccountService", "Name": "Account Service", "MinPasswordLength": 8,
                "Accounts": {"@odata.id": "/redfish/v1/AccountService/Accounts"},
                "Roles": {"@odata.id": "/redfish/v1/AccountService/Roles"}}"#,
        ));
        fetch(bmc, &ODataId::from("/redfish/v1/AccountService"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_follows_location() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::post_with_headers(
            "/redfish/v1/AccountService/Accounts",
            r#"{"UserName": "operator", "Password": "secret123", "RoleId": "Operator"}"#,
            201,
            &[("location", "/redfish/v1/AccountService/Accounts/3")],
            "",
        ));
        bmc.expect(Expect::get("/redfish/v1/AccountService/Accounts/3", ACCOUNT));
        let account = service
            .create_account(&ManagerAccountCreate {
                user_name: "operator".into(),
                password: "secret123".into(),
                role_id: "Operator".into(),
                enabled: None,
            })
            .await
            .unwrap();
        assert_eq!(account.data.role_id.as_deref(), Some("Operator"));

        bmc.expect(Expect::patch_with_etag(
            "/redfish/v1/AccountService/Accounts/3",
            "\"a3\"",
            r#"{"Enabled": false}"#,
            200,
            "{}",
        ));
        bmc.expect(Expect::get("/redfish/v1/AccountService/Accounts/3", ACCOUNT));
        account
            .update(&ManagerAccountUpdate {
                enabled: Some(false),
                ..ManagerAccountUpdate::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_without_location_uses_body() {
        let bmc = Arc::new(TestBmc::default());
        let service = service(&bmc).await;
        bmc.expect(Expect::post(
            "/redfish/v1/AccountService/Accounts",
            r#"{"UserName": "operator", "Password": "secret123", "RoleId": "Operator", "Enabled": true}"#,
            201,
            ACCOUNT,
        ));
        let account = service
            .create_account(&ManagerAccountCreate {
                user_name: "operator".into(),
                password: "secret123".into(),
                role_id: "Operator".into(),
                enabled: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(
            account.odata_id(),
            &ODataId::from("/redfish/v1/AccountService/Accounts/3")
        );

        bmc.expect(Expect::get(
            "/redfish/v1/AccountService/Roles/Operator",
            r#"{"Id": "Operator", "Name": "User Role", "IsPredefined": true,
                "AssignedPrivileges": ["Login", "ConfigureSelf", "ConfigureComponents"]}"#,
        ));
        let role = account.role().await.unwrap();
        assert_eq!(role.data.assigned_privileges.len(), 3);
    }
}
