// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2022 JET PROTOCOL HOLDINGS, LLC.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Integration instructions.
//!
//! Initialization is split per integration kind, since each kind computes its
//! own config and appends its own accounts after the common ones.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use alm_program_common::{
    accounts,
    config::IntegrationConfig,
    instruction::{
        InitializeArgs, InitializeIntegrationArgs, ManageIntegrationArgs, PullArgs, PushArgs,
        SyncIntegrationArgs,
    },
    Description, FieldUpdate, IntegrationStatus, IntegrationType, RateLimit,
};

use crate::{
    controller::ControllerIxBuilder,
    reserve::{max_outflow, uncleared},
    Result,
};

mod atomic_swap;
mod drift;
mod kamino;
mod spl_token_external;

pub use atomic_swap::AtomicSwapParams;
pub use drift::{DriftParams, SpotMarketAccounts};
pub use kamino::{KaminoParams, KaminoRewardHarvest};
pub use spl_token_external::SplTokenExternalParams;

/// Settings shared by every kind of integration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationParams {
    /// At most 32 bytes of UTF-8
    pub description: String,
    pub status: IntegrationStatus,
    pub rate_limit: RateLimit,
    pub permit_liquidation: bool,
}

impl IntegrationParams {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: IntegrationStatus::Active,
            rate_limit: RateLimit::unlimited(),
            permit_liquidation: false,
        }
    }

    fn description(&self) -> Result<Description> {
        Description::new(&self.description).map_err(|e| {
            log::warn!("integration description {:?} rejected: {e}", self.description);
            e.into()
        })
    }
}

/// Changes to apply to an existing integration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntegrationUpdate {
    pub status: FieldUpdate<IntegrationStatus>,
    /// Clearing leaves an all-zero description
    pub description: FieldUpdate<String>,
    pub rate_limit_slope: FieldUpdate<u64>,
    /// Clearing removes the cap
    pub rate_limit_max_outflow: FieldUpdate<u64>,
}

impl IntegrationUpdate {
    fn into_args(self) -> Result<ManageIntegrationArgs> {
        let description = match self.description {
            FieldUpdate::Unchanged => None,
            FieldUpdate::Cleared => Some(Description::default()),
            FieldUpdate::Set(text) => Some(Description::new(&text)?),
        };

        Ok(ManageIntegrationArgs {
            status: uncleared("status", self.status)?,
            description,
            rate_limit_slope: uncleared("rate_limit_slope", self.rate_limit_slope)?,
            rate_limit_max_outflow: max_outflow(self.rate_limit_max_outflow),
        })
    }
}

impl ControllerIxBuilder {
    /// The address of the integration created with `config`
    pub fn integration_address(&self, config: &IntegrationConfig) -> Result<Pubkey> {
        let hash = config.hash()?;
        crate::derive::integration(&self.programs().controller, &self.controller(), &hash)
    }

    /// Create an integration from an already assembled config.
    ///
    /// `remaining` is appended after the common accounts and must be what the
    /// program expects for `integration_type`.
    pub fn initialize_integration(
        &self,
        integration_type: IntegrationType,
        config: &IntegrationConfig,
        params: &IntegrationParams,
        inner_args: InitializeArgs,
        remaining: Vec<AccountMeta>,
    ) -> Result<Instruction> {
        let description = params.description()?;
        let integration = self.integration_address(config)?;
        log::debug!("{integration_type:?} integration address is {integration}");

        let accounts = accounts::InitializeIntegration {
            payer: self.payer(),
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            permission: self.permission(),
            integration,
            program_id: self.programs().controller,
            system_program: self.programs().system,
        };

        let mut ix = self.instruction(
            accounts,
            &InitializeIntegrationArgs {
                integration_type,
                status: params.status,
                description,
                rate_limit_slope: params.rate_limit.slope,
                rate_limit_max_outflow: params.rate_limit.max_outflow,
                permit_liquidation: params.permit_liquidation,
                inner_args,
            },
        )?;
        ix.accounts.extend(remaining);

        Ok(ix)
    }

    pub fn manage_integration(
        &self,
        integration: &Pubkey,
        update: IntegrationUpdate,
    ) -> Result<Instruction> {
        let accounts = accounts::ManageIntegration {
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            permission: self.permission(),
            integration: *integration,
            program_id: self.programs().controller,
        };

        self.instruction(accounts, &update.into_args()?)
    }

    /// Record the integration's external balance against a reserve.
    ///
    /// `remaining` holds the accounts the integration kind reads its balance from.
    pub fn sync_integration(
        &self,
        integration: &Pubkey,
        reserve: &Pubkey,
        remaining: &[AccountMeta],
    ) -> Result<Instruction> {
        let accounts = accounts::SyncIntegration {
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            payer: self.payer(),
            integration: *integration,
            reserve: *reserve,
        };

        let mut ix = self.instruction(accounts, &SyncIntegrationArgs {})?;
        ix.accounts.extend_from_slice(remaining);

        Ok(ix)
    }

    /// Move funds out of `reserve` into the integration.
    ///
    /// `remaining` holds the accounts the integration kind transfers through.
    pub fn push(
        &self,
        integration: &Pubkey,
        reserve: &Pubkey,
        args: &PushArgs,
        remaining: &[AccountMeta],
    ) -> Result<Instruction> {
        let accounts = accounts::Push {
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            permission: self.permission(),
            integration: *integration,
            reserve: *reserve,
            program_id: self.programs().controller,
        };

        let mut ix = self.instruction(accounts, args)?;
        ix.accounts.extend_from_slice(remaining);

        Ok(ix)
    }

    /// Return funds held by the integration to `reserve`
    pub fn pull(
        &self,
        integration: &Pubkey,
        reserve: &Pubkey,
        args: &PullArgs,
        remaining: &[AccountMeta],
    ) -> Result<Instruction> {
        let accounts = accounts::Pull {
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            permission: self.permission(),
            integration: *integration,
            reserve: *reserve,
            program_id: self.programs().controller,
        };

        let mut ix = self.instruction(accounts, args)?;
        ix.accounts.extend_from_slice(remaining);

        Ok(ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlmIxError;
    use alm_program_common::{programs::ProgramIds, WireError};

    pub(super) fn builder() -> ControllerIxBuilder {
        ControllerIxBuilder::from_id(ProgramIds::default(), 5, Pubkey::new_unique()).unwrap()
    }

    #[test]
    fn manage_integration_clears_description() {
        let integration = Pubkey::new_unique();
        let ix = builder()
            .manage_integration(
                &integration,
                IntegrationUpdate {
                    description: FieldUpdate::Cleared,
                    ..Default::default()
                },
            )
            .unwrap();

        let mut expected = vec![7, 0, 1];
        expected.extend_from_slice(&[0; 32]);
        expected.extend_from_slice(&[0, 0]);
        assert_eq!(ix.data, expected);

        assert_eq!(ix.accounts[4].pubkey, integration);
        assert!(ix.accounts[4].is_writable);
        assert!(ix.accounts[2].is_signer);
    }

    #[test]
    fn manage_integration_rejects_long_description() {
        let result = builder().manage_integration(
            &Pubkey::new_unique(),
            IntegrationUpdate {
                description: FieldUpdate::Set("x".repeat(33)),
                ..Default::default()
            },
        );

        assert!(matches!(
            result,
            Err(AlmIxError::Wire(WireError::DescriptionTooLong { .. }))
        ));
    }

    #[test]
    fn manage_integration_rejects_cleared_slope() {
        let result = builder().manage_integration(
            &Pubkey::new_unique(),
            IntegrationUpdate {
                rate_limit_slope: FieldUpdate::Cleared,
                ..Default::default()
            },
        );

        assert!(matches!(
            result,
            Err(AlmIxError::InvalidClear {
                field: "rate_limit_slope"
            })
        ));
    }

    #[test]
    fn push_and_pull_share_account_roles() {
        let builder = builder();
        let integration = Pubkey::new_unique();
        let reserve = Pubkey::new_unique();
        let push = builder
            .push(&integration, &reserve, &PushArgs::Kamino { amount: 1 }, &[])
            .unwrap();
        let pull = builder
            .pull(&integration, &reserve, &PullArgs::Kamino { amount: 1 }, &[])
            .unwrap();

        assert_eq!(push.data[0], 10);
        assert_eq!(pull.data[0], 11);
        assert_eq!(push.accounts, pull.accounts);

        let roles: Vec<_> = push
            .accounts
            .iter()
            .map(|a| (a.pubkey, a.is_signer, a.is_writable))
            .collect();
        assert_eq!(
            roles,
            vec![
                (builder.controller(), false, false),
                (builder.controller_authority(), false, true),
                (builder.authority(), true, false),
                (builder.permission(), false, false),
                (integration, false, true),
                (reserve, false, true),
                (builder.programs().controller, false, false),
            ]
        );
    }

    #[test]
    fn sync_integration_roles() {
        let builder = builder();
        let extra = AccountMeta::new_readonly(Pubkey::new_unique(), false);
        let ix = builder
            .sync_integration(&Pubkey::new_unique(), &Pubkey::new_unique(), &[extra.clone()])
            .unwrap();

        assert_eq!(ix.data, vec![9]);
        assert_eq!(ix.accounts.len(), 6);
        assert_eq!(ix.accounts[5], extra);

        let roles: Vec<_> = ix.accounts[..5]
            .iter()
            .map(|a| (a.is_signer, a.is_writable))
            .collect();
        assert_eq!(
            roles,
            vec![
                (false, false),
                (false, true),
                (true, true),
                (false, true),
                (false, true),
            ]
        );
    }
}
