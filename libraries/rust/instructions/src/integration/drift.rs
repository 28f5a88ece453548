use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use alm_program_common::{
    config::{DriftConfig, IntegrationConfig, Padding},
    instruction::{InitializeArgs, PullArgs, PushArgs},
    IntegrationType,
};

use super::IntegrationParams;
use crate::{controller::ControllerIxBuilder, drift, Result};

/// A Drift spot market position held by a sub account of the controller authority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftParams {
    pub mint: Pubkey,
    pub sub_account_id: u16,
    pub spot_market_index: u16,
}

impl DriftParams {
    pub fn config(&self) -> DriftConfig {
        DriftConfig {
            sub_account_id: self.sub_account_id,
            spot_market_index: self.spot_market_index,
            padding: Padding::zeroed(),
        }
    }
}

/// A spot market the Drift user has a position in, with its price oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotMarketAccounts {
    pub spot_market: Pubkey,
    pub oracle: Pubkey,
}

/// Every oracle, then every spot market, in the order given
fn spot_market_metas(markets: &[SpotMarketAccounts]) -> Vec<AccountMeta> {
    let oracles = markets
        .iter()
        .map(|m| AccountMeta::new_readonly(m.oracle, false));
    let spot_markets = markets
        .iter()
        .map(|m| AccountMeta::new(m.spot_market, false));

    oracles.chain(spot_markets).collect()
}

impl ControllerIxBuilder {
    fn drift_integration(&self, position: &DriftParams) -> Result<Pubkey> {
        self.integration_address(&IntegrationConfig::Drift(position.config()))
    }

    /// Create a Drift integration, opening the user account if it does not exist
    pub fn initialize_drift(
        &self,
        params: &IntegrationParams,
        position: &DriftParams,
    ) -> Result<Instruction> {
        let program = self.programs().drift;
        let owner = self.controller_authority();

        let remaining = vec![
            AccountMeta::new_readonly(position.mint, false),
            AccountMeta::new(drift::user(&program, &owner, position.sub_account_id)?, false),
            AccountMeta::new(drift::user_stats(&program, &owner)?, false),
            AccountMeta::new(drift::state(&program)?, false),
            AccountMeta::new_readonly(
                drift::spot_market(&program, position.spot_market_index)?,
                false,
            ),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(program, false),
        ];

        self.initialize_integration(
            IntegrationType::Drift,
            &IntegrationConfig::Drift(position.config()),
            params,
            InitializeArgs::Drift {
                sub_account_id: position.sub_account_id,
                spot_market_index: position.spot_market_index,
            },
            remaining,
        )
    }

    /// Deposit `amount` from the reserve into the Drift spot market.
    ///
    /// `spot_markets` lists every market the user holds a position in, which
    /// Drift reads to check the account's health.
    pub fn push_drift(
        &self,
        position: &DriftParams,
        token_program: &Pubkey,
        amount: u64,
        reduce_only: bool,
        spot_markets: &[SpotMarketAccounts],
    ) -> Result<Instruction> {
        let program = self.programs().drift;
        let owner = self.controller_authority();
        let vault = self.reserve_vault(&position.mint, token_program)?;

        let mut remaining = vec![
            AccountMeta::new_readonly(drift::state(&program)?, false),
            AccountMeta::new(drift::user(&program, &owner, position.sub_account_id)?, false),
            AccountMeta::new(drift::user_stats(&program, &owner)?, false),
            AccountMeta::new(
                drift::spot_market_vault(&program, position.spot_market_index)?,
                false,
            ),
            // the token account deposited from
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(*token_program, false),
            // the reserve's vault, read back for the balance
            AccountMeta::new_readonly(vault, false),
            AccountMeta::new_readonly(program, false),
        ];
        remaining.extend(spot_market_metas(spot_markets));

        self.push(
            &self.drift_integration(position)?,
            &self.reserve_address(&position.mint)?,
            &PushArgs::Drift {
                market_index: position.spot_market_index,
                amount,
                reduce_only,
            },
            &remaining,
        )
    }

    /// Withdraw `amount` from the Drift spot market back into the reserve
    pub fn pull_drift(
        &self,
        position: &DriftParams,
        token_program: &Pubkey,
        amount: u64,
        spot_markets: &[SpotMarketAccounts],
    ) -> Result<Instruction> {
        let program = self.programs().drift;
        let owner = self.controller_authority();
        let (drift_signer, _) = drift::signer(&program)?;

        let mut remaining = vec![
            AccountMeta::new_readonly(drift::state(&program)?, false),
            AccountMeta::new(drift::user(&program, &owner, position.sub_account_id)?, false),
            AccountMeta::new(drift::user_stats(&program, &owner)?, false),
            AccountMeta::new(
                drift::spot_market_vault(&program, position.spot_market_index)?,
                false,
            ),
            AccountMeta::new_readonly(drift_signer, false),
            AccountMeta::new(self.reserve_vault(&position.mint, token_program)?, false),
            AccountMeta::new_readonly(*token_program, false),
            AccountMeta::new_readonly(program, false),
        ];
        remaining.extend(spot_market_metas(spot_markets));
        // the program finds the mint after the market accounts
        remaining.push(AccountMeta::new_readonly(position.mint, false));

        self.pull(
            &self.drift_integration(position)?,
            &self.reserve_address(&position.mint)?,
            &PullArgs::Drift {
                market_index: position.spot_market_index,
                amount,
            },
            &remaining,
        )
    }

    /// Record the value of the Drift position against the reserve
    pub fn sync_drift(&self, position: &DriftParams) -> Result<Instruction> {
        let program = self.programs().drift;
        let owner = self.controller_authority();

        let remaining = [
            AccountMeta::new(
                drift::spot_market_vault(&program, position.spot_market_index)?,
                false,
            ),
            AccountMeta::new_readonly(
                drift::spot_market(&program, position.spot_market_index)?,
                false,
            ),
            AccountMeta::new_readonly(
                drift::user(&program, &owner, position.sub_account_id)?,
                false,
            ),
            AccountMeta::new_readonly(program, false),
        ];

        self.sync_integration(
            &self.drift_integration(position)?,
            &self.reserve_address(&position.mint)?,
            &remaining,
        )
    }
}
