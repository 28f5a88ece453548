use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use alm_program_common::{
    config::{IntegrationConfig, KaminoConfig, Padding},
    instruction::{InitializeArgs, PullArgs, PushArgs},
    IntegrationType,
};

use super::IntegrationParams;
use crate::{controller::ControllerIxBuilder, derive, kamino, Result};

/// A lending position in one Kamino reserve, held through a vanilla
/// obligation of the controller authority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KaminoParams {
    pub market: Pubkey,
    pub reserve: Pubkey,
    pub reserve_liquidity_mint: Pubkey,
    /// `Pubkey::default()` when the reserve has no collateral farm
    pub reserve_farm_collateral: Pubkey,
    /// `Pubkey::default()` when the reserve has no debt farm
    pub reserve_farm_debt: Pubkey,
    pub obligation_id: u8,
    /// Referrer recorded in the user metadata on creation
    pub referrer: Option<Pubkey>,
}

/// Accounts needed to claim farm rewards while syncing a Kamino integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KaminoRewardHarvest {
    pub rewards_mint: Pubkey,
    pub rewards_token_program: Pubkey,
    pub global_config: Pubkey,
    pub scope_prices: Pubkey,
}

impl ControllerIxBuilder {
    pub fn kamino_config(&self, position: &KaminoParams) -> Result<KaminoConfig> {
        let obligation = kamino::vanilla_obligation(
            &self.programs().kamino_lend,
            position.obligation_id,
            &self.controller_authority(),
            &position.market,
        )?;

        Ok(KaminoConfig {
            market: position.market,
            reserve: position.reserve,
            reserve_farm_collateral: position.reserve_farm_collateral,
            reserve_farm_debt: position.reserve_farm_debt,
            reserve_liquidity_mint: position.reserve_liquidity_mint,
            obligation,
            obligation_id: position.obligation_id,
            padding: Padding::zeroed(),
        })
    }

    /// Create a Kamino integration, with its obligation and user metadata
    pub fn initialize_kamino(
        &self,
        params: &IntegrationParams,
        position: &KaminoParams,
    ) -> Result<Instruction> {
        let programs = *self.programs();
        let config = self.kamino_config(position)?;

        let remaining = vec![
            AccountMeta::new(config.obligation, false),
            AccountMeta::new_readonly(config.reserve_liquidity_mint, false),
            AccountMeta::new(
                kamino::user_metadata(&programs.kamino_lend, &self.controller_authority())?,
                false,
            ),
            AccountMeta::new_readonly(position.referrer.unwrap_or(programs.kamino_lend), false),
            AccountMeta::new(
                kamino::farms::obligation_farm(
                    &programs.kamino_farms,
                    &config.reserve_farm_collateral,
                    &config.obligation,
                )?,
                false,
            ),
            AccountMeta::new(config.reserve, false),
            AccountMeta::new(config.reserve_farm_collateral, false),
            AccountMeta::new_readonly(
                kamino::lending_market_authority(&programs.kamino_lend, &config.market)?,
                false,
            ),
            AccountMeta::new_readonly(config.market, false),
            AccountMeta::new_readonly(programs.kamino_lend, false),
            AccountMeta::new_readonly(programs.kamino_farms, false),
            AccountMeta::new_readonly(programs.system, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ];

        self.initialize_integration(
            IntegrationType::Kamino,
            &IntegrationConfig::Kamino(config),
            params,
            InitializeArgs::KaminoIntegration {
                obligation_id: position.obligation_id,
            },
            remaining,
        )
    }

    /// Accounts shared by deposits into and withdrawals from the reserve
    fn kamino_transfer_accounts(
        &self,
        config: &KaminoConfig,
        liquidity_token_program: &Pubkey,
    ) -> Result<Vec<AccountMeta>> {
        let programs = *self.programs();
        let mint = config.reserve_liquidity_mint;

        // no collateral farm is passed as the lending program id
        let obligation_farm = if config.reserve_farm_collateral == Pubkey::default() {
            programs.kamino_lend
        } else {
            kamino::farms::obligation_farm(
                &programs.kamino_farms,
                &config.reserve_farm_collateral,
                &config.obligation,
            )?
        };

        Ok(vec![
            AccountMeta::new(self.reserve_vault(&mint, liquidity_token_program)?, false),
            AccountMeta::new(config.obligation, false),
            AccountMeta::new(config.reserve, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new(
                kamino::reserve_liquidity_supply(&programs.kamino_lend, &config.market, &mint)?,
                false,
            ),
            AccountMeta::new(
                kamino::reserve_collateral_mint(&programs.kamino_lend, &config.market, &mint)?,
                false,
            ),
            AccountMeta::new(
                kamino::reserve_collateral_supply(&programs.kamino_lend, &config.market, &mint)?,
                false,
            ),
            AccountMeta::new_readonly(
                kamino::lending_market_authority(&programs.kamino_lend, &config.market)?,
                false,
            ),
            AccountMeta::new_readonly(config.market, false),
            // collateral token program
            AccountMeta::new_readonly(programs.token, false),
            AccountMeta::new_readonly(*liquidity_token_program, false),
            AccountMeta::new_readonly(sysvar::instructions::ID, false),
            AccountMeta::new(obligation_farm, false),
            AccountMeta::new(config.reserve_farm_collateral, false),
            AccountMeta::new_readonly(programs.kamino_farms, false),
            AccountMeta::new_readonly(programs.kamino_lend, false),
        ])
    }

    /// Deposit `amount` of the reserve's liquidity mint into Kamino
    pub fn push_kamino(
        &self,
        position: &KaminoParams,
        liquidity_token_program: &Pubkey,
        amount: u64,
    ) -> Result<Instruction> {
        let config = self.kamino_config(position)?;
        let mut remaining = self.kamino_transfer_accounts(&config, liquidity_token_program)?;

        // recreates the obligation if a full withdrawal closed it
        remaining.extend([
            AccountMeta::new(self.controller_authority(), false),
            AccountMeta::new_readonly(
                kamino::user_metadata(&self.programs().kamino_lend, &self.controller_authority())?,
                false,
            ),
            AccountMeta::new_readonly(self.programs().system, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ]);

        self.push(
            &self.integration_address(&IntegrationConfig::Kamino(config))?,
            &self.reserve_address(&config.reserve_liquidity_mint)?,
            &PushArgs::Kamino { amount },
            &remaining,
        )
    }

    /// Withdraw `amount` of liquidity from Kamino back into the reserve
    pub fn pull_kamino(
        &self,
        position: &KaminoParams,
        liquidity_token_program: &Pubkey,
        amount: u64,
    ) -> Result<Instruction> {
        let config = self.kamino_config(position)?;
        let remaining = self.kamino_transfer_accounts(&config, liquidity_token_program)?;

        self.pull(
            &self.integration_address(&IntegrationConfig::Kamino(config))?,
            &self.reserve_address(&config.reserve_liquidity_mint)?,
            &PullArgs::Kamino { amount },
            &remaining,
        )
    }

    /// Record the value of the Kamino position, optionally claiming farm rewards
    pub fn sync_kamino(
        &self,
        position: &KaminoParams,
        liquidity_token_program: &Pubkey,
        harvest: Option<&KaminoRewardHarvest>,
    ) -> Result<Instruction> {
        let programs = *self.programs();
        let config = self.kamino_config(position)?;
        let mint = config.reserve_liquidity_mint;

        let mut remaining = vec![
            AccountMeta::new(self.reserve_vault(&mint, liquidity_token_program)?, false),
            AccountMeta::new_readonly(config.reserve, false),
            AccountMeta::new_readonly(config.obligation, false),
        ];

        if let Some(harvest) = harvest {
            let farm = config.reserve_farm_collateral;
            let rewards_token_program = self.token_program(&harvest.rewards_token_program)?;
            let rewards_account = derive::associated_token(
                &programs.associated_token,
                &self.controller_authority(),
                &harvest.rewards_mint,
                &rewards_token_program,
            )?;

            remaining.extend([
                AccountMeta::new(
                    kamino::farms::obligation_farm(
                        &programs.kamino_farms,
                        &farm,
                        &config.obligation,
                    )?,
                    false,
                ),
                AccountMeta::new(farm, false),
                AccountMeta::new(
                    kamino::farms::rewards_vault(
                        &programs.kamino_farms,
                        &farm,
                        &harvest.rewards_mint,
                    )?,
                    false,
                ),
                AccountMeta::new(
                    kamino::farms::rewards_treasury_vault(
                        &programs.kamino_farms,
                        &harvest.global_config,
                        &harvest.rewards_mint,
                    )?,
                    false,
                ),
                AccountMeta::new_readonly(
                    kamino::farms::farm_vaults_authority(&programs.kamino_farms, &farm)?,
                    false,
                ),
                AccountMeta::new_readonly(harvest.global_config, false),
                AccountMeta::new(rewards_account, false),
                AccountMeta::new_readonly(harvest.rewards_mint, false),
                AccountMeta::new_readonly(harvest.scope_prices, false),
                AccountMeta::new_readonly(rewards_token_program, false),
                AccountMeta::new_readonly(programs.kamino_farms, false),
                AccountMeta::new_readonly(programs.system, false),
                AccountMeta::new_readonly(programs.associated_token, false),
            ]);
        }

        self.sync_integration(
            &self.integration_address(&IntegrationConfig::Kamino(config))?,
            &self.reserve_address(&mint)?,
            &remaining,
        )
    }
}
