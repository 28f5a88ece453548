use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use alm_program_common::{
    config::{IntegrationConfig, Padding, SplTokenExternalConfig},
    instruction::{InitializeArgs, PushArgs},
    IntegrationType,
};

use super::IntegrationParams;
use crate::{controller::ControllerIxBuilder, derive, Result};

/// A fixed external wallet that reserve funds can be transferred to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplTokenExternalParams {
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub token_program: Pubkey,
    /// The recipient's token account funds are paid into, its associated
    /// token account when `None`
    pub token_account: Option<Pubkey>,
}

impl ControllerIxBuilder {
    pub fn spl_token_external_config(
        &self,
        external: &SplTokenExternalParams,
    ) -> Result<SplTokenExternalConfig> {
        let token_program = self.token_program(&external.token_program)?;
        let token_account = match external.token_account {
            Some(account) => account,
            None => derive::associated_token(
                &self.programs().associated_token,
                &external.recipient,
                &external.mint,
                &token_program,
            )?,
        };

        Ok(SplTokenExternalConfig {
            program: token_program,
            mint: external.mint,
            recipient: external.recipient,
            token_account,
            padding: Padding::zeroed(),
        })
    }

    pub fn initialize_spl_token_external(
        &self,
        params: &IntegrationParams,
        external: &SplTokenExternalParams,
    ) -> Result<Instruction> {
        let config = self.spl_token_external_config(external)?;

        let remaining = vec![
            AccountMeta::new_readonly(config.mint, false),
            AccountMeta::new_readonly(config.recipient, false),
            AccountMeta::new(config.token_account, false),
            AccountMeta::new_readonly(config.program, false),
            AccountMeta::new_readonly(self.programs().associated_token, false),
        ];

        self.initialize_integration(
            IntegrationType::SplTokenExternal,
            &IntegrationConfig::SplTokenExternal(config),
            params,
            InitializeArgs::SplTokenExternal,
            remaining,
        )
    }

    /// Transfer `amount` from the mint's reserve to the external token account
    pub fn push_spl_token_external(
        &self,
        external: &SplTokenExternalParams,
        amount: u64,
    ) -> Result<Instruction> {
        let config = self.spl_token_external_config(external)?;
        let integration =
            self.integration_address(&IntegrationConfig::SplTokenExternal(config))?;
        let reserve = self.reserve_address(&config.mint)?;
        let vault = self.reserve_vault(&config.mint, &config.program)?;

        let remaining = [
            AccountMeta::new_readonly(config.mint, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(config.recipient, false),
            AccountMeta::new(config.token_account, false),
            AccountMeta::new_readonly(config.program, false),
            AccountMeta::new_readonly(self.programs().associated_token, false),
            AccountMeta::new_readonly(self.programs().system, false),
        ];

        self.push(
            &integration,
            &reserve,
            &PushArgs::SplTokenExternal { amount },
            &remaining,
        )
    }
}
