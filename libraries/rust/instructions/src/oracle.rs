use anchor_lang::ToAccountMetas;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use alm_program_common::{
    accounts,
    instruction::{FeedArgs, InitializeOracleArgs, InstructionData, RefreshOracleArgs, UpdateOracleArgs},
};

use crate::{controller::ControllerIxBuilder, derive, Result};

impl ControllerIxBuilder {
    /// Create the oracle for `nonce`, paid for by the builder's authority
    pub fn initialize_oracle(
        &self,
        oracle_type: u8,
        nonce: &Pubkey,
        price_feed: &Pubkey,
        base_mint: &Pubkey,
        quote_mint: &Pubkey,
    ) -> Result<Instruction> {
        let oracle = derive::oracle(&self.programs().controller, nonce)?;
        log::debug!("oracle for nonce {nonce} is {oracle}");

        let accounts = accounts::InitializeOracle {
            payer: self.authority(),
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            price_feed: *price_feed,
            oracle,
            system_program: self.programs().system,
        };

        self.instruction(
            accounts,
            &InitializeOracleArgs {
                oracle_type,
                nonce: *nonce,
                base_mint: *base_mint,
                quote_mint: *quote_mint,
            },
        )
    }

    /// Point the oracle at a new feed and/or hand it to a new authority.
    ///
    /// A new authority has to sign the transaction as well.
    pub fn update_oracle(
        &self,
        oracle: &Pubkey,
        price_feed: &Pubkey,
        feed_args: Option<FeedArgs>,
        new_authority: Option<Pubkey>,
    ) -> Result<Instruction> {
        let accounts = accounts::UpdateOracle {
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            price_feed: *price_feed,
            oracle: *oracle,
            new_authority,
            program_id: self.programs().controller,
        };

        self.instruction(accounts, &UpdateOracleArgs { feed_args })
    }

    pub fn refresh_oracle(&self, oracle: &Pubkey, price_feed: &Pubkey) -> Result<Instruction> {
        refresh_oracle(&self.programs().controller, oracle, price_feed)
    }
}

/// Pull the latest price from the feed into the oracle. Requires no signer.
pub fn refresh_oracle(program: &Pubkey, oracle: &Pubkey, price_feed: &Pubkey) -> Result<Instruction> {
    let accounts = accounts::RefreshOracle {
        price_feed: *price_feed,
        oracle: *oracle,
    };

    Ok(Instruction {
        program_id: *program,
        accounts: accounts.to_account_metas(None),
        data: RefreshOracleArgs {}.data()?,
    })
}
