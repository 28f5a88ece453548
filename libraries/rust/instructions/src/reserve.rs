use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use alm_program_common::{
    accounts,
    instruction::{InitializeReserveArgs, ManageReserveArgs, SyncReserveArgs},
    FieldUpdate, RateLimit, ReserveStatus, UNLIMITED_OUTFLOW,
};

use crate::{controller::ControllerIxBuilder, derive, error::AlmIxError, Result};

/// Changes to apply to an existing reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReserveUpdate {
    pub status: FieldUpdate<ReserveStatus>,
    pub rate_limit_slope: FieldUpdate<u64>,
    /// Clearing removes the cap
    pub rate_limit_max_outflow: FieldUpdate<u64>,
}

impl ReserveUpdate {
    fn into_args(self) -> Result<ManageReserveArgs> {
        Ok(ManageReserveArgs {
            status: uncleared("status", self.status)?,
            rate_limit_slope: uncleared("rate_limit_slope", self.rate_limit_slope)?,
            rate_limit_max_outflow: max_outflow(self.rate_limit_max_outflow),
        })
    }
}

/// Resolve an update for a field that has no empty value
pub(crate) fn uncleared<T>(field: &'static str, update: FieldUpdate<T>) -> Result<Option<T>> {
    match update {
        FieldUpdate::Unchanged => Ok(None),
        FieldUpdate::Set(value) => Ok(Some(value)),
        FieldUpdate::Cleared => {
            log::warn!("rejecting attempt to clear `{field}`");
            Err(AlmIxError::InvalidClear { field })
        }
    }
}

pub(crate) fn max_outflow(update: FieldUpdate<u64>) -> Option<u64> {
    match update {
        FieldUpdate::Unchanged => None,
        FieldUpdate::Cleared => Some(UNLIMITED_OUTFLOW),
        FieldUpdate::Set(value) => Some(value),
    }
}

impl ControllerIxBuilder {
    /// The reserve account of the mint
    pub fn reserve_address(&self, mint: &Pubkey) -> Result<Pubkey> {
        derive::reserve(&self.programs().controller, &self.controller(), mint)
    }

    /// The token account holding the reserve's funds
    pub fn reserve_vault(&self, mint: &Pubkey, token_program: &Pubkey) -> Result<Pubkey> {
        derive::associated_token(
            &self.programs().associated_token,
            &self.controller_authority(),
            mint,
            &self.token_program(token_program)?,
        )
    }

    /// Create the reserve and vault for a mint
    pub fn initialize_reserve(
        &self,
        mint: &Pubkey,
        token_program: &Pubkey,
        status: ReserveStatus,
        rate_limit: RateLimit,
    ) -> Result<Instruction> {
        let reserve = self.reserve_address(mint)?;
        let vault = self.reserve_vault(mint, token_program)?;
        log::debug!("reserve for {mint} is {reserve}, vault {vault}");

        let accounts = accounts::InitializeReserve {
            payer: self.payer(),
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            permission: self.permission(),
            reserve,
            mint: *mint,
            vault,
            token_program: *token_program,
            associated_token_program: self.programs().associated_token,
            program_id: self.programs().controller,
            system_program: self.programs().system,
        };

        self.instruction(
            accounts,
            &InitializeReserveArgs {
                status,
                rate_limit_slope: rate_limit.slope,
                rate_limit_max_outflow: rate_limit.max_outflow,
            },
        )
    }

    pub fn manage_reserve(&self, mint: &Pubkey, update: ReserveUpdate) -> Result<Instruction> {
        let accounts = accounts::ManageReserve {
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            authority: self.authority(),
            permission: self.permission(),
            reserve: self.reserve_address(mint)?,
            program_id: self.programs().controller,
        };

        self.instruction(accounts, &update.into_args()?)
    }

    /// Record the current vault balance in the reserve
    pub fn sync_reserve(&self, mint: &Pubkey, token_program: &Pubkey) -> Result<Instruction> {
        let accounts = accounts::SyncReserve {
            controller: self.controller(),
            controller_authority: self.controller_authority(),
            reserve: self.reserve_address(mint)?,
            vault: self.reserve_vault(mint, token_program)?,
        };

        self.instruction(accounts, &SyncReserveArgs {})
    }
}
