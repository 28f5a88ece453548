//! PDA derivation functions for the controller program

use solana_sdk::pubkey::Pubkey;

use alm_program_common::seeds::{self, Seeds};

use crate::error::{AlmIxError, Result};

/// Find the address and bump for a list of seeds.
///
/// The search runs from bump 255 downward and takes the first candidate off
/// the curve. Running out of bumps is reported, never retried.
pub fn find_address(program: &Pubkey, seeds: &Seeds) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&seeds.as_slices(), program)
        .ok_or(AlmIxError::DerivationExhausted { program: *program })
}

/// Validate raw seeds and return the address and bump
pub fn find_address_with_bump(program: &Pubkey, seeds: &[&[u8]]) -> Result<(Pubkey, u8)> {
    find_address(program, &Seeds::new(seeds)?)
}

pub(crate) fn address(program: &Pubkey, seeds: &[&[u8]]) -> Result<Pubkey> {
    Ok(find_address_with_bump(program, seeds)?.0)
}

pub fn controller(program: &Pubkey, id: u16) -> Result<Pubkey> {
    address(program, &[seeds::CONTROLLER, &id.to_le_bytes()])
}

/// The PDA that signs for, and owns the token accounts of, a controller
pub fn controller_authority(program: &Pubkey, controller: &Pubkey) -> Result<Pubkey> {
    address(program, &[seeds::CONTROLLER_AUTHORITY, controller.as_ref()])
}

pub fn permission(program: &Pubkey, controller: &Pubkey, authority: &Pubkey) -> Result<Pubkey> {
    address(
        program,
        &[seeds::PERMISSION, controller.as_ref(), authority.as_ref()],
    )
}

pub fn reserve(program: &Pubkey, controller: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    address(program, &[seeds::RESERVE, controller.as_ref(), mint.as_ref()])
}

/// An integration is addressed by the hash of its config
pub fn integration(program: &Pubkey, controller: &Pubkey, config_hash: &[u8; 32]) -> Result<Pubkey> {
    address(
        program,
        &[seeds::INTEGRATION, controller.as_ref(), config_hash],
    )
}

/// Oracles are not scoped to a controller, the creator picks a unique nonce
pub fn oracle(program: &Pubkey, nonce: &Pubkey) -> Result<Pubkey> {
    address(program, &[seeds::ORACLE, nonce.as_ref()])
}

/// The associated token account of `owner` for `mint` under an explicit token program
pub fn associated_token(
    associated_token_program: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<Pubkey> {
    address(
        associated_token_program,
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
    )
}
