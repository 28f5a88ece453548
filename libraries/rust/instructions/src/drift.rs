//! PDA derivation functions for the Drift program

use solana_sdk::pubkey::Pubkey;

use crate::{derive, Result};

pub mod seeds {
    pub const SIGNER: &[u8] = b"drift_signer";
    pub const STATE: &[u8] = b"drift_state";
    pub const USER_STATS: &[u8] = b"user_stats";
    pub const USER: &[u8] = b"user";
    pub const SPOT_MARKET: &[u8] = b"spot_market";
    pub const SPOT_MARKET_VAULT: &[u8] = b"spot_market_vault";
}

/// The program's signer PDA, with the nonce it signs with
pub fn signer(program: &Pubkey) -> Result<(Pubkey, u8)> {
    derive::find_address_with_bump(program, &[seeds::SIGNER])
}

pub fn state(program: &Pubkey) -> Result<Pubkey> {
    derive::address(program, &[seeds::STATE])
}

pub fn user_stats(program: &Pubkey, authority: &Pubkey) -> Result<Pubkey> {
    derive::address(program, &[seeds::USER_STATS, authority.as_ref()])
}

pub fn user(program: &Pubkey, authority: &Pubkey, sub_account_id: u16) -> Result<Pubkey> {
    derive::address(
        program,
        &[seeds::USER, authority.as_ref(), &sub_account_id.to_le_bytes()],
    )
}

pub fn spot_market(program: &Pubkey, market_index: u16) -> Result<Pubkey> {
    derive::address(program, &[seeds::SPOT_MARKET, &market_index.to_le_bytes()])
}

pub fn spot_market_vault(program: &Pubkey, market_index: u16) -> Result<Pubkey> {
    derive::address(
        program,
        &[seeds::SPOT_MARKET_VAULT, &market_index.to_le_bytes()],
    )
}
