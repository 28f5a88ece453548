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

//! Kamino Lend instructions and addresses used alongside controller integrations

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::{controller::ControllerIxBuilder, derive, error::AlmIxError, Result};

pub mod farms;

/// Instruction discriminators of the Kamino Lend program.
///
/// Kamino Lend is an Anchor program, each value is the first 8 bytes of
/// `sha256("global:<instruction name>")`.
pub mod discriminator {
    /// `global:refresh_reserve`
    pub const REFRESH_RESERVE: [u8; 8] = [2, 218, 138, 235, 79, 201, 25, 102];
    /// `global:refresh_obligation`
    pub const REFRESH_OBLIGATION: [u8; 8] = [33, 132, 147, 228, 151, 192, 72, 89];
}

pub mod seeds {
    pub const RESERVE_LIQUIDITY_SUPPLY: &[u8] = b"reserve_liq_supply";
    pub const RESERVE_COLLATERAL_MINT: &[u8] = b"reserve_coll_mint";
    pub const RESERVE_COLLATERAL_SUPPLY: &[u8] = b"reserve_coll_supply";
    pub const LENDING_MARKET_AUTHORITY: &[u8] = b"lma";
    pub const USER_METADATA: &[u8] = b"user_meta";
}

/// Deposits an obligation can hold
pub const MAX_OBLIGATION_DEPOSITS: usize = 8;

/// Borrows an obligation can hold
pub const MAX_OBLIGATION_BORROWS: usize = 5;

/// Most reserves a single obligation refresh can reference
pub const MAX_OBLIGATION_RESERVES: usize = MAX_OBLIGATION_DEPOSITS + MAX_OBLIGATION_BORROWS;

/// Tag of an obligation that is not tied to a leverage or multiply position
const VANILLA_OBLIGATION_TAG: u8 = 0;

/// A plain lending obligation of `owner` in `market`
pub fn vanilla_obligation(
    program: &Pubkey,
    obligation_id: u8,
    owner: &Pubkey,
    market: &Pubkey,
) -> Result<Pubkey> {
    derive::address(
        program,
        &[
            &[VANILLA_OBLIGATION_TAG],
            &[obligation_id],
            owner.as_ref(),
            market.as_ref(),
            Pubkey::default().as_ref(),
            Pubkey::default().as_ref(),
        ],
    )
}

pub fn reserve_liquidity_supply(program: &Pubkey, market: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    derive::address(
        program,
        &[seeds::RESERVE_LIQUIDITY_SUPPLY, market.as_ref(), mint.as_ref()],
    )
}

pub fn reserve_collateral_mint(program: &Pubkey, market: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    derive::address(
        program,
        &[seeds::RESERVE_COLLATERAL_MINT, market.as_ref(), mint.as_ref()],
    )
}

pub fn reserve_collateral_supply(
    program: &Pubkey,
    market: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey> {
    derive::address(
        program,
        &[seeds::RESERVE_COLLATERAL_SUPPLY, market.as_ref(), mint.as_ref()],
    )
}

pub fn lending_market_authority(program: &Pubkey, market: &Pubkey) -> Result<Pubkey> {
    derive::address(program, &[seeds::LENDING_MARKET_AUTHORITY, market.as_ref()])
}

pub fn user_metadata(program: &Pubkey, owner: &Pubkey) -> Result<Pubkey> {
    derive::address(program, &[seeds::USER_METADATA, owner.as_ref()])
}

/// Update a reserve's prices and accrued interest.
///
/// Only the scope price feed is supported; the pyth and switchboard slots
/// are filled with the program id, which Kamino reads as "not provided".
pub fn refresh_reserve(
    program: &Pubkey,
    reserve: &Pubkey,
    market: &Pubkey,
    scope_prices: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program,
        accounts: vec![
            AccountMeta::new(*reserve, false),
            AccountMeta::new_readonly(*market, false),
            // pyth
            AccountMeta::new_readonly(*program, false),
            // switchboard price
            AccountMeta::new_readonly(*program, false),
            // switchboard twap
            AccountMeta::new_readonly(*program, false),
            AccountMeta::new_readonly(*scope_prices, false),
        ],
        data: discriminator::REFRESH_RESERVE.to_vec(),
    }
}

/// Update an obligation's value from its reserves.
///
/// `reserves` must list every reserve the obligation holds, deposits first,
/// each refreshed earlier in the same transaction.
pub fn refresh_obligation(
    program: &Pubkey,
    market: &Pubkey,
    obligation: &Pubkey,
    reserves: &[Pubkey],
) -> Result<Instruction> {
    if reserves.len() > MAX_OBLIGATION_RESERVES {
        log::warn!(
            "obligation {obligation} refresh given {} reserves",
            reserves.len()
        );
        return Err(AlmIxError::Unsupported(format!(
            "an obligation references at most {MAX_OBLIGATION_RESERVES} reserves, got {}",
            reserves.len()
        )));
    }

    let mut accounts = vec![
        AccountMeta::new_readonly(*market, false),
        AccountMeta::new(*obligation, false),
    ];
    accounts.extend(reserves.iter().map(|r| AccountMeta::new(*r, false)));

    Ok(Instruction {
        program_id: *program,
        accounts,
        data: discriminator::REFRESH_OBLIGATION.to_vec(),
    })
}

impl ControllerIxBuilder {
    /// [refresh_reserve] against the configured Kamino Lend program
    pub fn refresh_kamino_reserve(
        &self,
        reserve: &Pubkey,
        market: &Pubkey,
        scope_prices: &Pubkey,
    ) -> Instruction {
        refresh_reserve(&self.programs().kamino_lend, reserve, market, scope_prices)
    }

    /// [refresh_obligation] against the configured Kamino Lend program
    pub fn refresh_kamino_obligation(
        &self,
        market: &Pubkey,
        obligation: &Pubkey,
        reserves: &[Pubkey],
    ) -> Result<Instruction> {
        refresh_obligation(&self.programs().kamino_lend, market, obligation, reserves)
    }
}
