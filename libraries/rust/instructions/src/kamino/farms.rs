//! PDA derivation functions for the Kamino Farms program

use solana_sdk::pubkey::Pubkey;

use crate::{derive, Result};

pub mod seeds {
    pub const USER: &[u8] = b"user";
    pub const REWARDS_VAULT: &[u8] = b"rvault";
    pub const REWARDS_TREASURY_VAULT: &[u8] = b"tvault";
    pub const AUTHORITY: &[u8] = b"authority";
}

/// The farm account staking an obligation's position in a reserve farm
pub fn obligation_farm(program: &Pubkey, farm: &Pubkey, obligation: &Pubkey) -> Result<Pubkey> {
    derive::address(program, &[seeds::USER, farm.as_ref(), obligation.as_ref()])
}

pub fn rewards_vault(program: &Pubkey, farm: &Pubkey, reward_mint: &Pubkey) -> Result<Pubkey> {
    derive::address(
        program,
        &[seeds::REWARDS_VAULT, farm.as_ref(), reward_mint.as_ref()],
    )
}

pub fn rewards_treasury_vault(
    program: &Pubkey,
    global_config: &Pubkey,
    reward_mint: &Pubkey,
) -> Result<Pubkey> {
    derive::address(
        program,
        &[
            seeds::REWARDS_TREASURY_VAULT,
            global_config.as_ref(),
            reward_mint.as_ref(),
        ],
    )
}

/// Owner of a farm's vaults
pub fn farm_vaults_authority(program: &Pubkey, farm: &Pubkey) -> Result<Pubkey> {
    derive::address(program, &[seeds::AUTHORITY, farm.as_ref()])
}

/// Owner of the treasury vaults of a global config
pub fn treasury_vault_authority(program: &Pubkey, global_config: &Pubkey) -> Result<Pubkey> {
    derive::address(program, &[seeds::AUTHORITY, global_config.as_ref()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alm_program_common::programs::KAMINO_FARMS;

    #[test]
    fn vault_kinds_do_not_collide() {
        let farm = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        assert_ne!(
            rewards_vault(&KAMINO_FARMS, &farm, &mint).unwrap(),
            rewards_treasury_vault(&KAMINO_FARMS, &farm, &mint).unwrap()
        );
    }

    #[test]
    fn authorities_share_a_seed_scheme() {
        let key = Pubkey::new_unique();

        assert_eq!(
            farm_vaults_authority(&KAMINO_FARMS, &key).unwrap(),
            treasury_vault_authority(&KAMINO_FARMS, &key).unwrap()
        );
    }
}
