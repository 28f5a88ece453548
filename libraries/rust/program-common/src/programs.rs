use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::{pubkey, pubkey::Pubkey};

pub const ALM_CONTROLLER_MAINNET: Pubkey = pubkey!("ALM1JSnEhc5PkNecbSZotgprBuJujL5objTbwGtpTgTd");

pub const SPL_TOKEN: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const SPL_TOKEN_2022: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");
pub const ASSOCIATED_TOKEN: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const SYSTEM: Pubkey = pubkey!("11111111111111111111111111111111");

pub const KAMINO_LEND: Pubkey = pubkey!("KLend2g3cP87fffoy8q1mQqGKjrxjC8boSyAYavgmjD");
pub const KAMINO_FARMS: Pubkey = pubkey!("FarmsPZpWu9i7Kky8tPN37rs2TpmMrAZrC7S7vJa91Hr");
pub const DRIFT: Pubkey = pubkey!("dRiftyHA39MWEi3m9aunc5MzRF1JYuBsbn6VPcn33UH");

/// The set of program addresses an instruction builder targets.
///
/// Builders never read the constants above directly, so a client can point
/// at a staging deployment of the controller (or a forked lending market) by
/// constructing a different set. [ProgramIds::default] is the mainnet set.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramIds {
    /// The controller program
    #[serde_as(as = "DisplayFromStr")]
    pub controller: Pubkey,

    /// The SPL token program
    #[serde_as(as = "DisplayFromStr")]
    pub token: Pubkey,

    /// The token-2022 (token extensions) program
    #[serde_as(as = "DisplayFromStr")]
    pub token_2022: Pubkey,

    /// The associated token account program
    #[serde_as(as = "DisplayFromStr")]
    pub associated_token: Pubkey,

    #[serde_as(as = "DisplayFromStr")]
    pub system: Pubkey,

    /// The Kamino lending market program
    #[serde_as(as = "DisplayFromStr")]
    pub kamino_lend: Pubkey,

    /// The Kamino farms (reward) program
    #[serde_as(as = "DisplayFromStr")]
    pub kamino_farms: Pubkey,

    /// The Drift perpetuals/spot program
    #[serde_as(as = "DisplayFromStr")]
    pub drift: Pubkey,
}

impl ProgramIds {
    /// The program addresses of the public mainnet deployments
    pub const fn mainnet() -> Self {
        Self {
            controller: ALM_CONTROLLER_MAINNET,
            token: SPL_TOKEN,
            token_2022: SPL_TOKEN_2022,
            associated_token: ASSOCIATED_TOKEN,
            system: SYSTEM,
            kamino_lend: KAMINO_LEND,
            kamino_farms: KAMINO_FARMS,
            drift: DRIFT,
        }
    }

    /// Same set of programs, but targeting a different controller deployment
    pub fn with_controller(self, controller: Pubkey) -> Self {
        Self { controller, ..self }
    }

    /// True if the address is one of the two known token programs
    pub fn is_token_program(&self, program: &Pubkey) -> bool {
        *program == self.token || *program == self.token_2022
    }
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self::mainnet()
    }
}
