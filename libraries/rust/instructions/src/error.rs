use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use alm_program_common::WireError;

#[derive(Debug, Error)]
pub enum AlmIxError {
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("no valid bump seed found for an address of program {program}")]
    DerivationExhausted { program: Pubkey },

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("{program} is neither the token program nor the token-2022 program")]
    UnknownTokenProgram { program: Pubkey },

    #[error("field `{field}` cannot be cleared")]
    InvalidClear { field: &'static str },

    #[error("the controller id is unknown, build from an id to initialize a controller")]
    MissingControllerId,
}

pub type Result<T> = std::result::Result<T, AlmIxError>;
