//! Instruction payloads of the controller program.
//!
//! Every payload is a single discriminator byte followed by the borsh encoding
//! of the instruction's arguments.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::{
    error::Result,
    types::{
        ControllerStatus, Description, IntegrationStatus, IntegrationType, PermissionStatus,
        ReserveStatus,
    },
};

/// Discriminator bytes, in program order
pub mod discriminator {
    pub const EMIT_EVENT: u8 = 0;
    pub const INITIALIZE_CONTROLLER: u8 = 1;
    pub const MANAGE_CONTROLLER: u8 = 2;
    pub const MANAGE_PERMISSION: u8 = 3;
    pub const INITIALIZE_RESERVE: u8 = 4;
    pub const MANAGE_RESERVE: u8 = 5;
    pub const INITIALIZE_INTEGRATION: u8 = 6;
    pub const MANAGE_INTEGRATION: u8 = 7;
    pub const SYNC_RESERVE: u8 = 8;
    pub const SYNC: u8 = 9;
    pub const PUSH: u8 = 10;
    pub const PULL: u8 = 11;
    pub const INITIALIZE_ORACLE: u8 = 12;
    pub const UPDATE_ORACLE: u8 = 13;
    pub const REFRESH_ORACLE: u8 = 14;
    pub const ATOMIC_SWAP_BORROW: u8 = 15;
    pub const ATOMIC_SWAP_REPAY: u8 = 16;
    pub const RESET_LZ_PUSH_IN_FLIGHT: u8 = 17;
    pub const CLAIM_RENT: u8 = 18;
}

/// Arguments of a controller instruction, encodable into its payload
pub trait InstructionData: BorshSerialize {
    const DISCRIMINATOR: u8;

    fn data(&self) -> Result<Vec<u8>> {
        let mut data = vec![Self::DISCRIMINATOR];
        self.serialize(&mut data)?;
        Ok(data)
    }
}

macro_rules! instruction_data {
    ($($args:ty => $disc:ident),* $(,)?) => {
        $(
            impl InstructionData for $args {
                const DISCRIMINATOR: u8 = discriminator::$disc;
            }
        )*
    };
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitializeControllerArgs {
    pub id: u16,
    pub status: ControllerStatus,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManageControllerArgs {
    pub status: ControllerStatus,
}

/// The capabilities granted by a permission account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionFlags {
    pub can_manage_permissions: bool,
    pub can_invoke_external_transfer: bool,
    pub can_execute_swap: bool,
    pub can_reallocate: bool,
    pub can_freeze_controller: bool,
    pub can_unfreeze_controller: bool,
    pub can_manage_reserves_and_integrations: bool,
    pub can_suspend_permissions: bool,
    pub can_liquidate: bool,
}

impl PermissionFlags {
    /// Every capability granted
    pub const fn all() -> Self {
        Self {
            can_manage_permissions: true,
            can_invoke_external_transfer: true,
            can_execute_swap: true,
            can_reallocate: true,
            can_freeze_controller: true,
            can_unfreeze_controller: true,
            can_manage_reserves_and_integrations: true,
            can_suspend_permissions: true,
            can_liquidate: true,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManagePermissionArgs {
    pub status: PermissionStatus,
    pub can_manage_permissions: bool,
    pub can_invoke_external_transfer: bool,
    pub can_execute_swap: bool,
    pub can_reallocate: bool,
    pub can_freeze_controller: bool,
    pub can_unfreeze_controller: bool,
    pub can_manage_reserves_and_integrations: bool,
    pub can_suspend_permissions: bool,
    pub can_liquidate: bool,
}

impl ManagePermissionArgs {
    pub fn new(status: PermissionStatus, flags: PermissionFlags) -> Self {
        Self {
            status,
            can_manage_permissions: flags.can_manage_permissions,
            can_invoke_external_transfer: flags.can_invoke_external_transfer,
            can_execute_swap: flags.can_execute_swap,
            can_reallocate: flags.can_reallocate,
            can_freeze_controller: flags.can_freeze_controller,
            can_unfreeze_controller: flags.can_unfreeze_controller,
            can_manage_reserves_and_integrations: flags.can_manage_reserves_and_integrations,
            can_suspend_permissions: flags.can_suspend_permissions,
            can_liquidate: flags.can_liquidate,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitializeReserveArgs {
    pub status: ReserveStatus,
    pub rate_limit_slope: u64,
    pub rate_limit_max_outflow: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ManageReserveArgs {
    pub status: Option<ReserveStatus>,
    pub rate_limit_slope: Option<u64>,
    pub rate_limit_max_outflow: Option<u64>,
}

/// Integration specific arguments of initialize-integration
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum InitializeArgs {
    SplTokenExternal,
    CctpBridge {
        destination_address: Pubkey,
        destination_domain: u32,
    },
    LzBridge {
        destination_address: Pubkey,
        destination_eid: u32,
    },
    AtomicSwap {
        max_slippage_bps: u16,
        max_staleness: u64,
        expiry_timestamp: i64,
        oracle_price_inverted: bool,
    },
    Drift {
        sub_account_id: u16,
        spot_market_index: u16,
    },
    KaminoIntegration {
        obligation_id: u8,
    },
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitializeIntegrationArgs {
    pub integration_type: IntegrationType,
    pub status: IntegrationStatus,
    pub description: Description,
    pub rate_limit_slope: u64,
    pub rate_limit_max_outflow: u64,
    pub permit_liquidation: bool,
    pub inner_args: InitializeArgs,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ManageIntegrationArgs {
    pub status: Option<IntegrationStatus>,
    pub description: Option<Description>,
    pub rate_limit_slope: Option<u64>,
    pub rate_limit_max_outflow: Option<u64>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReserveArgs {}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncIntegrationArgs {}

/// Integration specific arguments of push, moving funds out of a reserve.
///
/// Variant order is the wire tag.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum PushArgs {
    SplTokenExternal {
        amount: u64,
    },
    CctpBridge {
        amount: u64,
    },
    LzBridge {
        amount: u64,
    },
    Drift {
        market_index: u16,
        amount: u64,
        reduce_only: bool,
    },
    Kamino {
        amount: u64,
    },
}

/// Integration specific arguments of pull, returning funds to a reserve.
///
/// Variant order is the wire tag. Only the lending integrations can be pulled from.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum PullArgs {
    SplTokenExternal,
    CctpBridge,
    LzBridge,
    Kamino { amount: u64 },
    Drift { market_index: u16, amount: u64 },
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitializeOracleArgs {
    pub oracle_type: u8,
    pub nonce: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedArgs {
    pub oracle_type: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateOracleArgs {
    pub feed_args: Option<FeedArgs>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RefreshOracleArgs {}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimRentArgs {}

instruction_data! {
    InitializeControllerArgs => INITIALIZE_CONTROLLER,
    ManageControllerArgs => MANAGE_CONTROLLER,
    ManagePermissionArgs => MANAGE_PERMISSION,
    InitializeReserveArgs => INITIALIZE_RESERVE,
    ManageReserveArgs => MANAGE_RESERVE,
    InitializeIntegrationArgs => INITIALIZE_INTEGRATION,
    ManageIntegrationArgs => MANAGE_INTEGRATION,
    SyncReserveArgs => SYNC_RESERVE,
    SyncIntegrationArgs => SYNC,
    PushArgs => PUSH,
    PullArgs => PULL,
    InitializeOracleArgs => INITIALIZE_ORACLE,
    UpdateOracleArgs => UPDATE_ORACLE,
    RefreshOracleArgs => REFRESH_ORACLE,
    ClaimRentArgs => CLAIM_RENT,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manage_permission_wire_order() {
        let flags = PermissionFlags {
            can_execute_swap: true,
            can_liquidate: true,
            ..Default::default()
        };
        let data = ManagePermissionArgs::new(PermissionStatus::Active, flags)
            .data()
            .unwrap();

        assert_eq!(data, vec![3, 1, 0, 0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn initialize_reserve_payload() {
        let data = InitializeReserveArgs {
            status: ReserveStatus::Active,
            rate_limit_slope: 1_000,
            rate_limit_max_outflow: u64::MAX,
        }
        .data()
        .unwrap();

        assert_eq!(data.len(), 1 + 1 + 8 + 8);
        assert_eq!(data[0], 4);
        assert_eq!(data[1], 1);
        assert_eq!(&data[2..10], &1_000u64.to_le_bytes());
        assert_eq!(&data[10..18], &[0xff; 8]);
    }

    #[test]
    fn empty_args_are_just_the_discriminator() {
        assert_eq!(SyncReserveArgs {}.data().unwrap(), vec![8]);
        assert_eq!(SyncIntegrationArgs {}.data().unwrap(), vec![9]);
        assert_eq!(RefreshOracleArgs {}.data().unwrap(), vec![14]);
        assert_eq!(ClaimRentArgs {}.data().unwrap(), vec![18]);
    }

    #[test]
    fn manage_integration_encodes_options() {
        let data = ManageIntegrationArgs {
            status: Some(IntegrationStatus::Suspended),
            description: None,
            rate_limit_slope: None,
            rate_limit_max_outflow: Some(5),
        }
        .data()
        .unwrap();

        let mut expected = vec![7, 1, 0, 0, 0, 1];
        expected.extend_from_slice(&5u64.to_le_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn push_and_pull_payloads() {
        let data = PushArgs::Drift {
            market_index: 2,
            amount: 500,
            reduce_only: true,
        }
        .data()
        .unwrap();

        let mut expected = vec![10, 3, 2, 0];
        expected.extend_from_slice(&500u64.to_le_bytes());
        expected.push(1);
        assert_eq!(data, expected);

        let data = PullArgs::Kamino { amount: 7 }.data().unwrap();
        let mut expected = vec![11, 3];
        expected.extend_from_slice(&7u64.to_le_bytes());
        assert_eq!(data, expected);

        let data = PullArgs::Drift {
            market_index: 1,
            amount: 9,
        }
        .data()
        .unwrap();
        assert_eq!(&data[..4], &[11, 4, 1, 0]);
        assert_eq!(data.len(), 4 + 8);
    }

    #[test]
    fn atomic_swap_inner_args_tag() {
        let bytes = InitializeArgs::AtomicSwap {
            max_slippage_bps: 1,
            max_staleness: 2,
            expiry_timestamp: 3,
            oracle_price_inverted: true,
        }
        .try_to_vec()
        .unwrap();

        assert_eq!(bytes[0], 3);
        assert_eq!(bytes.len(), 1 + 2 + 8 + 8 + 1);
    }
}
