//! Account lists of the controller program's instructions.
//!
//! Field order is the order the program reads the accounts in.

use anchor_lang::ToAccountMetas;
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

macro_rules! account_list {
    (@meta writable_signer, $key:expr, $is_signer:ident) => {
        AccountMeta::new($key, $is_signer.unwrap_or(true))
    };
    (@meta signer, $key:expr, $is_signer:ident) => {
        AccountMeta::new_readonly($key, $is_signer.unwrap_or(true))
    };
    (@meta writable, $key:expr, $is_signer:ident) => {
        AccountMeta::new($key, false)
    };
    (@meta readonly, $key:expr, $is_signer:ident) => {
        AccountMeta::new_readonly($key, false)
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($(#[$fmeta:meta])* $field:ident: $role:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            $($(#[$fmeta])* pub $field: Pubkey,)*
        }

        impl ToAccountMetas for $name {
            /// `is_signer` overrides the signer flag of the signing accounts only
            fn to_account_metas(&self, is_signer: Option<bool>) -> Vec<AccountMeta> {
                let _ = is_signer;
                vec![$(account_list!(@meta $role, self.$field, is_signer)),*]
            }
        }
    };
}

account_list! {
    pub struct InitializeController {
        payer: writable_signer,
        authority: signer,
        controller: writable,
        controller_authority: readonly,
        /// The authority's permission, created alongside the controller
        permission: writable,
        program_id: readonly,
        system_program: readonly,
    }
}

account_list! {
    pub struct ManageController {
        controller: writable,
        controller_authority: readonly,
        authority: signer,
        permission: readonly,
        program_id: readonly,
    }
}

account_list! {
    pub struct ManagePermission {
        payer: writable_signer,
        controller: readonly,
        controller_authority: readonly,
        /// The authority granting the permission
        super_authority: signer,
        super_permission: readonly,
        /// The authority receiving the permission
        authority: readonly,
        permission: writable,
        program_id: readonly,
        system_program: readonly,
    }
}

account_list! {
    pub struct InitializeReserve {
        payer: writable_signer,
        controller: readonly,
        controller_authority: readonly,
        authority: signer,
        permission: readonly,
        reserve: writable,
        mint: readonly,
        vault: writable,
        token_program: readonly,
        associated_token_program: readonly,
        program_id: readonly,
        system_program: readonly,
    }
}

account_list! {
    pub struct ManageReserve {
        controller: readonly,
        controller_authority: readonly,
        authority: signer,
        permission: readonly,
        reserve: writable,
        program_id: readonly,
    }
}

account_list! {
    /// Integration specific accounts follow these
    pub struct InitializeIntegration {
        payer: writable_signer,
        controller: readonly,
        controller_authority: readonly,
        authority: signer,
        permission: readonly,
        integration: writable,
        program_id: readonly,
        system_program: readonly,
    }
}

account_list! {
    pub struct ManageIntegration {
        controller: readonly,
        controller_authority: readonly,
        authority: signer,
        permission: readonly,
        integration: writable,
        program_id: readonly,
    }
}

account_list! {
    pub struct SyncReserve {
        controller: readonly,
        controller_authority: readonly,
        reserve: writable,
        vault: readonly,
    }
}

account_list! {
    /// Integration specific accounts follow these
    pub struct SyncIntegration {
        controller: readonly,
        controller_authority: writable,
        payer: writable_signer,
        integration: writable,
        reserve: writable,
    }
}

account_list! {
    /// Integration specific accounts follow these
    pub struct Push {
        controller: readonly,
        controller_authority: writable,
        authority: signer,
        permission: readonly,
        integration: writable,
        /// The reserve funds leave from
        reserve: writable,
        program_id: readonly,
    }
}

account_list! {
    /// Integration specific accounts follow these
    pub struct Pull {
        controller: readonly,
        controller_authority: writable,
        authority: signer,
        permission: readonly,
        integration: writable,
        /// The reserve funds return to
        reserve: writable,
        program_id: readonly,
    }
}

account_list! {
    pub struct InitializeOracle {
        payer: writable_signer,
        controller: readonly,
        controller_authority: readonly,
        authority: signer,
        price_feed: readonly,
        oracle: writable,
        system_program: readonly,
    }
}

account_list! {
    pub struct RefreshOracle {
        price_feed: readonly,
        oracle: writable,
    }
}

account_list! {
    pub struct ClaimRent {
        controller: readonly,
        controller_authority: writable,
        authority: writable_signer,
        permission: readonly,
        /// Receives the reclaimed lamports
        destination: writable,
        system_program: readonly,
    }
}

/// Accounts of update-oracle.
///
/// The last slot is optional on the program side. When no new authority is
/// given it is filled with the controller program id, read-only, which the
/// program treats as an absent account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOracle {
    pub controller: Pubkey,
    pub controller_authority: Pubkey,
    pub authority: Pubkey,
    pub price_feed: Pubkey,
    pub oracle: Pubkey,
    pub new_authority: Option<Pubkey>,
    pub program_id: Pubkey,
}

impl ToAccountMetas for UpdateOracle {
    fn to_account_metas(&self, is_signer: Option<bool>) -> Vec<AccountMeta> {
        let signer = is_signer.unwrap_or(true);
        let new_authority = match self.new_authority {
            Some(key) => AccountMeta::new_readonly(key, signer),
            None => AccountMeta::new_readonly(self.program_id, false),
        };

        vec![
            AccountMeta::new_readonly(self.controller, false),
            AccountMeta::new_readonly(self.controller_authority, false),
            AccountMeta::new_readonly(self.authority, signer),
            AccountMeta::new_readonly(self.price_feed, false),
            AccountMeta::new(self.oracle, false),
            new_authority,
        ]
    }
}
