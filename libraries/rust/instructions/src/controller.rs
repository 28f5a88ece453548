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

use anchor_lang::ToAccountMetas;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use alm_program_common::{
    accounts,
    instruction::{
        ClaimRentArgs, InitializeControllerArgs, InstructionData, ManageControllerArgs,
        ManagePermissionArgs, PermissionFlags,
    },
    programs::ProgramIds,
    ControllerStatus, PermissionStatus,
};

use crate::{derive, error::AlmIxError, Result};

/// A builder for the instructions of a single controller, issued by a single authority.
///
/// The controller authority and the authority's permission are derived once
/// on construction. Unless overridden with [ControllerIxBuilder::with_payer],
/// the authority also pays for any account created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerIxBuilder {
    programs: ProgramIds,
    controller: Pubkey,
    id: Option<u16>,
    controller_authority: Pubkey,
    authority: Pubkey,
    permission: Pubkey,
    payer: Pubkey,
}

impl ControllerIxBuilder {
    /// Build for an existing controller account
    pub fn new(programs: ProgramIds, controller: Pubkey, authority: Pubkey) -> Result<Self> {
        let controller_authority = derive::controller_authority(&programs.controller, &controller)?;
        let permission = derive::permission(&programs.controller, &controller, &authority)?;

        log::debug!(
            "controller {controller}: authority {controller_authority}, permission {permission} for {authority}"
        );

        Ok(Self {
            programs,
            controller,
            id: None,
            controller_authority,
            authority,
            permission,
            payer: authority,
        })
    }

    /// Build for the controller with the given id, which need not exist yet
    pub fn from_id(programs: ProgramIds, id: u16, authority: Pubkey) -> Result<Self> {
        let controller = derive::controller(&programs.controller, id)?;
        let mut builder = Self::new(programs, controller, authority)?;
        builder.id = Some(id);

        Ok(builder)
    }

    /// Use a different account to pay for account creation
    pub fn with_payer(mut self, payer: Pubkey) -> Self {
        self.payer = payer;
        self
    }

    pub fn programs(&self) -> &ProgramIds {
        &self.programs
    }

    pub fn controller(&self) -> Pubkey {
        self.controller
    }

    pub fn id(&self) -> Option<u16> {
        self.id
    }

    pub fn controller_authority(&self) -> Pubkey {
        self.controller_authority
    }

    pub fn authority(&self) -> Pubkey {
        self.authority
    }

    /// The permission account of the builder's authority
    pub fn permission(&self) -> Pubkey {
        self.permission
    }

    pub fn payer(&self) -> Pubkey {
        self.payer
    }

    /// Fails unless `program` is one of the configured token programs
    pub(crate) fn token_program(&self, program: &Pubkey) -> Result<Pubkey> {
        if self.programs.is_token_program(program) {
            Ok(*program)
        } else {
            log::warn!("rejecting {program} as a token program");
            Err(AlmIxError::UnknownTokenProgram { program: *program })
        }
    }

    pub(crate) fn instruction(
        &self,
        accounts: impl ToAccountMetas,
        args: &impl InstructionData,
    ) -> Result<Instruction> {
        Ok(Instruction {
            program_id: self.programs.controller,
            accounts: accounts.to_account_metas(None),
            data: args.data()?,
        })
    }

    /// Create the controller and a permission for the builder's authority
    pub fn initialize_controller(&self, status: ControllerStatus) -> Result<Instruction> {
        let id = self.id.ok_or_else(|| {
            log::warn!("cannot initialize controller {} without its id", self.controller);
            AlmIxError::MissingControllerId
        })?;

        let accounts = accounts::InitializeController {
            payer: self.payer,
            authority: self.authority,
            controller: self.controller,
            controller_authority: self.controller_authority,
            permission: self.permission,
            program_id: self.programs.controller,
            system_program: self.programs.system,
        };

        self.instruction(accounts, &InitializeControllerArgs { id, status })
    }

    /// Freeze or unfreeze the controller
    pub fn manage_controller(&self, status: ControllerStatus) -> Result<Instruction> {
        let accounts = accounts::ManageController {
            controller: self.controller,
            controller_authority: self.controller_authority,
            authority: self.authority,
            permission: self.permission,
            program_id: self.programs.controller,
        };

        self.instruction(accounts, &ManageControllerArgs { status })
    }

    /// Create or update the permission of `subject`, signed by the builder's authority.
    ///
    /// The subject never signs.
    pub fn manage_permission(
        &self,
        subject: &Pubkey,
        status: PermissionStatus,
        flags: PermissionFlags,
    ) -> Result<Instruction> {
        let permission = derive::permission(&self.programs.controller, &self.controller, subject)?;
        log::debug!("permission of {subject} is {permission}");

        let accounts = accounts::ManagePermission {
            payer: self.payer,
            controller: self.controller,
            controller_authority: self.controller_authority,
            super_authority: self.authority,
            super_permission: self.permission,
            authority: *subject,
            permission,
            program_id: self.programs.controller,
            system_program: self.programs.system,
        };

        self.instruction(accounts, &ManagePermissionArgs::new(status, flags))
    }

    /// Move excess lamports held by the controller authority to `destination`
    pub fn claim_rent(&self, destination: &Pubkey) -> Result<Instruction> {
        let accounts = accounts::ClaimRent {
            controller: self.controller,
            controller_authority: self.controller_authority,
            authority: self.authority,
            permission: self.permission,
            destination: *destination,
            system_program: self.programs.system,
        };

        self.instruction(accounts, &ClaimRentArgs {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ControllerIxBuilder {
        ControllerIxBuilder::from_id(ProgramIds::default(), 1, Pubkey::new_from_array([7; 32]))
            .unwrap()
    }

    #[test]
    fn initialize_controller_accounts() {
        let builder = builder();
        let ix = builder
            .initialize_controller(ControllerStatus::Active)
            .unwrap();

        assert_eq!(ix.program_id, builder.programs().controller);
        assert_eq!(ix.data, vec![1, 1, 0, 1]);

        let keys: Vec<_> = ix.accounts.iter().map(|a| a.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                builder.payer(),
                builder.authority(),
                builder.controller(),
                builder.controller_authority(),
                builder.permission(),
                builder.programs().controller,
                builder.programs().system,
            ]
        );
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(ix.accounts[1].is_signer && !ix.accounts[1].is_writable);
        assert!(ix.accounts[2].is_writable);
    }

    #[test]
    fn initialize_needs_an_id() {
        let programs = ProgramIds::default();
        let builder =
            ControllerIxBuilder::new(programs, Pubkey::new_unique(), Pubkey::new_unique()).unwrap();

        assert!(matches!(
            builder.initialize_controller(ControllerStatus::Active),
            Err(AlmIxError::MissingControllerId)
        ));
        assert!(builder.manage_controller(ControllerStatus::Suspended).is_ok());
    }

    #[test]
    fn separate_payer() {
        let payer = Pubkey::new_unique();
        let builder = builder().with_payer(payer);
        let ix = builder
            .initialize_controller(ControllerStatus::Suspended)
            .unwrap();

        assert_eq!(ix.accounts[0].pubkey, payer);
        assert_ne!(ix.accounts[1].pubkey, payer);
    }

    #[test]
    fn manage_permission_subject_does_not_sign() {
        let builder = builder();
        let subject = Pubkey::new_unique();
        let ix = builder
            .manage_permission(&subject, PermissionStatus::Active, PermissionFlags::default())
            .unwrap();

        assert_eq!(ix.accounts.len(), 9);
        assert_eq!(ix.accounts[3].pubkey, builder.authority());
        assert!(ix.accounts[3].is_signer);
        assert_eq!(ix.accounts[4].pubkey, builder.permission());

        let subject_meta = &ix.accounts[5];
        assert_eq!(subject_meta.pubkey, subject);
        assert!(!subject_meta.is_signer && !subject_meta.is_writable);

        let subject_permission = &ix.accounts[6];
        assert_eq!(
            subject_permission.pubkey,
            derive::permission(&builder.programs().controller, &builder.controller(), &subject)
                .unwrap()
        );
        assert!(subject_permission.is_writable);
        assert_eq!(ix.data, vec![3, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn claim_rent_roles() {
        let destination = Pubkey::new_unique();
        let ix = builder().claim_rent(&destination).unwrap();

        assert_eq!(ix.data, vec![18]);
        assert!(ix.accounts[1].is_writable && !ix.accounts[1].is_signer);
        assert!(ix.accounts[2].is_writable && ix.accounts[2].is_signer);
        assert_eq!(ix.accounts[4].pubkey, destination);
        assert!(ix.accounts[4].is_writable);
    }
}
