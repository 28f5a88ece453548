use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use alm_program_common::{
    config::{AtomicSwapConfig, IntegrationConfig, Padding},
    instruction::InitializeArgs,
    IntegrationType,
};

use super::IntegrationParams;
use crate::{controller::ControllerIxBuilder, Result};

/// The pair, oracle and limits of an atomic swap integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomicSwapParams {
    pub input_token: Pubkey,
    pub input_mint_decimals: u8,
    pub output_token: Pubkey,
    pub output_mint_decimals: u8,
    pub oracle: Pubkey,
    pub max_slippage_bps: u16,
    pub max_staleness: u64,
    pub expiry_timestamp: i64,
    pub oracle_price_inverted: bool,
}

impl AtomicSwapParams {
    pub fn config(&self) -> AtomicSwapConfig {
        AtomicSwapConfig {
            input_token: self.input_token,
            output_token: self.output_token,
            oracle: self.oracle,
            max_slippage_bps: self.max_slippage_bps,
            max_staleness: self.max_staleness,
            input_mint_decimals: self.input_mint_decimals,
            output_mint_decimals: self.output_mint_decimals,
            expiry_timestamp: self.expiry_timestamp,
            oracle_price_inverted: self.oracle_price_inverted,
            padding: Padding::zeroed(),
        }
    }

    fn inner_args(&self) -> InitializeArgs {
        InitializeArgs::AtomicSwap {
            max_slippage_bps: self.max_slippage_bps,
            max_staleness: self.max_staleness,
            expiry_timestamp: self.expiry_timestamp,
            oracle_price_inverted: self.oracle_price_inverted,
        }
    }
}

impl ControllerIxBuilder {
    /// Create an atomic swap integration between two mints priced by `swap.oracle`
    pub fn initialize_atomic_swap(
        &self,
        params: &IntegrationParams,
        swap: &AtomicSwapParams,
    ) -> Result<Instruction> {
        let remaining = vec![
            AccountMeta::new_readonly(swap.input_token, false),
            AccountMeta::new_readonly(swap.output_token, false),
            AccountMeta::new_readonly(swap.oracle, false),
        ];

        self.initialize_integration(
            IntegrationType::AtomicSwap,
            &IntegrationConfig::AtomicSwap(swap.config()),
            params,
            swap.inner_args(),
            remaining,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::tests::builder;

    fn swap() -> AtomicSwapParams {
        AtomicSwapParams {
            input_token: Pubkey::new_unique(),
            input_mint_decimals: 6,
            output_token: Pubkey::new_unique(),
            output_mint_decimals: 9,
            oracle: Pubkey::new_unique(),
            max_slippage_bps: 25,
            max_staleness: 150,
            expiry_timestamp: 1_800_000_000,
            oracle_price_inverted: true,
        }
    }

    #[test]
    fn trailing_accounts_are_the_pair_and_oracle() {
        let swap = swap();
        let ix = builder()
            .initialize_atomic_swap(&IntegrationParams::new("usdc/sol"), &swap)
            .unwrap();

        assert_eq!(ix.accounts.len(), 11);
        let trailing = &ix.accounts[8..];
        assert_eq!(
            trailing,
            &[
                AccountMeta::new_readonly(swap.input_token, false),
                AccountMeta::new_readonly(swap.output_token, false),
                AccountMeta::new_readonly(swap.oracle, false),
            ]
        );
    }

    #[test]
    fn integration_account_is_content_addressed() {
        let builder = builder();
        let swap = swap();
        let ix = builder
            .initialize_atomic_swap(&IntegrationParams::new(""), &swap)
            .unwrap();

        let expected = builder
            .integration_address(&IntegrationConfig::AtomicSwap(swap.config()))
            .unwrap();
        assert_eq!(ix.accounts[5].pubkey, expected);
        assert!(ix.accounts[5].is_writable);

        let mut other = swap;
        other.max_staleness += 1;
        assert_ne!(
            builder
                .integration_address(&IntegrationConfig::AtomicSwap(other.config()))
                .unwrap(),
            expected
        );
    }

    #[test]
    fn payload_layout() {
        let swap = swap();
        let mut params = IntegrationParams::new("swap");
        params.permit_liquidation = true;
        let ix = builder().initialize_atomic_swap(&params, &swap).unwrap();

        assert_eq!(ix.data[0], 6);
        // integration type, status
        assert_eq!(&ix.data[1..3], &[4, 1]);
        assert_eq!(&ix.data[3..7], b"swap");
        assert!(ix.data[7..35].iter().all(|b| *b == 0));
        assert_eq!(&ix.data[35..43], &0u64.to_le_bytes());
        assert_eq!(&ix.data[43..51], &u64::MAX.to_le_bytes());
        assert_eq!(ix.data[51], 1);

        let inner = &ix.data[52..];
        assert_eq!(inner[0], 3);
        assert_eq!(&inner[1..3], &25u16.to_le_bytes());
        assert_eq!(&inner[3..11], &150u64.to_le_bytes());
        assert_eq!(&inner[11..19], &1_800_000_000i64.to_le_bytes());
        assert_eq!(inner[19], 1);
        assert_eq!(inner.len(), 20);
    }
}
