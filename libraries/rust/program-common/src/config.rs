//! Integration configuration records.
//!
//! An integration's address is derived from the Keccak-256 digest of its
//! config, so the borsh encoding produced here must match the program's
//! byte for byte: one variant tag followed by a 224 byte payload whose unused
//! tail is zeroed.

use std::io::{self, Write};

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{keccak, pubkey::Pubkey};
use static_assertions::const_assert_eq;

use crate::error::{Result, WireError};

/// Encoded length of every config variant, excluding its tag
pub const CONFIG_PAYLOAD_LEN: usize = 224;

const PUBKEY_LEN: usize = 32;

pub const SPL_TOKEN_EXTERNAL_PADDING: usize = 96;
pub const SPL_TOKEN_SWAP_PADDING: usize = 32;
pub const CCTP_BRIDGE_PADDING: usize = 124;
pub const LZ_BRIDGE_PADDING: usize = 28;
pub const ATOMIC_SWAP_PADDING: usize = 107;
pub const DRIFT_PADDING: usize = 220;
pub const KAMINO_PADDING: usize = 31;

const_assert_eq!(4 * PUBKEY_LEN + SPL_TOKEN_EXTERNAL_PADDING, CONFIG_PAYLOAD_LEN);
const_assert_eq!(6 * PUBKEY_LEN + SPL_TOKEN_SWAP_PADDING, CONFIG_PAYLOAD_LEN);
const_assert_eq!(3 * PUBKEY_LEN + 4 + CCTP_BRIDGE_PADDING, CONFIG_PAYLOAD_LEN);
const_assert_eq!(6 * PUBKEY_LEN + 4 + LZ_BRIDGE_PADDING, CONFIG_PAYLOAD_LEN);
const_assert_eq!(
    3 * PUBKEY_LEN + 2 + 8 + 1 + 1 + 8 + 1 + ATOMIC_SWAP_PADDING,
    CONFIG_PAYLOAD_LEN
);
const_assert_eq!(2 + 2 + DRIFT_PADDING, CONFIG_PAYLOAD_LEN);
const_assert_eq!(6 * PUBKEY_LEN + 1 + KAMINO_PADDING, CONFIG_PAYLOAD_LEN);

/// Reserved bytes at the end of a config payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding<const N: usize>([u8; N]);

impl<const N: usize> Padding<N> {
    pub const fn zeroed() -> Self {
        Self([0u8; N])
    }

    pub fn is_zeroed(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> Default for Padding<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> BorshSerialize for Padding<N> {
    fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}

impl<const N: usize> BorshDeserialize for Padding<N> {
    fn deserialize(buf: &mut &[u8]) -> io::Result<Self> {
        if buf.len() < N {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "unexpected end of buffer reading padding",
            ));
        }

        let mut data = [0u8; N];
        data.copy_from_slice(&buf[..N]);
        *buf = &buf[N..];

        Ok(Self(data))
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplTokenExternalConfig {
    pub program: Pubkey,
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub token_account: Pubkey,
    pub padding: Padding<SPL_TOKEN_EXTERNAL_PADDING>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplTokenSwapConfig {
    pub program: Pubkey,
    pub swap: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub lp_mint: Pubkey,
    pub lp_token_account: Pubkey,
    pub padding: Padding<SPL_TOKEN_SWAP_PADDING>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CctpBridgeConfig {
    pub program: Pubkey,
    pub mint: Pubkey,
    pub destination_address: Pubkey,
    pub destination_domain: u32,
    pub padding: Padding<CCTP_BRIDGE_PADDING>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzBridgeConfig {
    pub program: Pubkey,
    pub mint: Pubkey,
    pub oft_store: Pubkey,
    pub peer_config: Pubkey,
    pub token_escrow: Pubkey,
    pub destination_address: Pubkey,
    pub destination_eid: u32,
    pub padding: Padding<LZ_BRIDGE_PADDING>,
}

/// Oracle-priced swap between two reserves
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomicSwapConfig {
    /// Mint sent out of the controller
    pub input_token: Pubkey,
    /// Mint received in exchange
    pub output_token: Pubkey,
    /// Oracle pricing the pair
    pub oracle: Pubkey,
    /// Maximum deviation from the oracle price
    pub max_slippage_bps: u16,
    /// Maximum age of the oracle update, in slots
    pub max_staleness: u64,
    pub input_mint_decimals: u8,
    pub output_mint_decimals: u8,
    /// Unix timestamp after which the swap is refused
    pub expiry_timestamp: i64,
    /// The oracle quotes output per input instead of input per output
    pub oracle_price_inverted: bool,
    pub padding: Padding<ATOMIC_SWAP_PADDING>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftConfig {
    pub sub_account_id: u16,
    pub spot_market_index: u16,
    pub padding: Padding<DRIFT_PADDING>,
}

/// A position in a Kamino lending reserve held through an obligation
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KaminoConfig {
    pub market: Pubkey,
    pub reserve: Pubkey,
    /// Default address when the reserve has no collateral farm
    pub reserve_farm_collateral: Pubkey,
    /// Default address when the reserve has no debt farm
    pub reserve_farm_debt: Pubkey,
    pub reserve_liquidity_mint: Pubkey,
    pub obligation: Pubkey,
    pub obligation_id: u8,
    pub padding: Padding<KAMINO_PADDING>,
}

/// The configuration an integration account is created with.
///
/// Variant order is the wire tag and must not change.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationConfig {
    Undefined {
        padding: Padding<CONFIG_PAYLOAD_LEN>,
    },
    SplTokenExternal(SplTokenExternalConfig),
    SplTokenSwap(SplTokenSwapConfig),
    CctpBridge(CctpBridgeConfig),
    LzBridge(LzBridgeConfig),
    AtomicSwap(AtomicSwapConfig),
    Drift(DriftConfig),
    Kamino(KaminoConfig),
}

impl IntegrationConfig {
    /// The wire tag of this variant
    pub fn tag(&self) -> u8 {
        match self {
            Self::Undefined { .. } => 0,
            Self::SplTokenExternal(_) => 1,
            Self::SplTokenSwap(_) => 2,
            Self::CctpBridge(_) => 3,
            Self::LzBridge(_) => 4,
            Self::AtomicSwap(_) => 5,
            Self::Drift(_) => 6,
            Self::Kamino(_) => 7,
        }
    }

    fn padding_is_zeroed(&self) -> bool {
        match self {
            Self::Undefined { padding } => padding.is_zeroed(),
            Self::SplTokenExternal(c) => c.padding.is_zeroed(),
            Self::SplTokenSwap(c) => c.padding.is_zeroed(),
            Self::CctpBridge(c) => c.padding.is_zeroed(),
            Self::LzBridge(c) => c.padding.is_zeroed(),
            Self::AtomicSwap(c) => c.padding.is_zeroed(),
            Self::Drift(c) => c.padding.is_zeroed(),
            Self::Kamino(c) => c.padding.is_zeroed(),
        }
    }

    /// The tag and payload exactly as the program hashes them.
    ///
    /// A config carrying non-zero padding (only possible through decoding
    /// foreign bytes) has no canonical form and is refused.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        if !self.padding_is_zeroed() {
            return Err(WireError::NonCanonicalPadding);
        }

        Ok(self.try_to_vec()?)
    }

    /// Keccak-256 of the canonical bytes, the seed of the integration address
    pub fn hash(&self) -> Result<[u8; 32]> {
        let bytes = self.canonical_bytes()?;
        Ok(keccak::hash(&bytes).to_bytes())
    }
}

impl From<SplTokenExternalConfig> for IntegrationConfig {
    fn from(c: SplTokenExternalConfig) -> Self {
        Self::SplTokenExternal(c)
    }
}

impl From<AtomicSwapConfig> for IntegrationConfig {
    fn from(c: AtomicSwapConfig) -> Self {
        Self::AtomicSwap(c)
    }
}

impl From<DriftConfig> for IntegrationConfig {
    fn from(c: DriftConfig) -> Self {
        Self::Drift(c)
    }
}

impl From<KaminoConfig> for IntegrationConfig {
    fn from(c: KaminoConfig) -> Self {
        Self::Kamino(c)
    }
}
