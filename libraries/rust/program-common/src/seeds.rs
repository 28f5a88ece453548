use crate::error::{Result, WireError};

/// Maximum number of seeds accepted by the address derivation scheme
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed
pub const MAX_SEED_LEN: usize = 32;

pub const CONTROLLER: &[u8] = b"controller";
pub const CONTROLLER_AUTHORITY: &[u8] = b"controller_authority";
pub const PERMISSION: &[u8] = b"permission";
pub const RESERVE: &[u8] = b"reserve";
pub const INTEGRATION: &[u8] = b"integration";
pub const ORACLE: &[u8] = b"oracle";

/// Owned representation of key generating seeds.
///
/// The seed limits are checked when the list is built, so anything holding a
/// `Seeds` can go straight into a bump search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seeds {
    data: Vec<Vec<u8>>,
}

impl Seeds {
    pub fn new(seeds: &[&[u8]]) -> Result<Self> {
        if seeds.len() > MAX_SEEDS {
            return Err(WireError::TooManySeeds {
                count: seeds.len(),
                max: MAX_SEEDS,
            });
        }

        if let Some((index, seed)) = seeds
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() > MAX_SEED_LEN)
        {
            return Err(WireError::SeedTooLong {
                index,
                len: seed.len(),
                max: MAX_SEED_LEN,
            });
        }

        Ok(Self {
            data: seeds.iter().map(|s| s.to_vec()).collect(),
        })
    }

    /// Borrow the seeds in the shape expected by the runtime address functions
    pub fn as_slices(&self) -> Vec<&[u8]> {
        self.data.iter().map(Vec::as_slice).collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
