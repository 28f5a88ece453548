use thiserror::Error;

pub type Result<T> = std::result::Result<T, WireError>;

/// Failures producing the bytes of a seed list or an instruction payload.
#[derive(Error, Debug)]
pub enum WireError {
    #[error("{count} seeds provided, at most {max} are allowed")]
    TooManySeeds { count: usize, max: usize },

    #[error("seed {index} is {len} bytes long, at most {max} are allowed")]
    SeedTooLong { index: usize, len: usize, max: usize },

    #[error("failed to encode payload")]
    Encode(#[from] std::io::Error),

    #[error("value {value} for `{field}` does not fit in a u64")]
    ValueOutOfRange { field: &'static str, value: u128 },

    #[error("description is {len} bytes long, at most {max} are allowed")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("config padding contains non-zero bytes")]
    NonCanonicalPadding,
}
