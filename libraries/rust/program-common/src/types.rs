use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::{Result, WireError};

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            Suspended,
            Active,
        }
    };
}

status_enum! {
    /// Whether the controller accepts operations at all
    ControllerStatus
}

status_enum! {
    /// Whether a permission grants its capabilities
    PermissionStatus
}

status_enum! {
    /// Whether funds may flow through a reserve
    ReserveStatus
}

status_enum! {
    /// Whether an integration may be pushed to or pulled from
    IntegrationStatus
}

/// The kind of external integration, as named in an initialize-integration payload
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationType {
    SplTokenExternal,
    SplTokenSwap,
    CctpBridge,
    LzBridge,
    AtomicSwap,
    Drift,
    Kamino,
}

/// Size of the fixed description buffer carried by integrations
pub const DESCRIPTION_LEN: usize = 32;

/// UTF-8 text stored in a zero-filled 32 byte buffer.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Description([u8; DESCRIPTION_LEN]);

impl Description {
    /// Fails instead of truncating when the text does not fit.
    pub fn new(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        if bytes.len() > DESCRIPTION_LEN {
            return Err(WireError::DescriptionTooLong {
                len: bytes.len(),
                max: DESCRIPTION_LEN,
            });
        }

        let mut buf = [0u8; DESCRIPTION_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);

        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; DESCRIPTION_LEN] {
        &self.0
    }

    /// The text without its trailing zero fill
    pub fn text(&self) -> Option<&str> {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map(|p| p + 1)
            .unwrap_or(0);

        std::str::from_utf8(&self.0[..end]).ok()
    }
}

impl TryFrom<&str> for Description {
    type Error = WireError;

    fn try_from(text: &str) -> Result<Self> {
        Self::new(text)
    }
}

/// Outflow value the program treats as "no limit"
pub const UNLIMITED_OUTFLOW: u64 = u64::MAX;

/// Rate limit applied to outflows from a reserve or integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Replenishment of the outflow allowance, per day
    pub slope: u64,
    /// Cap on the outflow allowance
    pub max_outflow: u64,
}

impl RateLimit {
    pub const fn new(slope: u64, max_outflow: u64) -> Self {
        Self { slope, max_outflow }
    }

    /// No replenishment and no cap
    pub const fn unlimited() -> Self {
        Self::new(0, UNLIMITED_OUTFLOW)
    }

    /// Accepts values computed in a wider type, rejecting anything that
    /// would not survive the trip to the 64 bit wire fields.
    pub fn from_wide(slope: u128, max_outflow: u128) -> Result<Self> {
        Ok(Self {
            slope: narrow("rate_limit_slope", slope)?,
            max_outflow: narrow("rate_limit_max_outflow", max_outflow)?,
        })
    }
}

/// Convert a wide value into a u64 wire field
pub fn narrow(field: &'static str, value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| WireError::ValueOutOfRange { field, value })
}

/// A requested change to a single field of an existing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the current value in place
    Unchanged,
    /// Reset the field to its empty value
    Cleared,
    /// Replace the current value
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_is_zero_filled() {
        let d = Description::new("usdc vault").unwrap();

        assert_eq!(&d.as_bytes()[..10], b"usdc vault");
        assert!(d.as_bytes()[10..].iter().all(|b| *b == 0));
        assert_eq!(d.text(), Some("usdc vault"));
    }

    #[test]
    fn description_boundary() {
        let exact = "a".repeat(32);
        assert!(Description::new(&exact).is_ok());

        let long = "a".repeat(33);
        assert!(matches!(
            Description::new(&long),
            Err(WireError::DescriptionTooLong { len: 33, max: 32 })
        ));
    }

    #[test]
    fn multibyte_text_counts_bytes() {
        // 3 bytes per character
        let fits = "\u{20ac}".repeat(10);
        let over = "\u{20ac}".repeat(11);

        assert_eq!(Description::new(&fits).unwrap().text(), Some(fits.as_str()));
        assert!(Description::new(&over).is_err());
    }

    #[test]
    fn wide_rate_limits_are_range_checked() {
        let limit = RateLimit::from_wide(10, u64::MAX as u128).unwrap();
        assert_eq!(limit, RateLimit::new(10, u64::MAX));

        let err = RateLimit::from_wide(u64::MAX as u128 + 1, 0).unwrap_err();
        assert!(matches!(
            err,
            WireError::ValueOutOfRange {
                field: "rate_limit_slope",
                ..
            }
        ));
    }

    #[test]
    fn status_encodes_as_single_byte() {
        assert_eq!(ReserveStatus::Active.try_to_vec().unwrap(), vec![1]);
        assert_eq!(ControllerStatus::Suspended.try_to_vec().unwrap(), vec![0]);
        assert_eq!(IntegrationType::Kamino.try_to_vec().unwrap(), vec![6]);
    }
}
