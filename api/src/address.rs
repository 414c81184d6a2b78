//! Defines the account/contract address type shared by client and server.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Number of bytes in an address.
pub const ADDRESS_LEN: usize = 20;

/// An error that can occur when parsing a string into a `ChainAddress`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address must be {expected} hex digits, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("address contains non-hex characters")]
    InvalidHex,
}

/// A `0x`-prefixed, 20-byte address identifying a job contract or an account.
///
/// Parsing is case-insensitive; `Display` always renders lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainAddress([u8; ADDRESS_LEN]);

impl ChainAddress {
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Formats the address as `0x1234…abcd` for compact display.
    pub fn to_abbreviated(&self) -> String {
        let full = self.to_string();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

impl FromStr for ChainAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(ParseAddressError::MissingPrefix)?;

        if digits.len() != ADDRESS_LEN * 2 {
            return Err(ParseAddressError::WrongLength {
                expected: ADDRESS_LEN * 2,
                found: digits.len(),
            });
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| ParseAddressError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for ChainAddress {
    type Error = ParseAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChainAddress> for String {
    fn from(address: ChainAddress) -> Self {
        address.to_string()
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainAddress({self})")
    }
}
