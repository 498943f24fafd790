use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;
use thiserror::Error;

/// Errors produced while decoding textual IPv4 addresses and masks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Text is not a dotted-decimal IPv4 address.
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),
    /// Text is not a dotted-decimal mask with contiguous bits.
    #[error("invalid subnet mask: {0}")]
    InvalidMask(String),
}

/// An interface address together with its prefix length.
///
/// The host bits are kept, so `10.0.0.1 255.255.255.0` is stored and
/// displayed as `10.0.0.1/24` rather than the network `10.0.0.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AddressPrefix(Ipv4Net);

impl AddressPrefix {
    /// Build a prefix from an address and a dotted-decimal mask, e.g.
    /// `("172.24.62.201", "255.255.255.248")` gives `172.24.62.201/29`.
    pub fn from_address_mask(address: &str, mask: &str) -> Result<Self, AddressError> {
        let host = parse_address(address)?;
        let len = parse_mask(mask)?;
        let net =
            Ipv4Net::new(host, len).map_err(|_| AddressError::InvalidMask(mask.to_string()))?;
        Ok(Self(net))
    }

    /// The configured host address.
    pub fn host(&self) -> Ipv4Addr {
        self.0.addr()
    }

    pub fn prefix_len(&self) -> u8 {
        self.0.prefix_len()
    }

    /// Network address with host bits cleared.
    pub fn network(&self) -> Ipv4Addr {
        self.0.network()
    }

    pub fn contains(&self, address: Ipv4Addr) -> bool {
        prefix_contains(self, address)
    }
}

impl Display for AddressPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a dotted-decimal IPv4 address. No name resolution, no IPv6.
pub fn parse_address(text: &str) -> Result<Ipv4Addr, AddressError> {
    text.parse::<Ipv4Addr>()
        .map_err(|_| AddressError::InvalidAddress(text.to_string()))
}

/// Convert a dotted-decimal subnet mask into a prefix length.
pub fn parse_mask(text: &str) -> Result<u8, AddressError> {
    let mask = text
        .parse::<Ipv4Addr>()
        .map_err(|_| AddressError::InvalidMask(text.to_string()))?;
    ipnet::ipv4_mask_to_prefix(mask).map_err(|_| AddressError::InvalidMask(text.to_string()))
}

/// True iff `address` shares the network bits of `prefix`.
pub fn prefix_contains(prefix: &AddressPrefix, address: Ipv4Addr) -> bool {
    prefix.0.contains(&address)
}

/// Bit-for-bit equality, used for the exact-match flag.
pub fn address_equals(a: Ipv4Addr, b: Ipv4Addr) -> bool {
    u32::from(a) == u32::from(b)
}
