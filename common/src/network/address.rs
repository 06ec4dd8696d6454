//! # Address Value Model
//!
//! A single IPv4 or IPv6 address stored as a fixed-width unsigned integer.
//!
//! Keeping the numeric form around makes range arithmetic trivial while the
//! family tag stops a 32-bit value from ever being compared against, or merged
//! with, a 128-bit one.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::CollectorError;

/// The address family a value belongs to. `V4` sorts before `V6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn bits(self) -> u8 {
        match self {
            AddressFamily::V4 => 32,
            AddressFamily::V6 => 128,
        }
    }

    /// Largest numeric value representable in this family.
    pub fn max_value(self) -> u128 {
        match self {
            AddressFamily::V4 => u32::MAX as u128,
            AddressFamily::V6 => u128::MAX,
        }
    }

    /// Netmask with the leading `prefix` bits set.
    ///
    /// Callers must have checked `prefix <= self.bits()`.
    pub fn netmask(self, prefix: u8) -> u128 {
        let host_bits = u32::from(self.bits() - prefix);
        let host_mask = if host_bits == 128 {
            u128::MAX
        } else {
            (1u128 << host_bits) - 1
        };
        self.max_value() & !host_mask
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// One network address, totally ordered by family and then numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressValue {
    family: AddressFamily,
    bits: u128,
}

impl AddressValue {
    /// Parses a textual IPv4 or IPv6 address.
    pub fn parse(s: &str) -> Result<Self, CollectorError> {
        s.trim()
            .parse::<IpAddr>()
            .map(Self::from)
            .map_err(|_| CollectorError::InvalidAddress(s.to_string()))
    }

    /// Builds a value from its numeric form, `None` if it does not fit the family.
    pub fn from_bits(family: AddressFamily, bits: u128) -> Option<Self> {
        (bits <= family.max_value()).then_some(Self { family, bits })
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// The next address, or `None` when already at the family maximum.
    pub fn checked_next(&self) -> Option<Self> {
        self.bits
            .checked_add(1)
            .and_then(|bits| Self::from_bits(self.family, bits))
    }

    /// The previous address, or `None` at zero.
    pub fn checked_prev(&self) -> Option<Self> {
        self.bits.checked_sub(1).map(|bits| Self {
            family: self.family,
            bits,
        })
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match self.family {
            AddressFamily::V4 => IpAddr::V4(Ipv4Addr::from(self.bits as u32)),
            AddressFamily::V6 => IpAddr::V6(Ipv6Addr::from(self.bits)),
        }
    }
}

impl From<IpAddr> for AddressValue {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Self::from(v4),
            IpAddr::V6(v6) => Self::from(v6),
        }
    }
}

impl From<Ipv4Addr> for AddressValue {
    fn from(ip: Ipv4Addr) -> Self {
        Self {
            family: AddressFamily::V4,
            bits: u32::from(ip) as u128,
        }
    }
}

impl From<Ipv6Addr> for AddressValue {
    fn from(ip: Ipv6Addr) -> Self {
        Self {
            family: AddressFamily::V6,
            bits: u128::from(ip),
        }
    }
}

impl From<AddressValue> for IpAddr {
    fn from(value: AddressValue) -> Self {
        value.to_ip_addr()
    }
}

impl FromStr for AddressValue {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AddressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_ip_addr().fmt(f)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
