//! # Input Notation
//!
//! Parses the compact address notations accepted on the command line.
//!
//! Supported forms:
//! * A single IPv4/IPv6 address (e.g., `192.168.1.5`).
//! * A range, with an optionally abbreviated end (e.g., `192.168.1.1-100`).
//! * A CIDR block (e.g., `192.168.1.0/24`).
//! * A gateway with a dotted subnet mask (e.g., `192.168.1.1/255.255.255.0`).
//! * An address with a wildcard mask (e.g., `192.168.1.0~0.0.0.255`).
//! * A comma-separated list of any of the above.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::CollectorError;
use crate::network::address::AddressValue;
use crate::network::collection::{AddressCollector, gateway_subnet_range, wildcard_range};

const LIST_SEPARATOR: char = ',';
const RANGE_SEPARATOR: char = '-';
const PREFIX_SEPARATOR: char = '/';
const WILDCARD_SEPARATOR: char = '~';

/// One parsed input notation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notation {
    /// A single address.
    Single { addr: AddressValue },
    /// An explicit start/end range.
    Range { start: String, end: String },
    /// Network/prefix notation.
    Cidr { notation: String },
    /// Gateway plus a dotted subnet mask.
    GatewaySubnet { gateway: String, mask: String },
    /// Address plus a wildcard mask.
    Wildcard { ip: String, mask: String },
    /// Holds a list of different notations.
    Multi { notations: Vec<Notation> },
}

impl FromStr for Notation {
    type Err = CollectorError;

    /// Parses a string into a `Notation`.
    ///
    /// Only the shape is decided here; the matching `add_*` operation performs
    /// full validation, so a malformed block still fails with its own error kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains(LIST_SEPARATOR) {
            return parse_list(s);
        }

        if let Ok(addr) = AddressValue::parse(s) {
            return Ok(Notation::Single { addr });
        }

        if let Some((ip, mask)) = s.split_once(WILDCARD_SEPARATOR) {
            return Ok(Notation::Wildcard {
                ip: ip.trim().to_string(),
                mask: mask.trim().to_string(),
            });
        }

        if let Some((ip, suffix)) = s.split_once(PREFIX_SEPARATOR) {
            return Ok(parse_prefixed(s, ip, suffix));
        }

        if let Some(notation) = parse_ip_range(s)? {
            return Ok(notation);
        }

        Err(CollectorError::InvalidAddress(s.to_string()))
    }
}

impl Notation {
    /// Feeds this notation into a collector through the matching `add_*` operation.
    pub fn apply(&self, collection: &mut AddressCollector) -> Result<(), CollectorError> {
        match self {
            Notation::Single { addr } => collection.add_address(*addr),
            Notation::Range { start, end } => collection.add_range(start, end)?,
            Notation::Cidr { notation } => collection.add_cidr(notation)?,
            Notation::GatewaySubnet { gateway, mask } => collection.add_gateway_subnet(gateway, mask)?,
            Notation::Wildcard { ip, mask } => collection.add_wildcard(ip, mask)?,
            Notation::Multi { notations } => {
                let mut staged = collection.clone();
                for notation in notations {
                    notation.apply(&mut staged)?;
                }
                *collection = staged;
            }
        }
        Ok(())
    }

    /// Removes what this notation denotes from a collector.
    pub fn exclude(&self, collection: &mut AddressCollector) -> Result<(), CollectorError> {
        match self {
            Notation::Single { addr } => collection.exclude_address(*addr),
            Notation::Range { start, end } => collection.exclude_range(start, end)?,
            Notation::Cidr { notation } => collection.exclude_subnet(notation)?,
            Notation::GatewaySubnet { gateway, mask } => {
                collection.exclude_address_range(gateway_subnet_range(gateway, mask)?)
            }
            Notation::Wildcard { ip, mask } => {
                collection.exclude_address_range(wildcard_range(ip, mask)?)
            }
            Notation::Multi { notations } => {
                let mut staged = collection.clone();
                for notation in notations {
                    notation.exclude(&mut staged)?;
                }
                *collection = staged;
            }
        }
        Ok(())
    }
}

/// Parses a comma-separated list (e.g., "192.168.1.5, 10.0.0.1-50, 10.1.0.0/16").
pub fn parse_list(s: &str) -> Result<Notation, CollectorError> {
    let notations = s
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Notation::from_str)
        .collect::<Result<Vec<Notation>, _>>()?;

    Ok(Notation::Multi { notations })
}

/// Decides between CIDR (`/24`) and gateway + dotted mask (`/255.255.255.0`).
fn parse_prefixed(original: &str, ip: &str, suffix: &str) -> Notation {
    if suffix.contains('.') || (suffix.contains(':') && suffix.parse::<u8>().is_err()) {
        Notation::GatewaySubnet {
            gateway: ip.trim().to_string(),
            mask: suffix.trim().to_string(),
        }
    } else {
        Notation::Cidr {
            notation: original.to_string(),
        }
    }
}

/// Parses a range string like "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
fn parse_ip_range(s: &str) -> Result<Option<Notation>, CollectorError> {
    let Some((start_str, end_str)) = s.split_once(RANGE_SEPARATOR) else {
        return Ok(None);
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    let start_addr = AddressValue::parse(start_str).map_err(|_| CollectorError::InvalidAddress(s.to_string()))?;
    let end = match start_addr.to_ip_addr() {
        IpAddr::V4(start_v4) => parse_range_end_addr(end_str, &start_v4, s)?,
        IpAddr::V6(_) => end_str.to_string(),
    };

    Ok(Some(Notation::Range {
        start: start_str.to_string(),
        end,
    }))
}

/// Helper to expand the end address of an IPv4 range.
///
/// Handles abbreviated forms like "192.168.1.1-50" (implies 192.168.1.50)
/// and full forms like "192.168.1.1-192.168.1.255".
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr, original_s: &str) -> Result<String, CollectorError> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr.to_string());
    }

    let invalid = |reason| CollectorError::InvalidRange {
        start: start_addr.to_string(),
        end: end_str.to_string(),
        reason,
    };

    if end_str.is_empty() {
        return Err(invalid("end of range cannot be empty"));
    }

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| invalid("end of range is not a valid (partial) address"))?;

    if partial_octets.len() > 4 {
        return Err(invalid("end of range has too many octets"));
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    tracing::trace!("Expanded '{original_s}' to end at {}", Ipv4Addr::from(end_octets));
    Ok(Ipv4Addr::from(end_octets).to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
