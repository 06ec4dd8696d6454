//! # Address Range Model
//!
//! Inclusive blocks of addresses and the normalized interval sets built from them.
//!
//! [`AddressRange`] is what every input notation (range, CIDR, wildcard,
//! gateway + mask) boils down to. [`RangeSet`] keeps a sorted list of disjoint,
//! non-adjacent ranges and is used by the collector to answer counting and
//! enumeration questions without materializing addresses.

use std::net::IpAddr;

use pnet::ipnetwork::{self, IpNetwork};

use crate::error::CollectorError;
use crate::network::address::{AddressFamily, AddressValue};

/// Inclusive, contiguous block of addresses of a single family. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    start: AddressValue,
    end: AddressValue,
}

impl AddressRange {
    /// Creates a range, rejecting reversed bounds and mixed families.
    pub fn new(start: AddressValue, end: AddressValue) -> Result<Self, CollectorError> {
        let reason = if start.family() != end.family() {
            Some("start and end belong to different address families")
        } else if start > end {
            Some("start is greater than end")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CollectorError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
                reason,
            }),
            None => Ok(Self { start, end }),
        }
    }

    /// Parses both bounds from text.
    pub fn parse(start: &str, end: &str) -> Result<Self, CollectorError> {
        let invalid = |reason| CollectorError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
            reason,
        };
        let start_addr = AddressValue::parse(start).map_err(|_| invalid("start is not an IP address"))?;
        let end_addr = AddressValue::parse(end).map_err(|_| invalid("end is not an IP address"))?;

        Self::new(start_addr, end_addr).map_err(|e| match e {
            CollectorError::InvalidRange { reason, .. } => invalid(reason),
            other => other,
        })
    }

    pub fn single(addr: AddressValue) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// The whole network containing `addr` for the given prefix length.
    ///
    /// Host bits in `addr` are ignored, so `10.0.0.7/30` yields `10.0.0.4 - 10.0.0.7`.
    /// Network and broadcast addresses are part of the block.
    pub fn from_prefix(addr: AddressValue, prefix: u8) -> Option<Self> {
        let family = addr.family();
        if prefix > family.bits() {
            return None;
        }
        let mask = family.netmask(prefix);
        let network = addr.bits() & mask;
        let broadcast = network | (family.max_value() & !mask);

        Some(Self {
            start: AddressValue::from_bits(family, network)?,
            end: AddressValue::from_bits(family, broadcast)?,
        })
    }

    pub fn start(&self) -> AddressValue {
        self.start
    }

    pub fn end(&self) -> AddressValue {
        self.end
    }

    pub fn family(&self) -> AddressFamily {
        self.start.family()
    }

    pub fn contains(&self, addr: &AddressValue) -> bool {
        self.start <= *addr && *addr <= self.end
    }

    /// Number of addresses in the block, saturating at `u128::MAX` for `::/0`.
    pub fn len(&self) -> u128 {
        (self.end.bits() - self.start.bits()).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the block from low to high.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: Some(self.start),
            end: self.end,
        }
    }

    fn overlaps_or_touches(&self, other: &AddressRange) -> bool {
        if self.family() != other.family() {
            return false;
        }
        let reaches = |a: &AddressRange, b: &AddressRange| match a.end.checked_next() {
            Some(after) => after >= b.start,
            None => true,
        };
        if self.start <= other.start {
            reaches(self, other)
        } else {
            reaches(other, self)
        }
    }
}

impl IntoIterator for AddressRange {
    type Item = AddressValue;
    type IntoIter = RangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Low-to-high walk over an [`AddressRange`] that never steps past the family maximum.
#[derive(Debug, Clone)]
pub struct RangeIter {
    next: Option<AddressValue>,
    end: AddressValue,
}

impl Iterator for RangeIter {
    type Item = AddressValue;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end {
            current.checked_next()
        } else {
            None
        };
        Some(current)
    }
}

/// Parses `addr/prefix` into the block it denotes.
pub fn cidr_range(notation: &str) -> Result<AddressRange, CollectorError> {
    let invalid = |reason: String| CollectorError::InvalidNetwork {
        notation: notation.to_string(),
        reason,
    };

    let Some((ip_str, prefix_str)) = notation.trim().split_once('/') else {
        return Err(invalid("missing '/prefix'".into()));
    };
    let ip = ip_str
        .parse::<IpAddr>()
        .map_err(|e| invalid(format!("bad address '{ip_str}': {e}")))?;
    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| invalid(format!("bad prefix '{prefix_str}': {e}")))?;

    let network = IpNetwork::new(ip, prefix).map_err(|e| invalid(e.to_string()))?;

    AddressRange::from_prefix(AddressValue::from(network.ip()), network.prefix())
        .ok_or_else(|| invalid(format!("prefix {prefix} out of range")))
}

/// Converts a contiguous netmask (`255.255.255.0`, `ffff:ffff::`) into a prefix length.
pub fn mask_to_prefix(mask: &AddressValue) -> Option<u8> {
    match mask.to_ip_addr() {
        IpAddr::V4(v4) => ipnetwork::ipv4_mask_to_prefix(v4).ok(),
        IpAddr::V6(v6) => ipnetwork::ipv6_mask_to_prefix(v6).ok(),
    }
}

/// Converts a wildcard mask (`0.0.0.255`) into the prefix length of the equivalent netmask.
///
/// Only masks whose set bits are all trailing are accepted.
pub fn wildcard_to_prefix(wildcard: &AddressValue) -> Option<u8> {
    let family = wildcard.family();
    let inverted = AddressValue::from_bits(family, family.max_value() & !wildcard.bits())?;
    mask_to_prefix(&inverted)
}

/// Sorted, disjoint, non-adjacent ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<AddressRange>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the union of arbitrary, possibly overlapping ranges.
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = AddressRange>,
    {
        let mut sorted: Vec<AddressRange> = ranges.into_iter().collect();
        sorted.sort_by_key(|r| r.start);

        let mut merged: Vec<AddressRange> = Vec::with_capacity(sorted.len());
        for next in sorted {
            match merged.last_mut() {
                Some(current) if current.overlaps_or_touches(&next) => {
                    if next.end > current.end {
                        current.end = next.end;
                    }
                }
                _ => merged.push(next),
            }
        }

        Self { ranges: merged }
    }

    pub fn insert(&mut self, range: AddressRange) {
        let mut ranges = std::mem::take(&mut self.ranges);
        ranges.push(range);
        *self = Self::from_ranges(ranges);
    }

    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Binary search over the sorted ranges.
    pub fn contains(&self, addr: &AddressValue) -> bool {
        let mut start = 0;
        let mut end = self.ranges.len();
        while start < end {
            let mid = (start + end) / 2;
            let range = &self.ranges[mid];
            if range.end < *addr {
                start = mid + 1;
            } else if range.start > *addr {
                end = mid;
            } else {
                return true;
            }
        }
        false
    }

    /// Total number of addresses, saturating at `u128::MAX`.
    pub fn count(&self) -> u128 {
        self.ranges
            .iter()
            .fold(0u128, |total, range| total.saturating_add(range.len()))
    }

    /// Every address covered by `self` but not by `other`.
    pub fn difference(&self, other: &RangeSet) -> RangeSet {
        let mut remaining: Vec<AddressRange> = Vec::new();

        for range in &self.ranges {
            let mut cursor = Some(range.start);

            for cut in other
                .ranges
                .iter()
                .filter(|cut| cut.family() == range.family())
                .skip_while(|cut| cut.end < range.start)
                .take_while(|cut| cut.start <= range.end)
            {
                let Some(from) = cursor else { break };
                if cut.start > from {
                    if let Some(until) = cut.start.checked_prev() {
                        remaining.push(AddressRange {
                            start: from,
                            end: until,
                        });
                    }
                }
                cursor = if cut.end >= range.end {
                    None
                } else {
                    cut.end.checked_next()
                };
            }

            if let Some(from) = cursor {
                if from <= range.end {
                    remaining.push(AddressRange {
                        start: from,
                        end: range.end,
                    });
                }
            }
        }

        RangeSet { ranges: remaining }
    }

    pub fn iter(&self) -> impl Iterator<Item = AddressValue> + '_ {
        self.ranges.iter().flat_map(|range| range.iter())
    }
}

impl FromIterator<AddressRange> for RangeSet {
    fn from_iter<I: IntoIterator<Item = AddressRange>>(iter: I) -> Self {
        Self::from_ranges(iter)
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
