//! # Address Collection
//!
//! Accumulates addresses from every supported input notation and answers
//! membership, size and enumeration questions about the net result.
//!
//! The collector never stores expanded addresses. It keeps what the caller
//! asked for (single addresses, blocks, exclusions) and derives everything
//! else on demand:
//!
//! ```text
//! member(a) = (a in singles || a in ranges) && !(a in excluded || a in excluded_ranges)
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::CollectorError;
use crate::network::address::AddressValue;
use crate::network::range::{self, AddressRange, RangeSet};

#[derive(Debug, Clone, Default)]
pub struct AddressCollector {
    singles: BTreeSet<AddressValue>,
    ranges: Vec<AddressRange>,
    excluded: BTreeSet<AddressValue>,
    excluded_ranges: Vec<AddressRange>,
    /// Merged view of `ranges` for lookups.
    range_index: RangeSet,
    /// Merged view of `excluded_ranges` for lookups.
    excluded_index: RangeSet,
}

impl AddressCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one address. Adding the same address twice is a no-op.
    pub fn add_ip(&mut self, value: &str) -> Result<(), CollectorError> {
        let addr = AddressValue::parse(value)?;
        self.add_address(addr);
        Ok(())
    }

    pub fn add_address(&mut self, addr: AddressValue) {
        if !self.singles.insert(addr) {
            debug!("{addr} already in collection");
        }
    }

    /// Adds the inclusive block `start..=end`.
    pub fn add_range(&mut self, start: &str, end: &str) -> Result<(), CollectorError> {
        let range = AddressRange::parse(start, end)?;
        self.insert_range(range);
        Ok(())
    }

    pub fn insert_range(&mut self, range: AddressRange) {
        debug!(
            "Adding {} - {} to collection (Size: {})",
            range.start(),
            range.end(),
            range.len()
        );
        self.ranges.push(range);
        self.range_index.insert(range);
    }

    /// Adds every address of a CIDR block, network and broadcast included.
    pub fn add_cidr(&mut self, notation: &str) -> Result<(), CollectorError> {
        let range = range::cidr_range(notation)?;
        self.insert_range(range);
        Ok(())
    }

    /// Adds the block described by an address and a wildcard mask such as `0.0.0.255`.
    ///
    /// Only masks equivalent to a prefix length are supported, anything else is
    /// rejected instead of being approximated.
    pub fn add_wildcard(&mut self, ip: &str, wildcard_mask: &str) -> Result<(), CollectorError> {
        let range = wildcard_range(ip, wildcard_mask)?;
        self.insert_range(range);
        Ok(())
    }

    /// Adds the network a gateway sits in. The mask may be dotted (`255.255.255.0`)
    /// or a prefix length (`24` or `/24`).
    pub fn add_gateway_subnet(&mut self, gateway: &str, subnet_mask: &str) -> Result<(), CollectorError> {
        let range = gateway_subnet_range(gateway, subnet_mask)?;
        self.insert_range(range);
        Ok(())
    }

    /// Removes individual addresses. Addresses that are not collected are ignored,
    /// but every value must still parse or nothing is excluded.
    pub fn exclude_ips<I, S>(&mut self, values: I) -> Result<(), CollectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = values
            .into_iter()
            .map(|value| AddressValue::parse(value.as_ref()))
            .collect::<Result<Vec<AddressValue>, _>>()?;

        debug!("Excluding {} addresses", parsed.len());
        self.excluded.extend(parsed);
        Ok(())
    }

    /// Removes a whole CIDR block, whether or not it overlaps what was collected.
    pub fn exclude_subnet(&mut self, notation: &str) -> Result<(), CollectorError> {
        let range = range::cidr_range(notation)?;
        self.exclude_address_range(range);
        Ok(())
    }

    /// Removes the inclusive block `start..=end`.
    pub fn exclude_range(&mut self, start: &str, end: &str) -> Result<(), CollectorError> {
        let range = AddressRange::parse(start, end)?;
        self.exclude_address_range(range);
        Ok(())
    }

    pub fn exclude_address(&mut self, addr: AddressValue) {
        self.excluded.insert(addr);
    }

    pub fn exclude_address_range(&mut self, range: AddressRange) {
        debug!("Excluding {} - {} from collection", range.start(), range.end());
        self.excluded_ranges.push(range);
        self.excluded_index.insert(range);
    }

    pub fn clear(&mut self) {
        self.singles.clear();
        self.ranges.clear();
        self.excluded.clear();
        self.excluded_ranges.clear();
        self.range_index = RangeSet::new();
        self.excluded_index = RangeSet::new();
    }

    /// Merges another collection into this one, exclusions included.
    pub fn extend(&mut self, other: AddressCollector) {
        debug!(
            "Extending collection: Adding {} ranges and {} singles",
            other.ranges.len(),
            other.singles.len()
        );
        self.singles.extend(other.singles);
        self.ranges.extend(other.ranges);
        self.excluded.extend(other.excluded);
        self.excluded_ranges.extend(other.excluded_ranges);
        self.range_index = RangeSet::from_ranges(self.ranges.iter().copied());
        self.excluded_index = RangeSet::from_ranges(self.excluded_ranges.iter().copied());
    }

    /// Starts a fresh, lazy traversal of the collection.
    ///
    /// Singles come first in ascending order, then each range in insertion
    /// order from low to high. Excluded addresses and addresses already yielded
    /// are skipped.
    pub fn generate(&self) -> Addresses<'_> {
        Addresses {
            collector: self,
            excluded: self.excluded_set(),
            singles: self.singles.iter(),
            next_range: 0,
            covered: RangeSet::new(),
            segments: Vec::new().into_iter(),
            current: None,
        }
    }

    pub fn to_list(&self) -> Vec<AddressValue> {
        self.generate().collect()
    }

    /// Number of distinct member addresses, saturating at `u128::MAX`.
    pub fn len(&self) -> u128 {
        self.included_set().difference(&self.excluded_set()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.included_set().difference(&self.excluded_set()).is_empty()
    }

    pub fn contains(&self, addr: &AddressValue) -> bool {
        let included = self.singles.contains(addr) || self.range_index.contains(addr);
        let excluded = self.excluded.contains(addr) || self.excluded_index.contains(addr);
        included && !excluded
    }

    /// Blocks as they were added, before exclusions.
    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    /// Individually added addresses, before exclusions.
    pub fn singles(&self) -> &BTreeSet<AddressValue> {
        &self.singles
    }

    fn included_set(&self) -> RangeSet {
        self.singles
            .iter()
            .copied()
            .map(AddressRange::single)
            .chain(self.range_index.ranges().iter().copied())
            .collect()
    }

    fn excluded_set(&self) -> RangeSet {
        self.excluded
            .iter()
            .copied()
            .map(AddressRange::single)
            .chain(self.excluded_index.ranges().iter().copied())
            .collect()
    }
}

/// Lazy enumeration returned by [`AddressCollector::generate`].
///
/// Each range is reduced to the segments not yet covered by earlier ranges
/// and not excluded, so overlapping input never produces duplicates.
pub struct Addresses<'a> {
    collector: &'a AddressCollector,
    excluded: RangeSet,
    singles: std::collections::btree_set::Iter<'a, AddressValue>,
    next_range: usize,
    covered: RangeSet,
    segments: std::vec::IntoIter<AddressRange>,
    current: Option<range::RangeIter>,
}

impl Addresses<'_> {
    fn advance_range(&mut self) -> bool {
        let Some(range) = self.collector.ranges.get(self.next_range).copied() else {
            return false;
        };
        self.next_range += 1;

        let fresh = RangeSet::from_ranges([range])
            .difference(&self.covered)
            .difference(&self.excluded);
        self.covered.insert(range);
        self.segments = fresh.ranges().to_vec().into_iter();
        true
    }
}

impl Iterator for Addresses<'_> {
    type Item = AddressValue;

    fn next(&mut self) -> Option<Self::Item> {
        for addr in self.singles.by_ref() {
            if !self.excluded.contains(addr) {
                return Some(*addr);
            }
        }

        loop {
            if let Some(current) = self.current.as_mut() {
                for addr in current.by_ref() {
                    if !self.collector.singles.contains(&addr) {
                        return Some(addr);
                    }
                }
                self.current = None;
            }

            match self.segments.next() {
                Some(segment) => self.current = Some(segment.iter()),
                None => {
                    if !self.advance_range() {
                        return None;
                    }
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a AddressCollector {
    type Item = AddressValue;
    type IntoIter = Addresses<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.generate()
    }
}

impl FromIterator<AddressCollector> for AddressCollector {
    fn from_iter<I: IntoIterator<Item = AddressCollector>>(iter: I) -> Self {
        let mut master = AddressCollector::new();
        for collection in iter {
            master.extend(collection);
        }
        master
    }
}

pub(crate) fn wildcard_range(ip: &str, wildcard_mask: &str) -> Result<AddressRange, CollectorError> {
    let invalid = |reason| CollectorError::InvalidWildcard {
        ip: ip.to_string(),
        mask: wildcard_mask.to_string(),
        reason,
    };

    let addr = AddressValue::parse(ip)?;
    let mask = AddressValue::parse(wildcard_mask).map_err(|_| invalid("mask is not in dotted form"))?;
    if mask.family() != addr.family() {
        return Err(invalid("mask and address belong to different families"));
    }
    let prefix = range::wildcard_to_prefix(&mask).ok_or_else(|| invalid("wildcard bits are not contiguous"))?;

    AddressRange::from_prefix(addr, prefix).ok_or_else(|| invalid("prefix out of range"))
}

pub(crate) fn gateway_subnet_range(gateway: &str, subnet_mask: &str) -> Result<AddressRange, CollectorError> {
    let invalid = |reason| CollectorError::InvalidSubnet {
        gateway: gateway.to_string(),
        mask: subnet_mask.to_string(),
        reason,
    };

    let addr = AddressValue::parse(gateway)?;
    let mask_str = subnet_mask.trim();
    let prefix = match mask_str.trim_start_matches('/').parse::<u8>() {
        Ok(prefix) => prefix,
        Err(_) => {
            let mask = AddressValue::parse(mask_str).map_err(|_| invalid("mask is neither dotted nor a prefix length"))?;
            if mask.family() != addr.family() {
                return Err(invalid("mask and gateway belong to different families"));
            }
            range::mask_to_prefix(&mask).ok_or_else(|| invalid("mask bits are not contiguous"))?
        }
    };

    AddressRange::from_prefix(addr, prefix).ok_or_else(|| invalid("prefix length too large"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
