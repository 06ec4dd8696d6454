//! # MAC Address Collection
//!
//! Validated storage and generation of 48-bit hardware addresses.
//!
//! Addresses are kept as integers so sequential generation is plain
//! fixed-width arithmetic; they are rendered through [`MacAddr`], which prints
//! the canonical lowercase `xx:xx:xx:xx:xx:xx` form.

use std::collections::BTreeSet;

use pnet::util::MacAddr;
use rand::Rng;
use tracing::debug;

use crate::error::CollectorError;

const MAC_SPACE: u64 = 1 << 48;
const MAC_MASK: u64 = MAC_SPACE - 1;

#[derive(Debug, Clone, Default)]
pub struct MacCollector {
    addresses: BTreeSet<u64>,
}

impl MacCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict format check: six groups of exactly two hex digits separated by `:`.
    pub fn is_valid_mac(value: &str) -> bool {
        let groups: Vec<&str> = value.split(':').collect();
        groups.len() == 6
            && groups
                .iter()
                .all(|group| group.len() == 2 && group.chars().all(|c| c.is_ascii_hexdigit()))
    }

    /// Adds one address. Input may use either case; duplicates collapse.
    pub fn add_mac(&mut self, value: &str) -> Result<(), CollectorError> {
        let mac = parse_mac(value)?;
        if !self.addresses.insert(mac) {
            debug!("{} already in collection", to_mac_addr(mac));
        }
        Ok(())
    }

    /// Adds several addresses. Either all of them are added or, when one is
    /// invalid, none are.
    pub fn add_macs<I, S>(&mut self, values: I) -> Result<(), CollectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = values
            .into_iter()
            .map(|value| parse_mac(value.as_ref()))
            .collect::<Result<Vec<u64>, _>>()?;

        debug!("Adding {} MAC addresses to collection", parsed.len());
        self.addresses.extend(parsed);
        Ok(())
    }

    /// Adds `count` consecutive addresses starting at `start`.
    ///
    /// The address behaves like a 48-bit unsigned counter: `..:44:ff` is followed
    /// by `..:45:00` and `ff:ff:ff:ff:ff:ff` wraps to `00:00:00:00:00:00`.
    pub fn generate_sequential_macs(&mut self, start: &str, count: u64) -> Result<(), CollectorError> {
        let first = parse_mac(start)?;
        debug!("Generating {count} sequential MAC addresses from {}", to_mac_addr(first));

        for step in 0..count.min(MAC_SPACE) {
            self.addresses.insert(first.wrapping_add(step) & MAC_MASK);
        }
        Ok(())
    }

    /// Adds `count` random addresses, none of which were already collected.
    pub fn generate_random_macs(&mut self, count: u64) -> Result<(), CollectorError> {
        let available = MAC_SPACE - self.addresses.len() as u64;
        if count > available {
            return Err(CollectorError::MacSpaceExhausted {
                requested: count,
                available,
            });
        }

        let mut rng = rand::rng();
        let mut fresh: BTreeSet<u64> = BTreeSet::new();
        let mut collisions: u64 = 0;

        while (fresh.len() as u64) < count {
            let candidate = rng.random::<u64>() & MAC_MASK;
            if self.addresses.contains(&candidate) || !fresh.insert(candidate) {
                collisions += 1;
            }
        }

        if collisions > 0 {
            debug!("Random MAC generation retried {collisions} times on collisions");
        }
        self.addresses.extend(fresh);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.addresses.clear();
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Membership test; accepts any case, invalid input is simply not contained.
    pub fn contains(&self, value: &str) -> bool {
        parse_mac(value).is_ok_and(|mac| self.addresses.contains(&mac))
    }

    /// Addresses in ascending numeric order.
    pub fn iter(&self) -> impl Iterator<Item = MacAddr> + '_ {
        self.addresses.iter().map(|mac| to_mac_addr(*mac))
    }

    /// Canonical lowercase strings in ascending order.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|mac| mac.to_string()).collect()
    }
}

fn parse_mac(value: &str) -> Result<u64, CollectorError> {
    if !MacCollector::is_valid_mac(value) {
        return Err(CollectorError::InvalidMac(value.to_string()));
    }
    value
        .split(':')
        .try_fold(0u64, |acc, group| {
            u8::from_str_radix(group, 16).map(|octet| (acc << 8) | u64::from(octet))
        })
        .map_err(|_| CollectorError::InvalidMac(value.to_string()))
}

fn to_mac_addr(mac: u64) -> MacAddr {
    let b = mac.to_be_bytes();
    MacAddr::new(b[2], b[3], b[4], b[5], b[6], b[7])
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_iterate() {
        let mut macs = MacCollector::new();
        macs.add_mac("00:11:22:33:44:55").unwrap();
        assert!(macs.contains("00:11:22:33:44:55"));
        assert_eq!(macs.len(), 1);

        macs.add_macs(["aa:bb:cc:dd:ee:ff", "11:22:33:44:55:66"]).unwrap();
        assert_eq!(macs.len(), 3);
        assert_eq!(
            macs.to_strings(),
            vec!["00:11:22:33:44:55", "11:22:33:44:55:66", "aa:bb:cc:dd:ee:ff"]
        );
    }

    #[test]
    fn uppercase_input_is_stored_lowercase() {
        let mut macs = MacCollector::new();
        macs.add_mac("AA:BB:CC:0D:0E:0F").unwrap();
        assert!(macs.contains("aa:bb:cc:0d:0e:0f"));
        assert_eq!(macs.to_strings(), vec!["aa:bb:cc:0d:0e:0f"]);
    }

    #[test]
    fn rejects_malformed_input() {
        let mut macs = MacCollector::new();
        for bad in [
            "invalid_mac",
            "00:11:22:33:44",
            "gg:hh:ii:jj:kk:ll",
            "00:11:22:33:44:55:66",
            "0:11:22:33:44:55",
            "000:11:22:33:44:55",
            "00-11-22-33-44-55",
            "",
        ] {
            assert_eq!(macs.add_mac(bad), Err(CollectorError::InvalidMac(bad.to_string())));
            assert!(!MacCollector::is_valid_mac(bad));
        }
        assert!(macs.is_empty());
        assert_eq!(macs.iter().count(), 0);
    }

    #[test]
    fn duplicates_collapse() {
        let mut macs = MacCollector::new();
        macs.add_mac("00:11:22:33:44:55").unwrap();
        macs.add_mac("00:11:22:33:44:55").unwrap();
        assert_eq!(macs.len(), 1);
    }

    #[test]
    fn add_macs_is_all_or_nothing() {
        let mut macs = MacCollector::new();
        macs.add_mac("00:00:00:00:00:01").unwrap();

        let result = macs.add_macs(["00:00:00:00:00:02", "zz:00:00:00:00:03", "00:00:00:00:00:04"]);
        assert!(matches!(result, Err(CollectorError::InvalidMac(_))));
        assert_eq!(macs.len(), 1);
        assert!(!macs.contains("00:00:00:00:00:02"));
    }

    #[test]
    fn sequential_generation() {
        let mut macs = MacCollector::new();
        macs.generate_sequential_macs("00:11:22:33:44:55", 3).unwrap();
        assert_eq!(
            macs.to_strings(),
            vec!["00:11:22:33:44:55", "00:11:22:33:44:56", "00:11:22:33:44:57"]
        );
    }

    #[test]
    fn sequential_generation_carries_into_next_octet() {
        let mut macs = MacCollector::new();
        macs.generate_sequential_macs("00:11:22:33:44:ff", 3).unwrap();
        assert_eq!(
            macs.to_strings(),
            vec!["00:11:22:33:44:ff", "00:11:22:33:45:00", "00:11:22:33:45:01"]
        );

        macs.clear();
        macs.generate_sequential_macs("00:ff:ff:ff:ff:ff", 2).unwrap();
        assert_eq!(macs.to_strings(), vec!["00:ff:ff:ff:ff:ff", "01:00:00:00:00:00"]);
    }

    #[test]
    fn sequential_generation_wraps_at_48_bits() {
        let mut macs = MacCollector::new();
        macs.generate_sequential_macs("ff:ff:ff:ff:ff:fe", 4).unwrap();
        assert_eq!(
            macs.to_strings(),
            vec![
                "00:00:00:00:00:00",
                "00:00:00:00:00:01",
                "ff:ff:ff:ff:ff:fe",
                "ff:ff:ff:ff:ff:ff"
            ]
        );
    }

    #[test]
    fn sequential_generation_validates_start() {
        let mut macs = MacCollector::new();
        assert!(macs.generate_sequential_macs("00:11:22:33:44", 3).is_err());
        assert!(macs.is_empty());
    }

    #[test]
    fn random_generation_is_distinct_and_well_formed() {
        let mut macs = MacCollector::new();
        macs.generate_random_macs(5).unwrap();
        assert_eq!(macs.len(), 5);

        let all = macs.to_strings();
        let unique: BTreeSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), 5);
        for mac in &all {
            assert!(MacCollector::is_valid_mac(mac));
            assert_eq!(mac.split(':').count(), 6);
            assert_eq!(mac.to_lowercase(), *mac);
        }
    }

    #[test]
    fn random_generation_avoids_existing_entries() {
        let mut macs = MacCollector::new();
        macs.add_mac("00:11:22:33:44:55").unwrap();
        macs.generate_random_macs(3).unwrap();
        assert_eq!(macs.len(), 4);

        macs.clear();
        assert_eq!(macs.len(), 0);
        assert_eq!(macs.iter().next(), None);
    }

    #[test]
    fn random_generation_refuses_impossible_requests() {
        let mut macs = MacCollector::new();
        macs.add_mac("00:00:00:00:00:00").unwrap();
        assert_eq!(
            macs.generate_random_macs(MAC_SPACE),
            Err(CollectorError::MacSpaceExhausted {
                requested: MAC_SPACE,
                available: MAC_SPACE - 1
            })
        );
        assert_eq!(macs.len(), 1);
    }

    #[test]
    fn sequential_generation_collapses_into_existing() {
        let mut macs = MacCollector::new();
        macs.add_mac("00:00:00:00:00:00").unwrap();
        macs.generate_sequential_macs("ff:ff:ff:ff:ff:ff", 2).unwrap();
        assert_eq!(macs.len(), 2);
        assert!(macs.contains("ff:ff:ff:ff:ff:ff"));

        macs.clear();
        macs.generate_sequential_macs("02:00:00:00:00:00", 10).unwrap();
        macs.generate_sequential_macs("02:00:00:00:00:05", 10).unwrap();
        assert_eq!(macs.len(), 15);
        assert_eq!(macs.to_strings().last().map(String::as_str), Some("02:00:00:00:00:0e"));
    }
}
