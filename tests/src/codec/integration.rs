use std::collections::BTreeSet;
use std::path::PathBuf;

use ipgen_common::config::Config;
use ipgen_common::{AddressCollector, AddressValue, MacCollector};
use ipgen_core::codec::Format;

fn sample() -> AddressCollector {
    let mut collection = AddressCollector::new();
    collection.add_range("192.168.1.1", "192.168.1.5").unwrap();
    collection.add_cidr("10.0.0.0/30").unwrap();
    collection.add_ip("2001:db8::1").unwrap();
    collection.exclude_ips(["192.168.1.3"]).unwrap();
    collection
}

fn as_set(collection: &AddressCollector) -> BTreeSet<AddressValue> {
    collection.generate().collect()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ipgen-{}-{name}", std::process::id()))
}

/// Exporting and importing again yields the same set for every format.
#[test]
fn address_round_trip_all_formats() {
    let cfg = Config::default();
    let original = sample();

    for format in Format::ALL {
        let bytes = ipgen_core::export_addresses(&original, format, &cfg).unwrap();
        let imported = ipgen_core::import_addresses(&bytes, format, &cfg).unwrap();
        assert_eq!(as_set(&imported), as_set(&original), "round trip through {format}");
        assert_eq!(imported.len(), original.len());
    }
}

#[test]
fn csv_round_trip_with_custom_delimiter_and_column() {
    let cfg = Config {
        delimiter: b';',
        ip_column: "host".to_string(),
        ..Config::default()
    };
    let original = sample();

    let bytes = ipgen_core::export_addresses(&original, Format::Csv, &cfg).unwrap();
    assert!(bytes.starts_with(b"host\n"));
    let imported = ipgen_core::import_addresses(&bytes, Format::Csv, &cfg).unwrap();
    assert_eq!(as_set(&imported), as_set(&original));
}

#[test]
fn mac_round_trip() {
    let cfg = Config::default();
    let mut original = MacCollector::new();
    original.generate_sequential_macs("00:11:22:33:44:fe", 4).unwrap();
    original.generate_random_macs(16).unwrap();

    for format in Format::ALL {
        let bytes = ipgen_core::export_macs(&original, format, &cfg).unwrap();
        let imported = ipgen_core::import_macs(&bytes, format, &cfg).unwrap();
        assert_eq!(imported.to_strings(), original.to_strings(), "round trip through {format}");
    }
}

#[test]
fn file_round_trip_detects_format_from_extension() {
    let cfg = Config::default();
    let original = sample();
    let path = temp_path("addresses.json");

    let bytes = ipgen_core::export_addresses(&original, Format::Json, &cfg).unwrap();
    ipgen_core::write_file(&path, &bytes).unwrap();

    let (read, format) = ipgen_core::read_file(&path, None).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(format, Format::Json);
    let imported = ipgen_core::import_addresses(&read, format, &cfg).unwrap();
    assert_eq!(as_set(&imported), as_set(&original));
}

#[test]
fn several_imports_merge() {
    let cfg = Config::default();
    let first = ipgen_core::import_addresses(b"10.0.0.1\n10.0.0.2\n", Format::Text, &cfg).unwrap();
    let second = ipgen_core::import_addresses(br#"["10.0.0.2", "10.0.0.3"]"#, Format::Json, &cfg).unwrap();

    let merged: AddressCollector = [first, second].into_iter().collect();
    assert_eq!(merged.len(), 3);
}

#[test]
fn csv_saved_with_byte_order_mark_imports() {
    let cfg = Config::default();
    let imported = ipgen_core::import_addresses("\u{feff}ip_address\n10.0.0.1\n".as_bytes(), Format::Csv, &cfg).unwrap();
    assert!(imported.contains(&AddressValue::parse("10.0.0.1").unwrap()));
    assert_eq!(imported.len(), 1);
}

#[test]
fn xlsx_file_round_trip() {
    let cfg = Config::default();
    let original = sample();
    let path = temp_path("addresses.xlsx");

    let bytes = ipgen_core::export_addresses(&original, Format::Xlsx, &cfg).unwrap();
    ipgen_core::write_file(&path, &bytes).unwrap();

    let (read, format) = ipgen_core::read_file(&path, None).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(format, Format::Xlsx);
    let imported = ipgen_core::import_addresses(&read, format, &cfg).unwrap();
    assert_eq!(as_set(&imported), as_set(&original));
}
