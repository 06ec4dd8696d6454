//! # ipgen core
//!
//! Moves collector contents in and out of files.
//!
//! * **[`codec`]**: format detection and the per-format encoders/decoders.
//! * **[`error`]**: [`CodecError`], covering I/O, parse and validation failures.
//!
//! Imports always go through the collectors' public `add_*` operations, so an
//! imported document is validated exactly like typed-in input.

pub mod codec;
pub mod error;

use std::fs;
use std::path::Path;

use ipgen_common::config::Config;
use ipgen_common::{AddressCollector, MacCollector};
use tracing::debug;

use crate::codec::{Format, RecordKind, Records};
pub use crate::error::CodecError;

/// Largest address collection [`export_addresses`] will expand.
pub const EXPORT_LIMIT: u128 = 1 << 24;

/// Expands `collection` and encodes it as `format`.
pub fn export_addresses(
    collection: &AddressCollector,
    format: Format,
    cfg: &Config,
) -> Result<Vec<u8>, CodecError> {
    let count = collection.len();
    if count > EXPORT_LIMIT {
        return Err(CodecError::TooManyAddresses {
            count,
            limit: EXPORT_LIMIT,
        });
    }
    let values = collection.generate().map(|addr| addr.to_string());
    codec::encode(values, RecordKind::Ip, format, cfg)
}

pub fn export_macs(collection: &MacCollector, format: Format, cfg: &Config) -> Result<Vec<u8>, CodecError> {
    codec::encode(collection.to_strings(), RecordKind::Mac, format, cfg)
}

/// Builds an address collection from a document. The first invalid value aborts the import.
pub fn import_addresses(bytes: &[u8], format: Format, cfg: &Config) -> Result<AddressCollector, CodecError> {
    let Records { values, ranges } = codec::decode(bytes, RecordKind::Ip, format, cfg)?;

    let mut collection = AddressCollector::new();
    for value in &values {
        collection.add_ip(value)?;
    }
    for (start, end) in &ranges {
        collection.add_range(start, end)?;
    }

    debug!("Imported {} addresses and {} ranges", values.len(), ranges.len());
    Ok(collection)
}

pub fn import_macs(bytes: &[u8], format: Format, cfg: &Config) -> Result<MacCollector, CodecError> {
    let Records { values, .. } = codec::decode(bytes, RecordKind::Mac, format, cfg)?;

    let mut collection = MacCollector::new();
    collection.add_macs(&values)?;

    debug!("Imported {} MAC addresses", values.len());
    Ok(collection)
}

/// Uses `format` when given, otherwise guesses it from the file extension.
pub fn resolve_format(path: &Path, format: Option<Format>) -> Result<Format, CodecError> {
    format
        .or_else(|| Format::from_path(path))
        .ok_or_else(|| CodecError::UnknownFormat(path.to_path_buf()))
}

pub fn read_file(path: &Path, format: Option<Format>) -> Result<(Vec<u8>, Format), CodecError> {
    let format = resolve_format(path, format)?;
    let bytes = fs::read(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok((bytes, format))
}

pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CodecError> {
    fs::write(path, bytes).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
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
    use ipgen_common::{AddressValue, CollectorError};

    #[test]
    fn import_applies_ranges_from_documents() {
        let doc = br#"{"ip_addresses": ["10.0.0.9"], "ranges": [["10.0.0.1", "10.0.0.3"]]}"#;
        let collection = import_addresses(doc, Format::Json, &Config::default()).unwrap();
        assert_eq!(collection.len(), 4);
        assert!(collection.contains(&AddressValue::parse("10.0.0.2").unwrap()));
    }

    #[test]
    fn import_fails_on_first_bad_value() {
        let result = import_addresses(b"10.0.0.1\nnope\n", Format::Text, &Config::default());
        assert!(matches!(
            result,
            Err(CodecError::Collector(CollectorError::InvalidAddress(value))) if value == "nope"
        ));
    }

    #[test]
    fn import_macs_rejects_malformed_entries() {
        let result = import_macs(b"00:11:22:33:44:55\n00-11-22-33-44-55\n", Format::Text, &Config::default());
        assert!(matches!(result, Err(CodecError::Collector(CollectorError::InvalidMac(_)))));
    }

    #[test]
    fn export_refuses_huge_collections() {
        let mut collection = AddressCollector::new();
        collection.add_cidr("10.0.0.0/7").unwrap();
        assert!(matches!(
            export_addresses(&collection, Format::Text, &Config::default()),
            Err(CodecError::TooManyAddresses { .. })
        ));
    }

    #[test]
    fn export_honours_exclusions() {
        let mut collection = AddressCollector::new();
        collection.add_cidr("192.168.1.0/30").unwrap();
        collection.exclude_ips(["192.168.1.1"]).unwrap();
        let bytes = export_addresses(&collection, Format::Text, &Config::default()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "192.168.1.0\n192.168.1.2\n192.168.1.3\n"
        );
    }

    #[test]
    fn format_resolution() {
        assert_eq!(resolve_format(Path::new("a.json"), None).unwrap(), Format::Json);
        assert_eq!(resolve_format(Path::new("a.json"), Some(Format::Csv)).unwrap(), Format::Csv);
        assert!(matches!(
            resolve_format(Path::new("a.bin"), None),
            Err(CodecError::UnknownFormat(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_file(Path::new("/nonexistent/ipgen/list.txt"), None).unwrap_err();
        assert!(err.to_string().starts_with("/nonexistent/ipgen/list.txt"));
    }
}
