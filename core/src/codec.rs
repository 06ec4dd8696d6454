//! # Codecs
//!
//! Turns collector contents into bytes and back.
//!
//! Every codec works on plain strings: exporting takes the already expanded
//! values, importing returns [`Records`] that the caller feeds into a collector
//! through its public `add_*` operations.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ipgen_common::config::Config;

use crate::error::CodecError;

mod delimited;
mod spreadsheet;
mod structured;

/// Supported on-disk representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
    Text,
    Json,
    Yaml,
    Xlsx,
}

impl Format {
    pub const ALL: [Format; 6] = [
        Format::Csv,
        Format::Tsv,
        Format::Text,
        Format::Json,
        Format::Yaml,
        Format::Xlsx,
    ];

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Format::Csv),
            "tsv" => Some(Format::Tsv),
            "txt" | "lst" => Some(Format::Text),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "xlsx" => Some(Format::Xlsx),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Tsv => "tsv",
            Format::Text => "text",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.name() == lower)
            .or(match lower.as_str() {
                "txt" => Some(Format::Text),
                "yml" => Some(Format::Yaml),
                _ => None,
            })
            .ok_or_else(|| {
                let known: Vec<&str> = Format::ALL.iter().map(Format::name).collect();
                format!("unknown format '{s}', expected one of: {}", known.join(", "))
            })
    }
}

/// What kind of values a document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Ip,
    Mac,
}

impl RecordKind {
    /// Key used by structured formats.
    pub fn key(&self) -> &'static str {
        match self {
            RecordKind::Ip => "ip_addresses",
            RecordKind::Mac => "mac_addresses",
        }
    }

    /// Header used by tabular formats.
    pub fn column<'a>(&self, cfg: &'a Config) -> &'a str {
        match self {
            RecordKind::Ip => &cfg.ip_column,
            RecordKind::Mac => &cfg.mac_column,
        }
    }
}

/// Values read back from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    pub values: Vec<String>,
    /// `(start, end)` pairs; only structured IP documents carry these.
    pub ranges: Vec<(String, String)>,
}

/// Serializes fully expanded values.
pub fn encode<I>(values: I, kind: RecordKind, format: Format, cfg: &Config) -> Result<Vec<u8>, CodecError>
where
    I: IntoIterator<Item = String>,
{
    let values: Vec<String> = values.into_iter().collect();
    tracing::debug!("Encoding {} values as {format}", values.len());

    match format {
        Format::Csv => Ok(delimited::write(&values, Some(kind.column(cfg)), cfg.delimiter)),
        Format::Tsv => Ok(delimited::write(&values, Some(kind.column(cfg)), b'\t')),
        Format::Text => Ok(delimited::write(&values, None, b'\n')),
        Format::Json => structured::write_json(values, kind),
        Format::Yaml => structured::write_yaml(values, kind),
        Format::Xlsx => spreadsheet::write(&values, kind.column(cfg)),
    }
}

/// Parses a document into raw values.
pub fn decode(bytes: &[u8], kind: RecordKind, format: Format, cfg: &Config) -> Result<Records, CodecError> {
    let records = match format {
        Format::Csv => delimited::read(std::str::from_utf8(bytes)?, kind.column(cfg), cfg.delimiter)?,
        Format::Tsv => delimited::read(std::str::from_utf8(bytes)?, kind.column(cfg), b'\t')?,
        Format::Text => delimited::read_lines(std::str::from_utf8(bytes)?),
        Format::Json => structured::read_json(bytes, kind)?,
        Format::Yaml => structured::read_yaml(bytes, kind)?,
        Format::Xlsx => spreadsheet::read(bytes, kind.column(cfg))?,
    };
    tracing::debug!(
        "Decoded {} values and {} ranges from {format}",
        records.values.len(),
        records.ranges.len()
    );
    Ok(records)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
