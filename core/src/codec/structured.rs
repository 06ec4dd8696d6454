//! JSON and YAML documents.
//!
//! Export always produces `{ "<key>": [ ... ] }`. Import also accepts a bare
//! list of strings and an optional `ranges` list of `[start, end]` pairs.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::codec::{RecordKind, Records};
use crate::error::CodecError;

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    ip_addresses: Vec<String>,
    #[serde(default)]
    mac_addresses: Vec<String>,
    #[serde(default)]
    ranges: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Input {
    List(Vec<String>),
    Document(Document),
}

impl Input {
    fn into_records(self, kind: RecordKind) -> Records {
        match self {
            Input::List(values) => Records {
                values,
                ranges: Vec::new(),
            },
            Input::Document(doc) => match kind {
                RecordKind::Ip => Records {
                    values: doc.ip_addresses,
                    ranges: doc.ranges,
                },
                RecordKind::Mac => Records {
                    values: doc.mac_addresses,
                    ranges: Vec::new(),
                },
            },
        }
    }
}

fn document(values: Vec<String>, kind: RecordKind) -> BTreeMap<&'static str, Vec<String>> {
    BTreeMap::from([(kind.key(), values)])
}

pub(super) fn write_json(values: Vec<String>, kind: RecordKind) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec_pretty(&document(values, kind))?)
}

pub(super) fn write_yaml(values: Vec<String>, kind: RecordKind) -> Result<Vec<u8>, CodecError> {
    Ok(serde_yaml::to_string(&document(values, kind))?.into_bytes())
}

pub(super) fn read_json(bytes: &[u8], kind: RecordKind) -> Result<Records, CodecError> {
    let input: Input = serde_json::from_slice(bytes)?;
    Ok(input.into_records(kind))
}

pub(super) fn read_yaml(bytes: &[u8], kind: RecordKind) -> Result<Records, CodecError> {
    let input: Input = serde_yaml::from_slice(bytes)?;
    Ok(input.into_records(kind))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
