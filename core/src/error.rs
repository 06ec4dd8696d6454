use std::path::PathBuf;

use ipgen_common::CollectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot tell the format of '{0}', pass one explicitly")]
    UnknownFormat(PathBuf),

    #[error("column '{0}' not found in header")]
    MissingColumn(String),

    #[error("{0} rows do not fit into a single worksheet")]
    TooManyRows(usize),

    #[error("{count} addresses are too many to export (limit {limit})")]
    TooManyAddresses { count: u128, limit: u128 },

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("unreadable spreadsheet: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error(transparent)]
    Collector(#[from] CollectorError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
