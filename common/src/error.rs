use thiserror::Error;

/// Validation failures raised by the collectors.
///
/// Each variant keeps the offending input so the shell can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    #[error("invalid IP address '{0}'")]
    InvalidAddress(String),

    #[error("invalid range '{start}' - '{end}': {reason}")]
    InvalidRange {
        start: String,
        end: String,
        reason: &'static str,
    },

    #[error("invalid network '{notation}': {reason}")]
    InvalidNetwork {
        notation: String,
        reason: String,
    },

    #[error("invalid wildcard mask '{mask}' for '{ip}': {reason}")]
    InvalidWildcard {
        ip: String,
        mask: String,
        reason: &'static str,
    },

    #[error("invalid subnet mask '{mask}' for gateway '{gateway}': {reason}")]
    InvalidSubnet {
        gateway: String,
        mask: String,
        reason: &'static str,
    },

    #[error("invalid MAC address '{0}', expected XX:XX:XX:XX:XX:XX")]
    InvalidMac(String),

    #[error("cannot generate {requested} unique MAC addresses, only {available} left")]
    MacSpaceExhausted { requested: u64, available: u64 },
}
