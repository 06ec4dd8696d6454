//! # ipgen common
//!
//! Address and MAC collection models shared by the codec layer and the CLI.
//!
//! * **[`network`]**: address values, ranges, the collectors and the input notation parser.
//! * **[`error`]**: the validation error raised by every mutating operation.
//! * **[`config`]**: user-facing settings filled in by the CLI.

pub mod config;
pub mod error;
pub mod log;
pub mod network;

pub use error::CollectorError;
pub use network::address::{AddressFamily, AddressValue};
pub use network::collection::AddressCollector;
pub use network::mac::MacCollector;
pub use network::notation::Notation;
pub use network::range::{AddressRange, RangeSet};
