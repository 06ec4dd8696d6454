pub mod address;
pub mod collection;
pub mod mac;
pub mod notation;
pub mod range;
