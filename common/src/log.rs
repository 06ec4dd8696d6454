//! Status-line macros on top of `tracing`.
//!
//! The CLI formatter renders each target with its own glyph, so library code
//! can report outcomes without knowing how the terminal looks.

#[doc(hidden)]
pub use tracing as __tracing;

pub const SUCCESS_TARGET: &str = "ipgen::success";
pub const PRINT_TARGET: &str = "ipgen::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!(target: "ipgen::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}
