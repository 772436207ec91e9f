//! Logging shim.
//!
//! Routes `debug!` and `error!` to `defmt` or `log` depending on the enabled
//! feature. With neither feature the macros expand to nothing but still
//! borrow their arguments so callers don't trip unused-variable lints.

#![allow(unused_macros)]

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        macro_rules! debug {
            ($($arg:tt)*) => { ::defmt::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { ::defmt::error!($($arg)*) };
        }
    } else if #[cfg(feature = "log")] {
        macro_rules! debug {
            ($($arg:tt)*) => { ::log::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { ::log::error!($($arg)*) };
        }
    } else {
        macro_rules! debug {
            ($s:literal $(, $x:expr)* $(,)?) => {{
                $( let _ = &$x; )*
            }};
        }
        macro_rules! error {
            ($s:literal $(, $x:expr)* $(,)?) => {{
                $( let _ = &$x; )*
            }};
        }
    }
}
