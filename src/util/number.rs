//! A set of utilities for working with the numbers backing currency values.

/// Create a number.
///
/// This is mostly a wrapper around the underlying decimal type that makes it
/// easier to swap out the numeric backing crate-wide without having to
/// change each instance by hand, but can also be used by callers of the
/// crate to create values more seamlessly.
#[macro_export]
macro_rules! num {
    ($val:expr) => {
        rust_decimal_macros::dec!($val)
    }
}
