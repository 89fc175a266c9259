//! Contains implementations of the `Board` trait.

/// A `Board` implementation for Connect-Four on a board of any size.
pub mod connect_four;
