//! Core token trait definitions.

use std::fmt::Debug;
use std::hash::Hash;

/// Represents a position token on the hash ring.
///
/// Tokens are immutable, comparable, hashable values that are cheap to copy
/// and safe to share across threads — stable, owned values that live happily
/// in maps without lifetime headaches.
pub trait Token: Copy + Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// The zero (minimum) token value.
    fn zero() -> Self;

    /// The maximum token value.
    fn max() -> Self;

    /// Whether this token is the minimum value.
    fn is_zero(&self) -> bool;

    /// Whether this token is the maximum value.
    fn is_max(&self) -> bool;

    /// Clockwise distance from `self` to `other`, wrapping past `max()`.
    fn distance_to(&self, other: &Self) -> Self;
}

/// Error produced while constructing or manipulating a token.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token bytes: {0}")]
    InvalidBytes(String),
}
