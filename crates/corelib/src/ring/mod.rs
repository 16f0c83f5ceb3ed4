//! Consistent hash ring implementation.
//!
//! The ring manages token positions and provides efficient lookup
//! operations for finding nodes responsible for keys.

pub mod md5_ring;
pub mod position;
pub mod ring;

pub use md5_ring::Md5Ring;
pub use position::RingPosition;
pub use ring::{HashRing, RingBuilder};

/// Alias for the main ring type (used by lib.rs).
pub type Ring = HashRing;
