//! MD5 hash token implementation.
//!
//! This is the token type the KV store's ring (`ring::Md5Ring`) is built on.
//! Placement must be bit-for-bit reproducible for a given `(key, node set)`,
//! so the hash function is part of the contract: MD5 of the key's UTF-8
//! bytes, interpreted as a big-endian 128-bit unsigned integer.

use crate::token::traits::Token;
use md5::{Digest, Md5};

/// MD5-derived token using a 128-bit representation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Md5Token(pub u128);

impl Token for Md5Token {
    fn zero() -> Self {
        Md5Token(0)
    }

    fn max() -> Self {
        Md5Token(u128::MAX)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_max(&self) -> bool {
        self.0 == u128::MAX
    }

    fn distance_to(&self, other: &Self) -> Self {
        if other.0 >= self.0 {
            Md5Token(other.0 - self.0)
        } else {
            Md5Token((u128::MAX - self.0) + other.0 + 1)
        }
    }
}

impl Md5Token {
    /// Hashes raw bytes into a token.
    pub fn from_bytes(data: &[u8]) -> Self {
        let digest = Md5::digest(data);
        Md5Token(u128::from_be_bytes(digest.into()))
    }

    /// Hashes a UTF-8 key into a token.
    pub fn from_key(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(Md5Token::from_key("node_0:0"), Md5Token::from_key("node_0:0"));
    }

    #[test]
    fn distinct_keys_usually_differ() {
        assert_ne!(Md5Token::from_key("a"), Md5Token::from_key("b"));
    }
}
