//! MD5 partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::md5::Md5Token;
use crate::token::Token;

/// MD5 partitioner used by the KV store's ring.
#[derive(Clone, Debug)]
pub struct Md5Partitioner;

impl Partitioner for Md5Partitioner {
    type TokenType = Md5Token;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        Md5Token::from_bytes(key)
    }

    fn min_token(&self) -> Self::TokenType {
        Md5Token::zero()
    }

    fn max_token(&self) -> Self::TokenType {
        <Md5Token as Token>::max()
    }

    fn name(&self) -> &'static str {
        "Md5Partitioner"
    }
}
