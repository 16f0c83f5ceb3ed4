//! Protocol-level errors: anything that can go wrong turning bytes on a
//! socket into a [`crate::message::Request`]/[`crate::message::Response`] or
//! back again.

use thiserror::Error;

/// Errors raised while framing or parsing a wire message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The underlying socket read or write failed.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    /// The frame was not valid JSON, or not a JSON object shaped like a
    /// request/response (missing field, wrong type, etc). This is also what
    /// a frame silently truncated at the size cap decays into once it fails
    /// to parse.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The peer closed the connection (or sent nothing) before a complete
    /// frame could be read.
    #[error("connection closed before a frame was received")]
    ConnectionClosed,
}
