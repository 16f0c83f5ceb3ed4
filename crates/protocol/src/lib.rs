//! Wire protocol shared by the client, coordinator, and storage nodes:
//! request/response schema, JSON framing, and protocol-level errors.

pub mod error;
pub mod framing;
pub mod message;

pub use error::ProtocolError;
pub use framing::{read_frame, write_frame, CLIENT_REQUEST_LIMIT, NODE_FRAME_LIMIT};
pub use message::{Operation, Request, Response};
