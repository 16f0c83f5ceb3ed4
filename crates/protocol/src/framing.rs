//! Frame I/O: one JSON object per TCP connection, delimited by the sender
//! closing (or simply not writing any more), not by a length prefix.
//!
//! Grounded on `original_source/{client,coordinator,kv_node}.py`, all three
//! of which do exactly one `sock.recv(N)` — a single read into a
//! fixed-size buffer, not a loop to EOF. A message bigger than the buffer is
//! silently truncated mid-frame and left to fail JSON parsing; this module
//! preserves that behavior deliberately (see spec's frame-size-limit note)
//! rather than "fixing" it into a length-prefixed protocol.

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::ProtocolError;

/// Frame budget for a client's request to the coordinator.
pub const CLIENT_REQUEST_LIMIT: usize = 1024;

/// Frame budget everywhere else: coordinator's requests to nodes, node
/// responses back to the coordinator, and node-to-replica replication
/// traffic.
pub const NODE_FRAME_LIMIT: usize = 1024 * 1024;

/// Reads a single frame: one `read` call into a `limit`-byte buffer.
///
/// Returns the bytes actually read. A return of zero bytes means the peer
/// closed the connection without sending anything ([`ProtocolError::ConnectionClosed`]).
/// A frame larger than `limit` comes back truncated — decoding it as JSON
/// is expected to fail, which is how an oversized frame surfaces as a
/// protocol error downstream.
pub async fn read_frame<R>(reader: &mut R, limit: usize) -> Result<Vec<u8>, ProtocolError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut buf = vec![0u8; limit];
    let n = reader.read(&mut buf).await?;
    if n == 0 {
        return Err(ProtocolError::ConnectionClosed);
    }
    buf.truncate(n);
    Ok(buf)
}

/// Writes a single frame: the whole payload in one `write_all`, no
/// trailing newline, no length prefix.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn round_trips_a_small_frame() {
        let (mut client, mut server) = duplex(4096);
        write_frame(&mut client, b"{\"operation\":\"HEALTH\"}").await.unwrap();
        let got = read_frame(&mut server, CLIENT_REQUEST_LIMIT).await.unwrap();
        assert_eq!(&got, b"{\"operation\":\"HEALTH\"}");
    }

    #[tokio::test]
    async fn oversized_frame_comes_back_truncated() {
        let (mut client, mut server) = duplex(4096);
        let payload = vec![b'a'; 64];
        write_frame(&mut client, &payload).await.unwrap();
        let got = read_frame(&mut server, 8).await.unwrap();
        assert_eq!(got.len(), 8);
    }

    #[tokio::test]
    async fn empty_connection_is_closed_error() {
        let (client, mut server) = duplex(4096);
        drop(client);
        let err = read_frame(&mut server, CLIENT_REQUEST_LIMIT).await.unwrap_err();
        assert!(matches!(err, ProtocolError::ConnectionClosed));
    }
}
