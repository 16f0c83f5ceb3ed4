//! A storage node: holds a shard of the keyspace and serves SET/GET/DELETE/
//! HEALTH over TCP, replicating writes to configured replicas.

pub mod node;
pub mod record;
pub mod server;
pub mod store;

pub use node::{ReplicaAddr, StorageNode};
pub use record::Record;
pub use server::serve;
pub use store::Store;
