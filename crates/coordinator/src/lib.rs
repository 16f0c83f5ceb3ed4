//! The coordinator: the single point of entry clients talk to, which routes
//! data ops to the storage node(s) responsible for a key and tracks cluster
//! membership.

pub mod descriptor;
pub mod routing;
pub mod server;
pub mod state;

pub use descriptor::NodeDescriptor;
pub use routing::{route_request, send_to_node, ROUTING_FANOUT};
pub use server::{serve, DEFAULT_VIRTUAL_NODES};
pub use state::ClusterState;
