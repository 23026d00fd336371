mod config;
mod descriptor;
mod message;
mod network;
mod sampling;
mod topology;
mod view;

pub use crate::config::PeerSamplingConfig;
pub use crate::descriptor::{Descriptor, NULL_DESCRIPTOR};
pub use crate::message::{message_size, wire_capacity, Message, MessageTag};
pub use crate::network::{loopback_cluster, LoopbackTransport, Transport};
pub use crate::sampling::PeerSamplingService;
pub use crate::topology::Torus2d;
pub use crate::view::View;
