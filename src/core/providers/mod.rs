//! Provider transports

pub mod graph;

pub use graph::GraphTransport;
