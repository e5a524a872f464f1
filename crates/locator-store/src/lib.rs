//! In-memory collaborators for object location.
//!
//! A cluster snapshot file ([`snapshot`]) is loaded into a static kind mapping
//! ([`mapper`]) and an object store ([`store`]). [`walk`] executes compiled
//! traversal steps against any [`locator_core::access::ObjectStore`].

pub mod mapper;
pub mod snapshot;
pub mod store;
pub mod walk;

pub use mapper::StaticKindMapper;
pub use snapshot::{Cluster, ClusterSnapshot, ResourceMapping};
pub use store::MemoryStore;
pub use walk::StoreWalker;
