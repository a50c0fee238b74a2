//! Flowchart data: entities, the in-memory store and its persistence.

pub mod persist;
mod storage;
mod store;
mod types;
mod workspace;

pub use storage::{BrowserStorage, MemoryStorage, Storage};
pub use store::Model;
pub use types::{Edge, Node, NodeId, NodeKind, NodePatch, coerce_impact};
pub use workspace::Workspace;
