//! In-memory adapters for tool registry ports.

mod store;

pub use store::InMemoryBlobStore;
