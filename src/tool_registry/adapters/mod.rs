//! Adapter implementations for provider persistence and tool discovery ports.

pub mod clock;
pub mod file;
pub mod memory;
pub mod transport;

pub use clock::ManualClock;
pub use file::FileBlobStore;
pub use memory::InMemoryBlobStore;
pub use transport::RemoteChannelOpener;
