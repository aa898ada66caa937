pub mod memory;
pub mod remote;

pub use memory::InMemoryStorage;
pub use remote::{RemoteConfig, RemoteStorage};
