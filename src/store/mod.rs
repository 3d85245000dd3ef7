pub mod kv;
pub mod progress;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use progress::ProgressStore;
