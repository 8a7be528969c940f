pub mod file_store;
pub mod memory_store;

pub use file_store::FileCartStore;
pub use memory_store::InMemoryCartStore;
