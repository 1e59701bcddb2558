//! In-memory implementation of the `remy-core` repository traits.

pub mod memory;

pub use memory::{MemoryStore, MemoryTransaction};
