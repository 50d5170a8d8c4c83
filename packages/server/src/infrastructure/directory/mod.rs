//! Connection directory implementations.
//!
//! Currently in-memory only; any externally synchronized key/value store
//! satisfying the `ConnectionDirectory` semantics is interchangeable.

pub mod inmemory;

pub use inmemory::InMemoryConnectionDirectory;
