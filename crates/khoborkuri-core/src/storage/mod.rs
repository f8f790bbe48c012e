//! Storage layer
//!
//! Durable key-value storage for the content document.
//!
//! ## Backends
//!
//! - **FileStorage**: one `<key>.json` file per key under the data directory,
//!   written atomically
//! - **MemoryStorage**: in-process map, used by tests and throwaway sessions
//!
//! The store only ever touches a single key holding the whole document.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{FileStorage, MemoryStorage, Storage};
