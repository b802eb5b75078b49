//! Hotspot Store - Backend ports and adapters
//!
//! This crate defines the backend ports the app consumes (authentication,
//! document store with live subscriptions, blob storage) and provides an
//! in-memory adapter with JSON snapshot persistence.

pub mod memory;
pub mod ports;
pub mod snapshot;

pub use memory::{MemoryAuth, MemoryBackend, MemoryBlobStore, MemoryDocumentStore};
pub use ports::{AuthProvider, BlobStore, DocumentStore, Subscription};
