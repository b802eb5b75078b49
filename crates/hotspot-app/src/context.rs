use hotspot_core::config::AppSettings;
use hotspot_store::memory::MemoryBackend;
use hotspot_store::ports::{AuthProvider, BlobStore, DocumentStore};
use std::sync::Arc;

/// Backend ports and settings shared by every screen
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthProvider>,
    pub documents: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub settings: AppSettings,
}

impl AppContext {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        settings: AppSettings,
    ) -> Self {
        Self { auth, documents, blobs, settings }
    }

    /// Context backed by the in-memory adapters
    pub fn from_memory(backend: &MemoryBackend, settings: AppSettings) -> Self {
        Self {
            auth: Arc::new(backend.auth.clone()),
            documents: Arc::new(backend.documents.clone()),
            blobs: Arc::new(backend.blobs.clone()),
            settings,
        }
    }
}
