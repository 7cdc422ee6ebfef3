//! Quote cache stores
//!
//! The price provider keeps exactly one cached quote. The slot is behind
//! the [`CacheStore`] trait so the server can use process memory, the CLI
//! can share a JSON file across invocations, and tests can substitute
//! their own storage.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::models::CachedQuote;

/// Single-slot storage for the last genuine quote
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self) -> Option<CachedQuote>;
    async fn put(&self, quote: CachedQuote);
}

/// In-memory slot, process scope. Used by the server.
#[derive(Default)]
pub struct MemoryStore {
    slot: RwLock<Option<CachedQuote>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self) -> Option<CachedQuote> {
        self.slot.read().await.clone()
    }

    async fn put(&self, quote: CachedQuote) {
        *self.slot.write().await = Some(quote);
    }
}

/// JSON-file slot, device scope. Used by the CLI so consecutive
/// invocations share the quote the way browser reloads shared the
/// original localStorage entry.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self) -> Option<CachedQuote> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return None, // no cache file yet
        };
        match serde_json::from_str(&raw) {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!("Discarding unreadable cache file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    async fn put(&self, quote: CachedQuote) {
        // A failed cache write must not break the fetch that produced the
        // quote; log and move on.
        let json = match serde_json::to_string(&quote) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize cached quote: {}", e);
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, json).await {
            warn!("Failed to write cache file {}: {}", self.path.display(), e);
        } else {
            debug!("Cached quote written to {}", self.path.display());
        }
    }
}
