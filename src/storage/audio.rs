//! In-memory store for synthesized audio clips
//!
//! Clips are addressed by a generated `<uuid>.<ext>` id and live until their
//! TTL runs out or they are evicted. Eviction is least-recently-used and
//! keeps the store under both an entry cap and a byte budget.

use crate::config::AudioStoreConfig;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Identifier of a stored clip, e.g. `0b6f...c1.mp3`
pub type AudioId = String;

/// A stored clip
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Audio bytes; clones share the same buffer
    pub bytes: Bytes,
    /// MIME type served with the clip
    pub content_type: String,
    pub created_at: Instant,
    pub expires_at: Instant,
}

impl AudioClip {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Store counters
#[derive(Debug, Default)]
struct AtomicAudioStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expired: AtomicU64,
}

/// Point-in-time view of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioStoreStats {
    pub entries: usize,
    pub bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired: u64,
}

struct Inner {
    clips: LruCache<AudioId, AudioClip>,
    total_bytes: usize,
}

impl Inner {
    fn pop(&mut self, id: &str) -> Option<AudioClip> {
        let clip = self.clips.pop(id)?;
        self.total_bytes -= clip.len();
        Some(clip)
    }
}

/// Bounded, TTL-aware audio store shared by request handlers
pub struct AudioStore {
    inner: Mutex<Inner>,
    ttl: Duration,
    max_entries: usize,
    max_bytes: usize,
    purge_interval: Duration,
    stats: AtomicAudioStats,
}

impl AudioStore {
    /// Create an empty store
    pub fn new(config: &AudioStoreConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                clips: LruCache::unbounded(),
                total_bytes: 0,
            }),
            ttl: config.ttl(),
            max_entries: config.max_entries.max(1),
            max_bytes: config.max_bytes,
            purge_interval: config.purge_interval(),
            stats: AtomicAudioStats::default(),
        }
    }

    /// Override the clip lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Store a clip and return its generated id
    ///
    /// Least-recently-used clips are evicted until the new clip fits. A clip
    /// bigger than the whole byte budget is refused.
    pub fn insert(
        &self,
        bytes: Bytes,
        content_type: impl Into<String>,
        extension: &str,
    ) -> Result<AudioId> {
        let size = bytes.len();
        if size > self.max_bytes {
            return Err(GatewayError::payload_too_large(format!(
                "Audio clip of {} bytes exceeds the store budget of {} bytes",
                size, self.max_bytes
            )));
        }

        let id = format!("{}.{}", Uuid::new_v4(), normalize_extension(extension));
        let now = Instant::now();
        let clip = AudioClip {
            bytes,
            content_type: content_type.into(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut inner = self.inner.lock();
        while !inner.clips.is_empty()
            && (inner.clips.len() >= self.max_entries || inner.total_bytes + size > self.max_bytes)
        {
            if let Some((evicted_id, evicted)) = inner.clips.pop_lru() {
                inner.total_bytes -= evicted.len();
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(id = %evicted_id, bytes = evicted.len(), "Evicted audio clip");
            }
        }

        inner.total_bytes += size;
        inner.clips.put(id.clone(), clip);
        debug!(id = %id, bytes = size, entries = inner.clips.len(), "Stored audio clip");

        Ok(id)
    }

    /// Fetch a clip; expired clips are dropped and reported as absent
    pub fn get(&self, id: &str) -> Option<AudioClip> {
        let now = Instant::now();
        let mut inner = self.inner.lock();

        let expired = match inner.clips.get(id) {
            Some(clip) if !clip.is_expired(now) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                return Some(clip.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.pop(id);
            self.stats.expired.fetch_add(1, Ordering::Relaxed);
        }
        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Drop a clip
    pub fn remove(&self, id: &str) -> Option<AudioClip> {
        self.inner.lock().pop(id)
    }

    /// Drop every expired clip, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut inner = self.inner.lock();

        let expired: Vec<AudioId> = inner
            .clips
            .iter()
            .filter(|(_, clip)| clip.is_expired(now))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            inner.pop(id);
        }

        if !expired.is_empty() {
            self.stats
                .expired
                .fetch_add(expired.len() as u64, Ordering::Relaxed);
            debug!(count = expired.len(), "Purged expired audio clips");
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> AudioStoreStats {
        let (entries, bytes) = {
            let inner = self.inner.lock();
            (inner.clips.len(), inner.total_bytes)
        };
        AudioStoreStats {
            entries,
            bytes,
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            expired: self.stats.expired.load(Ordering::Relaxed),
        }
    }

    /// Start the background purge loop
    ///
    /// The task holds a weak reference and exits once the store is dropped.
    pub fn spawn_purge_task(self: &Arc<Self>) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        let period = self.purge_interval;
        info!(interval = ?period, "Starting audio store purge task");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                match store.upgrade() {
                    Some(store) => {
                        store.purge_expired();
                    }
                    None => break,
                }
            }
        })
    }
}

fn normalize_extension(extension: &str) -> String {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    if !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        ext
    } else {
        "mp3".to_string()
    }
}
