use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use actix_web::{http::header::ContentType, HttpResponse};
use dashmap::DashMap;
use serde::Serialize;

use crate::errors::AppError;

pub const CACHE_HEADER: &str = "X-Cache";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

#[derive(Debug)]
struct CachedPage {
    body: Arc<str>,
    rendered_at: Instant,
}

/// A rendered JSON page and whether it came out of the cache.
#[derive(Debug, Clone)]
pub struct CachedBody {
    pub body: Arc<str>,
    pub status: CacheStatus,
}

impl CachedBody {
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok()
            .insert_header(ContentType::json())
            .insert_header((CACHE_HEADER, self.status.as_str()))
            .body(self.body.to_string())
    }
}

/// Rendered pages keyed by the path that serves them.
///
/// Entries live until a write invalidates them, or until `ttl` passes when one is set.
/// Every invalidation bumps `generation`; a render that overlapped one is served but not kept.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: DashMap<String, CachedPage>,
    ttl: Option<Duration>,
    generation: AtomicU64,
}

impl PageCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        PageCache {
            pages: DashMap::new(),
            ttl,
            generation: AtomicU64::new(0),
        }
    }

    fn is_fresh(&self, page: &CachedPage, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(page.rendered_at) < ttl,
            None => true,
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<str>> {
        let page = self.pages.get(key)?;
        self.is_fresh(&page, Instant::now()).then(|| page.body.clone())
    }

    pub fn insert(&self, key: &str, body: Arc<str>) {
        self.pages.insert(
            key.to_string(),
            CachedPage {
                body,
                rendered_at: Instant::now(),
            },
        );
    }

    /// Serves `key` from the cache, or runs `render` and stores its serialized output.
    /// Render failures are returned as-is and leave the cache untouched.
    pub async fn get_or_render<T, F, Fut>(&self, key: &str, render: F) -> Result<CachedBody, AppError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(body) = self.get(key) {
            tracing::debug!(page = key, "page cache hit");
            return Ok(CachedBody { body, status: CacheStatus::Hit });
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let rendered = render().await?;
        let body: Arc<str> = serde_json::to_string(&rendered)?.into();

        if self.generation.load(Ordering::SeqCst) == generation {
            self.insert(key, body.clone());
            // An invalidation that slipped in after the check must not leave this body behind.
            if self.generation.load(Ordering::SeqCst) != generation {
                self.pages.remove_if(key, |_, page| Arc::ptr_eq(&page.body, &body));
            }
        } else {
            tracing::debug!(page = key, "page changed while rendering, not cached");
        }

        Ok(CachedBody { body, status: CacheStatus::Miss })
    }

    pub fn invalidate(&self, keys: &[&str]) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        for key in keys {
            if self.pages.remove(*key).is_some() {
                tracing::debug!(page = key, "page cache invalidated");
            }
        }
    }

    /// Drops stale entries and returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }
        let now = Instant::now();
        let before = self.pages.len();
        self.pages.retain(|_, page| self.is_fresh(page, now));
        before.saturating_sub(self.pages.len())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
