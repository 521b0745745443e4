use crate::cache::{IconCache, MemoryCache};
use crate::error::Result;
use crate::extract::extract_links;
use crate::fetch::PageFetcher;
use crate::origin::{PageOrigin, DEFAULT_FALLBACK_SIZE};
use crate::select::select_best_icon;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// The outcome of a resolution: a single displayable icon URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIcon {
    pub uri: String,
}

/// Resolves the best available icon for a page URL.
///
/// A resolution is: cache lookup, then fetch, link extraction, candidate
/// selection and normalization, with any failure past input validation
/// degrading to an external fallback URI. The result is cached so a URL is
/// only fetched once per cache lifetime.
pub struct IconResolver {
    fetcher: PageFetcher,
    cache: Arc<dyn IconCache>,
    fallback_size: u32,
}

impl IconResolver {
    pub fn new() -> Self {
        Self {
            fetcher: PageFetcher::new(),
            cache: Arc::new(MemoryCache::new()),
            fallback_size: DEFAULT_FALLBACK_SIZE,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn IconCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_fallback_size(mut self, size: u32) -> Self {
        self.fallback_size = size;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.fetcher = PageFetcher::with_timeout(timeout_secs);
        self
    }

    /// Resolve the icon for `url`.
    ///
    /// The only error surfaced is a malformed input URL; every downstream
    /// failure yields the fallback URI instead. Concurrent calls for the
    /// same missing URL may each fetch once, the later write simply
    /// overwrites with an equivalent value.
    pub async fn resolve_icon(&self, url: &str) -> Result<ResolvedIcon> {
        let origin = PageOrigin::parse(url)?;

        if let Some(uri) = self.cache.get(url) {
            debug!("Cache hit for {}", url);
            return Ok(ResolvedIcon { uri });
        }

        let uri = match self.resolve_from_page(url, &origin).await {
            Some(uri) => uri,
            None => {
                let fallback = origin.fallback_uri(self.fallback_size);
                debug!("Falling back to {} for {}", fallback, url);
                fallback
            }
        };

        self.cache.set(url, &uri);

        Ok(ResolvedIcon { uri })
    }

    async fn resolve_from_page(&self, url: &str, origin: &PageOrigin) -> Option<String> {
        let markup = match self.fetcher.fetch(url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let links = extract_links(&markup);
        let candidate = select_best_icon(&links)?;

        Some(origin.absolutize(candidate.href.as_deref()))
    }
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new()
    }
}
