//! Per-run memoizing postcode resolver.
//!
//! [`CoordinateResolver`] owns its cache outright: one resolver per query
//! session, nothing shared, nothing persisted. Both successes and failures are
//! cached, so each distinct normalized postcode costs at most one external
//! call for the resolver's whole lifetime.

use std::collections::HashMap;
use std::time::Duration;

use meetfinder_core::Coordinate;
use tokio::time::Instant;

use crate::error::{GeocodeError, LookupFailure};
use crate::lookup::PostcodeLookup;

/// Trim, drop every whitespace character, and upper-case.
///
/// `" sw1a 1aa "` and `"SW1A1AA"` normalize to the same key.
#[must_use]
pub fn normalize_postcode(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

pub struct CoordinateResolver<L> {
    lookup: L,
    cache: HashMap<String, Result<Coordinate, LookupFailure>>,
    /// Minimum gap between the starts of consecutive external lookups.
    min_interval: Duration,
    last_external_call: Option<Instant>,
    external_calls: usize,
    base_postcode: Option<String>,
    base_coordinate: Option<Coordinate>,
}

impl<L: PostcodeLookup> CoordinateResolver<L> {
    /// Creates a resolver with an empty cache and no pacing delay.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: HashMap::new(),
            min_interval: Duration::ZERO,
            last_external_call: None,
            external_calls: 0,
            base_postcode: None,
            base_coordinate: None,
        }
    }

    /// Sets the minimum delay between external lookups. Cache hits are never
    /// delayed.
    #[must_use]
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Pre-resolves a home postcode.
    ///
    /// On failure the resolver stays usable but [`Self::base_coordinate`]
    /// returns `None`.
    pub async fn with_home(mut self, postcode: &str) -> Self {
        self.base_coordinate = self.resolve(postcode).await.ok();
        self.base_postcode = Some(postcode.trim().to_owned());
        self
    }

    #[must_use]
    pub fn base_postcode(&self) -> Option<&str> {
        self.base_postcode.as_deref()
    }

    #[must_use]
    pub fn base_coordinate(&self) -> Option<Coordinate> {
        self.base_coordinate
    }

    /// Consumes the resolver, discarding its cache.
    pub fn into_lookup(self) -> L {
        self.lookup
    }

    /// Number of lookups actually sent to the underlying service.
    #[must_use]
    pub fn external_calls(&self) -> usize {
        self.external_calls
    }

    /// Number of distinct normalized postcodes cached so far.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Resolves a postcode to a coordinate.
    ///
    /// Never retries: a cached failure is returned as-is. Input that
    /// normalizes to nothing fails without touching the service or the cache.
    ///
    /// # Errors
    ///
    /// Returns [`LookupFailure`] when the service cannot produce a coordinate
    /// for any reason.
    pub async fn resolve(&mut self, postcode: &str) -> Result<Coordinate, LookupFailure> {
        let key = normalize_postcode(postcode);
        if key.is_empty() {
            return Err(LookupFailure);
        }

        if let Some(cached) = self.cache.get(&key) {
            tracing::trace!(postcode = %key, hit = cached.is_ok(), "postcode cache hit");
            return *cached;
        }

        self.pace().await;
        self.external_calls += 1;

        let outcome = match self.lookup.lookup(&key).await {
            Ok(coordinate) => Ok(coordinate),
            Err(err @ GeocodeError::NotFound { .. }) => {
                tracing::debug!(postcode = %key, error = %err, "postcode not recognised");
                Err(LookupFailure)
            }
            Err(err) => {
                tracing::warn!(postcode = %key, error = %err, "postcode lookup failed");
                Err(LookupFailure)
            }
        };

        self.cache.insert(key, outcome);
        outcome
    }

    async fn pace(&mut self) {
        if let Some(last) = self.last_external_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_external_call = Some(Instant::now());
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
