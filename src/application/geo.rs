//! Country resolution for consent classification.
//!
//! Lookups go to an ipapi-compatible endpoint and are cached per IP for a
//! configurable TTL (a day by default). When no IP is available or the
//! lookup fails, the visitor's `Accept-Language` header decides through a
//! small language-to-country table.

use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use metrics::counter;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::consent::{self, ConsentRequirement};

pub const GEO_LOOKUP_FAILURES_TOTAL: &str = "lustro_geo_lookup_failures_total";

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("geolocation lookup failed: {0}")]
    Lookup(String),
}

#[async_trait]
pub trait CountryLookup: Send + Sync {
    /// ISO 3166-1 alpha-2 country code for an address, if resolvable.
    async fn country_for_ip(&self, ip: IpAddr) -> Result<Option<String>, GeoError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoClassification {
    pub country_code: Option<String>,
    pub requirement: ConsentRequirement,
}

struct CachedCountry {
    country_code: String,
    fetched_at: Instant,
}

pub struct GeoService {
    lookup: Arc<dyn CountryLookup>,
    cache: Mutex<LruCache<IpAddr, CachedCountry>>,
    ttl: Duration,
}

impl GeoService {
    pub fn new(lookup: Arc<dyn CountryLookup>, ttl: Duration, capacity: NonZeroUsize) -> GeoService {
        GeoService {
            lookup,
            cache: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Classify a visitor: cached/live IP lookup first, language fallback
    /// second. Lookup failures are logged and degrade to the fallback, so
    /// this never errors.
    pub async fn classify(
        &self,
        ip: Option<IpAddr>,
        accept_language: Option<&str>,
    ) -> GeoClassification {
        let mut country = match ip {
            Some(ip) => self.country_cached(ip).await,
            None => None,
        };
        if country.is_none() {
            country = accept_language.and_then(country_from_header);
        }
        let requirement = country
            .as_deref()
            .map(consent::classify)
            .unwrap_or(ConsentRequirement::None);
        GeoClassification {
            country_code: country,
            requirement,
        }
    }

    async fn country_cached(&self, ip: IpAddr) -> Option<String> {
        {
            let mut cache = self.cache.lock().await;
            if let Some(entry) = cache.get(&ip) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Some(entry.country_code.clone());
                }
                cache.pop(&ip);
            }
        }

        match self.lookup.country_for_ip(ip).await {
            Ok(Some(code)) => {
                let code = code.to_ascii_uppercase();
                self.cache.lock().await.put(
                    ip,
                    CachedCountry {
                        country_code: code.clone(),
                        fetched_at: Instant::now(),
                    },
                );
                Some(code)
            }
            Ok(None) => None,
            Err(err) => {
                counter!(GEO_LOOKUP_FAILURES_TOTAL).increment(1);
                debug!(%ip, error = %err, "country lookup failed");
                None
            }
        }
    }
}

/// First language tag in `Accept-Language` that maps to a country.
fn country_from_header(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let tag = entry.split(';').next().unwrap_or("").trim();
        consent::country_for_language(tag).map(str::to_owned)
    })
}
