//! Member and class lists for the booking screens, read through a cache.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::error::Result;
use crate::models::{GymClass, Member};
use crate::source::LedgerSource;

fn cached<T, F>(cache: &dyn Cache, key: &str, refresh: bool, fetch: F) -> Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Result<Vec<T>>,
{
    if !refresh {
        if let Some(raw) = cache.get(key) {
            match serde_json::from_str(&raw) {
                Ok(items) => {
                    debug!(key, "cache hit");
                    return Ok(items);
                }
                Err(e) => warn!(key, error = %e, "discarding unreadable cache entry"),
            }
        }
    }

    let items = fetch()?;
    let encoded = serde_json::to_string(&items)?;
    if let Err(e) = cache.set(key, &encoded) {
        warn!(key, error = %e, "could not write cache entry");
    }
    Ok(items)
}

fn cache_key<S: LedgerSource + ?Sized>(source: &S, name: &str) -> String {
    format!("{}#{name}", source.origin())
}

pub fn members<S: LedgerSource + ?Sized>(source: &S, cache: &dyn Cache, refresh: bool) -> Result<Vec<Member>> {
    cached(cache, &cache_key(source, "members"), refresh, || source.members())
}

pub fn classes<S: LedgerSource + ?Sized>(source: &S, cache: &dyn Cache, refresh: bool) -> Result<Vec<GymClass>> {
    cached(cache, &cache_key(source, "classes"), refresh, || source.classes())
}
