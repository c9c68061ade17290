use anyhow::Result;
use log::trace;
use moka::future::Cache as MokaCache;

/// Last fetched JSON body per backend path. Entries live until invalidated.
#[derive(Clone)]
pub struct Cache {
    inner: MokaCache<String, serde_json::Value>,
}

impl Cache {
    pub fn new(capacity: u64) -> Self {
        Cache {
            inner: MokaCache::new(capacity),
        }
    }

    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, value: serde_json::Value) -> Result<()> {
        trace!("cache insert {}", key);
        self.inner.insert(key, value).await;
        Ok(())
    }

    pub async fn invalidate(&self, key: &str) {
        trace!("cache invalidate {}", key);
        self.inner.invalidate(key).await;
    }

    /// Drops every entry, e.g. when the session changes hands.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::Cache;
    use serde_json::json;

    #[tokio::test]
    async fn invalidated_entries_are_gone() {
        let cache = Cache::new(16);
        cache.insert("/appointments".into(), json!([1, 2])).await.unwrap();
        assert_eq!(cache.get("/appointments").await, Some(json!([1, 2])));

        cache.invalidate("/appointments").await;
        assert_eq!(cache.get("/appointments").await, None);
    }

    #[tokio::test]
    async fn invalidate_all_clears_every_key() {
        let cache = Cache::new(16);
        cache.insert("/er/active".into(), json!([])).await.unwrap();
        cache.insert("/inventory".into(), json!([])).await.unwrap();
        cache.invalidate_all();
        assert!(cache.get("/er/active").await.is_none());
        assert!(cache.get("/inventory").await.is_none());
    }
}
