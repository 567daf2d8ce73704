use std::{collections::HashMap, time::Duration};

use anyhow::Context;
use courier_cache_contracts::CacheService;
use courier_di::Build;
use courier_models::transient_state::TransientStateKey;
use courier_shared_contracts::transient_state::TransientStateService;
use courier_utils::trace_instrument;

/// Keeps all values of a client in a single cache item, which expires after
/// `ttl` if it is never taken.
#[derive(Debug, Clone, Build)]
pub struct TransientStateServiceImpl<Cache> {
    cache: Cache,
    config: TransientStateServiceConfig,
}

#[derive(Debug, Clone)]
pub struct TransientStateServiceConfig {
    pub ttl: Duration,
}

impl<Cache> TransientStateService for TransientStateServiceImpl<Cache>
where
    Cache: CacheService,
{
    #[trace_instrument(skip(self))]
    async fn replace(
        &self,
        key: &TransientStateKey,
        values: HashMap<String, String>,
    ) -> anyhow::Result<()> {
        self.cache
            .set(&cache_key(key), &values, Some(self.config.ttl))
            .await
            .context("Failed to save transient state")
    }

    #[trace_instrument(skip(self))]
    async fn take(&self, key: &TransientStateKey) -> anyhow::Result<HashMap<String, String>> {
        let cache_key = cache_key(key);

        let Some(state) = self
            .cache
            .get::<HashMap<String, String>>(&cache_key)
            .await
            .context("Failed to load transient state")?
        else {
            return Ok(HashMap::new());
        };

        self.cache
            .remove(&cache_key)
            .await
            .context("Failed to clear transient state")?;

        Ok(state)
    }
}

fn cache_key(key: &TransientStateKey) -> String {
    format!("transient_state:{key}")
}
