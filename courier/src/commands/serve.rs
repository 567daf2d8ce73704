use courier_cache_contracts::CacheService;
use courier_config::Config;
use courier_di::Provide;
use courier_email_contracts::EmailService;
use tracing::info;

use crate::{
    cache, email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to valkey cache");
    let cache = cache::connect(&config.cache).await?;
    cache.ping().await?;

    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    email.ping().await?;

    let server: RestServer = {
        let config_provider = ConfigProvider::new(&config);
        let mut provider = Provider::new(config_provider, cache, email);
        provider.provide()
    };

    info!("Starting http server on {}", config.http.address);
    server.serve().await
}
