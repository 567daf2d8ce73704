use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use courier_cache_contracts::CacheService;
use courier_core_health_contracts::{HealthFeatureService, HealthStatus};
use courier_di::Build;
use courier_email_contracts::EmailService;
use courier_shared_contracts::time::TimeService;
use courier_utils::trace_instrument;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Cache, Email> {
    time: Time,
    cache: Cache,
    email: Email,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl CachedStatus {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now < self.timestamp + ttl
    }
}

impl<Time, Cache, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Cache, Email>
where
    Time: TimeService,
    Cache: CacheService,
    Email: EmailService,
{
    #[trace_instrument(skip(self))]
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let ttl = self.config.cache_ttl;

        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }

        let cache = self
            .cache
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping cache: {err:#}"))
            .is_ok();

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err:#}"))
            .is_ok();

        let status = HealthStatus { cache, email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use courier_cache_contracts::MockCacheService;
    use courier_email_contracts::MockEmailService;
    use courier_shared_contracts::time::MockTimeService;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = HealthFeatureServiceImpl<MockTimeService, MockCacheService, MockEmailService>;

    const TTL: Duration = Duration::from_secs(10);

    fn sut(time: MockTimeService, cache: MockCacheService, email: MockEmailService) -> Sut {
        HealthFeatureServiceImpl {
            time,
            cache,
            email,
            config: HealthFeatureConfig { cache_ttl: TTL },
            state: Default::default(),
        }
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let time = MockTimeService::new().with_now(Instant::now());
        let cache = MockCacheService::new().with_ping(true);
        let email = MockEmailService::new().with_ping(true);

        let sut = sut(time, cache, email);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(
            result,
            HealthStatus {
                cache: true,
                email: true
            }
        );
        assert!(result.is_healthy());
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let time = MockTimeService::new().with_now(Instant::now());
        let cache = MockCacheService::new().with_ping(false);
        let email = MockEmailService::new().with_ping(true);

        let sut = sut(time, cache, email);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(
            result,
            HealthStatus {
                cache: false,
                email: true
            }
        );
        assert!(!result.is_healthy());
    }

    #[tokio::test]
    async fn cached() {
        // Arrange
        let start = Instant::now();
        let mut time = MockTimeService::new();
        let mut seq = mockall::Sequence::new();
        for offset in [Duration::ZERO, TTL / 2] {
            time.expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(start + offset);
        }
        let cache = MockCacheService::new().with_ping(true);
        let email = MockEmailService::new().with_ping(false);

        let sut = sut(time, cache, email);

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, second);
        assert!(!second.email);
    }

    #[tokio::test]
    async fn expired() {
        // Arrange
        let start = Instant::now();
        let mut time = MockTimeService::new();
        let mut seq = mockall::Sequence::new();
        for offset in [Duration::ZERO, TTL] {
            time.expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(start + offset);
        }
        let mut cache = MockCacheService::new();
        cache
            .expect_ping()
            .times(2)
            .returning(|| Box::pin(std::future::ready(Ok(()))));
        let mut email = MockEmailService::new();
        let mut email_seq = mockall::Sequence::new();
        for healthy in [false, true] {
            email
                .expect_ping()
                .once()
                .in_sequence(&mut email_seq)
                .return_once(move || {
                    Box::pin(std::future::ready(
                        healthy
                            .then_some(())
                            .ok_or_else(|| anyhow::anyhow!("connection refused")),
                    ))
                });
        }

        let sut = sut(time, cache, email);

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert!(!first.email);
        assert!(second.email);
    }
}
