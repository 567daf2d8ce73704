use std::time::Instant;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Returns the current point on the monotonic clock.
    fn now(&self) -> Instant;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: Instant) -> Self {
        self.expect_now().once().return_const(time);
        self
    }
}
