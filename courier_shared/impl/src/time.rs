use std::time::Instant;

use courier_di::Build;
use courier_shared_contracts::time::TimeService;

#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
