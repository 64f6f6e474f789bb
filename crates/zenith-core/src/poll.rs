// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded polling for long-running remote operations.
//!
//! Video generation hands back an operation handle that must be polled
//! until completion. This utility owns the attempt budget and the backoff
//! schedule so the polling behavior is testable independent of any client.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::ZenithError;

/// Attempt budget and interval schedule for [`poll_until`].
///
/// The interval starts at `initial` and shortens by `decay` after each
/// attempt, clamped at `floor` — remote operations report progress faster
/// once they are underway, so later polls can be more eager.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    pub max_attempts: u32,
    pub initial: Duration,
    pub floor: Duration,
    pub decay: f64,
}

impl PollSchedule {
    /// Schedule used for video generation: up to 30 polls, starting at
    /// 10 s and shortening toward 4 s.
    pub fn video() -> Self {
        Self {
            max_attempts: 30,
            initial: Duration::from_secs(10),
            floor: Duration::from_secs(4),
            decay: 0.85,
        }
    }

    /// Interval to sleep after the given zero-based attempt.
    pub fn interval_for(&self, attempt: u32) -> Duration {
        let scaled = self.initial.mul_f64(self.decay.powi(attempt as i32));
        scaled.max(self.floor)
    }
}

/// Poll `check` until it yields a value or the attempt budget is spent.
///
/// `check` is called once per attempt with the attempt index; returning
/// `Ok(Some(value))` completes the poll, `Ok(None)` schedules another
/// attempt after the schedule's interval, and `Err` aborts immediately.
/// Exhausting `max_attempts` yields [`ZenithError::Timeout`].
pub async fn poll_until<T, F, Fut>(schedule: &PollSchedule, mut check: F) -> Result<T, ZenithError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, ZenithError>>,
{
    for attempt in 0..schedule.max_attempts {
        if let Some(value) = check(attempt).await? {
            return Ok(value);
        }
        let interval = schedule.interval_for(attempt);
        debug!(attempt, interval_ms = interval.as_millis() as u64, "operation pending");
        tokio::time::sleep(interval).await;
    }

    Err(ZenithError::Timeout {
        attempts: schedule.max_attempts,
    })
}
