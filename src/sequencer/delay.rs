//! Inter-item delay policy.

use async_trait::async_trait;
use std::time::Duration;

/// How long to wait before each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayPolicy {
    /// `unit * (index + 1)`: strictly increasing while `unit > 0`.
    Linear { unit: Duration },
    /// The same wait before every item.
    Fixed { delay: Duration },
}

impl DelayPolicy {
    pub fn linear_ms(unit_ms: u64) -> Self {
        Self::Linear {
            unit: Duration::from_millis(unit_ms),
        }
    }

    pub fn fixed_ms(delay_ms: u64) -> Self {
        Self::Fixed {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Delay before the item at 0-based `index`.
    pub fn delay_for(&self, index: usize) -> Duration {
        match *self {
            DelayPolicy::Linear { unit } => {
                let factor = u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX);
                unit.saturating_mul(factor)
            }
            DelayPolicy::Fixed { delay } => delay,
        }
    }
}

/// Suspends the batch between items.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock sleep on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Sleeper for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}
