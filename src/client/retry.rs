//! Bounded retry policy with exponential backoff and jitter for idempotent reads.

// crates.io
use rand::Rng;
// self
use crate::_prelude::*;

/// Retry bounds applied by [`ApiClient::dispatch_idempotent`](crate::client::ApiClient).
///
/// Writes are never retried automatically; the policy only shapes the read path.
/// An upstream `Retry-After` hint takes precedence over the computed backoff but
/// is still clamped to `max_delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total attempt budget, including the first try.
	pub max_attempts: u32,
	/// Backoff applied after the first failure; doubles per subsequent attempt.
	pub base_delay: Duration,
	/// Upper bound for any single delay.
	pub max_delay: Duration,
}
impl RetryPolicy {
	/// Creates a policy from explicit bounds. A zero `max_attempts` is treated as
	/// a single attempt.
	pub const fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
		Self { max_attempts, base_delay, max_delay }
	}

	/// Policy that never retries.
	pub const fn none() -> Self {
		Self::new(1, Duration::ZERO, Duration::ZERO)
	}

	/// Computes the delay before the next attempt.
	///
	/// `attempt` counts completed attempts, starting at 1. The exponential term is
	/// jittered by up to half of itself so synchronized clients fan out.
	pub fn delay_for(&self, attempt: u32, hint: Option<Duration>) -> Duration {
		if let Some(hinted) = hint {
			return clamp(hinted, self.max_delay);
		}

		let exponent = attempt.saturating_sub(1).min(16);
		let backoff = self.base_delay.saturating_mul(2_i32.saturating_pow(exponent));
		let jittered = backoff + jitter(backoff);

		clamp(jittered, self.max_delay)
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(3, Duration::milliseconds(250), Duration::seconds(5))
	}
}

fn clamp(delay: Duration, max: Duration) -> Duration {
	if delay.is_negative() {
		return Duration::ZERO;
	}
	if delay > max {
		return max;
	}

	delay
}

fn jitter(backoff: Duration) -> Duration {
	let half = backoff.whole_milliseconds() / 2;
	let Ok(bound) = u64::try_from(half) else {
		return Duration::ZERO;
	};

	if bound == 0 {
		return Duration::ZERO;
	}

	let drawn = rand::rng().random_range(0..=bound);

	Duration::milliseconds(drawn as i64)
}
