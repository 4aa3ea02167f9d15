// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for synchronizer loads and saves.
#[derive(Debug, Default)]
pub struct SyncMetrics {
	load_attempts: AtomicU64,
	load_success: AtomicU64,
	load_failure: AtomicU64,
	save_attempts: AtomicU64,
	save_success: AtomicU64,
	save_failure: AtomicU64,
}
impl SyncMetrics {
	/// Returns the total number of load attempts.
	pub fn load_attempts(&self) -> u64 {
		self.load_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of loads that populated local state.
	pub fn load_successes(&self) -> u64 {
		self.load_success.load(Ordering::Relaxed)
	}

	/// Returns the number of loads that exhausted their retries.
	pub fn load_failures(&self) -> u64 {
		self.load_failure.load(Ordering::Relaxed)
	}

	/// Returns the total number of save attempts that reached the wire.
	pub fn save_attempts(&self) -> u64 {
		self.save_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of successful saves.
	pub fn save_successes(&self) -> u64 {
		self.save_success.load(Ordering::Relaxed)
	}

	/// Returns the number of failed saves.
	pub fn save_failures(&self) -> u64 {
		self.save_failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_load_attempt(&self) {
		self.load_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_load_success(&self) {
		self.load_success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_load_failure(&self) {
		self.load_failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_save_attempt(&self) {
		self.save_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_save_success(&self) {
		self.save_success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_save_failure(&self) {
		self.save_failure.fetch_add(1, Ordering::Relaxed);
	}
}
