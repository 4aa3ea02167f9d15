//! Price-configuration synchronization with singleflight saves and a clocked
//! success window.
//!
//! The synchronizer wraps an [`ApiClient`] and owns the UI-facing state machine:
//! `InitialLoading → Ready | LoadFailed` for the initial fetch, then
//! `Idle → Saving → Success | Idle` for edits. Failed loads keep their error and
//! a [`retry_load`](PriceSynchronizer::retry_load) affordance instead of silently
//! degrading to zeroed tariffs. A save acquires a per-synchronizer guard, so a
//! second save attempted while one is outstanding fails fast with
//! [`Error::SaveInFlight`] rather than racing the first. Completions that arrive
//! after [`cancel_pending`](PriceSynchronizer::cancel_pending) are discarded
//! without touching state.

mod metrics;

pub use metrics::SyncMetrics;

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::ApiTransport,
	pricing::PriceConfig,
};

/// How long a successful save is reported before reverting to idle.
pub const SAVE_SUCCESS_WINDOW: Duration = Duration::seconds(2);

/// Load-phase states for the initial price-list fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
	/// First fetch has not settled yet.
	InitialLoading,
	/// Tariffs are loaded and editable.
	Ready,
	/// The fetch exhausted its retries; the caller should offer a retry.
	LoadFailed {
		/// Rendered error that ended the load.
		message: String,
	},
}
impl LoadPhase {
	/// Returns `true` once tariffs are loaded and editable.
	pub fn is_ready(&self) -> bool {
		matches!(self, Self::Ready)
	}
}

/// Save-phase states within a ready synchronizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SavePhase {
	/// No save is outstanding.
	Idle,
	/// A save is in flight.
	Saving,
	/// The last save succeeded; reported until `reverts_at`, then reads as idle.
	Success {
		/// Instant the success indicator expires.
		reverts_at: OffsetDateTime,
	},
}

/// Whether a completion mutated synchronizer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncOutcome {
	/// The result was applied to local state.
	Applied,
	/// The completion arrived after a cancellation and was discarded.
	Discarded,
}

#[derive(Clone, Debug)]
struct SyncState {
	load: LoadPhase,
	save: SavePhase,
	config: PriceConfig,
	generation: u64,
}
impl SyncState {
	fn new() -> Self {
		Self {
			load: LoadPhase::InitialLoading,
			save: SavePhase::Idle,
			config: PriceConfig::zeroed(),
			generation: 0,
		}
	}
}

/// Coordinates price-configuration reads and writes for the admin dashboard.
pub struct PriceSynchronizer<T>
where
	T: ?Sized + ApiTransport,
{
	client: ApiClient<T>,
	state: Arc<RwLock<SyncState>>,
	save_guard: Arc<AsyncMutex<()>>,
	metrics: Arc<SyncMetrics>,
}
impl<T> PriceSynchronizer<T>
where
	T: ?Sized + ApiTransport,
{
	/// Wraps a client, starting in the initial-loading phase with zeroed tariffs.
	pub fn new(client: ApiClient<T>) -> Self {
		Self {
			client,
			state: Arc::new(RwLock::new(SyncState::new())),
			save_guard: Arc::new(AsyncMutex::new(())),
			metrics: Arc::new(SyncMetrics::default()),
		}
	}

	/// Returns the wrapped client.
	pub fn client(&self) -> &ApiClient<T> {
		&self.client
	}

	/// Returns the synchronizer's counters.
	pub fn metrics(&self) -> &SyncMetrics {
		&self.metrics
	}

	/// Snapshot of the locally cached configuration.
	pub fn config(&self) -> PriceConfig {
		self.state.read().config
	}

	/// Snapshot of the load phase.
	pub fn load_phase(&self) -> LoadPhase {
		self.state.read().load.clone()
	}

	/// Save phase as observed at `now`; an expired success window reads as idle.
	pub fn save_phase_at(&self, now: OffsetDateTime) -> SavePhase {
		match self.state.read().save.clone() {
			SavePhase::Success { reverts_at } if now >= reverts_at => SavePhase::Idle,
			other => other,
		}
	}

	/// Save phase as observed at the current clock.
	pub fn save_phase(&self) -> SavePhase {
		self.save_phase_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` while a save is outstanding.
	pub fn is_saving(&self) -> bool {
		matches!(self.state.read().save, SavePhase::Saving)
	}

	/// Invalidates in-flight work, e.g. when the hosting view is torn down.
	///
	/// Completions captured before the call find a newer generation and leave
	/// state untouched. An outstanding save stops being reported immediately.
	pub fn cancel_pending(&self) {
		let mut state = self.state.write();

		state.generation += 1;

		if matches!(state.save, SavePhase::Saving) {
			state.save = SavePhase::Idle;
		}
	}

	/// Fetches the price list and populates the four tariff fields exactly from
	/// the payload.
	///
	/// Transient failures retry with backoff inside the client; once the budget is
	/// exhausted the phase moves to [`LoadPhase::LoadFailed`] and the error
	/// surfaces to the caller.
	pub async fn load(&self) -> Result<SyncOutcome> {
		self.metrics.record_load_attempt();

		let generation = {
			let mut state = self.state.write();

			state.load = LoadPhase::InitialLoading;

			state.generation
		};

		match self.client.fetch_price_list().await {
			Ok(list) => {
				let mut state = self.state.write();

				if state.generation != generation {
					return Ok(SyncOutcome::Discarded);
				}

				state.config = list.config();
				state.load = LoadPhase::Ready;
				self.metrics.record_load_success();

				Ok(SyncOutcome::Applied)
			},
			Err(e) => {
				let mut state = self.state.write();

				if state.generation != generation {
					return Ok(SyncOutcome::Discarded);
				}

				state.load = LoadPhase::LoadFailed { message: e.to_string() };
				self.metrics.record_load_failure();

				Err(e)
			},
		}
	}

	/// Re-runs the fetch after a failed load. Does nothing unless the phase is
	/// [`LoadPhase::LoadFailed`].
	pub async fn retry_load(&self) -> Result<SyncOutcome> {
		if !matches!(self.state.read().load, LoadPhase::LoadFailed { .. }) {
			return Ok(SyncOutcome::Discarded);
		}

		self.load().await
	}

	/// Validates and submits the four edited tariff fields.
	///
	/// Exactly one save may be outstanding: concurrent attempts fail fast with
	/// [`Error::SaveInFlight`]. On success the phase reports
	/// [`SavePhase::Success`] until the fixed window elapses; on failure the
	/// phase settles back to idle and the error surfaces for an explicit,
	/// user-triggered retry.
	pub async fn save(&self, config: PriceConfig) -> Result<SyncOutcome> {
		config.validate()?;

		let Some(_guard) = self.save_guard.try_lock() else {
			return Err(Error::SaveInFlight);
		};

		self.metrics.record_save_attempt();

		let generation = {
			let mut state = self.state.write();

			state.save = SavePhase::Saving;

			state.generation
		};

		match self.client.update_price_list(&config).await {
			Ok(()) => {
				let mut state = self.state.write();

				if state.generation != generation {
					return Ok(SyncOutcome::Discarded);
				}

				state.config = config;
				state.save = SavePhase::Success {
					reverts_at: OffsetDateTime::now_utc() + SAVE_SUCCESS_WINDOW,
				};
				self.metrics.record_save_success();

				Ok(SyncOutcome::Applied)
			},
			Err(e) => {
				let mut state = self.state.write();

				if state.generation != generation {
					return Ok(SyncOutcome::Discarded);
				}

				state.save = SavePhase::Idle;
				self.metrics.record_save_failure();

				Err(e)
			},
		}
	}
}
impl<T> Clone for PriceSynchronizer<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			state: self.state.clone(),
			save_guard: self.save_guard.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<T> Debug for PriceSynchronizer<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.read();

		f.debug_struct("PriceSynchronizer")
			.field("load", &state.load)
			.field("save", &state.save)
			.field("config", &state.config)
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// std
	use std::sync::atomic::{AtomicBool, Ordering};
	// self
	use super::*;
	use crate::{
		_preludet::InstantSleeper,
		client::RetryPolicy,
		http::{ApiRequest, ApiResponse, TransportFuture},
		settings::Settings,
		store::{CredentialStore, MemoryStore},
	};

	#[derive(Debug, ThisError)]
	#[error("Static transport never fails.")]
	struct NeverError;

	struct StaticTransport {
		status: u16,
		body: &'static str,
		gate: Option<Arc<AsyncMutex<()>>>,
		entered: Arc<AtomicBool>,
	}
	impl StaticTransport {
		fn ok(body: &'static str) -> Self {
			Self { status: 200, body, gate: None, entered: Arc::new(AtomicBool::new(false)) }
		}

		fn failing(status: u16) -> Self {
			Self { status, body: "{}", gate: None, entered: Arc::new(AtomicBool::new(false)) }
		}

		fn gated(body: &'static str, gate: Arc<AsyncMutex<()>>) -> Self {
			Self { status: 200, body, gate: Some(gate), entered: Arc::new(AtomicBool::new(false)) }
		}
	}
	impl ApiTransport for StaticTransport {
		type TransportError = NeverError;

		fn execute(&self, _request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
			let status = self.status;
			let body = self.body.as_bytes().to_vec();
			let gate = self.gate.clone();
			let entered = self.entered.clone();

			Box::pin(async move {
				entered.store(true, Ordering::SeqCst);

				if let Some(gate) = gate {
					let _open = gate.lock().await;
				}

				Ok(ApiResponse { status, body, retry_after: None })
			})
		}
	}

	fn build_synchronizer(transport: StaticTransport) -> PriceSynchronizer<StaticTransport> {
		let settings = Settings::new(
			Url::parse("https://backend.example.com/").expect("Settings URL fixture should parse."),
		);
		let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::default());
		let client = ApiClient::with_transport(settings, store, transport, Arc::new(InstantSleeper))
			.with_retry_policy(RetryPolicy::none());

		PriceSynchronizer::new(client)
	}

	#[tokio::test]
	async fn load_populates_all_four_fields_exactly() {
		let sync = build_synchronizer(StaticTransport::ok(
			r#"{"kmPrice":150,"standardPrice":150,"luxuryPrice":250,"vanPrice":225}"#,
		));

		assert_eq!(sync.load_phase(), LoadPhase::InitialLoading);

		let outcome = sync.load().await.expect("Load against the static transport should succeed.");

		assert_eq!(outcome, SyncOutcome::Applied);
		assert!(sync.load_phase().is_ready());

		let config = sync.config();

		assert_eq!(config.km_price, 150.);
		assert_eq!(config.standard_price, 150.);
		assert_eq!(config.luxury_price, 250.);
		assert_eq!(config.van_price, 225.);
	}

	#[tokio::test]
	async fn failed_load_surfaces_a_retry_affordance() {
		let sync = build_synchronizer(StaticTransport::failing(500));
		let err = sync.load().await.expect_err("Load should fail against a 500 backend.");

		assert!(err.is_retryable());
		assert!(matches!(sync.load_phase(), LoadPhase::LoadFailed { .. }));
		assert_eq!(sync.config(), PriceConfig::zeroed());
	}

	#[tokio::test]
	async fn retry_load_is_a_noop_when_ready() {
		let sync = build_synchronizer(StaticTransport::ok(
			r#"{"kmPrice":1,"standardPrice":2,"luxuryPrice":3,"vanPrice":4}"#,
		));

		sync.load().await.expect("Initial load should succeed.");

		let outcome = sync.retry_load().await.expect("Retry in the ready phase should be a no-op.");

		assert_eq!(outcome, SyncOutcome::Discarded);
	}

	#[tokio::test]
	async fn save_success_window_reverts_to_idle() {
		let sync = build_synchronizer(StaticTransport::ok(""));
		let config =
			PriceConfig::new(1.5, 100., 200., 175.).expect("Config fixture should build.");
		let outcome = sync.save(config).await.expect("Save should succeed.");

		assert_eq!(outcome, SyncOutcome::Applied);
		assert_eq!(sync.config(), config);

		let now = OffsetDateTime::now_utc();

		assert!(matches!(sync.save_phase_at(now), SavePhase::Success { .. }));
		assert_eq!(sync.save_phase_at(now + SAVE_SUCCESS_WINDOW), SavePhase::Idle);
		assert_eq!(
			sync.save_phase_at(now + SAVE_SUCCESS_WINDOW + Duration::seconds(1)),
			SavePhase::Idle
		);
	}

	#[tokio::test]
	async fn failed_save_settles_back_to_idle() {
		let sync = build_synchronizer(StaticTransport::failing(502));
		let config = PriceConfig::new(1., 2., 3., 4.).expect("Config fixture should build.");
		let err = sync.save(config).await.expect_err("Save should fail against a 502 backend.");

		assert!(err.is_retryable());
		assert_eq!(sync.save_phase_at(OffsetDateTime::now_utc()), SavePhase::Idle);
		assert_eq!(sync.metrics().save_failures(), 1);
	}

	#[tokio::test]
	async fn invalid_configs_never_reach_the_wire() {
		let sync = build_synchronizer(StaticTransport::ok(""));
		let invalid = PriceConfig { km_price: -1., standard_price: 2., luxury_price: 3., van_price: 4. };
		let err = sync.save(invalid).await.expect_err("Negative rates should fail validation.");

		assert!(matches!(err, Error::Validation(_)));
		assert_eq!(sync.metrics().save_attempts(), 0);
	}

	#[tokio::test]
	async fn concurrent_saves_fail_fast() {
		let gate = Arc::new(AsyncMutex::new(()));
		let sync = build_synchronizer(StaticTransport::gated("", gate.clone()));
		let config = PriceConfig::new(1., 2., 3., 4.).expect("Config fixture should build.");
		let held = gate.lock().await;
		let background = {
			let sync = sync.clone();

			tokio::spawn(async move { sync.save(config).await })
		};

		while !sync.is_saving() {
			tokio::task::yield_now().await;
		}

		let err = sync
			.save(config)
			.await
			.expect_err("A second save while one is outstanding must fail fast.");

		assert!(matches!(err, Error::SaveInFlight));

		drop(held);

		let outcome = background
			.await
			.expect("Background save task should not panic.")
			.expect("Background save should succeed once the gate opens.");

		assert_eq!(outcome, SyncOutcome::Applied);
		assert_eq!(sync.metrics().save_attempts(), 1);
	}

	#[tokio::test]
	async fn cancelled_loads_are_discarded() {
		let gate = Arc::new(AsyncMutex::new(()));
		let transport = StaticTransport::gated(
			r#"{"kmPrice":9,"standardPrice":9,"luxuryPrice":9,"vanPrice":9}"#,
			gate.clone(),
		);
		let entered = transport.entered.clone();
		let sync = build_synchronizer(transport);
		let held = gate.lock().await;
		let background = {
			let sync = sync.clone();

			tokio::spawn(async move { sync.load().await })
		};

		while !entered.load(Ordering::SeqCst) {
			tokio::task::yield_now().await;
		}

		sync.cancel_pending();
		drop(held);

		let outcome = background
			.await
			.expect("Background load task should not panic.")
			.expect("A cancelled load should resolve without an error.");

		assert_eq!(outcome, SyncOutcome::Discarded);
		assert_eq!(sync.config(), PriceConfig::zeroed());
		assert_eq!(sync.load_phase(), LoadPhase::InitialLoading);
	}
}
