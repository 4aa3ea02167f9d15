// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use time::{Duration, OffsetDateTime};
// self
use ridehail_client::{
	client::{ApiClient, RetryPolicy},
	error::Error,
	http::{ReqwestTransport, TokioSleeper},
	pricing::{LoadPhase, PriceConfig, PriceSynchronizer, SAVE_SUCCESS_WINDOW, SavePhase, SyncOutcome},
	settings::Settings,
	store::{CredentialStore, MemoryStore},
	url::Url,
};

fn build_client(server: &MockServer) -> ApiClient<ReqwestTransport> {
	let settings = Settings::new(
		Url::parse(&server.base_url()).expect("Mock backend URL should parse successfully."),
	);
	let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::default());

	ApiClient::with_transport(settings, store, ReqwestTransport::default(), Arc::new(TokioSleeper))
		.with_retry_policy(RetryPolicy::new(3, Duration::milliseconds(1), Duration::milliseconds(5)))
}

fn build_synchronizer(server: &MockServer) -> PriceSynchronizer<ReqwestTransport> {
	PriceSynchronizer::new(build_client(server))
}

#[tokio::test]
async fn load_populates_all_four_fields_from_the_payload() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/pricelist");
			then.status(200).header("content-type", "application/json").body(
				r#"{"standardPrice":150,"luxuryPrice":250,"vanPrice":225,"kmPrice":150,"createdAt":"2025-11-10T12:00:00Z"}"#,
			);
		})
		.await;
	let sync = build_synchronizer(&server);
	let outcome = sync.load().await.expect("Initial load should succeed.");

	assert_eq!(outcome, SyncOutcome::Applied);
	assert_eq!(sync.load_phase(), LoadPhase::Ready);

	let config = sync.config();

	assert_eq!(config.km_price, 150.);
	assert_eq!(config.standard_price, 150.);
	assert_eq!(config.luxury_price, 250.);
	assert_eq!(config.van_price, 225.);

	mock.assert_async().await;
}

#[tokio::test]
async fn reads_retry_up_to_the_bound_then_surface_the_failure() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/pricelist");
			then.status(503);
		})
		.await;
	let sync = build_synchronizer(&server);
	let err = sync.load().await.expect_err("Load should fail once retries are exhausted.");

	assert!(matches!(err, Error::Transient(_)));
	assert!(matches!(sync.load_phase(), LoadPhase::LoadFailed { .. }));
	assert_eq!(
		sync.config(),
		PriceConfig::zeroed(),
		"A failed load must not leave partial tariffs behind.",
	);

	mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn retry_load_recovers_after_the_backend_heals() {
	let server = MockServer::start_async().await;
	let mut failing = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/pricelist");
			then.status(500);
		})
		.await;
	let sync = build_synchronizer(&server);

	sync.load().await.expect_err("Load against the broken backend should fail.");
	failing.delete_async().await;

	let _healed = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/pricelist");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"standardPrice":100,"luxuryPrice":200,"vanPrice":175,"kmPrice":1.5}"#);
		})
		.await;
	let outcome = sync.retry_load().await.expect("Retry against the healed backend should succeed.");

	assert_eq!(outcome, SyncOutcome::Applied);
	assert!(sync.load_phase().is_ready());
	assert_eq!(sync.config().luxury_price, 200.);
}

#[tokio::test]
async fn save_transmits_exactly_the_four_edited_fields() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/v1/pricelist")
				.header("content-type", "application/json")
				.body(r#"{"kmPrice":1.5,"standardPrice":100.0,"luxuryPrice":200.0,"vanPrice":175.0}"#);
			then.status(204);
		})
		.await;
	let sync = build_synchronizer(&server);
	let config = PriceConfig::new(1.5, 100., 200., 175.).expect("Config fixture should build.");
	let outcome = sync.save(config).await.expect("Save should succeed.");

	assert_eq!(outcome, SyncOutcome::Applied);
	assert_eq!(sync.config(), config);

	mock.assert_async().await;
}

#[tokio::test]
async fn save_success_reverts_to_idle_after_the_fixed_window() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/v1/pricelist");
			then.status(200);
		})
		.await;
	let sync = build_synchronizer(&server);
	let config = PriceConfig::new(2., 120., 240., 180.).expect("Config fixture should build.");

	sync.save(config).await.expect("Save should succeed.");

	let now = OffsetDateTime::now_utc();

	assert!(
		matches!(sync.save_phase_at(now), SavePhase::Success { .. }),
		"The success indicator must be visible immediately after the save settles.",
	);
	assert_eq!(sync.save_phase_at(now + SAVE_SUCCESS_WINDOW), SavePhase::Idle);
}

#[tokio::test]
async fn failed_saves_are_never_retried_and_settle_to_idle() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/v1/pricelist");
			then.status(500);
		})
		.await;
	let sync = build_synchronizer(&server);
	let config = PriceConfig::new(1., 2., 3., 4.).expect("Config fixture should build.");
	let err = sync.save(config).await.expect_err("Save against a 500 backend should fail.");

	assert!(matches!(err, Error::Transient(_)));
	assert_eq!(sync.save_phase_at(OffsetDateTime::now_utc()), SavePhase::Idle);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unauthorized_saves_surface_the_rejection() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/v1/pricelist");
			then.status(401).body("token expired");
		})
		.await;
	let sync = build_synchronizer(&server);
	let config = PriceConfig::new(1., 2., 3., 4.).expect("Config fixture should build.");
	let err = sync.save(config).await.expect_err("Save without a valid credential should fail.");

	assert!(matches!(err, Error::Unauthorized { reason } if reason == "token expired"));
}
