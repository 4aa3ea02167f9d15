// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{Arc, Mutex},
};
// crates.io
use time::Duration;
// self
use ridehail_client::{
	auth::{AUTHORIZATION_HEADER, CredentialSecret, LoginCredentials},
	client::ApiClient,
	http::{ApiRequest, ApiResponse, ApiTransport, RetrySleeper, SleepFuture, TransportFuture},
	pricing::PriceConfig,
	settings::Settings,
	store::{CredentialStore, MemoryStore},
	url::Url,
};

#[derive(Debug)]
struct NeverError;
impl Display for NeverError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Recording transport never fails.")
	}
}
impl StdError for NeverError {}

/// Transport that records every intercepted request and answers with a canned body.
#[derive(Clone, Default)]
struct RecordingTransport {
	requests: Arc<Mutex<Vec<ApiRequest>>>,
	body: &'static str,
}
impl RecordingTransport {
	fn with_body(body: &'static str) -> Self {
		Self { requests: Default::default(), body }
	}

	fn recorded(&self) -> Vec<ApiRequest> {
		self.requests.lock().expect("Recording mutex should not be poisoned.").clone()
	}
}
impl ApiTransport for RecordingTransport {
	type TransportError = NeverError;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		let requests = self.requests.clone();
		let body = self.body.as_bytes().to_vec();

		Box::pin(async move {
			requests.lock().expect("Recording mutex should not be poisoned.").push(request);

			Ok(ApiResponse { status: 200, body, retry_after: None })
		})
	}
}

#[derive(Clone, Copy, Debug, Default)]
struct InstantSleeper;
impl RetrySleeper for InstantSleeper {
	fn sleep(&self, _duration: Duration) -> SleepFuture<'_> {
		Box::pin(async {})
	}
}

fn build_client(
	transport: RecordingTransport,
) -> (ApiClient<RecordingTransport>, Arc<MemoryStore>) {
	let settings = Settings::new(
		Url::parse("https://backend.example.com/").expect("Settings URL fixture should parse."),
	);
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn CredentialStore> = store_backend.clone();
	let client = ApiClient::with_transport(settings, store, transport, Arc::new(InstantSleeper));

	(client, store_backend)
}

async fn seed_credential(store: &MemoryStore, token: &str) {
	store
		.save(CredentialSecret::new(token))
		.await
		.expect("Seeding the credential fixture should succeed.");
}

#[tokio::test]
async fn authenticated_reads_carry_the_bearer_header() {
	let transport = RecordingTransport::with_body(
		r#"{"kmPrice":150,"standardPrice":150,"luxuryPrice":250,"vanPrice":225}"#,
	);
	let (client, store) = build_client(transport.clone());

	seed_credential(&store, "abc123").await;
	client.fetch_price_list().await.expect("Price-list fetch should succeed.");

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 1);
	assert_eq!(recorded[0].header(AUTHORIZATION_HEADER), Some("Bearer abc123"));
}

#[tokio::test]
async fn missing_credentials_forward_unauthenticated() {
	let transport = RecordingTransport::with_body(
		r#"{"kmPrice":1,"standardPrice":2,"luxuryPrice":3,"vanPrice":4}"#,
	);
	let (client, _store) = build_client(transport.clone());

	client
		.fetch_price_list()
		.await
		.expect("An absent credential is a valid state; the request must still go out.");

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 1);
	assert_eq!(recorded[0].header(AUTHORIZATION_HEADER), None);
}

#[tokio::test]
async fn login_is_excluded_even_with_a_stale_credential() {
	let transport = RecordingTransport::with_body(r#"{"token":"fresh-token"}"#);
	let (client, store) = build_client(transport.clone());

	seed_credential(&store, "stale-token").await;

	let credentials = LoginCredentials::new("admin@example.com", "hunter22")
		.expect("Login fixture should validate.");

	client.login(&credentials).await.expect("Login exchange should succeed.");

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 1);
	assert!(recorded[0].url.as_str().contains("api/v1/auth/login"));
	assert_eq!(
		recorded[0].header(AUTHORIZATION_HEADER),
		None,
		"Login URLs match the exclusion set; no credential may be attached.",
	);

	let stored = store
		.load()
		.await
		.expect("Loading the refreshed credential should succeed.")
		.expect("Login should persist the issued credential.");

	assert_eq!(stored.expose(), "fresh-token");
}

#[tokio::test]
async fn register_driver_override_wins_over_the_exclusion() {
	let transport = RecordingTransport::with_body("");
	let (client, store) = build_client(transport.clone());

	seed_credential(&store, "abc123").await;

	let credentials = LoginCredentials::new("driver@example.com", "hunter22")
		.expect("Registration fixture should validate.");
	let registration = ridehail_client::client::DriverRegistration::new(
		"Nina",
		"Petrov",
		credentials,
		ridehail_client::settings::VehicleTier::Van,
	);

	client.register_driver(&registration).await.expect("Registration should succeed.");

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 1);
	assert!(recorded[0].url.as_str().contains("api/v1/auth/register-driver"));
	assert_eq!(
		recorded[0].header(AUTHORIZATION_HEADER),
		Some("Bearer abc123"),
		"The override pattern must force-attach the admin credential.",
	);
}

#[tokio::test]
async fn writes_pass_through_the_same_policy() {
	let transport = RecordingTransport::with_body("");
	let (client, store) = build_client(transport.clone());

	seed_credential(&store, "abc123").await;

	let config = PriceConfig::new(1.5, 100., 200., 175.).expect("Config fixture should build.");

	client.update_price_list(&config).await.expect("Price-list update should succeed.");

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 1);
	assert_eq!(recorded[0].header(AUTHORIZATION_HEADER), Some("Bearer abc123"));
}
