//! High-level endpoint facade for the ride-hailing backend.

pub mod driver;
pub mod pricing;
pub mod session;
pub mod tracking;

mod retry;

pub use retry::RetryPolicy;
pub use session::DriverRegistration;
pub use tracking::TrackingValidation;

// self
use crate::{
	_prelude::*,
	auth::{AttachmentPolicy, RequestContext},
	error::{TransientError, TransportError},
	http::{ApiRequest, ApiResponse, ApiTransport, HttpMethod, RetrySleeper},
	obs::{self, EndpointKind, RequestOutcome, RequestSpan},
	settings::Settings,
	store::CredentialStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
#[cfg(all(feature = "reqwest", feature = "tokio"))] use crate::http::TokioSleeper;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Truncation bound applied to response bodies quoted inside error messages.
const BODY_PREVIEW_LEN: usize = 256;

/// Coordinates backend REST operations behind the credential interceptor.
///
/// The client owns the transport, settings, credential store, and attachment
/// policy so individual operation implementations can focus on endpoint-specific
/// payloads. Every call constructs a fresh [`RequestContext`] from the store and
/// funnels the request through [`AttachmentPolicy::apply`] before it reaches the
/// transport; nothing else in the pipeline reads ambient credential state.
pub struct ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport used for every outbound backend request.
	pub transport: Arc<T>,
	/// Static configuration surface (base URL, pattern sets, timeout).
	pub settings: Arc<Settings>,
	/// Credential store read once per request and written by the session flows.
	pub store: Arc<dyn CredentialStore>,
	/// Attachment policy evaluated per outgoing request.
	pub policy: AttachmentPolicy,
	/// Retry policy applied to idempotent reads.
	pub retry: RetryPolicy,
	/// Delay source used between retry attempts.
	pub sleeper: Arc<dyn RetrySleeper>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport + sleeper pair.
	pub fn with_transport(
		settings: Settings,
		store: Arc<dyn CredentialStore>,
		transport: impl Into<Arc<T>>,
		sleeper: Arc<dyn RetrySleeper>,
	) -> Self {
		let policy = AttachmentPolicy::from_settings(&settings);

		Self {
			transport: transport.into(),
			settings: Arc::new(settings),
			store,
			policy,
			retry: RetryPolicy::default(),
			sleeper,
		}
	}

	/// Overrides the retry policy used for idempotent reads.
	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Builds a request for the provided endpoint path with the configured timeout.
	pub(crate) fn request(&self, method: HttpMethod, path: &str) -> Result<ApiRequest> {
		let url = self.settings.endpoint(path)?;

		Ok(ApiRequest::new(method, url).with_timeout(self.settings.request_timeout))
	}

	/// Reads the stored credential into a per-call context.
	pub(crate) async fn request_context(&self) -> Result<RequestContext> {
		Ok(RequestContext::new(self.store.load().await?))
	}

	/// Dispatches a single request through the interceptor and classifies the
	/// response status.
	pub(crate) async fn dispatch(
		&self,
		kind: EndpointKind,
		request: ApiRequest,
	) -> Result<ApiResponse> {
		let span = RequestSpan::new(kind, "dispatch");

		obs::record_request_outcome(kind, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let context = self.request_context().await?;
				let request = self.policy.apply(&context, request);
				let response = self
					.transport
					.execute(request)
					.await
					.map_err(|e| Error::from(TransportError::network(e)))?;

				classify_response(kind, response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(kind, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(kind, RequestOutcome::Failure),
		}

		result
	}

	/// Dispatches an idempotent read, retrying transient failures with backoff up
	/// to the configured bound. Writes must go through [`ApiClient::dispatch`].
	pub(crate) async fn dispatch_idempotent(
		&self,
		kind: EndpointKind,
		request: ApiRequest,
	) -> Result<ApiResponse> {
		let mut attempt = 1;

		loop {
			match self.dispatch(kind, request.clone()).await {
				Ok(response) => return Ok(response),
				Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
					let delay = self.retry.delay_for(attempt, e.retry_after());

					self.sleeper.sleep(delay).await;

					attempt += 1;
				},
				Err(e) => return Err(e),
			}
		}
	}

	/// Decodes a JSON response body, preserving the failing field path on errors.
	pub(crate) fn decode<P>(kind: EndpointKind, response: &ApiResponse) -> Result<P>
	where
		P: for<'de> Deserialize<'de>,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
			TransientError::ResponseParse {
				endpoint: kind.as_str(),
				source,
				status: Some(response.status),
			}
			.into()
		})
	}
}
#[cfg(all(feature = "reqwest", feature = "tokio"))]
impl ApiClient<ReqwestTransport> {
	/// Creates a new client for the provided settings and credential store.
	///
	/// The client provisions its own hardened reqwest transport (redirects
	/// disabled, settings timeout applied) and the Tokio-backed retry sleeper, so
	/// callers do not need to pass transport handles explicitly.
	pub fn new(settings: Settings, store: Arc<dyn CredentialStore>) -> Result<Self> {
		let transport = ReqwestTransport::hardened(settings.request_timeout)?;

		Ok(Self::with_transport(settings, store, transport, Arc::new(TokioSleeper)))
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			settings: self.settings.clone(),
			store: self.store.clone(),
			policy: self.policy.clone(),
			retry: self.retry,
			sleeper: self.sleeper.clone(),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("api_url", &self.settings.api_url.as_str())
			.field("retry", &self.retry)
			.finish()
	}
}

fn classify_response(kind: EndpointKind, response: ApiResponse) -> Result<ApiResponse> {
	if response.is_success() {
		return Ok(response);
	}

	match response.status {
		401 | 403 => Err(Error::Unauthorized { reason: body_preview(&response) }),
		status => Err(TransientError::Endpoint {
			endpoint: kind.as_str(),
			message: body_preview(&response),
			status: Some(status),
			retry_after: response.retry_after,
		}
		.into()),
	}
}

fn body_preview(response: &ApiResponse) -> String {
	let rendered = String::from_utf8_lossy(&response.body);
	let trimmed = rendered.trim();

	if trimmed.is_empty() {
		return format!("HTTP {}", response.status);
	}

	trimmed.chars().take(BODY_PREVIEW_LEN).collect()
}
