//! Crate-level error types shared across the client facade, interceptor, and stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; retry with backoff.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Client-side validation failure; nothing was sent to the backend.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Backend rejected the request's credential.
	#[error("Backend rejected the request credential: {reason}.")]
	Unauthorized {
		/// Backend- or client-supplied reason string.
		reason: String,
	},
	/// A price-list save is already in flight; the caller must wait for it to settle.
	#[error("A price-list save is already in flight.")]
	SaveInFlight,
}
impl Error {
	/// Returns `true` when retrying the operation may succeed.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Transient(_) | Self::Transport(_))
	}

	/// Returns the upstream `Retry-After` hint attached to the error, if any.
	pub fn retry_after(&self) -> Option<Duration> {
		match self {
			Self::Transient(TransientError::Endpoint { retry_after, .. }) => *retry_after,
			_ => None,
		}
	}
}
impl From<crate::auth::LoginValidationError> for Error {
	fn from(e: crate::auth::LoginValidationError) -> Self {
		Self::Validation(e.into())
	}
}
impl From<crate::pricing::PriceConfigError> for Error {
	fn from(e: crate::pricing::PriceConfigError) -> Self {
		Self::Validation(e.into())
	}
}

/// Configuration and validation failures raised while assembling requests.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint path cannot be joined onto the configured base URL.
	#[error("Endpoint path cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Settings document could not be parsed.
	#[error("Settings document is malformed.")]
	MalformedSettings {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	EncodeBody(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Client-side validation failures; the request is never issued.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// Login payload failed validation.
	#[error(transparent)]
	Credentials(#[from] crate::auth::LoginValidationError),
	/// Price configuration violated the non-negativity invariant.
	#[error(transparent)]
	Price(#[from] crate::pricing::PriceConfigError),
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Backend returned an unexpected but non-fatal response.
	#[error("Endpoint `{endpoint}` returned an unexpected response: {message}.")]
	Endpoint {
		/// Stable endpoint label the request targeted.
		endpoint: &'static str,
		/// Backend- or client-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Backend responded with malformed JSON that could not be parsed.
	#[error("Endpoint `{endpoint}` returned malformed JSON.")]
	ResponseParse {
		/// Stable endpoint label the request targeted.
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
