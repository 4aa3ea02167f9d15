//! Static configuration surface shared by the endpoint facade and the interceptor.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default per-request timeout applied when settings omit one.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::seconds(10);
/// Default daily work-hour goal surfaced on driver dashboards.
const DEFAULT_DAILY_HOUR_GOAL: u8 = 8;
/// Default avatar asset served when a profile has no picture.
const DEFAULT_AVATAR: &str = "assets/default-avatar.png";

/// Vehicle tiers priced by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleTier {
	/// Standard sedan tier.
	Standard,
	/// Luxury tier.
	Luxury,
	/// Van tier.
	Van,
}
impl VehicleTier {
	/// Returns the stable wire label used in backend payloads.
	pub const fn as_str(self) -> &'static str {
		match self {
			VehicleTier::Standard => "STANDARD",
			VehicleTier::Luxury => "LUXURY",
			VehicleTier::Van => "VAN",
		}
	}
}
impl Display for VehicleTier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Static settings consumed by the client facade and the attachment policy.
///
/// The pattern sets drive the credential interceptor: requests whose URL contains
/// any `auth_exclusions` entry are sent unauthenticated unless the URL also
/// contains an `auth_overrides` entry, in which case the credential is attached
/// after all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	/// Base URL of the backend REST API.
	pub api_url: Url,
	/// Asset path rendered when a profile has no picture.
	#[serde(default = "default_avatar")]
	pub default_avatar: String,
	/// Daily work-hour goal surfaced on driver dashboards.
	#[serde(default = "default_daily_hour_goal")]
	pub daily_hour_goal: u8,
	/// Vehicle tiers offered to riders.
	#[serde(default = "default_vehicle_tiers")]
	pub vehicle_tiers: Vec<VehicleTier>,
	/// URL-substring patterns whose requests skip the credential.
	#[serde(default = "default_auth_exclusions")]
	pub auth_exclusions: Vec<String>,
	/// URL-substring patterns that force-attach the credential even when excluded.
	#[serde(default = "default_auth_overrides")]
	pub auth_overrides: Vec<String>,
	/// Per-request timeout applied by the transport.
	#[serde(default = "default_request_timeout")]
	pub request_timeout: Duration,
}
impl Settings {
	/// Creates settings for the provided base URL with production defaults.
	pub fn new(api_url: Url) -> Self {
		Self {
			api_url,
			default_avatar: default_avatar(),
			daily_hour_goal: default_daily_hour_goal(),
			vehicle_tiers: default_vehicle_tiers(),
			auth_exclusions: default_auth_exclusions(),
			auth_overrides: default_auth_overrides(),
			request_timeout: default_request_timeout(),
		}
	}

	/// Parses settings from a JSON document.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ConfigError::MalformedSettings { source })
	}

	/// Overrides the per-request timeout.
	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Replaces both interceptor pattern sets.
	pub fn with_auth_patterns<I, J>(mut self, exclusions: I, overrides: J) -> Self
	where
		I: IntoIterator<Item = String>,
		J: IntoIterator<Item = String>,
	{
		self.auth_exclusions = exclusions.into_iter().collect();
		self.auth_overrides = overrides.into_iter().collect();

		self
	}

	/// Joins a relative endpoint path onto the base URL.
	///
	/// Base URLs are accepted with or without a trailing slash; the path is always
	/// treated as relative to the base, never as a sibling of its last segment.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let mut base = self.api_url.clone();

		if !base.path().ends_with('/') {
			let normalized = format!("{}/", base.path());

			base.set_path(&normalized);
		}

		base.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidEndpoint { source })
	}
}

fn default_avatar() -> String {
	DEFAULT_AVATAR.into()
}

fn default_daily_hour_goal() -> u8 {
	DEFAULT_DAILY_HOUR_GOAL
}

fn default_vehicle_tiers() -> Vec<VehicleTier> {
	vec![VehicleTier::Standard, VehicleTier::Luxury, VehicleTier::Van]
}

fn default_auth_exclusions() -> Vec<String> {
	vec!["api/v1/auth".into()]
}

fn default_auth_overrides() -> Vec<String> {
	vec!["api/v1/auth/register-driver".into()]
}

fn default_request_timeout() -> Duration {
	DEFAULT_REQUEST_TIMEOUT
}
