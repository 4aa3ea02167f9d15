//! Single authority for bearer-credential attachment decisions.
//!
//! Earlier revisions of the front end carried two divergent copies of this logic;
//! they are consolidated here into one pure decision function so the transport
//! layer never has to reason about patterns itself. The rule, evaluated per
//! outgoing request:
//!
//! - `is_excluded` — the URL contains any pattern in the exclusion set.
//! - `is_override` — the URL contains any pattern in the override set.
//! - the credential is attached iff `(!is_excluded || is_override)` and a
//!   credential is present.
//!
//! Absence of a credential is a valid state, never an error: the request is
//! forwarded unauthenticated and the backend decides whether to reject it.

// self
use crate::{_prelude::*, auth::CredentialSecret, http::ApiRequest, settings::Settings};

/// Header name carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Per-request snapshot of ambient auth state.
///
/// Constructed explicitly for every call from the credential store so nothing in
/// the pipeline reads hidden global state.
#[derive(Clone, Debug)]
pub struct RequestContext {
	/// Credential read from the store at call time, if any.
	pub credential: Option<CredentialSecret>,
	/// Instant the snapshot was taken.
	pub observed_at: OffsetDateTime,
}
impl RequestContext {
	/// Creates a context around an optional stored credential.
	pub fn new(credential: Option<CredentialSecret>) -> Self {
		Self { credential, observed_at: OffsetDateTime::now_utc() }
	}

	/// Creates a context with no credential.
	pub fn anonymous() -> Self {
		Self::new(None)
	}

	/// Returns `true` when a credential is available for attachment.
	pub fn has_credential(&self) -> bool {
		self.credential.is_some()
	}

	/// Overrides the snapshot instant.
	pub fn with_observed_at(mut self, instant: OffsetDateTime) -> Self {
		self.observed_at = instant;

		self
	}
}

/// Which rule produced an attachment decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentDecision {
	/// No exclusion matched; the credential is attached when present.
	Attach,
	/// An exclusion matched and no override rescued the request.
	Excluded {
		/// Exclusion pattern that matched the URL.
		pattern: String,
	},
	/// An exclusion matched but an override forces attachment.
	Overridden {
		/// Override pattern that matched the URL.
		pattern: String,
	},
}
impl AttachmentDecision {
	/// Returns `true` when the policy permits attaching a credential.
	pub fn should_attach(&self) -> bool {
		!matches!(self, Self::Excluded { .. })
	}
}

/// Pure decision used by [`AttachmentPolicy`], independently testable from the
/// transport layer.
pub fn should_attach_credential(
	url: &str,
	has_credential: bool,
	exclusions: &[String],
	overrides: &[String],
) -> bool {
	let is_excluded = exclusions.iter().any(|pattern| url.contains(pattern.as_str()));
	let is_override = overrides.iter().any(|pattern| url.contains(pattern.as_str()));

	(!is_excluded || is_override) && has_credential
}

/// Evaluates the exclusion/override pattern sets and performs the single header
/// mutation the interceptor is allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachmentPolicy {
	exclusions: Vec<String>,
	overrides: Vec<String>,
}
impl AttachmentPolicy {
	/// Creates a policy from explicit pattern sets.
	pub fn new<I, J>(exclusions: I, overrides: J) -> Self
	where
		I: IntoIterator<Item = String>,
		J: IntoIterator<Item = String>,
	{
		Self {
			exclusions: exclusions.into_iter().collect(),
			overrides: overrides.into_iter().collect(),
		}
	}

	/// Builds the policy from the configured settings surface.
	pub fn from_settings(settings: &Settings) -> Self {
		Self::new(settings.auth_exclusions.iter().cloned(), settings.auth_overrides.iter().cloned())
	}

	/// Classifies a request URL against the pattern sets.
	pub fn decide(&self, url: &str) -> AttachmentDecision {
		let excluded_by = self.exclusions.iter().find(|pattern| url.contains(pattern.as_str()));

		match excluded_by {
			None => AttachmentDecision::Attach,
			Some(excluded) =>
				match self.overrides.iter().find(|pattern| url.contains(pattern.as_str())) {
					Some(rescued) => AttachmentDecision::Overridden { pattern: rescued.clone() },
					None => AttachmentDecision::Excluded { pattern: excluded.clone() },
				},
		}
	}

	/// Applies the policy to an outbound request, attaching the bearer header when
	/// both the decision and the context permit it. Requests are otherwise
	/// forwarded unmodified.
	pub fn apply(&self, context: &RequestContext, request: ApiRequest) -> ApiRequest {
		if !self.decide(request.url.as_str()).should_attach() {
			return request;
		}

		match &context.credential {
			Some(credential) => request
				.with_header(AUTHORIZATION_HEADER, format!("Bearer {}", credential.expose())),
			None => request,
		}
	}
}
