//! Ride-tracking token validation.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, ApiTransport, HttpMethod},
	obs::EndpointKind,
};

const TRACKING_VALIDATE_PATH: &str = "api/tracking/validate";

/// Backend verdict for a shared tracking link token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingValidation {
	/// Whether the token grants access to the ride.
	pub valid: bool,
	/// Ride the token points at, when valid.
	#[serde(default)]
	pub ride_id: Option<i64>,
	/// Whether the token belongs to a registered account.
	pub is_registered: bool,
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Validates a tracking link token against the backend.
	pub async fn validate_tracking_token(&self, token: &str) -> Result<TrackingValidation> {
		const KIND: EndpointKind = EndpointKind::TrackingValidate;

		let mut url = self.settings.endpoint(TRACKING_VALIDATE_PATH)?;

		url.query_pairs_mut().append_pair("token", token);

		let request =
			ApiRequest::new(HttpMethod::Get, url).with_timeout(self.settings.request_timeout);
		let response = self.dispatch_idempotent(KIND, request).await?;

		Self::decode(KIND, &response)
	}
}
