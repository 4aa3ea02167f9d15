//! Driver daily-log operations.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	error::ConfigError,
	http::{ApiTransport, HttpMethod},
	obs::EndpointKind,
};

const DRIVER_STATUS_PATH: &str = "driver-daily-logs/status";

#[derive(Serialize)]
struct ActivityBody {
	active: bool,
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Toggles the driver's daily-log activity flag.
	pub async fn set_driver_activity(&self, active: bool) -> Result<()> {
		const KIND: EndpointKind = EndpointKind::DriverStatus;

		let body = serde_json::to_vec(&ActivityBody { active }).map_err(ConfigError::EncodeBody)?;
		let request = self.request(HttpMethod::Patch, DRIVER_STATUS_PATH)?.with_json_body(body);

		self.dispatch(KIND, request).await?;

		Ok(())
	}
}
