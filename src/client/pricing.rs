//! Price-list endpoint operations.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	error::ConfigError,
	http::{ApiTransport, HttpMethod},
	obs::EndpointKind,
	pricing::{PriceConfig, PriceList},
};

const PRICE_LIST_PATH: &str = "api/v1/pricelist";

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches the current price list.
	///
	/// Reads are idempotent, so transient failures are retried with backoff up to
	/// the configured bound before surfacing.
	pub async fn fetch_price_list(&self) -> Result<PriceList> {
		const KIND: EndpointKind = EndpointKind::PriceListFetch;

		let request = self.request(HttpMethod::Get, PRICE_LIST_PATH)?;
		let response = self.dispatch_idempotent(KIND, request).await?;

		Self::decode(KIND, &response)
	}

	/// Replaces the price list with the provided configuration.
	///
	/// The body carries exactly the four tariff fields. Writes are never retried
	/// automatically; failures surface to the caller for an explicit retry.
	pub async fn update_price_list(&self, config: &PriceConfig) -> Result<()> {
		const KIND: EndpointKind = EndpointKind::PriceListUpdate;

		config.validate()?;

		let body = serde_json::to_vec(config).map_err(ConfigError::EncodeBody)?;
		let request = self.request(HttpMethod::Put, PRICE_LIST_PATH)?.with_json_body(body);

		self.dispatch(KIND, request).await?;

		Ok(())
	}
}
