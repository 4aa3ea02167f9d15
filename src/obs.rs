//! Optional observability helpers for backend requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `ridehail_client.request` with the
//!   `endpoint` (operation) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `ridehail_client_request_total` counter for every
//!   attempt/success/failure, labeled by `endpoint` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Backend operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndpointKind {
	/// Price-list fetch.
	PriceListFetch,
	/// Price-list update.
	PriceListUpdate,
	/// Driver daily-log activity toggle.
	DriverStatus,
	/// Tracking-token validation.
	TrackingValidate,
	/// Login exchange.
	Login,
	/// Driver registration.
	RegisterDriver,
}
impl EndpointKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			EndpointKind::PriceListFetch => "price_list_fetch",
			EndpointKind::PriceListUpdate => "price_list_update",
			EndpointKind::DriverStatus => "driver_status",
			EndpointKind::TrackingValidate => "tracking_validate",
			EndpointKind::Login => "login",
			EndpointKind::RegisterDriver => "register_driver",
		}
	}
}
impl Display for EndpointKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
