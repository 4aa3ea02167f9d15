//! Price-configuration domain models and validation.

pub mod sync;

pub use sync::*;

// self
use crate::_prelude::*;

/// Errors raised while validating price configurations locally.
#[derive(Clone, Debug, PartialEq, Serialize, ThisError)]
pub enum PriceConfigError {
	/// A tariff field was negative, NaN, or infinite.
	#[error("{field} must be a finite, non-negative number, got {value}.")]
	InvalidRate {
		/// Offending field name (wire spelling).
		field: &'static str,
		/// Offending value.
		value: f64,
	},
}

/// The four tariff parameters controlling fare computation on the backend.
///
/// Invariant: every field is finite and non-negative. The backend is the source
/// of truth; the client holds a transient copy while editing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceConfig {
	/// Per-kilometer rate applied to every ride.
	pub km_price: f64,
	/// Base rate for the standard tier.
	pub standard_price: f64,
	/// Base rate for the luxury tier.
	pub luxury_price: f64,
	/// Base rate for the van tier.
	pub van_price: f64,
}
impl PriceConfig {
	/// Validates and constructs a configuration.
	pub fn new(
		km_price: f64,
		standard_price: f64,
		luxury_price: f64,
		van_price: f64,
	) -> Result<Self, PriceConfigError> {
		let config = Self { km_price, standard_price, luxury_price, van_price };

		config.validate()?;

		Ok(config)
	}

	/// Returns the all-zero configuration used before the first load completes.
	pub const fn zeroed() -> Self {
		Self { km_price: 0., standard_price: 0., luxury_price: 0., van_price: 0. }
	}

	/// Re-checks the non-negativity invariant; call before every save.
	pub fn validate(&self) -> Result<(), PriceConfigError> {
		let fields = [
			("kmPrice", self.km_price),
			("standardPrice", self.standard_price),
			("luxuryPrice", self.luxury_price),
			("vanPrice", self.van_price),
		];

		for (field, value) in fields {
			if !value.is_finite() || value < 0. {
				return Err(PriceConfigError::InvalidRate { field, value });
			}
		}

		Ok(())
	}
}

/// Wire payload returned by the price-list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
	/// Base rate for the standard tier.
	pub standard_price: f64,
	/// Base rate for the luxury tier.
	pub luxury_price: f64,
	/// Base rate for the van tier.
	pub van_price: f64,
	/// Per-kilometer rate applied to every ride.
	pub km_price: f64,
	/// Instant the backend recorded this tariff revision.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
}
impl PriceList {
	/// Copies the four tariff fields exactly, with no transformation.
	pub fn config(&self) -> PriceConfig {
		PriceConfig {
			km_price: self.km_price,
			standard_price: self.standard_price,
			luxury_price: self.luxury_price,
			van_price: self.van_price,
		}
	}
}
