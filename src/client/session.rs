//! Session lifecycle operations: login, driver registration, logout.
//!
//! The login and registration URLs both match the interceptor's exclusion set.
//! Login therefore never carries a stale credential, while registration is
//! rescued by the override set because only an authenticated admin may register
//! drivers.

// self
use crate::{
	_prelude::*,
	auth::{CredentialSecret, LoginCredentials},
	client::ApiClient,
	error::ConfigError,
	http::{ApiTransport, HttpMethod},
	obs::EndpointKind,
	settings::VehicleTier,
};

const LOGIN_PATH: &str = "api/v1/auth/login";
const REGISTER_DRIVER_PATH: &str = "api/v1/auth/register-driver";

#[derive(Serialize)]
struct LoginBody<'a> {
	email: &'a str,
	password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
	token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterDriverBody<'a> {
	name: &'a str,
	surname: &'a str,
	email: &'a str,
	password: &'a str,
	vehicle_type: VehicleTier,
}

/// Driver registration payload submitted by an authenticated admin.
#[derive(Clone, Debug)]
pub struct DriverRegistration {
	/// Driver's given name.
	pub name: String,
	/// Driver's family name.
	pub surname: String,
	/// Validated login pair issued to the new driver.
	pub credentials: LoginCredentials,
	/// Tier of the driver's vehicle.
	pub vehicle_tier: VehicleTier,
}
impl DriverRegistration {
	/// Assembles a registration around already-validated credentials.
	pub fn new(
		name: impl Into<String>,
		surname: impl Into<String>,
		credentials: LoginCredentials,
		vehicle_tier: VehicleTier,
	) -> Self {
		Self { name: name.into(), surname: surname.into(), credentials, vehicle_tier }
	}
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Exchanges validated credentials for a bearer token and persists it under
	/// the fixed storage key.
	pub async fn login(&self, credentials: &LoginCredentials) -> Result<CredentialSecret> {
		const KIND: EndpointKind = EndpointKind::Login;

		let body = LoginBody { email: credentials.email(), password: credentials.password() };
		let body = serde_json::to_vec(&body).map_err(ConfigError::EncodeBody)?;
		let request = self.request(HttpMethod::Post, LOGIN_PATH)?.with_json_body(body);
		let response = self.dispatch(KIND, request).await?;
		let payload: LoginResponse = Self::decode(KIND, &response)?;
		let credential = CredentialSecret::new(payload.token);

		self.store.save(credential.clone()).await?;

		Ok(credential)
	}

	/// Registers a new driver account on behalf of the authenticated admin.
	pub async fn register_driver(&self, registration: &DriverRegistration) -> Result<()> {
		const KIND: EndpointKind = EndpointKind::RegisterDriver;

		let body = RegisterDriverBody {
			name: &registration.name,
			surname: &registration.surname,
			email: registration.credentials.email(),
			password: registration.credentials.password(),
			vehicle_type: registration.vehicle_tier,
		};
		let body = serde_json::to_vec(&body).map_err(ConfigError::EncodeBody)?;
		let request = self.request(HttpMethod::Post, REGISTER_DRIVER_PATH)?.with_json_body(body);

		self.dispatch(KIND, request).await?;

		Ok(())
	}

	/// Clears the stored credential. No backend call is involved; the token is
	/// simply forgotten client-side.
	pub async fn logout(&self) -> Result<()> {
		self.store.clear().await?;

		Ok(())
	}
}
