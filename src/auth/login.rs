//! Client-side login payload validation.

// self
use crate::{_prelude::*, auth::CredentialSecret};

/// Errors raised while validating login payloads locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum LoginValidationError {
	/// Email address was empty or whitespace.
	#[error("Email address cannot be empty.")]
	EmptyEmail,
	/// Email address does not look like `local@domain`.
	#[error("Email address `{email}` is malformed.")]
	MalformedEmail {
		/// Offending email value.
		email: String,
	},
	/// Password fell below the minimum length.
	#[error("Password must be at least {min} characters long.")]
	PasswordTooShort {
		/// Minimum permitted character count.
		min: usize,
	},
}

/// Validated login payload; construction performs all client-side checks so the
/// request is never issued with input the backend is guaranteed to reject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginCredentials {
	email: String,
	password: CredentialSecret,
}
impl LoginCredentials {
	/// Minimum password length accepted client-side.
	pub const MIN_PASSWORD_LEN: usize = 6;

	/// Validates and wraps an email/password pair.
	pub fn new(
		email: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, LoginValidationError> {
		let email = email.into();
		let password = password.into();

		validate_email(&email)?;

		if password.chars().count() < Self::MIN_PASSWORD_LEN {
			return Err(LoginValidationError::PasswordTooShort { min: Self::MIN_PASSWORD_LEN });
		}

		Ok(Self { email, password: CredentialSecret::new(password) })
	}

	/// Returns the validated email address.
	pub fn email(&self) -> &str {
		&self.email
	}

	/// Returns the raw password for request serialization. Callers must avoid
	/// logging this string.
	pub fn password(&self) -> &str {
		self.password.expose()
	}
}

fn validate_email(email: &str) -> Result<(), LoginValidationError> {
	if email.trim().is_empty() {
		return Err(LoginValidationError::EmptyEmail);
	}

	let malformed = || LoginValidationError::MalformedEmail { email: email.to_owned() };
	let (local, domain) = email.split_once('@').ok_or_else(malformed)?;

	if local.is_empty() || domain.is_empty() || domain.contains('@') {
		return Err(malformed());
	}
	if email.chars().any(char::is_whitespace) {
		return Err(malformed());
	}

	Ok(())
}
