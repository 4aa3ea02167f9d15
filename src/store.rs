//! Storage contracts and built-in credential store implementations.
//!
//! The backend credential lives under a single fixed key: written at login, read
//! once per outgoing request, cleared at logout. There are no transaction
//! semantics; the last writer wins.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::CredentialSecret};

/// Fixed key under which the bearer credential is persisted.
pub const CREDENTIAL_STORAGE_KEY: &str = "ridehail.credential";

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the client's bearer credential.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the stored credential.
	fn save(&self, credential: CredentialSecret) -> StoreFuture<'_, ()>;

	/// Fetches the stored credential, if present. Absence is a valid state, not an
	/// error.
	fn load(&self) -> StoreFuture<'_, Option<CredentialSecret>>;

	/// Removes the stored credential.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
