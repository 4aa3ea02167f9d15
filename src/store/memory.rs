//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::CredentialSecret,
	store::{CREDENTIAL_STORAGE_KEY, CredentialStore, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, CredentialSecret>>>;

/// Thread-safe storage backend that keeps the credential in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn save_now(map: StoreMap, credential: CredentialSecret) -> Result<(), StoreError> {
		map.write().insert(CREDENTIAL_STORAGE_KEY.to_owned(), credential);

		Ok(())
	}

	fn load_now(map: StoreMap) -> Option<CredentialSecret> {
		map.read().get(CREDENTIAL_STORAGE_KEY).cloned()
	}

	fn clear_now(map: StoreMap) -> Result<(), StoreError> {
		map.write().remove(CREDENTIAL_STORAGE_KEY);

		Ok(())
	}
}
impl CredentialStore for MemoryStore {
	fn save(&self, credential: CredentialSecret) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::save_now(map, credential) })
	}

	fn load(&self) -> StoreFuture<'_, Option<CredentialSecret>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::load_now(map)) })
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::clear_now(map) })
	}
}
