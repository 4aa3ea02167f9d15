//! Typed client SDK for the ride-hailing backend—bearer-credential interception,
//! price-configuration synchronization, and transport-aware observability in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod obs;
pub mod pricing;
pub mod settings;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::{ApiClient, RetryPolicy},
		http::{ReqwestTransport, RetrySleeper, SleepFuture},
		settings::Settings,
		store::{CredentialStore, MemoryStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ApiClient<ReqwestTransport>;

	/// Sleeper that resolves immediately so retry tests never wait on real clocks.
	#[derive(Clone, Copy, Debug, Default)]
	pub struct InstantSleeper;
	impl RetrySleeper for InstantSleeper {
		fn sleep(&self, _duration: Duration) -> SleepFuture<'_> {
			Box::pin(async {})
		}
	}

	/// Builds settings pointed at a mock backend with the production pattern sets.
	pub fn test_settings(api_url: &str) -> Settings {
		let url = Url::parse(api_url).expect("Failed to parse mock backend URL.");

		Settings::new(url)
	}

	/// Constructs an [`ApiClient`] backed by an in-memory credential store, the default
	/// reqwest transport, and an instant retry sleeper.
	pub fn build_reqwest_test_client(api_url: &str) -> (ReqwestTestClient, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let client = ApiClient::with_transport(
			test_settings(api_url),
			store,
			ReqwestTransport::default(),
			Arc::new(InstantSleeper),
		)
		.with_retry_policy(RetryPolicy::new(3, Duration::milliseconds(1), Duration::milliseconds(5)));

		(client, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use httpmock as _;
