//! Session storage contract and built-in store implementations.
//!
//! The client never owns the session store; it receives one as an
//! `Arc<dyn SessionStore>` and only reads from it while signing requests. Writes belong to
//! whatever authentication flow produces the token.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

// self
use crate::_prelude::*;

/// Key-value capability backing session state (the `sessionStorage` analogue).
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns the raw value stored under `key`, if any.
	fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Stores `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

	/// Removes the entry under `key`, returning the previous value.
	fn remove(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Error type produced by [`SessionStore`] implementations.
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
