//! Thread-safe in-memory [`SessionStore`] scoped to the current process.

// self
use crate::{
	_prelude::*,
	session::{SessionStore, StoreError},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Process-local session store; clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(StoreMap);
impl MemorySessionStore {
	/// Creates a store pre-populated with the provided entries.
	pub fn with_entries<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self(Arc::new(RwLock::new(map)))
	}

	/// Number of stored entries.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when the store holds no entries.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl SessionStore for MemorySessionStore {
	fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.0.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
		self.0.write().insert(key.to_owned(), value);

		Ok(())
	}

	fn remove(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.0.write().remove(key))
	}
}
