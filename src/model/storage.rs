//! Where the serialized model lives between page loads.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// String key/value store the workspace mirrors the model into.
pub trait Storage {
	/// Value under `key`, `None` if never written.
	fn load(&self, key: &str) -> Result<Option<String>>;
	/// Overwrites `key`.
	fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
	fn local_storage() -> Result<web_sys::Storage> {
		web_sys::window()
			.ok_or_else(|| Error::Storage("no window".into()))?
			.local_storage()
			.map_err(|e| Error::Storage(format!("{e:?}")))?
			.ok_or_else(|| Error::Storage("localStorage unavailable".into()))
	}
}

impl Storage for BrowserStorage {
	fn load(&self, key: &str) -> Result<Option<String>> {
		Self::local_storage()?
			.get_item(key)
			.map_err(|e| Error::Storage(format!("{e:?}")))
	}

	fn save(&mut self, key: &str, value: &str) -> Result<()> {
		Self::local_storage()?
			.set_item(key, value)
			.map_err(|e| Error::Storage(format!("{e:?}")))
	}
}

/// In-process storage, optionally refusing writes.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
	entries: HashMap<String, String>,
	read_only: bool,
	writes: usize,
}

impl MemoryStorage {
	/// Storage pre-seeded with one entry.
	pub fn with_entry(key: &str, value: &str) -> Self {
		let mut storage = Self::default();
		storage.entries.insert(key.into(), value.into());
		storage
	}

	/// Makes every later `save` fail.
	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}

	/// Current value under `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Successful writes so far.
	pub fn writes(&self) -> usize {
		self.writes
	}
}

impl Storage for MemoryStorage {
	fn load(&self, key: &str) -> Result<Option<String>> {
		Ok(self.entries.get(key).cloned())
	}

	fn save(&mut self, key: &str, value: &str) -> Result<()> {
		if self.read_only {
			return Err(Error::Storage("quota exceeded".into()));
		}
		self.entries.insert(key.into(), value.into());
		self.writes += 1;
		Ok(())
	}
}
