//! Error type shared across the model and the browser bridge.

/// Everything that can go wrong while restoring, importing or persisting a model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Text was not valid JSON.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// JSON parsed, but is not a `{nodes: [...], edges: [...]}` document.
	#[error("invalid model: {0}")]
	InvalidModel(String),

	/// Browser storage is missing or refused the write.
	#[error("storage error: {0}")]
	Storage(String),

	/// A DOM call failed.
	#[error("browser error: {0}")]
	Browser(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
