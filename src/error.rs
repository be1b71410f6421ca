//! Error types for graph data and configuration loading.

/// Errors surfaced by the public API.
///
/// Steady-state conditions (dangling edges, unknown layout or colormap
/// names) are logged and defaulted instead of being reported here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Graph data or configuration JSON could not be decoded.
	#[error("failed to parse JSON: {0}")]
	Parse(#[from] serde_json::Error),
	/// Two vertices in one data set share an id.
	#[error("duplicate vertex id: {id}")]
	DuplicateVertex { id: String },
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
