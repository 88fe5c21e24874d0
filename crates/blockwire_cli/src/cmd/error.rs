use std::path::PathBuf;

use blockwire::wire::WireError;
use thiserror::Error;

/// Command result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Compile or codec failure.
	#[error(transparent)]
	Wire(#[from] WireError),
	/// File could not be read or written.
	#[error("{}: {source}", path.display())]
	Io {
		/// File involved.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},
	/// File did not hold the expected JSON document.
	#[error("{}: invalid json: {source}", path.display())]
	Json {
		/// File involved.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: serde_json::Error,
	},
	/// Neither `--program` nor `--schema` was given.
	#[error("one of --program or --schema is required")]
	MissingProgram,
	/// Output could not be rendered as JSON.
	#[error("json output failed: {0}")]
	Emit(#[source] serde_json::Error),
	/// Literal in a schema description is not a scalar.
	#[error("schema literal must be a string, number, boolean or null, got: {value}")]
	InvalidLiteral {
		/// Offending JSON text.
		value: String,
	},
	/// zstd stream could not be produced or read.
	#[error("zstd: {0}")]
	Zstd(#[source] std::io::Error),
	/// Decompressed input exceeded the configured cap.
	#[error("decompressed input too large (limit={limit} bytes)")]
	DecompressedTooLarge {
		/// Byte cap.
		limit: usize,
	},
}
