use std::io::Read;
use std::path::{Path, PathBuf};

use blockwire::wire::Codec;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cmd::error::{CliError, Result};
use crate::cmd::schema_doc::load_schema;

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;

/// Where a command obtains its block program. Exactly one source must be given.
#[derive(clap::Args, Debug)]
#[group(multiple = false)]
pub struct ProgramSource {
	/// Compiled program in JSON interchange form.
	#[arg(long)]
	pub program: Option<PathBuf>,
	/// Schema description compiled on the fly.
	#[arg(long)]
	pub schema: Option<PathBuf>,
}

impl ProgramSource {
	pub(crate) fn load(&self) -> Result<Codec> {
		match (&self.program, &self.schema) {
			(Some(path), _) => {
				debug!(path = %path.display(), "loading program");
				Ok(Codec::from_blocks(read_json(path)?))
			}
			(None, Some(path)) => {
				debug!(path = %path.display(), "compiling schema");
				Ok(Codec::from_schema(&load_schema(path)?)?)
			}
			(None, None) => Err(CliError::MissingProgram),
		}
	}
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
	std::fs::read(path).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
	std::fs::write(path, bytes).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let bytes = read_file(path)?;
	serde_json::from_slice(&bytes).map_err(|source| CliError::Json {
		path: path.to_path_buf(),
		source,
	})
}

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize + ?Sized>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(CliError::Emit)?;
	println!("{text}");
	Ok(())
}

pub(crate) fn compress_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	zstd::stream::encode_all(raw, 0).map_err(CliError::Zstd)
}

pub(crate) fn decompress_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw).map_err(CliError::Zstd)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf).map_err(CliError::Zstd)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(CliError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
