use std::path::PathBuf;

use tracing::info;

use crate::cmd::error::Result;
use crate::cmd::json::json_to_value;
use crate::cmd::util::{ProgramSource, compress_zstd, emit_json, read_json, write_file};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub source: ProgramSource,
	/// JSON document to encode.
	pub data: PathBuf,
	/// Output file.
	#[arg(short, long)]
	pub output: PathBuf,
	/// Wrap the encoded buffer in a zstd frame.
	#[arg(long)]
	pub zstd: bool,
}

/// Encode a JSON document with a block program and write the buffer.
pub fn run(args: Args) -> Result<()> {
	let codec = args.source.load()?;
	let document: serde_json::Value = read_json(&args.data)?;

	let encoded = codec.encode(&json_to_value(&document))?;
	let written = if args.zstd { compress_zstd(&encoded)? } else { encoded.clone() };
	write_file(&args.output, &written)?;
	info!(output = %args.output.display(), bytes = written.len(), "encoded");

	emit_json(&EncodeJson {
		output: args.output.display().to_string(),
		encoded_bytes: encoded.len(),
		written_bytes: written.len(),
		zstd: args.zstd,
	})
}

#[derive(serde::Serialize)]
struct EncodeJson {
	output: String,
	encoded_bytes: usize,
	written_bytes: usize,
	zstd: bool,
}
