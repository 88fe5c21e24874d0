use std::path::PathBuf;

use blockwire::wire::DecodeOptions;
use tracing::info;

use crate::cmd::error::Result;
use crate::cmd::json::value_to_json;
use crate::cmd::util::{ProgramSource, decompress_zstd, emit_json, read_file};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub source: ProgramSource,
	/// Encoded buffer.
	pub input: PathBuf,
	/// Input is wrapped in a zstd frame.
	#[arg(long)]
	pub zstd: bool,
	/// Fail when bytes remain after decoding.
	#[arg(long)]
	pub strict: bool,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
}

/// Decode a buffer with a block program and print it as JSON.
pub fn run(args: Args) -> Result<()> {
	let codec = args.source.load()?;
	let raw = read_file(&args.input)?;
	let bytes = if args.zstd { decompress_zstd(&raw)? } else { raw };

	let mut options = if args.strict { DecodeOptions::strict() } else { DecodeOptions::default() };
	if let Some(value) = args.max_array {
		options.max_array_elems = value;
	}
	if let Some(value) = args.max_depth {
		options.max_depth = value;
	}

	let value = codec.decode_with_options(&bytes, &options)?;
	info!(input = %args.input.display(), bytes = bytes.len(), "decoded");
	emit_json(&value_to_json(&value))
}
