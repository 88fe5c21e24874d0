use std::path::PathBuf;

use blockwire::wire::compile_schema;
use tracing::info;

use crate::cmd::error::Result;
use crate::cmd::inspect::render_listing;
use crate::cmd::schema_doc::load_schema;
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// Schema description file.
	pub schema: PathBuf,
	/// Print the program in JSON interchange form.
	#[arg(long)]
	pub json: bool,
}

/// Compile a schema description and print the resulting program.
pub fn run(args: Args) -> Result<()> {
	let schema = load_schema(&args.schema)?;
	let blocks = compile_schema(&schema)?;
	info!(path = %args.schema.display(), blocks = blocks.len(), "compiled");

	if args.json {
		emit_json(&blocks)
	} else {
		print!("{}", render_listing(&blocks));
		Ok(())
	}
}
