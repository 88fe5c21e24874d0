#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

mod cmd;

#[derive(Parser)]
#[command(name = "blockwire", about = "Compile schemas into block programs and run the positional binary codec")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Compile a schema description into a block program.
	Compile(cmd::compile::Args),
	/// List the blocks of a compiled program.
	Inspect(cmd::inspect::Args),
	/// Encode a JSON document into a binary buffer.
	Encode(cmd::encode::Args),
	/// Decode a binary buffer into a JSON document.
	Decode(cmd::decode::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
		.init();
}

fn run() -> cmd::error::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Compile(args) => cmd::compile::run(args),
		Commands::Inspect(args) => cmd::inspect::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
	}
}
