use std::fmt::Write as _;
use std::path::PathBuf;

use blockwire::wire::{Block, render_path};

use crate::cmd::error::Result;
use crate::cmd::util::read_json;

#[derive(clap::Args)]
pub struct Args {
	/// Compiled program in JSON interchange form.
	pub program: PathBuf,
}

/// Print an indented listing of a compiled program.
pub fn run(args: Args) -> Result<()> {
	let blocks: Vec<Block> = read_json(&args.program)?;
	print!("{}", render_listing(&blocks));
	Ok(())
}

/// Render blocks one per line, nesting array elements and union options.
pub(crate) fn render_listing(blocks: &[Block]) -> String {
	let mut out = String::new();
	write_blocks(&mut out, blocks, 0);
	out
}

fn write_blocks(out: &mut String, blocks: &[Block], indent: usize) {
	let pad = "  ".repeat(indent);
	for block in blocks {
		match block {
			Block::Primitive(block) => {
				let _ = writeln!(out, "{pad}primitive {} {}", block.kind, show_path(&block.path));
			}
			Block::Array(block) => {
				let _ = writeln!(out, "{pad}array {} {}", block.kind, show_path(&block.path));
				write_blocks(out, &block.blocks, indent + 1);
			}
			Block::Discriminator(block) => {
				let role = if block.is_presence() {
					"presence".to_owned()
				} else {
					format!("tag={}", block.discriminator)
				};
				let _ = writeln!(out, "{pad}discriminator {} {} [{role}]", block.kind, show_path(&block.path));
				for (tag, option) in &block.options {
					let _ = writeln!(out, "{pad}  {tag} =>");
					write_blocks(out, option, indent + 2);
				}
			}
		}
	}
}

fn show_path(path: &[String]) -> String {
	if path.is_empty() { "<root>".to_owned() } else { render_path(path) }
}
