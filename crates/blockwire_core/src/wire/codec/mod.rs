use std::sync::Arc;

use tracing::debug;

use crate::wire::{Block, Cursor, DecodeOptions, Result, Schema, Value, Writer, compile_schema, decode_blocks, encode_blocks};

/// A block program bound to the encode and decode engines.
///
/// Cloning is cheap; the program is shared and never mutated.
#[derive(Debug, Clone)]
pub struct Codec {
	blocks: Arc<[Block]>,
}

impl Codec {
	/// Compile `schema` and wrap the resulting program.
	pub fn from_schema(schema: &Schema) -> Result<Self> {
		let blocks = compile_schema(schema)?;
		Ok(Self::from_blocks(blocks))
	}

	/// Wrap an already compiled or hand-written program.
	///
	/// The program is not validated here; unknown kinds surface when encoding
	/// or decoding reaches them.
	pub fn from_blocks(blocks: Vec<Block>) -> Self {
		debug!(blocks = blocks.len(), "codec ready");
		Self { blocks: blocks.into() }
	}

	/// Program in wire order.
	pub fn blocks(&self) -> &[Block] {
		&self.blocks
	}

	/// Encode `data` into a fresh buffer.
	pub fn encode(&self, data: &Value) -> Result<Vec<u8>> {
		let mut writer = Writer::new();
		encode_blocks(data, &self.blocks, &mut writer)?;
		Ok(writer.finish())
	}

	/// Decode `bytes` with default limits.
	pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
		self.decode_with_options(bytes, &DecodeOptions::default())
	}

	/// Decode `bytes` with explicit limits.
	pub fn decode_with_options(&self, bytes: &[u8], opt: &DecodeOptions) -> Result<Value> {
		let mut cursor = Cursor::new(bytes);
		decode_blocks(&mut cursor, &self.blocks, Value::object(), opt)
	}
}
