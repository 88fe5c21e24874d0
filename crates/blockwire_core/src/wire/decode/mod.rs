use tracing::trace;

use crate::wire::path::{assign, child_path, render_path};
use crate::wire::{Block, Cursor, DiscriminatorBlock, ElementKind, PrimitiveKind, Result, Value, WireError};

/// Limits and switches applied while decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum accepted array element count.
	pub max_array_elems: usize,
	/// Maximum nesting of object arrays.
	pub max_depth: u32,
	/// Error when bytes remain after the program finishes.
	pub strict: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_array_elems: 16 * 1024 * 1024,
			max_depth: 64,
			strict: false,
		}
	}
}

impl DecodeOptions {
	/// Default limits, rejecting trailing bytes.
	pub fn strict() -> Self {
		Self {
			strict: true,
			..Self::default()
		}
	}
}

/// Decode one value from `cursor` by running `blocks`, writing into `root`.
pub fn decode_blocks(cursor: &mut Cursor<'_>, blocks: &[Block], root: Value, opt: &DecodeOptions) -> Result<Value> {
	let mut data = root;
	decode_into(cursor, blocks, &mut data, opt, 0)?;

	if opt.strict && cursor.remaining() > 0 {
		return Err(WireError::TrailingBytes { leftover: cursor.remaining() });
	}
	Ok(data)
}

fn decode_into(cursor: &mut Cursor<'_>, blocks: &[Block], data: &mut Value, opt: &DecodeOptions, depth: u32) -> Result<()> {
	for block in blocks {
		match block {
			Block::Primitive(block) => {
				let value = read_scalar(cursor, &block.kind)?;
				assign(data, &block.path, value);
			}
			Block::Array(block) => {
				if let ElementKind::Primitive(kind) = &block.kind {
					kind.ensure_known()?;
				}
				let count = read_count(cursor, opt)?;
				trace!(path = %render_path(&block.path), count, kind = %block.kind, "decode array");

				let items = match &block.kind {
					ElementKind::Object => {
						if depth + 1 > opt.max_depth {
							return Err(WireError::DecodeDepthExceeded { max_depth: opt.max_depth });
						}
						let mut items = Vec::with_capacity(count.min(cursor.remaining()));
						for _ in 0..count {
							let mut element = Value::object();
							decode_into(cursor, &block.blocks, &mut element, opt, depth + 1)?;
							items.push(element);
						}
						items
					}
					ElementKind::Primitive(PrimitiveKind::Boolean) => read_packed_bools(cursor, count)?,
					ElementKind::Primitive(kind) => {
						let mut items = Vec::with_capacity(count.min(cursor.remaining()));
						for _ in 0..count {
							items.push(read_scalar(cursor, kind)?);
						}
						items
					}
				};
				assign(data, &block.path, Value::Array(items));
			}
			Block::Discriminator(block) => decode_discriminator(cursor, block, data, opt, depth)?,
		}
	}
	Ok(())
}

fn decode_discriminator(cursor: &mut Cursor<'_>, block: &DiscriminatorBlock, data: &mut Value, opt: &DecodeOptions, depth: u32) -> Result<()> {
	let tag = read_scalar(cursor, &block.kind)?;
	let option = block.select(&tag);
	if !block.is_presence() {
		assign(data, &child_path(&block.path, &block.discriminator), tag);
	}

	match option {
		Some(option) => decode_into(cursor, option, data, opt, depth),
		None => Ok(()),
	}
}

fn read_count(cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<usize> {
	let raw = cursor.read_varint()?;
	let too_large = || WireError::DecodeArrayTooLarge {
		count: raw,
		max: opt.max_array_elems,
	};
	let count = usize::try_from(raw).map_err(|_| too_large())?;
	if count > opt.max_array_elems {
		return Err(too_large());
	}
	Ok(count)
}

fn read_scalar(cursor: &mut Cursor<'_>, kind: &PrimitiveKind) -> Result<Value> {
	let value = match kind {
		PrimitiveKind::String => Value::String(cursor.read_string()?.into()),
		PrimitiveKind::Float => Value::F64(cursor.read_double()?),
		PrimitiveKind::Int => Value::I64(cursor.read_svarint()?),
		PrimitiveKind::Uint => Value::U64(cursor.read_varint()?),
		PrimitiveKind::Boolean => Value::Bool(cursor.read_boolean()?),
		PrimitiveKind::Date => Value::Date(cursor.read_sfixed64()?),
		PrimitiveKind::Buffer => Value::Bytes(cursor.read_bytes()?.to_vec()),
		PrimitiveKind::Null => Value::Null,
		PrimitiveKind::Unknown(_) => {
			kind.ensure_known()?;
			Value::Null
		}
	};
	Ok(value)
}

fn read_packed_bools(cursor: &mut Cursor<'_>, count: usize) -> Result<Vec<Value>> {
	let at = cursor.pos();
	let packed = cursor.read_bytes()?;
	let need = count.div_ceil(8);
	if packed.len() < need {
		return Err(WireError::UnexpectedEof {
			at,
			need,
			rem: packed.len(),
		});
	}
	Ok((0..count).map(|index| Value::Bool(packed[index >> 3] & (1 << (index & 7)) != 0)).collect())
}

#[cfg(test)]
mod tests;
