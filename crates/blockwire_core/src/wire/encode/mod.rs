use crate::wire::path::{child_path, lookup, render_path};
use crate::wire::{Block, DiscriminatorBlock, ElementKind, PRESENCE_ABSENT, PRESENCE_NULL, PRESENCE_VALUE, PrimitiveKind, Result, Value, WireError, Writer};

/// Encode `data` against a block program, appending to `writer`.
pub fn encode_blocks(data: &Value, blocks: &[Block], writer: &mut Writer) -> Result<()> {
	for block in blocks {
		match block {
			Block::Primitive(block) => {
				block.kind.ensure_known()?;
				if block.kind == PrimitiveKind::Null {
					continue;
				}
				let value = require(data, &block.path)?;
				write_scalar(writer, &block.kind, value, &block.path)?;
			}
			Block::Array(block) => {
				if let ElementKind::Primitive(kind) = &block.kind {
					kind.ensure_known()?;
				}
				let items = match require(data, &block.path)? {
					Value::Array(items) => items,
					other => return Err(mismatch(&block.path, "array", other)),
				};
				writer.write_varint(items.len() as u64);

				match &block.kind {
					ElementKind::Object => {
						for item in items {
							encode_blocks(item, &block.blocks, writer)?;
						}
					}
					ElementKind::Primitive(PrimitiveKind::Boolean) => write_packed_bools(writer, items, &block.path)?,
					ElementKind::Primitive(kind) => {
						for (index, item) in items.iter().enumerate() {
							write_scalar(writer, kind, item, &child_path(&block.path, &index.to_string()))?;
						}
					}
				}
			}
			Block::Discriminator(block) => encode_discriminator(data, block, writer)?,
		}
	}
	Ok(())
}

/// Presence tristate of an optional or nullable slot.
pub fn presence_tag(value: Option<&Value>) -> u64 {
	let tag = match value {
		None => PRESENCE_ABSENT,
		Some(Value::Null) => PRESENCE_NULL,
		Some(_) => PRESENCE_VALUE,
	};
	tag as u64
}

fn encode_discriminator(data: &Value, block: &DiscriminatorBlock, writer: &mut Writer) -> Result<()> {
	block.kind.ensure_known()?;

	let presence;
	let (tag, tag_path) = if block.is_presence() {
		presence = Value::U64(presence_tag(lookup(data, &block.path)));
		(&presence, block.path.clone())
	} else {
		let tag_path = child_path(&block.path, &block.discriminator);
		(require(data, &tag_path)?, tag_path)
	};
	write_scalar(writer, &block.kind, tag, &tag_path)?;

	match block.select(tag) {
		Some(option) => encode_blocks(data, option, writer),
		None => Ok(()),
	}
}

fn require<'a>(data: &'a Value, path: &[String]) -> Result<&'a Value> {
	lookup(data, path).ok_or_else(|| WireError::MissingValue { path: render_path(path) })
}

fn mismatch(path: &[String], expected: &'static str, got: &Value) -> WireError {
	WireError::TypeMismatch {
		path: render_path(path),
		expected,
		got: got.kind_name(),
	}
}

fn kind_label(kind: &PrimitiveKind) -> &'static str {
	match kind {
		PrimitiveKind::String => "string",
		PrimitiveKind::Float => "float",
		PrimitiveKind::Int => "int",
		PrimitiveKind::Uint => "uint",
		PrimitiveKind::Boolean => "boolean",
		PrimitiveKind::Date => "date",
		PrimitiveKind::Buffer => "buffer",
		PrimitiveKind::Null => "null",
		PrimitiveKind::Unknown(_) => "unknown",
	}
}

fn write_scalar(writer: &mut Writer, kind: &PrimitiveKind, value: &Value, path: &[String]) -> Result<()> {
	let wrong = || mismatch(path, kind_label(kind), value);
	match kind {
		PrimitiveKind::String => match value {
			Value::String(text) => writer.write_string(text),
			_ => return Err(wrong()),
		},
		PrimitiveKind::Float => writer.write_double(value.as_f64().ok_or_else(wrong)?),
		PrimitiveKind::Int => writer.write_svarint(value.as_i64().ok_or_else(wrong)?),
		PrimitiveKind::Uint => writer.write_varint(value.as_u64().ok_or_else(wrong)?),
		PrimitiveKind::Boolean => match value {
			Value::Bool(flag) => writer.write_boolean(*flag),
			_ => return Err(wrong()),
		},
		PrimitiveKind::Date => match value {
			Value::Date(ticks) | Value::I64(ticks) => writer.write_sfixed64(*ticks),
			_ => return Err(wrong()),
		},
		PrimitiveKind::Buffer => match value {
			Value::Bytes(bytes) => writer.write_bytes(bytes),
			Value::Array(items) => {
				let bytes = items
					.iter()
					.map(|item| item.as_u64().and_then(|byte| u8::try_from(byte).ok()))
					.collect::<Option<Vec<u8>>>()
					.ok_or_else(wrong)?;
				writer.write_bytes(&bytes);
			}
			_ => return Err(wrong()),
		},
		PrimitiveKind::Null => {}
		PrimitiveKind::Unknown(_) => kind.ensure_known()?,
	}
	Ok(())
}

fn write_packed_bools(writer: &mut Writer, items: &[Value], path: &[String]) -> Result<()> {
	let mut packed = vec![0_u8; items.len().div_ceil(8)];
	for (index, item) in items.iter().enumerate() {
		match item {
			Value::Bool(true) => packed[index >> 3] |= 1 << (index & 7),
			Value::Bool(false) => {}
			other => return Err(mismatch(&child_path(path, &index.to_string()), "boolean", other)),
		}
	}
	writer.write_bytes(&packed);
	Ok(())
}
