use std::path::Path;

use blockwire::wire::{LiteralValue, NumberCheck, Schema};
use serde::Deserialize;

use crate::cmd::error::{CliError, Result};
use crate::cmd::util::read_json;

/// JSON form of a type description, tagged by `"type"`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum SchemaDoc {
	Object {
		fields: Vec<(String, SchemaDoc)>,
	},
	Union {
		discriminator: String,
		options: Vec<SchemaDoc>,
	},
	String,
	Boolean,
	Date,
	Null,
	Bytes,
	Number {
		#[serde(default)]
		int: bool,
		#[serde(default)]
		min: Option<f64>,
		#[serde(default)]
		max: Option<f64>,
	},
	Enum {
		values: Vec<String>,
	},
	Literal {
		value: serde_json::Value,
	},
	Array {
		items: Box<SchemaDoc>,
	},
	Optional {
		inner: Box<SchemaDoc>,
	},
	Nullable {
		inner: Box<SchemaDoc>,
	},
	Bigint,
	Any,
}

/// Read a schema description file.
pub(crate) fn load_schema(path: &Path) -> Result<Schema> {
	let doc: SchemaDoc = read_json(path)?;
	doc.into_schema()
}

impl SchemaDoc {
	pub(crate) fn into_schema(self) -> Result<Schema> {
		let schema = match self {
			Self::Object { fields } => Schema::Object(
				fields
					.into_iter()
					.map(|(name, doc)| doc.into_schema().map(|schema| (name, schema)))
					.collect::<Result<_>>()?,
			),
			Self::Union { discriminator, options } => Schema::union(discriminator, options.into_iter().map(Self::into_schema).collect::<Result<_>>()?),
			Self::String => Schema::String,
			Self::Boolean => Schema::Boolean,
			Self::Date => Schema::Date,
			Self::Null => Schema::Null,
			Self::Bytes => Schema::instance_of_bytes(),
			Self::Number { int, min, max } => {
				let mut checks = Vec::new();
				if int {
					checks.push(NumberCheck::Int);
				}
				if let Some(value) = min {
					checks.push(NumberCheck::Min { value, inclusive: true });
				}
				if let Some(value) = max {
					checks.push(NumberCheck::Max { value, inclusive: true });
				}
				Schema::Number(checks)
			}
			Self::Enum { values } => Schema::Enum(values),
			Self::Literal { value } => Schema::Literal(literal_value(value)?),
			Self::Array { items } => Schema::array(items.into_schema()?),
			Self::Optional { inner } => Schema::optional(inner.into_schema()?),
			Self::Nullable { inner } => Schema::nullable(inner.into_schema()?),
			Self::Bigint => Schema::BigInt,
			Self::Any => Schema::Any,
		};
		Ok(schema)
	}
}

fn literal_value(value: serde_json::Value) -> Result<LiteralValue> {
	match value {
		serde_json::Value::String(text) => Ok(LiteralValue::String(text)),
		serde_json::Value::Bool(flag) => Ok(LiteralValue::Boolean(flag)),
		serde_json::Value::Null => Ok(LiteralValue::Null),
		serde_json::Value::Number(number) => match number.as_f64() {
			Some(value) => Ok(LiteralValue::Number(value)),
			None => Err(CliError::InvalidLiteral { value: number.to_string() }),
		},
		other => Err(CliError::InvalidLiteral { value: other.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	use blockwire::wire::{Block, PrimitiveKind, compile_schema};
	use serde_json::json;

	use super::SchemaDoc;

	fn compile(doc: serde_json::Value) -> blockwire::wire::Result<Vec<Block>> {
		let doc: SchemaDoc = serde_json::from_value(doc).expect("valid description");
		compile_schema(&doc.into_schema().expect("converts"))
	}

	#[test]
	fn number_flags_select_kind() {
		let blocks = compile(json!({"type": "number", "int": true, "min": 0})).expect("compiles");
		assert!(matches!(blocks.as_slice(), [Block::Primitive(block)] if block.kind == PrimitiveKind::Uint));

		let blocks = compile(json!({"type": "number", "int": true})).expect("compiles");
		assert!(matches!(blocks.as_slice(), [Block::Primitive(block)] if block.kind == PrimitiveKind::Int));
	}

	#[test]
	fn bytes_description_compiles_to_buffer() {
		let blocks = compile(json!({"type": "array", "items": {"type": "bytes"}})).expect("compiles");
		let json = serde_json::to_value(&blocks).expect("serializes");
		assert_eq!(json, json!([{"block": "array", "type": "buffer", "blocks": [], "path": []}]));
	}

	#[test]
	fn structured_literals_are_rejected() {
		let doc: SchemaDoc = serde_json::from_value(json!({"type": "literal", "value": [1]})).expect("parses");
		let err = doc.into_schema().expect_err("array literal rejected");
		assert!(err.to_string().contains("[1]"));
	}

	#[test]
	fn unknown_description_types_fail_to_parse() {
		assert!(serde_json::from_value::<SchemaDoc>(json!({"type": "tuple"})).is_err());
	}
}
