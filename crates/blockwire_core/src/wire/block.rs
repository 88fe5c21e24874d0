use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wire::value::is_integral;
use crate::wire::{ElementKind, Path, PrimitiveKind, Value};

/// Presence tag for an absent value.
pub const PRESENCE_ABSENT: i64 = 0;
/// Presence tag for a present, non-null value.
pub const PRESENCE_VALUE: i64 = 1;
/// Presence tag for a present null.
pub const PRESENCE_NULL: i64 = 2;

/// One instruction of a compiled program. Block order is wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
	/// Single scalar at `path`.
	Primitive(PrimitiveBlock),
	/// Sequence at `path`.
	Array(ArrayBlock),
	/// Tagged union or presence tristate at `path`.
	Discriminator(DiscriminatorBlock),
}

impl Block {
	/// Root-relative location the block reads and writes.
	pub fn path(&self) -> &[String] {
		match self {
			Self::Primitive(block) => &block.path,
			Self::Array(block) => &block.path,
			Self::Discriminator(block) => &block.path,
		}
	}

	/// Interchange name of the block variant.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Primitive(_) => "primitive",
			Self::Array(_) => "array",
			Self::Discriminator(_) => "discriminator",
		}
	}
}

/// Scalar leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveBlock {
	/// Wire representation.
	#[serde(rename = "type")]
	pub kind: PrimitiveKind,
	/// Value location.
	pub path: Path,
}

/// Length-prefixed sequence.
///
/// With [`ElementKind::Object`] every element is encoded by running `blocks`
/// against the element as a fresh root. Boolean arrays are bit-packed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayBlock {
	/// Element representation.
	#[serde(rename = "type")]
	pub kind: ElementKind,
	/// Element program, used only for object elements.
	pub blocks: Vec<Block>,
	/// Sequence location.
	pub path: Path,
}

/// Scalar tag followed by the blocks of the matching option.
///
/// When `discriminator` names a field, the tag is that sibling field under
/// `path`. When it is empty the block encodes the presence of the value at
/// `path` itself and the tag is never materialized as data:
///
/// - `0`: absent, nothing follows;
/// - `1`: present and non-null, the wrapped type's blocks follow;
/// - `2`: present and null, a single `null` primitive at `path` follows.
///
/// Option blocks carry paths rooted at the same data root as this block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscriminatorBlock {
	/// Tag representation; never `buffer` or `null`.
	#[serde(rename = "type")]
	pub kind: PrimitiveKind,
	/// Ordered `(tag, blocks)` pairs; order only matters for lookup.
	pub options: Vec<(Literal, Vec<Block>)>,
	/// Sibling tag field name, or empty for the presence tristate.
	pub discriminator: String,
	/// Union location.
	pub path: Path,
}

impl DiscriminatorBlock {
	/// Whether this block encodes optional/nullable presence.
	pub fn is_presence(&self) -> bool {
		self.discriminator.is_empty()
	}

	/// First option whose tag equals `tag`.
	pub fn select(&self, tag: &Value) -> Option<&[Block]> {
		self.options
			.iter()
			.find(|(option, _)| option.matches(tag))
			.map(|(_, blocks)| blocks.as_slice())
	}
}

/// Tag value of a discriminator option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
	/// Boolean tag.
	Bool(bool),
	/// Integral tag; presence tags use this form.
	Int(i64),
	/// Non-integral tag, or any tag of a float-kinded union.
	Float(f64),
	/// String tag.
	String(Box<str>),
}

impl Literal {
	/// Compare against a data value; numbers compare by numeric value.
	pub fn matches(&self, value: &Value) -> bool {
		match (self, value) {
			(Self::Bool(tag), Value::Bool(v)) => tag == v,
			(Self::String(tag), Value::String(v)) => tag == v,
			(Self::Int(tag), Value::I64(v)) => tag == v,
			(Self::Int(tag), Value::U64(v)) => i64::try_from(*v).is_ok_and(|v| v == *tag),
			(Self::Int(tag), Value::F64(v)) => is_integral(*v) && *tag as f64 == *v,
			(Self::Float(tag), other) => other.as_f64().is_some_and(|v| v == *tag),
			_ => false,
		}
	}
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::Int(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v:?}"),
			Self::String(v) => write!(f, "{v:?}"),
		}
	}
}
