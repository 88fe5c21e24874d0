use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wire::{Result, WireError};

/// Scalar wire representation selected for a leaf value.
///
/// Programs read back from an interchange format may name a kind outside the
/// closed set; such names are kept as [`PrimitiveKind::Unknown`] and rejected
/// by the encode and decode engines rather than at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrimitiveKind {
	/// Length-prefixed UTF-8 string.
	String,
	/// 8-byte IEEE-754 double.
	Float,
	/// Zig-zag signed varint.
	Int,
	/// Unsigned varint.
	Uint,
	/// Single varint byte, 0 or 1.
	Boolean,
	/// 8-byte signed millisecond tick count.
	Date,
	/// Length-prefixed opaque bytes.
	Buffer,
	/// Zero bytes; always decodes to null.
	Null,
	/// Name outside the enumeration.
	Unknown(Box<str>),
}

impl PrimitiveKind {
	/// Render the kind as its interchange name.
	pub fn as_str(&self) -> &str {
		match self {
			Self::String => "string",
			Self::Float => "float",
			Self::Int => "int",
			Self::Uint => "uint",
			Self::Boolean => "boolean",
			Self::Date => "date",
			Self::Buffer => "buffer",
			Self::Null => "null",
			Self::Unknown(name) => name,
		}
	}

	/// Parse an interchange name; never fails.
	pub fn from_name(name: &str) -> Self {
		match name {
			"string" => Self::String,
			"float" => Self::Float,
			"int" => Self::Int,
			"uint" => Self::Uint,
			"boolean" => Self::Boolean,
			"date" => Self::Date,
			"buffer" => Self::Buffer,
			"null" => Self::Null,
			other => Self::Unknown(other.into()),
		}
	}

	/// Fail with [`WireError::UnknownKind`] for names outside the enumeration.
	pub fn ensure_known(&self) -> Result<()> {
		match self {
			Self::Unknown(name) => Err(WireError::UnknownKind { kind: name.to_string() }),
			_ => Ok(()),
		}
	}
}

impl fmt::Display for PrimitiveKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<String> for PrimitiveKind {
	fn from(name: String) -> Self {
		Self::from_name(&name)
	}
}

impl From<PrimitiveKind> for String {
	fn from(kind: PrimitiveKind) -> Self {
		kind.as_str().to_owned()
	}
}

/// Element representation of an array block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
	/// Flat homogeneous array of scalars.
	Primitive(PrimitiveKind),
	/// Each element is a nested record decoded through the inner blocks.
	Object,
}

impl ElementKind {
	/// Render the kind as its interchange name.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Primitive(kind) => kind.as_str(),
			Self::Object => "object",
		}
	}
}

impl fmt::Display for ElementKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<PrimitiveKind> for ElementKind {
	fn from(kind: PrimitiveKind) -> Self {
		Self::Primitive(kind)
	}
}

impl From<String> for ElementKind {
	fn from(name: String) -> Self {
		if name == "object" {
			Self::Object
		} else {
			Self::Primitive(PrimitiveKind::from(name))
		}
	}
}

impl From<ElementKind> for String {
	fn from(kind: ElementKind) -> Self {
		kind.as_str().to_owned()
	}
}

#[cfg(test)]
mod tests {
	use super::{ElementKind, PrimitiveKind};

	#[test]
	fn known_names_round_trip() {
		for name in ["string", "float", "int", "uint", "boolean", "date", "buffer", "null"] {
			let kind = PrimitiveKind::from_name(name);
			assert!(kind.ensure_known().is_ok(), "{name} should be known");
			assert_eq!(kind.as_str(), name);
		}
	}

	#[test]
	fn unknown_name_is_preserved() {
		let kind = PrimitiveKind::from_name("never");
		assert_eq!(kind, PrimitiveKind::Unknown("never".into()));
		let err = kind.ensure_known().expect_err("unknown kind rejected");
		assert_eq!(err.to_string(), "unknown block kind: never");
	}

	#[test]
	fn object_sentinel_is_not_a_primitive() {
		assert_eq!(ElementKind::from("object".to_owned()), ElementKind::Object);
		assert_eq!(ElementKind::from("boolean".to_owned()), ElementKind::Primitive(PrimitiveKind::Boolean));
	}
}
