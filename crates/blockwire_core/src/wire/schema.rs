use std::fmt;
use std::sync::Arc;

use crate::wire::Value;

/// Type description compiled into a block program.
#[derive(Debug, Clone)]
pub enum Schema {
	/// Record with fields in declaration order.
	Object(Vec<(String, Schema)>),
	/// Union of object members tagged by a shared literal field.
	DiscriminatedUnion {
		/// Tag field name carried by every member.
		discriminator: String,
		/// Object members.
		options: Vec<Schema>,
	},
	/// UTF-8 text.
	String,
	/// True or false.
	Boolean,
	/// Number with optional integer/range constraints.
	Number(Vec<NumberCheck>),
	/// Point in time, stored as epoch milliseconds.
	Date,
	/// Always null; takes no space on the wire.
	Null,
	/// One of a fixed set of strings.
	Enum(Vec<String>),
	/// Single constant value.
	Literal(LiteralValue),
	/// Sequence of the element schema.
	Array(Box<Schema>),
	/// Value may be absent.
	Optional(Box<Schema>),
	/// Value may be null.
	Nullable(Box<Schema>),
	/// Wrapped schema with a custom check or conversion.
	Effects {
		/// Wrapped schema.
		schema: Box<Schema>,
		/// Attached effect.
		effect: Effect,
	},
	/// Arbitrary-precision integer; has no wire form.
	BigInt,
	/// Unconstrained value.
	Any,
}

/// Numeric constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCheck {
	/// Value must be integral.
	Int,
	/// Lower bound.
	Min {
		/// Bound value.
		value: f64,
		/// Whether the bound itself is allowed.
		inclusive: bool,
	},
	/// Upper bound.
	Max {
		/// Bound value.
		value: f64,
		/// Whether the bound itself is allowed.
		inclusive: bool,
	},
}

/// Literal constant in a type description.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
	/// Text constant.
	String(String),
	/// Numeric constant.
	Number(f64),
	/// Boolean constant.
	Boolean(bool),
	/// Rejected by the compiler.
	BigInt(i128),
	/// Rejected by the compiler.
	Null,
}

/// Effect attached to a wrapped schema.
#[derive(Clone)]
pub enum Effect {
	/// Boolean check run against candidate values.
	Refinement(Predicate),
	/// Value conversion; cannot be represented on the wire.
	Transform,
}

impl fmt::Debug for Effect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Refinement(_) => f.write_str("Refinement(..)"),
			Self::Transform => f.write_str("Transform"),
		}
	}
}

/// Shareable refinement check.
pub type Predicate = Arc<dyn Fn(&Probe<'_>) -> bool + Send + Sync>;

/// Candidate handed to a refinement predicate.
#[derive(Debug, Clone, Copy)]
pub enum Probe<'a> {
	/// Byte buffer.
	Bytes(&'a [u8]),
	/// Differently-typed numeric array.
	Words(&'a [u32]),
	/// Arbitrary document value.
	Value(&'a Value),
}

/// Run `predicate` against one probe.
pub fn refinement_accepts(predicate: &Predicate, probe: Probe<'_>) -> bool {
	predicate(&probe)
}

fn is_byte_buffer(probe: &Probe<'_>) -> bool {
	matches!(probe, Probe::Bytes(_))
}

/// Whether `predicate` behaves like a byte-buffer instance check.
pub fn is_bytes_refinement(predicate: &Predicate) -> bool {
	refinement_accepts(predicate, Probe::Bytes(&[])) && !refinement_accepts(predicate, Probe::Words(&[]))
}

impl Schema {
	/// Record from `(name, schema)` pairs.
	pub fn object<K, I>(fields: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Schema)>,
	{
		Self::Object(fields.into_iter().map(|(name, schema)| (name.into(), schema)).collect())
	}

	/// Tagged union over object members.
	pub fn union(discriminator: impl Into<String>, options: Vec<Schema>) -> Self {
		Self::DiscriminatedUnion {
			discriminator: discriminator.into(),
			options,
		}
	}

	/// Unconstrained float.
	pub fn number() -> Self {
		Self::Number(Vec::new())
	}

	/// Signed integer.
	pub fn int() -> Self {
		Self::Number(vec![NumberCheck::Int])
	}

	/// Non-negative integer.
	pub fn uint() -> Self {
		Self::Number(vec![NumberCheck::Int, NumberCheck::Min { value: 0.0, inclusive: true }])
	}

	/// Array of `element`.
	pub fn array(element: Schema) -> Self {
		Self::Array(Box::new(element))
	}

	/// Optional `inner`.
	pub fn optional(inner: Schema) -> Self {
		Self::Optional(Box::new(inner))
	}

	/// Nullable `inner`.
	pub fn nullable(inner: Schema) -> Self {
		Self::Nullable(Box::new(inner))
	}

	/// String enumeration.
	pub fn enumeration<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Enum(values.into_iter().map(Into::into).collect())
	}

	/// String literal.
	pub fn literal_str(value: impl Into<String>) -> Self {
		Self::Literal(LiteralValue::String(value.into()))
	}

	/// Numeric literal.
	pub fn literal_num(value: f64) -> Self {
		Self::Literal(LiteralValue::Number(value))
	}

	/// Boolean literal.
	pub fn literal_bool(value: bool) -> Self {
		Self::Literal(LiteralValue::Boolean(value))
	}

	/// Opaque byte buffer, expressed as an instance check over any value.
	pub fn instance_of_bytes() -> Self {
		Self::Any.refine(Arc::new(is_byte_buffer))
	}

	/// Wrap `self` with a refinement check.
	pub fn refine(self, predicate: Predicate) -> Self {
		Self::Effects {
			schema: Box::new(self),
			effect: Effect::Refinement(predicate),
		}
	}

	/// Wrap `self` with a value conversion.
	pub fn transform(self) -> Self {
		Self::Effects {
			schema: Box::new(self),
			effect: Effect::Transform,
		}
	}
}
