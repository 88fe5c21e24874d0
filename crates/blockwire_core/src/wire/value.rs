use indexmap::IndexMap;

/// Insertion-ordered field map of an object value.
pub type Object = IndexMap<Box<str>, Value>;

/// Application data moved through the encode and decode engines.
///
/// Equality is by content: numbers compare by numeric value across
/// `I64`/`U64`/`F64`, a `Date` equals an `I64` with the same ticks, and
/// `Bytes` equals an array of the same byte values. These are the shapes the
/// encoder accepts in place of one another.
#[derive(Debug, Clone)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer.
	I64(i64),
	/// Unsigned integer.
	U64(u64),
	/// Double-precision float.
	F64(f64),
	/// Milliseconds since the Unix epoch.
	Date(i64),
	/// Opaque byte string.
	Bytes(Vec<u8>),
	/// UTF-8 text.
	String(Box<str>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Named fields.
	Object(Object),
}

impl Value {
	/// Empty object value.
	pub fn object() -> Self {
		Self::Object(Object::new())
	}

	/// Build an object from `(name, value)` pairs, keeping their order.
	pub fn from_fields<K, I>(fields: I) -> Self
	where
		K: Into<Box<str>>,
		I: IntoIterator<Item = (K, Value)>,
	{
		Self::Object(fields.into_iter().map(|(name, value)| (name.into(), value)).collect())
	}

	/// Stable variant label used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "Null",
			Self::Bool(_) => "Bool",
			Self::I64(_) => "I64",
			Self::U64(_) => "U64",
			Self::F64(_) => "F64",
			Self::Date(_) => "Date",
			Self::Bytes(_) => "Bytes",
			Self::String(_) => "String",
			Self::Array(_) => "Array",
			Self::Object(_) => "Object",
		}
	}

	/// Field lookup on object values.
	pub fn get(&self, name: &str) -> Option<&Value> {
		match self {
			Self::Object(fields) => fields.get(name),
			_ => None,
		}
	}

	/// Any numeric variant widened to `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::I64(v) => Some(*v as f64),
			Self::U64(v) => Some(*v as f64),
			Self::F64(v) => Some(*v),
			_ => None,
		}
	}

	/// Integral numeric variants that fit `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(v) => Some(*v),
			Self::U64(v) => i64::try_from(*v).ok(),
			Self::F64(v) if is_integral(*v) && *v >= i64::MIN as f64 && *v < i64::MAX as f64 => Some(*v as i64),
			_ => None,
		}
	}

	/// Non-negative integral numeric variants.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::I64(v) => u64::try_from(*v).ok(),
			Self::U64(v) => Some(*v),
			Self::F64(v) if is_integral(*v) && *v >= 0.0 && *v < u64::MAX as f64 => Some(*v as u64),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => a == b,
			(Self::Bytes(a), Self::Bytes(b)) => a == b,
			(Self::Bytes(bytes), Self::Array(items)) | (Self::Array(items), Self::Bytes(bytes)) => {
				bytes.len() == items.len() && bytes.iter().zip(items).all(|(byte, item)| item.as_u64() == Some(u64::from(*byte)))
			}
			(Self::Date(a), Self::Date(b)) => a == b,
			(Self::Date(ticks), Self::I64(v)) | (Self::I64(v), Self::Date(ticks)) => ticks == v,
			(Self::I64(a), Self::I64(b)) => a == b,
			(Self::U64(a), Self::U64(b)) => a == b,
			(Self::F64(a), Self::F64(b)) => a == b,
			(Self::I64(v), other) | (other, Self::I64(v)) => other.as_i64() == Some(*v),
			(Self::U64(v), other) | (other, Self::U64(v)) => other.as_u64() == Some(*v),
			_ => false,
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::U64(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::Array(items)
	}
}

pub(crate) fn is_integral(value: f64) -> bool {
	value.is_finite() && value.fract() == 0.0
}

#[cfg(test)]
mod tests {
	use super::Value;

	#[test]
	fn object_equality_ignores_field_order() {
		let left = Value::from_fields([("a", Value::from(1_i64)), ("b", Value::from("x"))]);
		let right = Value::from_fields([("b", Value::from("x")), ("a", Value::from(1_i64))]);
		assert_eq!(left, right);
	}

	#[test]
	fn numbers_compare_by_value() {
		assert_eq!(Value::I64(123), Value::F64(123.0));
		assert_eq!(Value::U64(5), Value::I64(5));
		assert_eq!(Value::F64(7.0), Value::U64(7));
		assert_ne!(Value::I64(-1), Value::U64(u64::MAX));
		assert_ne!(Value::F64(1.5), Value::I64(1));
		assert_ne!(Value::F64(f64::NAN), Value::F64(f64::NAN));
		assert_ne!(Value::I64(1), Value::Bool(true));
	}

	#[test]
	fn dates_and_bytes_match_their_plain_forms() {
		assert_eq!(Value::Date(-5), Value::I64(-5));
		assert_ne!(Value::Date(5), Value::F64(5.0));
		assert_eq!(Value::Bytes(vec![1, 255]), Value::Array(vec![Value::I64(1), Value::U64(255)]));
		assert_ne!(Value::Bytes(vec![1]), Value::Array(vec![Value::I64(1), Value::I64(2)]));
	}

	#[test]
	fn integral_floats_coerce_to_integers() {
		assert_eq!(Value::F64(3.0).as_i64(), Some(3));
		assert_eq!(Value::F64(3.5).as_i64(), None);
		assert_eq!(Value::F64(-1.0).as_u64(), None);
		assert_eq!(Value::I64(-1).as_u64(), None);
		assert_eq!(Value::U64(u64::MAX).as_i64(), None);
	}
}
