use blockwire::wire::Value;
use serde_json::{Map, Value as JsonValue};

/// Convert a JSON document into codec input.
///
/// Integers become `I64`, or `U64` above `i64::MAX`; other numbers become `F64`.
pub(crate) fn json_to_value(json: &JsonValue) -> Value {
	match json {
		JsonValue::Null => Value::Null,
		JsonValue::Bool(v) => Value::Bool(*v),
		JsonValue::Number(number) => {
			if let Some(v) = number.as_i64() {
				Value::I64(v)
			} else if let Some(v) = number.as_u64() {
				Value::U64(v)
			} else {
				Value::F64(number.as_f64().unwrap_or(f64::NAN))
			}
		}
		JsonValue::String(v) => Value::from(v.as_str()),
		JsonValue::Array(items) => Value::Array(items.iter().map(json_to_value).collect()),
		JsonValue::Object(fields) => Value::from_fields(fields.iter().map(|(name, item)| (name.as_str(), json_to_value(item)))),
	}
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Render decoded data as JSON. Bytes become number arrays, dates their tick count.
///
/// Integral floats within the exactly representable range print as integers.
pub(crate) fn value_to_json(value: &Value) -> JsonValue {
	match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => serde_json::json!(v),
		Value::I64(v) => serde_json::json!(v),
		Value::U64(v) => serde_json::json!(v),
		Value::F64(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => serde_json::json!(*v as i64),
		Value::F64(v) => serde_json::json!(v),
		Value::Date(v) => serde_json::json!(v),
		Value::Bytes(v) => JsonValue::Array(v.iter().map(|item| serde_json::json!(item)).collect()),
		Value::String(v) => serde_json::json!(v.as_ref()),
		Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Object(fields) => {
			let out: Map<String, JsonValue> = fields.iter().map(|(name, item)| (name.to_string(), value_to_json(item))).collect();
			JsonValue::Object(out)
		}
	}
}
