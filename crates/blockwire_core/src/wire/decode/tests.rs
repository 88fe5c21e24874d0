use super::{DecodeOptions, decode_blocks};
use crate::wire::{ArrayBlock, Block, Cursor, ElementKind, PrimitiveBlock, PrimitiveKind, Schema, Value, WireError, compile_schema};

fn decode(bytes: &[u8], blocks: &[Block], opt: &DecodeOptions) -> crate::wire::Result<Value> {
	let mut cursor = Cursor::new(bytes);
	decode_blocks(&mut cursor, blocks, Value::object(), opt)
}

fn flat(kind: PrimitiveKind, at: &str) -> Block {
	Block::Array(ArrayBlock {
		kind: ElementKind::Primitive(kind),
		blocks: Vec::new(),
		path: vec![at.to_owned()],
	})
}

#[test]
fn packed_bools_unpack_lsb_first() {
	let bytes = [13, 2, 0b1101_0101, 0b0001_0010];
	let value = decode(&bytes, &[flat(PrimitiveKind::Boolean, "flags")], &DecodeOptions::default()).expect("decodes");

	let expected: Vec<Value> = [true, false, true, false, true, false, true, true, false, true, false, false, true]
		.into_iter()
		.map(Value::Bool)
		.collect();
	assert_eq!(value, Value::from_fields([("flags", Value::Array(expected))]));
}

#[test]
fn short_packed_payload_is_eof() {
	let err = decode(&[9, 1, 0xff], &[flat(PrimitiveKind::Boolean, "flags")], &DecodeOptions::default()).expect_err("one byte for nine bits");
	assert!(matches!(err, WireError::UnexpectedEof { at: 1, need: 2, rem: 1 }));
}

#[test]
fn nested_paths_are_created_on_write() {
	let blocks = compile_schema(&Schema::object([("a", Schema::object([("b", Schema::String)])), ("n", Schema::int())])).expect("compiles");
	let value = decode(&[1, b'z', 5], &blocks, &DecodeOptions::default()).expect("decodes");

	assert_eq!(
		value,
		Value::from_fields([("a", Value::from_fields([("b", Value::from("z"))])), ("n", Value::I64(-3))])
	);
}

#[test]
fn presence_branches_shape_the_output() {
	let blocks = compile_schema(&Schema::object([("o", Schema::nullable(Schema::uint()))])).expect("compiles");
	let opt = DecodeOptions::default();

	assert_eq!(decode(&[0], &blocks, &opt).expect("absent"), Value::object());
	assert_eq!(decode(&[2], &blocks, &opt).expect("null"), Value::from_fields([("o", Value::Null)]));
	assert_eq!(decode(&[1, 7], &blocks, &opt).expect("value"), Value::from_fields([("o", Value::U64(7))]));
}

#[test]
fn union_tag_is_materialized() {
	let schema = Schema::object([(
		"shape",
		Schema::union(
			"kind",
			vec![
				Schema::object([("kind", Schema::literal_str("circle")), ("r", Schema::number())]),
				Schema::object([("kind", Schema::literal_str("dot"))]),
			],
		),
	)]);
	let blocks = compile_schema(&schema).expect("compiles");

	let mut bytes = vec![6];
	bytes.extend_from_slice(b"circle");
	bytes.extend_from_slice(&2.5_f64.to_le_bytes());
	let value = decode(&bytes, &blocks, &DecodeOptions::default()).expect("decodes");

	assert_eq!(
		value,
		Value::from_fields([("shape", Value::from_fields([("kind", Value::from("circle")), ("r", Value::F64(2.5))]))])
	);
}

#[test]
fn array_count_limit_is_enforced() {
	let opt = DecodeOptions {
		max_array_elems: 4,
		..DecodeOptions::default()
	};
	let err = decode(&[5, 0, 0, 0, 0, 0], &[flat(PrimitiveKind::Uint, "xs")], &opt).expect_err("too many elements");
	assert!(matches!(err, WireError::DecodeArrayTooLarge { count: 5, max: 4 }));
}

#[test]
fn huge_count_fails_without_allocating() {
	let bytes = [0xff, 0xff, 0xff, 0xff, 0x0f];
	let opt = DecodeOptions {
		max_array_elems: usize::MAX,
		..DecodeOptions::default()
	};
	let err = decode(&bytes, &[flat(PrimitiveKind::String, "xs")], &opt).expect_err("runs out of input");
	assert!(matches!(err, WireError::UnexpectedEof { .. }));
}

#[test]
fn object_array_depth_limit_is_enforced() {
	let schema = Schema::object([("outer", Schema::array(Schema::object([("inner", Schema::array(Schema::object([("x", Schema::Boolean)])))])))]);
	let blocks = compile_schema(&schema).expect("compiles");
	let opt = DecodeOptions {
		max_depth: 1,
		..DecodeOptions::default()
	};

	let err = decode(&[1, 1, 1], &blocks, &opt).expect_err("too deep");
	assert!(matches!(err, WireError::DecodeDepthExceeded { max_depth: 1 }));

	let value = decode(&[1, 1, 1], &blocks, &DecodeOptions::default()).expect("within default depth");
	let inner = Value::from_fields([("inner", Value::Array(vec![Value::from_fields([("x", Value::Bool(true))])]))]);
	assert_eq!(value, Value::from_fields([("outer", Value::Array(vec![inner]))]));
}

#[test]
fn strict_mode_rejects_trailing_bytes() {
	let blocks = compile_schema(&Schema::object([("b", Schema::Boolean)])).expect("compiles");

	let value = decode(&[1, 9, 9], &blocks, &DecodeOptions::default()).expect("lenient");
	assert_eq!(value, Value::from_fields([("b", Value::Bool(true))]));

	let err = decode(&[1, 9, 9], &blocks, &DecodeOptions::strict()).expect_err("strict");
	assert!(matches!(err, WireError::TrailingBytes { leftover: 2 }));
}

#[test]
fn unknown_kind_is_rejected() {
	let blocks = vec![Block::Primitive(PrimitiveBlock {
		kind: PrimitiveKind::from_name("int128"),
		path: vec!["a".to_owned()],
	})];
	let err = decode(&[0], &blocks, &DecodeOptions::default()).expect_err("unknown kind");
	assert_eq!(err.to_string(), "unknown block kind: int128");
}

#[test]
fn null_arrays_reserve_by_input_size() {
	let blocks = [flat(PrimitiveKind::Null, "n")];
	let value = decode(&[0xac, 0x02], &blocks, &DecodeOptions::default()).expect("decodes");
	let Some(Value::Array(items)) = value.get("n") else {
		panic!("expected array at n, got {value:?}");
	};
	assert_eq!(items.len(), 300);
	assert!(items.iter().all(|item| matches!(item, Value::Null)));
}

#[test]
fn oversized_null_array_count_is_rejected() {
	let opt = DecodeOptions {
		max_array_elems: 1024,
		..DecodeOptions::default()
	};
	let err = decode(&[0x80, 0x80, 0x80, 0x08], &[flat(PrimitiveKind::Null, "n")], &opt).expect_err("count above limit");
	assert!(matches!(err, WireError::DecodeArrayTooLarge { count: 16_777_216, max: 1024 }));
}
