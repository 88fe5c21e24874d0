use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WireError>;

/// Errors produced while compiling schemas and encoding or decoding buffers.
#[derive(Debug, Error)]
pub enum WireError {
	/// Schema node has no compilation rule.
	#[error("unsupported schema at: {path}")]
	UnsupportedSchema {
		/// Dotted path of the offending node.
		path: String,
	},
	/// Literal value outside the string/number/boolean domains.
	#[error("unsupported literal value")]
	UnsupportedLiteral,
	/// Effect wrapper other than a recognized refinement.
	#[error("unsupported effect")]
	UnsupportedEffect,
	/// Union tags do not share one scalar kind (or the int/float mix).
	#[error("could not determine the type of the discriminator at: {path}")]
	UndecidableDiscriminator {
		/// Dotted path of the union.
		path: String,
	},
	/// Union member is not an object with a literal or enum discriminator field.
	#[error("invalid union member at: {path} (discriminator {discriminator:?})")]
	InvalidUnionMember {
		/// Dotted path of the union.
		path: String,
		/// Discriminator field name the member was expected to carry.
		discriminator: String,
	},
	/// Block kind outside the closed primitive enumeration.
	#[error("unknown block kind: {kind}")]
	UnknownKind {
		/// Kind name as it appeared in the program.
		kind: String,
	},
	/// Value required by a block is absent from the input data.
	#[error("missing value at: {path}")]
	MissingValue {
		/// Dotted path that was looked up.
		path: String,
	},
	/// Value cannot be written with the block's kind.
	#[error("type mismatch at: {path}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Dotted path of the value.
		path: String,
		/// Wire kind the block expects.
		expected: &'static str,
		/// Variant name of the offending value.
		got: &'static str,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Varint ran longer than ten bytes or overflowed `u64`.
	#[error("varint overflow at offset {at}")]
	VarintOverflow {
		/// Byte offset where the varint started.
		at: usize,
	},
	/// String payload was not valid UTF-8.
	#[error("invalid utf-8 string at offset {at}")]
	InvalidUtf8 {
		/// Byte offset where the string payload started.
		at: usize,
	},
	/// Decoded array count exceeded the configured limit.
	#[error("decode array too large: count={count}, max={max}")]
	DecodeArrayTooLarge {
		/// Count read from the buffer.
		count: u64,
		/// Maximum permitted array length.
		max: usize,
	},
	/// Nested object arrays exceeded the configured depth.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Strict decoding found unread bytes after the program finished.
	#[error("trailing bytes after decode: leftover={leftover}")]
	TrailingBytes {
		/// Unconsumed bytes.
		leftover: usize,
	},
}
