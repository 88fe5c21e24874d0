mod block;
mod bytes;
mod codec;
mod compile;
mod decode;
mod encode;
mod error;
mod kind;
mod path;
mod schema;
mod value;

/// Block program model and presence tags.
pub use block::{ArrayBlock, Block, DiscriminatorBlock, Literal, PRESENCE_ABSENT, PRESENCE_NULL, PRESENCE_VALUE, PrimitiveBlock};
/// Primitive byte reader and writer.
pub use bytes::{Cursor, Writer, zigzag_decode, zigzag_encode};
/// Facade binding a program to encode/decode.
pub use codec::Codec;
/// Schema compiler entry point.
pub use compile::compile_schema;
/// Decode engine entry points and options.
pub use decode::{DecodeOptions, decode_blocks};
/// Encode engine entry points.
pub use encode::{encode_blocks, presence_tag};
/// Error and result aliases.
pub use error::{Result, WireError};
/// Wire kinds of leaves and array elements.
pub use kind::{ElementKind, PrimitiveKind};
/// Path lens over document values.
pub use path::{Path, assign, child_path, lookup, render_path};
/// Type description model.
pub use schema::{Effect, LiteralValue, NumberCheck, Predicate, Probe, Schema, is_bytes_refinement, refinement_accepts};
/// Document value types.
pub use value::{Object, Value};
