/// Schema compilation command.
pub mod compile;
/// Buffer decode command.
pub mod decode;
/// Document encode command.
pub mod encode;
/// CLI error type.
pub mod error;
/// Program listing command.
pub mod inspect;
mod json;
mod schema_doc;
/// Shared file, JSON and compression helpers.
pub mod util;
