//! Compile structural type descriptions into block programs and use them to
//! encode and decode a compact positional binary format.

/// Schema compilation, block programs, and the binary encode/decode engines.
pub mod wire;
