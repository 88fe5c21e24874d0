use crate::wire::{Result, WireError};

const MAX_VARINT_LEN: usize = 10;

/// Append-only writer for the wire primitives.
#[derive(Debug, Default, Clone)]
pub struct Writer {
	buf: Vec<u8>,
}

impl Writer {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Write an unsigned LEB128 varint.
	pub fn write_varint(&mut self, mut value: u64) {
		while value >= 0x80 {
			self.buf.push((value as u8 & 0x7f) | 0x80);
			value >>= 7;
		}
		self.buf.push(value as u8);
	}

	/// Write a zig-zag encoded signed varint.
	pub fn write_svarint(&mut self, value: i64) {
		self.write_varint(zigzag_encode(value));
	}

	/// Write a little-endian IEEE-754 double.
	pub fn write_double(&mut self, value: f64) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Write a boolean as a single varint byte.
	pub fn write_boolean(&mut self, value: bool) {
		self.write_varint(u64::from(value));
	}

	/// Write a little-endian fixed 8-byte signed integer.
	pub fn write_sfixed64(&mut self, value: i64) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Write a length-prefixed opaque byte string.
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.write_varint(bytes.len() as u64);
		self.buf.extend_from_slice(bytes);
	}

	/// Write a length-prefixed UTF-8 string.
	pub fn write_string(&mut self, value: &str) {
		self.write_bytes(value.as_bytes());
	}

	/// Finalize and return the written buffer.
	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(WireError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read an unsigned LEB128 varint.
	pub fn read_varint(&mut self) -> Result<u64> {
		let start = self.pos;
		let mut value = 0_u64;
		for idx in 0..MAX_VARINT_LEN {
			let byte = self.read_exact(1)?[0];
			let bits = u64::from(byte & 0x7f);
			let shift = 7 * idx as u32;
			if idx == MAX_VARINT_LEN - 1 && bits > 1 {
				return Err(WireError::VarintOverflow { at: start });
			}
			value |= bits << shift;
			if byte & 0x80 == 0 {
				return Ok(value);
			}
		}
		Err(WireError::VarintOverflow { at: start })
	}

	/// Read a zig-zag encoded signed varint.
	pub fn read_svarint(&mut self) -> Result<i64> {
		Ok(zigzag_decode(self.read_varint()?))
	}

	/// Read a little-endian IEEE-754 double.
	pub fn read_double(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array8()?))
	}

	/// Read a boolean varint; any non-zero value is `true`.
	pub fn read_boolean(&mut self) -> Result<bool> {
		Ok(self.read_varint()? != 0)
	}

	/// Read a little-endian fixed 8-byte signed integer.
	pub fn read_sfixed64(&mut self) -> Result<i64> {
		Ok(i64::from_le_bytes(self.read_array8()?))
	}

	/// Read a length-prefixed opaque byte string.
	pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
		let at = self.pos;
		let len = self.read_varint()?;
		let len = usize::try_from(len).map_err(|_| WireError::UnexpectedEof {
			at,
			need: usize::MAX,
			rem: self.remaining(),
		})?;
		self.read_exact(len)
	}

	/// Read a length-prefixed UTF-8 string.
	pub fn read_string(&mut self) -> Result<&'a str> {
		let bytes = self.read_bytes()?;
		let at = self.pos - bytes.len();
		std::str::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8 { at })
	}

	fn read_array8(&mut self) -> Result<[u8; 8]> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(buf)
	}
}

/// Map a signed integer onto the unsigned zig-zag domain.
pub fn zigzag_encode(value: i64) -> u64 {
	((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
pub fn zigzag_decode(value: u64) -> i64 {
	((value >> 1) as i64) ^ -((value & 1) as i64)
}
