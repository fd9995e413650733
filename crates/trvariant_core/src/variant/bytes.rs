use crate::variant::{Result, VariantError};

/// Simple bounded cursor over an immutable byte slice.
pub(crate) struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub(crate) fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub(crate) fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub(crate) fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Look at the next byte without consuming it.
	pub(crate) fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	/// Whether the unread bytes begin with `prefix`.
	pub(crate) fn starts_with(&self, prefix: &[u8]) -> bool {
		self.bytes[self.pos..].starts_with(prefix)
	}

	/// Bytes consumed since offset `start`.
	pub(crate) fn since(&self, start: usize) -> &'a [u8] {
		&self.bytes[start.min(self.pos)..self.pos]
	}

	/// Move back to an earlier offset.
	pub(crate) fn rewind_to(&mut self, pos: usize) {
		self.pos = pos.min(self.pos);
	}

	/// Consume one byte.
	pub(crate) fn next_byte(&mut self) -> Result<u8> {
		let byte = self.peek().ok_or(VariantError::UnexpectedEof {
			at: self.pos,
			need: 1,
			rem: 0,
		})?;
		self.pos += 1;
		Ok(byte)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub(crate) fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(VariantError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Consume bytes up to (not including) `stop`, returning them.
	pub(crate) fn read_until(&mut self, stop: u8) -> Result<&'a [u8]> {
		let start = self.pos;
		let Some(rel_end) = self.bytes[start..].iter().position(|byte| *byte == stop) else {
			return Err(VariantError::UnexpectedEof {
				at: self.pos,
				need: 1,
				rem: self.remaining(),
			});
		};

		self.pos = start + rel_end;
		Ok(&self.bytes[start..self.pos])
	}

	/// Consume bytes while `pred` holds.
	pub(crate) fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a [u8] {
		let start = self.pos;
		while self.pos < self.bytes.len() && pred(self.bytes[self.pos]) {
			self.pos += 1;
		}
		&self.bytes[start..self.pos]
	}

	/// Skip JSON insignificant whitespace.
	pub(crate) fn skip_ws(&mut self) {
		let _ = self.take_while(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'));
	}
}
