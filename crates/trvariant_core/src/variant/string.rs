use crate::variant::Quark;

/// Byte-string payload of a string variant.
///
/// Strings may contain arbitrary bytes including NUL. An interned string shares
/// its bytes with a quark and never owns a copy.
#[derive(Debug, Clone)]
pub enum VariantStr {
	/// Privately owned bytes.
	Owned(Box<[u8]>),
	/// Bytes borrowed from an interned key.
	Interned(Quark),
}

impl VariantStr {
	/// Copy `bytes` into an owned string.
	pub fn from_bytes(bytes: &[u8]) -> Self {
		Self::Owned(Box::from(bytes))
	}

	/// Raw bytes.
	pub fn as_bytes(&self) -> &[u8] {
		match self {
			Self::Owned(bytes) => bytes,
			Self::Interned(quark) => quark.as_bytes(),
		}
	}

	/// Bytes as text when they are valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		std::str::from_utf8(self.as_bytes()).ok()
	}

	/// Byte length.
	pub fn len(&self) -> usize {
		self.as_bytes().len()
	}

	/// Whether the string holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.as_bytes().is_empty()
	}

	/// Whether the bytes are shared with an interned key.
	pub fn is_interned(&self) -> bool {
		matches!(self, Self::Interned(_))
	}

	/// Interned key backing this string, if any.
	pub fn quark(&self) -> Option<&Quark> {
		match self {
			Self::Interned(quark) => Some(quark),
			Self::Owned(_) => None,
		}
	}
}

impl Default for VariantStr {
	fn default() -> Self {
		Self::Owned(Box::default())
	}
}

impl PartialEq for VariantStr {
	fn eq(&self, other: &Self) -> bool {
		self.as_bytes() == other.as_bytes()
	}
}

impl Eq for VariantStr {}

impl From<&str> for VariantStr {
	fn from(value: &str) -> Self {
		Self::from_bytes(value.as_bytes())
	}
}

impl From<String> for VariantStr {
	fn from(value: String) -> Self {
		Self::Owned(value.into_bytes().into_boxed_slice())
	}
}

impl From<&[u8]> for VariantStr {
	fn from(value: &[u8]) -> Self {
		Self::from_bytes(value)
	}
}

impl From<Vec<u8>> for VariantStr {
	fn from(value: Vec<u8>) -> Self {
		Self::Owned(value.into_boxed_slice())
	}
}

impl From<Quark> for VariantStr {
	fn from(value: Quark) -> Self {
		Self::Interned(value)
	}
}
