use std::path::PathBuf;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, VariantError>;

/// Errors produced while decoding, encoding, merging, and persisting variant trees.
#[derive(Debug, Error)]
pub enum VariantError {
	/// Filesystem or stream IO failure while reading.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Temporary sibling file could not be created.
	#[error("couldn't create temporary file in {dir}: {source}", dir = dir.display())]
	CreateTemp {
		/// Directory the temporary file was requested in.
		dir: PathBuf,
		/// Underlying OS error.
		source: std::io::Error,
	},
	/// Writing encoded bytes to the temporary file failed; the temporary file was removed.
	#[error("couldn't save temporary file {tmp}: {source}", tmp = tmp.display())]
	WriteTemp {
		/// Temporary file path.
		tmp: PathBuf,
		/// Underlying OS error.
		source: std::io::Error,
	},
	/// Renaming the temporary file over the target failed; the temporary file was kept.
	#[error("couldn't save file {path}: {source} (temporary kept at {tmp})", path = path.display(), tmp = tmp.display())]
	Rename {
		/// Temporary file left behind for recovery.
		tmp: PathBuf,
		/// Target path that was not replaced.
		path: PathBuf,
		/// Underlying OS error.
		source: std::io::Error,
	},
	/// Target path has no file name component.
	#[error("invalid target path {path}", path = path.display())]
	InvalidTarget {
		/// Offending path.
		path: PathBuf,
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
	/// Malformed benc integer (`i...e`).
	#[error("invalid benc integer at offset {at}")]
	BencInvalidInt {
		/// Offset of the `i` marker.
		at: usize,
	},
	/// Malformed benc string length prefix.
	#[error("invalid benc string length at offset {at}")]
	BencInvalidLength {
		/// Offset of the first length digit.
		at: usize,
	},
	/// Benc dictionary key is not a string.
	#[error("benc dict key at offset {at} is not a string")]
	BencKeyNotString {
		/// Offset of the offending token.
		at: usize,
	},
	/// Byte that cannot start any token in this position.
	#[error("unexpected byte 0x{byte:02x} at offset {at}")]
	UnexpectedByte {
		/// Offset of the byte.
		at: usize,
		/// Offending byte.
		byte: u8,
	},
	/// Dictionary closed after a key but before its value.
	#[error("dict key without value at offset {at}")]
	DictMissingValue {
		/// Offset of the closing marker.
		at: usize,
	},
	/// JSON grammar violation.
	#[error("json syntax error at offset {at}: expected {expected}")]
	JsonSyntax {
		/// Offset of the offending byte.
		at: usize,
		/// What the parser was looking for.
		expected: &'static str,
	},
	/// Unknown or truncated escape sequence inside a JSON string.
	#[error("invalid json escape at offset {at}")]
	JsonInvalidEscape {
		/// Offset of the backslash.
		at: usize,
	},
	/// Malformed JSON number.
	#[error("invalid json number at offset {at}")]
	JsonInvalidNumber {
		/// Offset of the first number byte.
		at: usize,
	},
	/// Non-whitespace data follows a complete document.
	#[error("trailing bytes after document at offset {at}")]
	TrailingBytes {
		/// Offset of the first trailing byte.
		at: usize,
	},
	/// Input nesting exceeded the configured ceiling.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: usize,
	},
	/// Operation was applied to a node of the wrong kind.
	#[error("kind mismatch: expected {expected}, got {got}")]
	KindMismatch {
		/// Expected node kind.
		expected: &'static str,
		/// Actual node kind.
		got: &'static str,
	},
	/// Encoded output could not be returned as text.
	#[error("encoded {format} output is not valid utf-8")]
	NotUtf8 {
		/// Format label.
		format: &'static str,
	},
	/// Key path expression syntax is invalid.
	#[error("invalid key path: {path}")]
	InvalidKeyPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Key path did not resolve to a node.
	#[error("key path not found: {path}")]
	PathNotFound {
		/// Original user-provided path string.
		path: String,
	},
}

impl VariantError {
	/// Byte offset where parsing halted, for parse errors.
	pub fn offset(&self) -> Option<usize> {
		match self {
			Self::UnexpectedEof { at, .. }
			| Self::BencInvalidInt { at }
			| Self::BencInvalidLength { at }
			| Self::BencKeyNotString { at }
			| Self::UnexpectedByte { at, .. }
			| Self::DictMissingValue { at }
			| Self::JsonSyntax { at, .. }
			| Self::JsonInvalidEscape { at }
			| Self::JsonInvalidNumber { at }
			| Self::TrailingBytes { at } => Some(*at),
			_ => None,
		}
	}

	/// Whether this error describes malformed input rather than an OS failure.
	pub fn is_parse_error(&self) -> bool {
		self.offset().is_some() || matches!(self, Self::DepthExceeded { .. })
	}

	/// Raw OS error code for IO and persistence failures.
	pub fn raw_os_error(&self) -> Option<i32> {
		match self {
			Self::Io(source) | Self::CreateTemp { source, .. } | Self::WriteTemp { source, .. } | Self::Rename { source, .. } => source.raw_os_error(),
			_ => None,
		}
	}
}
