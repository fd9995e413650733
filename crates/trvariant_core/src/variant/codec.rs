use std::path::Path;

use tracing::debug;

use crate::variant::{QuarkTable, Result, Variant, VariantError, benc, json};

/// Initial capacity of encode output buffers.
const ENCODE_BUFFER: usize = 4096;

/// Wire format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	/// Length-prefixed binary encoding with sorted dictionary keys.
	Benc,
	/// Indented JSON.
	Json,
	/// JSON without insignificant whitespace.
	JsonLean,
}

impl Format {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Benc => "benc",
			Self::Json => "json",
			Self::JsonLean => "json-lean",
		}
	}

	/// Guess a format from a file extension: `.json` is JSON, anything else benc.
	pub fn from_path(path: impl AsRef<Path>) -> Self {
		let is_json = path
			.as_ref()
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
		if is_json { Self::Json } else { Self::Benc }
	}

	/// Parse a format label as produced by [`Format::as_str`].
	pub fn parse_label(label: &str) -> Option<Self> {
		match label {
			"benc" => Some(Self::Benc),
			"json" => Some(Self::Json),
			"json-lean" => Some(Self::JsonLean),
			_ => None,
		}
	}

	/// Whether this format is one of the JSON flavours.
	pub fn is_json(self) -> bool {
		matches!(self, Self::Json | Self::JsonLean)
	}
}

/// Decoder options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
	/// Maximum container nesting accepted; `None` means unbounded.
	pub max_depth: Option<usize>,
}

impl ParseOptions {
	/// Preset for payloads from untrusted peers.
	pub fn untrusted() -> Self {
		Self { max_depth: Some(512) }
	}

	/// Fail when opening one more container would exceed `max_depth`.
	pub(crate) fn check_depth(&self, open: usize) -> Result<()> {
		match self.max_depth {
			Some(max_depth) if open >= max_depth => Err(VariantError::DepthExceeded { max_depth }),
			_ => Ok(()),
		}
	}
}

/// Serialize a tree to bytes.
pub fn encode(root: &Variant, format: Format) -> Vec<u8> {
	let mut out = Vec::with_capacity(ENCODE_BUFFER);
	encode_into(root, format, &mut out);
	out
}

/// Append the serialized tree to `out`.
pub fn encode_into(root: &Variant, format: Format, out: &mut Vec<u8>) {
	match format {
		Format::Benc => benc::encode_into(root, out),
		Format::Json => json::encode_into(root, true, out),
		Format::JsonLean => json::encode_into(root, false, out),
	}
}

/// Serialize a tree to an owned string.
///
/// Fails with [`VariantError::NotUtf8`] when benc output carries binary strings.
pub fn encode_string(root: &Variant, format: Format) -> Result<String> {
	String::from_utf8(encode(root, format)).map_err(|_| VariantError::NotUtf8 { format: format.as_str() })
}

/// Parse a complete document with default options.
pub fn decode(input: &[u8], format: Format, quarks: &mut QuarkTable) -> Result<Variant> {
	decode_with(input, format, quarks, &ParseOptions::default())
}

/// Parse a complete document; trailing bytes are an error (JSON tolerates trailing whitespace).
pub fn decode_with(input: &[u8], format: Format, quarks: &mut QuarkTable, options: &ParseOptions) -> Result<Variant> {
	let (root, mut end) = decode_prefix(input, format, quarks, options)?;
	if format.is_json() {
		while end < input.len() && matches!(input[end], b' ' | b'\t' | b'\n' | b'\r') {
			end += 1;
		}
	}

	if end < input.len() {
		debug!(format = format.as_str(), at = end, "decode rejected trailing bytes");
		return Err(VariantError::TrailingBytes { at: end });
	}
	Ok(root)
}

/// Parse one document from the start of `input`, returning it and the offset where parsing stopped.
pub fn decode_prefix(input: &[u8], format: Format, quarks: &mut QuarkTable, options: &ParseOptions) -> Result<(Variant, usize)> {
	let parsed = match format {
		Format::Benc => benc::parse(input, quarks, options),
		Format::Json | Format::JsonLean => json::parse(input, quarks, options),
	};

	if let Err(err) = &parsed {
		debug!(format = format.as_str(), len = input.len(), error = %err, "decode failed");
	}
	parsed
}

#[cfg(test)]
mod tests {
	use super::{Format, ParseOptions, decode, decode_prefix, decode_with, encode, encode_string};
	use crate::variant::{QuarkTable, Variant, VariantError};

	#[test]
	fn format_follows_extension() {
		assert_eq!(Format::from_path("settings.json"), Format::Json);
		assert_eq!(Format::from_path("SETTINGS.JSON"), Format::Json);
		assert_eq!(Format::from_path("abc.resume"), Format::Benc);
		assert_eq!(Format::from_path("no-extension"), Format::Benc);
		assert_eq!(Format::parse_label("json-lean"), Some(Format::JsonLean));
		assert_eq!(Format::parse_label("yaml"), None);
	}

	#[test]
	fn decode_rejects_trailing_bytes() {
		let mut quarks = QuarkTable::new();
		let err = decode(b"i1ei2e", Format::Benc, &mut quarks).expect_err("trailing data fails");
		assert!(matches!(err, VariantError::TrailingBytes { at: 3 }));

		let value = decode(b"[1, 2]\n  ", Format::Json, &mut quarks).expect("trailing whitespace ok");
		assert_eq!(value.as_list().map(|list| list.len()), Some(2));
	}

	#[test]
	fn decode_prefix_reports_stop_offset() {
		let mut quarks = QuarkTable::new();
		let input = b"d1:ai1ee4:next";
		let (value, end) = decode_prefix(input, Format::Benc, &mut quarks, &ParseOptions::default()).expect("prefix parses");
		assert_eq!(end, 8);
		assert_eq!(value.by_key(b"a").and_then(Variant::get_int), Some(1));
		assert_eq!(&input[end..], b"4:next");
	}

	#[test]
	fn untrusted_preset_bounds_depth() {
		let mut quarks = QuarkTable::new();
		let input = "l".repeat(600) + &"e".repeat(600);
		let err = decode_with(input.as_bytes(), Format::Benc, &mut quarks, &ParseOptions::untrusted()).expect_err("too deep");
		assert!(matches!(err, VariantError::DepthExceeded { max_depth: 512 }));
		assert!(decode(input.as_bytes(), Format::Benc, &mut quarks).is_ok());
	}

	#[test]
	fn binary_benc_is_not_a_string() {
		let mut value = Variant::default();
		value.set_raw(&[0xff, 0xfe]);
		assert_eq!(encode(&value, Format::Benc), b"2:\xff\xfe");

		let err = encode_string(&value, Format::Benc).expect_err("binary output");
		assert!(matches!(err, VariantError::NotUtf8 { format: "benc" }));
	}
}
