use tracing::warn;

use crate::variant::builder::TreeBuilder;
use crate::variant::bytes::Cursor;
use crate::variant::number::format_real;
use crate::variant::{Dict, Kind, List, ParseOptions, Quark, QuarkTable, Result, Variant, VariantError, VariantStr, Visitor, walk};

const INDENT: &[u8] = b"    ";

/// Append the JSON encoding of `root` to `out`, keeping insertion order.
pub(crate) fn encode_into(root: &Variant, pretty: bool, out: &mut Vec<u8>) {
	let mut writer = JsonWriter {
		out,
		pretty,
		parents: Vec::new(),
	};
	walk(root, &mut writer, false);
	if pretty {
		writer.out.push(b'\n');
	}
}

struct Parent {
	count: usize,
	awaiting_value: bool,
}

struct JsonWriter<'o> {
	out: &'o mut Vec<u8>,
	pretty: bool,
	parents: Vec<Parent>,
}

impl JsonWriter<'_> {
	/// Emit the separator and indentation that precede a member.
	fn begin_token(&mut self) {
		let depth = self.parents.len();
		let Some(parent) = self.parents.last_mut() else {
			return;
		};
		if parent.awaiting_value {
			parent.awaiting_value = false;
			return;
		}

		if parent.count > 0 {
			self.out.push(b',');
		}
		parent.count += 1;
		if self.pretty {
			self.newline(depth);
		}
	}

	fn newline(&mut self, depth: usize) {
		self.out.push(b'\n');
		for _ in 0..depth {
			self.out.extend_from_slice(INDENT);
		}
	}

	fn open(&mut self, bracket: u8) {
		self.begin_token();
		self.out.push(bracket);
		self.parents.push(Parent {
			count: 0,
			awaiting_value: false,
		});
	}

	fn quoted(&mut self, bytes: &[u8]) {
		let text = String::from_utf8_lossy(bytes);
		self.out.push(b'"');
		for ch in text.chars() {
			match ch {
				'"' => self.out.extend_from_slice(b"\\\""),
				'\\' => self.out.extend_from_slice(b"\\\\"),
				'\n' => self.out.extend_from_slice(b"\\n"),
				'\r' => self.out.extend_from_slice(b"\\r"),
				'\t' => self.out.extend_from_slice(b"\\t"),
				'\u{8}' => self.out.extend_from_slice(b"\\b"),
				'\u{c}' => self.out.extend_from_slice(b"\\f"),
				c if c.is_control() => self.out.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes()),
				c => {
					let mut buf = [0_u8; 4];
					self.out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
				}
			}
		}
		self.out.push(b'"');
	}
}

impl Visitor for JsonWriter<'_> {
	fn int(&mut self, value: i64) {
		self.begin_token();
		self.out.extend_from_slice(value.to_string().as_bytes());
	}

	fn boolean(&mut self, value: bool) {
		self.begin_token();
		self.out.extend_from_slice(if value { b"true" } else { b"false" });
	}

	fn real(&mut self, value: f64) {
		self.begin_token();
		let text = format_real(value);
		if value.is_finite() {
			self.out.extend_from_slice(text.as_bytes());
		} else {
			warn!(value = %text, "non-finite real written to json as a string");
			self.quoted(text.as_bytes());
		}
	}

	fn string(&mut self, value: &VariantStr) {
		self.begin_token();
		self.quoted(value.as_bytes());
	}

	fn key(&mut self, key: &Quark) {
		self.begin_token();
		self.quoted(key.as_bytes());
		self.out.push(b':');
		if self.pretty {
			self.out.push(b' ');
		}
		if let Some(parent) = self.parents.last_mut() {
			parent.awaiting_value = true;
		}
	}

	fn list_begin(&mut self, _list: &List) {
		self.open(b'[');
	}

	fn dict_begin(&mut self, _dict: &Dict) {
		self.open(b'{');
	}

	fn container_end(&mut self, kind: Kind) {
		let Some(parent) = self.parents.pop() else {
			return;
		};
		if self.pretty && parent.count > 0 {
			let depth = self.parents.len();
			self.newline(depth);
		}
		self.out.push(if kind == Kind::List { b']' } else { b'}' });
	}
}

/// What the parser accepts next.
#[derive(Clone, Copy)]
enum Expect {
	/// A value; `allow_close` right after `[`.
	Value { allow_close: bool },
	/// An object key; `allow_close` right after `{`.
	Key { allow_close: bool },
	/// A `,` or the close of the innermost container.
	Separator,
}

/// Parse one JSON value from the start of `input` (after optional whitespace).
///
/// Returns the tree and the offset just past the value. Object keys are
/// interned into `quarks`; a repeated key replaces the earlier value.
pub(crate) fn parse(input: &[u8], quarks: &mut QuarkTable, options: &ParseOptions) -> Result<(Variant, usize)> {
	let mut cursor = Cursor::new(input);
	let mut builder = TreeBuilder::new();
	let mut expect = Expect::Value { allow_close: false };

	while !builder.is_complete() {
		cursor.skip_ws();
		let at = cursor.pos();
		let Some(byte) = cursor.peek() else {
			return Err(VariantError::UnexpectedEof { at, need: 1, rem: 0 });
		};

		expect = match expect {
			Expect::Value { allow_close } => match byte {
				b']' if allow_close => {
					cursor.next_byte()?;
					builder.end();
					Expect::Separator
				}
				b'[' => {
					options.check_depth(builder.depth())?;
					cursor.next_byte()?;
					builder.begin_list(0);
					Expect::Value { allow_close: true }
				}
				b'{' => {
					options.check_depth(builder.depth())?;
					cursor.next_byte()?;
					builder.begin_dict(0);
					Expect::Key { allow_close: true }
				}
				b'"' => {
					let bytes = read_string(&mut cursor)?;
					builder.value(Variant::Str(VariantStr::from(bytes)));
					Expect::Separator
				}
				b't' => {
					expect_literal(&mut cursor, b"true")?;
					builder.value(Variant::Bool(true));
					Expect::Separator
				}
				b'f' => {
					expect_literal(&mut cursor, b"false")?;
					builder.value(Variant::Bool(false));
					Expect::Separator
				}
				b'n' => {
					expect_literal(&mut cursor, b"null")?;
					builder.value(Variant::Str(VariantStr::default()));
					Expect::Separator
				}
				b'-' | b'0'..=b'9' => {
					builder.value(read_number(&mut cursor)?);
					Expect::Separator
				}
				_ => return Err(VariantError::JsonSyntax { at, expected: "value" }),
			},
			Expect::Key { allow_close } => match byte {
				b'}' if allow_close => {
					cursor.next_byte()?;
					builder.end();
					Expect::Separator
				}
				b'"' => {
					let bytes = read_string(&mut cursor)?;
					builder.key(quarks.intern(&bytes));
					cursor.skip_ws();
					let colon_at = cursor.pos();
					if cursor.peek() != Some(b':') {
						return Err(VariantError::JsonSyntax { at: colon_at, expected: "':'" });
					}
					cursor.next_byte()?;
					Expect::Value { allow_close: false }
				}
				_ => return Err(VariantError::JsonSyntax { at, expected: "string key" }),
			},
			Expect::Separator => match (byte, builder.top_kind()) {
				(b',', Some(Kind::List)) => {
					cursor.next_byte()?;
					Expect::Value { allow_close: false }
				}
				(b',', Some(Kind::Dict)) => {
					cursor.next_byte()?;
					Expect::Key { allow_close: false }
				}
				(b']', Some(Kind::List)) | (b'}', Some(Kind::Dict)) => {
					cursor.next_byte()?;
					builder.end();
					Expect::Separator
				}
				_ => return Err(VariantError::JsonSyntax { at, expected: "',' or closing bracket" }),
			},
		};
	}

	let root = builder.finish().ok_or(VariantError::UnexpectedEof {
		at: cursor.pos(),
		need: 1,
		rem: cursor.remaining(),
	})?;
	Ok((root, cursor.pos()))
}

fn expect_literal(cursor: &mut Cursor<'_>, literal: &[u8]) -> Result<()> {
	if !cursor.starts_with(literal) {
		return Err(VariantError::JsonSyntax {
			at: cursor.pos(),
			expected: "value",
		});
	}
	cursor.read_exact(literal.len())?;
	Ok(())
}

/// Read a quoted string, decoding escapes; the cursor sits on the opening quote.
fn read_string(cursor: &mut Cursor<'_>) -> Result<Vec<u8>> {
	cursor.next_byte()?;
	let mut out = Vec::new();
	loop {
		out.extend_from_slice(cursor.take_while(|byte| byte != b'"' && byte != b'\\' && byte >= 0x20));
		let at = cursor.pos();
		match cursor.next_byte()? {
			b'"' => return Ok(out),
			b'\\' => read_escape(cursor, at, &mut out)?,
			_ => {
				return Err(VariantError::JsonSyntax {
					at,
					expected: "escaped control character",
				});
			}
		}
	}
}

fn read_escape(cursor: &mut Cursor<'_>, at: usize, out: &mut Vec<u8>) -> Result<()> {
	let escape = cursor.next_byte().map_err(|_| VariantError::JsonInvalidEscape { at })?;
	let byte = match escape {
		b'"' => b'"',
		b'\\' => b'\\',
		b'/' => b'/',
		b'b' => 0x08,
		b'f' => 0x0c,
		b'n' => b'\n',
		b'r' => b'\r',
		b't' => b'\t',
		b'u' => {
			let ch = read_unicode_escape(cursor, at)?;
			let mut buf = [0_u8; 4];
			out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
			return Ok(());
		}
		_ => return Err(VariantError::JsonInvalidEscape { at }),
	};
	out.push(byte);
	Ok(())
}

/// Decode the code point after `\u`, joining surrogate pairs; lone surrogates become U+FFFD.
fn read_unicode_escape(cursor: &mut Cursor<'_>, at: usize) -> Result<char> {
	let high = read_hex4(cursor, at)?;
	if !(0xD800..0xDC00).contains(&high) {
		return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
	}
	if !cursor.starts_with(b"\\u") {
		return Ok(char::REPLACEMENT_CHARACTER);
	}

	let checkpoint = cursor.pos();
	cursor.read_exact(2)?;
	let low = read_hex4(cursor, checkpoint)?;
	if !(0xDC00..0xE000).contains(&low) {
		// Lone high surrogate; the second escape is decoded on its own.
		cursor.rewind_to(checkpoint);
		return Ok(char::REPLACEMENT_CHARACTER);
	}

	let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
	Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
}

fn read_hex4(cursor: &mut Cursor<'_>, at: usize) -> Result<u32> {
	let digits = cursor.read_exact(4).map_err(|_| VariantError::JsonInvalidEscape { at })?;
	if !digits.iter().all(u8::is_ascii_hexdigit) {
		return Err(VariantError::JsonInvalidEscape { at });
	}

	let text = std::str::from_utf8(digits).map_err(|_| VariantError::JsonInvalidEscape { at })?;
	u32::from_str_radix(text, 16).map_err(|_| VariantError::JsonInvalidEscape { at })
}

/// Read an RFC 8259 number; integral literals that fit `i64` become `Int`.
fn read_number(cursor: &mut Cursor<'_>) -> Result<Variant> {
	let at = cursor.pos();
	let invalid = || VariantError::JsonInvalidNumber { at };

	if cursor.peek() == Some(b'-') {
		cursor.next_byte()?;
	}
	let int = cursor.take_while(|byte| byte.is_ascii_digit());
	if int.is_empty() || (int.len() > 1 && int[0] == b'0') {
		return Err(invalid());
	}

	let mut integral = true;
	if cursor.peek() == Some(b'.') {
		cursor.next_byte()?;
		if cursor.take_while(|byte| byte.is_ascii_digit()).is_empty() {
			return Err(invalid());
		}
		integral = false;
	}
	if matches!(cursor.peek(), Some(b'e' | b'E')) {
		cursor.next_byte()?;
		if matches!(cursor.peek(), Some(b'+' | b'-')) {
			cursor.next_byte()?;
		}
		if cursor.take_while(|byte| byte.is_ascii_digit()).is_empty() {
			return Err(invalid());
		}
		integral = false;
	}

	let text = std::str::from_utf8(cursor.since(at)).map_err(|_| invalid())?;
	if integral && let Ok(value) = text.parse::<i64>() {
		return Ok(Variant::Int(value));
	}
	text.parse::<f64>().map(Variant::Real).map_err(|_| invalid())
}
