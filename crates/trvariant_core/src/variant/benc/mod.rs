use crate::variant::builder::TreeBuilder;
use crate::variant::bytes::Cursor;
use crate::variant::number::format_real;
use crate::variant::{Dict, Kind, List, ParseOptions, QuarkTable, Result, Variant, VariantError, VariantStr, Visitor, walk};

/// Append the benc encoding of `root` to `out`, with dictionary keys sorted.
pub(crate) fn encode_into(root: &Variant, out: &mut Vec<u8>) {
	let mut writer = BencWriter { out };
	walk(root, &mut writer, true);
}

/// Benc has no boolean or real type: booleans become `i0e`/`i1e` and reals
/// become strings.
struct BencWriter<'o> {
	out: &'o mut Vec<u8>,
}

impl BencWriter<'_> {
	fn bytes(&mut self, bytes: &[u8]) {
		self.out.extend_from_slice(bytes.len().to_string().as_bytes());
		self.out.push(b':');
		self.out.extend_from_slice(bytes);
	}
}

impl Visitor for BencWriter<'_> {
	fn int(&mut self, value: i64) {
		self.out.push(b'i');
		self.out.extend_from_slice(value.to_string().as_bytes());
		self.out.push(b'e');
	}

	fn boolean(&mut self, value: bool) {
		self.out.extend_from_slice(if value { b"i1e" } else { b"i0e" });
	}

	fn real(&mut self, value: f64) {
		self.bytes(format_real(value).as_bytes());
	}

	fn string(&mut self, value: &VariantStr) {
		self.bytes(value.as_bytes());
	}

	fn list_begin(&mut self, _list: &List) {
		self.out.push(b'l');
	}

	fn dict_begin(&mut self, _dict: &Dict) {
		self.out.push(b'd');
	}

	fn container_end(&mut self, _kind: Kind) {
		self.out.push(b'e');
	}
}

/// Parse one benc value from the start of `input`.
///
/// Returns the tree and the offset just past it. Dictionary keys are interned
/// into `quarks`; a repeated key replaces the earlier value.
pub(crate) fn parse(input: &[u8], quarks: &mut QuarkTable, options: &ParseOptions) -> Result<(Variant, usize)> {
	let mut cursor = Cursor::new(input);
	let mut builder = TreeBuilder::new();

	while !builder.is_complete() {
		let at = cursor.pos();
		let Some(byte) = cursor.peek() else {
			return Err(VariantError::UnexpectedEof { at, need: 1, rem: 0 });
		};

		match byte {
			b'0'..=b'9' => {
				let bytes = read_string(&mut cursor)?;
				if builder.expects_key() {
					builder.key(quarks.intern(bytes));
				} else {
					builder.value(Variant::Str(VariantStr::from_bytes(bytes)));
				}
			}
			b'i' | b'l' | b'd' if builder.expects_key() => {
				return Err(VariantError::BencKeyNotString { at });
			}
			b'i' => {
				let value = read_int(&mut cursor)?;
				builder.value(Variant::Int(value));
			}
			b'l' => {
				options.check_depth(builder.depth())?;
				cursor.next_byte()?;
				builder.begin_list(0);
			}
			b'd' => {
				options.check_depth(builder.depth())?;
				cursor.next_byte()?;
				builder.begin_dict(0);
			}
			b'e' if builder.depth() > 0 => {
				if builder.has_pending_key() {
					return Err(VariantError::DictMissingValue { at });
				}
				cursor.next_byte()?;
				builder.end();
			}
			_ => return Err(VariantError::UnexpectedByte { at, byte }),
		}
	}

	let root = builder.finish().ok_or(VariantError::UnexpectedEof {
		at: cursor.pos(),
		need: 1,
		rem: cursor.remaining(),
	})?;
	Ok((root, cursor.pos()))
}

/// Read `i<digits>e`, rejecting leading zeros, `-0`, and overflow.
fn read_int(cursor: &mut Cursor<'_>) -> Result<i64> {
	let at = cursor.pos();
	cursor.next_byte()?;
	let raw = cursor.read_until(b'e')?;
	cursor.next_byte()?;

	let digits = raw.strip_prefix(b"-").unwrap_or(raw);
	let negative = digits.len() != raw.len();
	let valid = !digits.is_empty()
		&& digits.iter().all(u8::is_ascii_digit)
		&& !(digits.len() > 1 && digits[0] == b'0')
		&& !(negative && digits == b"0");
	if !valid {
		return Err(VariantError::BencInvalidInt { at });
	}

	std::str::from_utf8(raw)
		.ok()
		.and_then(|text| text.parse::<i64>().ok())
		.ok_or(VariantError::BencInvalidInt { at })
}

/// Read `<len>:<bytes>`, rejecting leading zeros in the length.
fn read_string<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8]> {
	let at = cursor.pos();
	let digits = cursor.take_while(|byte| byte.is_ascii_digit());
	if digits.len() > 1 && digits[0] == b'0' {
		return Err(VariantError::BencInvalidLength { at });
	}

	let len = std::str::from_utf8(digits)
		.ok()
		.and_then(|text| text.parse::<usize>().ok())
		.ok_or(VariantError::BencInvalidLength { at })?;
	if cursor.next_byte()? != b':' {
		return Err(VariantError::BencInvalidLength { at });
	}

	cursor.read_exact(len)
}
