/// Format a real with `.` as the decimal separator, independent of locale.
///
/// Finite values use the shortest text that parses back to the same `f64`.
pub fn format_real(value: f64) -> String {
	if value.is_nan() {
		"NaN".to_owned()
	} else if value.is_infinite() {
		if value.is_sign_negative() { "-inf".to_owned() } else { "inf".to_owned() }
	} else {
		format!("{value:?}")
	}
}

/// Parse a real from bytes using `.` as the decimal separator.
///
/// Leading ASCII whitespace is skipped; anything else that is not a complete
/// number yields `None`.
pub fn parse_real(bytes: &[u8]) -> Option<f64> {
	let text = std::str::from_utf8(bytes).ok()?;
	let text = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
	if text.is_empty() {
		return None;
	}

	text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
	use super::{format_real, parse_real};

	#[test]
	fn reals_use_dot_separator() {
		assert_eq!(format_real(3.5), "3.5");
		assert_eq!(format_real(2.0), "2.0");
		assert_eq!(format_real(-0.25), "-0.25");
		assert_eq!(format_real(f64::INFINITY), "inf");
		assert_eq!(format_real(f64::NEG_INFINITY), "-inf");
		assert_eq!(format_real(f64::NAN), "NaN");
	}

	#[test]
	fn formatted_reals_parse_back_exactly() {
		for value in [0.1, 1.0 / 3.0, 1e300, -7.125e-12] {
			assert_eq!(parse_real(format_real(value).as_bytes()), Some(value));
		}
	}

	#[test]
	fn parse_rejects_garbage() {
		assert_eq!(parse_real(b"  2.5"), Some(2.5));
		assert_eq!(parse_real(b""), None);
		assert_eq!(parse_real(b"2,5"), None);
		assert_eq!(parse_real(b"2.5x"), None);
	}
}
