use crate::variant::{Result, VariantError};

/// One parsed operation in a key path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a dictionary child by key.
	Key(String),
	/// Select a list element by zero-based index.
	Index(usize),
}

/// Parsed key path expression such as `peers[0].address`.
#[derive(Debug, Clone)]
pub struct KeyPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl KeyPath {
	/// Parse dotted key syntax with optional `[index]` selectors.
	///
	/// Keys may hold any character except `.`, `[`, and `]`. A path may start
	/// with an index to address a list root.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || VariantError::InvalidKeyPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && !matches!(bytes[idx], b'.' | b'[' | b']') {
				idx += 1;
			}

			if idx > start {
				steps.push(PathStep::Key(input[start..idx].to_owned()));
			} else if !(steps.is_empty() && bytes[idx] == b'[') {
				return Err(invalid());
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}

				let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { steps })
	}
}
