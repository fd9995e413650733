use std::fmt;

use crate::variant::{Dict, DictEntry, Kind, List, Quark, Variant, VariantStr, Visitor, walk, walk_dict, walk_list};

/// Renders a tree as compact JSON-like text from traversal events.
struct DebugWriter {
	out: String,
	/// One flag per open container: whether its next child is the first.
	open: Vec<bool>,
	after_key: bool,
}

impl DebugWriter {
	fn new() -> Self {
		Self {
			out: String::new(),
			open: Vec::new(),
			after_key: false,
		}
	}

	fn separate(&mut self) {
		if self.after_key {
			self.after_key = false;
			return;
		}
		if let Some(first) = self.open.last_mut() {
			if !*first {
				self.out.push_str(", ");
			}
			*first = false;
		}
	}

	fn quoted(&mut self, bytes: &[u8]) {
		self.out.push_str(&format!("{:?}", String::from_utf8_lossy(bytes)));
	}
}

impl Visitor for DebugWriter {
	fn int(&mut self, value: i64) {
		self.separate();
		self.out.push_str(&value.to_string());
	}

	fn boolean(&mut self, value: bool) {
		self.separate();
		self.out.push_str(if value { "true" } else { "false" });
	}

	fn real(&mut self, value: f64) {
		self.separate();
		self.out.push_str(&format!("{value:?}"));
	}

	fn string(&mut self, value: &VariantStr) {
		self.separate();
		self.quoted(value.as_bytes());
	}

	fn key(&mut self, key: &Quark) {
		self.separate();
		self.quoted(key.as_bytes());
		self.out.push_str(": ");
		self.after_key = true;
	}

	fn list_begin(&mut self, _list: &List) {
		self.separate();
		self.out.push('[');
		self.open.push(true);
	}

	fn dict_begin(&mut self, _dict: &Dict) {
		self.separate();
		self.out.push('{');
		self.open.push(true);
	}

	fn container_end(&mut self, kind: Kind) {
		self.open.pop();
		self.out.push(if kind == Kind::Dict { '}' } else { ']' });
	}
}

impl fmt::Debug for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut writer = DebugWriter::new();
		walk(self, &mut writer, false);
		f.write_str(&writer.out)
	}
}

impl fmt::Debug for List {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut writer = DebugWriter::new();
		walk_list(self, &mut writer, false);
		f.write_str(&writer.out)
	}
}

impl fmt::Debug for Dict {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut writer = DebugWriter::new();
		walk_dict(self, &mut writer, false);
		f.write_str(&writer.out)
	}
}

impl fmt::Debug for DictEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}: {:?}", String::from_utf8_lossy(self.key.as_bytes()), self.value)
	}
}
