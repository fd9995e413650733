use std::collections::HashMap;

use crate::variant::{Dict, Kind, List, Quark, Variant, VariantStr, Visitor};

/// Container under construction.
struct Open {
	node: Variant,
	pending_key: Option<Quark>,
	/// Key to storage position, so duplicate keys replace in constant time.
	index: HashMap<Quark, usize>,
}

/// Event sink that assembles a tree bottom-up without recursion.
///
/// Parsers drive it token by token; it also serves as the [`Visitor`] behind
/// deep copies.
pub(crate) struct TreeBuilder {
	stack: Vec<Open>,
	root: Option<Variant>,
}

impl TreeBuilder {
	pub(crate) fn new() -> Self {
		Self { stack: Vec::new(), root: None }
	}

	/// Set the key for the next value of the innermost dictionary.
	pub(crate) fn key(&mut self, key: Quark) {
		if let Some(open) = self.stack.last_mut() {
			debug_assert!(open.node.is_dict() && open.pending_key.is_none());
			open.pending_key = Some(key);
		}
	}

	/// Attach a finished node to the innermost container, or make it the root.
	pub(crate) fn value(&mut self, value: Variant) {
		let Some(open) = self.stack.last_mut() else {
			self.root = Some(value);
			return;
		};

		match &mut open.node {
			Variant::List(list) => {
				list.push(value);
			}
			Variant::Dict(dict) => {
				debug_assert!(open.pending_key.is_some(), "dict value without key");
				let Some(key) = open.pending_key.take() else {
					return;
				};
				match open.index.get(&key) {
					Some(&index) => {
						if let Some(slot) = dict.value_at_mut(index) {
							*slot = value;
						}
					}
					None => {
						let index = dict.push_entry(key.clone(), value);
						open.index.insert(key, index);
					}
				}
			}
			_ => {}
		}
	}

	/// Open a list with room for `reserve` children.
	pub(crate) fn begin_list(&mut self, reserve: usize) {
		self.open(Variant::List(List::with_capacity(reserve)));
	}

	/// Open a dictionary with room for `reserve` entries.
	pub(crate) fn begin_dict(&mut self, reserve: usize) {
		self.open(Variant::Dict(Dict::with_capacity(reserve)));
	}

	fn open(&mut self, node: Variant) {
		self.stack.push(Open {
			node,
			pending_key: None,
			index: HashMap::new(),
		});
	}

	/// Close the innermost container and attach it to its parent.
	pub(crate) fn end(&mut self) -> Option<Kind> {
		let open = self.stack.pop()?;
		let kind = open.node.kind();
		self.value(open.node);
		Some(kind)
	}

	/// Number of open containers.
	pub(crate) fn depth(&self) -> usize {
		self.stack.len()
	}

	/// Whether the next token must be a dictionary key.
	pub(crate) fn expects_key(&self) -> bool {
		self.stack.last().is_some_and(|open| open.node.is_dict() && open.pending_key.is_none())
	}

	/// Whether the innermost dictionary holds a key still waiting for its value.
	pub(crate) fn has_pending_key(&self) -> bool {
		self.stack.last().is_some_and(|open| open.pending_key.is_some())
	}

	/// Kind of the innermost open container.
	pub(crate) fn top_kind(&self) -> Option<Kind> {
		self.stack.last().map(|open| open.node.kind())
	}

	/// Whether a complete root value has been produced.
	pub(crate) fn is_complete(&self) -> bool {
		self.root.is_some()
	}

	/// Take the finished root.
	pub(crate) fn finish(self) -> Option<Variant> {
		self.root
	}
}

impl Visitor for TreeBuilder {
	fn int(&mut self, value: i64) {
		self.value(Variant::Int(value));
	}

	fn boolean(&mut self, value: bool) {
		self.value(Variant::Bool(value));
	}

	fn real(&mut self, value: f64) {
		self.value(Variant::Real(value));
	}

	fn string(&mut self, value: &VariantStr) {
		self.value(Variant::Str(value.clone()));
	}

	fn key(&mut self, key: &Quark) {
		TreeBuilder::key(self, key.clone());
	}

	fn list_begin(&mut self, list: &List) {
		self.begin_list(list.len());
	}

	fn dict_begin(&mut self, dict: &Dict) {
		self.begin_dict(dict.len());
	}

	fn container_end(&mut self, _kind: Kind) {
		self.end();
	}
}

#[cfg(test)]
mod tests {
	use super::TreeBuilder;
	use crate::variant::{Kind, QuarkTable, Variant};

	#[test]
	fn duplicate_keys_replace_in_place() {
		let mut quarks = QuarkTable::new();
		let mut builder = TreeBuilder::new();
		builder.begin_dict(0);
		builder.key(quarks.intern(b"a"));
		builder.value(Variant::Int(1));
		builder.key(quarks.intern(b"b"));
		builder.value(Variant::Int(2));
		builder.key(quarks.intern(b"a"));
		builder.value(Variant::from("x"));
		assert_eq!(builder.end(), Some(Kind::Dict));

		let root = builder.finish().expect("root built");
		let dict = root.as_dict().expect("dict root");
		assert_eq!(dict.len(), 2);
		assert_eq!(dict.entries()[0].key.as_bytes(), b"a");
		assert_eq!(dict.entries()[0].value.get_str(), Some("x"));
	}

	#[test]
	fn tracks_key_expectations() {
		let mut quarks = QuarkTable::new();
		let mut builder = TreeBuilder::new();
		assert!(!builder.expects_key());

		builder.begin_dict(0);
		assert!(builder.expects_key());
		builder.key(quarks.intern(b"k"));
		assert!(builder.has_pending_key());
		builder.begin_list(0);
		assert_eq!(builder.top_kind(), Some(Kind::List));
		assert!(!builder.expects_key());
		builder.end();
		assert!(builder.expects_key());
		builder.end();
		assert!(builder.is_complete());
	}
}
