use std::mem;

use tracing::debug;

use crate::variant::{Dict, Kind, List, Quark, Result, Variant, VariantError, VariantStr, Visitor, walk_dict};

/// Deep-merge dictionary `source` into dictionary `target`.
///
/// Fails with [`VariantError::KindMismatch`] when either side is not a dictionary.
pub fn merge(target: &mut Variant, source: &Variant) -> Result<()> {
	let Variant::Dict(source) = source else {
		return Err(VariantError::KindMismatch {
			expected: Kind::Dict.as_str(),
			got: source.kind().as_str(),
		});
	};
	let got = target.kind();
	let Variant::Dict(target) = target else {
		return Err(VariantError::KindMismatch {
			expected: Kind::Dict.as_str(),
			got: got.as_str(),
		});
	};

	target.merge(source);
	Ok(())
}

impl Dict {
	/// Deep-merge `source` into this dictionary.
	///
	/// Scalars overwrite. Dictionaries merge recursively, replacing any non-dict
	/// value at the same key. Lists are copied only when the key is absent here.
	pub fn merge(&mut self, source: &Dict) {
		let mut visitor = MergeVisitor::new(mem::take(self));
		walk_dict(source, &mut visitor, false);
		*self = visitor.finish();
	}
}

/// Where a finished container goes once its source container ends.
enum Slot {
	Root,
	/// Position reserved in the parent dictionary.
	Index(usize),
	/// Parent dictionary key that was absent when the container opened.
	Key(Quark),
	Append,
}

struct Target {
	node: Variant,
	slot: Slot,
	pending_key: Option<Quark>,
}

/// Applies source tree events to detached target containers.
struct MergeVisitor {
	root: Option<Dict>,
	stack: Vec<Target>,
	/// Depth inside a source list that is being skipped.
	skip_depth: usize,
	done: Option<Dict>,
}

impl MergeVisitor {
	fn new(target: Dict) -> Self {
		Self {
			root: Some(target),
			stack: Vec::new(),
			skip_depth: 0,
			done: None,
		}
	}

	fn finish(mut self) -> Dict {
		self.done.take().or_else(|| self.root.take()).unwrap_or_default()
	}

	fn place(&mut self, value: Variant) {
		let Some(top) = self.stack.last_mut() else {
			return;
		};

		match &mut top.node {
			Variant::Dict(dict) => {
				if let Some(key) = top.pending_key.take() {
					dict.set(key, value);
				}
			}
			Variant::List(list) => {
				list.push(value);
			}
			_ => {}
		}
	}

	fn skipping(&mut self) -> bool {
		if self.skip_depth > 0 {
			self.skip_depth += 1;
			return true;
		}
		false
	}
}

impl Visitor for MergeVisitor {
	fn int(&mut self, value: i64) {
		if self.skip_depth == 0 {
			self.place(Variant::Int(value));
		}
	}

	fn boolean(&mut self, value: bool) {
		if self.skip_depth == 0 {
			self.place(Variant::Bool(value));
		}
	}

	fn real(&mut self, value: f64) {
		if self.skip_depth == 0 {
			self.place(Variant::Real(value));
		}
	}

	fn string(&mut self, value: &VariantStr) {
		if self.skip_depth == 0 {
			self.place(Variant::Str(value.clone()));
		}
	}

	fn key(&mut self, key: &Quark) {
		if self.skip_depth > 0 {
			return;
		}
		if let Some(top) = self.stack.last_mut() {
			top.pending_key = Some(key.clone());
		}
	}

	fn list_begin(&mut self, list: &List) {
		if self.skipping() {
			return;
		}

		let Some(top) = self.stack.last_mut() else {
			return;
		};
		let slot = match &top.node {
			Variant::Dict(dict) => {
				let Some(key) = top.pending_key.take() else {
					return;
				};
				if dict.find(&key).is_some() {
					debug!(key = %key.to_string_lossy(), "merge kept existing value, source list skipped");
					self.skip_depth = 1;
					return;
				}
				Slot::Key(key)
			}
			_ => Slot::Append,
		};

		self.stack.push(Target {
			node: Variant::List(List::with_capacity(list.len())),
			slot,
			pending_key: None,
		});
	}

	fn dict_begin(&mut self, dict: &Dict) {
		if self.skipping() {
			return;
		}

		let Some(top) = self.stack.last_mut() else {
			let root = self.root.take().unwrap_or_default();
			self.stack.push(Target {
				node: Variant::Dict(root),
				slot: Slot::Root,
				pending_key: None,
			});
			return;
		};

		let (node, slot) = match &mut top.node {
			Variant::Dict(parent) => {
				let Some(key) = top.pending_key.take() else {
					return;
				};
				let index = match parent.index_of(&key) {
					Some(index) => index,
					None => parent.push_entry(key, Variant::Dict(Dict::new())),
				};
				let node = match parent.value_at_mut(index).map(mem::take) {
					Some(existing @ Variant::Dict(_)) => existing,
					_ => Variant::Dict(Dict::with_capacity(dict.len())),
				};
				(node, Slot::Index(index))
			}
			_ => (Variant::Dict(Dict::with_capacity(dict.len())), Slot::Append),
		};

		self.stack.push(Target {
			node,
			slot,
			pending_key: None,
		});
	}

	fn container_end(&mut self, _kind: Kind) {
		if self.skip_depth > 0 {
			self.skip_depth -= 1;
			return;
		}

		let Some(finished) = self.stack.pop() else {
			return;
		};
		match finished.slot {
			Slot::Root => {
				if let Variant::Dict(dict) = finished.node {
					self.done = Some(dict);
				}
			}
			Slot::Index(index) => {
				if let Some(Target { node: Variant::Dict(parent), .. }) = self.stack.last_mut()
					&& let Some(slot) = parent.value_at_mut(index)
				{
					*slot = finished.node;
				}
			}
			Slot::Key(key) => {
				if let Some(Target { node: Variant::Dict(parent), .. }) = self.stack.last_mut() {
					parent.set(key, finished.node);
				}
			}
			Slot::Append => {
				if let Some(Target { node: Variant::List(parent), .. }) = self.stack.last_mut() {
					parent.push(finished.node);
				}
			}
		}
	}
}
