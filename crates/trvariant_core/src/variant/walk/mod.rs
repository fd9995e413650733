use crate::variant::{Dict, DictEntry, Kind, List, Quark, Variant, VariantStr};

/// Initial traversal stack capacity; the stack doubles beyond this.
const INITIAL_STACK: usize = 64;

/// Callbacks invoked by [`walk`] for each node in depth-first order.
pub trait Visitor {
	/// Integer scalar.
	fn int(&mut self, value: i64);
	/// Boolean scalar.
	fn boolean(&mut self, value: bool);
	/// Real scalar.
	fn real(&mut self, value: f64);
	/// String scalar.
	fn string(&mut self, value: &VariantStr);

	/// Dictionary key preceding each dict child; by default emitted as a string.
	fn key(&mut self, key: &Quark) {
		self.string(&VariantStr::Interned(key.clone()));
	}

	/// First visit of a list, before any child.
	fn list_begin(&mut self, list: &List);
	/// First visit of a dictionary, before any child.
	fn dict_begin(&mut self, dict: &Dict);
	/// All children of the innermost open container have been visited.
	fn container_end(&mut self, kind: Kind);
}

#[derive(Clone, Copy)]
enum Container<'a> {
	List(&'a List),
	Dict(&'a Dict),
}

impl Container<'_> {
	fn kind(self) -> Kind {
		match self {
			Self::List(_) => Kind::List,
			Self::Dict(_) => Kind::Dict,
		}
	}
}

/// One open container on the traversal stack.
struct Frame<'a> {
	container: Container<'a>,
	/// Key-sorted view of a dictionary; storage order is left untouched.
	sorted: Option<Vec<&'a DictEntry>>,
	cursor: usize,
	visited: bool,
}

impl<'a> Frame<'a> {
	fn new(container: Container<'a>, sort_dicts: bool) -> Self {
		let sorted = match container {
			Container::Dict(dict) if sort_dicts && dict.len() > 1 => {
				let mut entries: Vec<&'a DictEntry> = dict.iter().collect();
				entries.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));
				Some(entries)
			}
			_ => None,
		};

		Self {
			container,
			sorted,
			cursor: 0,
			visited: false,
		}
	}

	fn next_child(&mut self) -> Option<(Option<&'a Quark>, &'a Variant)> {
		let index = self.cursor;
		let child = match self.container {
			Container::List(list) => list.get(index).map(|value| (None, value)),
			Container::Dict(dict) => {
				let entry = match &self.sorted {
					Some(sorted) => sorted.get(index).copied(),
					None => dict.entries().get(index),
				};
				entry.map(|entry| (Some(&entry.key), &entry.value))
			}
		};

		if child.is_some() {
			self.cursor += 1;
		}
		child
	}
}

/// Visit `root` and all descendants depth-first using an explicit stack.
///
/// With `sort_dicts`, dictionary children are visited in byte-wise key order;
/// otherwise in insertion order.
pub fn walk<V: Visitor + ?Sized>(root: &Variant, visitor: &mut V, sort_dicts: bool) {
	match root {
		Variant::List(list) => drive(Container::List(list), visitor, sort_dicts),
		Variant::Dict(dict) => drive(Container::Dict(dict), visitor, sort_dicts),
		scalar => visit_scalar(scalar, visitor),
	}
}

/// Visit a list and all descendants.
pub fn walk_list<V: Visitor + ?Sized>(list: &List, visitor: &mut V, sort_dicts: bool) {
	drive(Container::List(list), visitor, sort_dicts);
}

/// Visit a dictionary and all descendants.
pub fn walk_dict<V: Visitor + ?Sized>(dict: &Dict, visitor: &mut V, sort_dicts: bool) {
	drive(Container::Dict(dict), visitor, sort_dicts);
}

fn visit_scalar<V: Visitor + ?Sized>(node: &Variant, visitor: &mut V) {
	match node {
		Variant::Int(value) => visitor.int(*value),
		Variant::Bool(value) => visitor.boolean(*value),
		Variant::Real(value) => visitor.real(*value),
		Variant::Str(value) => visitor.string(value),
		Variant::List(_) | Variant::Dict(_) => {}
	}
}

fn drive<'a, V: Visitor + ?Sized>(root: Container<'a>, visitor: &mut V, sort_dicts: bool) {
	let mut stack: Vec<Frame<'a>> = Vec::with_capacity(INITIAL_STACK);
	stack.push(Frame::new(root, sort_dicts));

	while let Some(frame) = stack.last_mut() {
		if !frame.visited {
			frame.visited = true;
			match frame.container {
				Container::List(list) => visitor.list_begin(list),
				Container::Dict(dict) => visitor.dict_begin(dict),
			}
		}

		let Some((key, child)) = frame.next_child() else {
			let kind = frame.container.kind();
			stack.pop();
			visitor.container_end(kind);
			continue;
		};

		if let Some(key) = key {
			visitor.key(key);
		}
		match child {
			Variant::List(list) => stack.push(Frame::new(Container::List(list), sort_dicts)),
			Variant::Dict(dict) => stack.push(Frame::new(Container::Dict(dict), sort_dicts)),
			scalar => visit_scalar(scalar, visitor),
		}
	}
}
