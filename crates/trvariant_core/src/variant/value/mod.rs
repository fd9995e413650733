use std::fmt;

use crate::variant::builder::TreeBuilder;
use crate::variant::number::parse_real;
use crate::variant::{Dict, KeyPath, List, PathStep, Quark, VariantStr, walk};

/// Node kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Signed 64-bit integer.
	Int,
	/// Boolean.
	Bool,
	/// 64-bit float.
	Real,
	/// Byte string.
	Str,
	/// Ordered sequence of unkeyed children.
	List,
	/// Sequence of children with unique interned keys.
	Dict,
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Int => "int",
			Self::Bool => "bool",
			Self::Real => "real",
			Self::Str => "string",
			Self::List => "list",
			Self::Dict => "dict",
		}
	}

	/// Whether nodes of this kind own children.
	pub fn is_container(self) -> bool {
		matches!(self, Self::List | Self::Dict)
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Dynamically typed tree node.
///
/// Cloning, comparing, formatting, and dropping are all stack-safe regardless of
/// nesting depth.
pub enum Variant {
	/// Integer payload.
	Int(i64),
	/// Boolean payload.
	Bool(bool),
	/// Real payload.
	Real(f64),
	/// String payload.
	Str(VariantStr),
	/// List payload.
	List(List),
	/// Dictionary payload.
	Dict(Dict),
}

impl Default for Variant {
	fn default() -> Self {
		Self::Int(0)
	}
}

impl Variant {
	/// Construct an empty node of `kind`.
	pub fn new(kind: Kind) -> Self {
		match kind {
			Kind::Int => Self::Int(0),
			Kind::Bool => Self::Bool(false),
			Kind::Real => Self::Real(0.0),
			Kind::Str => Self::Str(VariantStr::default()),
			Kind::List => Self::List(List::new()),
			Kind::Dict => Self::Dict(Dict::new()),
		}
	}

	/// Kind tag of this node.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Int(_) => Kind::Int,
			Self::Bool(_) => Kind::Bool,
			Self::Real(_) => Kind::Real,
			Self::Str(_) => Kind::Str,
			Self::List(_) => Kind::List,
			Self::Dict(_) => Kind::Dict,
		}
	}

	/// Whether this is an integer node.
	pub fn is_int(&self) -> bool {
		matches!(self, Self::Int(_))
	}

	/// Whether this is a boolean node.
	pub fn is_bool(&self) -> bool {
		matches!(self, Self::Bool(_))
	}

	/// Whether this is a real node.
	pub fn is_real(&self) -> bool {
		matches!(self, Self::Real(_))
	}

	/// Whether this is a string node.
	pub fn is_str(&self) -> bool {
		matches!(self, Self::Str(_))
	}

	/// Whether this is a list node.
	pub fn is_list(&self) -> bool {
		matches!(self, Self::List(_))
	}

	/// Whether this is a dictionary node.
	pub fn is_dict(&self) -> bool {
		matches!(self, Self::Dict(_))
	}

	/// Replace this node with an integer.
	pub fn set_int(&mut self, value: i64) {
		*self = Self::Int(value);
	}

	/// Replace this node with a boolean.
	pub fn set_bool(&mut self, value: bool) {
		*self = Self::Bool(value);
	}

	/// Replace this node with a real.
	pub fn set_real(&mut self, value: f64) {
		*self = Self::Real(value);
	}

	/// Replace this node with a copy of `value`.
	pub fn set_str(&mut self, value: &str) {
		*self = Self::Str(VariantStr::from(value));
	}

	/// Replace this node with a copy of raw `bytes`.
	pub fn set_raw(&mut self, bytes: &[u8]) {
		*self = Self::Str(VariantStr::from_bytes(bytes));
	}

	/// Replace this node with a string sharing an interned key's bytes.
	pub fn set_quark(&mut self, quark: Quark) {
		*self = Self::Str(VariantStr::Interned(quark));
	}

	/// Read an integer; booleans read as 0 or 1.
	pub fn get_int(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			Self::Bool(value) => Some(i64::from(*value)),
			_ => None,
		}
	}

	/// Read a boolean; accepts integers 0 and 1 and the strings `"true"` and `"false"`.
	pub fn get_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			Self::Int(0) => Some(false),
			Self::Int(1) => Some(true),
			Self::Str(value) => match value.as_bytes() {
				b"true" => Some(true),
				b"false" => Some(false),
				_ => None,
			},
			_ => None,
		}
	}

	/// Read a real; integers widen and strings parse with `.` as separator.
	pub fn get_real(&self) -> Option<f64> {
		match self {
			Self::Real(value) => Some(*value),
			Self::Int(value) => Some(*value as f64),
			Self::Str(value) => parse_real(value.as_bytes()),
			_ => None,
		}
	}

	/// Read a string as UTF-8 text.
	pub fn get_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) => value.as_str(),
			_ => None,
		}
	}

	/// Read a string's raw bytes.
	pub fn get_raw(&self) -> Option<&[u8]> {
		match self {
			Self::Str(value) => Some(value.as_bytes()),
			_ => None,
		}
	}

	/// Borrow list payload.
	pub fn as_list(&self) -> Option<&List> {
		match self {
			Self::List(list) => Some(list),
			_ => None,
		}
	}

	/// Mutably borrow list payload.
	pub fn as_list_mut(&mut self) -> Option<&mut List> {
		match self {
			Self::List(list) => Some(list),
			_ => None,
		}
	}

	/// Borrow dictionary payload.
	pub fn as_dict(&self) -> Option<&Dict> {
		match self {
			Self::Dict(dict) => Some(dict),
			_ => None,
		}
	}

	/// Mutably borrow dictionary payload.
	pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
		match self {
			Self::Dict(dict) => Some(dict),
			_ => None,
		}
	}

	/// Child of a dictionary node by key bytes.
	pub fn by_key(&self, key: &[u8]) -> Option<&Variant> {
		self.as_dict()?.find_bytes(key)
	}

	/// Child of a list node by position.
	pub fn by_index(&self, index: usize) -> Option<&Variant> {
		self.as_list()?.get(index)
	}

	/// Follow a parsed key path from this node.
	pub fn lookup_path(&self, path: &KeyPath) -> Option<&Variant> {
		let mut current = self;
		for step in &path.steps {
			current = match step {
				PathStep::Key(key) => current.by_key(key.as_bytes())?,
				PathStep::Index(index) => current.by_index(*index)?,
			};
		}
		Some(current)
	}

	/// Release all children and reset to the default node.
	pub fn free(&mut self) {
		*self = Self::default();
	}
}

impl Clone for Variant {
	fn clone(&self) -> Self {
		match self {
			Self::Int(value) => Self::Int(*value),
			Self::Bool(value) => Self::Bool(*value),
			Self::Real(value) => Self::Real(*value),
			Self::Str(value) => Self::Str(value.clone()),
			Self::List(_) | Self::Dict(_) => {
				let mut builder = TreeBuilder::new();
				walk(self, &mut builder, false);
				builder.finish().unwrap_or_default()
			}
		}
	}
}

impl PartialEq for Variant {
	/// Structural equality; strings compare by bytes and dictionaries ignore key order.
	fn eq(&self, other: &Self) -> bool {
		let mut pending = vec![(self, other)];
		while let Some((lhs, rhs)) = pending.pop() {
			match (lhs, rhs) {
				(Self::Int(a), Self::Int(b)) if a == b => {}
				(Self::Bool(a), Self::Bool(b)) if a == b => {}
				(Self::Real(a), Self::Real(b)) if a == b => {}
				(Self::Str(a), Self::Str(b)) if a == b => {}
				(Self::List(a), Self::List(b)) if a.len() == b.len() => {
					pending.extend(a.iter().zip(b.iter()));
				}
				(Self::Dict(a), Self::Dict(b)) if a.len() == b.len() => {
					for entry in a.iter() {
						let Some(value) = b.find_bytes(entry.key.as_bytes()) else {
							return false;
						};
						pending.push((&entry.value, value));
					}
				}
				_ => return false,
			}
		}
		true
	}
}

impl From<i64> for Variant {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<bool> for Variant {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for Variant {
	fn from(value: f64) -> Self {
		Self::Real(value)
	}
}

impl From<&str> for Variant {
	fn from(value: &str) -> Self {
		Self::Str(VariantStr::from(value))
	}
}

impl From<String> for Variant {
	fn from(value: String) -> Self {
		Self::Str(VariantStr::from(value))
	}
}

impl From<VariantStr> for Variant {
	fn from(value: VariantStr) -> Self {
		Self::Str(value)
	}
}

impl From<List> for Variant {
	fn from(value: List) -> Self {
		Self::List(value)
	}
}

impl From<Dict> for Variant {
	fn from(value: Dict) -> Self {
		Self::Dict(value)
	}
}

#[cfg(test)]
mod tests;
