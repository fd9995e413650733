use std::mem;

use crate::variant::{Kind, Quark, QuarkTable, Variant, VariantStr};

/// Smallest capacity allocated once a container holds anything.
pub const MIN_CAPACITY: usize = 8;

/// Capacity after growing from `current` until `needed` fits, doubling from [`MIN_CAPACITY`].
pub(crate) fn grown_capacity(current: usize, needed: usize) -> usize {
	if needed <= current {
		return current;
	}

	let mut capacity = current.max(MIN_CAPACITY);
	while capacity < needed {
		capacity = capacity.saturating_mul(2);
	}
	capacity
}

/// Tear down detached nodes with an explicit stack.
fn release(mut pending: Vec<Variant>) {
	while let Some(mut node) = pending.pop() {
		match &mut node {
			Variant::List(list) => pending.append(&mut list.items),
			Variant::Dict(dict) => pending.extend(dict.entries.drain(..).map(|entry| entry.value)),
			_ => {}
		}
	}
}

/// Ordered sequence of unkeyed children.
#[derive(Clone, Default)]
pub struct List {
	items: Vec<Variant>,
}

impl List {
	/// Create an empty list without allocating.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty list with room for `n` children.
	pub fn with_capacity(n: usize) -> Self {
		let mut list = Self::new();
		list.reserve(n);
		list
	}

	/// Ensure room for `additional` more children.
	pub fn reserve(&mut self, additional: usize) {
		let needed = self.items.len().saturating_add(additional);
		let target = grown_capacity(self.items.capacity(), needed);
		if target > self.items.capacity() {
			self.items.reserve_exact(target - self.items.len());
		}
	}

	/// Allocated child slots.
	pub fn capacity(&self) -> usize {
		self.items.capacity()
	}

	/// Number of children.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the list has no children.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Child at `index`.
	pub fn get(&self, index: usize) -> Option<&Variant> {
		self.items.get(index)
	}

	/// Mutable child at `index`.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut Variant> {
		self.items.get_mut(index)
	}

	/// Iterate children in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
		self.items.iter()
	}

	/// Children as a slice.
	pub fn as_slice(&self) -> &[Variant] {
		&self.items
	}

	/// Append an owned node and return it.
	pub fn push(&mut self, value: Variant) -> &mut Variant {
		self.reserve(1);
		let index = self.items.len();
		self.items.push(value);
		&mut self.items[index]
	}

	/// Append a default node (`Int(0)`) and return it.
	pub fn add(&mut self) -> &mut Variant {
		self.push(Variant::default())
	}

	/// Append an integer.
	pub fn add_int(&mut self, value: i64) -> &mut Variant {
		self.push(Variant::Int(value))
	}

	/// Append a boolean.
	pub fn add_bool(&mut self, value: bool) -> &mut Variant {
		self.push(Variant::Bool(value))
	}

	/// Append a real.
	pub fn add_real(&mut self, value: f64) -> &mut Variant {
		self.push(Variant::Real(value))
	}

	/// Append a copy of `value`.
	pub fn add_str(&mut self, value: &str) -> &mut Variant {
		self.push(Variant::from(value))
	}

	/// Append a copy of raw `bytes`.
	pub fn add_raw(&mut self, bytes: &[u8]) -> &mut Variant {
		self.push(Variant::Str(VariantStr::from_bytes(bytes)))
	}

	/// Append a string sharing an interned key's bytes.
	pub fn add_quark(&mut self, quark: Quark) -> &mut Variant {
		self.push(Variant::Str(VariantStr::Interned(quark)))
	}

	/// Append an empty list with room for `reserve` children.
	pub fn add_list(&mut self, reserve: usize) -> &mut List {
		match self.push(Variant::List(List::with_capacity(reserve))) {
			Variant::List(list) => list,
			_ => unreachable!("pushed node is a list"),
		}
	}

	/// Append an empty dictionary with room for `reserve` entries.
	pub fn add_dict(&mut self, reserve: usize) -> &mut Dict {
		match self.push(Variant::Dict(Dict::with_capacity(reserve))) {
			Variant::Dict(dict) => dict,
			_ => unreachable!("pushed node is a dict"),
		}
	}

	/// Append deep copies of every child of `other`, keeping their order.
	pub fn extend_from(&mut self, other: &List) {
		self.reserve(other.len());
		self.items.extend(other.iter().cloned());
	}

	/// Remove the child at `index`, shifting later children down.
	///
	/// Returns `false` when `index` is out of range.
	pub fn remove(&mut self, index: usize) -> bool {
		if index >= self.items.len() {
			return false;
		}

		drop(self.items.remove(index));
		true
	}
}

impl Drop for List {
	fn drop(&mut self) {
		if !self.items.is_empty() {
			release(mem::take(&mut self.items));
		}
	}
}

/// One keyed dictionary child.
#[derive(Clone)]
pub struct DictEntry {
	/// Interned key, unique within the owning dictionary.
	pub key: Quark,
	/// Child node.
	pub value: Variant,
}

/// Children with unique interned keys, stored in insertion order.
#[derive(Clone, Default)]
pub struct Dict {
	entries: Vec<DictEntry>,
}

impl Dict {
	/// Create an empty dictionary without allocating.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty dictionary with room for `n` entries.
	pub fn with_capacity(n: usize) -> Self {
		let mut dict = Self::new();
		dict.reserve(n);
		dict
	}

	/// Ensure room for `additional` more entries.
	pub fn reserve(&mut self, additional: usize) {
		let needed = self.entries.len().saturating_add(additional);
		let target = grown_capacity(self.entries.capacity(), needed);
		if target > self.entries.capacity() {
			self.entries.reserve_exact(target - self.entries.len());
		}
	}

	/// Allocated entry slots.
	pub fn capacity(&self) -> usize {
		self.entries.capacity()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the dictionary has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> std::slice::Iter<'_, DictEntry> {
		self.entries.iter()
	}

	/// Entries in insertion order.
	pub fn entries(&self) -> &[DictEntry] {
		&self.entries
	}

	/// Entry at storage position `index`.
	pub fn child(&self, index: usize) -> Option<(&Quark, &Variant)> {
		self.entries.get(index).map(|entry| (&entry.key, &entry.value))
	}

	/// Storage position of `key`.
	pub fn index_of(&self, key: &Quark) -> Option<usize> {
		self.entries.iter().position(|entry| entry.key == *key)
	}

	/// Child stored under `key`.
	pub fn find(&self, key: &Quark) -> Option<&Variant> {
		self.index_of(key).map(|index| &self.entries[index].value)
	}

	/// Mutable child stored under `key`.
	pub fn find_mut(&mut self, key: &Quark) -> Option<&mut Variant> {
		let index = self.index_of(key)?;
		Some(&mut self.entries[index].value)
	}

	/// Child whose key has the given bytes, regardless of which table interned it.
	pub fn find_bytes(&self, key: &[u8]) -> Option<&Variant> {
		self.entries.iter().find(|entry| entry.key.as_bytes() == key).map(|entry| &entry.value)
	}

	/// Child under `name`, resolved through `quarks` without interning it.
	pub fn find_named(&self, quarks: &QuarkTable, name: &[u8]) -> Option<&Variant> {
		self.find(&quarks.get(name)?)
	}

	/// Integer (or boolean as 0/1) under `key`.
	pub fn find_int(&self, key: &Quark) -> Option<i64> {
		self.find(key)?.get_int()
	}

	/// Boolean under `key`, with the same coercions as [`Variant::get_bool`].
	pub fn find_bool(&self, key: &Quark) -> Option<bool> {
		self.find(key)?.get_bool()
	}

	/// Real under `key`, with the same coercions as [`Variant::get_real`].
	pub fn find_real(&self, key: &Quark) -> Option<f64> {
		self.find(key)?.get_real()
	}

	/// UTF-8 string under `key`.
	pub fn find_str(&self, key: &Quark) -> Option<&str> {
		self.find(key)?.get_str()
	}

	/// Raw string bytes under `key`.
	pub fn find_raw(&self, key: &Quark) -> Option<&[u8]> {
		self.find(key)?.get_raw()
	}

	/// List under `key`.
	pub fn find_list(&self, key: &Quark) -> Option<&List> {
		self.find(key)?.as_list()
	}

	/// Dictionary under `key`.
	pub fn find_dict(&self, key: &Quark) -> Option<&Dict> {
		self.find(key)?.as_dict()
	}

	/// Find-or-add the child for `key` as `kind`.
	///
	/// An existing child of another kind, or an existing string, is released and
	/// its slot reused. An existing container of the same kind is kept as is.
	pub fn add(&mut self, key: Quark, kind: Kind) -> &mut Variant {
		let index = match self.index_of(&key) {
			Some(index) => {
				let value = &mut self.entries[index].value;
				if value.kind() != kind || value.is_str() {
					*value = Variant::new(kind);
				}
				index
			}
			None => self.push_entry(key, Variant::new(kind)),
		};
		&mut self.entries[index].value
	}

	/// Store `value` under `key`, replacing any existing child in place.
	pub fn set(&mut self, key: Quark, value: Variant) -> &mut Variant {
		let index = match self.index_of(&key) {
			Some(index) => {
				self.entries[index].value = value;
				index
			}
			None => self.push_entry(key, value),
		};
		&mut self.entries[index].value
	}

	/// Store an integer under `key`.
	pub fn add_int(&mut self, key: Quark, value: i64) -> &mut Variant {
		self.set(key, Variant::Int(value))
	}

	/// Store a boolean under `key`.
	pub fn add_bool(&mut self, key: Quark, value: bool) -> &mut Variant {
		self.set(key, Variant::Bool(value))
	}

	/// Store a real under `key`.
	pub fn add_real(&mut self, key: Quark, value: f64) -> &mut Variant {
		self.set(key, Variant::Real(value))
	}

	/// Store a copy of `value` under `key`.
	pub fn add_str(&mut self, key: Quark, value: &str) -> &mut Variant {
		self.set(key, Variant::from(value))
	}

	/// Store a copy of raw `bytes` under `key`.
	pub fn add_raw(&mut self, key: Quark, bytes: &[u8]) -> &mut Variant {
		self.set(key, Variant::Str(VariantStr::from_bytes(bytes)))
	}

	/// Store a string sharing the bytes of `value` under `key`.
	pub fn add_quark(&mut self, key: Quark, value: Quark) -> &mut Variant {
		self.set(key, Variant::Str(VariantStr::Interned(value)))
	}

	/// Store a fresh empty list under `key`.
	pub fn add_list(&mut self, key: Quark, reserve: usize) -> &mut List {
		match self.set(key, Variant::List(List::with_capacity(reserve))) {
			Variant::List(list) => list,
			_ => unreachable!("stored node is a list"),
		}
	}

	/// Store a fresh empty dictionary under `key`.
	pub fn add_dict(&mut self, key: Quark, reserve: usize) -> &mut Dict {
		match self.set(key, Variant::Dict(Dict::with_capacity(reserve))) {
			Variant::Dict(dict) => dict,
			_ => unreachable!("stored node is a dict"),
		}
	}

	/// Remove the child under `key`, moving the last entry into its slot.
	///
	/// Entry order is not preserved. Returns `false` when `key` is absent.
	pub fn remove(&mut self, key: &Quark) -> bool {
		let Some(index) = self.index_of(key) else {
			return false;
		};

		drop(self.entries.swap_remove(index));
		true
	}

	/// Append an entry without checking for an existing key; returns its position.
	pub(crate) fn push_entry(&mut self, key: Quark, value: Variant) -> usize {
		self.reserve(1);
		self.entries.push(DictEntry { key, value });
		self.entries.len() - 1
	}

	/// Mutable child at storage position `index`.
	pub(crate) fn value_at_mut(&mut self, index: usize) -> Option<&mut Variant> {
		self.entries.get_mut(index).map(|entry| &mut entry.value)
	}
}

impl Drop for Dict {
	fn drop(&mut self) {
		if !self.entries.is_empty() {
			release(self.entries.drain(..).map(|entry| entry.value).collect());
		}
	}
}

#[cfg(test)]
mod tests;
