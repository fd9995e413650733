use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Interned dictionary key: a stable small id plus the bytes it names.
///
/// Equality and hashing follow the key bytes, so quarks from different tables
/// name the same key exactly when their bytes match.
#[derive(Clone)]
pub struct Quark {
	id: u32,
	bytes: Arc<[u8]>,
}

impl Quark {
	/// Numeric id assigned by the owning table.
	pub fn id(&self) -> u32 {
		self.id
	}

	/// Key bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Key text with invalid UTF-8 replaced.
	pub fn to_string_lossy(&self) -> String {
		String::from_utf8_lossy(&self.bytes).into_owned()
	}
}

impl PartialEq for Quark {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.bytes, &other.bytes) || self.bytes == other.bytes
	}
}

impl Eq for Quark {}

impl Hash for Quark {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.bytes.hash(state);
	}
}

impl fmt::Debug for Quark {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Quark({}, {:?})", self.id, String::from_utf8_lossy(&self.bytes))
	}
}

/// Append-only string interner mapping key bytes to stable quark ids.
#[derive(Debug, Default)]
pub struct QuarkTable {
	names: Vec<Arc<[u8]>>,
	ids: HashMap<Arc<[u8]>, u32>,
}

impl QuarkTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the quark for `bytes`, assigning the next id if unseen.
	pub fn intern(&mut self, bytes: &[u8]) -> Quark {
		if let Some(quark) = self.get(bytes) {
			return quark;
		}

		let id = u32::try_from(self.names.len()).expect("quark table exhausted u32 id space");
		let name: Arc<[u8]> = Arc::from(bytes);
		self.names.push(name.clone());
		self.ids.insert(name.clone(), id);
		Quark { id, bytes: name }
	}

	/// Find an already-interned quark without inserting.
	pub fn get(&self, bytes: &[u8]) -> Option<Quark> {
		let id = *self.ids.get(bytes)?;
		Some(Quark {
			id,
			bytes: self.names[id as usize].clone(),
		})
	}

	/// Resolve an id back to its quark.
	pub fn lookup(&self, id: u32) -> Option<Quark> {
		let bytes = self.names.get(id as usize)?.clone();
		Some(Quark { id, bytes })
	}

	/// Number of interned keys.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Whether nothing has been interned yet.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}
