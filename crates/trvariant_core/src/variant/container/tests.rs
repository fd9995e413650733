use crate::variant::{Dict, Kind, List, MIN_CAPACITY, QuarkTable, Variant};

use super::grown_capacity;

#[test]
fn capacity_grows_by_doubling_from_minimum() {
	assert_eq!(grown_capacity(0, 1), MIN_CAPACITY);
	assert_eq!(grown_capacity(8, 9), 16);
	assert_eq!(grown_capacity(16, 40), 64);
	assert_eq!(grown_capacity(32, 10), 32);

	let mut list = List::new();
	assert_eq!(list.capacity(), 0);
	list.add_int(1);
	assert!(list.capacity() >= MIN_CAPACITY);

	let mut dict = Dict::with_capacity(3);
	assert!(dict.capacity() >= MIN_CAPACITY);
	dict.reserve(0);
	assert!(dict.capacity() >= MIN_CAPACITY);
}

#[test]
fn list_add_returns_default_child() {
	let mut list = List::with_capacity(2);
	let child = list.add();
	assert_eq!(child.get_int(), Some(0));
	child.set_str("tracker");

	list.add_bool(true);
	list.add_real(0.5);
	list.add_raw(b"\xffraw");
	list.add_list(0).add_int(3);
	list.add_dict(0);

	let kinds: Vec<Kind> = list.iter().map(Variant::kind).collect();
	assert_eq!(kinds, vec![Kind::Str, Kind::Bool, Kind::Real, Kind::Str, Kind::List, Kind::Dict]);
	assert_eq!(list.get(4).and_then(|node| node.by_index(0)).and_then(Variant::get_int), Some(3));
}

#[test]
fn list_extend_from_appends_deep_copies() {
	let mut quarks = QuarkTable::new();
	let mut trackers = List::new();
	trackers.add_str("udp://a");
	trackers.add_dict(1).add_int(quarks.intern(b"tier"), 0);

	let mut all = List::new();
	all.add_str("udp://seed");
	all.extend_from(&trackers);
	all.extend_from(&List::new());
	assert_eq!(all.len(), 3);
	assert_eq!(all.get(1).and_then(Variant::get_str), Some("udp://a"));

	if let Some(copy) = all.get_mut(2).and_then(Variant::as_dict_mut) {
		copy.add_int(quarks.intern(b"tier"), 4);
	}
	assert_eq!(trackers.get(1).and_then(|node| node.by_key(b"tier")).and_then(Variant::get_int), Some(0));
	assert_eq!(all.get(2).and_then(|node| node.by_key(b"tier")).and_then(Variant::get_int), Some(4));
}

#[test]
fn list_remove_shifts_and_keeps_order() {
	let mut list = List::new();
	for value in 0..5 {
		list.add_int(value);
	}

	assert!(list.remove(1));
	assert!(!list.remove(10));
	let values: Vec<i64> = list.iter().filter_map(Variant::get_int).collect();
	assert_eq!(values, vec![0, 2, 3, 4]);
}

#[test]
fn dict_remove_moves_last_entry_into_slot() {
	let mut quarks = QuarkTable::new();
	let mut dict = Dict::new();
	for name in ["a", "b", "c", "d"] {
		dict.add_str(quarks.intern(name.as_bytes()), name);
	}

	assert!(dict.remove(&quarks.intern(b"b")));
	assert!(!dict.remove(&quarks.intern(b"zzz")));
	let keys: Vec<&[u8]> = dict.iter().map(|entry| entry.key.as_bytes()).collect();
	assert_eq!(keys, vec![&b"a"[..], &b"d"[..], &b"c"[..]]);
}

#[test]
fn keys_from_separate_tables_never_alias() {
	let mut first = QuarkTable::new();
	let mut second = QuarkTable::new();
	second.intern(b"pad");
	let mut dict = Dict::new();

	dict.add_int(first.intern(b"a"), 1);
	dict.add_int(second.intern(b"b"), 2);
	dict.add_int(second.intern(b"a"), 3);

	let keys: Vec<&[u8]> = dict.iter().map(|entry| entry.key.as_bytes()).collect();
	assert_eq!(keys, vec![&b"a"[..], &b"b"[..]]);
	assert_eq!(dict.find(&first.intern(b"a")).and_then(Variant::get_int), Some(3));
	assert_eq!(dict.find(&second.intern(b"b")).and_then(Variant::get_int), Some(2));
}

#[test]
fn dict_keys_stay_unique() {
	let mut quarks = QuarkTable::new();
	let key = quarks.intern(b"speed-limit-up");
	let mut dict = Dict::new();

	dict.add_int(key.clone(), 100);
	dict.add_int(key.clone(), 250);
	dict.add_str(key.clone(), "fast");
	dict.add_bool(key.clone(), true);

	assert_eq!(dict.len(), 1);
	assert_eq!(dict.find_bool(&key), Some(true));
	assert_eq!(dict.find_int(&key), Some(1));
}

#[test]
fn dict_add_resets_other_kinds_and_keeps_same_container() {
	let mut quarks = QuarkTable::new();
	let (name, nested) = (quarks.intern(b"name"), quarks.intern(b"nested"));
	let mut dict = Dict::new();

	dict.add_str(name.clone(), "old");
	assert_eq!(dict.add(name.clone(), Kind::Str).get_str(), Some(""));
	assert_eq!(dict.add(name.clone(), Kind::Int).get_int(), Some(0));

	dict.add_dict(nested.clone(), 0).add_int(quarks.intern(b"x"), 1);
	let kept = dict.add(nested.clone(), Kind::Dict);
	assert_eq!(kept.as_dict().map(Dict::len), Some(1));

	let fresh = dict.add_dict(nested.clone(), 0);
	assert!(fresh.is_empty());
	assert_eq!(dict.len(), 2);
}

#[test]
fn typed_finds_respect_kind() {
	let mut quarks = QuarkTable::new();
	let (port, ratio, dir, blocklist, limits) =
		(quarks.intern(b"port"), quarks.intern(b"ratio"), quarks.intern(b"dir"), quarks.intern(b"blocklist"), quarks.intern(b"limits"));
	let mut dict = Dict::new();
	dict.add_int(port.clone(), 51413);
	dict.add_real(ratio.clone(), 2.0);
	dict.add_str(dir.clone(), "/srv/torrents");
	dict.add_list(blocklist.clone(), 0);
	dict.add_dict(limits.clone(), 0);

	assert_eq!(dict.find_int(&port), Some(51413));
	assert_eq!(dict.find_real(&port), Some(51413.0));
	assert_eq!(dict.find_real(&ratio), Some(2.0));
	assert_eq!(dict.find_int(&ratio), None);
	assert_eq!(dict.find_str(&dir), Some("/srv/torrents"));
	assert_eq!(dict.find_raw(&dir), Some(&b"/srv/torrents"[..]));
	assert!(dict.find_list(&blocklist).is_some());
	assert!(dict.find_dict(&limits).is_some());
	assert!(dict.find_dict(&blocklist).is_none());
	assert!(dict.find_bytes(b"dir").is_some());
	assert_eq!(dict.find_named(&quarks, b"port").and_then(Variant::get_int), Some(51413));
	assert!(dict.find_named(&quarks, b"missing").is_none());
	assert_eq!(quarks.len(), 5);
	assert_eq!(dict.child(0).map(|(key, _)| key.as_bytes()), Some(&b"port"[..]));
	assert!(dict.child(5).is_none());
}

#[test]
fn wide_and_deep_containers_drop_iteratively() {
	let mut quarks = QuarkTable::new();
	let key = quarks.intern(b"k");
	let mut node = Variant::Int(1);
	for _ in 0..100_000 {
		let mut dict = Dict::new();
		dict.set(key.clone(), node);
		node = Variant::Dict(dict);
	}
	drop(node);

	let mut wide = List::new();
	for value in 0..10_000 {
		wide.add_list(1).add_int(value);
	}
	assert!(wide.remove(0));
	assert_eq!(wide.len(), 9_999);
}
