use crate::variant::{Dict, KeyPath, Kind, List, QuarkTable, Variant};

fn nested_lists(depth: usize) -> Variant {
	let mut node = Variant::Int(7);
	for _ in 0..depth {
		let mut list = List::new();
		list.push(node);
		node = Variant::List(list);
	}
	node
}

#[test]
fn new_sets_kind_and_default_payload() {
	for kind in [Kind::Int, Kind::Bool, Kind::Real, Kind::Str, Kind::List, Kind::Dict] {
		assert_eq!(Variant::new(kind).kind(), kind);
	}
	assert_eq!(Variant::default().get_int(), Some(0));
	assert_eq!(Kind::Str.as_str(), "string");
	assert!(Kind::Dict.is_container());
	assert!(!Kind::Real.is_container());
}

#[test]
fn setters_replace_previous_payload() {
	let mut node = Variant::new(Kind::Dict);
	node.set_str("hello");
	assert_eq!(node.get_str(), Some("hello"));

	node.set_int(-4);
	assert_eq!(node.kind(), Kind::Int);
	assert_eq!(node.get_str(), None);

	node.set_raw(b"\x00\x01");
	assert_eq!(node.get_raw(), Some(&b"\x00\x01"[..]));
	assert_eq!(node.get_int(), None);
}

#[test]
fn bool_coercions() {
	assert_eq!(Variant::Int(0).get_bool(), Some(false));
	assert_eq!(Variant::Int(1).get_bool(), Some(true));
	assert_eq!(Variant::Int(2).get_bool(), None);
	assert_eq!(Variant::from("true").get_bool(), Some(true));
	assert_eq!(Variant::from("false").get_bool(), Some(false));
	assert_eq!(Variant::from("yes").get_bool(), None);
	assert_eq!(Variant::Real(1.0).get_bool(), None);
}

#[test]
fn int_and_real_coercions() {
	assert_eq!(Variant::Bool(true).get_int(), Some(1));
	assert_eq!(Variant::Real(2.0).get_int(), None);
	assert_eq!(Variant::Int(3).get_real(), Some(3.0));
	assert_eq!(Variant::from("3.5").get_real(), Some(3.5));
	assert_eq!(Variant::from("3,5").get_real(), None);
	assert_eq!(Variant::from("3.5 kB").get_real(), None);
	assert_eq!(Variant::Bool(true).get_real(), None);
}

#[test]
fn interned_string_reads_like_owned() {
	let mut quarks = QuarkTable::new();
	let mut node = Variant::default();
	node.set_quark(quarks.intern(b"encryption"));

	assert_eq!(node.get_str(), Some("encryption"));
	assert!(node == Variant::from("encryption"));
}

#[test]
fn equality_ignores_dict_order_but_not_list_order() {
	let mut quarks = QuarkTable::new();
	let (a, b) = (quarks.intern(b"a"), quarks.intern(b"b"));

	let mut left = Dict::new();
	left.add_int(a.clone(), 1);
	left.add_str(b.clone(), "two");
	let mut right = Dict::new();
	right.add_str(b, "two");
	right.add_int(a, 1);
	assert!(Variant::Dict(left) == Variant::Dict(right));

	let mut first = List::new();
	first.add_int(1);
	first.add_int(2);
	let mut second = List::new();
	second.add_int(2);
	second.add_int(1);
	assert!(Variant::List(first) != Variant::List(second));
	assert!(Variant::Int(1) != Variant::Bool(true));
}

#[test]
fn clone_is_deep_and_independent() {
	let mut quarks = QuarkTable::new();
	let mut root = Dict::new();
	let peers = root.add_list(quarks.intern(b"peers"), 2);
	peers.add_str("10.0.0.1");
	peers.add_dict(1).add_int(quarks.intern(b"port"), 51413);
	let original = Variant::Dict(root);

	let mut copy = original.clone();
	assert!(copy == original);

	let peers = copy.as_dict_mut().and_then(|dict| dict.find_mut(&quarks.intern(b"peers"))).and_then(Variant::as_list_mut).expect("peers list");
	peers.add_int(9);
	assert!(copy != original);
	assert_eq!(original.by_key(b"peers").and_then(Variant::as_list).map(List::len), Some(2));
}

#[test]
fn lookup_path_navigates_keys_and_indices() {
	let mut quarks = QuarkTable::new();
	let mut root = Dict::new();
	let files = root.add_list(quarks.intern(b"files"), 0);
	files.add_dict(0).add_str(quarks.intern(b"name"), "a.bin");
	files.add_dict(0).add_str(quarks.intern(b"name"), "b.bin");
	let root = Variant::Dict(root);

	let path = KeyPath::parse("files[1].name").expect("path parses");
	assert_eq!(root.lookup_path(&path).and_then(Variant::get_str), Some("b.bin"));

	let missing = KeyPath::parse("files[2].name").expect("path parses");
	assert!(root.lookup_path(&missing).is_none());
	let wrong_kind = KeyPath::parse("files.name").expect("path parses");
	assert!(root.lookup_path(&wrong_kind).is_none());
}

#[test]
fn free_resets_and_is_idempotent() {
	let mut node = nested_lists(10);
	node.free();
	assert_eq!(node.get_int(), Some(0));
	node.free();
	assert_eq!(node.get_int(), Some(0));
}

#[test]
fn deep_trees_clone_compare_and_drop_without_recursion() {
	let deep = nested_lists(100_000);
	let copy = deep.clone();
	assert!(copy == deep);
	drop(copy);

	let mut deep = deep;
	deep.free();
	assert!(deep.is_int());
}
