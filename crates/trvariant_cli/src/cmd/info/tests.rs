use trvariant::variant::{Dict, List, QuarkTable, Variant};

use super::TreeStats;
use crate::cmd::test_support::{fixture_path, run_trvariant_json, run_trvariant_ok};

#[test]
fn stats_count_kinds_keys_and_depth() {
	let mut quarks = QuarkTable::new();
	let mut root = Dict::new();
	root.add_int(quarks.intern(b"a"), 1);
	let list = root.add_list(quarks.intern(b"b"), 0);
	list.add_str("x");
	list.add_dict(0).add_real(quarks.intern(b"c"), 0.5);
	root.add_bool(quarks.intern(b"d"), false);

	let stats = TreeStats::collect(&Variant::Dict(root));
	assert_eq!((stats.ints, stats.bools, stats.reals, stats.strings), (1, 1, 1, 1));
	assert_eq!((stats.lists, stats.dicts, stats.keys), (1, 2, 4));
	assert_eq!(stats.max_depth, 3);
	assert_eq!(stats.nodes(), 7);
}

#[test]
fn scalar_and_empty_roots() {
	assert_eq!(TreeStats::collect(&Variant::Int(3)).max_depth, 0);
	let stats = TreeStats::collect(&Variant::List(List::new()));
	assert_eq!((stats.lists, stats.max_depth, stats.nodes()), (1, 1, 1));
}

#[test]
fn info_json_reports_settings_fixture() {
	let fixture = fixture_path("settings.json");
	let fixture = fixture.to_string_lossy().into_owned();
	let json = run_trvariant_json(&["info", &fixture, "--json"]);

	assert_eq!(json["format"], "json");
	assert_eq!(json["root"], "dict");
	assert_eq!(json["nodes"], 14);
	assert_eq!(json["counts"]["key"], 11);
	assert_eq!(json["counts"]["bool"], 3);
	assert_eq!(json["max_depth"], 2);
	assert!(json["file_size"].as_u64().is_some_and(|size| size > 0));
}

#[test]
fn info_text_reports_benc_fixture() {
	let fixture = fixture_path("resume.benc");
	let fixture = fixture.to_string_lossy().into_owned();
	let stdout = run_trvariant_ok(&["info", &fixture]);

	assert!(stdout.contains("format: benc"));
	assert!(stdout.contains("root: dict"));
	assert!(stdout.contains("max_depth: 3"));
}
