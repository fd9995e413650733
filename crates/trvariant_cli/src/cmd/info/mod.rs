use std::fs;
use std::path::PathBuf;

use trvariant::variant::{Dict, Kind, List, Quark, QuarkTable, Result, Variant, VariantStr, Visitor, encode, read_file, walk};

use crate::cmd::util::{FormatArg, emit_json, resolve_format};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long, value_enum)]
	pub format: Option<FormatArg>,
	#[arg(long)]
	pub json: bool,
}

/// Print node counts, nesting depth, and sizes for one file.
pub fn run(args: Args) -> Result<()> {
	let Args { path, format, json } = args;
	let format = resolve_format(format, &path);

	let mut quarks = QuarkTable::new();
	let root = read_file(&path, format, &mut quarks)?;
	let stats = TreeStats::collect(&root);
	let file_size = fs::metadata(&path)?.len();
	let encoded_size = encode(&root, format).len();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			format: format.as_str(),
			root: root.kind().as_str(),
			nodes: stats.nodes(),
			counts: CountsJson {
				int: stats.ints,
				bool: stats.bools,
				real: stats.reals,
				string: stats.strings,
				list: stats.lists,
				dict: stats.dicts,
				key: stats.keys,
			},
			max_depth: stats.max_depth,
			file_size,
			encoded_size,
			distinct_keys: quarks.len(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("format: {}", format.as_str());
	println!("root: {}", root.kind());
	println!("nodes: {}", stats.nodes());
	println!("  int: {}", stats.ints);
	println!("  bool: {}", stats.bools);
	println!("  real: {}", stats.reals);
	println!("  string: {}", stats.strings);
	println!("  list: {}", stats.lists);
	println!("  dict: {}", stats.dicts);
	println!("keys: {} ({} distinct)", stats.keys, quarks.len());
	println!("max_depth: {}", stats.max_depth);
	println!("file_size: {file_size}");
	println!("encoded_size: {encoded_size}");

	Ok(())
}

/// Per-kind node counts gathered in one traversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TreeStats {
	pub(crate) ints: usize,
	pub(crate) bools: usize,
	pub(crate) reals: usize,
	pub(crate) strings: usize,
	pub(crate) lists: usize,
	pub(crate) dicts: usize,
	/// Dictionary keys; not counted as string nodes.
	pub(crate) keys: usize,
	pub(crate) max_depth: usize,
	depth: usize,
}

impl TreeStats {
	pub(crate) fn collect(root: &Variant) -> Self {
		let mut stats = Self::default();
		walk(root, &mut stats, false);
		stats
	}

	pub(crate) fn nodes(&self) -> usize {
		self.ints + self.bools + self.reals + self.strings + self.lists + self.dicts
	}

	fn enter(&mut self) {
		self.depth += 1;
		self.max_depth = self.max_depth.max(self.depth);
	}
}

impl Visitor for TreeStats {
	fn int(&mut self, _value: i64) {
		self.ints += 1;
	}

	fn boolean(&mut self, _value: bool) {
		self.bools += 1;
	}

	fn real(&mut self, _value: f64) {
		self.reals += 1;
	}

	fn string(&mut self, _value: &VariantStr) {
		self.strings += 1;
	}

	fn key(&mut self, _key: &Quark) {
		self.keys += 1;
	}

	fn list_begin(&mut self, _list: &List) {
		self.lists += 1;
		self.enter();
	}

	fn dict_begin(&mut self, _dict: &Dict) {
		self.dicts += 1;
		self.enter();
	}

	fn container_end(&mut self, _kind: Kind) {
		self.depth = self.depth.saturating_sub(1);
	}
}

#[derive(serde::Serialize)]
struct CountsJson {
	int: usize,
	bool: usize,
	real: usize,
	string: usize,
	list: usize,
	dict: usize,
	key: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	format: &'static str,
	root: &'static str,
	nodes: usize,
	counts: CountsJson,
	max_depth: usize,
	file_size: u64,
	encoded_size: usize,
	distinct_keys: usize,
}

#[cfg(test)]
mod tests;
