use std::path::PathBuf;

use tracing::info;
use trvariant::variant::{QuarkTable, Result, merge, read_file, write_file};

use crate::cmd::util::{FormatArg, resolve_format};

#[derive(clap::Args)]
pub struct Args {
	pub target: PathBuf,
	pub source: PathBuf,
	#[arg(long, value_enum)]
	pub format: Option<FormatArg>,
	#[arg(long)]
	pub out: Option<PathBuf>,
}

/// Deep-merge `source` into `target` and save the result atomically.
///
/// The result replaces `target` unless `--out` names another file. An explicit
/// `--format` applies to every file; otherwise each file's extension decides.
pub fn run(args: Args) -> Result<()> {
	let Args { target, source, format, out } = args;
	let out = out.unwrap_or_else(|| target.clone());

	let mut quarks = QuarkTable::new();
	let mut merged = read_file(&target, resolve_format(format, &target), &mut quarks)?;
	let overlay = read_file(&source, resolve_format(format, &source), &mut quarks)?;
	merge(&mut merged, &overlay)?;
	info!(target = %target.display(), source = %source.display(), keys = quarks.len(), "merged");

	let out_format = resolve_format(format, &out);
	let saved = write_file(&merged, out_format, &out)?;
	println!("{}", saved.display());
	Ok(())
}
