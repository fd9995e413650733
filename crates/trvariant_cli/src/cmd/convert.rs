use std::path::PathBuf;

use trvariant::variant::{QuarkTable, Result, read_file, write_file};

use crate::cmd::util::{FormatArg, resolve_format};

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	pub output: PathBuf,
	#[arg(long, value_enum)]
	pub from: Option<FormatArg>,
	#[arg(long, value_enum)]
	pub to: Option<FormatArg>,
}

/// Decode `input` and atomically write it to `output` in another format.
pub fn run(args: Args) -> Result<()> {
	let Args { input, output, from, to } = args;
	let from = resolve_format(from, &input);
	let to = resolve_format(to, &output);

	let mut quarks = QuarkTable::new();
	let root = read_file(&input, from, &mut quarks)?;
	let saved = write_file(&root, to, &output)?;

	println!("{} ({}) -> {} ({})", input.display(), from.as_str(), saved.display(), to.as_str());
	Ok(())
}
