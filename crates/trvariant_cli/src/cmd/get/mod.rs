use std::path::PathBuf;

use trvariant::variant::{Format, KeyPath, QuarkTable, Result, Variant, VariantError, encode, format_real, read_file};

use crate::cmd::util::{FormatArg, resolve_format};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	pub key_path: String,
	#[arg(long, value_enum)]
	pub format: Option<FormatArg>,
	#[arg(long)]
	pub json: bool,
}

/// Print the value addressed by a key path.
pub fn run(args: Args) -> Result<()> {
	let Args { path, key_path, format, json } = args;
	let format = resolve_format(format, &path);
	let parsed = KeyPath::parse(&key_path)?;

	let mut quarks = QuarkTable::new();
	let root = read_file(&path, format, &mut quarks)?;
	let value = root.lookup_path(&parsed).ok_or(VariantError::PathNotFound { path: key_path })?;

	if json {
		println!("{}", String::from_utf8_lossy(&encode(value, Format::JsonLean)));
	} else {
		print!("{}", render_plain(value));
	}
	Ok(())
}

/// Scalars as bare text, containers as indented JSON.
pub(crate) fn render_plain(value: &Variant) -> String {
	match value {
		Variant::Int(number) => format!("{number}\n"),
		Variant::Bool(flag) => format!("{flag}\n"),
		Variant::Real(number) => format!("{}\n", format_real(*number)),
		Variant::Str(text) => format!("{}\n", String::from_utf8_lossy(text.as_bytes())),
		Variant::List(_) | Variant::Dict(_) => String::from_utf8_lossy(&encode(value, Format::Json)).into_owned(),
	}
}
