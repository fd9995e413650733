use std::path::Path;

use trvariant::variant::Format;

/// Wire format names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
	/// Length-prefixed binary encoding.
	Benc,
	/// Indented JSON.
	Json,
	/// JSON without whitespace.
	JsonLean,
}

impl From<FormatArg> for Format {
	fn from(value: FormatArg) -> Self {
		match value {
			FormatArg::Benc => Format::Benc,
			FormatArg::Json => Format::Json,
			FormatArg::JsonLean => Format::JsonLean,
		}
	}
}

/// Explicit format, or one guessed from the file extension.
pub(crate) fn resolve_format(explicit: Option<FormatArg>, path: &Path) -> Format {
	explicit.map(Format::from).unwrap_or_else(|| Format::from_path(path))
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to render json: {err}"),
	}
}
