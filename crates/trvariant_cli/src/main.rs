#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "trvariant", about = "Variant tree inspection and conversion tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Summarize node counts, depth, and encoded size.
	Info(cmd::info::Args),
	/// Re-encode a file into another format.
	Convert(cmd::convert::Args),
	/// Print the value at a key path.
	Get(cmd::get::Args),
	/// Deep-merge one file into another.
	Merge(cmd::merge::Args),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();
}

fn run() -> trvariant::variant::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Convert(args) => cmd::convert::run(args),
		Commands::Get(args) => cmd::get::run(args),
		Commands::Merge(args) => cmd::merge::run(args),
	}
}
