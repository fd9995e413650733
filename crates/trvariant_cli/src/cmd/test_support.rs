use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use trvariant_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static TRVARIANT_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_path(name: &str) -> PathBuf {
	shared_fixture_path(name)
}

fn run_trvariant(args: &[&str]) -> Output {
	Command::new(trvariant_bin()).args(args).output().expect("trvariant command executes")
}

pub(crate) fn run_trvariant_ok(args: &[&str]) -> String {
	let output = run_trvariant(args);
	assert!(
		output.status.success(),
		"trvariant command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).expect("stdout should be utf-8")
}

/// Run a command that must fail and return its stderr.
pub(crate) fn run_trvariant_err(args: &[&str]) -> String {
	let output = run_trvariant(args);
	assert!(!output.status.success(), "trvariant {args:?} unexpectedly succeeded");
	assert_eq!(output.status.code(), Some(1), "errors exit with status 1");
	String::from_utf8_lossy(&output.stderr).into_owned()
}

pub(crate) fn run_trvariant_json(args: &[&str]) -> serde_json::Value {
	let stdout = run_trvariant_ok(args);
	serde_json::from_str(&stdout).expect("stdout should be valid json")
}

fn trvariant_bin() -> &'static PathBuf {
	TRVARIANT_BIN.get_or_init(resolve_trvariant_bin)
}

fn resolve_trvariant_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_trvariant") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "trvariant.exe" } else { "trvariant" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "trvariant"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build trvariant binary at {}", bin.display());

	bin
}
