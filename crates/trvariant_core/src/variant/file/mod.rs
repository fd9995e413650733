use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{error, info};

use crate::variant::{Format, ParseOptions, QuarkTable, Result, Variant, VariantError, decode_with, encode};

/// Random characters appended to temporary file names.
const TEMP_RAND_CHARS: usize = 6;

/// Read a whole file and decode it with default options.
pub fn read_file(path: impl AsRef<Path>, format: Format, quarks: &mut QuarkTable) -> Result<Variant> {
	read_file_with(path, format, quarks, &ParseOptions::default())
}

/// Read a whole file and decode it.
///
/// Open and read failures surface as [`VariantError::Io`], separate from parse errors.
pub fn read_file_with(path: impl AsRef<Path>, format: Format, quarks: &mut QuarkTable, options: &ParseOptions) -> Result<Variant> {
	let bytes = fs::read(path)?;
	decode_with(&bytes, format, quarks, options)
}

/// Serialize `root` and atomically replace `path` with the result.
///
/// Returns the resolved target path. On failure the previous file at `path`
/// is untouched.
pub fn write_file(root: &Variant, format: Format, path: impl AsRef<Path>) -> Result<PathBuf> {
	stage_file(root, format, path)?.commit()
}

/// Serialize `root` into a temporary sibling of `path` without replacing it yet.
///
/// Symlinks in `path` are resolved so the link target is replaced, not the
/// link. The temporary file is named `<name>.tmp.XXXXXX` and is removed if the
/// write fails or the returned handle is dropped uncommitted.
pub fn stage_file(root: &Variant, format: Format, path: impl AsRef<Path>) -> Result<StagedFile> {
	let path = path.as_ref();
	let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
	let Some(file_name) = target.file_name() else {
		return Err(VariantError::InvalidTarget { path: path.to_path_buf() });
	};
	let dir = match target.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
		_ => PathBuf::from("."),
	};

	let mut prefix = file_name.to_os_string();
	prefix.push(".tmp.");
	let mut tmp = match tempfile::Builder::new().prefix(&prefix).rand_bytes(TEMP_RAND_CHARS).tempfile_in(&dir) {
		Ok(tmp) => tmp,
		Err(source) => {
			error!(dir = %dir.display(), error = %source, "couldn't create temporary file");
			return Err(VariantError::CreateTemp { dir, source });
		}
	};

	let bytes = encode(root, format);
	let written = write_fully(tmp.as_file_mut(), &bytes).and_then(|()| tmp.as_file().sync_all());
	if let Err(source) = written {
		let tmp_path = tmp.path().to_path_buf();
		error!(tmp = %tmp_path.display(), error = %source, "couldn't save temporary file");
		drop(tmp);
		return Err(VariantError::WriteTemp { tmp: tmp_path, source });
	}

	Ok(StagedFile { tmp, target })
}

/// Fully written temporary file waiting to replace its target.
#[derive(Debug)]
pub struct StagedFile {
	tmp: NamedTempFile,
	target: PathBuf,
}

impl StagedFile {
	/// Path of the temporary file.
	pub fn temp_path(&self) -> &Path {
		self.tmp.path()
	}

	/// Resolved path that [`StagedFile::commit`] replaces.
	pub fn target(&self) -> &Path {
		&self.target
	}

	/// Atomically rename the temporary file over the target.
	///
	/// If the rename fails the temporary file is kept and named in the error.
	pub fn commit(self) -> Result<PathBuf> {
		let Self { tmp, target } = self;
		let tmp_path = tmp.path().to_path_buf();
		match tmp.persist(&target) {
			Ok(_) => {
				info!(path = %target.display(), "saved");
				Ok(target)
			}
			Err(err) => {
				let source = err.error;
				let kept = err.file.keep().map(|(_, path)| path).unwrap_or(tmp_path);
				error!(path = %target.display(), tmp = %kept.display(), error = %source, "couldn't save file");
				Err(VariantError::Rename { tmp: kept, path: target, source })
			}
		}
	}
}

/// Write all of `bytes`, retrying interrupted and would-block writes.
pub(crate) fn write_fully<W: Write + ?Sized>(writer: &mut W, mut bytes: &[u8]) -> io::Result<()> {
	while !bytes.is_empty() {
		match writer.write(bytes) {
			Ok(0) => return Err(io::Error::new(io::ErrorKind::WriteZero, "failed to write whole buffer")),
			Ok(n) => bytes = &bytes[n..],
			Err(err) if matches!(err.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {}
			Err(err) => return Err(err),
		}
	}
	writer.flush()
}
