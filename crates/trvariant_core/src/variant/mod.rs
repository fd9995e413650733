mod benc;
mod builder;
mod bytes;
mod codec;
mod container;
mod debug;
mod error;
mod file;
mod json;
mod merge;
mod number;
mod path;
mod quark;
mod string;
mod value;
mod walk;

/// Wire format selection, decoder options, and buffer encode/decode entry points.
pub use codec::{Format, ParseOptions, decode, decode_prefix, decode_with, encode, encode_into, encode_string};
/// List and dictionary storage.
pub use container::{Dict, DictEntry, List, MIN_CAPACITY};
/// Error and result aliases.
pub use error::{Result, VariantError};
/// Atomic file persistence and whole-file reads.
pub use file::{StagedFile, read_file, read_file_with, stage_file, write_file};
/// Structural deep merge.
pub use merge::merge;
/// Locale-independent real formatting and parsing.
pub use number::{format_real, parse_real};
/// Key path parser types.
pub use path::{KeyPath, PathStep};
/// Key interning.
pub use quark::{Quark, QuarkTable};
/// String payload representation.
pub use string::VariantStr;
/// Node type and kind tag.
pub use value::{Kind, Variant};
/// Iterative traversal engine.
pub use walk::{Visitor, walk, walk_dict, walk_list};
