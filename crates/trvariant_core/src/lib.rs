//! Public library API for building, encoding, merging, and persisting variant trees.

/// Variant value model, traversal engine, wire codecs, and atomic file persistence.
pub mod variant;
