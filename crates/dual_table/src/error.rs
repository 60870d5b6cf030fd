//! Error type for table construction, queries and validation.

use thiserror::Error;

use crate::types::TableIndex;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors reported by configuration tables.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TableError {
  /// The requested polytope has more vertices than a table can index, or the
  /// dimension is zero.
  #[error("unsupported dimension {dimension}: polytope must have 2 to {max_vertices} vertices")]
  Dimension {
    dimension: usize,
    /// `None` if the vertex count itself overflows.
    vertex_count: Option<usize>,
    max_vertices: usize,
  },

  /// A query was issued before a successful build (or after release).
  #[error("configuration table has not been built")]
  NotBuilt,

  /// A table index past the last entry.
  #[error("table index {index} out of range (table has {entry_count} entries)")]
  IndexOutOfRange { index: TableIndex, entry_count: usize },

  /// Validation found an invariant violation.
  #[error("table entry {index}: {violation}")]
  Consistency {
    index: TableIndex,
    violation: Violation,
  },
}

/// Invariant violated by a table entry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Violation {
  #[error("table holds {actual} entries, expected {expected}")]
  TableSize { expected: usize, actual: usize },

  #[error("record has {actual} edge slots, polytope has {expected} edges")]
  EdgeCount { expected: usize, actual: usize },

  #[error("edge {edge} bipolar flag is {flag} but endpoint signs say {expected}")]
  BipolarMismatch {
    edge: usize,
    flag: bool,
    expected: bool,
  },

  #[error("edge {edge} is dual to patch {patch}, entry only has {patch_count} patches")]
  PatchOutOfRange {
    edge: usize,
    patch: usize,
    patch_count: usize,
  },

  #[error("uniform configuration has {patch_count} patches")]
  UniformHasPatches { patch_count: usize },

  #[error("mirror entry {mirror} differs from entry")]
  MirrorMismatch { mirror: TableIndex },

  #[error("tables disagree on dimension or policy: {reason}")]
  Incompatible { reason: &'static str },
}

impl TableError {
  pub(crate) fn consistency(index: TableIndex, violation: Violation) -> Self {
    Self::Consistency { index, violation }
  }
}
