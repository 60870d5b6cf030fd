//! Core data types for dual isosurface configuration tables.

use smallvec::SmallVec;

use crate::constants::{INLINE_EDGES, MAX_NUM_FACETS, MAX_NUM_VERTICES};

/// Index of a table entry.
///
/// Bit `i` is the sign of polytope vertex `i`: 1 = positive (inside, at or
/// above the isovalue), 0 = negative (outside).
pub type TableIndex = u32;

/// Index of an isosurface patch (one dual isosurface vertex) inside a cell.
pub type PatchIndex = u8;

/// Index of a polytope facet.
pub type FacetIndex = u8;

/// Return the complement of table index `ival` (every sign flipped).
///
/// `entry_count` is the number of table entries (`2^V`).
#[inline(always)]
pub const fn compute_complement(ival: TableIndex, entry_count: usize) -> TableIndex {
  (entry_count - 1) as TableIndex - ival
}

/// True if vertex `vertex` is positive in configuration `ival`.
#[inline(always)]
pub const fn is_positive(ival: TableIndex, vertex: usize) -> bool {
  (ival >> vertex) & 1 == 1
}

/// Number of table entries for `num_vertices` vertices each taking one of
/// `num_colors` labels (`num_colors^num_vertices`).
///
/// Returns `None` if the count does not fit in `usize`.
pub fn calculate_entry_count(num_vertices: usize, num_colors: usize) -> Option<usize> {
  let exp = u32::try_from(num_vertices).ok()?;
  num_colors.checked_pow(exp)
}

/// Expand the low `num_flags` bits of `ival` into booleans.
pub fn index_to_flags(ival: TableIndex, num_flags: usize) -> SmallVec<[bool; MAX_NUM_VERTICES]> {
  (0..num_flags).map(|i| i < 32 && is_positive(ival, i)).collect()
}

/// Fixed-width bit set over facet indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FacetSet(u16);

impl FacetSet {
  /// Set with no facets.
  pub const EMPTY: Self = Self(0);

  /// Wrap raw facet bits (bit k = facet k).
  #[inline]
  pub const fn from_bits(bits: u16) -> Self {
    Self(bits)
  }

  /// Raw facet bits.
  #[inline]
  pub const fn bits(self) -> u16 {
    self.0
  }

  /// Add facet `facet` to the set.
  #[inline]
  pub fn insert(&mut self, facet: usize) {
    debug_assert!(facet < MAX_NUM_FACETS);
    self.0 |= 1 << facet;
  }

  #[inline]
  pub const fn contains(self, facet: usize) -> bool {
    facet < MAX_NUM_FACETS && (self.0 >> facet) & 1 == 1
  }

  #[inline]
  pub const fn len(self) -> usize {
    self.0.count_ones() as usize
  }

  #[inline]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Iterate over facet indices in increasing order.
  pub fn iter(self) -> impl Iterator<Item = usize> {
    (0..MAX_NUM_FACETS).filter(move |&f| self.contains(f))
  }
}

/// One entry of the configuration table.
///
/// The bipolar flags are an edge mask (bit e set = edge e is bipolar). The
/// incident patch list has one slot per polytope edge; slots of edges that
/// are not bipolar hold 0 and carry no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigurationRecord {
  pub(crate) patch_count: PatchIndex,
  pub(crate) bipolar_edges: u32,
  pub(crate) incident_patch: SmallVec<[PatchIndex; INLINE_EDGES]>,
}

impl ConfigurationRecord {
  /// Record with no patches and no bipolar edges.
  pub(crate) fn empty(num_edges: usize) -> Self {
    Self {
      patch_count: 0,
      bipolar_edges: 0,
      incident_patch: SmallVec::from_elem(0, num_edges),
    }
  }

  /// Number of isosurface patches (dual vertices) in the cell.
  #[inline]
  pub fn patch_count(&self) -> usize {
    self.patch_count as usize
  }

  /// True if polytope edge `edge` has endpoints of different signs.
  #[inline]
  pub fn is_bipolar(&self, edge: usize) -> bool {
    edge < 32 && (self.bipolar_edges >> edge) & 1 == 1
  }

  /// Bipolar edge mask (bit e = edge e).
  #[inline]
  pub fn bipolar_edges(&self) -> u32 {
    self.bipolar_edges
  }

  #[inline]
  pub fn bipolar_edge_count(&self) -> usize {
    self.bipolar_edges.count_ones() as usize
  }

  /// Patch dual to edge `edge`, or `None` if the edge is not bipolar.
  #[inline]
  pub fn incident_patch(&self, edge: usize) -> Option<PatchIndex> {
    if self.is_bipolar(edge) {
      self.incident_patch.get(edge).copied()
    } else {
      None
    }
  }

  /// Number of edge slots (polytope edge count).
  #[inline]
  pub fn edge_count(&self) -> usize {
    self.incident_patch.len()
  }
}

/// Ambiguity information derived from one table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmbiguityRecord {
  /// True if the configuration admits more than one consistent surface.
  pub is_ambiguous: bool,
  /// Facets whose positive vertices form several components.
  pub ambiguous_facets: FacetSet,
  pub ambiguous_facet_count: FacetIndex,
  /// Facets with both positive and negative vertices.
  pub active_facet_count: FacetIndex,
}

/// Policy flags controlling how same-sign components become patches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BuildFlags {
  /// Track components of negative vertices instead of positive ones.
  /// Positive vertices are then treated as one merged region.
  pub separate_negative: bool,

  /// Always give two diagonally opposite positive (or negative) vertices their
  /// own patches, even when the default tracking would merge them.
  pub always_separate_opposite: bool,
}

impl BuildFlags {
  /// Track positive components, no opposite-vertex override.
  pub const DEFAULT: Self = Self {
    separate_negative: false,
    always_separate_opposite: false,
  };

  /// Track negative components.
  pub const SEPARATE_NEGATIVE: Self = Self {
    separate_negative: true,
    always_separate_opposite: false,
  };

  /// Track positive components and split opposite vertex pairs.
  pub const SEPARATE_OPPOSITE: Self = Self {
    separate_negative: false,
    always_separate_opposite: true,
  };

  pub fn new(separate_negative: bool, always_separate_opposite: bool) -> Self {
    Self {
      separate_negative,
      always_separate_opposite,
    }
  }

  /// Same flags with the tracked sign class swapped.
  pub fn mirrored(self) -> Self {
    Self {
      separate_negative: !self.separate_negative,
      ..self
    }
  }
}

/// Resource limits and scheduling for table construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildConfig {
  /// Maximum polytope vertex count accepted (clamped to
  /// [`MAX_NUM_VERTICES`]).
  pub max_vertices: usize,

  /// Build entries on the rayon thread pool.
  pub parallel: bool,

  /// Table entries handed to a worker at a time.
  pub chunk_size: usize,
}

impl BuildConfig {
  /// Parallel construction up to the largest supported polytope.
  pub const DEFAULT: Self = Self {
    max_vertices: MAX_NUM_VERTICES,
    parallel: true,
    chunk_size: 1024,
  };

  /// Single-threaded construction.
  pub const SEQUENTIAL: Self = Self {
    max_vertices: MAX_NUM_VERTICES,
    parallel: false,
    chunk_size: 1024,
  };

  pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
    self.max_vertices = max_vertices;
    self
  }

  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  /// Effective vertex limit.
  #[inline]
  pub fn vertex_limit(&self) -> usize {
    self.max_vertices.min(MAX_NUM_VERTICES)
  }
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
