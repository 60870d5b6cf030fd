//! The dual isosurface configuration table.
//!
//! ```text
//! DualTable
//! ├── config      BuildConfig (vertex limit, parallelism)
//! ├── geometry    CubeGeometry, set by set_dimension / build
//! └── data        Option<TableData>, None until built / after release
//!     ├── records    [ConfigurationRecord; 2^V]
//!     ├── ambiguity  AmbiguityTable (one AmbiguityRecord per entry)
//!     ├── flags      BuildFlags used for the build
//!     └── report     BuildReport timings
//! ```
//!
//! Records and ambiguity data are built and released together, so they never
//! describe different builds. A failed build leaves the table unbuilt.
//!
//! Queries are O(1). They return [`TableError::NotBuilt`] before a successful
//! build and do not re-check table invariants; run [`DualTable::validate`]
//! once after building for that.

use crate::builder::{TableBuilder, TableData};
use crate::error::{Result, TableError, Violation};
use crate::geometry::{CubeGeometry, PolytopeGeometry};
use crate::stats::BuildReport;
use crate::types::{
  compute_complement, is_positive, AmbiguityRecord, BuildConfig, BuildFlags, ConfigurationRecord,
  FacetSet, PatchIndex, TableIndex,
};
use crate::ambiguity::AmbiguityTable;

/// Lookup table of dual isosurface patches for every sign configuration of a
/// cube.
#[derive(Clone, Debug, Default)]
pub struct DualTable {
  config: BuildConfig,
  geometry: Option<CubeGeometry>,
  data: Option<TableData>,
}

impl DualTable {
  /// Empty, unbuilt table with default limits.
  pub fn new() -> Self {
    Self::default()
  }

  /// Empty, unbuilt table using `config` for later builds.
  pub fn with_config(config: BuildConfig) -> Self {
    Self {
      config,
      geometry: None,
      data: None,
    }
  }

  /// Build a table for the d-cube in one step.
  pub fn create(dimension: usize, flags: BuildFlags) -> Result<Self> {
    let mut table = Self::new();
    table.build(dimension, flags)?;
    Ok(table)
  }

  /// Select the cube dimension without building entries.
  ///
  /// Any previously built entries are released.
  pub fn set_dimension(&mut self, dimension: usize) -> Result<()> {
    self.data = None;
    self.geometry = None;
    let builder = TableBuilder::with_config(dimension, BuildFlags::DEFAULT, self.config)?;
    self.geometry = Some(builder.geometry().clone());
    Ok(())
  }

  /// Build every entry for the d-cube under `flags`.
  ///
  /// On failure the table is left unbuilt.
  pub fn build(&mut self, dimension: usize, flags: BuildFlags) -> Result<()> {
    self.data = None;
    self.geometry = None;
    let builder = TableBuilder::with_config(dimension, flags, self.config)?;
    self.geometry = Some(builder.geometry().clone());
    self.data = Some(builder.build());
    Ok(())
  }

  /// Free all entries. Queries fail with [`TableError::NotBuilt`] until the
  /// next build; the dimension stays selected.
  pub fn release(&mut self) {
    self.data = None;
  }

  #[inline]
  pub fn is_built(&self) -> bool {
    self.data.is_some()
  }

  /// True if a table for the d-cube fits this table's vertex limit.
  pub fn check_dimension(&self, dimension: usize) -> bool {
    CubeGeometry::check_dimension(dimension)
      && (1usize << dimension) <= self.config.vertex_limit()
  }

  /// Largest polytope vertex count this table accepts.
  #[inline]
  pub fn max_vertex_count(&self) -> usize {
    self.config.vertex_limit()
  }

  #[inline]
  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  /// Geometry of the selected dimension.
  #[inline]
  pub fn geometry(&self) -> Option<&CubeGeometry> {
    self.geometry.as_ref()
  }

  #[inline]
  pub fn dimension(&self) -> Option<usize> {
    self.geometry.as_ref().map(|g| g.dimension())
  }

  #[inline]
  pub fn vertex_count(&self) -> Option<usize> {
    self.geometry.as_ref().map(|g| g.vertex_count())
  }

  #[inline]
  pub fn edge_count(&self) -> Option<usize> {
    self.geometry.as_ref().map(|g| g.edge_count())
  }

  #[inline]
  pub fn facet_count(&self) -> Option<usize> {
    self.geometry.as_ref().map(|g| g.facet_count())
  }

  // -------------------------------------------------------------------------
  // Entry queries
  // -------------------------------------------------------------------------

  /// Number of table entries (`2^V`).
  #[inline]
  pub fn entry_count(&self) -> Result<usize> {
    Ok(self.data()?.records.len())
  }

  /// Policy flags of the current build.
  #[inline]
  pub fn flags(&self) -> Result<BuildFlags> {
    Ok(self.data()?.flags)
  }

  /// Timings of the current build.
  #[inline]
  pub fn build_report(&self) -> Result<&BuildReport> {
    Ok(&self.data()?.report)
  }

  /// All configuration records in table-index order.
  #[inline]
  pub fn records(&self) -> Result<&[ConfigurationRecord]> {
    Ok(&self.data()?.records)
  }

  #[inline]
  pub fn ambiguity_table(&self) -> Result<&AmbiguityTable> {
    Ok(&self.data()?.ambiguity)
  }

  #[inline]
  pub fn entry(&self, it: TableIndex) -> Result<&ConfigurationRecord> {
    let data = self.data()?;
    data
      .records
      .get(it as usize)
      .ok_or(TableError::IndexOutOfRange {
        index: it,
        entry_count: data.records.len(),
      })
  }

  /// Index with every vertex sign flipped.
  #[inline]
  pub fn complement(&self, it: TableIndex) -> Result<TableIndex> {
    let entry_count = self.entry_count()?;
    check_index(it, entry_count)?;
    Ok(compute_complement(it, entry_count))
  }

  /// True if vertex `vertex` is positive in configuration `it`.
  #[inline]
  pub fn is_positive(&self, it: TableIndex, vertex: usize) -> Result<bool> {
    check_index(it, self.entry_count()?)?;
    Ok(is_positive(it, vertex))
  }

  /// Number of isosurface patches (dual vertices) for configuration `it`.
  #[inline]
  pub fn patch_count(&self, it: TableIndex) -> Result<usize> {
    Ok(self.entry(it)?.patch_count())
  }

  /// Patch dual to edge `edge`. Only meaningful when the edge is bipolar.
  ///
  /// # Panics
  ///
  /// If `edge` is not a polytope edge.
  #[inline]
  pub fn incident_patch(&self, it: TableIndex, edge: usize) -> Result<PatchIndex> {
    Ok(self.entry(it)?.incident_patch[edge])
  }

  /// True if edge `edge` has endpoints of different sign in configuration
  /// `it`.
  #[inline]
  pub fn is_bipolar(&self, it: TableIndex, edge: usize) -> Result<bool> {
    Ok(self.entry(it)?.is_bipolar(edge))
  }

  /// Bipolar edge mask of configuration `it`.
  #[inline]
  pub fn bipolar_edges(&self, it: TableIndex) -> Result<u32> {
    Ok(self.entry(it)?.bipolar_edges())
  }

  #[inline]
  pub fn bipolar_edge_count(&self, it: TableIndex) -> Result<usize> {
    Ok(self.entry(it)?.bipolar_edge_count())
  }

  // -------------------------------------------------------------------------
  // Ambiguity queries
  // -------------------------------------------------------------------------

  #[inline]
  pub fn ambiguity(&self, it: TableIndex) -> Result<&AmbiguityRecord> {
    let data = self.data()?;
    data.ambiguity.get(it).ok_or(TableError::IndexOutOfRange {
      index: it,
      entry_count: data.ambiguity.len(),
    })
  }

  #[inline]
  pub fn is_ambiguous(&self, it: TableIndex) -> Result<bool> {
    Ok(self.ambiguity(it)?.is_ambiguous)
  }

  #[inline]
  pub fn is_facet_ambiguous(&self, it: TableIndex, facet: usize) -> Result<bool> {
    Ok(self.ambiguity(it)?.ambiguous_facets.contains(facet))
  }

  #[inline]
  pub fn ambiguous_facets(&self, it: TableIndex) -> Result<FacetSet> {
    Ok(self.ambiguity(it)?.ambiguous_facets)
  }

  #[inline]
  pub fn ambiguous_facet_count(&self, it: TableIndex) -> Result<usize> {
    Ok(self.ambiguity(it)?.ambiguous_facet_count as usize)
  }

  #[inline]
  pub fn active_facet_count(&self, it: TableIndex) -> Result<usize> {
    Ok(self.ambiguity(it)?.active_facet_count as usize)
  }

  // -------------------------------------------------------------------------
  // Validation
  // -------------------------------------------------------------------------

  /// Check table size, bipolar flags, incident patch ranges and uniform
  /// entries. Reports the first violation found.
  pub fn validate(&self) -> Result<()> {
    let data = self.data()?;
    let cube = &data.geometry;
    let num_edges = cube.edge_count();
    let expected = 1usize << cube.vertex_count();

    for actual in [data.records.len(), data.ambiguity.len()] {
      if actual != expected {
        return Err(TableError::consistency(
          0,
          Violation::TableSize { expected, actual },
        ));
      }
    }

    let last = (expected - 1) as TableIndex;
    for (it, record) in data.records.iter().enumerate() {
      let it = it as TableIndex;
      if record.edge_count() != num_edges {
        return Err(TableError::consistency(
          it,
          Violation::EdgeCount {
            expected: num_edges,
            actual: record.edge_count(),
          },
        ));
      }

      let extra = record
        .bipolar_edges()
        .checked_shr(num_edges as u32)
        .unwrap_or(0);
      if extra != 0 {
        return Err(TableError::consistency(
          it,
          Violation::BipolarMismatch {
            edge: num_edges + extra.trailing_zeros() as usize,
            flag: true,
            expected: false,
          },
        ));
      }

      for edge in 0..num_edges {
        let [v0, v1] = cube.edge_endpoints(edge);
        let expected = is_positive(it, v0) != is_positive(it, v1);
        let flag = record.is_bipolar(edge);
        if flag != expected {
          return Err(TableError::consistency(
            it,
            Violation::BipolarMismatch {
              edge,
              flag,
              expected,
            },
          ));
        }

        let patch = record.incident_patch[edge] as usize;
        if flag && patch >= record.patch_count() {
          return Err(TableError::consistency(
            it,
            Violation::PatchOutOfRange {
              edge,
              patch,
              patch_count: record.patch_count(),
            },
          ));
        }
      }

      if (it == 0 || it == last) && record.patch_count() != 0 {
        return Err(TableError::consistency(
          it,
          Violation::UniformHasPatches {
            patch_count: record.patch_count(),
          },
        ));
      }
    }

    Ok(())
  }

  /// Check that `other`, built with the opposite tracked sign class, mirrors
  /// this table: entry `it` here equals entry `complement(it)` there.
  ///
  /// Holds for every dimension without `always_separate_opposite`; the
  /// opposite-pair override may break it, which is reported as a
  /// [`Violation::MirrorMismatch`].
  pub fn validate_mirror(&self, other: &DualTable) -> Result<()> {
    let data = self.data()?;
    let other_data = other.data()?;

    if data.geometry != other_data.geometry {
      return Err(TableError::consistency(
        0,
        Violation::Incompatible {
          reason: "different dimensions",
        },
      ));
    }
    if data.flags.separate_negative == other_data.flags.separate_negative {
      return Err(TableError::consistency(
        0,
        Violation::Incompatible {
          reason: "both tables track the same sign class",
        },
      ));
    }

    let entry_count = data.records.len();
    for (it, record) in data.records.iter().enumerate() {
      let it = it as TableIndex;
      let mirror = compute_complement(it, entry_count);
      let other_record = &other_data.records[mirror as usize];

      let same_patches = record.patch_count() == other_record.patch_count()
        && record.bipolar_edges() == other_record.bipolar_edges()
        && (0..record.edge_count())
          .filter(|&e| record.is_bipolar(e))
          .all(|e| record.incident_patch[e] == other_record.incident_patch[e]);

      if !same_patches {
        return Err(TableError::consistency(
          it,
          Violation::MirrorMismatch { mirror },
        ));
      }
    }

    Ok(())
  }

  #[inline]
  fn data(&self) -> Result<&TableData> {
    self.data.as_ref().ok_or(TableError::NotBuilt)
  }

  #[cfg(test)]
  pub(crate) fn data_mut(&mut self) -> Option<&mut TableData> {
    self.data.as_mut()
  }
}

#[inline]
fn check_index(it: TableIndex, entry_count: usize) -> Result<()> {
  if (it as usize) < entry_count {
    Ok(())
  } else {
    Err(TableError::IndexOutOfRange {
      index: it,
      entry_count,
    })
  }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;
