//! Construction of dual isosurface table entries.
//!
//! # Per-entry algorithm
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ 1. Tracked class                                                │
//! │    positive vertices        (default)                           │
//! │    negative vertices        (separate_negative)                 │
//! │    opposite-pair override   (always_separate_opposite)          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ 2. Components of the tracked class (ComponentFinder)            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ 3. For every edge with endpoints of different sign:             │
//! │      mark bipolar                                               │
//! │      dual patch = component of the tracked endpoint             │
//! │    Components touching a bipolar edge are numbered 0, 1, ...    │
//! │    in component order; uniform entries get no patches.          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The untracked class is treated as one merged region: every patch separates
//! one tracked component from it.
//!
//! Entries are independent, so the whole index range is built on the rayon
//! pool with one [`ComponentFinder`] per worker.

use rayon::prelude::*;
use smallvec::SmallVec;
use web_time::Instant;

use crate::ambiguity::AmbiguityTable;
use crate::components::ComponentFinder;
use crate::constants::MAX_NUM_VERTICES;
use crate::error::{Result, TableError};
use crate::geometry::{CubeGeometry, PolytopeGeometry};
use crate::stats::BuildReport;
use crate::types::{
  is_positive, BuildConfig, BuildFlags, ConfigurationRecord, PatchIndex, TableIndex,
};

/// Fully built table contents: records, ambiguity data and build timings.
#[derive(Clone, Debug)]
pub struct TableData {
  pub(crate) geometry: CubeGeometry,
  pub(crate) flags: BuildFlags,
  pub(crate) records: Box<[ConfigurationRecord]>,
  pub(crate) ambiguity: AmbiguityTable,
  pub(crate) report: BuildReport,
}

/// Builds every entry of a cube configuration table.
pub struct TableBuilder {
  geometry: CubeGeometry,
  flags: BuildFlags,
  config: BuildConfig,
}

impl TableBuilder {
  /// Builder for the d-cube with default resource limits.
  pub fn new(dimension: usize, flags: BuildFlags) -> Result<Self> {
    Self::with_config(dimension, flags, BuildConfig::default())
  }

  /// Builder for the d-cube.
  ///
  /// Fails with [`TableError::Dimension`] if the cube has more vertices than
  /// `config` allows.
  pub fn with_config(dimension: usize, flags: BuildFlags, config: BuildConfig) -> Result<Self> {
    let geometry = CubeGeometry::new(dimension)?;
    let limit = config.vertex_limit();
    if geometry.vertex_count() > limit {
      return Err(TableError::Dimension {
        dimension,
        vertex_count: Some(geometry.vertex_count()),
        max_vertices: limit,
      });
    }

    Ok(Self {
      geometry,
      flags,
      config,
    })
  }

  #[inline]
  pub fn geometry(&self) -> &CubeGeometry {
    &self.geometry
  }

  #[inline]
  pub fn flags(&self) -> BuildFlags {
    self.flags
  }

  /// Number of entries the table will hold (`2^V`).
  #[inline]
  pub fn entry_count(&self) -> usize {
    1 << self.geometry.vertex_count()
  }

  /// Compute the configuration record of every table index.
  pub fn build_records(&self) -> Box<[ConfigurationRecord]> {
    let entry_count = self.entry_count() as TableIndex;
    let flags = self.flags;

    if self.config.parallel {
      (0..entry_count)
        .into_par_iter()
        .with_min_len(self.config.chunk_size.max(1))
        .map_init(
          || ComponentFinder::new(&self.geometry),
          |finder, it| compute_record(finder, it, flags),
        )
        .collect::<Vec<_>>()
        .into_boxed_slice()
    } else {
      let mut finder = ComponentFinder::new(&self.geometry);
      (0..entry_count)
        .map(|it| compute_record(&mut finder, it, flags))
        .collect()
    }
  }

  /// Build records and ambiguity information.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "table::build"))]
  pub fn build(self) -> TableData {
    let start = Instant::now();

    let records = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("configuration_records").entered();
      self.build_records()
    };
    let records_us = start.elapsed().as_micros() as u64;

    let ambiguity_start = Instant::now();
    let ambiguity = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("ambiguity").entered();
      AmbiguityTable::compute_all(&self.geometry, self.config.parallel)
    };
    let ambiguity_us = ambiguity_start.elapsed().as_micros() as u64;

    let report = BuildReport {
      records_us,
      ambiguity_us,
      total_us: start.elapsed().as_micros() as u64,
      parallel: self.config.parallel,
      worker_threads: if self.config.parallel {
        rayon::current_num_threads()
      } else {
        1
      },
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
      dimension = self.geometry.dimension(),
      entries = records.len(),
      ambiguous = ambiguity.ambiguous_count(),
      records_us,
      ambiguity_us,
      "built dual table"
    );

    TableData {
      geometry: self.geometry,
      flags: self.flags,
      records,
      ambiguity,
      report,
    }
  }
}

/// True if the positive vertices of `ientry` are tracked (become patches)
/// under `flags`.
pub fn tracks_positive(cube: &CubeGeometry, ientry: TableIndex, flags: BuildFlags) -> bool {
  if flags.always_separate_opposite {
    let all = ((1u64 << cube.vertex_count()) - 1) as TableIndex;
    if is_opposite_pair(cube, ientry) {
      return true;
    }
    if is_opposite_pair(cube, !ientry & all) {
      return false;
    }
  }
  !flags.separate_negative
}

/// True if `mask` holds exactly two vertices and they are diagonally opposite.
pub fn is_opposite_pair(cube: &CubeGeometry, mask: TableIndex) -> bool {
  if mask.count_ones() != 2 {
    return false;
  }
  let v0 = mask.trailing_zeros() as usize;
  let v1 = (TableIndex::BITS - 1 - mask.leading_zeros()) as usize;
  cube.opposite_vertex(v0) == v1
}

/// Compute the record for one table index.
pub fn compute_record(
  finder: &mut ComponentFinder<'_, CubeGeometry>,
  ientry: TableIndex,
  flags: BuildFlags,
) -> ConfigurationRecord {
  let cube = finder.geometry();
  let num_edges = cube.edge_count();
  let mut record = ConfigurationRecord::empty(num_edges);

  let track_positive = tracks_positive(cube, ientry, flags);
  let num_components = finder.count_components(ientry, track_positive);

  // Component (1-based) of the tracked endpoint of each bipolar edge.
  let mut borders: SmallVec<[bool; MAX_NUM_VERTICES + 1]> =
    SmallVec::from_elem(false, num_components + 1);
  for edge in 0..num_edges {
    let [v0, v1] = cube.edge_endpoints(edge);
    if is_positive(ientry, v0) != is_positive(ientry, v1) {
      record.bipolar_edges |= 1 << edge;
      borders[finder.component(tracked_endpoint(finder, v0, v1))] = true;
    }
  }

  let mut patch_of: SmallVec<[PatchIndex; MAX_NUM_VERTICES + 1]> =
    SmallVec::from_elem(0, num_components + 1);
  let mut patch_count: PatchIndex = 0;
  for id in 1..=num_components {
    if borders[id] {
      patch_of[id] = patch_count;
      patch_count += 1;
    }
  }

  for edge in 0..num_edges {
    if record.is_bipolar(edge) {
      let [v0, v1] = cube.edge_endpoints(edge);
      let id = finder.component(tracked_endpoint(finder, v0, v1));
      record.incident_patch[edge] = patch_of[id];
    }
  }
  record.patch_count = patch_count;

  record
}

#[inline]
fn tracked_endpoint(
  finder: &ComponentFinder<'_, CubeGeometry>,
  v0: usize,
  v1: usize,
) -> usize {
  if finder.vertex_flag(v0) {
    v0
  } else {
    v1
  }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
