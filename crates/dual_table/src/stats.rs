//! Build timings and whole-table statistics.
//!
//! # Usage
//!
//! ```ignore
//! use dual_table::{BuildFlags, DualTable, TableStats};
//!
//! let table = DualTable::create(3, BuildFlags::DEFAULT)?;
//! let report = table.build_report()?;
//! println!("built in {} us", report.total_us);
//!
//! let stats = TableStats::from_table(&table)?;
//! println!("{} of {} entries ambiguous", stats.ambiguous_entries, stats.entry_count);
//! ```

use crate::constants::{MAX_NUM_FACETS, MAX_NUM_VERTICES};
use crate::error::Result;
use crate::table::DualTable;

/// Timings of one table build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
  /// Configuration record construction in microseconds.
  pub records_us: u64,
  /// Ambiguity classification in microseconds.
  pub ambiguity_us: u64,
  /// Whole build in microseconds.
  pub total_us: u64,
  /// Entries were built on the rayon pool.
  pub parallel: bool,
  /// Rayon worker threads available to the build (1 if sequential).
  pub worker_threads: usize,
}

impl BuildReport {
  pub fn total_ms(&self) -> f64 {
    self.total_us as f64 / 1000.0
  }
}

/// Aggregate counts over every entry of a built table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
  pub dimension: usize,
  pub entry_count: usize,

  // Patches
  /// Entries per patch count (index = patch count).
  pub entries_per_patch_count: [u32; MAX_NUM_VERTICES + 1],
  pub max_patch_count: usize,
  /// Sum of patch counts over all entries.
  pub total_patches: u64,
  /// Sum of bipolar edge counts over all entries.
  pub total_bipolar_edges: u64,

  // Ambiguity
  pub ambiguous_entries: usize,
  /// Entries with at least one ambiguous facet.
  pub entries_with_ambiguous_facets: usize,
  /// Entries per active facet count (index = active facets).
  pub entries_per_active_facets: [u32; MAX_NUM_FACETS + 1],
}

impl Default for TableStats {
  fn default() -> Self {
    Self {
      dimension: 0,
      entry_count: 0,
      entries_per_patch_count: [0; MAX_NUM_VERTICES + 1],
      max_patch_count: 0,
      total_patches: 0,
      total_bipolar_edges: 0,
      ambiguous_entries: 0,
      entries_with_ambiguous_facets: 0,
      entries_per_active_facets: [0; MAX_NUM_FACETS + 1],
    }
  }
}

impl TableStats {
  /// Collect statistics from a built table.
  pub fn from_table(table: &DualTable) -> Result<Self> {
    let records = table.records()?;
    let ambiguity = table.ambiguity_table()?;

    let mut stats = Self {
      dimension: table.dimension().unwrap_or(0),
      entry_count: records.len(),
      ..Self::default()
    };

    for record in records {
      let patches = record.patch_count();
      stats.entries_per_patch_count[patches.min(MAX_NUM_VERTICES)] += 1;
      stats.max_patch_count = stats.max_patch_count.max(patches);
      stats.total_patches += patches as u64;
      stats.total_bipolar_edges += record.bipolar_edge_count() as u64;
    }

    for record in ambiguity.records() {
      if record.is_ambiguous {
        stats.ambiguous_entries += 1;
      }
      if !record.ambiguous_facets.is_empty() {
        stats.entries_with_ambiguous_facets += 1;
      }
      let active = (record.active_facet_count as usize).min(MAX_NUM_FACETS);
      stats.entries_per_active_facets[active] += 1;
    }

    Ok(stats)
  }

  /// Entries with more than one patch.
  pub fn multi_patch_entries(&self) -> u32 {
    self.entries_per_patch_count[2..].iter().sum()
  }

  /// Mean patch count per entry.
  pub fn average_patches(&self) -> f64 {
    if self.entry_count == 0 {
      0.0
    } else {
      self.total_patches as f64 / self.entry_count as f64
    }
  }

  /// Fraction of entries that are ambiguous.
  pub fn ambiguous_fraction(&self) -> f64 {
    if self.entry_count == 0 {
      0.0
    } else {
      self.ambiguous_entries as f64 / self.entry_count as f64
    }
  }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
