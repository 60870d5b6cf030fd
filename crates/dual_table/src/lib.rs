//! dual_table - Lookup tables for dual isosurface construction
//!
//! This crate builds, for every sign configuration of a d-cube (d = 1..=4),
//! the set of isosurface patches a dual contouring pass places in the cell
//! and which patch each sign-changing edge belongs to. Each entry also
//! records whether the configuration is topologically ambiguous.
//!
//! # Features
//!
//! - **Configuration records**: patch count, bipolar edge mask and incident
//!   patch per edge for all `2^(2^d)` entries
//! - **Separation policy**: track positive or negative components, optionally
//!   splitting diagonally opposite vertex pairs
//! - **Ambiguity analysis**: per-facet and whole-cube ambiguity, active facet
//!   counts
//! - **Parallel build**: entries are independent and built on the rayon pool
//! - **Validation**: structural checks and sign-mirror comparison of two tables
//!
//! # Example
//!
//! ```ignore
//! use dual_table::{BuildFlags, DualTable};
//!
//! let table = DualTable::create(3, BuildFlags::DEFAULT)?;
//! table.validate()?;
//!
//! // Corners 0 and 3 positive: two patches, diagonal on facet z = 0.
//! let it = 0b0000_1001;
//! println!("{} patches, ambiguous = {}",
//!     table.patch_count(it)?, table.is_ambiguous(it)?);
//! ```

pub mod constants;
pub mod error;
pub mod geometry;
pub mod types;

// Re-export commonly used items
pub use constants::{MAX_DIMENSION, MAX_NUM_EDGES, MAX_NUM_FACETS, MAX_NUM_VERTICES};
pub use error::{Result, TableError, Violation};
pub use geometry::{CubeGeometry, PolytopeGeometry, EDGE_CORNERS};
pub use types::{
  compute_complement, is_positive, AmbiguityRecord, BuildConfig, BuildFlags,
  ConfigurationRecord, FacetIndex, FacetSet, PatchIndex, TableIndex,
};

// Connected components of same-sign vertices
pub mod components;
pub use components::ComponentFinder;

// Ambiguity classification
pub mod ambiguity;
pub use ambiguity::AmbiguityTable;

// Table construction
pub mod builder;
pub use builder::{TableBuilder, TableData};

// Query facade
pub mod table;
pub use table::DualTable;

// Build timings and table statistics
pub mod stats;
pub use stats::{BuildReport, TableStats};
