//! Ambiguity classification of sign configurations.
//!
//! A configuration is ambiguous when more than one surface topology is
//! consistent with its signs. The classic 2D case is a square whose diagonally
//! opposite corners share a sign:
//!
//! ```text
//!   -───────+          -───────+
//!   │  ╲    │          │    ╱  │
//!   │    ╲  │    or    │  ╱    │
//!   +───────-          +───────-
//!   separate +         separate -
//! ```
//!
//! Tests used here:
//!
//! - **Facet**: the positive vertices of the facet split into more than one
//!   component using only facet edges.
//! - **Cube**: some facet is ambiguous, or the positive vertices of the whole
//!   cube form more than one component, or the negative vertices do. In
//!   either of the latter cases a per-facet decision cannot tell whether the
//!   disjoint regions connect through the cell interior.
//!
//! A facet is **active** when it holds both positive and negative vertices,
//! i.e. the isosurface crosses it.

use rayon::prelude::*;

use crate::components::ComponentFinder;
use crate::geometry::PolytopeGeometry;
use crate::types::{is_positive, AmbiguityRecord, FacetIndex, FacetSet, TableIndex};

/// True if the positive vertices of `facet` form more than one component
/// within the facet.
pub fn facet_is_ambiguous<G: PolytopeGeometry + ?Sized>(
  finder: &mut ComponentFinder<'_, G>,
  ientry: TableIndex,
  facet: usize,
) -> bool {
  finder.count_components_in_facet(ientry, facet, true) > 1
}

/// True if any facet is ambiguous or either sign class of the whole polytope
/// is disconnected.
pub fn cube_is_ambiguous<G: PolytopeGeometry + ?Sized>(
  finder: &mut ComponentFinder<'_, G>,
  ientry: TableIndex,
) -> bool {
  let num_facets = finder.geometry().facet_count();
  (0..num_facets).any(|f| facet_is_ambiguous(finder, ientry, f))
    || finder.count_components(ientry, true) > 1
    || finder.count_components(ientry, false) > 1
}

/// Ambiguous facets of `ientry` among the first `num_facets` facets, and
/// their count.
pub fn compute_ambiguous_facets<G: PolytopeGeometry + ?Sized>(
  finder: &mut ComponentFinder<'_, G>,
  ientry: TableIndex,
  num_facets: usize,
) -> (FacetSet, usize) {
  let mut facets = FacetSet::EMPTY;
  for f in 0..num_facets {
    if facet_is_ambiguous(finder, ientry, f) {
      facets.insert(f);
    }
  }
  (facets, facets.len())
}

/// Number of negative and positive vertices of `ientry` on `facet`.
pub fn facet_sign_counts<G: PolytopeGeometry + ?Sized>(
  geometry: &G,
  ientry: TableIndex,
  facet: usize,
) -> (usize, usize) {
  let positives = geometry
    .facet_vertices(facet)
    .iter()
    .filter(|&&v| is_positive(ientry, v))
    .count();
  (geometry.facet_vertices(facet).len() - positives, positives)
}

/// True if `facet` has both positive and negative vertices.
pub fn is_facet_active<G: PolytopeGeometry + ?Sized>(
  geometry: &G,
  ientry: TableIndex,
  facet: usize,
) -> bool {
  let (negatives, positives) = facet_sign_counts(geometry, ientry, facet);
  negatives > 0 && positives > 0
}

/// Number of facets crossed by the isosurface.
pub fn compute_active_facet_count<G: PolytopeGeometry + ?Sized>(
  geometry: &G,
  ientry: TableIndex,
) -> usize {
  (0..geometry.facet_count())
    .filter(|&f| is_facet_active(geometry, ientry, f))
    .count()
}

/// Ambiguity record of one configuration.
pub fn classify<G: PolytopeGeometry + ?Sized>(
  finder: &mut ComponentFinder<'_, G>,
  ientry: TableIndex,
) -> AmbiguityRecord {
  let geometry = finder.geometry();
  let (ambiguous_facets, num_ambiguous) =
    compute_ambiguous_facets(finder, ientry, geometry.facet_count());
  // Facet ambiguity is already known, only the whole-cube counts remain.
  let is_ambiguous = num_ambiguous > 0
    || finder.count_components(ientry, true) > 1
    || finder.count_components(ientry, false) > 1;

  AmbiguityRecord {
    is_ambiguous,
    ambiguous_facets,
    ambiguous_facet_count: num_ambiguous as FacetIndex,
    active_facet_count: compute_active_facet_count(geometry, ientry) as FacetIndex,
  }
}

/// Ambiguity records for every table index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbiguityTable {
  records: Box<[AmbiguityRecord]>,
}

impl AmbiguityTable {
  /// Classify all `2^V` configurations of `geometry`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "ambiguity::compute_all"))]
  pub fn compute_all<G: PolytopeGeometry + Sync + ?Sized>(geometry: &G, parallel: bool) -> Self {
    let entry_count = (1 as TableIndex) << geometry.vertex_count();

    let records = if parallel {
      (0..entry_count)
        .into_par_iter()
        .map_init(
          || ComponentFinder::new(geometry),
          |finder, it| classify(finder, it),
        )
        .collect::<Vec<_>>()
        .into_boxed_slice()
    } else {
      let mut finder = ComponentFinder::new(geometry);
      (0..entry_count)
        .map(|it| classify(&mut finder, it))
        .collect()
    };

    Self { records }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.records.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  #[inline]
  pub fn get(&self, it: TableIndex) -> Option<&AmbiguityRecord> {
    self.records.get(it as usize)
  }

  /// All records in table-index order.
  #[inline]
  pub fn records(&self) -> &[AmbiguityRecord] {
    &self.records
  }

  /// Number of ambiguous configurations.
  pub fn ambiguous_count(&self) -> usize {
    self.records.iter().filter(|r| r.is_ambiguous).count()
  }
}

#[cfg(test)]
#[path = "ambiguity_test.rs"]
mod ambiguity_test;
