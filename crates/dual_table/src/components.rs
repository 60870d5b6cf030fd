//! Connected components of same-sign polytope vertices.
//!
//! The analyzer keeps two scratch arrays sized to the polytope:
//!
//! ```text
//! vertex_flag[v]  true if v belongs to the sign class being searched
//! component[v]    component id of v, 0 = not yet visited
//! ```
//!
//! A search flood-fills over polytope edges, visiting only flagged vertices
//! that have not been assigned a component. Component ids start at 1.
//!
//! The scratch arrays are mutated in place, so one analyzer serves one thread.
//! Parallel table builds create one analyzer per worker.

use smallvec::SmallVec;

use crate::constants::INLINE_NEIGHBORS;
use crate::geometry::PolytopeGeometry;
use crate::types::{is_positive, TableIndex};

/// Reusable connected-component search over the vertices of a polytope.
pub struct ComponentFinder<'g, G: PolytopeGeometry + ?Sized> {
  geometry: &'g G,
  /// Neighbors of each vertex along polytope edges.
  adjacency: Vec<SmallVec<[usize; INLINE_NEIGHBORS]>>,
  vertex_flag: Vec<bool>,
  component: Vec<usize>,
  /// Flood-fill work list.
  stack: Vec<usize>,
}

impl<'g, G: PolytopeGeometry + ?Sized> ComponentFinder<'g, G> {
  /// Create an analyzer with all flags cleared and all vertices unvisited.
  pub fn new(geometry: &'g G) -> Self {
    let num_vertices = geometry.vertex_count();
    let mut adjacency = vec![SmallVec::new(); num_vertices];
    for edge in 0..geometry.edge_count() {
      let [v0, v1] = geometry.edge_endpoints(edge);
      adjacency[v0].push(v1);
      adjacency[v1].push(v0);
    }

    Self {
      geometry,
      adjacency,
      vertex_flag: vec![false; num_vertices],
      component: vec![0; num_vertices],
      stack: Vec::with_capacity(num_vertices),
    }
  }

  /// Geometry the analyzer searches over.
  #[inline]
  pub fn geometry(&self) -> &'g G {
    self.geometry
  }

  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.vertex_flag.len()
  }

  /// Set `vertex_flag[v]` to bit v of `ival`.
  pub fn set_vertex_flags(&mut self, ival: TableIndex) {
    for (v, flag) in self.vertex_flag.iter_mut().enumerate() {
      *flag = is_positive(ival, v);
    }
  }

  /// Flip every vertex flag (switch between positive and negative classes).
  pub fn negate_vertex_flags(&mut self) {
    for flag in &mut self.vertex_flag {
      *flag = !*flag;
    }
  }

  /// Mark every vertex unvisited.
  pub fn clear(&mut self) {
    self.component.fill(0);
  }

  #[inline]
  pub fn vertex_flag(&self, vertex: usize) -> bool {
    self.vertex_flag[vertex]
  }

  /// Component id of `vertex` (0 = unvisited).
  #[inline]
  pub fn component(&self, vertex: usize) -> usize {
    self.component[vertex]
  }

  /// Component ids of all vertices.
  #[inline]
  pub fn components(&self) -> &[usize] {
    &self.component
  }

  /// Assign component `id` to every flagged, unvisited vertex reachable from
  /// `vertex`.
  ///
  /// Does nothing if `vertex` itself is unflagged or already visited.
  pub fn search(&mut self, vertex: usize, id: usize) {
    debug_assert_ne!(id, 0, "component id 0 marks unvisited vertices");
    self.flood(vertex, id, None);
  }

  /// Like [`search`](Self::search), restricted to the vertices of `facet`.
  ///
  /// `vertex` must lie on `facet`.
  pub fn search_facet(&mut self, facet: usize, vertex: usize, id: usize) {
    debug_assert_ne!(id, 0, "component id 0 marks unvisited vertices");
    debug_assert!(self.geometry.facet_contains(facet, vertex));
    self.flood(vertex, id, Some(facet));
  }

  /// Number of connected components of the positive (or negative) vertices
  /// of `ientry`.
  ///
  /// Leaves the component ids of the searched class in place for inspection.
  pub fn count_components(&mut self, ientry: TableIndex, use_positive: bool) -> usize {
    self.prepare(ientry, use_positive);

    let mut next_id = 1;
    for v in 0..self.vertex_count() {
      if self.vertex_flag[v] && self.component[v] == 0 {
        self.search(v, next_id);
        next_id += 1;
      }
    }
    next_id - 1
  }

  /// Number of connected components of the positive (or negative) vertices
  /// of `ientry` lying on `facet`, using only edges inside the facet.
  pub fn count_components_in_facet(
    &mut self,
    ientry: TableIndex,
    facet: usize,
    use_positive: bool,
  ) -> usize {
    self.prepare(ientry, use_positive);

    let mut next_id = 1;
    let geometry = self.geometry;
    for &v in geometry.facet_vertices(facet) {
      if self.vertex_flag[v] && self.component[v] == 0 {
        self.search_facet(facet, v, next_id);
        next_id += 1;
      }
    }
    next_id - 1
  }

  fn prepare(&mut self, ientry: TableIndex, use_positive: bool) {
    self.set_vertex_flags(ientry);
    if !use_positive {
      self.negate_vertex_flags();
    }
    self.clear();
  }

  fn flood(&mut self, start: usize, id: usize, facet: Option<usize>) {
    if !self.vertex_flag[start] || self.component[start] != 0 {
      return;
    }

    self.component[start] = id;
    self.stack.clear();
    self.stack.push(start);

    while let Some(v) = self.stack.pop() {
      for &w in &self.adjacency[v] {
        if !self.vertex_flag[w] || self.component[w] != 0 {
          continue;
        }
        if let Some(f) = facet {
          if !self.geometry.facet_contains(f, w) {
            continue;
          }
        }
        self.component[w] = id;
        self.stack.push(w);
      }
    }
  }
}

#[cfg(test)]
#[path = "components_test.rs"]
mod components_test;
