//! Hypercube vertex, edge and facet enumeration.
//!
//! # Cube Topology
//!
//! Vertex `v` of the d-cube sits at the point whose k-th coordinate is bit k
//! of `v`. For d = 3:
//!
//! ```text
//!       6──────7         Corners (binary ZYX):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(0,1,0)  3=(1,1,0)
//!     4─┼────5 │           4=(0,0,1)  5=(1,0,1)  6=(0,1,1)  7=(1,1,1)
//!     │ 2────┼─3
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! # Edge Layout
//!
//! Edges are listed by lower endpoint, then by axis. Edge `[v, v | 1 << k]`
//! exists for every vertex `v` with bit k clear. For d = 3 this gives the
//! 12-edge order of [`EDGE_CORNERS`].
//!
//! # Facet Layout
//!
//! ```text
//! Facet f lies on axis f % d:
//!   f <  d  → lower facet (bit f % d == 0)
//!   f >= d  → upper facet (bit f % d == 1)
//!
//! 3-cube: 0 = x=0   1 = y=0   2 = z=0
//!         3 = x=1   4 = y=1   5 = z=1
//! ```

use smallvec::SmallVec;

use crate::constants::{cube_edge_count, cube_vertex_count, MAX_NUM_VERTICES};
use crate::error::{Result, TableError};
use crate::types::TableIndex;

/// Edge endpoint corner indices of the 3-cube.
///
/// Corner layout (binary: ZYX):
/// - 0 = (0,0,0)
/// - 1 = (1,0,0)
/// - 2 = (0,1,0)
/// - 3 = (1,1,0)
/// - 4 = (0,0,1)
/// - 5 = (1,0,1)
/// - 6 = (0,1,1)
/// - 7 = (1,1,1)
pub const EDGE_CORNERS: [[u8; 2]; 12] = [
  [0, 1], // Edge 0:  X axis at Y=0, Z=0
  [0, 2], // Edge 1:  Y axis at X=0, Z=0
  [0, 4], // Edge 2:  Z axis at X=0, Y=0
  [1, 3], // Edge 3:  Y axis at X=1, Z=0
  [1, 5], // Edge 4:  Z axis at X=1, Y=0
  [2, 3], // Edge 5:  X axis at Y=1, Z=0
  [2, 6], // Edge 6:  Z axis at X=0, Y=1
  [3, 7], // Edge 7:  Z axis at X=1, Y=1
  [4, 5], // Edge 8:  X axis at Y=0, Z=1
  [4, 6], // Edge 9:  Y axis at X=0, Z=1
  [5, 7], // Edge 10: Y axis at X=1, Z=1
  [6, 7], // Edge 11: X axis at Y=1, Z=1
];

/// Vertex/edge/facet incidence of a polytope.
///
/// Vertex indices are bit positions of a [`TableIndex`], so a polytope may
/// have at most [`MAX_NUM_VERTICES`] vertices.
pub trait PolytopeGeometry {
  fn dimension(&self) -> usize;

  fn vertex_count(&self) -> usize;

  fn edge_count(&self) -> usize;

  fn facet_count(&self) -> usize;

  /// The two endpoints of edge `edge`.
  fn edge_endpoints(&self, edge: usize) -> [usize; 2];

  /// Vertices of facet `facet` in increasing order.
  fn facet_vertices(&self, facet: usize) -> &[usize];

  /// True if facet `facet` contains vertex `vertex`.
  fn facet_contains(&self, facet: usize, vertex: usize) -> bool {
    self.facet_vertices(facet).contains(&vertex)
  }

  /// Facet vertices as a bit mask over vertex indices.
  fn facet_mask(&self, facet: usize) -> TableIndex {
    self
      .facet_vertices(facet)
      .iter()
      .fold(0, |mask, &v| mask | (1 << v))
  }
}

/// The d-dimensional unit hypercube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CubeGeometry {
  dimension: usize,
  num_vertices: usize,
  edges: Vec<[usize; 2]>,
  facets: Vec<SmallVec<[usize; MAX_NUM_VERTICES / 2]>>,
}

impl CubeGeometry {
  /// Enumerate the d-cube.
  ///
  /// Fails with [`TableError::Dimension`] for d = 0 or when the cube has more
  /// than [`MAX_NUM_VERTICES`] vertices.
  pub fn new(dimension: usize) -> Result<Self> {
    let vertex_count = cube_vertex_count(dimension);
    match vertex_count {
      Some(n) if dimension >= 1 && n <= MAX_NUM_VERTICES => {}
      _ => {
        return Err(TableError::Dimension {
          dimension,
          vertex_count,
          max_vertices: MAX_NUM_VERTICES,
        })
      }
    }
    let num_vertices = 1usize << dimension;

    let mut edges = Vec::with_capacity(cube_edge_count(dimension));
    for v in 0..num_vertices {
      for axis in 0..dimension {
        let bit = 1 << axis;
        if v & bit == 0 {
          edges.push([v, v | bit]);
        }
      }
    }

    let facets: Vec<SmallVec<[usize; MAX_NUM_VERTICES / 2]>> = (0..2 * dimension)
      .map(|f| {
        let axis = f % dimension;
        let side = f / dimension;
        (0..num_vertices)
          .filter(|&v| (v >> axis) & 1 == side)
          .collect()
      })
      .collect();

    Ok(Self {
      dimension,
      num_vertices,
      edges,
      facets,
    })
  }

  /// Check whether a table for the d-cube is supported.
  pub fn check_dimension(dimension: usize) -> bool {
    dimension >= 1 && matches!(cube_vertex_count(dimension), Some(n) if n <= MAX_NUM_VERTICES)
  }

  /// Vertex diagonally opposite `vertex` (every coordinate flipped).
  #[inline]
  pub fn opposite_vertex(&self, vertex: usize) -> usize {
    vertex ^ (self.num_vertices - 1)
  }

  /// Axis parallel to edge `edge`.
  #[inline]
  pub fn edge_direction(&self, edge: usize) -> usize {
    let [v0, v1] = self.edges[edge];
    (v0 ^ v1).trailing_zeros() as usize
  }

  /// Axis orthogonal to facet `facet`.
  #[inline]
  pub fn facet_axis(&self, facet: usize) -> usize {
    facet % self.dimension
  }

  /// Number of vertices on each facet (`2^(d-1)`).
  #[inline]
  pub fn facet_vertex_count(&self) -> usize {
    self.num_vertices / 2
  }

  /// All edges in table order.
  pub fn edges(&self) -> &[[usize; 2]] {
    &self.edges
  }
}

impl PolytopeGeometry for CubeGeometry {
  #[inline]
  fn dimension(&self) -> usize {
    self.dimension
  }

  #[inline]
  fn vertex_count(&self) -> usize {
    self.num_vertices
  }

  #[inline]
  fn edge_count(&self) -> usize {
    self.edges.len()
  }

  #[inline]
  fn facet_count(&self) -> usize {
    self.facets.len()
  }

  #[inline]
  fn edge_endpoints(&self, edge: usize) -> [usize; 2] {
    self.edges[edge]
  }

  #[inline]
  fn facet_vertices(&self, facet: usize) -> &[usize] {
    &self.facets[facet]
  }

  #[inline]
  fn facet_contains(&self, facet: usize, vertex: usize) -> bool {
    let axis = facet % self.dimension;
    let side = facet / self.dimension;
    (vertex >> axis) & 1 == side
  }
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;
