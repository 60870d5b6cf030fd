//! Supported limits for configuration tables.
//!
//! A table over a polytope with `V` vertices has `2^V` entries, one per
//! assignment of +/- signs to the vertices. The entry count doubles with every
//! extra vertex and squares with every extra cube dimension:
//!
//! ```text
//! ┌───────────┬──────────┬───────┬────────┬───────────────┐
//! │ Dimension │ Vertices │ Edges │ Facets │ Table entries │
//! ├───────────┼──────────┼───────┼────────┼───────────────┤
//! │     1     │     2    │    1  │    2   │             4 │
//! │     2     │     4    │    4  │    4   │            16 │
//! │     3     │     8    │   12  │    6   │           256 │
//! │     4     │    16    │   32  │    8   │        65 536 │
//! │     5     │    32    │   80  │   10   │ 4 294 967 296 │  ← rejected
//! └───────────┴──────────┴───────┴────────┴───────────────┘
//! ```
//!
//! The 4-cube is the largest supported polytope. Its 32 edges fit exactly in
//! the `u32` bipolar edge mask and its 8 facets in the `u16` facet set.

/// Largest number of polytope vertices a table may be built for.
///
/// Every vertex is one bit of a [`TableIndex`](crate::types::TableIndex), and
/// the table allocates one record per index.
pub const MAX_NUM_VERTICES: usize = 16;

/// Largest supported cube dimension (2^4 = 16 vertices).
pub const MAX_DIMENSION: usize = 4;

/// Largest number of polytope edges (4-cube: 4 * 2^3 = 32).
pub const MAX_NUM_EDGES: usize = MAX_DIMENSION << (MAX_DIMENSION - 1);

/// Largest number of facets (4-cube: 2 * 4 = 8).
pub const MAX_NUM_FACETS: usize = 2 * MAX_DIMENSION;

/// Number of edges stored inline in a record before spilling to the heap
/// (3-cube edge count).
pub const INLINE_EDGES: usize = 12;

/// Number of vertex neighbors stored inline in adjacency lists.
pub const INLINE_NEIGHBORS: usize = MAX_DIMENSION;

/// Number of vertices of the d-cube, or `None` if `2^d` overflows `usize`.
#[inline]
pub const fn cube_vertex_count(dimension: usize) -> Option<usize> {
  if dimension >= usize::BITS as usize {
    None
  } else {
    Some(1 << dimension)
  }
}

/// Number of edges of the d-cube (`d * 2^(d-1)`).
#[inline]
pub const fn cube_edge_count(dimension: usize) -> usize {
  if dimension == 0 {
    0
  } else {
    dimension << (dimension - 1)
  }
}

/// Number of facets of the d-cube (`2d`).
#[inline]
pub const fn cube_facet_count(dimension: usize) -> usize {
  2 * dimension
}

// Record layout relies on these bounds.
const _: () = assert!(MAX_NUM_VERTICES == 1 << MAX_DIMENSION);
const _: () = assert!(MAX_NUM_EDGES <= u32::BITS as usize);
const _: () = assert!(MAX_NUM_FACETS <= u16::BITS as usize);
const _: () = assert!(MAX_NUM_VERTICES < u32::BITS as usize);

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
