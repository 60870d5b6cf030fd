use super::*;

#[test]
fn test_max_vertices_matches_max_dimension() {
  assert_eq!(cube_vertex_count(MAX_DIMENSION), Some(MAX_NUM_VERTICES));
  assert_eq!(MAX_NUM_EDGES, 32);
  assert_eq!(MAX_NUM_FACETS, 8);
}

#[test]
fn test_cube_counts() {
  let expected = [(1, 2, 1, 2), (2, 4, 4, 4), (3, 8, 12, 6), (4, 16, 32, 8)];
  for (d, vertices, edges, facets) in expected {
    assert_eq!(cube_vertex_count(d), Some(vertices), "vertices of {}-cube", d);
    assert_eq!(cube_edge_count(d), edges, "edges of {}-cube", d);
    assert_eq!(cube_facet_count(d), facets, "facets of {}-cube", d);
  }
}

#[test]
fn test_zero_dimension() {
  assert_eq!(cube_vertex_count(0), Some(1));
  assert_eq!(cube_edge_count(0), 0);
  assert_eq!(cube_facet_count(0), 0);
}

#[test]
fn test_vertex_count_overflow() {
  assert_eq!(cube_vertex_count(usize::BITS as usize), None);
  assert_eq!(cube_vertex_count(1000), None);
}
