use super::*;
use crate::geometry::CubeGeometry;

// Reference count: union-find over edges with both endpoints in the class.
fn reference_count(cube: &CubeGeometry, ientry: TableIndex, positive: bool) -> usize {
  let n = cube.vertex_count();
  let mut parent: Vec<usize> = (0..n).collect();
  fn find(parent: &mut [usize], v: usize) -> usize {
    let mut root = v;
    while parent[root] != root {
      root = parent[root];
    }
    parent[v] = root;
    root
  }
  let in_class = |v: usize| is_positive(ientry, v) == positive;
  for &[a, b] in cube.edges() {
    if in_class(a) && in_class(b) {
      let ra = find(&mut parent, a);
      let rb = find(&mut parent, b);
      parent[ra] = rb;
    }
  }
  let mut roots: Vec<usize> = (0..n)
    .filter(|&v| in_class(v))
    .map(|v| find(&mut parent, v))
    .collect();
  roots.sort_unstable();
  roots.dedup();
  roots.len()
}

#[test]
fn test_set_and_negate_flags() {
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  finder.set_vertex_flags(0b0110);
  assert_eq!(
    (0..4).map(|v| finder.vertex_flag(v)).collect::<Vec<_>>(),
    vec![false, true, true, false]
  );
  finder.negate_vertex_flags();
  assert_eq!(
    (0..4).map(|v| finder.vertex_flag(v)).collect::<Vec<_>>(),
    vec![true, false, false, true]
  );
}

#[test]
fn test_search_assigns_reachable_flagged_vertices() {
  // Positive: 0, 1, 3 (an L through corner 1). Vertex 2 negative.
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  finder.set_vertex_flags(0b1011);
  finder.clear();
  finder.search(0, 7);
  assert_eq!(finder.components(), &[7, 7, 0, 7]);
}

#[test]
fn test_search_skips_unflagged_start() {
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  finder.set_vertex_flags(0b0001);
  finder.clear();
  finder.search(3, 1);
  assert!(finder.components().iter().all(|&c| c == 0));
}

#[test]
fn test_clear_resets_components() {
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  assert_eq!(finder.count_components(0b1111, true), 1);
  assert!(finder.components().iter().all(|&c| c == 1));
  finder.clear();
  assert!(finder.components().iter().all(|&c| c == 0));
}

#[test]
fn test_square_diagonal_has_two_components_per_class() {
  // Corners 0 and 3 positive, 1 and 2 negative.
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  assert_eq!(finder.count_components(0b1001, true), 2);
  assert_eq!(finder.component(0), 1);
  assert_eq!(finder.component(3), 2);
  assert_eq!(finder.count_components(0b1001, false), 2);
}

#[test]
fn test_single_corner() {
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  for v in 0..8 {
    let ientry = 1 << v;
    assert_eq!(finder.count_components(ientry, true), 1);
    assert_eq!(finder.count_components(ientry, false), 1);
  }
}

#[test]
fn test_uniform_configurations() {
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  assert_eq!(finder.count_components(0, true), 0);
  assert_eq!(finder.count_components(0, false), 1);
  assert_eq!(finder.count_components(0xFF, true), 1);
  assert_eq!(finder.count_components(0xFF, false), 0);
}

#[test]
fn test_matches_reference_exhaustive() {
  for d in 1..=4 {
    let cube = CubeGeometry::new(d).unwrap();
    let mut finder = ComponentFinder::new(&cube);
    // 4-cube: sample every 7th entry to keep the test quick.
    let step = if d == 4 { 7 } else { 1 };
    for ientry in (0..(1u32 << cube.vertex_count())).step_by(step) {
      for positive in [true, false] {
        assert_eq!(
          finder.count_components(ientry, positive),
          reference_count(&cube, ientry, positive),
          "{}-cube entry {:#b} positive={}",
          d,
          ientry,
          positive
        );
      }
    }
  }
}

#[test]
fn test_facet_components() {
  // 3-cube, positives 0 and 3: diagonal on the z = 0 facet (facet 2).
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  assert_eq!(finder.count_components_in_facet(0b1001, 2, true), 2);
  assert_eq!(finder.count_components_in_facet(0b1001, 2, false), 2);
  // On the x = 0 facet (vertices 0, 2, 4, 6) only vertex 0 is positive.
  assert_eq!(finder.count_components_in_facet(0b1001, 0, true), 1);
  assert_eq!(finder.count_components_in_facet(0b1001, 0, false), 1);
  // The z = 1 facet has no positive vertex.
  assert_eq!(finder.count_components_in_facet(0b1001, 5, true), 0);
}

#[test]
fn test_facet_search_stays_on_facet() {
  // Positives 0, 4, 5, 1: on facet y = 0 all four connect; restricted to
  // facet x = 0 only 0 and 4 are reachable.
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  let ientry = 0b0011_0011;
  assert_eq!(finder.count_components_in_facet(ientry, 1, true), 1);
  assert_eq!(finder.count_components_in_facet(ientry, 0, true), 1);
  assert_eq!(finder.component(0), 1);
  assert_eq!(finder.component(4), 1);
  assert_eq!(finder.component(1), 0, "vertex 1 is off facet x = 0");
}

#[test]
fn test_facet_connection_through_other_facet_is_ignored() {
  // Positives 0, 3 on z = 0, joined in the cube through 4, 5, 7.
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  let ientry = 0b1011_1001;
  assert_eq!(finder.count_components(ientry, true), 1);
  assert_eq!(finder.count_components_in_facet(ientry, 2, true), 2);
}
