use super::*;
use crate::geometry::CubeGeometry;
use crate::types::compute_complement;

// =========================================================================
// Square (2-cube)
// =========================================================================

/// Opposite corners 0 and 3 positive, 1 and 2 negative.
#[test]
fn test_square_diagonal_is_ambiguous() {
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  assert!(cube_is_ambiguous(&mut finder, 0b1001));
  assert!(cube_is_ambiguous(&mut finder, 0b0110));
}

#[test]
fn test_square_single_corner_is_not_ambiguous() {
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  for v in 0..4 {
    assert!(!cube_is_ambiguous(&mut finder, 1 << v), "corner {}", v);
  }
}

/// Only the two diagonal configurations of a square are ambiguous.
#[test]
fn test_square_ambiguous_set() {
  let square = CubeGeometry::new(2).unwrap();
  let table = AmbiguityTable::compute_all(&square, false);
  let ambiguous: Vec<TableIndex> = (0..16)
    .filter(|&it| table.get(it).unwrap().is_ambiguous)
    .collect();
  assert_eq!(ambiguous, vec![0b0110, 0b1001]);
  assert_eq!(table.ambiguous_count(), 2);
}

/// Square facets are edges; two vertices on an edge are always adjacent.
#[test]
fn test_square_facets_never_ambiguous() {
  let square = CubeGeometry::new(2).unwrap();
  let mut finder = ComponentFinder::new(&square);
  for it in 0..16 {
    let (facets, count) = compute_ambiguous_facets(&mut finder, it, square.facet_count());
    assert!(facets.is_empty());
    assert_eq!(count, 0);
  }
}

#[test]
fn test_facet_sign_counts() {
  let square = CubeGeometry::new(2).unwrap();
  // Facet 0 holds vertices 0 and 2.
  assert_eq!(facet_sign_counts(&square, 0b0001, 0), (1, 1));
  assert_eq!(facet_sign_counts(&square, 0b0101, 0), (0, 2));
  assert_eq!(facet_sign_counts(&square, 0b0000, 0), (2, 0));
  assert!(is_facet_active(&square, 0b0001, 0));
  assert!(!is_facet_active(&square, 0b0001, 3));
}

// =========================================================================
// Cube (3-cube)
// =========================================================================

#[test]
fn test_cube_face_diagonal() {
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  let it = 0b0000_1001; // corners 0 and 3, diagonal of facet z = 0

  assert!(facet_is_ambiguous(&mut finder, it, 2));
  let (facets, count) = compute_ambiguous_facets(&mut finder, it, cube.facet_count());
  assert_eq!(facets.bits(), 1 << 2);
  assert_eq!(count, 1);
  assert!(cube_is_ambiguous(&mut finder, it));
  // Every facet except z = 1 sees both signs.
  assert_eq!(compute_active_facet_count(&cube, it), 5);
}

/// Corners 0 and 7 share no facet, so only the whole-cube test fires.
#[test]
fn test_cube_body_diagonal() {
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  let it = 0b1000_0001;

  let (facets, _) = compute_ambiguous_facets(&mut finder, it, cube.facet_count());
  assert!(facets.is_empty());
  assert!(cube_is_ambiguous(&mut finder, it));
  assert_eq!(compute_active_facet_count(&cube, it), 6);
}

#[test]
fn test_cube_single_corner() {
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  let record = classify(&mut finder, 0b0000_0001);
  assert!(!record.is_ambiguous);
  assert_eq!(record.ambiguous_facet_count, 0);
  assert_eq!(record.active_facet_count, 3);
}

#[test]
fn test_uniform_entries() {
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  for it in [0, 0xFF] {
    let record = classify(&mut finder, it);
    assert_eq!(record, AmbiguityRecord::default());
  }
}

/// The combined record agrees with the individual tests.
#[test]
fn test_classify_matches_individual_tests() {
  let cube = CubeGeometry::new(3).unwrap();
  let mut finder = ComponentFinder::new(&cube);
  for it in 0..256 {
    let record = classify(&mut finder, it);
    assert_eq!(record.is_ambiguous, cube_is_ambiguous(&mut finder, it), "entry {}", it);
    assert_eq!(
      record.active_facet_count as usize,
      compute_active_facet_count(&cube, it)
    );
    for f in 0..cube.facet_count() {
      assert_eq!(
        record.ambiguous_facets.contains(f),
        facet_is_ambiguous(&mut finder, it, f)
      );
    }
  }
}

/// For squares and cubes, flipping every sign preserves ambiguity.
#[test]
fn test_complement_symmetry_up_to_three_dimensions() {
  for d in 1..=3 {
    let cube = CubeGeometry::new(d).unwrap();
    let table = AmbiguityTable::compute_all(&cube, false);
    let n = table.len();
    for it in 0..n as TableIndex {
      let a = table.get(it).unwrap();
      let b = table.get(compute_complement(it, n)).unwrap();
      assert_eq!(a, b, "{}-cube entry {} vs complement", d, it);
    }
  }
}

#[test]
fn test_parallel_matches_sequential() {
  let cube = CubeGeometry::new(3).unwrap();
  assert_eq!(
    AmbiguityTable::compute_all(&cube, true),
    AmbiguityTable::compute_all(&cube, false)
  );
}

// =========================================================================
// Tesseract (4-cube)
// =========================================================================

/// Corners 0 and 3 lie together on the lower facets of axes 2 and 3.
#[test]
fn test_tesseract_shared_facets() {
  let tesseract = CubeGeometry::new(4).unwrap();
  let mut finder = ComponentFinder::new(&tesseract);
  let record = classify(&mut finder, 0b1001);
  assert!(record.is_ambiguous);
  assert_eq!(record.ambiguous_facets.iter().collect::<Vec<_>>(), vec![2, 3]);
  assert_eq!(record.ambiguous_facet_count, 2);
  // Every facet except the upper ones of axes 2 and 3 contains 0 or 3.
  assert_eq!(record.active_facet_count, 6);
}
