//! Property-Based Tests
//!
//! Structural properties of the clustering over generated pages:
//! - Adjacency is symmetric
//! - Clusters are disjoint, maximal and connected, with no singletons
//! - The partition does not depend on input order
//! - Grid pruning and parallel evaluation match the exhaustive scan

use oar_tables::prelude::*;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// ============================================================================
// Strategies
// ============================================================================

/// A cell on a 100 x 50 ruling, grown by 0 or 1 px on every side, so that
/// neighbours overlap by at most 2 px and widths stay within 2%.
fn ruled_cell() -> impl Strategy<Value = Cell> {
    (0i32..8, 0i32..8, 0i32..=1).prop_map(|(col, row, grow)| {
        let (x, y) = (10 + col * 100, 10 + row * 50);
        Cell::new(x - grow, y - grow, x + 100 + grow, y + 50 + grow)
    })
}

/// Arbitrary well-formed cell, zero width and height included.
fn loose_cell() -> impl Strategy<Value = Cell> {
    (0i32..1000, 0i32..1000, 0i32..150, 0i32..150)
        .prop_map(|(x, y, w, h)| Cell::new(x, y, x + w, y + h))
}

fn inverted_cell() -> impl Strategy<Value = Cell> {
    (0i32..1000, 0i32..1000, 1i32..150, 0i32..150)
        .prop_map(|(x, y, dx, h)| Cell::new(x + dx, y, x, y + h))
}

fn extreme_coordinate() -> impl Strategy<Value = i32> {
    prop_oneof![
        Just(i32::MIN),
        Just(i32::MAX),
        (i32::MAX - 4)..=i32::MAX,
        any::<i32>(),
    ]
}

fn extreme_cell() -> impl Strategy<Value = Cell> {
    (
        extreme_coordinate(),
        extreme_coordinate(),
        extreme_coordinate(),
        extreme_coordinate(),
    )
        .prop_map(Cell::from)
}

fn any_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        6 => ruled_cell(),
        2 => loose_cell(),
        1 => inverted_cell(),
        1 => extreme_cell(),
    ]
}

fn page(max_cells: usize) -> impl Strategy<Value = Vec<Cell>> {
    prop::collection::vec(any_cell(), 0..max_cells)
}

fn as_cell_sets(clusters: &[Vec<Cell>]) -> BTreeSet<Vec<(i32, i32, i32, i32)>> {
    clusters
        .iter()
        .map(|cluster| {
            let mut members: Vec<_> = cluster.iter().map(|c| (c.x1, c.y1, c.x2, c.y2)).collect();
            members.sort_unstable();
            members
        })
        .collect()
}

// ============================================================================
// Adjacency Properties
// ============================================================================

proptest! {
    #[test]
    fn adjacency_is_symmetric(a in any_cell(), b in any_cell()) {
        let oracle = AdjacencyOracle::default();
        prop_assert_eq!(oracle.is_adjacent(&a, &b), oracle.is_adjacent(&b, &a));
    }

    #[test]
    fn inverted_cells_are_never_adjacent(a in inverted_cell(), b in any_cell()) {
        prop_assert!(!is_adjacent(&a, &b));
        prop_assert!(!is_adjacent(&b, &a));
    }

    #[test]
    fn strictly_nested_cells_are_never_adjacent(outer in loose_cell(), inset in 1i32..20) {
        let inner = Cell::new(outer.x1 + inset, outer.y1 + inset, outer.x2 - inset, outer.y2 - inset);
        prop_assume!(inner.is_strictly_inside(&outer));
        prop_assert!(!is_adjacent(&outer, &inner));
    }
}

// ============================================================================
// Cluster Properties
// ============================================================================

proptest! {
    #[test]
    fn clusters_are_disjoint_maximal_and_not_singletons(cells in page(80)) {
        let clusterer = CellClusterer::default();
        let oracle = clusterer.oracle();
        let groups = clusterer.cluster_indices(&cells).unwrap();

        let mut owner: HashMap<usize, usize> = HashMap::new();
        for (k, group) in groups.iter().enumerate() {
            prop_assert!(group.len() >= 2);
            for &idx in group {
                prop_assert!(owner.insert(idx, k).is_none(), "cell {} in two clusters", idx);
            }
        }

        // Every adjacent pair lies inside a single cluster.
        for i in 0..cells.len() {
            for j in (i + 1)..cells.len() {
                if oracle.is_adjacent(&cells[i], &cells[j]) {
                    prop_assert!(owner.contains_key(&i));
                    prop_assert_eq!(owner.get(&i), owner.get(&j));
                }
            }
        }
    }

    #[test]
    fn clusters_are_connected_through_adjacency(cells in page(60)) {
        let clusterer = CellClusterer::default();
        let oracle = clusterer.oracle();

        for group in clusterer.cluster_indices(&cells).unwrap() {
            let mut reached = vec![group[0]];
            let mut frontier = vec![group[0]];
            while let Some(current) = frontier.pop() {
                for &other in &group {
                    if !reached.contains(&other)
                        && oracle.is_adjacent(&cells[current], &cells[other])
                    {
                        reached.push(other);
                        frontier.push(other);
                    }
                }
            }
            prop_assert_eq!(reached.len(), group.len());
        }
    }

    #[test]
    fn output_is_ordered_by_input_position(cells in page(60)) {
        let groups = CellClusterer::default().cluster_indices(&cells).unwrap();
        for group in &groups {
            prop_assert!(group.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert!(groups.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn permutation_does_not_change_partition(
        (cells, shuffled) in page(60).prop_flat_map(|cells| {
            (Just(cells.clone()), Just(cells).prop_shuffle())
        })
    ) {
        prop_assert_eq!(
            as_cell_sets(&cluster_cells_in_tables(&shuffled)),
            as_cell_sets(&cluster_cells_in_tables(&cells))
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn strategies_match_exhaustive(
        cells in page(400),
        bucket in prop::option::of(1i32..400),
    ) {
        let exhaustive = CellClusterer::new(
            ClusteringConfig::new()
                .with_strategy(PairStrategy::Exhaustive)
                .with_parallel_threshold(usize::MAX),
        )
        .unwrap();
        let expected_pairs = exhaustive.adjacent_pairs(&cells);
        let expected = exhaustive.cluster_indices(&cells).unwrap();

        let configs = [
            ClusteringConfig::new().with_grid_threshold(0),
            ClusteringConfig::new()
                .with_strategy(PairStrategy::Grid)
                .with_grid_bucket_size(bucket),
            ClusteringConfig::new()
                .with_strategy(PairStrategy::Grid)
                .with_parallel_threshold(0)
                .with_grid_bucket_size(bucket),
            ClusteringConfig::new()
                .with_strategy(PairStrategy::Exhaustive)
                .with_parallel_threshold(0),
        ];
        for config in configs {
            let clusterer = CellClusterer::new(config.clone()).unwrap();
            prop_assert_eq!(&clusterer.adjacent_pairs(&cells), &expected_pairs, "{:?}", config);
            prop_assert_eq!(&clusterer.cluster_indices(&cells).unwrap(), &expected, "{:?}", config);
        }
    }
}

// ============================================================================
// Fixed Scenarios
// ============================================================================

#[test]
fn enclosing_border_stays_out_of_its_table() {
    let mut cells = Vec::new();
    for row in 0..3 {
        for col in 0..4 {
            let (x, y) = (20 + col * 100, 20 + row * 50);
            cells.push(Cell::new(x, y, x + 100, y + 50));
        }
    }
    let border = Cell::new(15, 15, 425, 175);
    cells.push(border);

    let clusters = cluster_cells_in_tables(&cells);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].len(), 12);
    assert!(!clusters[0].contains(&border));
}

#[test]
fn dpi_scaled_leeway_tolerates_wider_overlaps() {
    let a = Cell::new(0, 0, 300, 100);
    let b = Cell::new(297, 0, 597, 100);
    assert!(cluster_cells_in_tables(&[a, b]).is_empty());

    let clusterer = CellClusterer::new(ClusteringConfig::for_dpi(400)).unwrap();
    assert_eq!(clusterer.config().leeway, 4);
    assert_eq!(clusterer.cluster(&[a, b]).unwrap(), vec![vec![a, b]]);
}
