//! The relaxation pass.
//!
//! Classic Floyd-Warshall loop order: the intermediate location k is the
//! outer loop, so within one k, later i/j iterations read distances
//! already improved under the same k. The reported "old" value is the
//! value immediately before each write, so improvements compound across
//! successive k.
//!
//! The pass is strictly sequential. Within one k, later i/j iterations
//! depend on writes made by earlier ones, so the i/j dimensions must not
//! be parallelized.

use crate::graph::DistanceMatrix;

use super::report::{Relaxation, RelaxationObserver};

/// Relax the matrix in place until no shorter path exists through any
/// intermediate location. Returns the number of updates applied.
///
/// Negative cycles are not detected: the loops are bounded either way,
/// but distances touched by a negative cycle are meaningless.
pub fn relax(matrix: &mut DistanceMatrix, observer: &mut dyn RelaxationObserver) -> usize {
    let n = matrix.len();
    let mut updates = 0;

    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                // Saturating: sentinel costs must not wrap
                let candidate = matrix.get(i, k).saturating_add(matrix.get(k, j));
                if candidate < matrix.get(i, j) {
                    observer.on_relaxation(&Relaxation {
                        from: matrix.location(i).to_string(),
                        to: matrix.location(j).to_string(),
                        via: matrix.location(k).to_string(),
                        new_cost: candidate,
                        old_cost: matrix.get(i, j),
                    });
                    matrix.set(i, j, candidate);
                    updates += 1;
                }
            }
        }
    }

    updates
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::graph::Cost;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Collects updates instead of printing them
    #[derive(Default)]
    struct Recorder {
        relaxations: Vec<Relaxation>,
    }

    impl RelaxationObserver for Recorder {
        fn on_relaxation(&mut self, relaxation: &Relaxation) {
            self.relaxations.push(relaxation.clone());
        }
    }

    fn matrix_from(rows: &[(&str, &[(&str, Cost)])]) -> DistanceMatrix {
        let locations: Vec<String> = rows.iter().map(|(name, _)| name.to_string()).collect();
        let distances: HashMap<String, HashMap<String, Cost>> = rows
            .iter()
            .map(|(from, costs)| {
                (
                    from.to_string(),
                    costs.iter().map(|(to, c)| (to.to_string(), *c)).collect(),
                )
            })
            .collect();
        DistanceMatrix::from_table(&locations, &distances).unwrap()
    }

    fn sample_matrix() -> DistanceMatrix {
        let config = Config::sample();
        DistanceMatrix::from_table(&config.locations, &config.distances).unwrap()
    }

    fn recorded(recorder: &Recorder) -> Vec<(&str, &str, &str, Cost, Cost)> {
        recorder
            .relaxations
            .iter()
            .map(|r| {
                (
                    r.from.as_str(),
                    r.to.as_str(),
                    r.via.as_str(),
                    r.new_cost,
                    r.old_cost,
                )
            })
            .collect()
    }

    #[test]
    fn test_sample_update_sequence() {
        let mut matrix = sample_matrix();
        let mut recorder = Recorder::default();
        let updates = relax(&mut matrix, &mut recorder);

        // (from, to, via, new, old), in emission order
        let expected = vec![
            ("a", "d", "b", 6, 10),
            ("d", "a", "b", 6, 10),
            ("a", "d", "c", 5, 6),
            ("a", "e", "c", 2, 100),
            ("b", "e", "c", 3, 100),
            ("d", "a", "c", 5, 6),
            ("e", "a", "c", 2, 100),
            ("e", "b", "c", 3, 100),
            ("a", "d", "e", 3, 5),
            ("c", "d", "e", 2, 4),
            ("d", "a", "e", 3, 5),
            ("d", "c", "e", 2, 4),
        ];

        assert_eq!(updates, expected.len());
        assert_eq!(recorded(&recorder), expected);
    }

    #[test]
    fn test_sample_final_distances() {
        let mut matrix = sample_matrix();
        relax(&mut matrix, &mut Recorder::default());

        let expected = [
            ("a", [0, 3, 1, 3, 2]),
            ("b", [3, 0, 2, 3, 3]),
            ("c", [1, 2, 0, 2, 1]),
            ("d", [3, 3, 2, 0, 1]),
            ("e", [2, 3, 1, 1, 0]),
        ];
        for (from, row) in expected {
            for (to, cost) in ["a", "b", "c", "d", "e"].into_iter().zip(row) {
                assert_eq!(
                    matrix.get_by_name(from, to),
                    Some(cost),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mut matrix = sample_matrix();
        relax(&mut matrix, &mut Recorder::default());

        let settled = matrix.clone();
        let mut recorder = Recorder::default();
        let updates = relax(&mut matrix, &mut recorder);

        assert_eq!(updates, 0);
        assert!(recorder.relaxations.is_empty());
        assert_eq!(matrix, settled);
    }

    #[test]
    fn test_triangle_inequality_holds() {
        let mut matrix = sample_matrix();
        relax(&mut matrix, &mut Recorder::default());

        let n = matrix.len();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    assert!(
                        matrix.get(i, j) <= matrix.get(i, k).saturating_add(matrix.get(k, j)),
                        "{} -> {} via {}",
                        matrix.location(i),
                        matrix.location(j),
                        matrix.location(k)
                    );
                }
            }
        }
    }

    #[test]
    fn test_directed_costs_stay_asymmetric() {
        // x -> y is cheap; y -> x only exists through z
        let mut matrix = matrix_from(&[
            ("x", &[("x", 0), ("y", 1), ("z", 100)]),
            ("y", &[("y", 0), ("x", 100), ("z", 2)]),
            ("z", &[("z", 0), ("x", 3), ("y", 100)]),
        ]);
        relax(&mut matrix, &mut Recorder::default());

        assert_eq!(matrix.get_by_name("x", "y"), Some(1));
        assert_eq!(matrix.get_by_name("y", "x"), Some(5)); // y -> z -> x
        assert_eq!(matrix.get_by_name("x", "z"), Some(3)); // x -> y -> z
        assert_eq!(matrix.get_by_name("z", "y"), Some(4)); // z -> x -> y
    }

    #[test]
    fn test_self_distances_stay_zero() {
        let mut matrix = sample_matrix();
        relax(&mut matrix, &mut Recorder::default());

        for name in ["a", "b", "c", "d", "e"] {
            assert_eq!(matrix.get_by_name(name, name), Some(0));
        }
    }

    #[test]
    fn test_reported_old_values_compound_across_intermediates() {
        // a -> d is only reachable by chaining improvements: the k=c
        // update must see the a -> c distance already improved under k=b,
        // and its reported old value is the pre-write 100, not a value
        // from the original table's history.
        let mut matrix = matrix_from(&[
            ("a", &[("a", 0), ("b", 1), ("c", 100), ("d", 100)]),
            ("b", &[("b", 0), ("a", 100), ("c", 1), ("d", 100)]),
            ("c", &[("c", 0), ("a", 100), ("b", 100), ("d", 1)]),
            ("d", &[("d", 0), ("a", 100), ("b", 100), ("c", 100)]),
        ]);
        let mut recorder = Recorder::default();
        relax(&mut matrix, &mut recorder);

        assert_eq!(
            recorded(&recorder),
            vec![
                ("a", "c", "b", 2, 100),
                ("a", "d", "c", 3, 100),
                ("b", "d", "c", 2, 100),
            ]
        );
        assert_eq!(matrix.get_by_name("a", "d"), Some(3));
    }

    #[test]
    fn test_single_location_graph_is_a_fixed_point() {
        let mut matrix = matrix_from(&[("x", &[("x", 0)])]);
        let mut recorder = Recorder::default();
        let updates = relax(&mut matrix, &mut recorder);

        assert_eq!(updates, 0);
        assert_eq!(matrix.get_by_name("x", "x"), Some(0));
    }

    #[test]
    fn test_large_sentinels_do_not_overflow() {
        let far = Cost::MAX - 1;
        let mut matrix = matrix_from(&[
            ("x", &[("x", 0), ("y", far), ("z", far)]),
            ("y", &[("y", 0), ("x", far), ("z", far)]),
            ("z", &[("z", 0), ("x", far), ("y", far)]),
        ]);
        relax(&mut matrix, &mut Recorder::default());

        // far + far saturates instead of wrapping to a bogus short path
        assert_eq!(matrix.get_by_name("x", "y"), Some(far));
        assert_eq!(matrix.get_by_name("y", "z"), Some(far));
    }
}
