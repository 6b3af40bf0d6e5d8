//! End-to-end solving: configuration, the staged [`TspSolver`], and the
//! one-call [`solve`] pipeline.

mod config;
mod engine;

pub use config::SolverConfig;
pub use engine::{solve, SolveOutcome, SolverState, TspSolver};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::constructive::{ConstructionStrategy, TieBreakPolicy};
    use crate::distance::{DistanceMatrix, DistanceOracle, FnOracle};
    use crate::error::RoutingError;
    use crate::evaluation::{format_route, tour_cost};
    use crate::local_search::{ImprovementStrategy, StopReason};

    const STATES: [&str; 8] = [
        "Tamil Nadu",
        "Kerala",
        "Andhra Pradhesh",
        "Karnataka",
        "Assam",
        "Manipur",
        "Uttar Pradhesh",
        "Sikkim",
    ];

    fn states_matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            [0u32, 130, 192, 317, 1410, 2003, 1640, 1811],
            [130, 0, 433, 297, 1523, 2120, 1720, 1908],
            [347, 433, 0, 273, 1105, 1711, 1298, 1475],
            [304, 297, 273, 0, 1357, 1970, 1431, 1695],
            [1410, 1523, 1105, 1357, 0, 686, 1267, 782],
            [2003, 2120, 1711, 1970, 686, 0, 1342, 869],
            [1640, 1720, 1298, 1431, 1267, 1342, 0, 955],
            [1811, 1908, 1475, 1695, 782, 869, 955, 0],
        ])
        .expect("valid")
    }

    fn is_permutation(seq: &[usize], n: usize) -> bool {
        let mut sorted = seq.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn test_states_sample() {
        let dm = states_matrix();
        let outcome = solve(&dm, 0, &SolverConfig::default()).unwrap();
        let solution = &outcome.solution;

        assert_eq!(solution.depot(), Some(0));
        assert!(is_permutation(solution.ordered_nodes(), 8));
        assert!(solution.total_cost() <= outcome.construction_cost);
        assert!((outcome.construction_cost - 6773.0).abs() < 1e-10);
        assert!((solution.total_cost() - 5665.0).abs() < 1e-10);
        assert_eq!(outcome.search.stop_reason, StopReason::Converged);

        let route = format_route(solution, |i| STATES.get(i).copied());
        assert!(route.starts_with("Tamil Nadu -> "));
        assert!(route.ends_with(" -> Tamil Nadu"));
        assert_eq!(route.matches(" -> ").count(), 8);
    }

    #[test]
    fn test_states_sample_all_variants() {
        let dm = states_matrix();
        for construction in [
            ConstructionStrategy::CheapestArc,
            ConstructionStrategy::PathCheapestArc,
        ] {
            for strategy in [
                ImprovementStrategy::FirstImprovement,
                ImprovementStrategy::BestImprovement,
            ] {
                for or_opt in [false, true] {
                    let config = SolverConfig::default()
                        .with_construction(construction)
                        .with_improvement_strategy(strategy)
                        .with_or_opt(or_opt);
                    let outcome = solve(&dm, 0, &config).unwrap();
                    assert!(is_permutation(outcome.solution.ordered_nodes(), 8));
                    assert!(outcome.solution.total_cost() <= outcome.construction_cost);
                }
            }
        }
    }

    #[test]
    fn test_non_square_rejected_before_solving() {
        let rows = vec![
            vec![0, 1, 2, 3],
            vec![1, 0, 2, 3],
            vec![1, 2, 0, 3],
        ];
        assert!(matches!(
            DistanceMatrix::from_rows(&rows),
            Err(RoutingError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_invalid_closure_oracle_rejected() {
        let oracle = FnOracle::new(3, |from, to| (from + to) as f64);
        assert!(matches!(
            TspSolver::new(&oracle, 0, SolverConfig::default()),
            Err(RoutingError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_depot_out_of_range() {
        let dm = states_matrix();
        assert_eq!(
            solve(&dm, 8, &SolverConfig::default()).unwrap_err(),
            RoutingError::IndexOutOfRange { index: 8, size: 8 }
        );
    }

    #[test]
    fn test_single_node() {
        let dm = DistanceMatrix::from_rows(&[[0]]).unwrap();
        let outcome = solve(&dm, 0, &SolverConfig::default()).unwrap();
        assert_eq!(outcome.solution.ordered_nodes(), &[0]);
        assert_eq!(outcome.solution.total_cost(), 0.0);
        assert_eq!(outcome.search.moves, 0);
    }

    #[test]
    fn test_two_nodes() {
        let dm = DistanceMatrix::from_rows(&[[0, 17], [23, 0]]).unwrap();
        let outcome = solve(&dm, 1, &SolverConfig::default()).unwrap();
        assert_eq!(outcome.solution.ordered_nodes(), &[1, 0]);
        assert_eq!(outcome.solution.total_cost(), 40.0);
        assert_eq!(outcome.search.moves, 0);
    }

    #[test]
    fn test_state_machine() {
        let dm = states_matrix();
        let mut solver = TspSolver::new(&dm, 0, SolverConfig::default()).unwrap();
        assert_eq!(solver.state(), SolverState::Uninitialized);
        assert_eq!(
            solver.improve().unwrap_err(),
            RoutingError::InvalidTransition {
                from: "Uninitialized",
                to: "Improved"
            }
        );
        assert!(solver.report().is_err());

        solver.construct().unwrap();
        assert_eq!(solver.state(), SolverState::Constructed);
        assert!(solver.construct().is_err());

        let first = solver.improve().unwrap();
        let second = solver.improve().unwrap();
        assert_eq!(solver.state(), SolverState::Improved);
        assert_eq!(second.moves, 0);
        assert_eq!(second.final_cost, first.final_cost);

        let solution = solver.report().unwrap();
        assert_eq!(solver.state(), SolverState::Reported);
        assert!(solver.improve().is_err());
        assert!(solver.report().is_err());

        solver.reset();
        assert!(solver.tour().is_none());
        solver.construct().unwrap();
        let again = solver.report().unwrap();
        assert!(again.total_cost() >= solution.total_cost());
    }

    #[test]
    fn test_report_without_improvement() {
        let dm = states_matrix();
        let mut solver = TspSolver::new(&dm, 3, SolverConfig::default()).unwrap();
        let built = solver.construct().unwrap();
        let solution = solver.report().unwrap();
        assert_eq!(solution.depot(), Some(3));
        assert_eq!(solution.total_cost(), built);
    }

    #[test]
    fn test_pass_limit_from_config() {
        let dm = states_matrix();
        let config = SolverConfig::default().with_max_local_search_passes(1);
        let outcome = solve(&dm, 0, &config).unwrap();
        assert_eq!(outcome.search.passes, 1);
        assert_eq!(outcome.search.stop_reason, StopReason::PassLimit);
    }

    #[test]
    fn test_seeded_solve_is_reproducible() {
        let oracle = FnOracle::new(10, |from: usize, to: usize| {
            if from == to {
                0.0
            } else {
                (1 + (from * 3 + to * 5) % 4) as f64
            }
        });
        let config = SolverConfig::default().with_tie_break_policy(TieBreakPolicy::Seeded(99));
        let a = solve(&oracle, 0, &config).unwrap();
        let b = solve(&oracle, 0, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_outcome_json() {
        let dm = DistanceMatrix::from_rows(&[[0, 4], [6, 0]]).unwrap();
        let outcome = solve(&dm, 0, &SolverConfig::default()).unwrap();
        let json = serde_json::to_string(&outcome).expect("serialize");
        let back: SolveOutcome = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, outcome);
    }

    fn matrix_strategy() -> impl Strategy<Value = DistanceMatrix> {
        (1usize..12).prop_flat_map(|n| {
            proptest::collection::vec(1u32..100, n * n).prop_map(move |mut data| {
                for i in 0..n {
                    data[i * n + i] = 0;
                }
                DistanceMatrix::from_data(n, data.into_iter().map(f64::from).collect())
                    .expect("valid")
            })
        })
    }

    fn strategy_of(best: bool) -> ImprovementStrategy {
        if best {
            ImprovementStrategy::BestImprovement
        } else {
            ImprovementStrategy::FirstImprovement
        }
    }

    proptest! {
        #[test]
        fn prop_construction_is_permutation(dm in matrix_strategy(), pick in any::<usize>(), path in any::<bool>()) {
            let n = dm.num_nodes();
            let depot = pick % n;
            let construction = if path {
                ConstructionStrategy::PathCheapestArc
            } else {
                ConstructionStrategy::CheapestArc
            };
            let tour = construction.build(&dm, depot, TieBreakPolicy::LowestIndex).unwrap();
            let seq = tour.to_sequence(depot).unwrap();
            prop_assert_eq!(seq[0], depot);
            prop_assert!(is_permutation(&seq, n));
        }

        #[test]
        fn prop_every_move_strictly_improves(dm in matrix_strategy(), best in any::<bool>(), or_opt in any::<bool>()) {
            let config = SolverConfig::default()
                .with_improvement_strategy(strategy_of(best))
                .with_or_opt(or_opt)
                .with_max_local_search_passes(1);
            let mut solver = TspSolver::new(&dm, 0, config).unwrap();
            let mut cost = solver.construct().unwrap();
            for _ in 0..500 {
                let stats = solver.improve().unwrap();
                prop_assert_eq!(stats.initial_cost, cost);
                if stats.moves == 0 {
                    prop_assert_eq!(stats.final_cost, cost);
                } else {
                    prop_assert!(stats.final_cost < cost);
                }
                if stats.moves == 0 {
                    break;
                }
                cost = stats.final_cost;
            }
        }

        #[test]
        fn prop_convergence_is_idempotent(dm in matrix_strategy(), best in any::<bool>(), or_opt in any::<bool>()) {
            let config = SolverConfig::default()
                .with_improvement_strategy(strategy_of(best))
                .with_or_opt(or_opt);
            let mut solver = TspSolver::new(&dm, 0, config).unwrap();
            let built = solver.construct().unwrap();
            let first = solver.improve().unwrap();
            prop_assert!(first.final_cost <= built);
            let second = solver.improve().unwrap();
            prop_assert_eq!(second.moves, 0);
            prop_assert_eq!(second.final_cost, first.final_cost);
        }

        #[test]
        fn prop_reported_cost_matches_arcs(dm in matrix_strategy()) {
            let n = dm.num_nodes();
            let outcome = solve(&dm, n - 1, &SolverConfig::default()).unwrap();
            let route = outcome.solution.closed_route();
            let manual: f64 = route.windows(2).map(|w| dm.get(w[0], w[1])).sum();
            prop_assert_eq!(outcome.solution.total_cost(), manual);

            let mut solver = TspSolver::new(&dm, n - 1, SolverConfig::default()).unwrap();
            let built = solver.construct().unwrap();
            let tour = solver.tour().unwrap();
            let walked: f64 = tour.iter().map(|node| dm.get(node, tour.successor(node).unwrap())).sum();
            prop_assert_eq!(tour_cost(tour, &dm).unwrap(), built);
            prop_assert_eq!(built, walked);
        }
    }
}
