#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use itertools::Itertools;
use partcp_solver::core::branching::value_selection::ValueSelectionStrategy;
use partcp_solver::core::branching::variable_selection::VariableSelectionStrategy;
use partcp_solver::core::constraints;
use partcp_solver::core::search::DepthFirstSearch;
use partcp_solver::core::search::RecordingListener;
use partcp_solver::core::search::SearchSummary;
use partcp_solver::core::termination::Indefinite;
use partcp_solver::core::Solution;
use partcp_solver::core::Store;
use partcp_solver::models::Model;
use partcp_solver::models::PartPositioning;
use partcp_solver::models::PartStrength;

fn enumerate(model: &impl Model) -> (Store, Vec<Solution>, SearchSummary) {
    let mut store = Store::default();
    let scope = model.build(&mut store).unwrap();

    let mut listener = RecordingListener::new();
    let summary = DepthFirstSearch::with_strategies(
        scope,
        VariableSelectionStrategy::LargestDomain,
        ValueSelectionStrategy::InDomainMin,
    )
    .with_all_solutions(true)
    .labeling(&mut store, &mut Indefinite, &mut listener)
    .unwrap();

    (store, listener.into_solutions(), summary)
}

/// The assignments of `x0..x{num_variables - 1}` which contain `1, 2, ..., num_parts` as a
/// contiguous block.
fn brute_force_positions(num_variables: i32, num_parts: i32) -> Vec<Vec<i32>> {
    let block = (1..=num_parts).collect::<Vec<_>>();

    (0..num_variables)
        .map(|_| 1..=num_parts)
        .multi_cartesian_product()
        .filter(|assignment| assignment.windows(block.len()).any(|window| window == block))
        .collect()
}

#[test]
fn strength_is_channelled_to_the_part() {
    let model = PartStrength {
        num_variables: 1,
        num_parts: 3,
        strength_threshold: None,
    };

    let (_, solutions, summary) = enumerate(&model);

    assert_eq!(3, summary.num_solutions());
    assert!(summary.is_complete());
    for solution in &solutions {
        let part = solution.value_of("x0").unwrap();
        assert_eq!(Some(100 * part), solution.value_of("x0.strength"));
    }
    assert_eq!(
        vec![100, 200, 300],
        solutions
            .iter()
            .filter_map(|solution| solution.value_of("x0.strength"))
            .collect::<Vec<_>>()
    );
}

#[test]
fn strength_threshold_excludes_the_weakest_part() {
    let (_, solutions, summary) = enumerate(&PartStrength::default());

    assert_eq!(8, summary.num_solutions());
    for solution in &solutions {
        for index in 0..3 {
            let part = solution.value_of(&format!("x{index}")).unwrap();
            let strength = solution.value_of(&format!("x{index}.strength")).unwrap();

            assert_ne!(1, part);
            assert!(strength >= 200);
        }
    }
}

#[test]
fn strong_parts_are_never_the_weakest_part() {
    let model = PartStrength {
        num_variables: 1,
        num_parts: 3,
        strength_threshold: None,
    };
    let mut store = Store::default();
    let scope = model.build(&mut store).unwrap();
    let x = store.lookup_variable("x0").unwrap();
    let strength = store.lookup_variable("x0.strength").unwrap();
    let part = store.lookup_variable("part-2").unwrap();

    // strength >= 200 -> x = part-2
    let _ = store
        .impose(constraints::if_then(
            constraints::greater_or_equal(strength, 200),
            constraints::equals(x, part),
        ))
        .unwrap();

    let mut listener = RecordingListener::new();
    let summary = DepthFirstSearch::with_strategies(
        scope,
        VariableSelectionStrategy::LargestDomain,
        ValueSelectionStrategy::InDomainMin,
    )
    .with_all_solutions(true)
    .labeling(&mut store, &mut Indefinite, &mut listener)
    .unwrap();

    assert!(summary.is_complete());
    let solutions = listener.into_solutions();
    for solution in &solutions {
        if solution.value_of("x0.strength").unwrap() >= 200 {
            assert_ne!(Some(1), solution.value_of("x0"));
            assert_eq!(Some(2), solution.value_of("x0"));
        }
    }
    assert_eq!(
        vec![1, 2],
        solutions
            .iter()
            .filter_map(|solution| solution.value_of("x0"))
            .sorted()
            .collect::<Vec<_>>()
    );
}

#[test]
fn positioning_matches_brute_force() {
    for (num_variables, num_parts) in [(3, 3), (4, 3), (5, 2), (4, 4)] {
        let model = PartPositioning {
            num_variables,
            num_parts,
        };

        let (_, solutions, summary) = enumerate(&model);

        let found = solutions
            .iter()
            .map(|solution| solution.values().collect::<Vec<_>>())
            .sorted()
            .collect::<Vec<_>>();
        let expected = brute_force_positions(num_variables, num_parts);

        assert!(summary.is_complete());
        assert_eq!(expected, found, "{num_variables} variables, {num_parts} parts");
    }
}

#[test]
fn positioning_with_as_many_variables_as_parts_is_the_identity() {
    let (_, solutions, _) = enumerate(&PartPositioning {
        num_variables: 3,
        num_parts: 3,
    });

    assert_eq!(1, solutions.len());
    assert_eq!("x0=1, x1=2, x2=3", solutions[0].to_string());
}

#[test]
fn search_leaves_the_model_untouched() {
    let model = PartStrength::default();
    let mut expected = Store::default();
    let _ = model.build(&mut expected).unwrap();

    let (store, _, _) = enumerate(&model);

    assert_eq!(expected.to_string(), store.to_string());
}
