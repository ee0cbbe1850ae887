#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use itertools::Itertools;
use partcp_solver::core::branching::value_selection::ValueSelectionStrategy;
use partcp_solver::core::branching::variable_selection::VariableSelectionStrategy;
use partcp_solver::core::constraints;
use partcp_solver::core::search::DepthFirstSearch;
use partcp_solver::core::search::RecordingListener;
use partcp_solver::core::search::SearchStatus;
use partcp_solver::core::termination::CancellationToken;
use partcp_solver::core::termination::Indefinite;
use partcp_solver::core::DomainId;
use partcp_solver::core::ModelError;
use partcp_solver::core::Solution;
use partcp_solver::core::Store;

const VARIABLE_SELECTIONS: [VariableSelectionStrategy; 4] = [
    VariableSelectionStrategy::LargestDomain,
    VariableSelectionStrategy::SmallestDomain,
    VariableSelectionStrategy::MostConstrained,
    VariableSelectionStrategy::InputOrder,
];

const VALUE_SELECTIONS: [ValueSelectionStrategy; 3] = [
    ValueSelectionStrategy::InDomainMin,
    ValueSelectionStrategy::InDomainMax,
    ValueSelectionStrategy::InDomainRandom,
];

/// `array[index] = rhs` with a 1-based index, next to a reified disjunction over the array.
fn element_model(store: &mut Store) -> Vec<DomainId> {
    let index = store.new_named_bounded_integer(1, 3, "index").unwrap();
    let array = (0..3)
        .map(|i| {
            store
                .new_named_bounded_integer(0, 2, format!("a{i}"))
                .unwrap()
        })
        .collect::<Vec<_>>();
    let rhs = store.new_named_bounded_integer(0, 2, "rhs").unwrap();
    let b = store.new_named_boolean("b").unwrap();

    let _ = store
        .impose(constraints::element(index, array.clone(), rhs))
        .unwrap();
    let _ = store
        .impose(constraints::reified(
            constraints::or([
                constraints::equals(array[0], 2),
                constraints::less_than(array[1], array[2]),
            ]),
            b,
        ))
        .unwrap();
    let _ = store.impose(constraints::not_equals(rhs, 1)).unwrap();

    let mut scope = vec![index];
    scope.extend(array);
    scope.push(rhs);
    scope.push(b);
    scope
}

fn satisfies_element_model(values: &[i32]) -> bool {
    let [index, a0, a1, a2, rhs, b] = values else {
        return false;
    };
    let array = [*a0, *a1, *a2];

    array[(*index - 1) as usize] == *rhs
        && (*b == 1) == (*a0 == 2 || *a1 < *a2)
        && *rhs != 1
}

/// The initial bounds of the scope of [`element_model`].
const ELEMENT_MODEL_BOUNDS: [(i32, i32); 6] = [(1, 3), (0, 2), (0, 2), (0, 2), (0, 2), (0, 1)];

fn brute_force(bounds: &[(i32, i32)], accept: impl Fn(&[i32]) -> bool) -> Vec<Vec<i32>> {
    bounds
        .iter()
        .map(|&(lower_bound, upper_bound)| lower_bound..=upper_bound)
        .multi_cartesian_product()
        .filter(|values| accept(values.as_slice()))
        .collect()
}

fn solve(
    store: &mut Store,
    scope: &[DomainId],
    variable_selection: VariableSelectionStrategy,
    value_selection: ValueSelectionStrategy,
) -> Vec<Solution> {
    let mut listener = RecordingListener::new();
    let summary = DepthFirstSearch::with_strategies(scope, variable_selection, value_selection)
        .with_all_solutions(true)
        .labeling(store, &mut Indefinite, &mut listener)
        .unwrap();
    assert!(summary.is_complete());

    listener.into_solutions()
}

#[test]
fn every_policy_enumerates_exactly_the_solutions() {
    let mut store = Store::default();
    let scope = element_model(&mut store);
    let expected = brute_force(&ELEMENT_MODEL_BOUNDS, satisfies_element_model);
    assert!(!expected.is_empty());

    for variable_selection in VARIABLE_SELECTIONS {
        for value_selection in VALUE_SELECTIONS {
            let found = solve(&mut store, &scope, variable_selection, value_selection)
                .iter()
                .map(|solution| solution.values().collect::<Vec<_>>())
                .sorted()
                .collect::<Vec<_>>();

            assert_eq!(
                expected, found,
                "{variable_selection:?} with {value_selection:?}"
            );
        }
    }
}

#[test]
fn element_holds_in_every_solution() {
    let mut store = Store::default();
    let scope = element_model(&mut store);

    for solution in solve(
        &mut store,
        &scope,
        VariableSelectionStrategy::SmallestDomain,
        ValueSelectionStrategy::InDomainRandom,
    ) {
        let index = solution.value_of("index").unwrap();
        let selected = solution.value_of(&format!("a{}", index - 1)).unwrap();

        assert_eq!(solution.value_of("rhs"), Some(selected));
    }
}

#[test]
fn in_domain_min_is_deterministic() {
    let mut store = Store::default();
    let scope = element_model(&mut store);

    let first = solve(
        &mut store,
        &scope,
        VariableSelectionStrategy::LargestDomain,
        ValueSelectionStrategy::InDomainMin,
    );
    let second = solve(
        &mut store,
        &scope,
        VariableSelectionStrategy::LargestDomain,
        ValueSelectionStrategy::InDomainMin,
    );

    assert_eq!(first, second);
}

#[test]
fn random_value_selection_depends_only_on_the_seed() {
    let mut store = Store::default();
    let scope = element_model(&mut store);

    let run = |store: &mut Store, seed: u64| {
        let mut listener = RecordingListener::new();
        let _ = DepthFirstSearch::with_strategies(
            scope.clone(),
            VariableSelectionStrategy::InputOrder,
            ValueSelectionStrategy::InDomainRandom,
        )
        .with_all_solutions(true)
        .with_random_seed(seed)
        .labeling(store, &mut Indefinite, &mut listener)
        .unwrap();
        listener.into_solutions()
    };

    assert_eq!(run(&mut store, 7), run(&mut store, 7));
}

#[test]
fn store_is_restored_after_the_search() {
    let mut store = Store::default();
    let scope = element_model(&mut store);
    let before = store.to_string();

    let first = DepthFirstSearch::with_strategies(
        scope.clone(),
        VariableSelectionStrategy::LargestDomain,
        ValueSelectionStrategy::InDomainMin,
    )
    .first_solution(&mut store, &mut Indefinite)
    .unwrap();

    assert!(first.is_some());
    assert_eq!(before, store.to_string());
    assert_eq!(0, store.depth());
}

#[test]
fn solution_limit_stops_the_search() {
    let mut store = Store::default();
    let scope = element_model(&mut store);

    let mut listener = RecordingListener::with_record_limit(1);
    let summary = DepthFirstSearch::with_strategies(
        scope,
        VariableSelectionStrategy::InputOrder,
        ValueSelectionStrategy::InDomainMin,
    )
    .with_all_solutions(true)
    .with_solution_limit(Some(3))
    .labeling(&mut store, &mut Indefinite, &mut listener)
    .unwrap();

    assert_eq!(SearchStatus::SolutionLimitReached, summary.status);
    assert_eq!(3, summary.num_solutions());
    assert_eq!(3, listener.num_solutions());
    assert_eq!(1, listener.solutions().len());
}

#[test]
fn cancellation_stops_the_search_between_solutions() {
    let mut store = Store::default();
    let x = store.new_named_bounded_integer(0, 9, "x").unwrap();

    let token = CancellationToken::new();
    let mut termination = token.termination();
    let mut num_solutions = 0;
    let mut listener = |_: &Solution| {
        num_solutions += 1;
        if num_solutions == 2 {
            token.cancel();
        }
    };

    let summary = DepthFirstSearch::with_strategies(
        [x],
        VariableSelectionStrategy::InputOrder,
        ValueSelectionStrategy::InDomainMin,
    )
    .with_all_solutions(true)
    .labeling(&mut store, &mut termination, &mut listener)
    .unwrap();

    assert_eq!(SearchStatus::Terminated, summary.status);
    assert_eq!(2, summary.num_solutions());
    assert!(!summary.is_unsatisfiable());
}

#[test]
fn inconsistent_model_is_unsatisfiable() {
    let mut store = Store::default();
    let x = store.new_bounded_integer(0, 3).unwrap();
    let y = store.new_bounded_integer(0, 3).unwrap();
    let _ = store
        .impose(constraints::plus_constant_equals(x, 3, y))
        .unwrap();

    let result = store.impose(constraints::not_equals(y, 3));
    assert!(matches!(result, Err(ModelError::ModelInconsistent(_))));
    assert_eq!(
        Err(ModelError::InfeasibleState),
        store.impose(constraints::equals(x, 0))
    );

    let summary = DepthFirstSearch::with_strategies(
        [x, y],
        VariableSelectionStrategy::LargestDomain,
        ValueSelectionStrategy::InDomainMin,
    )
    .with_all_solutions(true)
    .labeling(&mut store, &mut Indefinite, &mut RecordingListener::new())
    .unwrap();

    assert!(summary.is_unsatisfiable());
}

#[test]
fn handles_of_other_stores_are_rejected() {
    let mut store = Store::default();
    let mut other = Store::default();
    let x = store.new_named_bounded_integer(0, 3, "x").unwrap();
    let y = other.new_bounded_integer(0, 3).unwrap();

    assert_eq!(
        Err(ModelError::OwnershipMismatch),
        store.impose(constraints::less_than(x, y))
    );
    assert_eq!(
        Err(ModelError::VariableNotFound("y".to_owned())),
        store.lookup_variable("y")
    );
    assert!(matches!(
        DepthFirstSearch::with_strategies(
            [x, y],
            VariableSelectionStrategy::InputOrder,
            ValueSelectionStrategy::InDomainMin,
        )
        .solutions(&mut store, &mut Indefinite),
        Err(ModelError::OwnershipMismatch)
    ));
}

/// Declares `num_variables` variables over `[lower_bound, upper_bound]` which are pairwise
/// different.
fn all_different(
    store: &mut Store,
    num_variables: usize,
    lower_bound: i32,
    upper_bound: i32,
) -> Vec<DomainId> {
    let variables = (0..num_variables)
        .map(|_| store.new_bounded_integer(lower_bound, upper_bound).unwrap())
        .collect::<Vec<_>>();
    for (&a, &b) in variables.iter().tuple_combinations() {
        let _ = store.impose(constraints::not_equals(a, b)).unwrap();
    }
    variables
}

#[test]
fn infeasible_variables_outside_the_scope_leave_no_solution() {
    let mut store = Store::default();
    let x = store.new_named_bounded_integer(0, 1, "x").unwrap();
    // Three pairwise different 0/1 variables, which propagation alone does not refute.
    let _ = all_different(&mut store, 3, 0, 1);

    for variable_selection in VARIABLE_SELECTIONS {
        for value_selection in VALUE_SELECTIONS {
            let mut listener = RecordingListener::new();
            let summary =
                DepthFirstSearch::with_strategies([x], variable_selection, value_selection)
                    .with_all_solutions(true)
                    .labeling(&mut store, &mut Indefinite, &mut listener)
                    .unwrap();

            assert!(
                summary.is_unsatisfiable(),
                "{variable_selection:?} with {value_selection:?}"
            );
            assert!(listener.solutions().is_empty());
        }
    }
    assert_eq!(0, store.depth());
}

#[test]
fn solutions_are_reported_once_per_assignment_of_the_scope() {
    let mut store = Store::default();
    let x = store.new_named_bounded_integer(0, 3, "x").unwrap();
    let others = all_different(&mut store, 3, 0, 2);
    let _ = store.impose(constraints::equals(x, others[0])).unwrap();

    for variable_selection in VARIABLE_SELECTIONS {
        for value_selection in VALUE_SELECTIONS {
            let found = solve(&mut store, &[x], variable_selection, value_selection)
                .iter()
                .map(|solution| solution.values().collect::<Vec<_>>())
                .sorted()
                .collect::<Vec<_>>();

            assert_eq!(
                vec![vec![0], vec![1], vec![2]],
                found,
                "{variable_selection:?} with {value_selection:?}"
            );
        }
    }
}
