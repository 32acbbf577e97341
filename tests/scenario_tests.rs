// End-to-end tests: raw text through the gate, tracer, and trace

use algoscope::gate::{self, RawInput};
use algoscope::snapshot::{ActionTag, State, Trace};
use algoscope::tracers::{activity, generate_trace, Activity, Family};
use algoscope::Error;

fn run(family: Family, fields: &[(&str, &str)]) -> Trace {
    let input = fields
        .iter()
        .fold(RawInput::new(), |input, (k, v)| input.with(k, v));
    let params = gate::parse(family, &input).expect("input should validate");
    generate_trace(family, &params).expect("trace should generate")
}

/// Every family with a small, valid input
fn all_families() -> Vec<(Family, Vec<(&'static str, &'static str)>)> {
    vec![
        (Family::BubbleSort, vec![("array", "5,3,4,1,2")]),
        (Family::BubbleSort, vec![("array", "1,2,3")]),
        (
            Family::BinarySearch,
            vec![("array", "11,12,22,25,34,50,64,76,88,90"), ("target", "34")],
        ),
        (Family::BinarySearch, vec![("array", "1,3,5"), ("target", "4")]),
        (
            Family::InterpolationSearch,
            vec![("array", "10,20,30,40,50"), ("target", "40")],
        ),
        (
            Family::InterpolationSearch,
            vec![("array", "7,7,7,7"), ("target", "7")],
        ),
        (
            Family::InterpolationSearch,
            vec![("array", "1,2,3"), ("target", "99")],
        ),
        (
            Family::TernarySearch,
            vec![("array", "1,2,3,4,5,6,7,8,9"), ("target", "6")],
        ),
        (Family::TernarySearch, vec![("array", "2,4"), ("target", "3")]),
        (
            Family::Dijkstra,
            vec![
                ("nodes", "5"),
                ("edges", "0-1:4,0-2:1,1-3:1,2-1:2,2-3:5,3-4:3"),
                ("target", "4"),
            ],
        ),
        (Family::Dijkstra, vec![("nodes", "3"), ("edges", "0-1:1")]),
        (
            Family::Dijkstra,
            vec![("nodes", "3"), ("edges", "0-1:1"), ("target", "2")],
        ),
        (Family::CoinChange, vec![("coins", "1,3,4"), ("amount", "6")]),
        (Family::CoinChange, vec![("coins", "4,5"), ("amount", "7")]),
        (Family::Lcs, vec![("a", "AGGTAB"), ("b", "GXTXAYB")]),
        (Family::Lcs, vec![("a", "ABC"), ("b", "XYZ")]),
        (
            Family::ActivitySelection,
            vec![("activities", "1-4,3-5,0-6,5-7")],
        ),
        (
            Family::FractionalKnapsack,
            vec![("items", "10:60,20:100,30:120"), ("capacity", "50")],
        ),
        (
            Family::JobScheduling,
            vec![("jobs", "2:100,1:19,2:27,1:25,3:15")],
        ),
        (Family::PreorderTraversal, vec![("tree", "1,2,3,4,5,null,6")]),
        (Family::InorderTraversal, vec![("tree", "1,2,3,4,5,null,6")]),
        (Family::PostorderTraversal, vec![("tree", "1")]),
    ]
}

#[test]
fn test_every_trace_starts_with_initialize_and_ends_terminal() {
    for (family, fields) in all_families() {
        let trace = run(family, &fields);
        assert!(trace.len() >= 2, "{} produced {} snapshots", family, trace.len());
        assert_eq!(trace.family(), family);

        let first = trace.get(0).unwrap().action;
        assert_eq!(first, ActionTag::Initialize, "{} starts with {}", family, first);

        let last = trace.last().action;
        assert!(
            family.terminal_tags().contains(&last),
            "{} ends with {}",
            family,
            last
        );
        let terminals = trace.iter().filter(|s| s.action.is_terminal()).count();
        assert_eq!(terminals, 1, "{} has {} terminal steps", family, terminals);
    }
}

#[test]
fn test_traces_are_deterministic() {
    for (family, fields) in all_families() {
        let a = run(family, &fields);
        let b = run(family, &fields);
        assert_eq!(a.snapshots(), b.snapshots(), "{} is not deterministic", family);
        assert!(!a.ptr_eq(&b));
    }
}

#[test]
fn test_counters_are_monotonic() {
    for (family, fields) in all_families() {
        let trace = run(family, &fields);
        for pair in trace.snapshots().windows(2) {
            let (before, after) = (&pair[0].counters, &pair[1].counters);
            assert!(after.comparisons >= before.comparisons, "{}", family);
            assert!(after.swaps >= before.swaps, "{}", family);
            assert!(after.relaxations >= before.relaxations, "{}", family);
            assert!(after.cells_filled >= before.cells_filled, "{}", family);
            assert!(after.selected >= before.selected, "{}", family);
            assert!(after.profit >= before.profit, "{}", family);
            if let Some(prev) = before.target_distance {
                let now = after.target_distance.expect("distance never returns to infinity");
                assert!(now <= prev, "{}", family);
            }
        }
    }
}

#[test]
fn test_scenario_sort() {
    let trace = run(Family::BubbleSort, &[("array", "5,3,4,1,2")]);
    let State::Sort(state) = &trace.last().state else {
        panic!("Expected sort state");
    };
    assert_eq!(state.array, vec![1, 2, 3, 4, 5]);
    assert_eq!(trace.last().action, ActionTag::Complete);
}

#[test]
fn test_scenario_binary_search() {
    let trace = run(
        Family::BinarySearch,
        &[("array", "11,12,22,25,34,50,64,76,88,90"), ("target", "34")],
    );
    assert_eq!(trace.last().action, ActionTag::Found);
    let State::Search(state) = &trace.last().state else {
        panic!("Expected search state");
    };
    assert_eq!(state.found, Some(4));
}

#[test]
fn test_scenario_dijkstra() {
    let trace = run(
        Family::Dijkstra,
        &[
            ("nodes", "5"),
            ("edges", "0-1:4,0-2:1,1-3:1,2-1:2,2-3:5,3-4:3"),
            ("source", "0"),
            ("target", "4"),
        ],
    );
    assert_eq!(trace.last().action, ActionTag::PathFound);
    let State::ShortestPath(state) = &trace.last().state else {
        panic!("Expected path state");
    };
    assert_eq!(state.path, vec![0, 2, 1, 3, 4]);
    // 1 + 2 + 1 + 3
    assert_eq!(state.distances[4], Some(7));
    assert_eq!(trace.last().counters.target_distance, Some(7));
}

#[test]
fn test_scenario_coin_change() {
    let trace = run(Family::CoinChange, &[("coins", "1,3,4"), ("amount", "6")]);
    assert_eq!(trace.last().action, ActionTag::Complete);
    let State::CoinChange(state) = &trace.last().state else {
        panic!("Expected coin state");
    };
    assert_eq!(state.table[6], Some(2));
    assert_eq!(state.solution.iter().sum::<u64>(), 6);
    assert_eq!(state.solution.len(), 2);
    assert!(trace.actions().contains(&ActionTag::Backtrack));
}

#[test]
fn test_scenario_activity_selection() {
    let trace = run(Family::ActivitySelection, &[("activities", "1-4,3-5,0-6,5-7")]);
    assert_eq!(trace.get(1).unwrap().action, ActionTag::Sort);
    let State::Activity(state) = &trace.last().state else {
        panic!("Expected activity state");
    };
    assert_eq!(
        activity::selected(state),
        vec![Activity { start: 1, end: 4 }, Activity { start: 5, end: 7 }]
    );
}

#[test]
fn test_unmakeable_amount_is_a_terminal_step_not_an_error() {
    let trace = run(Family::CoinChange, &[("coins", "4,5"), ("amount", "7")]);
    assert_eq!(trace.last().action, ActionTag::Unmakeable);
}

#[test]
fn test_gate_rejects_before_tracing() {
    let input = RawInput::new()
        .with("nodes", "3")
        .with("edges", "0-5:1");
    let err = gate::parse(Family::Dijkstra, &input).unwrap_err();
    assert_eq!(err.field, "edges");

    let input = RawInput::new().with("array", "3, x, 1");
    let err = gate::parse(Family::BubbleSort, &input).unwrap_err();
    assert_eq!(err.field, "array");
    assert!(err.to_string().contains("'x'"));
}

#[test]
fn test_huge_weights_and_profits_are_rejected_not_traced() {
    let input = RawInput::new()
        .with("nodes", "3")
        .with("edges", "0-1:18446744073709551615,1-2:1")
        .with("target", "2");
    assert_eq!(gate::parse(Family::Dijkstra, &input).unwrap_err().field, "edges");

    let input = RawInput::new().with("jobs", "1:18446744073709551615,2:1");
    assert_eq!(gate::parse(Family::JobScheduling, &input).unwrap_err().field, "jobs");

    use algoscope::tracers::{Edge, GraphParams, Params};
    let params = Params::Graph(GraphParams {
        node_count: 3,
        edges: vec![
            Edge { from: 0, to: 1, weight: u64::MAX },
            Edge { from: 1, to: 2, weight: 1 },
        ],
        source: 0,
        target: Some(2),
        directed: false,
    });
    match generate_trace(Family::Dijkstra, &params) {
        Err(Error::Validation(err)) => assert_eq!(err.field, "edges"),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_generate_trace_revalidates_typed_params() {
    use algoscope::tracers::{Params, SortParams};
    let params = Params::Sort(SortParams {
        values: Vec::new(),
        order: Default::default(),
    });
    match generate_trace(Family::BubbleSort, &params) {
        Err(Error::Validation(err)) => assert_eq!(err.field, "array"),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_trace_exports_json() {
    let trace = run(Family::BinarySearch, &[("array", "1,2,3"), ("target", "2")]);
    let json: serde_json::Value = serde_json::from_str(&trace.to_json().unwrap()).unwrap();
    assert_eq!(json["family"], "binary-search");
    let snapshots = json["snapshots"].as_array().unwrap();
    assert_eq!(snapshots.len(), trace.len());
    assert_eq!(snapshots[0]["action"], "initialize");
    assert_eq!(snapshots[0]["state"]["kind"], "search");
    assert_eq!(snapshots.last().unwrap()["action"], "found");
}
