// Single-source shortest path tracer (dense Dijkstra)

use crate::errors::TraceError;
use crate::snapshot::{ActionTag, PathState, State, Trace, TraceRecorder};
use crate::tracers::Family;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphParams {
    pub node_count: usize,
    pub edges: Vec<Edge>,
    pub source: usize,
    /// Stop as soon as this vertex is finalized
    pub target: Option<usize>,
    pub directed: bool,
}

struct Run {
    node_count: usize,
    source: usize,
    target: Option<usize>,
    distances: Vec<Option<u64>>,
    parents: Vec<Option<usize>>,
    visited: Vec<usize>,
    done: Vec<bool>,
    current: Option<usize>,
    edge: Option<(usize, usize)>,
    path: Vec<usize>,
}

impl Run {
    fn state(&self) -> State {
        State::ShortestPath(PathState {
            node_count: self.node_count,
            source: self.source,
            target: self.target,
            distances: self.distances.clone(),
            parents: self.parents.clone(),
            visited: self.visited.clone(),
            current: self.current,
            edge: self.edge,
            path: self.path.clone(),
        })
    }

    /// Unvisited vertex with the smallest finite distance, lowest index on ties
    fn closest_unvisited(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for v in 0..self.node_count {
            if self.done[v] {
                continue;
            }
            if let Some(d) = self.distances[v] {
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((v, d));
                }
            }
        }
        best.map(|(v, _)| v)
    }
}

/// Dense adjacency matrix; parallel edges keep the lightest weight
fn adjacency(params: &GraphParams) -> Vec<Vec<Option<u64>>> {
    let n = params.node_count;
    let mut matrix = vec![vec![None; n]; n];
    let mut set = |from: usize, to: usize, weight: u64| {
        let cell: &mut Option<u64> = &mut matrix[from][to];
        if cell.is_none_or(|w| weight < w) {
            *cell = Some(weight);
        }
    };
    for edge in &params.edges {
        set(edge.from, edge.to, edge.weight);
        if !params.directed {
            set(edge.to, edge.from, edge.weight);
        }
    }
    matrix
}

/// Trace Dijkstra's algorithm with an O(V) minimum scan per round
pub fn trace(params: &GraphParams) -> Result<Trace, TraceError> {
    let family = Family::Dijkstra;
    let n = params.node_count;
    if n == 0 {
        return Err(TraceError::contract(family, "graph has no vertices"));
    }
    let in_range = |v: usize| v < n;
    if !in_range(params.source)
        || !params.target.is_none_or(in_range)
        || params
            .edges
            .iter()
            .any(|e| !in_range(e.from) || !in_range(e.to))
    {
        return Err(TraceError::contract(family, "vertex index out of range"));
    }

    let matrix = adjacency(params);
    let mut rec = TraceRecorder::new(family);
    let mut run = Run {
        node_count: n,
        source: params.source,
        target: params.target,
        distances: vec![None; n],
        parents: vec![None; n],
        visited: Vec::new(),
        done: vec![false; n],
        current: None,
        edge: None,
        path: Vec::new(),
    };
    run.distances[params.source] = Some(0);
    if params.target == Some(params.source) {
        rec.counters_mut().target_distance = Some(0);
    }

    rec.push(
        ActionTag::Initialize,
        format!("dist[{}] = 0, every other vertex is unreached", params.source),
        run.state(),
    )?;

    let mut reached_target = false;
    while let Some(u) = run.closest_unvisited() {
        run.done[u] = true;
        run.visited.push(u);
        run.current = Some(u);
        run.edge = None;
        let du = run.distances[u].unwrap_or_default();
        rec.push(
            ActionTag::Visit,
            format!("Finalize vertex {} at distance {}", u, du),
            run.state(),
        )?;

        if Some(u) == params.target {
            reached_target = true;
            break;
        }

        for (v, weight) in matrix[u].iter().enumerate() {
            let Some(w) = *weight else { continue };
            if run.done[v] {
                continue;
            }
            rec.counters_mut().comparisons += 1;
            let Some(candidate) = du.checked_add(w) else {
                return Err(TraceError::contract(
                    family,
                    format!("distance through {} -> {} overflows", u, v),
                ));
            };
            if run.distances[v].is_none_or(|dv| candidate < dv) {
                let previous = run.distances[v];
                run.distances[v] = Some(candidate);
                run.parents[v] = Some(u);
                run.edge = Some((u, v));

                let counters = rec.counters_mut();
                counters.relaxations += 1;
                if Some(v) == params.target {
                    counters.target_distance = Some(candidate);
                }

                let before = previous.map_or_else(|| "inf".to_string(), |d| d.to_string());
                rec.push(
                    ActionTag::Relax,
                    format!(
                        "Relax {} -> {}: {} + {} = {} < {}",
                        u, v, du, w, candidate, before
                    ),
                    run.state(),
                )?;
            }
        }
    }

    run.current = None;
    run.edge = None;
    match params.target {
        Some(target) if reached_target => {
            let mut path = vec![target];
            let mut at = target;
            while let Some(parent) = run.parents[at] {
                path.push(parent);
                at = parent;
            }
            path.reverse();
            run.path = path;

            let distance = run.distances[target].unwrap_or_default();
            let hops = run
                .path
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            rec.push(
                ActionTag::PathFound,
                format!("Shortest path {} with distance {}", hops, distance),
                run.state(),
            )?;
        }
        Some(target) => {
            rec.push(
                ActionTag::Unreachable,
                format!("Vertex {} is unreachable from {}", target, params.source),
                run.state(),
            )?;
        }
        None => {
            rec.push(
                ActionTag::Complete,
                format!("All vertices reachable from {} finalized", params.source),
                run.state(),
            )?;
        }
    }

    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: usize, to: usize, weight: u64) -> Edge {
        Edge { from, to, weight }
    }

    fn sample(target: Option<usize>) -> GraphParams {
        GraphParams {
            node_count: 5,
            edges: vec![
                edge(0, 1, 4),
                edge(0, 2, 1),
                edge(1, 3, 1),
                edge(2, 1, 2),
                edge(2, 3, 5),
                edge(3, 4, 3),
            ],
            source: 0,
            target,
            directed: false,
        }
    }

    fn path_state(trace: &Trace) -> PathState {
        match &trace.last().state {
            State::ShortestPath(s) => s.clone(),
            other => panic!("Expected path state, got {:?}", other),
        }
    }

    #[test]
    fn test_shortest_path_to_target() {
        let trace = trace(&sample(Some(4))).unwrap();
        assert_eq!(trace.last().action, ActionTag::PathFound);
        let state = path_state(&trace);
        assert_eq!(state.path, vec![0, 2, 1, 3, 4]);
        assert_eq!(state.distances[4], Some(7));
        assert_eq!(trace.last().counters.target_distance, Some(7));
    }

    #[test]
    fn test_early_termination_at_target() {
        let trace = trace(&sample(Some(2))).unwrap();
        let state = path_state(&trace);
        assert_eq!(state.visited, vec![0, 2]);
        assert_eq!(state.path, vec![0, 2]);
    }

    #[test]
    fn test_without_target_finalizes_everything() {
        let trace = trace(&sample(None)).unwrap();
        assert_eq!(trace.last().action, ActionTag::Complete);
        let state = path_state(&trace);
        assert_eq!(state.visited, vec![0, 2, 1, 3, 4]);
        assert_eq!(
            state.distances,
            vec![Some(0), Some(3), Some(1), Some(4), Some(7)]
        );
    }

    #[test]
    fn test_unreachable_target() {
        let params = GraphParams {
            node_count: 3,
            edges: vec![edge(0, 1, 2)],
            source: 0,
            target: Some(2),
            directed: false,
        };
        let trace = trace(&params).unwrap();
        assert_eq!(trace.last().action, ActionTag::Unreachable);
        assert!(path_state(&trace).path.is_empty());
    }

    #[test]
    fn test_directed_edges_are_one_way() {
        let params = GraphParams {
            node_count: 2,
            edges: vec![edge(1, 0, 1)],
            source: 0,
            target: Some(1),
            directed: true,
        };
        let trace = trace(&params).unwrap();
        assert_eq!(trace.last().action, ActionTag::Unreachable);
    }

    #[test]
    fn test_ties_break_on_lowest_index() {
        let params = GraphParams {
            node_count: 3,
            edges: vec![edge(0, 2, 5), edge(0, 1, 5)],
            source: 0,
            target: None,
            directed: false,
        };
        let state = path_state(&trace(&params).unwrap());
        assert_eq!(state.visited, vec![0, 1, 2]);
    }

    #[test]
    fn test_source_equals_target() {
        let params = GraphParams {
            node_count: 2,
            edges: vec![edge(0, 1, 3)],
            source: 1,
            target: Some(1),
            directed: false,
        };
        let trace = trace(&params).unwrap();
        assert_eq!(
            trace.actions(),
            vec![ActionTag::Initialize, ActionTag::Visit, ActionTag::PathFound]
        );
        assert_eq!(path_state(&trace).path, vec![1]);
    }

    #[test]
    fn test_overflowing_distance_is_contract_violation() {
        let params = GraphParams {
            node_count: 3,
            edges: vec![edge(0, 1, u64::MAX), edge(1, 2, 1)],
            source: 0,
            target: Some(2),
            directed: false,
        };
        assert!(matches!(trace(&params), Err(TraceError::Contract { .. })));
    }

    #[test]
    fn test_out_of_range_vertex_is_contract_violation() {
        let mut params = sample(Some(4));
        params.edges.push(edge(0, 9, 1));
        assert!(matches!(trace(&params), Err(TraceError::Contract { .. })));
    }
}
