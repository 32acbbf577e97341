//! Algorithm state pane
//!
//! Renders the family-specific payload of the current snapshot: arrays with
//! the active cells marked, distance tables, DP tables, greedy decision lists,
//! and the traversal stack. Building the lines is separate from drawing them
//! so the layout can be checked without a terminal.

use super::utils::{cell, clamp_scroll, label, or_infinity, pane_block, value, CellMark};
use crate::snapshot::{
    ActivityState, CoinState, Counters, Decision, JobState, KnapsackState, LcsState, PathState,
    SearchState, SortState, State, TraversalState,
};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(name: &str, text: impl Into<String>) -> Line<'static> {
    Line::from(vec![label(format!("{:<10}", name)), value(text)])
}

fn index_row(len: usize) -> Line<'static> {
    let mut spans = vec![label(format!("{:<10}", "index"))];
    spans.extend((0..len).map(|i| cell(i.to_string(), CellMark::Outside)));
    Line::from(spans)
}

fn sort_lines(s: &SortState) -> Vec<Line<'static>> {
    let mut spans = vec![label(format!("{:<10}", "array"))];
    spans.extend(s.array.iter().enumerate().map(|(i, v)| {
        let mark = if s.index.is_some_and(|j| i == j || i == j + 1) {
            CellMark::Active
        } else if i >= s.sorted_from {
            CellMark::Settled
        } else {
            CellMark::Plain
        };
        cell(v.to_string(), mark)
    }));

    vec![
        heading("Bubble sort"),
        index_row(s.array.len()),
        Line::from(spans),
        field("order", format!("{:?}", s.order).to_lowercase()),
        field("pass", s.pass.map_or("-".to_string(), |p| (p + 1).to_string())),
        field("swapped", s.swapped_this_pass.to_string()),
    ]
}

fn search_lines(s: &SearchState) -> Vec<Line<'static>> {
    let probe = s.probes.last().copied();
    let mut spans = vec![label(format!("{:<10}", "array"))];
    spans.extend(s.array.iter().enumerate().map(|(i, v)| {
        let inside = (i as i64) >= s.left && (i as i64) <= s.right;
        let mark = if s.found == Some(i) {
            CellMark::Settled
        } else if s.probes.contains(&i) && (probe == Some(i) || inside) {
            CellMark::Active
        } else if inside {
            CellMark::Plain
        } else {
            CellMark::Outside
        };
        cell(v.to_string(), mark)
    }));

    let probes = s
        .probes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        heading("Search"),
        index_row(s.array.len()),
        Line::from(spans),
        field("target", s.target.to_string()),
        field("interval", format!("[{}, {}]", s.left, s.right)),
        field("probes", if probes.is_empty() { "-".to_string() } else { probes }),
        field(
            "result",
            s.found.map_or("-".to_string(), |i| format!("index {}", i)),
        ),
    ]
}

fn path_lines(s: &PathState) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Dijkstra"),
        field("source", s.source.to_string()),
        field(
            "target",
            s.target.map_or("all".to_string(), |t| t.to_string()),
        ),
        Line::from(vec![
            label(format!("{:<10}", "vertex")),
            label(format!(" {:>6} {:>6}", "dist", "parent")),
        ]),
    ];

    for v in 0..s.node_count {
        let mark = if s.current == Some(v) || s.edge.is_some_and(|(_, to)| to == v) {
            CellMark::Active
        } else if s.visited.contains(&v) {
            CellMark::Settled
        } else {
            CellMark::Plain
        };
        lines.push(Line::from(vec![
            label(format!("{:<10}", v)),
            cell(or_infinity(s.distances[v]), mark),
            Span::raw("  "),
            cell(
                s.parents[v].map_or("-".to_string(), |p| p.to_string()),
                CellMark::Outside,
            ),
        ]));
    }

    if !s.path.is_empty() {
        let path = s
            .path
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        lines.push(field("path", path));
    }
    lines
}

fn coin_lines(s: &CoinState) -> Vec<Line<'static>> {
    let coins = s
        .coins
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![
        heading("Coin change"),
        field("coins", coins),
        field("amount", s.amount.to_string()),
        Line::from(vec![
            label(format!("{:<10}", "amount")),
            label(format!(" {:>4} {:>4}", "min", "coin")),
        ]),
    ];

    for (i, best) in s.table.iter().enumerate() {
        let mark = if s.cell == Some(i) {
            CellMark::Active
        } else if best.is_some() {
            CellMark::Plain
        } else {
            CellMark::Outside
        };
        lines.push(Line::from(vec![
            label(format!("{:<10}", i)),
            cell(or_infinity(*best), mark),
            cell(
                s.choice[i].map_or("-".to_string(), |c| c.to_string()),
                CellMark::Outside,
            ),
        ]));
    }

    if let (Some(coin), Some(candidate)) = (s.coin, s.candidate) {
        lines.push(field("trying", format!("coin {} for {} coins", coin, candidate)));
    }
    if !s.solution.is_empty() {
        let taken = s
            .solution
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        lines.push(field("coins used", taken));
    }
    lines
}

fn lcs_lines(s: &LcsState) -> Vec<Line<'static>> {
    let a: Vec<char> = s.a.chars().collect();
    let b: Vec<char> = s.b.chars().collect();
    let mut lines = vec![heading("Longest common subsequence")];

    let mut header = vec![label("      "), cell("", CellMark::Outside)];
    header.extend(b.iter().map(|c| cell(c.to_string(), CellMark::Outside)));
    lines.push(Line::from(header));

    for (i, row) in s.table.iter().enumerate() {
        let row_label = if i == 0 { ' ' } else { a[i - 1] };
        let mut spans = vec![label(format!("{:<6}", row_label))];
        spans.extend(row.iter().enumerate().map(|(j, v)| {
            let mark = if s.cell == Some((i, j)) {
                CellMark::Active
            } else if s.path.contains(&(i, j)) {
                CellMark::Settled
            } else {
                CellMark::Plain
            };
            cell(v.to_string(), mark)
        }));
        lines.push(Line::from(spans));
    }

    lines.push(field(
        "result",
        if s.subsequence.is_empty() {
            "-".to_string()
        } else {
            s.subsequence.clone()
        },
    ));
    lines
}

fn decision_mark(decision: Decision, is_current: bool) -> CellMark {
    if is_current {
        return CellMark::Active;
    }
    match decision {
        Decision::Pending => CellMark::Plain,
        Decision::Selected | Decision::Partial => CellMark::Settled,
        Decision::Rejected => CellMark::Rejected,
    }
}

fn activity_lines(s: &ActivityState) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Activity selection"),
        field("sorted", s.sorted.to_string()),
        field("last end", s.last_end.map_or("-".to_string(), |e| e.to_string())),
    ];
    for (pos, a) in s.activities.iter().enumerate() {
        let mark = decision_mark(a.decision, s.current == Some(pos));
        lines.push(Line::from(vec![
            label(format!("#{:<9}", a.index)),
            cell(a.start.to_string(), mark),
            cell(a.end.to_string(), mark),
        ]));
    }
    lines
}

fn knapsack_lines(s: &KnapsackState) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Fractional knapsack"),
        field("capacity", format!("{} of {} left", s.remaining, s.capacity)),
        field("profit", format!("{:.2}", s.profit)),
        Line::from(vec![
            label(format!("{:<10}", "item")),
            label(format!(" {:>4} {:>4} {:>4}", "w", "v", "take")),
        ]),
    ];
    for (pos, item) in s.items.iter().enumerate() {
        let mark = decision_mark(item.decision, s.current == Some(pos));
        lines.push(Line::from(vec![
            label(format!("#{:<9}", item.index)),
            cell(item.weight.to_string(), mark),
            cell(item.value.to_string(), mark),
            cell(format!("{:.2}", item.fraction), mark),
        ]));
    }
    lines
}

fn job_lines(s: &JobState) -> Vec<Line<'static>> {
    let mut lines = vec![heading("Job scheduling"), field("profit", s.profit.to_string())];

    let mut slots = vec![label(format!("{:<10}", "slots"))];
    slots.extend(s.slots.iter().map(|slot| match slot {
        Some(job) => cell(format!("#{}", job), CellMark::Settled),
        None => cell("·", CellMark::Outside),
    }));
    lines.push(Line::from(slots));

    for (pos, job) in s.jobs.iter().enumerate() {
        let mark = decision_mark(job.decision, s.current == Some(pos));
        lines.push(Line::from(vec![
            label(format!("#{:<9}", job.index)),
            cell(job.deadline.to_string(), mark),
            cell(job.profit.to_string(), mark),
        ]));
    }
    lines
}

fn traversal_lines(s: &TraversalState) -> Vec<Line<'static>> {
    let mut lines = vec![heading(match s.order {
        crate::snapshot::TraversalOrder::PreOrder => "Pre-order traversal",
        crate::snapshot::TraversalOrder::InOrder => "In-order traversal",
        crate::snapshot::TraversalOrder::PostOrder => "Post-order traversal",
    })];

    // Indented outline of the tree, root first
    let mut pending = vec![(0usize, 0usize)];
    while let Some((node, depth)) = pending.pop() {
        let Some(n) = s.nodes.get(node) else {
            continue;
        };
        let mark = if s.current == Some(node) {
            CellMark::Active
        } else if s.stack.contains(&node) {
            CellMark::Plain
        } else {
            CellMark::Outside
        };
        lines.push(Line::from(vec![
            label("  ".repeat(depth + 1)),
            cell(n.value.to_string(), mark),
        ]));
        if let Some(right) = n.right {
            pending.push((right, depth + 1));
        }
        if let Some(left) = n.left {
            pending.push((left, depth + 1));
        }
    }

    let stack = s
        .stack
        .iter()
        .filter_map(|&i| s.nodes.get(i).map(|n| n.value.to_string()))
        .collect::<Vec<_>>()
        .join(" ");
    let output = s
        .output
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(field("stack", stack));
    lines.push(field("output", output));
    lines
}

fn counter_lines(counters: &Counters) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default(), heading("Counters")];
    let pairs = [
        ("compares", counters.comparisons),
        ("swaps", counters.swaps),
        ("relaxed", counters.relaxations),
        ("cells", counters.cells_filled),
        ("selected", counters.selected),
    ];
    lines.extend(
        pairs
            .into_iter()
            .filter(|&(_, n)| n > 0)
            .map(|(name, n)| field(name, n.to_string())),
    );
    if counters.profit > 0.0 {
        lines.push(field("profit", format!("{:.2}", counters.profit)));
    }
    if let Some(d) = counters.target_distance {
        lines.push(field("distance", d.to_string()));
    }
    lines
}

/// Lines describing `state` and its counters
pub fn state_lines(state: &State, counters: &Counters) -> Vec<Line<'static>> {
    let mut lines = match state {
        State::Sort(s) => sort_lines(s),
        State::Search(s) => search_lines(s),
        State::ShortestPath(s) => path_lines(s),
        State::CoinChange(s) => coin_lines(s),
        State::Lcs(s) => lcs_lines(s),
        State::Activity(s) => activity_lines(s),
        State::Knapsack(s) => knapsack_lines(s),
        State::Jobs(s) => job_lines(s),
        State::Traversal(s) => traversal_lines(s),
    };
    lines.extend(counter_lines(counters));
    lines
}

/// Render the state pane
pub fn render_state_pane(
    frame: &mut Frame,
    area: Rect,
    lines: Vec<Line<'static>>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" State ", is_focused);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{self, RawInput};
    use crate::tracers::{generate_trace, Family};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_every_family_renders_its_last_state() {
        let inputs = [
            (Family::BubbleSort, RawInput::new().with("array", "3,1,2")),
            (
                Family::BinarySearch,
                RawInput::new().with("array", "1,3,5").with("target", "5"),
            ),
            (
                Family::Dijkstra,
                RawInput::new().with("nodes", "3").with("edges", "0-1:2,1-2:2"),
            ),
            (
                Family::CoinChange,
                RawInput::new().with("coins", "1,2").with("amount", "3"),
            ),
            (Family::Lcs, RawInput::new().with("a", "AB").with("b", "B")),
            (
                Family::ActivitySelection,
                RawInput::new().with("activities", "1-2,2-3"),
            ),
            (
                Family::FractionalKnapsack,
                RawInput::new().with("items", "1:2").with("capacity", "1"),
            ),
            (Family::JobScheduling, RawInput::new().with("jobs", "1:5")),
            (
                Family::InorderTraversal,
                RawInput::new().with("tree", "1,2,3"),
            ),
        ];

        for (family, input) in inputs {
            let params = gate::parse(family, &input).unwrap();
            let trace = generate_trace(family, &params).unwrap();
            let last = trace.last();
            let lines = state_lines(&last.state, &last.counters);
            assert!(lines.len() > 2, "{} rendered too little", family);
        }
    }

    #[test]
    fn test_path_line_shows_route() {
        let input = RawInput::new()
            .with("nodes", "3")
            .with("edges", "0-1:2,1-2:2")
            .with("target", "2");
        let params = gate::parse(Family::Dijkstra, &input).unwrap();
        let trace = generate_trace(Family::Dijkstra, &params).unwrap();
        let last = trace.last();
        let lines = state_lines(&last.state, &last.counters);
        assert!(lines.iter().any(|l| text(l).contains("0 → 1 → 2")));
    }
}
