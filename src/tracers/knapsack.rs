// Fractional knapsack tracer

use crate::errors::TraceError;
use crate::snapshot::{
    ActionTag, Decision, KnapsackEntry, KnapsackState, State, Trace, TraceRecorder,
};
use crate::tracers::Family;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: u64,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackParams {
    pub items: Vec<Item>,
    pub capacity: u64,
}

struct Run {
    capacity: u64,
    remaining: u64,
    items: Vec<KnapsackEntry>,
    sorted: bool,
    current: Option<usize>,
    profit: f64,
}

impl Run {
    fn state(&self) -> State {
        State::Knapsack(KnapsackState {
            capacity: self.capacity,
            remaining: self.remaining,
            items: self.items.clone(),
            sorted: self.sorted,
            current: self.current,
            profit: self.profit,
        })
    }
}

/// Descending value/weight ratio, compared exactly by cross-multiplication
fn by_ratio_desc(a: &KnapsackEntry, b: &KnapsackEntry) -> Ordering {
    let lhs = a.value as u128 * b.weight as u128;
    let rhs = b.value as u128 * a.weight as u128;
    rhs.cmp(&lhs)
}

/// Trace the greedy fractional knapsack.
///
/// Items are taken whole while they fit; the first one that does not is taken
/// in part (`remaining / weight`) and consideration stops there.
pub fn trace(params: &KnapsackParams) -> Result<Trace, TraceError> {
    let family = Family::FractionalKnapsack;
    if params.items.is_empty() {
        return Err(TraceError::contract(family, "no items"));
    }
    if params.items.iter().any(|item| item.weight == 0) {
        return Err(TraceError::contract(family, "item with zero weight"));
    }

    let mut rec = TraceRecorder::new(family);
    let mut run = Run {
        capacity: params.capacity,
        remaining: params.capacity,
        items: params
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| KnapsackEntry {
                index,
                weight: item.weight,
                value: item.value,
                decision: Decision::Pending,
                fraction: 0.0,
            })
            .collect(),
        sorted: false,
        current: None,
        profit: 0.0,
    };

    rec.push(
        ActionTag::Initialize,
        format!(
            "{} items, knapsack capacity {}",
            params.items.len(),
            params.capacity
        ),
        run.state(),
    )?;

    run.items.sort_by(by_ratio_desc);
    run.sorted = true;
    rec.push(
        ActionTag::Sort,
        "Sort items by value/weight ratio, highest first",
        run.state(),
    )?;

    for k in 0..run.items.len() {
        if run.remaining == 0 {
            break;
        }
        run.current = Some(k);
        let (weight, value) = (run.items[k].weight, run.items[k].value);
        rec.counters_mut().comparisons += 1;

        if weight <= run.remaining {
            run.remaining -= weight;
            run.profit += value as f64;
            run.items[k].decision = Decision::Selected;
            run.items[k].fraction = 1.0;

            let counters = rec.counters_mut();
            counters.selected += 1;
            counters.profit = run.profit;
            rec.push(
                ActionTag::Select,
                format!(
                    "Take item {} whole (w={}, v={}), {} capacity left",
                    run.items[k].index, weight, value, run.remaining
                ),
                run.state(),
            )?;
        } else {
            let fraction = run.remaining as f64 / weight as f64;
            run.profit += value as f64 * fraction;
            run.items[k].decision = Decision::Partial;
            run.items[k].fraction = fraction;
            let taken = run.remaining;
            run.remaining = 0;

            let counters = rec.counters_mut();
            counters.selected += 1;
            counters.profit = run.profit;
            rec.push(
                ActionTag::PartialTake,
                format!(
                    "Take {}/{} of item {} for {:.2}",
                    taken,
                    weight,
                    run.items[k].index,
                    value as f64 * fraction
                ),
                run.state(),
            )?;
        }
    }

    run.current = None;
    rec.push(
        ActionTag::Complete,
        format!("Total value {:.2}", run.profit),
        run.state(),
    )?;
    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(weight: u64, value: u64) -> Item {
        Item { weight, value }
    }

    #[test]
    fn test_classic_instance() {
        let params = KnapsackParams {
            items: vec![item(10, 60), item(20, 100), item(30, 120)],
            capacity: 50,
        };
        let trace = trace(&params).unwrap();
        assert!((trace.last().counters.profit - 240.0).abs() < 1e-9);
        assert_eq!(
            trace.actions(),
            vec![
                ActionTag::Initialize,
                ActionTag::Sort,
                ActionTag::Select,
                ActionTag::Select,
                ActionTag::PartialTake,
                ActionTag::Complete,
            ]
        );

        let State::Knapsack(state) = &trace.last().state else {
            panic!("Expected knapsack state");
        };
        let partial = &state.items[2];
        assert_eq!(partial.index, 2);
        assert!((partial.fraction - 20.0 / 30.0).abs() < 1e-9);
        assert_eq!(state.remaining, 0);
    }

    #[test]
    fn test_everything_fits() {
        let params = KnapsackParams {
            items: vec![item(1, 1), item(2, 5)],
            capacity: 10,
        };
        let trace = trace(&params).unwrap();
        assert!((trace.last().counters.profit - 6.0).abs() < 1e-9);
        assert!(!trace.actions().contains(&ActionTag::PartialTake));
    }

    #[test]
    fn test_stops_when_full() {
        let params = KnapsackParams {
            items: vec![item(5, 50), item(5, 10), item(5, 5)],
            capacity: 5,
        };
        let trace = trace(&params).unwrap();
        let State::Knapsack(state) = &trace.last().state else {
            panic!("Expected knapsack state");
        };
        assert_eq!(state.items[0].decision, Decision::Selected);
        assert_eq!(state.items[1].decision, Decision::Pending);
        assert_eq!(state.items[2].decision, Decision::Pending);
    }
}
