// Adjacent-swap (bubble) sort tracer

use crate::errors::TraceError;
use crate::snapshot::{ActionTag, SortOrder, SortState, State, Trace, TraceRecorder};
use crate::tracers::Family;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParams {
    pub values: Vec<i64>,
    pub order: SortOrder,
}

struct Run {
    array: Vec<i64>,
    order: SortOrder,
    pass: Option<usize>,
    index: Option<usize>,
    sorted_from: usize,
    swapped: bool,
}

impl Run {
    fn state(&self) -> State {
        State::Sort(SortState {
            array: self.array.clone(),
            order: self.order,
            pass: self.pass,
            index: self.index,
            sorted_from: self.sorted_from,
            swapped_this_pass: self.swapped,
        })
    }
}

/// Trace a bubble sort with early exit on a swap-free pass
pub fn trace(params: &SortParams) -> Result<Trace, TraceError> {
    if params.values.is_empty() {
        return Err(TraceError::contract(Family::BubbleSort, "empty array"));
    }

    let n = params.values.len();
    let mut rec = TraceRecorder::new(Family::BubbleSort);
    let mut run = Run {
        array: params.values.clone(),
        order: params.order,
        pass: None,
        index: None,
        sorted_from: n,
        swapped: false,
    };

    rec.push(
        ActionTag::Initialize,
        format!("Sort {} values", n),
        run.state(),
    )?;

    for i in 0..n.saturating_sub(1) {
        run.pass = Some(i);
        run.swapped = false;

        for j in 0..n - 1 - i {
            run.index = Some(j);
            rec.counters_mut().comparisons += 1;
            let (a, b) = (run.array[j], run.array[j + 1]);
            rec.push(
                ActionTag::Compare,
                format!("Pass {}: compare a[{}]={} with a[{}]={}", i + 1, j, a, j + 1, b),
                run.state(),
            )?;

            if !run.order.in_order(a, b) {
                run.array.swap(j, j + 1);
                run.swapped = true;
                rec.counters_mut().swaps += 1;
                rec.push(
                    ActionTag::Swap,
                    format!("Swap {} and {}", a, b),
                    run.state(),
                )?;
            }
        }

        run.index = None;
        run.sorted_from = n - 1 - i;
        rec.push(
            ActionTag::PassComplete,
            format!("Pass {} complete, a[{}] is in place", i + 1, n - 1 - i),
            run.state(),
        )?;

        if !run.swapped {
            rec.push(
                ActionTag::NoSwaps,
                format!("No swaps in pass {}, array is sorted", i + 1),
                run.state(),
            )?;
            break;
        }
    }

    run.pass = None;
    run.index = None;
    run.sorted_from = 0;
    rec.push(ActionTag::Complete, "Array sorted", run.state())?;
    rec.finish()
}
