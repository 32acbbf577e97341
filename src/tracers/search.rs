// Bounded search tracers over a sorted array

use crate::errors::TraceError;
use crate::snapshot::{ActionTag, SearchState, State, Trace, TraceRecorder};
use crate::tracers::Family;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Sorted in non-decreasing order
    pub values: Vec<i64>,
    pub target: i64,
}

struct Run {
    rec: TraceRecorder,
    array: Vec<i64>,
    target: i64,
    left: i64,
    right: i64,
    probes: Vec<usize>,
    found: Option<usize>,
}

impl Run {
    fn begin(family: Family, params: &SearchParams) -> Result<Self, TraceError> {
        if params.values.is_empty() {
            return Err(TraceError::contract(family, "empty array"));
        }
        if params.values.windows(2).any(|w| w[0] > w[1]) {
            return Err(TraceError::contract(family, "array is not sorted"));
        }

        let mut run = Run {
            rec: TraceRecorder::new(family),
            array: params.values.clone(),
            target: params.target,
            left: 0,
            right: params.values.len() as i64 - 1,
            probes: Vec::new(),
            found: None,
        };
        let description = format!(
            "Search for {} in {} sorted values",
            run.target,
            run.array.len()
        );
        run.push(ActionTag::Initialize, description)?;
        Ok(run)
    }

    fn state(&self) -> State {
        State::Search(SearchState {
            array: self.array.clone(),
            target: self.target,
            left: self.left,
            right: self.right,
            probes: self.probes.clone(),
            found: self.found,
        })
    }

    fn push(&mut self, action: ActionTag, description: String) -> Result<(), TraceError> {
        let state = self.state();
        self.rec.push(action, description, state)
    }

    fn at(&self, index: i64) -> i64 {
        self.array[index as usize]
    }

    fn compare(&mut self, index: i64) -> Result<i64, TraceError> {
        self.rec.counters_mut().comparisons += 1;
        let value = self.at(index);
        self.push(
            ActionTag::Compare,
            format!("Compare a[{}]={} with target {}", index, value, self.target),
        )?;
        Ok(value)
    }

    fn found(mut self, index: i64) -> Result<Trace, TraceError> {
        self.found = Some(index as usize);
        let description = format!("Found {} at index {}", self.target, index);
        self.push(ActionTag::Found, description)?;
        self.rec.finish()
    }

    fn not_found(mut self) -> Result<Trace, TraceError> {
        self.probes.clear();
        let description = format!("{} is not in the array", self.target);
        self.push(ActionTag::NotFound, description)?;
        self.rec.finish()
    }

    fn narrow_left(&mut self, right: i64) -> Result<(), TraceError> {
        self.right = right;
        let description = format!("Continue left: [{}, {}]", self.left, self.right);
        self.push(ActionTag::NarrowLeft, description)
    }

    fn narrow_right(&mut self, left: i64) -> Result<(), TraceError> {
        self.left = left;
        let description = format!("Continue right: [{}, {}]", self.left, self.right);
        self.push(ActionTag::NarrowRight, description)
    }
}

/// Trace a binary search
pub fn trace_binary(params: &SearchParams) -> Result<Trace, TraceError> {
    let mut run = Run::begin(Family::BinarySearch, params)?;

    while run.left <= run.right {
        let mid = (run.left + run.right) / 2;
        run.probes = vec![mid as usize];
        run.push(
            ActionTag::ComputeMid,
            format!("mid = ({} + {}) / 2 = {}", run.left, run.right, mid),
        )?;

        let value = run.compare(mid)?;
        if value == run.target {
            return run.found(mid);
        } else if value < run.target {
            run.narrow_right(mid + 1)?;
        } else {
            run.narrow_left(mid - 1)?;
        }
    }

    run.not_found()
}

/// Trace an interpolation search.
///
/// A range whose end values are equal cannot be interpolated; the probe falls
/// back to the midpoint there.
pub fn trace_interpolation(params: &SearchParams) -> Result<Trace, TraceError> {
    let mut run = Run::begin(Family::InterpolationSearch, params)?;

    while run.left <= run.right
        && run.at(run.left) <= run.target
        && run.target <= run.at(run.right)
    {
        if run.left == run.right {
            let index = run.left;
            run.probes = vec![index as usize];
            run.rec.counters_mut().comparisons += 1;
            return if run.at(index) == run.target {
                run.found(index)
            } else {
                run.not_found()
            };
        }

        let (lo, hi) = (run.at(run.left), run.at(run.right));
        let pos = if lo == hi {
            let mid = (run.left + run.right) / 2;
            run.probes = vec![mid as usize];
            run.push(
                ActionTag::Estimate,
                format!(
                    "a[{}] == a[{}], probe midpoint {}",
                    run.left, run.right, mid
                ),
            )?;
            mid
        } else {
            let offset = (run.target as i128 - lo as i128) * (run.right - run.left) as i128
                / (hi as i128 - lo as i128);
            let pos = run.left + offset as i64;
            run.probes = vec![pos as usize];
            run.push(
                ActionTag::Estimate,
                format!(
                    "pos = {} + ({} - {}) * ({} - {}) / ({} - {}) = {}",
                    run.left, run.target, lo, run.right, run.left, hi, lo, pos
                ),
            )?;
            pos
        };

        let value = run.compare(pos)?;
        if value == run.target {
            return run.found(pos);
        } else if value < run.target {
            run.narrow_right(pos + 1)?;
        } else {
            run.narrow_left(pos - 1)?;
        }
    }

    run.not_found()
}

/// Trace a ternary search
pub fn trace_ternary(params: &SearchParams) -> Result<Trace, TraceError> {
    let mut run = Run::begin(Family::TernarySearch, params)?;

    while run.left <= run.right {
        let third = (run.right - run.left) / 3;
        let mid1 = run.left + third;
        let mid2 = run.right - third;
        run.probes = vec![mid1 as usize, mid2 as usize];
        run.push(
            ActionTag::ComputeMid,
            format!("mid1 = {}, mid2 = {}", mid1, mid2),
        )?;

        let first = run.compare(mid1)?;
        if first == run.target {
            return run.found(mid1);
        }
        let second = run.compare(mid2)?;
        if second == run.target {
            return run.found(mid2);
        }

        if run.target < first {
            run.narrow_left(mid1 - 1)?;
        } else if run.target > second {
            run.narrow_right(mid2 + 1)?;
        } else {
            run.left = mid1 + 1;
            run.right = mid2 - 1;
            let description = format!("Continue in the middle: [{}, {}]", run.left, run.right);
            run.push(ActionTag::NarrowMiddle, description)?;
        }
    }

    run.not_found()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: &[i64], target: i64) -> SearchParams {
        SearchParams {
            values: values.to_vec(),
            target,
        }
    }

    fn found_index(trace: &Trace) -> Option<usize> {
        match &trace.last().state {
            State::Search(s) => s.found,
            other => panic!("Expected search state, got {:?}", other),
        }
    }

    const SAMPLE: [i64; 10] = [11, 12, 22, 25, 34, 50, 64, 76, 88, 90];

    #[test]
    fn test_binary_finds_target() {
        let trace = trace_binary(&params(&SAMPLE, 34)).unwrap();
        assert_eq!(trace.last().action, ActionTag::Found);
        assert_eq!(found_index(&trace), Some(4));
    }

    #[test]
    fn test_binary_not_found() {
        let trace = trace_binary(&params(&SAMPLE, 35)).unwrap();
        assert_eq!(trace.last().action, ActionTag::NotFound);
        assert_eq!(found_index(&trace), None);
    }

    #[test]
    fn test_interpolation_finds_target() {
        let trace = trace_interpolation(&params(&SAMPLE, 76)).unwrap();
        assert_eq!(trace.last().action, ActionTag::Found);
        assert_eq!(found_index(&trace), Some(7));
    }

    #[test]
    fn test_interpolation_out_of_range_target() {
        let trace = trace_interpolation(&params(&SAMPLE, 5)).unwrap();
        assert_eq!(
            trace.actions(),
            vec![ActionTag::Initialize, ActionTag::NotFound]
        );
    }

    #[test]
    fn test_interpolation_flat_range_does_not_divide_by_zero() {
        let trace = trace_interpolation(&params(&[7, 7, 7, 7], 7)).unwrap();
        assert_eq!(trace.last().action, ActionTag::Found);
        assert_eq!(found_index(&trace), Some(1));

        let trace = trace_interpolation(&params(&[7, 7, 7, 7], 8)).unwrap();
        assert_eq!(trace.last().action, ActionTag::NotFound);
    }

    #[test]
    fn test_interpolation_single_element_check() {
        let trace = trace_interpolation(&params(&[3], 3)).unwrap();
        assert_eq!(trace.actions(), vec![ActionTag::Initialize, ActionTag::Found]);
        assert_eq!(trace.last().counters.comparisons, 1);
    }

    #[test]
    fn test_ternary_finds_each_element() {
        for (i, &value) in SAMPLE.iter().enumerate() {
            let trace = trace_ternary(&params(&SAMPLE, value)).unwrap();
            assert_eq!(found_index(&trace), Some(i), "target {}", value);
        }
    }

    #[test]
    fn test_ternary_middle_narrowing() {
        let trace = trace_ternary(&params(&SAMPLE, 50)).unwrap();
        assert!(trace.actions().contains(&ActionTag::NarrowMiddle));
        assert_eq!(found_index(&trace), Some(5));
    }

    #[test]
    fn test_unsorted_input_is_contract_violation() {
        let result = trace_binary(&params(&[3, 1, 2], 1));
        assert!(matches!(result, Err(TraceError::Contract { .. })));
    }
}
