// Activity selection tracer (greedy by earliest end time)

use crate::errors::TraceError;
use crate::snapshot::{
    ActionTag, ActivityEntry, ActivityState, Decision, State, Trace, TraceRecorder,
};
use crate::tracers::Family;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub start: u64,
    pub end: u64,
}

struct Run {
    activities: Vec<ActivityEntry>,
    sorted: bool,
    current: Option<usize>,
    last_end: Option<u64>,
}

impl Run {
    fn state(&self) -> State {
        State::Activity(ActivityState {
            activities: self.activities.clone(),
            sorted: self.sorted,
            current: self.current,
            last_end: self.last_end,
        })
    }
}

/// Trace greedy activity selection.
///
/// The sort is stable, so activities sharing an end time keep input order.
pub fn trace(activities: &[Activity]) -> Result<Trace, TraceError> {
    let family = Family::ActivitySelection;
    if activities.is_empty() {
        return Err(TraceError::contract(family, "no activities"));
    }
    if let Some(bad) = activities.iter().find(|a| a.end <= a.start) {
        return Err(TraceError::contract(
            family,
            format!("activity ({}, {}) must end after it starts", bad.start, bad.end),
        ));
    }

    let mut rec = TraceRecorder::new(family);
    let mut run = Run {
        activities: activities
            .iter()
            .enumerate()
            .map(|(index, a)| ActivityEntry {
                index,
                start: a.start,
                end: a.end,
                decision: Decision::Pending,
            })
            .collect(),
        sorted: false,
        current: None,
        last_end: None,
    };

    rec.push(
        ActionTag::Initialize,
        format!("{} candidate activities", activities.len()),
        run.state(),
    )?;

    run.activities.sort_by_key(|a| a.end);
    run.sorted = true;
    rec.push(ActionTag::Sort, "Sort activities by end time", run.state())?;

    for k in 0..run.activities.len() {
        run.current = Some(k);
        let (start, end) = (run.activities[k].start, run.activities[k].end);

        let compatible = match run.last_end {
            None => true,
            Some(last_end) => {
                rec.counters_mut().comparisons += 1;
                start >= last_end
            }
        };

        if compatible {
            run.activities[k].decision = Decision::Selected;
            run.last_end = Some(end);
            rec.counters_mut().selected += 1;
            rec.push(
                ActionTag::Select,
                format!("Select ({}, {})", start, end),
                run.state(),
            )?;
        } else {
            run.activities[k].decision = Decision::Rejected;
            let last_end = run.last_end.unwrap_or_default();
            rec.push(
                ActionTag::Reject,
                format!(
                    "Reject ({}, {}): starts before {} ends",
                    start, end, last_end
                ),
                run.state(),
            )?;
        }
    }

    run.current = None;
    let chosen = rec.counters().selected;
    rec.push(
        ActionTag::Complete,
        format!("{} activities selected", chosen),
        run.state(),
    )?;
    rec.finish()
}

/// Activities chosen in a finished trace, in selection order
pub fn selected(state: &ActivityState) -> Vec<Activity> {
    state
        .activities
        .iter()
        .filter(|a| a.decision == Decision::Selected)
        .map(|a| Activity {
            start: a.start,
            end: a.end,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(start: u64, end: u64) -> Activity {
        Activity { start, end }
    }

    #[test]
    fn test_selects_compatible_activities() {
        let input = [activity(1, 4), activity(3, 5), activity(0, 6), activity(5, 7)];
        let trace = trace(&input).unwrap();
        let State::Activity(state) = &trace.last().state else {
            panic!("Expected activity state");
        };
        assert_eq!(selected(state), vec![activity(1, 4), activity(5, 7)]);
        assert_eq!(
            trace.actions(),
            vec![
                ActionTag::Initialize,
                ActionTag::Sort,
                ActionTag::Select,
                ActionTag::Reject,
                ActionTag::Reject,
                ActionTag::Select,
                ActionTag::Complete,
            ]
        );
    }

    #[test]
    fn test_zero_length_activity_is_contract_violation() {
        let input = [activity(1, 4), activity(3, 3)];
        assert!(matches!(trace(&input), Err(TraceError::Contract { .. })));
    }

    #[test]
    fn test_sort_is_by_end_time() {
        let input = [activity(5, 9), activity(1, 2), activity(3, 4)];
        let trace = trace(&input).unwrap();
        let State::Activity(state) = &trace.get(1).unwrap().state else {
            panic!("Expected activity state");
        };
        let ends: Vec<u64> = state.activities.iter().map(|a| a.end).collect();
        assert_eq!(ends, vec![2, 4, 9]);
        assert_eq!(trace.last().counters.selected, 3);
    }
}
