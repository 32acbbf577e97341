// Job sequencing with deadlines tracer

use crate::errors::TraceError;
use crate::snapshot::{ActionTag, Decision, JobEntry, JobState, State, Trace, TraceRecorder};
use crate::tracers::Family;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// Latest time slot (1-based) the job may occupy
    pub deadline: u64,
    pub profit: u64,
}

struct Run {
    jobs: Vec<JobEntry>,
    sorted: bool,
    slots: Vec<Option<usize>>,
    current: Option<usize>,
    profit: u64,
}

impl Run {
    fn state(&self) -> State {
        State::Jobs(JobState {
            jobs: self.jobs.clone(),
            sorted: self.sorted,
            slots: self.slots.clone(),
            current: self.current,
            profit: self.profit,
        })
    }
}

/// Trace greedy job scheduling.
///
/// Jobs are taken by profit, highest first; each one scans backwards from its
/// deadline for a free unit slot. The scan is linear per job.
pub fn trace(jobs: &[Job]) -> Result<Trace, TraceError> {
    let family = Family::JobScheduling;
    if jobs.is_empty() {
        return Err(TraceError::contract(family, "no jobs"));
    }
    if jobs.iter().any(|job| job.deadline == 0) {
        return Err(TraceError::contract(family, "deadline must be positive"));
    }

    let max_deadline = jobs.iter().map(|job| job.deadline).max().unwrap_or(0) as usize;
    let mut rec = TraceRecorder::new(family);
    let mut run = Run {
        jobs: jobs
            .iter()
            .enumerate()
            .map(|(index, job)| JobEntry {
                index,
                deadline: job.deadline,
                profit: job.profit,
                decision: Decision::Pending,
                slot: None,
            })
            .collect(),
        sorted: false,
        slots: vec![None; max_deadline],
        current: None,
        profit: 0,
    };

    rec.push(
        ActionTag::Initialize,
        format!("{} jobs, {} time slots", jobs.len(), max_deadline),
        run.state(),
    )?;

    run.jobs.sort_by(|a, b| b.profit.cmp(&a.profit));
    run.sorted = true;
    rec.push(ActionTag::Sort, "Sort jobs by profit, highest first", run.state())?;

    for k in 0..run.jobs.len() {
        run.current = Some(k);
        let JobEntry {
            index,
            deadline,
            profit,
            ..
        } = run.jobs[k];
        let latest = (deadline as usize).min(max_deadline);

        let mut free = None;
        for slot in (0..latest).rev() {
            rec.counters_mut().comparisons += 1;
            if run.slots[slot].is_none() {
                free = Some(slot);
                break;
            }
        }

        match free {
            Some(slot) => {
                run.slots[slot] = Some(index);
                run.jobs[k].decision = Decision::Selected;
                run.jobs[k].slot = Some(slot);
                run.profit = run.profit.checked_add(profit).ok_or_else(|| {
                    TraceError::contract(family, "total profit overflows")
                })?;

                let counters = rec.counters_mut();
                counters.selected += 1;
                counters.profit = run.profit as f64;
                rec.push(
                    ActionTag::Select,
                    format!(
                        "Job {} (profit {}) runs in slot {}",
                        index,
                        profit,
                        slot + 1
                    ),
                    run.state(),
                )?;
            }
            None => {
                run.jobs[k].decision = Decision::Rejected;
                rec.push(
                    ActionTag::Reject,
                    format!(
                        "Job {} (profit {}) has no free slot before deadline {}",
                        index, profit, deadline
                    ),
                    run.state(),
                )?;
            }
        }
    }

    run.current = None;
    rec.push(
        ActionTag::Complete,
        format!(
            "{} jobs scheduled, total profit {}",
            rec.counters().selected,
            run.profit
        ),
        run.state(),
    )?;
    rec.finish()
}
