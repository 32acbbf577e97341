// Longest common subsequence tracer

use crate::errors::TraceError;
use crate::snapshot::{ActionTag, LcsState, State, Trace, TraceRecorder};
use crate::tracers::Family;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsParams {
    pub a: String,
    pub b: String,
}

struct Run {
    a: String,
    b: String,
    table: Vec<Vec<u32>>,
    cell: Option<(usize, usize)>,
    candidates: Vec<u32>,
    path: Vec<(usize, usize)>,
    /// Collected back to front during the backtrack
    reversed: Vec<char>,
}

impl Run {
    fn state(&self) -> State {
        State::Lcs(LcsState {
            a: self.a.clone(),
            b: self.b.clone(),
            table: self.table.clone(),
            cell: self.cell,
            candidates: self.candidates.clone(),
            path: self.path.clone(),
            subsequence: self.reversed.iter().rev().collect(),
        })
    }
}

/// Trace the LCS table fill followed by the backtrack from the bottom-right cell
pub fn trace(params: &LcsParams) -> Result<Trace, TraceError> {
    let family = Family::Lcs;
    let a: Vec<char> = params.a.chars().collect();
    let b: Vec<char> = params.b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return Err(TraceError::contract(family, "both strings must be non-empty"));
    }

    let (m, n) = (a.len(), b.len());
    let mut rec = TraceRecorder::new(family);
    let mut run = Run {
        a: params.a.clone(),
        b: params.b.clone(),
        table: vec![vec![0; n + 1]; m + 1],
        cell: None,
        candidates: Vec::new(),
        path: Vec::new(),
        reversed: Vec::new(),
    };

    rec.push(
        ActionTag::Initialize,
        format!("{}x{} table of zeros", m + 1, n + 1),
        run.state(),
    )?;

    for i in 1..=m {
        for j in 1..=n {
            run.cell = Some((i, j));
            rec.counters_mut().comparisons += 1;
            rec.counters_mut().cells_filled += 1;

            if a[i - 1] == b[j - 1] {
                let value = run.table[i - 1][j - 1] + 1;
                run.table[i][j] = value;
                run.candidates = vec![value];
                rec.push(
                    ActionTag::Match,
                    format!(
                        "'{}' matches: dp[{}][{}] = dp[{}][{}] + 1 = {}",
                        a[i - 1],
                        i,
                        j,
                        i - 1,
                        j - 1,
                        value
                    ),
                    run.state(),
                )?;
            } else {
                let up = run.table[i - 1][j];
                let left = run.table[i][j - 1];
                run.table[i][j] = up.max(left);
                run.candidates = vec![up, left];
                rec.push(
                    ActionTag::Compare,
                    format!(
                        "'{}' != '{}': dp[{}][{}] = max({}, {}) = {}",
                        a[i - 1],
                        b[j - 1],
                        i,
                        j,
                        up,
                        left,
                        up.max(left)
                    ),
                    run.state(),
                )?;
            }
        }
    }

    run.candidates.clear();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        run.cell = Some((i, j));
        run.path.push((i, j));
        let description = if a[i - 1] == b[j - 1] {
            run.reversed.push(a[i - 1]);
            i -= 1;
            j -= 1;
            format!("'{}' is part of the subsequence, move diagonally", a[i])
        } else if run.table[i - 1][j] >= run.table[i][j - 1] {
            i -= 1;
            "Move up".to_string()
        } else {
            j -= 1;
            "Move left".to_string()
        };
        rec.push(ActionTag::Backtrack, description, run.state())?;
    }

    run.cell = None;
    let subsequence: String = run.reversed.iter().rev().collect();
    let description = if subsequence.is_empty() {
        "No common subsequence".to_string()
    } else {
        format!(
            "LCS is \"{}\" (length {})",
            subsequence,
            subsequence.chars().count()
        )
    };
    rec.push(ActionTag::Complete, description, run.state())?;
    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcs(a: &str, b: &str) -> (Trace, LcsState) {
        let trace = trace(&LcsParams {
            a: a.to_string(),
            b: b.to_string(),
        })
        .unwrap();
        let state = match &trace.last().state {
            State::Lcs(s) => s.clone(),
            other => panic!("Expected LCS state, got {:?}", other),
        };
        (trace, state)
    }

    #[test]
    fn test_classic_pair() {
        let (_, state) = lcs("ABCBDAB", "BDCABA");
        assert_eq!(state.table[7][6], 4);
        assert_eq!(state.subsequence.len(), 4);
    }

    #[test]
    fn test_subsequence_is_common() {
        let (_, state) = lcs("AGGTAB", "GXTXAYB");
        assert_eq!(state.subsequence, "GTAB");
    }

    #[test]
    fn test_every_cell_recorded() {
        let (trace, _) = lcs("abc", "ab");
        let fills = trace
            .iter()
            .filter(|s| matches!(s.action, ActionTag::Match | ActionTag::Compare))
            .count();
        assert_eq!(fills, 6);
        assert_eq!(trace.last().counters.cells_filled, 6);
    }

    #[test]
    fn test_disjoint_strings() {
        let (trace, state) = lcs("abc", "xyz");
        assert_eq!(state.subsequence, "");
        assert_eq!(trace.last().action, ActionTag::Complete);
    }
}
