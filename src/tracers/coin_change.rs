// Minimum coin change tracer (table-filling DP with backtrack)

use crate::errors::TraceError;
use crate::snapshot::{ActionTag, CoinState, State, Trace, TraceRecorder};
use crate::tracers::Family;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinParams {
    pub coins: Vec<u64>,
    pub amount: u64,
}

struct Run {
    coins: Vec<u64>,
    amount: u64,
    table: Vec<Option<u64>>,
    choice: Vec<Option<u64>>,
    cell: Option<usize>,
    coin: Option<u64>,
    candidate: Option<u64>,
    solution: Vec<u64>,
}

impl Run {
    fn state(&self) -> State {
        State::CoinChange(CoinState {
            coins: self.coins.clone(),
            amount: self.amount,
            table: self.table.clone(),
            choice: self.choice.clone(),
            cell: self.cell,
            coin: self.coin,
            candidate: self.candidate,
            solution: self.solution.clone(),
        })
    }
}

fn show(value: Option<u64>) -> String {
    value.map_or_else(|| "inf".to_string(), |v| v.to_string())
}

/// Trace the fewest-coins DP, then walk the choice table back from `amount`.
///
/// Cells only change on a strict improvement, so ties keep the coin listed
/// first.
pub fn trace(params: &CoinParams) -> Result<Trace, TraceError> {
    let family = Family::CoinChange;
    if params.coins.is_empty() {
        return Err(TraceError::contract(family, "no coin denominations"));
    }
    if params.coins.contains(&0) {
        return Err(TraceError::contract(family, "zero-valued coin"));
    }

    let size = params.amount as usize + 1;
    let mut rec = TraceRecorder::new(family);
    let mut run = Run {
        coins: params.coins.clone(),
        amount: params.amount,
        table: vec![None; size],
        choice: vec![None; size],
        cell: None,
        coin: None,
        candidate: None,
        solution: Vec::new(),
    };
    run.table[0] = Some(0);

    rec.push(
        ActionTag::Initialize,
        "dp[0] = 0, every other amount starts at infinity",
        run.state(),
    )?;

    for i in 1..size {
        for &coin in &params.coins {
            let Some(rest) = i.checked_sub(coin as usize) else {
                continue;
            };
            let Some(prior) = run.table[rest] else {
                continue;
            };

            let candidate = prior + 1;
            let current = run.table[i];
            run.cell = Some(i);
            run.coin = Some(coin);
            run.candidate = Some(candidate);
            rec.counters_mut().comparisons += 1;

            if current.is_none_or(|c| candidate < c) {
                run.table[i] = Some(candidate);
                run.choice[i] = Some(coin);
                rec.counters_mut().cells_filled += 1;
                rec.push(
                    ActionTag::Update,
                    format!(
                        "dp[{}] = dp[{}] + 1 = {} beats {}",
                        i,
                        rest,
                        candidate,
                        show(current)
                    ),
                    run.state(),
                )?;
            } else {
                rec.push(
                    ActionTag::Compare,
                    format!(
                        "dp[{}] + 1 = {} does not beat dp[{}] = {}",
                        rest,
                        candidate,
                        i,
                        show(current)
                    ),
                    run.state(),
                )?;
            }
        }
    }

    run.coin = None;
    run.candidate = None;

    let amount = params.amount as usize;
    let Some(best) = run.table[amount] else {
        run.cell = Some(amount);
        rec.push(
            ActionTag::Unmakeable,
            format!("{} cannot be made from these coins", params.amount),
            run.state(),
        )?;
        return rec.finish();
    };

    let mut at = amount;
    while at > 0 {
        let coin = run.choice[at].ok_or_else(|| {
            TraceError::contract(family, format!("missing choice for dp[{}]", at))
        })?;
        run.solution.push(coin);
        run.cell = Some(at);
        run.coin = Some(coin);
        rec.push(
            ActionTag::Backtrack,
            format!("dp[{}] used coin {}, continue at {}", at, coin, at - coin as usize),
            run.state(),
        )?;
        at -= coin as usize;
    }

    run.cell = None;
    run.coin = None;
    let coins = run
        .solution
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" + ");
    let description = if coins.is_empty() {
        format!("{} needs {} coins", params.amount, best)
    } else {
        format!("{} = {} ({} coins)", params.amount, coins, best)
    };
    rec.push(ActionTag::Complete, description, run.state())?;
    rec.finish()
}
