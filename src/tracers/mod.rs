//! Algorithm tracers
//!
//! Each tracer re-runs a textbook algorithm and records every meaningful
//! state transition into a [`Trace`]. Tracers are pure: no I/O, no clock, no
//! shared state, and identical input always yields an identical trace.
//!
//! - [`sort`]: adjacent-swap (bubble) sort
//! - [`search`]: binary, interpolation, and ternary search
//! - [`shortest_path`]: dense Dijkstra
//! - [`coin_change`], [`lcs`]: table-filling dynamic programming with a
//!   backtrack phase
//! - [`activity`], [`knapsack`], [`jobs`]: greedy selection and scheduling
//! - [`traversal`]: pre-, in-, and post-order tree traversal
//!
//! [`generate_trace`] is the single entry point: it runs the validation gate
//! and dispatches on [`Family`].

pub mod activity;
pub mod coin_change;
pub mod jobs;
pub mod knapsack;
pub mod lcs;
pub mod search;
pub mod shortest_path;
pub mod sort;
pub mod traversal;

use crate::errors::{Error, TraceError};
use crate::gate;
use crate::snapshot::{ActionTag, Trace, TraversalOrder};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub use activity::Activity;
pub use coin_change::CoinParams;
pub use jobs::Job;
pub use knapsack::{Item, KnapsackParams};
pub use lcs::LcsParams;
pub use search::SearchParams;
pub use shortest_path::{Edge, GraphParams};
pub use sort::SortParams;
pub use traversal::TreeParams;

/// Algorithm selected for tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    BubbleSort,
    BinarySearch,
    InterpolationSearch,
    TernarySearch,
    Dijkstra,
    CoinChange,
    Lcs,
    ActivitySelection,
    FractionalKnapsack,
    JobScheduling,
    PreorderTraversal,
    InorderTraversal,
    PostorderTraversal,
}

impl Family {
    pub const ALL: [Family; 13] = [
        Family::BubbleSort,
        Family::BinarySearch,
        Family::InterpolationSearch,
        Family::TernarySearch,
        Family::Dijkstra,
        Family::CoinChange,
        Family::Lcs,
        Family::ActivitySelection,
        Family::FractionalKnapsack,
        Family::JobScheduling,
        Family::PreorderTraversal,
        Family::InorderTraversal,
        Family::PostorderTraversal,
    ];

    /// Stable identifier, also accepted by [`FromStr`]
    pub fn id(self) -> &'static str {
        match self {
            Family::BubbleSort => "bubble-sort",
            Family::BinarySearch => "binary-search",
            Family::InterpolationSearch => "interpolation-search",
            Family::TernarySearch => "ternary-search",
            Family::Dijkstra => "dijkstra",
            Family::CoinChange => "coin-change",
            Family::Lcs => "lcs",
            Family::ActivitySelection => "activity-selection",
            Family::FractionalKnapsack => "fractional-knapsack",
            Family::JobScheduling => "job-scheduling",
            Family::PreorderTraversal => "preorder-traversal",
            Family::InorderTraversal => "inorder-traversal",
            Family::PostorderTraversal => "postorder-traversal",
        }
    }

    /// Tags that may end a trace of this family
    pub fn terminal_tags(self) -> &'static [ActionTag] {
        match self {
            Family::BinarySearch | Family::InterpolationSearch | Family::TernarySearch => {
                &[ActionTag::Found, ActionTag::NotFound]
            }
            Family::Dijkstra => &[
                ActionTag::PathFound,
                ActionTag::Unreachable,
                ActionTag::Complete,
            ],
            Family::CoinChange => &[ActionTag::Complete, ActionTag::Unmakeable],
            _ => &[ActionTag::Complete],
        }
    }

    pub fn traversal_order(self) -> Option<TraversalOrder> {
        match self {
            Family::PreorderTraversal => Some(TraversalOrder::PreOrder),
            Family::InorderTraversal => Some(TraversalOrder::InOrder),
            Family::PostorderTraversal => Some(TraversalOrder::PostOrder),
            _ => None,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        Family::ALL
            .into_iter()
            .find(|family| family.id() == needle)
            .ok_or_else(|| format!("unknown algorithm family '{}'", s))
    }
}

/// Typed tracer input, as produced by the validation gate
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Sort(SortParams),
    Search(SearchParams),
    Graph(GraphParams),
    Coins(CoinParams),
    Strings(LcsParams),
    Activities(Vec<Activity>),
    Knapsack(KnapsackParams),
    Jobs(Vec<Job>),
    Tree(TreeParams),
}

impl Params {
    /// Short name of the parameter shape, used in error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Params::Sort(_) => "sort",
            Params::Search(_) => "search",
            Params::Graph(_) => "graph",
            Params::Coins(_) => "coins",
            Params::Strings(_) => "strings",
            Params::Activities(_) => "activities",
            Params::Knapsack(_) => "knapsack",
            Params::Jobs(_) => "jobs",
            Params::Tree(_) => "tree",
        }
    }
}

/// Validate `params` and run the tracer for `family`.
///
/// Validation failures come back before any tracer runs, so no partial trace
/// is ever produced.
pub fn generate_trace(family: Family, params: &Params) -> Result<Trace, Error> {
    if let Err(err) = gate::validate(family, params) {
        tracing::warn!(%family, field = %err.field, reason = %err.reason, "input rejected");
        return Err(err.into());
    }

    let trace = match (family, params) {
        (Family::BubbleSort, Params::Sort(p)) => sort::trace(p)?,
        (Family::BinarySearch, Params::Search(p)) => search::trace_binary(p)?,
        (Family::InterpolationSearch, Params::Search(p)) => search::trace_interpolation(p)?,
        (Family::TernarySearch, Params::Search(p)) => search::trace_ternary(p)?,
        (Family::Dijkstra, Params::Graph(p)) => shortest_path::trace(p)?,
        (Family::CoinChange, Params::Coins(p)) => coin_change::trace(p)?,
        (Family::Lcs, Params::Strings(p)) => lcs::trace(p)?,
        (Family::ActivitySelection, Params::Activities(p)) => activity::trace(p)?,
        (Family::FractionalKnapsack, Params::Knapsack(p)) => knapsack::trace(p)?,
        (Family::JobScheduling, Params::Jobs(p)) => jobs::trace(p)?,
        (Family::PreorderTraversal, Params::Tree(p)) => {
            traversal::trace(p, TraversalOrder::PreOrder)?
        }
        (Family::InorderTraversal, Params::Tree(p)) => traversal::trace(p, TraversalOrder::InOrder)?,
        (Family::PostorderTraversal, Params::Tree(p)) => {
            traversal::trace(p, TraversalOrder::PostOrder)?
        }
        (family, params) => {
            return Err(TraceError::contract(
                family,
                format!("{} parameters do not fit this family", params.shape()),
            )
            .into())
        }
    };

    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_round_trips_through_id() {
        for family in Family::ALL {
            assert_eq!(family.id().parse::<Family>().unwrap(), family);
        }
        assert_eq!("Binary_Search".parse::<Family>().unwrap(), Family::BinarySearch);
        assert!("quick-sort".parse::<Family>().is_err());
    }

    #[test]
    fn test_mismatched_params_are_rejected() {
        let params = Params::Coins(CoinParams {
            coins: vec![1],
            amount: 3,
        });
        let err = generate_trace(Family::BubbleSort, &params).unwrap_err();
        match err {
            Error::Validation(v) => assert_eq!(v.field, "family"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
