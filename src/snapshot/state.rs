// Per-family state payloads carried by snapshots

use serde::Serialize;

/// Family-specific payload of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum State {
    Sort(SortState),
    Search(SearchState),
    ShortestPath(PathState),
    CoinChange(CoinState),
    Lcs(LcsState),
    Activity(ActivityState),
    Knapsack(KnapsackState),
    Jobs(JobState),
    Traversal(TraversalState),
}

/// Ordering applied by the sort tracer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// True when `a` may stay in front of `b`
    pub fn in_order(self, a: i64, b: i64) -> bool {
        match self {
            SortOrder::Ascending => a <= b,
            SortOrder::Descending => a >= b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortState {
    pub array: Vec<i64>,
    pub order: SortOrder,
    /// Outer pass currently running
    pub pass: Option<usize>,
    /// Inner index `j`; the pair under inspection is `(j, j + 1)`
    pub index: Option<usize>,
    /// Indices at or beyond this are in their final place
    pub sorted_from: usize,
    pub swapped_this_pass: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    pub array: Vec<i64>,
    pub target: i64,
    /// Inclusive bounds; `left > right` means the interval is empty
    pub left: i64,
    pub right: i64,
    /// Indices probed in the current iteration (midpoint, estimate, or both thirds)
    pub probes: Vec<usize>,
    pub found: Option<usize>,
}

impl SearchState {
    /// Number of indices still inside `[left, right]`
    pub fn interval_len(&self) -> usize {
        if self.left > self.right {
            0
        } else {
            (self.right - self.left + 1) as usize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathState {
    pub node_count: usize,
    pub source: usize,
    pub target: Option<usize>,
    /// Tentative distances; `None` is infinity
    pub distances: Vec<Option<u64>>,
    pub parents: Vec<Option<usize>>,
    /// Finalized vertices in finalization order
    pub visited: Vec<usize>,
    pub current: Option<usize>,
    /// Edge under relaxation as `(from, to)`
    pub edge: Option<(usize, usize)>,
    pub path: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinState {
    pub coins: Vec<u64>,
    pub amount: u64,
    /// `table[i]` is the fewest coins making `i`; `None` is infinity
    pub table: Vec<Option<u64>>,
    /// Coin that produced the best value of each cell
    pub choice: Vec<Option<u64>>,
    pub cell: Option<usize>,
    pub coin: Option<u64>,
    pub candidate: Option<u64>,
    /// Coins collected so far by the backtrack phase
    pub solution: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LcsState {
    pub a: String,
    pub b: String,
    pub table: Vec<Vec<u32>>,
    /// `(i, j)` cell being filled or walked
    pub cell: Option<(usize, usize)>,
    /// Values weighed for the current cell: `[diagonal + 1]` on a match,
    /// `[up, left]` otherwise
    pub candidates: Vec<u32>,
    /// Cells visited by the backtrack phase
    pub path: Vec<(usize, usize)>,
    /// Subsequence recovered so far, in forward order
    pub subsequence: String,
}

/// Outcome of a greedy candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    Pending,
    Selected,
    Partial,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    /// Position in the caller's input
    pub index: usize,
    pub start: u64,
    pub end: u64,
    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityState {
    pub activities: Vec<ActivityEntry>,
    pub sorted: bool,
    pub current: Option<usize>,
    pub last_end: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnapsackEntry {
    pub index: usize,
    pub weight: u64,
    pub value: u64,
    pub decision: Decision,
    /// Share of the item taken, in `[0, 1]`
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnapsackState {
    pub capacity: u64,
    pub remaining: u64,
    pub items: Vec<KnapsackEntry>,
    pub sorted: bool,
    pub current: Option<usize>,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobEntry {
    pub index: usize,
    pub deadline: u64,
    pub profit: u64,
    pub decision: Decision,
    pub slot: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobState {
    pub jobs: Vec<JobEntry>,
    pub sorted: bool,
    /// `slots[t]` holds the input index of the job run in time slot `t`
    pub slots: Vec<Option<usize>>,
    pub current: Option<usize>,
    pub profit: u64,
}

/// When the traversal processes a node relative to its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    PreOrder,
    InOrder,
    PostOrder,
}

/// Arena node of a binary tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversalState {
    pub order: TraversalOrder,
    /// Arena of nodes; index 0 is the root
    pub nodes: Vec<TreeNode>,
    pub current: Option<usize>,
    /// Explicit traversal stack, root first
    pub stack: Vec<usize>,
    /// Values processed so far
    pub output: Vec<i64>,
}
