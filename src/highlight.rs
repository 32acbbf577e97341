//! Highlight mapper
//!
//! Maps a snapshot's [`ActionTag`] to the pseudocode line a code panel should
//! highlight. Each family has its own listing ([`pseudocode`]) and its own
//! table. A tag without a line is not an error; it simply highlights nothing.

use crate::snapshot::ActionTag;
use crate::tracers::Family;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// 1-based line number into a family's pseudocode listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineId(pub usize);

/// Pseudocode shown next to the playback for `family`
pub fn pseudocode(family: Family) -> &'static [&'static str] {
    match family {
        Family::BubbleSort => &[
            "for i in 0 .. n-1:",
            "    swapped = false",
            "    for j in 0 .. n-1-i:",
            "        if a[j], a[j+1] out of order:",
            "            swap(a[j], a[j+1]); swapped = true",
            "    if not swapped:",
            "        break",
            "return a",
        ],
        Family::BinarySearch => &[
            "left, right = 0, n-1",
            "while left <= right:",
            "    mid = (left + right) / 2",
            "    if a[mid] == target: return mid",
            "    if a[mid] < target: left = mid + 1",
            "    else: right = mid - 1",
            "return not found",
        ],
        Family::InterpolationSearch => &[
            "left, right = 0, n-1",
            "while left <= right and a[left] <= target <= a[right]:",
            "    if left == right: return left if a[left] == target",
            "    pos = left + (target-a[left]) * (right-left) / (a[right]-a[left])",
            "    if a[pos] == target: return pos",
            "    if a[pos] < target: left = pos + 1",
            "    else: right = pos - 1",
            "return not found",
        ],
        Family::TernarySearch => &[
            "left, right = 0, n-1",
            "while left <= right:",
            "    mid1 = left + (right-left)/3; mid2 = right - (right-left)/3",
            "    if a[mid1] == target: return mid1",
            "    if a[mid2] == target: return mid2",
            "    if target < a[mid1]: right = mid1 - 1",
            "    elif target > a[mid2]: left = mid2 + 1",
            "    else: left, right = mid1 + 1, mid2 - 1",
            "return not found",
        ],
        Family::Dijkstra => &[
            "dist[*] = inf; dist[source] = 0",
            "while an unvisited vertex has finite dist:",
            "    u = unvisited vertex with smallest dist",
            "    mark u visited",
            "    if u == target: break",
            "    for each edge (u, v, w) with v unvisited:",
            "        if dist[u] + w < dist[v]: dist[v] = dist[u] + w; parent[v] = u",
            "follow parent[] back from target",
        ],
        Family::CoinChange => &[
            "dp[0] = 0; dp[1 ..= amount] = inf",
            "for i in 1 ..= amount:",
            "    for coin in coins where coin <= i:",
            "        if dp[i-coin] + 1 < dp[i]:",
            "            dp[i] = dp[i-coin] + 1; choice[i] = coin",
            "if dp[amount] == inf: return impossible",
            "while amount > 0: take choice[amount]; amount -= choice[amount]",
            "return taken coins",
        ],
        Family::Lcs => &[
            "dp[0 ..= m][0 ..= n] = 0",
            "for i in 1 ..= m, j in 1 ..= n:",
            "    if a[i-1] == b[j-1]: dp[i][j] = dp[i-1][j-1] + 1",
            "    else: dp[i][j] = max(dp[i-1][j], dp[i][j-1])",
            "i, j = m, n",
            "while i > 0 and j > 0: take matches, else step toward the larger neighbour",
            "return subsequence",
        ],
        Family::ActivitySelection => &[
            "sort activities by end time",
            "last_end = -inf",
            "for each activity:",
            "    if start >= last_end: select it; last_end = end",
            "    else: skip it",
            "return selection",
        ],
        Family::FractionalKnapsack => &[
            "sort items by value / weight, highest first",
            "for each item while capacity > 0:",
            "    if weight <= capacity: take it whole; capacity -= weight",
            "    else: take capacity / weight of it; capacity = 0",
            "return total value",
        ],
        Family::JobScheduling => &[
            "sort jobs by profit, highest first",
            "for each job:",
            "    for t from min(deadline, max_deadline) down to 1:",
            "        if slot[t] is free: slot[t] = job; break",
            "    if no slot was free: reject job",
            "return schedule",
        ],
        Family::PreorderTraversal => &[
            "traverse(node):",
            "    process(node)",
            "    if node.left: traverse(node.left)",
            "    if node.right: traverse(node.right)",
        ],
        Family::InorderTraversal => &[
            "traverse(node):",
            "    if node.left: traverse(node.left)",
            "    process(node)",
            "    if node.right: traverse(node.right)",
        ],
        Family::PostorderTraversal => &[
            "traverse(node):",
            "    if node.left: traverse(node.left)",
            "    if node.right: traverse(node.right)",
            "    process(node)",
        ],
    }
}

fn bindings(family: Family) -> &'static [(ActionTag, usize)] {
    use ActionTag::*;
    match family {
        Family::BubbleSort => &[
            (Initialize, 1),
            (Compare, 4),
            (Swap, 5),
            (PassComplete, 6),
            (NoSwaps, 7),
            (Complete, 8),
        ],
        Family::BinarySearch => &[
            (Initialize, 1),
            (ComputeMid, 3),
            (Compare, 4),
            (Found, 4),
            (NarrowRight, 5),
            (NarrowLeft, 6),
            (NotFound, 7),
        ],
        Family::InterpolationSearch => &[
            (Initialize, 1),
            (Estimate, 4),
            (Compare, 5),
            (Found, 5),
            (NarrowRight, 6),
            (NarrowLeft, 7),
            (NotFound, 8),
        ],
        Family::TernarySearch => &[
            (Initialize, 1),
            (ComputeMid, 3),
            (Compare, 4),
            (Found, 4),
            (NarrowLeft, 6),
            (NarrowRight, 7),
            (NarrowMiddle, 8),
            (NotFound, 9),
        ],
        Family::Dijkstra => &[
            (Initialize, 1),
            (Visit, 4),
            (Relax, 7),
            (PathFound, 8),
            (Unreachable, 2),
            (Complete, 2),
        ],
        Family::CoinChange => &[
            (Initialize, 1),
            (Compare, 4),
            (Update, 5),
            (Unmakeable, 6),
            (Backtrack, 7),
            (Complete, 8),
        ],
        Family::Lcs => &[
            (Initialize, 1),
            (Match, 3),
            (Compare, 4),
            (Backtrack, 6),
            (Complete, 7),
        ],
        Family::ActivitySelection => &[
            (Initialize, 1),
            (Sort, 1),
            (Select, 4),
            (Reject, 5),
            (Complete, 6),
        ],
        Family::FractionalKnapsack => &[
            (Initialize, 1),
            (Sort, 1),
            (Select, 3),
            (PartialTake, 4),
            (Complete, 5),
        ],
        Family::JobScheduling => &[
            (Initialize, 1),
            (Sort, 1),
            (Select, 4),
            (Reject, 5),
            (Complete, 6),
        ],
        Family::PreorderTraversal => &[
            (Initialize, 1),
            (Visit, 2),
            (DescendLeft, 3),
            (DescendRight, 4),
        ],
        Family::InorderTraversal => &[
            (Initialize, 1),
            (DescendLeft, 2),
            (Visit, 3),
            (DescendRight, 4),
        ],
        Family::PostorderTraversal => &[
            (Initialize, 1),
            (DescendLeft, 2),
            (DescendRight, 3),
            (Visit, 4),
        ],
    }
}

/// Action tag to pseudocode line lookup for one family
#[derive(Debug, Clone)]
pub struct HighlightMapper {
    family: Family,
    table: FxHashMap<ActionTag, LineId>,
}

impl HighlightMapper {
    pub fn for_family(family: Family) -> Self {
        let table = bindings(family)
            .iter()
            .map(|&(tag, line)| (tag, LineId(line)))
            .collect();
        HighlightMapper { family, table }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Line to highlight for `tag`, if the family has one
    pub fn lookup(&self, tag: ActionTag) -> Option<LineId> {
        self.table.get(&tag).copied()
    }

    pub fn listing(&self) -> &'static [&'static str] {
        pseudocode(self.family)
    }
}
