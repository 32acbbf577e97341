// Tunables for trace generation and playback

/// Delay between automatic playback steps when none is configured
pub const DEFAULT_SPEED_MS: u64 = 500;

/// Fastest allowed playback interval
pub const MIN_SPEED_MS: u64 = 10;

/// Slowest allowed playback interval
pub const MAX_SPEED_MS: u64 = 10_000;

/// Upper bound on snapshots recorded for a single trace
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 250_000;

/// Largest array accepted by the sort and search tracers
pub const MAX_ARRAY_LEN: usize = 64;

/// Largest graph accepted by the shortest-path tracer
pub const MAX_NODES: usize = 64;

/// Heaviest edge accepted by the shortest-path tracer.
/// With at most `MAX_NODES` vertices no path length can overflow.
pub const MAX_EDGE_WEIGHT: u64 = 1_000_000;

/// Largest job profit or knapsack item value
pub const MAX_PROFIT: u64 = 1_000_000;

/// Largest target amount for coin change.
/// Every snapshot carries the whole table, so this bounds trace memory.
pub const MAX_COIN_AMOUNT: u64 = 200;

/// Largest number of coin denominations
pub const MAX_COIN_TYPES: usize = 16;

/// Longest string accepted by the LCS tracer
pub const MAX_LCS_LEN: usize = 32;

/// Largest candidate list for the greedy tracers
pub const MAX_GREEDY_ITEMS: usize = 128;

/// Latest deadline accepted by job scheduling
pub const MAX_DEADLINE: u64 = 1_000;

/// Largest tree (level-order slots, including holes)
pub const MAX_TREE_SLOTS: usize = 255;
