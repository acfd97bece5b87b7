//! Depth-first branch-and-bound search for periodic target high-utility itemsets.
//!
//! Purpose
//! - Enumerate extensions of the current prefix in ascending (TWU, item) order,
//!   track how many target items the branch has matched, and emit every itemset
//!   that passes the utility, periodicity and target tests.
//!
//! Pruning
//! - Expansion needs `sumIutils + sumRutils ≥ minUtility` (utility upper bound).
//! - The join operator prunes on utility, support and largest periodicity while
//!   merging (see `join`).
//! - Target order short-circuit: once a candidate ranks above the next unmatched
//!   target item, no later candidate at that depth can contain it, so enumeration
//!   at that depth stops.
//!
//! Split into `context.rs` (immutable state built after pass 1) and `search.rs`
//! (the recursive runner).

mod context;
mod search;

pub use context::{MiningContext, Preparation, TargetMiss};
pub use search::{search, SearchOutcome};
