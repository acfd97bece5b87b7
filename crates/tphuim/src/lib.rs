//! Periodic target high-utility itemset mining.
//!
//! Given a transactional database where every item carries a per-transaction
//! utility, find each itemset that contains a fixed target pattern, reaches a
//! minimum total utility, and recurs with a periodicity inside configured bounds.
//!
//! Pipeline
//! - `preprocess`: pass 1 (TWU, support, periodicity, target filtering).
//! - `order`: ascending (TWU, item) ranking of promising items.
//! - `seed`: pass 2, one utility list per promising item.
//! - `join`: utility-list construction for `prefix ∪ {x, y}` with pruning.
//! - `miner`: depth-first branch-and-bound search with target matching.
//! - `sink`: accepted itemsets as `PatternRecord`s, in memory or as text lines.
//!
//! `engine::mine` runs the whole pipeline against any `TransactionSource`.
//!
//! API Policy
//! - The engine modules are public so tests and benches can drive single stages.
//!   `api` lists the surface callers are expected to use.

pub mod api;
pub mod db;
pub mod engine;
pub mod error;
pub mod join;
pub mod miner;
pub mod order;
pub mod params;
pub mod preprocess;
pub mod seed;
pub mod sink;
pub mod stats;
pub mod synth;
pub mod types;
pub mod utility_list;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use engine::{mine, mine_to_path, mine_with_probe};
pub use error::{MineError, ParseError};
pub use params::MiningParams;
pub use types::{Item, Periodicity, Tid, Utility};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::db::{FileSource, MemorySource, TransactionSource};
    pub use crate::engine::{mine, mine_to_path};
    pub use crate::params::MiningParams;
    pub use crate::sink::{ItemsetSink, PatternRecord, VecSink, WriterSink};
    pub use crate::stats::MiningStats;
    pub use crate::types::{Item, Utility};
}
