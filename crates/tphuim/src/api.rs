//! Curated API for callers (CLI, benches, demos).
//!
//! Important
//! - Stage modules stay public for tests; prefer these re-exports in new code so
//!   call sites read the same across the workspace.

// Inputs
pub use crate::db::{parse_transaction, FileSource, MemorySource, TransactionSource};
pub use crate::types::{Item, Periodicity, Transaction, Utility, UNBOUNDED_PERIODICITY};
// Configuration and errors
pub use crate::error::{MineError, ParseError, ParseErrorKind};
pub use crate::params::{MiningParams, ParamError};
// Running
pub use crate::engine::{mine, mine_to_path, mine_with_probe};
pub use crate::stats::{MemoryProbe, MiningStats, NoProbe, StatsReport};
// Results
pub use crate::sink::{filter_by_targets, ItemsetSink, PatternRecord, VecSink, WriterSink};
// Synthetic data
pub use crate::synth::{draw_transactions, render, ReplayToken, SynthCfg};
