//! Run statistics and the plain-text report printed after a run.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::params::MiningParams;
use crate::types::Item;

/// Counters and timings of one `mine` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MiningStats {
    /// Data lines read in pass 1.
    pub data_lines: usize,
    /// Transactions containing the whole target pattern.
    pub database_size: usize,
    pub promising_items: usize,
    pub support_threshold: f64,
    /// Full reads of the source (1 when the target was unreachable, else 2).
    pub passes: u32,
    pub patterns: u64,
    pub joins: u64,
    pub elapsed: Duration,
    /// Target item that made the run end after pass 1, if any.
    pub unreachable_target: Option<Item>,
    pub peak_memory_mb: Option<f64>,
}

/// Memory measurement hook; the engine calls `reset` once and `checkpoint` after
/// each expensive phase.
pub trait MemoryProbe {
    fn reset(&mut self);
    fn checkpoint(&mut self);
    fn peak_mb(&self) -> Option<f64>;
}

/// Probe that measures nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProbe;

impl MemoryProbe for NoProbe {
    fn reset(&mut self) {}
    fn checkpoint(&mut self) {}
    fn peak_mb(&self) -> Option<f64> {
        None
    }
}

/// Report block for humans: input, thresholds, time, memory and counts.
pub struct StatsReport<'a> {
    pub input: &'a str,
    pub params: &'a MiningParams,
    pub stats: &'a MiningStats,
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target: Vec<String> = self.params.target.iter().map(|i| i.to_string()).collect();
        writeln!(f, "=============  TARGET PHUI MINING - STATS =============")?;
        writeln!(f, " Input: {}", self.input)?;
        writeln!(f, " Min utility: {}", self.params.min_utility)?;
        writeln!(f, " Target pattern: [{}]", target.join(", "))?;
        writeln!(
            f,
            " Periodicity: [{}, {}]  average: [{}, {}]",
            self.params.min_periodicity,
            self.params.max_periodicity,
            self.params.min_average_periodicity,
            self.params.max_average_periodicity
        )?;
        writeln!(f, " Total time ~ {} ms", self.stats.elapsed.as_millis())?;
        match self.stats.peak_memory_mb {
            Some(mb) => writeln!(f, " Maximal memory ~ {mb:.2} MB")?,
            None => writeln!(f, " Maximal memory ~ n/a")?,
        }
        if let Some(item) = self.stats.unreachable_target {
            writeln!(f, " Target item {item} cannot be reached")?;
        }
        writeln!(f, " Target PHUIs count: {}", self.stats.patterns)?;
        writeln!(f, " Join count: {}", self.stats.joins)?;
        write!(f, "========================================================")
    }
}
