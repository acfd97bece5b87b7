//! End-to-end driver: validate, pass 1, context, pass 2, search.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use crate::db::{FileSource, TransactionSource};
use crate::error::MineError;
use crate::miner::{search, MiningContext, Preparation};
use crate::params::MiningParams;
use crate::preprocess::scan;
use crate::seed::build_seed_lists;
use crate::sink::{ItemsetSink, WriterSink};
use crate::stats::{MemoryProbe, MiningStats, NoProbe};

/// Mine `source` into `sink` without memory measurement.
pub fn mine<S, K>(source: &S, params: &MiningParams, sink: &mut K) -> Result<MiningStats, MineError>
where
    S: TransactionSource + ?Sized,
    K: ItemsetSink + ?Sized,
{
    mine_with_probe(source, params, sink, &mut NoProbe)
}

/// Mine `source` into `sink`, checkpointing `probe` after pass 2 and after the search.
pub fn mine_with_probe<S, K>(
    source: &S,
    params: &MiningParams,
    sink: &mut K,
    probe: &mut dyn MemoryProbe,
) -> Result<MiningStats, MineError>
where
    S: TransactionSource + ?Sized,
    K: ItemsetSink + ?Sized,
{
    params.validate()?;
    let start = Instant::now();
    probe.reset();

    let summary = scan(source, &params.target_set())?;
    let mut stats = MiningStats {
        data_lines: summary.data_lines,
        database_size: summary.database_size,
        support_threshold: params.support_pruning_threshold(summary.database_size),
        passes: 1,
        ..MiningStats::default()
    };

    let ctx = match MiningContext::prepare(params, &summary) {
        Preparation::Ready(ctx) => ctx,
        Preparation::Unreachable { item, reason } => {
            tracing::debug!(item, ?reason, "target item unreachable; empty result");
            stats.unreachable_target = Some(item);
            probe.checkpoint();
            stats.elapsed = start.elapsed();
            stats.peak_memory_mb = probe.peak_mb();
            return Ok(stats);
        }
    };
    stats.promising_items = ctx.order.len();

    let seeds = build_seed_lists(source, &ctx, summary.retained)?;
    stats.passes = 2;
    probe.checkpoint();

    let outcome =
        search(&ctx, &seeds, sink).map_err(|e| MineError::io("writing results", e))?;
    probe.checkpoint();

    stats.patterns = outcome.patterns;
    stats.joins = outcome.joins;
    stats.elapsed = start.elapsed();
    stats.peak_memory_mb = probe.peak_mb();
    tracing::debug!(
        patterns = stats.patterns,
        joins = stats.joins,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "search complete"
    );
    Ok(stats)
}

/// Mine the database file at `input` and write result lines to `output`.
///
/// The output file is created before any input is read, so an unwritable output
/// fails fast.
pub fn mine_to_path(
    input: &Path,
    output: &Path,
    params: &MiningParams,
    probe: &mut dyn MemoryProbe,
) -> Result<MiningStats, MineError> {
    params.validate()?;
    let file = File::create(output)
        .map_err(|e| MineError::io(format!("creating {}", output.display()), e))?;
    let mut sink = WriterSink::new(BufWriter::new(file));
    let stats = mine_with_probe(&FileSource::new(input), params, &mut sink, probe)?;
    sink.finish()
        .map_err(|e| MineError::io(format!("flushing {}", output.display()), e))?;
    Ok(stats)
}
