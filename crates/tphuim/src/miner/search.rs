//! Recursive runner over utility lists.

use std::io;

use crate::join::construct;
use crate::sink::{ItemsetSink, PatternRecord};
use crate::types::Item;
use crate::utility_list::UtilityList;

use super::context::MiningContext;

/// Counters of one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Itemsets handed to the sink.
    pub patterns: u64,
    /// Calls to the join operator, pruned or not.
    pub joins: u64,
}

/// Search all extensions of the empty prefix; `seeds` are the single-item lists in
/// ascending order.
pub fn search<K: ItemsetSink + ?Sized>(
    ctx: &MiningContext,
    seeds: &[UtilityList],
    sink: &mut K,
) -> io::Result<SearchOutcome> {
    let mut runner = SearchRunner::new(ctx, sink);
    runner.recur(None, seeds, 0)?;
    Ok(runner.outcome)
}

/// Shared context, the output sink, counters and the prefix stack.
struct SearchRunner<'a, K: ?Sized> {
    ctx: &'a MiningContext,
    sink: &'a mut K,
    outcome: SearchOutcome,
    /// Items of the current prefix; each frame pushes before recursing and pops after.
    prefix: Vec<Item>,
}

impl<'a, K: ItemsetSink + ?Sized> SearchRunner<'a, K> {
    fn new(ctx: &'a MiningContext, sink: &'a mut K) -> Self {
        Self {
            ctx,
            sink,
            outcome: SearchOutcome::default(),
            prefix: Vec::new(),
        }
    }

    fn recur(
        &mut self,
        prefix_list: Option<&UtilityList>,
        candidates: &[UtilityList],
        matched: usize,
    ) -> io::Result<()> {
        let ctx = self.ctx;
        let target_ranks = ctx.target_ranks();
        for (i, x) in candidates.iter().enumerate() {
            let mut matched_x = matched;
            if let Some(&required) = target_ranks.get(matched) {
                let rank = ctx.order.sort_rank(x.item);
                if rank == required {
                    matched_x += 1;
                } else if required < rank {
                    // Candidates ascend in rank: the pending target item can no longer
                    // appear in this branch. Stopping here is required, not an optimization.
                    break;
                }
            }

            if ctx.accepts(x, matched_x) {
                self.emit(x, matched_x)?;
            }

            if x.upper_bound() < ctx.params.min_utility {
                continue;
            }
            let mut extensions = Vec::with_capacity(candidates.len() - i - 1);
            for y in &candidates[i + 1..] {
                self.outcome.joins += 1;
                if let Some(xy) = construct(ctx, prefix_list, x, y) {
                    extensions.push(xy);
                }
            }
            if extensions.is_empty() {
                continue;
            }
            self.prefix.push(x.item);
            self.recur(Some(x), &extensions, matched_x)?;
            self.prefix.pop();
        }
        Ok(())
    }

    fn emit(&mut self, x: &UtilityList, matched: usize) -> io::Result<()> {
        let mut items = Vec::with_capacity(self.prefix.len() + 1);
        items.extend_from_slice(&self.prefix);
        items.push(x.item);
        let record = PatternRecord {
            items,
            utility: x.sum_iutils,
            smallest_periodicity: x.smallest_periodicity,
            largest_periodicity: x.largest_periodicity,
            average_periodicity: x.average_periodicity(self.ctx.database_size),
            matched_target: matched,
        };
        self.sink.accept(&record)?;
        self.outcome.patterns += 1;
        Ok(())
    }
}
