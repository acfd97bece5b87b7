//! Pass 1: target filtering, TWU, support and periodicity per item.
//!
//! A transaction is retained only if it contains every target item; retained
//! transactions receive consecutive tids from 0 and form the database all later
//! stages see. Non-retained lines are remembered only through the ordinal queue
//! that lets pass 2 skip them.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::db::{data_lines, parse_transaction, TransactionSource};
use crate::error::MineError;
use crate::params::{average_periodicity, MiningParams};
use crate::types::{Item, Periodicity, Tid, Utility};
use crate::utility_list::PeriodWindow;

/// Per-item statistics over the retained transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemStats {
    pub support: u32,
    pub twu: Utility,
    pub periods: PeriodWindow,
}

impl ItemStats {
    #[inline]
    pub fn smallest_periodicity(&self) -> Periodicity {
        self.periods.smallest
    }

    #[inline]
    pub fn largest_periodicity(&self) -> Periodicity {
        self.periods.largest
    }

    #[inline]
    pub fn last_seen(&self) -> Option<Tid> {
        self.periods.last
    }

    fn observe(&mut self, tid: Tid, transaction_utility: Utility) {
        self.twu += transaction_utility;
        self.support += 1;
        self.periods.step(tid);
    }

    /// Support, largest periodicity and TWU all within what an accepted itemset needs.
    #[inline]
    pub fn is_promising(&self, params: &MiningParams, support_threshold: f64) -> bool {
        self.support as f64 >= support_threshold
            && self.periods.largest <= params.max_periodicity
            && self.twu >= params.min_utility
    }
}

/// Result of pass 1.
#[derive(Clone, Debug, Default)]
pub struct ScanSummary {
    /// Data lines read, retained or not.
    pub data_lines: usize,
    /// Retained transactions; the tid space is `0..database_size`.
    pub database_size: usize,
    /// Data-line ordinals of the retained transactions, in tid order.
    pub retained: VecDeque<usize>,
    pub items: HashMap<Item, ItemStats>,
    /// Sum of retained transaction lengths.
    pub retained_item_occurrences: usize,
}

impl ScanSummary {
    pub fn stats(&self, item: Item) -> Option<&ItemStats> {
        self.items.get(&item)
    }

    pub fn average_transaction_length(&self) -> f64 {
        if self.database_size == 0 {
            0.0
        } else {
            self.retained_item_occurrences as f64 / self.database_size as f64
        }
    }
}

/// Run pass 1 over `source`, retaining transactions that contain all of `target`.
pub fn scan<S: TransactionSource + ?Sized>(
    source: &S,
    target: &[Item],
) -> Result<ScanSummary, MineError> {
    let reader = source
        .open()
        .map_err(|e| MineError::io(format!("opening {}", source.describe()), e))?;
    let mut summary = ScanSummary::default();
    let mut pending: HashSet<Item> = HashSet::with_capacity(target.len());

    for line in data_lines(reader) {
        let line = line.map_err(|e| MineError::io(format!("reading {}", source.describe()), e))?;
        let txn = parse_transaction(&line.text, line.line)?;
        summary.data_lines += 1;

        pending.clear();
        pending.extend(target.iter().copied());
        for item in &txn.items {
            if pending.is_empty() {
                break;
            }
            pending.remove(item);
        }
        if !pending.is_empty() {
            continue;
        }

        let tid = summary.database_size as Tid;
        summary.database_size += 1;
        summary.retained.push_back(line.ordinal);
        summary.retained_item_occurrences += txn.items.len();
        for &item in &txn.items {
            summary
                .items
                .entry(item)
                .or_default()
                .observe(tid, txn.transaction_utility);
        }
    }

    // Closing gap: largest periodicity only.
    for stats in summary.items.values_mut() {
        stats.periods.close(summary.database_size);
    }

    tracing::debug!(
        data_lines = summary.data_lines,
        retained = summary.database_size,
        items = summary.items.len(),
        avg_len = summary.average_transaction_length(),
        "pass 1 complete"
    );
    if tracing::enabled!(tracing::Level::TRACE) {
        let mut items: Vec<_> = summary.items.iter().collect();
        items.sort_unstable_by_key(|(item, _)| **item);
        for (item, s) in items {
            tracing::trace!(
                item,
                support = s.support,
                twu = s.twu,
                min_per = s.smallest_periodicity(),
                max_per = s.largest_periodicity(),
                avg_per = average_periodicity(summary.database_size, s.support as usize),
                "item stats"
            );
        }
    }
    Ok(summary)
}
