//! Read-only state shared by the seed pass, the join operator and the search.

use std::collections::HashMap;

use crate::order::ItemOrder;
use crate::params::MiningParams;
use crate::preprocess::{ItemStats, ScanSummary};
use crate::types::{Item, Rank};
use crate::utility_list::UtilityList;

/// Why a target item rules out every result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetMiss {
    /// No retained transaction contains it.
    Absent,
    /// It fails the TWU, support or largest-periodicity bound on its own.
    NotPromising,
}

/// Outcome of turning a pass-1 summary into a search context.
#[derive(Debug)]
pub enum Preparation {
    Ready(MiningContext),
    Unreachable { item: Item, reason: TargetMiss },
}

/// Everything the search reads; built once, never mutated.
#[derive(Clone, Debug)]
pub struct MiningContext {
    pub params: MiningParams,
    /// Retained transactions.
    pub database_size: usize,
    pub support_threshold: f64,
    pub order: ItemOrder,
    /// Statistics of the promising items.
    pub stats: HashMap<Item, ItemStats>,
    /// Target items in the global order.
    pub target: Vec<Item>,
    target_ranks: Vec<Rank>,
}

impl MiningContext {
    pub fn prepare(params: &MiningParams, scan: &ScanSummary) -> Preparation {
        let threshold = params.support_pruning_threshold(scan.database_size);
        let mut target = params.target_set();
        for &item in &target {
            match scan.stats(item) {
                None => {
                    return Preparation::Unreachable {
                        item,
                        reason: TargetMiss::Absent,
                    }
                }
                Some(s) if !s.is_promising(params, threshold) => {
                    return Preparation::Unreachable {
                        item,
                        reason: TargetMiss::NotPromising,
                    }
                }
                Some(_) => {}
            }
        }

        let stats: HashMap<Item, ItemStats> = scan
            .items
            .iter()
            .filter(|(_, s)| s.is_promising(params, threshold))
            .map(|(&item, &s)| (item, s))
            .collect();
        let order = ItemOrder::from_twu(stats.iter().map(|(&item, s)| (item, s.twu)));
        order.sort_items(&mut target);
        let target_ranks = target.iter().map(|&item| order.sort_rank(item)).collect();

        tracing::debug!(
            promising = order.len(),
            support_threshold = threshold,
            target = ?target,
            "search context ready"
        );
        Preparation::Ready(Self {
            params: params.clone(),
            database_size: scan.database_size,
            support_threshold: threshold,
            order,
            stats,
            target,
            target_ranks,
        })
    }

    /// Ranks of the target items, ascending.
    #[inline]
    pub fn target_ranks(&self) -> &[Rank] {
        &self.target_ranks
    }

    /// Acceptance test for an itemset whose branch matched `matched` target items.
    pub fn accepts(&self, list: &UtilityList, matched: usize) -> bool {
        let p = &self.params;
        matched >= self.target.len()
            && list.sum_iutils >= p.min_utility
            && p.average_in_bounds(list.average_periodicity(self.database_size))
            && list.smallest_periodicity >= p.min_periodicity
            && list.largest_periodicity <= p.max_periodicity
    }
}
