//! Pass 2: single-item utility lists of the promising items.
//!
//! Reads the source again in file order and consumes only the lines whose ordinals
//! pass 1 queued. Once the queue is empty no later line can matter, so reading stops.

use std::collections::VecDeque;

use crate::db::{data_lines, parse_transaction, TransactionSource};
use crate::error::MineError;
use crate::miner::MiningContext;
use crate::types::{Item, Tid, Utility};
use crate::utility_list::{Element, UtilityList};

/// Build one list per promising item, returned in ascending order.
pub fn build_seed_lists<S: TransactionSource + ?Sized>(
    source: &S,
    ctx: &MiningContext,
    mut retained: VecDeque<usize>,
) -> Result<Vec<UtilityList>, MineError> {
    let mut lists: Vec<UtilityList> = ctx
        .order
        .items()
        .iter()
        .map(|&item| {
            let window = ctx.stats.get(&item).map(|s| s.periods).unwrap_or_default();
            UtilityList::new(item).with_periodicity(&window)
        })
        .collect();

    let reader = source
        .open()
        .map_err(|e| MineError::io(format!("opening {}", source.describe()), e))?;
    let mut tid: Tid = 0;
    let mut revised: Vec<(Item, Utility)> = Vec::new();
    for line in data_lines(reader) {
        let Some(&next) = retained.front() else {
            break;
        };
        let line = line.map_err(|e| MineError::io(format!("reading {}", source.describe()), e))?;
        if line.ordinal != next {
            continue;
        }
        retained.pop_front();
        let txn = parse_transaction(&line.text, line.line)?;

        revised.clear();
        revised.extend(txn.pairs().filter(|&(item, _)| ctx.order.contains(item)));
        ctx.order.sort_pairs(&mut revised);
        let mut remaining: Utility = revised.iter().map(|&(_, u)| u).sum();
        for &(item, utility) in &revised {
            remaining -= utility;
            if let Some(rank) = ctx.order.rank(item) {
                lists[rank as usize - 1].push(Element::new(tid, utility, remaining));
            }
        }
        tid += 1;
    }

    tracing::debug!(lists = lists.len(), transactions = tid, "pass 2 complete");
    Ok(lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemorySource;
    use crate::miner::Preparation;
    use crate::params::MiningParams;
    use crate::preprocess::scan;

    #[test]
    fn seed_lists_use_filtered_tids_and_remaining_utility() {
        let src = MemorySource::from_lines([
            "1 2:10:5 5",
            "1 3:10:4 6",
            "# skipped",
            "1 2 3:10:3 3 4",
            "3 4:2:1 1",
        ]);
        let params = MiningParams::new(0, vec![2]);
        let summary = scan(&src, &params.target_set()).unwrap();
        let ctx = match MiningContext::prepare(&params, &summary) {
            Preparation::Ready(ctx) => ctx,
            other => panic!("unexpected {other:?}"),
        };
        let lists = build_seed_lists(&src, &ctx, summary.retained).unwrap();
        // retained: lines 1 and 4 -> tids 0, 1; order 3 (twu 10), 1 (20), 2 (20)
        let items: Vec<Item> = lists.iter().map(|l| l.item).collect();
        assert_eq!(items, vec![3, 1, 2]);
        assert_eq!(lists[0].elements(), &[Element::new(1, 4, 6)]);
        assert_eq!(
            lists[1].elements(),
            &[Element::new(0, 5, 5), Element::new(1, 3, 3)]
        );
        assert_eq!(
            lists[2].elements(),
            &[Element::new(0, 5, 0), Element::new(1, 3, 0)]
        );
        for l in &lists {
            let si: Utility = l.elements().iter().map(|e| e.iutils).sum();
            let sr: Utility = l.elements().iter().map(|e| e.rutils).sum();
            assert_eq!((l.sum_iutils, l.sum_rutils), (si, sr));
        }
        // seed periodicity comes from pass 1
        assert_eq!(lists[0].largest_periodicity, 2);
    }
}
