//! Utility-list join: the list of `prefix ∪ {x, y}` from the lists of
//! `prefix ∪ {x}` and `prefix ∪ {y}`.
//!
//! Pruning while merging (each bound only shrinks as the itemset grows):
//! - utility: `sumIutils + sumRutils` of `x`, minus what every unmatched element
//!   of `x` contributed, must stay ≥ `minUtility`;
//! - support: elements of `x` still able to match must stay ≥ the support threshold;
//! - largest periodicity: any gap above `maxPeriodicity` ends the join.
//!
//! Smallest and average periodicity are not monotone under extension and are only
//! checked at acceptance time in the search.

use crate::miner::MiningContext;
use crate::types::Utility;
use crate::utility_list::{Element, PeriodWindow, UtilityList};

/// Build the list of `prefix ∪ {x, y}`; `None` when the itemset never occurs or a bound
/// proves it and all its extensions useless. `x` and `y` must both extend `prefix` (`None` = empty prefix).
pub fn construct(
    ctx: &MiningContext,
    prefix: Option<&UtilityList>,
    x: &UtilityList,
    y: &UtilityList,
) -> Option<UtilityList> {
    let min_utility = ctx.params.min_utility;
    let max_periodicity = ctx.params.max_periodicity;

    let mut xy = UtilityList::new(y.item);
    let mut window = PeriodWindow::default();
    let mut total_utility: Utility = x.upper_bound();
    let mut total_support = x.support() as f64;

    for ex in x.elements() {
        let Some(ey) = y.find(ex.tid) else {
            total_utility -= ex.iutils + ex.rutils;
            if total_utility < min_utility {
                return None;
            }
            total_support -= 1.0;
            if total_support < ctx.support_threshold {
                return None;
            }
            continue;
        };
        let iutils = match prefix {
            None => ex.iutils + ey.iutils,
            // The prefix utility is counted in both ex and ey.
            Some(p) => match p.find(ex.tid) {
                Some(e) => ex.iutils + ey.iutils - e.iutils,
                None => continue,
            },
        };
        if window.step(ex.tid) > max_periodicity {
            return None;
        }
        xy.push(Element::new(ex.tid, iutils, ey.rutils));
    }

    if window.close(ctx.database_size) > max_periodicity {
        return None;
    }
    if xy.support() == 0 || (xy.support() as f64) < ctx.support_threshold {
        return None;
    }
    Some(xy.with_periodicity(&window))
}
