//! Property tests over small synthetic databases.
//!
//! - Miner output equals a brute-force enumeration of every itemset.
//! - `sumIutils + sumRutils` never grows under extension.
//! - Join periodicities equal a direct scan of the resulting tid list.
//! - Identical runs produce identical bytes.

use proptest::prelude::*;
use std::collections::BTreeSet;

use tphuim::db::MemorySource;
use tphuim::join::construct;
use tphuim::miner::{MiningContext, Preparation};
use tphuim::preprocess::scan;
use tphuim::seed::build_seed_lists;
use tphuim::sink::{VecSink, WriterSink};
use tphuim::synth::{draw_transactions, render, ReplayToken, SynthCfg};
use tphuim::types::{Item, Periodicity, Tid, Transaction, Utility, UNBOUNDED_PERIODICITY};
use tphuim::utility_list::UtilityList;
use tphuim::{mine, MiningParams};

const ITEMS: u32 = 6;

fn database(seed: u64, transactions: usize) -> Vec<Transaction> {
    let cfg = SynthCfg {
        transactions,
        items: ITEMS,
        max_len: 4,
        max_utility: 5,
    };
    draw_transactions(cfg, ReplayToken::new(seed))
}

/// (smallest, largest) periodicity of an occurrence list in a database of `n` transactions.
fn periods(tids: &[Tid], n: usize) -> (Periodicity, Periodicity) {
    let n = n as Periodicity;
    let Some(&last) = tids.last() else {
        return (UNBOUNDED_PERIODICITY, n);
    };
    let inner: Vec<Periodicity> = tids.windows(2).map(|w| w[1] - w[0]).collect();
    let smallest = inner.iter().copied().min().unwrap_or(UNBOUNDED_PERIODICITY);
    let largest = inner
        .iter()
        .copied()
        .chain([tids[0] + 1, n - 1 - last])
        .max()
        .unwrap_or(0);
    (smallest, largest)
}

type Found = BTreeSet<(Vec<Item>, Utility, Periodicity, Periodicity)>;

/// Enumerate every itemset over `1..=ITEMS` and apply the acceptance test directly.
fn oracle(txns: &[Transaction], params: &MiningParams) -> Found {
    let target = params.target_set();
    let retained: Vec<&Transaction> = txns
        .iter()
        .filter(|t| target.iter().all(|&i| t.contains(i)))
        .collect();
    let n = retained.len();
    let mut found = Found::new();
    for mask in 1u32..(1 << ITEMS) {
        let items: Vec<Item> = (1..=ITEMS).filter(|i| mask & (1 << (i - 1)) != 0).collect();
        if !target.iter().all(|t| items.contains(t)) {
            continue;
        }
        let mut tids = Vec::new();
        let mut utility: Utility = 0;
        for (tid, t) in retained.iter().enumerate() {
            if items.iter().all(|&i| t.contains(i)) {
                tids.push(tid as Tid);
                utility += t
                    .pairs()
                    .filter(|(i, _)| items.contains(i))
                    .map(|(_, u)| u)
                    .sum::<Utility>();
            }
        }
        // never reported, even at min utility 0
        if tids.is_empty() {
            continue;
        }
        let (smallest, largest) = periods(&tids, n);
        let avg = n as f64 / (tids.len() as f64 + 1.0);
        if utility >= params.min_utility
            && params.average_in_bounds(avg)
            && smallest >= params.min_periodicity
            && largest <= params.max_periodicity
        {
            found.insert((items, utility, smallest, largest));
        }
    }
    found
}

fn mined(txns: &[Transaction], params: &MiningParams) -> Found {
    let mut sink = VecSink::default();
    mine(&MemorySource::new(render(txns)), params, &mut sink).unwrap();
    sink.records
        .into_iter()
        .map(|r| {
            let mut items = r.items;
            items.sort_unstable();
            (items, r.utility, r.smallest_periodicity, r.largest_periodicity)
        })
        .collect()
}

/// Context and seed lists with bounds loose enough that no join is pruned.
fn permissive(txns: &[Transaction]) -> (MiningContext, Vec<UtilityList>) {
    let params = MiningParams::new(0, vec![])
        .with_periodicity(0, u32::MAX)
        .with_average_periodicity(0, u32::MAX);
    let src = MemorySource::new(render(txns));
    let summary = scan(&src, &[]).unwrap();
    let Preparation::Ready(ctx) = MiningContext::prepare(&params, &summary) else {
        panic!("empty target is always reachable");
    };
    let seeds = build_seed_lists(&src, &ctx, summary.retained).unwrap();
    (ctx, seeds)
}

fn tids(list: &UtilityList) -> Vec<Tid> {
    list.elements().iter().map(|e| e.tid).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn miner_matches_brute_force(
        seed in any::<u64>(),
        transactions in 1usize..12,
        target in prop::collection::vec(1u32..=ITEMS, 0..=2),
        min_utility in 0i64..40,
        min_per in 0u32..3,
        max_per in 3u32..8,
        min_avg in 0u32..3,
        max_avg in 3u32..8,
    ) {
        let txns = database(seed, transactions);
        let params = MiningParams::new(min_utility, target)
            .with_periodicity(min_per, max_per)
            .with_average_periodicity(min_avg, max_avg);
        prop_assert_eq!(mined(&txns, &params), oracle(&txns, &params));
    }

    #[test]
    fn upper_bound_shrinks_under_extension(seed in any::<u64>(), transactions in 1usize..16) {
        let txns = database(seed, transactions);
        let (ctx, seeds) = permissive(&txns);
        for (i, x) in seeds.iter().enumerate() {
            let pairs: Vec<UtilityList> = seeds[i + 1..]
                .iter()
                .filter_map(|y| construct(&ctx, None, x, y))
                .collect();
            // nothing prunes here except pairs that never co-occur
            let co_occurring = seeds[i + 1..]
                .iter()
                .filter(|y| x.elements().iter().any(|e| y.find(e.tid).is_some()))
                .count();
            prop_assert_eq!(pairs.len(), co_occurring);
            prop_assert!(pairs.iter().all(|xy| xy.support() > 0));
            for (j, xy) in pairs.iter().enumerate() {
                prop_assert!(xy.upper_bound() <= x.upper_bound());
                prop_assert!(xy.sum_iutils <= xy.upper_bound());
                for xz in &pairs[j + 1..] {
                    if let Some(xyz) = construct(&ctx, Some(x), xy, xz) {
                        prop_assert!(xyz.upper_bound() <= xy.upper_bound());
                    }
                }
            }
        }
    }

    #[test]
    fn join_periodicity_matches_direct_scan(seed in any::<u64>(), transactions in 1usize..16) {
        let txns = database(seed, transactions);
        let (ctx, seeds) = permissive(&txns);
        for l in &seeds {
            let (s, g) = periods(&tids(l), ctx.database_size);
            prop_assert_eq!((l.smallest_periodicity, l.largest_periodicity), (s, g));
        }
        for (i, x) in seeds.iter().enumerate() {
            for y in &seeds[i + 1..] {
                let Some(xy) = construct(&ctx, None, x, y) else { continue };
                let t = tids(&xy);
                prop_assert!(t.windows(2).all(|w| w[0] < w[1]));
                let (s, g) = periods(&t, ctx.database_size);
                prop_assert_eq!((xy.smallest_periodicity, xy.largest_periodicity), (s, g));
            }
        }
    }

    #[test]
    fn runs_are_byte_identical(seed in any::<u64>(), min_utility in 1i64..30) {
        let txns = database(seed, 20);
        let src = MemorySource::new(render(&txns));
        let params = MiningParams::new(min_utility, vec![txns[0].items[0]]);
        let run = || {
            let mut sink = WriterSink::new(Vec::new());
            mine(&src, &params, &mut sink).unwrap();
            sink.finish().unwrap()
        };
        prop_assert_eq!(run(), run());
    }
}
