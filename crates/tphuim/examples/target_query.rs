//! Mine a small synthetic database for itemsets containing a target pattern.
//!
//! Usage:
//!   cargo run -p tphuim --example target_query -- 3 5
//!
//! Arguments are the target items (default: the first item of the first
//! transaction). Prints each accepted itemset and the stats block.

use tphuim::api::{
    draw_transactions, mine, render, MemorySource, MiningParams, ReplayToken, StatsReport,
    SynthCfg, VecSink,
};

fn main() {
    let txns = draw_transactions(SynthCfg::default(), ReplayToken::new(42));
    let mut target: Vec<u32> = std::env::args()
        .skip(1)
        .filter_map(|a| a.parse().ok())
        .collect();
    if target.is_empty() {
        target.push(txns[0].items[0]);
    }
    let params = MiningParams::new(60, target).with_periodicity(1, 50);
    let mut sink = VecSink::default();
    match mine(&MemorySource::new(render(&txns)), &params, &mut sink) {
        Ok(stats) => {
            for r in &sink.records {
                println!("{r}");
            }
            println!(
                "{}",
                StatsReport {
                    input: "synthetic(seed=42)",
                    params: &params,
                    stats: &stats,
                }
            );
        }
        Err(e) => eprintln!("mining failed: {e}"),
    }
}
