//! Result file to CSV or Parquet.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tphuim::api::PatternRecord;

/// Read result lines into a frame: one row per itemset.
pub fn load_results(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut items = Vec::new();
    let mut length = Vec::new();
    let mut utility = Vec::new();
    let mut min_per = Vec::new();
    let mut max_per = Vec::new();
    let mut avg_per = Vec::new();
    let mut matched = Vec::new();
    for (k, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let r: PatternRecord = line
            .parse()
            .with_context(|| format!("{}:{}: not a result line", path.display(), k + 1))?;
        let joined: Vec<String> = r.items.iter().map(|i| i.to_string()).collect();
        items.push(joined.join(" "));
        length.push(r.items.len() as u32);
        utility.push(r.utility);
        min_per.push(r.smallest_periodicity);
        max_per.push(r.largest_periodicity);
        avg_per.push(r.average_periodicity);
        matched.push(r.matched_target as u32);
    }
    let df = df!(
        "items" => items,
        "length" => length,
        "utility" => utility,
        "min_per" => min_per,
        "max_per" => max_per,
        "avg_per" => avg_per,
        "matched_target" => matched
    )?;
    Ok(df)
}

/// Write `results` as a table; the extension of `out` picks CSV or Parquet.
pub fn export(results: &Path, out: &Path) -> Result<usize> {
    let mut df = load_results(results)?;
    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = match ext.as_deref() {
        Some("csv") | Some("parquet") => {
            File::create(out).with_context(|| format!("creating {}", out.display()))?
        }
        _ => bail!("unsupported table format {}; use .csv or .parquet", out.display()),
    };
    if ext.as_deref() == Some("csv") {
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    } else {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    }
    tracing::info!(rows = df.height(), out = %out.display(), "table written");
    Ok(df.height())
}
