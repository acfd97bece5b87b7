use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use tphuim::api::{filter_by_targets, mine_to_path, Item, MiningParams, StatsReport, Utility};

mod memory;
mod provenance;
mod table;

use memory::ProcStatusProbe;
use provenance::Payload;

#[derive(Parser)]
#[command(name = "tphuim")]
#[command(about = "Periodic target high-utility itemset mining")]
struct Cmd {
    /// Log pass summaries and search counters
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Mine a transaction database and write one line per itemset
    Mine(MineArgs),
    /// Keep the result lines whose itemset contains every target item
    Filter {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_delimiter = ',', required = true)]
        target: Vec<Item>,
    },
    /// Convert a result file to CSV or Parquet (by extension)
    Table {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct MineArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    output: PathBuf,
    /// JSON file with `MiningParams` fields; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    min_utility: Option<Utility>,
    /// Target items, comma separated
    #[arg(long, value_delimiter = ',')]
    target: Option<Vec<Item>>,
    #[arg(long)]
    min_per: Option<u32>,
    #[arg(long)]
    max_per: Option<u32>,
    #[arg(long)]
    min_avg: Option<u32>,
    #[arg(long)]
    max_avg: Option<u32>,
    /// Also export the results as a table (.csv or .parquet)
    #[arg(long)]
    table: Option<PathBuf>,
}

impl MineArgs {
    /// Defaults, then the config file, then individual flags.
    fn params(&self) -> Result<MiningParams> {
        let mut params = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => MiningParams::default(),
        };
        if let Some(v) = self.min_utility {
            params.min_utility = v;
        }
        if let Some(v) = &self.target {
            params.target = v.clone();
        }
        if let Some(v) = self.min_per {
            params.min_periodicity = v;
        }
        if let Some(v) = self.max_per {
            params.max_periodicity = v;
        }
        if let Some(v) = self.min_avg {
            params.min_average_periodicity = v;
        }
        if let Some(v) = self.max_avg {
            params.max_average_periodicity = v;
        }
        params.validate().context("checking parameters")?;
        Ok(params)
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Mine(args) => mine(args),
        Action::Filter {
            input,
            output,
            target,
        } => filter(&input, &output, &target).map(|_| ()),
        Action::Table { input, out } => table::export(&input, &out).map(|_| ()),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn mine(args: MineArgs) -> Result<()> {
    let params = args.params()?;
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        min_utility = params.min_utility,
        target = ?params.target,
        "mine"
    );
    ensure_parent(&args.output)?;
    let mut probe = ProcStatusProbe::default();
    let stats = mine_to_path(&args.input, &args.output, &params, &mut probe)
        .with_context(|| format!("mining {}", args.input.display()))?;
    let input = args.input.display().to_string();
    println!(
        "{}",
        StatsReport {
            input: &input,
            params: &params,
            stats: &stats,
        }
    );
    tracing::info!(
        patterns = stats.patterns,
        joins = stats.joins,
        retained = stats.database_size,
        "mining finished"
    );

    let mut extra_outputs = Vec::new();
    if let Some(out) = &args.table {
        table::export(&args.output, out)?;
        extra_outputs.push(out.clone());
    }
    provenance::write_sidecar(
        &args.output,
        Payload {
            input: args.input.clone(),
            params: serde_json::to_value(&params)?,
            stats: serde_json::to_value(&stats)?,
            extra_outputs,
        },
    )?;
    Ok(())
}

fn filter(input: &Path, output: &Path, target: &[Item]) -> Result<usize> {
    let reader = BufReader::new(
        File::open(input).with_context(|| format!("opening {}", input.display()))?,
    );
    ensure_parent(output)?;
    let writer = BufWriter::new(
        File::create(output).with_context(|| format!("creating {}", output.display()))?,
    );
    let kept = filter_by_targets(reader, writer, target)
        .with_context(|| format!("filtering {} into {}", input.display(), output.display()))?;
    tracing::info!(kept, target = ?target, "filter");
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    const DB: &str = "@CONVERTED_FROM_TEXT\n1 2:10:5 5\n1 3:10:4 6\n1 2 3:10:3 3 4\n";

    fn mine_args(argv: &[&str]) -> MineArgs {
        let mut full = vec!["tphuim", "mine"];
        full.extend_from_slice(argv);
        match Cmd::try_parse_from(full).unwrap().action {
            Action::Mine(args) => args,
            _ => panic!("expected mine"),
        }
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("params.json");
        fs::write(&config, r#"{"min_utility": 50, "target": [4], "max_periodicity": 10}"#)
            .unwrap();
        let args = mine_args(&[
            "--input",
            "db.txt",
            "--output",
            "out.txt",
            "--config",
            config.to_str().unwrap(),
            "--target",
            "1,2",
            "--min-avg",
            "2",
        ]);
        let p = args.params().unwrap();
        assert_eq!(p.min_utility, 50);
        assert_eq!(p.target, vec![1, 2]);
        assert_eq!(p.max_periodicity, 10);
        assert_eq!(p.min_average_periodicity, 2);
        assert_eq!(p.max_average_periodicity, 1000);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let args = mine_args(&[
            "--input", "db.txt", "--output", "out.txt", "--min-per", "5", "--max-per", "2",
        ]);
        let err = args.params().unwrap_err();
        assert!(format!("{err:#}").contains("exceeds max periodicity"));
    }

    #[test]
    fn mine_writes_results_table_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("db.txt");
        fs::write(&input, DB).unwrap();
        let output = dir.path().join("runs").join("out.txt");
        let csv = dir.path().join("runs").join("out.csv");
        let args = mine_args(&[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--min-utility",
            "9",
            "--target",
            "1",
            "--min-avg",
            "0",
            "--table",
            csv.to_str().unwrap(),
        ]);
        mine(args).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("1 #UTIL: 12 #MINPER: 1 #MAXPER: 1 #AVGPER: 0.75 #Target: 1"));
        assert!(csv.exists());
        let sidecar = dir.path().join("runs").join("out.provenance.json");
        let doc: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(doc["stats"]["patterns"], 4);
        assert_eq!(doc["params"]["target"][0], 1);
        assert_eq!(doc["outputs"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn filter_keeps_matching_lines() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("db.txt");
        fs::write(&input, DB).unwrap();
        let output = dir.path().join("all.txt");
        mine(mine_args(&[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--min-utility",
            "1",
        ]))
        .unwrap();
        let filtered = dir.path().join("with_2_3.txt");
        let kept = filter(&output, &filtered, &[3, 2]).unwrap();
        let text = fs::read_to_string(&filtered).unwrap();
        assert_eq!(text.lines().count(), kept);
        assert!(kept >= 1);
        assert!(text.lines().all(|l| l.starts_with("2 3")));
    }

    #[test]
    fn filter_requires_a_target() {
        assert!(Cmd::try_parse_from(["tphuim", "filter", "--input", "a", "--output", "b"]).is_err());
    }
}
