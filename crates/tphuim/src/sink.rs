//! Accepted itemsets and where they go.
//!
//! The search hands every accepted itemset to an `ItemsetSink`. `VecSink` keeps
//! records in memory; `WriterSink` writes one text line per record:
//!
//! `i1 i2 ... #UTIL: u #MINPER: min #MAXPER: max #AVGPER: avg #Target: matched`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};
use crate::types::{Item, Periodicity, Utility};

/// One accepted itemset with its measures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    /// Items in ascending (TWU, item) order.
    pub items: Vec<Item>,
    pub utility: Utility,
    pub smallest_periodicity: Periodicity,
    pub largest_periodicity: Periodicity,
    pub average_periodicity: f64,
    /// Target items matched along the search branch.
    pub matched_target: usize,
}

impl PatternRecord {
    pub fn contains_all(&self, items: &[Item]) -> bool {
        items.iter().all(|i| self.items.contains(i))
    }
}

/// Decimal that always shows a fractional part (`1.0`, `1.5`, `0.3333333333333333`).
struct Decimal(f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for PatternRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, item) in self.items.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        write!(
            f,
            " #UTIL: {} #MINPER: {} #MAXPER: {} #AVGPER: {} #Target: {}",
            self.utility,
            self.smallest_periodicity,
            self.largest_periodicity,
            Decimal(self.average_periodicity),
            self.matched_target
        )
    }
}

fn tagged<'a, I>(tokens: &mut I, tag: &'static str) -> Result<&'a str, ParseError>
where
    I: Iterator<Item = &'a str>,
{
    let missing = || ParseError::new(0, ParseErrorKind::MissingTag { tag });
    match tokens.next() {
        Some(t) if t == tag => tokens.next().ok_or_else(missing),
        _ => Err(missing()),
    }
}

fn integer<T: FromStr>(token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::integer(0, token))
}

impl FromStr for PatternRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace().peekable();
        let mut items = Vec::new();
        while let Some(tok) = tokens.next_if(|t| !t.starts_with('#')) {
            items.push(integer(tok)?);
        }
        let utility = integer(tagged(&mut tokens, "#UTIL:")?)?;
        let smallest_periodicity = integer(tagged(&mut tokens, "#MINPER:")?)?;
        let largest_periodicity = integer(tagged(&mut tokens, "#MAXPER:")?)?;
        let avg = tagged(&mut tokens, "#AVGPER:")?;
        let average_periodicity = avg.parse::<f64>().map_err(|_| {
            ParseError::new(
                0,
                ParseErrorKind::InvalidNumber {
                    token: avg.to_string(),
                },
            )
        })?;
        let matched_target = integer(tagged(&mut tokens, "#Target:")?)?;
        Ok(Self {
            items,
            utility,
            smallest_periodicity,
            largest_periodicity,
            average_periodicity,
            matched_target,
        })
    }
}

/// Receiver of accepted itemsets, called synchronously from the search.
pub trait ItemsetSink {
    fn accept(&mut self, record: &PatternRecord) -> io::Result<()>;
}

impl<K: ItemsetSink + ?Sized> ItemsetSink for &mut K {
    fn accept(&mut self, record: &PatternRecord) -> io::Result<()> {
        (**self).accept(record)
    }
}

/// Collects records in emission order.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    pub records: Vec<PatternRecord>,
}

impl ItemsetSink for VecSink {
    fn accept(&mut self, record: &PatternRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes one line per record to any `Write`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ItemsetSink for WriterSink<W> {
    fn accept(&mut self, record: &PatternRecord) -> io::Result<()> {
        writeln!(self.writer, "{record}")?;
        self.written += 1;
        Ok(())
    }
}

/// Copy the result lines whose item part contains every item of `targets`; returns
/// how many lines were kept. Lines are copied verbatim.
pub fn filter_by_targets<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    targets: &[Item],
) -> io::Result<usize> {
    let mut kept = 0;
    let mut items: Vec<Item> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        items.clear();
        items.extend(
            line.split_whitespace()
                .take_while(|t| *t != "#UTIL:")
                .filter_map(|t| t.parse::<Item>().ok()),
        );
        if targets.iter().all(|t| items.contains(t)) {
            writeln!(writer, "{line}")?;
            kept += 1;
        }
    }
    writer.flush()?;
    Ok(kept)
}
