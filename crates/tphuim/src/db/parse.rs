//! Data-line parsing.

use std::collections::HashSet;

use crate::error::{ParseError, ParseErrorKind};
use crate::types::{Item, Transaction, Utility};

/// Blank and comment/metadata lines carry no transaction.
#[inline]
pub fn is_metadata(line: &str) -> bool {
    matches!(
        line.trim_start().as_bytes().first().copied(),
        None | Some(b'#' | b'%' | b'@')
    )
}

/// Parse one data line; `line` is the 1-based line number used in errors.
pub fn parse_transaction(text: &str, line: usize) -> Result<Transaction, ParseError> {
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() != 3 {
        return Err(ParseError::new(
            line,
            ParseErrorKind::FieldCount {
                found: fields.len(),
            },
        ));
    }
    let items = fields[0]
        .split_whitespace()
        .map(|tok| tok.parse::<Item>().map_err(|_| ParseError::integer(line, tok)))
        .collect::<Result<Vec<_>, _>>()?;
    let tu_token = fields[1].trim();
    let transaction_utility = tu_token
        .parse::<Utility>()
        .map_err(|_| ParseError::integer(line, tu_token))?;
    let utilities = fields[2]
        .split_whitespace()
        .map(|tok| {
            tok.parse::<Utility>()
                .map_err(|_| ParseError::integer(line, tok))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if items.len() != utilities.len() {
        return Err(ParseError::new(
            line,
            ParseErrorKind::LengthMismatch {
                items: items.len(),
                utilities: utilities.len(),
            },
        ));
    }
    let mut seen = HashSet::with_capacity(items.len());
    if let Some(&item) = items.iter().find(|&&item| !seen.insert(item)) {
        return Err(ParseError::new(
            line,
            ParseErrorKind::DuplicateItem { item },
        ));
    }
    Ok(Transaction {
        items,
        utilities,
        transaction_utility,
    })
}
