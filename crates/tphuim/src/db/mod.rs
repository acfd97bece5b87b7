//! Transaction database access: line format and re-openable sources.
//!
//! Both database passes read through the same `TransactionSource`, in file order,
//! so ordinals assigned in pass 1 identify the same lines in pass 2.
//!
//! Line format
//! - Empty lines and lines starting with `#`, `%` or `@` are metadata.
//! - Data lines are `item item ... : transactionUtility : utility utility ...`.

mod parse;
mod source;

pub use parse::{is_metadata, parse_transaction};
pub use source::{data_lines, DataLine, FileSource, MemorySource, TransactionSource};
