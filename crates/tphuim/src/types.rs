//! Scalar aliases and the parsed transaction shape.
//!
//! Kept small and explicit so the pass and search modules read the same vocabulary.

/// Item identifier as it appears in the input file.
pub type Item = u32;
/// Zero-based index of a retained transaction.
pub type Tid = u32;
/// Utility values and their sums.
pub type Utility = i64;
/// Gap between occurrences, in transactions.
pub type Periodicity = u32;
/// Position of an item in the global ascending-TWU order, starting at 1.
pub type Rank = u32;

/// Smallest periodicity of an itemset seen at most once: there is no inter-occurrence gap.
pub const UNBOUNDED_PERIODICITY: Periodicity = Periodicity::MAX;

/// One data line: items, their utilities (positionally aligned) and the transaction utility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub items: Vec<Item>,
    pub utilities: Vec<Utility>,
    pub transaction_utility: Utility,
}

impl Transaction {
    /// Build a transaction whose utility is the sum of its item utilities.
    pub fn from_pairs(pairs: &[(Item, Utility)]) -> Self {
        Self {
            items: pairs.iter().map(|&(i, _)| i).collect(),
            utilities: pairs.iter().map(|&(_, u)| u).collect(),
            transaction_utility: pairs.iter().map(|&(_, u)| u).sum(),
        }
    }

    #[inline]
    pub fn pairs(&self) -> impl Iterator<Item = (Item, Utility)> + '_ {
        self.items.iter().copied().zip(self.utilities.iter().copied())
    }

    #[inline]
    pub fn contains(&self, item: Item) -> bool {
        self.items.contains(&item)
    }

    /// Render in the input line format: `items : tu : utilities`.
    pub fn to_line(&self) -> String {
        let items: Vec<String> = self.items.iter().map(|i| i.to_string()).collect();
        let utils: Vec<String> = self.utilities.iter().map(|u| u.to_string()).collect();
        format!(
            "{}:{}:{}",
            items.join(" "),
            self.transaction_utility,
            utils.join(" ")
        )
    }
}
