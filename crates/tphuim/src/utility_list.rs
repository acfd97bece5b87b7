//! Vertical utility lists and periodicity tracking.
//!
//! A `UtilityList` stands for an itemset (identified by its last item in the
//! search order) and holds one `Element` per transaction containing it, strictly
//! increasing by tid, plus running utility sums and the itemset's periodicity.
//!
//! Periodicity convention
//! - Gaps are measured between consecutive occurrences, with a virtual occurrence
//!   at tid −1 before the database and one at tid `|D|−1` closing it.
//! - Largest periodicity covers every gap, including both virtual ones.
//! - Smallest periodicity skips the first gap and the closing gap; an itemset seen
//!   once keeps `UNBOUNDED_PERIODICITY`.

use crate::params::average_periodicity;
use crate::types::{Item, Periodicity, Tid, Utility, UNBOUNDED_PERIODICITY};

/// One transaction of an itemset's occurrence list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    pub tid: Tid,
    /// Utility of the itemset in this transaction.
    pub iutils: Utility,
    /// Utility of the items ordered after the itemset in this transaction.
    pub rutils: Utility,
}

impl Element {
    #[inline]
    pub fn new(tid: Tid, iutils: Utility, rutils: Utility) -> Self {
        Self {
            tid,
            iutils,
            rutils,
        }
    }
}

/// Incremental smallest/largest gap over an increasing tid stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodWindow {
    pub last: Option<Tid>,
    pub smallest: Periodicity,
    pub largest: Periodicity,
}

impl Default for PeriodWindow {
    fn default() -> Self {
        Self {
            last: None,
            smallest: UNBOUNDED_PERIODICITY,
            largest: 0,
        }
    }
}

impl PeriodWindow {
    /// Record an occurrence at `tid` (must exceed the previous one); returns the gap.
    #[inline]
    pub fn step(&mut self, tid: Tid) -> Periodicity {
        let gap = match self.last {
            Some(prev) => {
                debug_assert!(tid > prev, "tids must be strictly increasing");
                let gap = tid - prev;
                self.smallest = self.smallest.min(gap);
                gap
            }
            None => tid + 1,
        };
        self.largest = self.largest.max(gap);
        self.last = Some(tid);
        gap
    }

    /// Fold the closing gap to the end of a database of `database_size` transactions.
    /// Only the largest periodicity changes; returns the gap.
    #[inline]
    pub fn close(&mut self, database_size: usize) -> Periodicity {
        let n = database_size as Periodicity;
        let gap = match self.last {
            Some(prev) => n - 1 - prev,
            None => n,
        };
        self.largest = self.largest.max(gap);
        gap
    }
}

/// Utility list of one itemset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtilityList {
    pub item: Item,
    pub sum_iutils: Utility,
    pub sum_rutils: Utility,
    pub smallest_periodicity: Periodicity,
    pub largest_periodicity: Periodicity,
    elements: Vec<Element>,
}

impl UtilityList {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            sum_iutils: 0,
            sum_rutils: 0,
            smallest_periodicity: UNBOUNDED_PERIODICITY,
            largest_periodicity: 0,
            elements: Vec::new(),
        }
    }

    pub fn with_periodicity(mut self, window: &PeriodWindow) -> Self {
        self.smallest_periodicity = window.smallest;
        self.largest_periodicity = window.largest;
        self
    }

    /// Append an element, keeping the sums exact. Tids must arrive in increasing order.
    #[inline]
    pub fn push(&mut self, element: Element) {
        debug_assert!(
            self.elements.last().map_or(true, |e| e.tid < element.tid),
            "utility list elements must be strictly increasing by tid"
        );
        self.sum_iutils += element.iutils;
        self.sum_rutils += element.rutils;
        self.elements.push(element);
    }

    /// Binary search for the element of transaction `tid`.
    #[inline]
    pub fn find(&self, tid: Tid) -> Option<&Element> {
        self.elements
            .binary_search_by_key(&tid, |e| e.tid)
            .ok()
            .map(|idx| &self.elements[idx])
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of transactions containing the itemset.
    #[inline]
    pub fn support(&self) -> usize {
        self.elements.len()
    }

    /// `sumIutils + sumRutils`: bounds the utility of every extension.
    #[inline]
    pub fn upper_bound(&self) -> Utility {
        self.sum_iutils + self.sum_rutils
    }

    #[inline]
    pub fn average_periodicity(&self, database_size: usize) -> f64 {
        average_periodicity(database_size, self.support())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_track_every_push() {
        let mut ul = UtilityList::new(4);
        let elems = [
            Element::new(0, 5, 3),
            Element::new(2, 1, 0),
            Element::new(7, 4, 9),
        ];
        for (k, e) in elems.iter().enumerate() {
            ul.push(*e);
            let si: Utility = elems[..=k].iter().map(|e| e.iutils).sum();
            let sr: Utility = elems[..=k].iter().map(|e| e.rutils).sum();
            assert_eq!(ul.sum_iutils, si);
            assert_eq!(ul.sum_rutils, sr);
        }
        assert_eq!(ul.support(), 3);
        assert_eq!(ul.upper_bound(), 22);
        assert!(ul.elements().windows(2).all(|w| w[0].tid < w[1].tid));
    }

    #[test]
    fn find_hits_and_misses() {
        let mut ul = UtilityList::new(1);
        for tid in [1, 3, 4, 8, 13] {
            ul.push(Element::new(tid, tid as Utility, 0));
        }
        assert_eq!(ul.find(8).map(|e| e.iutils), Some(8));
        assert_eq!(ul.find(1).map(|e| e.iutils), Some(1));
        assert_eq!(ul.find(13).map(|e| e.iutils), Some(13));
        assert!(ul.find(0).is_none());
        assert!(ul.find(5).is_none());
        assert!(ul.find(14).is_none());
        assert!(UtilityList::new(2).find(0).is_none());
    }

    #[test]
    fn window_includes_virtual_boundaries_in_largest_only() {
        // occurrences at 2, 3, 7 in a database of 10: gaps 3 (start), 1, 4, closing 2
        let mut w = PeriodWindow::default();
        assert_eq!(w.step(2), 3);
        assert_eq!(w.smallest, UNBOUNDED_PERIODICITY);
        assert_eq!(w.step(3), 1);
        assert_eq!(w.step(7), 4);
        assert_eq!(w.close(10), 2);
        assert_eq!(w.smallest, 1);
        assert_eq!(w.largest, 4);
    }

    #[test]
    fn window_without_occurrences_spans_database() {
        let mut w = PeriodWindow::default();
        assert_eq!(w.close(6), 6);
        assert_eq!(w.largest, 6);
        assert_eq!(w.smallest, UNBOUNDED_PERIODICITY);
    }

    #[test]
    fn average_periodicity_counts_virtual_boundary() {
        let mut ul = UtilityList::new(1);
        ul.push(Element::new(0, 1, 0));
        ul.push(Element::new(1, 1, 0));
        assert_eq!(ul.average_periodicity(3), 1.0);
    }
}
