//! Match aggregation — folding per-term results into one verdict.

use crate::types::MatchPolicy;

/// Running count of per-term hits and misses for one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub matched: usize,
    pub missed: usize,
}

impl Tally {
    pub fn record(&mut self, hit: bool) {
        if hit {
            self.matched += 1;
        } else {
            self.missed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.missed
    }

    /// Accept/reject under `policy`. A tally with no misses always accepts,
    /// which covers the no-terms case under both policies.
    pub fn verdict(&self, policy: MatchPolicy) -> bool {
        if self.missed == 0 {
            return true;
        }
        policy == MatchPolicy::Or && self.matched > 0
    }
}

impl FromIterator<bool> for Tally {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for hit in iter {
            tally.record(hit);
        }
        tally
    }
}

/// Combine per-term results under `policy`.
///
/// No results accepts; `And` needs every result true; `Or` needs at least one.
pub fn aggregate<I>(results: I, policy: MatchPolicy) -> bool
where
    I: IntoIterator<Item = bool>,
{
    results.into_iter().collect::<Tally>().verdict(policy)
}
