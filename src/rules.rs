//! Birth/survival rule sets for outer-totalistic automata.

use crate::error::{Error, Result};
use regex::Regex;
use std::{fmt, str::FromStr, sync::OnceLock};

/// The largest neighbor count a cell can have
pub const MAX_NEIGHBORS: u32 = 8;

/// Builds a membership mask from neighbor counts, bit `n` set for count `n`
const fn mask(counts: &[u8]) -> u16 {
    let mut mask = 0;
    let mut i = 0;
    while i < counts.len() {
        mask |= 1 << counts[i];
        i += 1;
    }
    mask
}

/// An immutable pair of birth and survival neighbor-count sets
///
/// Each set is stored as a 9-bit mask where bit `n` means "`n` live neighbors
/// is a member". Switching rules on a [`Grid`](crate::Grid) swaps the whole
/// value; a `RuleSet` is never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSet {
    birth: u16,
    survive: u16,
}

impl RuleSet {
    /// Creates a rule set from birth and survival counts
    ///
    /// Fails with [`Error::InvalidRule`] if any count is greater than 8.
    pub fn new(birth: &[u32], survive: &[u32]) -> Result<Self> {
        Ok(Self {
            birth: Self::counts_to_mask(birth)?,
            survive: Self::counts_to_mask(survive)?,
        })
    }

    fn counts_to_mask(counts: &[u32]) -> Result<u16> {
        counts.iter().try_fold(0u16, |mask, &count| {
            if count > MAX_NEIGHBORS {
                return Err(Error::InvalidRule(count));
            }
            Ok(mask | 1 << count)
        })
    }

    const fn from_counts(birth: &[u8], survive: &[u8]) -> Self {
        Self {
            birth: mask(birth),
            survive: mask(survive),
        }
    }

    /// Conway's Game of Life, B3/S23
    pub const fn conway() -> Self {
        Self::from_counts(&[3], &[2, 3])
    }

    /// Whether a dead cell with `count` live neighbors is born
    #[inline]
    pub fn birth(&self, count: u32) -> bool {
        count <= MAX_NEIGHBORS && self.birth & (1 << count) != 0
    }

    /// Whether a live cell with `count` live neighbors stays alive
    #[inline]
    pub fn survive(&self, count: u32) -> bool {
        count <= MAX_NEIGHBORS && self.survive & (1 << count) != 0
    }

    /// The birth counts in ascending order
    pub fn birth_counts(&self) -> impl Iterator<Item = u32> + '_ {
        (0..=MAX_NEIGHBORS).filter(|&n| self.birth(n))
    }

    /// The survival counts in ascending order
    pub fn survive_counts(&self) -> impl Iterator<Item = u32> + '_ {
        (0..=MAX_NEIGHBORS).filter(|&n| self.survive(n))
    }

    /// The standard catalog of named rule sets
    pub fn catalog() -> &'static [NamedRule] {
        &CATALOG
    }

    /// Looks up a catalog entry by name, ignoring case
    pub fn named(name: &str) -> Option<RuleSet> {
        CATALOG
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.rules)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

/// A catalog entry: a display name and its rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedRule {
    pub name: &'static str,
    pub rules: RuleSet,
}

impl fmt::Display for NamedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rules)
    }
}

const fn entry(name: &'static str, birth: &[u8], survive: &[u8]) -> NamedRule {
    NamedRule {
        name,
        rules: RuleSet::from_counts(birth, survive),
    }
}

static CATALOG: [NamedRule; 10] = [
    entry("Conway", &[3], &[2, 3]),
    entry("B3/S13", &[3], &[1, 3]),
    entry("3-4 Life", &[3], &[3, 4]),
    entry("B3/S236", &[3], &[2, 3, 6]),
    entry("Maze", &[3], &[1, 2, 3, 4, 5]),
    entry("Replicator", &[1, 3, 5, 7], &[1, 3, 5, 7]),
    entry("B0123/S01234", &[0, 1, 2, 3], &[0, 1, 2, 3, 4]),
    entry("B02468/S02468", &[0, 2, 4, 6, 8], &[0, 2, 4, 6, 8]),
    entry("HighLife", &[3, 6], &[2, 3]),
    entry("Day & Night", &[3, 6, 7, 8], &[3, 4, 6, 7, 8]),
];

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in self.birth_counts() {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in self.survive_counts() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

/// Returns the rule string patterns: `B3/S23` notation and the legacy `23/3` notation
fn rule_patterns() -> &'static (Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        (
            Regex::new(r"^(?i)b([0-9]*)/s([0-9]*)$").expect("valid B/S pattern"),
            Regex::new(r"^([0-9]*)/([0-9]*)$").expect("valid S/B pattern"),
        )
    })
}

fn parse_digits(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

impl FromStr for RuleSet {
    type Err = Error;

    /// Parses `B3/S23` (any case) or the legacy survive-first `23/3` form
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (bs, legacy) = rule_patterns();
        if let Some((_, [birth, survive])) = bs.captures(s).map(|c| c.extract()) {
            return RuleSet::new(&parse_digits(birth), &parse_digits(survive));
        }
        if let Some((_, [survive, birth])) = legacy.captures(s).map(|c| c.extract()) {
            return RuleSet::new(&parse_digits(birth), &parse_digits(survive));
        }
        Err(Error::InvalidRuleString(s.to_owned()))
    }
}
