use std::{fmt, num::ParseIntError, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Birth and death thresholds.
///
/// Values are stored as given. Nothing enforces `birth_min <= birth_max` or
/// `starvation_max < suffocation_min`; odd combinations just make for odd
/// automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleSet {
    /// Only used by [`Neighborhood::AdjacentDims`](crate::Neighborhood::AdjacentDims).
    pub max_adjacent_dims: i32,
    pub birth_min: i32,
    pub birth_max: i32,
    /// Live cells with this many live neighbors or fewer die.
    pub starvation_max: i32,
    /// Live cells with this many live neighbors or more die.
    pub suffocation_min: i32,
}

impl RuleSet {
    pub const fn new(
        max_adjacent_dims: i32,
        birth_min: i32,
        birth_max: i32,
        starvation_max: i32,
        suffocation_min: i32,
    ) -> Self {
        Self {
            max_adjacent_dims,
            birth_min,
            birth_max,
            starvation_max,
            suffocation_min,
        }
    }

    /// 2/3-3/2/5, the rule the in-game driver used when none was given.
    pub const fn classic() -> Self {
        Self::new(2, 3, 3, 2, 5)
    }

    /// Overwrite all five thresholds at once.
    pub fn replace(
        &mut self,
        max_adjacent_dims: i32,
        birth_min: i32,
        birth_max: i32,
        starvation_max: i32,
        suffocation_min: i32,
    ) {
        *self = Self::new(
            max_adjacent_dims,
            birth_min,
            birth_max,
            starvation_max,
            suffocation_min,
        );
    }

    /// Whether a dead cell with `count` live neighbors becomes live.
    #[inline]
    pub fn is_born(&self, count: i32) -> bool {
        count >= self.birth_min && count <= self.birth_max
    }

    /// Whether a live cell with `count` live neighbors dies.
    #[inline]
    pub fn dies(&self, count: i32) -> bool {
        count <= self.starvation_max || count >= self.suffocation_min
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}-{}/{}/{}",
            self.max_adjacent_dims,
            self.birth_min,
            self.birth_max,
            self.starvation_max,
            self.suffocation_min
        )
    }
}

/// Error parsing a rule string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRuleError {
    #[error("expected 4 '/'-separated fields, got {0}")]
    FieldCount(usize),
    #[error("birth range '{0}' is not of the form MIN-MAX")]
    BirthRange(String),
    #[error("invalid number: {0}")]
    Number(#[from] ParseIntError),
}

/// Split `MIN-MAX`, allowing either bound to be negative.
fn split_range(s: &str) -> Option<(&str, &str)> {
    // Skip a leading sign so "-1-2" splits after the first number.
    let start = usize::from(s.starts_with('-'));
    let dash = s[start..].find('-')? + start;
    Some((&s[..dash], &s[dash + 1..]))
}

impl FromStr for RuleSet {
    type Err = ParseRuleError;

    /// Parse `DIMS/BMIN-BMAX/STARVE/SUFFOCATE`, e.g. `2/3-3/2/5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split('/').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(ParseRuleError::FieldCount(fields.len()));
        }
        let (bmin, bmax) =
            split_range(fields[1]).ok_or_else(|| ParseRuleError::BirthRange(fields[1].into()))?;
        Ok(Self::new(
            fields[0].parse()?,
            bmin.trim().parse()?,
            bmax.trim().parse()?,
            fields[2].parse()?,
            fields[3].parse()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_inclusive() {
        let r = RuleSet::new(3, 6, 7, 5, 9);
        assert!(!r.is_born(5));
        assert!(r.is_born(6));
        assert!(r.is_born(7));
        assert!(!r.is_born(8));

        assert!(r.dies(5));
        assert!(!r.dies(6));
        assert!(!r.dies(8));
        assert!(r.dies(9));
        assert!(r.dies(0));
        assert!(r.dies(26));
    }

    #[test]
    fn degenerate_rules() {
        // Overlapping death ranges kill at any count
        let r = RuleSet::new(3, 0, 0, 10, 5);
        assert!((0..=26).all(|c| r.dies(c)));
        // Inverted birth range never births
        let r = RuleSet::new(3, 5, 4, -1, 100);
        assert!((0..=26).all(|c| !r.is_born(c)));
        assert!((0..=26).all(|c| !r.dies(c)));
    }

    #[test]
    fn replace_all() {
        let mut r = RuleSet::classic();
        r.replace(3, 1, 1, -1, 100);
        assert_eq!(r, RuleSet::new(3, 1, 1, -1, 100));
    }

    #[test]
    fn parse() {
        assert_eq!("2/3-3/2/5".parse::<RuleSet>(), Ok(RuleSet::classic()));
        assert_eq!(
            "3/1-1/-1/100".parse::<RuleSet>(),
            Ok(RuleSet::new(3, 1, 1, -1, 100))
        );
        assert_eq!(
            " 3 / -2--1 / 0 / 4 ".parse::<RuleSet>(),
            Ok(RuleSet::new(3, -2, -1, 0, 4))
        );
        assert_eq!(
            "2/3/2/5".parse::<RuleSet>(),
            Err(ParseRuleError::BirthRange("3".into()))
        );
        assert_eq!(
            "2/3-3/2".parse::<RuleSet>(),
            Err(ParseRuleError::FieldCount(3))
        );
        assert!(matches!(
            "2/3-x/2/5".parse::<RuleSet>(),
            Err(ParseRuleError::Number(_))
        ));
    }

    #[test]
    fn display_parses_back() {
        let r = RuleSet::new(1, -3, 12, -1, 26);
        assert_eq!(r.to_string(), "1/-3-12/-1/26");
        assert_eq!(r.to_string().parse::<RuleSet>(), Ok(r));
    }
}
