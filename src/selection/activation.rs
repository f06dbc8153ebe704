//! Requested constraint subsets.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::selection::SLOT_COUNT;

/// Which canonical slots a caller asks to enable.
///
/// Slot numbers are 1-based. Numbers that name a marker slot or lie outside
/// `1..=11` are ignored.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::selection::Activation;
///
/// let a: Activation = "2-5".parse().unwrap();
/// assert!(a.contains(2) && a.contains(5) && !a.contains(6));
///
/// let b: Activation = "[2, 3, 5]".parse().unwrap();
/// assert!(b.contains(5) && !b.contains(4));
///
/// assert!("two".parse::<Activation>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActivationRepr", into = "ActivationRepr")]
pub enum Activation {
    /// Contiguous slot numbers, end inclusive.
    Range(RangeInclusive<usize>),
    /// Explicit slot numbers.
    List(Vec<usize>),
}

impl Activation {
    /// Every slot.
    pub fn all() -> Self {
        Activation::Range(1..=SLOT_COUNT)
    }

    /// Returns `true` if slot `number` is requested.
    pub fn contains(&self, number: usize) -> bool {
        match self {
            Activation::Range(range) => range.contains(&number),
            Activation::List(list) => list.contains(&number),
        }
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::all()
    }
}

impl From<RangeInclusive<usize>> for Activation {
    fn from(range: RangeInclusive<usize>) -> Self {
        Activation::Range(range)
    }
}

impl From<std::ops::Range<usize>> for Activation {
    fn from(range: std::ops::Range<usize>) -> Self {
        if range.end <= range.start {
            return Activation::List(Vec::new());
        }
        Activation::Range(range.start..=range.end - 1)
    }
}

impl From<Vec<usize>> for Activation {
    fn from(list: Vec<usize>) -> Self {
        Activation::List(list)
    }
}

impl From<&[usize]> for Activation {
    fn from(list: &[usize]) -> Self {
        Activation::List(list.to_vec())
    }
}

impl FromStr for Activation {
    type Err = Error;

    /// Accepts `all`, `a-b`, `a..=b`, `a..b`, `a,b,c`, `[a, b, c]` and a
    /// single number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidConstraintSelector(s.to_string());
        let text = s.trim();

        if text.eq_ignore_ascii_case("all") {
            return Ok(Activation::all());
        }
        if let Some(bounds) = text.split_once("..=") {
            let (start, end) = parse_bounds(bounds).ok_or_else(invalid)?;
            return Ok(Activation::Range(start..=end));
        }
        if let Some(bounds) = text.split_once("..") {
            let (start, end) = parse_bounds(bounds).ok_or_else(invalid)?;
            return Ok(Activation::from(start..end));
        }
        if let Some(bounds) = text.split_once('-') {
            let (start, end) = parse_bounds(bounds).ok_or_else(invalid)?;
            return Ok(Activation::Range(start..=end));
        }

        let body = match (text.strip_prefix('['), text.strip_suffix(']')) {
            (Some(_), Some(_)) => &text[1..text.len() - 1],
            (None, None) => text,
            _ => return Err(invalid()),
        };
        if body.trim().is_empty() {
            return if text.starts_with('[') {
                Ok(Activation::List(Vec::new()))
            } else {
                Err(invalid())
            };
        }
        body.split(',')
            .map(|part| parse_num(part).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Activation::List)
    }
}

fn parse_num(s: &str) -> Option<usize> {
    s.trim().parse().ok()
}

fn parse_bounds((start, end): (&str, &str)) -> Option<(usize, usize)> {
    Some((parse_num(start)?, parse_num(end)?))
}

/// Serialized shapes accepted for an activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ActivationRepr {
    List(Vec<usize>),
    Range { start: usize, end: usize },
    Text(String),
}

impl TryFrom<ActivationRepr> for Activation {
    type Error = Error;

    fn try_from(repr: ActivationRepr) -> Result<Self, Self::Error> {
        match repr {
            ActivationRepr::List(list) => Ok(Activation::List(list)),
            ActivationRepr::Range { start, end } => Ok(Activation::Range(start..=end)),
            ActivationRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Activation> for ActivationRepr {
    fn from(a: Activation) -> Self {
        match a {
            Activation::Range(range) => ActivationRepr::Range {
                start: *range.start(),
                end: *range.end(),
            },
            Activation::List(list) => ActivationRepr::List(list),
        }
    }
}
