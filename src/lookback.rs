//! Lookback window parsing.
//!
//! A window is written as an integer followed by one unit character,
//! e.g. `90m`, `2d` or `1w`.

use crate::constants::{DEFAULT_SINCE, DEFAULT_SINCE_SECS};
use std::fmt;
use std::str::FromStr;

/// Seconds per recognized unit suffix.
const UNITS: [(char, u64); 5] = [
    ('s', 1),
    ('m', 60),
    ('h', 3_600),
    ('d', 86_400),
    ('w', 604_800),
];

/// A parsed lookback window, remembering how it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookback {
    raw: String,
    seconds: u64,
}

impl Lookback {
    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self {
            raw: DEFAULT_SINCE.to_string(),
            seconds: DEFAULT_SINCE_SECS,
        }
    }
}

impl FromStr for Lookback {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            raw: s.to_string(),
            seconds: convert_to_seconds(s)?,
        })
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Converts `<int><unit>` into seconds.
pub fn convert_to_seconds(s: &str) -> anyhow::Result<u64> {
    let Some(unit) = s.chars().last() else {
        anyhow::bail!("Empty lookback window");
    };
    let multiplier = UNITS
        .iter()
        .find(|(suffix, _)| *suffix == unit)
        .map(|(_, secs)| *secs)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown unit {:?} in lookback window {:?} (expected one of s, m, h, d, w)",
                unit,
                s
            )
        })?;

    let amount: u64 = s[..s.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| anyhow::anyhow!("Lookback window {:?} does not start with an integer", s))?;

    amount
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Lookback window {:?} is too large", s))
}
