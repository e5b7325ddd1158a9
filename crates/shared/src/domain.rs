use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_HUMILITY_SCORE: i64 = 1;
pub const MAX_HUMILITY_SCORE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HumilityScoreError {
    #[error("Must be at least {MIN_HUMILITY_SCORE}")]
    TooLow,
    #[error("Cannot be more than {MAX_HUMILITY_SCORE}")]
    TooHigh,
}

/// Integer score in `1..=10`. Construction is the only place the bound is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct HumilityScore(u8);

impl HumilityScore {
    pub fn new(value: i64) -> Result<Self, HumilityScoreError> {
        if value < MIN_HUMILITY_SCORE {
            return Err(HumilityScoreError::TooLow);
        }
        if value > MAX_HUMILITY_SCORE {
            return Err(HumilityScoreError::TooHigh);
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for HumilityScore {
    type Error = HumilityScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HumilityScore> for i64 {
    fn from(value: HumilityScore) -> Self {
        i64::from(value.0)
    }
}

impl fmt::Display for HumilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuperheroError {
    #[error("Name is required")]
    BlankName,
    #[error("Superpower is required")]
    BlankSuperpower,
}

/// Decoding goes through [`SuperheroWire`], so a record taken off the wire holds the
/// same invariants as one built from a validated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SuperheroWire")]
pub struct Superhero {
    pub name: String,
    pub superpower: String,
    pub humility_score: HumilityScore,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuperheroWire {
    name: String,
    superpower: String,
    humility_score: HumilityScore,
}

impl TryFrom<SuperheroWire> for Superhero {
    type Error = SuperheroError;

    fn try_from(wire: SuperheroWire) -> Result<Self, Self::Error> {
        if wire.name.trim().is_empty() {
            return Err(SuperheroError::BlankName);
        }
        if wire.superpower.trim().is_empty() {
            return Err(SuperheroError::BlankSuperpower);
        }
        Ok(Self {
            name: wire.name,
            superpower: wire.superpower,
            humility_score: wire.humility_score,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Dsc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Dsc,
            Self::Dsc => Self::Asc,
        }
    }

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Dsc => "dsc",
        }
    }

    /// Strict parse; anything other than `asc`/`dsc` is `None`.
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "dsc" => Some(Self::Dsc),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Asc => "Ascending",
            Self::Dsc => "Descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}
