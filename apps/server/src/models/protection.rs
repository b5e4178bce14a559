//! Degree-of-protection (IP rating) values and their column encoding.
//!
//! The store keeps a product's ratings as one comma-joined text column
//! (e.g. `"IP67,IP68"`). Every encode/decode of that column goes through
//! [`encode_set`] and [`decode_set`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DegreeOfProtection {
    #[serde(rename = "IP20")]
    Ip20,
    #[serde(rename = "IP40")]
    Ip40,
    #[serde(rename = "IP44")]
    Ip44,
    #[serde(rename = "IP54")]
    Ip54,
    #[serde(rename = "IP65")]
    Ip65,
    #[serde(rename = "IP66")]
    Ip66,
    #[serde(rename = "IP67")]
    Ip67,
    #[serde(rename = "IP68")]
    Ip68,
    #[serde(rename = "IP69K")]
    Ip69K,
}

impl DegreeOfProtection {
    pub const ALL: [DegreeOfProtection; 9] = [
        Self::Ip20,
        Self::Ip40,
        Self::Ip44,
        Self::Ip54,
        Self::Ip65,
        Self::Ip66,
        Self::Ip67,
        Self::Ip68,
        Self::Ip69K,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip20 => "IP20",
            Self::Ip40 => "IP40",
            Self::Ip44 => "IP44",
            Self::Ip54 => "IP54",
            Self::Ip65 => "IP65",
            Self::Ip66 => "IP66",
            Self::Ip67 => "IP67",
            Self::Ip68 => "IP68",
            Self::Ip69K => "IP69K",
        }
    }
}

impl fmt::Display for DegreeOfProtection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown degree of protection '{0}'")]
pub struct UnknownRating(pub String);

impl FromStr for DegreeOfProtection {
    type Err = UnknownRating;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|rating| rating.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRating(trimmed.to_string()))
    }
}

/// Separator used by the stored column.
pub const COLUMN_SEPARATOR: char = ',';

/// Decode the stored column into a set of ratings.
///
/// Unknown entries are skipped and duplicates collapse to their first occurrence.
pub fn decode_set(column: &str) -> Vec<DegreeOfProtection> {
    let mut out = Vec::new();
    for rating in column
        .split(COLUMN_SEPARATOR)
        .filter_map(|part| part.parse::<DegreeOfProtection>().ok())
    {
        if !out.contains(&rating) {
            out.push(rating);
        }
    }
    out
}

/// Encode a set of ratings into the stored column form.
pub fn encode_set(ratings: &[DegreeOfProtection]) -> String {
    let mut seen: Vec<DegreeOfProtection> = Vec::with_capacity(ratings.len());
    for rating in ratings {
        if !seen.contains(rating) {
            seen.push(*rating);
        }
    }
    seen.iter()
        .map(DegreeOfProtection::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
