//! Production-readiness levels for named content

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How production-ready a named entity is
///
/// Every level carries a fixed display label, see [`Stability::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    #[default]
    Stable,
    Unstable,
    Experimental,
}

impl Stability {
    /// All levels, in declaration order
    pub const ALL: [Stability; 3] = [Stability::Stable, Stability::Unstable, Stability::Experimental];

    /// Display label for this level
    pub const fn label(self) -> &'static str {
        match self {
            Stability::Stable => "stable",
            Stability::Unstable => "unstable",
            Stability::Experimental => "experimental",
        }
    }

    pub const fn is_stable(self) -> bool {
        matches!(self, Stability::Stable)
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label names no known stability level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stability level: {0}")]
pub struct ParseStabilityError(pub String);

impl FromStr for Stability {
    type Err = ParseStabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stability::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStabilityError(s.to_string()))
    }
}
