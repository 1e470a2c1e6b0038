//! Semantic versions tagged with a stability level

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::stability::Stability;

/// Version of a content module
///
/// The textual form is `MAJOR.MINOR.PATCH` for stable versions and
/// `MAJOR.MINOR.PATCH-<stability>` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub stability: Stability,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32, stability: Stability) -> Self {
        Self { major, minor, patch, stability }
    }

    pub const fn stable(major: u32, minor: u32, patch: u32) -> Self {
        Self::new(major, minor, patch, Stability::Stable)
    }

    pub const fn is_stable(&self) -> bool {
        self.stability.is_stable()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.is_stable() {
            write!(f, "-{}", self.stability)?;
        }
        Ok(())
    }
}

/// Error type for version parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseVersionError {
    #[error("Malformed version '{0}', expected MAJOR.MINOR.PATCH[-stability]")]
    Malformed(String),
    #[error("Invalid version component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },
    #[error(transparent)]
    Stability(#[from] crate::stability::ParseStabilityError),
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (numbers, stability) = match s.split_once('-') {
            Some((numbers, label)) => (numbers, label.parse::<Stability>()?),
            None => (s, Stability::Stable),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() != 3 {
            return Err(ParseVersionError::Malformed(s.to_string()));
        }

        let mut components = [0u32; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| ParseVersionError::InvalidComponent {
                input: s.to_string(),
                component: part.to_string(),
            })?;
        }

        let [major, minor, patch] = components;
        Ok(Version::new(major, minor, patch, stability))
    }
}

impl TryFrom<String> for Version {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
