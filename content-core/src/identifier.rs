//! Identifiers for content objects and the factory that mints them
//!
//! An [`Identifier`] pairs a display name with a machine id in snake_case and a
//! [`Stability`] level. Identifiers are only created through
//! [`IdentifierFactory`], which either derives the id from the name or checks
//! an explicitly supplied one.
//!
//! # Example
//!
//! ```rust
//! # use content_core::identifier::IdentifierFactory;
//! # use content_core::stability::Stability;
//! let factory = IdentifierFactory::new();
//!
//! let sword = factory.get_identifier("Magic Sword", Stability::Stable).unwrap();
//! assert_eq!(sword.id(), "magic_sword");
//!
//! let axe = factory
//!     .get_identifier_with_id("Iron Axe", "iron_axe", Stability::Unstable)
//!     .unwrap();
//! assert_eq!(axe.name(), "Iron Axe");
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::logger::Logger;
use crate::stability::Stability;

/// Lowercase alphanumeric segments separated by single underscores
static SNAKE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)*$").expect("snake_case pattern is valid"));

static DISALLOWED_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]+").expect("disallowed-run pattern is valid"));

static UNDERSCORE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("underscore-run pattern is valid"));

/// Check whether `id` is a well-formed snake_case id
pub fn is_snake_case(id: &str) -> bool {
    SNAKE_CASE.is_match(id)
}

/// Derive a snake_case id from a display name
///
/// The name is lower-cased, every run of characters outside `[a-zA-Z0-9_]`
/// becomes one underscore, underscore runs collapse and the result is trimmed
/// of leading and trailing underscores. Names without any ASCII alphanumeric
/// character derive to an empty id.
pub fn derive_id(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = DISALLOWED_RUN.replace_all(&lowered, "_");
    let collapsed = UNDERSCORE_RUN.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

/// Immutable (name, id, stability) triple labelling a content object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    name: String,
    id: String,
    stability: Stability,
}

impl Identifier {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stability(&self) -> Stability {
        self.stability
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.id, self.stability)
    }
}

/// Error type for identifier validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("Illegal id: {id} doesn't conform to snake_case format!")]
    Malformed { id: String },
    #[error("Identifier name must not be empty")]
    EmptyName,
}

/// What the factory does with an identifier that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Log the violation at error level and return the identifier anyway
    #[default]
    Lenient,
    /// Return the violation as an error
    Strict,
}

/// Validates and constructs [`Identifier`] values
#[derive(Debug, Clone)]
pub struct IdentifierFactory {
    logger: Logger,
    policy: IdPolicy,
}

impl IdentifierFactory {
    /// Name of the factory's default logger
    pub const LOGGER_NAME: &'static str = "mod_identifier_factory";

    /// Lenient factory logging through `tracing`
    pub fn new() -> Self {
        Self::with_logger(Logger::new(Self::LOGGER_NAME, true, false))
    }

    pub fn with_logger(logger: Logger) -> Self {
        Self {
            logger,
            policy: IdPolicy::Lenient,
        }
    }

    pub fn with_policy(mut self, policy: IdPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// Create an identifier whose id is derived from `name`
    ///
    /// See [`derive_id`] for the derivation rules.
    pub fn get_identifier(&self, name: &str, stability: Stability) -> Result<Identifier, IdentifierError> {
        let id = derive_id(name);
        self.get_identifier_with_id(name, &id, stability)
    }

    /// Create an identifier with an explicit id
    ///
    /// # Errors
    ///
    /// With [`IdPolicy::Strict`], returns `IdentifierError` when `id` is not
    /// snake_case or `name` is empty. With [`IdPolicy::Lenient`] the same
    /// conditions are logged at error level and the identifier is returned
    /// unchanged.
    pub fn get_identifier_with_id(
        &self,
        name: &str,
        id: &str,
        stability: Stability,
    ) -> Result<Identifier, IdentifierError> {
        if name.is_empty() {
            self.reject(IdentifierError::EmptyName)?;
        }
        if !is_snake_case(id) {
            self.reject(IdentifierError::Malformed { id: id.to_string() })?;
        }

        Ok(Identifier {
            name: name.to_string(),
            id: id.to_string(),
            stability,
        })
    }

    fn reject(&self, error: IdentifierError) -> Result<(), IdentifierError> {
        match self.policy {
            IdPolicy::Strict => Err(error),
            IdPolicy::Lenient => {
                self.logger.error_with(error.to_string(), &error);
                Ok(())
            }
        }
    }
}

impl Default for IdentifierFactory {
    fn default() -> Self {
        Self::new()
    }
}
