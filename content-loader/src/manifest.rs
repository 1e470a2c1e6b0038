//! Mod manifest parsing
//!
//! A manifest holds the `[mod]` table the [`ModContext`](content_core::ModContext)
//! is built from and an optional list of `[[items]]` to register on top of the
//! bundled content.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use content_core::{ContextConfig, Stability};
use content_vault::DEFAULT_MAX_STACK;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(rename = "mod")]
    pub context: ContextConfig,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

/// Item declared in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    pub name: String,
    /// Explicit id; derived from `name` when absent
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub stability: Stability,
    #[serde(default = "default_max_stack")]
    pub max_stack: u8,
    /// Loading stage to log the registration under
    #[serde(default)]
    pub stage: Option<String>,
    /// Creation-menu group to place the item into
    #[serde(default)]
    pub group: Option<String>,
}

fn default_max_stack() -> u8 {
    DEFAULT_MAX_STACK
}

impl Manifest {
    /// Read and validate a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let manifest = Self::from_toml(&text)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.context.name.trim().is_empty() {
            return Err(anyhow!("mod name cannot be empty"));
        }

        for entry in &self.items {
            if entry.max_stack == 0 {
                return Err(anyhow!("item '{}' must have max_stack greater than 0", entry.name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_core::{IdPolicy, Version};

    const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/mods/vault.toml");

    #[test]
    fn test_minimal_manifest() {
        let manifest = Manifest::from_toml(
            r#"
            [mod]
            name = "Vault"
            version = "1.0.0"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.context.name, "Vault");
        assert_eq!(manifest.context.version, Version::stable(1, 0, 0));
        assert!(manifest.context.log);
        assert!(!manifest.context.debug_info);
        assert_eq!(manifest.context.id_policy, IdPolicy::Lenient);
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn test_item_defaults() {
        let manifest = Manifest::from_toml(
            r#"
            [mod]
            name = "Vault"
            version = "1.0.0"

            [[items]]
            name = "Emerald Shard"
            "#,
        )
        .unwrap();

        let entry = &manifest.items[0];
        assert_eq!(entry.id, None);
        assert_eq!(entry.stability, Stability::Stable);
        assert_eq!(entry.max_stack, DEFAULT_MAX_STACK);
        assert_eq!(entry.stage, None);
        assert_eq!(entry.group, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Manifest::from_toml(
            r#"
            [mod]
            name = "Vault"
            version = "1.0.0"

            [[items]]
            name = "Emerald Shard"
            rarity = "epic"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_max_stack_rejected() {
        let manifest = Manifest::from_toml(
            r#"
            [mod]
            name = "Vault"
            version = "1.0.0"

            [[items]]
            name = "Ghost"
            max_stack = 0
            "#,
        )
        .unwrap();

        let err = manifest.validate().unwrap_err();
        assert_eq!(err.to_string(), "item 'Ghost' must have max_stack greater than 0");
    }

    #[test]
    fn test_load_bundled_manifest() {
        let manifest = Manifest::load(Path::new(BUNDLED)).unwrap();

        assert_eq!(manifest.context.name, "Vault");
        assert!(!manifest.context.version.is_stable());
        assert!(manifest.items.iter().any(|entry| entry.id.as_deref() == Some("Iron-Axe")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read manifest"));
    }
}
