//! Content loading
//!
//! Runs the whole registration phase for one manifest: the bundled vault
//! content first, then the manifest's own items. Registries are frozen once
//! loading finishes and every menu group is populated for the report.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use content_core::{
    ContentKind, IdPolicy, ItemGroup, LogSink, MemoryRegistry, MenuGroups, ModContext, Registration,
};
use content_vault::{Block, BlockRef, Item, ItemRef, Vault, VaultGroups};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::manifest::{ItemEntry, Manifest};

/// Switches controlling a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Force the strict identifier policy
    pub strict_ids: bool,
    /// Register the bundled vault content
    pub include_vault: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strict_ids: false,
            include_vault: true,
        }
    }
}

impl From<&Config> for LoadOptions {
    fn from(config: &Config) -> Self {
        Self {
            strict_ids: config.strict_ids,
            include_vault: !config.no_vault,
        }
    }
}

/// Result of a completed load
#[derive(Debug)]
pub struct LoadReport {
    pub context: ModContext,
    pub items: MemoryRegistry<ItemRef>,
    pub blocks: MemoryRegistry<BlockRef>,
    /// Every menu group with the entries it was populated with
    pub groups: Vec<(ItemGroup, Vec<ItemRef>)>,
}

impl LoadReport {
    /// Entries of the group whose key path is `name`
    pub fn group(&self, name: &str) -> Option<&[ItemRef]> {
        self.groups
            .iter()
            .find(|(group, _)| group.key().path() == name)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Registered content rendered as TOML
    pub fn to_toml(&self) -> Result<String> {
        let dump = Dump {
            namespace: self.context.namespace(),
            version: self.context.version().to_string(),
            items: self
                .items
                .iter()
                .map(|(key, item)| DumpEntry { key: key.to_string(), value: item.as_ref() })
                .collect(),
            blocks: self
                .blocks
                .iter()
                .map(|(key, block)| DumpEntry { key: key.to_string(), value: block.as_ref() })
                .collect(),
        };
        toml::to_string(&dump).context("failed to serialize registered content")
    }
}

#[derive(Serialize)]
struct Dump<'a> {
    namespace: &'a str,
    version: String,
    items: Vec<DumpEntry<'a, Item>>,
    blocks: Vec<DumpEntry<'a, Block>>,
}

#[derive(Serialize)]
struct DumpEntry<'a, T> {
    key: String,
    value: &'a T,
}

/// Run the registration phase for `manifest`
///
/// `sink` replaces the default tracing sink of the module's logger.
pub fn load(manifest: &Manifest, options: LoadOptions, sink: Option<Arc<dyn LogSink>>) -> Result<LoadReport> {
    let mut context = ModContext::from_config(&manifest.context, sink);
    if options.strict_ids {
        context = context.with_id_policy(IdPolicy::Strict);
    }

    info!(
        "Loading {} {} into namespace '{}'",
        context.name(),
        context.version(),
        context.namespace()
    );

    let menu = VaultGroups::vanilla();
    let mut items = MemoryRegistry::new(ContentKind::Item.tag());
    let mut blocks = MemoryRegistry::new(ContentKind::Block.tag());
    let mut groups = MenuGroups::new();

    if options.include_vault {
        Vault::register(&context, &mut items, &mut blocks, &mut groups, &menu)
            .context("failed to register vault content")?;
    }

    register_entries(&context, &manifest.items, &mut items, &mut groups, &menu)?;

    items.freeze();
    blocks.freeze();

    let groups = menu
        .all()
        .into_iter()
        .map(|group| (group.clone(), groups.populate(group).into_entries()))
        .collect();

    info!(
        items = items.len(),
        blocks = blocks.len(),
        "Registered content for {}",
        context.name()
    );

    Ok(LoadReport {
        context,
        items,
        blocks,
        groups,
    })
}

fn register_entries(
    context: &ModContext,
    entries: &[ItemEntry],
    items: &mut MemoryRegistry<ItemRef>,
    groups: &mut MenuGroups<ItemRef>,
    menu: &VaultGroups,
) -> Result<()> {
    let factory = context.identifier_factory();
    let mut registration = Registration::items(context, items);

    for entry in entries {
        let group = match &entry.group {
            Some(name) => Some(menu.by_name(name).ok_or_else(|| {
                anyhow!("item '{}' names unknown group '{}'", entry.name, name)
            })?),
            None => None,
        };

        let identifier = match &entry.id {
            Some(id) => factory.get_identifier_with_id(&entry.name, id, entry.stability),
            None => factory.get_identifier(&entry.name, entry.stability),
        }
        .with_context(|| format!("invalid identifier for item '{}'", entry.name))?;

        let item = Arc::new(Item::new(identifier.clone(), entry.max_stack));
        let item = match &entry.stage {
            Some(stage) => registration.register_identifier_staged(&identifier, item, stage),
            None => registration.register_identifier(&identifier, item),
        }
        .with_context(|| format!("failed to register item '{}'", identifier.id()))?;

        if let Some(group) = group {
            registration.to_group(&item, group, groups);
        }

        debug!(key = %registration.key(identifier.id()), "Registered manifest item");
    }

    Ok(())
}
