//! Vault content module
//!
//! A complete content module built on `content-core`: it mints identifiers for
//! its items and blocks, registers them through item and block registrations
//! and places the items into creation-menu groups.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use content_core::{
    ContentKind, ContentRegistry, GroupEvents, Identifier, IdentifierError, ItemGroup, ModContext,
    Registration, ResourceKey, Stability,
};
use serde::Serialize;

/// Loading phase for base materials
pub const STAGE_EARLY: &str = "early";
/// Loading phase for everything built from base materials
pub const STAGE_MAIN: &str = "main";

/// Default stack size for items
pub const DEFAULT_MAX_STACK: u8 = 64;

/// A placeable block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    identifier: Identifier,
    hardness: f32,
}

impl Block {
    pub fn new(identifier: Identifier, hardness: f32) -> Self {
        Self { identifier, hardness }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn hardness(&self) -> f32 {
        self.hardness
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier.id())
    }
}

/// An inventory item, optionally placing a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    identifier: Identifier,
    max_stack: u8,
    /// Block this item places, for block items
    #[serde(skip_serializing_if = "Option::is_none")]
    places: Option<ResourceKey>,
}

impl Item {
    pub fn new(identifier: Identifier, max_stack: u8) -> Self {
        Self {
            identifier,
            max_stack,
            places: None,
        }
    }

    /// Item that places the block registered under `block`
    pub fn block_item(identifier: Identifier, block: ResourceKey) -> Self {
        Self {
            identifier,
            max_stack: DEFAULT_MAX_STACK,
            places: Some(block),
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn max_stack(&self) -> u8 {
        self.max_stack
    }

    pub fn places(&self) -> Option<&ResourceKey> {
        self.places.as_ref()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier.id())
    }
}

/// Shared handle to a registered item
pub type ItemRef = Arc<Item>;
/// Shared handle to a registered block
pub type BlockRef = Arc<Block>;

/// Error type for vault registration
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error("Failed to register {kind} '{id}'")]
    Registry {
        kind: ContentKind,
        id: String,
        source: Box<dyn Error + Send + Sync>,
    },
}

impl VaultError {
    /// Wrap a registry error for content `id` of `kind`
    pub fn registry<E>(kind: ContentKind, id: &str, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        VaultError::Registry {
            kind,
            id: id.to_string(),
            source: Box::new(source),
        }
    }
}

/// Creation-menu groups the vault places items into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultGroups {
    pub ingredients: ItemGroup,
    pub combat: ItemGroup,
    pub building_blocks: ItemGroup,
}

impl VaultGroups {
    /// The engine's built-in groups
    pub fn vanilla() -> Self {
        Self {
            ingredients: ItemGroup::new(ResourceKey::new("minecraft", "ingredients"), "Ingredients"),
            combat: ItemGroup::new(ResourceKey::new("minecraft", "combat"), "Combat"),
            building_blocks: ItemGroup::new(
                ResourceKey::new("minecraft", "building_blocks"),
                "Building Blocks",
            ),
        }
    }

    pub fn all(&self) -> [&ItemGroup; 3] {
        [&self.ingredients, &self.combat, &self.building_blocks]
    }

    /// Look up a group by the path of its key
    pub fn by_name(&self, name: &str) -> Option<&ItemGroup> {
        self.all().into_iter().find(|group| group.key().path() == name)
    }
}

impl Default for VaultGroups {
    fn default() -> Self {
        Self::vanilla()
    }
}

/// Everything the vault registers
#[derive(Debug, Clone)]
pub struct Vault {
    pub ruby_block: BlockRef,
    pub ruby_gem: ItemRef,
    pub ruby_block_item: ItemRef,
    pub magic_sword: ItemRef,
    pub fire_rod: ItemRef,
}

impl Vault {
    /// Register all vault content and place its items into `menu` groups
    ///
    /// Base materials are registered during [`STAGE_EARLY`], tools during
    /// [`STAGE_MAIN`].
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Identifier` when the context's identifier policy
    /// rejects an id and `VaultError::Registry` when a registry refuses a value.
    pub fn register<IR, BR, G>(
        context: &ModContext,
        items: IR,
        blocks: BR,
        groups: &mut G,
        menu: &VaultGroups,
    ) -> Result<Self, VaultError>
    where
        IR: ContentRegistry<ItemRef>,
        BR: ContentRegistry<BlockRef>,
        G: GroupEvents<ItemRef> + ?Sized,
    {
        let factory = context.identifier_factory();
        let mut items = Registration::items(context, items);
        let mut blocks = Registration::blocks(context, blocks);

        // Base materials
        let ruby_block_id = factory.get_identifier("Ruby Block", Stability::Stable)?;
        let ruby_block = blocks
            .register_identifier_staged(
                &ruby_block_id,
                Arc::new(Block::new(ruby_block_id.clone(), 5.0)),
                STAGE_EARLY,
            )
            .map_err(|e| VaultError::registry(ContentKind::Block, ruby_block_id.id(), e))?;

        let ruby_block_item = items
            .register_identifier_staged(
                &ruby_block_id,
                Arc::new(Item::block_item(ruby_block_id.clone(), blocks.key(ruby_block_id.id()))),
                STAGE_EARLY,
            )
            .map_err(|e| VaultError::registry(ContentKind::Item, ruby_block_id.id(), e))?;

        let ruby_gem_id = factory.get_identifier("Ruby Gem", Stability::Stable)?;
        let ruby_gem = items
            .register_identifier_staged(
                &ruby_gem_id,
                Arc::new(Item::new(ruby_gem_id.clone(), DEFAULT_MAX_STACK)),
                STAGE_EARLY,
            )
            .map_err(|e| VaultError::registry(ContentKind::Item, ruby_gem_id.id(), e))?;

        // Tools
        let magic_sword_id = factory.get_identifier("Magic Sword", Stability::Stable)?;
        let magic_sword = items
            .register_identifier_staged(&magic_sword_id, Arc::new(Item::new(magic_sword_id.clone(), 1)), STAGE_MAIN)
            .map_err(|e| VaultError::registry(ContentKind::Item, magic_sword_id.id(), e))?;

        // Renamed from "Blaze Wand", the id stays for existing worlds
        let fire_rod_id = factory.get_identifier_with_id("Fire Rod", "blaze_wand", Stability::Unstable)?;
        let fire_rod = items
            .register_identifier_staged(&fire_rod_id, Arc::new(Item::new(fire_rod_id.clone(), 1)), STAGE_MAIN)
            .map_err(|e| VaultError::registry(ContentKind::Item, fire_rod_id.id(), e))?;

        items.to_group(&ruby_gem, &menu.ingredients, groups);
        items.to_group(&ruby_block_item, &menu.building_blocks, groups);
        items.to_group(&magic_sword, &menu.combat, groups);
        items.to_group(&fire_rod, &menu.combat, groups);

        Ok(Self {
            ruby_block,
            ruby_gem,
            ruby_block_item,
            magic_sword,
            fire_rod,
        })
    }

    /// All registered items
    pub fn items(&self) -> [&ItemRef; 4] {
        [&self.ruby_gem, &self.ruby_block_item, &self.magic_sword, &self.fire_rod]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_core::logger::CapturedRecord;
    use content_core::{LogLevel, Logger, MemoryRegistry, MemorySink, MenuGroups, RegistryError, Version};

    struct Fixture {
        context: ModContext,
        sink: Arc<MemorySink>,
        items: MemoryRegistry<ItemRef>,
        blocks: MemoryRegistry<BlockRef>,
        groups: MenuGroups<ItemRef>,
        menu: VaultGroups,
    }

    impl Fixture {
        fn new(verbose: bool) -> Self {
            let sink = MemorySink::new();
            let logger = Logger::new("Vault", true, verbose).with_sink(sink.clone());
            Self {
                context: ModContext::with_logger("Vault", Version::stable(1, 0, 0), logger),
                sink,
                items: MemoryRegistry::new("item"),
                blocks: MemoryRegistry::new("block"),
                groups: MenuGroups::new(),
                menu: VaultGroups::vanilla(),
            }
        }

        fn register(&mut self) -> Result<Vault, VaultError> {
            Vault::register(
                &self.context,
                &mut self.items,
                &mut self.blocks,
                &mut self.groups,
                &self.menu,
            )
        }
    }

    fn key(path: &str) -> ResourceKey {
        ResourceKey::new("vault", path)
    }

    fn messages(records: &[CapturedRecord]) -> Vec<&str> {
        records.iter().map(|record| record.message.as_str()).collect()
    }

    #[test]
    fn test_registers_all_content() {
        let mut fixture = Fixture::new(false);
        let vault = fixture.register().unwrap();

        let item_keys: Vec<String> = fixture.items.keys().map(ToString::to_string).collect();
        assert_eq!(
            item_keys,
            vec!["vault:blaze_wand", "vault:magic_sword", "vault:ruby_block", "vault:ruby_gem"]
        );
        assert_eq!(fixture.blocks.len(), 1);
        assert!(Arc::ptr_eq(&vault.ruby_block, fixture.blocks.get(&key("ruby_block")).unwrap()));
        assert!(Arc::ptr_eq(&vault.ruby_gem, fixture.items.get(&key("ruby_gem")).unwrap()));
    }

    #[test]
    fn test_staged_registration_logs() {
        let mut fixture = Fixture::new(false);
        fixture.register().unwrap();

        let infos = fixture.sink.at_level(LogLevel::Info);
        assert_eq!(
            messages(&infos),
            vec![
                "Registering block ruby_block during early",
                "Registering item ruby_block during early",
                "Registering item ruby_gem during early",
                "Registering item magic_sword during main",
                "Registering item blaze_wand during main",
            ]
        );
        assert!(fixture.sink.at_level(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_items_reach_their_groups() {
        let mut fixture = Fixture::new(true);
        let vault = fixture.register().unwrap();

        let combat = fixture.groups.populate(&fixture.menu.combat);
        assert_eq!(combat.len(), 2);
        assert!(Arc::ptr_eq(&combat.entries()[0], &vault.magic_sword));
        assert!(Arc::ptr_eq(&combat.entries()[1], &vault.fire_rod));

        let ingredients = fixture.groups.populate(&fixture.menu.ingredients);
        assert_eq!(ingredients.entries().len(), 1);
        assert_eq!(ingredients.entries()[0].identifier().id(), "ruby_gem");

        let debug = fixture.sink.at_level(LogLevel::Debug);
        assert!(messages(&debug).contains(&"Sending blaze_wand to Combat"));
        assert!(messages(&debug).contains(&"Sending ruby_block to Building Blocks"));
    }

    #[test]
    fn test_block_item_places_block() {
        let mut fixture = Fixture::new(false);
        let vault = fixture.register().unwrap();

        assert_eq!(vault.ruby_block_item.places(), Some(&key("ruby_block")));
        assert_eq!(vault.ruby_gem.places(), None);
        assert_eq!(vault.ruby_block.hardness(), 5.0);
    }

    #[test]
    fn test_renamed_item_keeps_legacy_id() {
        let mut fixture = Fixture::new(false);
        let vault = fixture.register().unwrap();

        let fire_rod = vault.fire_rod.identifier();
        assert_eq!(fire_rod.name(), "Fire Rod");
        assert_eq!(fire_rod.id(), "blaze_wand");
        assert_eq!(fire_rod.stability(), Stability::Unstable);
        assert_eq!(vault.magic_sword.max_stack(), 1);
    }

    #[test]
    fn test_second_registration_fails_on_duplicate() {
        let mut fixture = Fixture::new(false);
        fixture.register().unwrap();

        let err = fixture.register().unwrap_err();

        match err {
            VaultError::Registry { kind, id, source } => {
                assert_eq!(kind, ContentKind::Block);
                assert_eq!(id, "ruby_block");
                let source = source.downcast::<RegistryError>().unwrap();
                assert_eq!(*source, RegistryError::Duplicate { key: key("ruby_block") });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_frozen_item_registry() {
        let mut fixture = Fixture::new(false);
        fixture.items.freeze();

        let err = fixture.register().unwrap_err();

        assert_eq!(err.to_string(), "Failed to register item 'ruby_block'");
        assert_eq!(fixture.blocks.len(), 1);
    }

    #[test]
    fn test_group_lookup_by_name() {
        let menu = VaultGroups::vanilla();
        assert_eq!(menu.by_name("combat"), Some(&menu.combat));
        assert_eq!(menu.by_name("building_blocks").unwrap().display_name(), "Building Blocks");
        assert!(menu.by_name("redstone").is_none());
    }
}
