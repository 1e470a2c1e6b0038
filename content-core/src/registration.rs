//! Generic registration of typed content
//!
//! A [`Registration`] is configured with the owning [`ModContext`], a
//! [`ContentKind`] tag and a [`ContentRegistry`] capability. Every content kind
//! shares the same protocol: build the namespaced key, optionally log the
//! loading stage, hand the value to the registry and give it back to the caller.

use std::fmt;
use std::marker::PhantomData;

use crate::context::ModContext;
use crate::groups::{GroupEntries, GroupEvents, ItemGroup};
use crate::identifier::Identifier;
use crate::registry::{ContentRegistry, ResourceKey};

/// Kind of content a registration stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Item,
    Block,
    Fluid,
    EntityType,
}

impl ContentKind {
    /// Registry category tag
    pub const fn tag(self) -> &'static str {
        match self {
            ContentKind::Item => "item",
            ContentKind::Block => "block",
            ContentKind::Fluid => "fluid",
            ContentKind::EntityType => "entity_type",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Registrar for one content kind of one module
///
/// `R` is usually `&mut` some registry so the caller keeps ownership of it.
///
/// # Example
///
/// ```rust
/// # use content_core::*;
/// let context = ModContext::new("Vault", Version::stable(1, 0, 0), true, false);
/// let mut items: MemoryRegistry<u32> = MemoryRegistry::new("item");
/// let mut registration = Registration::new(&context, ContentKind::Item, &mut items);
///
/// let ruby = registration.register_staged("ruby_gem", 42u32, "early").unwrap();
/// assert_eq!(ruby, 42);
/// assert!(items.contains(&ResourceKey::new("vault", "ruby_gem")));
/// ```
pub struct Registration<'a, T, R> {
    context: &'a ModContext,
    kind: ContentKind,
    registry: R,
    _marker: PhantomData<fn(T) -> T>,
}

impl<'a, T, R: ContentRegistry<T>> Registration<'a, T, R> {
    pub fn new(context: &'a ModContext, kind: ContentKind, registry: R) -> Self {
        Self {
            context,
            kind,
            registry,
            _marker: PhantomData,
        }
    }

    /// Registration for items
    pub fn items(context: &'a ModContext, registry: R) -> Self {
        Self::new(context, ContentKind::Item, registry)
    }

    /// Registration for blocks
    pub fn blocks(context: &'a ModContext, registry: R) -> Self {
        Self::new(context, ContentKind::Block, registry)
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn context(&self) -> &'a ModContext {
        self.context
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Key `id` is registered under: the module namespace plus `id`
    pub fn key(&self, id: &str) -> ResourceKey {
        ResourceKey::new(self.context.namespace(), id)
    }

    /// Register `value` under `id` and return it
    ///
    /// `id` is used as given; produce it with
    /// [`IdentifierFactory`](crate::identifier::IdentifierFactory) to have it validated.
    ///
    /// # Errors
    ///
    /// Whatever the underlying registry reports, unchanged.
    pub fn register(&mut self, id: &str, value: T) -> Result<T, R::Error> {
        let key = self.key(id);
        self.registry.put(key, value)
    }

    /// Log `(id, kind, stage)` and then [`register`](Self::register)
    ///
    /// `stage` is a free-form loading phase label used only for diagnostics.
    pub fn register_staged(&mut self, id: &str, value: T, stage: &str) -> Result<T, R::Error> {
        self.context.log_register(id, self.kind.tag(), stage);
        self.register(id, value)
    }

    /// Register `value` under the identifier's id
    pub fn register_identifier(&mut self, identifier: &Identifier, value: T) -> Result<T, R::Error> {
        self.register(identifier.id(), value)
    }

    pub fn register_identifier_staged(
        &mut self,
        identifier: &Identifier,
        value: T,
        stage: &str,
    ) -> Result<T, R::Error> {
        self.register_staged(identifier.id(), value, stage)
    }

    /// Append `value` to `group` every time the group is populated
    pub fn to_group<E>(&self, value: &T, group: &ItemGroup, events: &mut E)
    where
        T: Clone + fmt::Display + 'static,
        E: GroupEvents<T> + ?Sized,
    {
        self.context
            .log_debug(format!("Sending {} to {}", value, group.display_name()));

        let value = value.clone();
        events.on_populate(group, Box::new(move |entries: &mut GroupEntries<T>| entries.add(value.clone())));
    }
}

impl<T, R: fmt::Debug> fmt::Debug for Registration<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("namespace", &self.context.namespace())
            .field("kind", &self.kind)
            .field("registry", &self.registry)
            .finish()
    }
}
