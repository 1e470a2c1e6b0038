//! Creation-menu groups and population subscriptions
//!
//! The engine decides when a group is populated. Content code subscribes a
//! callback per group through [`GroupEvents`]; [`MenuGroups`] is an in-memory
//! implementation that fires callbacks whenever [`MenuGroups::populate`] runs.

use std::collections::HashMap;
use std::fmt;

use crate::registry::ResourceKey;

/// A creation-menu group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemGroup {
    key: ResourceKey,
    display_name: String,
}

impl ItemGroup {
    pub fn new(key: ResourceKey, display_name: impl Into<String>) -> Self {
        Self {
            key,
            display_name: display_name.into(),
        }
    }

    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl fmt::Display for ItemGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Contents being collected for a group during population
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntries<T> {
    entries: Vec<T>,
}

impl<T> GroupEntries<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a value to the group's contents
    pub fn add(&mut self, value: T) {
        self.entries.push(value);
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for GroupEntries<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback run each time a group is populated
pub type PopulateCallback<T> = Box<dyn FnMut(&mut GroupEntries<T>)>;

/// Capability for subscribing to group population
pub trait GroupEvents<T> {
    /// Run `callback` every time `group` is populated
    fn on_populate(&mut self, group: &ItemGroup, callback: PopulateCallback<T>);
}

/// In-memory group event hub
pub struct MenuGroups<T> {
    listeners: HashMap<ResourceKey, Vec<PopulateCallback<T>>>,
}

impl<T> MenuGroups<T> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Populate `group`, running its callbacks in subscription order
    pub fn populate(&mut self, group: &ItemGroup) -> GroupEntries<T> {
        let mut entries = GroupEntries::new();
        if let Some(callbacks) = self.listeners.get_mut(group.key()) {
            for callback in callbacks.iter_mut() {
                callback(&mut entries);
            }
        }
        entries
    }

    /// Number of callbacks subscribed to `group`
    pub fn listener_count(&self, group: &ItemGroup) -> usize {
        self.listeners.get(group.key()).map_or(0, Vec::len)
    }
}

impl<T> Default for MenuGroups<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GroupEvents<T> for MenuGroups<T> {
    fn on_populate(&mut self, group: &ItemGroup, callback: PopulateCallback<T>) {
        self.listeners
            .entry(group.key().clone())
            .or_default()
            .push(callback);
    }
}

impl<T> fmt::Debug for MenuGroups<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(String, usize)> = self
            .listeners
            .iter()
            .map(|(key, callbacks)| (key.to_string(), callbacks.len()))
            .collect();
        counts.sort();
        f.debug_struct("MenuGroups").field("listeners", &counts).finish()
    }
}
