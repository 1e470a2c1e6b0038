//! Core types for registering game content
//!
//! This crate provides the building blocks content modules use during loading:
//! - `Identifier` / `IdentifierFactory`: validated (name, id, stability) values
//! - `ModContext`: explicit application context carrying namespace and logging flags
//! - `ContentRegistry`: capability for the engine-owned key-value registry
//! - `Registration`: generic registrar specialized per content kind
//! - `GroupEvents`: creation-menu population subscriptions

pub mod stability;
pub mod version;
pub mod logger;
pub mod context;
pub mod identifier;
pub mod registry;
pub mod registration;
pub mod groups;

// Re-export main types for convenience
pub use stability::Stability;
pub use version::Version;
pub use logger::{LogLevel, LogSink, Logger, MemorySink, TracingSink};
pub use context::{ContextConfig, ModContext};
pub use identifier::{derive_id, is_snake_case, IdPolicy, Identifier, IdentifierError, IdentifierFactory};
pub use registry::{ContentRegistry, MemoryRegistry, RegistryError, ResourceKey};
pub use registration::{ContentKind, Registration};
pub use groups::{GroupEntries, GroupEvents, ItemGroup, MenuGroups};
