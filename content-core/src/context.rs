//! Application context shared by a content module's registrations
//!
//! The context is built once at start-up and handed by reference to every
//! component that needs the module's namespace or its logger.

use std::sync::Arc;

use serde::Deserialize;

use crate::identifier::{derive_id, IdPolicy, IdentifierFactory};
use crate::logger::{LogSink, Logger};
use crate::version::Version;

/// Serializable settings a [`ModContext`] is built from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContextConfig {
    /// Display name of the module, also the source of its namespace
    pub name: String,
    pub version: Version,
    /// Master switch for all logging
    #[serde(default = "default_log")]
    pub log: bool,
    /// Enables debug-level output
    #[serde(default)]
    pub debug_info: bool,
    #[serde(default)]
    pub id_policy: IdPolicy,
}

fn default_log() -> bool {
    true
}

/// Name, namespace, version and logging for one content module
#[derive(Debug, Clone)]
pub struct ModContext {
    name: String,
    namespace: String,
    version: Version,
    id_policy: IdPolicy,
    logger: Logger,
}

impl ModContext {
    /// Create a context logging through `tracing`
    pub fn new(name: impl Into<String>, version: Version, log: bool, debug_info: bool) -> Self {
        let name = name.into();
        let logger = Logger::new(name.as_str(), log, debug_info);
        Self::with_logger(name, version, logger)
    }

    /// Create a context around an existing logger
    ///
    /// Logs a warning when `version` is not stable.
    pub fn with_logger(name: impl Into<String>, version: Version, logger: Logger) -> Self {
        let name = name.into();
        let context = Self {
            namespace: derive_id(&name),
            name,
            version,
            id_policy: IdPolicy::default(),
            logger,
        };

        if !version.is_stable() {
            context.log_warn(format!("{} {} is unstable!", context.name, context.version));
        }
        context
    }

    /// Build a context from its configuration, optionally with a custom sink
    pub fn from_config(config: &ContextConfig, sink: Option<Arc<dyn LogSink>>) -> Self {
        let mut logger = Logger::new(config.name.as_str(), config.log, config.debug_info);
        if let Some(sink) = sink {
            logger = logger.with_sink(sink);
        }
        Self::with_logger(config.name.clone(), config.version, logger).with_id_policy(config.id_policy)
    }

    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Identifier factory sharing this context's sink, flags and policy
    pub fn identifier_factory(&self) -> IdentifierFactory {
        IdentifierFactory::with_logger(self.logger.named(IdentifierFactory::LOGGER_NAME))
            .with_policy(self.id_policy)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefixed to every registry key, derived from the name
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn log_info(&self, message: impl AsRef<str>) {
        self.logger.info(message);
    }

    pub fn log_debug(&self, message: impl AsRef<str>) {
        self.logger.debug(message);
    }

    pub fn log_warn(&self, message: impl AsRef<str>) {
        self.logger.warn(message);
    }

    pub fn log_error(&self, message: impl AsRef<str>) {
        self.logger.error(message);
    }

    /// Record that `id` of `kind` is being registered during `stage`
    pub fn log_register(&self, id: &str, kind: &str, stage: &str) {
        self.logger.info(format!("Registering {kind} {id} during {stage}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{LogLevel, MemorySink};
    use crate::stability::Stability;

    fn context(version: Version, log: bool) -> (ModContext, Arc<MemorySink>) {
        let sink = MemorySink::new();
        let logger = Logger::new("Vault", log, false).with_sink(sink.clone());
        (ModContext::with_logger("Vault", version, logger), sink)
    }

    #[test]
    fn test_namespace_is_derived_from_name() {
        let (ctx, _) = context(Version::stable(1, 0, 0), true);
        assert_eq!(ctx.name(), "Vault");
        assert_eq!(ctx.namespace(), "vault");

        let spaced = ModContext::new("Better Tools", Version::stable(1, 0, 0), false, false);
        assert_eq!(spaced.namespace(), "better_tools");
    }

    #[test]
    fn test_stable_version_logs_nothing() {
        let (_, sink) = context(Version::stable(1, 0, 0), true);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unstable_version_warns_once() {
        let (_, sink) = context(Version::new(0, 3, 0, Stability::Unstable), true);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].message, "Vault 0.3.0-unstable is unstable!");
    }

    #[test]
    fn test_unstable_warning_respects_log_flag() {
        let (_, sink) = context(Version::new(0, 3, 0, Stability::Unstable), false);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_log_register() {
        let (ctx, sink) = context(Version::stable(1, 0, 0), true);

        ctx.log_register("ruby_gem", "item", "early");

        let records = sink.at_level(LogLevel::Info);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Registering item ruby_gem during early");
    }

    #[test]
    fn test_from_config() {
        let config: ContextConfig = toml::from_str(
            r#"
            name = "Vault"
            version = "0.2.0"
            debug_info = true
            id_policy = "strict"
            "#,
        )
        .unwrap();

        assert!(config.log);
        let sink = MemorySink::new();
        let ctx = ModContext::from_config(&config, Some(sink.clone() as Arc<dyn LogSink>));

        assert_eq!(ctx.id_policy(), IdPolicy::Strict);
        assert!(ctx.logger().is_verbose());
        ctx.log_debug("visible");
        assert_eq!(sink.at_level(LogLevel::Debug).len(), 1);
    }

    #[test]
    fn test_identifier_factory_shares_sink() {
        let (ctx, sink) = context(Version::stable(1, 0, 0), true);
        let factory = ctx.identifier_factory();

        factory
            .get_identifier_with_id("Iron Axe", "Iron-Axe", Stability::Stable)
            .unwrap();

        let errors = sink.at_level(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].logger, IdentifierFactory::LOGGER_NAME);
    }
}
