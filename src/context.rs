//! # Value Layer Context
//!
//! `ValueContext` owns the shared mutable state of the value layer: the raw
//! text intern table and the canonical value cache, plus the configuration
//! both were built from. The engine creates one at startup, passes it by
//! reference into value factories, and drops it at shutdown.
//!
//! Explicit ownership (instead of ambient globals) is what keeps the layer
//! testable: every test builds its own context with whatever geometry it
//! needs, and nothing leaks between engine instances sharing a process.

use eyre::Result;

use crate::cache::ValueCache;
use crate::config::ValueConfig;
use crate::intern::TextInterner;
use crate::types::StrValue;

/// Owner of the value layer's shared tables. One per engine instance.
pub struct ValueContext {
    config: ValueConfig,
    interner: TextInterner,
    cache: ValueCache<StrValue>,
}

impl ValueContext {
    /// Builds the shared tables from `config`. Fails only on invalid table
    /// geometry (shard counts that are not powers of two or do not divide
    /// the table sizes).
    pub fn new(config: ValueConfig) -> Result<Self> {
        let interner = TextInterner::new(config.text_intern_size, config.text_intern_shards)?;
        let cache = ValueCache::new(config.value_cache_size, config.value_cache_shards)?;
        Ok(Self {
            config,
            interner,
            cache,
        })
    }

    /// Context with the compile-time default geometry.
    pub fn with_defaults() -> Self {
        Self::new(ValueConfig::default()).expect("default value configuration is valid") // INVARIANT: defaults are validated by compile-time assertions in config::constants
    }

    pub fn config(&self) -> &ValueConfig {
        &self.config
    }

    pub fn interner(&self) -> &TextInterner {
        &self.interner
    }

    pub fn cache(&self) -> &ValueCache<StrValue> {
        &self.cache
    }
}

impl Default for ValueContext {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_builds() {
        let ctx = ValueContext::with_defaults();
        assert!(ctx.cache().is_empty());
        assert!(ctx.interner().is_empty());
        assert_eq!(ctx.config().value_cache_size, ctx.cache().capacity());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ValueConfig::default().value_cache_size(100);
        assert!(ValueContext::new(config).is_err());
    }

    #[test]
    fn test_contexts_are_isolated() {
        let a = ValueContext::with_defaults();
        let b = ValueContext::with_defaults();
        StrValue::varchar(&a, "only-in-a");
        assert_eq!(a.cache().len(), 1);
        assert!(b.cache().is_empty());
    }
}
