use std::sync::Arc;

use crate::adapter::ToolAdapter;
use crate::config::AdapterConfig;
use crate::content::ContentFlattener;
use crate::schema::{
    JsonSchemaConstructor, SchemaCanonicalizer, SchemaConstructor, SchemaSanitizer,
    StandardCanonicalizer,
};
use crate::Result;

/// Builder for [`ToolAdapter`].
///
/// Defaults: the built-in denylist, newline-joined text blocks,
/// [`StandardCanonicalizer`] and [`JsonSchemaConstructor`].
pub struct ToolAdapterBuilder {
    config: AdapterConfig,
    canonicalizer: Arc<dyn SchemaCanonicalizer>,
    constructor: Arc<dyn SchemaConstructor>,
}

impl ToolAdapterBuilder {
    pub fn new() -> Self {
        Self {
            config: AdapterConfig::default(),
            canonicalizer: Arc::new(StandardCanonicalizer),
            constructor: Arc::new(JsonSchemaConstructor),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Strip `keyword` in addition to the configured denylist.
    pub fn deny_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.extra_denied_keywords.push(keyword.into());
        self
    }

    pub fn text_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.text_separator = separator.into();
        self
    }

    pub fn canonicalizer<C>(mut self, canonicalizer: C) -> Self
    where
        C: SchemaCanonicalizer + 'static,
    {
        self.canonicalizer = Arc::new(canonicalizer);
        self
    }

    pub fn constructor<C>(mut self, constructor: C) -> Self
    where
        C: SchemaConstructor + 'static,
    {
        self.constructor = Arc::new(constructor);
        self
    }

    /// Validate the configuration and build the adapter.
    pub fn build(self) -> Result<ToolAdapter> {
        self.config.validate()?;
        Ok(ToolAdapter {
            sanitizer: SchemaSanitizer::from_config(&self.config),
            flattener: Arc::new(ContentFlattener::from_config(&self.config)),
            canonicalizer: self.canonicalizer,
            constructor: self.constructor,
        })
    }
}

impl Default for ToolAdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
