use crate::error::Error;
use sift_core::{
    compiled::CompiledQuery,
    config::QueryConfig,
    handler::{HandlerPipeline, OperatorHandler},
    member::MemberTable,
    projection::{MappingProvider, Projection},
    query::SearchQuery,
};
use std::sync::Arc;
use tracing::debug;

///
/// Sift
/// Per-shape compilation context: one projection, its member table, the
/// handler pipeline and the query settings. Immutable once built and cheap to
/// clone; every compiled query shares its parts.
///

pub struct Sift<In, Out> {
    projection: Arc<Projection<In, Out>>,
    table: Arc<MemberTable>,
    pipeline: HandlerPipeline,
    config: QueryConfig,
}

impl<In, Out> Sift<In, Out> {
    /// Build a context with default settings.
    pub fn new(projection: Projection<In, Out>) -> Result<Self, Error> {
        Self::with_config(projection, QueryConfig::default())
    }

    /// Build a context, validating `config` and the projection's names.
    pub fn with_config(projection: Projection<In, Out>, config: QueryConfig) -> Result<Self, Error> {
        config.validate()?;
        let table = MemberTable::from_projection(&projection, config.key_comparer)?;

        debug!(
            fields = table.len(),
            comparer = ?config.key_comparer,
            "sift context built"
        );

        Ok(Self {
            projection: Arc::new(projection),
            table: Arc::new(table),
            pipeline: HandlerPipeline::default(),
            config,
        })
    }

    /// Build a context from a provider; the provider is asked every time.
    pub fn from_provider(
        provider: &impl MappingProvider<In, Out>,
        config: QueryConfig,
    ) -> Result<Self, Error> {
        Self::with_config(provider.projection()?, config)
    }

    //
    // Handlers
    //

    /// Consult `handler` before every registered handler.
    #[must_use]
    pub fn with_handler_front(mut self, handler: impl OperatorHandler + 'static) -> Self {
        self.pipeline = self.pipeline.with_front(handler);
        self
    }

    /// Consult `handler` after every registered handler.
    #[must_use]
    pub fn with_handler_back(mut self, handler: impl OperatorHandler + 'static) -> Self {
        self.pipeline = self.pipeline.with_back(handler);
        self
    }

    /// Replace the whole pipeline.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: HandlerPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    //
    // Compilation
    //

    /// Compile a decoded query.
    pub fn compile(&self, query: SearchQuery) -> Result<CompiledQuery<In, Out>, Error> {
        let compiled = CompiledQuery::compile(
            Arc::clone(&self.projection),
            Arc::clone(&self.table),
            self.pipeline.clone(),
            query,
        )?;

        Ok(compiled)
    }

    /// Decode and compile a JSON query document.
    pub fn compile_json(&self, text: &str) -> Result<CompiledQuery<In, Out>, Error> {
        let query = SearchQuery::from_json_str_with(text, self.config.default_page_size)?;

        self.compile(query)
    }

    //
    // Introspection
    //

    /// Declared field names, in declaration order; the whole surface a
    /// schema generator needs.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys()
    }

    #[must_use]
    pub fn table(&self) -> &MemberTable {
        &self.table
    }

    #[must_use]
    pub fn projection(&self) -> &Projection<In, Out> {
        &self.projection
    }

    #[must_use]
    pub const fn pipeline(&self) -> &HandlerPipeline {
        &self.pipeline
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }
}

impl<In, Out> Clone for Sift<In, Out> {
    fn clone(&self) -> Self {
        Self {
            projection: Arc::clone(&self.projection),
            table: Arc::clone(&self.table),
            pipeline: self.pipeline.clone(),
            config: self.config,
        }
    }
}
