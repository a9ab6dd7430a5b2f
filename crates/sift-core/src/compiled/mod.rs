//! Module: compiled
//! Responsibility: the bound, reusable filter + order + page + projection unit for one
//! input/output shape pair, and its search orchestration.
//! Does not own: data access; every read goes through a `DataSource`.
//! Boundary: compile errors surface from `compile`, never from `search`.

mod envelope;


use crate::{
    compile::{OrderKey, OrderPlan, compile_filter, compile_order},
    error::QueryError,
    expr::Predicate,
    handler::HandlerPipeline,
    member::MemberTable,
    projection::Projection,
    query::{PageSpec, SearchQuery},
    source::{DataSource, OrderedPlan, ReadPlan, RowFilter, RowOrder},
};
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};

pub use envelope::ResultEnvelope;

///
/// CompiledQuery
///
/// Immutable after construction and safe to execute concurrently and
/// repeatedly. Holds both the decoded query and its compiled form.
///

pub struct CompiledQuery<In, Out> {
    projection: Arc<Projection<In, Out>>,
    table: Arc<MemberTable>,
    pipeline: HandlerPipeline,
    query: SearchQuery,
    predicate: Option<Arc<Predicate>>,
    order: Option<OrderPlan>,
}

impl<In, Out> CompiledQuery<In, Out> {
    /// Compile the filter and order of `query` eagerly.
    #[instrument(name = "sift::compile", level = "debug", skip_all)]
    pub fn compile(
        projection: Arc<Projection<In, Out>>,
        table: Arc<MemberTable>,
        pipeline: HandlerPipeline,
        query: SearchQuery,
    ) -> Result<Self, QueryError> {
        let predicate = query
            .filter
            .as_ref()
            .map(|node| compile_filter(node, &table, &pipeline))
            .transpose()?
            .map(Arc::new);
        let order = query
            .order
            .as_ref()
            .map(|spec| compile_order(spec, &table))
            .transpose()?;

        debug!(
            fields = table.len(),
            filter = predicate.is_some(),
            order = order.is_some(),
            page = query.page.is_some(),
            "query compiled"
        );

        Ok(Self {
            projection,
            table,
            pipeline,
            query,
            predicate,
            order,
        })
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    #[must_use]
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_deref()
    }

    #[must_use]
    pub const fn order_plan(&self) -> Option<&OrderPlan> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn page_spec(&self) -> Option<PageSpec> {
        self.query.page
    }

    #[must_use]
    pub fn table(&self) -> &MemberTable {
        &self.table
    }

    #[must_use]
    pub const fn pipeline(&self) -> &HandlerPipeline {
        &self.pipeline
    }

    //
    // Steps
    //

    /// Append the compiled predicate, or pass `plan` through unchanged.
    #[must_use]
    pub fn filter(&self, plan: ReadPlan<In>) -> ReadPlan<In> {
        match &self.predicate {
            Some(predicate) => plan.filter(RowFilter::new(
                Arc::clone(predicate),
                self.projection.bindings().clone(),
            )),
            None => plan,
        }
    }

    /// Apply the primary order link, then every later link as a then-by.
    pub fn order_by(&self, plan: ReadPlan<In>) -> Result<OrderedPlan<In>, QueryError> {
        let order = self.order.as_ref().ok_or(QueryError::MissingOrder)?;
        let ordered = plan.order_by(self.bind(order.primary()));

        Ok(self.chain_then(ordered, order.then_keys()))
    }

    /// Null-safe [`Self::order_by`]: no order leaves `plan` unordered.
    #[must_use]
    pub fn try_order_by(&self, plan: ReadPlan<In>) -> ReadPlan<In> {
        match &self.order {
            Some(order) => self
                .chain_then(plan.order_by(self.bind(order.primary())), order.then_keys())
                .into_plan(),
            None => plan,
        }
    }

    /// Refine an existing ordering with every link of the compiled order.
    pub fn then_by(&self, plan: OrderedPlan<In>) -> Result<OrderedPlan<In>, QueryError> {
        let order = self.order.as_ref().ok_or(QueryError::MissingOrder)?;

        Ok(self.chain_then(plan, order.keys()))
    }

    /// Null-safe [`Self::then_by`].
    #[must_use]
    pub fn try_then_by(&self, plan: OrderedPlan<In>) -> OrderedPlan<In> {
        match &self.order {
            Some(order) => self.chain_then(plan, order.keys()),
            None => plan,
        }
    }

    /// Apply the page window. The first page is a plain take.
    #[must_use]
    pub fn page(&self, plan: ReadPlan<In>) -> ReadPlan<In> {
        match self.query.page {
            Some(page) if page.is_first() => plan.take(page.take()),
            Some(page) => plan.skip(page.skip()).take(page.take()),
            None => plan,
        }
    }

    /// Build one output record.
    #[must_use]
    pub fn project(&self, row: &In) -> Out {
        self.projection.construct(row)
    }

    fn bind(&self, key: &OrderKey) -> RowOrder<In> {
        RowOrder::new(key.clone(), self.projection.bindings().clone())
    }

    fn chain_then<'k>(
        &self,
        plan: OrderedPlan<In>,
        keys: impl IntoIterator<Item = &'k OrderKey>,
    ) -> OrderedPlan<In> {
        keys.into_iter()
            .fold(plan, |plan, key| plan.then_by(self.bind(key)))
    }

    //
    // Execution
    //

    /// Run the full pipeline over every record of `source`.
    pub async fn search<S>(&self, source: &S) -> Result<ResultEnvelope<Out>, S::Error>
    where
        S: DataSource<In>,
        Out: Send,
    {
        self.search_from(source, ReadPlan::new()).await
    }

    /// Run the full pipeline on top of a caller-supplied base plan.
    ///
    /// A paged query issues the page fetch and the filtered count
    /// concurrently; an unpaged query issues the fetch alone and reports its
    /// length as the total. Source errors are returned unchanged.
    #[instrument(
        name = "sift::search",
        level = "debug",
        skip_all,
        fields(paged = self.query.page.is_some())
    )]
    pub async fn search_from<S>(
        &self,
        source: &S,
        base: ReadPlan<In>,
    ) -> Result<ResultEnvelope<Out>, S::Error>
    where
        S: DataSource<In>,
        Out: Send,
    {
        let filtered = self.filter(base);
        let ordered = self.try_order_by(filtered.clone());
        let project = |row: &In| self.project(row);

        let (items, total, skip) = match self.query.page {
            Some(page) => {
                let paged = self.page(ordered);
                let (items, total) =
                    tokio::try_join!(source.fetch(&paged, project), source.count(&filtered))?;

                (items, total, page.skip())
            }
            None => {
                let items = source.fetch(&ordered, project).await?;
                let total = items.len() as u64;

                (items, total, 0)
            }
        };

        let envelope = ResultEnvelope::new(items, skip, total);
        debug!(
            from = envelope.from,
            to = envelope.to,
            count = envelope.items.len(),
            total = envelope.total,
            count_query = self.query.page.is_some(),
            "search completed"
        );

        Ok(envelope)
    }

    /// Human-readable rendering of the compiled plan.
    #[must_use]
    pub fn explain(&self) -> String {
        Explain {
            predicate: self.predicate.as_deref(),
            order: self.order.as_ref(),
            page: self.query.page,
        }
        .to_string()
    }
}

///
/// Explain
///
/// One line each for filter, order and page.
///

struct Explain<'a> {
    predicate: Option<&'a Predicate>,
    order: Option<&'a OrderPlan>,
    page: Option<PageSpec>,
}

impl fmt::Display for Explain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predicate {
            Some(predicate) => writeln!(f, "filter: {predicate}")?,
            None => f.write_str("filter: none\n")?,
        }
        match self.order {
            Some(order) => writeln!(f, "order: {order}")?,
            None => f.write_str("order: none\n")?,
        }
        match self.page {
            Some(page) => write!(
                f,
                "page: {} of size {} (skip {}, take {})",
                page.number(),
                page.size(),
                page.skip(),
                page.take()
            ),
            None => f.write_str("page: none"),
        }
    }
}

impl<In, Out> Clone for CompiledQuery<In, Out> {
    fn clone(&self) -> Self {
        Self {
            projection: Arc::clone(&self.projection),
            table: Arc::clone(&self.table),
            pipeline: self.pipeline.clone(),
            query: self.query.clone(),
            predicate: self.predicate.clone(),
            order: self.order.clone(),
        }
    }
}

impl<In, Out> fmt::Debug for CompiledQuery<In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledQuery")
            .field("query", &self.query)
            .field("predicate", &self.predicate)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
