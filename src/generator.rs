use crate::{
    Catalog, DiagnosticReport, FieldLocations, FieldLocator, JoinGraph, JoinGraphResolver,
    QueryConfig, QuerySynthesizer, ResolvedQuery, SchemaCatalog, SynthErr,
};
use tracing::{info, instrument};

/// Runs a whole resolution: snapshot the catalog, locate the fields, resolve
/// the joins, then synthesize the query.
///
/// In the default lenient mode, fields and joins that cannot be resolved are
/// dropped and reported. In strict mode they fail the run.
///
/// ```
/// use sea_synth::{Catalog, ColumnMeta, QueryConfig, QueryGenerator};
///
/// let catalog = Catalog::new(
///     vec![ColumnMeta::new("SalesLT", "SalesOrderHeader", "SalesOrderID", "int")],
///     vec![],
/// );
/// let config = QueryConfig::new("SalesLT.SalesOrderHeader")
///     .field("ORDER_ID", "SalesOrderID", "SalesOrderHeader");
///
/// let query = QueryGenerator::new(config).generate(&catalog)?;
/// assert_eq!(
///     query.as_str(),
///     [
///         "SELECT",
///         "    SalesLT.SalesOrderHeader.SalesOrderID AS ORDER_ID",
///         "FROM SalesLT.SalesOrderHeader",
///         "ORDER BY SalesLT.SalesOrderHeader.SalesOrderID;",
///     ]
///     .join("\n")
/// );
/// # Ok::<(), sea_synth::SynthErr>(())
/// ```
#[derive(Clone, Debug)]
pub struct QueryGenerator {
    config: QueryConfig,
    strict: bool,
}

/// Located fields and resolved joins of one run, ready for synthesis
#[derive(Clone, Debug)]
pub struct Resolution<'a> {
    config: &'a QueryConfig,
    locations: FieldLocations,
    graph: JoinGraph,
}

impl QueryGenerator {
    pub fn new(config: QueryConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Fail on unresolved fields and joins instead of dropping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Read `catalog` once and resolve against the snapshot
    #[instrument(level = "debug", skip_all, fields(root = %self.config.root_table, strict = self.strict))]
    pub fn resolve(&self, catalog: &dyn SchemaCatalog) -> Result<Resolution<'_>, SynthErr> {
        let snapshot = Catalog::snapshot(catalog)?;
        self.resolve_snapshot(&snapshot)
    }

    pub fn resolve_snapshot(&self, catalog: &Catalog) -> Result<Resolution<'_>, SynthErr> {
        let locations = FieldLocator::locate(
            &self.config.field_spec(),
            &self.config.owner_hints(),
            &catalog.columns,
        );
        let graph = JoinGraphResolver::resolve(
            &self.config.root_table,
            &locations.required_tables(),
            &catalog.foreign_keys,
            &self.config.joins,
        );
        info!(
            "Located {} of {} fields, resolved {} of {} joins",
            locations.len(),
            locations.len() + locations.unresolved().len(),
            graph.joins().len(),
            self.config.joins.len()
        );

        if self.strict {
            if !locations.unresolved().is_empty() {
                return Err(SynthErr::UnresolvedField(locations.unresolved().to_vec()));
            }
            if !graph.unresolved().is_empty() {
                return Err(SynthErr::UnresolvedJoin(
                    graph.unresolved().iter().map(ToString::to_string).collect(),
                ));
            }
        }

        Ok(Resolution {
            config: &self.config,
            locations,
            graph,
        })
    }

    /// [`QueryGenerator::resolve`] followed by [`Resolution::synthesize`]
    pub fn generate(&self, catalog: &dyn SchemaCatalog) -> Result<ResolvedQuery, SynthErr> {
        self.resolve(catalog)?.synthesize()
    }
}

impl Resolution<'_> {
    pub fn locations(&self) -> &FieldLocations {
        &self.locations
    }

    pub fn join_graph(&self) -> &JoinGraph {
        &self.graph
    }

    pub fn report(&self) -> DiagnosticReport {
        DiagnosticReport::new(&self.locations, &self.graph)
    }

    /// Render the query. Fails if a configured field was not located.
    #[instrument(level = "debug", skip_all)]
    pub fn synthesize(&self) -> Result<ResolvedQuery, SynthErr> {
        QuerySynthesizer::synthesize(
            &self.config.field_order(),
            &self.locations,
            &self.graph.join_clauses(),
            &self.config.root_table,
            self.config.order_by.as_deref(),
        )
    }
}
