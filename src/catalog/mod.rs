use crate::SynthErr;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::*;

/// One physical column, as reported by schema introspection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    #[serde(alias = "TABLE_SCHEMA")]
    pub schema: String,
    #[serde(alias = "TABLE_NAME")]
    pub table: String,
    #[serde(alias = "COLUMN_NAME")]
    pub column: String,
    #[serde(alias = "DATA_TYPE", default)]
    pub data_type: String,
}

/// A foreign key column pair, directed from the parent (referencing) table
/// to the referenced table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyEdge {
    pub parent_schema: String,
    pub parent_table: String,
    pub parent_column: String,
    pub referenced_schema: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// The source of column and foreign key metadata.
///
/// Connection handling, retries and timeouts are the implementor's concern.
/// A failure should be reported as [`SynthErr::CatalogUnavailable`].
pub trait SchemaCatalog {
    /// All known columns, in catalog order
    fn columns(&self) -> Result<Vec<ColumnMeta>, SynthErr>;

    /// All known foreign key edges, in catalog order
    fn foreign_keys(&self) -> Result<Vec<ForeignKeyEdge>, SynthErr>;
}

/// A snapshot of a schema catalog, taken once per run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub columns: Vec<ColumnMeta>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyEdge>,
}

/// A possibly schema qualified table name, e.g. `SalesLT.Customer`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableName {
    pub schema: Option<String>,
    pub table: String,
}

impl ColumnMeta {
    pub fn new<S, T, C, D>(schema: S, table: T, column: C, data_type: D) -> Self
    where
        S: Into<String>,
        T: Into<String>,
        C: Into<String>,
        D: Into<String>,
    {
        Self {
            schema: schema.into(),
            table: table.into(),
            column: column.into(),
            data_type: data_type.into(),
        }
    }

    /// `schema.table`
    pub fn qualified_table(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }
}

impl ForeignKeyEdge {
    /// Build an edge where both tables live in the same schema
    pub fn new<S, PT, PC, RT, RC>(
        schema: S,
        parent_table: PT,
        parent_column: PC,
        referenced_table: RT,
        referenced_column: RC,
    ) -> Self
    where
        S: Into<String>,
        PT: Into<String>,
        PC: Into<String>,
        RT: Into<String>,
        RC: Into<String>,
    {
        let schema = schema.into();
        Self {
            parent_schema: schema.clone(),
            parent_table: parent_table.into(),
            parent_column: parent_column.into(),
            referenced_schema: schema,
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }

    pub fn qualified_parent(&self) -> String {
        format!("{}.{}", self.parent_schema, self.parent_table)
    }

    pub fn qualified_referenced(&self) -> String {
        format!("{}.{}", self.referenced_schema, self.referenced_table)
    }
}

impl fmt::Display for ForeignKeyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.qualified_parent(),
            self.parent_column,
            self.qualified_referenced(),
            self.referenced_column
        )
    }
}

impl Catalog {
    pub fn new(columns: Vec<ColumnMeta>, foreign_keys: Vec<ForeignKeyEdge>) -> Self {
        Self {
            columns,
            foreign_keys,
        }
    }

    /// Read both halves of the catalog from a collaborator.
    ///
    /// Any failure is mapped into [`SynthErr::CatalogUnavailable`] so that
    /// callers see a single fatal condition regardless of the collaborator.
    pub fn snapshot(source: &dyn SchemaCatalog) -> Result<Self, SynthErr> {
        let columns = source.columns().map_err(into_unavailable)?;
        let foreign_keys = source.foreign_keys().map_err(into_unavailable)?;
        Ok(Self {
            columns,
            foreign_keys,
        })
    }

    /// Load a snapshot previously dumped as json
    #[cfg(feature = "with-json")]
    pub fn from_json_str(json: &str) -> Result<Self, SynthErr> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file. A missing, unreadable or malformed file means
    /// the catalog is unavailable.
    #[cfg(feature = "with-json")]
    pub fn from_json_file<P>(path: P) -> Result<Self, SynthErr>
    where
        P: AsRef<std::path::Path>,
    {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SynthErr::CatalogUnavailable(format!("cannot read `{}`: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SynthErr::CatalogUnavailable(format!("cannot parse `{}`: {e}", path.display()))
        })
    }
}

impl SchemaCatalog for Catalog {
    fn columns(&self) -> Result<Vec<ColumnMeta>, SynthErr> {
        Ok(self.columns.clone())
    }

    fn foreign_keys(&self) -> Result<Vec<ForeignKeyEdge>, SynthErr> {
        Ok(self.foreign_keys.clone())
    }
}

fn into_unavailable(err: SynthErr) -> SynthErr {
    match err {
        SynthErr::CatalogUnavailable(_) => err,
        other => SynthErr::CatalogUnavailable(other.to_string()),
    }
}

impl TableName {
    /// Split `schema.table`; a name without a dot has no schema
    pub fn parse(name: &str) -> Self {
        match name.split_once('.') {
            Some((schema, table)) => Self {
                schema: Some(schema.to_owned()),
                table: table.to_owned(),
            },
            None => Self {
                schema: None,
                table: name.to_owned(),
            },
        }
    }

    /// Fill in the schema if this name has none
    pub fn qualify(&self, default_schema: Option<&str>) -> String {
        match (&self.schema, default_schema) {
            (Some(schema), _) => format!("{schema}.{}", self.table),
            (None, Some(schema)) => format!("{schema}.{}", self.table),
            (None, None) => self.table.clone(),
        }
    }

    /// Compare against catalog metadata. A bare name matches any schema.
    pub fn matches(&self, schema: &str, table: &str) -> bool {
        self.table == table && self.schema.as_deref().is_none_or(|s| s == schema)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.table),
            None => write!(f, "{}", self.table),
        }
    }
}
