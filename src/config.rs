use crate::{Candidates, FieldSpec, JoinDecl, OwnerHints};
use serde::{Deserialize, Serialize};

/// Everything a run needs besides the catalog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Table driving the FROM clause, preferably `schema.table`
    pub root_table: String,
    /// Column of the root table to sort by
    #[serde(default)]
    pub order_by: Option<String>,
    /// Selected fields, in output order
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Required joins, in output order
    #[serde(default)]
    pub joins: Vec<JoinDecl>,
}

/// One logical field of the select list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Logical name, used as the column alias
    pub name: String,
    /// Expected physical column name
    pub column: String,
    /// Owning table
    pub table: String,
    /// Extra column names tried by discovery after `column`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

impl QueryConfig {
    pub fn new<S>(root_table: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            root_table: root_table.into(),
            ..Default::default()
        }
    }

    pub fn order_by<S>(mut self, column: S) -> Self
    where
        S: Into<String>,
    {
        self.order_by = Some(column.into());
        self
    }

    pub fn field<N, C, T>(mut self, name: N, column: C, table: T) -> Self
    where
        N: Into<String>,
        C: Into<String>,
        T: Into<String>,
    {
        self.fields.push(FieldDef {
            name: name.into(),
            column: column.into(),
            table: table.into(),
            candidates: Vec::new(),
        });
        self
    }

    pub fn join<P, C, O>(mut self, parent: P, child: C, on: O) -> Self
    where
        P: Into<String>,
        C: Into<String>,
        O: Into<String>,
    {
        self.joins.push(JoinDecl::new(parent, child, on));
        self
    }

    /// Distinct field names in output order; a repeated name keeps its first
    /// position
    pub fn field_order(&self) -> Vec<String> {
        self.field_spec().names().map(str::to_owned).collect()
    }

    pub fn field_spec(&self) -> FieldSpec {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.column.as_str()))
            .collect()
    }

    pub fn owner_hints(&self) -> OwnerHints {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.table.clone()))
            .collect()
    }

    /// Candidate column names per field for discovery: the expected column
    /// first, then the extra candidates
    pub fn candidates(&self) -> Candidates {
        self.fields
            .iter()
            .map(|f| {
                let mut names = vec![f.column.clone()];
                names.extend(f.candidates.iter().filter(|c| **c != f.column).cloned());
                (f.name.clone(), names)
            })
            .collect()
    }
}
