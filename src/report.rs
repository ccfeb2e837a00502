use crate::{FieldLocation, FieldLocations, JoinDecl, JoinGraph, TableRelationship};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What a resolution run found, for operators to inspect
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub field_locations: IndexMap<String, FieldLocation>,
    pub table_relationships: TableRelationship,
    pub unresolved_fields: Vec<String>,
    pub unresolved_joins: Vec<JoinDecl>,
    pub disconnected_tables: Vec<String>,
}

impl DiagnosticReport {
    pub fn new(locations: &FieldLocations, graph: &JoinGraph) -> Self {
        Self {
            field_locations: locations.as_map().clone(),
            table_relationships: graph.relationships().clone(),
            unresolved_fields: locations.unresolved().to_vec(),
            unresolved_joins: graph.unresolved().to_vec(),
            disconnected_tables: graph.disconnected().to_vec(),
        }
    }

    /// Nothing was dropped and every field owning table is joined
    pub fn is_clean(&self) -> bool {
        self.unresolved_fields.is_empty()
            && self.unresolved_joins.is_empty()
            && self.disconnected_tables.is_empty()
    }

    /// Pretty printed json, indented by two spaces
    #[cfg(feature = "with-json")]
    pub fn to_json(&self) -> Result<String, crate::SynthErr> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "with-json")]
    pub fn write_to<P>(&self, path: P) -> Result<(), crate::SynthErr>
    where
        P: AsRef<std::path::Path>,
    {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "with-json"))]
mod tests {
    use super::*;
    use crate::{ColumnMeta, FieldLocator, FieldSpec, ForeignKeyEdge, JoinGraphResolver, OwnerHints};
    use pretty_assertions::assert_eq;

    #[test]
    fn serialize_report() {
        let columns = vec![
            ColumnMeta::new("SalesLT", "SalesOrderHeader", "SalesOrderID", "int"),
            ColumnMeta::new("SalesLT", "Customer", "CompanyName", "nvarchar"),
        ];
        let edges = vec![ForeignKeyEdge::new(
            "SalesLT",
            "SalesOrderHeader",
            "CustomerID",
            "Customer",
            "CustomerID",
        )];
        let fields = FieldSpec::new()
            .field("ORDER_ID", "SalesOrderID")
            .field("CUSTOMER_NAME", "CompanyName")
            .field("CUSTOMER_EMAIL", "EmailAddress");
        let owners: OwnerHints = [
            ("ORDER_ID", "SalesOrderHeader"),
            ("CUSTOMER_NAME", "Customer"),
            ("CUSTOMER_EMAIL", "Customer"),
        ]
        .into_iter()
        .map(|(f, t)| (f.to_owned(), t.to_owned()))
        .collect();
        let joins = vec![
            JoinDecl::new("SalesOrderHeader", "Customer", "CustomerID"),
            JoinDecl::new("Customer", "CustomerAddress", "CustomerID"),
        ];

        let locations = FieldLocator::locate(&fields, &owners, &columns);
        let graph = JoinGraphResolver::resolve(
            "SalesLT.SalesOrderHeader",
            &locations.required_tables(),
            &edges,
            &joins,
        );
        let report = DiagnosticReport::new(&locations, &graph);

        assert!(!report.is_clean());
        assert_eq!(
            report.to_json().unwrap(),
            r#"{
  "field_locations": {
    "ORDER_ID": {
      "schema": "SalesLT",
      "table": "SalesOrderHeader",
      "column": "SalesOrderID"
    },
    "CUSTOMER_NAME": {
      "schema": "SalesLT",
      "table": "Customer",
      "column": "CompanyName"
    }
  },
  "table_relationships": {
    "SalesLT.SalesOrderHeader": [
      {
        "referenced_table": "SalesLT.Customer",
        "parent_column": "CustomerID",
        "referenced_column": "CustomerID"
      }
    ],
    "SalesLT.Customer": []
  },
  "unresolved_fields": [
    "CUSTOMER_EMAIL"
  ],
  "unresolved_joins": [
    {
      "parent": "Customer",
      "child": "CustomerAddress",
      "on": "CustomerID"
    }
  ],
  "disconnected_tables": []
}"#
        );
    }
}
