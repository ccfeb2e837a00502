use crate::{ColumnMeta, TableName};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Logical field name to owning table name
pub type OwnerHints = IndexMap<String, String>;

/// Logical field names mapped to the column names expected to back them.
///
/// Insertion order is the column order of the synthesized query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSpec(IndexMap<String, String>);

/// Where a logical field physically lives
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLocation {
    pub schema: String,
    pub table: String,
    pub column: String,
}

/// Result of [`FieldLocator::locate`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldLocations {
    locations: IndexMap<String, FieldLocation>,
    unresolved: Vec<String>,
}

/// Finds the physical column behind each logical field
#[derive(Clone, Debug)]
pub struct FieldLocator;

impl FieldSpec {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a field; re-adding a name keeps its original position
    pub fn field<N, C>(mut self, name: N, column: C) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        self.0.insert(name.into(), column.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Logical names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N, C> FromIterator<(N, C)> for FieldSpec
where
    N: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        )
    }
}

impl FieldLocation {
    /// `schema.table`
    pub fn qualified_table(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// `schema.table.column`, as written in the select list
    pub fn qualified_column(&self) -> String {
        format!("{}.{}.{}", self.schema, self.table, self.column)
    }
}

impl From<&ColumnMeta> for FieldLocation {
    fn from(col: &ColumnMeta) -> Self {
        Self {
            schema: col.schema.clone(),
            table: col.table.clone(),
            column: col.column.clone(),
        }
    }
}

impl FieldLocations {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert<N>(&mut self, name: N, location: FieldLocation)
    where
        N: Into<String>,
    {
        self.locations.insert(name.into(), location);
    }

    pub fn get(&self, name: &str) -> Option<&FieldLocation> {
        self.locations.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldLocation)> {
        self.locations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Fields that had no matching column, in field order
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Distinct `schema.table` names owning a located field, in field order
    pub fn required_tables(&self) -> Vec<String> {
        self.locations
            .values()
            .map(FieldLocation::qualified_table)
            .unique()
            .collect()
    }

    pub fn as_map(&self) -> &IndexMap<String, FieldLocation> {
        &self.locations
    }
}

impl<N> FromIterator<(N, FieldLocation)> for FieldLocations
where
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, FieldLocation)>>(iter: I) -> Self {
        Self {
            locations: iter.into_iter().map(|(n, l)| (n.into(), l)).collect(),
            unresolved: Vec::new(),
        }
    }
}

impl FieldLocator {
    /// Locate every field of `fields` in `catalog`.
    ///
    /// A column matches when its name equals the expected name ignoring case
    /// and its table is the field's owner. The first match in catalog order
    /// wins, so duplicated definitions resolve to the earliest one. Fields
    /// without a match, or without an owner hint, are left out of the result
    /// and listed in [`FieldLocations::unresolved`].
    pub fn locate(
        fields: &FieldSpec,
        owner_hints: &OwnerHints,
        catalog: &[ColumnMeta],
    ) -> FieldLocations {
        let mut located = FieldLocations::new();
        for (field, expected) in fields.iter() {
            let found = owner_hints.get(field).and_then(|owner| {
                let owner = TableName::parse(owner);
                catalog.iter().find(|col| {
                    col.column.eq_ignore_ascii_case(expected)
                        && owner.matches(&col.schema, &col.table)
                })
            });
            match found {
                Some(col) => {
                    debug!("Located {field} at {}.{}", col.qualified_table(), col.column);
                    located.insert(field, col.into());
                }
                None => {
                    warn!(
                        "Field {field} ({expected}) not found under table `{}`",
                        owner_hints.get(field).map(String::as_str).unwrap_or("?")
                    );
                    located.unresolved.push(field.to_owned());
                }
            }
        }
        located
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<ColumnMeta> {
        vec![
            ColumnMeta::new("SalesLT", "Customer", "CustomerID", "int"),
            ColumnMeta::new("SalesLT", "Customer", "CompanyName", "nvarchar"),
            ColumnMeta::new("SalesLT", "Product", "Name", "nvarchar"),
            ColumnMeta::new("SalesLT", "ProductCategory", "Name", "nvarchar"),
            ColumnMeta::new("SalesLT", "SalesOrderHeader", "CustomerID", "int"),
        ]
    }

    fn owners(pairs: &[(&str, &str)]) -> OwnerHints {
        pairs
            .iter()
            .map(|(f, t)| (f.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn locate_by_owner_table() {
        let fields = FieldSpec::new()
            .field("CUSTOMER_ID", "CustomerID")
            .field("PRODUCT_NAME", "Name");
        let hints = owners(&[("CUSTOMER_ID", "Customer"), ("PRODUCT_NAME", "Product")]);

        let located = FieldLocator::locate(&fields, &hints, &catalog());

        assert_eq!(
            located.get("CUSTOMER_ID"),
            Some(&FieldLocation {
                schema: "SalesLT".to_owned(),
                table: "Customer".to_owned(),
                column: "CustomerID".to_owned(),
            })
        );
        assert_eq!(located.get("PRODUCT_NAME").unwrap().table, "Product");
        assert!(located.unresolved().is_empty());
    }

    #[test]
    fn match_column_ignoring_case() {
        let fields = FieldSpec::new().field("CUSTOMER_NAME", "companyname");
        let hints = owners(&[("CUSTOMER_NAME", "Customer")]);

        let located = FieldLocator::locate(&fields, &hints, &catalog());

        assert_eq!(located.get("CUSTOMER_NAME").unwrap().column, "CompanyName");
    }

    #[test]
    fn owner_table_is_case_sensitive() {
        let fields = FieldSpec::new().field("CUSTOMER_NAME", "CompanyName");
        let hints = owners(&[("CUSTOMER_NAME", "customer")]);

        let located = FieldLocator::locate(&fields, &hints, &catalog());

        assert!(located.is_empty());
        assert_eq!(located.unresolved(), ["CUSTOMER_NAME"]);
    }

    #[test]
    fn drop_fields_without_match() {
        let fields = FieldSpec::new()
            .field("CUSTOMER_EMAIL", "EmailAddress")
            .field("CUSTOMER_ID", "CustomerID")
            .field("UNHINTED", "CustomerID");
        let hints = owners(&[("CUSTOMER_EMAIL", "Customer"), ("CUSTOMER_ID", "Customer")]);

        let located = FieldLocator::locate(&fields, &hints, &catalog());

        assert_eq!(located.len(), 1);
        assert_eq!(located.get("CUSTOMER_EMAIL"), None);
        assert_eq!(located.unresolved(), ["CUSTOMER_EMAIL", "UNHINTED"]);
    }

    #[test]
    fn first_duplicate_wins() {
        let mut catalog = catalog();
        catalog.insert(0, ColumnMeta::new("SalesLT", "Customer", "COMPANYNAME", "varchar"));
        let fields = FieldSpec::new().field("CUSTOMER_NAME", "CompanyName");
        let hints = owners(&[("CUSTOMER_NAME", "Customer")]);

        let located = FieldLocator::locate(&fields, &hints, &catalog);

        assert_eq!(located.get("CUSTOMER_NAME").unwrap().column, "COMPANYNAME");
    }

    #[test]
    fn qualified_owner_hint() {
        let catalog = vec![
            ColumnMeta::new("dbo", "Customer", "CompanyName", "nvarchar"),
            ColumnMeta::new("SalesLT", "Customer", "CompanyName", "nvarchar"),
        ];
        let fields = FieldSpec::new().field("CUSTOMER_NAME", "CompanyName");

        let bare = FieldLocator::locate(&fields, &owners(&[("CUSTOMER_NAME", "Customer")]), &catalog);
        let qualified = FieldLocator::locate(
            &fields,
            &owners(&[("CUSTOMER_NAME", "SalesLT.Customer")]),
            &catalog,
        );

        assert_eq!(bare.get("CUSTOMER_NAME").unwrap().schema, "dbo");
        assert_eq!(qualified.get("CUSTOMER_NAME").unwrap().schema, "SalesLT");
    }

    #[test]
    fn keep_field_order() {
        let fields = FieldSpec::new()
            .field("PRODUCT_NAME", "Name")
            .field("CUSTOMER_ID", "CustomerID")
            .field("CUSTOMER_NAME", "CompanyName");
        let hints = owners(&[
            ("CUSTOMER_ID", "Customer"),
            ("CUSTOMER_NAME", "Customer"),
            ("PRODUCT_NAME", "Product"),
        ]);

        let located = FieldLocator::locate(&fields, &hints, &catalog());

        assert_eq!(
            located.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["PRODUCT_NAME", "CUSTOMER_ID", "CUSTOMER_NAME"]
        );
        assert_eq!(
            located.required_tables(),
            vec!["SalesLT.Product", "SalesLT.Customer"]
        );
    }
}
