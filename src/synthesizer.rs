use crate::{FieldLocations, SynthErr, TableName};
use std::{fmt, fs, path::Path};

/// Separator between select list items
const SELECT_SEPARATOR: &str = ",\n    ";

/// Renders located fields and resolved joins into a single SELECT statement
#[derive(Clone, Debug)]
pub struct QuerySynthesizer;

/// Synthesized SQL text. Never modified after synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedQuery {
    sql: String,
}

impl QuerySynthesizer {
    /// Build the query:
    ///
    /// ```text
    /// SELECT
    ///     <schema>.<table>.<column> AS <FIELD>,
    ///     ...
    /// FROM <root_table>
    /// JOIN ...
    /// ORDER BY <root_table>.<sort_column>;
    /// ```
    ///
    /// Columns appear exactly in `field_order` and joins exactly in the given
    /// order. Identifiers are written as they come from the catalog, without
    /// quoting.
    ///
    /// When `sort_column` is `None`, the column of the first selected field
    /// living on the root table is used.
    pub fn synthesize<F>(
        field_order: &[F],
        locations: &FieldLocations,
        joins: &[String],
        root_table: &str,
        sort_column: Option<&str>,
    ) -> Result<ResolvedQuery, SynthErr>
    where
        F: AsRef<str>,
    {
        if field_order.is_empty() {
            return Err(SynthErr::EmptySelection);
        }

        let mut select = Vec::with_capacity(field_order.len());
        for field in field_order {
            let field = field.as_ref();
            let location = locations
                .get(field)
                .ok_or_else(|| SynthErr::MissingFieldLocation(field.to_owned()))?;
            select.push(format!("{} AS {field}", location.qualified_column()));
        }

        let sort_column = match sort_column {
            Some(column) => column.to_owned(),
            None => Self::derive_sort_column(field_order, locations, root_table)?,
        };

        let mut lines = vec![
            "SELECT".to_owned(),
            format!("    {}", select.join(SELECT_SEPARATOR)),
            format!("FROM {root_table}"),
        ];
        lines.extend(joins.iter().cloned());
        lines.push(format!("ORDER BY {root_table}.{sort_column};"));

        Ok(ResolvedQuery {
            sql: lines.join("\n"),
        })
    }

    fn derive_sort_column<F>(
        field_order: &[F],
        locations: &FieldLocations,
        root_table: &str,
    ) -> Result<String, SynthErr>
    where
        F: AsRef<str>,
    {
        let root = TableName::parse(root_table);
        field_order
            .iter()
            .filter_map(|field| locations.get(field.as_ref()))
            .find(|location| root.matches(&location.schema, &location.table))
            .map(|location| location.column.clone())
            .ok_or_else(|| SynthErr::MissingSortColumn(root_table.to_owned()))
    }
}

impl ResolvedQuery {
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_string(self) -> String {
        self.sql
    }

    /// Write the query verbatim to `path`
    pub fn write_to<P>(&self, path: P) -> Result<(), SynthErr>
    where
        P: AsRef<Path>,
    {
        fs::write(path, &self.sql)?;
        Ok(())
    }
}

impl fmt::Display for ResolvedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
