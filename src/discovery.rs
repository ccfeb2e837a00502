//! Alternate discovery mode: find each field by candidate column names across
//! all tables and annotate the backing table with a short alias.
//!
//! The result is meant for operators to review and never feeds into query
//! synthesis.

use crate::{AliasAllocator, ColumnMeta};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Logical field name to candidate column names, both in priority order
pub type Candidates = IndexMap<String, Vec<String>>;

/// A field detected during discovery
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedField {
    /// `schema.table`
    pub table: String,
    pub column: String,
    pub alias: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    /// `schema.table` to its columns, in catalog order
    pub tables: IndexMap<String, Vec<String>>,
    pub detected: IndexMap<String, DetectedField>,
    pub missing: Vec<String>,
}

impl Discovery {
    /// Group `columns` by table and detect every field of `candidates`.
    ///
    /// Tables are searched in the order they first appear in the catalog and,
    /// within a table, candidates in their given order. Column names are
    /// compared exactly.
    pub fn discover(columns: &[ColumnMeta], candidates: &Candidates) -> Self {
        Self::discover_with(columns, candidates, AliasAllocator::new())
    }

    /// Same as [`Discovery::discover`], continuing from an allocator that may
    /// carry aliases assigned elsewhere
    pub fn discover_with(
        columns: &[ColumnMeta],
        candidates: &Candidates,
        mut allocator: AliasAllocator,
    ) -> Self {
        let mut tables: IndexMap<String, Vec<String>> = IndexMap::new();
        for col in columns {
            tables
                .entry(col.qualified_table())
                .or_default()
                .push(col.column.clone());
        }

        let mut detected = IndexMap::new();
        let mut missing = Vec::new();
        for (field, expected) in candidates {
            let found = tables.iter().find_map(|(table, cols)| {
                expected
                    .iter()
                    .find(|name| cols.contains(name))
                    .map(|name| (table, name))
            });
            match found {
                Some((table, column)) => {
                    let alias = allocator.alias_of(table).to_owned();
                    detected.insert(
                        field.clone(),
                        DetectedField {
                            table: table.clone(),
                            column: column.clone(),
                            alias,
                        },
                    );
                }
                None => missing.push(field.clone()),
            }
        }

        if missing.is_empty() {
            info!("All {} fields detected", detected.len());
        } else {
            warn!("Could not find all required fields: {}", missing.join(", "));
        }

        Self {
            tables,
            detected,
            missing,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
