use crate::{ForeignKeyEdge, TableName};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// A join the caller requires: `parent` is joined to `child` through the
/// foreign key involving column `on`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinDecl {
    pub parent: String,
    pub child: String,
    pub on: String,
}

/// One outgoing edge in the adjacency list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// `schema.table` of the joined table
    pub referenced_table: String,
    pub parent_column: String,
    pub referenced_column: String,
}

/// Qualified parent table name to its relationships, in declaration order
pub type TableRelationship = IndexMap<String, Vec<Relationship>>;

/// A declared join that found its foreign key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedJoin {
    /// Adjacency key of the parent table
    pub parent: String,
    pub relationship: Relationship,
}

/// The joins needed to reach the field owning tables from the root table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinGraph {
    relationships: TableRelationship,
    joins: Vec<ResolvedJoin>,
    unresolved: Vec<JoinDecl>,
    disconnected: Vec<String>,
}

/// Matches declared joins against the foreign key edges of a catalog
#[derive(Clone, Debug)]
pub struct JoinGraphResolver;

impl JoinDecl {
    pub fn new<P, C, O>(parent: P, child: C, on: O) -> Self
    where
        P: Into<String>,
        C: Into<String>,
        O: Into<String>,
    {
        Self {
            parent: parent.into(),
            child: child.into(),
            on: on.into(),
        }
    }

    fn matches(&self, edge: &ForeignKeyEdge) -> bool {
        TableName::parse(&self.parent).matches(&edge.parent_schema, &edge.parent_table)
            && TableName::parse(&self.child).matches(&edge.referenced_schema, &edge.referenced_table)
            && (edge.parent_column == self.on || edge.referenced_column == self.on)
    }
}

impl fmt::Display for JoinDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ON {}", self.parent, self.child, self.on)
    }
}

impl ResolvedJoin {
    /// `JOIN <child> ON <parent>.<col> = <child>.<col>`
    pub fn to_clause(&self) -> String {
        let rel = &self.relationship;
        format!(
            "JOIN {} ON {}.{} = {}.{}",
            rel.referenced_table,
            self.parent,
            rel.parent_column,
            rel.referenced_table,
            rel.referenced_column
        )
    }
}

impl JoinGraph {
    /// The adjacency list, keyed by qualified parent table
    pub fn relationships(&self) -> &TableRelationship {
        &self.relationships
    }

    /// Resolved joins, in declaration order
    pub fn joins(&self) -> &[ResolvedJoin] {
        &self.joins
    }

    /// Rendered JOIN clauses, in declaration order
    pub fn join_clauses(&self) -> Vec<String> {
        self.joins.iter().map(ResolvedJoin::to_clause).collect()
    }

    /// Declarations with no matching foreign key
    pub fn unresolved(&self) -> &[JoinDecl] {
        &self.unresolved
    }

    /// Required tables that the resolved joins do not connect to the root
    pub fn disconnected(&self) -> &[String] {
        &self.disconnected
    }
}

impl JoinGraphResolver {
    /// Resolve `required_joins` against `edges`.
    ///
    /// Each declaration takes the first edge going from its parent to its
    /// child whose parent or referenced column is the declared one. A
    /// declaration without such an edge is dropped from the join list and
    /// kept in [`JoinGraph::unresolved`]. A resolved join is keyed by the
    /// schema qualified parent of its edge, or by `root_table` as written
    /// when the edge starts at the root. An unresolved bare parent is keyed
    /// with the schema of `root_table`.
    ///
    /// `required_tables` are the `schema.table` names owning a field; the
    /// ones not reachable from the root through the resolved joins end up in
    /// [`JoinGraph::disconnected`].
    pub fn resolve(
        root_table: &str,
        required_tables: &[String],
        edges: &[ForeignKeyEdge],
        required_joins: &[JoinDecl],
    ) -> JoinGraph {
        let root = TableName::parse(root_table);
        let default_schema = root.schema.as_deref();
        let mut graph = JoinGraph::default();

        for decl in required_joins {
            match edges.iter().find(|edge| decl.matches(edge)) {
                Some(edge) => {
                    debug!("Join {decl} resolved by {edge}");
                    // The ON side names the table the edge starts from; the
                    // root keeps the spelling of the FROM clause.
                    let key = if root.matches(&edge.parent_schema, &edge.parent_table) {
                        root_table.to_owned()
                    } else {
                        edge.qualified_parent()
                    };
                    let relationship = Relationship {
                        referenced_table: edge.qualified_referenced(),
                        parent_column: edge.parent_column.clone(),
                        referenced_column: edge.referenced_column.clone(),
                    };
                    graph
                        .relationships
                        .entry(key.clone())
                        .or_default()
                        .push(relationship.clone());
                    graph.joins.push(ResolvedJoin {
                        parent: key,
                        relationship,
                    });
                }
                None => {
                    warn!("Join {decl} has no matching foreign key; omitted");
                    let key = TableName::parse(&decl.parent).qualify(default_schema);
                    graph.relationships.entry(key).or_default();
                    graph.unresolved.push(decl.clone());
                }
            }
        }

        let mut reachable = vec![root_table.to_owned()];
        for join in graph.joins.iter() {
            if reachable.iter().any(|name| same_table(name, &join.parent)) {
                reachable.push(join.relationship.referenced_table.clone());
            }
        }
        for table in required_tables {
            let reached = reachable.iter().any(|name| same_table(name, table));
            if !reached {
                warn!("Table {table} is not joined to root table {root}");
                graph.disconnected.push(table.clone());
            }
        }

        graph
    }
}

/// Both names refer to the same table; a missing schema matches any schema
fn same_table(a: &str, b: &str) -> bool {
    let (a, b) = (TableName::parse(a), TableName::parse(b));
    match (&a.schema, &b.schema) {
        (Some(schema), _) => b.matches(schema, &a.table),
        (None, _) => a.table == b.table,
    }
}
