use crate::{ColumnMeta, ForeignKeyEdge, SchemaCatalog, SynthErr};
use std::cell::Cell;

/// An in-memory catalog for tests, with a switch to make it unavailable
#[derive(Debug, Default)]
pub struct MockCatalog {
    columns: Vec<ColumnMeta>,
    foreign_keys: Vec<ForeignKeyEdge>,
    unavailable: Option<String>,
    reads: Cell<usize>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn append_columns(mut self, mut vec: Vec<ColumnMeta>) -> Self {
        self.columns.append(&mut vec);
        self
    }

    pub fn append_foreign_keys(mut self, mut vec: Vec<ForeignKeyEdge>) -> Self {
        self.foreign_keys.append(&mut vec);
        self
    }

    /// Every read fails with [`SynthErr::CatalogUnavailable`]
    pub fn unavailable<S>(mut self, reason: S) -> Self
    where
        S: Into<String>,
    {
        self.unavailable = Some(reason.into());
        self
    }

    /// Number of times `columns()` or `foreign_keys()` was called
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    fn read<T: Clone>(&self, rows: &[T]) -> Result<Vec<T>, SynthErr> {
        self.reads.set(self.reads.get() + 1);
        match &self.unavailable {
            Some(reason) => Err(SynthErr::CatalogUnavailable(reason.clone())),
            None => Ok(rows.to_vec()),
        }
    }
}

impl SchemaCatalog for MockCatalog {
    fn columns(&self) -> Result<Vec<ColumnMeta>, SynthErr> {
        self.read(&self.columns)
    }

    fn foreign_keys(&self) -> Result<Vec<ForeignKeyEdge>, SynthErr> {
        self.read(&self.foreign_keys)
    }
}
