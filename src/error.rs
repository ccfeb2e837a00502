use thiserror::Error;

/// An error from an unsuccessful resolution or synthesis run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthErr {
    /// The schema catalog could not supply its metadata
    #[error("Catalog Unavailable: {0}")]
    CatalogUnavailable(String),
    /// Logical fields with no matching column under their owner table
    #[error("Unresolved Field: {}", .0.join(", "))]
    UnresolvedField(Vec<String>),
    /// Declared joins with no matching foreign key
    #[error("Unresolved Join: {}", .0.join(", "))]
    UnresolvedJoin(Vec<String>),
    /// A field reached synthesis without a location
    #[error("Missing Field Location: {0}")]
    MissingFieldLocation(String),
    /// No sort column could be determined for the root table
    #[error("Missing Sort Column: {0}")]
    MissingSortColumn(String),
    /// There is nothing to select
    #[error("Empty Selection")]
    EmptySelection,
    /// Reading a snapshot or writing a sink failed
    #[error("IO Error: {0}")]
    Io(String),
    /// Error occurred while (de)serializing json
    #[error("Json Error: {0}")]
    Json(String),
}

impl From<std::io::Error> for SynthErr {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(feature = "with-json")]
impl From<serde_json::Error> for SynthErr {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
