//! Error types for catalog reflection.

use oxide_query_core::Dialect;

/// Errors that can occur while reflecting a catalog.
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    /// The connection failed to run a query.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A result row did not have the expected shape.
    #[error("Unexpected row from `{query}`: {row}")]
    UnexpectedRow {
        /// The query that produced the row.
        query: String,
        /// Inline rendering of the row.
        row: String,
    },

    /// The dialect has no known way to name the current database.
    #[error("Reflection is not supported for dialect `{0}`")]
    UnsupportedDialect(Dialect),

    /// Composing the reflection query failed.
    #[error(transparent)]
    Compose(#[from] oxide_query_core::Error),
}

/// Result type for reflection operations.
pub type Result<T> = std::result::Result<T, ReflectError>;
