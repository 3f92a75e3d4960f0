//! The database connection seam.

use oxide_query_core::SqlValue;

/// One result row.
pub type Row = Vec<SqlValue>;

/// A database connection able to run parameterized queries.
///
/// Implement this over whatever client library the host application uses;
/// reflection only needs these two operations.
pub trait Connection {
    /// Error reported by the client library.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Rows returned by [`Connection::query`].
    type Rows: IntoIterator<Item = Row>;

    /// Runs `sql` with `params` bound to its placeholders in order.
    ///
    /// # Errors
    ///
    /// Returns the client library's error when the query fails.
    fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Self::Rows, Self::Error>;

    /// Returns the name of the underlying driver, e.g. `"mysql"` or
    /// `"postgres"`.
    fn driver_type_name(&self) -> &str;
}
