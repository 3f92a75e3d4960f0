//! Two-pass statement serializer.
//!
//! [`Builder::string_args`] first counts the placeholders a statement will
//! render, then emits the SQL text while filling an argument vector sized
//! exactly for them.
//!
//! # Example
//!
//! ```
//! use oxide_query_core::builder::Builder;
//! use oxide_query_core::compose::{equal, select};
//! use oxide_query_core::meta::{Catalog, TableSchema};
//!
//! let mut catalog = Catalog::new("app");
//! catalog.add_table(TableSchema::new("users").columns(["id", "name"]));
//! let users = catalog.table("users").unwrap();
//!
//! let query = select((users.c("id").unwrap(), users.c("name").unwrap()))
//!     .unwrap()
//!     .where_(equal(users.c("name").unwrap(), "foo").unwrap())
//!     .unwrap();
//!
//! let (sql, args) = Builder::new().string_args(&query);
//! assert_eq!(sql, "SELECT users.id, users.name FROM users WHERE users.name = ?");
//! assert_eq!(args.len(), 1);
//! ```

mod emit;

use serde::{Deserialize, Serialize};

pub use emit::{Emit, Output};

use crate::dialect::Dialect;
use crate::grammar::{arg_count, Walk};
use crate::value::SqlValue;

/// Builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Placeholder style.
    pub dialect: Dialect,
    /// Inserted before every major clause.
    pub separate_clause_with: String,
    /// Prepended to the rendered text.
    pub prefix_with: String,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            separate_clause_with: String::from(" "),
            prefix_with: String::new(),
        }
    }
}

/// Renders statements to `(sql, args)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Builder {
    options: BuilderOptions,
}

impl Builder {
    /// Creates a builder with default options (MySQL, single-space clause
    /// separator, no prefix).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a configuration record.
    #[must_use]
    pub const fn from_options(options: BuilderOptions) -> Self {
        Self { options }
    }

    /// Sets the dialect.
    #[must_use]
    pub const fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.options.dialect = dialect;
        self
    }

    /// Sets the string inserted before every major clause. Use `"\n"` for
    /// multi-line output.
    #[must_use]
    pub fn with_format_separate_clause_with(mut self, separator: impl Into<String>) -> Self {
        self.options.separate_clause_with = separator.into();
        self
    }

    /// Sets the string prepended to the output.
    #[must_use]
    pub fn with_format_prefix_with(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix_with = prefix.into();
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.options.dialect
    }

    /// Renders `statement` and returns the SQL text together with the value
    /// of every placeholder, in emission order.
    pub fn string_args<S: Walk + Emit + ?Sized>(&self, statement: &S) -> (String, Vec<SqlValue>) {
        let count = arg_count(statement);
        let mut out = Output::new(&self.options, count);
        statement.emit(&mut out);
        debug_assert_eq!(
            out.bound(),
            count,
            "emit pass bound a different number of values than the count pass"
        );
        let (sql, args) = out.finish();
        tracing::debug!(
            sql = %sql,
            args = args.len(),
            dialect = %self.options.dialect,
            "Rendered statement"
        );
        (sql, args)
    }

    /// Renders `statement` and returns only the SQL text.
    pub fn string<S: Walk + Emit + ?Sized>(&self, statement: &S) -> String {
        self.string_args(statement).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = BuilderOptions::default();
        assert_eq!(options.dialect, Dialect::MySql);
        assert_eq!(options.separate_clause_with, " ");
        assert_eq!(options.prefix_with, "");
        assert_eq!(Builder::new().options(), &options);
    }

    #[test]
    fn test_fluent_options() {
        let builder = Builder::new()
            .with_dialect(Dialect::PostgreSql)
            .with_format_separate_clause_with("\n")
            .with_format_prefix_with("/* report */ ");
        assert_eq!(builder.dialect(), Dialect::PostgreSql);
        assert_eq!(builder.options().separate_clause_with, "\n");
        assert_eq!(builder.options().prefix_with, "/* report */ ");
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: BuilderOptions =
            serde_json::from_str(r#"{"dialect": "postgres"}"#).expect("valid options");
        assert_eq!(options.dialect, Dialect::PostgreSql);
        assert_eq!(options.separate_clause_with, " ");

        let json = serde_json::to_string(&BuilderOptions::default()).expect("serializable");
        assert_eq!(
            json,
            r#"{"dialect":"mysql","separate_clause_with":" ","prefix_with":""}"#
        );
    }
}
