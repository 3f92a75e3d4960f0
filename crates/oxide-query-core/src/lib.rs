//! # oxide-query-core
//!
//! Programmatic construction of ANSI SQL:2003 statements.
//!
//! Statements are composed from catalog handles (tables, columns, derived
//! tables) into a typed grammar tree, then rendered by a [`Builder`] into
//! SQL text with dialect-specific placeholders and a matching argument
//! vector:
//!
//! - [`meta`]: the catalog of tables and their column handles
//! - [`compose`]: `select`, joins, predicates, functions, INSERT/UPDATE/DELETE
//! - [`coerce`]: promotion of loosely typed operands to grammar nodes
//! - [`grammar`]: the AST and its traversal
//! - [`builder`]: the two-pass serializer
//!
//! ```rust
//! use oxide_query_core::compose::{equal, or_, select};
//! use oxide_query_core::meta::{Catalog, TableSchema};
//! use oxide_query_core::{Builder, Dialect, SqlValue};
//!
//! # fn main() -> oxide_query_core::Result<()> {
//! let mut catalog = Catalog::new("app");
//! let users = catalog.add_table(TableSchema::new("users").columns(["id", "name"]));
//! let name = users.c("name")?;
//!
//! let query = select((users.c("id")?, &name))?
//!     .where_(or_(equal(&name, "foo")?, equal(&name, "bar")?)?)?
//!     .limit(10);
//!
//! let (sql, args) = Builder::new()
//!     .with_dialect(Dialect::PostgreSql)
//!     .string_args(&query);
//! assert_eq!(
//!     sql,
//!     "SELECT users.id, users.name FROM users WHERE (users.name = $1 OR users.name = $2) LIMIT $3"
//! );
//! assert_eq!(args[2], SqlValue::UInt(10));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod coerce;
pub mod compose;
pub mod dialect;
pub mod error;
pub mod grammar;
pub mod meta;
pub mod value;

pub use builder::{Builder, BuilderOptions};
pub use coerce::{Operand, Operands};
pub use compose::{select, Selection};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use grammar::Statement;
pub use meta::{Catalog, Column, DerivedTable, Table, TableDefinition, TableSchema};
pub use value::{SqlValue, ToSqlValue};
