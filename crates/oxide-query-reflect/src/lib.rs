//! # oxide-query-reflect
//!
//! Builds an [`oxide_query_core::Catalog`] from a live database.
//!
//! The database is reached through the [`Connection`] trait, so any client
//! library can be plugged in. [`reflect`] detects the dialect from the
//! driver name, asks the server for the current database and reads its
//! tables and columns from `information_schema.columns`.

mod connection;
mod error;
mod reflect;

pub use connection::{Connection, Row};
pub use error::{ReflectError, Result};
pub use reflect::{columns_query, current_database, detect_dialect, reflect, reflect_database};
