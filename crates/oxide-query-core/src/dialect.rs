//! SQL dialect support.
//!
//! The core grammar is ANSI SQL:2003. A dialect only changes how bound
//! parameters are spelled: PostgreSQL numbers them (`$1`, `$2`, ...), every
//! other dialect uses `?`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target database dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL / MariaDB (`?` placeholders).
    #[default]
    #[serde(alias = "mariadb")]
    MySql,
    /// PostgreSQL (`$N` placeholders).
    #[serde(alias = "postgres")]
    PostgreSql,
    /// Microsoft SQL Server.
    #[serde(alias = "mssql")]
    TSql,
    /// Any other driver.
    Unknown,
}

impl Dialect {
    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::TSql => "tsql",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the placeholder for the 1-based parameter `position`.
    #[must_use]
    pub fn placeholder(&self, position: usize) -> String {
        if self.numbered_placeholders() {
            format!("${position}")
        } else {
            String::from("?")
        }
    }

    /// Returns whether placeholders carry their position.
    #[must_use]
    pub const fn numbered_placeholders(&self) -> bool {
        matches!(self, Self::PostgreSql)
    }

    /// Guesses the dialect from a database driver's type name.
    ///
    /// Matching is case-insensitive and looks for well-known driver names
    /// anywhere in the string, so `"*mysql.MySQLDriver"`, `"pq.Driver"` and
    /// `"sqlx-postgres"` are all recognised.
    #[must_use]
    pub fn from_driver_name(driver: &str) -> Self {
        let driver = driver.to_ascii_lowercase();
        let has_token = |token: &str| {
            driver
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|part| part == token)
        };

        if driver.contains("mysql") || driver.contains("mariadb") {
            Self::MySql
        } else if driver.contains("postgres") || has_token("pq") || has_token("pgx") {
            Self::PostgreSql
        } else if driver.contains("mssql") || driver.contains("sqlserver") {
            Self::TSql
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::MySql.placeholder(3), "?");
        assert_eq!(Dialect::TSql.placeholder(1), "?");
        assert_eq!(Dialect::PostgreSql.placeholder(3), "$3");
        assert!(Dialect::PostgreSql.numbered_placeholders());
        assert!(!Dialect::Unknown.numbered_placeholders());
    }

    #[test]
    fn test_default_is_mysql() {
        assert_eq!(Dialect::default(), Dialect::MySql);
    }

    #[test]
    fn test_from_driver_name() {
        assert_eq!(Dialect::from_driver_name("*mysql.MySQLDriver"), Dialect::MySql);
        assert_eq!(Dialect::from_driver_name("*pq.Driver"), Dialect::PostgreSql);
        assert_eq!(Dialect::from_driver_name("pgx"), Dialect::PostgreSql);
        assert_eq!(Dialect::from_driver_name("tokio-postgres"), Dialect::PostgreSql);
        assert_eq!(Dialect::from_driver_name("*mssql.Driver"), Dialect::TSql);
        assert_eq!(Dialect::from_driver_name("sqlite3"), Dialect::Unknown);
    }

    #[test]
    fn test_driver_name_needs_whole_token_for_short_names() {
        // "pq" must not match inside unrelated words.
        assert_eq!(Dialect::from_driver_name("opaque"), Dialect::Unknown);
    }
}
