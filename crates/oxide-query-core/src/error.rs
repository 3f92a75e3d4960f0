//! Error types for query composition.

/// Errors raised while composing statements.
///
/// Most variants are programmer errors that abort a composition chain
/// (coercion failures, joins that do not connect, API misuse). `NoValues`,
/// `UnknownColumn` and `UnknownTable` typically come from validated user
/// input and are meant to be handled; see [`Error::is_recoverable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operand cannot be promoted to the grammar node a position requires.
    #[error("cannot coerce {type_name} `{value}` into {target}")]
    Coercion {
        /// Kind of the offending operand.
        type_name: &'static str,
        /// String form of the offending operand.
        value: String,
        /// Grammar position that rejected it.
        target: &'static str,
    },

    /// A SELECT references relation-bound projections but has no FROM entry.
    #[error("SELECT has no FROM clause")]
    NoFrom,

    /// A join condition does not mention any relation already in FROM.
    #[error("join against a selection not in the containing SELECT (condition references: {})", .relations.join(", "))]
    DisconnectedJoin {
        /// Relations the condition referenced.
        relations: Vec<String>,
    },

    /// INSERT or UPDATE was called without any values.
    #[error("no values given")]
    NoValues,

    /// A column name does not exist on the table.
    #[error("unknown column `{column}` on `{table}`")]
    UnknownColumn {
        /// Table (effective name) that was searched.
        table: String,
        /// Column that was requested.
        column: String,
    },

    /// A table name does not exist in the catalog.
    #[error("unknown table `{0}`")]
    UnknownTable(String),

    /// Obvious misuse of the composition API.
    #[error("{0}")]
    Misuse(String),
}

impl Error {
    /// Returns whether the error stems from data rather than a programming
    /// mistake.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoValues | Self::UnknownColumn { .. } | Self::UnknownTable(_)
        )
    }
}

pub(crate) fn misuse(message: impl Into<String>) -> Error {
    Error::Misuse(message.into())
}

/// Result type alias for composition.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::NoValues.is_recoverable());
        assert!(
            Error::UnknownColumn {
                table: String::from("users"),
                column: String::from("nope"),
            }
            .is_recoverable()
        );
        assert!(!Error::NoFrom.is_recoverable());
        assert!(!misuse("COUNT takes at most one argument").is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = Error::DisconnectedJoin {
            relations: vec![String::from("articles"), String::from("users")],
        };
        assert_eq!(
            err.to_string(),
            "join against a selection not in the containing SELECT (condition references: articles, users)"
        );

        let err = Error::Coercion {
            type_name: "sort specification",
            value: String::from("users.id DESC"),
            target: "row value predicand",
        };
        assert_eq!(
            err.to_string(),
            "cannot coerce sort specification `users.id DESC` into row value predicand"
        );
    }
}
