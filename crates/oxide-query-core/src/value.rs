//! Bound parameter values.
//!
//! Every literal handed to the composer ends up as a [`SqlValue`] in the
//! argument vector returned by [`Builder::string_args`](crate::builder::Builder::string_args).
//! Values are never spliced into SQL text.

use std::fmt;

/// A runtime value bound to one placeholder.
///
/// Signed and unsigned integers are kept apart so the coercion engine can
/// decide between `<unsigned numeric literal>` and `<signed numeric literal>`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// Only used for diagnostics; rendered statements always bind values.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int(n) => format!("{n}"),
            Self::UInt(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => {
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }

    /// Returns the Rust-side name of the value kind, used in coercion errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "signed integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    /// Returns `true` for values that promote to a numeric literal.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::UInt(_) | Self::Float(_))
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_inline())
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_to_sql_value {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(<$target>::from(self))
                }
            }
        )+
    };
}

impl_to_sql_value!(Int as i64: i64, i32, i16, i8);
impl_to_sql_value!(UInt as u64: u64, u32, u16, u8);
impl_to_sql_value!(Float as f64: f64, f32);

impl ToSqlValue for isize {
    fn to_sql_value(self) -> SqlValue {
        // isize is at most 64 bits on every supported target.
        SqlValue::Int(self as i64)
    }
}

impl ToSqlValue for usize {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::UInt(self as u64)
    }
}

impl ToSqlValue for char {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for &String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_inline_null() {
        assert_eq!(SqlValue::Null.to_sql_inline(), "NULL");
    }

    #[test]
    fn test_sql_value_inline_numbers() {
        assert_eq!(SqlValue::Int(-100).to_sql_inline(), "-100");
        assert_eq!(SqlValue::UInt(42).to_sql_inline(), "42");
    }

    #[test]
    fn test_sql_value_inline_text_escaping() {
        assert_eq!(
            SqlValue::Text(String::from("O'Brien")).to_sql_inline(),
            "'O''Brien'"
        );
    }

    #[test]
    fn test_sql_value_inline_blob() {
        assert_eq!(
            SqlValue::Blob(vec![0x48, 0x45, 0x4C, 0x4C, 0x4F]).to_sql_inline(),
            "X'48454C4C4F'"
        );
    }

    #[test]
    fn test_signedness_is_preserved() {
        assert_eq!(7_u32.to_sql_value(), SqlValue::UInt(7));
        assert_eq!(7_i32.to_sql_value(), SqlValue::Int(7));
        assert_eq!(7_usize.to_sql_value(), SqlValue::UInt(7));
        assert_eq!(2.5_f32.to_sql_value(), SqlValue::Float(2.5));
    }

    #[test]
    fn test_text_like_conversions() {
        assert_eq!('x'.to_sql_value(), SqlValue::Text(String::from("x")));
        assert_eq!("hello".to_sql_value(), SqlValue::Text(String::from("hello")));
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(true).to_sql_value(), SqlValue::Bool(true));
    }

    #[test]
    fn test_numeric_kinds() {
        assert!(SqlValue::Float(1.0).is_numeric());
        assert!(!SqlValue::Text(String::new()).is_numeric());
        assert_eq!(SqlValue::UInt(1).kind(), "unsigned integer");
    }
}
