//! Datetime value functions.

use super::{Visitor, Walk};

/// `<datetime value function>`.
///
/// The optional precision is the fractional-seconds precision and renders
/// inline (`CURRENT_TIMESTAMP(3)`); it is not a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatetimeValueFunction {
    /// `CURRENT_DATE`.
    CurrentDate,
    /// `CURRENT_TIME[(p)]`.
    CurrentTime(Option<u8>),
    /// `CURRENT_TIMESTAMP[(p)]`.
    CurrentTimestamp(Option<u8>),
    /// `LOCALTIME[(p)]`.
    LocalTime(Option<u8>),
    /// `LOCALTIMESTAMP[(p)]`.
    LocalTimestamp(Option<u8>),
}

impl DatetimeValueFunction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime(_) => "CURRENT_TIME",
            Self::CurrentTimestamp(_) => "CURRENT_TIMESTAMP",
            Self::LocalTime(_) => "LOCALTIME",
            Self::LocalTimestamp(_) => "LOCALTIMESTAMP",
        }
    }

    /// Returns the fractional-seconds precision.
    #[must_use]
    pub const fn precision(&self) -> Option<u8> {
        match self {
            Self::CurrentDate => None,
            Self::CurrentTime(p)
            | Self::CurrentTimestamp(p)
            | Self::LocalTime(p)
            | Self::LocalTimestamp(p) => *p,
        }
    }

    /// Returns a copy with the precision set. `CURRENT_DATE` has none and
    /// is returned unchanged.
    #[must_use]
    pub const fn with_precision(self, precision: u8) -> Self {
        match self {
            Self::CurrentDate => Self::CurrentDate,
            Self::CurrentTime(_) => Self::CurrentTime(Some(precision)),
            Self::CurrentTimestamp(_) => Self::CurrentTimestamp(Some(precision)),
            Self::LocalTime(_) => Self::LocalTime(Some(precision)),
            Self::LocalTimestamp(_) => Self::LocalTimestamp(Some(precision)),
        }
    }
}

impl Walk for DatetimeValueFunction {
    fn walk<V: Visitor + ?Sized>(&self, _visitor: &mut V) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision() {
        let f = DatetimeValueFunction::CurrentTimestamp(None).with_precision(3);
        assert_eq!(f.precision(), Some(3));
        assert_eq!(f.keyword(), "CURRENT_TIMESTAMP");
        assert_eq!(
            DatetimeValueFunction::CurrentDate.with_precision(3),
            DatetimeValueFunction::CurrentDate
        );
    }
}
