//! Literal productions.
//!
//! Literals never reach the SQL text: each one renders as a placeholder and
//! contributes its value to the argument vector.

use super::{Visitor, Walk};
use crate::value::SqlValue;

/// `<unsigned numeric literal>`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedNumericLiteral(pub SqlValue);

/// `<signed numeric literal>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedNumericLiteral(pub SqlValue);

/// `<general literal>`: character strings, blobs, booleans and NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralLiteral(pub SqlValue);

/// `<unsigned literal>`.
#[derive(Debug, Clone, PartialEq)]
pub enum UnsignedLiteral {
    /// Unsigned numeric literal.
    Numeric(UnsignedNumericLiteral),
    /// General literal.
    General(GeneralLiteral),
}

/// `<unsigned value specification>`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedValueSpecification(pub UnsignedLiteral);

impl UnsignedNumericLiteral {
    /// Wraps an unsigned integer.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(SqlValue::UInt(value))
    }
}

impl UnsignedValueSpecification {
    /// Returns the bound value.
    #[must_use]
    pub const fn value(&self) -> &SqlValue {
        match &self.0 {
            UnsignedLiteral::Numeric(UnsignedNumericLiteral(v))
            | UnsignedLiteral::General(GeneralLiteral(v)) => v,
        }
    }
}

impl From<UnsignedNumericLiteral> for UnsignedValueSpecification {
    fn from(literal: UnsignedNumericLiteral) -> Self {
        Self(UnsignedLiteral::Numeric(literal))
    }
}

impl From<GeneralLiteral> for UnsignedValueSpecification {
    fn from(literal: GeneralLiteral) -> Self {
        Self(UnsignedLiteral::General(literal))
    }
}

impl Walk for UnsignedNumericLiteral {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.bound_value(&self.0);
    }
}

impl Walk for SignedNumericLiteral {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.bound_value(&self.0);
    }
}

impl Walk for GeneralLiteral {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.bound_value(&self.0);
    }
}

impl Walk for UnsignedLiteral {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Numeric(l) => l.walk(visitor),
            Self::General(l) => l.walk(visitor),
        }
    }
}

impl Walk for UnsignedValueSpecification {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.0.walk(visitor);
    }
}
