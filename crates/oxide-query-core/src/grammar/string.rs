//! Character and blob value expressions.

use super::identifier::Identifier;
use super::numeric::NumericValueExpression;
use super::value::{NonparenthesizedValueExpressionPrimary, ValueExpressionPrimary};
use super::{Visitor, Walk};

/// `<string value expression>`.
#[derive(Debug, Clone, PartialEq)]
pub enum StringValueExpression {
    /// Character string expression.
    Character(CharacterValueExpression),
    /// Binary string expression.
    Blob(BlobValueExpression),
}

/// `<character value expression>`: left-deep `||` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterValueExpression {
    /// A single factor.
    Factor(CharacterFactor),
    /// `<left> || <right>`.
    Concatenation(Box<CharacterValueExpression>, CharacterFactor),
}

/// `<character factor>`.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterFactor {
    /// Operand.
    pub primary: CharacterPrimary,
}

/// `<character primary>`.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterPrimary {
    /// A value expression primary.
    Value(ValueExpressionPrimary),
    /// A string value function.
    Function(Box<CharacterValueFunction>),
}

/// `<char length units>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharLengthUnits {
    /// `CHARACTERS`.
    Characters,
    /// `OCTETS`.
    Octets,
}

impl CharLengthUnits {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "CHARACTERS",
            Self::Octets => "OCTETS",
        }
    }
}

/// Case direction of a `<fold>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldCase {
    /// `UPPER`.
    Upper,
    /// `LOWER`.
    Lower,
}

impl FoldCase {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
        }
    }
}

/// `<trim specification>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimSpecification {
    /// `LEADING`.
    Leading,
    /// `TRAILING`.
    Trailing,
    /// `BOTH`.
    Both,
}

impl TrimSpecification {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Leading => "LEADING",
            Self::Trailing => "TRAILING",
            Self::Both => "BOTH",
        }
    }
}

/// `<character value function>`.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterValueFunction {
    /// `SUBSTRING(<subject> FROM <start> [FOR <length>] [USING <units>])`.
    Substring {
        /// String to cut.
        subject: CharacterValueExpression,
        /// 1-based start position.
        start: NumericValueExpression,
        /// Number of units to keep.
        length: Option<NumericValueExpression>,
        /// Length units.
        units: Option<CharLengthUnits>,
    },
    /// `SUBSTRING(<subject> SIMILAR <similar> ESCAPE <escape>)`.
    RegexSubstring {
        /// String to search.
        subject: CharacterValueExpression,
        /// Pattern.
        similar: CharacterValueExpression,
        /// Escape character.
        escape: CharacterValueExpression,
    },
    /// `UPPER(<subject>)` / `LOWER(<subject>)`.
    Fold {
        /// Direction.
        case: FoldCase,
        /// Operand.
        subject: CharacterValueExpression,
    },
    /// `CONVERT(<subject> USING <charset>)`.
    Transcode {
        /// Operand.
        subject: CharacterValueExpression,
        /// Transcoding name.
        charset: Identifier,
    },
    /// `TRANSLATE(<subject> USING <translation>)`.
    Translate {
        /// Operand.
        subject: CharacterValueExpression,
        /// Transliteration name.
        translation: Identifier,
    },
    /// `TRIM([<specification>] [<character>] FROM <source>)`.
    Trim {
        /// Side to trim.
        specification: Option<TrimSpecification>,
        /// Character to strip; space when absent.
        character: Option<CharacterValueExpression>,
        /// Operand.
        source: CharacterValueExpression,
    },
}

/// `<blob value expression>`: left-deep `||` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum BlobValueExpression {
    /// A single primary.
    Factor(BlobPrimary),
    /// `<left> || <right>`.
    Concatenation(Box<BlobValueExpression>, BlobPrimary),
}

/// `<blob primary>`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobPrimary(pub ValueExpressionPrimary);

impl CharacterFactor {
    /// Returns the value primary if the factor is not a function call.
    #[must_use]
    pub const fn as_value(&self) -> Option<&ValueExpressionPrimary> {
        match &self.primary {
            CharacterPrimary::Value(value) => Some(value),
            CharacterPrimary::Function(_) => None,
        }
    }
}

impl CharacterValueExpression {
    /// Appends `right` to the concatenation chain.
    #[must_use]
    pub fn concat(self, right: CharacterFactor) -> Self {
        Self::Concatenation(Box::new(self), right)
    }
}

impl From<CharacterPrimary> for CharacterFactor {
    fn from(primary: CharacterPrimary) -> Self {
        Self { primary }
    }
}

impl From<CharacterFactor> for CharacterValueExpression {
    fn from(factor: CharacterFactor) -> Self {
        Self::Factor(factor)
    }
}

impl From<CharacterPrimary> for CharacterValueExpression {
    fn from(primary: CharacterPrimary) -> Self {
        Self::Factor(CharacterFactor::from(primary))
    }
}

impl From<CharacterValueFunction> for CharacterPrimary {
    fn from(function: CharacterValueFunction) -> Self {
        Self::Function(Box::new(function))
    }
}

impl From<CharacterValueFunction> for CharacterValueExpression {
    fn from(function: CharacterValueFunction) -> Self {
        Self::from(CharacterPrimary::from(function))
    }
}

impl From<NonparenthesizedValueExpressionPrimary> for CharacterPrimary {
    fn from(primary: NonparenthesizedValueExpressionPrimary) -> Self {
        Self::Value(ValueExpressionPrimary::NonParenthesized(primary))
    }
}

impl From<NonparenthesizedValueExpressionPrimary> for CharacterValueExpression {
    fn from(primary: NonparenthesizedValueExpressionPrimary) -> Self {
        Self::from(CharacterPrimary::from(primary))
    }
}

impl From<CharacterValueExpression> for StringValueExpression {
    fn from(expr: CharacterValueExpression) -> Self {
        Self::Character(expr)
    }
}

impl From<BlobValueExpression> for StringValueExpression {
    fn from(expr: BlobValueExpression) -> Self {
        Self::Blob(expr)
    }
}

impl Walk for StringValueExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Character(expr) => expr.walk(visitor),
            Self::Blob(expr) => expr.walk(visitor),
        }
    }
}

impl Walk for CharacterValueExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Factor(factor) => factor.walk(visitor),
            Self::Concatenation(left, right) => {
                left.walk(visitor);
                right.walk(visitor);
            }
        }
    }
}

impl Walk for CharacterFactor {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.primary.walk(visitor);
    }
}

impl Walk for CharacterPrimary {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Value(value) => value.walk(visitor),
            Self::Function(function) => function.walk(visitor),
        }
    }
}

impl Walk for CharacterValueFunction {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Substring {
                subject,
                start,
                length,
                units: _,
            } => {
                subject.walk(visitor);
                start.walk(visitor);
                length.walk(visitor);
            }
            Self::RegexSubstring {
                subject,
                similar,
                escape,
            } => {
                subject.walk(visitor);
                similar.walk(visitor);
                escape.walk(visitor);
            }
            Self::Fold { subject, .. }
            | Self::Transcode { subject, .. }
            | Self::Translate { subject, .. } => subject.walk(visitor),
            Self::Trim {
                specification: _,
                character,
                source,
            } => {
                character.walk(visitor);
                source.walk(visitor);
            }
        }
    }
}

impl Walk for BlobValueExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Factor(primary) => primary.walk(visitor),
            Self::Concatenation(left, right) => {
                left.walk(visitor);
                right.walk(visitor);
            }
        }
    }
}

impl Walk for BlobPrimary {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.0.walk(visitor);
    }
}
