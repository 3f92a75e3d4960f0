//! Query composer.
//!
//! Free functions build predicates and function calls from [`Operand`]s;
//! [`select`] starts a [`Selection`] and `Table` gains INSERT, UPDATE,
//! DELETE and COUNT constructors.
//!
//! [`Operand`]: crate::coerce::Operand

mod dml;
mod function;
mod predicate;
mod selection;

pub use function::{
    add, avg, char_length, concat, convert, count, count_star, current_date, current_time,
    current_timestamp, div, fold, local_time, local_timestamp, lower, ltrim, ltrim_space, max,
    min, mul, neg, octet_length, regex_substring, rtrim, rtrim_space, sub, substring, sum,
    translate, trim, trim_space, upper, Aggregate, DatetimeFunction, Substring,
};
pub use predicate::{
    and_, between, equal, greater_than, greater_than_or_equal, in_, is_, is_not, is_not_null,
    is_null, less_than, less_than_or_equal, not_, not_between, not_equal, not_in, or_,
};
pub use selection::{select, Selection};

use crate::grammar::Statement;

impl From<Selection> for Statement {
    fn from(selection: Selection) -> Self {
        Self::Select(selection.into_statement())
    }
}
