//! Comparison rules for `Compare` modifiers.
//!
//! Comparisons are a total function over (value kind, operand kind) pairs:
//!
//! | value   | numeric operand        | text operand                    |
//! |---------|------------------------|---------------------------------|
//! | absent  | false                  | false                           |
//! | number  | numeric comparison     | string comparison               |
//! | string  | numeric if it parses, else false | string comparison     |
//! | boolean | false                  | string comparison (`true`/`false`) |
//!
//! String comparison is exact equality for `=` and lexicographic ordering
//! for the other operators.

use std::cmp::Ordering;

use crate::parser::{Comparator, Operand};
use crate::types::{Value, ValueKind};

/// Evaluate `value op operand`.
///
/// # Example
///
/// ```
/// use streamfmt::interpreter::compare;
/// use streamfmt::parser::{Comparator, Operand};
/// use streamfmt::Value;
///
/// assert!(compare(Some(&Value::Number(5)), Comparator::Ge, &Operand::Number(0.0)));
/// assert!(!compare(None, Comparator::Ge, &Operand::Number(0.0)));
/// assert!(compare(Some(&Value::Bool(true)), Comparator::Eq, &Operand::parse("true")));
/// ```
pub fn compare(value: Option<&Value>, op: Comparator, operand: &Operand) -> bool {
    let Some(value) = value else {
        return false;
    };
    match (value.kind(), operand) {
        (ValueKind::Absent | ValueKind::Boolean, Operand::Number(_)) => false,
        (ValueKind::Number | ValueKind::String, Operand::Number(rhs)) => value
            .numeric()
            .and_then(|lhs| lhs.partial_cmp(rhs))
            .is_some_and(|ordering| accepts(op, ordering)),
        (ValueKind::Absent, Operand::Text(_)) => false,
        (ValueKind::Number | ValueKind::String | ValueKind::Boolean, Operand::Text(rhs)) => {
            let lhs = value.to_string();
            accepts(op, lhs.as_str().cmp(rhs.as_str()))
        }
    }
}

/// Whether an ordering of `lhs` relative to `rhs` satisfies the operator.
fn accepts(op: Comparator, ordering: Ordering) -> bool {
    match op {
        Comparator::Eq => ordering == Ordering::Equal,
        Comparator::Gt => ordering == Ordering::Greater,
        Comparator::Ge => ordering != Ordering::Less,
        Comparator::Lt => ordering == Ordering::Less,
        Comparator::Le => ordering != Ordering::Greater,
    }
}
