//! Proptest strategies for capture sources

use capture_core::Value;
use proptest::prelude::*;

/// Field names as they would appear on a declared type
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

/// Printable names with no surrounding whitespace
pub fn person_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z '-]{0,30}[A-Za-z]"
}

pub fn hobbies_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec("[a-z]{1,12}".prop_map(Value::from), 0..6)
}

/// Scalars that are never numeric strings
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9f64..1.0e9).prop_map(Value::Float),
        "[a-z ]{0,20}".prop_map(Value::String),
    ]
}

/// Values no string parameter accepts, even when coercive
pub fn non_string_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        prop::collection::vec(any::<i64>().prop_map(Value::Int), 0..4).prop_map(Value::List),
    ]
}
