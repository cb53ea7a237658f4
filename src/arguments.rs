//! # Constructor Arguments
//!
//! The positional argument list a hydrator hands to a type's constructor.
//!
//! Hydration itself never converts values: primitives pass through exactly as
//! they appeared in the source. Type compatibility is the constructor's job, and
//! constructors enforce it by taking each parameter through one of the typed
//! extractors below. Extractors honor the configured [`CoercionMode`]:
//!
//! | Extractor | Strict accepts | Coercive additionally accepts |
//! |---|---|---|
//! | `string` | string | int, float, bool (`"1"` / `""`) |
//! | `int` | int | integral float, integer-valued numeric string, bool |
//! | `float` | float, int | numeric string, bool |
//! | `bool` | bool | int, float, string (`""` and `"0"` are false) |
//!
//! Every other extractor requires the exact kind. `null` is only accepted by the
//! `optional_*` extractors.

use crate::config::CoercionMode;
use crate::error::{ConstructError, ConstructResult};
use crate::value::{Callable, Mapping, Object, Record, Resource, Value};
use std::any::Any;

/// Positional constructor arguments, consumed front to back
#[derive(Debug, Clone)]
pub struct Arguments {
    values: Vec<(String, Value)>,
    cursor: usize,
    mode: CoercionMode,
}

impl Arguments {
    pub fn new(mode: CoercionMode) -> Self {
        Self {
            values: Vec::new(),
            cursor: 0,
            mode,
        }
    }

    /// Append the argument for the named parameter
    pub fn push(&mut self, parameter: impl Into<String>, value: Value) {
        self.values.push((parameter.into(), value));
    }

    pub fn mode(&self) -> CoercionMode {
        self.mode
    }

    /// Total number of arguments supplied
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of arguments taken so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }

    /// Parameter names in positional order
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(parameter, _)| parameter.as_str())
    }

    /// Take the next argument without any type check
    pub fn value(&mut self) -> ConstructResult<Value> {
        self.next_raw().map(|(_, _, value)| value)
    }

    pub fn string(&mut self) -> ConstructResult<String> {
        self.take("string", coerce_string)
    }

    pub fn int(&mut self) -> ConstructResult<i64> {
        self.take("int", coerce_int)
    }

    pub fn float(&mut self) -> ConstructResult<f64> {
        self.take("float", coerce_float)
    }

    pub fn bool(&mut self) -> ConstructResult<bool> {
        self.take("bool", coerce_bool)
    }

    pub fn list(&mut self) -> ConstructResult<Vec<Value>> {
        self.take("list", |value, _| match value {
            Value::List(items) => Ok(items),
            other => Err(other),
        })
    }

    pub fn mapping(&mut self) -> ConstructResult<Mapping> {
        self.take("mapping", |value, _| match value {
            Value::Mapping(map) => Ok(map),
            other => Err(other),
        })
    }

    pub fn record(&mut self) -> ConstructResult<Record> {
        self.take("record", |value, _| match value {
            Value::Record(record) => Ok(record),
            other => Err(other),
        })
    }

    pub fn object(&mut self) -> ConstructResult<Object> {
        self.take("object", |value, _| match value {
            Value::Object(object) => Ok(object),
            other => Err(other),
        })
    }

    pub fn callable(&mut self) -> ConstructResult<Callable> {
        self.take("callable", |value, _| match value {
            Value::Callable(callable) => Ok(callable),
            other => Err(other),
        })
    }

    pub fn resource(&mut self) -> ConstructResult<Resource> {
        self.take("resource", |value, _| match value {
            Value::Resource(resource) => Ok(resource),
            other => Err(other),
        })
    }

    /// Take a constructed instance of `T` by value
    ///
    /// Nested capturable fields arrive as freshly built, unshared objects.
    pub fn instance<T: Any + Send + Sync>(&mut self) -> ConstructResult<T> {
        let (position, parameter, value) = self.next_raw()?;
        instance_from(position, parameter, value)
    }

    pub fn optional_string(&mut self) -> ConstructResult<Option<String>> {
        self.take_optional("?string", coerce_string)
    }

    pub fn optional_int(&mut self) -> ConstructResult<Option<i64>> {
        self.take_optional("?int", coerce_int)
    }

    pub fn optional_float(&mut self) -> ConstructResult<Option<f64>> {
        self.take_optional("?float", coerce_float)
    }

    pub fn optional_bool(&mut self) -> ConstructResult<Option<bool>> {
        self.take_optional("?bool", coerce_bool)
    }

    pub fn optional_instance<T: Any + Send + Sync>(&mut self) -> ConstructResult<Option<T>> {
        match self.next_raw()? {
            (_, _, Value::Null) => Ok(None),
            (position, parameter, value) => instance_from(position, parameter, value).map(Some),
        }
    }

    fn next_raw(&mut self) -> ConstructResult<(usize, String, Value)> {
        let given = self.values.len();
        let position = self.cursor + 1;
        let Some((parameter, value)) = self.values.get_mut(self.cursor) else {
            return Err(ConstructError::ArgumentCount {
                expected: position,
                given,
            });
        };
        let taken = (position, parameter.clone(), std::mem::take(value));
        self.cursor = position;
        Ok(taken)
    }

    fn take<T>(
        &mut self,
        expected: &str,
        convert: impl FnOnce(Value, CoercionMode) -> Result<T, Value>,
    ) -> ConstructResult<T> {
        let mode = self.mode;
        let (position, parameter, value) = self.next_raw()?;
        convert(value, mode).map_err(|rejected| ConstructError::TypeMismatch {
            parameter,
            position,
            expected: expected.to_string(),
            given: rejected.kind_name().to_string(),
        })
    }

    fn take_optional<T>(
        &mut self,
        expected: &str,
        convert: impl FnOnce(Value, CoercionMode) -> Result<T, Value>,
    ) -> ConstructResult<Option<T>> {
        self.take(expected, |value, mode| match value {
            Value::Null => Ok(None),
            other => convert(other, mode).map(Some),
        })
    }
}

fn instance_from<T: Any + Send + Sync>(
    position: usize,
    parameter: String,
    value: Value,
) -> ConstructResult<T> {
    let expected = std::any::type_name::<T>();
    let Value::Object(object) = value else {
        return Err(ConstructError::TypeMismatch {
            parameter,
            position,
            expected: expected.to_string(),
            given: value.kind_name().to_string(),
        });
    };
    if !object.is::<T>() {
        return Err(ConstructError::TypeMismatch {
            parameter,
            position,
            expected: expected.to_string(),
            given: object.type_name().to_string(),
        });
    }
    object
        .into_inner::<T>()
        .map_err(|object| ConstructError::SharedInstance {
            type_name: object.type_name().to_string(),
        })
}

fn coerce_string(value: Value, mode: CoercionMode) -> Result<String, Value> {
    match (value, mode) {
        (Value::String(s), _) => Ok(s),
        (Value::Int(i), CoercionMode::Coercive) => Ok(i.to_string()),
        (Value::Float(x), CoercionMode::Coercive) => Ok(x.to_string()),
        (Value::Bool(b), CoercionMode::Coercive) => Ok(if b { "1" } else { "" }.to_string()),
        (other, _) => Err(other),
    }
}

fn coerce_int(value: Value, mode: CoercionMode) -> Result<i64, Value> {
    match (value, mode) {
        (Value::Int(i), _) => Ok(i),
        (Value::Float(x), CoercionMode::Coercive) => integral(x).ok_or(Value::Float(x)),
        (Value::Bool(b), CoercionMode::Coercive) => Ok(i64::from(b)),
        (Value::String(s), CoercionMode::Coercive) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| parse_finite(trimmed).and_then(integral))
                .ok_or(Value::String(s))
        }
        (other, _) => Err(other),
    }
}

fn coerce_float(value: Value, mode: CoercionMode) -> Result<f64, Value> {
    match (value, mode) {
        (Value::Float(x), _) => Ok(x),
        (Value::Int(i), _) => Ok(i as f64),
        (Value::Bool(b), CoercionMode::Coercive) => Ok(if b { 1.0 } else { 0.0 }),
        (Value::String(s), CoercionMode::Coercive) => {
            parse_finite(s.trim()).ok_or(Value::String(s))
        }
        (other, _) => Err(other),
    }
}

fn coerce_bool(value: Value, mode: CoercionMode) -> Result<bool, Value> {
    match (value, mode) {
        (Value::Bool(b), _) => Ok(b),
        (Value::Int(i), CoercionMode::Coercive) => Ok(i != 0),
        (Value::Float(x), CoercionMode::Coercive) => Ok(x != 0.0),
        (Value::String(s), CoercionMode::Coercive) => Ok(!(s.is_empty() || s == "0")),
        (other, _) => Err(other),
    }
}

/// Parse a numeric string, rejecting the `inf`/`NaN` spellings Rust accepts
fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|x| x.is_finite())
}

fn integral(x: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (x.is_finite() && x.fract() == 0.0 && x >= -LIMIT && x < LIMIT).then(|| x as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(mode: CoercionMode, values: Vec<(&str, Value)>) -> Arguments {
        let mut args = Arguments::new(mode);
        for (parameter, value) in values {
            args.push(parameter, value);
        }
        args
    }

    #[test]
    fn test_coercive_scalars() {
        let mut args = args(
            CoercionMode::Coercive,
            vec![
                ("age", Value::from("20")),
                ("is_male", Value::from("1")),
                ("height", Value::from(" 1.75 ")),
                ("rank", Value::Float(3.0)),
                ("label", Value::Int(7)),
                ("flag", Value::from("0")),
            ],
        );

        assert_eq!(args.int(), Ok(20));
        assert_eq!(args.bool(), Ok(true));
        assert_eq!(args.float(), Ok(1.75));
        assert_eq!(args.int(), Ok(3));
        assert_eq!(args.string(), Ok("7".to_string()));
        assert_eq!(args.bool(), Ok(false));
        assert_eq!(args.remaining(), 0);
    }

    #[test]
    fn test_strict_mode_rejects_juggling() {
        let mut args = args(
            CoercionMode::Strict,
            vec![("age", Value::from("20")), ("height", Value::Int(180))],
        );

        assert_eq!(
            args.int(),
            Err(ConstructError::TypeMismatch {
                parameter: "age".to_string(),
                position: 1,
                expected: "int".to_string(),
                given: "string".to_string(),
            })
        );
        // int to float widening is allowed in both modes
        assert_eq!(args.float(), Ok(180.0));
    }

    #[test]
    fn test_list_where_string_expected_is_a_type_mismatch() {
        let mut args = args(
            CoercionMode::Coercive,
            vec![("name", Value::from(vec!["John"]))],
        );

        let error = args.string().expect_err("a list is not a string");
        assert_eq!(
            error.to_string(),
            "Argument #1 ($name) must be of type string, list given"
        );
    }

    #[test]
    fn test_non_numeric_strings_are_rejected() {
        let mut args = args(
            CoercionMode::Coercive,
            vec![
                ("age", Value::from("twenty")),
                ("height", Value::from("inf")),
                ("count", Value::from("2.5")),
            ],
        );

        assert!(args.int().is_err());
        assert!(args.float().is_err());
        assert!(args.int().is_err());
    }

    #[test]
    fn test_null_needs_an_optional_extractor() {
        let mut args = args(
            CoercionMode::Coercive,
            vec![("height", Value::Null), ("weight", Value::Null)],
        );

        assert_eq!(args.optional_float(), Ok(None));
        let error = args.float().expect_err("null is not a float");
        assert!(matches!(
            error,
            ConstructError::TypeMismatch { ref given, position: 2, .. } if given == "null"
        ));
    }

    #[test]
    fn test_taking_past_the_end_is_an_argument_count_error() {
        let mut args = args(CoercionMode::Coercive, vec![("name", Value::from("John"))]);
        assert_eq!(args.string(), Ok("John".to_string()));
        assert_eq!(
            args.string(),
            Err(ConstructError::ArgumentCount {
                expected: 2,
                given: 1
            })
        );
    }

    #[test]
    fn test_instance_extraction() {
        let mut args = args(
            CoercionMode::Coercive,
            vec![
                ("count", Value::Object(Object::new("app::Count", 5_u32))),
                ("other", Value::Object(Object::new("app::Count", 5_u32))),
                ("missing", Value::Null),
            ],
        );

        assert_eq!(args.instance::<u32>(), Ok(5));
        assert!(matches!(
            args.instance::<String>(),
            Err(ConstructError::TypeMismatch { ref given, .. }) if given == "app::Count"
        ));
        assert_eq!(args.optional_instance::<u32>(), Ok(None));
    }

    #[test]
    fn test_shared_instance_cannot_be_moved() {
        let object = Object::new("app::Count", 5_u32);
        let _keep = object.clone();
        let mut args = args(CoercionMode::Coercive, vec![("count", Value::Object(object))]);

        assert_eq!(
            args.instance::<u32>(),
            Err(ConstructError::SharedInstance {
                type_name: "app::Count".to_string()
            })
        );
    }

    #[test]
    fn test_parameters_keep_positional_order() {
        let args = args(
            CoercionMode::Coercive,
            vec![("b", Value::Null), ("a", Value::Null)],
        );
        assert_eq!(args.parameters().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(args.len(), 2);
        assert_eq!(args.consumed(), 0);
    }
}
