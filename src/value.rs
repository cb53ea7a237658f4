//! # Loosely-Typed Values
//!
//! The dynamic value model that capture sources are made of.
//!
//! A [`Value`] is anything a source mapping or record can hold: scalars, lists,
//! nested mappings and records, already constructed instances ([`Object`]),
//! callables and opaque resource handles. Sources handed to a hydrator are
//! borrowed as a [`SourceValue`], which only admits the two addressable shapes.
//!
//! JSON documents convert directly:
//!
//! ```rust
//! use capture_core::value::{SourceValue, Value};
//! use serde_json::json;
//!
//! let value = Value::from(json!({"country": "Japan", "city": "Tokyo"}));
//! let source = SourceValue::from_value(&value).expect("objects become mappings");
//! assert_eq!(source.get("city"), Some(&Value::from("Tokyo")));
//! ```

use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered associative mapping from field name to value
pub type Mapping = IndexMap<String, Value>;

/// A loosely-typed value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Mapping(Mapping),
    Record(Record),
    Object(Object),
    Callable(Callable),
    Resource(Resource),
}

impl Value {
    /// Kind name used in type mismatch messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Mapping(_) => "mapping",
            Value::Record(_) => "record",
            Value::Object(_) => "object",
            Value::Callable(_) => "callable",
            Value::Resource(_) => "resource",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::Resource(a), Value::Resource(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Value::Record(record) => fmt::Debug::fmt(record, f),
            Value::Object(object) => fmt::Debug::fmt(object, f),
            Value::Callable(callable) => fmt::Debug::fmt(callable, f),
            Value::Resource(resource) => fmt::Debug::fmt(resource, f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Callable(callable)
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        Value::Resource(resource)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 beyond i64::MAX and real numbers
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// A generic record whose members are addressed by name
#[derive(Clone, Default, PartialEq)]
pub struct Record {
    members: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style member assignment
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.members.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<Mapping> for Record {
    fn from(members: Mapping) -> Self {
        Self { members }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Record").field(&self.members).finish()
    }
}

/// An already constructed instance of some type
///
/// Cloning an `Object` shares the instance.
#[derive(Clone)]
pub struct Object {
    type_name: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Object {
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<Arc<str>>, value: T) -> Self {
        Self {
            type_name: type_name.into(),
            inner: Arc::new(value),
        }
    }

    /// Wrap a value under its Rust type name
    pub fn from_value<T: Any + Send + Sync>(value: T) -> Self {
        Self::new(std::any::type_name::<T>(), value)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Share the instance as its concrete type
    pub fn downcast<T: Any + Send + Sync>(self) -> Result<Arc<T>, Object> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map_err(|inner| Object { type_name, inner })
    }

    /// Take the instance out, which only succeeds when nothing else shares it
    pub fn into_inner<T: Any + Send + Sync>(self) -> Result<T, Object> {
        let type_name = self.type_name.clone();
        let shared = self.downcast::<T>()?;
        Arc::try_unwrap(shared).map_err(|inner| Object { type_name, inner })
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.type_name)
    }
}

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A named callable value
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    function: Arc<CallableFn>,
}

impl Callable {
    pub fn new<F>(name: impl Into<Arc<str>>, function: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, arguments: &[Value]) -> Value {
        (self.function)(arguments)
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.function, &other.function)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name)
    }
}

/// Opaque handle to an external resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    pub id: u64,
    pub kind: String,
}

impl Resource {
    pub fn new(id: u64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// A borrowed capture source: a mapping or a generic record
#[derive(Debug, Clone, Copy)]
pub enum SourceValue<'a> {
    Mapping(&'a Mapping),
    Record(&'a Record),
}

impl<'a> SourceValue<'a> {
    /// Borrow a value as a source when it has one of the addressable shapes
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Mapping(map) => Some(SourceValue::Mapping(map)),
            Value::Record(record) => Some(SourceValue::Record(record)),
            _ => None,
        }
    }

    /// Look up a key or member by field name
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        match self {
            SourceValue::Mapping(map) => map.get(name),
            SourceValue::Record(record) => record.get(name),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SourceValue::Mapping(_) => "mapping",
            SourceValue::Record(_) => "record",
        }
    }
}

impl<'a> From<&'a Mapping> for SourceValue<'a> {
    fn from(map: &'a Mapping) -> Self {
        SourceValue::Mapping(map)
    }
}

impl<'a> From<&'a Record> for SourceValue<'a> {
    fn from(record: &'a Record) -> Self {
        SourceValue::Record(record)
    }
}
