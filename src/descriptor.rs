//! # Type and Field Descriptors
//!
//! The metadata a hydrator consumes: which types are capturable, which of their
//! fields are capturable, each field's declared type, and how to construct an
//! instance from positional arguments.
//!
//! Types become capturable by implementing [`Capturable`], or by building a
//! [`TypeDescriptor`] by hand and marking it with [`TypeDescriptor::capturable`].
//!
//! ```rust
//! use capture_core::{Arguments, Capturable, ConstructResult, FieldDescriptor, FieldType};
//!
//! struct Address {
//!     city: String,
//!     street: String,
//! }
//!
//! impl Capturable for Address {
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::new("city", FieldType::STRING).capturable(),
//!             FieldDescriptor::new("street", FieldType::STRING).capturable(),
//!         ]
//!     }
//!
//!     fn construct(args: &mut Arguments) -> ConstructResult<Self> {
//!         Ok(Self {
//!             city: args.string()?,
//!             street: args.string()?,
//!         })
//!     }
//! }
//! ```

use crate::arguments::Arguments;
use crate::constants::PrimitiveKind;
use crate::error::{ConstructError, ConstructResult};
use crate::value::Object;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Builds an instance of the described type from its capturable fields, in order
pub type Constructor = Arc<dyn Fn(&mut Arguments) -> ConstructResult<Object> + Send + Sync>;

/// Marker for types that can be captured from a mapping or record
///
/// `fields` lists every constructible field in declaration order. `construct`
/// receives exactly the capturable ones, in that order.
pub trait Capturable: Any + Send + Sync + Sized {
    /// Identifier the type is registered and resolved under
    fn type_identifier() -> &'static str {
        std::any::type_name::<Self>()
    }

    fn fields() -> Vec<FieldDescriptor>;

    fn construct(args: &mut Arguments) -> ConstructResult<Self>;
}

/// Declared type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    /// Another capturable type, by identifier
    Nested(String),
    Union(Vec<FieldType>),
    Intersection(Vec<FieldType>),
}

impl FieldType {
    pub const ARRAY: FieldType = FieldType::Primitive(PrimitiveKind::Array);
    pub const STRING: FieldType = FieldType::Primitive(PrimitiveKind::String);
    pub const INT: FieldType = FieldType::Primitive(PrimitiveKind::Int);
    pub const FLOAT: FieldType = FieldType::Primitive(PrimitiveKind::Float);
    pub const BOOL: FieldType = FieldType::Primitive(PrimitiveKind::Bool);
    pub const OBJECT: FieldType = FieldType::Primitive(PrimitiveKind::Object);
    pub const CALLABLE: FieldType = FieldType::Primitive(PrimitiveKind::Callable);
    pub const RESOURCE: FieldType = FieldType::Primitive(PrimitiveKind::Resource);

    pub fn nested<T: Capturable>() -> Self {
        FieldType::Nested(T::type_identifier().to_string())
    }

    pub fn named(type_identifier: impl Into<String>) -> Self {
        FieldType::Nested(type_identifier.into())
    }

    /// Name of the descriptor kind, reported for unsupported types
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldType::Primitive(_) => "primitive",
            FieldType::Nested(_) => "nested",
            FieldType::Union(_) => "union",
            FieldType::Intersection(_) => "intersection",
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, FieldType::Primitive(_) | FieldType::Nested(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (members, separator) = match self {
            FieldType::Primitive(kind) => return write!(f, "{kind}"),
            FieldType::Nested(identifier) => return f.write_str(identifier),
            FieldType::Union(members) => (members, "|"),
            FieldType::Intersection(members) => (members, "&"),
        };
        for (index, member) in members.iter().enumerate() {
            if index > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

/// One constructible field of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    declared_type: Option<FieldType>,
    capturable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, declared_type: FieldType) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type),
            capturable: false,
        }
    }

    /// A field declared without a type
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            capturable: false,
        }
    }

    /// Mark the field as capturable
    pub fn capturable(mut self) -> Self {
        self.capturable = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&FieldType> {
        self.declared_type.as_ref()
    }

    pub fn is_capturable(&self) -> bool {
        self.capturable
    }
}

/// Metadata handle for a registered type
#[derive(Clone)]
pub struct TypeDescriptor {
    identifier: String,
    capturable: bool,
    fields: Vec<FieldDescriptor>,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// An unmarked type with no fields
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            capturable: false,
            fields: Vec::new(),
            constructor: None,
        }
    }

    /// Descriptor for a [`Capturable`] type
    pub fn of<T: Capturable>() -> Self {
        Self::new(T::type_identifier())
            .capturable()
            .with_fields(T::fields())
            .constructor(|args| {
                let instance = T::construct(args)?;
                Ok(Object::new(T::type_identifier(), instance))
            })
    }

    /// Mark the type as capturable
    pub fn capturable(mut self) -> Self {
        self.capturable = true;
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(&mut Arguments) -> ConstructResult<Object> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_capturable(&self) -> bool {
        self.capturable
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The fields passed to the constructor, in declaration order
    pub fn capturable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.is_capturable())
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Number of positional constructor parameters
    pub fn arity(&self) -> usize {
        self.capturable_fields().count()
    }

    pub(crate) fn instantiate(&self, args: &mut Arguments) -> ConstructResult<Object> {
        let constructor = self
            .constructor
            .as_ref()
            .ok_or(ConstructError::MissingConstructor)?;
        constructor(args)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("identifier", &self.identifier)
            .field("capturable", &self.capturable)
            .field("fields", &self.fields)
            .field("constructor", &self.constructor.as_ref().map(|_| "Fn"))
            .finish()
    }
}
