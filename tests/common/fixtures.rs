//! Capturable types shared by the integration tests

use capture_core::{
    Arguments, Capturable, ConstructError, ConstructResult, FieldDescriptor, FieldType, Mapping,
    Object, Record, TypeDescriptor, TypeRegistry, Value,
};
use serde_json::json;
use std::sync::Arc;

pub const NOT_CAPTURABLE: &str = "fixtures::NotCapturable";
pub const PROPERTY_TYPE_NOT_SPECIFIED: &str = "fixtures::PropertyTypeNotSpecified";
pub const UNION_CAPTURABLE: &str = "fixtures::UnionCapturable";
pub const INTERSECTION_CAPTURABLE: &str = "fixtures::IntersectionCapturable";
pub const NODE: &str = "fixtures::Node";

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub country: String,
    pub city: String,
    pub street: String,
}

impl Capturable for Address {
    fn type_identifier() -> &'static str {
        "fixtures::Address"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("country", FieldType::STRING).capturable(),
            FieldDescriptor::new("city", FieldType::STRING).capturable(),
            FieldDescriptor::new("street", FieldType::STRING).capturable(),
        ]
    }

    fn construct(args: &mut Arguments) -> ConstructResult<Self> {
        Ok(Self {
            country: args.string()?,
            city: args.string()?,
            street: args.string()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct People {
    pub name: String,
    pub age: i64,
    pub height: Option<f64>,
    pub is_male: bool,
    pub hobbies: Vec<Value>,
    pub address: Address,
    /// Never read from the source
    pub nickname: Option<String>,
}

impl Capturable for People {
    fn type_identifier() -> &'static str {
        "fixtures::People"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", FieldType::STRING).capturable(),
            FieldDescriptor::new("age", FieldType::INT).capturable(),
            FieldDescriptor::new("height", FieldType::FLOAT).capturable(),
            FieldDescriptor::new("nickname", FieldType::STRING),
            FieldDescriptor::new("is_male", FieldType::BOOL).capturable(),
            FieldDescriptor::new("hobbies", FieldType::ARRAY).capturable(),
            FieldDescriptor::new("address", FieldType::nested::<Address>()).capturable(),
        ]
    }

    fn construct(args: &mut Arguments) -> ConstructResult<Self> {
        Ok(Self {
            name: args.string()?,
            age: args.int()?,
            height: args.optional_float()?,
            is_male: args.bool()?,
            hobbies: args.list()?,
            address: args.instance()?,
            nickname: None,
        })
    }
}

/// Rejects its own arguments when they are out of range
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub age: i64,
}

impl Capturable for Member {
    fn type_identifier() -> &'static str {
        "fixtures::Member"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", FieldType::STRING).capturable(),
            FieldDescriptor::new("age", FieldType::INT).capturable(),
        ]
    }

    fn construct(args: &mut Arguments) -> ConstructResult<Self> {
        let name = args.string()?;
        let age = args.int()?;
        if age < 0 {
            return Err(ConstructError::Invalid(format!(
                "Age must not be negative, {age} given"
            )));
        }
        Ok(Self { name, age })
    }
}

/// Singly linked capturable type, nested in itself
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: String,
    pub next: Box<Node>,
}

/// Register every fixture into the registry
pub fn register_fixtures(registry: &TypeRegistry) {
    registry.register::<Address>().expect("address should register");
    registry.register::<People>().expect("people should register");
    registry.register::<Member>().expect("member should register");

    registry
        .register_descriptor(
            TypeDescriptor::new(NOT_CAPTURABLE)
                .field(FieldDescriptor::new("name", FieldType::STRING).capturable()),
        )
        .expect("not capturable type should register");

    registry
        .register_descriptor(
            TypeDescriptor::new(PROPERTY_TYPE_NOT_SPECIFIED)
                .capturable()
                .field(FieldDescriptor::untyped("property").capturable())
                .constructor(|args| Ok(Object::new(PROPERTY_TYPE_NOT_SPECIFIED, args.value()?))),
        )
        .expect("untyped fixture should register");

    registry
        .register_descriptor(
            TypeDescriptor::new(UNION_CAPTURABLE)
                .capturable()
                .field(
                    FieldDescriptor::new(
                        "either",
                        FieldType::Union(vec![FieldType::STRING, FieldType::INT]),
                    )
                    .capturable(),
                )
                .constructor(|args| Ok(Object::new(UNION_CAPTURABLE, args.value()?))),
        )
        .expect("union fixture should register");

    registry
        .register_descriptor(
            TypeDescriptor::new(INTERSECTION_CAPTURABLE)
                .capturable()
                .field(
                    FieldDescriptor::new(
                        "both",
                        FieldType::Intersection(vec![
                            FieldType::named("app::Countable"),
                            FieldType::named("app::Iterator"),
                        ]),
                    )
                    .capturable(),
                )
                .constructor(|args| Ok(Object::new(INTERSECTION_CAPTURABLE, args.value()?))),
        )
        .expect("intersection fixture should register");

    registry
        .register_descriptor(
            TypeDescriptor::new(NODE)
                .capturable()
                .field(FieldDescriptor::new("label", FieldType::STRING).capturable())
                .field(FieldDescriptor::new("next", FieldType::named(NODE)).capturable())
                .constructor(|args| {
                    let label = args.string()?;
                    let next = args.instance::<Node>()?;
                    Ok(Object::new(
                        NODE,
                        Node {
                            label,
                            next: Box::new(next),
                        },
                    ))
                }),
        )
        .expect("node fixture should register");
}

/// A fresh registry holding every fixture
pub fn fixture_registry() -> Arc<TypeRegistry> {
    let registry = TypeRegistry::new();
    register_fixtures(&registry);
    Arc::new(registry)
}

/// Register the fixtures into the process-wide registry
pub fn register_global_fixtures() {
    register_fixtures(TypeRegistry::global());
}

pub fn mapping(json: serde_json::Value) -> Mapping {
    match Value::from(json) {
        Value::Mapping(map) => map,
        other => panic!("expected a JSON object, got {other:?}"),
    }
}

pub fn address_source() -> Mapping {
    mapping(json!({
        "country": "Japan",
        "city": "Tokyo",
        "street": "Shibuya 1-2-3",
    }))
}

/// Keys out of declaration order
pub fn people_source() -> Mapping {
    mapping(json!({
        "address": {
            "street": "Shibuya 1-2-3",
            "city": "Tokyo",
            "country": "Japan",
        },
        "hobbies": ["programming", "reading"],
        "is_male": true,
        "height": 1.75,
        "age": 20,
        "name": "Taro",
    }))
}

pub fn people_record() -> Record {
    let address = Record::new()
        .with("country", "Japan")
        .with("city", "Tokyo")
        .with("street", "Shibuya 1-2-3");

    Record::new()
        .with("name", "Taro")
        .with("age", 20)
        .with("height", 1.75)
        .with("is_male", true)
        .with(
            "hobbies",
            vec![Value::from("programming"), Value::from("reading")],
        )
        .with("address", address)
}

pub fn expected_people() -> People {
    People {
        name: "Taro".to_string(),
        age: 20,
        height: Some(1.75),
        is_male: true,
        hobbies: vec![Value::from("programming"), Value::from("reading")],
        address: Address {
            country: "Japan".to_string(),
            city: "Tokyo".to_string(),
            street: "Shibuya 1-2-3".to_string(),
        },
        nickname: None,
    }
}
