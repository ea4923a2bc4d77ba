use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug};

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Null,
    #[serde(serialize_with = "i128_serializer")]
    Integer(i128),
    Float(f64),
    String(String),
    Array(Box<Vec<Value>>),
    Object(IndexMap<String, Value>),
    #[serde(serialize_with = "hex_serializer")]
    Buffer(Vec<u8>),
    /// A value whose content is not determined yet, carrying the type it will have.
    Unknown(Type),
    #[serde(serialize_with = "provider_serializer")]
    #[serde(untagged)]
    Provider(ProviderData),
}

impl PartialEq<Value> for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            (Value::Null, Value::Null) => true,
            (Value::Integer(lhs), Value::Integer(rhs)) => lhs == rhs,
            (Value::Float(lhs), Value::Float(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            (Value::Buffer(lhs), Value::Buffer(rhs)) => lhs == rhs,
            (Value::Unknown(lhs), Value::Unknown(rhs)) => lhs == rhs,
            (Value::Object(lhs), Value::Object(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }
                for (k, v) in lhs.iter() {
                    match rhs.get(k) {
                        Some(r) if v == r => {}
                        _ => return false,
                    }
                }
                true
            }
            (Value::Array(lhs), Value::Array(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs.iter()).all(|(l, r)| l == r)
            }
            (Value::Provider(lhs), Value::Provider(rhs)) => {
                lhs.id == rhs.id && lhs.bytes == rhs.bytes
            }
            _ => false,
        }
    }
}

fn i128_serializer<S>(value: &i128, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    ser.serialize_str(&value.to_string())
}

fn hex_serializer<S>(bytes: &Vec<u8>, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = format!("0x{}", hex::encode(&bytes));
    ser.serialize_str(&value)
}

fn provider_serializer<S>(provider_data: &ProviderData, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = ser.serialize_map(Some(2))?;
    map.serialize_entry("type", &provider_data.id)?;
    let value = format!("0x{}", hex::encode(&provider_data.bytes));
    map.serialize_entry("value", &value)?;
    map.end()
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        fn decode_hex_string(value: String) -> Result<Vec<u8>, String> {
            let value = value.replace("0x", "");
            hex::decode(&value)
                .map_err(|e| format!("failed to decode hex string ({}) to bytes: {}", value, e))
        }

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid Value")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut typing: Option<String> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "type" => {
                            if typing.is_some() {
                                return Err(de::Error::duplicate_field("type"));
                            }
                            let the_typing = map.next_value::<String>()?;
                            if the_typing.eq("null") {
                                return Ok(Value::null());
                            }
                            typing = Some(the_typing);
                        }
                        "value" => {
                            let typing = typing.ok_or_else(|| de::Error::missing_field("type"))?;
                            return match typing.as_str() {
                                "bool" => Ok(Value::bool(map.next_value()?)),
                                "integer" => {
                                    let value: String = map.next_value()?;
                                    let i128 = value.parse().map_err(de::Error::custom)?;
                                    Ok(Value::integer(i128))
                                }
                                "float" => Ok(Value::float(map.next_value()?)),
                                "string" => Ok(Value::string(map.next_value()?)),
                                "buffer" => {
                                    let bytes =
                                        decode_hex_string(map.next_value()?).map_err(|e| {
                                            de::Error::custom(format!(
                                                "failed to deserialize buffer: {e}"
                                            ))
                                        })?;
                                    Ok(Value::buffer(bytes))
                                }
                                "object" => Ok(Value::object(map.next_value()?)),
                                "array" => Ok(Value::array(map.next_value()?)),
                                "unknown" => Ok(Value::unknown(map.next_value()?)),
                                other => {
                                    if other.contains("::") {
                                        let bytes =
                                            decode_hex_string(map.next_value()?).map_err(|e| {
                                                de::Error::custom(format!(
                                                    "failed to deserialize provider data: {e}"
                                                ))
                                            })?;
                                        Ok(Value::provider(bytes, other))
                                    } else {
                                        Err(de::Error::custom(format!("invalid type {other}")))
                                    }
                                }
                            };
                        }
                        unexpected => {
                            return Err(de::Error::custom(format!(
                                "invalid Value: unexpected key {unexpected}"
                            )));
                        }
                    }
                }

                Err(de::Error::custom("invalid Value: missing required key value"))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Value {
    pub fn string(value: String) -> Value {
        Value::String(value)
    }
    pub fn integer(value: i128) -> Value {
        Value::Integer(value)
    }
    pub fn float(value: f64) -> Value {
        Value::Float(value)
    }
    pub fn null() -> Value {
        Value::Null
    }
    pub fn bool(value: bool) -> Value {
        Value::Bool(value)
    }
    pub fn buffer(bytes: Vec<u8>) -> Value {
        Value::Buffer(bytes)
    }
    pub fn array(array: Vec<Value>) -> Value {
        Value::Array(Box::new(array))
    }
    pub fn object(object: IndexMap<String, Value>) -> Value {
        Value::Object(object)
    }
    pub fn unknown(typing: Type) -> Value {
        Value::Unknown(typing)
    }
    pub fn provider(bytes: Vec<u8>, id: &str) -> Value {
        Value::Provider(ProviderData { bytes, id: id.to_string() })
    }

    pub fn as_string(&self) -> Option<&str> {
        match &self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
    pub fn as_integer(&self) -> Option<i128> {
        match &self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }
    pub fn as_float(&self) -> Option<f64> {
        match &self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match &self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }
    pub fn as_buffer_data(&self) -> Option<&Vec<u8>> {
        match &self {
            Value::Buffer(value) => Some(&value),
            _ => None,
        }
    }
    pub fn as_provider_data(&self) -> Option<&ProviderData> {
        match &self {
            Value::Provider(value) => Some(&value),
            _ => None,
        }
    }
    pub fn as_array(&self) -> Option<&Box<Vec<Value>>> {
        match &self {
            Value::Array(value) => Some(value),
            _ => None,
        }
    }
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match &self {
            Value::Object(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True when the value itself is an unknown placeholder. Nested unknowns
    /// are only caught by [Value::is_wholly_known].
    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown(_))
    }

    /// True when no unknown placeholder appears anywhere in the value.
    pub fn is_wholly_known(&self) -> bool {
        match self {
            Value::Unknown(_) => false,
            Value::Array(values) => values.iter().all(|v| v.is_wholly_known()),
            Value::Object(values) => values.values().all(|v| v.is_wholly_known()),
            Value::Bool(_)
            | Value::Null
            | Value::Integer(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Buffer(_)
            | Value::Provider(_) => true,
        }
    }

    pub fn get_type(&self) -> Type {
        match self {
            Value::Bool(_) => Type::Bool,
            Value::Null => Type::Null,
            Value::Integer(_) => Type::Integer,
            Value::Float(_) => Type::Float,
            Value::String(_) => Type::String,
            Value::Buffer(_) => Type::Buffer,
            Value::Object(_) => Type::Object(ObjectDefinition::arbitrary()),
            Value::Array(t) => Type::Array(Box::new(t.first().map_or(Type::Dynamic, |v| v.get_type()))),
            Value::Unknown(t) => t.clone(),
            Value::Provider(t) => Type::Provider(t.id.clone()),
        }
    }
}

impl Value {
    /// Human facing rendering. Lossy: use a dedicated rendering when values
    /// must be told apart.
    pub fn to_string(&self) -> String {
        match self {
            Value::String(val) => val.clone(),
            Value::Bool(val) => val.to_string(),
            Value::Integer(val) => val.to_string(),
            Value::Float(val) => val.to_string(),
            Value::Null => "null".to_string(),
            Value::Buffer(bytes) => {
                format!("0x{}", hex::encode(&bytes))
            }
            Value::Object(obj) => {
                let entries = obj
                    .iter()
                    .map(|(k, v)| format!(r#""{}": {}"#, k, v.to_string()))
                    .collect::<Vec<_>>();
                format!("{{{}}}", entries.join(", "))
            }
            Value::Array(array) => {
                format!("[{}]", array.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", "))
            }
            Value::Unknown(typing) => format!("(known after call: {})", typing.to_string()),
            Value::Provider(provider_value) => provider_value.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ObjectType {
    map: IndexMap<String, Value>,
}
impl ObjectType {
    pub fn new() -> Self {
        ObjectType { map: IndexMap::new() }
    }

    pub fn from<S: ToString, T: IntoIterator<Item = (S, Value)>>(default: T) -> Self {
        let mut map = IndexMap::new();
        for (key, value) in default {
            map.insert(key.to_string(), value);
        }
        ObjectType { map }
    }

    pub fn insert(&mut self, key: &str, value: Value) -> &mut Self {
        self.map.insert(key.to_string(), value);
        self
    }

    pub fn to_value(&self) -> Value {
        Value::object(self.map.clone())
    }
}

/// Opaque value minted by a provider, tagged with a `namespace::type` id.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderData {
    pub bytes: Vec<u8>,
    pub id: String,
}
impl ProviderData {
    pub fn to_string(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }
}

impl fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProviderData")
            .field("bytes", &self.to_string())
            .field("id", &self.id)
            .finish()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    Bool,
    Null,
    Integer,
    Float,
    String,
    Buffer,
    Object(ObjectDefinition),
    Provider(String),
    Array(Box<Type>),
    Map(ObjectDefinition),
    /// Not resolved yet: any value, including a `null` literal, conforms.
    Dynamic,
}

impl Type {
    pub fn string() -> Type {
        Type::String
    }
    pub fn integer() -> Type {
        Type::Integer
    }
    pub fn float() -> Type {
        Type::Float
    }
    pub fn null() -> Type {
        Type::Null
    }
    pub fn bool() -> Type {
        Type::Bool
    }
    pub fn dynamic() -> Type {
        Type::Dynamic
    }
    pub fn object(def: ObjectDefinition) -> Type {
        Type::Object(def)
    }
    pub fn strict_object(props: Vec<ObjectProperty>) -> Type {
        Type::Object(ObjectDefinition::strict(props))
    }
    pub fn arbitrary_object() -> Type {
        Type::Object(ObjectDefinition::arbitrary())
    }
    pub fn map(def: ObjectDefinition) -> Type {
        Type::Map(def)
    }
    pub fn arbitrary_map() -> Type {
        Type::Map(ObjectDefinition::arbitrary())
    }
    pub fn buffer() -> Type {
        Type::Buffer
    }
    pub fn provider(id: &str) -> Type {
        Type::Provider(id.to_string())
    }
    pub fn array(array_item_type: Type) -> Type {
        Type::Array(Box::new(array_item_type))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }

    pub fn as_object(&self) -> Option<&ObjectDefinition> {
        match self {
            Type::Object(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Box<Type>> {
        match self {
            Type::Array(typing) => Some(typing),
            _ => None,
        }
    }
}

impl Type {
    pub fn to_string(&self) -> String {
        match self {
            Type::Bool => "bool".into(),
            Type::Null => "null".into(),
            Type::Integer => "integer".into(),
            Type::Float => "float".into(),
            Type::String => "string".into(),
            Type::Buffer => "buffer".into(),
            Type::Object(_) => "object".into(),
            Type::Provider(provider) => format!("provider({})", provider),
            Type::Array(typing) => format!("array[{}]", typing.to_string()),
            Type::Map(_) => "map".into(),
            Type::Dynamic => "dynamic".into(),
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Type::Dynamic
    }
}

impl TryFrom<String> for Type {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let val = match value.as_str() {
            "string" => Type::String,
            "integer" => Type::Integer,
            "float" => Type::Float,
            "bool" => Type::Bool,
            "null" => Type::Null,
            "buffer" => Type::Buffer,
            "dynamic" => Type::Dynamic,
            "object" => Type::Object(ObjectDefinition::arbitrary()),
            "map" => Type::Map(ObjectDefinition::arbitrary()),
            other => {
                if let Some(inner) =
                    other.strip_prefix("array[").and_then(|rest| rest.strip_suffix("]"))
                {
                    Type::array(Type::try_from(inner.to_string())?)
                } else if let Some(inner) =
                    other.strip_prefix("provider(").and_then(|rest| rest.strip_suffix(")"))
                {
                    Type::provider(inner)
                } else {
                    return Err(format!("invalid type: {}", other));
                }
            }
        };
        Ok(val)
    }
}

impl Serialize for Type {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D>(deserializer: D) -> Result<Type, D::Error>
    where
        D: Deserializer<'de>,
    {
        let type_str: String = serde::Deserialize::deserialize(deserializer)?;
        let t = Type::try_from(type_str).map_err(serde::de::Error::custom)?;
        Ok(t)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ObjectDefinition {
    /// Strict object definition with a list of properties
    Strict(Vec<ObjectProperty>),
    /// Arbitrary object definition with no specific properties
    /// The optional list of object properties is used for documenting
    /// Some of the potential properties.
    Arbitrary(Option<Vec<ObjectProperty>>),
}

impl ObjectDefinition {
    pub fn strict(props: Vec<ObjectProperty>) -> Self {
        ObjectDefinition::Strict(props)
    }

    pub fn arbitrary() -> Self {
        ObjectDefinition::Arbitrary(None)
    }

    pub fn documented_arbitrary(props: Vec<ObjectProperty>) -> Self {
        ObjectDefinition::Arbitrary(Some(props))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectProperty {
    pub name: String,
    pub documentation: String,
    pub typing: Type,
    pub optional: bool,
}

impl ObjectProperty {
    pub fn new(name: &str, typing: Type) -> Self {
        ObjectProperty { name: name.to_string(), documentation: String::new(), typing, optional: false }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
