//! Argument and field type descriptors

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::instruction::ArgSpec;

/// The type of an instruction argument or account field.
///
/// Serializes to the schema document's JSON shape: primitives as bare
/// strings (`"string"`, `"u64"`, `"publicKey"`), compound types as
/// single-key objects (`{"option": ...}`, `{"vector": ...}`,
/// `{"variants": [...]}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// UTF-8 text
    String,
    /// Unsigned 64-bit integer
    U64,
    /// 32-byte account address
    PublicKey,
    /// Nullable value of the inner type
    Option(Box<TypeDescriptor>),
    /// Ordered sequence of the inner type
    Vector(Box<TypeDescriptor>),
    /// Tagged union; exactly one variant is active per value
    Enum(Vec<EnumVariant>),
}

/// One variant of an enum type, with its associated fields (empty for
/// unit variants).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ArgSpec>,
}

impl TypeDescriptor {
    /// Human-readable name, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TypeDescriptor::String => "string",
            TypeDescriptor::U64 => "u64",
            TypeDescriptor::PublicKey => "publicKey",
            TypeDescriptor::Option(_) => "option",
            TypeDescriptor::Vector(_) => "vector",
            TypeDescriptor::Enum(_) => "enum",
        }
    }

    fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        match value {
            serde_json::Value::String(s) => match s.as_str() {
                "string" => Ok(TypeDescriptor::String),
                "u64" => Ok(TypeDescriptor::U64),
                "publicKey" => Ok(TypeDescriptor::PublicKey),
                other => Err(format!("unknown type name `{}`", other)),
            },
            serde_json::Value::Object(map) => {
                if let Some(inner) = map.get("option") {
                    return Ok(TypeDescriptor::Option(Box::new(Self::from_json(inner)?)));
                }
                if let Some(inner) = map.get("vector") {
                    return Ok(TypeDescriptor::Vector(Box::new(Self::from_json(inner)?)));
                }
                if let Some(variants) = map.get("variants") {
                    let variants: Vec<EnumVariant> =
                        serde_json::from_value(variants.clone()).map_err(|e| e.to_string())?;
                    return Ok(TypeDescriptor::Enum(variants));
                }
                Err("expected `option`, `vector` or `variants` key".to_string())
            }
            _ => Err("expected a type name or a type object".to_string()),
        }
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypeDescriptor::String => serializer.serialize_str("string"),
            TypeDescriptor::U64 => serializer.serialize_str("u64"),
            TypeDescriptor::PublicKey => serializer.serialize_str("publicKey"),
            TypeDescriptor::Option(inner) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("option", inner)?;
                map.end()
            }
            TypeDescriptor::Vector(inner) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("vector", inner)?;
                map.end()
            }
            TypeDescriptor::Enum(variants) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("variants", variants)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(D::Error::custom)
    }
}
