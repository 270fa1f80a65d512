//! Argument validation and encoding
//!
//! Turns a `name -> value` mapping into the ordered argument list an
//! instruction expects on the wire. Values arrive as JSON (the shape the
//! application layer and schema documents already speak: base58 strings for
//! public keys, `{"kind": ...}` objects for enum values) and leave as
//! Borsh-style bytes: u32-LE length-prefixed strings, little-endian u64,
//! raw 32-byte keys, a one-byte presence tag for options, a u32-LE count
//! for vectors and a one-byte variant index for enums.
//!
//! Declared argument order is part of the wire contract with the remote
//! program; it is preserved exactly, never reordered or deduplicated. On
//! any failure no partial output is produced.

#[cfg(test)]
mod tests;

use serde_json::{Map, Value};

use crate::errors::EncodingError;
use crate::schema::{InstructionSpec, TypeDescriptor};

/// One encoded argument: its name, declared type and wire bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedArg {
    pub name: String,
    pub ty: TypeDescriptor,
    pub data: Vec<u8>,
}

/// Validate `values` against the instruction's argument specs and encode
/// them in declared order.
pub fn encode_args(
    spec: &InstructionSpec,
    values: &Map<String, Value>,
) -> Result<Vec<EncodedArg>, EncodingError> {
    let mut encoded = Vec::with_capacity(spec.args.len());
    for arg in &spec.args {
        let mut data = Vec::new();
        encode_value(&arg.name, &arg.ty, values.get(&arg.name), &mut data)?;
        encoded.push(EncodedArg {
            name: arg.name.clone(),
            ty: arg.ty.clone(),
            data,
        });
    }
    Ok(encoded)
}

fn encode_value(
    path: &str,
    ty: &TypeDescriptor,
    value: Option<&Value>,
    out: &mut Vec<u8>,
) -> Result<(), EncodingError> {
    // Option is the only type for which absence is legal.
    if let TypeDescriptor::Option(inner) = ty {
        return match value {
            None | Some(Value::Null) => {
                out.push(0);
                Ok(())
            }
            Some(_) => {
                out.push(1);
                encode_value(path, inner, value, out)
            }
        };
    }

    let value = match value {
        None | Some(Value::Null) => return Err(EncodingError::MissingArgument(path.to_string())),
        Some(v) => v,
    };

    match ty {
        TypeDescriptor::String => {
            let s = value.as_str().ok_or_else(|| EncodingError::TypeMismatch {
                arg: path.to_string(),
                expected: "string",
            })?;
            out.extend_from_slice(&(s.len() as u32).to_le_bytes());
            out.extend_from_slice(s.as_bytes());
        }
        TypeDescriptor::U64 => {
            if !value.is_number() {
                return Err(EncodingError::TypeMismatch {
                    arg: path.to_string(),
                    expected: "u64",
                });
            }
            // Negative, fractional and >2^64-1 numbers all fall out here.
            let n = value
                .as_u64()
                .ok_or_else(|| EncodingError::OutOfRange(path.to_string()))?;
            out.extend_from_slice(&n.to_le_bytes());
        }
        TypeDescriptor::PublicKey => {
            let s = value.as_str().ok_or_else(|| EncodingError::TypeMismatch {
                arg: path.to_string(),
                expected: "publicKey",
            })?;
            let bytes = bs58::decode(s)
                .into_vec()
                .map_err(|_| EncodingError::InvalidKey(path.to_string()))?;
            if bytes.len() != 32 {
                return Err(EncodingError::InvalidKey(path.to_string()));
            }
            out.extend_from_slice(&bytes);
        }
        TypeDescriptor::Vector(inner) => {
            let items = value
                .as_array()
                .ok_or_else(|| EncodingError::TypeMismatch {
                    arg: path.to_string(),
                    expected: "array",
                })?;
            out.extend_from_slice(&(items.len() as u32).to_le_bytes());
            for (i, item) in items.iter().enumerate() {
                encode_value(&format!("{}[{}]", path, i), inner, Some(item), out)?;
            }
        }
        TypeDescriptor::Enum(variants) => {
            let obj = value
                .as_object()
                .ok_or_else(|| EncodingError::TypeMismatch {
                    arg: path.to_string(),
                    expected: "variant object",
                })?;
            let tag = obj
                .get("kind")
                .and_then(Value::as_str)
                .ok_or_else(|| EncodingError::InvalidVariant {
                    arg: path.to_string(),
                    variant: "<missing kind>".to_string(),
                })?;
            let (index, variant) = variants
                .iter()
                .enumerate()
                .find(|(_, v)| v.name == tag)
                .ok_or_else(|| EncodingError::InvalidVariant {
                    arg: path.to_string(),
                    variant: tag.to_string(),
                })?;
            out.push(index as u8);
            for field in &variant.fields {
                encode_value(
                    &format!("{}.{}", path, field.name),
                    &field.ty,
                    obj.get(&field.name),
                    out,
                )?;
            }
        }
        // Handled above; absence already rejected.
        TypeDescriptor::Option(_) => unreachable!("option handled before presence check"),
    }

    Ok(())
}
