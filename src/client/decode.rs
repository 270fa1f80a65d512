//! Layout-driven decoding of remote bytes
//!
//! The inverse of the argument encoder: walks a declared field list over a
//! byte buffer and rebuilds JSON values (base58 strings for public keys,
//! `{"kind": ...}` objects for enum values, `null` for absent options).

use serde_json::{Map, Value};
use solana_pubkey::Pubkey;

use crate::errors::DecodingError;
use crate::schema::{AccountLayout, InstructionSpec, TypeDescriptor};
use crate::utils::hash::{account_discriminator, instruction_discriminator};

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], String> {
        if self.pos + len > self.data.len() {
            return Err(format!(
                "unexpected end of data at byte {} (wanted {} more)",
                self.pos, len
            ));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_u8(&mut self) -> Result<u8, String> {
        Ok(self.take(1)?[0])
    }

    fn take_u32(&mut self) -> Result<u32, String> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take_u64(&mut self) -> Result<u64, String> {
        let bytes = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }
}

fn decode_value(ty: &TypeDescriptor, cursor: &mut Cursor<'_>) -> Result<Value, String> {
    match ty {
        TypeDescriptor::String => {
            let len = cursor.take_u32()? as usize;
            let bytes = cursor.take(len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| "invalid utf8 in string".to_string())?;
            Ok(Value::String(s.to_string()))
        }
        TypeDescriptor::U64 => Ok(Value::from(cursor.take_u64()?)),
        TypeDescriptor::PublicKey => {
            let bytes = cursor.take(32)?;
            let mut buf = [0u8; 32];
            buf.copy_from_slice(bytes);
            Ok(Value::String(Pubkey::new_from_array(buf).to_string()))
        }
        TypeDescriptor::Option(inner) => match cursor.take_u8()? {
            0 => Ok(Value::Null),
            1 => decode_value(inner, cursor),
            tag => Err(format!("invalid option tag {}", tag)),
        },
        TypeDescriptor::Vector(inner) => {
            let count = cursor.take_u32()? as usize;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(decode_value(inner, cursor)?);
            }
            Ok(Value::Array(items))
        }
        TypeDescriptor::Enum(variants) => {
            let index = cursor.take_u8()? as usize;
            let variant = variants
                .get(index)
                .ok_or_else(|| format!("unknown enum variant index {}", index))?;
            let mut obj = Map::new();
            obj.insert("kind".to_string(), Value::String(variant.name.clone()));
            for field in &variant.fields {
                obj.insert(field.name.clone(), decode_value(&field.ty, cursor)?);
            }
            Ok(Value::Object(obj))
        }
    }
}

fn mismatch(layout: &str, reason: String) -> DecodingError {
    DecodingError::LayoutMismatch {
        layout: layout.to_string(),
        reason,
    }
}

/// Decode raw account bytes through an account layout.
///
/// The first 8 bytes must match the layout's account discriminator. Bytes
/// after the last field are allocation padding and are ignored.
pub fn decode_account(layout: &AccountLayout, data: &[u8]) -> Result<Value, DecodingError> {
    let mut cursor = Cursor::new(data);
    let stored = cursor.take(8).map_err(|e| mismatch(&layout.name, e))?;
    if stored != account_discriminator(&layout.name) {
        return Err(mismatch(
            &layout.name,
            "account discriminator mismatch".to_string(),
        ));
    }

    let mut fields = Map::new();
    for field in &layout.fields {
        let value = decode_value(&field.ty, &mut cursor)
            .map_err(|e| mismatch(&layout.name, format!("field `{}`: {}", field.name, e)))?;
        fields.insert(field.name.clone(), value);
    }
    Ok(Value::Object(fields))
}

/// Decode an instruction data payload back into named argument values.
///
/// The inverse of request building; useful for inspecting descriptors and
/// observed transactions.
pub fn decode_instruction_data(
    spec: &InstructionSpec,
    data: &[u8],
) -> Result<Map<String, Value>, DecodingError> {
    let mut cursor = Cursor::new(data);
    let stored = cursor.take(8).map_err(|e| mismatch(&spec.name, e))?;
    if stored != instruction_discriminator(&spec.name) {
        return Err(mismatch(
            &spec.name,
            "instruction discriminator mismatch".to_string(),
        ));
    }

    let mut values = Map::new();
    for arg in &spec.args {
        let value = decode_value(&arg.ty, &mut cursor)
            .map_err(|e| mismatch(&spec.name, format!("argument `{}`: {}", arg.name, e)))?;
        values.insert(arg.name.clone(), value);
    }
    if cursor.pos != data.len() {
        return Err(mismatch(
            &spec.name,
            format!("{} trailing bytes after arguments", data.len() - cursor.pos),
        ));
    }
    Ok(values)
}
