use super::error::{SszError, SszResult};
use crate::schema::{BasicKind, TypeKind};
use crate::value::Value;

/// Encodes a `u8` into the output buffer.
pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Encodes a `u16` in little-endian order.
pub fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u32` in little-endian order.
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u64` in little-endian order.
pub fn write_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Writes a boolean flag as a single byte (`0` or `1`).
pub fn write_bool(out: &mut Vec<u8>, value: bool) {
    write_u8(out, value as u8);
}

/// Writes a scalar value checked against its descriptor kind.
pub fn write_basic(out: &mut Vec<u8>, value: &Value, kind: BasicKind) -> SszResult<()> {
    match (kind, value) {
        (BasicKind::Bool, Value::Bool(v)) => write_bool(out, *v),
        (BasicKind::U8, Value::U8(v)) => write_u8(out, *v),
        (BasicKind::U16, Value::U16(v)) => write_u16(out, *v),
        (BasicKind::U32, Value::U32(v)) => write_u32(out, *v),
        (BasicKind::U64, Value::U64(v)) => write_u64(out, *v),
        _ => {
            return Err(SszError::type_mismatch(
                TypeKind::Basic(kind),
                value.kind(),
            ))
        }
    }
    Ok(())
}

/// Decodes a scalar from a slice of exactly `kind.byte_len()` bytes.
pub fn read_basic(bytes: &[u8], kind: BasicKind) -> SszResult<Value> {
    let width = kind.byte_len();
    let tag = TypeKind::Basic(kind);
    if bytes.len() < width {
        return Err(SszError::truncated(tag, width, bytes.len()));
    }
    if bytes.len() > width {
        return Err(SszError::length_mismatch(tag, width, bytes.len()));
    }
    let value = match kind {
        BasicKind::Bool => match bytes[0] {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            byte => return Err(SszError::InvalidBoolean { byte }),
        },
        BasicKind::U8 => Value::U8(bytes[0]),
        BasicKind::U16 => Value::U16(u16::from_le_bytes([bytes[0], bytes[1]])),
        BasicKind::U32 => {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(bytes);
            Value::U32(u32::from_le_bytes(raw))
        }
        BasicKind::U64 => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            Value::U64(u64::from_le_bytes(raw))
        }
    };
    Ok(value)
}
