use super::{
    constants::*,
    varint::{write_uvarint, zigzag},
};
use crate::{errors::EncodeError, symbols::SymbolTable, Value};

/// An encoder that owns a reusable output buffer.
///
/// Each call to [`Encoder::encode`] clears and refills the buffer, so a
/// long-lived encoder amortises allocation across payloads.
///
/// # Example
///
/// ```
/// use lens::prelude::*;
///
/// let symbols = SymbolTable::empty();
/// let mut enc = Encoder::new(&symbols);
///
/// assert_eq!(enc.encode(&Value::Null).unwrap(), [0x00]);
/// assert_eq!(enc.encode(&Value::from(true)).unwrap(), [0x01]);
/// ```
pub struct Encoder<'s> {
    symbols: &'s SymbolTable,
    buf: Vec<u8>,
}

impl<'s> Encoder<'s> {
    /// Creates an encoder over `symbols`.
    pub fn new(symbols: &'s SymbolTable) -> Encoder<'s> {
        Encoder {
            symbols,
            buf: Vec::new(),
        }
    }

    /// Creates an encoder with a preallocated output buffer.
    pub fn with_capacity(symbols: &'s SymbolTable, cap: usize) -> Encoder<'s> {
        Encoder {
            symbols,
            buf: Vec::with_capacity(cap),
        }
    }

    /// Encodes one value, returning the bytes. The slice borrows the
    /// internal buffer and is valid until the next call.
    ///
    /// On failure the buffer contents are unspecified and the next call
    /// starts clean.
    pub fn encode(&mut self, value: &Value) -> Result<&[u8], EncodeError> {
        self.buf.clear();
        put_value(&mut self.buf, self.symbols, value)?;
        Ok(&self.buf)
    }
}

/// Encodes `value` against `symbols` into a fresh byte vector.
///
/// # Example
///
/// ```
/// use lens::prelude::*;
///
/// let out = encode(&Value::from(-1), &SymbolTable::empty()).unwrap();
/// assert_eq!(out, vec![0x03, 0x01]);
/// ```
pub fn encode(value: &Value, symbols: &SymbolTable) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    put_value(&mut out, symbols, value)?;
    Ok(out)
}

/// Encodes `value` against `symbols`, appending to `out`.
///
/// On failure `out` may hold a partial encoding; callers should discard it.
pub fn encode_into(
    value: &Value,
    symbols: &SymbolTable,
    out: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    put_value(out, symbols, value)
}

/// One depth-first step: a tag byte, its payload, and recursion into
/// container elements. Dispatch order mirrors the wire grammar.
fn put_value(out: &mut Vec<u8>, symbols: &SymbolTable, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Null => out.push(TAG_NULL),
        Value::Bool(true) => out.push(TAG_TRUE),
        Value::Bool(false) => out.push(TAG_FALSE),
        Value::Int(i) => {
            out.push(TAG_INT);
            write_uvarint(out, zigzag(*i));
        }
        Value::Float(f) => {
            out.push(TAG_FLOAT);
            out.extend_from_slice(&f.to_bits().to_be_bytes());
        }
        // a string the table knows travels as a reference
        Value::Str(s) => match symbols.lookup(s) {
            Some(index) => put_symref(out, index),
            None => {
                out.push(TAG_STR);
                write_uvarint(out, s.len() as u64);
                out.extend_from_slice(s.as_bytes());
            }
        },
        Value::Time(t) => {
            out.push(TAG_TIME);
            write_uvarint(out, zigzag(t.timestamp_millis()));
        }
        Value::List(items) => put_seq(out, symbols, TAG_ARR, items)?,
        Value::Tuple(items) => put_seq(out, symbols, TAG_TUPLE, items)?,
        Value::Set(set) => {
            out.push(TAG_SET);
            write_uvarint(out, set.len() as u64);
            for v in set.iter() {
                put_value(out, symbols, v)?;
            }
        }
        Value::Map(map) => {
            out.push(TAG_OBJ);
            write_uvarint(out, map.len() as u64);
            for (k, v) in map.iter() {
                put_key(out, symbols, k)?;
                put_value(out, symbols, v)?;
            }
        }
        Value::Bytes(b) => {
            out.push(TAG_BYTES);
            write_uvarint(out, b.len() as u64);
            out.extend_from_slice(b);
        }
        Value::Ext(e) => {
            out.push(TAG_EXT);
            write_uvarint(out, e.id);
            write_uvarint(out, e.data.len() as u64);
            out.extend_from_slice(&e.data);
        }
    }
    Ok(())
}

fn put_seq(
    out: &mut Vec<u8>,
    symbols: &SymbolTable,
    tag: u8,
    items: &[Value],
) -> Result<(), EncodeError> {
    out.push(tag);
    write_uvarint(out, items.len() as u64);
    for v in items {
        put_value(out, symbols, v)?;
    }
    Ok(())
}

/// Map keys have no inline fallback: a key outside the table is an error.
fn put_key(out: &mut Vec<u8>, symbols: &SymbolTable, key: &str) -> Result<(), EncodeError> {
    match symbols.lookup(key) {
        Some(index) => {
            put_symref(out, index);
            Ok(())
        }
        None => Err(EncodeError::UnknownSymbol(key.to_string())),
    }
}

fn put_symref(out: &mut Vec<u8>, index: u64) {
    out.push(TAG_SYMREF);
    write_uvarint(out, index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vecmap::VecMap;

    #[test]
    fn scalar_tags() {
        let symbols = SymbolTable::empty();

        assert_eq!(encode(&Value::Null, &symbols).unwrap(), [TAG_NULL]);
        assert_eq!(encode(&Value::from(true), &symbols).unwrap(), [TAG_TRUE]);
        assert_eq!(encode(&Value::from(false), &symbols).unwrap(), [TAG_FALSE]);
    }

    #[test]
    fn symbol_compaction_is_length_independent() {
        let symbols = SymbolTable::new(vec!["an_unreasonably_long_symbol_name"]);
        let m = Value::from(VecMap::from(vec![(
            "an_unreasonably_long_symbol_name".to_string(),
            Value::Null,
        )]));

        // OBJ, count, SYMREF, index, NULL
        assert_eq!(encode(&m, &symbols).unwrap().len(), 5);
    }

    #[test]
    fn unknown_map_key_fails() {
        let symbols = SymbolTable::new(vec!["known"]);
        let m = Value::from(VecMap::from(vec![("unknown".to_string(), Value::Null)]));

        assert_eq!(
            encode(&m, &symbols),
            Err(EncodeError::UnknownSymbol("unknown".to_string()))
        );
    }

    #[test]
    fn plain_string_survives_without_table() {
        let symbols = SymbolTable::empty();
        let out = encode(&Value::from("x"), &symbols).unwrap();
        assert_eq!(out, vec![TAG_STR, 0x01, b'x']);
    }

    #[test]
    fn encoder_reuses_its_buffer() {
        let symbols = SymbolTable::empty();
        let mut enc = Encoder::with_capacity(&symbols, 64);

        assert_eq!(enc.encode(&Value::from(300)).unwrap(), [0x03, 0xd8, 0x04]);
        assert_eq!(enc.encode(&Value::Null).unwrap(), [0x00]);
    }
}
