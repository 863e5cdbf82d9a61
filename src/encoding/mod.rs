//! # Lens binary encoder and decoder
//!
//! One value is written as a tag byte followed by its payload; containers
//! carry an element count and nest arbitrarily. Strings found in the
//! shared [`SymbolTable`] travel as small integer references, and map keys
//! must. Integers ride a ZigZag varint, floats are 8 bytes big-endian,
//! timestamps are ZigZag epoch-milliseconds.
//!
//! # Example
//!
//! ```
//! use lens::prelude::*;
//!
//! let symbols = SymbolTable::new(vec!["id", "name"]);
//!
//! let record = Value::from(VecMap::from(vec![
//!     ("id".to_string(), Value::from(7)),
//!     ("name".to_string(), Value::from("x")),
//! ]));
//!
//! // encode into a fresh vector
//! let full = encode(&record, &symbols).unwrap();
//!
//! // or append to a caller-owned buffer
//! let out = &mut Vec::new();
//! encode_into(&record, &symbols, out).unwrap();
//! assert_eq!(*out, full);
//!
//! // Note: decoding returns a `Result`
//! let dec = decode(&Bytes::from(full), &symbols).unwrap();
//! assert_eq!(dec, record);
//! ```

use crate::{
    errors::DecodeError,
    symbols::SymbolTable,
    Bytes, Value,
};

mod constants;
mod frame;
mod varint;

/// The iterative decoder.
pub mod de;
/// The depth-first encoder.
pub mod ser;

pub use de::{Decoder, ExtHook, TsHook, DEFAULT_DEPTH_LIMIT};
pub use ser::{encode, encode_into, Encoder};

/// Decodes one value from the start of `data` with default options.
///
/// Trailing bytes after the first complete value are ignored; use
/// [`Decoder::strict`] to reject them.
///
/// # Example
///
/// ```
/// use lens::prelude::*;
///
/// let wire = Bytes::from(encode(&Value::Null, &SymbolTable::empty()).unwrap());
///
/// let dec = match decode(&wire, &SymbolTable::empty()) {
///     Ok(value) => value,
///     Err(_e) => panic!("Oh no. Whatever will I do?"),
/// };
///
/// assert_eq!(dec, Value::Null);
/// ```
pub fn decode(data: &Bytes, symbols: &SymbolTable) -> Result<Value, DecodeError> {
    Decoder::new(symbols).decode(data)
}
