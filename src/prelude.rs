pub use crate::{
    encoding::{decode, encode, encode_into, Decoder, Encoder},
    errors::{DecodeError, EncodeError},
    float::Float,
    symbols::SymbolTable,
    vecmap::{VecMap, VecSet},
    Bytes, Ext, Value,
};
pub use chrono::{DateTime, TimeZone, Utc};
pub use std::convert::TryFrom;
