//! # Lens
//!
//! A self-describing, tag-based binary serialization codec for structured
//! in-memory values, parameterised by a caller-supplied [`SymbolTable`]
//! that compacts repeated string keys into small integer references.
//!
//! The two operations are reciprocal:
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
//! let wire = encode(&record, &symbols).unwrap();
//! let back = decode(&Bytes::from(wire), &symbols).unwrap();
//!
//! assert_eq!(back, record);
//! ```

/// Binary encoder and decoder.
pub mod encoding;
/// Encode and decode error taxonomies.
pub mod errors;
/// Bit-pattern float wrapper.
pub mod float;
/// Prelude
pub mod prelude;
/// The shared symbol table.
pub mod symbols;
/// Map and set wrappers around sorted vectors of entries.
pub mod vecmap;

pub use bytes::Bytes;
pub use chrono::{DateTime, Utc};
pub use float::Float;
pub use symbols::SymbolTable;

use std::convert::{TryFrom, TryInto};
use vecmap::*;

/// An application-defined extension: a numeric id plus an opaque payload.
///
/// The codec transports the pair verbatim; what a given `id` means is a
/// private contract between the encoding and decoding peers.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub struct Ext {
    /// Extension identifier.
    pub id: u64,
    /// Opaque payload.
    pub data: Bytes,
}

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// Lens value kinds.
pub enum Value {
    /// Null type. Equivalent to `None`.
    Null,
    /// Boolean type.
    Bool(bool),
    /// Signed 64-bit integer type.
    Int(i64),
    /// Double-precision float type, stored as its bit pattern.
    Float(Float),
    /// String type.
    Str(String),
    /// Bytestring type.
    Bytes(Bytes),
    /// An absolute instant, millisecond precision, UTC.
    Time(DateTime<Utc>),
    /// Ordered sequence type.
    List(Vec<Value>),
    /// Ordered sequence that keeps its immutable-sequence identity through
    /// a round-trip, as distinct from `List`.
    Tuple(Vec<Value>),
    /// Unordered collection without duplicates.
    Set(VecSet<Value>),
    /// Mapping from symbol-table strings to values.
    Map(VecMap<String, Value>),
    /// Application-defined extension value.
    Ext(Ext),
}

use Value::*;

impl Value {
    /// Converts a `Value` to a vector of `Value`.
    /// This will return `None` if the value is not a list.
    ///
    /// # Example
    ///
    /// ```
    /// use lens::prelude::*;
    ///
    /// let ks = Value::from(vec![1, 2, 3]);
    ///
    /// let numbers = ks.to_vec().unwrap();
    /// ```
    pub fn to_vec(&self) -> Option<&Vec<Value>> {
        match self {
            List(a) => Some(a),
            _ => None,
        }
    }

    /// Consumes a `Value`, converting it into a vector of `Value`.
    /// This will return `None` if the value is not a list.
    pub fn into_vec(self) -> Option<Vec<Value>> { self.try_into().ok() }

    /// Converts a `Value` to a tuple's elements.
    /// This will return `None` if the value is not a tuple.
    pub fn to_tuple(&self) -> Option<&Vec<Value>> {
        match self {
            Tuple(a) => Some(a),
            _ => None,
        }
    }

    /// Converts a `Value` to a `VecSet`.
    /// This will return `None` if the value is not a set.
    pub fn to_set(&self) -> Option<&VecSet<Value>> {
        match self {
            Set(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a `Value` to a `VecMap`.
    /// This will return `None` if the value is not a map.
    ///
    /// # Example
    ///
    /// ```
    /// use lens::prelude::*;
    ///
    /// let k_map = Value::from(VecMap::from(vec![("foo".to_string(), Value::from(1))]));
    ///
    /// let vmap = k_map.to_vecmap().unwrap();
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn to_vecmap(&self) -> Option<&VecMap<String, Value>> {
        match self {
            Map(vmap) => Some(vmap),
            _ => None,
        }
    }

    /// Consumes a `Value`, converting it into a `VecMap`.
    /// This will return `None` if the value is not a map.
    pub fn into_vecmap(self) -> Option<VecMap<String, Value>> { self.try_into().ok() }

    /// Consumes a `Value`, converting it into a `HashMap`.
    /// This will return `None` if the value is not a map.
    pub fn into_map(self) -> Option<hashbrown::HashMap<String, Value>> {
        Some(self.into_vecmap()?.into_hashmap())
    }

    /// Converts a bytestring literal to a `Value`.
    ///
    /// # Example
    /// ```
    /// use lens::prelude::*;
    ///
    /// let foo = Value::from_static(b"this is an example");
    /// assert!(foo.to_bytes().is_some());
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { Bytes(bytes::Bytes::from_static(bytes)) }

    /// Indicates whether a value is `Null`.
    ///
    /// # Example
    ///
    /// ```
    /// use lens::Value::Null;
    ///
    /// assert!(Null.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Tries to convert a value to a `bool`.
    /// This will return `None` if the value is not a boolean.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Tries to convert a value to an `i64`.
    /// This will return `None` if the value is not an integer.
    ///
    /// # Example
    ///
    /// ```
    /// use lens::prelude::*;
    ///
    /// let ks_num = Value::from(1);
    ///
    /// assert_eq!(ks_num.to_i64(), Some(1));
    /// ```
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Tries to convert a value to an `f64`.
    /// This will return `None` if the value is not a float.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Float(f) => Some(f.to_f64()),
            _ => None,
        }
    }

    /// Tries to convert a value to a `&str`.
    /// This will return `None` if the value is not a string.
    pub fn to_str(&self) -> Option<&str> {
        match self {
            Str(s) => Some(s),
            _ => None,
        }
    }

    /// Tries to convert a value to `Bytes`.
    /// This will return `None` if the value is not a bytestring.
    pub fn to_bytes(&self) -> Option<&bytes::Bytes> {
        match self {
            Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Tries to convert a value to an instant.
    /// This will return `None` if the value is not a timestamp.
    pub fn to_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Tries to convert a value to an extension pair.
    /// This will return `None` if the value is not an extension.
    pub fn to_ext(&self) -> Option<&Ext> {
        match self {
            Ext(e) => Some(e),
            _ => None,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { List(v.into_iter().map(T::into).collect()) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Str(s.to_string()) }
}

/// `From` impls that wrap a payload straight into the named variant.
macro_rules! value_from {
    ($($variant:tt: $from:ty),* $(,)?) => {
        $(impl From<$from> for Value {
            fn from(v: $from) -> Value { $variant(v) }
        })*
    };
}

/// The reverse direction: take the payload back out of the named variant,
/// or hand the value back untouched.
macro_rules! value_try_into {
    ($($variant:tt: $to:ty),* $(,)?) => {
        $(impl TryFrom<Value> for $to {
            type Error = Value;

            fn try_from(v: Value) -> Result<$to, Value> {
                match v {
                    $variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        })*
    };
}

/// `From` impls for types that reach `Value` through a widening hop.
macro_rules! value_from_via {
    ($mid:ty: $($from:ty),* $(,)?) => {
        $(impl From<$from> for Value {
            fn from(v: $from) -> Value { Value::from(<$mid>::from(v)) }
        })*
    };
}

value_from! {
    Bool: bool,
    Int: i64,
    Float: Float,
    Str: String,
    Bytes: Bytes,
    Time: DateTime<Utc>,
    Set: VecSet<Value>,
    Map: VecMap<String, Value>,
    Ext: Ext,
}

value_try_into! {
    Bool: bool,
    Int: i64,
    Float: Float,
    Str: String,
    Bytes: Bytes,
    List: Vec<Value>,
    Set: VecSet<Value>,
    Map: VecMap<String, Value>,
    Ext: Ext,
}

value_from_via!(i64: i8, i16, i32, u8, u16, u32);
value_from_via!(Float: f64, f32);
