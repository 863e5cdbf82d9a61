use super::{
    constants::*,
    frame::{empty_container, Frame, FrameKind, FramePool},
    varint::{read_uvarint, unzigzag},
};
use crate::{errors::DecodeError, symbols::SymbolTable, Ext, Float, Value};
use bytes::Bytes;
use chrono::DateTime;
use std::str;

/// Default limit on container nesting.
pub const DEFAULT_DEPTH_LIMIT: usize = 1024;

/// Maps an extension id and payload to a caller-defined value.
pub type ExtHook = Box<dyn Fn(u64, Bytes) -> Result<Value, failure::Error> + Send + Sync>;
/// Maps epoch-milliseconds to a caller-defined value.
pub type TsHook = Box<dyn Fn(i64) -> Result<Value, failure::Error> + Send + Sync>;

/// A decoder that owns its options and frame pool.
///
/// Nesting is handled with an explicit frame stack rather than recursion,
/// so input-controlled depth cannot grow the native stack; past the
/// configured limit decoding fails instead.
///
/// # Example
///
/// ```
/// use lens::prelude::*;
///
/// let symbols = SymbolTable::new(vec!["id"]);
/// let wire = Bytes::from(vec![0x07, 0x01, 0x08, 0x00, 0x03, 0x0e]);
///
/// let v = Decoder::new(&symbols).decode(&wire).unwrap();
/// assert_eq!(
///     v.to_vecmap().unwrap().get(&"id".to_string()),
///     Some(&Value::from(7))
/// );
/// ```
pub struct Decoder<'s> {
    symbols: &'s SymbolTable,
    zero_copy: bool,
    strict: bool,
    depth_limit: usize,
    ext_hook: Option<ExtHook>,
    ts_hook: Option<TsHook>,
    pool: FramePool,
}

impl<'s> Decoder<'s> {
    /// Creates a decoder over `symbols` with default options: owned
    /// payloads, lenient trailing bytes, depth limit of
    /// [`DEFAULT_DEPTH_LIMIT`].
    pub fn new(symbols: &'s SymbolTable) -> Decoder<'s> {
        Decoder {
            symbols,
            zero_copy: false,
            strict: false,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            ext_hook: None,
            ts_hook: None,
            pool: FramePool::new(),
        }
    }

    /// When set, BYTES and EXT payloads are returned as slices sharing the
    /// input buffer instead of owned copies. The slices hold a reference
    /// on the input's storage, so the data stays alive (and immutable) for
    /// as long as any decoded value does.
    pub fn zero_copy(mut self, yes: bool) -> Decoder<'s> {
        self.zero_copy = yes;
        self
    }

    /// When set, bytes left over after the first complete value are an
    /// error. The default consumes one value and ignores the rest.
    pub fn strict(mut self, yes: bool) -> Decoder<'s> {
        self.strict = yes;
        self
    }

    /// Replaces the default nesting limit.
    pub fn depth_limit(mut self, limit: usize) -> Decoder<'s> {
        self.depth_limit = limit;
        self
    }

    /// Installs a hook that turns EXT payloads into caller-defined values.
    /// Without one, EXT decodes to [`Value::Ext`].
    pub fn ext_hook<F>(mut self, hook: F) -> Decoder<'s>
    where
        F: Fn(u64, Bytes) -> Result<Value, failure::Error> + Send + Sync + 'static,
    {
        self.ext_hook = Some(Box::new(hook));
        self
    }

    /// Installs a hook that turns TIME payloads (signed epoch
    /// milliseconds) into caller-defined values. Without one, TIME decodes
    /// to [`Value::Time`].
    pub fn ts_hook<F>(mut self, hook: F) -> Decoder<'s>
    where
        F: Fn(i64) -> Result<Value, failure::Error> + Send + Sync + 'static,
    {
        self.ts_hook = Some(Box::new(hook));
        self
    }

    /// Decodes one value from the start of `data`.
    pub fn decode(&mut self, data: &Bytes) -> Result<Value, DecodeError> {
        let mut pos = 0;
        let value = self.decode_one(data, &mut pos)?;
        if self.strict && pos < data.len() {
            return Err(DecodeError::TrailingBytes(data.len() - pos));
        }
        Ok(value)
    }

    /// The decode loop. Each pass performs exactly one of: close the
    /// filled top frame, read a pending map key, or consume one tagged
    /// value.
    fn decode_one(&mut self, data: &Bytes, pos: &mut usize) -> Result<Value, DecodeError> {
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            // Close the top frame once its slot count is exhausted; the
            // closed container either finishes the decode or fills a slot
            // of its parent.
            if stack.last().map_or(false, |f| f.remaining == 0) {
                if let Some(mut frame) = stack.pop() {
                    let closed = frame.close();
                    self.pool.release(frame);
                    match stack.last_mut() {
                        None => return Ok(closed),
                        Some(parent) => parent.install(closed),
                    }
                }
                continue;
            }

            // A map frame consumes a SYMREF key before each value.
            if stack.last().map_or(false, Frame::wants_key) {
                let tag = read_u8(data, pos)?;
                if tag != TAG_SYMREF {
                    return Err(DecodeError::ExpectedSymbolKey(tag));
                }
                let index = read_uvarint(data, pos)?;
                let key = self.resolve(index)?.to_string();
                if let Some(top) = stack.last_mut() {
                    top.key = Some(key);
                }
                continue;
            }

            // Consume one tagged value. Scalars and empty containers
            // install immediately; a non-empty container opens a frame.
            let tag = read_u8(data, pos)?;
            let value = match tag {
                TAG_NULL => Value::Null,
                TAG_TRUE => Value::Bool(true),
                TAG_FALSE => Value::Bool(false),
                TAG_INT => Value::Int(unzigzag(read_uvarint(data, pos)?)),
                TAG_FLOAT => {
                    let raw = read_span(data, pos, 8)?;
                    let mut bits = [0u8; 8];
                    bits.copy_from_slice(raw);
                    Value::Float(Float::from_bits(u64::from_be_bytes(bits)))
                }
                TAG_STR => {
                    let len = read_uvarint(data, pos)? as usize;
                    let raw = read_span(data, pos, len)?;
                    let s = str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8)?;
                    Value::Str(s.to_string())
                }
                TAG_SYMREF => Value::Str(self.resolve(read_uvarint(data, pos)?)?.to_string()),
                TAG_BYTES => {
                    let len = read_uvarint(data, pos)? as usize;
                    Value::Bytes(self.take_span(data, pos, len)?)
                }
                TAG_TIME => {
                    let ms = unzigzag(read_uvarint(data, pos)?);
                    match &self.ts_hook {
                        Some(hook) => hook(ms)?,
                        None => Value::Time(
                            DateTime::from_timestamp_millis(ms)
                                .ok_or(DecodeError::TimeRange(ms))?,
                        ),
                    }
                }
                TAG_EXT => {
                    let id = read_uvarint(data, pos)?;
                    let len = read_uvarint(data, pos)? as usize;
                    let payload = self.take_span(data, pos, len)?;
                    match &self.ext_hook {
                        Some(hook) => hook(id, payload)?,
                        None => Value::Ext(Ext { id, data: payload }),
                    }
                }
                TAG_ARR | TAG_OBJ | TAG_SET | TAG_TUPLE => {
                    let kind = match tag {
                        TAG_ARR => FrameKind::List,
                        TAG_OBJ => FrameKind::Map,
                        TAG_SET => FrameKind::Set,
                        _ => FrameKind::Tuple,
                    };
                    let count = read_uvarint(data, pos)? as usize;
                    if count == 0 {
                        empty_container(kind)
                    } else {
                        if stack.len() >= self.depth_limit {
                            return Err(DecodeError::DepthLimit(self.depth_limit));
                        }
                        // every pending element costs at least one byte, so
                        // the bytes left bound any honest count
                        let prealloc = count.min(data.len() - *pos);
                        stack.push(self.pool.acquire(kind, count, prealloc));
                        continue;
                    }
                }
                unknown => return Err(DecodeError::UnknownTag(unknown)),
            };

            match stack.last_mut() {
                None => return Ok(value),
                Some(top) => top.install(value),
            }
        }
    }

    fn resolve(&self, index: u64) -> Result<&str, DecodeError> {
        self.symbols.get(index).ok_or(DecodeError::SymbolRange {
            index,
            len: self.symbols.len(),
        })
    }

    /// A length-prefixed payload: a refcounted slice of the input when
    /// zero-copy is on, an owned copy otherwise.
    fn take_span(&self, data: &Bytes, pos: &mut usize, len: usize) -> Result<Bytes, DecodeError> {
        let start = *pos;
        let raw = read_span(data, pos, len)?;
        Ok(if self.zero_copy {
            data.slice(start..start + len)
        } else {
            Bytes::copy_from_slice(raw)
        })
    }
}

fn read_u8(data: &[u8], pos: &mut usize) -> Result<u8, DecodeError> {
    match data.get(*pos) {
        Some(&byte) => {
            *pos += 1;
            Ok(byte)
        }
        None => Err(DecodeError::Truncated {
            offset: *pos,
            needed: 1,
        }),
    }
}

fn read_span<'a>(data: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8], DecodeError> {
    let remaining = data.len() - *pos;
    if len > remaining {
        return Err(DecodeError::Truncated {
            offset: *pos,
            needed: len - remaining,
        });
    }
    let span = &data[*pos..*pos + len];
    *pos += len;
    Ok(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_wins_by_default() {
        let symbols = SymbolTable::empty();
        let wire = Bytes::from(vec![TAG_NULL, 0xff, 0xff]);

        assert_eq!(Decoder::new(&symbols).decode(&wire), Ok(Value::Null));
        assert_eq!(
            Decoder::new(&symbols).strict(true).decode(&wire),
            Err(DecodeError::TrailingBytes(2))
        );
    }

    #[test]
    fn empty_containers_never_open_frames() {
        use crate::vecmap::{VecMap, VecSet};

        let symbols = SymbolTable::empty();
        for (tag, want) in vec![
            (TAG_ARR, Value::List(Vec::new())),
            (TAG_TUPLE, Value::Tuple(Vec::new())),
            (TAG_SET, Value::Set(VecSet::new())),
            (TAG_OBJ, Value::Map(VecMap::new())),
        ] {
            let wire = Bytes::from(vec![tag, 0x00]);
            assert_eq!(Decoder::new(&symbols).decode(&wire), Ok(want));
        }
    }

    #[test]
    fn codec_handles_are_send() {
        fn check<T: Send>() {}

        check::<Decoder<'static>>();
        check::<crate::encoding::Encoder<'static>>();
    }

    #[test]
    fn decoder_instance_survives_many_payloads() {
        let symbols = SymbolTable::empty();
        let mut dec = Decoder::new(&symbols);
        let wire = Bytes::from(vec![TAG_ARR, 0x02, TAG_ARR, 0x01, TAG_NULL, TAG_TRUE]);

        for _ in 0..3 {
            let v = dec.decode(&wire).unwrap();
            assert_eq!(
                v,
                Value::List(vec![Value::List(vec![Value::Null]), Value::Bool(true)])
            );
        }
    }
}
