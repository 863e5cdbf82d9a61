/// Null, no payload.
pub(crate) const TAG_NULL: u8 = 0;
/// Boolean true, no payload.
pub(crate) const TAG_TRUE: u8 = 1;
/// Boolean false, no payload.
pub(crate) const TAG_FALSE: u8 = 2;
/// Signed integer, ZigZag varint payload.
pub(crate) const TAG_INT: u8 = 3;
/// Double-precision float, 8 bytes big-endian.
pub(crate) const TAG_FLOAT: u8 = 4;
/// UTF-8 string, length-prefixed.
pub(crate) const TAG_STR: u8 = 5;
/// List, count-prefixed sequence of values.
pub(crate) const TAG_ARR: u8 = 6;
/// Map, count-prefixed sequence of symbol-keyed entries.
pub(crate) const TAG_OBJ: u8 = 7;
/// Symbol reference, varint index into the shared table.
pub(crate) const TAG_SYMREF: u8 = 8;
/// Opaque bytes, length-prefixed.
pub(crate) const TAG_BYTES: u8 = 9;
/// Instant, ZigZag varint of milliseconds since the Unix epoch.
pub(crate) const TAG_TIME: u8 = 10;
/// Extension, varint id then length-prefixed payload.
pub(crate) const TAG_EXT: u8 = 11;
/// Set, count-prefixed sequence of values.
pub(crate) const TAG_SET: u8 = 12;
/// Tuple, count-prefixed sequence of values.
pub(crate) const TAG_TUPLE: u8 = 13;

/// Low seven bits of a varint byte carry payload.
pub(crate) const VARINT_DATA: u8 = 0x7f;
/// High bit of a varint byte signals continuation.
pub(crate) const VARINT_CONT: u8 = 0x80;
