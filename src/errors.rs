use failure::Fail;

/// Errors surfaced while encoding a value tree.
#[derive(Clone, Debug, Eq, PartialEq, Fail)]
pub enum EncodeError {
    /// A map key was not present in the symbol table. Map keys travel as
    /// symbol references, so an unlisted key cannot be represented.
    #[fail(display = "map key {:?} is not in the symbol table", _0)]
    UnknownSymbol(String),
}

/// Errors surfaced while decoding a byte sequence.
#[derive(Clone, Debug, Eq, PartialEq, Fail)]
pub enum DecodeError {
    /// The input ended before the current read completed.
    #[fail(
        display = "input truncated: needed {} more byte(s) at offset {}",
        needed, offset
    )]
    Truncated { offset: usize, needed: usize },
    /// A varint ran past 64 bits of payload.
    #[fail(display = "varint longer than 64 bits")]
    VarintOverflow,
    /// The tag byte does not name any value kind.
    #[fail(display = "unknown tag byte {:#04x}", _0)]
    UnknownTag(u8),
    /// A map entry did not start with a symbol reference.
    #[fail(display = "map key must be a symbol reference, found tag {:#04x}", _0)]
    ExpectedSymbolKey(u8),
    /// A symbol reference pointed past the end of the table.
    #[fail(
        display = "symbol index {} out of range for a table of {} entries",
        index, len
    )]
    SymbolRange { index: u64, len: usize },
    /// Containers nested deeper than the configured limit.
    #[fail(display = "nesting deeper than {} frames", _0)]
    DepthLimit(usize),
    /// A string payload was not valid UTF-8.
    #[fail(display = "string payload is not valid UTF-8")]
    InvalidUtf8,
    /// A timestamp payload fell outside the representable instant range.
    #[fail(display = "timestamp {}ms is outside the representable range", _0)]
    TimeRange(i64),
    /// Strict mode only: bytes were left over after the first value.
    #[fail(display = "{} trailing byte(s) after the first value", _0)]
    TrailingBytes(usize),
    /// An extension or timestamp hook reported failure.
    #[fail(display = "decode hook failed: {}", _0)]
    Hook(String),
}

impl From<failure::Error> for DecodeError {
    fn from(e: failure::Error) -> DecodeError { DecodeError::Hook(e.to_string()) }
}
