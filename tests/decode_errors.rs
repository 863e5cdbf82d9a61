use lens::{encoding::DEFAULT_DEPTH_LIMIT, prelude::*};

fn try_decode(wire: Vec<u8>, symbols: &SymbolTable) -> Result<Value, DecodeError> {
    decode(&Bytes::from(wire), symbols)
}

#[test]
fn empty_input_is_truncated() {
    assert_eq!(
        try_decode(vec![], &SymbolTable::empty()),
        Err(DecodeError::Truncated {
            offset: 0,
            needed: 1
        })
    );
}

#[test]
fn truncation_everywhere() {
    let symbols = SymbolTable::empty();

    // INT with no varint
    assert!(matches!(
        try_decode(vec![0x03], &symbols),
        Err(DecodeError::Truncated { .. })
    ));

    // FLOAT with three of eight bytes
    assert_eq!(
        try_decode(vec![0x04, 0x01, 0x02, 0x03], &symbols),
        Err(DecodeError::Truncated {
            offset: 1,
            needed: 5
        })
    );

    // STR promising five bytes, delivering two
    assert_eq!(
        try_decode(vec![0x05, 0x05, b'a', b'b'], &symbols),
        Err(DecodeError::Truncated {
            offset: 2,
            needed: 3
        })
    );

    // BYTES promising two, delivering none
    assert!(matches!(
        try_decode(vec![0x09, 0x02], &symbols),
        Err(DecodeError::Truncated { .. })
    ));

    // EXT payload cut short
    assert!(matches!(
        try_decode(vec![0x0b, 0x01, 0x05, 0xaa, 0xbb], &symbols),
        Err(DecodeError::Truncated { .. })
    ));

    // a list that promises more values than the input holds
    assert!(matches!(
        try_decode(vec![0x06, 0x03, 0x00], &symbols),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn varint_overflow_rejected() {
    let mut wire = vec![0x03];
    wire.extend_from_slice(&[0x80; 10]);
    wire.push(0x01);

    assert_eq!(
        try_decode(wire, &SymbolTable::empty()),
        Err(DecodeError::VarintOverflow)
    );
}

#[test]
fn unknown_tags_rejected() {
    for tag in &[0x0eu8, 0x20, 0xff] {
        assert_eq!(
            try_decode(vec![*tag], &SymbolTable::empty()),
            Err(DecodeError::UnknownTag(*tag))
        );
    }
}

#[test]
fn map_key_must_be_symref() {
    let symbols = SymbolTable::new(vec!["id"]);

    // OBJ with one entry whose key arrives as a plain STR
    assert_eq!(
        try_decode(vec![0x07, 0x01, 0x05, 0x02, b'i', b'd', 0x00], &symbols),
        Err(DecodeError::ExpectedSymbolKey(0x05))
    );
}

#[test]
fn symbol_index_bounds() {
    let symbols = SymbolTable::new(vec!["a", "b"]);

    // index 0 resolves
    assert_eq!(
        try_decode(vec![0x08, 0x00], &symbols),
        Ok(Value::from("a"))
    );

    // index == table length is one past the end
    assert_eq!(
        try_decode(vec![0x08, 0x02], &symbols),
        Err(DecodeError::SymbolRange { index: 2, len: 2 })
    );

    // same check applies to map keys
    assert_eq!(
        try_decode(vec![0x07, 0x01, 0x08, 0x07, 0x00], &symbols),
        Err(DecodeError::SymbolRange { index: 7, len: 2 })
    );
}

#[test]
fn invalid_utf8_rejected() {
    assert_eq!(
        try_decode(vec![0x05, 0x02, 0xff, 0xfe], &SymbolTable::empty()),
        Err(DecodeError::InvalidUtf8)
    );
}

#[test]
fn out_of_range_timestamp_rejected() {
    let symbols = SymbolTable::empty();

    // reuse the INT payload discipline: same varint, different tag
    let mut wire = encode(&Value::from(i64::max_value()), &symbols).unwrap();
    wire[0] = 0x0a;

    assert_eq!(
        try_decode(wire, &symbols),
        Err(DecodeError::TimeRange(i64::max_value()))
    );
}

/// `depth` nested single-element lists around a null.
fn nested_lists(depth: usize) -> Vec<u8> {
    let mut wire = Vec::with_capacity(depth * 2 + 1);
    for _ in 0..depth {
        wire.extend_from_slice(&[0x06, 0x01]);
    }
    wire.push(0x00);
    wire
}

#[test]
fn depth_limit_boundary() {
    let symbols = SymbolTable::empty();

    assert!(try_decode(nested_lists(DEFAULT_DEPTH_LIMIT), &symbols).is_ok());

    assert_eq!(
        try_decode(nested_lists(DEFAULT_DEPTH_LIMIT + 1), &symbols),
        Err(DecodeError::DepthLimit(DEFAULT_DEPTH_LIMIT))
    );
}

#[test]
fn hostile_nesting_fails_cleanly() {
    // deep enough to smash a native stack if decoding recursed
    assert_eq!(
        try_decode(nested_lists(100_000), &SymbolTable::empty()),
        Err(DecodeError::DepthLimit(DEFAULT_DEPTH_LIMIT))
    );
}

#[test]
fn configurable_depth_limit() {
    let symbols = SymbolTable::empty();
    let wire = Bytes::from(nested_lists(3));

    assert!(Decoder::new(&symbols)
        .depth_limit(3)
        .decode(&wire)
        .is_ok());
    assert_eq!(
        Decoder::new(&symbols).depth_limit(2).decode(&wire),
        Err(DecodeError::DepthLimit(2))
    );
}

#[test]
fn strict_mode_rejects_trailing_bytes() {
    let symbols = SymbolTable::empty();
    let wire = Bytes::from(vec![0x02, 0xde, 0xad]);

    assert_eq!(decode(&wire, &symbols), Ok(Value::from(false)));
    assert_eq!(
        Decoder::new(&symbols).strict(true).decode(&wire),
        Err(DecodeError::TrailingBytes(2))
    );
}
