//! Partially-constructed containers and the pooled frame allocator.
//!
//! A [`Frame`] tracks one container mid-decode: its kind, how many slots
//! are still unfilled, the elements accumulated so far, and (for maps) the
//! key waiting for its value. Closing a frame promotes it to its final
//! [`Value`] form; a tuple is staged in the same element vector as a list
//! and only takes on its tuple identity at close.

use crate::{
    vecmap::{VecMap, VecSet},
    Value,
};
use smallvec::SmallVec;
use std::mem;

/// Pooled frame shells kept for reuse.
pub(crate) const POOL_FRAMES: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum FrameKind {
    List,
    Tuple,
    Set,
    Map,
}

#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) kind: FrameKind,
    /// Slots still to fill before the container closes.
    pub(crate) remaining: usize,
    /// Elements of a list, tuple-in-construction, or set.
    items: Vec<Value>,
    /// Entries of a map.
    pairs: Vec<(String, Value)>,
    /// A map key read but not yet matched with its value.
    pub(crate) key: Option<String>,
}

impl Frame {
    fn blank() -> Frame {
        Frame {
            kind: FrameKind::List,
            remaining: 0,
            items: Vec::new(),
            pairs: Vec::new(),
            key: None,
        }
    }

    pub(crate) fn wants_key(&self) -> bool { self.kind == FrameKind::Map && self.key.is_none() }

    /// Fills the next slot.
    pub(crate) fn install(&mut self, value: Value) {
        debug_assert!(self.remaining > 0);
        match self.kind {
            FrameKind::Map => {
                let key = self.key.take().expect("map slot filled without a pending key");
                self.pairs.push((key, value));
            }
            _ => self.items.push(value),
        }
        self.remaining -= 1;
    }

    /// Promotes a filled frame to its final container form.
    pub(crate) fn close(&mut self) -> Value {
        debug_assert_eq!(self.remaining, 0);
        match self.kind {
            FrameKind::List => Value::List(mem::take(&mut self.items)),
            FrameKind::Tuple => Value::Tuple(mem::take(&mut self.items)),
            FrameKind::Set => Value::Set(VecSet::from(mem::take(&mut self.items))),
            FrameKind::Map => Value::Map(VecMap::from(mem::take(&mut self.pairs))),
        }
    }
}

/// An empty container of the given kind, for zero-count tags that never
/// earn a frame.
pub(crate) fn empty_container(kind: FrameKind) -> Value {
    match kind {
        FrameKind::List => Value::List(Vec::new()),
        FrameKind::Tuple => Value::Tuple(Vec::new()),
        FrameKind::Set => Value::Set(VecSet::new()),
        FrameKind::Map => Value::Map(VecMap::new()),
    }
}

/// A fixed-capacity LIFO free list of frame shells.
///
/// `acquire` hands back a pooled shell when one is available and falls
/// through to a fresh allocation otherwise; `release` keeps the shell if
/// there is room and drops it on the floor if not. Purely an allocator
/// pressure valve — nothing about decoding depends on the pool size.
pub(crate) struct FramePool {
    free: SmallVec<[Frame; POOL_FRAMES]>,
}

impl FramePool {
    pub(crate) fn new() -> FramePool { FramePool { free: SmallVec::new() } }

    pub(crate) fn acquire(&mut self, kind: FrameKind, count: usize, prealloc: usize) -> Frame {
        let mut frame = self.free.pop().unwrap_or_else(Frame::blank);
        frame.kind = kind;
        frame.remaining = count;
        match kind {
            FrameKind::Map => frame.pairs.reserve(prealloc),
            _ => frame.items.reserve(prealloc),
        }
        frame
    }

    pub(crate) fn release(&mut self, mut frame: Frame) {
        if self.free.len() < POOL_FRAMES {
            frame.items.clear();
            frame.pairs.clear();
            frame.key = None;
            self.free.push(frame);
        }
    }
}
