//! The shared string table that backs symbol references.
//!
//! Both peers must hold the same table: the encoder turns any string found
//! in it into a small integer reference, and map keys are *required* to
//! resolve through it. The table is ordered; index `i` on the wire means
//! the `i`-th string handed to the constructor.

use crate::Value;
use hashbrown::HashMap;
use std::iter::FromIterator;

/// An ordered string table with a reverse index for encoding.
///
/// ```
/// use lens::prelude::*;
///
/// let symbols = SymbolTable::new(vec!["id", "name"]);
/// assert_eq!(symbols.get(1), Some("name"));
/// assert_eq!(symbols.lookup("id"), Some(0));
/// assert_eq!(symbols.lookup("nope"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    entries: Vec<String>,
    index: HashMap<String, u64>,
}

impl SymbolTable {
    /// Builds a table from an ordered sequence of strings.
    ///
    /// Duplicates are permitted but meaningless: the reverse index keeps the
    /// first occurrence, so the encoder always emits the first match.
    pub fn new<I, S>(symbols: I) -> SymbolTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = symbols.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(entries.len());
        for (i, sym) in entries.iter().enumerate() {
            index.entry(sym.clone()).or_insert(i as u64);
        }
        SymbolTable { entries, index }
    }

    /// A table with no entries.
    pub fn empty() -> SymbolTable { SymbolTable::default() }

    /// Number of entries.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Indicates whether the table has no entries.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// The string stored at `index`, if the index is in range.
    pub fn get(&self, index: u64) -> Option<&str> {
        self.entries.get(index as usize).map(String::as_str)
    }

    /// The wire index for `sym`, if it is in the table.
    pub fn lookup(&self, sym: &str) -> Option<u64> { self.index.get(sym).copied() }

    /// Iterates the entries in wire-index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Collects every map key in `value`, in first-visit order, into a
    /// fresh table.
    ///
    /// A convenience for callers that derive the table from a payload and
    /// ship it out of band.
    ///
    /// ```
    /// use lens::prelude::*;
    ///
    /// let v = Value::from(VecMap::from(vec![
    ///     ("id".to_string(), Value::from(7)),
    ///     ("name".to_string(), Value::from("x")),
    /// ]));
    ///
    /// let symbols = SymbolTable::harvest(&v);
    /// assert_eq!(symbols.len(), 2);
    /// assert!(encode(&v, &symbols).is_ok());
    /// ```
    pub fn harvest(value: &Value) -> SymbolTable {
        let mut table = SymbolTable::default();
        table.collect_keys(value);
        table
    }

    fn collect_keys(&mut self, value: &Value) {
        match value {
            Value::List(items) | Value::Tuple(items) => {
                for v in items {
                    self.collect_keys(v);
                }
            }
            Value::Set(set) => {
                for v in set.iter() {
                    self.collect_keys(v);
                }
            }
            Value::Map(map) => {
                for (k, v) in map.iter() {
                    if !self.index.contains_key(k) {
                        self.index.insert(k.clone(), self.entries.len() as u64);
                        self.entries.push(k.clone());
                    }
                    self.collect_keys(v);
                }
            }
            _ => {}
        }
    }
}

impl From<Vec<String>> for SymbolTable {
    fn from(v: Vec<String>) -> SymbolTable { SymbolTable::new(v) }
}

impl From<Vec<&str>> for SymbolTable {
    fn from(v: Vec<&str>) -> SymbolTable { SymbolTable::new(v) }
}

impl FromIterator<String> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> SymbolTable {
        SymbolTable::new(iter)
    }
}
