//! Append-only storage behind the auxiliary index of a token.

use rustc_hash::FxHashMap;

/// Interned identifier id.
pub type Name = usize;

/// Literal constants in scan order. Indices are stable for the whole compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralPools {
    chars: Vec<char>,
    ints: Vec<i64>,
    strings: Vec<String>,
}

impl LiteralPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_char(&mut self, c: char) -> usize {
        self.chars.push(c);
        self.chars.len() - 1
    }

    pub fn add_int(&mut self, i: i64) -> usize {
        self.ints.push(i);
        self.ints.len() - 1
    }

    pub fn add_string(&mut self, s: &str) -> usize {
        self.strings.push(s.to_owned());
        self.strings.len() - 1
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn int_at(&self, index: usize) -> Option<i64> {
        self.ints.get(index).copied()
    }

    pub fn string_at(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }
}

/// Maps identifier spellings to small ids, first occurrence first.
///
/// Interning is purely lexical: the same spelling gets the same id no matter
/// which block it appears in.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    map: FxHashMap<String, Name>,
    names: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let name = self.names.len();
        self.names.push(s.to_owned());
        self.map.insert(s.to_owned(), name);
        name
    }

    /// Looks a spelling up without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    pub fn resolve(&self, name: Name) -> &str {
        self.names.get(name).map_or("<unknown>", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
