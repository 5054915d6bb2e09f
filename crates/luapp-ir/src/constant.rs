/// Per-prototype constant pool.
///
/// Strings and numbers share one index space in insertion order. Lookup is
/// by exact identity: strings by symbol id, numbers by bit pattern (so
/// `0.0` and `-0.0` are distinct and a NaN matches the same NaN).
use indexmap::IndexSet;
use luapp_core::symbol::SymbolId;
use serde::{Serialize, Serializer};

/// A pooled literal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Constant {
    String(SymbolId),
    Number(f64),
}

/// Dedup key: the bit-exact identity of a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ConstantKey {
    String(SymbolId),
    Number(u64),
}

impl From<Constant> for ConstantKey {
    fn from(k: Constant) -> Self {
        match k {
            Constant::String(id) => ConstantKey::String(id),
            Constant::Number(n) => ConstantKey::Number(n.to_bits()),
        }
    }
}

impl From<ConstantKey> for Constant {
    fn from(key: ConstantKey) -> Self {
        match key {
            ConstantKey::String(id) => Constant::String(id),
            ConstantKey::Number(bits) => Constant::Number(f64::from_bits(bits)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConstantPool {
    entries: IndexSet<ConstantKey>,
}

impl ConstantPool {
    pub fn new() -> Self {
        ConstantPool {
            entries: IndexSet::new(),
        }
    }

    /// Index of an existing equal constant.
    pub fn find(&self, k: Constant) -> Option<usize> {
        self.entries.get_index_of(&ConstantKey::from(k))
    }

    /// Add a constant to the pool, returning its index. Deduplicates.
    pub fn add(&mut self, k: Constant) -> usize {
        let (idx, inserted) = self.entries.insert_full(ConstantKey::from(k));
        if inserted {
            tracing::trace!(index = idx, constant = ?k, "new constant");
        }
        idx
    }

    pub fn intern_string(&mut self, id: SymbolId) -> usize {
        self.add(Constant::String(id))
    }

    pub fn intern_number(&mut self, value: f64) -> usize {
        self.add(Constant::Number(value))
    }

    pub fn get(&self, idx: usize) -> Option<Constant> {
        self.entries.get_index(idx).copied().map(Constant::from)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Constants in index order.
    pub fn iter(&self) -> impl Iterator<Item = Constant> + '_ {
        self.entries.iter().copied().map(Constant::from)
    }
}

impl PartialEq for ConstantPool {
    /// Pools are equal when they hold the same constants at the same indices.
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Serialize for ConstantPool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
