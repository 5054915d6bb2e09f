/// Symbol identities handed out by name resolution.
///
/// Every identifier and string literal in the tree carries a `SymbolId`.
/// The IR layer only compares ids; the table is used to go back to the text.
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// An opaque handle to an interned symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Symbol interner. Equal names always map to the same id.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    /// Names, indexed by SymbolId.
    names: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            names: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Intern a name. Returns the existing id if the name was seen before.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.lookup.get(name) {
            return SymbolId(id);
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        SymbolId(id)
    }

    /// Look up a name without interning it.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.lookup.get(name).copied().map(SymbolId)
    }

    /// Get the text of a symbol, if it belongs to this table.
    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
