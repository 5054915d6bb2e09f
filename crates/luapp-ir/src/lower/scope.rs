/// Local variable bindings for a single function.
use crate::regalloc::Register;
use luapp_core::symbol::SymbolId;

/// A local variable in the current function scope.
#[derive(Clone, Debug)]
pub struct LocalVarInfo {
    pub name: SymbolId,
    /// Register holding the value.
    pub reg: Register,
    /// Scope depth when declared.
    pub scope_depth: usize,
}

/// Block scope tracking.
#[derive(Clone, Debug)]
pub struct BlockScope {
    /// Number of local variables when this block started.
    pub num_locals_on_entry: usize,
    /// Register top when this block started; registers above it are released on exit.
    pub first_free_reg_on_entry: usize,
}

#[derive(Debug, Default)]
pub struct ScopeManager {
    pub locals: Vec<LocalVarInfo>,
    pub blocks: Vec<BlockScope>,
    pub scope_depth: usize,
}

impl ScopeManager {
    pub fn new() -> Self {
        ScopeManager {
            locals: Vec::new(),
            blocks: Vec::new(),
            scope_depth: 0,
        }
    }

    /// Enter a new block scope at the given register top.
    pub fn enter_block(&mut self, reg_top: usize) {
        self.scope_depth += 1;
        self.blocks.push(BlockScope {
            num_locals_on_entry: self.locals.len(),
            first_free_reg_on_entry: reg_top,
        });
    }

    /// Leave the current block, dropping its locals.
    /// Returns `None` if no block is open.
    pub fn leave_block(&mut self) -> Option<BlockScope> {
        let block = self.blocks.pop()?;
        self.scope_depth -= 1;
        self.locals.truncate(block.num_locals_on_entry);
        Some(block)
    }

    /// Bind a name to an already allocated register.
    pub fn add_local(&mut self, name: SymbolId, reg: Register) {
        self.locals.push(LocalVarInfo {
            name,
            reg,
            scope_depth: self.scope_depth,
        });
    }

    /// Look up a local variable by name, innermost binding first.
    pub fn resolve_local(&self, name: SymbolId) -> Option<&LocalVarInfo> {
        self.locals.iter().rev().find(|v| v.name == name)
    }

    pub fn num_locals(&self) -> usize {
        self.locals.len()
    }
}
