/// Function prototype: one compiled function and the closures nested in it.
use crate::constant::{Constant, ConstantPool};
use crate::opcode::Instruction;
use crate::section::Section;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Proto {
    /// Instructions in execution order.
    pub code: Section,
    pub constants: ConstantPool,
    /// Closures defined directly inside this function, in definition order.
    /// `CLOSURE` operands index into this list.
    pub protos: Vec<Proto>,
    /// Number of fixed parameters.
    pub num_params: u8,
    pub is_vararg: bool,
    /// Peak number of live registers.
    pub max_stack_size: u8,
}

impl Proto {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction, returning its pc.
    pub fn emit(&mut self, inst: Instruction) -> usize {
        self.code.push(inst)
    }

    /// Add a constant to the pool, returning its index. Deduplicates.
    pub fn add_constant(&mut self, k: Constant) -> usize {
        self.constants.add(k)
    }

    pub fn code_len(&self) -> usize {
        self.code.len()
    }

    /// Register a nested closure, returning its position in `protos`.
    pub fn add_child(&mut self, child: Proto) -> usize {
        let idx = self.protos.len();
        self.protos.push(child);
        idx
    }

    /// Number of prototypes in this tree, including this one.
    pub fn tree_size(&self) -> usize {
        1 + self.protos.iter().map(Proto::tree_size).sum::<usize>()
    }
}
