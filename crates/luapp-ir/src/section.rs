/// Ordered instruction streams.
///
/// A `Section` owns its instructions. Joining moves the right-hand stream
/// onto the end of the left one, so both inputs are consumed and neither
/// original handle can observe the result.
use crate::opcode::Instruction;
use serde::Serialize;
use std::ops::Index;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Section {
    code: Vec<Instruction>,
}

impl Section {
    pub fn new() -> Self {
        Section { code: Vec::new() }
    }

    /// A section holding one instruction.
    pub fn single(inst: Instruction) -> Self {
        Section { code: vec![inst] }
    }

    /// Append an instruction, returning its position.
    pub fn push(&mut self, inst: Instruction) -> usize {
        let pc = self.code.len();
        self.code.push(inst);
        pc
    }

    /// An independent handle over the same instruction run.
    pub fn duplicate(&self) -> Section {
        self.clone()
    }

    /// Concatenate two sections. An empty left side returns `other` unchanged.
    pub fn join(mut self, mut other: Section) -> Section {
        if self.code.is_empty() {
            return other;
        }
        self.code.append(&mut other.code);
        self
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn first(&self) -> Option<&Instruction> {
        self.code.first()
    }

    pub fn last(&self) -> Option<&Instruction> {
        self.code.last()
    }

    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.code.get(pc)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.code.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.code
    }
}

impl Index<usize> for Section {
    type Output = Instruction;

    fn index(&self, pc: usize) -> &Instruction {
        &self.code[pc]
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.code.iter()
    }
}

impl FromIterator<Instruction> for Section {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Section {
            code: iter.into_iter().collect(),
        }
    }
}
