/// IR opcodes and instruction operands.
///
/// An instruction carries one of four operand layouts:
/// - iABC: three 8-bit fields
/// - iABx: 8-bit A plus an unsigned 16-bit Bx
/// - iAsBx: 8-bit A plus a signed 16-bit sBx
/// - extra: a raw 32-bit payload word with no opcode, only valid right after `LOADKX`
///
/// Bit packing is left to the emitter.
use serde::Serialize;
use std::fmt;

pub const MAX_BX: usize = u16::MAX as usize; // 65535
pub const MAX_SBX: i32 = i16::MAX as i32; // 32767
pub const MIN_SBX: i32 = i16::MIN as i32; // -32768

/// Operations produced by the IR builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum OpCode {
    Move = 0,
    LoadI,
    LoadK,
    LoadKX,
    GetGlobal,
    Call,
    Return,
    Closure,
    ArgPrep,
    VarArgPrep,
}

impl OpCode {
    pub const COUNT: usize = 10;

    /// Get the operand format for this opcode.
    pub fn format(&self) -> InstructionFormat {
        use InstructionFormat::*;
        use OpCode::*;
        match self {
            LoadI => IAsBx,
            LoadK | LoadKX | GetGlobal | Closure => IABx,
            Move | Call | Return | ArgPrep | VarArgPrep => IABC,
        }
    }

    pub fn name(&self) -> &'static str {
        use OpCode::*;
        match self {
            Move => "MOVE",
            LoadI => "LOADI",
            LoadK => "LOADK",
            LoadKX => "LOADKX",
            GetGlobal => "GETGLOBAL",
            Call => "CALL",
            Return => "RETURN",
            Closure => "CLOSURE",
            ArgPrep => "ARGPREP",
            VarArgPrep => "VARARGPREP",
        }
    }

    /// Function entry opcode for a parameter list.
    pub fn arg_prep(vararg: bool) -> OpCode {
        if vararg {
            OpCode::VarArgPrep
        } else {
            OpCode::ArgPrep
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionFormat {
    IABC,
    IABx,
    IAsBx,
}

/// One lowered operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Instruction {
    Abc { op: OpCode, a: u8, b: u8, c: u8 },
    Abx { op: OpCode, a: u8, bx: u16 },
    AsBx { op: OpCode, a: u8, sbx: i16 },
    /// Payload word for the preceding `LOADKX`.
    Extra(u32),
}

impl Instruction {
    // ---- Constructors ----

    pub fn abc(op: OpCode, a: u8, b: u8, c: u8) -> Self {
        debug_assert_eq!(op.format(), InstructionFormat::IABC, "{op} is not iABC");
        Instruction::Abc { op, a, b, c }
    }

    pub fn abx(op: OpCode, a: u8, bx: u16) -> Self {
        debug_assert_eq!(op.format(), InstructionFormat::IABx, "{op} is not iABx");
        Instruction::Abx { op, a, bx }
    }

    pub fn asbx(op: OpCode, a: u8, sbx: i16) -> Self {
        debug_assert_eq!(op.format(), InstructionFormat::IAsBx, "{op} is not iAsBx");
        Instruction::AsBx { op, a, sbx }
    }

    pub fn extra(value: u32) -> Self {
        Instruction::Extra(value)
    }

    // ---- Accessors ----

    /// The opcode, or `None` for a payload word.
    pub fn opcode(&self) -> Option<OpCode> {
        match *self {
            Instruction::Abc { op, .. }
            | Instruction::Abx { op, .. }
            | Instruction::AsBx { op, .. } => Some(op),
            Instruction::Extra(_) => None,
        }
    }

    /// Field A. Payload words have none.
    pub fn a(&self) -> Option<u8> {
        match *self {
            Instruction::Abc { a, .. }
            | Instruction::Abx { a, .. }
            | Instruction::AsBx { a, .. } => Some(a),
            Instruction::Extra(_) => None,
        }
    }

    pub fn bx(&self) -> Option<u16> {
        match *self {
            Instruction::Abx { bx, .. } => Some(bx),
            _ => None,
        }
    }

    pub fn sbx(&self) -> Option<i16> {
        match *self {
            Instruction::AsBx { sbx, .. } => Some(sbx),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<u32> {
        match *self {
            Instruction::Extra(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_extra(&self) -> bool {
        matches!(self, Instruction::Extra(_))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Abc { op, a, b, c } => write!(f, "{:<10} {a} {b} {c}", op.name()),
            Instruction::Abx { op, a, bx } => write!(f, "{:<10} {a} {bx}", op.name()),
            Instruction::AsBx { op, a, sbx } => write!(f, "{:<10} {a} {sbx}", op.name()),
            Instruction::Extra(value) => write!(f, "{:<10} {value}", ""),
        }
    }
}
