/// Expression lowering: literals, names and calls.
use super::{FuncState, IrBuilder};
use crate::error::IrError;
use crate::opcode::{Instruction, OpCode, MAX_BX, MAX_SBX, MIN_SBX};
use crate::regalloc::Register;
use luapp_core::ast::Node;
use luapp_core::symbol::SymbolId;

/// Integer immediate for `LOADI`, if the value has an exact one.
///
/// `-0.0` is excluded: an integer immediate would lose its sign.
pub(crate) fn small_integer(value: f64) -> Option<i16> {
    if value.fract() != 0.0 || value < MIN_SBX as f64 || value > MAX_SBX as f64 {
        return None;
    }
    if value == 0.0 && value.is_sign_negative() {
        return None;
    }
    Some(value as i16)
}

impl IrBuilder {
    /// Lower an expression whose value is needed, leaving it in one new register.
    pub(super) fn lower_expr(&mut self, fs: &mut FuncState, node: &Node) {
        match node {
            Node::Call { callee, args } => {
                self.lower_call(fs, callee, args.as_deref());
                // The result lands in the call base, which the call released.
                self.alloc(fs, 1);
            }
            _ => self.lower_node(fs, node),
        }
    }

    /// `CALL base nargs+1 1`, with the callee and arguments in consecutive registers.
    pub(super) fn lower_call(&mut self, fs: &mut FuncState, callee: &Node, args: Option<&Node>) {
        let base = fs.regs.register_at(fs.regs.top());
        let nargs = args.map_or(0, Node::list_len);

        self.lower_expr(fs, callee);
        if let Some(args) = args {
            self.lower_expr(fs, args);
        }

        // More than 254 arguments already exhausted the register file above `base`.
        let b = u8::try_from(nargs + 1).unwrap_or(Register::Poisoned.encode());
        fs.emit_abc(OpCode::Call, base.encode(), b, 1);
        self.free(fs, nargs + 1);
    }

    pub(super) fn lower_string(&mut self, fs: &mut FuncState, symbol: SymbolId) {
        let idx = fs.proto.constants.intern_string(symbol);
        let dest = self.alloc(fs, 1);
        self.load_constant(fs, dest, idx);
    }

    pub(super) fn lower_number(&mut self, fs: &mut FuncState, value: f64) {
        if let Some(imm) = small_integer(value) {
            let dest = self.alloc(fs, 1);
            fs.emit_asbx(OpCode::LoadI, dest, imm);
            return;
        }
        let idx = fs.proto.constants.intern_number(value);
        let dest = self.alloc(fs, 1);
        self.load_constant(fs, dest, idx);
    }

    /// `LOADK`, or `LOADKX` plus a payload word once the index needs more than 16 bits.
    fn load_constant(&mut self, fs: &mut FuncState, dest: Register, idx: usize) {
        if let Ok(bx) = u16::try_from(idx) {
            fs.emit_abx(OpCode::LoadK, dest, bx);
            return;
        }
        match u32::try_from(idx) {
            Ok(payload) => {
                tracing::debug!(index = idx, max = MAX_BX, "extended constant load");
                fs.emit_abx(OpCode::LoadKX, dest, 0);
                fs.emit(Instruction::extra(payload));
            }
            Err(_) => self.diag.report(IrError::OperandOverflow {
                op: OpCode::LoadKX.name(),
                index: idx,
            }),
        }
    }

    /// Globals load by name; locals copy their bound register to the top.
    pub(super) fn lower_identifier(
        &mut self,
        fs: &mut FuncState,
        symbol: SymbolId,
        is_global: bool,
    ) {
        if is_global {
            let idx = fs.proto.constants.intern_string(symbol);
            let dest = self.alloc(fs, 1);
            match u16::try_from(idx) {
                Ok(bx) => {
                    fs.emit_abx(OpCode::GetGlobal, dest, bx);
                }
                Err(_) => self.diag.report(IrError::OperandOverflow {
                    op: OpCode::GetGlobal.name(),
                    index: idx,
                }),
            }
            return;
        }

        let source = fs.scope.resolve_local(symbol).map(|local| local.reg);
        let dest = self.alloc(fs, 1);
        match source {
            Some(src) => {
                fs.emit_abc(OpCode::Move, dest.encode(), src.encode(), 0);
            }
            None => self.diag.report(IrError::UnboundLocal { symbol }),
        }
    }
}
