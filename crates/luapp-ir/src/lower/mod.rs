/// Lowering: resolved syntax tree → prototype tree.
///
/// Every expression leaves its value in one freshly allocated register at
/// the top of the current function's register stack. Statements leave the
/// stack where they found it.
pub mod expr;
pub mod scope;

use crate::config::IrConfig;
use crate::error::{BuildError, Diagnostics, IrError};
use crate::opcode::{Instruction, OpCode};
use crate::proto::Proto;
use crate::regalloc::{Register, RegisterAllocator};
use crate::section::Section;
use luapp_core::ast::{FunctionBody, Node};
use luapp_core::symbol::SymbolId;
use scope::ScopeManager;

/// State for a single function being lowered.
struct FuncState {
    proto: Proto,
    regs: RegisterAllocator,
    scope: ScopeManager,
}

impl FuncState {
    fn new(register_limit: usize) -> Self {
        FuncState {
            proto: Proto::new(),
            regs: RegisterAllocator::with_limit(register_limit),
            scope: ScopeManager::new(),
        }
    }

    fn emit(&mut self, inst: Instruction) -> usize {
        self.proto.emit(inst)
    }

    fn emit_abc(&mut self, op: OpCode, a: u8, b: u8, c: u8) -> usize {
        self.emit(Instruction::abc(op, a, b, c))
    }

    fn emit_abx(&mut self, op: OpCode, a: Register, bx: u16) -> usize {
        self.emit(Instruction::abx(op, a.encode(), bx))
    }

    fn emit_asbx(&mut self, op: OpCode, a: Register, sbx: i16) -> usize {
        self.emit(Instruction::asbx(op, a.encode(), sbx))
    }
}

/// Drives lowering of one compilation unit and collects its diagnostics.
pub struct IrBuilder {
    config: IrConfig,
    diag: Diagnostics,
}

impl IrBuilder {
    pub fn new(config: IrConfig) -> Self {
        IrBuilder {
            config,
            diag: Diagnostics::new(),
        }
    }

    /// Lower a whole program as an implicit vararg function.
    ///
    /// The prototype is returned even when errors were reported; callers
    /// must check the diagnostics before handing it to an emitter.
    pub fn lower(mut self, program: &FunctionBody) -> (Proto, Diagnostics) {
        let mut main = self.open_function(&[], true);
        if let Some(body) = &program.body {
            self.lower_node(&mut main, body);
        }
        let proto = self.close_function(main);
        tracing::debug!(
            protos = proto.tree_size(),
            errors = self.diag.error_count(),
            "lowered program"
        );
        (proto, self.diag)
    }

    fn alloc(&mut self, fs: &mut FuncState, n: usize) -> Register {
        fs.regs.allocate(n, &mut self.diag)
    }

    fn free(&mut self, fs: &mut FuncState, n: usize) {
        fs.regs.free(n, &mut self.diag);
    }

    /// Set up a function: parameters are bound to registers `0..n`.
    fn open_function(&mut self, params: &[SymbolId], vararg: bool) -> FuncState {
        let mut fs = FuncState::new(usize::from(self.config.max_registers));
        fs.proto.is_vararg = vararg;
        fs.proto.num_params = u8::try_from(params.len()).unwrap_or(u8::MAX);
        fs.scope.enter_block(fs.regs.top());
        for &name in params {
            let reg = self.alloc(&mut fs, 1);
            fs.scope.add_local(name, reg);
        }
        fs
    }

    /// Finish a function: prepend the entry instruction, append the return.
    fn close_function(&mut self, mut fs: FuncState) -> Proto {
        if let Some(block) = fs.scope.leave_block() {
            fs.regs.free_to(block.first_free_reg_on_entry, &mut self.diag);
        }

        let prologue = Instruction::abc(
            OpCode::arg_prep(fs.proto.is_vararg),
            fs.proto.num_params,
            0,
            0,
        );
        let body = std::mem::take(&mut fs.proto.code);
        fs.proto.code = Section::single(prologue).join(body);
        fs.emit_abc(OpCode::Return, 0, 1, 0);

        fs.proto.max_stack_size = u8::try_from(fs.regs.max_stack_size()).unwrap_or(u8::MAX);
        tracing::trace!(
            params = fs.proto.num_params,
            vararg = fs.proto.is_vararg,
            code = fs.proto.code_len(),
            constants = fs.proto.constants.len(),
            max_stack = fs.proto.max_stack_size,
            "closed function"
        );
        fs.proto
    }

    fn lower_node(&mut self, fs: &mut FuncState, node: &Node) {
        match node {
            Node::ExpressionStatement(expr) => {
                let base = fs.regs.top();
                self.lower_node(fs, expr);
                fs.regs.free_to(base, &mut self.diag);
            }
            Node::Call { callee, args } => self.lower_call(fs, callee, args.as_deref()),
            Node::String(symbol) => self.lower_string(fs, *symbol),
            Node::NameReference(inner) => self.lower_node(fs, inner),
            Node::Number(value) => self.lower_number(fs, *value),
            Node::Identifier(ident) => self.lower_identifier(fs, ident.symbol, ident.is_global),
            Node::Block { .. } => {
                for statement in node.block_items() {
                    self.lower_node(fs, statement);
                }
            }
            Node::FunctionBody(func) => self.lower_function(fs, func),
            Node::ExpressionList { .. } => {
                for expr in node.list_items() {
                    self.lower_expr(fs, expr);
                }
            }
        }
    }

    /// Compile a nested function into a child prototype and emit `CLOSURE` for it.
    fn lower_function(&mut self, fs: &mut FuncState, func: &FunctionBody) {
        let mut child = self.open_function(&func.params.names, func.params.vararg);
        if let Some(body) = &func.body {
            self.lower_node(&mut child, body);
        }
        let child = self.close_function(child);

        let idx = fs.proto.add_child(child);
        let dest = self.alloc(fs, 1);
        match u16::try_from(idx) {
            Ok(bx) => {
                fs.emit_abx(OpCode::Closure, dest, bx);
            }
            Err(_) => self.diag.report(IrError::OperandOverflow {
                op: OpCode::Closure.name(),
                index: idx,
            }),
        }
    }
}

/// Lower a program with the default configuration.
pub fn build(program: &FunctionBody) -> Result<Proto, BuildError> {
    build_with_config(program, &IrConfig::default())
}

/// Lower a program. Any reported error discards the prototype tree.
pub fn build_with_config(program: &FunctionBody, config: &IrConfig) -> Result<Proto, BuildError> {
    let (proto, diag) = IrBuilder::new(config.clone()).lower(program);
    if diag.has_errors() {
        return Err(BuildError::Failed(diag));
    }
    Ok(proto)
}
