/// Per-prototype register stack.
///
/// Registers are handed out bump-style and released in reverse order. The
/// allocator only counts; which value sits in which register follows from
/// lowering order.
use crate::error::{Diagnostics, IrError};

/// Size of the register file addressable by an 8-bit operand.
pub const MAX_REGISTERS: usize = u8::MAX as usize; // 255

/// Base register of an allocation.
///
/// `Poisoned` marks a register past the limit. Lowering may keep using it to
/// find more errors, but anything encoded from it is garbage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Live(u8),
    Poisoned,
}

impl Register {
    /// Operand value for instruction encoding.
    pub fn encode(self) -> u8 {
        match self {
            Register::Live(r) => r,
            Register::Poisoned => u8::MAX,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Register::Live(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterAllocator {
    /// Next free register.
    top: usize,
    /// High-water mark for `top`.
    max_stack_size: usize,
    limit: usize,
}

impl RegisterAllocator {
    pub fn new() -> Self {
        Self::with_limit(MAX_REGISTERS)
    }

    /// An allocator with a smaller register file. Limits above 255 are clamped.
    pub fn with_limit(limit: usize) -> Self {
        RegisterAllocator {
            top: 0,
            max_stack_size: 0,
            limit: limit.min(MAX_REGISTERS),
        }
    }

    /// Allocate `n` consecutive registers, returning the first.
    ///
    /// On exhaustion the error is reported and `top` still advances, so the
    /// caller's matching `free(n)` stays balanced.
    pub fn allocate(&mut self, n: usize, diag: &mut Diagnostics) -> Register {
        let base = self.top;
        let exhausted = base + n > self.limit;
        if exhausted {
            diag.report(IrError::RegisterExhausted {
                requested: n,
                top: base,
                limit: self.limit,
            });
        }
        self.top += n;
        if self.top > self.max_stack_size {
            self.max_stack_size = self.top;
        }
        if exhausted {
            Register::Poisoned
        } else {
            self.register_at(base)
        }
    }

    /// Handle for register `index`: live below the limit, poisoned at or above it.
    pub fn register_at(&self, index: usize) -> Register {
        match u8::try_from(index) {
            Ok(r) if index < self.limit => Register::Live(r),
            _ => Register::Poisoned,
        }
    }

    /// Release the `n` most recently allocated registers.
    pub fn free(&mut self, n: usize, diag: &mut Diagnostics) {
        if n > self.top {
            diag.report(IrError::RegisterUnderflow {
                requested: n,
                top: self.top,
            });
            self.top = 0;
            return;
        }
        self.top -= n;
    }

    /// Release everything above `level`.
    pub fn free_to(&mut self, level: usize, diag: &mut Diagnostics) {
        let n = self.top.saturating_sub(level);
        self.free(n, diag);
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn max_stack_size(&self) -> usize {
        self.max_stack_size
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for RegisterAllocator {
    fn default() -> Self {
        Self::new()
    }
}
