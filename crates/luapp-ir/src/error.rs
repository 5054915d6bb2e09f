use luapp_core::symbol::SymbolId;
use thiserror::Error;

/// A fatal IR construction error for the current compilation unit.
///
/// Lowering keeps going after one of these so sibling subtrees can report
/// their own errors, but the resulting prototype tree must not be emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("out of registers when trying to allocate {requested} registers (top {top}, limit {limit})")]
    RegisterExhausted {
        requested: usize,
        top: usize,
        limit: usize,
    },
    #[error("attempt to free {requested} registers setting the stack size below the minimum of 0 (top {top})")]
    RegisterUnderflow { requested: usize, top: usize },
    #[error("local {symbol} is not bound in the current function")]
    UnboundLocal { symbol: SymbolId },
    /// A GETGLOBAL name or CLOSURE child index past 65535. Only constant
    /// loads have an extended form (`LOADKX` plus a payload word); these two
    /// operands have none, so the gap is reported instead of encoded.
    #[error("{op} operand {index} does not fit in 16 bits")]
    OperandOverflow { op: &'static str, index: usize },
}

/// Errors recorded while lowering one compilation unit, in report order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<IrError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: Vec::new() }
    }

    pub fn report(&mut self, error: IrError) {
        tracing::error!(%error, "IR construction error");
        self.errors.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[IrError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<IrError> {
        self.errors
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("IR construction failed with {} error(s): {}", .0.error_count(), summarize(.0))]
    Failed(Diagnostics),
}

impl BuildError {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            BuildError::Failed(diag) => diag,
        }
    }
}

fn summarize(diag: &Diagnostics) -> String {
    diag.errors()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid IR config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid IR config value: {0}")]
    Invalid(String),
}
