/// Human-readable listing of a prototype tree.
use crate::constant::Constant;
use crate::proto::Proto;
use luapp_core::symbol::SymbolTable;
use std::fmt;

const RULE: &str = "----------------------------------------------------------------";

/// Display adapter: `ProtoDump::new(&proto).with_symbols(&table).to_string()`.
pub struct ProtoDump<'a> {
    proto: &'a Proto,
    symbols: Option<&'a SymbolTable>,
}

impl<'a> ProtoDump<'a> {
    pub fn new(proto: &'a Proto) -> Self {
        ProtoDump {
            proto,
            symbols: None,
        }
    }

    /// Render string constants by name instead of symbol id.
    pub fn with_symbols(mut self, symbols: &'a SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    fn write_proto(&self, f: &mut fmt::Formatter<'_>, proto: &Proto) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "is_vararg       {:>7}", proto.is_vararg)?;
        writeln!(f, "num_params      {:>7}", proto.num_params)?;
        writeln!(f, "max_stack_size  {:>7}", proto.max_stack_size)?;
        writeln!(f)?;

        for (pc, inst) in proto.code.iter().enumerate() {
            writeln!(f, "[{:04}]     {inst}", pc + 1)?;
        }
        writeln!(f)?;

        writeln!(f, "constants:")?;
        for k in proto.constants.iter() {
            match k {
                Constant::String(id) => match self.symbols.and_then(|s| s.name(id)) {
                    Some(name) => writeln!(f, "   string {{ {name:?} }}")?,
                    None => writeln!(f, "   string {{ {id} }}")?,
                },
                Constant::Number(n) => writeln!(f, "   number {{ {n} }}")?,
            }
        }
        writeln!(f, "{RULE}")?;

        for child in &proto.protos {
            self.write_proto(f, child)?;
        }
        Ok(())
    }
}

impl fmt::Display for ProtoDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_proto(f, self.proto)
    }
}

/// Render a prototype tree, parent before children.
pub fn dump_proto(proto: &Proto, symbols: Option<&SymbolTable>) -> String {
    let dump = ProtoDump::new(proto);
    match symbols {
        Some(table) => dump.with_symbols(table).to_string(),
        None => dump.to_string(),
    }
}
