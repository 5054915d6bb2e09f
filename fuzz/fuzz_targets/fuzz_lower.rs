#![no_main]

use libfuzzer_sys::fuzz_target;
use luapp_core::ast::{FunctionBody, Identifier, Node};
use luapp_core::symbol::SymbolId;
use luapp_ir::{collect, IrBuilder, IrConfig};

/// Nesting limit for recursive shapes. Block and expression-list spines take a
/// 16-bit length of their own and are not bounded by it.
const MAX_DEPTH: usize = 24;

/// Decodes a syntax tree from fuzzer bytes. Running out of input yields leaves.
struct TreeReader<'a> {
    data: &'a [u8],
}

impl TreeReader<'_> {
    fn byte(&mut self) -> u8 {
        match self.data.split_first() {
            Some((&b, rest)) => {
                self.data = rest;
                b
            }
            None => 0,
        }
    }

    fn symbol(&mut self) -> SymbolId {
        SymbolId(u32::from(self.byte() % 8))
    }

    fn boxed(&mut self, depth: usize) -> Box<Node> {
        Box::new(self.node(depth + 1))
    }

    fn spine_len(&mut self) -> usize {
        usize::from(u16::from_le_bytes([self.byte(), self.byte()]))
    }

    fn items(&mut self, depth: usize) -> Vec<Node> {
        let len = self.spine_len();
        (0..len).map(|_| self.node(depth + 1)).collect()
    }

    fn node(&mut self, depth: usize) -> Node {
        if depth >= MAX_DEPTH || self.data.is_empty() {
            return Node::Number(f64::from(self.byte()));
        }
        match self.byte() % 12 {
            0 => Node::ExpressionStatement(self.boxed(depth)),
            1 => {
                let callee = self.boxed(depth);
                let args = if self.byte() % 2 == 0 {
                    None
                } else {
                    Some(self.boxed(depth))
                };
                Node::Call { callee, args }
            }
            2 => Node::String(self.symbol()),
            3 => Node::NameReference(self.boxed(depth)),
            4 => {
                let bits = u64::from_le_bytes(std::array::from_fn(|_| self.byte()));
                Node::Number(f64::from_bits(bits))
            }
            5 => Node::Identifier(Identifier {
                symbol: self.symbol(),
                is_global: self.byte() % 2 == 0,
            }),
            6 => Node::Block {
                init: Some(self.boxed(depth)),
                statement: Some(self.boxed(depth)),
            },
            7 => {
                let nparams = usize::from(self.byte() % 4);
                let params = (0..nparams).map(|_| self.symbol()).collect();
                let vararg = self.byte() % 2 == 0;
                let mut func = FunctionBody::new(params, vararg, vec![]);
                func.body = Some(self.boxed(depth));
                Node::FunctionBody(func)
            }
            8 => Node::ExpressionList {
                init: self.boxed(depth),
                expression: Some(self.boxed(depth)),
            },
            9 => Node::block(self.items(depth)),
            10 => {
                let mut list = vec![self.node(depth + 1)];
                list.extend(self.items(depth));
                Node::expr_list(list).unwrap_or(Node::Number(0.0))
            }
            _ => Node::Number(f64::from(self.byte())),
        }
    }
}

fuzz_target!(|data: &[u8]| {
    // Lowering must never panic; errors are reported through diagnostics.
    let mut reader = TreeReader { data };
    let body = reader.node(0);
    let program = FunctionBody {
        body: Some(Box::new(body)),
        ..FunctionBody::program(vec![])
    };
    let config = IrConfig {
        max_registers: 16,
        ..IrConfig::default()
    };
    let (proto, _diag) = IrBuilder::new(config).lower(&program);
    assert_eq!(collect(&proto).len(), proto.tree_size());
});
