/// Syntax tree consumed by the IR builder.
///
/// Statement and expression sequences are left-nested cons cells
/// (`Block`, `ExpressionList`) the way the parser produces them; the
/// constructors below build those chains from flat vectors.
use crate::symbol::SymbolId;

/// A resolved identifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Identifier {
    pub symbol: SymbolId,
    /// Set by name resolution when no enclosing local binds the name.
    pub is_global: bool,
}

/// Formal parameters of a function body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterList {
    pub names: Vec<SymbolId>,
    /// Trailing `...`.
    pub vararg: bool,
}

/// A function body: parameters plus the statements inside it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FunctionBody {
    pub params: ParameterList,
    pub body: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// An expression evaluated for its side effects.
    ExpressionStatement(Box<Node>),
    /// `callee(args)`. `args` is absent, a single expression, or an `ExpressionList`.
    Call {
        callee: Box<Node>,
        args: Option<Box<Node>>,
    },
    /// String literal, already interned.
    String(SymbolId),
    /// Wrapper around an identifier used as a value.
    NameReference(Box<Node>),
    Number(f64),
    Identifier(Identifier),
    /// Statement sequence: `init` runs before `statement`.
    Block {
        init: Option<Box<Node>>,
        statement: Option<Box<Node>>,
    },
    /// Anonymous function (closure) expression.
    FunctionBody(FunctionBody),
    /// Expression sequence: `init` is evaluated before `expression`.
    ExpressionList {
        init: Box<Node>,
        expression: Option<Box<Node>>,
    },
}

impl Node {
    /// Build a statement sequence. An empty vector yields an empty block.
    pub fn block(statements: Vec<Node>) -> Node {
        let mut iter = statements.into_iter();
        let Some(first) = iter.next() else {
            return Node::Block {
                init: None,
                statement: None,
            };
        };
        let mut acc = Node::Block {
            init: Some(Box::new(first)),
            statement: None,
        };
        for stmt in iter {
            acc = Node::Block {
                init: Some(Box::new(acc)),
                statement: Some(Box::new(stmt)),
            };
        }
        acc
    }

    /// Build an expression sequence. A single expression is returned as is;
    /// an empty vector has no list form and yields `None`.
    pub fn expr_list(exprs: Vec<Node>) -> Option<Node> {
        let mut iter = exprs.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, e| Node::ExpressionList {
            init: Box::new(acc),
            expression: Some(Box::new(e)),
        }))
    }

    /// `callee(args...)`. No arguments leaves `args` absent.
    pub fn call(callee: Node, args: Vec<Node>) -> Node {
        Node::Call {
            callee: Box::new(callee),
            args: Node::expr_list(args).map(Box::new),
        }
    }

    /// A call wrapped as a statement.
    pub fn call_stmt(callee: Node, args: Vec<Node>) -> Node {
        Node::ExpressionStatement(Box::new(Node::call(callee, args)))
    }

    /// Reference to a global name.
    pub fn global(symbol: SymbolId) -> Node {
        Node::NameReference(Box::new(Node::Identifier(Identifier {
            symbol,
            is_global: true,
        })))
    }

    /// Reference to a local name.
    pub fn local(symbol: SymbolId) -> Node {
        Node::NameReference(Box::new(Node::Identifier(Identifier {
            symbol,
            is_global: false,
        })))
    }

    /// Closure expression.
    pub fn function(params: Vec<SymbolId>, vararg: bool, body: Vec<Node>) -> Node {
        Node::FunctionBody(FunctionBody::new(params, vararg, body))
    }

    /// Number of expressions in an expression sequence. Any other node counts as one.
    pub fn list_len(&self) -> usize {
        self.list_items().len()
    }

    /// The expressions of a sequence in evaluation order.
    ///
    /// Walks the `init` spine with an explicit stack, so parser-built lists of
    /// any length are safe.
    pub fn list_items(&self) -> Vec<&Node> {
        let mut items = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::ExpressionList { init, expression } => {
                    if let Some(expression) = expression {
                        pending.push(expression);
                    }
                    pending.push(init);
                }
                other => items.push(other),
            }
        }
        items
    }

    /// The statements of a block in execution order, with nested blocks flattened.
    pub fn block_items(&self) -> Vec<&Node> {
        let mut items = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::Block { init, statement } => {
                    if let Some(statement) = statement {
                        pending.push(statement);
                    }
                    if let Some(init) = init {
                        pending.push(init);
                    }
                }
                other => items.push(other),
            }
        }
        items
    }

    /// Move every boxed child out of `self`, leaving leaves in their place.
    fn detach_children(&mut self, out: &mut Vec<Node>) {
        fn take(slot: &mut Node, out: &mut Vec<Node>) {
            if !matches!(slot, Node::Number(_) | Node::String(_) | Node::Identifier(_)) {
                out.push(std::mem::replace(slot, Node::Number(0.0)));
            }
        }
        match self {
            Node::ExpressionStatement(inner) | Node::NameReference(inner) => take(inner, out),
            Node::Call { callee, args } => {
                take(callee, out);
                if let Some(args) = args.take() {
                    out.push(*args);
                }
            }
            Node::Block { init, statement } => {
                out.extend(init.take().map(|b| *b));
                out.extend(statement.take().map(|b| *b));
            }
            Node::FunctionBody(func) => out.extend(func.body.take().map(|b| *b)),
            Node::ExpressionList { init, expression } => {
                take(init, out);
                out.extend(expression.take().map(|b| *b));
            }
            Node::String(_) | Node::Number(_) | Node::Identifier(_) => {}
        }
    }
}

/// Sequences are nested one level per element, so the default recursive drop
/// would overflow the stack on long programs. Children are unlinked onto a
/// heap worklist instead.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl FunctionBody {
    pub fn new(params: Vec<SymbolId>, vararg: bool, body: Vec<Node>) -> Self {
        let body = if body.is_empty() {
            None
        } else {
            Some(Box::new(Node::block(body)))
        };
        FunctionBody {
            params: ParameterList {
                names: params,
                vararg,
            },
            body,
        }
    }

    /// A top-level chunk: no named parameters.
    pub fn program(body: Vec<Node>) -> Self {
        Self::new(Vec::new(), true, body)
    }
}
