//! Lua++ core types: the syntax tree and symbol identities shared by the
//! front end and the IR builder.

pub mod ast;
pub mod symbol;
