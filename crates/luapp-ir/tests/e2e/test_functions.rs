use super::helpers::*;
use luapp_core::ast::Node;
use luapp_ir::constant::Constant;
use luapp_ir::opcode::{Instruction, OpCode};

#[test]
fn e2e_function_no_params() {
    let proto = lower(vec![stmt(Node::function(vec![], false, vec![]))]);
    assert_eq!(body(&proto), &[Instruction::abx(OpCode::Closure, 0, 0)]);
    assert_eq!(proto.protos.len(), 1);
    let child = &proto.protos[0];
    assert_eq!(child.num_params, 0);
    assert!(!child.is_vararg);
    assert_eq!(
        child.code.as_slice(),
        &[
            Instruction::abc(OpCode::ArgPrep, 0, 0, 0),
            Instruction::abc(OpCode::Return, 0, 1, 0),
        ]
    );
}

#[test]
fn e2e_function_vararg_params() {
    let mut syms = Syms::new();
    let a = syms.id("a");
    let proto = lower(vec![stmt(Node::function(vec![a], true, vec![]))]);
    let child = &proto.protos[0];
    assert_eq!(child.num_params, 1);
    assert!(child.is_vararg);
    assert_eq!(child.code.first(), Some(&Instruction::abc(OpCode::VarArgPrep, 1, 0, 0)));
    assert_eq!(child.max_stack_size, 1);
}

#[test]
fn e2e_function_body_uses_own_prototype() {
    let mut syms = Syms::new();
    let register = syms.id("register");
    let print = syms.id("print");
    let a = syms.id("a");
    let callback = Node::function(
        vec![a],
        false,
        vec![Node::call_stmt(Node::global(print), vec![Node::local(a)])],
    );
    let proto = lower(vec![Node::call_stmt(Node::global(register), vec![callback])]);

    assert_eq!(
        body(&proto),
        &[
            Instruction::abx(OpCode::GetGlobal, 0, 0),
            Instruction::abx(OpCode::Closure, 1, 0),
            Instruction::abc(OpCode::Call, 0, 2, 1),
        ]
    );
    assert_eq!(proto.constants.iter().collect::<Vec<_>>(), vec![Constant::String(register)]);

    let child = &proto.protos[0];
    assert_eq!(
        child.code.as_slice(),
        &[
            Instruction::abc(OpCode::ArgPrep, 1, 0, 0),
            Instruction::abx(OpCode::GetGlobal, 1, 0),
            Instruction::abc(OpCode::Move, 2, 0, 0),
            Instruction::abc(OpCode::Call, 1, 2, 1),
            Instruction::abc(OpCode::Return, 0, 1, 0),
        ]
    );
    assert_eq!(child.constants.iter().collect::<Vec<_>>(), vec![Constant::String(print)]);
    assert_eq!(child.max_stack_size, 3);
}

#[test]
fn e2e_closures_indexed_in_definition_order() {
    let mut syms = Syms::new();
    let a = syms.id("a");
    let proto = lower(vec![
        stmt(Node::function(vec![], false, vec![])),
        stmt(Node::function(vec![a], false, vec![])),
        stmt(Node::function(vec![a, a], true, vec![])),
    ]);
    let bxs: Vec<u16> = body(&proto).iter().filter_map(|i| i.bx()).collect();
    assert_eq!(bxs, vec![0, 1, 2]);
    let params: Vec<u8> = proto.protos.iter().map(|p| p.num_params).collect();
    assert_eq!(params, vec![0, 1, 2]);
}

#[test]
fn e2e_nested_closure() {
    let inner = Node::function(vec![], false, vec![stmt(Node::Number(0.25))]);
    let outer = Node::function(vec![], false, vec![stmt(inner)]);
    let proto = lower(vec![stmt(outer)]);

    assert_eq!(proto.protos.len(), 1);
    let outer = &proto.protos[0];
    assert_eq!(outer.protos.len(), 1);
    assert!(has_opcode(outer, OpCode::Closure));
    assert!(outer.constants.is_empty());

    let inner = &outer.protos[0];
    assert!(inner.protos.is_empty());
    assert_eq!(inner.constants.get(0), Some(Constant::Number(0.25)));
    assert_eq!(
        ops(inner),
        vec![Some(OpCode::ArgPrep), Some(OpCode::LoadK), Some(OpCode::Return)]
    );
}

#[test]
fn e2e_closure_register_in_parent() {
    // A closure created while another value is live lands above it.
    let list = expr_list(vec![Node::Number(1.0), Node::function(vec![], false, vec![])]);
    let proto = lower(vec![stmt(list)]);
    assert_eq!(
        body(&proto),
        &[
            Instruction::asbx(OpCode::LoadI, 0, 1),
            Instruction::abx(OpCode::Closure, 1, 0),
        ]
    );
}

#[test]
fn e2e_main_is_vararg() {
    let proto = lower(vec![]);
    assert!(proto.is_vararg);
    assert_eq!(proto.num_params, 0);
    assert_eq!(ops(&proto), vec![Some(OpCode::VarArgPrep), Some(OpCode::Return)]);
}
