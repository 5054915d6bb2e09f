use super::helpers::*;
use luapp_core::ast::{FunctionBody, Node};
use luapp_ir::opcode::{Instruction, OpCode};
use luapp_ir::{build, build_with_config, IrConfig, IrError};

#[test]
fn e2e_register_exhaustion_reports_each_allocation() {
    let mut syms = Syms::new();
    let f = syms.id("f");
    let args: Vec<Node> = (0..300).map(|i| Node::Number(i as f64)).collect();
    let (proto, diag) = lower_with_diag(
        vec![Node::call_stmt(Node::global(f), args)],
        IrConfig::default(),
    );
    // callee + 300 args = 301 registers; bases 255..=300 are over the limit.
    assert_eq!(diag.error_count(), 46);
    assert!(diag
        .errors()
        .iter()
        .all(|e| matches!(e, IrError::RegisterExhausted { requested: 1, .. })));
    // The matching free stayed balanced: no underflow was reported.
    assert_eq!(proto.max_stack_size, 255);
}

#[test]
fn e2e_errors_in_sibling_statements_all_reported() {
    let mut syms = Syms::new();
    let f = syms.id("f");
    let y = syms.id("y");
    let config = IrConfig {
        max_registers: 2,
        ..IrConfig::default()
    };
    let (_, diag) = lower_with_diag(
        vec![
            Node::call_stmt(Node::global(f), vec![Node::Number(1.0), Node::Number(2.0)]),
            stmt(Node::local(y)),
            Node::call_stmt(Node::global(f), vec![Node::Number(3.0)]),
        ],
        config,
    );
    assert_eq!(diag.error_count(), 2);
    assert!(matches!(diag.errors()[0], IrError::RegisterExhausted { top: 2, limit: 2, .. }));
    assert_eq!(diag.errors()[1], IrError::UnboundLocal { symbol: y });
}

#[test]
fn e2e_unbound_local() {
    let mut syms = Syms::new();
    let x = syms.id("x");
    let err = build(&FunctionBody::program(vec![stmt(Node::local(x))])).unwrap_err();
    assert_eq!(
        err.diagnostics().errors(),
        &[IrError::UnboundLocal { symbol: x }]
    );
    assert!(err.to_string().contains("1 error(s)"));
}

#[test]
fn e2e_enclosing_local_is_not_visible() {
    let mut syms = Syms::new();
    let a = syms.id("a");
    let inner = Node::function(vec![], false, vec![stmt(Node::local(a))]);
    let outer = Node::function(vec![a], false, vec![stmt(inner)]);
    let err = build(&FunctionBody::program(vec![stmt(outer)])).unwrap_err();
    assert_eq!(err.diagnostics().error_count(), 1);
}

#[test]
fn e2e_too_many_params() {
    let mut syms = Syms::new();
    let params = (0..256).map(|i| syms.id(&format!("p{i}"))).collect();
    let err = build(&FunctionBody::program(vec![stmt(Node::function(params, false, vec![]))]))
        .unwrap_err();
    assert_eq!(err.diagnostics().error_count(), 1);
}

#[test]
fn e2e_config_limit_from_toml() {
    let config = IrConfig::from_toml_str("max_registers = 3").unwrap();
    let program = FunctionBody::program(vec![Node::call_stmt(
        Node::Number(0.0),
        vec![Node::Number(1.0), Node::Number(2.0)],
    )]);
    assert!(build_with_config(&program, &config).is_ok());

    let program = FunctionBody::program(vec![Node::call_stmt(
        Node::Number(0.0),
        vec![Node::Number(1.0), Node::Number(2.0), Node::Number(3.0)],
    )]);
    let err = build_with_config(&program, &config).unwrap_err();
    assert_eq!(err.diagnostics().error_count(), 1);
}

#[test]
fn e2e_call_base_past_limit_is_poisoned() {
    let mut syms = Syms::new();
    let f = syms.id("f");
    let config = IrConfig {
        max_registers: 1,
        ..IrConfig::default()
    };
    // `1, f()`: the call's base is register 1, one past the file.
    let list = expr_list(vec![Node::Number(1.0), Node::call(Node::global(f), vec![])]);
    let (proto, diag) = lower_with_diag(vec![stmt(list)], config);
    assert_eq!(
        body(&proto),
        &[
            Instruction::asbx(OpCode::LoadI, 0, 1),
            Instruction::abx(OpCode::GetGlobal, 255, 0),
            Instruction::abc(OpCode::Call, 255, 1, 1),
        ]
    );
    // Callee slot and the call's result slot.
    assert_eq!(diag.error_count(), 2);
    assert!(diag
        .errors()
        .iter()
        .all(|e| matches!(e, IrError::RegisterExhausted { top: 1, limit: 1, .. })));
}
