use super::helpers::*;
use luapp_core::ast::Node;
use luapp_ir::dump::dump_proto;
use luapp_ir::opcode::OpCode;
use luapp_ir::{collect, number_protos};

#[test]
fn e2e_collect_child_before_parent() {
    let proto = lower(vec![stmt(Node::function(vec![], false, vec![]))]);
    let list = collect(&proto);
    assert_eq!(list.len(), 2);
    assert!(std::ptr::eq(list[0], &proto.protos[0]));
    assert!(std::ptr::eq(list[1], &proto));
}

#[test]
fn e2e_collect_nested_tree() {
    let mut syms = Syms::new();
    let a = syms.id("a");
    let b = syms.id("b");
    // main { f1(a) { f2(a, b) {} }, f3() {} }
    let f2 = Node::function(vec![a, b], false, vec![]);
    let f1 = Node::function(vec![a], false, vec![stmt(f2)]);
    let f3 = Node::function(vec![], true, vec![]);
    let proto = lower(vec![stmt(f1), stmt(f3)]);

    let order: Vec<(u8, bool)> = collect(&proto)
        .iter()
        .map(|p| (p.num_params, p.is_vararg))
        .collect();
    assert_eq!(order, vec![(2, false), (1, false), (0, true), (0, true)]);
    assert_eq!(collect(&proto).len(), proto.tree_size());
}

#[test]
fn e2e_every_proto_after_its_descendants() {
    let leaf = || Node::function(vec![], false, vec![]);
    let mid = Node::function(vec![], false, vec![stmt(leaf()), stmt(leaf())]);
    let proto = lower(vec![stmt(mid), stmt(leaf())]);

    let numbered = number_protos(&proto);
    let index_of = |p: &luapp_ir::Proto| {
        numbered
            .iter()
            .find(|(_, q)| std::ptr::eq(*q, p))
            .map(|(i, _)| *i)
            .unwrap()
    };
    for (idx, p) in &numbered {
        for child in &p.protos {
            assert!(index_of(child) < *idx);
        }
    }
    assert_eq!(numbered.last().map(|(i, _)| *i), Some(4));
}

#[test]
fn e2e_dump_whole_tree() {
    let mut syms = Syms::new();
    let print = syms.id("print");
    let f = Node::function(
        vec![],
        false,
        vec![Node::call_stmt(Node::global(print), vec![Node::Number(1.5)])],
    );
    let proto = lower(vec![stmt(f)]);
    assert!(has_opcode(&proto, OpCode::Closure));
    let out = dump_proto(&proto, Some(&syms.0));
    let main_at = out.find("VARARGPREP").unwrap();
    let child_at = out.find("ARGPREP    0 0 0").unwrap();
    assert!(main_at < child_at);
    assert!(out.contains("string { \"print\" }"));
    assert!(out.contains("number { 1.5 }"));
}

#[test]
fn e2e_proto_serializes_to_json() {
    let mut syms = Syms::new();
    let s = syms.id("s");
    let proto = lower(vec![stmt(Node::String(s)), stmt(Node::Number(2.5))]);
    let json = serde_json::to_value(&proto).unwrap();
    assert_eq!(json["is_vararg"], true);
    assert_eq!(json["code"][0]["Abc"]["op"], "VarArgPrep");
    assert_eq!(json["code"][1]["Abx"]["bx"], 0);
    assert_eq!(json["constants"][0]["String"], 0);
    assert_eq!(json["constants"][1]["Number"], 2.5);
    assert_eq!(json["protos"].as_array().map(Vec::len), Some(0));
}
