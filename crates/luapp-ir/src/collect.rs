/// Flattening of a prototype tree into emission order.
use crate::proto::Proto;

/// Post-order list of every prototype in the tree.
///
/// Children come before their parent, siblings in definition order, so an
/// emitter numbering prototypes by list position always sees a closure's
/// target numbered before the `CLOSURE` that refers to it. The root is last.
pub fn collect(root: &Proto) -> Vec<&Proto> {
    let mut out = Vec::with_capacity(root.tree_size());
    collect_into(root, &mut out);
    out
}

fn collect_into<'a>(proto: &'a Proto, out: &mut Vec<&'a Proto>) {
    for child in &proto.protos {
        collect_into(child, out);
    }
    out.push(proto);
}

/// [`collect`] with each prototype paired with its global index.
pub fn number_protos(root: &Proto) -> Vec<(usize, &Proto)> {
    collect(root).into_iter().enumerate().collect()
}
