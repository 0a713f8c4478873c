//! Render the objects reachable from a pointer as a Graphviz graph.

use std::collections::{HashSet, VecDeque};

use dot_writer::{Attributes, DotWriter, NodeId, PortId, Scope, Shape};
use maud::{html, Markup};

use crate::data::{Closure, Object, Pair, Ptr, Storage};

fn node_for_ptr(p: Ptr) -> String {
    format!(r#""{}""#, p.raw)
}

fn single_value(v: impl std::fmt::Display) -> Markup {
    html!(tr { td colspan="3" { (v) } })
}

/// Ports to link from a node, and the pointers they hold.
type Edges<'a> = Vec<(PortId, Ptr<'a>)>;

fn render_node<'a>(
    store: &'a Storage,
    graph: &mut Scope<'_, '_>,
    it: Ptr<'a>,
) -> (NodeId, Edges<'a>) {
    let mut node = if it.is_symbol() {
        // Symbols are addressed by their intern ID, not by an object.
        // Generate a unique node for each reference, so we don't get long edges.
        graph.node_auto()
    } else {
        graph.node_named(node_for_ptr(it))
    };
    node.set_shape(Shape::None);

    let mut targets = Vec::new();
    let value = match store.get(it) {
        Object::Nil => unreachable!("nil is rendered at its source"),
        Object::Integer(v) => single_value(v),
        Object::Symbol(s) => single_value(s.name()),
        Object::Error(message) => single_value(format!("error: {message}")),
        Object::NativeProc(proc) => single_value(format!("{proc:?}")),
        Object::Pair(Pair { car, cdr }) => {
            targets.extend([("car", car), ("cdr", cdr)]);
            html!(tr {
                td port="car" { (car.raw) }
                td port="cdr" colspan="2" { (cdr.raw) }
            })
        }
        Object::Closure(Closure { params, body, env }) => {
            targets.extend([("params", params), ("body", body), ("env", env)]);
            html!(tr {
                td port="params" { (params.raw) }
                td port="body" { (body.raw) }
                td port="env" { (env.raw) }
            })
        }
    };
    node.set_html(&format!(
        "<{}>",
        html!(table {
            tr { td border="0" colspan="3" { (it.raw) } }
            (value)
        })
        .into_string()
    ));
    let edges = targets
        .into_iter()
        .map(|(port, ptr)| (node.id().port(port), ptr))
        .collect();
    (node.id(), edges)
}

/// Render the object graph reachable from `root` into Graphviz source.
///
/// Each stored object appears once; symbols appear once per reference.
/// Nil pointers are shown in their referencing cell, not as nodes.
pub fn render_graph<'a>(store: &'a Storage, root: Ptr<'a>) -> Vec<u8> {
    let mut outbuf = Vec::new();
    {
        let mut writer = DotWriter::from(&mut outbuf);
        let mut graph = writer.digraph();
        graph.node_attributes().set_font("monospace");

        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        if !root.is_nil() {
            queue.push_back(root);
        }

        while let Some(it) = queue.pop_front() {
            if !it.is_symbol() && !seen.insert(it.raw) {
                continue;
            }
            let (_, edges) = render_node(store, &mut graph, it);
            for (port, target) in edges {
                if target.is_nil() {
                    continue;
                }
                if target.is_symbol() {
                    let (symbol_id, _) = render_node(store, &mut graph, target);
                    graph.edge(port, symbol_id);
                } else {
                    graph.edge(port, node_for_ptr(target));
                    queue.push_back(target);
                }
            }
        }
    }
    tracing::debug!(bytes = outbuf.len(), "rendered graph");
    outbuf
}
