//! Traversal: yield order, full coverage, single yield under fan-in, and
//! termination on cyclic graphs — all without executing any node.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use weft::{join, traverse, Branch, FlowBuilder, GraphItem, Node, Selection, Step, NEXT_EDGE};

use crate::common::{add, double, pick_size};

/// Renders one traversal item as a compact string for order assertions.
fn render(item: &GraphItem<i32>) -> String {
    match item {
        GraphItem::Node(node) => format!("node:{}", node.name()),
        GraphItem::Edge(edge) => format!(
            "edge:{}:{}->{}",
            edge.name,
            edge.from.name(),
            edge.to.name()
        ),
    }
}

/// **Scenario**: a two-step chain yields exactly step, edge, step — three
/// items, in that order.
#[test]
fn two_step_chain_yields_three_items() {
    let s1 = double();
    let s2 = add("add_one", 1);
    join(&s1, &s2).unwrap();

    let items: Vec<String> = traverse(&s1).map(|i| render(&i)).collect();
    assert_eq!(
        items,
        vec![
            "node:double",
            "edge:next:double->add_one",
            "node:add_one",
        ]
    );

    let edge = traverse(&s1).nth(1).unwrap();
    assert_eq!(edge.as_edge().unwrap().name, NEXT_EDGE);
}

/// Every reachable node appears exactly once and every link yields exactly
/// one edge, branch entries in insertion order, expansion LIFO.
#[test]
fn branch_graph_covers_all_nodes_and_edges() {
    let flow = FlowBuilder::new()
        .step("entry", |x: i32| async move { Ok(x) })
        .branch(
            "size",
            [
                ("big", add("big_path", 1000)),
                ("small", add("small_path", 1)),
            ],
            pick_size,
        )
        .unwrap();

    let items: Vec<String> = traverse(&flow).map(|i| render(&i)).collect();
    assert_eq!(
        items,
        vec![
            "node:entry",
            "edge:next:entry->size",
            "node:size",
            "edge:big:size->big_path",
            "edge:small:size->small_path",
            "node:small_path",
            "node:big_path",
        ]
    );
}

/// Fan-in: a node reached from two predecessors is yielded once, while both
/// incoming edges still appear.
#[test]
fn diamond_fan_in_yields_shared_node_once() {
    let x = add("x", 1);
    let y = add("y", 2);
    let z = add("z", 3);
    join(&x, &z).unwrap();
    join(&y, &z).unwrap();
    let top = Branch::new(
        "top",
        [("a", Node::from(x)), ("b", Node::from(y))],
        |v: i32| async move { Ok(Selection::new("a", v)) },
    );

    let items: Vec<GraphItem<i32>> = traverse(&top).collect();
    let z_nodes = items
        .iter()
        .filter(|i| i.as_node().is_some_and(|n| n.name() == "z"))
        .count();
    let z_edges = items
        .iter()
        .filter(|i| i.as_edge().is_some_and(|e| e.to.name() == "z"))
        .count();
    assert_eq!(z_nodes, 1);
    assert_eq!(z_edges, 2);
    assert_eq!(items.len(), 8);
}

/// Cyclic graphs traverse finitely: each distinct node is scheduled at most
/// once.
#[test]
fn cycle_traversal_terminates() {
    let inc = add("inc", 1);
    let done = add("done", 100);
    let check = Branch::new(
        "check",
        [
            ("again", Node::from(inc.clone())),
            ("done", Node::from(done)),
        ],
        |x: i32| async move { Ok(Selection::new("done", x)) },
    );
    join(&inc, &check).unwrap();

    let items: Vec<GraphItem<i32>> = traverse(&inc).collect();
    let nodes: Vec<&str> = items
        .iter()
        .filter_map(|i| i.as_node().map(|n| n.name()))
        .collect();
    assert_eq!(nodes.len(), 3);
    assert!(nodes.contains(&"inc"));
    assert!(nodes.contains(&"check"));
    assert!(nodes.contains(&"done"));
    // Three links: inc->check, check->inc (again), check->done.
    assert_eq!(items.iter().filter(|i| i.as_edge().is_some()).count(), 3);
}

/// Traversal enumerates structure only: no node function runs.
#[test]
fn traversal_executes_nothing() {
    let touched = Arc::new(AtomicBool::new(false));
    let touched_step = Arc::clone(&touched);
    let step = Step::effect("observer", move |_x: i32| {
        let touched = Arc::clone(&touched_step);
        async move {
            touched.store(true, Ordering::SeqCst);
            Ok(())
        }
    });
    let next = add("after", 1);
    join(&step, &next).unwrap();

    assert_eq!(traverse(&step).count(), 3);
    assert!(!touched.load(Ordering::SeqCst));
}

/// Each `traverse` call starts fresh: the walk is restartable.
#[test]
fn traversal_is_restartable() {
    let s1 = double();
    let s2 = add("add_one", 1);
    join(&s1, &s2).unwrap();

    assert_eq!(traverse(&s1).count(), 3);
    assert_eq!(traverse(&s1).count(), 3);
}
