//! Minimal state graph engine.
//!
//! One state type flows through named nodes. Each node has exactly one outgoing
//! edge specification: a fixed edge or a set of conditional edges whose router
//! consults an injected [`BranchDecider`]. Runs stop when a transition reaches
//! [`END`] and are guarded by a step limit.
//!
//! ```rust
//! use agraph::{END, ScriptedDecider, StateGraph};
//!
//! # tokio_test_runtime();
//! # fn tokio_test_runtime() {
//! #     let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
//! #     runtime.block_on(run());
//! # }
//! async fn run() {
//!     let mut graph = StateGraph::<u32>::new();
//!     graph
//!         .add_fn_node("double", |n| async move { Ok(n * 2) })
//!         .add_fn_node("check", |n| async move { Ok(n) })
//!         .set_entry_point("double")
//!         .add_edge("double", "check")
//!         .add_conditional_edges(
//!             "check",
//!             |n: &u32, _decider: &dyn agraph::BranchDecider| {
//!                 if *n >= 8 { END.to_string() } else { "double".to_string() }
//!             },
//!             ["double", END],
//!         );
//!
//!     let compiled = graph.compile().expect("graph is valid");
//!     let run = compiled
//!         .invoke(1, &ScriptedDecider::default())
//!         .await
//!         .expect("run completes");
//!
//!     assert_eq!(run.state, 8);
//!     assert_eq!(run.visits("double"), 3);
//! }
//! ```

mod decider;
mod error;
mod graph;
mod hooks;
mod mermaid;
mod node;

pub mod prelude {
    pub use crate::{
        BranchDecider, CoinFlip, CompiledGraph, END, GraphError, GraphErrorKind, GraphRun,
        GraphRuntimeHooks, Node, ScriptedDecider, StateGraph,
    };
}

pub use decider::{BranchDecider, CoinFlip, ScriptedDecider};
pub use error::{GraphError, GraphErrorKind};
pub use graph::{CompiledGraph, DEFAULT_STEP_LIMIT, END, GraphRun, Router, START, StateGraph};
pub use hooks::{GraphRuntimeHooks, NoopGraphRuntimeHooks};
pub use node::{FnNode, GraphFuture, Node};

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> StateGraph<Vec<String>> {
        let mut graph = StateGraph::new();
        graph
            .add_fn_node("a", |mut trail: Vec<String>| async move {
                trail.push("a".to_string());
                Ok(trail)
            })
            .add_fn_node("b", |mut trail: Vec<String>| async move {
                trail.push("b".to_string());
                Ok(trail)
            })
            .set_entry_point("a")
            .add_edge("a", "b")
            .add_edge("b", END);
        graph
    }

    #[tokio::test]
    async fn linear_graph_runs_to_end() {
        let compiled = linear().compile().expect("valid graph");
        let run = compiled
            .invoke(Vec::new(), &ScriptedDecider::default())
            .await
            .expect("run completes");

        assert_eq!(run.path, vec!["a", "b"]);
        assert_eq!(run.state, vec!["a", "b"]);
        assert_eq!(run.steps(), 2);
    }

    #[test]
    fn compile_requires_entry_point() {
        let mut graph = StateGraph::<u8>::new();
        graph.add_fn_node("a", |n| async move { Ok(n) }).add_edge("a", END);

        let error = graph.compile().expect_err("missing entry");
        assert_eq!(error.kind, GraphErrorKind::InvalidGraph);
        assert!(error.message.contains("entry point"));
    }

    #[test]
    fn compile_rejects_unknown_targets_and_missing_edges() {
        let mut graph = linear();
        graph.add_fn_node("c", |trail| async move { Ok(trail) });
        let error = graph.compile().expect_err("c has no outgoing edge");
        assert_eq!(error.node.as_deref(), Some("c"));

        let mut graph = StateGraph::<u8>::new();
        graph
            .add_fn_node("a", |n| async move { Ok(n) })
            .set_entry_point("a")
            .add_edge("a", "nowhere");
        let error = graph.compile().expect_err("unknown target");
        assert!(error.message.contains("nowhere"));
    }

    #[test]
    fn compile_rejects_duplicate_outgoing_specifications_and_nodes() {
        let mut graph = linear();
        graph.add_edge("a", END);
        let error = graph.compile().expect_err("two edges from a");
        assert!(error.message.contains("more than one"));

        let mut graph = linear();
        graph.add_fn_node("a", |trail| async move { Ok(trail) });
        let error = graph.compile().expect_err("duplicate node");
        assert!(error.message.contains("defined twice"));

        let mut graph = StateGraph::<u8>::new();
        graph.add_fn_node(END, |n| async move { Ok(n) });
        assert!(graph.compile().is_err());
    }

    #[tokio::test]
    async fn node_failures_carry_node_name() {
        let mut graph = StateGraph::<u8>::new();
        graph
            .add_fn_node("boom", |_n| async move {
                Err(GraphError::node_failed("exploded"))
            })
            .set_entry_point("boom")
            .add_edge("boom", END);

        let error = graph
            .compile()
            .expect("valid")
            .invoke(0, &ScriptedDecider::default())
            .await
            .expect_err("node fails");
        assert_eq!(error.kind, GraphErrorKind::NodeFailed);
        assert_eq!(error.node.as_deref(), Some("boom"));
    }

    #[test]
    fn mermaid_export_lists_nodes_and_edges() {
        let mut graph = linear();
        graph.add_fn_node("c", |trail| async move { Ok(trail) });
        graph.add_conditional_edges(
            "c",
            |_trail: &Vec<String>, _decider: &dyn BranchDecider| END.to_string(),
            [END, "a"],
        );
        let compiled = graph.compile().expect("valid");

        let diagram = compiled.to_mermaid();
        assert!(diagram.starts_with("flowchart TD\n"));
        assert!(diagram.contains("    __start__ --> a\n"));
        assert!(diagram.contains("    a --> b\n"));
        assert!(diagram.contains("    b --> __end__\n"));
        assert!(diagram.contains("    c -.-> __end__\n"));
        assert!(diagram.contains("    c -.-> a\n"));
    }
}
