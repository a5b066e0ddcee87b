//! The toy five-step workflow.
//!
//! `step_1` through `step_5` run in sequence; after `step_5` a coin flip either
//! ends the run or loops back to `step_4`.
//!
//! ```rust
//! use abacus::workflow::{WorkflowState, build_workflow};
//! use agraph::ScriptedDecider;
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
//! # runtime.block_on(async {
//! let workflow = build_workflow().expect("workflow compiles");
//! let run = workflow
//!     .invoke(WorkflowState::new("demo"), &ScriptedDecider::flips([true]))
//!     .await
//!     .expect("run completes");
//! assert_eq!(run.state.trail, ["step_1", "step_2", "step_3", "step_4", "step_5"]);
//! # });
//! ```

use agraph::{BranchDecider, CompiledGraph, END, GraphError, StateGraph};

pub const STEPS: [&str; 5] = ["step_1", "step_2", "step_3", "step_4", "step_5"];

/// Step that decides between finishing and revisiting [`LOOP_TARGET`].
pub const DECISION_STEP: &str = "step_5";
pub const LOOP_TARGET: &str = "step_4";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowState {
    pub payload: String,
    pub trail: Vec<String>,
}

impl WorkflowState {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            trail: Vec::new(),
        }
    }

    fn visit(mut self, step: &str) -> Self {
        self.trail.push(step.to_string());
        self
    }
}

/// Heads ends the run, tails goes back to [`LOOP_TARGET`].
pub fn route_after_decision(_state: &WorkflowState, decider: &dyn BranchDecider) -> String {
    if decider.flip() {
        END.to_string()
    } else {
        LOOP_TARGET.to_string()
    }
}

pub fn build_workflow() -> Result<CompiledGraph<WorkflowState>, GraphError> {
    let mut graph = StateGraph::<WorkflowState>::new();

    for step in STEPS {
        graph.add_fn_node(step, move |state: WorkflowState| async move {
            println!("Executing {step} (payload: {})", state.payload);
            Ok(state.visit(step))
        });
    }

    for pair in STEPS.windows(2) {
        graph.add_edge(pair[0], pair[1]);
    }

    graph
        .set_entry_point(STEPS[0])
        .add_conditional_edges(DECISION_STEP, route_after_decision, [END, LOOP_TARGET]);

    graph.compile()
}
