//! State graph builder and compiled executor.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use acommon::Registry;

use crate::{
    BranchDecider, FnNode, GraphError, GraphErrorKind, GraphRuntimeHooks, Node,
    NoopGraphRuntimeHooks,
};

/// Reserved target that terminates a run.
pub const END: &str = "__end__";
/// Reserved name of the implicit start marker in exported diagrams.
pub const START: &str = "__start__";
pub const DEFAULT_STEP_LIMIT: usize = 100;

pub type Router<S> = Arc<dyn Fn(&S, &dyn BranchDecider) -> String + Send + Sync>;

pub(crate) enum Edge<S> {
    Fixed(String),
    Conditional { router: Router<S>, targets: Vec<String> },
}

impl<S> Clone for Edge<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(to) => Self::Fixed(to.clone()),
            Self::Conditional { router, targets } => Self::Conditional {
                router: Arc::clone(router),
                targets: targets.clone(),
            },
        }
    }
}

impl<S> Edge<S> {
    pub(crate) fn targets(&self) -> Vec<&str> {
        match self {
            Self::Fixed(to) => vec![to.as_str()],
            Self::Conditional { targets, .. } => targets.iter().map(String::as_str).collect(),
        }
    }
}

pub struct StateGraph<S> {
    nodes: Registry<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, Edge<S>)>,
    entry: Option<String>,
    problems: Vec<String>,
}

impl<S> Default for StateGraph<S> {
    fn default() -> Self {
        Self {
            nodes: Registry::new(),
            edges: Vec::new(),
            entry: None,
            problems: Vec::new(),
        }
    }
}

impl<S> StateGraph<S>
where
    S: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node<N>(&mut self, name: impl Into<String>, node: N) -> &mut Self
    where
        N: Node<S> + 'static,
    {
        let name = name.into();
        if name == END || name == START || name.trim().is_empty() {
            self.problems.push(format!("'{name}' is not a valid node name"));
        } else if self.nodes.contains_key(&name) {
            self.problems.push(format!("node '{name}' is defined twice"));
        } else {
            self.nodes.insert(name, Arc::new(node));
        }
        self
    }

    pub fn add_fn_node<F, Fut>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S, GraphError>> + Send + 'static,
    {
        self.add_node(name, FnNode::new(handler))
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), Edge::Fixed(to.into())));
        self
    }

    /// Routes out of `from` by calling `router` after the node runs.
    ///
    /// The router must return one of `targets`; anything else fails the run with
    /// [`GraphErrorKind::InvalidTransition`].
    pub fn add_conditional_edges<R, I, T>(
        &mut self,
        from: impl Into<String>,
        router: R,
        targets: I,
    ) -> &mut Self
    where
        R: Fn(&S, &dyn BranchDecider) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.edges.push((
            from.into(),
            Edge::Conditional {
                router: Arc::new(router),
                targets: targets.into_iter().map(Into::into).collect(),
            },
        ));
        self
    }

    pub fn set_entry_point(&mut self, name: impl Into<String>) -> &mut Self {
        self.entry = Some(name.into());
        self
    }

    pub fn compile(&self) -> Result<CompiledGraph<S>, GraphError> {
        if let Some(problem) = self.problems.first() {
            return Err(GraphError::invalid_graph(problem.clone()));
        }

        let entry = self
            .entry
            .clone()
            .ok_or_else(|| GraphError::invalid_graph("entry point is not set"))?;
        if !self.nodes.contains_key(&entry) {
            return Err(GraphError::invalid_graph(format!(
                "entry point '{entry}' is not a node"
            )));
        }

        let mut edges = HashMap::new();
        for (from, edge) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(GraphError::invalid_graph(format!(
                    "edge source '{from}' is not a node"
                )));
            }
            if edges.insert(from.clone(), edge.clone()).is_some() {
                return Err(GraphError::invalid_graph(format!(
                    "node '{from}' has more than one outgoing edge specification"
                ))
                .with_node(from.clone()));
            }

            let targets = edge.targets();
            if targets.is_empty() {
                return Err(GraphError::invalid_graph(format!(
                    "conditional edges from '{from}' declare no targets"
                ))
                .with_node(from.clone()));
            }
            for target in targets {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(GraphError::invalid_graph(format!(
                        "edge target '{target}' is not a node"
                    ))
                    .with_node(from.clone()));
                }
            }
        }

        let order: Vec<String> = self.nodes.keys().cloned().collect();
        if let Some(dangling) = order.iter().find(|name| !edges.contains_key(*name)) {
            return Err(GraphError::invalid_graph(format!(
                "node '{dangling}' has no outgoing edge"
            ))
            .with_node(dangling.clone()));
        }

        let nodes = order
            .iter()
            .filter_map(|name| {
                self.nodes
                    .get(name)
                    .map(|node| (name.clone(), Arc::clone(node)))
            })
            .collect();

        Ok(CompiledGraph {
            nodes,
            edges,
            entry,
            order,
            step_limit: DEFAULT_STEP_LIMIT,
            hooks: Arc::new(NoopGraphRuntimeHooks),
        })
    }
}

/// Result of one run: final state plus the nodes visited in order.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRun<S> {
    pub state: S,
    pub path: Vec<String>,
}

impl<S> GraphRun<S> {
    pub fn steps(&self) -> usize {
        self.path.len()
    }

    pub fn visits(&self, node: &str) -> usize {
        self.path.iter().filter(|visited| *visited == node).count()
    }
}

pub struct CompiledGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(crate) edges: HashMap<String, Edge<S>>,
    pub(crate) entry: String,
    pub(crate) order: Vec<String>,
    step_limit: usize,
    hooks: Arc<dyn GraphRuntimeHooks>,
}

impl<S> CompiledGraph<S>
where
    S: Send + 'static,
{
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn GraphRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn node_names(&self) -> &[String] {
        &self.order
    }

    /// Runs from the entry point until a transition reaches [`END`].
    pub async fn invoke(
        &self,
        state: S,
        decider: &dyn BranchDecider,
    ) -> Result<GraphRun<S>, GraphError> {
        let mut state = state;
        let mut path = Vec::new();
        let mut current = self.entry.clone();

        while current != END {
            if path.len() >= self.step_limit {
                return Err(GraphError::step_limit_exceeded(format!(
                    "run exceeded {} steps",
                    self.step_limit
                ))
                .with_node(current));
            }

            let node = self.nodes.get(&current).ok_or_else(|| {
                GraphError::invalid_transition(format!("'{current}' is not a node"))
            })?;

            let step = path.len() + 1;
            self.hooks.on_step_start(&current, step);
            let started = Instant::now();
            state = match node.run(state).await {
                Ok(next_state) => next_state,
                Err(error) => {
                    let error = if error.node.is_some() {
                        error
                    } else {
                        error.with_node(current.clone())
                    };
                    self.hooks
                        .on_step_failure(&current, step, &error, started.elapsed());
                    return Err(error);
                }
            };
            self.hooks.on_step_success(&current, step, started.elapsed());

            let next = self.next_node(&current, &state, decider)?;
            self.hooks.on_transition(&current, &next);
            path.push(std::mem::replace(&mut current, next));
        }

        Ok(GraphRun { state, path })
    }

    fn next_node(
        &self,
        current: &str,
        state: &S,
        decider: &dyn BranchDecider,
    ) -> Result<String, GraphError> {
        match self.edges.get(current) {
            Some(Edge::Fixed(to)) => Ok(to.clone()),
            Some(Edge::Conditional { router, targets }) => {
                let chosen = router(state, decider);
                if targets.contains(&chosen) {
                    Ok(chosen)
                } else {
                    Err(GraphError::invalid_transition(format!(
                        "router chose undeclared target '{chosen}'"
                    ))
                    .with_node(current))
                }
            }
            None => Err(GraphError::new(
                GraphErrorKind::InvalidTransition,
                "node has no outgoing edge",
            )
            .with_node(current)),
        }
    }
}

impl<S> CompiledGraph<S> {
    pub(crate) fn fixed_and_conditional_edges(&self) -> Vec<(&str, &str, bool)> {
        let mut rendered = Vec::new();
        let mut seen = HashSet::new();
        for from in &self.order {
            let Some(edge) = self.edges.get(from) else {
                continue;
            };
            let conditional = matches!(edge, Edge::Conditional { .. });
            for to in edge.targets() {
                if seen.insert((from.as_str(), to)) {
                    rendered.push((from.as_str(), to, conditional));
                }
            }
        }
        rendered
    }
}

impl<S> Clone for CompiledGraph<S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            entry: self.entry.clone(),
            order: self.order.clone(),
            step_limit: self.step_limit,
            hooks: Arc::clone(&self.hooks),
        }
    }
}

impl<S> std::fmt::Debug for CompiledGraph<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledGraph")
            .field("entry", &self.entry)
            .field("nodes", &self.order)
            .field("step_limit", &self.step_limit)
            .finish_non_exhaustive()
    }
}
