//! Graph node contract and closure adapter.

use std::future::Future;
use std::sync::Arc;

use acommon::BoxFuture;

use crate::GraphError;

pub type GraphFuture<'a, T> = BoxFuture<'a, T>;

/// One named step: consumes the state and returns the next state.
pub trait Node<S>: Send + Sync {
    fn run<'a>(&'a self, state: S) -> GraphFuture<'a, Result<S, GraphError>>;
}

type NodeHandler<S> = dyn Fn(S) -> GraphFuture<'static, Result<S, GraphError>> + Send + Sync;

pub struct FnNode<S> {
    handler: Arc<NodeHandler<S>>,
}

impl<S> FnNode<S>
where
    S: Send + 'static,
{
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S, GraphError>> + Send + 'static,
    {
        let handler: Arc<NodeHandler<S>> = Arc::new(move |state| Box::pin(handler(state)));
        Self { handler }
    }
}

impl<S> Node<S> for FnNode<S>
where
    S: Send + 'static,
{
    fn run<'a>(&'a self, state: S) -> GraphFuture<'a, Result<S, GraphError>> {
        (self.handler)(state)
    }
}
