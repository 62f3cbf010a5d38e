//! Builder for transition graphs.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{State, Transition};
use crate::graph::TransitionGraph;

/// Builder declaring each source state exactly once.
///
/// Errors are deferred to [`build`](GraphBuilder::build) so declarations
/// can be chained.
pub struct GraphBuilder<T, S: State> {
    graph: TransitionGraph<T, S>,
    error: Option<BuildError>,
}

impl<T, S: State> GraphBuilder<T, S> {
    pub fn new() -> Self {
        Self {
            graph: TransitionGraph::new(),
            error: None,
        }
    }

    /// Declare the transitions leaving `source`.
    pub fn state(mut self, source: S, transitions: Vec<Transition<T, S>>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if source.name().is_empty() {
            self.error = Some(BuildError::EmptySourceState);
        } else if self.graph.declares(&source) {
            self.error = Some(BuildError::DuplicateSource(source.name().to_string()));
        } else {
            self.graph.declare(source, transitions);
        }
        self
    }

    /// Declare transitions from builders, surfacing their errors.
    pub fn state_with(
        self,
        source: S,
        builders: Vec<TransitionBuilder<T, S>>,
    ) -> Result<Self, BuildError> {
        let transitions = builders
            .into_iter()
            .map(TransitionBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.state(source, transitions))
    }

    /// A source with no outgoing transitions.
    pub fn terminal(self, source: S) -> Self {
        self.state(source, Vec::new())
    }

    pub fn build(self) -> Result<TransitionGraph<T, S>, BuildError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.graph),
        }
    }
}

impl<T, S: State> Default for GraphBuilder<T, S> {
    fn default() -> Self {
        Self::new()
    }
}
